//! Unit tests for the token service
