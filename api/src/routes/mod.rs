//! HTTP route handlers

pub mod user;
