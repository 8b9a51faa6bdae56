//! HTTP surface of the account service
//!
//! Library exports for the binary and for integration tests.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;

pub use app::create_app;
pub use routes::user::AppState;
