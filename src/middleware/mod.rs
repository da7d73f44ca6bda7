//! Middleware module
//!
//! Authentication gate, preflight status and request logging

pub mod auth;
pub mod logging;
pub mod preflight;

pub use auth::auth_middleware;
pub use logging::request_logging_middleware;
pub use preflight::preflight_middleware;
