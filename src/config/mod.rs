//! Configuration management module
//!
//! Responsible for loading the application configuration from environment variables and `.env`

pub mod settings;

pub use settings::Settings;
