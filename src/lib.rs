pub mod config;
pub mod error;

// Matching core
pub mod matcher;

// HTTP API
pub mod api;

// CLI
pub mod cli;

// Utilities
pub mod utils;

// Re-exports
pub use config::Settings;
pub use error::{Error, Result};
