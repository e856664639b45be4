// Shared Kernel
// Identifiers, errors, configuration and utilities used by every module

pub mod config;          // Environment-driven configuration
pub mod domain;          // Shared domain concepts (typed ids)
pub mod errors;          // Shared error types
pub mod utils;           // Logging and field validation

// Re-exports for convenience
pub use config::AppConfig;
pub use errors::{AppError, AppResult};
