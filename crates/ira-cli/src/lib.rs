//! ira CLI library
//!
//! Configuration loading, diagnostics and the command implementations behind
//! the `ira` binary.

pub mod cli;
pub mod commands;
pub mod diagnostics;

// CLI-specific error handling
pub mod error {
    use thiserror::Error;

    #[derive(Error, Debug)]
    pub enum CliError {
        #[error("IO error: {0}")]
        Io(#[from] std::io::Error),

        #[error("Configuration error: {0}")]
        Config(String),

        #[error("Translation error: {0}")]
        Translate(#[from] ira_core::Error),

        #[error("Serialization error: {0}")]
        Serialize(#[from] serde_json::Error),

        #[error("Invalid input: {0}")]
        InvalidInput(String),
    }

    pub type Result<T> = std::result::Result<T, CliError>;
}

pub use error::{CliError, Result};
