#[macro_use]
pub mod macros;

pub mod compat;
pub mod config;
pub mod error;
pub mod ir;
pub mod legacy;
pub mod pretty;
pub mod schema;

// Re-export commonly used items for convenience
pub use tracing;

pub type Error = crate::error::Error;
pub type Result<T> = crate::error::Result<T>;
