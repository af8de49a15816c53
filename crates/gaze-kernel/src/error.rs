//! Kernel error types.
//!
//! Widget fetch failures are never kernel errors; they are recorded in the
//! page results. These errors cover loading and validating configuration.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum KernelError {
    /// No config file at the resolved path.
    #[error("Config file not found: {}", .0.display())]
    ConfigNotFound(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// The config parsed but describes a layout that cannot be built.
    #[error("Invalid configuration:\n  {}", .0.join("\n  "))]
    Validation(Vec<String>),
}

/// Alias for kernel results.
pub type KernelResult<T> = Result<T, KernelError>;
