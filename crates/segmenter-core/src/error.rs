//! Error types for Segmenter.
//!
//! This module provides a unified error type for catalog, configuration and
//! rule-compilation failures, designed to be surfaced directly to API clients.

use thiserror::Error;

use crate::config::ConfigError;
use crate::rules::CompileError;

/// Result type alias for Segmenter operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in Segmenter operations.
///
/// Each variant includes a descriptive error message suitable for end-users.
/// Error codes follow the pattern `SEG-XXX`; rule compilation errors use the
/// `SEG-1XX` range.
#[derive(Error, Debug)]
pub enum Error {
    /// Rule text failed to compile (SEG-101..SEG-105).
    #[error(transparent)]
    Compile(#[from] CompileError),

    /// Product not found (SEG-002).
    #[error("[SEG-002] Product with ID '{0}' not found")]
    ProductNotFound(u64),

    /// Duplicate product ID (SEG-003).
    #[error("[SEG-003] Duplicate product ID '{0}'")]
    DuplicateProduct(u64),

    /// Invalid product record (SEG-004).
    #[error("[SEG-004] Invalid product record: {0}")]
    InvalidRecord(String),

    /// Field cannot be used to order results (SEG-005).
    #[error("[SEG-005] Field '{0}' cannot be used for ordering")]
    UnsortableField(String),

    /// Configuration error (SEG-006).
    #[error("[SEG-006] Configuration error: {0}")]
    Config(String),

    /// IO error (SEG-007).
    #[error("[SEG-007] IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error (SEG-008).
    #[error("[SEG-008] Serialization error: {0}")]
    Serialization(String),
}

impl Error {
    /// Returns the error code (e.g., "SEG-002").
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Compile(e) => e.code(),
            Self::ProductNotFound(_) => "SEG-002",
            Self::DuplicateProduct(_) => "SEG-003",
            Self::InvalidRecord(_) => "SEG-004",
            Self::UnsortableField(_) => "SEG-005",
            Self::Config(_) => "SEG-006",
            Self::Io(_) => "SEG-007",
            Self::Serialization(_) => "SEG-008",
        }
    }

    /// Returns true if the error was caused by caller input rather than by
    /// the system.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::Compile(_)
                | Self::ProductNotFound(_)
                | Self::DuplicateProduct(_)
                | Self::InvalidRecord(_)
                | Self::UnsortableField(_)
        )
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}
