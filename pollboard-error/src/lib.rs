// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions)]
//! Error types for the Pollboard display client
//!
//! Every failure a display page can run into (a fetch that does not come back,
//! a payload that does not decode, an element the page does not carry) maps to a
//! variant of [`PollboardError`]. The display loops never stop on these errors;
//! they log them and wait for the next tick.
//!
//! # Examples
//!
//! ```
//! use pollboard_error::{PollboardError, Result};
//!
//! fn lookup(id: &str) -> Result<()> {
//!     Err(PollboardError::missing_element(id))
//! }
//!
//! assert!(lookup("grid-container").is_err());
//! ```

/// Root error type for all Pollboard operations
#[derive(Debug, thiserror::Error)]
pub enum PollboardError {
    /// The display data request failed or returned a non-success status
    #[error("Fetch failed: {context}")]
    FetchError {
        /// What went wrong with the request
        context: String,
    },

    /// A JSON payload could not be decoded
    #[error("Decode failed: {context}")]
    DecodeError {
        /// Which payload and why
        context: String,
    },

    /// A required DOM element is not present on the page
    #[error("Element not found: {id}")]
    MissingElement {
        /// The element id or selector that was looked up
        id: String,
    },

    /// A DOM call threw
    #[error("DOM operation failed: {context}")]
    DomError {
        /// The operation that failed, with the thrown value rendered as text
        context: String,
    },

    /// The display configuration is unusable
    ///
    /// Raised for TOML that does not parse as well as values that would make
    /// the loops meaningless (zero page size, zero intervals).
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of the offending setting
        message: String,
    },

    /// Custom error from user code
    #[error("User error: {0}")]
    UserError(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl PollboardError {
    /// Create a fetch error with the given context
    pub fn fetch_error(context: impl Into<String>) -> Self {
        Self::FetchError {
            context: context.into(),
        }
    }

    /// Create a decode error with the given context
    pub fn decode_error(context: impl Into<String>) -> Self {
        Self::DecodeError {
            context: context.into(),
        }
    }

    /// Create a missing element error for the given id
    pub fn missing_element(id: impl Into<String>) -> Self {
        Self::MissingElement { id: id.into() }
    }

    /// Create a DOM error with the given context
    pub fn dom_error(context: impl Into<String>) -> Self {
        Self::DomError {
            context: context.into(),
        }
    }

    /// Create an invalid configuration error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Wrap a user error
    pub fn user_error(error: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::UserError(Box::new(error))
    }

    /// Check if this is a recoverable error
    ///
    /// A failed fetch may well succeed on the next refresh cycle.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::FetchError { .. })
    }

    /// Check if this error indicates a permanent failure
    #[must_use]
    pub const fn is_permanent(&self) -> bool {
        matches!(
            self,
            Self::MissingElement { .. } | Self::InvalidConfig { .. }
        )
    }
}

/// Specialized Result type for Pollboard operations
pub type Result<T> = std::result::Result<T, PollboardError>;

/// Helper trait for adding context to `Result`s
pub trait ResultExt<T> {
    /// Add context to an error
    ///
    /// # Errors
    /// Returns `Err(PollboardError)` if the underlying result is `Err`.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context to an error using a closure (lazy evaluation)
    ///
    /// # Errors
    /// Returns `Err(PollboardError)` if the underlying result is `Err`.
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<PollboardError>,
{
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| prepend_context(context.into(), e.into()))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| prepend_context(f(), e.into()))
    }
}

fn prepend_context(context: String, error: PollboardError) -> PollboardError {
    match error {
        PollboardError::FetchError { context: inner } => PollboardError::FetchError {
            context: format!("{context}: {inner}"),
        },
        PollboardError::DecodeError { context: inner } => PollboardError::DecodeError {
            context: format!("{context}: {inner}"),
        },
        PollboardError::DomError { context: inner } => PollboardError::DomError {
            context: format!("{context}: {inner}"),
        },
        PollboardError::UserError(inner) => PollboardError::UserError(Box::new(Contextual {
            context,
            source: inner,
        })),
        other => other,
    }
}

/// A user error with context prepended, keeping the original as its source
#[derive(Debug, thiserror::Error)]
#[error("{context}: {source}")]
struct Contextual {
    context: String,
    #[source]
    source: Box<dyn std::error::Error + Send + Sync>,
}
