//! Error types for the model crate.
//!
//! Only input validation lives here. Transport and lookup failures belong
//! to the `api-client` crate, which is the only place that performs I/O.

use thiserror::Error;

/// User-facing text shown when the query fails validation.
pub const VALIDATION_MESSAGE: &str = "Please enter a valid User ID.";

/// Errors raised while validating user input before any request is made
///
/// These never reach the network: the caller shows the message inline and
/// leaves the request state untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The query was empty or contained only whitespace
    #[error("Please enter a valid User ID.")]
    EmptyQuery,
}

impl ValidationError {
    /// The message to display next to the input bar
    pub fn user_message(&self) -> &'static str {
        match self {
            ValidationError::EmptyQuery => VALIDATION_MESSAGE,
        }
    }
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, ValidationError>;
