//! Error types for the verifier core.
//!
//! A non-200 response is not an error here: it is a `Verdict::Rejected` and
//! gets reported like any other outcome. `ApiError` only covers the cases the
//! host cannot recover from.

use std::fmt;

#[derive(Debug)]
pub enum ApiError {
    /// The token is empty or holds characters that cannot go in a header value.
    InvalidToken(String),

    /// A 200 response whose body is not valid JSON.
    Deserialization(String),

    /// The decoded body could not be rendered back to text.
    Serialization(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::InvalidToken(reason) => write!(f, "invalid token: {reason}"),
            ApiError::Deserialization(msg) => {
                write!(f, "deserialization failed: {msg}")
            }
            ApiError::Serialization(msg) => {
                write!(f, "serialization failed: {msg}")
            }
        }
    }
}

impl std::error::Error for ApiError {}
