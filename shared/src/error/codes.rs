//! Error codes and their HTTP statuses

use http::StatusCode;
use std::fmt;

/// Error code carried by every [`AppError`](super::AppError)
///
/// Numbering: 0xxx request problems, 4xxx orders, 9xxx infrastructure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum ErrorCode {
    ValidationFailed = 2,
    NotFound = 3,
    InvalidRequest = 5,
    /// Body is not valid JSON for the target type
    InvalidFormat = 6,

    OrderNotFound = 4001,

    /// Record store unreachable, timed out or rejected the query
    DatabaseError = 9002,
}

impl ErrorCode {
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Default client-facing message
    pub const fn message(&self) -> &'static str {
        match self {
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::OrderNotFound => "Order not found",
            ErrorCode::DatabaseError => "Database error",
        }
    }

    pub fn http_status(&self) -> StatusCode {
        match self {
            ErrorCode::NotFound | ErrorCode::OrderNotFound => StatusCode::NOT_FOUND,
            ErrorCode::DatabaseError => StatusCode::INTERNAL_SERVER_ERROR,
            ErrorCode::ValidationFailed | ErrorCode::InvalidRequest | ErrorCode::InvalidFormat => {
                StatusCode::BAD_REQUEST
            }
        }
    }

    /// Failure on our side rather than the caller's (9xxx)
    pub fn is_system(&self) -> bool {
        self.code() >= 9000
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
