//! Error type shared by the service and its clients
//!
//! [`AppError`] pairs an [`ErrorCode`] with the message sent to the client.
//! The code decides the HTTP status; the body is the message as plain text.
//!
//! ```
//! use shared::error::{AppError, ErrorCode};
//!
//! let err = AppError::with_message(ErrorCode::ValidationFailed, "Status is required");
//! assert_eq!(err.http_status(), shared::http::StatusCode::BAD_REQUEST);
//! assert_eq!(err.to_string(), "Status is required");
//! ```

mod codes;
mod types;

pub use codes::ErrorCode;
pub use types::{AppError, AppResult};
