//! Unified error codes
//!
//! Error codes are organized by range:
//! - 0xxx: General
//! - 4xxx: Order history errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,

    // ==================== 4xxx: Order history ====================
    /// Order aggregate could not be turned into a history snapshot
    HistorySerializationFailed = 4101,
    /// History record could not be written
    HistoryWriteFailed = 4102,
    /// History could not be read
    HistoryReadFailed = 4103,

    // ==================== 9xxx: System ====================
    /// Database error
    DatabaseError = 9002,
}

impl ErrorCode {
    /// Numeric value of this code
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Default message for this code
    pub const fn message(&self) -> &'static str {
        match self {
            ErrorCode::Success => "Operation completed successfully",

            ErrorCode::HistorySerializationFailed => "Order could not be snapshotted",
            ErrorCode::HistoryWriteFailed => "Order history record could not be written",
            ErrorCode::HistoryReadFailed => "Order history could not be read",

            ErrorCode::DatabaseError => "Database error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(ErrorCode::Success),

            4101 => Ok(ErrorCode::HistorySerializationFailed),
            4102 => Ok(ErrorCode::HistoryWriteFailed),
            4103 => Ok(ErrorCode::HistoryReadFailed),

            9002 => Ok(ErrorCode::DatabaseError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [ErrorCode; 5] = [
        ErrorCode::Success,
        ErrorCode::HistorySerializationFailed,
        ErrorCode::HistoryWriteFailed,
        ErrorCode::HistoryReadFailed,
        ErrorCode::DatabaseError,
    ];

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Success.code(), 0);
        assert_eq!(ErrorCode::HistorySerializationFailed.code(), 4101);
        assert_eq!(ErrorCode::HistoryReadFailed.code(), 4103);
        assert_eq!(ErrorCode::DatabaseError.code(), 9002);
    }

    #[test]
    fn test_every_code_converts_back_from_u16() {
        for code in ALL {
            assert_eq!(ErrorCode::try_from(u16::from(code)), Ok(code));
        }
    }

    #[test]
    fn test_try_from_invalid() {
        assert_eq!(ErrorCode::try_from(4), Err(InvalidErrorCode(4)));
        assert_eq!(ErrorCode::try_from(4001), Err(InvalidErrorCode(4001)));
        assert_eq!(ErrorCode::try_from(8001), Err(InvalidErrorCode(8001)));
        assert_eq!(ErrorCode::try_from(65535), Err(InvalidErrorCode(65535)));
    }

    #[test]
    fn test_serialize_as_number() {
        let json = serde_json::to_string(&ErrorCode::HistoryReadFailed).unwrap();
        assert_eq!(json, "4103");

        let code: ErrorCode = serde_json::from_str("4102").unwrap();
        assert_eq!(code, ErrorCode::HistoryWriteFailed);

        assert!(serde_json::from_str::<ErrorCode>("4001").is_err());
    }

    #[test]
    fn test_display_and_message() {
        assert_eq!(format!("{}", ErrorCode::HistoryWriteFailed), "4102");
        assert_eq!(ErrorCode::DatabaseError.message(), "Database error");
        assert!(ErrorCode::Success.is_success());
        assert!(!ErrorCode::HistoryReadFailed.is_success());
    }
}
