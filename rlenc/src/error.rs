//! Error types for codec operations

use thiserror::Error;

/// Numeric status codes, for callers that report outcomes as integers.
pub mod status {
    /// The operation succeeded.
    pub const OK: i32 = 0;
    /// The input is not run-length encoded.
    pub const NOT_RLENCODED: i32 = -128;
    /// A run count does not fit in a `usize`.
    pub const COUNT_OVERFLOW: i32 = -127;
    /// The decoded length exceeds the configured limit.
    pub const LENGTH_EXCEEDED: i32 = -126;
    /// A payload byte is an ASCII digit.
    pub const DIGIT_PAYLOAD: i32 = -125;
}

/// Error type for codec operations
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[error("not run-length encoded")]
    NotRlencoded,
    #[error("run count overflows usize")]
    CountOverflow,
    #[error("length exceeded: {0} > {1}")]
    LengthExceeded(usize, usize), // found, max
    #[error("digit payload at offset {0}")]
    DigitPayload(usize),
}

impl Error {
    /// Returns the [status] code of this error.
    pub const fn status(&self) -> i32 {
        match self {
            Error::NotRlencoded => status::NOT_RLENCODED,
            Error::CountOverflow => status::COUNT_OVERFLOW,
            Error::LengthExceeded(..) => status::LENGTH_EXCEEDED,
            Error::DigitPayload(_) => status::DIGIT_PAYLOAD,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes_are_negative() {
        let errors = [
            Error::NotRlencoded,
            Error::CountOverflow,
            Error::LengthExceeded(2, 1),
            Error::DigitPayload(0),
        ];
        for error in errors {
            assert!(error.status() < status::OK);
        }
        assert_eq!(Error::NotRlencoded.status(), -128);
    }

    #[test]
    fn test_display() {
        assert_eq!(Error::NotRlencoded.to_string(), "not run-length encoded");
        assert_eq!(
            Error::LengthExceeded(10, 4).to_string(),
            "length exceeded: 10 > 4"
        );
    }
}
