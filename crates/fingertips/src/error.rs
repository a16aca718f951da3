//! The [`InvalidInput`] error type.

use std::fmt;

/// Error returned when a caller passes data that violates an API precondition.
///
/// These indicate a bug in the calling code rather than an environmental condition, so they are
/// never retried. Note that an absent hand is *not* an error when looking hands up (that is
/// reported as [`None`]); it only becomes [`InvalidInput::NoHand`] when the caller attempts to
/// classify a hand that isn't there.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum InvalidInput {
    /// Finger classification was attempted without a detected hand.
    NoHand,
    /// A landmark list did not contain the expected number of landmarks.
    LandmarkCount { expected: usize, actual: usize },
    /// A landmark list was not ordered by ascending landmark identifier.
    LandmarkOrder { position: usize, id: u8 },
    /// A configuration value was out of range.
    Option { name: &'static str, value: String },
    /// A pixel buffer did not match the image dimensions.
    BufferSize { expected: usize, actual: usize },
}

impl fmt::Display for InvalidInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoHand => f.write_str("no hand present; check for presence before classifying"),
            Self::LandmarkCount { expected, actual } => {
                write!(f, "expected {expected} landmarks, got {actual}")
            }
            Self::LandmarkOrder { position, id } => {
                write!(f, "landmark at position {position} has identifier {id}")
            }
            Self::Option { name, value } => write!(f, "invalid value for `{name}`: {value}"),
            Self::BufferSize { expected, actual } => {
                write!(f, "expected a buffer of {expected} bytes, got {actual}")
            }
        }
    }
}

impl std::error::Error for InvalidInput {}
