//! Error types
//!
//! Neither kind is fatal: store errors degrade to an empty table or a dropped
//! write, input errors leave the session untouched until corrected.

use std::fmt;
use std::io;

/// Failure reading or writing a JSON record file
#[derive(Debug)]
pub enum StoreError {
    Io(io::Error),
    Malformed(serde_json::Error),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "record file I/O failed: {err}"),
            Self::Malformed(err) => write!(f, "record file is malformed: {err}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Malformed(err) => Some(err),
        }
    }
}

impl From<io::Error> for StoreError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Malformed(err)
    }
}

/// Rejected user input
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InputError {
    EmptyUsername,
    /// A run can only be started from the main menu
    NotAtMenu,
    /// Custom resolution text is not `width,height`
    ResolutionFormat { input: String },
    /// A custom dimension is below the minimum
    ResolutionTooSmall {
        width: u32,
        height: u32,
        min: u32,
    },
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::NotAtMenu => write!(f, "a run can only start from the main menu"),
            Self::ResolutionFormat { input } => {
                write!(f, "expected `width,height`, got {input:?}")
            }
            Self::ResolutionTooSmall { width, height, min } => {
                write!(f, "resolution {width}x{height} is below the {min}px minimum")
            }
        }
    }
}

impl std::error::Error for InputError {}
