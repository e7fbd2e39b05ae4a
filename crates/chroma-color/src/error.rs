// SPDX-License-Identifier: MIT
//
// Color parsing errors.

use thiserror::Error;

/// Why a string failed to resolve to an RGB triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidColorReason {
    /// Nothing left after trimming whitespace and the optional `#`.
    Empty,
    /// Digit count other than 3 or 6.
    Length(usize),
    /// A character outside `[0-9a-fA-F]`.
    Digit(char),
}

impl std::fmt::Display for InvalidColorReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "no hex digits"),
            Self::Length(n) => write!(f, "expected 3 or 6 hex digits, found {n}"),
            Self::Digit(c) => write!(f, "{c:?} is not a hex digit"),
        }
    }
}

/// The input string does not parse as a color.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid color {input:?}: {reason}")]
pub struct InvalidColorError {
    /// The string as the caller passed it.
    pub input: String,
    pub reason: InvalidColorReason,
}

impl InvalidColorError {
    pub(crate) fn new(input: &str, reason: InvalidColorReason) -> Self {
        Self {
            input: input.to_owned(),
            reason,
        }
    }
}
