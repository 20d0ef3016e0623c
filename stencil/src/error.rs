//! Error types for template construction and substitution.

use std::error::Error;
use std::fmt;

/// Error returned when assembling a template from parts that break its
/// invariants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    /// An anchor points past the end of the literal buffer.
    AnchorOutOfBounds {
        /// The offending anchor index.
        index: usize,
        /// Length of the literal buffer.
        len: usize,
    },

    /// Anchors are not sorted by index.
    AnchorsOutOfOrder {
        /// Position of the offending anchor in the anchor list.
        position: usize,
        /// Its index.
        index: usize,
        /// Index of the anchor before it.
        previous: usize,
    },
}

impl fmt::Display for TemplateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AnchorOutOfBounds { index, len } => {
                write!(f, "anchor at byte {index} is past the end of a {len}-byte template")
            }
            Self::AnchorsOutOfOrder {
                position,
                index,
                previous,
            } => write!(
                f,
                "anchor #{position} at byte {index} comes before the previous anchor at byte {previous}"
            ),
        }
    }
}

impl Error for TemplateError {}

/// Error returned by the fallible and depth-limited substitution forms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpliceError<E> {
    /// The substitution source failed.
    Source(E),

    /// Nested replacements went deeper than the allowed limit. Usually a
    /// replacement that (indirectly) contains its own anchor.
    DepthExceeded {
        /// The limit that was hit.
        limit: usize,
    },
}

impl<E: fmt::Display> fmt::Display for SpliceError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Source(e) => write!(f, "substitution source failed: {e}"),
            Self::DepthExceeded { limit } => {
                write!(f, "nested substitution exceeded depth limit of {limit}")
            }
        }
    }
}

impl<E: Error + 'static> Error for SpliceError<E> {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Source(e) => Some(e),
            Self::DepthExceeded { .. } => None,
        }
    }
}
