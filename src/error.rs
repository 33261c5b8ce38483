//! Fatal encoding errors.
//!
//! Every failure here aborts the run before any artifact is assembled. The
//! three kinds map onto the upstream contracts the encoder relies on: names
//! that must resolve, trigger variants the firmware cannot interpret yet, and
//! tables whose shapes must agree with each other.

use std::fmt;

pub type EncodeResult<T> = std::result::Result<T, EncodeError>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodeError {
    #[error("unresolved {kind} '{name}'")]
    Resolution { kind: ResolutionKind, name: String },
    #[error("{context}: {variant} trigger keys are not supported by the kiibohd backend")]
    UnsupportedVariant {
        context: String,
        variant: &'static str,
    },
    #[error("structural inconsistency: {0}")]
    Structural(String),
}

/// What kind of name failed to resolve.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResolutionKind {
    Capability,
    RequiredCapability,
    ConsumerCode,
    Argument,
}

impl fmt::Display for ResolutionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ResolutionKind::Capability => "capability",
            ResolutionKind::RequiredCapability => "required capability",
            ResolutionKind::ConsumerCode => "consumer code",
            ResolutionKind::Argument => "symbolic argument",
        };
        f.write_str(label)
    }
}

impl EncodeError {
    pub(crate) fn unresolved(kind: ResolutionKind, name: impl Into<String>) -> Self {
        EncodeError::Resolution {
            kind,
            name: name.into(),
        }
    }

    pub(crate) fn structural(message: impl Into<String>) -> Self {
        EncodeError::Structural(message.into())
    }
}
