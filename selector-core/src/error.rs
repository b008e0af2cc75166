//! Error types shared by the memoizer, the normalizer and the builder.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SelectorError>;

#[derive(Debug, Error)]
pub enum SelectorError {
    /// A specification node is neither a selector, a group nor a keyed mapping,
    /// or a chain has no combiner. Raised while building, never while calling.
    #[error("invalid selector spec at {path}: {reason}")]
    InvalidSpec { path: String, reason: String },

    /// A JSON spec referenced a selector name missing from the registry.
    #[error("unknown selector `{name}` at {path}")]
    UnknownSelector { name: String, path: String },

    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    /// Free-form failure raised by a user selector or combiner.
    #[error("selector evaluation failed: {message}")]
    Evaluation { message: String },

    #[error("invalid memoize options: {0}")]
    Config(#[from] serde_json::Error),
}

impl SelectorError {
    #[must_use]
    pub fn invalid_spec(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidSpec {
            path: path.into(),
            reason: reason.into(),
        }
    }

    #[must_use]
    pub fn evaluation(message: impl Into<String>) -> Self {
        Self::Evaluation {
            message: message.into(),
        }
    }

    /// True for errors raised while turning a spec into a selector.
    #[must_use]
    pub fn is_build_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidSpec { .. } | Self::UnknownSelector { .. } | Self::Config(_)
        )
    }
}
