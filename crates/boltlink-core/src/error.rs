//! Failure classes for deep-link validation.

use thiserror::Error;

use crate::action::DeepLinkAction;
use crate::{PROTOCOL_NAME, PROTOCOL_SCHEME};

/// Why a deep link was rejected.
///
/// These never cross the public parsing boundary as `Err`: the parser folds
/// them into the returned record (`is_valid = false` plus the rendered
/// message), per the propagation policy of this crate. The enum exists so
/// each rejection has one structured source of truth for its diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeepLinkError {
    /// Input was absent or empty.
    #[error("Invalid URL: URL must be a non-empty string")]
    InvalidInput,

    /// Input does not start with the fixed scheme prefix.
    #[error("Invalid protocol: URL must start with {PROTOCOL_SCHEME}")]
    MissingPrefix,

    /// The parsed scheme is not exactly the fixed protocol name.
    #[error("Invalid protocol: Expected '{PROTOCOL_NAME}', got '{actual}'")]
    SchemeMismatch {
        /// The scheme the URL actually carried.
        actual: String,
    },

    /// The hostname token is outside the closed allow-list.
    #[error("Invalid action: '{token}' is not allowed. Allowed actions: {}", DeepLinkAction::allowed_tokens())]
    UnknownAction {
        /// The rejected token, after lowercasing.
        token: String,
    },

    /// The underlying URL grammar parse failed.
    #[error("URL parsing failed: {0}")]
    Malformed(#[from] url::ParseError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_fixed_protocol() {
        assert!(DeepLinkError::MissingPrefix.to_string().contains("bolt://"));
        let mismatch = DeepLinkError::SchemeMismatch {
            actual: "http".to_string(),
        };
        assert_eq!(
            mismatch.to_string(),
            "Invalid protocol: Expected 'bolt', got 'http'"
        );
    }

    #[test]
    fn unknown_action_enumerates_the_allow_list() {
        let err = DeepLinkError::UnknownAction {
            token: "launch".to_string(),
        };
        for action in DeepLinkAction::ALL {
            assert!(err.to_string().contains(action.as_str()));
        }
    }
}
