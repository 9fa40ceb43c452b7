//! The closed allow-list of deep-link actions.
//!
//! An action arrives as the hostname component of a deep link. It is matched
//! against this fixed vocabulary rather than rendered freely, so the token
//! itself never needs sanitization: anything outside the list is rejected
//! outright and the whole link is treated as invalid.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DeepLinkError;

/// Actions a deep link is allowed to request.
///
/// The wire token is the lowercase variant name. Conversion from an untrusted
/// token goes through [`FromStr`], which is the single explicit path from
/// "unknown string" to "recognized action".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeepLinkAction {
    /// Open a file or workspace.
    Open,
    /// Jump to a chat session.
    Chat,
    /// Open a project.
    Project,
    /// Open the settings screen.
    Settings,
    /// Open help.
    Help,
    /// Start an import flow.
    Import,
    /// Start an export flow.
    Export,
}

impl DeepLinkAction {
    /// Every recognized action, in vocabulary order.
    pub const ALL: [DeepLinkAction; 7] = [
        DeepLinkAction::Open,
        DeepLinkAction::Chat,
        DeepLinkAction::Project,
        DeepLinkAction::Settings,
        DeepLinkAction::Help,
        DeepLinkAction::Import,
        DeepLinkAction::Export,
    ];

    /// The lowercase wire token for this action.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            DeepLinkAction::Open => "open",
            DeepLinkAction::Chat => "chat",
            DeepLinkAction::Project => "project",
            DeepLinkAction::Settings => "settings",
            DeepLinkAction::Help => "help",
            DeepLinkAction::Import => "import",
            DeepLinkAction::Export => "export",
        }
    }

    /// Comma-separated list of every allowed token, for diagnostics.
    #[must_use]
    pub fn allowed_tokens() -> String {
        Self::ALL
            .iter()
            .map(|action| action.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for DeepLinkAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeepLinkAction {
    type Err = DeepLinkError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|action| action.as_str() == token)
            .ok_or_else(|| DeepLinkError::UnknownAction {
                token: token.to_string(),
            })
    }
}
