//! Deep-link protocol core for the `bolt://` URI scheme.
//!
//! This crate turns an arbitrary, externally supplied string (delivered by an
//! OS protocol-handler invocation or found among process arguments) into a
//! structured, security-validated record the host application can act on.
//! Every input is treated as hostile: grammar validation, an allow-list check
//! against a closed action vocabulary, and character-level sanitization all
//! run before any side effect occurs.
//!
//! ## Design
//!
//! Leaves first:
//!
//! - [`sanitize`]: pure character filtering applied to every extracted token
//! - [`parse_deep_link`]: grammar validation producing a [`ParsedDeepLink`]
//! - [`DeepLinkAction`]: the closed allow-list of recognized actions
//! - [`find_deep_link_arg`]: locates a candidate link among process arguments
//! - [`dispatch`]: forwards a validated record to a live [`WindowHandle`]
//! - [`ProtocolRegistrar`]: OS-level scheme association, independent of parsing
//!
//! A failed parse never exposes partially-trusted data, never panics, and
//! never propagates an error to the caller: the outcome is always a record
//! with `is_valid = false` and a diagnostic.
//!
//! ## Example
//!
//! ```
//! use boltlink_core::{parse_deep_link, DeepLinkAction};
//!
//! let link = parse_deep_link("bolt://chat/abc123?ref=homepage");
//! assert!(link.is_valid);
//! assert_eq!(link.action, Some(DeepLinkAction::Chat));
//! assert_eq!(link.path.as_deref(), Some("abc123"));
//! ```

pub mod action;
pub mod args;
pub mod dispatch;
pub mod error;
pub mod parser;
pub mod registrar;
pub mod sanitize;

#[cfg(test)]
mod tests;

pub use action::DeepLinkAction;
pub use args::find_deep_link_arg;
pub use dispatch::{dispatch, WindowHandle, DEEP_LINK_EVENT};
pub use error::DeepLinkError;
pub use parser::{parse_deep_link, ParsedDeepLink};
pub use registrar::{MimeAppsRegistrar, NoopRegistrar, ProtocolRegistrar};
pub use sanitize::sanitize;

/// Fixed protocol name this application answers to.
pub const PROTOCOL_NAME: &str = "bolt";

/// Full scheme prefix as it appears at the head of a deep link.
pub const PROTOCOL_SCHEME: &str = "bolt://";

/// Whether the current platform supports deep-link invocation at all.
#[must_use]
pub fn is_supported() -> bool {
    cfg!(any(
        target_os = "linux",
        target_os = "macos",
        target_os = "windows"
    ))
}
