//! OS-level association of the deep-link scheme with this application.
//!
//! Registration is independent of parsing; the two share only the protocol
//! name constant. The OS surface sits behind [`ProtocolRegistrar`] so
//! platform implementations and test fakes can be substituted freely.
//! Registration failure is never fatal: every error is caught, logged, and
//! reported as a `false` return.

use std::fs;
use std::io;
use std::path::PathBuf;

use tracing::{error, info, warn};

use crate::PROTOCOL_NAME;

/// Idempotent register/unregister pair for the deep-link scheme.
///
/// Both operations perform one synchronous OS interaction, log the outcome,
/// and return whether it succeeded. Calling `register` when already
/// registered, or `unregister` when not registered, must not fail.
pub trait ProtocolRegistrar {
    /// Associate the scheme with this application.
    fn register(&self) -> bool;

    /// Remove the scheme association.
    fn unregister(&self) -> bool;
}

/// Registrar backed by the XDG `mimeapps.list` default-applications table.
///
/// Registering writes an `x-scheme-handler/bolt=<entry>` line into the
/// `[Default Applications]` section; unregistering removes it. Unrelated
/// entries and sections are preserved byte for byte.
pub struct MimeAppsRegistrar {
    list_path: PathBuf,
    desktop_entry: String,
}

impl MimeAppsRegistrar {
    /// Registrar over an explicit `mimeapps.list` path.
    pub fn new(list_path: impl Into<PathBuf>, desktop_entry: impl Into<String>) -> Self {
        Self {
            list_path: list_path.into(),
            desktop_entry: desktop_entry.into(),
        }
    }

    /// Registrar over the current user's `mimeapps.list`.
    ///
    /// Returns `None` when the platform exposes no user configuration
    /// directory.
    pub fn for_current_user(desktop_entry: impl Into<String>) -> Option<Self> {
        dirs::config_dir().map(|dir| Self::new(dir.join("mimeapps.list"), desktop_entry))
    }

    fn scheme_key() -> String {
        format!("x-scheme-handler/{PROTOCOL_NAME}")
    }

    fn apply(&self, entry: Option<&str>) -> io::Result<()> {
        let contents = match fs::read_to_string(&self.list_path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => String::new(),
            Err(err) => return Err(err),
        };

        let (updated, changed) = set_default_handler(&contents, &Self::scheme_key(), entry);
        if !changed {
            return Ok(());
        }
        if let Some(parent) = self.list_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.list_path, updated)
    }
}

impl ProtocolRegistrar for MimeAppsRegistrar {
    fn register(&self) -> bool {
        match self.apply(Some(&self.desktop_entry)) {
            Ok(()) => {
                info!(protocol = PROTOCOL_NAME, entry = %self.desktop_entry, "protocol registered");
                true
            }
            Err(err) => {
                error!(protocol = PROTOCOL_NAME, %err, "failed to register protocol");
                false
            }
        }
    }

    fn unregister(&self) -> bool {
        match self.apply(None) {
            Ok(()) => {
                info!(protocol = PROTOCOL_NAME, "protocol unregistered");
                true
            }
            Err(err) => {
                error!(protocol = PROTOCOL_NAME, %err, "failed to unregister protocol");
                false
            }
        }
    }
}

/// Registrar that performs no OS interaction.
///
/// Stands in on platforms without a supported registration surface and in
/// tests that exercise callers of [`ProtocolRegistrar`].
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopRegistrar;

impl ProtocolRegistrar for NoopRegistrar {
    fn register(&self) -> bool {
        warn!(protocol = PROTOCOL_NAME, "protocol registration is a no-op on this platform");
        true
    }

    fn unregister(&self) -> bool {
        true
    }
}

/// Rewrite the `[Default Applications]` table of a `mimeapps.list` document.
///
/// With `entry = Some(_)` the handler line for `key` is inserted or replaced;
/// with `entry = None` it is removed. Returns the updated document and
/// whether anything changed.
fn set_default_handler(contents: &str, key: &str, entry: Option<&str>) -> (String, bool) {
    const SECTION: &str = "[Default Applications]";

    let mut lines: Vec<String> = Vec::new();
    let mut in_section = false;
    let mut section_seen = false;
    let mut handled = false;
    let mut changed = false;

    for line in contents.lines() {
        let trimmed = line.trim();
        if trimmed.starts_with('[') {
            // Leaving the section without having placed the handler: insert
            // it just before the next header.
            if in_section && !handled {
                if let Some(entry) = entry {
                    lines.push(format!("{key}={entry}"));
                    handled = true;
                    changed = true;
                }
            }
            in_section = trimmed == SECTION;
            section_seen |= in_section;
            lines.push(line.to_string());
            continue;
        }

        if in_section {
            if let Some((line_key, line_value)) = trimmed.split_once('=') {
                if line_key.trim() == key {
                    match entry {
                        Some(entry) if !handled => {
                            handled = true;
                            if line_value.trim() != entry {
                                lines.push(format!("{key}={entry}"));
                                changed = true;
                            } else {
                                lines.push(line.to_string());
                            }
                        }
                        // Duplicate handler lines and removals both drop.
                        _ => changed = true,
                    }
                    continue;
                }
            }
        }

        lines.push(line.to_string());
    }

    if let Some(entry) = entry {
        if !handled {
            if !section_seen {
                if !lines.is_empty() {
                    lines.push(String::new());
                }
                lines.push(SECTION.to_string());
            }
            lines.push(format!("{key}={entry}"));
            changed = true;
        }
    }

    let mut updated = lines.join("\n");
    if !updated.is_empty() {
        updated.push('\n');
    }
    (updated, changed)
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::TempDir;

    const KEY: &str = "x-scheme-handler/bolt";

    fn registrar(dir: &TempDir) -> MimeAppsRegistrar {
        MimeAppsRegistrar::new(dir.path().join("mimeapps.list"), "boltlink.desktop")
    }

    #[test]
    fn set_inserts_section_and_handler_into_empty_document() {
        let (updated, changed) = set_default_handler("", KEY, Some("boltlink.desktop"));
        assert!(changed);
        assert_eq!(
            updated,
            "[Default Applications]\nx-scheme-handler/bolt=boltlink.desktop\n"
        );
    }

    #[test]
    fn set_replaces_an_existing_handler() {
        let existing = "[Default Applications]\nx-scheme-handler/bolt=other.desktop\n";
        let (updated, changed) = set_default_handler(existing, KEY, Some("boltlink.desktop"));
        assert!(changed);
        assert!(updated.contains("x-scheme-handler/bolt=boltlink.desktop"));
        assert!(!updated.contains("other.desktop"));
    }

    #[test]
    fn set_is_idempotent() {
        let existing = "[Default Applications]\nx-scheme-handler/bolt=boltlink.desktop\n";
        let (updated, changed) = set_default_handler(existing, KEY, Some("boltlink.desktop"));
        assert!(!changed);
        assert_eq!(updated, existing);
    }

    #[test]
    fn set_preserves_unrelated_entries_and_sections() {
        let existing = "\
[Added Associations]
text/plain=editor.desktop

[Default Applications]
text/html=browser.desktop
";
        let (updated, changed) = set_default_handler(existing, KEY, Some("boltlink.desktop"));
        assert!(changed);
        assert!(updated.contains("text/plain=editor.desktop"));
        assert!(updated.contains("text/html=browser.desktop"));
        assert!(updated.contains("x-scheme-handler/bolt=boltlink.desktop"));
    }

    #[test]
    fn set_targets_only_the_default_applications_section() {
        let existing = "\
[Added Associations]
x-scheme-handler/bolt=stale.desktop
";
        let (updated, _) = set_default_handler(existing, KEY, Some("boltlink.desktop"));
        // The stale line lives in another section and must survive untouched.
        assert!(updated.contains("x-scheme-handler/bolt=stale.desktop"));
        assert!(updated.contains("[Default Applications]\nx-scheme-handler/bolt=boltlink.desktop"));
    }

    #[test]
    fn remove_deletes_the_handler_line() {
        let existing = "\
[Default Applications]
x-scheme-handler/bolt=boltlink.desktop
text/html=browser.desktop
";
        let (updated, changed) = set_default_handler(existing, KEY, None);
        assert!(changed);
        assert!(!updated.contains("x-scheme-handler/bolt"));
        assert!(updated.contains("text/html=browser.desktop"));
    }

    #[test]
    fn remove_of_absent_handler_changes_nothing() {
        let existing = "[Default Applications]\ntext/html=browser.desktop\n";
        let (updated, changed) = set_default_handler(existing, KEY, None);
        assert!(!changed);
        assert_eq!(updated, existing);
    }

    #[test]
    fn register_creates_the_list_file() {
        let dir = TempDir::new().unwrap();
        let registrar = registrar(&dir);

        assert!(registrar.register());
        let contents = fs::read_to_string(dir.path().join("mimeapps.list")).unwrap();
        assert!(contents.contains("x-scheme-handler/bolt=boltlink.desktop"));
    }

    #[test]
    fn register_twice_reports_success_both_times() {
        let dir = TempDir::new().unwrap();
        let registrar = registrar(&dir);

        assert!(registrar.register());
        assert!(registrar.register());
    }

    #[test]
    fn unregister_removes_the_association() {
        let dir = TempDir::new().unwrap();
        let registrar = registrar(&dir);

        assert!(registrar.register());
        assert!(registrar.unregister());
        let contents = fs::read_to_string(dir.path().join("mimeapps.list")).unwrap();
        assert!(!contents.contains("x-scheme-handler/bolt"));
    }

    #[test]
    fn unregister_without_prior_registration_reports_success() {
        let dir = TempDir::new().unwrap();
        let registrar = registrar(&dir);

        assert!(registrar.unregister());
    }

    #[test]
    fn noop_registrar_is_idempotent_both_directions() {
        let registrar = NoopRegistrar;
        assert!(registrar.register());
        assert!(registrar.register());
        assert!(registrar.unregister());
        assert!(registrar.unregister());
    }
}
