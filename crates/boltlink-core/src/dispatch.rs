//! Delivery of validated deep links to the application window.
//!
//! The dispatcher is the only place in this crate where a deep link causes a
//! side effect, and it acts only after validation. Invalid links degrade to a
//! log line; links arriving before a window exists are dropped, not queued.

use tracing::{error, info, warn};

use crate::parser::{parse_deep_link, ParsedDeepLink};

/// Channel name under which validated deep links reach the window.
pub const DEEP_LINK_EVENT: &str = "deep-link-received";

/// Capability handle for the application window the dispatcher targets.
///
/// Abstracts the host UI framework so the dispatcher stays testable with a
/// fake. All calls are fire-and-forget: a failure to deliver is not observed
/// here.
pub trait WindowHandle {
    /// Whether the underlying window still exists.
    fn is_alive(&self) -> bool;

    /// Whether the window is currently minimized.
    fn is_minimized(&self) -> bool;

    /// Restore the window from its minimized state.
    fn restore(&self);

    /// Bring the window to the foreground.
    fn focus(&self);

    /// Make the window visible.
    fn show(&self);

    /// Forward a message to the window's message channel.
    fn send_message(&self, channel: &str, payload: &ParsedDeepLink);
}

/// Parse a deep link and, when valid, deliver it to the window.
///
/// An invalid link is logged and ignored; no exception, no side effect.
/// A valid link with a live window restores the window if minimized, brings
/// it to focus and visibility, then forwards the record under
/// [`DEEP_LINK_EVENT`]. Without a live window the request is dropped with a
/// warning.
pub fn dispatch(url: &str, window: Option<&dyn WindowHandle>) {
    info!(url, "handling deep link");

    let parsed = parse_deep_link(url);
    if !parsed.is_valid {
        error!(
            error = parsed.error.as_deref().unwrap_or("unknown"),
            "invalid deep link"
        );
        return;
    }

    match window {
        Some(window) if window.is_alive() => {
            if window.is_minimized() {
                window.restore();
            }
            window.focus();
            window.show();
            window.send_message(DEEP_LINK_EVENT, &parsed);
            info!(
                action = ?parsed.action,
                path = ?parsed.path,
                has_params = parsed.params.is_some(),
                has_query = parsed.query.is_some(),
                "deep link dispatched"
            );
        }
        _ => warn!("no window available to handle deep link"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Mutex;

    #[derive(Debug, PartialEq)]
    enum Call {
        Restore,
        Focus,
        Show,
        Send(String, ParsedDeepLink),
    }

    struct FakeWindow {
        alive: bool,
        minimized: bool,
        calls: Mutex<Vec<Call>>,
    }

    impl FakeWindow {
        fn new(alive: bool, minimized: bool) -> Self {
            Self {
                alive,
                minimized,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(self) -> Vec<Call> {
            self.calls.into_inner().unwrap()
        }

        fn record(&self, call: Call) {
            self.calls.lock().unwrap().push(call);
        }
    }

    impl WindowHandle for FakeWindow {
        fn is_alive(&self) -> bool {
            self.alive
        }

        fn is_minimized(&self) -> bool {
            self.minimized
        }

        fn restore(&self) {
            self.record(Call::Restore);
        }

        fn focus(&self) {
            self.record(Call::Focus);
        }

        fn show(&self) {
            self.record(Call::Show);
        }

        fn send_message(&self, channel: &str, payload: &ParsedDeepLink) {
            self.record(Call::Send(channel.to_string(), payload.clone()));
        }
    }

    #[test]
    fn valid_link_focuses_and_forwards() {
        let window = FakeWindow::new(true, false);
        dispatch("bolt://chat/abc123?ref=homepage", Some(&window));

        let calls = window.calls();
        assert_eq!(calls.len(), 3);
        assert_eq!(calls[0], Call::Focus);
        assert_eq!(calls[1], Call::Show);
        match &calls[2] {
            Call::Send(channel, payload) => {
                assert_eq!(channel, DEEP_LINK_EVENT);
                assert!(payload.is_valid);
                assert_eq!(payload.path.as_deref(), Some("abc123"));
            }
            other => panic!("expected send, got {other:?}"),
        }
    }

    #[test]
    fn minimized_window_is_restored_first() {
        let window = FakeWindow::new(true, true);
        dispatch("bolt://open", Some(&window));

        let calls = window.calls();
        assert_eq!(calls[0], Call::Restore);
        assert_eq!(calls[1], Call::Focus);
    }

    #[test]
    fn invalid_link_causes_no_side_effects() {
        let window = FakeWindow::new(true, false);
        dispatch("bolt://launch", Some(&window));
        assert!(window.calls().is_empty());
    }

    #[test]
    fn dead_window_receives_nothing() {
        let window = FakeWindow::new(false, false);
        dispatch("bolt://open", Some(&window));
        assert!(window.calls().is_empty());
    }

    #[test]
    fn missing_window_is_a_logged_no_op() {
        // Must not panic; the request is dropped, not queued.
        dispatch("bolt://open", None);
    }
}
