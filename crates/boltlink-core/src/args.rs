//! Locating a deep link among process arguments.
//!
//! On platforms where a second instance receives the activating URL in its
//! argument list, this scanner picks out the candidate string. It checks
//! nothing beyond the scheme prefix; full validation is the parser's job.

use crate::PROTOCOL_SCHEME;

/// Return the first argument carrying the deep-link scheme prefix, verbatim.
///
/// The match is returned exactly as it appeared, pre-sanitization, so the
/// parser sees the original input. Returns `None` when no argument matches.
#[must_use]
pub fn find_deep_link_arg(argv: &[String]) -> Option<&str> {
    argv.iter()
        .map(String::as_str)
        .find(|arg| arg.starts_with(PROTOCOL_SCHEME))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn finds_the_deep_link_among_ordinary_arguments() {
        let argv = args(&["node", "main.js", "bolt://open/foo"]);
        assert_eq!(find_deep_link_arg(&argv), Some("bolt://open/foo"));
    }

    #[test]
    fn returns_the_first_match_in_order() {
        let argv = args(&["bolt://chat/1", "bolt://chat/2"]);
        assert_eq!(find_deep_link_arg(&argv), Some("bolt://chat/1"));
    }

    #[test]
    fn returns_the_original_string_unmodified() {
        // Sanitization happens later; the scanner must not touch the value.
        let argv = args(&["bolt://open/<script>"]);
        assert_eq!(find_deep_link_arg(&argv), Some("bolt://open/<script>"));
    }

    #[test]
    fn none_when_nothing_matches() {
        assert_eq!(find_deep_link_arg(&args(&["--flag", "http://x"])), None);
        assert_eq!(find_deep_link_arg(&[]), None);
    }
}
