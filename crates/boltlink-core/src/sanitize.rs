//! Injection sanitization for untrusted deep-link tokens.
//!
//! Every string extracted from a deep link (path, path segments, query keys
//! and values) passes through [`sanitize`] before it is placed into a result
//! record. The filter is deliberately destructive: characters that could
//! enable markup, template, or shell injection are removed outright rather
//! than escaped, so downstream consumers never need to reason about quoting.

/// Maximum length of a sanitized token, in characters.
pub const MAX_SANITIZED_LEN: usize = 1000;

/// Remove injection-capable characters from an untrusted string.
///
/// Strips HTML/XML metacharacters (`< > ' " &`), template and shell
/// metacharacters (`` ` `` `$` `{` `}`), and CR/LF/TAB; trims surrounding
/// whitespace; then truncates to [`MAX_SANITIZED_LEN`] characters.
///
/// Deterministic, idempotent, and free of side effects. Empty input yields
/// empty output.
#[must_use]
pub fn sanitize(input: &str) -> String {
    let filtered: String = input.chars().filter(|c| !is_forbidden(*c)).collect();
    let truncated: String = filtered.trim().chars().take(MAX_SANITIZED_LEN).collect();
    // Truncation can cut just after interior whitespace; trim again so the
    // result is a fixed point of this function.
    truncated.trim_end().to_string()
}

fn is_forbidden(c: char) -> bool {
    matches!(
        c,
        '<' | '>' | '\'' | '"' | '&' | '`' | '$' | '{' | '}' | '\r' | '\n' | '\t'
    )
}
