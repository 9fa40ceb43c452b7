//! Grammar validation and parsing of deep-link URLs.
//!
//! ## Design
//!
//! [`parse_deep_link`] is a total function: every input, however hostile,
//! produces exactly one synchronous [`ParsedDeepLink`]. Validation
//! short-circuits at the first failure and a failed parse never exposes
//! partially-trusted data. The stages, in order:
//!
//! 1. reject empty input
//! 2. require the `bolt://` prefix on the trimmed string
//! 3. parse as a generic URL (a parse error becomes a diagnostic, never a
//!    panic or propagated error)
//! 4. require the scheme to equal the protocol name exactly
//! 5. lowercase the hostname, if any, and check it against the allow-list;
//!    an unrecognized token invalidates the whole link
//! 6. strip and sanitize the path
//! 7. decompose the path into positionally keyed, sanitized segments
//! 8. sanitize query pairs, dropping any pair with an empty side
//!
//! The URL parser normalizes the path component before we see it, so raw
//! markup metacharacters in a path arrive percent-encoded; query pairs are
//! percent-decoded before sanitization.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{error, info};
use url::Url;

use crate::action::DeepLinkAction;
use crate::error::DeepLinkError;
use crate::sanitize::sanitize;
use crate::{PROTOCOL_NAME, PROTOCOL_SCHEME};

/// A validated deep-link request.
///
/// Constructed only by [`parse_deep_link`]; not mutated afterwards. The
/// `action`, `path`, `params`, and `query` fields are populated only when
/// `is_valid` is true.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedDeepLink {
    /// The scheme token recovered from the input; empty if parsing failed
    /// before the scheme was extracted.
    pub scheme: String,

    /// The recognized action, when the link supplied one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<DeepLinkAction>,

    /// Sanitized path with the leading separator stripped; absent when the
    /// path was empty, `/`, or sanitized away entirely.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Sanitized path segments keyed by zero-based position
    /// (`param0`, `param1`, ...), in original order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<IndexMap<String, String>>,

    /// Sanitized query pairs, in original order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<IndexMap<String, String>>,

    /// Whether the input survived every validation stage.
    pub is_valid: bool,

    /// Human-readable diagnostic, present iff `is_valid` is false.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ParsedDeepLink {
    fn invalid(scheme: String, err: &DeepLinkError) -> Self {
        Self {
            scheme,
            action: None,
            path: None,
            params: None,
            query: None,
            is_valid: false,
            error: Some(err.to_string()),
        }
    }
}

/// Validate and parse a deep-link URL.
///
/// Never panics and never returns an error: every failure is folded into the
/// returned record. Re-parsing the same string is deterministic.
#[must_use]
pub fn parse_deep_link(raw: &str) -> ParsedDeepLink {
    match parse_stages(raw) {
        Ok(parsed) => {
            info!(
                scheme = %parsed.scheme,
                action = ?parsed.action,
                path = ?parsed.path,
                has_params = parsed.params.is_some(),
                has_query = parsed.query.is_some(),
                "deep link parsed"
            );
            parsed
        }
        Err((scheme, err)) => {
            error!(%err, "deep link rejected");
            ParsedDeepLink::invalid(scheme, &err)
        }
    }
}

/// The fallible interior of [`parse_deep_link`]. The error side carries the
/// scheme recovered so far, so a rejection after stage 4 still reports it.
fn parse_stages(raw: &str) -> Result<ParsedDeepLink, (String, DeepLinkError)> {
    let normalized = raw.trim();
    if normalized.is_empty() {
        return Err((String::new(), DeepLinkError::InvalidInput));
    }

    if !normalized.starts_with(PROTOCOL_SCHEME) {
        return Err((String::new(), DeepLinkError::MissingPrefix));
    }

    let url = Url::parse(normalized).map_err(|err| (String::new(), DeepLinkError::from(err)))?;

    let scheme = url.scheme().to_string();
    if scheme != PROTOCOL_NAME {
        let err = DeepLinkError::SchemeMismatch {
            actual: scheme.clone(),
        };
        return Err((scheme, err));
    }

    let action = match url.host_str().filter(|host| !host.is_empty()) {
        Some(host) => {
            let token = host.to_ascii_lowercase();
            match token.parse::<DeepLinkAction>() {
                Ok(action) => Some(action),
                Err(err) => return Err((scheme, err)),
            }
        }
        None => None,
    };

    let path = parse_path(&url);
    let params = path.as_deref().and_then(parse_params);
    let query = parse_query(&url);

    Ok(ParsedDeepLink {
        scheme,
        action,
        path,
        params,
        query,
        is_valid: true,
        error: None,
    })
}

fn parse_path(url: &Url) -> Option<String> {
    let raw_path = url.path();
    if raw_path.is_empty() || raw_path == "/" {
        return None;
    }
    let stripped = raw_path.strip_prefix('/').unwrap_or(raw_path);
    let clean = sanitize(stripped);
    (!clean.is_empty()).then_some(clean)
}

fn parse_params(path: &str) -> Option<IndexMap<String, String>> {
    let mut params = IndexMap::new();
    for (index, segment) in path.split('/').filter(|s| !s.is_empty()).enumerate() {
        let clean = sanitize(segment);
        if !clean.is_empty() {
            params.insert(format!("param{index}"), clean);
        }
    }
    (!params.is_empty()).then_some(params)
}

fn parse_query(url: &Url) -> Option<IndexMap<String, String>> {
    url.query()?;
    let mut query = IndexMap::new();
    for (key, value) in url.query_pairs() {
        let clean_key = sanitize(&key);
        let clean_value = sanitize(&value);
        if !clean_key.is_empty() && !clean_value.is_empty() {
            query.insert(clean_key, clean_value);
        }
    }
    (!query.is_empty()).then_some(query)
}
