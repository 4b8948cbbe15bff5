//! Page URL Contract
//!
//! A non-root, non-index path segment is a percent-encoded (possibly
//! double-encoded) question. Successful submissions replace the URL with
//! the re-encoded question; reset replaces it with the site root.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use ::url::Url;

/// Characters escaped when encoding a question component
/// (encodeURIComponent semantics)
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Decode a percent-encoded string
fn decode(s: &str) -> Option<String> {
    percent_decode_str(s).decode_utf8().ok().map(|c| c.into_owned())
}

/// Extract the question embedded in a path, if any.
///
/// Handles both singly and doubly encoded questions; `/` and `/index.html`
/// carry no question.
pub fn question_from_path(path: &str) -> Option<String> {
    let segment = path.trim_start_matches('/');
    if segment.is_empty() || segment == "index.html" {
        return None;
    }

    let decoded = decode(segment)?;
    // A wholesale-encoded path decodes to a leading slash; peel it and
    // decode the inner component again.
    let stripped = decoded.trim_start_matches('/').to_string();
    let decoded = if stripped.contains('%') {
        decode(&stripped).unwrap_or(stripped)
    } else {
        stripped
    };

    let question = decoded.trim();
    if question.is_empty() {
        None
    } else {
        Some(question.to_string())
    }
}

/// Path representing a question: the component is encoded, prefixed with a
/// slash, and the whole thing encoded once more.
pub fn path_for_question(question: &str) -> String {
    let once = utf8_percent_encode(question, COMPONENT).to_string();
    let twice = utf8_percent_encode(&format!("/{once}"), COMPONENT).to_string();
    format!("/{twice}")
}

/// Encode a string as a URL query component
pub fn encode_component(s: &str) -> String {
    utf8_percent_encode(s, COMPONENT).to_string()
}

/// The page's location bar
#[derive(Debug, Clone)]
pub struct PageLocation {
    url: Url,
}

impl PageLocation {
    /// Parse a full page URL
    pub fn parse(href: &str) -> Result<Self, crate::DomError> {
        Ok(Self {
            url: Url::parse(href)?,
        })
    }

    /// Current path
    pub fn path(&self) -> &str {
        self.url.path()
    }

    /// Origin serialization (scheme://host[:port])
    pub fn origin(&self) -> String {
        self.url.origin().ascii_serialization()
    }

    /// First value of a query parameter
    pub fn query_param(&self, name: &str) -> Option<String> {
        self.url
            .query_pairs()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.into_owned())
    }

    /// Replace the path without navigation (history replaceState)
    pub fn replace_path(&mut self, path: &str) {
        self.url.set_path(path);
        self.url.set_query(None);
    }

    /// Full URL string
    pub fn href(&self) -> &str {
        self.url.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_paths_have_no_question() {
        assert_eq!(question_from_path("/"), None);
        assert_eq!(question_from_path("/index.html"), None);
        assert_eq!(question_from_path(""), None);
    }

    #[test]
    fn test_single_encoded_question() {
        assert_eq!(
            question_from_path("/what%20is%20rust"),
            Some("what is rust".to_string())
        );
    }

    #[test]
    fn test_double_encoded_question() {
        let path = path_for_question("what is rust");
        assert!(path.ends_with("%2Fwhat%2520is%2520rust"));
        assert_eq!(question_from_path(&path), Some("what is rust".to_string()));
    }

    #[test]
    fn test_location() {
        let mut loc = PageLocation::parse("https://example.com/?lang=es").unwrap();
        assert_eq!(loc.query_param("lang"), Some("es".to_string()));
        assert_eq!(loc.origin(), "https://example.com");

        loc.replace_path("/");
        assert_eq!(loc.path(), "/");
        assert_eq!(loc.query_param("lang"), None);
    }
}
