//! Language Detection
//!
//! Detection order: explicit URL override (persisted immediately), durable
//! storage, the browser's reported languages, then the configured default.

use tracing::debug;

use qbox_dom::KeyValueStorage;

use crate::STORAGE_KEY_LANGUAGE;

/// Case- and region-insensitive match of a code against the supported set
fn match_supported(code: &str, supported: &[String]) -> Option<String> {
    let normalized = code.trim().to_ascii_lowercase();
    if normalized.is_empty() {
        return None;
    }
    let base = normalized
        .split(['-', '_'])
        .next()
        .unwrap_or(normalized.as_str());

    supported
        .iter()
        .find(|s| s.eq_ignore_ascii_case(&normalized) || s.eq_ignore_ascii_case(base))
        .cloned()
}

/// Resolve a requested code against the supported set; unmatched input
/// yields the default language, never an error.
pub fn resolve_supported(code: &str, supported: &[String], default: &str) -> String {
    match_supported(code, supported).unwrap_or_else(|| default.to_string())
}

/// Detect the language to boot with.
///
/// A URL override that matches a supported language is persisted right
/// away so it sticks across reloads and stays in sync with the visible
/// language selector.
pub fn detect_language(
    override_code: Option<&str>,
    storage: &mut dyn KeyValueStorage,
    browser_languages: &[String],
    supported: &[String],
    default: &str,
) -> String {
    if let Some(code) = override_code {
        if let Some(matched) = match_supported(code, supported) {
            storage.set(STORAGE_KEY_LANGUAGE, &matched);
            debug!(language = %matched, "language from URL override");
            return matched;
        }
    }

    if let Some(stored) = storage.get(STORAGE_KEY_LANGUAGE) {
        if let Some(matched) = match_supported(&stored, supported) {
            return matched;
        }
    }

    for reported in browser_languages {
        if let Some(matched) = match_supported(reported, supported) {
            debug!(language = %matched, "language from browser list");
            return matched;
        }
    }

    default.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use qbox_dom::MemoryStorage;

    fn supported() -> Vec<String> {
        vec!["en".into(), "es".into(), "ar".into()]
    }

    #[test]
    fn test_resolve_supported() {
        assert_eq!(resolve_supported("es", &supported(), "en"), "es");
        assert_eq!(resolve_supported("ES", &supported(), "en"), "es");
        assert_eq!(resolve_supported("es-MX", &supported(), "en"), "es");
        assert_eq!(resolve_supported("fr", &supported(), "en"), "en");
        assert_eq!(resolve_supported("", &supported(), "en"), "en");
    }

    #[test]
    fn test_override_wins_and_persists() {
        let mut storage = MemoryStorage::with_entries(&[(STORAGE_KEY_LANGUAGE, "en")]);
        let detected = detect_language(
            Some("ar"),
            &mut storage,
            &["es".to_string()],
            &supported(),
            "en",
        );
        assert_eq!(detected, "ar");
        assert_eq!(storage.get(STORAGE_KEY_LANGUAGE), Some("ar".to_string()));
    }

    #[test]
    fn test_unsupported_override_falls_through() {
        let mut storage = MemoryStorage::new();
        let detected = detect_language(
            Some("fr"),
            &mut storage,
            &["es-419".to_string()],
            &supported(),
            "en",
        );
        assert_eq!(detected, "es");
        // Nothing persisted for an unmatched override
        assert_eq!(storage.get(STORAGE_KEY_LANGUAGE), None);
    }

    #[test]
    fn test_stored_choice_beats_browser_list() {
        let mut storage = MemoryStorage::with_entries(&[(STORAGE_KEY_LANGUAGE, "es")]);
        let detected =
            detect_language(None, &mut storage, &["ar".to_string()], &supported(), "en");
        assert_eq!(detected, "es");
    }

    #[test]
    fn test_default_when_nothing_matches() {
        let mut storage = MemoryStorage::new();
        let detected =
            detect_language(None, &mut storage, &["fr".to_string()], &supported(), "en");
        assert_eq!(detected, "en");
    }
}
