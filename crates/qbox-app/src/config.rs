//! Application Configuration
//!
//! Fixed sets and endpoints, constructed once at bootstrap and passed to
//! whatever needs them.

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Languages the UI ships translations for
    pub supported_languages: Vec<String>,
    /// Language used when nothing else matches, and as load fallback
    pub default_language: String,
    /// Right-to-left language codes
    pub rtl_languages: Vec<String>,
    /// Base path for translation files
    pub locales_base: String,
    /// Question submission endpoint (same origin)
    pub ask_endpoint: String,
    /// Maximum question length accepted by the API
    pub question_max_len: usize,
    /// External service the `g` shortcut opens
    pub upstream_url: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            supported_languages: vec![
                "en".into(),
                "es".into(),
                "fr".into(),
                "de".into(),
                "pt".into(),
                "ar".into(),
                "he".into(),
            ],
            default_language: "en".into(),
            rtl_languages: vec!["ar".into(), "he".into(), "fa".into(), "ur".into()],
            locales_base: "/locales".into(),
            ask_endpoint: "/api/ask".into(),
            question_max_len: 10_000,
            upstream_url: "https://chat.example.com/".into(),
        }
    }
}
