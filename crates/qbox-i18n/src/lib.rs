//! qbox Localization
//!
//! Translation tables, language detection, the localization engine, and
//! lazy viewport-triggered translation.

pub mod detect;
pub mod engine;
pub mod lazy;
pub mod table;

pub use detect::{detect_language, resolve_supported};
pub use engine::{I18nEvent, LoadResolution, LocaleRequest, LocalizationEngine, SetLanguage};
pub use lazy::LazyTranslator;
pub use table::{TranslationTable, TranslationValue};

/// Storage key for the persisted language choice
pub const STORAGE_KEY_LANGUAGE: &str = "userLanguage";

/// Attribute naming an element's translation key
pub const I18N_ATTR: &str = "data-i18n";

/// Attribute naming an element's translation key, HTML variant
pub const I18N_HTML_ATTR: &str = "data-i18n-html";

/// Attribute flagging an element for deferred (on-visibility) translation
pub const I18N_LAZY_ATTR: &str = "data-i18n-lazy";

/// Localization error
#[derive(Debug, thiserror::Error)]
pub enum I18nError {
    #[error("failed to fetch translations: {0}")]
    Fetch(String),

    #[error("malformed translation table: {0}")]
    Parse(#[from] serde_json::Error),
}
