//! Localization Engine
//!
//! Owns the current language, the per-locale table cache, and document
//! translation. Locale loads are serialized: at most one is in flight, and
//! a request arriving mid-load is decided only after the first settles.

use std::collections::HashMap;

use tracing::{debug, warn};

use qbox_dom::document::TextDirection;
use qbox_dom::{FrameOp, KeyValueStorage, NodeId, RenderFrame};
use qbox_dom::Document;

use crate::detect::resolve_supported;
use crate::table::TranslationTable;
use crate::{I18nError, I18N_ATTR, I18N_HTML_ATTR, STORAGE_KEY_LANGUAGE};

/// A translation fetch the caller must perform: GET `<base>/<code>.json`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleRequest {
    pub code: String,
}

impl LocaleRequest {
    /// Request path under the locales base
    pub fn path(&self, base: &str) -> String {
        format!("{}/{}.json", base.trim_end_matches('/'), self.code)
    }
}

/// Outcome of a `set_language` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetLanguage {
    /// Already current and the document is translated
    NoOp,
    /// Applied synchronously from the cache
    Applied,
    /// The caller must perform this fetch and report back
    Fetch(LocaleRequest),
    /// A load is in flight; this request is decided after it settles
    Queued,
}

/// Outcome of `complete_load`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadResolution {
    /// Language applied by this completion, if any
    pub applied: Option<String>,
    /// Follow-up fetch the caller must perform (default-language fallback,
    /// or a request that was queued behind this load)
    pub next: Option<LocaleRequest>,
}

/// Locale change notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum I18nEvent {
    LocaleChanged { code: String },
}

#[derive(Debug)]
struct InFlight {
    code: String,
    /// This load is already the fallback to the default language
    fallback: bool,
    queued: Option<String>,
}

/// The localization engine
#[derive(Debug)]
pub struct LocalizationEngine {
    supported: Vec<String>,
    default_language: String,
    rtl_languages: Vec<String>,
    current: String,
    document_translated: bool,
    loading: Option<InFlight>,
    cache: HashMap<String, TranslationTable>,
    events: Vec<I18nEvent>,
}

impl LocalizationEngine {
    pub fn new(supported: Vec<String>, default_language: &str, rtl_languages: Vec<String>) -> Self {
        Self {
            supported,
            default_language: default_language.to_string(),
            rtl_languages,
            current: default_language.to_string(),
            document_translated: false,
            loading: None,
            cache: HashMap::new(),
            events: Vec::new(),
        }
    }

    /// Active language code
    pub fn current_language(&self) -> &str {
        &self.current
    }

    /// Configured default language
    pub fn default_language(&self) -> &str {
        &self.default_language
    }

    /// Whether the document has been translated at least once
    pub fn document_translated(&self) -> bool {
        self.document_translated
    }

    /// Whether a locale load is in flight
    pub fn is_loading(&self) -> bool {
        self.loading.is_some()
    }

    /// Table for the active language, if loaded
    pub fn table(&self) -> Option<&TranslationTable> {
        self.cache.get(&self.current)
    }

    /// Seed the cache with an already-available table (tests, inlined
    /// default locale). Does not switch languages.
    pub fn preload(&mut self, code: &str, table: TranslationTable) {
        self.cache.insert(code.to_string(), table);
    }

    /// Request a language change. See `SetLanguage` for the contract;
    /// cached locales apply synchronously, uncached ones hand the caller a
    /// fetch to perform.
    pub fn set_language(
        &mut self,
        doc: &mut Document,
        storage: &mut dyn KeyValueStorage,
        code: &str,
    ) -> SetLanguage {
        let code = resolve_supported(code, &self.supported, &self.default_language);

        if let Some(inflight) = &mut self.loading {
            debug!(requested = %code, pending = %inflight.code, "load in flight, queueing");
            inflight.queued = Some(code);
            return SetLanguage::Queued;
        }

        if code == self.current && self.document_translated {
            return SetLanguage::NoOp;
        }

        if self.cache.contains_key(&code) {
            self.apply_locale(doc, storage, &code);
            return SetLanguage::Applied;
        }

        self.loading = Some(InFlight {
            code: code.clone(),
            fallback: false,
            queued: None,
        });
        SetLanguage::Fetch(LocaleRequest { code })
    }

    /// Report the result of a fetch handed out by `set_language`. Drives
    /// fallback to the default language on failure and re-decides any
    /// request that queued up behind the load.
    pub fn complete_load(
        &mut self,
        doc: &mut Document,
        storage: &mut dyn KeyValueStorage,
        code: &str,
        result: Result<&str, I18nError>,
    ) -> LoadResolution {
        let Some(inflight) = self.loading.take() else {
            warn!(code, "ignoring completion for a load that is not in flight");
            return LoadResolution::default();
        };
        if inflight.code != code {
            warn!(completed = code, expected = %inflight.code, "locale load completion mismatch");
        }

        let mut resolution = LoadResolution::default();

        match result.and_then(TranslationTable::from_json) {
            Ok(table) => {
                self.cache.insert(inflight.code.clone(), table);
                self.apply_locale(doc, storage, &inflight.code);
                resolution.applied = Some(inflight.code.clone());
            }
            Err(err) => {
                warn!(code = %inflight.code, %err, "locale load failed");
                if !inflight.fallback && inflight.code != self.default_language {
                    let default = self.default_language.clone();
                    if self.cache.contains_key(&default) {
                        self.apply_locale(doc, storage, &default);
                        resolution.applied = Some(default);
                    } else {
                        self.loading = Some(InFlight {
                            code: default.clone(),
                            fallback: true,
                            queued: inflight.queued,
                        });
                        resolution.next = Some(LocaleRequest { code: default });
                        return resolution;
                    }
                }
                // Failure on the default language is terminal for this
                // call; the UI keeps the last successfully applied locale.
            }
        }

        if let Some(queued) = inflight.queued {
            match self.set_language(doc, storage, &queued) {
                SetLanguage::Fetch(request) => resolution.next = Some(request),
                outcome => debug!(?outcome, code = %queued, "queued language decided"),
            }
        }
        resolution
    }

    fn apply_locale(&mut self, doc: &mut Document, storage: &mut dyn KeyValueStorage, code: &str) {
        self.current = code.to_string();
        storage.set(STORAGE_KEY_LANGUAGE, code);

        let direction = if self.rtl_languages.iter().any(|l| l == code) {
            TextDirection::Rtl
        } else {
            TextDirection::Ltr
        };
        doc.set_direction(direction);

        self.translate_document(doc);
        self.document_translated = true;
        self.events.push(I18nEvent::LocaleChanged {
            code: code.to_string(),
        });
        debug!(language = code, "locale applied");
    }

    /// Translate every tagged element. All mutations are queued into one
    /// render frame and committed in a single step so a partial
    /// translation is never visible.
    pub fn translate_document(&self, doc: &mut Document) {
        let mut tagged = Vec::new();
        for id in doc.all_elements() {
            let Some(data) = doc.element(id) else { continue };
            // Deferred elements wait for the viewport watcher; the flag is
            // dropped after their first translation.
            if data.attr(crate::I18N_LAZY_ATTR).is_some() {
                continue;
            }
            if let Some(key) = data.attr(I18N_HTML_ATTR) {
                tagged.push((id, key.to_string(), true));
            } else if let Some(key) = data.attr(I18N_ATTR) {
                tagged.push((id, key.to_string(), false));
            }
        }

        let mut frame = RenderFrame::new();
        for (node, key, html_variant) in tagged {
            self.push_translation(&mut frame, node, &key, html_variant);
        }
        frame.commit(doc);
    }

    /// Translate a single element against the current table
    pub fn translate_element(&self, doc: &mut Document, node: Option<NodeId>, key: &str) {
        let Some(node) = node else { return };
        let html_variant = doc
            .element(node)
            .map(|d| d.attr(I18N_HTML_ATTR).is_some())
            .unwrap_or(false);

        let mut frame = RenderFrame::new();
        self.push_translation(&mut frame, node, key, html_variant);
        frame.commit(doc);
    }

    /// Translate an element using its own tag attributes (lazy path). The
    /// deferred flag is removed so later whole-document translations keep
    /// the element in sync.
    pub fn translate_tagged(&self, doc: &mut Document, node: NodeId) {
        let key = doc.element(node).and_then(|d| {
            d.attr(I18N_HTML_ATTR)
                .or_else(|| d.attr(I18N_ATTR))
                .map(|k| k.to_string())
        });
        if let Some(key) = key {
            qbox_dom::primitives::remove_attribute(doc, Some(node), crate::I18N_LAZY_ATTR);
            self.translate_element(doc, Some(node), &key);
        }
    }

    fn push_translation(&self, frame: &mut RenderFrame, node: NodeId, key: &str, html_variant: bool) {
        let value = self.translate(key).to_string();
        // Markup only lands as markup when asked for, or when the resolved
        // value itself contains it; plain strings can never inject HTML.
        if html_variant || looks_like_markup(&value) {
            frame.push(FrameOp::SetMarkup { node, html: value });
        } else {
            frame.push(FrameOp::SetText { node, text: value });
        }
    }

    /// Dot-path lookup into the current table. Returns the literal key on
    /// any miss (absent path, or a subtree rather than a leaf).
    pub fn translate<'a>(&'a self, key: &'a str) -> &'a str {
        self.table().and_then(|t| t.text(key)).unwrap_or(key)
    }

    /// List lookup into the current table
    pub fn list(&self, key: &str) -> Option<&[String]> {
        self.table().and_then(|t| t.list(key))
    }

    /// Drain pending locale-change notifications
    pub fn take_events(&mut self) -> Vec<I18nEvent> {
        std::mem::take(&mut self.events)
    }
}

fn looks_like_markup(value: &str) -> bool {
    value.contains('<') && value.contains('>')
}
