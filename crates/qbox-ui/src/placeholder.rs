//! Placeholder Rotation
//!
//! Cycles localized example questions in the overlay on a fixed period.
//! Rotation pauses (without being cancelled) while the input has focus or
//! content; a question arriving via the URL suppresses it entirely until
//! an explicit reset. Overlay text and alignment are re-derived on every
//! content or direction change.

use tracing::debug;

use qbox_dom::document::TextDirection;
use qbox_dom::url::question_from_path;
use qbox_dom::{primitives, Document, ElementRegistry, NodeId, UiElement};
use qbox_i18n::LocalizationEngine;

/// Rotation period
pub const ROTATION_INTERVAL_MS: u64 = 3_000;

/// Class carrying the overlay's cycle animation
const CYCLE_CLASS: &str = "placeholder-cycle";

/// Translation key for the example-question list
const EXAMPLES_KEY: &str = "placeholders.examples";

/// Translation key for the single generic placeholder
const GENERIC_KEY: &str = "placeholders.generic";

/// Fallback when the locale provides no placeholder strings at all
const GENERIC_PLACEHOLDER: &str = "Ask me anything...";

/// Placeholder rotation engine
#[derive(Debug, Default)]
pub struct PlaceholderRotator {
    entries: Vec<String>,
    index: usize,
    /// Next tick due time; present iff rotation is active
    next_due_ms: Option<u64>,
    /// Set once when the page loads with a question in the URL; cleared
    /// only by `reset`
    has_url_question: bool,
    /// Native input placeholder restored while the overlay is hidden
    native_placeholder: String,
}

impl PlaceholderRotator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the locale's placeholder list, derive the URL-question flag
    /// from the current path, and start rotating unless one is present.
    pub fn initialize(
        &mut self,
        doc: &mut Document,
        registry: &ElementRegistry,
        i18n: &LocalizationEngine,
        path: &str,
        now_ms: u64,
    ) {
        self.load_entries(i18n);
        self.index = 0;
        self.has_url_question = question_from_path(path).is_some();
        self.next_due_ms = if self.has_url_question {
            None
        } else {
            Some(now_ms + ROTATION_INTERVAL_MS)
        };
        self.refresh(doc, registry);
        debug!(
            entries = self.entries.len(),
            suppressed = self.has_url_question,
            "placeholder rotation initialized"
        );
    }

    /// Periodic tick. A paused tick (input focused, input non-empty, URL
    /// question) is a no-op; rotation resumes by itself once the pause
    /// condition clears.
    pub fn tick(
        &mut self,
        doc: &mut Document,
        registry: &ElementRegistry,
        now_ms: u64,
    ) -> bool {
        let Some(due) = self.next_due_ms else {
            return false;
        };
        if now_ms < due {
            return false;
        }
        self.next_due_ms = Some(now_ms + ROTATION_INTERVAL_MS);

        if self.paused(doc, registry) || self.entries.is_empty() {
            return false;
        }

        self.index = (self.index + 1) % self.entries.len();
        let overlay = registry.resolve(doc, UiElement::PlaceholderOverlay);
        primitives::set_text(doc, overlay, &self.entries[self.index]);
        primitives::restart_animation(doc, overlay, CYCLE_CLASS);
        true
    }

    /// Locale changed: reload the list and refresh the visible text
    /// immediately.
    pub fn on_locale_changed(
        &mut self,
        doc: &mut Document,
        registry: &ElementRegistry,
        i18n: &LocalizationEngine,
    ) {
        self.load_entries(i18n);
        if self.index >= self.entries.len() {
            self.index = 0;
        }
        self.refresh(doc, registry);
    }

    /// Clear the URL-question suppression, rewind, and restart rotation.
    /// Used when the user navigates back to the home state.
    pub fn reset(&mut self, doc: &mut Document, registry: &ElementRegistry, now_ms: u64) {
        self.has_url_question = false;
        self.index = 0;
        self.next_due_ms = Some(now_ms + ROTATION_INTERVAL_MS);
        self.refresh(doc, registry);
    }

    /// Recompute overlay visibility, text, and RTL alignment from the
    /// input state and document direction.
    pub fn refresh(&self, doc: &mut Document, registry: &ElementRegistry) {
        let overlay = registry.resolve(doc, UiElement::PlaceholderOverlay);
        let input = registry.resolve(doc, UiElement::QuestionInput);

        if self.paused(doc, registry) {
            primitives::hide(doc, overlay);
            // The native placeholder takes over while the overlay is gone
            primitives::set_attribute(doc, input, "placeholder", &self.native_placeholder);
            return;
        }

        primitives::set_attribute(doc, input, "placeholder", "");
        primitives::show(doc, overlay);
        if let Some(text) = self.entries.get(self.index) {
            primitives::set_text(doc, overlay, text);
        }

        match doc.direction() {
            TextDirection::Rtl => {
                primitives::set_style(doc, overlay, "text-align", "right");
                primitives::add_class(doc, overlay, "overlay-rtl");
            }
            TextDirection::Ltr => {
                primitives::set_style(doc, overlay, "text-align", "left");
                primitives::remove_class(doc, overlay, "overlay-rtl");
            }
        }
    }

    /// Whether ticks currently rotate nothing
    pub fn paused(&self, doc: &Document, registry: &ElementRegistry) -> bool {
        if self.has_url_question {
            return true;
        }
        let input = registry.resolve(doc, UiElement::QuestionInput);
        let focused = input.is_some() && doc.active_element() == input;
        let has_text = primitives::value(doc, input)
            .map(|v| !v.is_empty())
            .unwrap_or(false);
        focused || has_text
    }

    /// Whether the rotation timer is armed
    pub fn is_rotating(&self) -> bool {
        self.next_due_ms.is_some()
    }

    /// Currently selected placeholder text
    pub fn current_text(&self) -> Option<&str> {
        self.entries.get(self.index).map(|s| s.as_str())
    }

    /// Tear down the rotation timer
    pub fn cleanup(&mut self) {
        self.next_due_ms = None;
    }

    fn load_entries(&mut self, i18n: &LocalizationEngine) {
        let generic = i18n
            .table()
            .and_then(|t| t.text(GENERIC_KEY))
            .unwrap_or(GENERIC_PLACEHOLDER)
            .to_string();
        self.native_placeholder = generic.clone();

        self.entries = match i18n.list(EXAMPLES_KEY) {
            Some(list) if !list.is_empty() => list.to_vec(),
            _ => vec![generic],
        };
    }
}
