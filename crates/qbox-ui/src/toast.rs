//! Toast Notifications
//!
//! One transient message at a time, hidden again after a fixed display
//! duration. Clipboard success and failure both report through here.

use qbox_dom::{primitives, Document, ElementRegistry, UiElement};

/// How long a toast stays visible
pub const TOAST_DURATION_MS: u64 = 2_500;

/// Toast manager
#[derive(Debug, Default)]
pub struct ToastManager {
    hide_at_ms: Option<u64>,
}

impl ToastManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show a message; an earlier toast is replaced and the timer restarts
    pub fn show(
        &mut self,
        doc: &mut Document,
        registry: &ElementRegistry,
        message: &str,
        now_ms: u64,
    ) {
        let toast = registry.resolve(doc, UiElement::Toast);
        primitives::set_text(doc, toast, message);
        primitives::add_class(doc, toast, "toast-visible");
        primitives::show(doc, toast);
        self.hide_at_ms = Some(now_ms + TOAST_DURATION_MS);
    }

    /// Hide the toast once its display time has elapsed
    pub fn tick(&mut self, doc: &mut Document, registry: &ElementRegistry, now_ms: u64) {
        if let Some(hide_at) = self.hide_at_ms {
            if now_ms >= hide_at {
                let toast = registry.resolve(doc, UiElement::Toast);
                primitives::remove_class(doc, toast, "toast-visible");
                primitives::hide(doc, toast);
                self.hide_at_ms = None;
            }
        }
    }

    /// Whether a toast is currently showing
    pub fn is_visible(&self) -> bool {
        self.hide_at_ms.is_some()
    }
}
