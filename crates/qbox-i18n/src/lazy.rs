//! Lazy Translation
//!
//! Elements flagged for deferred translation are watched for viewport
//! intersection; each is translated once, the first time it becomes
//! visible, then dropped from the watch list.

use std::collections::HashMap;

use tracing::debug;

use qbox_dom::{Document, NodeId, Rect};

use crate::engine::LocalizationEngine;
use crate::I18N_LAZY_ATTR;

/// Viewport-intersection watcher for deferred translation
#[derive(Debug, Default)]
pub struct LazyTranslator {
    observed: Vec<NodeId>,
}

impl LazyTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Watch a single element
    pub fn observe(&mut self, node: NodeId) {
        if !self.observed.contains(&node) {
            self.observed.push(node);
        }
    }

    /// Watch every element flagged for deferred translation
    pub fn observe_tagged(&mut self, doc: &Document) {
        for id in doc.all_elements() {
            if doc.element(id).map(|d| d.attr(I18N_LAZY_ATTR).is_some()).unwrap_or(false) {
                self.observe(id);
            }
        }
    }

    /// Number of elements still waiting to become visible
    pub fn pending(&self) -> usize {
        self.observed.len()
    }

    /// Check intersections against the viewport and translate every
    /// element that has become visible. Translated elements are
    /// unregistered; they are never re-translated by this path.
    pub fn process(
        &mut self,
        doc: &mut Document,
        engine: &LocalizationEngine,
        viewport: Rect,
        layout: &HashMap<NodeId, Rect>,
    ) -> usize {
        let visible: Vec<NodeId> = self
            .observed
            .iter()
            .copied()
            .filter(|id| {
                layout
                    .get(id)
                    .map(|rect| rect.visible_ratio(&viewport) > 0.0)
                    .unwrap_or(false)
            })
            .collect();

        for node in &visible {
            engine.translate_tagged(doc, *node);
        }
        self.observed.retain(|id| !visible.contains(id));

        if !visible.is_empty() {
            debug!(count = visible.len(), "lazily translated elements");
        }
        visible.len()
    }

    /// Tear down the watcher
    pub fn cleanup(&mut self) {
        self.observed.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qbox_dom::primitives;
    use qbox_dom::MemoryStorage;

    use crate::table::TranslationTable;
    use crate::I18N_ATTR;

    fn engine_with_en() -> LocalizationEngine {
        let mut engine =
            LocalizationEngine::new(vec!["en".into()], "en", Vec::new());
        engine.preload(
            "en",
            TranslationTable::from_json(r#"{ "faq": { "entry": "Why Rust?" } }"#).unwrap(),
        );
        engine
    }

    #[test]
    fn test_translated_once_on_first_visibility() {
        let mut doc = Document::new();
        let item = doc.create_element("p");
        doc.append_child(qbox_dom::NodeId::ROOT, item);
        primitives::set_attribute(&mut doc, Some(item), I18N_ATTR, "faq.entry");
        primitives::set_attribute(&mut doc, Some(item), I18N_LAZY_ATTR, "");

        let mut storage = MemoryStorage::new();
        let mut engine = engine_with_en();
        engine.set_language(&mut doc, &mut storage, "en");

        let mut lazy = LazyTranslator::new();
        lazy.observe_tagged(&doc);
        assert_eq!(lazy.pending(), 1);

        let viewport = Rect::new(0.0, 0.0, 800.0, 600.0);
        let mut layout = HashMap::new();

        // Below the fold: nothing happens
        layout.insert(item, Rect::new(0.0, 900.0, 100.0, 50.0));
        assert_eq!(lazy.process(&mut doc, &engine, viewport, &layout), 0);
        assert_eq!(lazy.pending(), 1);

        // Scrolled into view: translated and unregistered
        layout.insert(item, Rect::new(0.0, 300.0, 100.0, 50.0));
        assert_eq!(lazy.process(&mut doc, &engine, viewport, &layout), 1);
        assert_eq!(primitives::text(&doc, Some(item)), Some("Why Rust?"));
        assert_eq!(lazy.pending(), 0);

        // Still visible on the next pass: no re-translation
        assert_eq!(lazy.process(&mut doc, &engine, viewport, &layout), 0);
    }

    #[test]
    fn test_cleanup() {
        let mut lazy = LazyTranslator::new();
        lazy.observe(qbox_dom::NodeId::ROOT);
        lazy.cleanup();
        assert_eq!(lazy.pending(), 0);
    }
}
