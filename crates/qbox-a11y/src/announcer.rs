//! Screen Reader Announcer
//!
//! A single off-screen live region, created lazily on first use. Messages
//! are cleared and re-set after a short delay so assistive technology
//! re-announces even an identical message.

use tracing::debug;

use qbox_dom::{primitives, Document, NodeId};

use crate::aria::{self, LiveRegionMode};

/// Delay between clearing the region and setting the new message
pub const ANNOUNCE_DELAY_MS: u64 = 50;

/// Live-region announcer
#[derive(Debug, Default)]
pub struct ScreenReaderAnnouncer {
    region: Option<NodeId>,
    pending: Option<(String, u64)>,
}

impl ScreenReaderAnnouncer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Announce a message. The live region is cleared immediately; the
    /// message lands on the next tick at or after the re-announce delay.
    pub fn announce(&mut self, doc: &mut Document, message: &str, now_ms: u64) {
        let region = self.ensure_region(doc);
        primitives::set_text(doc, Some(region), "");
        self.pending = Some((message.to_string(), now_ms + ANNOUNCE_DELAY_MS));
        debug!(message, "queued announcement");
    }

    /// Apply a due announcement
    pub fn tick(&mut self, doc: &mut Document, now_ms: u64) {
        let due = match &self.pending {
            Some((_, due)) => *due,
            None => return,
        };
        if now_ms >= due {
            if let Some((message, _)) = self.pending.take() {
                let region = self.region;
                primitives::set_text(doc, region, &message);
            }
        }
    }

    /// The live region element, if it has been created
    pub fn region(&self) -> Option<NodeId> {
        self.region
    }

    /// Current live-region text
    pub fn current_text<'a>(&self, doc: &'a Document) -> Option<&'a str> {
        primitives::text(doc, self.region)
    }

    fn ensure_region(&mut self, doc: &mut Document) -> NodeId {
        if let Some(region) = self.region {
            if doc.get(region).is_some() {
                return region;
            }
        }
        let region = doc.create_element("div");
        doc.append_child(NodeId::ROOT, region);
        doc.set_id(region, "sr-announcer");
        aria::set_live(doc, Some(region), LiveRegionMode::Polite);
        primitives::set_attribute(doc, Some(region), "role", "status");
        // Visually off-screen, still exposed to assistive technology
        primitives::set_style(doc, Some(region), "position", "absolute");
        primitives::set_style(doc, Some(region), "left", "-9999px");
        self.region = Some(region);
        region
    }
}
