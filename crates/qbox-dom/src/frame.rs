//! Render Frames
//!
//! Batched mutation: operations are queued and committed in a single step,
//! so a multi-element update (like a whole-document translation) lands in
//! one paint rather than element by element.

use tracing::debug;

use crate::document::Document;
use crate::primitives;
use crate::NodeId;

/// A queued mutation
#[derive(Debug, Clone, PartialEq)]
pub enum FrameOp {
    SetText { node: NodeId, text: String },
    SetMarkup { node: NodeId, html: String },
    SetAttribute { node: NodeId, name: String, value: String },
    RemoveAttribute { node: NodeId, name: String },
    SetDisabled { node: NodeId, disabled: bool },
}

impl FrameOp {
    fn apply(&self, doc: &mut Document) {
        match self {
            Self::SetText { node, text } => primitives::set_text(doc, Some(*node), text),
            Self::SetMarkup { node, html } => primitives::set_markup(doc, Some(*node), html),
            Self::SetAttribute { node, name, value } => {
                primitives::set_attribute(doc, Some(*node), name, value)
            }
            Self::RemoveAttribute { node, name } => {
                primitives::remove_attribute(doc, Some(*node), name)
            }
            Self::SetDisabled { node, disabled } => {
                primitives::set_disabled(doc, Some(*node), *disabled)
            }
        }
    }
}

/// A batch of mutations applied in one paint step
#[derive(Debug, Default)]
pub struct RenderFrame {
    ops: Vec<FrameOp>,
}

impl RenderFrame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an operation
    pub fn push(&mut self, op: FrameOp) {
        self.ops.push(op);
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Apply every queued operation in order, all within one step
    pub fn commit(self, doc: &mut Document) {
        let count = self.ops.len();
        for op in self.ops {
            op.apply(doc);
        }
        if count > 0 {
            debug!(count, "committed render frame");
        }
    }
}

/// Writes scheduled for a later tick.
///
/// Used where an immediate write would race a near-simultaneous write to
/// the same element (the submit button's disabled toggle).
#[derive(Debug, Default)]
pub struct DeferredWrites {
    pending: Vec<(u64, FrameOp)>,
}

impl DeferredWrites {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule an operation at `due_ms`
    pub fn schedule(&mut self, due_ms: u64, op: FrameOp) {
        self.pending.push((due_ms, op));
    }

    /// Apply every operation that has come due
    pub fn flush(&mut self, doc: &mut Document, now_ms: u64) -> usize {
        let mut applied = 0;
        let mut remaining = Vec::new();
        for (due, op) in self.pending.drain(..) {
            if due <= now_ms {
                op.apply(doc);
                applied += 1;
            } else {
                remaining.push((due, op));
            }
        }
        self.pending = remaining;
        applied
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
