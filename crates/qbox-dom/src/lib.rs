//! qbox DOM - Document model
//!
//! In-memory document tree, element registry, and the primitive mutation
//! layer every higher component goes through. Host bindings (key/value
//! storage, media preferences, page location) live here too so the rest of
//! the engine can be driven without a browser.

pub mod document;
pub mod events;
pub mod frame;
pub mod geometry;
pub mod media;
pub mod node;
pub mod primitives;
pub mod registry;
pub mod storage;
pub mod url;

pub use document::{Document, TextDirection};
pub use events::{Key, KeyEvent};
pub use frame::{DeferredWrites, FrameOp, RenderFrame};
pub use geometry::Rect;
pub use media::MediaPrefs;
pub use node::{ElementData, ElementKind, Node};
pub use registry::{ElementRegistry, UiElement};
pub use storage::{KeyValueStorage, MemoryStorage};
pub use self::url::PageLocation;

/// Node identifier (index into the document arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Root element ID
    pub const ROOT: NodeId = NodeId(0);

    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// DOM error
#[derive(Debug, thiserror::Error)]
pub enum DomError {
    #[error("invalid page URL: {0}")]
    InvalidUrl(#[from] ::url::ParseError),
}
