//! DOM Node
//!
//! Element nodes and their data. Every node in a qbox document is an
//! element; text lives on the element as content.

use std::collections::HashMap;

use crate::NodeId;

/// A node in the document tree
#[derive(Debug)]
pub struct Node {
    /// Parent node (None for the root)
    pub parent: Option<NodeId>,
    /// Child nodes in document order
    pub children: Vec<NodeId>,
    /// Element data
    pub data: ElementData,
}

impl Node {
    /// Create a detached element node
    pub fn element(tag: &str) -> Self {
        Self {
            parent: None,
            children: Vec::new(),
            data: ElementData::new(tag),
        }
    }
}

/// Element kind, resolved once from the tag name at creation time.
///
/// Call sites branch on this instead of re-comparing tag strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ElementKind {
    #[default]
    Generic,
    Button,
    Link,
    TextInput,
    TextArea,
    Select,
    Dialog,
    List,
}

impl ElementKind {
    /// Resolve the kind for a tag name
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "button" => Self::Button,
            "a" => Self::Link,
            "input" => Self::TextInput,
            "textarea" => Self::TextArea,
            "select" => Self::Select,
            "dialog" => Self::Dialog,
            "ul" | "ol" => Self::List,
            _ => Self::Generic,
        }
    }

    /// Whether the element accepts typed text
    pub fn is_text_entry(&self) -> bool {
        matches!(self, Self::TextInput | Self::TextArea)
    }

    /// Whether the element is natively interactive
    pub fn is_interactive(&self) -> bool {
        matches!(
            self,
            Self::Button | Self::Link | Self::TextInput | Self::TextArea | Self::Select
        )
    }
}

/// Element-specific data
#[derive(Debug)]
pub struct ElementData {
    /// Tag name (lowercase)
    pub tag: String,
    /// Kind resolved from the tag
    pub kind: ElementKind,
    /// Cached id attribute (very common lookup)
    pub id: Option<String>,
    /// Class list
    pub classes: Vec<String>,
    /// Other attributes
    pub attrs: HashMap<String, String>,
    /// Inline style properties
    pub style: HashMap<String, String>,
    /// Text content
    pub text: String,
    /// Content was set as markup rather than plain text
    pub markup: bool,
    /// Current value, for form controls
    pub value: String,
    /// Bumped whenever a CSS animation on this element is restarted
    pub animation_epoch: u32,
}

impl ElementData {
    pub fn new(tag: &str) -> Self {
        let tag = tag.to_ascii_lowercase();
        Self {
            kind: ElementKind::from_tag(&tag),
            tag,
            id: None,
            classes: Vec::new(),
            attrs: HashMap::new(),
            style: HashMap::new(),
            text: String::new(),
            markup: false,
            value: String::new(),
            animation_epoch: 0,
        }
    }

    /// Get an attribute value
    pub fn attr(&self, name: &str) -> Option<&str> {
        match name {
            "id" => self.id.as_deref(),
            "class" => None,
            _ => self.attrs.get(name).map(|v| v.as_str()),
        }
    }

    /// Check class membership
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Parsed tabindex attribute, if any
    pub fn tab_index(&self) -> Option<i32> {
        self.attrs.get("tabindex").and_then(|v| v.parse().ok())
    }

    /// Whether the element carries the disabled attribute
    pub fn is_disabled(&self) -> bool {
        self.attrs.contains_key("disabled")
    }
}
