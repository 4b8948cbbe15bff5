//! ARIA Support
//!
//! The ARIA vocabulary this page uses, plus attribute helpers that write
//! through the DOM primitive layer.

use qbox_dom::node::ElementKind;
use qbox_dom::{primitives, Document, NodeId};

/// ARIA roles recognized by the page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AriaRole {
    Button,
    Dialog,
    Link,
    List,
    Listbox,
    Menu,
    MenuBar,
    MenuItem,
    Option,
    Status,
    Tab,
    TabList,
    TextBox,
}

impl AriaRole {
    /// Parse from an attribute value
    pub fn parse(s: &str) -> Option<Self> {
        Some(match s.to_ascii_lowercase().as_str() {
            "button" => Self::Button,
            "dialog" => Self::Dialog,
            "link" => Self::Link,
            "list" => Self::List,
            "listbox" => Self::Listbox,
            "menu" => Self::Menu,
            "menubar" => Self::MenuBar,
            "menuitem" => Self::MenuItem,
            "option" => Self::Option,
            "status" => Self::Status,
            "tab" => Self::Tab,
            "tablist" => Self::TabList,
            "textbox" => Self::TextBox,
            _ => return None,
        })
    }

    /// Whether this role hosts arrow-key item navigation
    pub fn is_item_container(&self) -> bool {
        matches!(
            self,
            Self::List | Self::Listbox | Self::Menu | Self::MenuBar | Self::TabList
        )
    }
}

/// Live region mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiveRegionMode {
    Off,
    Polite,
    Assertive,
}

impl LiveRegionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::Polite => "polite",
            Self::Assertive => "assertive",
        }
    }
}

/// Effective role of an element: explicit role attribute first, else the
/// implicit role of its kind.
pub fn effective_role(doc: &Document, node: NodeId) -> Option<AriaRole> {
    let data = doc.element(node)?;
    if let Some(role) = data.attr("role").and_then(AriaRole::parse) {
        return Some(role);
    }
    match data.kind {
        ElementKind::Button => Some(AriaRole::Button),
        ElementKind::Link => Some(AriaRole::Link),
        ElementKind::List => Some(AriaRole::List),
        ElementKind::Dialog => Some(AriaRole::Dialog),
        ElementKind::TextInput | ElementKind::TextArea => Some(AriaRole::TextBox),
        _ => None,
    }
}

// === Attribute helpers ===

/// Set aria-expanded
pub fn set_expanded(doc: &mut Document, node: Option<NodeId>, expanded: bool) {
    primitives::set_attribute(doc, node, "aria-expanded", bool_str(expanded));
}

/// Set aria-hidden
pub fn set_hidden(doc: &mut Document, node: Option<NodeId>, hidden: bool) {
    if hidden {
        primitives::set_attribute(doc, node, "aria-hidden", "true");
    } else {
        primitives::remove_attribute(doc, node, "aria-hidden");
    }
}

/// Set aria-label
pub fn set_label(doc: &mut Document, node: Option<NodeId>, label: &str) {
    primitives::set_attribute(doc, node, "aria-label", label);
}

/// Set aria-live
pub fn set_live(doc: &mut Document, node: Option<NodeId>, mode: LiveRegionMode) {
    primitives::set_attribute(doc, node, "aria-live", mode.as_str());
}

/// Set aria-modal
pub fn set_modal(doc: &mut Document, node: Option<NodeId>, modal: bool) {
    primitives::set_attribute(doc, node, "aria-modal", bool_str(modal));
}

/// Set aria-busy
pub fn set_busy(doc: &mut Document, node: Option<NodeId>, busy: bool) {
    primitives::set_attribute(doc, node, "aria-busy", bool_str(busy));
}

fn bool_str(b: bool) -> &'static str {
    if b {
        "true"
    } else {
        "false"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_role() {
        assert_eq!(AriaRole::parse("listbox"), Some(AriaRole::Listbox));
        assert_eq!(AriaRole::parse("TABLIST"), Some(AriaRole::TabList));
        assert_eq!(AriaRole::parse("bogus"), None);
        assert!(AriaRole::Menu.is_item_container());
        assert!(!AriaRole::Button.is_item_container());
    }

    #[test]
    fn test_effective_role() {
        let mut doc = Document::new();
        let button = doc.create_element("button");
        doc.append_child(NodeId::ROOT, button);
        let div = doc.create_element("div");
        doc.append_child(NodeId::ROOT, div);

        assert_eq!(effective_role(&doc, button), Some(AriaRole::Button));
        assert_eq!(effective_role(&doc, div), None);

        primitives::set_attribute(&mut doc, Some(div), "role", "menu");
        assert_eq!(effective_role(&doc, div), Some(AriaRole::Menu));
    }

    #[test]
    fn test_attribute_helpers() {
        let mut doc = Document::new();
        let dialog = doc.create_element("dialog");
        doc.append_child(NodeId::ROOT, dialog);

        set_modal(&mut doc, Some(dialog), true);
        set_hidden(&mut doc, Some(dialog), true);
        assert_eq!(
            primitives::attribute(&doc, Some(dialog), "aria-modal"),
            Some("true")
        );

        set_hidden(&mut doc, Some(dialog), false);
        assert!(!primitives::has_attribute(&doc, Some(dialog), "aria-hidden"));
    }
}
