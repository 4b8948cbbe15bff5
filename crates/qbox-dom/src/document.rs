//! Document
//!
//! Arena-backed element tree with id lookup, focus tracking, and text
//! direction.

use std::collections::HashMap;

use crate::node::{ElementData, Node};
use crate::NodeId;

/// Document text direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextDirection {
    #[default]
    Ltr,
    Rtl,
}

impl TextDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ltr => "ltr",
            Self::Rtl => "rtl",
        }
    }
}

/// An in-memory document
#[derive(Debug)]
pub struct Document {
    nodes: Vec<Node>,
    ids: HashMap<String, NodeId>,
    active: Option<NodeId>,
    direction: TextDirection,
}

impl Document {
    /// Create a document containing only the root element
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::element("html")],
            ids: HashMap::new(),
            active: None,
            direction: TextDirection::Ltr,
        }
    }

    /// Create a detached element
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node::element(tag));
        id
    }

    /// Append a detached element to a parent
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if self.get(parent).is_none() || self.get(child).is_none() {
            return;
        }
        self.nodes[child.index()].parent = Some(parent);
        self.nodes[parent.index()].children.push(child);
    }

    /// Get a node
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Get a node mutably
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    /// Element data accessor
    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id).map(|n| &n.data)
    }

    /// Mutable element data accessor
    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        self.get_mut(id).map(|n| &mut n.data)
    }

    /// Look up an element by its id attribute
    pub fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.ids.get(id).copied()
    }

    /// Assign the id attribute, updating the lookup table
    pub fn set_id(&mut self, node: NodeId, id: &str) {
        if self.get(node).is_none() {
            return;
        }
        if let Some(old) = self.nodes[node.index()].data.id.take() {
            self.ids.remove(&old);
        }
        self.nodes[node.index()].data.id = Some(id.to_string());
        self.ids.insert(id.to_string(), node);
    }

    /// Preorder walk of a subtree, container included
    pub fn descendants(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            if let Some(node) = self.get(id) {
                out.push(id);
                for child in node.children.iter().rev() {
                    stack.push(*child);
                }
            }
        }
        out
    }

    /// All elements in document order
    pub fn all_elements(&self) -> Vec<NodeId> {
        self.descendants(NodeId::ROOT)
    }

    /// The body element, if present
    pub fn body(&self) -> Option<NodeId> {
        self.all_elements()
            .into_iter()
            .find(|id| self.element(*id).map(|d| d.tag == "body").unwrap_or(false))
    }

    /// Whether `ancestor` contains `node` (inclusive)
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut cursor = Some(node);
        while let Some(id) = cursor {
            if id == ancestor {
                return true;
            }
            cursor = self.get(id).and_then(|n| n.parent);
        }
        false
    }

    /// Walk ancestors of a node, nearest first (node excluded)
    pub fn ancestors(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut cursor = self.get(node).and_then(|n| n.parent);
        while let Some(id) = cursor {
            out.push(id);
            cursor = self.get(id).and_then(|n| n.parent);
        }
        out
    }

    // === Focus ===

    /// Currently focused element
    pub fn active_element(&self) -> Option<NodeId> {
        self.active
    }

    /// Move focus to an element (None blurs)
    pub fn set_active_element(&mut self, node: Option<NodeId>) {
        self.active = match node {
            Some(id) if self.get(id).is_some() => Some(id),
            _ => None,
        };
    }

    // === Direction ===

    /// Document text direction
    pub fn direction(&self) -> TextDirection {
        self.direction
    }

    /// Set text direction, mirrored onto the root dir attribute
    pub fn set_direction(&mut self, direction: TextDirection) {
        self.direction = direction;
        if let Some(data) = self.element_mut(NodeId::ROOT) {
            data.attrs
                .insert("dir".to_string(), direction.as_str().to_string());
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tree_building() {
        let mut doc = Document::new();
        let body = doc.create_element("body");
        doc.append_child(NodeId::ROOT, body);
        let input = doc.create_element("input");
        doc.append_child(body, input);
        doc.set_id(input, "question-input");

        assert_eq!(doc.element_by_id("question-input"), Some(input));
        assert!(doc.contains(body, input));
        assert!(!doc.contains(input, body));
        assert_eq!(doc.descendants(NodeId::ROOT), vec![NodeId::ROOT, body, input]);
    }

    #[test]
    fn test_focus_tracking() {
        let mut doc = Document::new();
        let button = doc.create_element("button");
        doc.append_child(NodeId::ROOT, button);

        doc.set_active_element(Some(button));
        assert_eq!(doc.active_element(), Some(button));

        doc.set_active_element(None);
        assert_eq!(doc.active_element(), None);
    }

    #[test]
    fn test_direction() {
        let mut doc = Document::new();
        doc.set_direction(TextDirection::Rtl);
        assert_eq!(doc.direction(), TextDirection::Rtl);
        assert_eq!(doc.element(NodeId::ROOT).unwrap().attr("dir"), Some("rtl"));
    }
}
