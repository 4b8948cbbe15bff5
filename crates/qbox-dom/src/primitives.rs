//! DOM Primitives
//!
//! Atomic get/set operations on elements. Every mutation performed by the
//! higher layers goes through these, and every operation on a missing
//! element is a silent no-op rather than an error.

use tracing::trace;

use crate::document::Document;
use crate::NodeId;

// === Text content ===

/// Set plain text content
pub fn set_text(doc: &mut Document, node: Option<NodeId>, text: &str) {
    if let Some(data) = node.and_then(|id| doc.element_mut(id)) {
        data.text = text.to_string();
        data.markup = false;
    }
}

/// Set markup content
pub fn set_markup(doc: &mut Document, node: Option<NodeId>, html: &str) {
    if let Some(data) = node.and_then(|id| doc.element_mut(id)) {
        data.text = html.to_string();
        data.markup = true;
    }
}

/// Read text content
pub fn text(doc: &Document, node: Option<NodeId>) -> Option<&str> {
    node.and_then(|id| doc.element(id)).map(|d| d.text.as_str())
}

// === Attributes ===

/// Set an attribute
pub fn set_attribute(doc: &mut Document, node: Option<NodeId>, name: &str, value: &str) {
    let Some(id) = node else { return };
    if name == "id" {
        doc.set_id(id, value);
        return;
    }
    if let Some(data) = doc.element_mut(id) {
        data.attrs.insert(name.to_string(), value.to_string());
    }
}

/// Remove an attribute
pub fn remove_attribute(doc: &mut Document, node: Option<NodeId>, name: &str) {
    if let Some(data) = node.and_then(|id| doc.element_mut(id)) {
        data.attrs.remove(name);
    }
}

/// Read an attribute
pub fn attribute<'a>(doc: &'a Document, node: Option<NodeId>, name: &str) -> Option<&'a str> {
    node.and_then(|id| doc.element(id)).and_then(|d| d.attr(name))
}

/// Check attribute presence
pub fn has_attribute(doc: &Document, node: Option<NodeId>, name: &str) -> bool {
    attribute(doc, node, name).is_some()
}

// === Classes ===

/// Add a class
pub fn add_class(doc: &mut Document, node: Option<NodeId>, class: &str) {
    if let Some(data) = node.and_then(|id| doc.element_mut(id)) {
        if !data.has_class(class) {
            data.classes.push(class.to_string());
        }
    }
}

/// Remove a class
pub fn remove_class(doc: &mut Document, node: Option<NodeId>, class: &str) {
    if let Some(data) = node.and_then(|id| doc.element_mut(id)) {
        data.classes.retain(|c| c != class);
    }
}

/// Check class membership
pub fn has_class(doc: &Document, node: Option<NodeId>, class: &str) -> bool {
    node.and_then(|id| doc.element(id))
        .map(|d| d.has_class(class))
        .unwrap_or(false)
}

// === Styles ===

/// Set an inline style property
pub fn set_style(doc: &mut Document, node: Option<NodeId>, prop: &str, value: &str) {
    if let Some(data) = node.and_then(|id| doc.element_mut(id)) {
        data.style.insert(prop.to_string(), value.to_string());
    }
}

/// Remove an inline style property
pub fn remove_style(doc: &mut Document, node: Option<NodeId>, prop: &str) {
    if let Some(data) = node.and_then(|id| doc.element_mut(id)) {
        data.style.remove(prop);
    }
}

/// Read an inline style property
pub fn style<'a>(doc: &'a Document, node: Option<NodeId>, prop: &str) -> Option<&'a str> {
    node.and_then(|id| doc.element(id))
        .and_then(|d| d.style.get(prop))
        .map(|v| v.as_str())
}

/// Set opacity
pub fn set_opacity(doc: &mut Document, node: Option<NodeId>, opacity: f32) {
    set_style(doc, node, "opacity", &format!("{opacity}"));
}

// === Visibility ===

/// Show an element by clearing its display override
pub fn show(doc: &mut Document, node: Option<NodeId>) {
    remove_style(doc, node, "display");
}

/// Hide an element
pub fn hide(doc: &mut Document, node: Option<NodeId>) {
    set_style(doc, node, "display", "none");
}

/// Whether an element is rendered (no display:none and no hidden attribute,
/// on the element or any ancestor)
pub fn is_shown(doc: &Document, node: Option<NodeId>) -> bool {
    let Some(id) = node else { return false };
    if doc.get(id).is_none() {
        return false;
    }
    let mut chain = vec![id];
    chain.extend(doc.ancestors(id));
    for el in chain {
        let Some(data) = doc.element(el) else { return false };
        if data.style.get("display").map(|v| v == "none").unwrap_or(false)
            || data.attrs.contains_key("hidden")
        {
            return false;
        }
    }
    true
}

// === Form controls ===

/// Set the disabled attribute
pub fn set_disabled(doc: &mut Document, node: Option<NodeId>, disabled: bool) {
    if disabled {
        set_attribute(doc, node, "disabled", "");
    } else {
        remove_attribute(doc, node, "disabled");
    }
}

/// Whether the element is disabled
pub fn is_disabled(doc: &Document, node: Option<NodeId>) -> bool {
    has_attribute(doc, node, "disabled")
}

/// Set a form control's value
pub fn set_value(doc: &mut Document, node: Option<NodeId>, value: &str) {
    if let Some(data) = node.and_then(|id| doc.element_mut(id)) {
        data.value = value.to_string();
    }
}

/// Read a form control's value
pub fn value(doc: &Document, node: Option<NodeId>) -> Option<&str> {
    node.and_then(|id| doc.element(id)).map(|d| d.value.as_str())
}

// === Focus ===

/// Focus an element
pub fn focus(doc: &mut Document, node: Option<NodeId>) {
    if let Some(id) = node {
        if doc.get(id).is_some() {
            trace!(?id, "focus");
            doc.set_active_element(Some(id));
        }
    }
}

/// Blur the active element if it is the given one
pub fn blur(doc: &mut Document, node: Option<NodeId>) {
    if node.is_some() && doc.active_element() == node {
        doc.set_active_element(None);
    }
}

// === Animation ===

/// Restart a CSS animation: drop the class, force a reflow, re-add it.
///
/// Headless model: the element's animation epoch is bumped so the restart
/// is observable.
pub fn restart_animation(doc: &mut Document, node: Option<NodeId>, class: &str) {
    let Some(id) = node else { return };
    remove_class(doc, Some(id), class);
    if let Some(data) = doc.element_mut(id) {
        data.animation_epoch = data.animation_epoch.wrapping_add(1);
    }
    add_class(doc, Some(id), class);
}
