//! Focus Management
//!
//! Focus trap, Tab wraparound, arrow-key list navigation, and Enter
//! activation over the headless document.

use tracing::debug;

use qbox_dom::events::Key;
use qbox_dom::node::ElementKind;
use qbox_dom::{primitives, Document, NodeId};

use crate::aria;

/// Attribute holding the id of the element that opened a modal, used to
/// restore focus when the trap releases.
pub const TRIGGER_ATTR: &str = "data-trigger";

#[derive(Debug)]
struct FocusTrap {
    container: NodeId,
    restore_to: Option<NodeId>,
}

/// Focus manager
#[derive(Debug, Default)]
pub struct FocusManager {
    trap: Option<FocusTrap>,
}

impl FocusManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Focusable descendants of a container, in document order: interactive
    /// elements (links only with an href) and explicitly tabbable ones,
    /// excluding disabled or not-rendered elements.
    pub fn focusable_descendants(&self, doc: &Document, container: NodeId) -> Vec<NodeId> {
        doc.descendants(container)
            .into_iter()
            .filter(|&id| id != container && is_focusable(doc, id))
            .collect()
    }

    /// Trap focus inside a container. The current active element becomes
    /// the restore target and the first focusable descendant receives
    /// focus. An already-active trap is replaced, not nested.
    pub fn trap_focus(&mut self, doc: &mut Document, container: Option<NodeId>) -> bool {
        let Some(container) = container else { return false };
        if doc.get(container).is_none() {
            return false;
        }

        let restore_to = doc.active_element();
        if self.trap.is_some() {
            debug!("replacing active focus trap");
        }
        self.trap = Some(FocusTrap { container, restore_to });

        if let Some(first) = self.focusable_descendants(doc, container).first() {
            primitives::focus(doc, Some(*first));
        }
        true
    }

    /// Release the trap and restore focus: to the element named by the
    /// container's trigger back-reference if present, else to the element
    /// that was active when the trap was set.
    pub fn release_trap(&mut self, doc: &mut Document) {
        let Some(trap) = self.trap.take() else { return };

        let back_ref = primitives::attribute(doc, Some(trap.container), TRIGGER_ATTR)
            .map(|id| id.to_string())
            .and_then(|id| doc.element_by_id(&id));

        let target = back_ref.or(trap.restore_to).filter(|id| doc.get(*id).is_some());
        primitives::focus(doc, target);
    }

    /// Whether a trap is active
    pub fn is_trapped(&self) -> bool {
        self.trap.is_some()
    }

    /// The trapped container, if any
    pub fn trap_container(&self) -> Option<NodeId> {
        self.trap.as_ref().map(|t| t.container)
    }

    /// Handle Tab/Shift+Tab while trapped. Returns true when the event was
    /// consumed (the headless document moves focus itself; there is no
    /// native tab order to fall back to).
    pub fn handle_tab(&mut self, doc: &mut Document, shift: bool) -> bool {
        let Some(container) = self.trap_container() else { return false };

        let focusables = self.focusable_descendants(doc, container);
        if focusables.is_empty() {
            return true;
        }

        let position = doc
            .active_element()
            .and_then(|active| focusables.iter().position(|&id| id == active));

        let next = match position {
            None => {
                if shift {
                    focusables[focusables.len() - 1]
                } else {
                    focusables[0]
                }
            }
            Some(i) if !shift && i == focusables.len() - 1 => focusables[0],
            Some(0) if shift => focusables[focusables.len() - 1],
            Some(i) if shift => focusables[i - 1],
            Some(i) => focusables[i + 1],
        };

        primitives::focus(doc, Some(next));
        true
    }

    /// Handle arrow keys: moves focus between items of the nearest
    /// list-like ancestor (listbox, menu, menubar, tablist, list), wrapping
    /// modulo the item count. Inactive on text-entry elements. Returns true
    /// when the default scroll should be prevented.
    pub fn handle_arrow(&mut self, doc: &mut Document, key: Key) -> bool {
        let delta: isize = match key {
            Key::ArrowDown | Key::ArrowRight => 1,
            Key::ArrowUp | Key::ArrowLeft => -1,
            _ => return false,
        };

        let Some(active) = doc.active_element() else { return false };
        let Some(data) = doc.element(active) else { return false };
        if data.kind.is_text_entry() {
            return false;
        }

        let container = doc.ancestors(active).into_iter().find(|&id| {
            aria::effective_role(doc, id)
                .map(|r| r.is_item_container())
                .unwrap_or(false)
        });
        let Some(container) = container else { return false };

        let items = self.focusable_descendants(doc, container);
        let Some(index) = items.iter().position(|&id| id == active) else {
            return false;
        };

        let len = items.len() as isize;
        let next = (index as isize + delta).rem_euclid(len) as usize;
        primitives::focus(doc, Some(items[next]));
        true
    }

    /// Element the Enter key should activate: the focused button, or the
    /// focused link carrying an href.
    pub fn enter_target(&self, doc: &Document) -> Option<NodeId> {
        let active = doc.active_element()?;
        let data = doc.element(active)?;
        match data.kind {
            ElementKind::Button => Some(active),
            ElementKind::Link if data.attr("href").is_some() => Some(active),
            _ => None,
        }
    }
}

/// Whether a single element can take focus
fn is_focusable(doc: &Document, id: NodeId) -> bool {
    let Some(data) = doc.element(id) else { return false };
    if data.is_disabled() || !primitives::is_shown(doc, Some(id)) {
        return false;
    }
    match data.tab_index() {
        Some(i) => i >= 0,
        None => match data.kind {
            ElementKind::Link => data.attr("href").is_some(),
            kind => kind.is_interactive(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A modal with three focusable controls; returns (doc, modal, controls)
    fn modal_fixture() -> (Document, NodeId, Vec<NodeId>) {
        let mut doc = Document::new();
        let body = doc.create_element("body");
        doc.append_child(NodeId::ROOT, body);

        let opener = doc.create_element("button");
        doc.append_child(body, opener);
        doc.set_id(opener, "help-button");

        let modal = doc.create_element("dialog");
        doc.append_child(body, modal);
        doc.set_id(modal, "help-modal");

        let mut controls = Vec::new();
        for id in ["first", "second", "third"] {
            let button = doc.create_element("button");
            doc.append_child(modal, button);
            doc.set_id(button, id);
            controls.push(button);
        }
        (doc, modal, controls)
    }

    #[test]
    fn test_trap_focuses_first_descendant() {
        let (mut doc, modal, controls) = modal_fixture();
        let mut focus = FocusManager::new();

        assert!(focus.trap_focus(&mut doc, Some(modal)));
        assert_eq!(doc.active_element(), Some(controls[0]));
        assert!(focus.is_trapped());
    }

    #[test]
    fn test_trap_on_missing_container_is_noop() {
        let mut doc = Document::new();
        let mut focus = FocusManager::new();
        assert!(!focus.trap_focus(&mut doc, None));
        assert!(!focus.is_trapped());
    }

    #[test]
    fn test_tab_wraps_at_edges() {
        let (mut doc, modal, controls) = modal_fixture();
        let mut focus = FocusManager::new();
        focus.trap_focus(&mut doc, Some(modal));

        // Forward through all, then wrap to the first
        assert!(focus.handle_tab(&mut doc, false));
        assert_eq!(doc.active_element(), Some(controls[1]));
        focus.handle_tab(&mut doc, false);
        assert_eq!(doc.active_element(), Some(controls[2]));
        focus.handle_tab(&mut doc, false);
        assert_eq!(doc.active_element(), Some(controls[0]));

        // Shift+Tab from the first wraps to the last
        focus.handle_tab(&mut doc, true);
        assert_eq!(doc.active_element(), Some(controls[2]));
    }

    #[test]
    fn test_focus_never_escapes_trap() {
        let (mut doc, modal, _) = modal_fixture();
        let mut focus = FocusManager::new();
        focus.trap_focus(&mut doc, Some(modal));

        for i in 0..20 {
            focus.handle_tab(&mut doc, i % 3 == 0);
            let active = doc.active_element().unwrap();
            assert!(doc.contains(modal, active));
        }
    }

    #[test]
    fn test_release_restores_via_back_reference() {
        let (mut doc, modal, _) = modal_fixture();
        let opener = doc.element_by_id("help-button").unwrap();
        primitives::set_attribute(&mut doc, Some(modal), TRIGGER_ATTR, "help-button");

        let mut focus = FocusManager::new();
        primitives::focus(&mut doc, Some(opener));
        focus.trap_focus(&mut doc, Some(modal));
        assert_ne!(doc.active_element(), Some(opener));

        focus.release_trap(&mut doc);
        assert_eq!(doc.active_element(), Some(opener));
        assert!(!focus.is_trapped());
    }

    #[test]
    fn test_second_trap_replaces_first() {
        let (mut doc, modal, _) = modal_fixture();
        let other = doc.create_element("div");
        doc.append_child(NodeId::ROOT, other);
        let inner = doc.create_element("button");
        doc.append_child(other, inner);

        let mut focus = FocusManager::new();
        focus.trap_focus(&mut doc, Some(modal));
        focus.trap_focus(&mut doc, Some(other));
        assert_eq!(focus.trap_container(), Some(other));
    }

    #[test]
    fn test_disabled_and_hidden_are_skipped() {
        let (mut doc, modal, controls) = modal_fixture();
        primitives::set_disabled(&mut doc, Some(controls[1]), true);
        primitives::hide(&mut doc, Some(controls[2]));

        let focus = FocusManager::new();
        assert_eq!(focus.focusable_descendants(&doc, modal), vec![controls[0]]);
    }

    #[test]
    fn test_arrow_navigation_wraps() {
        let mut doc = Document::new();
        let menu = doc.create_element("div");
        doc.append_child(NodeId::ROOT, menu);
        primitives::set_attribute(&mut doc, Some(menu), "role", "menu");

        let mut items = Vec::new();
        for _ in 0..3 {
            let item = doc.create_element("button");
            doc.append_child(menu, item);
            items.push(item);
        }

        let mut focus = FocusManager::new();
        primitives::focus(&mut doc, Some(items[2]));

        assert!(focus.handle_arrow(&mut doc, Key::ArrowDown));
        assert_eq!(doc.active_element(), Some(items[0]));

        assert!(focus.handle_arrow(&mut doc, Key::ArrowUp));
        assert_eq!(doc.active_element(), Some(items[2]));
    }

    #[test]
    fn test_arrow_inactive_outside_containers_and_in_inputs() {
        let mut doc = Document::new();
        let input = doc.create_element("input");
        doc.append_child(NodeId::ROOT, input);
        let lone = doc.create_element("button");
        doc.append_child(NodeId::ROOT, lone);

        let mut focus = FocusManager::new();
        primitives::focus(&mut doc, Some(input));
        assert!(!focus.handle_arrow(&mut doc, Key::ArrowDown));

        primitives::focus(&mut doc, Some(lone));
        assert!(!focus.handle_arrow(&mut doc, Key::ArrowDown));
    }

    #[test]
    fn test_enter_target() {
        let mut doc = Document::new();
        let button = doc.create_element("button");
        doc.append_child(NodeId::ROOT, button);
        let link = doc.create_element("a");
        doc.append_child(NodeId::ROOT, link);
        let div = doc.create_element("div");
        doc.append_child(NodeId::ROOT, div);

        let focus = FocusManager::new();

        primitives::focus(&mut doc, Some(button));
        assert_eq!(focus.enter_target(&doc), Some(button));

        // A link without href does not activate
        primitives::focus(&mut doc, Some(link));
        assert_eq!(focus.enter_target(&doc), None);
        primitives::set_attribute(&mut doc, Some(link), "href", "https://example.com");
        assert_eq!(focus.enter_target(&doc), Some(link));

        primitives::focus(&mut doc, Some(div));
        assert_eq!(focus.enter_target(&doc), None);
    }
}
