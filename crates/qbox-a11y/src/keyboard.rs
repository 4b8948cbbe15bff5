//! Keyboard Shortcuts
//!
//! Routes plain keypresses to application actions. All shortcuts are
//! suppressed while a text input is focused or a modal is open; the
//! response-only group additionally requires a visible response.

use qbox_dom::events::{Key, KeyEvent};

/// Application shortcut
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    /// `?` or `/` — focus the question input
    FocusInput,
    /// `h` — open help
    OpenHelp,
    /// `t` — toggle theme
    ToggleTheme,
    /// `c` — copy the answer
    CopyAnswer,
    /// `q` — copy question and answer
    CopyQuestionAnswer,
    /// `s` — copy the share link
    CopyShareLink,
    /// `g` — open the upstream service
    OpenUpstream,
}

impl Shortcut {
    /// Whether this shortcut only applies while a response is visible
    pub fn needs_response(&self) -> bool {
        matches!(
            self,
            Self::CopyAnswer | Self::CopyQuestionAnswer | Self::CopyShareLink | Self::OpenUpstream
        )
    }
}

/// State the router consults before matching
#[derive(Debug, Clone, Copy, Default)]
pub struct ShortcutContext {
    /// A text input currently has focus
    pub typing: bool,
    /// A modal is open
    pub modal_open: bool,
    /// The response view is currently visible
    pub response_visible: bool,
}

/// Route a key event to a shortcut, if any applies in this context
pub fn route(event: &KeyEvent, ctx: &ShortcutContext) -> Option<Shortcut> {
    if ctx.typing || ctx.modal_open || event.has_chord_modifier() {
        return None;
    }

    let shortcut = match event.key {
        Key::Char('?') | Key::Char('/') => Shortcut::FocusInput,
        Key::Char('h') => Shortcut::OpenHelp,
        Key::Char('t') => Shortcut::ToggleTheme,
        Key::Char('c') => Shortcut::CopyAnswer,
        Key::Char('q') => Shortcut::CopyQuestionAnswer,
        Key::Char('s') => Shortcut::CopyShareLink,
        Key::Char('g') => Shortcut::OpenUpstream,
        _ => return None,
    };

    if shortcut.needs_response() && !ctx.response_visible {
        return None;
    }
    Some(shortcut)
}
