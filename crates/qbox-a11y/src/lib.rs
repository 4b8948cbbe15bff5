//! qbox Accessibility
//!
//! ARIA helpers, the screen-reader announcer, focus management, and
//! keyboard navigation.
//!
//! Features:
//! - ARIA roles, states, live regions
//! - Focus trap with Tab/Shift+Tab wraparound
//! - Arrow-key navigation in list-like containers
//! - Global keyboard shortcut routing

pub mod announcer;
pub mod aria;
pub mod focus;
pub mod keyboard;

pub use announcer::ScreenReaderAnnouncer;
pub use aria::{AriaRole, LiveRegionMode};
pub use focus::FocusManager;
pub use keyboard::{Shortcut, ShortcutContext};

/// Accessibility error
#[derive(Debug, thiserror::Error)]
pub enum A11yError {
    #[error("invalid ARIA role: {0}")]
    InvalidRole(String),
}
