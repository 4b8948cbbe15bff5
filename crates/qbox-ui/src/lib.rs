//! qbox UI
//!
//! The view-state controller, theme controller, animation helper,
//! placeholder rotation engine, toasts, and share-text derivation.

pub mod animate;
pub mod placeholder;
pub mod share;
pub mod theme;
pub mod toast;
pub mod view;

pub use animate::{AnimationHandle, AnimationKind, AnimationOptions, Animator, Completion, Easing};
pub use placeholder::PlaceholderRotator;
pub use theme::{Appearance, ThemeController, ThemeMode};
pub use toast::ToastManager;
pub use view::{ShareLinks, ViewController, ViewState};

/// UI error
#[derive(Debug, thiserror::Error)]
pub enum UiError {
    #[error("unknown theme mode: {0}")]
    UnknownThemeMode(String),

    #[error("unknown animation: {0}")]
    UnknownAnimation(String),
}
