//! Theme Controller
//!
//! Tri-state theme: light, dark, or system. The logical mode is what
//! persists; "system" re-resolves against the OS preference at apply time
//! and whenever the preference flips.

use tracing::warn;

use qbox_dom::{primitives, Document, KeyValueStorage, MediaPrefs, NodeId};

use crate::UiError;

/// Storage key for the persisted theme mode
pub const STORAGE_KEY_THEME: &str = "theme";

/// Logical theme mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    Light,
    Dark,
    #[default]
    System,
}

impl ThemeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::System => "system",
        }
    }

    /// Parse a mode name
    pub fn parse(s: &str) -> Result<Self, UiError> {
        match s {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            "system" => Ok(Self::System),
            other => Err(UiError::UnknownThemeMode(other.to_string())),
        }
    }
}

/// Resolved appearance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Appearance {
    Light,
    Dark,
}

impl Appearance {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

/// Theme controller
#[derive(Debug, Default)]
pub struct ThemeController {
    mode: ThemeMode,
}

impl ThemeController {
    pub fn new(mode: ThemeMode) -> Self {
        Self { mode }
    }

    /// Read the persisted mode; absent or invalid values fall back to
    /// system.
    pub fn load(storage: &dyn KeyValueStorage) -> Self {
        let mode = storage
            .get(STORAGE_KEY_THEME)
            .and_then(|v| ThemeMode::parse(&v).ok())
            .unwrap_or_default();
        Self { mode }
    }

    /// Logical mode
    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    /// Appearance the current mode resolves to
    pub fn resolved(&self, media: MediaPrefs) -> Appearance {
        match self.mode {
            ThemeMode::Light => Appearance::Light,
            ThemeMode::Dark => Appearance::Dark,
            ThemeMode::System => {
                if media.dark_scheme {
                    Appearance::Dark
                } else {
                    Appearance::Light
                }
            }
        }
    }

    /// Set the mode: apply markers and persist the logical mode (not the
    /// resolved appearance, so "system" survives reload).
    pub fn set(
        &mut self,
        doc: &mut Document,
        storage: &mut dyn KeyValueStorage,
        media: MediaPrefs,
        mode: ThemeMode,
    ) {
        self.mode = mode;
        storage.set(STORAGE_KEY_THEME, mode.as_str());
        self.apply(doc, media);
    }

    /// Set the mode from a string; unknown names are logged and ignored
    pub fn set_by_name(
        &mut self,
        doc: &mut Document,
        storage: &mut dyn KeyValueStorage,
        media: MediaPrefs,
        name: &str,
    ) {
        match ThemeMode::parse(name) {
            Ok(mode) => self.set(doc, storage, media, mode),
            Err(err) => warn!(%err, "ignoring theme change"),
        }
    }

    /// Toggle: light and system both switch to dark, dark switches to
    /// light (system toggles as its resolved appearance, which is what the
    /// user sees).
    pub fn toggle(
        &mut self,
        doc: &mut Document,
        storage: &mut dyn KeyValueStorage,
        media: MediaPrefs,
    ) {
        let next = match self.mode {
            ThemeMode::Dark => ThemeMode::Light,
            ThemeMode::Light | ThemeMode::System => {
                // A system mode currently resolving to dark toggles to light
                if self.resolved(media) == Appearance::Dark {
                    ThemeMode::Light
                } else {
                    ThemeMode::Dark
                }
            }
        };
        self.set(doc, storage, media, next);
    }

    /// Re-resolve after an OS preference flip; only system mode reacts
    pub fn on_media_change(&self, doc: &mut Document, media: MediaPrefs) {
        if self.mode == ThemeMode::System {
            self.apply(doc, media);
        }
    }

    /// Write the mutually exclusive markers: the resolved appearance and
    /// logical mode on the root, appearance classes on the body.
    pub fn apply(&self, doc: &mut Document, media: MediaPrefs) {
        let appearance = self.resolved(media);
        let root = Some(NodeId::ROOT);

        primitives::set_attribute(doc, root, "data-theme", appearance.as_str());
        primitives::set_attribute(doc, root, "data-theme-mode", self.mode.as_str());

        let body = doc.body();
        match appearance {
            Appearance::Dark => {
                primitives::add_class(doc, body, "theme-dark");
                primitives::remove_class(doc, body, "theme-light");
            }
            Appearance::Light => {
                primitives::add_class(doc, body, "theme-light");
                primitives::remove_class(doc, body, "theme-dark");
            }
        }
    }
}
