//! Media Preferences
//!
//! OS/browser-reported preferences the engine reacts to.

/// Media query state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MediaPrefs {
    /// prefers-color-scheme: dark
    pub dark_scheme: bool,
    /// prefers-reduced-motion: reduce
    pub reduced_motion: bool,
}

impl MediaPrefs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dark_scheme(mut self, dark: bool) -> Self {
        self.dark_scheme = dark;
        self
    }

    pub fn with_reduced_motion(mut self, reduced: bool) -> Self {
        self.reduced_motion = reduced;
        self
    }
}
