//! Presentation settings.
//!
//! The theme is explicit configuration passed down to the presentation
//! layer, not ambient global state. Wizard logic never consults it.

use serde::{Deserialize, Serialize};

/// Color scheme for the hosting view
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Light palette
    #[default]
    Light,
    /// Dark palette
    Dark,
}

impl Theme {
    /// The other theme; used by the mode toggle
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

/// Settings handed to the presentation layer
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Active color scheme
    pub theme: Theme,
}

impl Settings {
    /// Settings with the given theme
    #[must_use]
    pub const fn with_theme(theme: Theme) -> Self {
        Self { theme }
    }
}
