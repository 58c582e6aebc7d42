//! The applets a page can host. The list is fixed at compile time; the
//! browser layer pairs each id with the function that starts it.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::settings::SettingsError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppletId {
    Spiral,
    Cube,
    #[default]
    Terrain,
}

impl AppletId {
    pub const ALL: [AppletId; 3] = [AppletId::Spiral, AppletId::Cube, AppletId::Terrain];

    /// Identifier used in `data-applet` attributes and page names.
    pub fn key(self) -> &'static str {
        match self {
            AppletId::Spiral => "spiral",
            AppletId::Cube => "cube",
            AppletId::Terrain => "terrain",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            AppletId::Spiral => "Square spiral",
            AppletId::Cube => "Lit cube",
            AppletId::Terrain => "Noise terrain",
        }
    }
}

impl FromStr for AppletId {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AppletId::ALL
            .into_iter()
            .find(|id| id.key() == s.trim())
            .ok_or_else(|| SettingsError::UnknownApplet(s.to_string()))
    }
}
