use crate::domain::ports::Storage;
use crate::utils::error::{AdGenError, Result};
use std::fmt;
use std::str::FromStr;

pub const THEME_FILE: &str = "theme";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = AdGenError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(AdGenError::InvalidConfigValue {
                field: "theme".to_string(),
                value: other.to_string(),
                reason: "Expected \"light\" or \"dark\"".to_string(),
            }),
        }
    }
}

/// Reads the terminal's `COLORFGBG` ("fg;bg") hint. Background colour
/// indices 0-6 and 8 are dark.
pub fn system_prefers_dark(colorfgbg: Option<&str>) -> Option<bool> {
    let background = colorfgbg?.rsplit(';').next()?.trim().parse::<u8>().ok()?;
    Some(matches!(background, 0..=6 | 8))
}

/// Persisted light/dark preference. It only affects HTML output.
pub struct PreferenceStore<S: Storage> {
    storage: S,
}

impl<S: Storage> PreferenceStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub async fn stored_theme(&self) -> Option<Theme> {
        let bytes = self.storage.read_file(THEME_FILE).await.ok()?;
        match String::from_utf8_lossy(&bytes).parse() {
            Ok(theme) => Some(theme),
            Err(e) => {
                tracing::warn!("Ignoring stored theme preference: {}", e);
                None
            }
        }
    }

    /// Stored value, then the system hint, then light.
    pub async fn resolve_theme(&self, colorfgbg: Option<&str>) -> Theme {
        if let Some(theme) = self.stored_theme().await {
            return theme;
        }
        match system_prefers_dark(colorfgbg) {
            Some(true) => Theme::Dark,
            _ => Theme::Light,
        }
    }

    pub async fn save_theme(&self, theme: Theme) -> Result<()> {
        self.storage
            .write_file(THEME_FILE, theme.as_str().as_bytes())
            .await?;
        tracing::debug!("Saved theme preference: {}", theme);
        Ok(())
    }
}
