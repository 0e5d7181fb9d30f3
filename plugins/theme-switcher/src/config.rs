use serde::Deserialize;
use thiserror::Error;

use crate::core::ThemeCatalog;

pub const DEFAULT_STORAGE_KEY: &str = "preferred-theme";
pub const DEFAULT_COOKIE_MAX_AGE_DAYS: u32 = 365;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("failed to parse theme list: {message}")]
    Malformed { message: String },
    #[error("theme list must contain at least one non-empty name")]
    EmptyThemes,
}

/// Catalog as injected by the page: a ready list or its JSON text.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ThemeListInput {
    List(Vec<String>),
    Serialized(String),
}

impl ThemeListInput {
    fn names(&self) -> Result<Vec<String>, ConfigError> {
        match self {
            Self::List(names) => Ok(names.clone()),
            Self::Serialized(text) => {
                serde_json::from_str::<Vec<String>>(text).map_err(|err| ConfigError::Malformed {
                    message: err.to_string(),
                })
            }
        }
    }

    pub fn parse(&self) -> Result<ThemeCatalog, ConfigError> {
        let names = self.names()?;
        ThemeCatalog::try_from_names(names).map_err(|_| ConfigError::EmptyThemes)
    }
}

/// Element carrying the theme marker classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerTarget {
    #[default]
    Body,
    Root,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SwitcherConfig {
    pub themes: Option<ThemeListInput>,
    pub storage_key: String,
    pub marker_target: MarkerTarget,
    pub cookie_max_age_days: u32,
}

impl Default for SwitcherConfig {
    fn default() -> Self {
        Self {
            themes: None,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            marker_target: MarkerTarget::default(),
            cookie_max_age_days: DEFAULT_COOKIE_MAX_AGE_DAYS,
        }
    }
}

impl SwitcherConfig {
    pub fn with_themes(themes: ThemeListInput) -> Self {
        Self {
            themes: Some(themes),
            ..Self::default()
        }
    }

    /// Resolves the catalog once at startup.
    ///
    /// A missing list silently means the built-in catalog; an unusable one
    /// falls back to it as well and reports why.
    pub fn resolve_catalog(&self) -> (ThemeCatalog, Option<ConfigError>) {
        let Some(themes) = self.themes.as_ref() else {
            return (ThemeCatalog::builtin(), None);
        };
        match themes.parse() {
            Ok(catalog) => (catalog, None),
            Err(err) => (ThemeCatalog::builtin(), Some(err)),
        }
    }

    pub fn storage_key(&self) -> &str {
        let key = self.storage_key.trim();
        if key.is_empty() {
            DEFAULT_STORAGE_KEY
        } else {
            key
        }
    }
}
