/*
 * Project configuration
 */

//! Project identity and localization settings.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{LocalizerError, Result};

/// Settings that influence how files are localized.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectSettings {
    /// Wrap localized strings in `<span loclang="haml" locid="...">` so the
    /// origin of each string can be identified in rendered pages.
    pub identify: bool,
    /// Respelling of output locales, e.g. `fr-FR` -> `fr`.
    pub locale_map: HashMap<String, String>,
    /// Target locales to produce.
    pub locales: Vec<String>,
}

impl Default for ProjectSettings {
    fn default() -> Self {
        ProjectSettings {
            identify: false,
            locale_map: HashMap::new(),
            locales: Vec::new(),
        }
    }
}

/// A localization project: the identity under which resources are filed
/// plus the settings and paths used when writing localized files.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    #[serde(default = "default_source_locale")]
    pub source_locale: String,
    #[serde(default)]
    pub target_dir: PathBuf,
    #[serde(default)]
    pub settings: ProjectSettings,
}

fn default_source_locale() -> String {
    "en-US".to_string()
}

impl Project {
    pub fn new(id: &str) -> Self {
        Project {
            id: id.to_string(),
            source_locale: default_source_locale(),
            target_dir: PathBuf::new(),
            settings: ProjectSettings::default(),
        }
    }

    /// Load a project definition from a JSON config file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| LocalizerError::io(path.display().to_string(), e))?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Map a target locale through the project's locale map.
    pub fn map_locale<'a>(&'a self, locale: &'a str) -> &'a str {
        self.settings
            .locale_map
            .get(locale)
            .map(String::as_str)
            .unwrap_or(locale)
    }

    pub fn is_source_locale(&self, locale: &str) -> bool {
        self.source_locale == locale
    }
}
