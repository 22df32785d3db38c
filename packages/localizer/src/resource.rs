/*
 * Resource strings
 */

//! A single extracted string and its translation bookkeeping.

use serde::{Deserialize, Serialize};

/// State of a freshly extracted resource.
pub const STATE_NEW: &str = "new";

/// A localizable string extracted from a source file, optionally paired
/// with its translation for one target locale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceString {
    /// Project this resource belongs to.
    pub project: String,
    /// Unique key within (project, locale, datatype).
    pub key: String,
    /// Source text.
    pub source: String,
    /// Locale of the source text.
    pub source_locale: String,
    /// Translated text, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    /// Locale of the translation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_locale: Option<String>,
    /// Path of the file the string came from.
    pub path_name: String,
    /// File-type datatype tag, `"x-haml"` for Haml templates.
    pub datatype: String,
    /// Optional flavor qualifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flavor: Option<String>,
    /// Translator comment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Workflow state.
    pub state: String,
    /// True when the key was generated from the source text.
    pub auto_key: bool,
}

impl ResourceString {
    /// Compose the unique lookup key for a (project, locale, key, datatype,
    /// flavor) tuple. The flavor component is omitted when there is none.
    pub fn compose_hash_key(
        project: &str,
        locale: &str,
        key: &str,
        datatype: &str,
        flavor: Option<&str>,
    ) -> String {
        match flavor {
            Some(flavor) => format!("{}_{}_{}_{}_{}", project, locale, key, datatype, flavor),
            None => format!("{}_{}_{}_{}", project, locale, key, datatype),
        }
    }

    /// Lookup key of this resource: translated resources are filed under
    /// their target locale, source resources under their source locale.
    pub fn hash_key(&self) -> String {
        Self::compose_hash_key(
            &self.project,
            self.locale(),
            &self.key,
            &self.datatype,
            self.flavor.as_deref(),
        )
    }

    /// Lookup key of this resource under the given target locale. Used to
    /// find the translation of a source resource.
    pub fn hash_key_for_translation(&self, locale: &str) -> String {
        Self::compose_hash_key(
            &self.project,
            locale,
            &self.key,
            &self.datatype,
            self.flavor.as_deref(),
        )
    }

    /// Locale this resource is filed under: the target locale when there is
    /// one, the source locale otherwise.
    pub fn locale(&self) -> &str {
        self.target_locale.as_deref().unwrap_or(&self.source_locale)
    }
}

/// Builder-style constructor covering the fields extraction always sets.
#[derive(Debug, Clone, Default)]
pub struct ResourceStringBuilder {
    project: String,
    key: String,
    source: String,
    source_locale: String,
    target: Option<String>,
    target_locale: Option<String>,
    path_name: String,
    datatype: String,
    flavor: Option<String>,
    comment: Option<String>,
}

impl ResourceStringBuilder {
    pub fn new(project: &str, source_locale: &str, datatype: &str) -> Self {
        ResourceStringBuilder {
            project: project.to_string(),
            source_locale: source_locale.to_string(),
            datatype: datatype.to_string(),
            ..Default::default()
        }
    }

    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    pub fn target(mut self, target: impl Into<String>, locale: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self.target_locale = Some(locale.into());
        self
    }

    pub fn path_name(mut self, path_name: impl Into<String>) -> Self {
        self.path_name = path_name.into();
        self
    }

    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn flavor(mut self, flavor: impl Into<String>) -> Self {
        self.flavor = Some(flavor.into());
        self
    }

    pub fn build(self) -> ResourceString {
        ResourceString {
            project: self.project,
            key: self.key,
            source: self.source,
            source_locale: self.source_locale,
            target: self.target,
            target_locale: self.target_locale,
            path_name: self.path_name,
            datatype: self.datatype,
            flavor: self.flavor,
            comment: self.comment,
            state: STATE_NEW.to_string(),
            auto_key: true,
        }
    }
}
