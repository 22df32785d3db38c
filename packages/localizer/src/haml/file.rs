/*
 * Haml file driver
 */

//! One Haml template: parse, extract, and write localized copies.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use tracing::{debug, warn};

use super::assembler::{localize_text, AssemblyContext};
use super::file_type::{lock, DATATYPE};
use super::scanner::{scan, Segment};
use crate::error::{LocalizerError, Result};
use crate::hash;
use crate::project::Project;
use crate::resource::ResourceStringBuilder;
use crate::translation_set::TranslationSet;

/// A single Haml template file.
pub struct HamlFile {
    project: Arc<Project>,
    path_name: String,
    segments: Vec<Segment>,
    set: TranslationSet,
    newres: Arc<Mutex<TranslationSet>>,
    modern: Arc<Mutex<TranslationSet>>,
}

impl HamlFile {
    /// A file wired to the shared bookkeeping sets of its file type.
    pub fn new(
        project: Arc<Project>,
        path_name: &str,
        newres: Arc<Mutex<TranslationSet>>,
        modern: Arc<Mutex<TranslationSet>>,
    ) -> Self {
        HamlFile {
            set: TranslationSet::new(&project.source_locale),
            project,
            path_name: path_name.to_string(),
            segments: Vec::new(),
            newres,
            modern,
        }
    }

    /// A file with its own private bookkeeping sets.
    pub fn standalone(project: Arc<Project>, path_name: &str) -> Self {
        let locale = project.source_locale.clone();
        Self::new(
            project,
            path_name,
            Arc::new(Mutex::new(TranslationSet::new(&locale))),
            Arc::new(Mutex::new(TranslationSet::new(&locale))),
        )
    }

    /// Resource key for a piece of source text.
    pub fn make_key(text: &str) -> String {
        hash::hash_key(text)
    }

    /// Scan template text into segments and collect the extracted strings.
    pub fn parse(&mut self, text: &str) {
        self.segments = scan(text);
        self.set.clear();
        self.set.set_clean();
        for segment in self.segments.iter().filter(|s| s.localizable) {
            let resource =
                ResourceStringBuilder::new(&self.project.id, &self.project.source_locale, DATATYPE)
                    .key(hash::hash_key(&segment.text))
                    .source(segment.text.clone())
                    .path_name(&self.path_name)
                    .build();
            self.set.add(resource);
        }
        debug!(path = %self.path_name, strings = self.set.size(), "parsed");
    }

    /// Read the file from disk and parse it. A file that cannot be read
    /// yields an empty set rather than an error.
    pub fn extract(&mut self) {
        match std::fs::read_to_string(&self.path_name) {
            Ok(text) => self.parse(&text),
            Err(e) => {
                warn!(path = %self.path_name, error = %e, "could not read file");
                self.segments.clear();
                self.set.clear();
                self.set.set_clean();
            }
        }
    }

    pub fn get_translation_set(&self) -> &TranslationSet {
        &self.set
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Localized form of the whole template for one target locale.
    pub fn localize_text(&self, translations: &TranslationSet, locale: &str) -> String {
        let mut newres = lock(&self.newres);
        let mut modern = lock(&self.modern);
        let mut ctx = AssemblyContext {
            project: &self.project,
            translations,
            locale,
            path_name: &self.path_name,
            datatype: DATATYPE,
            newres: &mut newres,
            modern: &mut modern,
        };
        localize_text(&self.segments, &mut ctx)
    }

    /// Path the localized copy for `locale` is written to. The mapped
    /// locale is inserted before the `.html.haml` compound extension when
    /// present, otherwise before the final `.haml`.
    pub fn get_localized_path(&self, locale: &str) -> String {
        let path = self
            .path_name
            .strip_prefix("./")
            .unwrap_or(&self.path_name);
        let loc = self.project.map_locale(locale);
        if let Some(stem) = path.strip_suffix(".html.haml") {
            format!("{}.{}.html.haml", stem, loc)
        } else if let Some(stem) = path.strip_suffix(".haml") {
            format!("{}.{}.haml", stem, loc)
        } else {
            format!("{}.{}", path, loc)
        }
    }

    /// Write one localized copy per non-source target locale.
    pub fn localize(&self, translations: &TranslationSet, locales: &[String]) -> Result<()> {
        for locale in locales {
            if self.project.is_source_locale(locale) {
                continue;
            }
            let text = self.localize_text(translations, locale);
            let rel = self.get_localized_path(locale);
            let out = if self.project.target_dir.as_os_str().is_empty() {
                PathBuf::from(&rel)
            } else {
                self.project.target_dir.join(&rel)
            };
            if let Some(parent) = out.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)
                        .map_err(|e| LocalizerError::io(parent.display().to_string(), e))?;
                }
            }
            debug!(path = %out.display(), locale = %locale, "writing localized file");
            std::fs::write(&out, text)
                .map_err(|e| LocalizerError::io(out.display().to_string(), e))?;
        }
        Ok(())
    }
}
