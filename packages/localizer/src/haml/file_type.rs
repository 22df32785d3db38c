/*
 * Haml file type
 */

//! The file-type registry entry for Haml templates: decides which paths
//! it handles and owns the bookkeeping sets shared by all of its files.

use std::sync::{Arc, Mutex, MutexGuard};

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

use super::file::HamlFile;
use crate::project::Project;
use crate::translation_set::TranslationSet;

/// Datatype tag Haml resources are filed under.
pub const DATATYPE: &str = "x-haml";

/// Matches paths that already carry a locale, e.g. `foo.fr-FR.html.haml`
/// or `foo.zh-Hans-CN.html.haml`.
static ALREADY_LOCALIZED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\.[a-z][a-z](-[A-Z][a-z][a-z][a-z])?(-[A-Z][A-Z])?\.html\.haml$")
        .unwrap_or_else(|e| panic!("invalid locale pattern: {}", e))
});

/// Lock a shared set, recovering the guard if a previous holder panicked.
pub(crate) fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    match m.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

/// Factory and shared state for all Haml files of a project.
pub struct HamlFileType {
    project: Arc<Project>,
    extracted: Arc<Mutex<TranslationSet>>,
    newres: Arc<Mutex<TranslationSet>>,
    modern: Arc<Mutex<TranslationSet>>,
}

impl HamlFileType {
    pub fn new(project: Arc<Project>) -> Self {
        let locale = project.source_locale.clone();
        HamlFileType {
            project,
            extracted: Arc::new(Mutex::new(TranslationSet::new(&locale))),
            newres: Arc::new(Mutex::new(TranslationSet::new(&locale))),
            modern: Arc::new(Mutex::new(TranslationSet::new(&locale))),
        }
    }

    pub fn name(&self) -> &'static str {
        "Haml File Type"
    }

    pub fn datatype(&self) -> &'static str {
        DATATYPE
    }

    /// True when this file type is responsible for the given path: it
    /// ends in `.haml` and is not itself a localized copy.
    pub fn handles(&self, path_name: &str) -> bool {
        let ret = path_name.len() > 5
            && path_name.ends_with(".haml")
            && !ALREADY_LOCALIZED.is_match(path_name);
        trace!(path = %path_name, handles = ret);
        ret
    }

    /// A new file wired to this type's shared sets.
    pub fn new_file(&self, path_name: &str) -> HamlFile {
        HamlFile::new(
            Arc::clone(&self.project),
            path_name,
            Arc::clone(&self.newres),
            Arc::clone(&self.modern),
        )
    }

    /// Merge a file's extracted strings into the aggregate set.
    pub fn add_set(&self, set: &TranslationSet) {
        let mut extracted = lock(&self.extracted);
        for resource in set.iter() {
            extracted.add(resource.clone());
        }
    }

    /// Snapshot of the aggregate extracted strings.
    pub fn get_extracted(&self) -> TranslationSet {
        lock(&self.extracted).clone()
    }

    /// Snapshot of the strings still needing translation.
    pub fn get_new(&self) -> TranslationSet {
        lock(&self.newres).clone()
    }

    /// Snapshot of the whole-unit translations assembled from parts.
    pub fn get_modern(&self) -> TranslationSet {
        lock(&self.modern).clone()
    }

    pub fn project(&self) -> &Project {
        &self.project
    }
}
