#![deny(clippy::all)]

/**
 * Haml Localizer CLI
 *
 * Batch extraction and localization of Haml templates.
 */

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use anyhow::Context;
use rayon::prelude::*;
use tracing::{debug, info, warn};

use haml_localizer::{HamlFileType, Project, ResourceString, TranslationSet};

/// Outcome of a batch run, for reporting.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub files: usize,
    pub strings: usize,
    pub new_strings: usize,
    /// Files whose localized copies could not all be written.
    pub failed: usize,
}

/// All `.haml` files under `root` that the file type handles, in sorted
/// order so runs are reproducible.
pub fn find_haml_files(root: &Path, hft: &HamlFileType) -> anyhow::Result<Vec<String>> {
    let pattern = format!("{}/**/*.haml", root.display());
    let mut files = Vec::new();
    for entry in glob::glob(&pattern).with_context(|| format!("bad glob pattern {}", pattern))? {
        let path = entry.context("failed to read directory entry")?;
        let name = path.to_string_lossy().into_owned();
        if hft.handles(&name) {
            files.push(name);
        }
    }
    files.sort();
    debug!(root = %root.display(), count = files.len(), "found haml files");
    Ok(files)
}

/// Extract every handled template under `root` and write the aggregate
/// resource set to `out` as JSON.
pub fn run_extract(project: Arc<Project>, root: &Path, out: &Path) -> anyhow::Result<RunSummary> {
    let hft = HamlFileType::new(project);
    let files = find_haml_files(root, &hft)?;

    files.par_iter().for_each(|path| {
        let mut file = hft.new_file(path);
        file.extract();
        hft.add_set(file.get_translation_set());
    });

    let set = hft.get_extracted();
    write_resources(out, &set)?;
    info!(files = files.len(), strings = set.size(), out = %out.display(), "extraction done");
    Ok(RunSummary {
        files: files.len(),
        strings: set.size(),
        new_strings: 0,
        failed: 0,
    })
}

/// Localize every handled template under `root` for the project's target
/// locales, then optionally dump the strings that still need translation.
/// A file whose localized copies cannot be written is logged and counted;
/// the rest of the batch still runs.
pub fn run_localize(
    project: Arc<Project>,
    root: &Path,
    translations_path: &Path,
    new_strings_out: Option<&Path>,
) -> anyhow::Result<RunSummary> {
    let translations = load_translations(&project.source_locale, translations_path)?;
    let locales = project.settings.locales.clone();
    anyhow::ensure!(!locales.is_empty(), "no target locales configured");

    let hft = HamlFileType::new(project);
    let files = find_haml_files(root, &hft)?;

    let failed = AtomicUsize::new(0);
    files.par_iter().for_each(|path| {
        let mut file = hft.new_file(path);
        file.extract();
        if let Err(e) = file.localize(&translations, &locales) {
            warn!(path = %path, error = %e, "could not localize file");
            failed.fetch_add(1, Ordering::Relaxed);
        }
    });

    let newres = hft.get_new();
    if let Some(out) = new_strings_out {
        write_resources(out, &newres)?;
    }
    let failed = failed.into_inner();
    info!(files = files.len(), failed, new_strings = newres.size(), "localization done");
    Ok(RunSummary {
        files: files.len(),
        strings: 0,
        new_strings: newres.size(),
        failed,
    })
}

/// Load a JSON resource file into a translation set.
pub fn load_translations(source_locale: &str, path: &Path) -> anyhow::Result<TranslationSet> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read translations file {}", path.display()))?;
    let resources: Vec<ResourceString> = serde_json::from_str(&text)
        .with_context(|| format!("cannot parse translations file {}", path.display()))?;
    let mut set = TranslationSet::new(source_locale);
    for resource in resources {
        set.add(resource);
    }
    Ok(set)
}

/// Write a resource set as a pretty-printed JSON array.
pub fn write_resources(path: &Path, set: &TranslationSet) -> anyhow::Result<()> {
    let resources: Vec<&ResourceString> = set.get_all();
    let json = serde_json::to_string_pretty(&resources)?;
    std::fs::write(path, json)
        .with_context(|| format!("cannot write resource file {}", path.display()))?;
    Ok(())
}
