//! File driver tests: localized paths, disk extraction, and writing

use std::fs;
use std::sync::Arc;

use haml_localizer::resource::ResourceStringBuilder;
use haml_localizer::{HamlFile, HamlFileType, Project, TranslationSet};

fn standalone(path: &str) -> HamlFile {
    HamlFile::standalone(Arc::new(Project::new("webapp")), path)
}

#[test]
fn localized_path_for_compound_extension() {
    let file = standalone("foo.html.haml");
    assert_eq!(file.get_localized_path("fr-FR"), "foo.fr-FR.html.haml");
}

#[test]
fn localized_path_strips_leading_dot_slash() {
    let file = standalone("./ruby/foo.html.haml");
    assert_eq!(file.get_localized_path("fr-FR"), "ruby/foo.fr-FR.html.haml");
}

#[test]
fn localized_path_uses_locale_map() {
    let mut project = Project::new("webapp");
    project
        .settings
        .locale_map
        .insert("fr-FR".to_string(), "fr".to_string());
    let file = HamlFile::standalone(Arc::new(project), "./ruby/foo.html.haml");
    assert_eq!(file.get_localized_path("fr-FR"), "ruby/foo.fr.html.haml");
}

#[test]
fn localized_path_for_plain_haml() {
    let file = standalone("foo.haml");
    assert_eq!(file.get_localized_path("fr-FR"), "foo.fr-FR.haml");
}

#[test]
fn extract_reads_strings_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("greeting.html.haml");
    fs::write(&path, "%div\n  %p This is a test.\n  A different string.\n").unwrap();

    let mut file = standalone(&path.display().to_string());
    file.extract();

    let set = file.get_translation_set();
    assert_eq!(set.size(), 2);
    assert!(set.get_by_source("This is a test.").is_some());
    assert!(set.get_by_source("A different string.").is_some());
}

#[test]
fn extract_of_missing_file_yields_empty_set() {
    let mut file = standalone("no/such/file.html.haml");
    file.extract();
    assert!(file.get_translation_set().is_empty());
    assert!(file.segments().is_empty());
}

#[test]
fn localize_writes_translated_copies() {
    let dir = tempfile::tempdir().unwrap();
    let src_path = dir.path().join("page.html.haml");
    fs::write(&src_path, "  This is a test.\n").unwrap();

    let mut translations = TranslationSet::new("en-US");
    translations.add(
        ResourceStringBuilder::new("webapp", "en-US", "x-haml")
            .key(HamlFile::make_key("This is a test."))
            .source("This is a test.")
            .target("Ceci est un essai.", "fr-FR")
            .build(),
    );

    let mut file = standalone(&src_path.display().to_string());
    file.extract();
    file.localize(
        &translations,
        &["fr-FR".to_string(), "en-US".to_string()],
    )
    .unwrap();

    let out_path = dir.path().join("page.fr-FR.html.haml");
    assert_eq!(
        fs::read_to_string(&out_path).unwrap(),
        "  Ceci est un essai.\n"
    );
    // the source locale is never written
    assert!(!dir.path().join("page.en-US.html.haml").exists());
}

#[test]
fn localize_honors_target_dir() {
    let dir = tempfile::tempdir().unwrap();

    let mut project = Project::new("webapp");
    project.target_dir = dir.path().join("out");
    let mut file = HamlFile::standalone(Arc::new(project), "views/page.html.haml");
    file.parse("  Hello there.\n");
    file.localize(&TranslationSet::new("en-US"), &["de-DE".to_string()])
        .unwrap();

    let out_path = dir
        .path()
        .join("out")
        .join("views/page.de-DE.html.haml");
    assert_eq!(fs::read_to_string(&out_path).unwrap(), "  Hello there.\n");
}

#[test]
fn files_of_one_type_share_bookkeeping_sets() {
    let hft = HamlFileType::new(Arc::new(Project::new("webapp")));
    let empty = TranslationSet::new("en-US");

    let mut first = hft.new_file("a.html.haml");
    first.parse("  This is a test.\n");
    first.localize_text(&empty, "fr-FR");

    let mut second = hft.new_file("b.html.haml");
    second.parse("  A different string.\n");
    second.localize_text(&empty, "fr-FR");

    let newres = hft.get_new();
    assert_eq!(newres.size(), 2);
    assert!(newres.get_by_source("This is a test.").is_some());
    assert!(newres.get_by_source("A different string.").is_some());
}

#[test]
fn add_set_aggregates_extracted_strings() {
    let hft = HamlFileType::new(Arc::new(Project::new("webapp")));

    let mut first = hft.new_file("a.html.haml");
    first.parse("  This is a test.\n");
    hft.add_set(first.get_translation_set());

    let mut second = hft.new_file("b.html.haml");
    second.parse("  This is a test.\n  A different string.\n");
    hft.add_set(second.get_translation_set());

    // duplicate sources collapse onto one key
    assert_eq!(hft.get_extracted().size(), 2);
}
