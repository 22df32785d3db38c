#![deny(clippy::all)]

/**
 * Haml Localizer
 *
 * Extracts localizable strings from Haml templates and writes localized
 * copies by re-assembling translated segments in place.
 */

// Core modules
pub mod chars;
pub mod error;
pub mod hash;
pub mod project;
pub mod resource;
pub mod translation_set;

// Haml scanning and localization
pub mod haml;

// Re-exports
pub use error::{LocalizerError, Result};
pub use haml::file::HamlFile;
pub use haml::file_type::HamlFileType;
pub use project::{Project, ProjectSettings};
pub use resource::ResourceString;
pub use translation_set::TranslationSet;
