/*
 * Translation sets
 */

//! An ordered collection of resources keyed by their composite hash key.

use indexmap::IndexMap;

use crate::resource::ResourceString;

/// Set of resources, iterable in insertion order. Adding a resource whose
/// hash key is already present replaces the existing entry; the set tracks
/// whether it has changed since the last `set_clean`.
#[derive(Debug, Clone, Default)]
pub struct TranslationSet {
    /// Locale the source texts in this set are written in.
    pub source_locale: String,
    by_key: IndexMap<String, ResourceString>,
    dirty: bool,
}

impl TranslationSet {
    pub fn new(source_locale: &str) -> Self {
        TranslationSet {
            source_locale: source_locale.to_string(),
            by_key: IndexMap::new(),
            dirty: false,
        }
    }

    /// Add a resource, replacing any existing resource with the same hash
    /// key. The set becomes dirty unless the new resource is identical to
    /// the one it replaces.
    pub fn add(&mut self, resource: ResourceString) {
        let key = resource.hash_key();
        match self.by_key.get(&key) {
            Some(existing) if *existing == resource => {}
            _ => {
                self.by_key.insert(key, resource);
                self.dirty = true;
            }
        }
    }

    /// Add every resource of another set.
    pub fn add_set(&mut self, other: TranslationSet) {
        for resource in other.by_key.into_values() {
            self.add(resource);
        }
    }

    /// Look up a resource by its composite hash key.
    pub fn get(&self, hash_key: &str) -> Option<&ResourceString> {
        self.by_key.get(hash_key)
    }

    /// Reverse lookup: first resource whose source text matches.
    pub fn get_by_source(&self, source: &str) -> Option<&ResourceString> {
        self.by_key.values().find(|r| r.source == source)
    }

    /// All resources in insertion order.
    pub fn get_all(&self) -> Vec<&ResourceString> {
        self.by_key.values().collect()
    }

    /// Remove a resource by hash key.
    pub fn remove(&mut self, hash_key: &str) -> Option<ResourceString> {
        let removed = self.by_key.shift_remove(hash_key);
        if removed.is_some() {
            self.dirty = true;
        }
        removed
    }

    pub fn size(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }

    /// True when the set changed since the last `set_clean`.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn set_clean(&mut self) {
        self.dirty = false;
    }

    pub fn clear(&mut self) {
        if !self.by_key.is_empty() {
            self.dirty = true;
        }
        self.by_key.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResourceString> {
        self.by_key.values()
    }
}
