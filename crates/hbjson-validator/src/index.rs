// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Model-wide name index

use hbjson_model::{EntityKind, FieldPath, Model, Result, ValidationError, ValidationWarning};
use rustc_hash::FxHashMap;
use std::borrow::Cow;

/// Where a name is declared
#[derive(Debug, Clone, PartialEq)]
pub struct NameEntry {
    /// Name as written, before any case folding
    pub name: String,
    pub kind: EntityKind,
    pub path: FieldPath,
}

/// Index of every entity name below a model
///
/// Built in one depth-first walk; declarations of each name keep walk order
/// so that duplicate reports are deterministic.
#[derive(Debug, Default)]
pub struct NameIndex {
    entries: FxHashMap<String, Vec<NameEntry>>,
    /// Names in the order their second declaration was seen
    collisions: Vec<String>,
    case_insensitive: bool,
}

impl NameIndex {
    /// Build the index for a model
    pub fn build(model: &Model, case_insensitive: bool) -> Self {
        let mut builder = IndexBuilder::new(case_insensitive);
        model.walk(|entity, path| builder.insert(entity.name(), entity.kind(), path));
        builder.finish()
    }

    fn key<'n>(&self, name: &'n str) -> Cow<'n, str> {
        normalize(name, self.case_insensitive)
    }

    /// Check if a name is declared anywhere in the model
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(self.key(name).as_ref())
    }

    /// Get the declarations of a name, in walk order
    pub fn get(&self, name: &str) -> &[NameEntry] {
        self.entries
            .get(self.key(name).as_ref())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Number of distinct names
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the model declares no names
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Names declared more than once, in order of first collision
    pub fn duplicates(&self) -> impl Iterator<Item = (&str, &[NameEntry])> {
        self.collisions
            .iter()
            .map(|name| (name.as_str(), self.entries[name].as_slice()))
    }

    /// Fail with the first duplicate name found in walk order
    pub fn check_duplicates(&self) -> Result<()> {
        match self.duplicates().next() {
            Some((key, entries)) => Err(ValidationError::DuplicateName {
                name: entries
                    .first()
                    .map_or_else(|| key.to_string(), |entry| entry.name.clone()),
                paths: entries.iter().map(|entry| entry.path.clone()).collect(),
            }),
            None => Ok(()),
        }
    }

    /// Surface references naming nothing in the model, in walk order
    pub fn dangling_references(&self, model: &Model) -> Vec<ValidationWarning> {
        let mut warnings = Vec::new();
        model.walk(|entity, path| {
            let references = entity.surface_references();
            if references.is_empty() {
                return;
            }
            let objects = path
                .field("boundary_condition")
                .field("boundary_condition_objects");
            for (j, reference) in references.iter().enumerate() {
                if !self.contains(reference) {
                    warnings.push(ValidationWarning::DanglingReference {
                        path: objects.at(j),
                        reference: reference.clone(),
                    });
                }
            }
        });
        warnings
    }
}

fn normalize(name: &str, case_insensitive: bool) -> Cow<'_, str> {
    if case_insensitive {
        Cow::Owned(name.to_ascii_lowercase())
    } else {
        Cow::Borrowed(name)
    }
}

/// Helper struct for building the index in one walk
struct IndexBuilder {
    entries: FxHashMap<String, Vec<NameEntry>>,
    collisions: Vec<String>,
    case_insensitive: bool,
}

impl IndexBuilder {
    fn new(case_insensitive: bool) -> Self {
        Self {
            entries: FxHashMap::default(),
            collisions: Vec::new(),
            case_insensitive,
        }
    }

    fn insert(&mut self, name: &str, kind: EntityKind, path: &FieldPath) {
        let key = normalize(name, self.case_insensitive).into_owned();
        let declarations = self.entries.entry(key.clone()).or_default();
        declarations.push(NameEntry {
            name: name.to_string(),
            kind,
            path: path.clone(),
        });
        if declarations.len() == 2 {
            self.collisions.push(key);
        }
    }

    fn finish(self) -> NameIndex {
        NameIndex {
            entries: self.entries,
            collisions: self.collisions,
            case_insensitive: self.case_insensitive,
        }
    }
}
