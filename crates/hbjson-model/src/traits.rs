// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Named entity identity
//!
//! Shades, doors, apertures, faces, rooms and models share an identity made
//! of a reference-safe `name` and a free-text `display_name`. Each entity
//! embeds an [`Identifier`] and exposes it through the [`Named`] trait.

use crate::{EntityKind, FieldPath, Result, ValidationError};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Longest accepted entity name, in characters
pub const MAX_NAME_LENGTH: usize = 100;

/// Unique name and human label of an entity
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize, JsonSchema)]
pub struct Identifier {
    /// Unique identifier; letters, digits, `.`, `_` and `-` only
    #[schemars(regex(pattern = r"^[.A-Za-z0-9_-]+$"), length(min = 1, max = 100))]
    pub name: String,
    /// Human readable label; falls back to `name` when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

impl Identifier {
    /// Create an identifier without display name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            display_name: None,
        }
    }

    /// Set the display name
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }
}

/// Identity contract shared by every named entity
pub trait Named {
    /// Get the embedded identifier
    fn identifier(&self) -> &Identifier;

    /// Get the entity kind
    fn kind(&self) -> EntityKind;

    /// Get the unique name
    fn name(&self) -> &str {
        &self.identifier().name
    }

    /// Get the display name, falling back to the name
    fn display_name(&self) -> &str {
        let identifier = self.identifier();
        identifier
            .display_name
            .as_deref()
            .unwrap_or(&identifier.name)
    }
}

/// Check if a character may appear in an entity name
pub fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-')
}

/// Check that `name` can be used as a cross-reference target
pub fn check_name(name: &str, path: &FieldPath) -> Result<()> {
    if name.is_empty() {
        return Err(ValidationError::invalid_name(
            path.clone(),
            name,
            "name must not be empty",
        ));
    }
    let length = name.chars().count();
    if length > MAX_NAME_LENGTH {
        return Err(ValidationError::invalid_name(
            path.clone(),
            name,
            format!("name has {length} characters; at most {MAX_NAME_LENGTH} are allowed"),
        ));
    }
    if let Some(bad) = name.chars().find(|c| !is_name_char(*c)) {
        return Err(ValidationError::invalid_name(
            path.clone(),
            name,
            format!("character {bad:?} is not allowed; use letters, digits, '.', '_' or '-'"),
        ));
    }
    Ok(())
}
