// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Structural paths used to localize validation findings

use serde::{Deserialize, Serialize};
use std::fmt;

/// Location of a field inside an entity tree
///
/// Rendered as the root entity type followed by field accesses and list
/// indices, e.g. `Room.faces[2].apertures[0].boundary_condition`.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct FieldPath(String);

impl FieldPath {
    /// Start a path at a root entity label (`Model`, `Room`, ...)
    pub fn root(label: &str) -> Self {
        FieldPath(label.to_string())
    }

    /// Descend into a named field
    pub fn field(&self, name: &str) -> Self {
        FieldPath(format!("{}.{}", self.0, name))
    }

    /// Descend into item `index` of the list field `name`
    pub fn index(&self, name: &str, index: usize) -> Self {
        FieldPath(format!("{}.{}[{}]", self.0, name, index))
    }

    /// Descend into item `index` of the list this path already points at
    pub fn at(&self, index: usize) -> Self {
        FieldPath(format!("{}[{}]", self.0, index))
    }

    /// Get the rendered path
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
