// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Proof-carrying wrapper for values that passed validation

use hbjson_model::ValidationWarning;
use serde::{Serialize, Serializer};
use std::ops::Deref;

/// A value that passed validation, together with its warnings
///
/// Only the validator can construct it, and it hands out shared references
/// only, so the wrapped value cannot drift out of its validated state.
/// Serializing it writes the inner value alone.
#[derive(Debug, Clone)]
pub struct Validated<T> {
    value: T,
    warnings: Vec<ValidationWarning>,
}

impl<T> Validated<T> {
    pub(crate) fn new(value: T, warnings: Vec<ValidationWarning>) -> Self {
        Self { value, warnings }
    }

    /// Get the validated value
    pub fn get(&self) -> &T {
        &self.value
    }

    /// Non-fatal findings, in discovery order
    pub fn warnings(&self) -> &[ValidationWarning] {
        &self.warnings
    }

    /// Check if validation produced any warning
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Give up the validation proof and take the value back
    pub fn into_inner(self) -> T {
        self.value
    }

    /// Split into value and warnings
    pub fn into_parts(self) -> (T, Vec<ValidationWarning>) {
        (self.value, self.warnings)
    }
}

impl<T> Deref for Validated<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.value
    }
}

impl<T> AsRef<T> for Validated<T> {
    fn as_ref(&self) -> &T {
        &self.value
    }
}

impl<T: Serialize> Serialize for Validated<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.value.serialize(serializer)
    }
}
