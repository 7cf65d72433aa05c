// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HBJSON Validator - Model-level validation engine for HBJSON documents
//!
//! This crate decodes HBJSON records into the types of `hbjson-model` and
//! runs the checks that need the whole model in view.
//!
//! # Features
//!
//! - **Structural rules** for every room, face, sub-face and shade, with the
//!   path of the first offending field
//! - **Global name uniqueness** across rooms and orphaned objects
//! - **Advisories** for dangling Surface references and orphaned geometry
//! - **Parallel room checks** on the rayon pool, with deterministic results
//! - **TOML options** through [`ValidatorOptions`]
//!
//! # Example
//!
//! ```ignore
//! use hbjson_validator::ModelValidator;
//!
//! let model = ModelValidator::new().parse_model_file("office.hbjson")?;
//! for warning in model.warnings() {
//!     println!("{warning}");
//! }
//! println!("{}", ModelValidator::summary(&model));
//! ```

mod index;
mod options;
mod validated;
mod validator;

pub use index::{NameEntry, NameIndex};
pub use options::ValidatorOptions;
pub use validated::Validated;
pub use validator::{ModelValidator, ValidationSummary};

use hbjson_model::{Model, Result, Validate};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::path::Path;

/// Validate a model with default options
pub fn validate_model(model: Model) -> Result<Validated<Model>> {
    ModelValidator::new().validate(model)
}

/// Decode and validate a model record with default options
pub fn parse_model(record: Value) -> Result<Validated<Model>> {
    ModelValidator::new().parse_model(record)
}

/// Decode and validate a model from JSON text with default options
pub fn parse_model_str(content: &str) -> Result<Validated<Model>> {
    ModelValidator::new().parse_model_str(content)
}

/// Read and validate a model file with default options
pub fn parse_model_file(path: impl AsRef<Path>) -> Result<Validated<Model>> {
    ModelValidator::new().parse_model_file(path)
}

/// Decode and validate a standalone entity record
pub fn parse_entity<T>(record: Value) -> Result<Validated<T>>
where
    T: DeserializeOwned + Validate,
{
    ModelValidator::new().parse_entity(record)
}
