// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error and warning types for model validation

use crate::{BoundaryConditionKind, EntityKind, FieldPath};
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Result type alias for validation operations
pub type Result<T> = std::result::Result<T, ValidationError>;

/// Hard validation failures
///
/// Any of these aborts construction of the entity or model being validated.
/// Structural variants carry the path of the offending field.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Malformed record (wrong field types, missing required fields, bad `type`)
    #[error("Schema error: {message}")]
    Schema {
        message: String,
        line: Option<usize>,
        column: Option<usize>,
    },

    /// Point with the wrong number of coordinates
    #[error("Geometry error at {path}: {message}")]
    Geometry { path: FieldPath, message: String },

    /// Surface boundary condition with the wrong number of linked objects
    #[error(
        "Adjacency arity error at {path}: {owner} {condition} boundary condition requires {expected} boundary_condition_objects, got {actual}"
    )]
    AdjacencyArity {
        path: FieldPath,
        owner: EntityKind,
        condition: BoundaryConditionKind,
        expected: usize,
        actual: usize,
    },

    /// Scalar outside its allowed interval
    #[error("Range error at {path}: {value} is outside {bounds}")]
    Range {
        path: FieldPath,
        value: f64,
        bounds: &'static str,
    },

    /// List shorter than its required minimum
    #[error("Minimum count error at {path}: expected at least {minimum} items, got {actual}")]
    MinimumCount {
        path: FieldPath,
        minimum: usize,
        actual: usize,
    },

    /// Same name used by more than one entity of a model
    #[error("Duplicate name '{name}' used at {}", join_paths(.paths))]
    DuplicateName { name: String, paths: Vec<FieldPath> },

    /// Name that cannot serve as a reference target
    #[error("Invalid name '{name}' at {path}: {reason}")]
    InvalidName {
        path: FieldPath,
        name: String,
        reason: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid validator configuration
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Fieldless category of a [`ValidationError`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Schema,
    Geometry,
    AdjacencyArity,
    Range,
    MinimumCount,
    DuplicateName,
    InvalidName,
    Io,
    Config,
}

impl ValidationError {
    /// Create a geometry error
    pub fn geometry(path: FieldPath, msg: impl Into<String>) -> Self {
        ValidationError::Geometry {
            path,
            message: msg.into(),
        }
    }

    /// Create a minimum count error
    pub fn minimum_count(path: FieldPath, minimum: usize, actual: usize) -> Self {
        ValidationError::MinimumCount {
            path,
            minimum,
            actual,
        }
    }

    /// Create a range error
    pub fn range(path: FieldPath, value: f64, bounds: &'static str) -> Self {
        ValidationError::Range {
            path,
            value,
            bounds,
        }
    }

    /// Create an invalid name error
    pub fn invalid_name(path: FieldPath, name: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidName {
            path,
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create a schema error without position information
    pub fn schema(msg: impl Into<String>) -> Self {
        ValidationError::Schema {
            message: msg.into(),
            line: None,
            column: None,
        }
    }

    /// Get the error category
    pub fn kind(&self) -> ErrorKind {
        match self {
            ValidationError::Schema { .. } => ErrorKind::Schema,
            ValidationError::Geometry { .. } => ErrorKind::Geometry,
            ValidationError::AdjacencyArity { .. } => ErrorKind::AdjacencyArity,
            ValidationError::Range { .. } => ErrorKind::Range,
            ValidationError::MinimumCount { .. } => ErrorKind::MinimumCount,
            ValidationError::DuplicateName { .. } => ErrorKind::DuplicateName,
            ValidationError::InvalidName { .. } => ErrorKind::InvalidName,
            ValidationError::Io(_) => ErrorKind::Io,
            ValidationError::Config(_) => ErrorKind::Config,
        }
    }

    /// Get the path of the offending field, if the error is structural
    pub fn path(&self) -> Option<&FieldPath> {
        match self {
            ValidationError::Geometry { path, .. }
            | ValidationError::AdjacencyArity { path, .. }
            | ValidationError::Range { path, .. }
            | ValidationError::MinimumCount { path, .. }
            | ValidationError::InvalidName { path, .. } => Some(path),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ValidationError {
    fn from(err: serde_json::Error) -> Self {
        // serde_json reports line 0 for errors raised outside a text stream
        let (line, column) = if err.line() == 0 {
            (None, None)
        } else {
            (Some(err.line()), Some(err.column()))
        };
        ValidationError::Schema {
            message: err.to_string(),
            line,
            column,
        }
    }
}

fn join_paths(paths: &[FieldPath]) -> String {
    paths
        .iter()
        .map(FieldPath::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Non-fatal findings returned alongside a successfully validated value
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum ValidationWarning {
    /// Surface boundary condition pointing at a name absent from the model
    DanglingReference { path: FieldPath, reference: String },

    /// Faces, apertures or doors without a parent; unsuitable for energy export
    OrphanedObjects { kind: EntityKind, count: usize },

    /// Hole loop with fewer than 3 points
    DegenerateHole { path: FieldPath, points: usize },
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationWarning::DanglingReference { path, reference } => {
                write!(f, "{path} references unknown object '{reference}'")
            }
            ValidationWarning::OrphanedObjects { kind, count } => write!(
                f,
                "model has {count} orphaned {kind} object(s) and cannot be exported for energy simulation"
            ),
            ValidationWarning::DegenerateHole { path, points } => {
                write!(f, "{path} has only {points} point(s); holes need at least 3")
            }
        }
    }
}
