// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HBJSON Model - Data model and structural rules for HBJSON building models
//!
//! This crate defines the hierarchy of a building model as handed to a
//! simulation engine: rooms made of faces, faces hosting apertures and doors,
//! and shades attachable at every level. Every type (de)serializes to the
//! HBJSON record form with a mandatory `type` discriminator.
//!
//! # Architecture
//!
//! - [`Plane`], [`Face3D`] - point-list geometry with arity rules
//! - [`BoundaryCondition`], [`SubFaceBoundaryCondition`] - what lies behind a surface
//! - `*PropertiesAbridged` envelopes - opaque per-engine payloads
//! - [`Named`] - identity shared by every named entity
//! - [`Shade`], [`Door`], [`Aperture`], [`Face`], [`Room`], [`Model`] - the tree
//! - [`Validate`] - owner-parametrized structural rules for each entity
//! - [`schema`] - `JsonSchema` introspection for external schema generators
//!
//! Model-wide checks (global name uniqueness, dangling references, orphan
//! advisories) live in the `hbjson-validator` crate.
//!
//! # Example
//!
//! ```ignore
//! use hbjson_model::{Face3D, Shade, Validate};
//!
//! let geometry = Face3D::new(
//!     vec![vec![0.0, 0.0, 3.0], vec![1.0, 0.0, 3.0], vec![1.0, 1.0, 3.0]],
//!     None,
//!     None,
//! )?;
//! let shade = Shade::new("Overhang_1", geometry);
//! let warnings = shade.validate()?;
//! ```

#[macro_use]
mod macros;

pub mod boundary;
pub mod entities;
pub mod error;
pub mod geometry;
pub mod model;
pub mod path;
pub mod properties;
pub mod schema;
pub mod traits;
pub mod types;
pub mod validate;

// Re-export all public types
pub use boundary::*;
pub use entities::*;
pub use error::*;
pub use geometry::*;
pub use model::*;
pub use path::*;
pub use properties::*;
pub use traits::*;
pub use types::*;
pub use validate::*;
