// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Point-list geometry primitives
//!
//! These are passive, structurally-checked bags of coordinates. No area,
//! normal or planarity computation happens here; points are kept as raw
//! coordinate lists so that a record with the wrong coordinate count is
//! reported as a geometry error instead of a schema error.

use crate::validate::{validate_face3d, validate_plane};
use crate::{Face3DTag, FieldPath, PlaneTag, Result};
use schemars::gen::SchemaGenerator;
use schemars::schema::{InstanceType, Schema, SchemaObject};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A point as (x, y, z) coordinates
pub type Point3D = Vec<f64>;

/// An infinite plane given by normal, origin and optional x-axis
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Plane {
    #[serde(rename = "type")]
    pub type_tag: PlaneTag,
    /// Plane normal as 3 (x, y, z) values
    #[schemars(schema_with = "point_schema")]
    pub n: Point3D,
    /// Plane origin as 3 (x, y, z) values
    #[schemars(schema_with = "point_schema")]
    pub o: Point3D,
    /// Plane x-axis as 3 (x, y, z) values
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(schema_with = "point_schema")]
    pub x: Option<Point3D>,
}

impl Plane {
    /// Create a plane, checking that each vector has 3 components
    pub fn new(n: Point3D, o: Point3D, x: Option<Point3D>) -> Result<Self> {
        let plane = Self {
            type_tag: PlaneTag,
            n,
            o,
            x,
        };
        validate_plane(&plane, &FieldPath::root(PlaneTag::VALUE))?;
        Ok(plane)
    }
}

/// A single planar face in 3D space, optionally with holes
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Face3D {
    #[serde(rename = "type")]
    pub type_tag: Face3DTag,
    /// Outer boundary vertices; at least 3 points of 3 (x, y, z) values each
    #[schemars(schema_with = "point_loop_schema")]
    pub boundary: Vec<Point3D>,
    /// One point loop per hole in the face
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(schema_with = "holes_schema")]
    pub holes: Option<Vec<Vec<Point3D>>>,
    /// Plane in which the face exists; derived from the boundary when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plane: Option<Plane>,
}

impl Face3D {
    /// Create a face, checking point arity and the minimum boundary size
    ///
    /// Degenerate holes are accepted here; they surface as warnings through
    /// [`crate::Validate::validate`].
    pub fn new(
        boundary: Vec<Point3D>,
        holes: Option<Vec<Vec<Point3D>>>,
        plane: Option<Plane>,
    ) -> Result<Self> {
        let face = Self {
            type_tag: Face3DTag,
            boundary,
            holes,
            plane,
        };
        let mut warnings = Vec::new();
        validate_face3d(&face, &FieldPath::root(Face3DTag::VALUE), &mut warnings)?;
        Ok(face)
    }

    /// Get hole loops (empty when absent)
    pub fn holes(&self) -> &[Vec<Point3D>] {
        self.holes.as_deref().unwrap_or_default()
    }

    /// Get the number of boundary vertices
    pub fn vertex_count(&self) -> usize {
        self.boundary.len()
    }

    /// Check if the face has any holes
    pub fn has_holes(&self) -> bool {
        !self.holes().is_empty()
    }
}

fn array_schema(items: Schema, min_items: Option<u32>, max_items: Option<u32>) -> Schema {
    let mut schema = SchemaObject {
        instance_type: Some(InstanceType::Array.into()),
        ..Default::default()
    };
    let array = schema.array();
    array.items = Some(items.into());
    array.min_items = min_items;
    array.max_items = max_items;
    schema.into()
}

fn point_schema(gen: &mut SchemaGenerator) -> Schema {
    array_schema(f64::json_schema(gen), Some(3), Some(3))
}

fn point_loop_schema(gen: &mut SchemaGenerator) -> Schema {
    array_schema(point_schema(gen), Some(3), None)
}

fn holes_schema(gen: &mut SchemaGenerator) -> Schema {
    array_schema(point_loop_schema(gen), None, None)
}
