// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Boundary condition variants
//!
//! A boundary condition describes what lies on the outward side of a face,
//! aperture or door. Only the `Surface` variant links to other objects, and
//! the number of links it needs depends on the owner (see
//! [`crate::EntityKind::surface_arity`]), so these types never validate
//! themselves; the owning entity's rules do.

use crate::AutocalculateTag;
use schemars::gen::SchemaGenerator;
use schemars::schema::{InstanceType, Schema, SchemaObject};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Discriminator of a boundary condition
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum BoundaryConditionKind {
    Ground,
    Outdoors,
    Adiabatic,
    Surface,
}

impl fmt::Display for BoundaryConditionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BoundaryConditionKind::Ground => "Ground",
            BoundaryConditionKind::Outdoors => "Outdoors",
            BoundaryConditionKind::Adiabatic => "Adiabatic",
            BoundaryConditionKind::Surface => "Surface",
        };
        f.write_str(name)
    }
}

/// Marker record asking the engine to compute a value itself
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Autocalculate {
    #[serde(rename = "type")]
    pub type_tag: AutocalculateTag,
}

/// Sky view factor of an outdoor surface
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum ViewFactor {
    /// Computed by the engine from the surface tilt
    Autocalculate(Autocalculate),
    /// Explicit value between 0 and 1
    #[schemars(schema_with = "unit_interval_schema")]
    Value(f64),
}

fn unit_interval_schema(_: &mut SchemaGenerator) -> Schema {
    let mut schema = SchemaObject {
        instance_type: Some(InstanceType::Number.into()),
        ..Default::default()
    };
    let number = schema.number();
    number.minimum = Some(0.0);
    number.maximum = Some(1.0);
    schema.into()
}

/// Outdoor air on the other side
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Outdoors {
    /// Whether the surface is exposed to direct sun (defaults to true)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sun_exposure: Option<bool>,
    /// Whether the surface is exposed to wind (defaults to true)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wind_exposure: Option<bool>,
    /// Sky view factor; autocalculated when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view_factor: Option<ViewFactor>,
}

impl Outdoors {
    /// Effective sun exposure
    pub fn is_sun_exposed(&self) -> bool {
        self.sun_exposure.unwrap_or(true)
    }

    /// Effective wind exposure
    pub fn is_wind_exposed(&self) -> bool {
        self.wind_exposure.unwrap_or(true)
    }

    /// Explicit view factor, or `None` when the engine should compute it
    pub fn explicit_view_factor(&self) -> Option<f64> {
        match self.view_factor {
            Some(ViewFactor::Value(value)) => Some(value),
            _ => None,
        }
    }
}

/// Another named surface on the other side
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Surface {
    /// Names of the adjacent object chain, nearest first
    ///
    /// 2 names for a Face (face, room); 3 for an Aperture or Door
    /// (sub-face, face, room).
    #[schemars(length(min = 2, max = 3))]
    pub boundary_condition_objects: Vec<String>,
}

impl Surface {
    /// Create a surface boundary condition from adjacent object names
    pub fn new<I, S>(objects: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            boundary_condition_objects: objects.into_iter().map(Into::into).collect(),
        }
    }
}

/// Boundary condition of a [`crate::Face`]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type")]
pub enum BoundaryCondition {
    Ground,
    Outdoors(Outdoors),
    Adiabatic,
    Surface(Surface),
}

impl BoundaryCondition {
    /// Outdoors with all defaults
    pub fn outdoors() -> Self {
        BoundaryCondition::Outdoors(Outdoors::default())
    }

    /// Surface adjacency to the named objects
    pub fn surface<I, S>(objects: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        BoundaryCondition::Surface(Surface::new(objects))
    }

    /// Get the discriminator
    pub fn kind(&self) -> BoundaryConditionKind {
        match self {
            BoundaryCondition::Ground => BoundaryConditionKind::Ground,
            BoundaryCondition::Outdoors(_) => BoundaryConditionKind::Outdoors,
            BoundaryCondition::Adiabatic => BoundaryConditionKind::Adiabatic,
            BoundaryCondition::Surface(_) => BoundaryConditionKind::Surface,
        }
    }

    /// Get linked object names (empty unless Surface)
    pub fn linked_objects(&self) -> &[String] {
        match self {
            BoundaryCondition::Surface(surface) => &surface.boundary_condition_objects,
            _ => &[],
        }
    }
}

impl Default for BoundaryCondition {
    fn default() -> Self {
        BoundaryCondition::outdoors()
    }
}

/// Boundary condition of an [`crate::Aperture`] or [`crate::Door`]
///
/// Sub-faces can only face outdoor air or another sub-face; any other
/// discriminator is rejected when the record is read.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type")]
pub enum SubFaceBoundaryCondition {
    Outdoors(Outdoors),
    Surface(Surface),
}

impl SubFaceBoundaryCondition {
    /// Outdoors with all defaults
    pub fn outdoors() -> Self {
        SubFaceBoundaryCondition::Outdoors(Outdoors::default())
    }

    /// Surface adjacency to the named objects
    pub fn surface<I, S>(objects: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        SubFaceBoundaryCondition::Surface(Surface::new(objects))
    }

    /// Get the discriminator
    pub fn kind(&self) -> BoundaryConditionKind {
        match self {
            SubFaceBoundaryCondition::Outdoors(_) => BoundaryConditionKind::Outdoors,
            SubFaceBoundaryCondition::Surface(_) => BoundaryConditionKind::Surface,
        }
    }

    /// Get linked object names (empty unless Surface)
    pub fn linked_objects(&self) -> &[String] {
        match self {
            SubFaceBoundaryCondition::Surface(surface) => &surface.boundary_condition_objects,
            SubFaceBoundaryCondition::Outdoors(_) => &[],
        }
    }
}

impl Default for SubFaceBoundaryCondition {
    fn default() -> Self {
        SubFaceBoundaryCondition::outdoors()
    }
}

impl From<SubFaceBoundaryCondition> for BoundaryCondition {
    fn from(bc: SubFaceBoundaryCondition) -> Self {
        match bc {
            SubFaceBoundaryCondition::Outdoors(outdoors) => BoundaryCondition::Outdoors(outdoors),
            SubFaceBoundaryCondition::Surface(surface) => BoundaryCondition::Surface(surface),
        }
    }
}
