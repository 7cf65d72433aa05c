// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! JSON schema introspection
//!
//! Every record type derives [`JsonSchema`], so external tooling can emit a
//! schema document for any entity, including the name pattern, list
//! minimums and numeric ranges enforced by the validators.

use crate::{
    Aperture, AperturePropertiesAbridged, Autocalculate, BoundaryCondition, Door,
    DoorPropertiesAbridged, EntityKind, Face, Face3D, FacePropertiesAbridged, Model,
    ModelProperties, Outdoors, Plane, Room, RoomPropertiesAbridged, Shade,
    ShadePropertiesAbridged, SubFaceBoundaryCondition, Surface,
};
use schemars::schema::RootSchema;
use schemars::{schema_for, JsonSchema};

/// Get the root schema of a named entity
pub fn entity_schema(kind: EntityKind) -> RootSchema {
    match kind {
        EntityKind::Shade => schema_for!(Shade),
        EntityKind::Door => schema_for!(Door),
        EntityKind::Aperture => schema_for!(Aperture),
        EntityKind::Face => schema_for!(Face),
        EntityKind::Room => schema_for!(Room),
        EntityKind::Model => schema_for!(Model),
    }
}

/// Get the root schema of a whole model document
pub fn model_schema() -> RootSchema {
    schema_for!(Model)
}

fn named<T: JsonSchema>() -> (String, RootSchema) {
    (T::schema_name(), schema_for!(T))
}

/// Get the schemas of every non-entity record type, keyed by schema name
pub fn type_schemas() -> Vec<(String, RootSchema)> {
    vec![
        named::<Plane>(),
        named::<Face3D>(),
        named::<Autocalculate>(),
        named::<Outdoors>(),
        named::<Surface>(),
        named::<BoundaryCondition>(),
        named::<SubFaceBoundaryCondition>(),
        named::<ShadePropertiesAbridged>(),
        named::<DoorPropertiesAbridged>(),
        named::<AperturePropertiesAbridged>(),
        named::<FacePropertiesAbridged>(),
        named::<RoomPropertiesAbridged>(),
        named::<ModelProperties>(),
    ]
}
