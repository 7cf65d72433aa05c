// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Named entities of a building model
//!
//! Ownership is a strict tree: a [`Room`] owns [`Face`]s, a face owns
//! [`Aperture`]s and [`Door`]s, and [`Shade`]s hang off apertures, faces and
//! rooms. Adjacency between surfaces is expressed by name through a Surface
//! boundary condition, never by an object edge.
//!
//! Optional child lists stay `None` when absent so a record re-serializes
//! exactly as it was read.

use crate::{
    AperturePropertiesAbridged, ApertureTag, BoundaryCondition, DoorPropertiesAbridged, DoorTag,
    EntityKind, Face3D, FacePropertiesAbridged, FaceTag, FaceType, Identifier, Named,
    RoomPropertiesAbridged, RoomTag, ShadePropertiesAbridged, ShadeTag, SubFaceBoundaryCondition,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

fn push_child<T>(list: &mut Option<Vec<T>>, child: T) {
    list.get_or_insert_with(Vec::new).push(child);
}

/// Shading geometry without children
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Shade {
    #[serde(rename = "type")]
    pub type_tag: ShadeTag,
    #[serde(flatten)]
    pub identity: Identifier,
    /// Planar geometry
    pub geometry: Face3D,
    /// Extension properties for simulation engines
    pub properties: ShadePropertiesAbridged,
}

impl Shade {
    /// Create a shade with empty extension properties
    pub fn new(name: impl Into<String>, geometry: Face3D) -> Self {
        Self {
            type_tag: ShadeTag,
            identity: Identifier::new(name),
            geometry,
            properties: ShadePropertiesAbridged::new(),
        }
    }

    /// Set the display name
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.identity.display_name = Some(display_name.into());
        self
    }

    /// Replace the extension properties
    pub fn with_properties(mut self, properties: ShadePropertiesAbridged) -> Self {
        self.properties = properties;
        self
    }
}

impl Named for Shade {
    fn identifier(&self) -> &Identifier {
        &self.identity
    }

    fn kind(&self) -> EntityKind {
        EntityKind::Shade
    }
}

/// Opaque or glass door hosted by a face
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Door {
    #[serde(rename = "type")]
    pub type_tag: DoorTag,
    #[serde(flatten)]
    pub identity: Identifier,
    /// Planar geometry, coplanar with and inside the parent face
    pub geometry: Face3D,
    pub boundary_condition: SubFaceBoundaryCondition,
    /// Whether this is a glass door rather than an opaque one
    #[serde(default)]
    pub is_glass: bool,
    /// Extension properties for simulation engines
    pub properties: DoorPropertiesAbridged,
}

impl Door {
    /// Create an opaque door
    pub fn new(
        name: impl Into<String>,
        geometry: Face3D,
        boundary_condition: SubFaceBoundaryCondition,
    ) -> Self {
        Self {
            type_tag: DoorTag,
            identity: Identifier::new(name),
            geometry,
            boundary_condition,
            is_glass: false,
            properties: DoorPropertiesAbridged::new(),
        }
    }

    /// Set the display name
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.identity.display_name = Some(display_name.into());
        self
    }

    /// Mark the door as glass
    pub fn with_glass(mut self, is_glass: bool) -> Self {
        self.is_glass = is_glass;
        self
    }

    /// Replace the extension properties
    pub fn with_properties(mut self, properties: DoorPropertiesAbridged) -> Self {
        self.properties = properties;
        self
    }
}

impl Named for Door {
    fn identifier(&self) -> &Identifier {
        &self.identity
    }

    fn kind(&self) -> EntityKind {
        EntityKind::Door
    }
}

/// Window or skylight hosted by a face
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Aperture {
    #[serde(rename = "type")]
    pub type_tag: ApertureTag,
    #[serde(flatten)]
    pub identity: Identifier,
    /// Planar geometry, coplanar with and inside the parent face
    pub geometry: Face3D,
    pub boundary_condition: SubFaceBoundaryCondition,
    /// Whether the aperture can be opened for ventilation
    #[serde(default)]
    pub is_operable: bool,
    /// Shades on the interior side (window sill, light shelf)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indoor_shades: Option<Vec<Shade>>,
    /// Shades on the exterior side (mullions, louvers)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outdoor_shades: Option<Vec<Shade>>,
    /// Extension properties for simulation engines
    pub properties: AperturePropertiesAbridged,
}

impl Aperture {
    /// Create a fixed aperture without shades
    pub fn new(
        name: impl Into<String>,
        geometry: Face3D,
        boundary_condition: SubFaceBoundaryCondition,
    ) -> Self {
        Self {
            type_tag: ApertureTag,
            identity: Identifier::new(name),
            geometry,
            boundary_condition,
            is_operable: false,
            indoor_shades: None,
            outdoor_shades: None,
            properties: AperturePropertiesAbridged::new(),
        }
    }

    /// Set the display name
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.identity.display_name = Some(display_name.into());
        self
    }

    /// Mark the aperture as operable
    pub fn with_operable(mut self, is_operable: bool) -> Self {
        self.is_operable = is_operable;
        self
    }

    /// Add an interior shade
    pub fn with_indoor_shade(mut self, shade: Shade) -> Self {
        push_child(&mut self.indoor_shades, shade);
        self
    }

    /// Add an exterior shade
    pub fn with_outdoor_shade(mut self, shade: Shade) -> Self {
        push_child(&mut self.outdoor_shades, shade);
        self
    }

    /// Replace the extension properties
    pub fn with_properties(mut self, properties: AperturePropertiesAbridged) -> Self {
        self.properties = properties;
        self
    }

    /// Get interior shades (empty when absent)
    pub fn indoor_shades(&self) -> &[Shade] {
        self.indoor_shades.as_deref().unwrap_or_default()
    }

    /// Get exterior shades (empty when absent)
    pub fn outdoor_shades(&self) -> &[Shade] {
        self.outdoor_shades.as_deref().unwrap_or_default()
    }

    /// Get the number of attached shades
    pub fn shade_count(&self) -> usize {
        self.indoor_shades().len() + self.outdoor_shades().len()
    }
}

impl Named for Aperture {
    fn identifier(&self) -> &Identifier {
        &self.identity
    }

    fn kind(&self) -> EntityKind {
        EntityKind::Aperture
    }
}

/// Planar surface of a room, hosting apertures and doors
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Face {
    #[serde(rename = "type")]
    pub type_tag: FaceTag,
    #[serde(flatten)]
    pub identity: Identifier,
    /// Planar geometry
    pub geometry: Face3D,
    pub face_type: FaceType,
    pub boundary_condition: BoundaryCondition,
    /// Apertures; should be coplanar with and inside this face
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apertures: Option<Vec<Aperture>>,
    /// Doors; should be coplanar with and inside this face
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doors: Option<Vec<Door>>,
    /// Shades on the interior side
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indoor_shades: Option<Vec<Shade>>,
    /// Shades on the exterior side (balcony, overhang)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outdoor_shades: Option<Vec<Shade>>,
    /// Extension properties for simulation engines
    pub properties: FacePropertiesAbridged,
}

impl Face {
    /// Create a face without sub-faces or shades
    pub fn new(
        name: impl Into<String>,
        geometry: Face3D,
        face_type: FaceType,
        boundary_condition: BoundaryCondition,
    ) -> Self {
        Self {
            type_tag: FaceTag,
            identity: Identifier::new(name),
            geometry,
            face_type,
            boundary_condition,
            apertures: None,
            doors: None,
            indoor_shades: None,
            outdoor_shades: None,
            properties: FacePropertiesAbridged::new(),
        }
    }

    /// Set the display name
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.identity.display_name = Some(display_name.into());
        self
    }

    /// Add an aperture
    pub fn with_aperture(mut self, aperture: Aperture) -> Self {
        push_child(&mut self.apertures, aperture);
        self
    }

    /// Add a door
    pub fn with_door(mut self, door: Door) -> Self {
        push_child(&mut self.doors, door);
        self
    }

    /// Add an interior shade
    pub fn with_indoor_shade(mut self, shade: Shade) -> Self {
        push_child(&mut self.indoor_shades, shade);
        self
    }

    /// Add an exterior shade
    pub fn with_outdoor_shade(mut self, shade: Shade) -> Self {
        push_child(&mut self.outdoor_shades, shade);
        self
    }

    /// Replace the extension properties
    pub fn with_properties(mut self, properties: FacePropertiesAbridged) -> Self {
        self.properties = properties;
        self
    }

    /// Get apertures (empty when absent)
    pub fn apertures(&self) -> &[Aperture] {
        self.apertures.as_deref().unwrap_or_default()
    }

    /// Get doors (empty when absent)
    pub fn doors(&self) -> &[Door] {
        self.doors.as_deref().unwrap_or_default()
    }

    /// Get interior shades (empty when absent)
    pub fn indoor_shades(&self) -> &[Shade] {
        self.indoor_shades.as_deref().unwrap_or_default()
    }

    /// Get exterior shades (empty when absent)
    pub fn outdoor_shades(&self) -> &[Shade] {
        self.outdoor_shades.as_deref().unwrap_or_default()
    }

    /// Get the number of hosted apertures and doors
    pub fn sub_face_count(&self) -> usize {
        self.apertures().len() + self.doors().len()
    }
}

impl Named for Face {
    fn identifier(&self) -> &Identifier {
        &self.identity
    }

    fn kind(&self) -> EntityKind {
        EntityKind::Face
    }
}

/// Closed volume made of at least four faces
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Room {
    #[serde(rename = "type")]
    pub type_tag: RoomTag,
    #[serde(flatten)]
    pub identity: Identifier,
    /// Faces that together form the closed volume of the room
    #[schemars(length(min = 4))]
    pub faces: Vec<Face>,
    /// Shades on the interior side (partitions, tables)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indoor_shades: Option<Vec<Shade>>,
    /// Shades on the exterior side (trees, landscaping)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outdoor_shades: Option<Vec<Shade>>,
    /// Extension properties for simulation engines
    pub properties: RoomPropertiesAbridged,
}

impl Room {
    /// Create a room from its faces
    pub fn new(name: impl Into<String>, faces: Vec<Face>) -> Self {
        Self {
            type_tag: RoomTag,
            identity: Identifier::new(name),
            faces,
            indoor_shades: None,
            outdoor_shades: None,
            properties: RoomPropertiesAbridged::new(),
        }
    }

    /// Set the display name
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.identity.display_name = Some(display_name.into());
        self
    }

    /// Add an interior shade
    pub fn with_indoor_shade(mut self, shade: Shade) -> Self {
        push_child(&mut self.indoor_shades, shade);
        self
    }

    /// Add an exterior shade
    pub fn with_outdoor_shade(mut self, shade: Shade) -> Self {
        push_child(&mut self.outdoor_shades, shade);
        self
    }

    /// Replace the extension properties
    pub fn with_properties(mut self, properties: RoomPropertiesAbridged) -> Self {
        self.properties = properties;
        self
    }

    /// Get interior shades (empty when absent)
    pub fn indoor_shades(&self) -> &[Shade] {
        self.indoor_shades.as_deref().unwrap_or_default()
    }

    /// Get exterior shades (empty when absent)
    pub fn outdoor_shades(&self) -> &[Shade] {
        self.outdoor_shades.as_deref().unwrap_or_default()
    }

    /// Get the number of faces
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }
}

impl Named for Room {
    fn identifier(&self) -> &Identifier {
        &self.identity
    }

    fn kind(&self) -> EntityKind {
        EntityKind::Room
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn triangle() -> Face3D {
        Face3D::new(
            vec![
                vec![0.0, 0.0, 0.0],
                vec![1.0, 0.0, 0.0],
                vec![0.0, 1.0, 0.0],
            ],
            None,
            None,
        )
        .unwrap()
    }

    #[test]
    fn test_absent_lists_stay_absent() {
        let face = Face::new("Face_1", triangle(), FaceType::Wall, BoundaryCondition::Ground);
        let value = serde_json::to_value(&face).unwrap();
        assert!(value.get("apertures").is_none());
        assert!(value.get("outdoor_shades").is_none());
        assert_eq!(value["type"], "Face");
        assert_eq!(value["name"], "Face_1");
        assert!(face.apertures().is_empty());
    }

    #[test]
    fn test_builders_create_lists() {
        let aperture = Aperture::new("Win_1", triangle(), SubFaceBoundaryCondition::outdoors())
            .with_outdoor_shade(Shade::new("Louver_1", triangle()))
            .with_outdoor_shade(Shade::new("Louver_2", triangle()))
            .with_operable(true);
        let face = Face::new("Face_1", triangle(), FaceType::Wall, BoundaryCondition::outdoors())
            .with_aperture(aperture)
            .with_door(Door::new("Door_1", triangle(), SubFaceBoundaryCondition::outdoors()));

        assert_eq!(face.sub_face_count(), 2);
        assert_eq!(face.apertures()[0].shade_count(), 2);
        assert!(face.apertures()[0].is_operable);
        assert_eq!(face.apertures()[0].outdoor_shades()[1].name(), "Louver_2");
    }

    #[test]
    fn test_flags_default_to_false() {
        let door: Door = serde_json::from_value(json!({
            "type": "Door",
            "name": "Door_1",
            "geometry": {
                "type": "Face3D",
                "boundary": [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 0.0, 2.0]]
            },
            "boundary_condition": {"type": "Outdoors"},
            "properties": {"type": "DoorPropertiesAbridged"}
        }))
        .unwrap();
        assert!(!door.is_glass);
        assert_eq!(door.display_name(), "Door_1");
        assert_eq!(door.kind(), EntityKind::Door);
    }

    #[test]
    fn test_door_with_ground_condition_is_rejected() {
        let result = serde_json::from_value::<Door>(json!({
            "type": "Door",
            "name": "Door_1",
            "geometry": {
                "type": "Face3D",
                "boundary": [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 0.0, 2.0]]
            },
            "boundary_condition": {"type": "Ground"},
            "properties": {"type": "DoorPropertiesAbridged"}
        }));
        assert!(result.is_err());
    }
}
