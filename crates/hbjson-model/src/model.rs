// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Top-level model aggregate and tree traversal

use crate::{
    Aperture, Door, EntityKind, Face, FieldPath, Identifier, ModelProperties, ModelTag, Named,
    Room, Shade,
};
use schemars::gen::SchemaGenerator;
use schemars::schema::{InstanceType, Schema, SchemaObject};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A building model: rooms plus geometry lacking a parent
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Model {
    #[serde(rename = "type")]
    pub type_tag: ModelTag,
    #[serde(flatten)]
    pub identity: Identifier,
    /// Rooms in the model
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rooms: Option<Vec<Room>>,
    /// Faces without a parent room; not acceptable for energy export
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orphaned_faces: Option<Vec<Face>>,
    /// Shades without a parent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orphaned_shades: Option<Vec<Shade>>,
    /// Apertures without a parent face; not acceptable for energy export
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orphaned_apertures: Option<Vec<Aperture>>,
    /// Doors without a parent face; not acceptable for energy export
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orphaned_doors: Option<Vec<Door>>,
    /// Clockwise north direction in degrees, 0 <= value < 360
    #[serde(default)]
    #[schemars(schema_with = "north_angle_schema")]
    pub north_angle: f64,
    /// Extension properties for simulation engines
    pub properties: ModelProperties,
}

impl Model {
    /// Create an empty model facing north
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            type_tag: ModelTag,
            identity: Identifier::new(name),
            rooms: None,
            orphaned_faces: None,
            orphaned_shades: None,
            orphaned_apertures: None,
            orphaned_doors: None,
            north_angle: 0.0,
            properties: ModelProperties::new(),
        }
    }

    /// Set the display name
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.identity.display_name = Some(display_name.into());
        self
    }

    /// Add a room
    pub fn with_room(mut self, room: Room) -> Self {
        self.rooms.get_or_insert_with(Vec::new).push(room);
        self
    }

    /// Add a face without parent
    pub fn with_orphaned_face(mut self, face: Face) -> Self {
        self.orphaned_faces.get_or_insert_with(Vec::new).push(face);
        self
    }

    /// Add a shade without parent
    pub fn with_orphaned_shade(mut self, shade: Shade) -> Self {
        self.orphaned_shades.get_or_insert_with(Vec::new).push(shade);
        self
    }

    /// Add an aperture without parent
    pub fn with_orphaned_aperture(mut self, aperture: Aperture) -> Self {
        self.orphaned_apertures
            .get_or_insert_with(Vec::new)
            .push(aperture);
        self
    }

    /// Add a door without parent
    pub fn with_orphaned_door(mut self, door: Door) -> Self {
        self.orphaned_doors.get_or_insert_with(Vec::new).push(door);
        self
    }

    /// Set the north angle in degrees
    pub fn with_north_angle(mut self, north_angle: f64) -> Self {
        self.north_angle = north_angle;
        self
    }

    /// Replace the extension properties
    pub fn with_properties(mut self, properties: ModelProperties) -> Self {
        self.properties = properties;
        self
    }

    /// Get rooms (empty when absent)
    pub fn rooms(&self) -> &[Room] {
        self.rooms.as_deref().unwrap_or_default()
    }

    /// Get orphaned faces (empty when absent)
    pub fn orphaned_faces(&self) -> &[Face] {
        self.orphaned_faces.as_deref().unwrap_or_default()
    }

    /// Get orphaned shades (empty when absent)
    pub fn orphaned_shades(&self) -> &[Shade] {
        self.orphaned_shades.as_deref().unwrap_or_default()
    }

    /// Get orphaned apertures (empty when absent)
    pub fn orphaned_apertures(&self) -> &[Aperture] {
        self.orphaned_apertures.as_deref().unwrap_or_default()
    }

    /// Get orphaned doors (empty when absent)
    pub fn orphaned_doors(&self) -> &[Door] {
        self.orphaned_doors.as_deref().unwrap_or_default()
    }

    /// Check if any entity other than a shade lacks a parent
    pub fn has_orphans(&self) -> bool {
        !self.orphaned_faces().is_empty()
            || !self.orphaned_apertures().is_empty()
            || !self.orphaned_doors().is_empty()
    }

    /// Check if the model can be handed to an energy simulation
    ///
    /// Energy engines need every face in a room and every sub-face in a face;
    /// orphaned shades are fine.
    pub fn is_energy_exportable(&self) -> bool {
        !self.has_orphans()
    }

    /// Counts of orphaned faces, apertures and doors, in that order
    pub fn orphan_counts(&self) -> [(EntityKind, usize); 3] {
        [
            (EntityKind::Face, self.orphaned_faces().len()),
            (EntityKind::Aperture, self.orphaned_apertures().len()),
            (EntityKind::Door, self.orphaned_doors().len()),
        ]
    }

    /// Visit every named entity below the model, depth first, in list order
    ///
    /// Rooms come first, then orphaned faces, shades, apertures and doors.
    /// The model itself is not visited.
    pub fn walk<'a, F>(&'a self, mut visit: F)
    where
        F: FnMut(EntityRef<'a>, &FieldPath),
    {
        let root = FieldPath::root(ModelTag::VALUE);
        for (i, room) in self.rooms().iter().enumerate() {
            walk_room(room, &root.index("rooms", i), &mut visit);
        }
        for (i, face) in self.orphaned_faces().iter().enumerate() {
            walk_face(face, &root.index("orphaned_faces", i), &mut visit);
        }
        walk_shades(self.orphaned_shades(), &root, "orphaned_shades", &mut visit);
        for (i, aperture) in self.orphaned_apertures().iter().enumerate() {
            walk_aperture(aperture, &root.index("orphaned_apertures", i), &mut visit);
        }
        for (i, door) in self.orphaned_doors().iter().enumerate() {
            visit(EntityRef::Door(door), &root.index("orphaned_doors", i));
        }
    }
}

/// Number in the half-open interval [0, 360)
fn north_angle_schema(_: &mut SchemaGenerator) -> Schema {
    let mut schema = SchemaObject {
        instance_type: Some(InstanceType::Number.into()),
        ..Default::default()
    };
    let number = schema.number();
    number.minimum = Some(0.0);
    number.exclusive_maximum = Some(360.0);
    schema.into()
}

impl Named for Model {
    fn identifier(&self) -> &Identifier {
        &self.identity
    }

    fn kind(&self) -> EntityKind {
        EntityKind::Model
    }
}

/// Borrowed view of any named entity below a model
#[derive(Clone, Copy, Debug)]
pub enum EntityRef<'a> {
    Shade(&'a Shade),
    Door(&'a Door),
    Aperture(&'a Aperture),
    Face(&'a Face),
    Room(&'a Room),
}

impl<'a> EntityRef<'a> {
    /// Get the entity as a [`Named`] trait object
    pub fn named(&self) -> &'a dyn Named {
        match *self {
            EntityRef::Shade(shade) => shade,
            EntityRef::Door(door) => door,
            EntityRef::Aperture(aperture) => aperture,
            EntityRef::Face(face) => face,
            EntityRef::Room(room) => room,
        }
    }

    /// Get the entity kind
    pub fn kind(&self) -> EntityKind {
        self.named().kind()
    }

    /// Get the entity name
    pub fn name(&self) -> &'a str {
        &self.named().identifier().name
    }

    /// Names referenced by the entity's Surface boundary condition
    pub fn surface_references(&self) -> &'a [String] {
        match *self {
            EntityRef::Face(face) => face.boundary_condition.linked_objects(),
            EntityRef::Aperture(aperture) => aperture.boundary_condition.linked_objects(),
            EntityRef::Door(door) => door.boundary_condition.linked_objects(),
            EntityRef::Shade(_) | EntityRef::Room(_) => &[],
        }
    }
}

fn walk_shades<'a, F>(shades: &'a [Shade], parent: &FieldPath, field: &str, visit: &mut F)
where
    F: FnMut(EntityRef<'a>, &FieldPath),
{
    for (i, shade) in shades.iter().enumerate() {
        visit(EntityRef::Shade(shade), &parent.index(field, i));
    }
}

fn walk_aperture<'a, F>(aperture: &'a Aperture, path: &FieldPath, visit: &mut F)
where
    F: FnMut(EntityRef<'a>, &FieldPath),
{
    visit(EntityRef::Aperture(aperture), path);
    walk_shades(aperture.indoor_shades(), path, "indoor_shades", visit);
    walk_shades(aperture.outdoor_shades(), path, "outdoor_shades", visit);
}

fn walk_face<'a, F>(face: &'a Face, path: &FieldPath, visit: &mut F)
where
    F: FnMut(EntityRef<'a>, &FieldPath),
{
    visit(EntityRef::Face(face), path);
    for (i, aperture) in face.apertures().iter().enumerate() {
        walk_aperture(aperture, &path.index("apertures", i), visit);
    }
    for (i, door) in face.doors().iter().enumerate() {
        visit(EntityRef::Door(door), &path.index("doors", i));
    }
    walk_shades(face.indoor_shades(), path, "indoor_shades", visit);
    walk_shades(face.outdoor_shades(), path, "outdoor_shades", visit);
}

fn walk_room<'a, F>(room: &'a Room, path: &FieldPath, visit: &mut F)
where
    F: FnMut(EntityRef<'a>, &FieldPath),
{
    visit(EntityRef::Room(room), path);
    for (i, face) in room.faces.iter().enumerate() {
        walk_face(face, &path.index("faces", i), visit);
    }
    walk_shades(room.indoor_shades(), path, "indoor_shades", visit);
    walk_shades(room.outdoor_shades(), path, "outdoor_shades", visit);
}
