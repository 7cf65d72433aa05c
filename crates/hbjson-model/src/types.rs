// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Core enumerations and `type` discriminators shared by all entities

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

type_tag!(
    /// `type` discriminator of [`crate::Plane`]
    PlaneTag => "Plane"
);
type_tag!(
    /// `type` discriminator of [`crate::Face3D`]
    Face3DTag => "Face3D"
);
type_tag!(
    /// `type` discriminator of [`crate::Shade`]
    ShadeTag => "Shade"
);
type_tag!(
    /// `type` discriminator of [`crate::Door`]
    DoorTag => "Door"
);
type_tag!(
    /// `type` discriminator of [`crate::Aperture`]
    ApertureTag => "Aperture"
);
type_tag!(
    /// `type` discriminator of [`crate::Face`]
    FaceTag => "Face"
);
type_tag!(
    /// `type` discriminator of [`crate::Room`]
    RoomTag => "Room"
);
type_tag!(
    /// `type` discriminator of [`crate::Model`]
    ModelTag => "Model"
);
type_tag!(
    /// `type` discriminator of the [`crate::Autocalculate`] marker
    AutocalculateTag => "Autocalculate"
);

/// Kinds of named entity in a model tree
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum EntityKind {
    Shade,
    Door,
    Aperture,
    Face,
    Room,
    Model,
}

impl EntityKind {
    /// Every named entity kind, leaves first
    pub const ALL: [EntityKind; 6] = [
        EntityKind::Shade,
        EntityKind::Door,
        EntityKind::Aperture,
        EntityKind::Face,
        EntityKind::Room,
        EntityKind::Model,
    ];

    /// Get the `type` discriminator of this kind
    pub fn name(&self) -> &'static str {
        match self {
            EntityKind::Shade => ShadeTag::VALUE,
            EntityKind::Door => DoorTag::VALUE,
            EntityKind::Aperture => ApertureTag::VALUE,
            EntityKind::Face => FaceTag::VALUE,
            EntityKind::Room => RoomTag::VALUE,
            EntityKind::Model => ModelTag::VALUE,
        }
    }

    /// Required number of `boundary_condition_objects` for a Surface
    /// boundary condition owned by this kind
    ///
    /// A Face references the adjacent face and its room; an Aperture or Door
    /// references the adjacent sub-face, its face and its room. Kinds that
    /// cannot carry a boundary condition return `None`.
    pub fn surface_arity(&self) -> Option<usize> {
        match self {
            EntityKind::Face => Some(2),
            EntityKind::Aperture | EntityKind::Door => Some(3),
            EntityKind::Shade | EntityKind::Room | EntityKind::Model => None,
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Role of a face within its room
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize, JsonSchema)]
pub enum FaceType {
    Wall,
    Floor,
    RoofCeiling,
    AirWall,
}

impl fmt::Display for FaceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FaceType::Wall => "Wall",
            FaceType::Floor => "Floor",
            FaceType::RoofCeiling => "RoofCeiling",
            FaceType::AirWall => "AirWall",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surface_arity_table() {
        assert_eq!(EntityKind::Face.surface_arity(), Some(2));
        assert_eq!(EntityKind::Aperture.surface_arity(), Some(3));
        assert_eq!(EntityKind::Door.surface_arity(), Some(3));
        assert_eq!(EntityKind::Room.surface_arity(), None);
    }

    #[test]
    fn test_tag_rejects_other_discriminator() {
        let tag: RoomTag = serde_json::from_value(serde_json::json!("Room")).unwrap();
        assert_eq!(serde_json::to_value(tag).unwrap(), "Room");

        let err = serde_json::from_value::<RoomTag>(serde_json::json!("Face")).unwrap_err();
        assert!(err.to_string().contains("Room"));
    }

    #[test]
    fn test_face_type_names() {
        let face_type: FaceType = serde_json::from_str("\"RoofCeiling\"").unwrap();
        assert_eq!(face_type, FaceType::RoofCeiling);
        assert_eq!(face_type.to_string(), "RoofCeiling");
        assert!(serde_json::from_str::<FaceType>("\"Ceiling\"").is_err());
    }
}
