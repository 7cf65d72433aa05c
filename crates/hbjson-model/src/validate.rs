// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Owner-parametrized structural rules
//!
//! Each entity is checked bottom-up in field order and list order; the first
//! violation aborts the whole entity and is reported with the path of the
//! offending field. Non-fatal findings are pushed to the caller's warning list.
//!
//! Boundary condition arity is a property of the (condition, owner) pair, so
//! it is checked here by the owner's rule rather than by the condition type.

use crate::{
    check_name, Aperture, BoundaryCondition, BoundaryConditionKind, Door, EntityKind, Face,
    Face3D, Face3DTag, FieldPath, Named, Outdoors, Plane, PlaneTag, Result, Room, Shade,
    SubFaceBoundaryCondition, Surface, ValidationError, ValidationWarning, ViewFactor,
};

/// Minimum number of boundary points of a [`Face3D`]
pub const MIN_POLYGON_POINTS: usize = 3;

/// Minimum number of faces enclosing a [`Room`]
pub const MIN_ROOM_FACES: usize = 4;

/// Structural validation of a standalone entity
pub trait Validate {
    /// Label of the path root when this entity is validated on its own
    fn root_label(&self) -> &'static str;

    /// Validate the entity located at `path`, collecting warnings
    fn validate_at(&self, path: &FieldPath, warnings: &mut Vec<ValidationWarning>) -> Result<()>;

    /// Validate the entity as a path root and return its warnings
    fn validate(&self) -> Result<Vec<ValidationWarning>> {
        let mut warnings = Vec::new();
        self.validate_at(&FieldPath::root(self.root_label()), &mut warnings)?;
        Ok(warnings)
    }
}

fn check_vector(values: &[f64], path: FieldPath) -> Result<()> {
    if values.len() != 3 {
        return Err(ValidationError::geometry(
            path,
            format!("expected 3 (x, y, z) values, got {}", values.len()),
        ));
    }
    Ok(())
}

/// Check that every vector of a plane has 3 components
pub fn validate_plane(plane: &Plane, path: &FieldPath) -> Result<()> {
    check_vector(&plane.n, path.field("n"))?;
    check_vector(&plane.o, path.field("o"))?;
    if let Some(x) = &plane.x {
        check_vector(x, path.field("x"))?;
    }
    Ok(())
}

/// Check point arity of boundary and holes, then the boundary size
///
/// Coordinate arity is checked before any count so that a malformed point
/// is always reported as a geometry error.
pub fn validate_face3d(
    face: &Face3D,
    path: &FieldPath,
    warnings: &mut Vec<ValidationWarning>,
) -> Result<()> {
    let boundary_path = path.field("boundary");
    for (i, point) in face.boundary.iter().enumerate() {
        check_vector(point, boundary_path.at(i))?;
    }
    for (h, hole) in face.holes().iter().enumerate() {
        let hole_path = path.index("holes", h);
        for (i, point) in hole.iter().enumerate() {
            check_vector(point, hole_path.at(i))?;
        }
    }

    if face.boundary.len() < MIN_POLYGON_POINTS {
        return Err(ValidationError::minimum_count(
            boundary_path,
            MIN_POLYGON_POINTS,
            face.boundary.len(),
        ));
    }
    for (h, hole) in face.holes().iter().enumerate() {
        if hole.len() < MIN_POLYGON_POINTS {
            warnings.push(ValidationWarning::DegenerateHole {
                path: path.index("holes", h),
                points: hole.len(),
            });
        }
    }

    if let Some(plane) = &face.plane {
        validate_plane(plane, &path.field("plane"))?;
    }
    Ok(())
}

fn check_surface(surface: &Surface, owner: EntityKind, path: &FieldPath) -> Result<()> {
    let actual = surface.boundary_condition_objects.len();
    if let Some(expected) = owner.surface_arity() {
        if actual != expected {
            return Err(ValidationError::AdjacencyArity {
                path: path.clone(),
                owner,
                condition: BoundaryConditionKind::Surface,
                expected,
                actual,
            });
        }
    }
    let objects_path = path.field("boundary_condition_objects");
    for (i, reference) in surface.boundary_condition_objects.iter().enumerate() {
        check_name(reference, &objects_path.at(i))?;
    }
    Ok(())
}

fn check_outdoors(outdoors: &Outdoors, path: &FieldPath) -> Result<()> {
    if let Some(ViewFactor::Value(value)) = outdoors.view_factor {
        if !(0.0..=1.0).contains(&value) {
            return Err(ValidationError::range(
                path.field("view_factor"),
                value,
                "[0, 1]",
            ));
        }
    }
    Ok(())
}

/// Check a face boundary condition against the arity rule of `owner`
pub fn check_boundary_condition(
    bc: &BoundaryCondition,
    owner: EntityKind,
    path: &FieldPath,
) -> Result<()> {
    match bc {
        BoundaryCondition::Surface(surface) => check_surface(surface, owner, path),
        BoundaryCondition::Outdoors(outdoors) => check_outdoors(outdoors, path),
        BoundaryCondition::Ground | BoundaryCondition::Adiabatic => Ok(()),
    }
}

/// Check a sub-face boundary condition against the arity rule of `owner`
pub fn check_sub_face_boundary_condition(
    bc: &SubFaceBoundaryCondition,
    owner: EntityKind,
    path: &FieldPath,
) -> Result<()> {
    match bc {
        SubFaceBoundaryCondition::Surface(surface) => check_surface(surface, owner, path),
        SubFaceBoundaryCondition::Outdoors(outdoors) => check_outdoors(outdoors, path),
    }
}

/// Check that a scalar north angle lies in [0, 360)
pub fn check_north_angle(value: f64, path: &FieldPath) -> Result<()> {
    if !(0.0..360.0).contains(&value) {
        return Err(ValidationError::range(path.clone(), value, "[0, 360)"));
    }
    Ok(())
}

fn validate_shades(
    shades: &[Shade],
    parent: &FieldPath,
    field: &str,
    warnings: &mut Vec<ValidationWarning>,
) -> Result<()> {
    for (i, shade) in shades.iter().enumerate() {
        validate_shade(shade, &parent.index(field, i), warnings)?;
    }
    Ok(())
}

/// Validate a shade
pub fn validate_shade(
    shade: &Shade,
    path: &FieldPath,
    warnings: &mut Vec<ValidationWarning>,
) -> Result<()> {
    check_name(shade.name(), &path.field("name"))?;
    validate_face3d(&shade.geometry, &path.field("geometry"), warnings)
}

/// Validate a door; a Surface condition needs 3 linked objects
pub fn validate_door(
    door: &Door,
    path: &FieldPath,
    warnings: &mut Vec<ValidationWarning>,
) -> Result<()> {
    check_name(door.name(), &path.field("name"))?;
    validate_face3d(&door.geometry, &path.field("geometry"), warnings)?;
    check_sub_face_boundary_condition(
        &door.boundary_condition,
        EntityKind::Door,
        &path.field("boundary_condition"),
    )
}

/// Validate an aperture and its shades; a Surface condition needs 3 linked objects
pub fn validate_aperture(
    aperture: &Aperture,
    path: &FieldPath,
    warnings: &mut Vec<ValidationWarning>,
) -> Result<()> {
    check_name(aperture.name(), &path.field("name"))?;
    validate_face3d(&aperture.geometry, &path.field("geometry"), warnings)?;
    check_sub_face_boundary_condition(
        &aperture.boundary_condition,
        EntityKind::Aperture,
        &path.field("boundary_condition"),
    )?;
    validate_shades(aperture.indoor_shades(), path, "indoor_shades", warnings)?;
    validate_shades(aperture.outdoor_shades(), path, "outdoor_shades", warnings)
}

/// Validate a face with its sub-faces and shades; a Surface condition needs 2 linked objects
///
/// Coplanarity and containment of apertures and doors are left to a
/// geometry collaborator.
pub fn validate_face(
    face: &Face,
    path: &FieldPath,
    warnings: &mut Vec<ValidationWarning>,
) -> Result<()> {
    check_name(face.name(), &path.field("name"))?;
    validate_face3d(&face.geometry, &path.field("geometry"), warnings)?;
    check_boundary_condition(
        &face.boundary_condition,
        EntityKind::Face,
        &path.field("boundary_condition"),
    )?;
    for (i, aperture) in face.apertures().iter().enumerate() {
        validate_aperture(aperture, &path.index("apertures", i), warnings)?;
    }
    for (i, door) in face.doors().iter().enumerate() {
        validate_door(door, &path.index("doors", i), warnings)?;
    }
    validate_shades(face.indoor_shades(), path, "indoor_shades", warnings)?;
    validate_shades(face.outdoor_shades(), path, "outdoor_shades", warnings)
}

/// Validate a room: at least 4 faces, then every face and shade
pub fn validate_room(
    room: &Room,
    path: &FieldPath,
    warnings: &mut Vec<ValidationWarning>,
) -> Result<()> {
    check_name(room.name(), &path.field("name"))?;
    if room.faces.len() < MIN_ROOM_FACES {
        return Err(ValidationError::minimum_count(
            path.field("faces"),
            MIN_ROOM_FACES,
            room.faces.len(),
        ));
    }
    for (i, face) in room.faces.iter().enumerate() {
        validate_face(face, &path.index("faces", i), warnings)?;
    }
    validate_shades(room.indoor_shades(), path, "indoor_shades", warnings)?;
    validate_shades(room.outdoor_shades(), path, "outdoor_shades", warnings)
}

impl Validate for Plane {
    fn root_label(&self) -> &'static str {
        PlaneTag::VALUE
    }

    fn validate_at(&self, path: &FieldPath, _warnings: &mut Vec<ValidationWarning>) -> Result<()> {
        validate_plane(self, path)
    }
}

impl Validate for Face3D {
    fn root_label(&self) -> &'static str {
        Face3DTag::VALUE
    }

    fn validate_at(&self, path: &FieldPath, warnings: &mut Vec<ValidationWarning>) -> Result<()> {
        validate_face3d(self, path, warnings)
    }
}

macro_rules! impl_validate {
    ($($entity:ident => $rule:ident),* $(,)?) => {
        $(
            impl Validate for $entity {
                fn root_label(&self) -> &'static str {
                    self.kind().name()
                }

                fn validate_at(
                    &self,
                    path: &FieldPath,
                    warnings: &mut Vec<ValidationWarning>,
                ) -> Result<()> {
                    $rule(self, path, warnings)
                }
            }
        )*
    };
}

impl_validate!(
    Shade => validate_shade,
    Door => validate_door,
    Aperture => validate_aperture,
    Face => validate_face,
    Room => validate_room,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ErrorKind, FaceType};

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

    fn outdoor_wall(name: &str) -> Face {
        Face::new(name, triangle(), FaceType::Wall, BoundaryCondition::outdoors())
    }

    fn tetrahedron(name: &str) -> Room {
        let faces = (0..4)
            .map(|i| outdoor_wall(&format!("{name}_Face_{i}")))
            .collect();
        Room::new(name, faces)
    }

    fn arity_error(err: ValidationError) -> (EntityKind, usize, usize) {
        match err {
            ValidationError::AdjacencyArity {
                owner,
                expected,
                actual,
                ..
            } => (owner, expected, actual),
            other => panic!("expected adjacency arity error, got {other:?}"),
        }
    }

    #[test]
    fn test_tetrahedron_room_is_valid_without_warnings() {
        let warnings = tetrahedron("Room_1").validate().unwrap();
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_room_needs_four_faces() {
        let mut room = tetrahedron("Room_1");
        room.faces.pop();
        let err = room.validate().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MinimumCount);
        assert_eq!(err.path().unwrap().as_str(), "Room.faces");
    }

    #[test]
    fn test_aperture_surface_needs_three_objects() {
        let aperture = Aperture::new(
            "Win_1",
            triangle(),
            SubFaceBoundaryCondition::surface(["A", "B"]),
        );
        let err = aperture.validate().unwrap_err();
        assert_eq!(
            err.path().unwrap().as_str(),
            "Aperture.boundary_condition"
        );
        assert_eq!(arity_error(err), (EntityKind::Aperture, 3, 2));
    }

    #[test]
    fn test_surface_arity_per_owner() {
        let door = Door::new(
            "Door_1",
            triangle(),
            SubFaceBoundaryCondition::surface(["D2", "F2", "R2", "X"]),
        );
        assert_eq!(
            arity_error(door.validate().unwrap_err()),
            (EntityKind::Door, 3, 4)
        );

        let face = Face::new(
            "Face_1",
            triangle(),
            FaceType::Wall,
            BoundaryCondition::surface(["F2", "R2", "X"]),
        );
        assert_eq!(
            arity_error(face.validate().unwrap_err()),
            (EntityKind::Face, 2, 3)
        );

        let face = Face::new(
            "Face_1",
            triangle(),
            FaceType::Wall,
            BoundaryCondition::surface(["F2", "R2"]),
        );
        assert!(face.validate().is_ok());

        let door = Door::new(
            "Door_1",
            triangle(),
            SubFaceBoundaryCondition::surface(["D2", "F2", "R2"]),
        );
        assert!(door.validate().is_ok());
    }

    #[test]
    fn test_conditions_without_links_always_pass() {
        for bc in [
            BoundaryCondition::Ground,
            BoundaryCondition::Adiabatic,
            BoundaryCondition::outdoors(),
        ] {
            let face = Face::new("Face_1", triangle(), FaceType::Floor, bc);
            assert!(face.validate().is_ok());
        }
    }

    #[test]
    fn test_nested_error_path() {
        let bad_aperture = Aperture::new(
            "Win_1",
            triangle(),
            SubFaceBoundaryCondition::surface(["A", "B"]),
        );
        let mut room = tetrahedron("Room_1");
        room.faces[2] = outdoor_wall("Room_1_Face_2").with_aperture(bad_aperture);

        let err = room.validate().unwrap_err();
        assert_eq!(
            err.path().unwrap().as_str(),
            "Room.faces[2].apertures[0].boundary_condition"
        );
    }

    #[test]
    fn test_first_violation_in_list_order_wins() {
        let mut room = tetrahedron("Room_1");
        room.faces[1].geometry.boundary[0] = vec![0.0, 0.0];
        room.faces[3].boundary_condition = BoundaryCondition::surface(["only_one"]);

        let err = room.validate().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Geometry);
        assert_eq!(
            err.path().unwrap().as_str(),
            "Room.faces[1].geometry.boundary[0]"
        );
    }

    #[test]
    fn test_view_factor_range() {
        let outdoors = Outdoors {
            view_factor: Some(ViewFactor::Value(1.5)),
            ..Outdoors::default()
        };
        let face = Face::new(
            "Face_1",
            triangle(),
            FaceType::Wall,
            BoundaryCondition::Outdoors(outdoors),
        );
        let err = face.validate().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Range);
        assert_eq!(
            err.path().unwrap().as_str(),
            "Face.boundary_condition.view_factor"
        );
    }

    #[test]
    fn test_surface_references_must_be_names() {
        let face = Face::new(
            "Face_1",
            triangle(),
            FaceType::Wall,
            BoundaryCondition::surface(["Face 2", "Room_2"]),
        );
        let err = face.validate().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidName);
        assert_eq!(
            err.path().unwrap().as_str(),
            "Face.boundary_condition.boundary_condition_objects[0]"
        );
    }

    #[test]
    fn test_invalid_shade_name_inside_room() {
        let room = tetrahedron("Room_1").with_indoor_shade(Shade::new("Desk #1", triangle()));
        let err = room.validate().unwrap_err();
        assert_eq!(err.path().unwrap().as_str(), "Room.indoor_shades[0].name");
    }

    #[test]
    fn test_degenerate_hole_is_a_warning() {
        let mut geometry = triangle();
        geometry.holes = Some(vec![vec![vec![0.1, 0.1, 0.0], vec![0.2, 0.1, 0.0]]]);
        let shade = Shade::new("Shade_1", geometry);

        let warnings = shade.validate().unwrap();
        assert_eq!(
            warnings,
            vec![ValidationWarning::DegenerateHole {
                path: FieldPath::root("Shade").field("geometry").index("holes", 0),
                points: 2,
            }]
        );
    }

    #[test]
    fn test_north_angle_bounds() {
        let path = FieldPath::root("Model").field("north_angle");
        assert!(check_north_angle(0.0, &path).is_ok());
        assert!(check_north_angle(359.99, &path).is_ok());
        assert!(check_north_angle(360.0, &path).is_err());
        assert!(check_north_angle(-0.5, &path).is_err());
        assert!(check_north_angle(f64::NAN, &path).is_err());
    }
}
