// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Model-level validation engine

use crate::{NameIndex, Validated, ValidatorOptions};
use hbjson_model::{
    check_name, check_north_angle, validate_aperture, validate_door, validate_face,
    validate_room, validate_shade, EntityKind, EntityRef, FieldPath, Model, ModelTag, Named,
    Result, Room, Validate, ValidationWarning,
};
use log::{debug, trace, warn};
use rayon::prelude::*;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::path::Path;

/// Validates whole models and standalone entities
///
/// Structural rules run first, bottom-up in field and list order, and the
/// first violation is returned. Name uniqueness and reference checks run
/// once the tree is known to be well formed.
#[derive(Debug, Clone, Default)]
pub struct ModelValidator {
    options: ValidatorOptions,
}

impl ModelValidator {
    /// Create a validator with default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a validator with the given options
    pub fn with_options(options: ValidatorOptions) -> Self {
        Self { options }
    }

    /// Get the active options
    pub fn options(&self) -> &ValidatorOptions {
        &self.options
    }

    /// Validate a model, taking ownership of it on success
    pub fn validate(&self, model: Model) -> Result<Validated<Model>> {
        let warnings = self.check(&model)?;
        Ok(Validated::new(model, warnings))
    }

    /// Run every model-level check and return the warnings
    pub fn check(&self, model: &Model) -> Result<Vec<ValidationWarning>> {
        debug!(
            "Validating model '{}': {} rooms, parallel={}",
            model.name(),
            model.rooms().len(),
            self.options.parallel
        );
        let root = FieldPath::root(ModelTag::VALUE);
        check_name(model.name(), &root.field("name"))?;

        let mut warnings = self.check_rooms(model.rooms(), &root)?;
        for (i, face) in model.orphaned_faces().iter().enumerate() {
            validate_face(face, &root.index("orphaned_faces", i), &mut warnings)?;
        }
        for (i, shade) in model.orphaned_shades().iter().enumerate() {
            validate_shade(shade, &root.index("orphaned_shades", i), &mut warnings)?;
        }
        for (i, aperture) in model.orphaned_apertures().iter().enumerate() {
            validate_aperture(aperture, &root.index("orphaned_apertures", i), &mut warnings)?;
        }
        for (i, door) in model.orphaned_doors().iter().enumerate() {
            validate_door(door, &root.index("orphaned_doors", i), &mut warnings)?;
        }
        check_north_angle(model.north_angle, &root.field("north_angle"))?;

        let index = NameIndex::build(model, self.options.case_insensitive_names);
        index.check_duplicates()?;
        trace!("Name index holds {} distinct names", index.len());

        if self.options.check_references {
            warnings.extend(index.dangling_references(model));
        }
        if self.options.report_orphans {
            warnings.extend(
                model
                    .orphan_counts()
                    .into_iter()
                    .filter(|(_, count)| *count > 0)
                    .map(|(kind, count)| ValidationWarning::OrphanedObjects { kind, count }),
            );
        }

        for warning in &warnings {
            warn!("{warning}");
        }
        debug!(
            "Model '{}' is valid with {} warning(s)",
            model.name(),
            warnings.len()
        );
        Ok(warnings)
    }

    /// Validate rooms, sharded over the rayon pool when enabled
    ///
    /// Shards are joined in room order, so the reported error and the
    /// warning order do not depend on scheduling.
    fn check_rooms(&self, rooms: &[Room], root: &FieldPath) -> Result<Vec<ValidationWarning>> {
        let check = |(i, room): (usize, &Room)| -> Result<Vec<ValidationWarning>> {
            let mut warnings = Vec::new();
            validate_room(room, &root.index("rooms", i), &mut warnings)?;
            trace!("Room shard {i} '{}' checked", room.name());
            Ok(warnings)
        };

        let shards: Vec<Result<Vec<ValidationWarning>>> =
            if self.options.parallel && rooms.len() > 1 {
                rooms.par_iter().enumerate().map(check).collect()
            } else {
                rooms.iter().enumerate().map(check).collect()
            };

        let mut warnings = Vec::new();
        for shard in shards {
            warnings.extend(shard?);
        }
        Ok(warnings)
    }

    /// Validate a standalone entity
    pub fn validate_entity<T: Validate>(&self, entity: T) -> Result<Validated<T>> {
        let warnings = entity.validate()?;
        for warning in &warnings {
            warn!("{warning}");
        }
        Ok(Validated::new(entity, warnings))
    }

    /// Decode a model record and validate it
    pub fn parse_model(&self, record: Value) -> Result<Validated<Model>> {
        let model: Model = serde_json::from_value(record)?;
        self.validate(model)
    }

    /// Decode a model from JSON text and validate it
    pub fn parse_model_str(&self, content: &str) -> Result<Validated<Model>> {
        let model: Model = serde_json::from_str(content)?;
        self.validate(model)
    }

    /// Read a model from a JSON file and validate it
    pub fn parse_model_file(&self, path: impl AsRef<Path>) -> Result<Validated<Model>> {
        let path = path.as_ref();
        debug!("Reading model from {}", path.display());
        let content = std::fs::read_to_string(path)?;
        self.parse_model_str(&content)
    }

    /// Decode any standalone entity record and validate it
    pub fn parse_entity<T>(&self, record: Value) -> Result<Validated<T>>
    where
        T: DeserializeOwned + Validate,
    {
        let entity: T = serde_json::from_value(record)?;
        self.validate_entity(entity)
    }

    /// Count the contents of a validated model
    pub fn summary(model: &Validated<Model>) -> ValidationSummary {
        let mut summary = ValidationSummary {
            warnings: model.warnings().len(),
            orphans: model.orphan_counts().iter().map(|(_, count)| count).sum(),
            ..ValidationSummary::default()
        };
        model.walk(|entity, _| match entity {
            EntityRef::Room(_) => summary.rooms += 1,
            EntityRef::Face(_) => summary.faces += 1,
            EntityRef::Aperture(_) => summary.apertures += 1,
            EntityRef::Door(_) => summary.doors += 1,
            EntityRef::Shade(_) => summary.shades += 1,
        });
        summary
    }
}

/// Entity and warning counts of a validated model
///
/// Counts include orphaned entities and nested shades.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ValidationSummary {
    pub rooms: usize,
    pub faces: usize,
    pub apertures: usize,
    pub doors: usize,
    pub shades: usize,
    /// Orphaned faces, apertures and doors
    pub orphans: usize,
    pub warnings: usize,
}

impl ValidationSummary {
    /// Count of one entity kind
    pub fn count(&self, kind: EntityKind) -> usize {
        match kind {
            EntityKind::Shade => self.shades,
            EntityKind::Door => self.doors,
            EntityKind::Aperture => self.apertures,
            EntityKind::Face => self.faces,
            EntityKind::Room => self.rooms,
            EntityKind::Model => 1,
        }
    }
}

impl fmt::Display for ValidationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} rooms, {} faces, {} apertures, {} doors, {} shades ({} orphaned), {} warning(s)",
            self.rooms,
            self.faces,
            self.apertures,
            self.doors,
            self.shades,
            self.orphans,
            self.warnings
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hbjson_model::{
        Aperture, BoundaryCondition, Door, ErrorKind, Face, Face3D, FaceType, Shade,
        SubFaceBoundaryCondition, ValidationError,
    };
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

    fn wall(name: &str) -> Face {
        Face::new(name, triangle(), FaceType::Wall, BoundaryCondition::outdoors())
    }

    fn room(name: &str) -> Room {
        Room::new(
            name,
            (0..4).map(|i| wall(&format!("{name}_Face_{i}"))).collect(),
        )
    }

    fn validators() -> [ModelValidator; 2] {
        [
            ModelValidator::new(),
            ModelValidator::with_options(ValidatorOptions::sequential()),
        ]
    }

    #[test]
    fn test_valid_model_without_warnings() {
        let model = Model::new("Model_1")
            .with_room(room("Room_1"))
            .with_room(room("Room_2"));
        for validator in validators() {
            let validated = validator.validate(model.clone()).unwrap();
            assert!(!validated.has_warnings());
            assert_eq!(validated.get(), &model);
        }
    }

    #[test]
    fn test_first_failing_room_wins_in_parallel() {
        let mut broken = room("Room_3");
        broken.faces.truncate(3);
        let mut also_broken = room("Room_2");
        also_broken.faces[0].geometry.boundary[1] = vec![1.0];

        let model = Model::new("Model_1")
            .with_room(room("Room_1"))
            .with_room(also_broken)
            .with_room(broken);
        for validator in validators() {
            let err = validator.validate(model.clone()).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Geometry);
            assert_eq!(
                err.path().unwrap().as_str(),
                "Model.rooms[1].faces[0].geometry.boundary[1]"
            );
        }
    }

    #[test]
    fn test_structure_is_checked_before_names() {
        let mut bad = room("Room_1");
        bad.faces[3].boundary_condition = BoundaryCondition::surface(["X"]);
        let model = Model::new("Model_1")
            .with_room(bad)
            .with_orphaned_shade(Shade::new("Room_1", triangle()));

        let err = ModelValidator::new().validate(model).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AdjacencyArity);
    }

    #[test]
    fn test_north_angle_is_checked_after_children() {
        let model = Model::new("Model_1")
            .with_north_angle(400.0)
            .with_orphaned_door(Door::new(
                "Door 1",
                triangle(),
                SubFaceBoundaryCondition::outdoors(),
            ));
        let err = ModelValidator::new().validate(model).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidName);

        let model = Model::new("Model_1").with_north_angle(400.0);
        let err = ModelValidator::new().validate(model).unwrap_err();
        assert_eq!(err.path().unwrap().as_str(), "Model.north_angle");
    }

    #[test]
    fn test_model_name_is_format_checked_only() {
        let model = Model::new("Room_1").with_room(room("Room_1"));
        assert!(ModelValidator::new().validate(model).is_ok());

        let model = Model::new("My Model");
        let err = ModelValidator::new().validate(model).unwrap_err();
        assert_eq!(err.path().unwrap().as_str(), "Model.name");
    }

    #[test]
    fn test_options_silence_advisories() {
        let mut host = room("Room_1");
        host.faces[0].boundary_condition = BoundaryCondition::surface(["Ghost", "Room_9"]);
        let model = Model::new("Model_1")
            .with_room(host)
            .with_orphaned_aperture(Aperture::new(
                "Win_1",
                triangle(),
                SubFaceBoundaryCondition::outdoors(),
            ));

        let validated = ModelValidator::new().validate(model.clone()).unwrap();
        assert_eq!(validated.warnings().len(), 3);
        assert_eq!(
            validated.warnings()[2],
            ValidationWarning::OrphanedObjects {
                kind: EntityKind::Aperture,
                count: 1
            }
        );

        let quiet = ModelValidator::with_options(
            ValidatorOptions::new()
                .with_reference_check(false)
                .with_orphan_report(false),
        );
        assert!(!quiet.validate(model).unwrap().has_warnings());
    }

    #[test]
    fn test_case_insensitive_duplicates() {
        let model = Model::new("Model_1")
            .with_room(room("Room_1"))
            .with_orphaned_shade(Shade::new("ROOM_1", triangle()));
        assert!(ModelValidator::new().validate(model.clone()).is_ok());

        let strict = ModelValidator::with_options(
            ValidatorOptions::new().with_case_insensitive_names(true),
        );
        let err = strict.validate(model).unwrap_err();
        assert!(matches!(err, ValidationError::DuplicateName { .. }));
    }

    #[test]
    fn test_parse_entity_and_summary() {
        let validator = ModelValidator::new();
        let shade: Validated<Shade> = validator
            .parse_entity(json!({
                "type": "Shade",
                "name": "Tree_1",
                "geometry": {
                    "type": "Face3D",
                    "boundary": [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]
                },
                "properties": {"type": "ShadePropertiesAbridged"}
            }))
            .unwrap();
        assert_eq!(shade.name(), "Tree_1");

        let model = Model::new("Model_1")
            .with_room(room("Room_1").with_outdoor_shade(shade.into_inner()))
            .with_orphaned_face(wall("Loose"));
        let validated = validator.validate(model).unwrap();
        let summary = ModelValidator::summary(&validated);
        assert_eq!(
            summary,
            ValidationSummary {
                rooms: 1,
                faces: 5,
                apertures: 0,
                doors: 0,
                shades: 1,
                orphans: 1,
                warnings: 1,
            }
        );
        assert_eq!(summary.count(EntityKind::Face), 5);
    }

    #[test]
    fn test_parse_errors_are_schema_errors() {
        let validator = ModelValidator::new();
        let err = validator.parse_model_str("{\"type\": \"Model\",").unwrap_err();
        match err {
            ValidationError::Schema { line, .. } => assert_eq!(line, Some(1)),
            other => panic!("unexpected error {other:?}"),
        }

        let err = validator
            .parse_model(json!({"type": "Room", "name": "X"}))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Schema);

        let err = validator
            .parse_model_file("/nonexistent/model.hbjson")
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
    }
}
