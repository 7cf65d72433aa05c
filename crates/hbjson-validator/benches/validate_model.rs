// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Benchmarks for model validation.
//!
//! Run with: cargo bench -p hbjson-validator

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use hbjson_model::{
    Aperture, BoundaryCondition, Face, Face3D, FaceType, Model, Room, SubFaceBoundaryCondition,
};
use hbjson_validator::{ModelValidator, ValidatorOptions};

/// Axis-aligned quad at height `z`, offset along x by `x`
fn quad(x: f64, z: f64) -> Face3D {
    Face3D::new(
        vec![
            vec![x, 0.0, z],
            vec![x + 1.0, 0.0, z],
            vec![x + 1.0, 1.0, z],
            vec![x, 1.0, z],
        ],
        None,
        None,
    )
    .expect("quad has 4 points of 3 coordinates")
}

/// A box room whose first wall links to the matching wall of the next room
fn box_room(index: usize, count: usize) -> Room {
    let name = format!("Room_{index}");
    let x = index as f64;
    let faces = (0..6)
        .map(|f| {
            let face_name = format!("{name}_Face_{f}");
            let (face_type, bc) = match f {
                0 => (FaceType::Floor, BoundaryCondition::Ground),
                1 => (FaceType::RoofCeiling, BoundaryCondition::outdoors()),
                2 => {
                    let next = (index + 1) % count;
                    (
                        FaceType::Wall,
                        BoundaryCondition::surface([
                            format!("Room_{next}_Face_3"),
                            format!("Room_{next}"),
                        ]),
                    )
                }
                _ => (FaceType::Wall, BoundaryCondition::outdoors()),
            };
            let face = Face::new(face_name.clone(), quad(x, f as f64), face_type, bc);
            if f == 4 {
                face.with_aperture(Aperture::new(
                    format!("{face_name}_Glz"),
                    quad(x, f as f64),
                    SubFaceBoundaryCondition::outdoors(),
                ))
            } else {
                face
            }
        })
        .collect();
    Room::new(name, faces)
}

fn building(rooms: usize) -> Model {
    (0..rooms).fold(Model::new("Bench_Building"), |model, i| {
        model.with_room(box_room(i, rooms))
    })
}

fn bench_validate(c: &mut Criterion) {
    let mut group = c.benchmark_group("ValidateModel");
    let sequential = ModelValidator::with_options(ValidatorOptions::sequential());
    let parallel = ModelValidator::new();

    for rooms in [10, 100, 1000] {
        let model = building(rooms);
        group.throughput(Throughput::Elements(rooms as u64));
        group.bench_with_input(BenchmarkId::new("sequential", rooms), &model, |b, model| {
            b.iter(|| sequential.check(black_box(model)))
        });
        group.bench_with_input(BenchmarkId::new("parallel", rooms), &model, |b, model| {
            b.iter(|| parallel.check(black_box(model)))
        });
    }
    group.finish();
}

fn bench_parse(c: &mut Criterion) {
    let content = serde_json::to_string(&building(100)).expect("model serializes");
    let validator = ModelValidator::new();

    c.bench_function("parse_model_str_100_rooms", |b| {
        b.iter(|| validator.parse_model_str(black_box(&content)))
    });
}

criterion_group!(benches, bench_validate, bench_parse);
criterion_main!(benches);
