//! Mesh reconstruction over full synthetic frames.

use std::sync::Arc;

use kaya_track::sensors::fixtures::{body_frame, SyntheticMapper};
use kaya_track::{
    BodyHandle, BodyMesh, MeshBuilder, MeshConfig, TrackedUser, DEPTH_HEIGHT, DEPTH_PIXELS,
    DEPTH_WIDTH,
};

// Lattice points with in-bounds top/left neighbors: the multiples of
// `step` in [step, dim) on each axis, 423 rows by 511 columns at step 1.
fn lattice_cells(step: usize) -> usize {
    ((DEPTH_HEIGHT - 1) / step) * ((DEPTH_WIDTH - 1) / step)
}

#[test]
fn test_full_grid_triangle_count_in_closed_form() {
    // every pixel is body at one depth, so each walked lattice point
    // splits into exactly two triangles
    let frame = body_frame(0, 0, 0, DEPTH_WIDTH, DEPTH_HEIGHT, 2000);
    let mapper = SyntheticMapper::new();
    assert_eq!(lattice_cells(1), 423 * 511);

    for step in [1usize, 2, 4] {
        let config = MeshConfig {
            step,
            max_edge_depth_delta: 0.1,
        };
        let mut builder = MeshBuilder::new(config);
        let mut mesh = BodyMesh::new();
        builder.build(&frame, 0, &mapper, &mut mesh).unwrap();
        assert_eq!(
            mesh.triangle_count(),
            2 * lattice_cells(step),
            "unexpected count at step {}",
            step
        );
    }
}

#[test]
fn test_depth_seam_is_never_bridged() {
    // left half of the scene sits 0.6 m in front of the right half
    let mut frame = body_frame(0, 0, 0, DEPTH_WIDTH, DEPTH_HEIGHT, 2000);
    for y in 0..DEPTH_HEIGHT {
        for x in (DEPTH_WIDTH / 2)..DEPTH_WIDTH {
            frame.depth[y * DEPTH_WIDTH + x] = 2600;
        }
    }

    let mut builder = MeshBuilder::new(MeshConfig::default());
    let mut mesh = BodyMesh::new();
    builder
        .build(&frame, 0, &SyntheticMapper::new(), &mut mesh)
        .unwrap();

    assert!(!mesh.is_empty());
    for tri in mesh.triangles() {
        let zs: Vec<f32> = tri.iter().map(|&i| mesh.vertices[i as usize].z).collect();
        let spread = zs.iter().cloned().fold(f32::MIN, f32::max)
            - zs.iter().cloned().fold(f32::MAX, f32::min);
        assert!(
            spread < 0.1,
            "triangle bridges the depth seam with spread {}",
            spread
        );
    }
}

#[test]
fn test_silhouette_stays_near_painted_rectangle() {
    let (x0, y0, w, h) = (120usize, 120usize, 60usize, 80usize);
    let frame = body_frame(3, x0, y0, w, h, 1900);

    let mut user = TrackedUser::with_mesh_config(MeshConfig::default());
    user.set_coordinate_mapper(Some(Arc::new(SyntheticMapper::new())));
    user.set_body(Some(BodyHandle::new(0)));
    user.build_mesh(&frame).unwrap();

    let mesh = user.mesh();
    assert!(!mesh.is_empty());
    assert_eq!(mesh.vertices.len(), DEPTH_PIXELS);

    // triangles may reach one stride outside the silhouette, never more
    let step = 2;
    for &index in &mesh.triangle_indices {
        let gx = index as usize % DEPTH_WIDTH;
        let gy = index as usize / DEPTH_WIDTH;
        assert!(gx >= x0 - step && gx <= x0 + w - 1 + step);
        assert!(gy >= y0 - step && gy <= y0 + h - 1 + step);
    }
}

#[test]
fn test_classification_follows_skeleton_id() {
    // the frame paints body 2, but the skeleton claims slot id 3: the
    // rebuild succeeds and finds nothing to mesh
    let mut frame = body_frame(2, 150, 150, 40, 40, 2000);
    frame.skeletons[0].id = 3;

    let mut user = TrackedUser::new();
    user.set_coordinate_mapper(Some(Arc::new(SyntheticMapper::new())));
    user.set_body(Some(BodyHandle::new(0)));
    user.build_mesh(&frame).unwrap();
    assert!(user.mesh().is_empty());
}

#[test]
fn test_user_rebuild_is_stable_across_calls() {
    let frame = body_frame(1, 200, 100, 50, 90, 2100);
    let mut user = TrackedUser::new();
    user.set_coordinate_mapper(Some(Arc::new(SyntheticMapper::new())));
    user.set_body(Some(BodyHandle::new(0)));

    user.build_mesh(&frame).unwrap();
    let first = user.mesh().clone();
    user.build_mesh(&frame).unwrap();
    assert_eq!(user.mesh(), &first);
}
