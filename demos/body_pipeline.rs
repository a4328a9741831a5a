//! End-to-end walkthrough of the body tracking pipeline on synthetic frames.
//!
//! Builds a three-person scene, derives the floor frame from the clip
//! plane, selects the body nearest the sensor axis, runs joint updates
//! through a `TrackedUser`, and reconstructs the silhouette mesh of the
//! selected body.
//!
//! Run with:
//! ```sh
//! RUST_LOG=debug cargo run --example body_pipeline
//! ```

use std::error::Error;
use std::sync::Arc;

use kaya_track::sensors::fixtures::{body_frame, standing_skeleton, SyntheticMapper};
use kaya_track::{
    bodies_within_floor_bounds, central_body_index, tracked_body_count, FloorPlane, JointKind,
    TrackedUser, TrackingConfig,
};

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    log::info!("=== Body Tracking Pipeline Demo ===");

    // === 1. Configuration ===
    log::info!("1. Loading configuration...");
    let config = TrackingConfig::load_default()?;
    log::info!(
        "   ✓ selection z limit {:.1}m, mesh step {}, floor bounds {:.1}x{:.1}m",
        config.selection.z_threshold,
        config.mesh.step,
        config.floor.width,
        config.floor.height
    );

    // === 2. Synthetic Scene ===
    log::info!("2. Composing a three-person frame...");
    // One silhouette painted into the body-index buffer, two bystanders
    // with skeletons only.
    let mut frame = body_frame(1, 180, 80, 160, 260, 2000);
    frame.skeletons.push(standing_skeleton(0, -0.9, 2.6));
    frame.skeletons.push(standing_skeleton(3, 0.8, 2.4));
    frame.validate()?;
    log::info!(
        "   ✓ {} tracked bodies in frame",
        tracked_body_count(&frame.skeletons)
    );

    // === 3. Floor Frame ===
    log::info!("3. Deriving the floor frame...");
    let floor = FloorPlane::from_clip_plane(frame.floor_clip_plane);
    let n = floor.normal();
    log::info!(
        "   ✓ normal ({:.2}, {:.2}, {:.2}), sensor height {:.2}m",
        n.x,
        n.y,
        n.z,
        floor.distance()
    );

    let bounds = config.floor.to_bounds_rect();
    let on_floor = bodies_within_floor_bounds(&frame.skeletons, &bounds, &floor);
    log::info!("   ✓ {} bodies standing inside the play area", on_floor.len());

    // === 4. Body Selection ===
    log::info!("4. Selecting the central body...");
    let selected = central_body_index(&frame.skeletons, &config.selection)
        .ok_or("no body close enough to the sensor axis")?;
    log::info!("   ✓ selected slot {}", selected.index());

    // === 5. Joint Tracking ===
    log::info!("5. Tracking joints...");
    let mut user = TrackedUser::with_mesh_config(config.mesh);
    config.user.apply_to(&mut user);
    user.set_coordinate_mapper(Some(Arc::new(SyntheticMapper::new())));
    user.set_body(Some(selected));
    user.update(&frame)?;

    if let Some(head) = user.joint(JointKind::Head) {
        log::info!(
            "   ✓ head at ({:.2}, {:.2}, {:.2}) world, pixel ({:.0}, {:.0})",
            head.position_3d.x,
            head.position_3d.y,
            head.position_3d.z,
            head.projected_2d.x,
            head.projected_2d.y
        );
    }
    let feet = user.pos_on_floor_plane(&floor);
    log::info!("   ✓ standing at ({:.2}, {:.2}) on the floor plane", feet.x, feet.y);
    log::info!(
        "   ✓ hands: left {:?}, right {:?}, raised: {}",
        user.hand_states().left,
        user.hand_states().right,
        user.is_left_hand_up() || user.is_right_hand_up()
    );

    // === 6. Frame-over-Frame Motion ===
    log::info!("6. Advancing one frame...");
    let mut next = frame.clone();
    next.skeletons[selected.index()] = standing_skeleton(1, 0.1, 2.0);
    user.update(&next)?;

    let (prev, cur) = match (
        user.prev_joint(JointKind::SpineBase),
        user.joint(JointKind::SpineBase),
    ) {
        (Some(p), Some(c)) => (p.position_3d, c.position_3d),
        _ => return Err("spine base missing after update".into()),
    };
    log::info!(
        "   ✓ spine base moved {:.2}m since the previous frame",
        (cur - prev).length()
    );

    // === 7. Silhouette Mesh ===
    log::info!("7. Reconstructing the silhouette mesh...");
    user.build_mesh(&next)?;
    let mesh = user.mesh();
    log::info!(
        "   ✓ {} triangles over {} mapped points",
        mesh.triangle_count(),
        mesh.vertices.len()
    );

    log::info!("=== Demo Complete ===");
    Ok(())
}
