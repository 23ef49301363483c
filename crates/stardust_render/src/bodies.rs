use std::collections::HashSet;

use bevy::prelude::*;
use stardust_core::BodyId;
use stardust_sim::Simulation;

use super::frame::{self, BodyShape};

/// Marker linking a disk entity to the body it draws
#[derive(Component)]
pub struct BodyDisk {
    pub id: BodyId,
}

/// Shared unit circle, scaled per body
#[derive(Resource)]
pub struct BodyAssets {
    pub circle: Handle<Mesh>,
}

const BODY_Z: f32 = 1.0;

pub fn init_body_assets(mut commands: Commands, mut meshes: ResMut<Assets<Mesh>>) {
    let circle = meshes.add(Circle::new(1.0));
    commands.insert_resource(BodyAssets { circle });
}

/// Keep one disk entity per live body: spawn for new ids, despawn for removed
/// ones, and move, scale, recolor or hide the rest.
pub fn sync_body_disks(
    mut commands: Commands,
    sim: Res<Simulation>,
    assets: Res<BodyAssets>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    mut disks: Query<(
        Entity,
        &BodyDisk,
        &mut Transform,
        &mut Visibility,
        &MeshMaterial2d<ColorMaterial>,
    )>,
) {
    let store = sim.store();
    let camera = sim.camera();
    let performance_mode = sim.clock().performance_mode();
    let mut seen: HashSet<BodyId> = HashSet::with_capacity(store.len());

    for (entity, disk, mut transform, mut visibility, material) in &mut disks {
        let Some(body) = store.get(disk.id) else {
            commands.entity(entity).despawn();
            continue;
        };
        seen.insert(disk.id);

        let shown = frame::is_visible(camera, body)
            && (!performance_mode || body.radius * camera.zoom() >= frame::TINY_BODY_PX);
        if !shown {
            *visibility = Visibility::Hidden;
            continue;
        }
        *visibility = Visibility::Visible;

        let pos = frame::to_bevy(camera.world_to_screen(body.position), camera.viewport);
        transform.translation = pos.extend(BODY_Z);
        transform.scale = Vec3::splat((body.radius * camera.zoom()) as f32);

        let color = frame::to_color(body.color);
        if materials.get(&material.0).is_some_and(|m| m.color != color) {
            if let Some(m) = materials.get_mut(&material.0) {
                m.color = color;
            }
        }
    }

    let mut spawned = 0;
    for body in store.iter().filter(|b| !seen.contains(&b.id)) {
        let Some(visual) = frame::body_visual(
            body,
            camera,
            performance_mode,
            sim.config().fusion_threshold,
            false,
            0.0,
            0.0,
        ) else {
            continue;
        };
        let BodyShape::Disk(radius_px) = visual.shape else {
            // drawn as a gizmo square until it grows
            continue;
        };

        let pos = frame::to_bevy(visual.screen, camera.viewport);
        commands.spawn((
            Mesh2d(assets.circle.clone()),
            MeshMaterial2d(materials.add(frame::to_color(body.color))),
            Transform::from_translation(pos.extend(BODY_Z))
                .with_scale(Vec3::splat(radius_px as f32)),
            BodyDisk { id: body.id },
        ));
        spawned += 1;
    }
    if spawned > 0 {
        debug!("Spawned {} body disks", spawned);
    }
}

/// Drop every disk once the simulation instance is gone
pub fn despawn_orphan_disks(mut commands: Commands, disks: Query<Entity, With<BodyDisk>>) {
    for entity in &disks {
        commands.entity(entity).despawn();
    }
}
