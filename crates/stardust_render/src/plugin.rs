use bevy::prelude::*;
use stardust_sim::Simulation;

use super::bodies;
use super::camera;
use super::input;
use super::overlay;
use super::ui;

/// Background behind the starfield
const SPACE: Color = Color::srgb(0.0, 0.0, 17.0 / 255.0);

/// Render adapter and input handlers for a [`Simulation`] resource.
///
/// Reads the simulation in `Update` and never writes bodies; input is queued
/// as commands. When the resource is removed every system stops and the body
/// disks are despawned.
pub struct StardustRenderPlugin;

impl Plugin for StardustRenderPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClearColor(SPACE))
            .init_resource::<ui::HudThrottle>()
            .init_resource::<input::PointerState>()
            .init_resource::<overlay::OverlayState>()
            .add_systems(
                Startup,
                (camera::spawn_camera, ui::spawn_hud, bodies::init_body_assets),
            )
            .add_systems(
                Update,
                (
                    camera::sync_viewport,
                    input::pointer_input,
                    input::keyboard_input,
                    overlay::draw_starfield,
                    bodies::sync_body_disks,
                    overlay::draw_body_overlays,
                    ui::update_hud,
                    ui::fade_hud.after(input::pointer_input),
                )
                    .run_if(resource_exists::<Simulation>),
            )
            .add_systems(
                Update,
                bodies::despawn_orphan_disks.run_if(resource_removed::<Simulation>),
            );
    }
}
