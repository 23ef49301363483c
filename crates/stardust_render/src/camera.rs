use bevy::math::DVec2;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use stardust_sim::{SimCommand, Simulation};

/// Marker for the 2D view camera
#[derive(Component)]
pub struct ViewCamera;

/// Spawn a fixed 2D camera at the origin. Pan and zoom live in the simulation
/// camera and are applied when positioning bodies, one unit per pixel.
pub fn spawn_camera(mut commands: Commands) {
    commands.spawn((Camera2d, IsDefaultUiCamera, ViewCamera));
    info!("2D camera spawned");
}

/// Queue a resize whenever the window size drifts from the simulation viewport
pub fn sync_viewport(
    windows: Query<&Window, With<PrimaryWindow>>,
    mut sim: ResMut<Simulation>,
    mut requested: Local<DVec2>,
) {
    let Ok(window) = windows.get_single() else {
        return;
    };
    let size = DVec2::new(window.width() as f64, window.height() as f64);
    if size.x <= 0.0 || size.y <= 0.0 {
        return;
    }
    // one request per change, the tick applies it
    if sim.camera().viewport != size && *requested != size {
        sim.enqueue(SimCommand::Resize(size));
        *requested = size;
    }
}
