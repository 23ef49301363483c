use bevy::input::mouse::AccumulatedMouseScroll;
use bevy::math::DVec2;
use bevy::prelude::*;
use bevy::window::{CursorMoved, PrimaryWindow};
use stardust_core::{ZOOM_IN_FACTOR, ZOOM_OUT_FACTOR};
use stardust_sim::{PointerGesture, SimCommand, Simulation};

/// Gravity change per key press
const GRAVITY_STEP: f64 = 0.1;
/// Speed multiplier change per key press
const SPEED_STEP: f64 = 1.25;

/// Primary-button gesture plus how long the pointer has been still
#[derive(Resource, Default)]
pub struct PointerState {
    pub gesture: PointerGesture,
    /// Seconds since the pointer last moved
    pub idle: f64,
}

/// Mouse buttons, motion and wheel become simulation commands
pub fn pointer_input(
    buttons: Res<ButtonInput<MouseButton>>,
    scroll: Res<AccumulatedMouseScroll>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut moved: EventReader<CursorMoved>,
    time: Res<Time>,
    mut pointer: ResMut<PointerState>,
    mut sim: ResMut<Simulation>,
) {
    if moved.read().count() > 0 {
        pointer.idle = 0.0;
    } else {
        pointer.idle += time.delta_secs_f64();
    }

    let cursor = windows
        .get_single()
        .ok()
        .and_then(|window| window.cursor_position())
        .map(|c| c.as_dvec2());

    if let Some(cursor) = cursor {
        if buttons.just_pressed(MouseButton::Left) {
            pointer.gesture.press(cursor);
        } else if buttons.pressed(MouseButton::Left) {
            if let Some(SimCommand::Pan(delta)) = pointer.gesture.move_to(cursor) {
                if delta != DVec2::ZERO {
                    sim.enqueue(SimCommand::Pan(delta));
                }
            }
        }
    }
    // released outside the window: finish the gesture where it was last seen
    if buttons.just_released(MouseButton::Left) {
        let released = match cursor {
            Some(at) => pointer.gesture.release(at),
            None => pointer.gesture.release_at_last(),
        };
        if let Some(click) = released {
            sim.enqueue(click);
        }
    }

    let Some(cursor) = cursor else {
        return;
    };

    if buttons.just_pressed(MouseButton::Right) {
        sim.enqueue(SimCommand::SpawnAtScreen(cursor));
    }

    if scroll.delta.y != 0.0 {
        let factor = if scroll.delta.y > 0.0 {
            ZOOM_IN_FACTOR
        } else {
            ZOOM_OUT_FACTOR
        };
        sim.enqueue(SimCommand::Zoom {
            factor,
            anchor: cursor,
        });
    }
}

/// Keyboard shortcuts
pub fn keyboard_input(keyboard: Res<ButtonInput<KeyCode>>, mut sim: ResMut<Simulation>) {
    if keyboard.just_pressed(KeyCode::Space) {
        sim.enqueue(SimCommand::TogglePause);
    }
    if keyboard.just_pressed(KeyCode::KeyC) {
        sim.spawn_cloud();
    }
    if keyboard.just_pressed(KeyCode::KeyX) {
        sim.clear();
    }
    if keyboard.just_pressed(KeyCode::KeyR) {
        sim.reset_view();
    }
    if keyboard.just_pressed(KeyCode::BracketLeft) {
        sim.enqueue(SimCommand::AdjustGravity(-GRAVITY_STEP));
    }
    if keyboard.just_pressed(KeyCode::BracketRight) {
        sim.enqueue(SimCommand::AdjustGravity(GRAVITY_STEP));
    }
    if keyboard.just_pressed(KeyCode::Minus) {
        sim.enqueue(SimCommand::ScaleSpeed(1.0 / SPEED_STEP));
    }
    if keyboard.just_pressed(KeyCode::Equal) {
        sim.enqueue(SimCommand::ScaleSpeed(SPEED_STEP));
    }
}
