use glam::DVec2;
use stardust_core::BodyId;

/// A state change requested by input or UI, applied at the start of the next tick
#[derive(Debug, Clone, PartialEq)]
pub enum SimCommand {
    /// Add one body at a world position
    SpawnBody {
        position: DVec2,
        mass: f64,
        velocity: DVec2,
    },
    /// Add one resting body of the configured spawn mass under a screen point
    SpawnAtScreen(DVec2),
    /// Seed a cloud from the current cloud settings, at the camera center when
    /// no center is given
    SpawnCloud { center: Option<DVec2> },
    Clear,
    ResetView,
    /// Drag the view by a screen-space delta
    Pan(DVec2),
    /// Multiply zoom, keeping `anchor` (screen space) fixed
    Zoom { factor: f64, anchor: DVec2 },
    /// Press and release without dragging: follow the body under the point,
    /// or stop following on empty space
    Click(DVec2),
    Follow(BodyId),
    Unfollow,
    TogglePause,
    SetPaused(bool),
    SetGravity(f64),
    /// Add to the gravity multiplier
    AdjustGravity(f64),
    SetSpeed(f64),
    /// Multiply the speed multiplier
    ScaleSpeed(f64),
    SetCloud { count: u32, radius: f64, spin: f64 },
    /// New viewport size in screen pixels
    Resize(DVec2),
}
