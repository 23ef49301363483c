use bevy::color::Alpha;
use bevy::prelude::*;
use stardust_sim::Simulation;

use super::frame;
use super::input::PointerState;

/// Marker for the HUD text
#[derive(Component)]
pub struct HudText;

const HUD_COLOR: Color = Color::srgba(0.75, 0.85, 1.0, 0.9);

/// Spawn the HUD overlay
pub fn spawn_hud(mut commands: Commands) {
    commands.spawn((
        Text::new("Stardust"),
        TextFont {
            font_size: 15.0,
            ..default()
        },
        TextColor(HUD_COLOR),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(10.0),
            left: Val::Px(10.0),
            ..default()
        },
        HudText,
    ));
}

/// HUD frame counter for throttling
#[derive(Resource, Default)]
pub struct HudThrottle {
    pub frame: u32,
}

/// Status lines: counts, rate, zoom, tunables and mode badges
pub fn hud_text(sim: &Simulation) -> String {
    let clock = sim.clock();
    let config = sim.config();
    let fps = clock
        .fps()
        .map_or_else(|| "--".to_string(), |f| f.to_string());

    let mut badges = Vec::new();
    if clock.paused {
        badges.push("[PAUSED]");
    }
    if sim.camera().following().is_some() {
        badges.push("[TRACKING]");
    }
    if clock.performance_mode() {
        badges.push("[PERFORMANCE]");
    }

    format!(
        "Bodies: {} | FPS: {} | Zoom: {:.0}%\n\
         Gravity: {:.1} | Speed: {:.1}x\n\
         {}\n\
         \n\
         [LMB] Drag / follow  [RMB] Spawn  [Wheel] Zoom\n\
         [Space] Pause  [C] Cloud  [X] Clear  [R] Reset view\n\
         [ [ / ] ] Gravity  [- / =] Speed",
        sim.store().len(),
        fps,
        sim.camera().zoom() * 100.0,
        config.gravity,
        config.speed,
        badges.join(" "),
    )
}

/// Update HUD text every 10th frame (string formatting is expensive)
pub fn update_hud(
    sim: Res<Simulation>,
    mut throttle: ResMut<HudThrottle>,
    mut hud_query: Query<&mut Text, With<HudText>>,
) {
    throttle.frame = throttle.frame.wrapping_add(1);
    if throttle.frame % 10 != 0 {
        return;
    }
    if let Ok(mut text) = hud_query.get_single_mut() {
        **text = hud_text(&sim);
    }
}

/// Fade the HUD out while the pointer is idle
pub fn fade_hud(pointer: Res<PointerState>, mut hud_query: Query<&mut TextColor, With<HudText>>) {
    let alpha = frame::hud_alpha(pointer.idle) * HUD_COLOR.alpha();
    for mut color in &mut hud_query {
        if (color.0.alpha() - alpha).abs() > f32::EPSILON {
            color.0.set_alpha(alpha);
        }
    }
}
