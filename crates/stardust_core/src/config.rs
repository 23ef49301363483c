use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::ConfigError;

/// How a seeded cloud is set spinning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpinLaw {
    /// Tangential speed = spin * CLOUD_SPIN_SCALE * r
    #[default]
    Linear,
    /// Tangential speed = spin * r / cloud_radius (rim moves at `spin` units/s)
    Normalized,
}

/// Simulation configuration.
///
/// Every field is a runtime knob. Values coming from files or input are never
/// rejected: [`SimConfig::clamped`] pulls them into range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Gravity strength multiplier (G)
    pub gravity: f64,
    /// Multiplies the fixed timestep handed to the integrator
    pub speed: f64,
    /// Bodies per seeded cloud
    pub cloud_count: u32,
    /// Radius of a seeded cloud
    pub cloud_radius: f64,
    /// Spin given to a seeded cloud, see [`SpinLaw`]
    pub cloud_spin: f64,
    pub spin_law: SpinLaw,
    /// Seconds of simulation per physics tick
    pub fixed_timestep: f64,
    pub collision_cell_size: f64,
    pub min_interaction_distance: f64,
    pub max_interaction_distance: f64,
    pub max_velocity: f64,
    pub fusion_threshold: f64,
    pub trail_max_len: usize,
    pub trail_sample_interval: u32,
    pub zoom_min: f64,
    pub zoom_max: f64,
    /// Mass of a body placed by hand
    pub spawn_mass: f64,
    /// Skip attraction between bodies that already overlap
    pub skip_overlapping_pairs: bool,
    /// Seed a cloud at the camera center on the first tick
    pub initial_cloud: bool,
    /// Random seed for deterministic cloud seeding
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            gravity: 2.5,
            speed: 25.0,
            cloud_count: 1000,
            cloud_radius: 300.0,
            cloud_spin: 20.0,
            spin_law: SpinLaw::Linear,
            fixed_timestep: FIXED_TIMESTEP,
            collision_cell_size: COLLISION_CELL_SIZE,
            min_interaction_distance: MIN_INTERACTION_DISTANCE,
            max_interaction_distance: MAX_INTERACTION_DISTANCE,
            max_velocity: MAX_VELOCITY,
            fusion_threshold: FUSION_THRESHOLD,
            trail_max_len: TRAIL_MAX_LEN,
            trail_sample_interval: TRAIL_SAMPLE_INTERVAL,
            zoom_min: ZOOM_MIN,
            zoom_max: ZOOM_MAX,
            spawn_mass: 10.0,
            skip_overlapping_pairs: false,
            initial_cloud: false,
            seed: 42,
        }
    }
}

/// Clamp into [lo, hi]; NaN falls back to `fallback`
fn clamp_or(value: f64, lo: f64, hi: f64, fallback: f64) -> f64 {
    if value.is_nan() {
        fallback
    } else {
        value.clamp(lo, hi)
    }
}

impl SimConfig {
    /// Copy of this config with every field pulled into its valid range
    pub fn clamped(&self) -> Self {
        let d = Self::default();
        Self {
            gravity: clamp_or(self.gravity, 0.0, 10.0, d.gravity),
            speed: clamp_or(self.speed, 0.1, 100.0, d.speed),
            cloud_count: self.cloud_count.clamp(1, 5000),
            cloud_radius: clamp_or(self.cloud_radius, 10.0, 2000.0, d.cloud_radius),
            cloud_spin: clamp_or(self.cloud_spin, 0.0, 100.0, d.cloud_spin),
            spin_law: self.spin_law,
            fixed_timestep: clamp_or(
                self.fixed_timestep,
                1.0 / 240.0,
                1.0 / 15.0,
                d.fixed_timestep,
            ),
            collision_cell_size: clamp_or(
                self.collision_cell_size,
                10.0,
                1000.0,
                d.collision_cell_size,
            ),
            min_interaction_distance: clamp_or(
                self.min_interaction_distance,
                1e-3,
                10.0,
                d.min_interaction_distance,
            ),
            max_interaction_distance: clamp_or(
                self.max_interaction_distance,
                100.0,
                1e6,
                d.max_interaction_distance,
            ),
            max_velocity: clamp_or(self.max_velocity, 1.0, 1e5, d.max_velocity),
            fusion_threshold: clamp_or(self.fusion_threshold, 1.0, 1e6, d.fusion_threshold),
            trail_max_len: self.trail_max_len.min(500),
            trail_sample_interval: self.trail_sample_interval.clamp(1, 60),
            zoom_min: clamp_or(self.zoom_min, 0.01, 1.0, d.zoom_min),
            zoom_max: clamp_or(self.zoom_max, 1.0, 100.0, d.zoom_max),
            spawn_mass: clamp_or(self.spawn_mass, 0.1, 1e4, d.spawn_mass),
            skip_overlapping_pairs: self.skip_overlapping_pairs,
            initial_cloud: self.initial_cloud,
            seed: self.seed,
        }
    }

    /// Parse a YAML document; missing fields take their defaults and the
    /// result is clamped
    pub fn from_yaml(text: &str) -> Result<Self, serde_yaml::Error> {
        let config: SimConfig = serde_yaml::from_str(text)?;
        Ok(config.clamped())
    }

    /// Load settings from an optional YAML file. No path, or a blank file,
    /// gives the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = fs::read_to_string(path)?;
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(Self::from_yaml(&text)?)
    }

    /// Simulated seconds advanced per physics tick
    pub fn step_dt(&self) -> f64 {
        self.fixed_timestep * self.speed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_yaml(name: &str, contents: &str) -> PathBuf {
        let file = format!("stardust-{}-{}.yaml", name, std::process::id());
        let path = std::env::temp_dir().join(file);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_default_is_already_in_range() {
        let d = SimConfig::default();
        assert_eq!(d.clamped(), d);
    }

    #[test]
    fn test_out_of_range_values_are_clamped() {
        let cfg = SimConfig {
            gravity: -3.0,
            speed: 1e9,
            cloud_count: 0,
            zoom_min: 0.0,
            zoom_max: 1e9,
            trail_sample_interval: 0,
            ..SimConfig::default()
        }
        .clamped();
        assert_eq!(cfg.gravity, 0.0);
        assert_eq!(cfg.speed, 100.0);
        assert_eq!(cfg.cloud_count, 1);
        assert_eq!(cfg.zoom_min, 0.01);
        assert_eq!(cfg.zoom_max, 100.0);
        assert_eq!(cfg.trail_sample_interval, 1);
    }

    #[test]
    fn test_nan_falls_back_to_default() {
        let cfg = SimConfig {
            gravity: f64::NAN,
            ..SimConfig::default()
        }
        .clamped();
        assert_eq!(cfg.gravity, 2.5);
    }

    #[test]
    fn test_interaction_window_is_never_inverted() {
        let cfg = SimConfig {
            min_interaction_distance: 1e9,
            max_interaction_distance: 0.0,
            ..SimConfig::default()
        }
        .clamped();
        assert!(cfg.min_interaction_distance < cfg.max_interaction_distance);
    }

    #[test]
    fn test_from_yaml_clamps() {
        let cfg = SimConfig::from_yaml("speed: 500\ncloud_count: 20\n").unwrap();
        assert_eq!(cfg.speed, 100.0);
        assert_eq!(cfg.cloud_count, 20);
        assert!(SimConfig::from_yaml("gravity: [1, 2]").is_err());
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let cfg: SimConfig =
            serde_yaml::from_str("gravity: 0.5\nspin_law: normalized\n").unwrap();
        assert_eq!(cfg.gravity, 0.5);
        assert_eq!(cfg.spin_law, SpinLaw::Normalized);
        assert_eq!(cfg.cloud_count, 1000);
    }

    #[test]
    fn test_load_without_path_or_content_gives_defaults() {
        assert_eq!(SimConfig::load(None).unwrap(), SimConfig::default());

        let path = temp_yaml("blank", "  \n");
        let cfg = SimConfig::load(Some(path.as_path())).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(cfg, SimConfig::default());
    }

    #[test]
    fn test_load_reports_io_and_parse_errors() {
        let missing = Path::new("/nonexistent/stardust/config.yaml");
        assert!(matches!(SimConfig::load(Some(missing)), Err(ConfigError::Io(_))));

        let path = temp_yaml("bad", "gravity: [1, 2]\n");
        let result = SimConfig::load(Some(path.as_path()));
        fs::remove_file(&path).unwrap();
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_reads_and_clamps_file() {
        let path = temp_yaml("speed", "speed: 500\ninitial_cloud: true\n");
        let cfg = SimConfig::load(Some(path.as_path())).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(cfg.speed, 100.0);
        assert!(cfg.initial_cloud);
    }
}
