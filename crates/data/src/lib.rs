//! Simulation tuning parameters for Driftwake.
//!
//! Defaults match the shipped balance; an optional JSON file can override
//! any subset of fields.

use common::{GameError, GameResult};
use serde::Deserialize;

/// Boat handling and flotation parameters, fixed per vessel.
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(default)]
pub struct VesselTuning {
    /// Forward thrust coefficient.
    pub forward_speed: f32,
    /// Turning torque coefficient.
    pub turn_speed: f32,
    /// Fraction of lateral velocity kept per damping step.
    pub drift_factor: f32,
    /// Strength of the speed-proportional drift force.
    pub drift_strength: f32,
    /// Rate of the exponential lateral damping.
    pub lerp_speed: f32,
    /// Linear speed cap.
    pub max_speed: f32,
    /// Angular speed cap.
    pub max_turn_speed: f32,
    /// Y position of the water surface.
    pub water_level: f32,
    /// Buoyancy force per unit of submerged depth.
    pub buoyancy: f32,
    /// Velocity damping while submerged.
    pub damping: f32,
    /// Multiplier on ambient gravity.
    pub gravity_scale: f32,
    /// Radius of the boarding zone around the vessel.
    pub zone_radius: f32,
    /// Height of the deck above the vessel origin.
    pub deck_height: f32,
    /// Horizontal distance the agent is placed at when disembarking.
    pub exit_distance: f32,
}

impl Default for VesselTuning {
    fn default() -> Self {
        Self {
            forward_speed: 8.0,
            turn_speed: 5.0,
            drift_factor: 0.95,
            drift_strength: 3.0,
            lerp_speed: 8.0,
            max_speed: 10.0,
            max_turn_speed: 10.0,
            water_level: 0.0,
            buoyancy: 10.0,
            damping: 0.5,
            gravity_scale: 0.5,
            zone_radius: 4.0,
            deck_height: 1.5,
            exit_distance: 2.0,
        }
    }
}

/// Fishing mini-game parameters.
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(default)]
pub struct FishingTuning {
    /// Lower bound of the hook/target track.
    pub bottom_bound: f32,
    /// Upper bound of the hook/target track.
    pub top_bound: f32,
    /// Oscillation speed of the target along the track.
    pub target_speed: f32,
    /// Upward velocity gained while the ascend key is held.
    pub hook_impulse: f32,
    /// Multiplier on ambient gravity pulling the hook down.
    pub hook_gravity_scale: f32,
    /// Floor on downward hook velocity.
    pub max_fall_speed: f32,
    /// Distance within which hook and target count as aligned.
    pub tolerance: f32,
    /// Progress gained per second while aligned.
    pub fill_rate: f32,
    /// Progress lost per second while misaligned.
    pub drain_rate: f32,
    /// Session length in seconds.
    pub duration: f32,
    /// Per-tick chance of resampling the target drift.
    pub drift_chance: f32,
    /// Magnitude bound of the target drift velocity.
    pub drift_range: f32,
}

impl Default for FishingTuning {
    fn default() -> Self {
        Self {
            bottom_bound: 0.0,
            top_bound: 5.0,
            target_speed: 0.05,
            hook_impulse: 60.0,
            hook_gravity_scale: 10.0,
            max_fall_speed: -100.0,
            tolerance: 0.2,
            fill_rate: 0.1,
            drain_rate: 0.05,
            duration: 20.0,
            drift_chance: 0.01,
            drift_range: 0.2,
        }
    }
}

/// All tunable parameters bundled together.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub vessel: VesselTuning,
    pub fishing: FishingTuning,
}

impl Tuning {
    /// Loads tuning from a JSON file, falling back to defaults when the
    /// file does not exist.
    pub fn load(path: &str) -> GameResult<Self> {
        let data = match std::fs::read_to_string(path) {
            Ok(d) => d,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(e.into()),
        };
        serde_json::from_str(&data).map_err(|e| GameError::Parse(e.to_string()))
    }
}
