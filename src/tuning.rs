//! Data-driven game balance
//!
//! Every gameplay knob lives in one serializable struct so balance can be
//! tweaked from a JSON blob without touching simulation code. Defaults match
//! the shipped game.

use serde::{Deserialize, Serialize};

/// Gameplay balance values
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Launch velocity applied to a released ball
    pub launch_velocity_x: f32,
    pub launch_velocity_y: f32,
    /// Componentwise launch-velocity multiplier per cleared grid
    pub clear_speed_scale: f32,
    /// Below this horizontal speed a block hit re-kicks the ball sideways
    pub min_horizontal_speed: f32,
    /// Sideways kick magnitude range (inclusive, whole units)
    pub kick_min: i32,
    pub kick_max: i32,
    /// Horizontal velocity per unit of off-center paddle contact
    pub paddle_deflect: f32,
    /// Nudge range for a perfectly centered paddle hit (inclusive)
    pub center_kick_min: i32,
    pub center_kick_max: i32,
    /// Block health draw range (inclusive)
    pub block_min_hits: u8,
    pub block_max_hits: u8,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            launch_velocity_x: -75.0,
            launch_velocity_y: -300.0,
            clear_speed_scale: 1.1,
            min_horizontal_speed: 50.0,
            kick_min: 50,
            kick_max: 100,
            paddle_deflect: 10.0,
            center_kick_min: 2,
            center_kick_max: 8,
            block_min_hits: 1,
            block_max_hits: 3,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) tuning override; missing fields keep
    /// their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
