//! Data-driven physics and AI constants
//!
//! Distances are given at the 1000x500 reference table and scaled by the
//! table's width ratio when a `Table` is built.

use serde::{Deserialize, Serialize};

/// Physics tuning for the table and balls
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Ball radius at reference size
    pub ball_radius: f32,
    /// Pocket capture radius at reference size
    pub pocket_radius: f32,
    /// Rail margin from the table edge to the pocket centers
    pub table_margin: f32,
    /// Extra gap inside the margin before the cushion
    pub cushion_gap: f32,
    /// Velocity retained per tick (rolling resistance)
    pub friction: f32,
    /// Perpendicular velocity retained after a cushion bounce
    pub cushion_restitution: f32,
    /// Velocity components below this snap to zero
    pub stop_epsilon: f32,
    /// Cushions are ignored within this multiple of the capture radius
    pub pocket_approach_factor: f32,
    /// Per-tick decay of the capture animation scale
    pub pocket_shrink: f32,
    /// Cue ball speed per unit of shot power (units/tick)
    pub speed_per_power: f32,
    /// Releases at or below this power cancel the charge
    pub min_shot_power: f32,
    /// Computer player tuning
    pub ai: AiTuning,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            ball_radius: 14.0,
            pocket_radius: 28.0,
            table_margin: 45.0,
            cushion_gap: 6.0,
            friction: 0.987,
            cushion_restitution: 0.75,
            stop_epsilon: 0.03,
            pocket_approach_factor: 1.5,
            pocket_shrink: 0.92,
            speed_per_power: 0.25,
            min_shot_power: 5.0,
            ai: AiTuning::default(),
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Shot planner tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiTuning {
    /// Frames the AI "thinks" before shooting
    pub think_frames: u32,
    /// Candidate aim angles around the full circle
    pub angle_steps: u32,
    /// Targets within this angle (radians) of a candidate contribute to it
    pub angle_tolerance: f32,
    /// Numerator of the cue-to-target distance term
    pub ball_weight: f32,
    /// Numerator of the target-to-pocket distance term
    pub pocket_weight: f32,
    /// Shot power band (min inclusive, max exclusive)
    pub power_min: f32,
    pub power_max: f32,
}

impl Default for AiTuning {
    fn default() -> Self {
        Self {
            think_frames: 90,
            angle_steps: 36,
            angle_tolerance: 0.3,
            ball_weight: 100.0,
            pocket_weight: 50.0,
            power_min: 40.0,
            power_max: 70.0,
        }
    }
}
