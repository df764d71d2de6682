//! Eight Ball - a two-player 8-ball pool engine
//!
//! Core modules:
//! - `sim`: Deterministic simulation (ball physics, collisions, rules, AI)
//! - `settings`: Match options (game mode, seed, foul enforcement)
//! - `tuning`: Data-driven physics and AI constants
//!
//! Rendering, pointer plumbing and menus live outside this crate. They read
//! ball positions and the match snapshot, and feed aim/power/restart back in.

pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::{GameMode, Settings};
pub use tuning::{AiTuning, Tuning};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Reference table size; tuning distances are expressed at this size
    pub const TABLE_WIDTH: f32 = 1000.0;
    pub const TABLE_HEIGHT: f32 = 500.0;

    /// Ball numbering
    pub const BALL_COUNT: usize = 16;
    pub const CUE_BALL: u8 = 0;
    pub const EIGHT_BALL: u8 = 8;
    /// Balls a player must be credited with before the 8-ball is legal
    pub const BALLS_PER_GROUP: usize = 7;

    /// Shot power scale
    pub const MAX_POWER: f32 = 100.0;

    /// Rack order, front row first (apex is the 1-ball, 8 sits in the middle)
    pub const RACK_ORDER: [u8; 15] = [1, 9, 2, 10, 8, 3, 11, 4, 12, 5, 13, 6, 14, 7, 15];
    /// Rack apex position as a fraction of table width
    pub const RACK_APEX_X: f32 = 0.72;
    /// Cue ball spot as a fraction of table width
    pub const CUE_SPOT_X: f32 = 0.25;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Convert cartesian (x, y) to polar (r, theta)
#[inline]
pub fn cartesian_to_polar(pos: Vec2) -> (f32, f32) {
    (pos.length(), pos.y.atan2(pos.x))
}
