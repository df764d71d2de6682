//! Table geometry: playing field bounds, cushions and pockets
//!
//! Built once per table size from the reference-size `Tuning` distances.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{CUE_SPOT_X, RACK_APEX_X, RACK_ORDER, TABLE_WIDTH};
use crate::tuning::Tuning;

/// A pocket and its capture radius
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pocket {
    pub pos: Vec2,
    pub radius: f32,
}

impl Pocket {
    /// Distance from a point to the pocket center
    #[inline]
    pub fn distance(&self, point: Vec2) -> f32 {
        (point - self.pos).length()
    }

    /// Whether a ball center at `point` falls in
    #[inline]
    pub fn captures(&self, point: Vec2) -> bool {
        self.distance(point) < self.radius
    }
}

/// Immutable table geometry for one table size
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub width: f32,
    pub height: f32,
    /// Rail margin (pockets sit on this line)
    pub margin: f32,
    /// Gap between the margin line and the cushion face
    pub cushion_gap: f32,
    /// Ball radius at this size
    pub ball_radius: f32,
    /// Corners and side pockets, top row left to right, then bottom row
    pub pockets: [Pocket; 6],
}

impl Table {
    pub fn new(width: f32, height: f32, tuning: &Tuning) -> Self {
        let scale = width / TABLE_WIDTH;
        let margin = tuning.table_margin * scale;
        let radius = tuning.pocket_radius * scale;
        let pocket = |x: f32, y: f32| Pocket {
            pos: Vec2::new(x, y),
            radius,
        };

        Self {
            width,
            height,
            margin,
            cushion_gap: tuning.cushion_gap * scale,
            ball_radius: tuning.ball_radius * scale,
            pockets: [
                pocket(margin, margin),
                pocket(width / 2.0, margin),
                pocket(width - margin, margin),
                pocket(margin, height - margin),
                pocket(width / 2.0, height - margin),
                pocket(width - margin, height - margin),
            ],
        }
    }

    /// Scale factor relative to the reference table
    #[inline]
    pub fn scale(&self) -> f32 {
        self.width / TABLE_WIDTH
    }

    /// Cushion faces as (min corner, max corner)
    pub fn cushion_bounds(&self) -> (Vec2, Vec2) {
        let inset = self.margin + self.cushion_gap;
        (
            Vec2::splat(inset),
            Vec2::new(self.width - inset, self.height - inset),
        )
    }

    /// Index of the first pocket that captures a ball centered at `point`
    pub fn capturing_pocket(&self, point: Vec2) -> Option<usize> {
        self.pockets.iter().position(|p| p.captures(point))
    }

    /// Whether `point` is inside any pocket's approach zone
    pub fn near_pocket(&self, point: Vec2, approach_factor: f32) -> bool {
        self.pockets
            .iter()
            .any(|p| p.distance(point) < p.radius * approach_factor)
    }

    /// Cue ball starting spot (head string)
    pub fn cue_spot(&self) -> Vec2 {
        Vec2::new(self.width * CUE_SPOT_X, self.height / 2.0)
    }

    /// Triangle rack: five rows opening away from the cue ball
    pub fn rack_positions(&self) -> [(u8, Vec2); 15] {
        let apex = Vec2::new(self.width * RACK_APEX_X, self.height / 2.0);
        let spacing = self.ball_radius * 2.0 + 1.0;
        let mut rack = [(0u8, Vec2::ZERO); 15];
        let mut index = 0;
        for row in 0..5 {
            for col in 0..=row {
                let x = apex.x + row as f32 * spacing * 0.866;
                let y = apex.y + (col as f32 - row as f32 / 2.0) * spacing;
                rack[index] = (RACK_ORDER[index], Vec2::new(x, y));
                index += 1;
            }
        }
        rack
    }
}
