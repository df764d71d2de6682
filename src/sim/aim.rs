//! Aiming helpers for the input layer: guide line and drag-to-power

use glam::Vec2;

use super::state::Ball;
use super::table::Table;
use crate::consts::MAX_POWER;
use crate::{cartesian_to_polar, normalize_angle, polar_to_cartesian};

/// Guide line shown while aiming (reference-size distances)
const GUIDE_TOLERANCE: f32 = 0.2;
const GUIDE_MAX_REACH: f32 = 300.0;
const GUIDE_FREE_LENGTH: f32 = 250.0;
/// Drag distance at which power hits zero
const DRAG_ZERO_POWER: f32 = 150.0;
const DRAG_UNITS_PER_POWER: f32 = 1.5;

/// Where the aim line ends and which ball it points at
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AimGuide {
    pub start: Vec2,
    pub end: Vec2,
    pub target: Option<u8>,
}

/// Direction from the cue ball to a pointer position
pub fn aim_toward(cue: Vec2, pointer: Vec2) -> f32 {
    cartesian_to_polar(pointer - cue).1
}

/// Aim guide for the current angle; `None` without a cue ball on the table
pub fn aim_guide(balls: &[Ball], table: &Table, angle: f32) -> Option<AimGuide> {
    let cue = balls.iter().find(|b| b.is_cue() && b.is_active())?;
    let scale = table.scale();
    let dir = polar_to_cartesian(1.0, angle);

    let hit = balls
        .iter()
        .filter(|b| b.is_active() && !b.is_cue())
        .find(|b| {
            let (dist, bearing) = cartesian_to_polar(b.pos - cue.pos);
            normalize_angle(bearing - angle).abs() < GUIDE_TOLERANCE
                && dist < GUIDE_MAX_REACH * scale
        });

    Some(match hit {
        // Ghost ball: where the cue ball sits at contact
        Some(ball) => AimGuide {
            start: cue.pos,
            end: ball.pos - dir * (table.ball_radius * 2.0),
            target: Some(ball.number),
        },
        None => AimGuide {
            start: cue.pos,
            end: cue.pos + dir * (GUIDE_FREE_LENGTH * scale),
            target: None,
        },
    })
}

/// Power for a pointer dragged back along the aim line
pub fn power_from_drag(cue: Vec2, angle: f32, pointer: Vec2, table: &Table) -> f32 {
    let scale = table.scale();
    let (dist, bearing) = cartesian_to_polar(pointer - cue);
    let along_line = (bearing - angle).cos() * dist;
    ((DRAG_ZERO_POWER * scale - along_line) / (DRAG_UNITS_PER_POWER * scale)).clamp(0.0, MAX_POWER)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;
    use std::f32::consts::PI;

    fn table() -> Table {
        Table::new(1000.0, 500.0, &Tuning::default())
    }

    #[test]
    fn test_guide_stops_at_ghost_ball() {
        let balls = vec![
            Ball::new(0, Vec2::new(250.0, 250.0), 14.0),
            Ball::new(6, Vec2::new(450.0, 250.0), 14.0),
        ];
        let guide = aim_guide(&balls, &table(), 0.0).unwrap();
        assert_eq!(guide.target, Some(6));
        assert_eq!(guide.end, Vec2::new(422.0, 250.0));
    }

    #[test]
    fn test_guide_free_line() {
        let balls = vec![
            Ball::new(0, Vec2::new(250.0, 250.0), 14.0),
            Ball::new(6, Vec2::new(800.0, 250.0), 14.0),
        ];
        // Out of reach
        let guide = aim_guide(&balls, &table(), 0.0).unwrap();
        assert_eq!(guide.target, None);
        assert_eq!(guide.end, Vec2::new(500.0, 250.0));
        // Wrong direction
        let guide = aim_guide(&balls, &table(), PI / 2.0).unwrap();
        assert_eq!(guide.target, None);
    }

    #[test]
    fn test_drag_power() {
        let table = table();
        let cue = Vec2::new(250.0, 250.0);
        // Pointer on the cue ball: far from the zero-power distance
        assert_eq!(power_from_drag(cue, 0.0, cue, &table), 100.0);
        // Pulled back behind the ball (against the aim)
        let p = power_from_drag(cue, 0.0, Vec2::new(220.0, 250.0), &table);
        assert_eq!(p, 100.0);
        // 60 ahead along the aim line
        let p = power_from_drag(cue, 0.0, Vec2::new(310.0, 250.0), &table);
        assert!((p - 60.0).abs() < 1e-3);
        // Beyond 150 ahead
        assert_eq!(power_from_drag(cue, 0.0, Vec2::new(450.0, 250.0), &table), 0.0);
    }

    #[test]
    fn test_aim_toward() {
        assert!((aim_toward(Vec2::ZERO, Vec2::new(0.0, 5.0)) - PI / 2.0).abs() < 1e-6);
    }
}
