//! Per-tick ball motion: friction, pocket capture and cushion bounces

use glam::Vec2;

use super::state::Ball;
use super::table::Table;
use crate::tuning::Tuning;

/// A ball dropped into a pocket this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PocketEvent {
    pub number: u8,
    pub pocket: usize,
}

/// Advance one ball by one tick. Returns the capturing pocket, if any.
pub fn integrate_ball(ball: &mut Ball, table: &Table, tuning: &Tuning) -> Option<usize> {
    if ball.pocketed {
        ball.pocket_scale *= tuning.pocket_shrink;
        return None;
    }

    ball.pos += ball.vel;
    ball.vel *= tuning.friction;
    // Snap so "all stopped" is reached in finite time
    if ball.vel.x.abs() < tuning.stop_epsilon {
        ball.vel.x = 0.0;
    }
    if ball.vel.y.abs() < tuning.stop_epsilon {
        ball.vel.y = 0.0;
    }

    // Pockets first
    if let Some(pocket) = table.capturing_pocket(ball.pos) {
        ball.pocketed = true;
        ball.vel = Vec2::ZERO;
        return Some(pocket);
    }

    // Near a pocket the rail opening lets the ball through
    if !table.near_pocket(ball.pos, tuning.pocket_approach_factor) {
        bounce_off_cushions(ball, table, tuning.cushion_restitution);
    }

    None
}

/// Clamp to the cushion faces and reflect (inelastically) off each axis
pub fn bounce_off_cushions(ball: &mut Ball, table: &Table, restitution: f32) {
    let (min, max) = table.cushion_bounds();
    let r = ball.radius;

    if ball.pos.x - r < min.x {
        ball.pos.x = min.x + r;
        ball.vel.x *= -restitution;
    }
    if ball.pos.x + r > max.x {
        ball.pos.x = max.x - r;
        ball.vel.x *= -restitution;
    }
    if ball.pos.y - r < min.y {
        ball.pos.y = min.y + r;
        ball.vel.y *= -restitution;
    }
    if ball.pos.y + r > max.y {
        ball.pos.y = max.y - r;
        ball.vel.y *= -restitution;
    }
}

/// Advance every ball, in number order, collecting pocket captures
pub fn integrate(balls: &mut [Ball], table: &Table, tuning: &Tuning) -> Vec<PocketEvent> {
    let mut events = Vec::new();
    for ball in balls.iter_mut() {
        if let Some(pocket) = integrate_ball(ball, table, tuning) {
            log::debug!("Ball {} dropped in pocket {}", ball.number, pocket);
            events.push(PocketEvent {
                number: ball.number,
                pocket,
            });
        }
    }
    events
}
