//! Computer shot planner
//!
//! Scores a fixed fan of aim angles around the cue ball. A candidate earns
//! points for every target ball it points at: more for near targets, and more
//! again for targets sitting close to a pocket. Power is drawn from a band.

use std::f32::consts::TAU;

use rand::Rng;

use super::state::{Ball, Group, ShotIntent};
use super::table::Table;
use crate::consts::EIGHT_BALL;
use crate::tuning::AiTuning;
use crate::{cartesian_to_polar, normalize_angle};

/// Balls the planner may aim at for a player holding `group`
pub fn target_balls(balls: &[Ball], group: Option<Group>) -> Vec<&Ball> {
    let mut targets: Vec<&Ball> = balls
        .iter()
        .filter(|b| b.is_active() && !b.is_cue())
        .filter(|b| match group {
            None => b.number != EIGHT_BALL,
            Some(group) => b.group() == Some(group),
        })
        .collect();

    // Group cleared: the 8-ball is all that's left
    if targets.is_empty() {
        targets.extend(
            balls
                .iter()
                .filter(|b| b.number == EIGHT_BALL && b.is_active()),
        );
    }
    targets
}

/// Score of one candidate angle
pub fn score_angle(
    cue: &Ball,
    angle: f32,
    targets: &[&Ball],
    table: &Table,
    tuning: &AiTuning,
) -> f32 {
    let mut score = 0.0;
    for target in targets {
        let (dist, bearing) = cartesian_to_polar(target.pos - cue.pos);
        if normalize_angle(bearing - angle).abs() >= tuning.angle_tolerance {
            continue;
        }
        score += tuning.ball_weight / (dist + 1.0);
        for pocket in &table.pockets {
            score += tuning.pocket_weight / (pocket.distance(target.pos) + 1.0);
        }
    }
    score
}

/// Best candidate angle; the first maximum wins ties
pub fn best_angle(cue: &Ball, targets: &[&Ball], table: &Table, tuning: &AiTuning) -> (f32, f32) {
    let steps = tuning.angle_steps.max(1);
    let mut best = (0.0, -1.0);
    for i in 0..steps {
        let angle = i as f32 / steps as f32 * TAU;
        let score = score_angle(cue, angle, targets, table, tuning);
        if score > best.1 {
            best = (angle, score);
        }
    }
    best
}

/// Plan the next shot for a player holding `group`.
///
/// Returns `None` if the cue ball is gone or there is nothing to aim at.
pub fn plan_shot<R: Rng>(
    balls: &[Ball],
    table: &Table,
    group: Option<Group>,
    tuning: &AiTuning,
    rng: &mut R,
) -> Option<ShotIntent> {
    let cue = balls.iter().find(|b| b.is_cue() && b.is_active())?;
    let targets = target_balls(balls, group);
    if targets.is_empty() {
        return None;
    }

    let (angle, score) = best_angle(cue, &targets, table, tuning);
    let power = if tuning.power_max > tuning.power_min {
        rng.random_range(tuning.power_min..tuning.power_max)
    } else {
        tuning.power_min
    };
    log::debug!(
        "AI picked angle {:.2} (score {:.3}) at power {:.1} from {} targets",
        angle,
        score,
        power,
        targets.len()
    );
    Some(ShotIntent::new(angle, power))
}
