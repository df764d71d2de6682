//! Frame-driven simulation tick
//!
//! One call per display frame: integrate -> collide -> contacts -> captures -> turn
//! resolution -> computer player. Input handlers only stage aim, power and
//! a pending shot; the next tick picks them up.

use super::ai::plan_shot;
use super::collision::resolve_collisions;
use super::physics::integrate;
use super::state::{GameState, MatchPhase, ShotIntent, ShotTracker};
use crate::consts::CUE_BALL;
use crate::normalize_angle;

/// Input gathered by the frontend for one frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// New aim direction (radians)
    pub aim: Option<f32>,
    /// Power being charged by a drag (0-100)
    pub charge: Option<f32>,
    /// Drag released
    pub release: bool,
    /// Restart the match
    pub restart: bool,
}

impl GameState {
    /// A human may aim and shoot right now
    pub fn accepts_shot_input(&self) -> bool {
        !self.match_state.is_over()
            && !self.is_computer_turn()
            && !self.shot.in_progress
            && self.pending_shot.is_none()
            && !self.balls_moving()
            && self.cue_ball().is_some()
    }

    /// Point the cue; ignored while a shot is pending or rolling
    pub fn set_aim(&mut self, angle: f32) {
        if self.accepts_shot_input() {
            self.aim = normalize_angle(angle);
        }
    }

    /// Update the charged power, clamped to [0, 100]
    pub fn charge_shot(&mut self, power: f32) {
        if self.accepts_shot_input() {
            self.power = ShotIntent::new(self.aim, power).power;
        }
    }

    /// Commit the charged shot if it is strong enough; the charge resets either way
    pub fn release_shot(&mut self) {
        let power = std::mem::take(&mut self.power);
        if self.accepts_shot_input() && power > self.settings.tuning.min_shot_power {
            self.pending_shot = Some(ShotIntent::new(self.aim, power));
        }
    }

    /// Apply a shot to the cue ball and start the motion phase
    fn strike(&mut self, shot: ShotIntent) {
        let speed_per_power = self.settings.tuning.speed_per_power;
        let shooter = self.match_state.current_player;
        let Some(cue) = self.ball_mut(CUE_BALL).filter(|b| b.is_active()) else {
            return;
        };
        cue.vel = shot.velocity(speed_per_power);

        self.aim = shot.angle;
        self.shot = ShotTracker {
            in_progress: true,
            ..Default::default()
        };
        self.match_state.phase = MatchPhase::BallsInMotion;
        self.match_state.ai_thinking = false;
        log::info!(
            "{} shoots: angle {:.2}, power {:.1}",
            shooter,
            shot.angle,
            shot.power
        );
    }

    /// Run the planner for the seat on turn
    fn computer_shot(&mut self) {
        let group = self.match_state.player(self.match_state.current_player).group;
        match plan_shot(
            &self.balls,
            &self.table,
            group,
            &self.settings.tuning.ai,
            &mut self.rng,
        ) {
            Some(shot) => {
                self.match_state.ai_thinking = false;
                self.pending_shot = Some(shot);
            }
            None => {
                log::warn!("AI has no shot for {}", self.match_state.current_player);
                self.ai_timer = 0;
            }
        }
    }
}

/// Advance the game by one frame
pub fn tick(state: &mut GameState, input: &TickInput) {
    if input.restart {
        state.restart();
        return;
    }
    if let Some(angle) = input.aim {
        state.set_aim(angle);
    }
    if let Some(power) = input.charge {
        state.charge_shot(power);
    }
    if input.release {
        state.release_shot();
    }

    // Physics stops for good once the match is decided
    if state.match_state.is_over() {
        return;
    }

    state.time_ticks += 1;

    if let Some(shot) = state.pending_shot.take() {
        state.strike(shot);
    }

    let pockets = integrate(&mut state.balls, &state.table, &state.settings.tuning);
    let contacts = resolve_collisions(&mut state.balls);

    // First contact is judged against the groups as they stood before this tick's captures
    let enforce_fouls = state.settings.enforce_fouls;
    for contact in contacts {
        state
            .match_state
            .record_contact(&mut state.shot, contact, enforce_fouls);
    }

    // Every capture is recorded, even after one of them decides the match
    let mut decided = false;
    for event in pockets {
        decided |= state.match_state.record_pocket(event.number, &mut state.shot);
    }
    if decided {
        state.freeze_balls();
        state.shot = ShotTracker::default();
        return;
    }

    let moving = state.balls_moving();
    if !moving && state.shot.in_progress {
        let mode = state.settings.mode;
        state
            .match_state
            .resolve_turn(&mut state.shot, mode, enforce_fouls);
        state.start_turn_clock();
    }

    if state.match_state.ai_thinking && !moving {
        state.ai_timer += 1;
        if state.ai_timer > state.settings.tuning.ai.think_frames {
            state.computer_shot();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{GameMode, Settings};
    use crate::sim::state::{GameOverReason, Group, Player};
    use glam::Vec2;
    use std::f32::consts::FRAC_PI_2;

    fn pvp() -> GameState {
        GameState::new(Settings::from_mode(GameMode::PlayerVsPlayer))
    }

    /// Take everything but the listed balls off the table
    fn isolate(state: &mut GameState, keep: &[u8]) {
        for ball in &mut state.balls {
            if !keep.contains(&ball.number) {
                ball.pocketed = true;
            }
        }
    }

    fn place(state: &mut GameState, number: u8, x: f32, y: f32) {
        if let Some(ball) = state.ball_mut(number) {
            ball.pos = Vec2::new(x, y);
        }
    }

    fn shoot(state: &mut GameState, angle: f32, power: f32) {
        tick(
            state,
            &TickInput {
                aim: Some(angle),
                charge: Some(power),
                release: true,
                ..Default::default()
            },
        );
    }

    /// Tick until the shot settles or the match ends
    fn settle(state: &mut GameState) {
        for _ in 0..3000 {
            tick(state, &TickInput::default());
            if !state.shot.in_progress || state.match_state.is_over() {
                return;
            }
        }
        panic!("shot never settled");
    }

    #[test]
    fn test_release_stages_and_strikes() {
        let mut state = pvp();
        shoot(&mut state, 0.0, 40.0);
        // Staged and struck in the same frame: cue moved +10 then friction
        let cue = state.ball(0).unwrap();
        assert!(cue.vel.x > 9.0);
        assert!(state.shot.in_progress);
        assert_eq!(state.match_state.phase, MatchPhase::BallsInMotion);
        assert_eq!(state.power, 0.0);
    }

    #[test]
    fn test_weak_release_cancels() {
        let mut state = pvp();
        shoot(&mut state, 0.0, 4.0);
        assert!(!state.shot.in_progress);
        assert!(!state.balls_moving());
        assert_eq!(state.power, 0.0);
    }

    #[test]
    fn test_input_ignored_while_rolling() {
        let mut state = pvp();
        shoot(&mut state, 0.0, 40.0);
        state.set_aim(1.0);
        assert_eq!(state.aim, 0.0);
        state.charge_shot(80.0);
        assert_eq!(state.power, 0.0);
    }

    #[test]
    fn test_scenario_pot_assigns_group_and_continues() {
        let mut state = pvp();
        isolate(&mut state, &[0, 3]);
        place(&mut state, 0, 500.0, 250.0);
        place(&mut state, 3, 500.0, 120.0);

        shoot(&mut state, -FRAC_PI_2, 40.0);
        settle(&mut state);

        let m = &state.match_state;
        assert!(state.ball(3).unwrap().pocketed);
        assert_eq!(m.player(Player::One).group, Some(Group::Solid));
        assert_eq!(m.player(Player::Two).group, Some(Group::Stripe));
        assert_eq!(m.player(Player::One).balls, vec![3]);
        assert_eq!(m.current_player, Player::One);
        assert_eq!(m.message, "Good shot! Player 1 continues");
        assert_eq!(m.pocketed, vec![3]);
    }

    #[test]
    fn test_scenario_miss_passes_turn() {
        let mut state = pvp();
        isolate(&mut state, &[0, 9]);
        place(&mut state, 0, 300.0, 250.0);
        place(&mut state, 9, 500.0, 250.0);

        shoot(&mut state, 0.0, 24.0);
        settle(&mut state);

        let m = &state.match_state;
        assert!(!state.ball(9).unwrap().pocketed);
        assert!(state.ball(9).unwrap().pos.x > 500.0);
        assert_eq!(m.current_player, Player::Two);
        assert_eq!(m.player(Player::One).group, None);
        assert_eq!(m.player(Player::Two).group, None);
        assert_eq!(m.message, "Player 2's turn");
        assert_eq!(m.phase, MatchPhase::AimingOrCharging);
    }

    #[test]
    fn test_whiff_is_a_foul() {
        let mut state = pvp();
        isolate(&mut state, &[0]);
        place(&mut state, 0, 300.0, 250.0);
        shoot(&mut state, 0.0, 10.0);
        settle(&mut state);
        assert_eq!(state.match_state.current_player, Player::Two);
        assert_eq!(state.match_state.message, "Foul! Player 2's turn");
    }

    #[test]
    fn test_scratch_ends_match_and_freezes() {
        let mut state = pvp();
        isolate(&mut state, &[0, 12]);
        place(&mut state, 0, 500.0, 120.0);
        place(&mut state, 12, 300.0, 250.0);

        shoot(&mut state, -FRAC_PI_2, 40.0);
        assert!(state.shot.in_progress);
        // Another ball is still rolling when the cue ball drops
        state.ball_mut(12).unwrap().vel = Vec2::new(3.0, 0.0);
        settle(&mut state);

        let m = &state.match_state;
        assert!(m.is_over());
        assert_eq!(m.game_over_reason, Some(GameOverReason::Scratch));
        assert_eq!(m.winner, None);
        assert!(state.balls.iter().all(|b| b.vel == Vec2::ZERO));

        // Frozen: further ticks change nothing
        let frozen = state.balls.clone();
        tick(&mut state, &TickInput::default());
        assert_eq!(state.balls, frozen);
    }

    #[test]
    fn test_early_eight_ball_loses_mid_shot() {
        let mut state = pvp();
        isolate(&mut state, &[0, 8, 13]);
        {
            let m = &mut state.match_state;
            m.player_mut(Player::One).group = Some(Group::Solid);
            m.player_mut(Player::Two).group = Some(Group::Stripe);
            m.player_mut(Player::One).balls = vec![1, 2, 3, 4, 5];
        }
        place(&mut state, 0, 500.0, 250.0);
        place(&mut state, 8, 500.0, 120.0);
        place(&mut state, 13, 300.0, 300.0);

        shoot(&mut state, -FRAC_PI_2, 40.0);
        assert!(state.shot.in_progress);
        // Another ball still rolling when the 8 drops
        state.ball_mut(13).unwrap().vel = Vec2::new(-2.0, 0.0);
        settle(&mut state);

        let m = &state.match_state;
        assert!(m.is_over());
        assert_eq!(m.winner, Some(Player::Two));
        assert_eq!(m.game_over_reason, Some(GameOverReason::EightBallEarly));
        // Stopped where it was, well short of where it would have rolled to
        let rolling = state.ball(13).unwrap();
        assert_eq!(rolling.vel, Vec2::ZERO);
        assert!(rolling.pos.x > 200.0);
    }

    #[test]
    fn test_captures_in_deciding_tick_still_count() {
        let mut state = pvp();
        isolate(&mut state, &[0, 3]);
        // Cue ball into the top side pocket, ball 3 into the bottom-right corner
        place(&mut state, 0, 500.0, 80.0);
        place(&mut state, 3, 955.0, 460.0);
        state.ball_mut(0).unwrap().vel = Vec2::new(0.0, -10.0);
        state.ball_mut(3).unwrap().vel = Vec2::new(0.0, -1.0);
        state.shot.in_progress = true;

        tick(&mut state, &TickInput::default());

        let m = &state.match_state;
        assert!(m.is_over());
        assert_eq!(m.game_over_reason, Some(GameOverReason::Scratch));
        assert_eq!(m.winner, None);
        assert_eq!(m.pocketed, vec![0, 3]);
        assert_eq!(m.player(Player::One).group, Some(Group::Solid));
        assert_eq!(m.player(Player::One).balls, vec![3]);
    }

    #[test]
    fn test_first_contact_judged_before_same_tick_pot() {
        let mut state = pvp();
        isolate(&mut state, &[0, 3, 9]);
        // Cue ball touching the 9 while the 3 drops on the same tick
        place(&mut state, 0, 500.0, 250.0);
        place(&mut state, 9, 526.0, 250.0);
        place(&mut state, 3, 955.0, 460.0);
        state.ball_mut(3).unwrap().vel = Vec2::new(0.0, -1.0);
        state.shot.in_progress = true;

        tick(&mut state, &TickInput::default());

        let m = &state.match_state;
        assert_eq!(m.player(Player::One).group, Some(Group::Solid));
        assert_eq!(m.current_player, Player::One);
        assert_eq!(m.message, "Good shot! Player 1 continues");
    }

    #[test]
    fn test_eight_ball_after_clearing_wins() {
        let mut state = pvp();
        isolate(&mut state, &[0, 8]);
        {
            let m = &mut state.match_state;
            m.player_mut(Player::One).group = Some(Group::Solid);
            m.player_mut(Player::Two).group = Some(Group::Stripe);
            m.player_mut(Player::One).balls = (1..=7).collect();
        }
        place(&mut state, 0, 500.0, 250.0);
        place(&mut state, 8, 500.0, 120.0);

        shoot(&mut state, -FRAC_PI_2, 40.0);
        settle(&mut state);

        assert_eq!(state.match_state.winner, Some(Player::One));
        assert_eq!(state.match_state.message, "Player 1 wins!");
    }

    #[test]
    fn test_restart_mid_match() {
        let mut state = pvp();
        let fresh = state.balls.clone();
        isolate(&mut state, &[0, 3]);
        place(&mut state, 0, 500.0, 250.0);
        place(&mut state, 3, 500.0, 120.0);
        shoot(&mut state, -FRAC_PI_2, 40.0);
        for _ in 0..5 {
            tick(&mut state, &TickInput::default());
        }

        tick(
            &mut state,
            &TickInput {
                restart: true,
                ..Default::default()
            },
        );

        assert_eq!(state.balls, fresh);
        let m = &state.match_state;
        assert_eq!(m.current_player, Player::One);
        assert_eq!(m.player(Player::One).group, None);
        assert!(m.player(Player::One).balls.is_empty());
        assert!(m.player(Player::Two).balls.is_empty());
        assert_eq!(m.winner, None);
        assert!(m.pocketed.is_empty());
        assert!(!state.shot.in_progress);
    }

    #[test]
    fn test_computer_thinks_then_shoots() {
        let mut state = GameState::new(Settings::from_mode(GameMode::PlayerVsComputer));
        state.match_state.current_player = Player::Two;
        state.start_turn_clock();
        assert!(state.match_state.ai_thinking);

        // Human input is ignored on the computer's turn
        shoot(&mut state, 0.0, 50.0);
        assert!(!state.shot.in_progress);

        for _ in 0..89 {
            tick(&mut state, &TickInput::default());
        }
        assert!(state.match_state.ai_thinking);
        assert!(!state.balls_moving());

        // 91st thinking frame plans, the next one strikes
        tick(&mut state, &TickInput::default());
        assert!(!state.match_state.ai_thinking);
        assert!(state.pending_shot.is_some());
        tick(&mut state, &TickInput::default());
        assert!(state.shot.in_progress);
        assert!(state.balls_moving());
    }

    #[test]
    fn test_computer_match_is_deterministic() {
        let run = |seed| {
            let mut state =
                GameState::new(Settings::from_mode(GameMode::ComputerVsComputer).with_seed(seed));
            for _ in 0..5000 {
                tick(&mut state, &TickInput::default());
            }
            (state.balls.clone(), state.snapshot())
        };
        assert_eq!(run(7), run(7));
    }
}
