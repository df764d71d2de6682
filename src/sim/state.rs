//! Game state and core simulation types
//!
//! Physics state is plain data; the integrator, resolver, rules and planner
//! are free functions over it. `GameState` owns everything a match needs.

use std::fmt;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::table::Table;
use crate::consts::{BALL_COUNT, BALLS_PER_GROUP, CUE_BALL, EIGHT_BALL, MAX_POWER};
use crate::settings::{GameMode, Settings};
use crate::{normalize_angle, polar_to_cartesian};

/// One of the two seats at the table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    One,
    Two,
}

impl Player {
    pub fn other(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// Index into per-player arrays
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Player::One => 0,
            Player::Two => 1,
        }
    }

    /// 1 or 2, as shown to players
    pub fn number(self) -> u8 {
        self.index() as u8 + 1
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player {}", self.number())
    }
}

/// Object ball group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Group {
    /// Balls 1-7
    Solid,
    /// Balls 9-15
    Stripe,
}

impl Group {
    /// Group of a ball number; the cue ball and 8-ball belong to neither
    pub fn of(number: u8) -> Option<Self> {
        match number {
            1..=7 => Some(Group::Solid),
            9..=15 => Some(Group::Stripe),
            _ => None,
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Group::Solid => Group::Stripe,
            Group::Stripe => Group::Solid,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Group::Solid => "solid",
            Group::Stripe => "stripe",
        }
    }
}

/// A ball on the table (0 = cue, 8 = eight-ball)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub number: u8,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Captured by a pocket; frozen and out of play
    pub pocketed: bool,
    /// Capture animation scale (1.0 until pocketed, then decays)
    pub pocket_scale: f32,
}

impl Ball {
    pub fn new(number: u8, pos: Vec2, radius: f32) -> Self {
        Self {
            number,
            pos,
            vel: Vec2::ZERO,
            radius,
            pocketed: false,
            pocket_scale: 1.0,
        }
    }

    #[inline]
    pub fn is_cue(&self) -> bool {
        self.number == CUE_BALL
    }

    /// Still on the table
    #[inline]
    pub fn is_active(&self) -> bool {
        !self.pocketed
    }

    /// Active with any non-zero velocity component
    #[inline]
    pub fn is_moving(&self) -> bool {
        !self.pocketed && self.vel != Vec2::ZERO
    }

    pub fn group(&self) -> Option<Group> {
        Group::of(self.number)
    }
}

/// Fresh 16-ball layout, sorted by number
pub fn rack_balls(table: &Table) -> Vec<Ball> {
    let mut balls = Vec::with_capacity(BALL_COUNT);
    balls.push(Ball::new(CUE_BALL, table.cue_spot(), table.ball_radius));
    balls.extend(
        table
            .rack_positions()
            .into_iter()
            .map(|(number, pos)| Ball::new(number, pos, table.ball_radius)),
    );
    balls.sort_by_key(|b| b.number);
    balls
}

/// A player's group and the balls credited to them
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerAssignment {
    /// Set once, on the first object ball pocketed; never changes after
    pub group: Option<Group>,
    pub balls: Vec<u8>,
}

impl PlayerAssignment {
    /// All seven group balls credited; the 8-ball is next
    pub fn has_cleared_group(&self) -> bool {
        self.balls.len() == BALLS_PER_GROUP
    }
}

/// Turn state machine phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchPhase {
    /// Shooter is aiming or charging a shot
    AimingOrCharging,
    /// A shot is rolling
    BallsInMotion,
    /// All balls stopped; outcome being applied
    ResolvingTurn,
    /// Match ended
    GameOver,
}

/// Why the match ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverReason {
    /// Cue ball pocketed
    Scratch,
    /// 8-ball pocketed after clearing the group
    EightBallCleared,
    /// 8-ball pocketed before clearing the group
    EightBallEarly,
}

/// Turn-level match state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchState {
    pub phase: MatchPhase,
    pub current_player: Player,
    pub players: [PlayerAssignment; 2],
    pub winner: Option<Player>,
    pub game_over_reason: Option<GameOverReason>,
    pub message: String,
    /// Advisory flag for the UI while the computer deliberates
    pub ai_thinking: bool,
    /// Every captured ball, in capture order
    pub pocketed: Vec<u8>,
}

impl Default for MatchState {
    fn default() -> Self {
        Self {
            phase: MatchPhase::AimingOrCharging,
            current_player: Player::One,
            players: [PlayerAssignment::default(), PlayerAssignment::default()],
            winner: None,
            game_over_reason: None,
            message: format!("{}: Break the rack!", Player::One),
            ai_thinking: false,
            pocketed: Vec::new(),
        }
    }
}

impl MatchState {
    pub fn player(&self, player: Player) -> &PlayerAssignment {
        &self.players[player.index()]
    }

    pub fn player_mut(&mut self, player: Player) -> &mut PlayerAssignment {
        &mut self.players[player.index()]
    }

    #[inline]
    pub fn is_over(&self) -> bool {
        self.phase == MatchPhase::GameOver
    }
}

/// Flags for the shot currently rolling; reset at every turn resolution
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShotTracker {
    /// A shot was released and has not been resolved yet
    pub in_progress: bool,
    /// An object ball went down during this shot
    pub ball_pocketed: bool,
    pub foul: bool,
    /// First ball the cue ball touched
    pub first_contact: Option<u8>,
}

/// A committed shot: aim angle (radians) and power (0-100)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShotIntent {
    pub angle: f32,
    pub power: f32,
}

impl ShotIntent {
    /// Clamp power to [0, 100] and normalize the angle
    pub fn new(angle: f32, power: f32) -> Self {
        Self {
            angle: normalize_angle(angle),
            power: power.clamp(0.0, MAX_POWER),
        }
    }

    /// Cue ball velocity this shot imparts
    pub fn velocity(&self, speed_per_power: f32) -> Vec2 {
        polar_to_cartesian(self.power * speed_per_power, self.angle)
    }
}

/// Complete engine state, owned by the scheduler
#[derive(Debug, Clone)]
pub struct GameState {
    pub settings: Settings,
    pub table: Table,
    /// All 16 balls, sorted by number
    pub balls: Vec<Ball>,
    pub match_state: MatchState,
    pub shot: ShotTracker,
    /// Current aim direction (radians)
    pub aim: f32,
    /// Power being charged (0-100)
    pub power: f32,
    /// Released shot waiting for the next tick
    pub pending_shot: Option<ShotIntent>,
    /// Frames the computer has spent thinking this turn
    pub ai_timer: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Random source for the computer's shot power
    pub rng: Pcg32,
}

impl GameState {
    pub fn new(settings: Settings) -> Self {
        let table = Table::new(settings.table_width, settings.table_height, &settings.tuning);
        let balls = rack_balls(&table);
        let rng = Pcg32::seed_from_u64(settings.seed);
        let mut state = Self {
            settings,
            table,
            balls,
            match_state: MatchState::default(),
            shot: ShotTracker::default(),
            aim: 0.0,
            power: 0.0,
            pending_shot: None,
            ai_timer: 0,
            time_ticks: 0,
            rng,
        };
        state.start_turn_clock();
        state
    }

    /// Reset to a fresh rack, player 1 to break, no groups and no winner
    pub fn restart(&mut self) {
        self.balls = rack_balls(&self.table);
        self.match_state = MatchState::default();
        self.shot = ShotTracker::default();
        self.aim = 0.0;
        self.power = 0.0;
        self.pending_shot = None;
        self.ai_timer = 0;
        self.start_turn_clock();
        log::info!("Match restarted ({})", self.settings.mode.as_str());
    }

    /// Start the computer's thinking delay if it is on turn
    pub(crate) fn start_turn_clock(&mut self) {
        self.ai_timer = 0;
        self.match_state.ai_thinking = !self.match_state.is_over()
            && self.settings.mode.is_computer(self.match_state.current_player);
    }

    #[inline]
    pub fn mode(&self) -> GameMode {
        self.settings.mode
    }

    pub fn ball(&self, number: u8) -> Option<&Ball> {
        self.balls.iter().find(|b| b.number == number)
    }

    pub fn ball_mut(&mut self, number: u8) -> Option<&mut Ball> {
        self.balls.iter_mut().find(|b| b.number == number)
    }

    /// The cue ball, if it is still on the table
    pub fn cue_ball(&self) -> Option<&Ball> {
        self.ball(CUE_BALL).filter(|b| b.is_active())
    }

    pub fn eight_ball(&self) -> Option<&Ball> {
        self.ball(EIGHT_BALL)
    }

    /// Any active ball with non-zero velocity
    pub fn balls_moving(&self) -> bool {
        self.balls.iter().any(Ball::is_moving)
    }

    /// Whether the seat on turn is the computer
    pub fn is_computer_turn(&self) -> bool {
        self.settings.mode.is_computer(self.match_state.current_player)
    }

    /// Stop every ball where it is
    pub fn freeze_balls(&mut self) {
        for ball in &mut self.balls {
            ball.vel = Vec2::ZERO;
        }
    }

    /// Rebuild the table at a new size, keeping relative layout and motion
    pub fn resize(&mut self, width: f32, height: f32) {
        if width <= 0.0 || height <= 0.0 {
            return;
        }
        let factor = Vec2::new(width / self.table.width, height / self.table.height);
        self.table = Table::new(width, height, &self.settings.tuning);
        for ball in &mut self.balls {
            ball.pos *= factor;
            ball.vel *= factor;
            ball.radius = self.table.ball_radius;
        }
        self.settings.table_width = width;
        self.settings.table_height = height;
        log::info!("Table resized to {}x{}", width, height);
    }

    /// Turn-level outputs for the UI
    pub fn snapshot(&self) -> MatchSnapshot {
        let m = &self.match_state;
        let seat = |player: Player| SeatSnapshot {
            group: m.player(player).group,
            balls: m.player(player).balls.clone(),
        };
        MatchSnapshot {
            current_player: m.current_player.number(),
            player1: seat(Player::One),
            player2: seat(Player::Two),
            pocketed: m.pocketed.clone(),
            winner: m.winner.map(Player::number),
            message: m.message.clone(),
            ai_thinking: m.ai_thinking,
            game_over: m.is_over(),
            game_over_reason: m.game_over_reason,
        }
    }
}

/// Per-seat part of the snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeatSnapshot {
    pub group: Option<Group>,
    pub balls: Vec<u8>,
}

/// What the scoreboard and overlays read after each settled shot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchSnapshot {
    pub current_player: u8,
    pub player1: SeatSnapshot,
    pub player2: SeatSnapshot,
    pub pocketed: Vec<u8>,
    pub winner: Option<u8>,
    pub message: String,
    pub ai_thinking: bool,
    pub game_over: bool,
    pub game_over_reason: Option<GameOverReason>,
}
