//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed step per display frame, no wall-clock time
//! - Seeded RNG only
//! - Stable iteration order (by ball number)
//! - No rendering or platform dependencies

pub mod ai;
pub mod aim;
pub mod collision;
pub mod physics;
pub mod rules;
pub mod state;
pub mod table;
pub mod tick;

pub use aim::{AimGuide, aim_guide, aim_toward, power_from_drag};
pub use collision::{Contact, resolve_collisions};
pub use physics::{PocketEvent, integrate};
pub use state::{
    Ball, GameOverReason, GameState, Group, MatchPhase, MatchSnapshot, MatchState, Player,
    PlayerAssignment, SeatSnapshot, ShotIntent, ShotTracker,
};
pub use table::{Pocket, Table};
pub use tick::{TickInput, tick};
