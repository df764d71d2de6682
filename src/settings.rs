//! Match settings
//!
//! Chosen before a match starts; a restart keeps them.

use serde::{Deserialize, Serialize};

use crate::consts::{TABLE_HEIGHT, TABLE_WIDTH};
use crate::sim::Player;
use crate::tuning::Tuning;

/// Who controls each seat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GameMode {
    /// Two humans share the table
    PlayerVsPlayer,
    /// Player 2 is the computer
    #[default]
    PlayerVsComputer,
    /// Both seats are the computer (headless runs, demos)
    ComputerVsComputer,
}

impl GameMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::PlayerVsPlayer => "pvp",
            GameMode::PlayerVsComputer => "pvc",
            GameMode::ComputerVsComputer => "cvc",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pvp" | "player-vs-player" => Some(GameMode::PlayerVsPlayer),
            "pvc" | "player-vs-computer" => Some(GameMode::PlayerVsComputer),
            "cvc" | "computer-vs-computer" => Some(GameMode::ComputerVsComputer),
            _ => None,
        }
    }

    /// Whether the given seat is played by the shot planner
    pub fn is_computer(&self, player: Player) -> bool {
        match self {
            GameMode::PlayerVsPlayer => false,
            GameMode::PlayerVsComputer => player == Player::Two,
            GameMode::ComputerVsComputer => true,
        }
    }

    /// Name used in status messages ("AI" for the computer seat against a human)
    pub fn seat_name(&self, player: Player) -> String {
        if *self == GameMode::PlayerVsComputer && self.is_computer(player) {
            "AI".to_string()
        } else {
            player.to_string()
        }
    }
}

/// Match settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub mode: GameMode,
    /// Seed for the AI's random source
    pub seed: u64,
    /// Flag a foul when the cue ball's first contact is not a legal target
    pub enforce_fouls: bool,
    /// Logical table size
    pub table_width: f32,
    pub table_height: f32,
    pub tuning: Tuning,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mode: GameMode::default(),
            seed: 0x8BA11,
            enforce_fouls: true,
            table_width: TABLE_WIDTH,
            table_height: TABLE_HEIGHT,
            tuning: Tuning::default(),
        }
    }
}

impl Settings {
    /// Default settings for a given mode
    pub fn from_mode(mode: GameMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Parse settings from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
