//! 8-ball rules: group assignment, crediting, fouls, turn passing, win/loss

use super::collision::Contact;
use super::state::{GameOverReason, Group, MatchPhase, MatchState, Player, ShotTracker};
use crate::consts::{CUE_BALL, EIGHT_BALL};
use crate::settings::GameMode;

impl MatchState {
    /// Whether `number` is a legal first contact for the shooter right now
    pub fn is_legal_target(&self, shooter: Player, number: u8) -> bool {
        let assignment = self.player(shooter);
        match (assignment.group, Group::of(number)) {
            (None, Some(_)) => true,
            (Some(group), Some(ball_group)) => {
                !assignment.has_cleared_group() && group == ball_group
            }
            (Some(_), None) => number == EIGHT_BALL && assignment.has_cleared_group(),
            (None, None) => false,
        }
    }

    /// Record the cue ball's first contact of the shot
    pub fn record_contact(&self, shot: &mut ShotTracker, contact: Contact, enforce_fouls: bool) {
        if !shot.in_progress || shot.first_contact.is_some() {
            return;
        }
        let Some(partner) = contact.cue_partner(CUE_BALL) else {
            return;
        };
        shot.first_contact = Some(partner);
        if enforce_fouls && !self.is_legal_target(self.current_player, partner) {
            log::info!(
                "Foul: {} hit ball {} first",
                self.current_player,
                partner
            );
            shot.foul = true;
        }
    }

    /// Apply a pocket capture. Returns true if it ended the match.
    ///
    /// Captures that land after the match is decided (later in the same tick)
    /// still go into the history, and object balls are still credited. The
    /// result itself never changes.
    pub fn record_pocket(&mut self, number: u8, shot: &mut ShotTracker) -> bool {
        self.pocketed.push(number);
        if self.is_over() {
            self.record_object_ball(number, shot);
            return false;
        }

        match number {
            CUE_BALL => {
                self.end_match(None, GameOverReason::Scratch, "GAME OVER".to_string());
                true
            }
            EIGHT_BALL => {
                self.record_eight_ball();
                true
            }
            _ => {
                self.record_object_ball(number, shot);
                false
            }
        }
    }

    fn record_object_ball(&mut self, number: u8, shot: &mut ShotTracker) {
        let Some(group) = Group::of(number) else {
            return;
        };
        let shooter = self.current_player;

        if self.player(shooter).group.is_none() {
            self.player_mut(shooter).group = Some(group);
            self.player_mut(shooter.other()).group = Some(group.opposite());
            log::info!("{} takes {}s", shooter, group.as_str());
        }

        // Credit follows the group, not the shooter
        let credited = if self.player(shooter).group == Some(group) {
            shooter
        } else {
            shooter.other()
        };
        self.player_mut(credited).balls.push(number);
        shot.ball_pocketed = true;
    }

    fn record_eight_ball(&mut self) {
        let shooter = self.current_player;
        if self.player(shooter).has_cleared_group() {
            self.end_match(
                Some(shooter),
                GameOverReason::EightBallCleared,
                format!("{} wins!", shooter),
            );
        } else {
            self.end_match(
                Some(shooter.other()),
                GameOverReason::EightBallEarly,
                format!("{} loses! 8-ball pocketed early.", shooter),
            );
        }
    }

    fn end_match(&mut self, winner: Option<Player>, reason: GameOverReason, message: String) {
        log::info!("Game over ({:?}), winner: {:?}", reason, winner);
        self.phase = MatchPhase::GameOver;
        self.winner = winner;
        self.game_over_reason = Some(reason);
        self.message = message;
        self.ai_thinking = false;
    }

    /// Settle a finished shot: pass or keep the turn, then reset shot flags
    pub fn resolve_turn(&mut self, shot: &mut ShotTracker, mode: GameMode, enforce_fouls: bool) {
        if self.is_over() {
            *shot = ShotTracker::default();
            return;
        }
        self.phase = MatchPhase::ResolvingTurn;

        if enforce_fouls && shot.first_contact.is_none() {
            log::info!("Foul: {} hit nothing", self.current_player);
            shot.foul = true;
        }

        if shot.foul || !shot.ball_pocketed {
            self.current_player = self.current_player.other();
            let next = self.current_player;
            self.message = if shot.foul {
                format!("Foul! {}'s turn", next)
            } else if mode == GameMode::PlayerVsComputer && mode.is_computer(next) {
                "AI's turn".to_string()
            } else {
                format!("{}'s turn", next)
            };
        } else {
            self.message = format!(
                "Good shot! {} continues",
                mode.seat_name(self.current_player)
            );
        }
        log::info!("{}", self.message);

        *shot = ShotTracker::default();
        self.phase = MatchPhase::AimingOrCharging;
    }
}
