//! Turn rotation, per-player pass budgets, and label-kind preferences.

use crate::game::GameError;
use crate::label::LabelKind;
use crate::player::{Player, PlayerId};
use serde::{Deserialize, Serialize};

/// Per-player turn state: the remembered label-kind preference and the
/// remaining pass budget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct PlayerTurnState {
    player: PlayerId,
    label_kind: LabelKind,
    passes_left: u32,
}

impl PlayerTurnState {
    fn new(player: PlayerId, pass_limit: u32) -> Self {
        Self {
            player,
            label_kind: LabelKind::Normal,
            passes_left: pass_limit,
        }
    }

    fn reset(&mut self, pass_limit: u32) {
        self.label_kind = LabelKind::Normal;
        self.passes_left = pass_limit;
    }
}

/// Owns the player rotation order.
///
/// The manager itself never finishes; game end is decided externally by
/// the model. Advancing the turn touches only the active index - each
/// player's label-kind preference and pass budget persist independently
/// across turn exchanges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnManager {
    states: Vec<PlayerTurnState>,
    active: usize,
    pass_limit: u32,
}

impl TurnManager {
    /// Create a manager over the given rotation order.
    ///
    /// The active index starts parked just before the first player, so
    /// the first `advance_to_next_player` lands on the first entry.
    pub fn new(players: &[Player], pass_limit: u32) -> Result<Self, GameError> {
        if players.is_empty() {
            return Err(GameError::InvalidArgument(
                "turn manager requires at least one player".into(),
            ));
        }
        let states = players
            .iter()
            .map(|p| PlayerTurnState::new(p.id(), pass_limit))
            .collect::<Vec<_>>();
        let active = states.len() - 1;
        Ok(Self {
            states,
            active,
            pass_limit,
        })
    }

    /// The player whose turn is active.
    pub fn active_player(&self) -> PlayerId {
        self.states[self.active].player
    }

    /// The active player's remembered label-kind preference.
    pub fn active_label_kind(&self) -> LabelKind {
        self.states[self.active].label_kind
    }

    /// Rotate forward with wraparound. Budgets and preferences are left
    /// untouched.
    pub fn advance_to_next_player(&mut self) {
        self.active = (self.active + 1) % self.states.len();
    }

    /// Spend one pass of the active player.
    pub fn consume_pass_of_active(&mut self) -> Result<(), GameError> {
        let state = &mut self.states[self.active];
        if state.passes_left == 0 {
            return Err(GameError::InvalidState(
                "pass budget is exhausted".into(),
            ));
        }
        state.passes_left -= 1;
        Ok(())
    }

    /// Store a label-kind preference against the active player only.
    pub fn set_active_label_kind(&mut self, kind: LabelKind) {
        self.states[self.active].label_kind = kind;
    }

    /// Remaining passes for `player`; 0 for a player unknown to the
    /// manager.
    pub fn passes_left_for(&self, player: PlayerId) -> u32 {
        self.state_for(player).map_or(0, |s| s.passes_left)
    }

    /// The label-kind preference stored for `player`, if known.
    pub fn label_kind_for(&self, player: PlayerId) -> Option<LabelKind> {
        self.state_for(player).map(|s| s.label_kind)
    }

    /// Restore every player's budget and preference, and park the active
    /// index just before the first player.
    pub fn reset_for_new_game(&mut self) {
        for state in &mut self.states {
            state.reset(self.pass_limit);
        }
        self.active = self.states.len() - 1;
    }

    fn state_for(&self, player: PlayerId) -> Option<&PlayerTurnState> {
        self.states.iter().find(|s| s.player == player)
    }
}
