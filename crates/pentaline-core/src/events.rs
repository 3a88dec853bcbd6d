//! Notifications emitted by the model.
//!
//! Every mutating command returns the ordered list of events it produced;
//! the vector is the notification channel, delivered synchronously before
//! control returns to the caller. Events fall in two categories: game-level
//! (turn flow, game end) and player-level (label lifecycle), matching what
//! a view layer needs to update its turn indicator and grid.

use crate::label::Label;
use crate::player::PlayerId;
use serde::{Deserialize, Serialize};

/// An observable state change produced by a command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    // ==================== Game-level ====================
    /// The active turn moved to `player`
    TurnChanged { player: PlayerId },

    /// A winning line was found; no further turns are issued
    GameFinished { winner: PlayerId },

    // ==================== Player-level ====================
    /// `label` became the active label of `player`
    LabelReceived { player: PlayerId, label: Label },

    /// `player` successfully placed `label` on the field
    LabelPlaced { player: PlayerId, label: Label },
}

impl GameEvent {
    /// The player this event concerns (the winner for `GameFinished`).
    pub fn player(&self) -> PlayerId {
        match self {
            GameEvent::TurnChanged { player }
            | GameEvent::LabelReceived { player, .. }
            | GameEvent::LabelPlaced { player, .. } => *player,
            GameEvent::GameFinished { winner } => *winner,
        }
    }
}
