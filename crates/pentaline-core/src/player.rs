//! Player identity and the single active label awaiting placement.

use crate::game::GameError;
use crate::label::Label;
use serde::{Deserialize, Serialize};

/// Player identifier (0 or 1 for a two-player game)
pub type PlayerId = u8;

/// A participant in the game.
///
/// A player holds at most one *active* label at a time: the label issued
/// for the current turn, awaiting placement or withdrawal. Issuing a new
/// one abandons any prior unplaced label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    id: PlayerId,
    name: String,
    active_label: Option<Label>,
}

impl Player {
    /// Create a player with the given identity and display name.
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            active_label: None,
        }
    }

    /// Stable identifier of this player.
    pub fn id(&self) -> PlayerId {
        self.id
    }

    /// Display name, also used as the mark on normal labels.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The label currently held for placement, if any.
    pub fn active_label(&self) -> Option<&Label> {
        self.active_label.as_ref()
    }

    /// Hand the player a fresh label, replacing any unplaced one.
    pub(crate) fn set_active_label(&mut self, label: Label) {
        self.active_label = Some(label);
    }

    /// Withdraw the active label for placement or discard.
    pub(crate) fn take_active_label(&mut self) -> Result<Label, GameError> {
        self.active_label.take().ok_or_else(|| {
            GameError::InvalidState(format!("player {} holds no active label", self.name))
        })
    }
}
