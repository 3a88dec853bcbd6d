//! Top-level game orchestration.
//!
//! `GameModel` wires the field, players, factory, and turn manager
//! together and runs the start / place / pass / win-check protocol.
//! Every mutating command either fully succeeds, returning the ordered
//! events it produced, or fails leaving the model unchanged.

use crate::direction::Direction;
use crate::events::GameEvent;
use crate::field::{FieldInitializer, GameField, GridInitializer, Position};
use crate::label::{LabelFactory, LabelKind};
use crate::player::{Player, PlayerId};
use crate::turn::TurnManager;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised by engine commands.
///
/// All failures are synchronous and local; a failing command performs no
/// partial mutation.
#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameError {
    /// A supplied value was unusable (non-positive dimension, wrong
    /// player count, delegation without a distinct opponent)
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The operation does not apply to the object's current state
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// A position lies outside the field's current bounds
    #[error("position {0} is outside the field")]
    OutOfRange(Position),
}

/// Game parameters, fixed at model construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Board width in columns
    pub width: i32,
    /// Board height in rows
    pub height: i32,
    /// Passes each player may spend per game
    pub pass_limit: u32,
    /// Run length that wins the game
    pub win_length: usize,
    /// Display names, one per player
    pub player_names: Vec<String>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 5,
            height: 5,
            pass_limit: 1,
            win_length: 5,
            player_names: vec!["X".to_string(), "O".to_string()],
        }
    }
}

/// Lifecycle phase of the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Before the first `start`
    Idle,
    /// The active player holds a label awaiting placement
    AwaitingPlacement,
    /// A winning line was found; no further turns are issued
    Finished { winner: PlayerId },
}

/// One placed label as a view layer sees it.
///
/// `owner` is only populated when the label's face gives ownership away,
/// or for every label once the game has finished - hidden and secret
/// labels stay anonymous while play continues.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedLabel {
    pub position: Position,
    pub symbol: String,
    pub placed_by: Option<PlayerId>,
    pub owner: Option<PlayerId>,
}

/// Serializable read-model of the board for rendering or transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSnapshot {
    pub width: i32,
    pub height: i32,
    /// Placed labels in row-major order
    pub labels: Vec<PlacedLabel>,
}

impl FieldSnapshot {
    /// Serialize to a JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserialize from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// The complete game engine.
pub struct GameModel {
    field: GameField,
    players: Vec<Player>,
    turns: TurnManager,
    factory: LabelFactory,
    initializer: Box<dyn FieldInitializer>,
    config: GameConfig,
    secret_mode: bool,
    phase: GamePhase,
}

impl GameModel {
    /// Create a model with the default rectangular board initializer.
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        let initializer = GridInitializer::new(config.width, config.height)?;
        Self::with_initializer(config, Box::new(initializer))
    }

    /// Create a model with a custom board-setup strategy.
    pub fn with_initializer(
        config: GameConfig,
        initializer: Box<dyn FieldInitializer>,
    ) -> Result<Self, GameError> {
        if config.player_names.len() != 2 {
            return Err(GameError::InvalidArgument(format!(
                "exactly two players are required, got {}",
                config.player_names.len()
            )));
        }
        if config.win_length == 0 {
            return Err(GameError::InvalidArgument(
                "winning line length must be positive".into(),
            ));
        }

        let field = GameField::new(config.width, config.height)?;
        let players: Vec<Player> = config
            .player_names
            .iter()
            .enumerate()
            .map(|(i, name)| Player::new(i as PlayerId, name.clone()))
            .collect();
        let turns = TurnManager::new(&players, config.pass_limit)?;

        Ok(Self {
            field,
            players,
            turns,
            factory: LabelFactory,
            initializer,
            config,
            secret_mode: false,
            phase: GamePhase::Idle,
        })
    }

    // ==================== Queries ====================

    /// The game field.
    pub fn field(&self) -> &GameField {
        &self.field
    }

    /// All players in rotation order.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Look up a player by id.
    pub fn get_player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id as usize)
    }

    /// The player whose turn is active.
    pub fn active_player(&self) -> &Player {
        &self.players[self.turns.active_player() as usize]
    }

    /// The active player's currently selected label kind.
    pub fn active_label_kind(&self) -> LabelKind {
        self.turns.active_label_kind()
    }

    /// Whether newly issued labels are secret-wrapped.
    pub fn secret_mode_enabled(&self) -> bool {
        self.secret_mode
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Whether the game has finished.
    pub fn is_finished(&self) -> bool {
        matches!(self.phase, GamePhase::Finished { .. })
    }

    /// The winner, if the game has finished.
    pub fn winner(&self) -> Option<PlayerId> {
        match self.phase {
            GamePhase::Finished { winner } => Some(winner),
            _ => None,
        }
    }

    /// Remaining passes for `player`; 0 for an unknown player.
    pub fn passes_left_for(&self, player: PlayerId) -> u32 {
        self.turns.passes_left_for(player)
    }

    /// The configuration this model was built with.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Row-major read-model of the board for rendering or transport.
    pub fn snapshot(&self) -> FieldSnapshot {
        let finished = self.is_finished();
        let mut labels = Vec::new();
        for row in 1..=self.field.height() {
            for col in 1..=self.field.width() {
                let pos = Position::new(col, row);
                if let Some(label) = self.field.label(pos) {
                    let face_reveals_owner =
                        !label.is_secret() && label.kind() != LabelKind::Hidden;
                    labels.push(PlacedLabel {
                        position: pos,
                        symbol: label.symbol().to_string(),
                        placed_by: label.placed_by(),
                        owner: (finished || face_reveals_owner).then(|| label.owner()),
                    });
                }
            }
        }
        FieldSnapshot {
            width: self.field.width(),
            height: self.field.height(),
            labels,
        }
    }

    // ==================== Commands ====================

    /// Start a new game: rebuild the board, reset budgets and
    /// preferences, and issue the first label.
    pub fn start(&mut self) -> Result<Vec<GameEvent>, GameError> {
        self.initializer.prepare(&mut self.field)?;
        self.turns.reset_for_new_game();
        for player in &mut self.players {
            let _ = player.take_active_label();
        }
        self.phase = GamePhase::AwaitingPlacement;

        let mut events = Vec::new();
        self.exchange_turn(&mut events)?;
        Ok(events)
    }

    /// Place the active player's label at `pos`.
    ///
    /// A secret label is revealed and re-stamped with the placing player
    /// before insertion; the field receives the revealed label, not the
    /// wrapper. A winning line finishes the game, otherwise the turn is
    /// exchanged.
    pub fn place_label(&mut self, pos: Position) -> Result<Vec<GameEvent>, GameError> {
        self.require_awaiting()?;
        let active_id = self.turns.active_player();
        let held = self.players[active_id as usize]
            .active_label()
            .ok_or_else(|| {
                GameError::InvalidState("active player holds no label".into())
            })?;
        self.field.can_place(pos, held)?;

        let mut label = self.players[active_id as usize].take_active_label()?;
        label = label.reveal();
        label.stamp_placed_by(active_id);
        self.field.set_label(pos, label)?;

        // Report the label as it now sits on the field, cell link included.
        let placed = self
            .field
            .label(pos)
            .cloned()
            .ok_or_else(|| GameError::InvalidState(format!("placement at {} left no label", pos)))?;
        let mut events = vec![GameEvent::LabelPlaced {
            player: active_id,
            label: placed,
        }];
        match self.determine_winner() {
            Some(winner) => {
                self.phase = GamePhase::Finished { winner };
                events.push(GameEvent::GameFinished { winner });
            }
            None => self.exchange_turn(&mut events)?,
        }
        Ok(events)
    }

    /// Forfeit the turn without placing.
    ///
    /// The withdrawn label is discarded, one pass is consumed, and the
    /// next player receives a fresh label built from their own stored
    /// preference.
    pub fn pass_turn(&mut self) -> Result<Vec<GameEvent>, GameError> {
        self.require_awaiting()?;
        let active_id = self.turns.active_player();
        if self.players[active_id as usize].active_label().is_none() {
            return Err(GameError::InvalidState(
                "cannot pass without an active label".into(),
            ));
        }
        if self.turns.passes_left_for(active_id) == 0 {
            return Err(GameError::InvalidState("pass budget is exhausted".into()));
        }

        let _discarded = self.players[active_id as usize].take_active_label()?;
        self.turns.consume_pass_of_active()?;

        let mut events = Vec::new();
        self.exchange_turn(&mut events)?;
        Ok(events)
    }

    /// Select the label kind for the active player and re-issue their
    /// label immediately. The choice is remembered for that player only.
    pub fn set_active_label_kind(&mut self, kind: LabelKind) -> Result<Vec<GameEvent>, GameError> {
        self.require_awaiting()?;
        self.turns.set_active_label_kind(kind);

        let mut events = Vec::new();
        self.issue_active_label(&mut events)?;
        Ok(events)
    }

    /// Toggle secrecy mode. If a turn is in progress the active player's
    /// label is re-issued with the new face.
    pub fn set_secret_mode_enabled(&mut self, enabled: bool) -> Result<Vec<GameEvent>, GameError> {
        self.secret_mode = enabled;

        let mut events = Vec::new();
        if matches!(self.phase, GamePhase::AwaitingPlacement) {
            self.issue_active_label(&mut events)?;
        }
        Ok(events)
    }

    // ==================== Internals ====================

    fn require_awaiting(&self) -> Result<(), GameError> {
        match self.phase {
            GamePhase::AwaitingPlacement => Ok(()),
            GamePhase::Idle => Err(GameError::InvalidState(
                "the game has not been started".into(),
            )),
            GamePhase::Finished { .. } => {
                Err(GameError::InvalidState("the game is already finished".into()))
            }
        }
    }

    /// Advance the rotation, issue a label to the new active player, and
    /// announce the turn change.
    fn exchange_turn(&mut self, events: &mut Vec<GameEvent>) -> Result<(), GameError> {
        self.turns.advance_to_next_player();
        self.issue_active_label(events)?;
        events.push(GameEvent::TurnChanged {
            player: self.turns.active_player(),
        });
        Ok(())
    }

    /// Build a fresh label for the active player from their stored kind
    /// and the secrecy flag, replacing any unplaced one.
    fn issue_active_label(&mut self, events: &mut Vec<GameEvent>) -> Result<(), GameError> {
        let active_id = self.turns.active_player();
        let kind = self.turns.active_label_kind();
        let label = {
            let current = &self.players[active_id as usize];
            let opponent = self.opponent_of(active_id);
            if self.secret_mode {
                self.factory.create_secret(current, opponent, kind)?
            } else {
                self.factory.create_for(current, opponent, kind)?
            }
        };
        self.players[active_id as usize].set_active_label(label.clone());
        events.push(GameEvent::LabelReceived {
            player: active_id,
            label,
        });
        Ok(())
    }

    fn opponent_of(&self, id: PlayerId) -> &Player {
        self.players
            .iter()
            .find(|p| p.id() != id)
            .unwrap_or(&self.players[0])
    }

    /// Scan every cell in row-major order, rotating through all eight
    /// directions; the first line reaching the winning length decides.
    /// Lines are deliberately rescanned from every start, which keeps the
    /// walk trivial and preserves first-found-winner semantics.
    fn determine_winner(&self) -> Option<PlayerId> {
        for row in 1..=self.field.height() {
            for col in 1..=self.field.width() {
                let start = Position::new(col, row);
                for direction in Direction::ALL {
                    let line = self.field.label_line(start, direction);
                    if line.len() >= self.config.win_length {
                        return Some(line[0].owner());
                    }
                }
            }
        }
        None
    }
}
