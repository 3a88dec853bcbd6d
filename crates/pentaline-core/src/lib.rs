//! Pentaline - a five-in-a-row engine with trick labels
//!
//! This crate provides the rules engine for a two-player marking game on
//! a rectangular grid: players alternately receive a label to place, and
//! the first straight line of five same-owner labels (in any of eight
//! directions) wins. Labels come in three kinds - normal, delegated to
//! the opponent, and hidden - and a secrecy mode disguises the kind in
//! play until the moment of placement. Each player may also pass a
//! limited number of turns.
//!
//! The engine is view-agnostic: every mutating command returns the
//! ordered [`GameEvent`]s it produced, and a rendering layer drives the
//! model purely through commands and those events.
//!
//! # Modules
//!
//! - [`direction`]: compass octants and grid displacements
//! - [`field`]: positions, cells, the game field, and board setup
//! - [`label`]: label variants, secrecy faces, and the label factory
//! - [`player`]: player identity and the active label
//! - [`turn`]: turn rotation, pass budgets, and kind preferences
//! - [`events`]: notifications produced by commands
//! - [`game`]: the top-level model, configuration, and errors

pub mod direction;
pub mod events;
pub mod field;
pub mod game;
pub mod label;
pub mod player;
pub mod turn;

// Re-export commonly used types
pub use direction::{Direction, Shift};
pub use events::GameEvent;
pub use field::{Cell, FieldInitializer, GameField, GridInitializer, Position};
pub use game::{FieldSnapshot, GameConfig, GameError, GameModel, GamePhase, PlacedLabel};
pub use label::{Label, LabelFactory, LabelKind, LabelVariant, HIDDEN_MASK, SECRET_MASK};
pub use player::{Player, PlayerId};
pub use turn::TurnManager;
