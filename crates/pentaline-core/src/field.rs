//! The game field: a sparse grid of cells keyed by position.
//!
//! This module contains:
//! - `Position`: 1-based (column, row) grid coordinate
//! - `Cell`: a grid slot holding at most one label
//! - `GameField`: cell lifecycle, bounds checking, and the directional
//!   line scan used for win detection
//! - `FieldInitializer`: injectable board-setup strategy, with the
//!   rectangular `GridInitializer` as the default
//!
//! The Cell <-> Label relation is bidirectional: the cell owns the label
//! value, and the label carries the position of its cell. Both sides are
//! mutated only through `place_label` / `remove_label`, so they cannot
//! drift apart.

use crate::direction::{Direction, Shift};
use crate::game::GameError;
use crate::label::Label;
use crate::player::PlayerId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// A 1-based (column, row) coordinate on the field.
///
/// Row 1 is the top row, column 1 the leftmost column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Column, 1-based
    pub col: i32,
    /// Row, 1-based
    pub row: i32,
}

impl Position {
    /// Create a new position
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    /// The position reached by applying `shift` once.
    pub const fn translated(self, shift: Shift) -> Self {
        Self::new(self.col + shift.dx, self.row + shift.dy)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.col, self.row)
    }
}

/// A grid slot holding a position and at most one label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    position: Position,
    label: Option<Label>,
}

impl Cell {
    /// Create an empty cell at `position`.
    pub fn new(position: Position) -> Self {
        Self {
            position,
            label: None,
        }
    }

    /// The cell's coordinate. Returned by value; mutating the result
    /// cannot move the cell.
    pub fn position(&self) -> Position {
        self.position
    }

    /// The label occupying this cell, if any.
    pub fn label(&self) -> Option<&Label> {
        self.label.as_ref()
    }

    /// Whether no label is bound to this cell.
    pub fn is_empty(&self) -> bool {
        self.label.is_none()
    }

    /// Bind `label` to this cell, establishing the two-way link.
    ///
    /// Fails with `InvalidState` if the cell is occupied or the label is
    /// already bound to a different cell.
    pub fn place_label(&mut self, mut label: Label) -> Result<(), GameError> {
        if self.label.is_some() {
            return Err(GameError::InvalidState(format!(
                "cell {} is already occupied",
                self.position
            )));
        }
        if let Some(bound) = label.cell() {
            if bound != self.position {
                return Err(GameError::InvalidState(format!(
                    "label is already placed at {}",
                    bound
                )));
            }
        }
        label.bind_cell(self.position);
        self.label = Some(label);
        Ok(())
    }

    /// Clear both sides of the link. Idempotent; returns the unbound
    /// label if one was present.
    pub fn remove_label(&mut self) -> Option<Label> {
        let mut label = self.label.take()?;
        label.unbind_cell();
        Some(label)
    }

    pub(crate) fn rebind(&mut self, position: Position) {
        self.position = position;
        if let Some(label) = self.label.as_mut() {
            label.bind_cell(position);
        }
    }
}

/// A sparse rectangular grid of cells.
///
/// Every stored cell lies within `1..=width` x `1..=height`; resizing
/// evicts cells outside the new bounds, silently discarding their labels.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameField {
    width: i32,
    height: i32,
    cells: HashMap<Position, Cell>,
}

impl GameField {
    /// Create an empty field of the given dimensions.
    ///
    /// Fails with `InvalidArgument` if either dimension is non-positive.
    pub fn new(width: i32, height: i32) -> Result<Self, GameError> {
        let mut field = Self {
            width: 0,
            height: 0,
            cells: HashMap::new(),
        };
        field.set_size(width, height)?;
        Ok(field)
    }

    /// Field width in columns.
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Field height in rows.
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Resize the field, evicting any cell outside the new bounds.
    pub fn set_size(&mut self, width: i32, height: i32) -> Result<(), GameError> {
        if width <= 0 || height <= 0 {
            return Err(GameError::InvalidArgument(format!(
                "field dimensions must be positive, got {}x{}",
                width, height
            )));
        }
        self.width = width;
        self.height = height;
        self.cells
            .retain(|pos, _| pos.col >= 1 && pos.col <= width && pos.row >= 1 && pos.row <= height);
        Ok(())
    }

    /// Inclusive boundary predicate.
    pub fn contains_range(&self, pos: Position) -> bool {
        pos.col >= 1 && pos.col <= self.width && pos.row >= 1 && pos.row <= self.height
    }

    /// Put `cell` at `pos`, replacing any existing cell there. The cell
    /// is rebound to `pos` regardless of the coordinate it carried.
    pub fn set_cell(&mut self, pos: Position, mut cell: Cell) {
        cell.rebind(pos);
        self.cells.insert(pos, cell);
    }

    /// Remove every cell from the field.
    pub fn clear(&mut self) {
        self.cells.clear();
    }

    /// The cell at `pos`, if one was created there.
    pub fn cell(&self, pos: Position) -> Option<&Cell> {
        self.cells.get(&pos)
    }

    /// The label at `pos`, or `None` if the cell is absent or empty.
    pub fn label(&self, pos: Position) -> Option<&Label> {
        self.cells.get(&pos).and_then(|cell| cell.label())
    }

    /// Snapshot of all currently placed labels, in no particular order.
    pub fn labels(&self) -> Vec<&Label> {
        self.cells.values().filter_map(|cell| cell.label()).collect()
    }

    /// All placed labels scoring for `player`.
    pub fn labels_owned_by(&self, player: PlayerId) -> Vec<&Label> {
        self.cells
            .values()
            .filter_map(|cell| cell.label())
            .filter(|label| label.owner() == player)
            .collect()
    }

    /// Check that `label` could be placed at `pos` without mutating
    /// anything. `set_label` performs exactly these checks first, so a
    /// caller that validates up front sees all-or-nothing behavior.
    pub fn can_place(&self, pos: Position, label: &Label) -> Result<(), GameError> {
        if !self.contains_range(pos) {
            return Err(GameError::OutOfRange(pos));
        }
        let cell = self.cells.get(&pos).ok_or_else(|| {
            GameError::InvalidState(format!("no cell was created at {}", pos))
        })?;
        if let Some(bound) = label.cell() {
            if bound != pos {
                return Err(GameError::InvalidState(format!(
                    "label is already placed at {}",
                    bound
                )));
            }
        }
        if !cell.is_empty() {
            return Err(GameError::InvalidState(format!(
                "cell {} is already occupied",
                pos
            )));
        }
        Ok(())
    }

    /// Place `label` at `pos`, establishing the bidirectional link.
    pub fn set_label(&mut self, pos: Position, label: Label) -> Result<(), GameError> {
        self.can_place(pos, &label)?;
        let cell = self.cells.get_mut(&pos).ok_or_else(|| {
            GameError::InvalidState(format!("no cell was created at {}", pos))
        })?;
        cell.place_label(label)
    }

    /// Unbind and return the label at `pos`, if any. Idempotent.
    pub fn remove_label(&mut self, pos: Position) -> Option<Label> {
        self.cells.get_mut(&pos).and_then(|cell| cell.remove_label())
    }

    /// Maximal run of same-owner labels starting at `start` and advancing
    /// by `direction`, stopping at the first empty, out-of-range, or
    /// differently-owned position. Empty start yields an empty line.
    pub fn label_line(&self, start: Position, direction: Direction) -> Vec<&Label> {
        let mut line = Vec::new();
        let first = match self.label(start) {
            Some(label) => label,
            None => return line,
        };
        let owner = first.owner();
        line.push(first);

        let shift = direction.shift();
        let mut pos = start.translated(shift);
        while self.contains_range(pos) {
            match self.label(pos) {
                Some(label) if label.owner() == owner => line.push(label),
                _ => break,
            }
            pos = pos.translated(shift);
        }
        line
    }
}

/// Board-setup strategy, invoked on every new game.
///
/// The default fills the whole rectangle with cells; alternative
/// implementations may produce other board shapes.
pub trait FieldInitializer {
    /// Prepare `field` for a fresh game.
    fn prepare(&self, field: &mut GameField) -> Result<(), GameError>;
}

/// Fills a `width` x `height` rectangle with empty cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridInitializer {
    width: i32,
    height: i32,
}

impl GridInitializer {
    /// Create an initializer for the given dimensions.
    pub fn new(width: i32, height: i32) -> Result<Self, GameError> {
        if width <= 0 || height <= 0 {
            return Err(GameError::InvalidArgument(format!(
                "grid dimensions must be positive, got {}x{}",
                width, height
            )));
        }
        Ok(Self { width, height })
    }
}

impl FieldInitializer for GridInitializer {
    fn prepare(&self, field: &mut GameField) -> Result<(), GameError> {
        field.clear();
        field.set_size(self.width, self.height)?;
        for row in 1..=self.height {
            for col in 1..=self.width {
                let pos = Position::new(col, row);
                field.set_cell(pos, Cell::new(pos));
            }
        }
        Ok(())
    }
}
