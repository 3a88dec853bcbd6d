//! Compass directions on the rectangular grid.
//!
//! This module provides the geometric leaf types for the line scan:
//! - `Shift`: a 2D integer displacement
//! - `Direction`: one of the eight compass octants, with rotation queries
//!
//! Rows grow downward (row 1 is the top row), so `North` shifts toward
//! smaller row numbers.

use serde::{Deserialize, Serialize};

/// Displacement in grid coordinates, one step per axis at most.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Shift {
    /// Column delta (positive going east)
    pub dx: i32,
    /// Row delta (positive going south)
    pub dy: i32,
}

impl Shift {
    /// Create a new shift
    pub const fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }
}

/// One of the eight compass octants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    /// All eight directions in the order the win scan walks them:
    /// clockwise starting from North.
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    /// The unit displacement this direction advances by.
    pub const fn shift(self) -> Shift {
        match self {
            Direction::North => Shift::new(0, -1),
            Direction::NorthEast => Shift::new(1, -1),
            Direction::East => Shift::new(1, 0),
            Direction::SouthEast => Shift::new(1, 1),
            Direction::South => Shift::new(0, 1),
            Direction::SouthWest => Shift::new(-1, 1),
            Direction::West => Shift::new(-1, 0),
            Direction::NorthWest => Shift::new(-1, -1),
        }
    }

    /// The next octant rotating clockwise (45 degrees).
    pub const fn clockwise(self) -> Direction {
        match self {
            Direction::North => Direction::NorthEast,
            Direction::NorthEast => Direction::East,
            Direction::East => Direction::SouthEast,
            Direction::SouthEast => Direction::South,
            Direction::South => Direction::SouthWest,
            Direction::SouthWest => Direction::West,
            Direction::West => Direction::NorthWest,
            Direction::NorthWest => Direction::North,
        }
    }

    /// The next octant rotating counterclockwise (45 degrees).
    pub const fn anticlockwise(self) -> Direction {
        match self {
            Direction::North => Direction::NorthWest,
            Direction::NorthWest => Direction::West,
            Direction::West => Direction::SouthWest,
            Direction::SouthWest => Direction::South,
            Direction::South => Direction::SouthEast,
            Direction::SouthEast => Direction::East,
            Direction::East => Direction::NorthEast,
            Direction::NorthEast => Direction::North,
        }
    }

    /// The direction pointing the opposite way (180 degrees).
    pub const fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::NorthEast => Direction::SouthWest,
            Direction::East => Direction::West,
            Direction::SouthEast => Direction::NorthWest,
            Direction::South => Direction::North,
            Direction::SouthWest => Direction::NorthEast,
            Direction::West => Direction::East,
            Direction::NorthWest => Direction::SouthEast,
        }
    }

    /// Whether `other` points the opposite way.
    pub fn is_opposite(self, other: Direction) -> bool {
        self.opposite() == other
    }
}
