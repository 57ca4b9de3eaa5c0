//! Geometry primitives: [`Position`] and [`Direction`].

use std::fmt;
use std::ops::{Add, Sub};

// ---------------------------------------------------------------------------
// Direction
// ---------------------------------------------------------------------------

/// One of the eight compass directions on a grid layer.
///
/// North grows `y`, East grows `x`. The `z` axis is never touched.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    North,
    South,
    East,
    West,
    NorthWest,
    NorthEast,
    SouthWest,
    SouthEast,
}

impl Direction {
    /// All directions, orthogonal first, in the canonical enumeration order.
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
        Direction::NorthWest,
        Direction::NorthEast,
        Direction::SouthWest,
        Direction::SouthEast,
    ];

    /// The `(dx, dy)` offset of a single step in this direction.
    #[inline]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Direction::North => (0, 1),
            Direction::South => (0, -1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
            Direction::NorthWest => (-1, 1),
            Direction::NorthEast => (1, 1),
            Direction::SouthWest => (-1, -1),
            Direction::SouthEast => (1, -1),
        }
    }

    /// Whether a step in this direction moves along both axes.
    #[inline]
    pub const fn is_diagonal(self) -> bool {
        matches!(
            self,
            Direction::NorthWest
                | Direction::NorthEast
                | Direction::SouthWest
                | Direction::SouthEast
        )
    }
}

// ---------------------------------------------------------------------------
// Position
// ---------------------------------------------------------------------------

/// A cell on a layered grid.
///
/// Equality and hashing are structural. The derived ordering is
/// lexicographic on `(x, y, z)`; it exists so callers can sort results
/// deterministically and carries no meaning for movement.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Position {
    /// Origin (0, 0, 0).
    pub const ZERO: Self = Self { x: 0, y: 0, z: 0 };

    /// Create a new position.
    #[inline]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Return a position shifted by (dx, dy) on the same layer.
    ///
    /// Coordinates wrap at the `i32` bounds, so stepping past `i32::MAX`
    /// lands on `i32::MIN`.
    #[inline]
    pub const fn shift(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.wrapping_add(dx),
            y: self.y.wrapping_add(dy),
            z: self.z,
        }
    }

    /// The adjacent position one step in `dir`.
    #[inline]
    pub const fn step(self, dir: Direction) -> Self {
        let (dx, dy) = dir.offset();
        self.shift(dx, dy)
    }

    #[inline]
    pub const fn north(self) -> Self {
        self.step(Direction::North)
    }

    #[inline]
    pub const fn south(self) -> Self {
        self.step(Direction::South)
    }

    #[inline]
    pub const fn east(self) -> Self {
        self.step(Direction::East)
    }

    #[inline]
    pub const fn west(self) -> Self {
        self.step(Direction::West)
    }

    #[inline]
    pub const fn north_west(self) -> Self {
        self.step(Direction::NorthWest)
    }

    #[inline]
    pub const fn north_east(self) -> Self {
        self.step(Direction::NorthEast)
    }

    #[inline]
    pub const fn south_west(self) -> Self {
        self.step(Direction::SouthWest)
    }

    #[inline]
    pub const fn south_east(self) -> Self {
        self.step(Direction::SouthEast)
    }

    /// All eight neighbours, in [`Direction::ALL`] order.
    #[inline]
    pub fn neighbors_8(self) -> [Position; 8] {
        Direction::ALL.map(|d| self.step(d))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{x:{},y:{},z:{}}}", self.x, self.y, self.z)
    }
}

impl Add for Position {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(
            self.x.wrapping_add(rhs.x),
            self.y.wrapping_add(rhs.y),
            self.z.wrapping_add(rhs.z),
        )
    }
}

impl Sub for Position {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(
            self.x.wrapping_sub(rhs.x),
            self.y.wrapping_sub(rhs.y),
            self.z.wrapping_sub(rhs.z),
        )
    }
}

impl From<(i32, i32, i32)> for Position {
    fn from((x, y, z): (i32, i32, i32)) -> Self {
        Self::new(x, y, z)
    }
}
