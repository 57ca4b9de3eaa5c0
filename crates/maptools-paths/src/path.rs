use std::fmt;

use maptools_core::{Direction, Position};
use rust_decimal::Decimal;

use crate::cost::step_cost;

/// A route from a fixed start position to its current end.
///
/// Paths are values: [`StepPath::step`] derives a new path one step longer
/// and leaves the source untouched. `visited` lists every position entered
/// after `start`, so its last element is `end` for any non-empty path.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StepPath {
    start: Position,
    end: Position,
    distance: Decimal,
    visited: Vec<Position>,
}

impl StepPath {
    /// A zero-length path sitting on `start`.
    pub fn new(start: Position) -> Self {
        Self {
            start,
            end: start,
            distance: Decimal::ZERO,
            visited: Vec::new(),
        }
    }

    /// Where the path begins.
    #[inline]
    pub fn start(&self) -> Position {
        self.start
    }

    /// Where the path currently ends.
    #[inline]
    pub fn end(&self) -> Position {
        self.end
    }

    /// Cumulative cost of every step taken.
    #[inline]
    pub fn distance(&self) -> Decimal {
        self.distance
    }

    /// Positions entered after `start`, in order.
    #[inline]
    pub fn visited(&self) -> &[Position] {
        &self.visited
    }

    /// Number of steps taken.
    #[inline]
    pub fn len(&self) -> usize {
        self.visited.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.visited.is_empty()
    }

    /// Derive the path extended by one step in `dir`.
    pub fn step(&self, dir: Direction) -> StepPath {
        let end = self.end.step(dir);
        let mut visited = Vec::with_capacity(self.visited.len() + 1);
        visited.extend_from_slice(&self.visited);
        visited.push(end);
        StepPath {
            start: self.start,
            end,
            distance: self.distance + step_cost(dir),
            visited,
        }
    }

    /// The eight one-step extensions, in [`Direction::ALL`] order.
    pub fn neighbors(&self) -> [StepPath; 8] {
        Direction::ALL.map(|d| self.step(d))
    }
}

impl fmt::Display for StepPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} => {} : {}", self.start, self.end, self.distance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DIAGONAL_COST, STRAIGHT_COST};

    #[test]
    fn new_path_sits_on_start() {
        let start = Position::new(1, 1, 1);
        let p = StepPath::new(start);
        assert_eq!(p.start(), start);
        assert_eq!(p.end(), start);
        assert_eq!(p.distance(), Decimal::ZERO);
        assert!(p.visited().is_empty());
        assert!(p.is_empty());
    }

    #[test]
    fn step_leaves_source_untouched() {
        let start = Position::new(0, 0, 2);
        let root = StepPath::new(start);
        let one = root.step(Direction::North);
        let two = one.step(Direction::NorthEast);

        assert_eq!(root, StepPath::new(start));
        assert_eq!(one.visited(), &[Position::new(0, 1, 2)]);
        assert_eq!(one.distance(), STRAIGHT_COST);

        assert_eq!(two.start(), start);
        assert_eq!(two.end(), Position::new(1, 2, 2));
        assert_eq!(two.visited(), &[Position::new(0, 1, 2), Position::new(1, 2, 2)]);
        assert_eq!(two.distance(), STRAIGHT_COST + DIAGONAL_COST);
        assert_eq!(two.len(), 2);
    }

    #[test]
    fn distance_never_decreases() {
        let mut p = StepPath::new(Position::ZERO);
        for d in Direction::ALL.into_iter().cycle().take(20) {
            let next = p.step(d);
            assert!(next.distance() > p.distance());
            assert_eq!(next.visited().last(), Some(&next.end()));
            p = next;
        }
    }

    #[test]
    fn neighbors_cover_all_directions() {
        let root = StepPath::new(Position::new(3, 3, 0));
        let ns = root.neighbors();
        for (n, d) in ns.iter().zip(Direction::ALL) {
            assert_eq!(n.end(), Position::new(3, 3, 0).step(d));
            assert_eq!(n.distance(), step_cost(d));
            assert_eq!(n.visited(), &[n.end()]);
        }
        let straight = ns.iter().filter(|n| n.distance() == STRAIGHT_COST).count();
        assert_eq!(straight, 4);
    }

    #[test]
    fn display_format() {
        let p = StepPath::new(Position::new(0, 0, 0))
            .step(Direction::East)
            .step(Direction::SouthEast);
        assert_eq!(p.to_string(), "{x:0,y:0,z:0} => {x:2,y:-1,z:0} : 2.4142");
    }
}
