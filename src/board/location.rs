//! Board coordinates.
//!
//! A `Location` is a plain `(x, y)` pair. Coordinates are signed so that
//! off-board requests can be represented and rejected by the validator
//! instead of being unrepresentable.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A cell on the board, addressed by column `x` and row `y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Location {
    pub x: i32,
    pub y: i32,
}

impl Location {
    /// Creates a location from its column and row.
    pub const fn new(x: i32, y: i32) -> Self {
        Location { x, y }
    }

    /// Returns the number of cells between `self` and `other` along a single axis.
    ///
    /// Returns `None` when the two locations share neither a row nor a column,
    /// i.e. when no straight orthogonal line connects them.
    pub fn distance_to(self, other: Location) -> Option<u32> {
        if self.x == other.x {
            Some(self.y.abs_diff(other.y))
        } else if self.y == other.y {
            Some(self.x.abs_diff(other.x))
        } else {
            None
        }
    }

    /// Returns the cells strictly between `self` and `other`, walking from `self`.
    ///
    /// Empty when the locations are adjacent, equal, or not on a straight line.
    pub fn between(self, other: Location) -> Vec<Location> {
        let Some(distance) = self.distance_to(other) else {
            return Vec::new();
        };
        let dx = (other.x - self.x).signum();
        let dy = (other.y - self.y).signum();
        (1..distance as i32)
            .map(|step| Location::new(self.x + dx * step, self.y + dy * step))
            .collect()
    }

    /// Returns the location offset by `(dx, dy)`.
    pub const fn offset(self, dx: i32, dy: i32) -> Location {
        Location::new(self.x + dx, self.y + dy)
    }

    /// Row-major position weight used by setup checksums: `x + y * width + 1`.
    pub fn position_weight(self, width: i32) -> i64 {
        i64::from(self.x) + i64::from(self.y) * i64::from(width) + 1
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_along_each_axis() {
        let origin = Location::new(3, 3);
        assert_eq!(origin.distance_to(Location::new(3, 7)), Some(4));
        assert_eq!(origin.distance_to(Location::new(0, 3)), Some(3));
        assert_eq!(origin.distance_to(origin), Some(0));
    }

    #[test]
    fn diagonal_has_no_distance() {
        assert_eq!(Location::new(0, 0).distance_to(Location::new(1, 1)), None);
        assert_eq!(Location::new(2, 5).distance_to(Location::new(4, 6)), None);
    }

    #[test]
    fn between_walks_from_source() {
        let cells = Location::new(1, 5).between(Location::new(1, 1));
        assert_eq!(
            cells,
            vec![Location::new(1, 4), Location::new(1, 3), Location::new(1, 2)]
        );
    }

    #[test]
    fn between_adjacent_or_diagonal_is_empty() {
        assert!(Location::new(0, 0).between(Location::new(0, 1)).is_empty());
        assert!(Location::new(0, 0).between(Location::new(2, 2)).is_empty());
    }

    #[test]
    fn position_weight_is_row_major() {
        assert_eq!(Location::new(0, 0).position_weight(6), 1);
        assert_eq!(Location::new(5, 5).position_weight(6), 36);
        assert_eq!(Location::new(9, 3).position_weight(10), 40);
    }
}
