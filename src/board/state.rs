//! Board occupancy.
//!
//! Holds the piece standing on every cell of a rectangular grid. Cells are
//! stored row-major in a flat vector so that lookup is O(1) and the whole
//! board is cheap to clone for restarts.

use super::location::Location;
use super::piece::{Color, Piece, PieceLocation, PieceType};

/// Occupancy of every cell in `[0, width) x [0, height)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: i32,
    height: i32,
    /// Piece at each cell, row-major: index = x + y * width.
    cells: Vec<Option<Piece>>,
}

impl Board {
    /// Creates a board with every cell empty.
    pub fn empty(width: i32, height: i32) -> Self {
        let len = (width.max(0) as usize) * (height.max(0) as usize);
        Board {
            width,
            height,
            cells: vec![None; len],
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Returns true if `location` lies on the board.
    pub fn contains(&self, location: Location) -> bool {
        (0..self.width).contains(&location.x) && (0..self.height).contains(&location.y)
    }

    fn index(&self, location: Location) -> Option<usize> {
        if self.contains(location) {
            // Both coordinates are non-negative here.
            Some(location.x as usize + location.y as usize * self.width as usize)
        } else {
            None
        }
    }

    /// Returns the piece at `location`, or `None` if empty or off the board.
    pub fn get(&self, location: Location) -> Option<Piece> {
        self.index(location).and_then(|i| self.cells[i])
    }

    /// Returns true if `location` is on the board and holds no piece.
    pub fn is_empty(&self, location: Location) -> bool {
        self.index(location).is_some_and(|i| self.cells[i].is_none())
    }

    /// Places a piece on an empty cell. Returns false if the cell is occupied
    /// or off the board.
    pub fn place(&mut self, location: Location, piece: Piece) -> bool {
        match self.index(location) {
            Some(i) if self.cells[i].is_none() => {
                self.cells[i] = Some(piece);
                true
            }
            _ => false,
        }
    }

    /// Writes a piece to a cell, replacing whatever stood there. Returns false
    /// if the cell is off the board.
    pub fn set(&mut self, location: Location, piece: Piece) -> bool {
        match self.index(location) {
            Some(i) => {
                self.cells[i] = Some(piece);
                true
            }
            None => false,
        }
    }

    /// Empties a cell and returns what stood there.
    pub fn remove(&mut self, location: Location) -> Option<Piece> {
        self.index(location).and_then(|i| self.cells[i].take())
    }

    /// Moves the piece at `from` onto `to`, replacing any occupant of `to`.
    /// Returns the moved piece, or `None` if `from` was empty.
    pub fn relocate(&mut self, from: Location, to: Location) -> Option<Piece> {
        let piece = self.remove(from)?;
        self.set(to, piece);
        Some(piece)
    }

    /// Iterates over every occupied cell, terrain included.
    pub fn pieces(&self) -> impl Iterator<Item = PieceLocation> + '_ {
        let width = self.width.max(1) as usize;
        self.cells.iter().enumerate().filter_map(move |(i, cell)| {
            cell.map(|piece| {
                let (x, y) = (i % width, i / width);
                PieceLocation::new(piece, Location::new(x as i32, y as i32))
            })
        })
    }

    /// Counts the pieces of `color` for which `filter` holds.
    pub fn count(&self, color: Color, filter: impl Fn(PieceType) -> bool) -> u32 {
        self.cells
            .iter()
            .flatten()
            .filter(|p| p.is_owned_by(color) && filter(p.piece_type))
            .count() as u32
    }

    /// Counts the owned pieces of both sides.
    pub fn pieces_in_play(&self) -> u32 {
        self.cells.iter().flatten().filter(|p| p.owner.is_some()).count() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn red(pt: PieceType) -> Piece {
        Piece::new(pt, Color::Red)
    }

    #[test]
    fn empty_board_has_every_cell_empty() {
        let board = Board::empty(6, 6);
        for y in 0..6 {
            for x in 0..6 {
                assert!(board.is_empty(Location::new(x, y)));
            }
        }
        assert_eq!(board.pieces().count(), 0);
    }

    #[test]
    fn bounds() {
        let board = Board::empty(10, 10);
        assert!(board.contains(Location::new(0, 0)));
        assert!(board.contains(Location::new(9, 9)));
        assert!(!board.contains(Location::new(10, 0)));
        assert!(!board.contains(Location::new(0, -1)));
        assert!(!board.is_empty(Location::new(-1, 3)));
        assert_eq!(board.get(Location::new(42, 42)), None);
    }

    #[test]
    fn place_rejects_occupied_cell() {
        let mut board = Board::empty(3, 3);
        let loc = Location::new(1, 2);
        assert!(board.place(loc, red(PieceType::Spy)));
        assert!(!board.place(loc, red(PieceType::Scout)));
        assert_eq!(board.get(loc), Some(red(PieceType::Spy)));
    }

    #[test]
    fn relocate_overwrites_destination() {
        let mut board = Board::empty(3, 3);
        board.place(Location::new(0, 0), red(PieceType::Marshal));
        board.place(Location::new(0, 1), Piece::new(PieceType::Spy, Color::Blue));
        let moved = board.relocate(Location::new(0, 0), Location::new(0, 1));
        assert_eq!(moved, Some(red(PieceType::Marshal)));
        assert!(board.is_empty(Location::new(0, 0)));
        assert_eq!(board.get(Location::new(0, 1)), Some(red(PieceType::Marshal)));
        assert_eq!(board.relocate(Location::new(2, 2), Location::new(1, 1)), None);
    }

    #[test]
    fn pieces_reports_row_major_locations() {
        let mut board = Board::empty(4, 2);
        board.place(Location::new(3, 1), red(PieceType::Flag));
        board.set(Location::new(1, 0), Piece::terrain());
        let found: Vec<_> = board.pieces().collect();
        assert_eq!(
            found,
            vec![
                PieceLocation::new(Piece::terrain(), Location::new(1, 0)),
                PieceLocation::new(red(PieceType::Flag), Location::new(3, 1)),
            ]
        );
    }

    #[test]
    fn count_filters_by_owner_and_type() {
        let mut board = Board::empty(3, 3);
        board.place(Location::new(0, 0), red(PieceType::Flag));
        board.place(Location::new(1, 0), red(PieceType::Scout));
        board.place(Location::new(2, 0), Piece::new(PieceType::Scout, Color::Blue));
        board.place(Location::new(0, 1), Piece::terrain());
        assert_eq!(board.count(Color::Red, PieceType::is_movable), 1);
        assert_eq!(board.count(Color::Red, |_| true), 2);
        assert_eq!(board.count(Color::Blue, |pt| pt == PieceType::Scout), 1);
        assert_eq!(board.pieces_in_play(), 3);
    }
}
