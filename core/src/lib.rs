#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the maze solver workspace.
//!
//! This crate defines the value types that connect the authoritative maze
//! (`maze-solver-world`), the driver system and the adapters. The maze
//! performs one state transition per step call and reports it as a
//! [`GenerationStep`] or [`SolutionStep`]; adapters consume those results to
//! redraw only what changed. Contract violations surface as [`MazeError`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Integer position in drawing space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    x: i32,
    y: i32,
}

impl Point {
    /// Creates a new point from its coordinates.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Horizontal coordinate.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Vertical coordinate, growing downwards.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Returns the point translated by the provided deltas.
    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Ordered segment between two points.
///
/// Equality is order-sensitive: `Line::new(a, b)` and `Line::new(b, a)` are
/// different lines.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Line {
    a: Point,
    b: Point,
}

impl Line {
    /// Creates a segment running from `a` to `b`.
    #[must_use]
    pub const fn new(a: Point, b: Point) -> Self {
        Self { a, b }
    }

    /// First endpoint.
    #[must_use]
    pub const fn a(&self) -> Point {
        self.a
    }

    /// Second endpoint.
    #[must_use]
    pub const fn b(&self) -> Point {
        self.b
    }
}

/// One of the four walls surrounding a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Side {
    /// Wall facing decreasing column indices.
    Left,
    /// Wall facing increasing column indices.
    Right,
    /// Wall facing decreasing row indices.
    Top,
    /// Wall facing increasing row indices.
    Bottom,
}

/// Matching wall pairs between a cell and its neighbour.
///
/// Each entry reads "the first side of one cell touches the second side of the
/// other". Carving and reachability both walk this table.
pub const SIDE_PAIRS: [(Side, Side); 4] = [
    (Side::Left, Side::Right),
    (Side::Right, Side::Left),
    (Side::Top, Side::Bottom),
    (Side::Bottom, Side::Top),
];

impl Side {
    /// All sides in declaration order.
    pub const ALL: [Side; 4] = [Side::Left, Side::Right, Side::Top, Side::Bottom];

    /// Side that faces this one across a shared wall.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
            Self::Top => Self::Bottom,
            Self::Bottom => Self::Top,
        }
    }

    /// Dense index usable for per-side tables.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Left => 0,
            Self::Right => 1,
            Self::Top => 2,
            Self::Bottom => 3,
        }
    }
}

/// Location of a single grid cell expressed as row and column indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    row: u32,
    column: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(row: u32, column: u32) -> Self {
        Self { row, column }
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Neighbouring coordinates in scan order: up, down, left, right.
    ///
    /// Each neighbour is paired with the side of `self` that faces it.
    /// Neighbours that would underflow are skipped; upper bounds are the
    /// caller's concern.
    pub fn neighbors(self) -> impl Iterator<Item = (Side, CellCoord)> {
        let up = self
            .row
            .checked_sub(1)
            .map(|row| (Side::Top, Self::new(row, self.column)));
        let down = self
            .row
            .checked_add(1)
            .map(|row| (Side::Bottom, Self::new(row, self.column)));
        let left = self
            .column
            .checked_sub(1)
            .map(|column| (Side::Left, Self::new(self.row, column)));
        let right = self
            .column
            .checked_add(1)
            .map(|column| (Side::Right, Self::new(self.row, column)));
        [up, down, left, right].into_iter().flatten()
    }

    /// Side of `self` that borders `other`, if the two cells are grid neighbours.
    #[must_use]
    pub fn side_towards(self, other: CellCoord) -> Option<Side> {
        let row_diff = self.row.abs_diff(other.row);
        let column_diff = self.column.abs_diff(other.column);

        if row_diff + column_diff != 1 {
            return None;
        }

        if column_diff == 1 {
            if other.column > self.column {
                Some(Side::Right)
            } else {
                Some(Side::Left)
            }
        } else if other.row > self.row {
            Some(Side::Bottom)
        } else {
            Some(Side::Top)
        }
    }
}

/// Unit of progress reported by a single generation step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GenerationStep {
    /// A wall was removed between two neighbouring cells.
    Carved {
        /// Cell the carving walk stood on.
        from: CellCoord,
        /// Newly discovered cell the walk moved into.
        to: CellCoord,
        /// Side of `from` that was removed; `to` lost the opposite side.
        side: Side,
    },
    /// The walk hit a dead end and returned to an earlier cell.
    Backtracked {
        /// Cell the walk resumes from.
        to: CellCoord,
    },
    /// Every cell has been visited; generation is complete.
    Done,
}

/// Unit of progress reported by a single solution step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SolutionStep {
    /// The search extended its path by one cell.
    Advanced {
        /// Cell at the head of the path before the move.
        from: CellCoord,
        /// Cell pushed onto the path.
        to: CellCoord,
    },
    /// The search abandoned a dead end.
    Backtracked {
        /// Cell removed from the path.
        from: CellCoord,
        /// Cell that became the head of the path.
        to: CellCoord,
    },
    /// The head of the path reached the target.
    Found,
    /// The path emptied without reaching the target.
    Exhausted,
}

impl SolutionStep {
    /// Reports whether the search has reached a terminal outcome.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Found | Self::Exhausted)
    }
}

/// Contract violations reported by maze operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum MazeError {
    /// Rows, columns and cell size must all be positive and fit the drawing space.
    #[error("invalid maze dimensions: {rows} rows, {columns} columns, cell size {cell_size}")]
    InvalidDimensions {
        /// Requested row count.
        rows: i32,
        /// Requested column count.
        columns: i32,
        /// Requested cell edge length.
        cell_size: i32,
    },
    /// The requested cell lies outside the grid.
    #[error("cell ({row}, {column}) is outside the maze")]
    OutOfBounds {
        /// Requested row index.
        row: i64,
        /// Requested column index.
        column: i64,
    },
    /// The two cells do not share a wall.
    #[error("cells {from:?} and {to:?} are not neighbours")]
    NotAdjacent {
        /// First cell of the pair.
        from: CellCoord,
        /// Second cell of the pair.
        to: CellCoord,
    },
    /// Generation is in progress and must finish first.
    #[error("maze generation is still in progress")]
    AlreadyGenerating,
    /// Solving has begun; the maze no longer accepts this operation.
    #[error("maze solving has already begun")]
    AlreadySolving,
}

#[cfg(test)]
mod tests {
    use super::{CellCoord, Line, MazeError, Point, Side, SIDE_PAIRS};
    use serde::{de::DeserializeOwned, Serialize};

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn line_equality_is_order_sensitive() {
        let a = Point::new(0, 0);
        let b = Point::new(0, 30);
        assert_eq!(Line::new(a, b), Line::new(a, b));
        assert_ne!(Line::new(a, b), Line::new(b, a));
    }

    #[test]
    fn line_round_trips_through_bincode() {
        assert_round_trip(&Line::new(Point::new(10, 10), Point::new(40, 10)));
    }

    #[test]
    fn side_pairs_match_opposites() {
        for (side, facing) in SIDE_PAIRS {
            assert_eq!(side.opposite(), facing);
        }
    }

    #[test]
    fn side_indices_are_dense() {
        let indices: Vec<usize> = Side::ALL.iter().map(|side| side.index()).collect();
        assert_eq!(indices, vec![0, 1, 2, 3]);
    }

    #[test]
    fn neighbors_follow_up_down_left_right_order() {
        let neighbors: Vec<(Side, CellCoord)> = CellCoord::new(1, 1).neighbors().collect();
        assert_eq!(
            neighbors,
            vec![
                (Side::Top, CellCoord::new(0, 1)),
                (Side::Bottom, CellCoord::new(2, 1)),
                (Side::Left, CellCoord::new(1, 0)),
                (Side::Right, CellCoord::new(1, 2)),
            ]
        );
    }

    #[test]
    fn neighbors_skip_underflow() {
        let neighbors: Vec<CellCoord> = CellCoord::new(0, 0)
            .neighbors()
            .map(|(_, coord)| coord)
            .collect();
        assert_eq!(neighbors, vec![CellCoord::new(1, 0), CellCoord::new(0, 1)]);
    }

    #[test]
    fn neighbors_agree_with_side_towards() {
        let origin = CellCoord::new(3, 4);
        for (side, neighbor) in origin.neighbors() {
            assert_eq!(origin.side_towards(neighbor), Some(side));
        }
    }

    #[test]
    fn side_towards_requires_unit_distance() {
        let origin = CellCoord::new(2, 2);
        assert_eq!(origin.side_towards(CellCoord::new(1, 2)), Some(Side::Top));
        assert_eq!(origin.side_towards(CellCoord::new(3, 2)), Some(Side::Bottom));
        assert_eq!(origin.side_towards(CellCoord::new(2, 1)), Some(Side::Left));
        assert_eq!(origin.side_towards(CellCoord::new(2, 3)), Some(Side::Right));
        assert_eq!(origin.side_towards(CellCoord::new(3, 3)), None);
        assert_eq!(origin.side_towards(origin), None);
    }

    #[test]
    fn errors_render_human_readable_messages() {
        let error = MazeError::OutOfBounds { row: -1, column: 0 };
        assert_eq!(error.to_string(), "cell (-1, 0) is outside the maze");
    }
}
