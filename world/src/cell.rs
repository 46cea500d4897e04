//! Geometry and wall state of a single maze cell.

use maze_solver_core::{Line, Point, Side, SIDE_PAIRS};

/// Square cell with four walls, derived once from its top-left corner.
///
/// Wall segments are fixed for the lifetime of the cell and always run from
/// the top-left towards the bottom-right corner, so the shared edge of two
/// neighbouring cells yields equal [`Line`] values. Only the presence flags
/// and the visited marker change after construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    top_left: Point,
    top_right: Point,
    bottom_left: Point,
    bottom_right: Point,
    center: Point,
    cell_size: i32,
    walls: [Line; 4],
    present: [bool; 4],
    visited: bool,
}

impl Cell {
    /// Creates a fully walled cell anchored at `top_left`.
    #[must_use]
    pub fn new(top_left: Point, cell_size: i32) -> Self {
        let bottom_right = top_left.offset(cell_size, cell_size);
        let top_right = Point::new(bottom_right.x(), top_left.y());
        let bottom_left = Point::new(top_left.x(), bottom_right.y());
        let center = Point::new(
            (top_right.x() + top_left.x()).div_euclid(2),
            (bottom_right.y() + top_right.y()).div_euclid(2),
        );

        let mut walls = [Line::new(top_left, top_left); 4];
        walls[Side::Left.index()] = Line::new(top_left, bottom_left);
        walls[Side::Right.index()] = Line::new(top_right, bottom_right);
        walls[Side::Top.index()] = Line::new(top_left, top_right);
        walls[Side::Bottom.index()] = Line::new(bottom_left, bottom_right);

        Self {
            top_left,
            top_right,
            bottom_left,
            bottom_right,
            center,
            cell_size,
            walls,
            present: [true; 4],
            visited: false,
        }
    }

    /// Upper-left corner of the cell.
    #[must_use]
    pub const fn top_left(&self) -> Point {
        self.top_left
    }

    /// Upper-right corner of the cell.
    #[must_use]
    pub const fn top_right(&self) -> Point {
        self.top_right
    }

    /// Lower-left corner of the cell.
    #[must_use]
    pub const fn bottom_left(&self) -> Point {
        self.bottom_left
    }

    /// Lower-right corner of the cell.
    #[must_use]
    pub const fn bottom_right(&self) -> Point {
        self.bottom_right
    }

    /// Midpoint used when drawing path moves.
    #[must_use]
    pub const fn center(&self) -> Point {
        self.center
    }

    /// Edge length of the cell.
    #[must_use]
    pub const fn cell_size(&self) -> i32 {
        self.cell_size
    }

    /// Segment occupied by the wall on `side`, whether or not it still stands.
    #[must_use]
    pub const fn wall(&self, side: Side) -> Line {
        self.walls[side.index()]
    }

    /// Reports whether the wall on `side` is still present.
    #[must_use]
    pub const fn has_wall(&self, side: Side) -> bool {
        self.present[side.index()]
    }

    /// Walls that are still standing, in [`Side::ALL`] order.
    pub fn standing_walls(&self) -> impl Iterator<Item = (Side, Line)> + '_ {
        Side::ALL
            .into_iter()
            .filter(|side| self.has_wall(*side))
            .map(|side| (side, self.wall(side)))
    }

    /// Reports whether the solver has entered this cell.
    #[must_use]
    pub const fn visited(&self) -> bool {
        self.visited
    }

    /// True when `self` sits immediately to the right of `other`.
    #[must_use]
    pub fn is_right_neighbor(&self, other: &Cell) -> bool {
        self.wall(Side::Left) == other.wall(Side::Right)
    }

    /// True when `self` sits immediately to the left of `other`.
    #[must_use]
    pub fn is_left_neighbor(&self, other: &Cell) -> bool {
        self.wall(Side::Right) == other.wall(Side::Left)
    }

    /// True when `self` sits immediately above `other`.
    #[must_use]
    pub fn is_top_neighbor(&self, other: &Cell) -> bool {
        self.wall(Side::Bottom) == other.wall(Side::Top)
    }

    /// True when `self` sits immediately below `other`.
    #[must_use]
    pub fn is_bottom_neighbor(&self, other: &Cell) -> bool {
        self.wall(Side::Top) == other.wall(Side::Bottom)
    }

    /// Side of `self` whose segment coincides with the facing side of `other`.
    ///
    /// Only meaningful for cells of a regular, non-overlapping grid.
    #[must_use]
    pub fn side_facing(&self, other: &Cell) -> Option<Side> {
        SIDE_PAIRS
            .into_iter()
            .find(|(own, theirs)| self.wall(*own) == other.wall(*theirs))
            .map(|(own, _)| own)
    }

    pub(crate) fn remove_wall(&mut self, side: Side) {
        self.present[side.index()] = false;
    }

    pub(crate) fn mark_visited(&mut self) {
        self.visited = true;
    }
}
