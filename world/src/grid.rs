//! Dense cell storage shared by the generation and solving walks.

use maze_solver_core::{CellCoord, Point, Side};

use crate::cell::Cell;

/// Row-major grid of cells with a fixed origin and cell size.
#[derive(Clone, Debug)]
pub(crate) struct Grid {
    rows: u32,
    columns: u32,
    cells: Vec<Vec<Cell>>,
}

impl Grid {
    /// Lays out `rows × columns` cells; the caller has validated that every
    /// corner fits in `i32`.
    pub(crate) fn new(origin: Point, rows: u32, columns: u32, cell_size: i32) -> Self {
        let cells = (0..rows)
            .map(|row| {
                (0..columns)
                    .map(|column| {
                        let top_left =
                            origin.offset(column as i32 * cell_size, row as i32 * cell_size);
                        Cell::new(top_left, cell_size)
                    })
                    .collect()
            })
            .collect();

        Self {
            rows,
            columns,
            cells,
        }
    }

    pub(crate) fn rows(&self) -> u32 {
        self.rows
    }

    pub(crate) fn columns(&self) -> u32 {
        self.columns
    }

    pub(crate) fn contains(&self, coord: CellCoord) -> bool {
        coord.row() < self.rows && coord.column() < self.columns
    }

    pub(crate) fn get(&self, coord: CellCoord) -> Option<&Cell> {
        let row = usize::try_from(coord.row()).ok()?;
        let column = usize::try_from(coord.column()).ok()?;
        self.cells.get(row)?.get(column)
    }

    fn get_mut(&mut self, coord: CellCoord) -> Option<&mut Cell> {
        let row = usize::try_from(coord.row()).ok()?;
        let column = usize::try_from(coord.column()).ok()?;
        self.cells.get_mut(row)?.get_mut(column)
    }

    /// Top-left cell; its top wall is the maze entrance.
    pub(crate) fn entrance(&self) -> CellCoord {
        CellCoord::new(0, 0)
    }

    /// Bottom-right cell; its bottom wall is the maze exit.
    pub(crate) fn exit(&self) -> CellCoord {
        CellCoord::new(self.rows.saturating_sub(1), self.columns.saturating_sub(1))
    }

    pub(crate) fn open_entrance_and_exit(&mut self) {
        let entrance = self.entrance();
        let exit = self.exit();
        if let Some(cell) = self.get_mut(entrance) {
            cell.remove_wall(Side::Top);
        }
        if let Some(cell) = self.get_mut(exit) {
            cell.remove_wall(Side::Bottom);
        }
    }

    /// Removes the wall on `side` of `from` together with the facing wall of
    /// the neighbour behind it. Both flags change or neither does.
    pub(crate) fn carve(&mut self, from: CellCoord, side: Side, to: CellCoord) -> bool {
        if !self.contains(from) || !self.contains(to) || from.side_towards(to) != Some(side) {
            return false;
        }

        if let Some(cell) = self.get_mut(from) {
            cell.remove_wall(side);
        }
        if let Some(cell) = self.get_mut(to) {
            cell.remove_wall(side.opposite());
        }
        true
    }

    /// True when `from` and `to` are grid neighbours with the shared wall
    /// absent on both sides.
    pub(crate) fn can_move(&self, from: CellCoord, to: CellCoord) -> bool {
        let Some(side) = from.side_towards(to) else {
            return false;
        };
        match (self.get(from), self.get(to)) {
            (Some(source), Some(destination)) => {
                !source.has_wall(side) && !destination.has_wall(side.opposite())
            }
            _ => false,
        }
    }

    pub(crate) fn mark_visited(&mut self, coord: CellCoord) {
        if let Some(cell) = self.get_mut(coord) {
            cell.mark_visited();
        }
    }

    pub(crate) fn is_visited(&self, coord: CellCoord) -> bool {
        self.get(coord).map_or(false, Cell::visited)
    }

    /// In-bounds neighbours of `coord` in up, down, left, right order.
    pub(crate) fn neighbors(&self, coord: CellCoord) -> impl Iterator<Item = (Side, CellCoord)> + '_ {
        coord
            .neighbors()
            .filter(move |(_, neighbor)| self.contains(*neighbor))
    }

    /// Every cell paired with its coordinate, in row-major order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = (CellCoord, &Cell)> + '_ {
        self.cells.iter().enumerate().flat_map(|(row, cells)| {
            cells.iter().enumerate().map(move |(column, cell)| {
                (CellCoord::new(row as u32, column as u32), cell)
            })
        })
    }
}
