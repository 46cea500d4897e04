use maze_solver_core::{CellCoord, Point, Side};
use maze_solver_system_driver::Outcome;
use maze_solver_world::{query, Maze};
use serde::Serialize;

/// Exported description of a finished maze and its solution.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub(crate) struct MazeSnapshot {
    /// Number of cell rows.
    pub(crate) rows: u32,
    /// Number of cell columns.
    pub(crate) columns: u32,
    /// Edge length of a cell in drawing units.
    pub(crate) cell_size: i32,
    /// Top-left corner of the maze in drawing space.
    pub(crate) origin: Point,
    /// Seed used for carving.
    pub(crate) seed: u64,
    /// Standing walls of every cell, in row-major order.
    pub(crate) cells: Vec<CellSnapshot>,
    /// Whether the search reached the exit.
    pub(crate) solved: bool,
    /// Cells from the entrance to the exit; empty when unsolved.
    pub(crate) solution: Vec<CellCoord>,
}

/// Walls still standing around a single cell.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub(crate) struct CellSnapshot {
    /// Position of the cell.
    pub(crate) coord: CellCoord,
    /// Sides whose wall is present.
    pub(crate) walls: Vec<Side>,
}

impl MazeSnapshot {
    /// Captures the current walls and solution path of `maze`.
    pub(crate) fn capture(maze: &Maze, seed: u64, outcome: Outcome) -> Self {
        let (rows, columns) = query::dimensions(maze);
        let cells = query::cells(maze)
            .map(|(coord, cell)| CellSnapshot {
                coord,
                walls: cell.standing_walls().map(|(side, _)| side).collect(),
            })
            .collect();

        Self {
            rows,
            columns,
            cell_size: maze.cell_size(),
            origin: maze.top_left_corner(),
            seed,
            cells,
            solved: outcome == Outcome::Found,
            solution: maze.solution_path().to_vec(),
        }
    }
}
