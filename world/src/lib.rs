#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative maze state: cells, the carving walk and the solving search.
//!
//! A [`Maze`] advances exactly one unit of work per step call and reports it
//! through the step types defined in `maze-solver-core`. Pacing, rendering
//! and input belong to callers.

mod cell;
mod generation;
mod grid;
mod solving;

use maze_solver_core::{CellCoord, GenerationStep, MazeError, Point, Side, SolutionStep};
use rand::{seq::SliceRandom, Rng};

pub use cell::Cell;

use generation::{Generation, GenerationStatus};
use grid::Grid;
use solving::{Solving, SolvingStatus};

/// Lifecycle stage of a maze.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// No step has been taken; every wall stands.
    Pristine,
    /// Carving has started but not finished.
    Generating,
    /// Carving finished; solving has not started.
    Generated,
    /// The search is under way.
    Solving,
    /// The search reached its target.
    Solved,
    /// The search ran out of cells without reaching its target.
    Exhausted,
}

/// Rectangular grid maze supporting one generation pass and one solve pass.
#[derive(Clone, Debug)]
pub struct Maze {
    top_left_corner: Point,
    cell_size: i32,
    grid: Grid,
    generation: Generation,
    solving: Solving,
}

impl Maze {
    /// Lays out `rows × columns` fully walled cells starting at `top_left_corner`.
    ///
    /// Cell `[row][column]` is anchored at
    /// `top_left_corner + (column * cell_size, row * cell_size)`.
    pub fn new(
        top_left_corner: Point,
        rows: i32,
        columns: i32,
        cell_size: i32,
    ) -> Result<Self, MazeError> {
        let invalid = MazeError::InvalidDimensions {
            rows,
            columns,
            cell_size,
        };

        if rows <= 0 || columns <= 0 || cell_size <= 0 {
            return Err(invalid);
        }

        let far_x = columns
            .checked_mul(cell_size)
            .and_then(|width| top_left_corner.x().checked_add(width));
        let far_y = rows
            .checked_mul(cell_size)
            .and_then(|height| top_left_corner.y().checked_add(height));
        if far_x.is_none() || far_y.is_none() {
            return Err(invalid);
        }

        let rows = rows.unsigned_abs();
        let columns = columns.unsigned_abs();
        let grid = Grid::new(top_left_corner, rows, columns, cell_size);
        let generation = Generation::new(grid.entrance());
        let solving = Solving::new(grid.entrance(), grid.exit());

        Ok(Self {
            top_left_corner,
            cell_size,
            grid,
            generation,
            solving,
        })
    }

    /// Origin of the grid in drawing space.
    #[must_use]
    pub const fn top_left_corner(&self) -> Point {
        self.top_left_corner
    }

    /// Edge length shared by every cell.
    #[must_use]
    pub const fn cell_size(&self) -> i32 {
        self.cell_size
    }

    /// Number of rows in the grid.
    #[must_use]
    pub fn rows(&self) -> u32 {
        self.grid.rows()
    }

    /// Number of columns in the grid.
    #[must_use]
    pub fn columns(&self) -> u32 {
        self.grid.columns()
    }

    /// Cell whose top wall opens into the maze.
    #[must_use]
    pub fn entrance(&self) -> CellCoord {
        self.grid.entrance()
    }

    /// Cell whose bottom wall opens out of the maze.
    #[must_use]
    pub fn exit(&self) -> CellCoord {
        self.grid.exit()
    }

    /// Read-only view of the cell at the provided signed indices.
    pub fn cell(&self, row: i64, column: i64) -> Result<&Cell, MazeError> {
        let out_of_bounds = MazeError::OutOfBounds { row, column };
        let coord = match (u32::try_from(row), u32::try_from(column)) {
            (Ok(row), Ok(column)) => CellCoord::new(row, column),
            _ => return Err(out_of_bounds),
        };
        self.grid.get(coord).ok_or(out_of_bounds)
    }

    /// Read-only view of the cell at `coord`, if it lies within the grid.
    #[must_use]
    pub fn cell_at(&self, coord: CellCoord) -> Option<&Cell> {
        self.grid.get(coord)
    }

    /// Current lifecycle stage.
    #[must_use]
    pub fn phase(&self) -> Phase {
        match self.solving.status() {
            SolvingStatus::Searching => Phase::Solving,
            SolvingStatus::Found => Phase::Solved,
            SolvingStatus::Exhausted => Phase::Exhausted,
            SolvingStatus::NotStarted => match self.generation.status() {
                GenerationStatus::NotStarted => Phase::Pristine,
                GenerationStatus::Running => Phase::Generating,
                GenerationStatus::Done => Phase::Generated,
            },
        }
    }

    /// Performs one unit of randomized carving.
    ///
    /// The first call also opens the entrance and exit. Once generation
    /// reports [`GenerationStep::Done`] further calls return `Done` without
    /// touching the maze.
    pub fn advance_generation_step<R>(&mut self, rng: &mut R) -> Result<GenerationStep, MazeError>
    where
        R: Rng + ?Sized,
    {
        if self.solving.status() != SolvingStatus::NotStarted {
            return Err(MazeError::AlreadySolving);
        }
        Ok(self.generation.step(&mut self.grid, rng))
    }

    /// Performs one unit of the depth-first search towards [`Maze::target`].
    ///
    /// Solving an uncarved or partially carved maze is allowed once
    /// generation is not in progress; it simply ends in
    /// [`SolutionStep::Exhausted`] when no passage exists.
    pub fn advance_solution_step(&mut self) -> Result<SolutionStep, MazeError> {
        if self.generation.status() == GenerationStatus::Running {
            return Err(MazeError::AlreadyGenerating);
        }
        Ok(self.solving.step(&mut self.grid))
    }

    /// Cell the solver is searching for; the exit unless retargeted.
    #[must_use]
    pub fn target(&self) -> CellCoord {
        self.solving.target()
    }

    /// Points the solver at a different cell before the search starts.
    pub fn set_target(&mut self, target: CellCoord) -> Result<(), MazeError> {
        if self.solving.status() != SolvingStatus::NotStarted {
            return Err(MazeError::AlreadySolving);
        }
        self.ensure_contains(target)?;
        self.solving.retarget(target);
        Ok(())
    }

    /// Current search path from the entrance to the head of the search.
    ///
    /// After [`SolutionStep::Found`] this is the solution, entrance first.
    #[must_use]
    pub fn solution_path(&self) -> &[CellCoord] {
        self.solving.path()
    }

    /// Removes the wall shared by two neighbouring cells, returning the side
    /// of `from` that was opened.
    ///
    /// Allowed before generation starts or after it has finished, and only
    /// until solving begins.
    pub fn carve_between(&mut self, from: CellCoord, to: CellCoord) -> Result<Side, MazeError> {
        if self.solving.status() != SolvingStatus::NotStarted {
            return Err(MazeError::AlreadySolving);
        }
        if self.generation.status() == GenerationStatus::Running {
            return Err(MazeError::AlreadyGenerating);
        }
        self.ensure_contains(from)?;
        self.ensure_contains(to)?;

        let side = from
            .side_towards(to)
            .ok_or(MazeError::NotAdjacent { from, to })?;
        if !self.grid.carve(from, side, to) {
            return Err(MazeError::NotAdjacent { from, to });
        }
        Ok(side)
    }

    /// True when `from` and `to` are neighbours joined by an open passage.
    #[must_use]
    pub fn can_move(&self, from: CellCoord, to: CellCoord) -> bool {
        self.grid.can_move(from, to)
    }

    /// Every cell coordinate in a random order.
    pub fn shuffled_positions<R>(&self, rng: &mut R) -> Vec<CellCoord>
    where
        R: Rng + ?Sized,
    {
        let mut positions: Vec<CellCoord> = self.grid.iter().map(|(coord, _)| coord).collect();
        positions.shuffle(rng);
        positions
    }

    fn ensure_contains(&self, coord: CellCoord) -> Result<(), MazeError> {
        if self.grid.contains(coord) {
            Ok(())
        } else {
            Err(MazeError::OutOfBounds {
                row: i64::from(coord.row()),
                column: i64::from(coord.column()),
            })
        }
    }
}

/// Query functions that provide read-only access to the maze state.
pub mod query {
    use std::collections::VecDeque;

    use maze_solver_core::{CellCoord, MazeError, Side};

    use super::{Cell, Maze};

    /// Grid dimensions as `(rows, columns)`.
    #[must_use]
    pub fn dimensions(maze: &Maze) -> (u32, u32) {
        (maze.rows(), maze.columns())
    }

    /// Cell at the provided signed indices.
    pub fn cell(maze: &Maze, row: i64, column: i64) -> Result<&Cell, MazeError> {
        maze.cell(row, column)
    }

    /// Cell whose top wall opens into the maze.
    #[must_use]
    pub fn entrance(maze: &Maze) -> CellCoord {
        maze.entrance()
    }

    /// Cell whose bottom wall opens out of the maze.
    #[must_use]
    pub fn exit(maze: &Maze) -> CellCoord {
        maze.exit()
    }

    /// Cell the solver is searching for.
    #[must_use]
    pub fn target(maze: &Maze) -> CellCoord {
        maze.target()
    }

    /// Current search path, entrance first.
    #[must_use]
    pub fn solution_path(maze: &Maze) -> &[CellCoord] {
        maze.solution_path()
    }

    /// Every cell paired with its coordinate, in row-major order.
    pub fn cells(maze: &Maze) -> impl Iterator<Item = (CellCoord, &Cell)> + '_ {
        maze.grid.iter()
    }

    /// Number of interior walls removed on both sides.
    ///
    /// A finished perfect maze has exactly `rows * columns - 1` passages.
    #[must_use]
    pub fn open_passage_count(maze: &Maze) -> usize {
        maze.grid
            .iter()
            .flat_map(|(coord, _)| {
                maze.grid
                    .neighbors(coord)
                    .filter(|(side, _)| matches!(side, Side::Right | Side::Bottom))
                    .map(move |(_, neighbor)| (coord, neighbor))
            })
            .filter(|(coord, neighbor)| maze.grid.can_move(*coord, *neighbor))
            .count()
    }

    /// Cells reachable from `start` through open passages, in breadth-first order.
    #[must_use]
    pub fn reachable_from(maze: &Maze, start: CellCoord) -> Vec<CellCoord> {
        if !maze.grid.contains(start) {
            return Vec::new();
        }

        let rows = usize::try_from(maze.rows()).unwrap_or(0);
        let columns = usize::try_from(maze.columns()).unwrap_or(0);
        let mut seen = vec![false; rows.saturating_mul(columns)];
        let index = |coord: CellCoord| coord.row() as usize * columns + coord.column() as usize;

        let mut order = Vec::new();
        let mut queue = VecDeque::new();
        seen[index(start)] = true;
        queue.push_back(start);

        while let Some(coord) = queue.pop_front() {
            order.push(coord);
            for (_, neighbor) in maze.grid.neighbors(coord) {
                if seen[index(neighbor)] || !maze.grid.can_move(coord, neighbor) {
                    continue;
                }
                seen[index(neighbor)] = true;
                queue.push_back(neighbor);
            }
        }

        order
    }

    /// Cells the solver has entered so far.
    #[must_use]
    pub fn visited_cells(maze: &Maze) -> Vec<CellCoord> {
        maze.grid
            .iter()
            .filter(|(_, cell)| cell.visited())
            .map(|(coord, _)| coord)
            .collect()
    }
}
