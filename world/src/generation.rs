//! Randomized depth-first carving, one step per call.

use std::collections::HashSet;

use maze_solver_core::{CellCoord, GenerationStep, Side};
use rand::{seq::SliceRandom, Rng};

use crate::grid::Grid;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum GenerationStatus {
    NotStarted,
    Running,
    Done,
}

/// State of the carving walk between steps.
///
/// `to_visit` holds the current walk with `current` on top; a dead end pops
/// the top and resumes from the cell beneath it.
#[derive(Clone, Debug)]
pub(crate) struct Generation {
    visited: HashSet<CellCoord>,
    to_visit: Vec<CellCoord>,
    current: CellCoord,
    status: GenerationStatus,
    carved: usize,
    backtracked: usize,
}

impl Generation {
    pub(crate) fn new(start: CellCoord) -> Self {
        Self {
            visited: HashSet::new(),
            to_visit: vec![start],
            current: start,
            status: GenerationStatus::NotStarted,
            carved: 0,
            backtracked: 0,
        }
    }

    pub(crate) fn status(&self) -> GenerationStatus {
        self.status
    }

    pub(crate) fn step<R>(&mut self, grid: &mut Grid, rng: &mut R) -> GenerationStep
    where
        R: Rng + ?Sized,
    {
        match self.status {
            GenerationStatus::Done => return GenerationStep::Done,
            GenerationStatus::NotStarted => {
                grid.open_entrance_and_exit();
                self.status = GenerationStatus::Running;
            }
            GenerationStatus::Running => {}
        }

        let _ = self.visited.insert(self.current);

        let candidates: Vec<(Side, CellCoord)> = grid
            .neighbors(self.current)
            .filter(|(_, neighbor)| !self.visited.contains(neighbor))
            .collect();

        let Some(&(side, next)) = candidates.choose(rng) else {
            return self.backtrack();
        };

        let from = self.current;
        let carved = grid.carve(from, side, next);
        debug_assert!(carved, "carving candidates come from in-bounds neighbours");

        self.to_visit.push(next);
        self.current = next;
        self.carved += 1;
        tracing::trace!(?from, to = ?next, ?side, "carved wall");

        GenerationStep::Carved {
            from,
            to: next,
            side,
        }
    }

    fn backtrack(&mut self) -> GenerationStep {
        let _ = self.to_visit.pop();

        match self.to_visit.last().copied() {
            Some(resume) => {
                self.current = resume;
                self.backtracked += 1;
                tracing::trace!(to = ?resume, "generation backtracked");
                GenerationStep::Backtracked { to: resume }
            }
            None => {
                self.status = GenerationStatus::Done;
                tracing::debug!(
                    carved = self.carved,
                    backtracked = self.backtracked,
                    visited = self.visited.len(),
                    "maze generation complete"
                );
                GenerationStep::Done
            }
        }
    }
}
