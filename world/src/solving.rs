//! Iterative depth-first search over carved passages.

use maze_solver_core::{CellCoord, SolutionStep};

use crate::grid::Grid;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum SolvingStatus {
    NotStarted,
    Searching,
    Found,
    Exhausted,
}

/// Explicit path stack of the search; the entrance sits at the bottom.
#[derive(Clone, Debug)]
pub(crate) struct Solving {
    path: Vec<CellCoord>,
    target: CellCoord,
    status: SolvingStatus,
    advanced: usize,
    backtracked: usize,
}

impl Solving {
    pub(crate) fn new(start: CellCoord, target: CellCoord) -> Self {
        Self {
            path: vec![start],
            target,
            status: SolvingStatus::NotStarted,
            advanced: 0,
            backtracked: 0,
        }
    }

    pub(crate) fn status(&self) -> SolvingStatus {
        self.status
    }

    pub(crate) fn target(&self) -> CellCoord {
        self.target
    }

    pub(crate) fn retarget(&mut self, target: CellCoord) {
        self.target = target;
    }

    pub(crate) fn path(&self) -> &[CellCoord] {
        &self.path
    }

    pub(crate) fn step(&mut self, grid: &mut Grid) -> SolutionStep {
        match self.status {
            SolvingStatus::Found => return SolutionStep::Found,
            SolvingStatus::Exhausted => return SolutionStep::Exhausted,
            SolvingStatus::NotStarted | SolvingStatus::Searching => {}
        }
        self.status = SolvingStatus::Searching;

        let Some(head) = self.path.last().copied() else {
            return self.exhaust();
        };

        if head == self.target {
            self.status = SolvingStatus::Found;
            tracing::debug!(
                length = self.path.len(),
                advanced = self.advanced,
                backtracked = self.backtracked,
                "maze solved"
            );
            return SolutionStep::Found;
        }

        grid.mark_visited(head);

        let next = grid
            .neighbors(head)
            .map(|(_, neighbor)| neighbor)
            .find(|neighbor| !grid.is_visited(*neighbor) && grid.can_move(head, *neighbor));

        if let Some(next) = next {
            self.path.push(next);
            self.advanced += 1;
            tracing::trace!(from = ?head, to = ?next, "solver advanced");
            return SolutionStep::Advanced {
                from: head,
                to: next,
            };
        }

        let _ = self.path.pop();
        match self.path.last().copied() {
            Some(resume) => {
                self.backtracked += 1;
                tracing::trace!(from = ?head, to = ?resume, "solver backtracked");
                SolutionStep::Backtracked {
                    from: head,
                    to: resume,
                }
            }
            None => self.exhaust(),
        }
    }

    fn exhaust(&mut self) -> SolutionStep {
        self.status = SolvingStatus::Exhausted;
        tracing::debug!(
            advanced = self.advanced,
            backtracked = self.backtracked,
            "maze search exhausted without reaching the target"
        );
        SolutionStep::Exhausted
    }
}
