#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure driver system that runs maze phases one step at a time.
//!
//! The driver owns no maze state. It repeatedly invokes the step operations
//! of a [`Maze`], forwards every result to an [`Observer`], and marks frame
//! boundaries according to a [`Cadence`] so adapters can decide when to
//! present and how long to wait.

use std::num::NonZeroUsize;

use maze_solver_core::{CellCoord, GenerationStep, MazeError, SolutionStep};
use maze_solver_world::Maze;
use rand::Rng;

/// Number of steps batched into one presented frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Cadence {
    steps_per_frame: NonZeroUsize,
}

impl Cadence {
    /// Presents a frame after every step.
    #[must_use]
    pub const fn every_step() -> Self {
        Self {
            steps_per_frame: NonZeroUsize::MIN,
        }
    }

    /// Presents a frame every `steps_per_frame` steps.
    #[must_use]
    pub const fn new(steps_per_frame: NonZeroUsize) -> Self {
        Self { steps_per_frame }
    }

    /// Presents a frame for every percent of `total_cells`, never less than
    /// one step per frame.
    #[must_use]
    pub fn per_percent(total_cells: usize) -> Self {
        NonZeroUsize::new(total_cells / 100).map_or_else(Self::every_step, Self::new)
    }

    /// Number of steps between frames.
    #[must_use]
    pub const fn steps_per_frame(&self) -> usize {
        self.steps_per_frame.get()
    }

    fn is_frame_boundary(&self, steps_taken: usize) -> bool {
        steps_taken % self.steps_per_frame.get() == 0
    }
}

impl Default for Cadence {
    fn default() -> Self {
        Self::every_step()
    }
}

/// Receives every step result and frame boundary produced by the [`Driver`].
///
/// All callbacks default to doing nothing. The error type must accept
/// [`MazeError`] so the driver can report contract violations through the
/// same channel as observer failures.
pub trait Observer {
    /// Error surfaced by the observer and by the driven maze.
    type Error: From<MazeError>;

    /// Called after each generation step with the maze in its new state.
    fn on_generation_step(
        &mut self,
        _maze: &Maze,
        _step: GenerationStep,
    ) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called after each solution step with the maze in its new state.
    fn on_solution_step(&mut self, _maze: &Maze, _step: SolutionStep) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called when enough steps accumulated for a frame, and once after the
    /// final step of a run.
    fn on_frame(&mut self, _maze: &Maze) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Observer that ignores every callback.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullObserver;

impl Observer for NullObserver {
    type Error = MazeError;
}

/// Counters describing a finished generation run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GenerationReport {
    /// Walls removed.
    pub carved: usize,
    /// Dead ends the carving walk retreated from.
    pub backtracked: usize,
    /// Step calls made, including the final `Done`.
    pub steps: usize,
    /// Frame boundaries reported to the observer.
    pub frames: usize,
}

/// Terminal result of a solving run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// The search reached its target.
    Found,
    /// No open passage leads to the target.
    Exhausted,
}

/// Counters and path describing a finished solving run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SolutionReport {
    /// How the search ended.
    pub outcome: Outcome,
    /// Cells pushed onto the path.
    pub advanced: usize,
    /// Cells popped off the path.
    pub backtracked: usize,
    /// Step calls made, including the terminal one.
    pub steps: usize,
    /// Frame boundaries reported to the observer.
    pub frames: usize,
    /// Final path from the entrance; empty when exhausted.
    pub path: Vec<CellCoord>,
}

/// Runs maze phases to completion at a fixed cadence.
#[derive(Clone, Copy, Debug, Default)]
pub struct Driver {
    cadence: Cadence,
}

impl Driver {
    /// Creates a driver that reports frames at the provided cadence.
    #[must_use]
    pub const fn new(cadence: Cadence) -> Self {
        Self { cadence }
    }

    /// Cadence used to batch steps into frames.
    #[must_use]
    pub const fn cadence(&self) -> Cadence {
        self.cadence
    }

    /// Advances generation until it reports [`GenerationStep::Done`].
    pub fn run_generation<R, O>(
        &self,
        maze: &mut Maze,
        rng: &mut R,
        observer: &mut O,
    ) -> Result<GenerationReport, O::Error>
    where
        R: Rng + ?Sized,
        O: Observer,
    {
        let span = tracing::debug_span!("generation", rows = maze.rows(), columns = maze.columns());
        let _entered = span.enter();

        let mut report = GenerationReport::default();
        loop {
            let step = maze.advance_generation_step(rng)?;
            report.steps += 1;
            match step {
                GenerationStep::Carved { .. } => report.carved += 1,
                GenerationStep::Backtracked { .. } => report.backtracked += 1,
                GenerationStep::Done => {}
            }
            observer.on_generation_step(maze, step)?;

            let at_boundary = self.cadence.is_frame_boundary(report.steps);
            let finished = step == GenerationStep::Done;
            if at_boundary || finished {
                observer.on_frame(maze)?;
                report.frames += 1;
            }
            if finished {
                break;
            }
        }

        tracing::debug!(
            carved = report.carved,
            backtracked = report.backtracked,
            frames = report.frames,
            "generation run finished"
        );
        Ok(report)
    }

    /// Advances the search until it reports a terminal result.
    pub fn run_solution<O>(&self, maze: &mut Maze, observer: &mut O) -> Result<SolutionReport, O::Error>
    where
        O: Observer,
    {
        let span = tracing::debug_span!("solution", target = ?maze.target());
        let _entered = span.enter();

        let mut advanced = 0;
        let mut backtracked = 0;
        let mut steps = 0;
        let mut frames = 0;

        let outcome = loop {
            let step = maze.advance_solution_step()?;
            steps += 1;
            match step {
                SolutionStep::Advanced { .. } => advanced += 1,
                SolutionStep::Backtracked { .. } => backtracked += 1,
                SolutionStep::Found | SolutionStep::Exhausted => {}
            }
            observer.on_solution_step(maze, step)?;

            let outcome = match step {
                SolutionStep::Found => Some(Outcome::Found),
                SolutionStep::Exhausted => Some(Outcome::Exhausted),
                SolutionStep::Advanced { .. } | SolutionStep::Backtracked { .. } => None,
            };
            if self.cadence.is_frame_boundary(steps) || outcome.is_some() {
                observer.on_frame(maze)?;
                frames += 1;
            }
            if let Some(outcome) = outcome {
                break outcome;
            }
        };

        tracing::debug!(?outcome, advanced, backtracked, frames, "solution run finished");
        Ok(SolutionReport {
            outcome,
            advanced,
            backtracked,
            steps,
            frames,
            path: maze.solution_path().to_vec(),
        })
    }
}
