#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for maze solver adapters.
//!
//! Backends implement [`Canvas`]; the [`Animator`] turns the step results
//! reported by the driver into the minimal set of [`DrawOp`]s needed to keep
//! a canvas in sync with the maze.

use std::{error::Error, fmt};

use anyhow::Result as AnyResult;
use maze_solver_core::{GenerationStep, Line, Point, Side, SolutionStep};
use maze_solver_system_driver::{Cadence, Observer};
use maze_solver_world::Maze;
use rand::Rng;

/// Opaque RGB color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    red: u8,
    green: u8,
    blue: u8,
}

impl Color {
    /// Creates a new color from byte RGB components.
    #[must_use]
    pub const fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Red component of the color.
    #[must_use]
    pub const fn red(&self) -> u8 {
        self.red
    }

    /// Green component of the color.
    #[must_use]
    pub const fn green(&self) -> u8 {
        self.green
    }

    /// Blue component of the color.
    #[must_use]
    pub const fn blue(&self) -> u8 {
        self.blue
    }
}

/// Role of a drawn line, mapped to a color by the [`Palette`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Stroke {
    /// A standing cell wall.
    Wall,
    /// A move the solver made towards the target.
    Path,
    /// A move the solver retracted from a dead end.
    Retreat,
}

/// Colors assigned to each stroke.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    /// Standing walls.
    pub wall: Color,
    /// Forward solver moves.
    pub path: Color,
    /// Retracted solver moves.
    pub retreat: Color,
}

impl Palette {
    /// Color used for the provided stroke.
    #[must_use]
    pub const fn color(&self, stroke: Stroke) -> Color {
        match stroke {
            Stroke::Wall => self.wall,
            Stroke::Path => self.path,
            Stroke::Retreat => self.retreat,
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            wall: Color::from_rgb(0xff, 0xa5, 0x00),
            path: Color::from_rgb(0xff, 0xff, 0xff),
            retreat: Color::from_rgb(0xff, 0x00, 0x00),
        }
    }
}

/// Single incremental change applied to a canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DrawOp {
    /// Draws a segment with the provided stroke, replacing whatever was there.
    DrawLine {
        /// Segment to draw.
        line: Line,
        /// Role of the segment.
        stroke: Stroke,
    },
    /// Removes a previously drawn segment.
    EraseLine {
        /// Segment to remove.
        line: Line,
    },
}

/// Rendering backend capable of applying draw operations.
pub trait Canvas {
    /// Applies a single draw operation without presenting it.
    fn apply(&mut self, op: &DrawOp) -> AnyResult<()>;

    /// Presents everything applied since the previous frame.
    fn present(&mut self) -> AnyResult<()>;
}

/// Translates maze step results into draw operations on a canvas.
///
/// The animator implements the driver's [`Observer`], so it can be handed to
/// `Driver::run_generation` and `Driver::run_solution` directly.
#[derive(Debug)]
pub struct Animator<C> {
    canvas: C,
    openings_erased: bool,
}

impl<C> Animator<C>
where
    C: Canvas,
{
    /// Wraps the provided canvas.
    #[must_use]
    pub const fn new(canvas: C) -> Self {
        Self {
            canvas,
            openings_erased: false,
        }
    }

    /// Read-only access to the wrapped canvas.
    #[must_use]
    pub const fn canvas(&self) -> &C {
        &self.canvas
    }

    /// Releases the wrapped canvas.
    #[must_use]
    pub fn into_canvas(self) -> C {
        self.canvas
    }

    /// Draws every standing wall, visiting cells in random order and
    /// presenting a frame whenever `cadence` cells have been drawn.
    pub fn draw_initial_grid<R>(&mut self, maze: &Maze, rng: &mut R, cadence: Cadence) -> AnyResult<()>
    where
        R: Rng + ?Sized,
    {
        let positions = maze.shuffled_positions(rng);
        let steps_per_frame = cadence.steps_per_frame();

        for (drawn, coord) in positions.into_iter().enumerate() {
            let Some(cell) = maze.cell_at(coord) else {
                continue;
            };
            for (_, line) in cell.standing_walls() {
                self.canvas.apply(&DrawOp::DrawLine {
                    line,
                    stroke: Stroke::Wall,
                })?;
            }
            if (drawn + 1) % steps_per_frame == 0 {
                self.canvas.present()?;
            }
        }

        self.canvas.present()
    }

    fn erase_openings(&mut self, maze: &Maze) -> AnyResult<()> {
        if self.openings_erased {
            return Ok(());
        }
        self.openings_erased = true;

        for (coord, side) in [(maze.entrance(), Side::Top), (maze.exit(), Side::Bottom)] {
            if let Some(cell) = maze.cell_at(coord) {
                if !cell.has_wall(side) {
                    self.canvas.apply(&DrawOp::EraseLine {
                        line: cell.wall(side),
                    })?;
                }
            }
        }
        Ok(())
    }

    fn draw_move(&mut self, from: Point, to: Point, stroke: Stroke) -> AnyResult<()> {
        self.canvas.apply(&DrawOp::DrawLine {
            line: Line::new(from, to),
            stroke,
        })
    }
}

impl<C> Observer for Animator<C>
where
    C: Canvas,
{
    type Error = anyhow::Error;

    fn on_generation_step(&mut self, maze: &Maze, step: GenerationStep) -> AnyResult<()> {
        self.erase_openings(maze)?;

        if let GenerationStep::Carved { from, side, .. } = step {
            // Both cells share this segment, one erase clears the passage.
            if let Some(cell) = maze.cell_at(from) {
                self.canvas.apply(&DrawOp::EraseLine {
                    line: cell.wall(side),
                })?;
            }
        }
        Ok(())
    }

    fn on_solution_step(&mut self, maze: &Maze, step: SolutionStep) -> AnyResult<()> {
        let (from, to, stroke) = match step {
            SolutionStep::Advanced { from, to } => (from, to, Stroke::Path),
            SolutionStep::Backtracked { from, to } => (to, from, Stroke::Retreat),
            SolutionStep::Found | SolutionStep::Exhausted => return Ok(()),
        };

        match (maze.cell_at(from), maze.cell_at(to)) {
            (Some(source), Some(destination)) => {
                self.draw_move(source.center(), destination.center(), stroke)
            }
            _ => Err(RenderingError::UnknownCell.into()),
        }
    }

    fn on_frame(&mut self, _maze: &Maze) -> AnyResult<()> {
        self.canvas.present()
    }
}

/// Errors that can occur while translating or drawing maze geometry.
#[derive(Debug, PartialEq, Eq)]
pub enum RenderingError {
    /// A step referenced a cell that does not exist in the maze.
    UnknownCell,
    /// Cell size is too small for the canvas to tell corners from centres.
    InvalidCellSize {
        /// Provided cell size that failed validation.
        cell_size: i32,
        /// Smallest cell size the canvas accepts.
        minimum: i32,
    },
    /// A point lies outside the area covered by the canvas.
    OutOfCanvas {
        /// Offending point.
        point: Point,
    },
    /// The canvas only supports horizontal and vertical segments.
    NotAxisAligned {
        /// Offending segment.
        line: Line,
    },
}

impl fmt::Display for RenderingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownCell => write!(f, "step references a cell outside the maze"),
            Self::InvalidCellSize { cell_size, minimum } => {
                write!(f, "cell_size must be at least {minimum} (received {cell_size})")
            }
            Self::OutOfCanvas { point } => {
                write!(f, "point ({}, {}) lies outside the canvas", point.x(), point.y())
            }
            Self::NotAxisAligned { line } => write!(
                f,
                "segment ({}, {}) -> ({}, {}) is not axis aligned",
                line.a().x(),
                line.a().y(),
                line.b().x(),
                line.b().y()
            ),
        }
    }
}

impl Error for RenderingError {}
