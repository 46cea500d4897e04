use std::{io::Write, thread, time::Duration};

use anyhow::{Context, Result as AnyResult};
use maze_solver_core::{Line, Point};
use maze_solver_rendering::{Canvas, DrawOp, Palette, RenderingError, Stroke};

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Below this a cell centre coincides with its top-left corner.
const MIN_CELL_SIZE: i32 = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Glyph {
    symbol: char,
    stroke: Option<Stroke>,
}

const BLANK: Glyph = Glyph {
    symbol: ' ',
    stroke: None,
};

/// Character canvas with one glyph per cell, per wall slot and per corner.
///
/// Corners sit on even rows and columns, cell centres on odd ones. A maze of
/// `R x C` cells therefore occupies `2R + 1` lines of `2C + 1` glyphs.
#[derive(Debug)]
pub(crate) struct TextCanvas<W> {
    origin: Point,
    cell_size: i32,
    glyphs: Vec<Vec<Glyph>>,
    palette: Option<Palette>,
    animate: bool,
    frame_delay: Duration,
    frames: usize,
    out: W,
}

impl<W> TextCanvas<W>
where
    W: Write,
{
    /// Creates a blank canvas covering `rows x columns` cells anchored at `origin`.
    pub(crate) fn new(
        origin: Point,
        cell_size: i32,
        rows: u32,
        columns: u32,
        out: W,
    ) -> Result<Self, RenderingError> {
        if cell_size < MIN_CELL_SIZE {
            return Err(RenderingError::InvalidCellSize {
                cell_size,
                minimum: MIN_CELL_SIZE,
            });
        }
        let height = rows as usize * 2 + 1;
        let width = columns as usize * 2 + 1;

        Ok(Self {
            origin,
            cell_size,
            glyphs: vec![vec![BLANK; width]; height],
            palette: None,
            animate: false,
            frame_delay: Duration::ZERO,
            frames: 0,
            out,
        })
    }

    /// Colors strokes with ANSI escapes taken from `palette`.
    #[must_use]
    pub(crate) fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = Some(palette);
        self
    }

    /// Writes every presented frame to the output, waiting `frame_delay`
    /// after each one.
    #[must_use]
    pub(crate) fn animated(mut self, frame_delay: Duration) -> Self {
        self.animate = true;
        self.frame_delay = frame_delay;
        self
    }

    /// Number of frames presented so far.
    pub(crate) fn frames(&self) -> usize {
        self.frames
    }

    /// Current picture, one line per glyph row.
    pub(crate) fn render(&self) -> String {
        let mut picture = String::new();
        for (index, row) in self.glyphs.iter().enumerate() {
            if index > 0 {
                picture.push('\n');
            }
            for glyph in row {
                match (self.palette, glyph.stroke) {
                    (Some(palette), Some(stroke)) => {
                        let color = palette.color(stroke);
                        picture.push_str(&format!(
                            "\x1b[38;2;{};{};{}m{}\x1b[0m",
                            color.red(),
                            color.green(),
                            color.blue(),
                            glyph.symbol
                        ));
                    }
                    _ => picture.push(glyph.symbol),
                }
            }
        }
        picture
    }

    /// Releases the output writer.
    pub(crate) fn into_output(self) -> W {
        self.out
    }

    fn locate(&self, point: Point) -> Result<(usize, usize), RenderingError> {
        let axis = |value: i32, origin: i32| -> Option<usize> {
            let offset = value.checked_sub(origin)?;
            if offset < 0 {
                return None;
            }
            let slot = offset / self.cell_size * 2 + i32::from(offset % self.cell_size != 0);
            usize::try_from(slot).ok()
        };

        let located = axis(point.y(), self.origin.y()).zip(axis(point.x(), self.origin.x()));
        match located {
            Some((row, column)) if row < self.glyphs.len() && column < self.glyphs[row].len() => {
                Ok((row, column))
            }
            _ => Err(RenderingError::OutOfCanvas { point }),
        }
    }

    fn segment(&self, line: Line) -> Result<Vec<(usize, usize)>, RenderingError> {
        let (start_row, start_column) = self.locate(line.a())?;
        let (end_row, end_column) = self.locate(line.b())?;

        if start_row == end_row {
            let (low, high) = ordered(start_column, end_column);
            Ok((low..=high).map(|column| (start_row, column)).collect())
        } else if start_column == end_column {
            let (low, high) = ordered(start_row, end_row);
            Ok((low..=high).map(|row| (row, start_column)).collect())
        } else {
            Err(RenderingError::NotAxisAligned { line })
        }
    }
}

fn ordered(a: usize, b: usize) -> (usize, usize) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

fn is_corner(row: usize, column: usize) -> bool {
    row % 2 == 0 && column % 2 == 0
}

fn glyph_for(stroke: Stroke, row: usize, column: usize) -> Glyph {
    let symbol = match stroke {
        Stroke::Wall if is_corner(row, column) => '+',
        Stroke::Wall if row % 2 == 0 => '-',
        Stroke::Wall => '|',
        Stroke::Path => '*',
        Stroke::Retreat => '.',
    };
    Glyph {
        symbol,
        stroke: Some(stroke),
    }
}

impl<W> Canvas for TextCanvas<W>
where
    W: Write,
{
    fn apply(&mut self, op: &DrawOp) -> AnyResult<()> {
        match *op {
            DrawOp::DrawLine { line, stroke } => {
                for (row, column) in self.segment(line)? {
                    self.glyphs[row][column] = glyph_for(stroke, row, column);
                }
            }
            DrawOp::EraseLine { line } => {
                // Corners stay so neighbouring walls keep their joints.
                for (row, column) in self.segment(line)? {
                    if !is_corner(row, column) {
                        self.glyphs[row][column] = BLANK;
                    }
                }
            }
        }
        Ok(())
    }

    fn present(&mut self) -> AnyResult<()> {
        self.frames += 1;
        if !self.animate {
            return Ok(());
        }

        let picture = self.render();
        writeln!(self.out, "{CLEAR_SCREEN}{picture}").context("failed to write frame")?;
        self.out.flush().context("failed to flush frame")?;
        if !self.frame_delay.is_zero() {
            thread::sleep(self.frame_delay);
        }
        Ok(())
    }
}
