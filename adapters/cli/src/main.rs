#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that generates and solves a maze in the terminal.

mod snapshot;
mod text_canvas;

use std::{
    io::{self, Write},
    num::NonZeroUsize,
    time::Duration,
};

use anyhow::{Context, Result as AnyResult};
use clap::{Parser, ValueEnum};
use maze_solver_core::Point;
use maze_solver_rendering::{Animator, Palette};
use maze_solver_system_driver::{Cadence, Driver};
use maze_solver_world::Maze;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing_subscriber::EnvFilter;

use crate::{snapshot::MazeSnapshot, text_canvas::TextCanvas};

/// Output produced once the maze is solved.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Character picture of the walls and the solution path.
    Text,
    /// JSON export of the walls and the solution path.
    Json,
}

/// Generates a random perfect maze and solves it with depth-first search.
#[derive(Parser, Debug)]
#[command(name = "maze-solver", version, about, long_about = None)]
struct Args {
    /// Number of cell rows.
    #[arg(long, default_value_t = 20)]
    rows: i32,

    /// Number of cell columns.
    #[arg(long, default_value_t = 20)]
    columns: i32,

    /// Edge length of a cell in drawing units.
    #[arg(long, default_value_t = 30)]
    cell_size: i32,

    /// Horizontal position of the maze's top-left corner.
    #[arg(long, default_value_t = 10, allow_negative_numbers = true)]
    origin_x: i32,

    /// Vertical position of the maze's top-left corner.
    #[arg(long, default_value_t = 10, allow_negative_numbers = true)]
    origin_y: i32,

    /// Seed for carving; random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Milliseconds to wait after each animated frame.
    #[arg(long, default_value_t = 0)]
    frame_delay_ms: u64,

    /// Steps batched into one frame; defaults to one percent of the cells.
    #[arg(long)]
    steps_per_frame: Option<NonZeroUsize>,

    /// Output written after solving.
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Redraw the picture on every frame while generating and solving.
    #[arg(long)]
    animate: bool,

    /// Color the text picture with ANSI escapes.
    #[arg(long)]
    color: bool,
}

impl Args {
    fn cadence(&self, total_cells: usize) -> Cadence {
        self.steps_per_frame
            .map_or_else(|| Cadence::per_percent(total_cells), Cadence::new)
    }
}

/// Entry point for the maze solver command-line interface.
fn main() -> AnyResult<()> {
    let args = Args::parse();
    init_tracing();

    let seed = args.seed.unwrap_or_else(|| rand::thread_rng().gen());
    let stdout = io::stdout();
    run(&args, seed, stdout.lock())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run<W>(args: &Args, seed: u64, out: W) -> AnyResult<()>
where
    W: Write,
{
    let origin = Point::new(args.origin_x, args.origin_y);
    let mut maze = Maze::new(origin, args.rows, args.columns, args.cell_size)
        .context("invalid maze configuration")?;
    tracing::info!(
        rows = maze.rows(),
        columns = maze.columns(),
        cell_size = maze.cell_size(),
        seed,
        "generating maze"
    );

    let total_cells = maze.rows() as usize * maze.columns() as usize;
    let cadence = args.cadence(total_cells);
    let driver = Driver::new(cadence);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let mut canvas = TextCanvas::new(origin, maze.cell_size(), maze.rows(), maze.columns(), out)
        .context("failed to create text canvas")?;
    if args.color {
        canvas = canvas.with_palette(Palette::default());
    }
    if args.animate {
        canvas = canvas.animated(Duration::from_millis(args.frame_delay_ms));
    }

    let mut animator = Animator::new(canvas);
    animator
        .draw_initial_grid(&maze, &mut rng, cadence)
        .context("failed to draw the initial grid")?;
    let generation = driver
        .run_generation(&mut maze, &mut rng, &mut animator)
        .context("maze generation failed")?;
    let solution = driver
        .run_solution(&mut maze, &mut animator)
        .context("maze solving failed")?;

    let canvas = animator.into_canvas();
    tracing::info!(
        carved = generation.carved,
        explored = solution.advanced,
        retreated = solution.backtracked,
        path = solution.path.len(),
        frames = canvas.frames(),
        outcome = ?solution.outcome,
        "maze solved"
    );

    let picture = canvas.render();
    let mut out = canvas.into_output();
    match args.format {
        Format::Text if args.animate => {}
        Format::Text => writeln!(out, "{picture}").context("failed to write maze picture")?,
        Format::Json => {
            let snapshot = MazeSnapshot::capture(&maze, seed, solution.outcome);
            serde_json::to_writer_pretty(&mut out, &snapshot)
                .context("failed to write maze snapshot")?;
            writeln!(out).context("failed to write maze snapshot")?;
        }
    }
    out.flush().context("failed to flush output")
}
