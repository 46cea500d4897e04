use std::collections::HashMap;

use anyhow::{bail, Result as AnyResult};
use maze_solver_core::{CellCoord, GenerationStep, Line, Point, Side, SolutionStep};
use maze_solver_rendering::{Animator, Canvas, DrawOp, RenderingError, Stroke};
use maze_solver_system_driver::{Cadence, Driver};
use maze_solver_world::{query, Maze};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

#[derive(Default)]
struct RecordingCanvas {
    ops: Vec<DrawOp>,
    lines: HashMap<Line, Stroke>,
    presents: usize,
}

impl Canvas for RecordingCanvas {
    fn apply(&mut self, op: &DrawOp) -> AnyResult<()> {
        self.ops.push(*op);
        match *op {
            DrawOp::DrawLine { line, stroke } => {
                let _ = self.lines.insert(line, stroke);
            }
            DrawOp::EraseLine { line } => {
                let _ = self.lines.remove(&line);
            }
        }
        Ok(())
    }

    fn present(&mut self) -> AnyResult<()> {
        self.presents += 1;
        Ok(())
    }
}

struct BrokenCanvas;

impl Canvas for BrokenCanvas {
    fn apply(&mut self, _op: &DrawOp) -> AnyResult<()> {
        bail!("canvas closed")
    }

    fn present(&mut self) -> AnyResult<()> {
        Ok(())
    }
}

fn maze(rows: i32, columns: i32) -> Maze {
    Maze::new(Point::new(10, 10), rows, columns, 30).expect("valid maze")
}

fn walls_with(canvas: &RecordingCanvas, stroke: Stroke) -> usize {
    canvas.lines.values().filter(|drawn| **drawn == stroke).count()
}

#[test]
fn initial_grid_draws_every_wall_of_every_cell() {
    let maze = maze(3, 4);
    let mut animator = Animator::new(RecordingCanvas::default());

    animator
        .draw_initial_grid(&maze, &mut ChaCha8Rng::seed_from_u64(5), Cadence::every_step())
        .expect("initial grid");

    let canvas = animator.canvas();
    assert_eq!(canvas.ops.len(), 4 * 12, "four walls per cell");
    // Shared edges collapse onto a single segment.
    assert_eq!(canvas.lines.len(), 3 * 5 + 4 * 4);
    assert_eq!(canvas.presents, 12 + 1, "one frame per cell plus a final one");
}

#[test]
fn first_generation_step_erases_entrance_and_exit() {
    let mut maze = maze(2, 3);
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut animator = Animator::new(RecordingCanvas::default());
    animator
        .draw_initial_grid(&maze, &mut rng, Cadence::every_step())
        .expect("initial grid");
    let entrance_wall = maze.cell_at(maze.entrance()).expect("entrance").wall(Side::Top);
    let exit_wall = maze.cell_at(maze.exit()).expect("exit").wall(Side::Bottom);

    let step = maze.advance_generation_step(&mut rng).expect("generation step");
    maze_solver_system_driver::Observer::on_generation_step(&mut animator, &maze, step)
        .expect("observer");

    let canvas = animator.canvas();
    assert!(!canvas.lines.contains_key(&entrance_wall));
    assert!(!canvas.lines.contains_key(&exit_wall));
    if let GenerationStep::Carved { from, side, .. } = step {
        let shared = maze.cell_at(from).expect("from").wall(side);
        assert!(!canvas.lines.contains_key(&shared), "carved wall still drawn");
    } else {
        panic!("first step of a 2x3 maze must carve, got {step:?}");
    }
}

#[test]
fn canvas_matches_standing_walls_after_generation() {
    let mut maze = maze(6, 5);
    let mut rng = ChaCha8Rng::seed_from_u64(77);
    let mut animator = Animator::new(RecordingCanvas::default());
    animator
        .draw_initial_grid(&maze, &mut rng, Cadence::per_percent(30))
        .expect("initial grid");

    let _ = Driver::default()
        .run_generation(&mut maze, &mut rng, &mut animator)
        .expect("generation run");

    let mut standing: Vec<Line> = query::cells(&maze)
        .flat_map(|(_, cell)| cell.standing_walls().map(|(_, line)| line))
        .collect();
    standing.sort_by_key(|line| (line.a().x(), line.a().y(), line.b().x(), line.b().y()));
    standing.dedup();

    let canvas = animator.into_canvas();
    assert_eq!(canvas.lines.len(), standing.len());
    for line in standing {
        assert_eq!(canvas.lines.get(&line), Some(&Stroke::Wall), "{line:?} missing");
    }
}

#[test]
fn solution_path_remains_drawn_and_dead_ends_are_retreats() {
    let mut maze = maze(8, 8);
    let mut rng = ChaCha8Rng::seed_from_u64(31);
    let driver = Driver::default();
    let mut animator = Animator::new(RecordingCanvas::default());

    let _ = driver
        .run_generation(&mut maze, &mut rng, &mut animator)
        .expect("generation run");
    let report = driver
        .run_solution(&mut maze, &mut animator)
        .expect("solution run");

    let canvas = animator.into_canvas();
    assert_eq!(walls_with(&canvas, Stroke::Path), report.path.len() - 1);
    for pair in report.path.windows(2) {
        let from = maze.cell_at(pair[0]).expect("path cell").center();
        let to = maze.cell_at(pair[1]).expect("path cell").center();
        assert_eq!(canvas.lines.get(&Line::new(from, to)), Some(&Stroke::Path));
    }
    assert_eq!(walls_with(&canvas, Stroke::Retreat), report.backtracked);
}

#[test]
fn terminal_solution_steps_draw_nothing() {
    let maze = maze(2, 2);
    let mut animator = Animator::new(RecordingCanvas::default());

    for step in [SolutionStep::Found, SolutionStep::Exhausted] {
        maze_solver_system_driver::Observer::on_solution_step(&mut animator, &maze, step)
            .expect("observer");
    }

    assert!(animator.canvas().ops.is_empty());
}

#[test]
fn moves_through_cells_outside_the_maze_are_rejected() {
    let maze = maze(2, 2);
    let mut animator = Animator::new(RecordingCanvas::default());

    let error = maze_solver_system_driver::Observer::on_solution_step(
        &mut animator,
        &maze,
        SolutionStep::Advanced {
            from: CellCoord::new(1, 1),
            to: CellCoord::new(2, 1),
        },
    )
    .expect_err("target cell lies outside a 2x2 maze");

    assert_eq!(
        error.downcast_ref::<RenderingError>(),
        Some(&RenderingError::UnknownCell)
    );
    assert!(animator.canvas().ops.is_empty(), "nothing should be drawn");
}

#[test]
fn canvas_failures_surface_through_the_driver() {
    let mut maze = maze(3, 3);
    let mut animator = Animator::new(BrokenCanvas);

    let error = Driver::default()
        .run_generation(&mut maze, &mut ChaCha8Rng::seed_from_u64(2), &mut animator)
        .expect_err("broken canvas");

    assert_eq!(error.to_string(), "canvas closed");
}
