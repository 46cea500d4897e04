use std::num::NonZeroUsize;

use maze_solver_core::{GenerationStep, MazeError, Point, SolutionStep};
use maze_solver_system_driver::{Cadence, Driver, NullObserver, Observer, Outcome};
use maze_solver_world::{query, Maze, Phase};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

#[derive(Default)]
struct Recorder {
    generation: Vec<GenerationStep>,
    solution: Vec<SolutionStep>,
    frames: Vec<usize>,
}

impl Observer for Recorder {
    type Error = MazeError;

    fn on_generation_step(&mut self, _maze: &Maze, step: GenerationStep) -> Result<(), MazeError> {
        self.generation.push(step);
        Ok(())
    }

    fn on_solution_step(&mut self, _maze: &Maze, step: SolutionStep) -> Result<(), MazeError> {
        self.solution.push(step);
        Ok(())
    }

    fn on_frame(&mut self, _maze: &Maze) -> Result<(), MazeError> {
        self.frames.push(self.generation.len() + self.solution.len());
        Ok(())
    }
}

#[derive(Debug, PartialEq, Eq)]
enum CanvasError {
    Closed,
    Maze(MazeError),
}

impl From<MazeError> for CanvasError {
    fn from(error: MazeError) -> Self {
        Self::Maze(error)
    }
}

struct ClosesAfter {
    remaining: usize,
}

impl Observer for ClosesAfter {
    type Error = CanvasError;

    fn on_generation_step(&mut self, _maze: &Maze, _step: GenerationStep) -> Result<(), CanvasError> {
        if self.remaining == 0 {
            return Err(CanvasError::Closed);
        }
        self.remaining -= 1;
        Ok(())
    }
}

fn maze(rows: i32, columns: i32) -> Maze {
    Maze::new(Point::new(10, 10), rows, columns, 30).expect("valid maze")
}

#[test]
fn generation_report_counts_every_step() {
    let mut maze = maze(10, 10);
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let mut recorder = Recorder::default();

    let report = Driver::default()
        .run_generation(&mut maze, &mut rng, &mut recorder)
        .expect("generation run");

    assert_eq!(report.carved, 99);
    assert_eq!(report.carved + report.backtracked + 1, report.steps);
    assert_eq!(recorder.generation.len(), report.steps);
    assert_eq!(recorder.generation.last(), Some(&GenerationStep::Done));
    assert_eq!(report.frames, report.steps, "every-step cadence");
    assert_eq!(maze.phase(), Phase::Generated);
    assert_eq!(query::open_passage_count(&maze), 99);
}

#[test]
fn frames_are_batched_and_flushed_at_the_end() {
    let mut maze = maze(1, 1);
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    let mut recorder = Recorder::default();
    let driver = Driver::new(Cadence::new(NonZeroUsize::new(4).expect("non-zero")));

    let report = driver
        .run_generation(&mut maze, &mut rng, &mut recorder)
        .expect("generation run");

    assert_eq!(report.steps, 1);
    assert_eq!(report.frames, 1);
    assert_eq!(recorder.frames, vec![1]);
}

#[test]
fn batched_frames_land_on_multiples_of_the_cadence() {
    let mut maze = maze(6, 6);
    let mut rng = ChaCha8Rng::seed_from_u64(17);
    let mut recorder = Recorder::default();
    let driver = Driver::new(Cadence::new(NonZeroUsize::new(5).expect("non-zero")));

    let report = driver
        .run_generation(&mut maze, &mut rng, &mut recorder)
        .expect("generation run");

    assert_eq!(report.frames, (report.steps + 4) / 5);
    for (index, frame) in recorder.frames.iter().enumerate() {
        if index + 1 < recorder.frames.len() {
            assert_eq!(frame % 5, 0);
        } else {
            assert_eq!(*frame, report.steps);
        }
    }
}

#[test]
fn solution_run_finds_the_exit_of_a_generated_maze() {
    let mut maze = maze(12, 8);
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let driver = Driver::default();

    let _ = driver
        .run_generation(&mut maze, &mut rng, &mut NullObserver)
        .expect("generation run");
    let mut recorder = Recorder::default();
    let report = driver
        .run_solution(&mut maze, &mut recorder)
        .expect("solution run");

    assert_eq!(report.outcome, Outcome::Found);
    assert_eq!(report.path.first(), Some(&maze.entrance()));
    assert_eq!(report.path.last(), Some(&maze.exit()));
    assert_eq!(report.advanced - report.backtracked + 1, report.path.len());
    assert_eq!(recorder.solution.last(), Some(&SolutionStep::Found));
    assert_eq!(recorder.solution.len(), report.steps);
}

#[test]
fn solution_run_on_uncarved_maze_is_exhausted() {
    let mut maze = maze(3, 3);

    let report = Driver::default()
        .run_solution(&mut maze, &mut NullObserver)
        .expect("solution run");

    assert_eq!(report.outcome, Outcome::Exhausted);
    assert!(report.path.is_empty());
    assert_eq!(report.steps, 1);
}

#[test]
fn generation_after_solving_propagates_maze_error() {
    let mut maze = maze(2, 2);
    let driver = Driver::default();
    let _ = driver
        .run_solution(&mut maze, &mut NullObserver)
        .expect("solution run");

    let result = driver.run_generation(
        &mut maze,
        &mut ChaCha8Rng::seed_from_u64(1),
        &mut NullObserver,
    );
    assert_eq!(result, Err(MazeError::AlreadySolving));
}

#[test]
fn observer_failure_stops_the_run() {
    let mut maze = maze(4, 4);
    let mut observer = ClosesAfter { remaining: 3 };

    let result = Driver::default().run_generation(
        &mut maze,
        &mut ChaCha8Rng::seed_from_u64(9),
        &mut observer,
    );

    assert_eq!(result, Err(CanvasError::Closed));
    assert_eq!(maze.phase(), Phase::Generating);
    assert_eq!(
        Driver::default().run_solution(&mut maze, &mut NullObserver),
        Err(MazeError::AlreadyGenerating)
    );
}

#[test]
fn same_seed_replays_identically_through_the_driver() {
    let run = |seed: u64| {
        let mut maze = maze(9, 9);
        let mut recorder = Recorder::default();
        let driver = Driver::new(Cadence::per_percent(81));
        let _ = driver
            .run_generation(&mut maze, &mut ChaCha8Rng::seed_from_u64(seed), &mut recorder)
            .expect("generation run");
        let report = driver
            .run_solution(&mut maze, &mut recorder)
            .expect("solution run");
        (recorder.generation, recorder.solution, report)
    };

    assert_eq!(run(2024), run(2024));
}
