//! Game session state machine
//!
//! Owns the ball, course, and stroke count, and drives the stepper one tick
//! at a time while a shot is in flight. Hosts interact through synchronous
//! command methods plus a tick-subscription callback; there is no internal
//! scheduler, so `reset_game` leaves nothing in flight to cancel - a stale
//! host tick after a reset hits the phase gate and does nothing.
//!
//! Phases: `AtRest -> Aiming -> Moving -> {Won | AtRest}`.

use glam::Vec2;
use serde::Serialize;
use thiserror::Error;

use crate::cell_of;
use crate::consts;
use crate::sim::{
    BallState, GridModel, Hole, ShotConfig, ShotInput, SimConfig, SimulationResult, StepOutcome,
    advance, predict, resolve,
};

/// Session lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Phase {
    /// Idle; accepts shots and course edits
    AtRest,
    /// Drag in progress; the preview is recomputed on every drag update
    Aiming,
    /// Shot in flight; one stepper call per `tick`
    Moving,
    /// Ball holed out; terminal until `reset_game`
    Won,
}

/// Why a command was rejected. Rejections never change state; callers may
/// ignore them or surface them as they see fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("shot in flight")]
    ShotInFlight,
    #[error("session is won; reset first")]
    SessionOver,
    #[error("cell is outside the board")]
    OutOfBounds,
    #[error("cell is occupied by the ball")]
    BallCell,
    #[error("cell is occupied by the hole")]
    HoleCell,
    #[error("cell holds a barrier")]
    BarrierCell,
}

/// What a host-driven tick concluded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Nothing to advance in the current phase
    Idle,
    /// Ball still rolling; call again next frame
    Rolling,
    /// Ball came to rest without holing out
    Stopped,
    /// Ball holed out; carries the final stroke count for the win banner
    Won { strokes: u32 },
}

/// Observer payload, delivered after every tick and after every predictor
/// run while aiming
#[derive(Debug, Clone, Copy, Serialize)]
pub struct TickSnapshot<'a> {
    pub position: Vec2,
    pub strokes: u32,
    pub phase: Phase,
    /// Current aim preview, present while a resolvable drag is held
    pub preview: Option<&'a SimulationResult>,
}

/// Serializable end-of-run summary for host logging
#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary {
    pub phase: Phase,
    pub strokes: u32,
    pub ball: BallState,
    pub hole: Hole,
    pub barriers: usize,
}

/// Session construction parameters
#[derive(Debug, Clone, Serialize)]
pub struct SessionConfig {
    /// Board side length in cells
    pub grid_size: usize,
    /// Ball start position (also the reset position)
    pub ball_start: Vec2,
    /// Hole position; reset restores it here
    pub hole_pos: Vec2,
    pub capture_radius: f32,
    /// When set, the course is scattered deterministically from this seed
    /// (and restored on reset); when `None` the board starts empty and
    /// hand-painted barriers survive resets.
    pub course_seed: Option<u64>,
    /// Barrier cells to scatter when `course_seed` is set
    pub barrier_count: usize,
    pub sim: SimConfig,
    pub shot: ShotConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        let n = consts::GRID_SIZE;
        Self {
            grid_size: n,
            ball_start: Vec2::new(1.0, 1.0),
            hole_pos: Vec2::new((n - 2) as f32, (n - 2) as f32),
            capture_radius: consts::CAPTURE_RADIUS,
            course_seed: None,
            barrier_count: 0,
            sim: SimConfig::default(),
            shot: ShotConfig::default(),
        }
    }
}

struct Drag {
    start: Vec2,
    current: Vec2,
}

/// One mini-golf session: ball, course, hole, strokes, and the phase
/// machine that sequences them
pub struct GameSession {
    config: SessionConfig,
    phase: Phase,
    ball: BallState,
    grid: GridModel,
    hole: Hole,
    strokes: u32,
    drag: Option<Drag>,
    preview: Option<SimulationResult>,
    steps_this_shot: u32,
    observers: Vec<Box<dyn FnMut(TickSnapshot<'_>)>>,
}

impl GameSession {
    pub fn new(config: SessionConfig) -> Self {
        let grid = Self::build_course(&config);
        let ball = BallState::at_rest(config.ball_start);
        let hole = Hole {
            pos: config.hole_pos,
            capture_radius: config.capture_radius,
        };
        Self {
            config,
            phase: Phase::AtRest,
            ball,
            grid,
            hole,
            strokes: 0,
            drag: None,
            preview: None,
            steps_this_shot: 0,
            observers: Vec::new(),
        }
    }

    fn build_course(config: &SessionConfig) -> GridModel {
        match config.course_seed {
            Some(seed) => GridModel::scatter(
                config.grid_size,
                seed,
                config.barrier_count,
                &[cell_of(config.ball_start), cell_of(config.hole_pos)],
            ),
            None => GridModel::empty(config.grid_size),
        }
    }

    // --- Aiming commands (input layer) ---

    /// Begin a drag at `point` (grid units). Accepted only while at rest.
    pub fn start_drag(&mut self, point: Vec2) -> bool {
        if self.phase != Phase::AtRest {
            return false;
        }
        self.phase = Phase::Aiming;
        self.drag = Some(Drag {
            start: point,
            current: point,
        });
        true
    }

    /// Move the held drag to `point`, recomputing the aim preview with the
    /// same stepper a committed shot will use. Ignored when not aiming.
    pub fn update_drag(&mut self, point: Vec2) {
        let Some(drag) = self.drag.as_mut() else {
            return;
        };
        drag.current = point;

        let shot = resolve(drag.start, drag.current, &self.config.shot);
        self.preview = shot.map(|shot| {
            predict(
                self.ball,
                &shot,
                &self.grid,
                &self.hole,
                &self.config.sim,
                self.config.sim.max_steps_per_shot,
            )
        });
        self.notify();
    }

    /// Release the drag. A drag above the minimum distance becomes a shot:
    /// the stroke count goes up by exactly one and the ball launches.
    /// Anything shorter is a no-op back to rest.
    pub fn end_drag(&mut self) -> Option<ShotInput> {
        if self.phase != Phase::Aiming {
            return None;
        }
        let drag = self.drag.take()?;
        self.preview = None;

        match resolve(drag.start, drag.current, &self.config.shot) {
            Some(shot) => {
                self.strokes += 1;
                self.ball = BallState::launched(self.ball.pos, &shot);
                self.steps_this_shot = 0;
                self.phase = Phase::Moving;
                log::info!(
                    "stroke {} committed: dir=({:.3}, {:.3}) power={:.3}",
                    self.strokes,
                    shot.dir.x,
                    shot.dir.y,
                    shot.power
                );
                Some(shot)
            }
            None => {
                log::debug!("drag below threshold, no stroke");
                self.phase = Phase::AtRest;
                None
            }
        }
    }

    // --- Ticking (host scheduler) ---

    /// Advance the in-flight shot by one fixed tick. A no-op outside the
    /// `Moving` phase, which is what makes stale host ticks after a reset
    /// harmless. Exhausting the step budget counts as a stop.
    pub fn tick(&mut self) -> TickOutcome {
        if self.phase != Phase::Moving {
            return TickOutcome::Idle;
        }

        let step = advance(self.ball, &self.grid, &self.hole, &self.config.sim);
        self.ball = step.ball;
        self.steps_this_shot += 1;

        let outcome = match step.outcome {
            StepOutcome::Captured => {
                self.phase = Phase::Won;
                log::info!("holed out in {} strokes", self.strokes);
                TickOutcome::Won {
                    strokes: self.strokes,
                }
            }
            StepOutcome::Stopped => {
                self.phase = Phase::AtRest;
                TickOutcome::Stopped
            }
            StepOutcome::Rolling => {
                if self.steps_this_shot >= self.config.sim.max_steps_per_shot {
                    log::warn!(
                        "shot exceeded {} steps, forcing stop",
                        self.config.sim.max_steps_per_shot
                    );
                    self.ball.vel = Vec2::ZERO;
                    self.ball.moving = false;
                    self.phase = Phase::AtRest;
                    TickOutcome::Stopped
                } else {
                    TickOutcome::Rolling
                }
            }
        };
        self.notify();
        outcome
    }

    // --- Edit commands ---

    /// Flip a barrier cell. Rejected mid-shot, out of bounds, or on the
    /// ball's or hole's current cell.
    pub fn toggle_barrier(&mut self, cell: (i32, i32)) -> Result<(), EditError> {
        self.require_at_rest()?;
        if !self.grid.in_bounds(cell) {
            return Err(EditError::OutOfBounds);
        }
        if cell == cell_of(self.ball.pos) {
            return Err(EditError::BallCell);
        }
        if cell == self.hole.cell() {
            return Err(EditError::HoleCell);
        }
        self.grid.toggle(cell);
        Ok(())
    }

    /// Move the hole to a cell. Rejected mid-shot, out of bounds, onto a
    /// barrier, or onto the ball's current cell.
    pub fn move_hole(&mut self, cell: (i32, i32)) -> Result<(), EditError> {
        self.require_at_rest()?;
        if !self.grid.in_bounds(cell) {
            return Err(EditError::OutOfBounds);
        }
        if self.grid.is_set(cell) {
            return Err(EditError::BarrierCell);
        }
        if cell == cell_of(self.ball.pos) {
            return Err(EditError::BallCell);
        }
        self.hole.pos = Vec2::new(cell.0 as f32, cell.1 as f32);
        Ok(())
    }

    fn require_at_rest(&self) -> Result<(), EditError> {
        match self.phase {
            Phase::AtRest => Ok(()),
            Phase::Won => Err(EditError::SessionOver),
            Phase::Aiming | Phase::Moving => Err(EditError::ShotInFlight),
        }
    }

    /// Reinitialize ball, hole, and stroke count. A seeded course is
    /// regenerated; a hand-painted one is left standing.
    pub fn reset_game(&mut self) {
        self.ball = BallState::at_rest(self.config.ball_start);
        self.hole = Hole {
            pos: self.config.hole_pos,
            capture_radius: self.config.capture_radius,
        };
        if self.config.course_seed.is_some() {
            self.grid = Self::build_course(&self.config);
        }
        self.strokes = 0;
        self.drag = None;
        self.preview = None;
        self.steps_this_shot = 0;
        self.phase = Phase::AtRest;
        log::info!("session reset");
    }

    // --- Observation ---

    /// Register a callback invoked after every tick and after every
    /// predictor run
    pub fn subscribe(&mut self, f: impl FnMut(TickSnapshot<'_>) + 'static) {
        self.observers.push(Box::new(f));
    }

    fn notify(&mut self) {
        let mut observers = std::mem::take(&mut self.observers);
        let snapshot = TickSnapshot {
            position: self.ball.pos,
            strokes: self.strokes,
            phase: self.phase,
            preview: self.preview.as_ref(),
        };
        for f in observers.iter_mut() {
            f(snapshot);
        }
        self.observers = observers;
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn strokes(&self) -> u32 {
        self.strokes
    }

    pub fn ball(&self) -> &BallState {
        &self.ball
    }

    pub fn grid(&self) -> &GridModel {
        &self.grid
    }

    pub fn hole(&self) -> &Hole {
        &self.hole
    }

    /// Aim preview from the most recent drag update, if any
    pub fn preview(&self) -> Option<&SimulationResult> {
        self.preview.as_ref()
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            phase: self.phase,
            strokes: self.strokes,
            ball: self.ball,
            hole: self.hole,
            barriers: self.grid.barrier_count(),
        }
    }
}
