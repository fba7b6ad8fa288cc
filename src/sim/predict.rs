//! Aim preview trajectory
//!
//! Unrolls the same [`advance`](super::step::advance) the session uses for
//! live shots, so the preview polyline can never drift from what the shot
//! will actually do. The predictor owns no physics of its own; keeping a
//! separate preview formula is how aim lines end up lying.

use super::config::SimConfig;
use super::grid::GridModel;
use super::state::{BallState, Hole, ShotInput, SimulationResult};
use super::step::{StepOutcome, advance};

/// Simulate `shot` launched from `ball.pos` without committing any state.
///
/// The path holds the ball position after each tick, in order - replaying
/// the same shot through the session for `path.len()` ticks visits exactly
/// these positions.
pub fn predict(
    ball: BallState,
    shot: &ShotInput,
    grid: &GridModel,
    hole: &Hole,
    cfg: &SimConfig,
    max_steps: u32,
) -> SimulationResult {
    let mut ball = BallState::launched(ball.pos, shot);
    let mut path = Vec::new();
    let mut captured = false;

    for _ in 0..max_steps {
        let step = advance(ball, grid, hole, cfg);
        ball = step.ball;
        path.push(ball.pos);
        match step.outcome {
            StepOutcome::Rolling => {}
            StepOutcome::Stopped => break,
            StepOutcome::Captured => {
                captured = true;
                break;
            }
        }
    }

    SimulationResult { path, captured }
}
