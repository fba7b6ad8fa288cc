//! Fixed timestep physics stepper
//!
//! Advances one ball state by one tick against the barrier grid, the board
//! boundary, and the hole. Pure and deterministic: identical inputs always
//! produce identical outputs, which is what lets the aim preview share this
//! exact function with live execution.
//!
//! Order within a tick: integrate, axis-separated barrier probes, boundary
//! clamp, friction, capture test, stop test.

use glam::Vec2;

use super::config::SimConfig;
use super::grid::GridModel;
use super::state::{BallState, Hole};

/// What the tick concluded for the ball
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Still rolling
    Rolling,
    /// Dropped below the stop threshold and came to rest
    Stopped,
    /// Close enough and slow enough at the hole; ball snapped onto it
    Captured,
}

/// Result of advancing one tick
#[derive(Debug, Clone, Copy)]
pub struct Step {
    pub ball: BallState,
    /// Capture/stop side channel; the ball state alone can't distinguish
    /// a stop from a hole-out
    pub outcome: StepOutcome,
    /// True when any barrier or boundary reflection happened this tick
    pub collided: bool,
}

/// Advance `ball` by one fixed tick.
///
/// The barrier test probes each axis of the move independently:
/// `(candidate.x, pos.y)` and `(pos.x, candidate.y)`. A blocked axis keeps
/// its old coordinate and reflects that velocity component by the
/// restitution coefficient; the open axis moves freely. This resolves
/// glancing and corner hits without a continuous sweep, cheap enough to run
/// inside the predictor's unrolled loop.
///
/// The returned position always lies in `[0, N-1]` on both axes.
pub fn advance(ball: BallState, grid: &GridModel, hole: &Hole, cfg: &SimConfig) -> Step {
    if !ball.moving {
        return Step {
            ball,
            outcome: StepOutcome::Stopped,
            collided: false,
        };
    }

    let mut pos = ball.pos;
    let mut vel = ball.vel;
    let mut collided = false;
    let max = (grid.size() - 1) as f32;

    // Integrate (velocity is already per-tick)
    let cand = pos + vel;

    // Axis-separated barrier probes
    let hit_x = grid.has_barrier(cand.x, pos.y);
    let hit_y = grid.has_barrier(pos.x, cand.y);
    // A perfect diagonal into a blocked corner cell slips past both
    // single-axis probes; treat it as a corner hit on both axes.
    let hit_corner = !hit_x && !hit_y && grid.has_barrier(cand.x, cand.y);

    if hit_x || hit_corner {
        vel.x = -vel.x * cfg.restitution;
        collided = true;
    } else {
        pos.x = cand.x;
    }
    if hit_y || hit_corner {
        vel.y = -vel.y * cfg.restitution;
        collided = true;
    } else {
        pos.y = cand.y;
    }

    // Boundary clamp; reflected component always points back into bounds
    if pos.x < 0.0 {
        pos.x = 0.0;
        vel.x = vel.x.abs() * cfg.restitution;
        collided = true;
    } else if pos.x > max {
        pos.x = max;
        vel.x = -vel.x.abs() * cfg.restitution;
        collided = true;
    }
    if pos.y < 0.0 {
        pos.y = 0.0;
        vel.y = vel.y.abs() * cfg.restitution;
        collided = true;
    } else if pos.y > max {
        pos.y = max;
        vel.y = -vel.y.abs() * cfg.restitution;
        collided = true;
    }

    // Friction, once per tick, after collision resolution
    vel *= cfg.friction;

    // Capture: close enough and slow enough
    if pos.distance(hole.pos) < hole.capture_radius && vel.length() < cfg.capture_speed_threshold {
        return Step {
            ball: BallState {
                pos: hole.pos,
                vel: Vec2::ZERO,
                moving: false,
            },
            outcome: StepOutcome::Captured,
            collided,
        };
    }

    // Stop
    if vel.length() < cfg.stop_threshold {
        return Step {
            ball: BallState {
                pos,
                vel: Vec2::ZERO,
                moving: false,
            },
            outcome: StepOutcome::Stopped,
            collided,
        };
    }

    Step {
        ball: BallState {
            pos,
            vel,
            moving: true,
        },
        outcome: StepOutcome::Rolling,
        collided,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn cfg() -> SimConfig {
        SimConfig::default()
    }

    fn far_hole() -> Hole {
        Hole::new(Vec2::new(100.0, 100.0))
    }

    #[test]
    fn test_advance_at_rest_is_identity() {
        let grid = GridModel::empty(10);
        let ball = BallState::at_rest(Vec2::new(4.5, 4.5));

        let step = advance(ball, &grid, &far_hole(), &cfg());
        assert_eq!(step.ball, ball);
        assert_eq!(step.outcome, StepOutcome::Stopped);
        assert!(!step.collided);
    }

    #[test]
    fn test_friction_only_decay() {
        let grid = GridModel::empty(10);
        let ball = BallState {
            pos: Vec2::new(4.0, 4.0),
            vel: Vec2::new(0.5, -0.25),
            moving: true,
        };

        let step = advance(ball, &grid, &far_hole(), &cfg());
        assert!(!step.collided);
        assert_eq!(step.ball.pos, Vec2::new(4.5, 3.75));
        assert_eq!(step.ball.vel, Vec2::new(0.5 * 0.98, -0.25 * 0.98));
        assert_eq!(step.outcome, StepOutcome::Rolling);
    }

    #[test]
    fn test_barrier_blocks_x_axis_only() {
        let mut grid = GridModel::empty(10);
        grid.set((3, 1), true);
        let ball = BallState {
            pos: Vec2::new(2.5, 1.5),
            vel: Vec2::new(1.0, 0.0),
            moving: true,
        };

        let step = advance(ball, &grid, &far_hole(), &cfg());
        assert!(step.collided);
        // x-move rejected, vx reflected by restitution then friction
        assert_eq!(step.ball.pos.x, 2.5);
        assert_eq!(step.ball.vel.x, -1.0 * 0.8 * 0.98);
        // Ball never enters the barrier cell
        assert_ne!(crate::cell_of(step.ball.pos), (3, 1));
    }

    #[test]
    fn test_barrier_blocks_y_axis_only() {
        let mut grid = GridModel::empty(10);
        grid.set((2, 4), true);
        let ball = BallState {
            pos: Vec2::new(2.5, 3.6),
            vel: Vec2::new(0.0, 0.8),
            moving: true,
        };

        let step = advance(ball, &grid, &far_hole(), &cfg());
        assert!(step.collided);
        assert_eq!(step.ball.pos.y, 3.6);
        assert_eq!(step.ball.vel.y, -0.8 * 0.8 * 0.98);
    }

    #[test]
    fn test_diagonal_corner_rejects_both_axes() {
        let mut grid = GridModel::empty(10);
        // Only the corner cell is blocked; both single-axis probes are open
        grid.set((3, 3), true);
        let ball = BallState {
            pos: Vec2::new(2.5, 2.5),
            vel: Vec2::new(1.0, 1.0),
            moving: true,
        };

        let step = advance(ball, &grid, &far_hole(), &cfg());
        assert!(step.collided);
        assert_eq!(step.ball.pos, Vec2::new(2.5, 2.5));
        assert!(step.ball.vel.x < 0.0);
        assert!(step.ball.vel.y < 0.0);
        assert_ne!(crate::cell_of(step.ball.pos), (3, 3));
    }

    #[test]
    fn test_boundary_clamp_and_reflect() {
        let grid = GridModel::empty(10);
        let ball = BallState {
            pos: Vec2::new(8.9, 5.0),
            vel: Vec2::new(0.5, 0.0),
            moving: true,
        };

        let step = advance(ball, &grid, &far_hole(), &cfg());
        assert!(step.collided);
        assert_eq!(step.ball.pos.x, 9.0);
        // Reflected back into bounds
        assert!(step.ball.vel.x < 0.0);

        let ball = BallState {
            pos: Vec2::new(0.1, 5.0),
            vel: Vec2::new(-0.5, 0.0),
            moving: true,
        };
        let step = advance(ball, &grid, &far_hole(), &cfg());
        assert_eq!(step.ball.pos.x, 0.0);
        assert!(step.ball.vel.x > 0.0);
    }

    #[test]
    fn test_capture_inside_radius_when_slow() {
        let grid = GridModel::empty(10);
        let hole = Hole::new(Vec2::new(5.0, 5.0));
        // Just inside the capture radius, barely moving
        let ball = BallState {
            pos: Vec2::new(5.3, 5.0),
            vel: Vec2::new(0.001, 0.0),
            moving: true,
        };

        let step = advance(ball, &grid, &hole, &cfg());
        assert_eq!(step.outcome, StepOutcome::Captured);
        assert_eq!(step.ball.pos, hole.pos);
        assert_eq!(step.ball.vel, Vec2::ZERO);
        assert!(!step.ball.moving);
    }

    #[test]
    fn test_no_capture_outside_radius() {
        let grid = GridModel::empty(10);
        let hole = Hole::new(Vec2::new(5.0, 5.0));
        // Just outside the capture radius, same crawl speed
        let ball = BallState {
            pos: Vec2::new(5.52, 5.0),
            vel: Vec2::new(0.001, 0.0),
            moving: true,
        };

        let step = advance(ball, &grid, &hole, &cfg());
        assert_eq!(step.outcome, StepOutcome::Stopped);
        assert_ne!(step.ball.pos, hole.pos);
    }

    #[test]
    fn test_fast_ball_rolls_over_hole() {
        let grid = GridModel::empty(10);
        let hole = Hole::new(Vec2::new(5.0, 5.0));
        let ball = BallState {
            pos: Vec2::new(4.7, 5.0),
            vel: Vec2::new(0.6, 0.0),
            moving: true,
        };

        // Lands at 5.3 (inside the radius) but far too fast to drop
        let step = advance(ball, &grid, &hole, &cfg());
        assert_eq!(step.outcome, StepOutcome::Rolling);
        assert_ne!(step.ball.pos, hole.pos);
    }

    #[test]
    fn test_stop_below_threshold() {
        let grid = GridModel::empty(10);
        let ball = BallState {
            pos: Vec2::new(4.0, 4.0),
            vel: Vec2::new(0.015, 0.0),
            moving: true,
        };

        let step = advance(ball, &grid, &far_hole(), &cfg());
        assert_eq!(step.outcome, StepOutcome::Stopped);
        assert_eq!(step.ball.vel, Vec2::ZERO);
        assert!(!step.ball.moving);
    }

    proptest! {
        /// Output position stays inside the board for any state the host
        /// could reach, barriers or not.
        #[test]
        fn prop_position_stays_in_bounds(
            px in 0.0f32..=9.0,
            py in 0.0f32..=9.0,
            vx in -3.0f32..=3.0,
            vy in -3.0f32..=3.0,
            seed in 0u64..1000,
        ) {
            let grid = GridModel::scatter(10, seed, 12, &[]);
            let ball = BallState {
                pos: Vec2::new(px, py),
                vel: Vec2::new(vx, vy),
                moving: true,
            };

            let step = advance(ball, &grid, &far_hole(), &cfg());
            prop_assert!(step.ball.pos.x >= 0.0 && step.ball.pos.x <= 9.0);
            prop_assert!(step.ball.pos.y >= 0.0 && step.ball.pos.y <= 9.0);
        }

        /// Away from walls and barriers, a tick never adds energy: speed
        /// decays by exactly the friction factor (or to zero on a stop).
        #[test]
        fn prop_friction_never_adds_energy(
            px in 3.0f32..=6.0,
            py in 3.0f32..=6.0,
            vx in -1.0f32..=1.0,
            vy in -1.0f32..=1.0,
        ) {
            let grid = GridModel::empty(10);
            let ball = BallState {
                pos: Vec2::new(px, py),
                vel: Vec2::new(vx, vy),
                moving: true,
            };

            let step = advance(ball, &grid, &far_hole(), &cfg());
            prop_assert!(!step.collided);
            prop_assert!(step.ball.speed() <= 0.98 * ball.speed() + 1e-6);
        }

        /// Collisions scale the reflected component by restitution < 1, so
        /// post-collision speed never exceeds pre-collision speed.
        #[test]
        fn prop_collision_never_adds_energy(
            px in 0.0f32..=9.0,
            py in 0.0f32..=9.0,
            vx in -2.0f32..=2.0,
            vy in -2.0f32..=2.0,
            seed in 0u64..1000,
        ) {
            let grid = GridModel::scatter(10, seed, 12, &[]);
            let ball = BallState {
                pos: Vec2::new(px, py),
                vel: Vec2::new(vx, vy),
                moving: true,
            };

            let step = advance(ball, &grid, &far_hole(), &cfg());
            prop_assert!(step.ball.speed() <= ball.speed() + 1e-6);
        }
    }
}
