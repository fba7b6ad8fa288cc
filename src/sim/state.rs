//! Simulation value types
//!
//! Plain data owned by the session and threaded through the stepper.
//! Everything here is serializable so a host can snapshot and inspect a
//! run; the types carry no behavior beyond construction and derived
//! quantities.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::cell_of;
use crate::consts;

/// Ball kinematics for one tick
///
/// Invariant: `moving == false` implies `vel == Vec2::ZERO`. Only the
/// stepper and `GameSession` reset/launch paths construct these.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BallState {
    /// Position in grid units, each component in `[0, N-1]`
    pub pos: Vec2,
    /// Velocity in grid-units per tick
    pub vel: Vec2,
    pub moving: bool,
}

impl BallState {
    /// Ball at rest at `pos`
    pub fn at_rest(pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            moving: false,
        }
    }

    /// Ball launched from `pos` with a resolved shot's initial velocity
    pub fn launched(pos: Vec2, shot: &ShotInput) -> Self {
        Self {
            pos,
            vel: shot.velocity(),
            moving: true,
        }
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }
}

/// The hole: a capture disc at a fixed position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hole {
    pub pos: Vec2,
    pub capture_radius: f32,
}

impl Hole {
    /// Hole at `pos` with the default capture radius
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            capture_radius: consts::CAPTURE_RADIUS,
        }
    }

    /// Integer cell the hole occupies
    #[inline]
    pub fn cell(&self) -> (i32, i32) {
        cell_of(self.pos)
    }
}

/// Engine-ready shot: unit direction and launch power
///
/// Never a raw drag vector - `shot::resolve` is the only producer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShotInput {
    /// Unit launch direction
    pub dir: Vec2,
    /// Launch speed in grid-units per tick, `>= 0`
    pub power: f32,
}

impl ShotInput {
    /// Initial velocity fed to the stepper
    #[inline]
    pub fn velocity(&self) -> Vec2 {
        self.dir * self.power
    }
}

/// Predictor output: the visited positions and whether the shot holes out
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    /// Ball position after each simulated tick, in order
    pub path: Vec<Vec2>,
    pub captured: bool,
}
