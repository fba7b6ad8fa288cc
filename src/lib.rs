//! Gridputt - a grid-based mini golf simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics stepper, shot resolution,
//!   trajectory prediction)
//! - `session`: Game session state machine driving the stepper
//!
//! The crate has no rendering or input dependencies: a host translates
//! pointer events into grid-space drag commands, calls
//! [`session::GameSession::tick`] once per animation frame while a shot is
//! in flight, and reads ball positions back through a tick subscription.

pub mod session;
pub mod sim;

pub use session::{EditError, GameSession, Phase, SessionConfig, TickOutcome};
pub use sim::{BallState, GridModel, Hole, ShotInput, SimConfig, SimulationResult};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Default board side length in cells
    pub const GRID_SIZE: usize = 15;

    /// Fraction of speed retained, sign-reversed, after a collision
    pub const RESTITUTION: f32 = 0.8;
    /// Per-tick multiplicative velocity decay
    pub const FRICTION: f32 = 0.98;
    /// Ball is captured within this distance of the hole...
    pub const CAPTURE_RADIUS: f32 = 0.5;
    /// ...but only below this speed - faster balls roll over the hole.
    /// Sits well above `STOP_THRESHOLD` so a ball decelerating onto the
    /// hole drops in instead of stopping on the lip.
    pub const CAPTURE_SPEED_THRESHOLD: f32 = 0.25;
    /// Speed below which a rolling ball comes to rest (grid-units/tick)
    pub const STOP_THRESHOLD: f32 = 0.02;
    /// Hard cap on simulation steps per shot
    pub const MAX_STEPS_PER_SHOT: u32 = 500;

    /// Drags shorter than this resolve to no shot (grid units)
    pub const MIN_DRAG_DISTANCE: f32 = 0.1;
    /// Drag distance to launch power conversion factor
    pub const POWER_SCALE: f32 = 0.25;
    /// Launch power cap (grid-units/tick)
    pub const MAX_POWER: f32 = 1.0;
}

/// Integer cell containing a continuous grid position
#[inline]
pub fn cell_of(pos: Vec2) -> (i32, i32) {
    (pos.x.floor() as i32, pos.y.floor() as i32)
}
