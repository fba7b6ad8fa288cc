//! Deterministic simulation module
//!
//! All physics lives here. This module must be pure and deterministic:
//! - Fixed timestep only (one call to [`advance`] = one tick)
//! - Seeded RNG only (course scatter generation)
//! - No rendering or platform dependencies
//!
//! Both live execution and the aim preview go through the same [`advance`];
//! nothing else in the crate moves the ball. That single shared stepper is
//! what keeps the preview polyline identical to the shot it predicts.

pub mod config;
pub mod grid;
pub mod predict;
pub mod shot;
pub mod state;
pub mod step;

pub use config::{ShotConfig, SimConfig};
pub use grid::GridModel;
pub use predict::predict;
pub use shot::resolve;
pub use state::{BallState, Hole, ShotInput, SimulationResult};
pub use step::{Step, StepOutcome, advance};
