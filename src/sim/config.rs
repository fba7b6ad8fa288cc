//! Tunable physics and input constants
//!
//! One constant set serves both live execution and the aim preview; a host
//! can override any value per session, but never per call site.

use serde::{Deserialize, Serialize};

use crate::consts;

/// Stepper tuning
///
/// `Default` is the reference constant set: restitution 0.8, friction 0.98
/// per tick, capture below 0.25 grid-units/tick, stop below 0.02, at most
/// 500 steps per shot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    /// Fraction of a velocity component retained (sign-reversed) by a
    /// collision, in `(0, 1)`
    pub restitution: f32,
    /// Per-tick multiplicative velocity decay, in `(0, 1)`
    pub friction: f32,
    /// Ball must be slower than this to drop into the hole
    pub capture_speed_threshold: f32,
    /// Ball slower than this comes to rest
    pub stop_threshold: f32,
    /// Step budget per shot; exhaustion is treated as a stop
    pub max_steps_per_shot: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            restitution: consts::RESTITUTION,
            friction: consts::FRICTION,
            capture_speed_threshold: consts::CAPTURE_SPEED_THRESHOLD,
            stop_threshold: consts::STOP_THRESHOLD,
            max_steps_per_shot: consts::MAX_STEPS_PER_SHOT,
        }
    }
}

/// Drag resolution tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShotConfig {
    /// Drags shorter than this are not shots (grid units)
    pub min_drag_distance: f32,
    /// Power per grid unit of drag distance
    pub power_scale: f32,
    /// Launch power cap (grid-units/tick)
    pub max_power: f32,
}

impl Default for ShotConfig {
    fn default() -> Self {
        Self {
            min_drag_distance: consts::MIN_DRAG_DISTANCE,
            power_scale: consts::POWER_SCALE,
            max_power: consts::MAX_POWER,
        }
    }
}
