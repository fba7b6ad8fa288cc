//! Drag-to-shot resolution
//!
//! Converts a raw drag vector (already mapped to grid units by the input
//! layer) into the engine-ready [`ShotInput`]. Pulling back launches
//! forward: the shot direction runs from the drag end toward the drag
//! start.

use glam::Vec2;

use super::config::ShotConfig;
use super::state::ShotInput;

/// Resolve a drag into a shot, or `None` when the drag is shorter than the
/// minimum distance. A `None` is not a stroke; the caller must leave the
/// stroke count alone.
pub fn resolve(drag_start: Vec2, drag_end: Vec2, cfg: &ShotConfig) -> Option<ShotInput> {
    let pull = drag_start - drag_end;
    let dist = pull.length();
    if dist < cfg.min_drag_distance {
        return None;
    }

    let power = (dist * cfg.power_scale).min(cfg.max_power);
    Some(ShotInput {
        dir: pull / dist,
        power,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> ShotConfig {
        ShotConfig::default()
    }

    #[test]
    fn test_zero_drag_is_no_shot() {
        let p = Vec2::new(3.0, 3.0);
        assert_eq!(resolve(p, p, &cfg()), None);
    }

    #[test]
    fn test_sub_threshold_drag_is_no_shot() {
        let start = Vec2::new(3.0, 3.0);
        let end = Vec2::new(3.05, 3.0);
        assert_eq!(resolve(start, end, &cfg()), None);
    }

    #[test]
    fn test_pull_back_launches_forward() {
        // Drag from the ball down-left; shot goes up-right
        let start = Vec2::new(3.0, 3.0);
        let end = Vec2::new(1.0, 1.0);

        let shot = resolve(start, end, &cfg()).unwrap();
        assert!(shot.dir.x > 0.0 && shot.dir.y > 0.0);
        assert!((shot.dir.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_power_scales_with_distance_and_caps() {
        let start = Vec2::ZERO;

        let short = resolve(start, Vec2::new(1.0, 0.0), &cfg()).unwrap();
        assert!((short.power - 0.25).abs() < 1e-6);

        let long = resolve(start, Vec2::new(2.0, 0.0), &cfg()).unwrap();
        assert!((long.power - 0.5).abs() < 1e-6);

        // Anything past 4 units of drag saturates at max power
        let huge = resolve(start, Vec2::new(40.0, 0.0), &cfg()).unwrap();
        assert_eq!(huge.power, 1.0);
    }
}
