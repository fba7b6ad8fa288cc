//! Gridputt entry point
//!
//! Native demo host: stands in for the input and rendering layers by
//! scripting one aim-drag-release cycle and ticking the session to rest,
//! logging what a renderer would draw each frame.

use glam::Vec2;
use gridputt::session::{GameSession, SessionConfig, TickOutcome};

fn main() {
    env_logger::init();
    log::info!("gridputt demo starting");

    let config = SessionConfig {
        course_seed: Some(0xC0FFEE),
        barrier_count: 18,
        ..SessionConfig::default()
    };
    let mut session = GameSession::new(config);
    log::info!(
        "course ready: {0}x{0} cells, {1} barriers, hole at ({2:.1}, {3:.1})",
        session.grid().size(),
        session.grid().barrier_count(),
        session.hole().pos.x,
        session.hole().pos.y,
    );

    session.subscribe(|snap| {
        log::debug!(
            "frame: pos=({:.3}, {:.3}) strokes={} phase={:?}",
            snap.position.x,
            snap.position.y,
            snap.strokes,
            snap.phase
        );
    });

    // Aim: pull back down-left of the ball, launching toward the hole
    let ball_pos = session.ball().pos;
    session.start_drag(ball_pos);
    session.update_drag(ball_pos - Vec2::new(3.0, 3.0));
    if let Some(preview) = session.preview() {
        log::info!(
            "aim preview: {} points, captured={}",
            preview.path.len(),
            preview.captured
        );
    }
    let shot = session.end_drag();
    log::info!("released: {shot:?}");

    // Host tick loop; one stepper call per frame
    let mut ticks = 0u32;
    loop {
        ticks += 1;
        match session.tick() {
            TickOutcome::Rolling => {}
            TickOutcome::Stopped => {
                let pos = session.ball().pos;
                log::info!("ball at rest after {ticks} ticks at ({:.3}, {:.3})", pos.x, pos.y);
                break;
            }
            TickOutcome::Won { strokes } => {
                log::info!("holed out in {strokes} stroke(s) after {ticks} ticks");
                break;
            }
            TickOutcome::Idle => break,
        }
    }

    if let Ok(json) = serde_json::to_string_pretty(&session.summary()) {
        println!("{json}");
    }
}
