//! Headless demo runner
//!
//! Plays a seeded run with scripted input at real tick rate (but without
//! sleeping), logging a snapshot once per simulated second. Useful for
//! balance checks and as a smoke test of the full engine loop.

use hailstorm::engine::Renderer;
use hailstorm::sim::state::EngineState;
use hailstorm::{FixedStepLoop, GameConfig, GameEngine, InputSnapshot, ScoreStore};

struct LogRenderer {
    last_logged_sec: u64,
}

impl Renderer for LogRenderer {
    fn render(&mut self, state: &EngineState) {
        let sec = (state.elapsed_ms / 1000.0) as u64;
        if sec > self.last_logged_sec {
            self.last_logged_sec = sec;
            log::info!(
                "t={sec:>3}s score={:<6.0} hp={:<3.0} bullets={:<2} items={} barriers={}",
                state.score,
                state.player.hp,
                state.bullets.len(),
                state.items.len(),
                state.barriers.len(),
            );
        }
    }
}

/// Circles the player around the arena center so the run survives a while.
fn scripted_input(elapsed_sec: f32) -> InputSnapshot {
    let angle = elapsed_sec * 0.8;
    InputSnapshot {
        move_x: angle.cos(),
        move_y: angle.sin(),
        ultimate_pressed: false,
        pause_pressed: false,
    }
}

fn main() {
    env_logger::init();

    let config = GameConfig::default();
    let data_dir = std::env::temp_dir().join("hailstorm-demo");
    let mut engine = match GameEngine::new(config) {
        Ok(engine) => engine.with_score_store(ScoreStore::new(data_dir)),
        Err(err) => {
            log::error!("invalid configuration: {err}");
            std::process::exit(1);
        }
    };

    engine.start_run(Some(0xC0FFEE));

    let mut fixed = FixedStepLoop::default();
    let mut renderer = LogRenderer { last_logged_sec: 0 };
    let frame_ms = 1000.0 / 60.0;

    // Up to three simulated minutes or until the run ends.
    for _ in 0..(3 * 60 * 60) {
        let elapsed_sec = engine.state().elapsed_ms / 1000.0;
        engine.handle_input(scripted_input(elapsed_sec));

        fixed.advance(frame_ms, |dt_ms| engine.update(dt_ms));
        engine.render(&mut renderer);

        if engine.snapshot().screen_state == hailstorm::sim::ScreenState::GameOver {
            break;
        }
    }

    let snapshot = engine.snapshot();
    log::info!(
        "run finished: {:?} after {:.1}s, score {} (best {})",
        snapshot.screen_state,
        snapshot.elapsed_sec,
        snapshot.score,
        snapshot.best_score,
    );
}
