//! Lane Runner entry point
//!
//! The browser build is driven from JavaScript through `lane_runner::wasm`.
//! Natively this runs a headless session with the autopilot and logs how it
//! went, which is handy for checking balance changes.
//!
//! Usage: `lane-runner [seed] [max_ticks] [tuning.json]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Lane Runner (native, headless) starting...");

    if let Err(e) = headless::run(std::env::args().skip(1).collect()) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is lane_runner::wasm::start, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::time::{SystemTime, UNIX_EPOCH};

    use lane_runner::{GameState, TickInput, Tuning, tick};

    /// Ticks per simulated second (one per presentation frame at 60 Hz)
    const FRAMES_PER_SECOND: u64 = 60;
    const DEFAULT_MAX_TICKS: u64 = 60 * FRAMES_PER_SECOND;

    pub fn run(args: Vec<String>) -> Result<(), String> {
        let seed = match args.first() {
            Some(arg) => arg.parse().map_err(|e| format!("invalid seed {arg:?}: {e}"))?,
            None => SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0),
        };
        let max_ticks = match args.get(1) {
            Some(arg) => arg
                .parse()
                .map_err(|e| format!("invalid tick count {arg:?}: {e}"))?,
            None => DEFAULT_MAX_TICKS,
        };
        let tuning = match args.get(2) {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .map_err(|e| format!("failed to read {path}: {e}"))?;
                Tuning::from_json(&json).map_err(|e| e.to_string())?
            }
            None => Tuning::default(),
        };

        let mut state = GameState::new(seed, tuning).map_err(|e| e.to_string())?;
        let input = TickInput {
            idle_mode: true,
            ..Default::default()
        };

        let mut last_score = 0;
        let mut snapshot = state.snapshot();
        while snapshot.alive && snapshot.time_ticks < max_ticks {
            snapshot = tick(&mut state, &input);
            if snapshot.score != last_score && snapshot.score % 10 == 0 {
                log::info!(
                    "t={:.1}s score={} speed={:.2} obstacles={}",
                    snapshot.time_ticks as f32 / FRAMES_PER_SECOND as f32,
                    snapshot.score,
                    snapshot.speed,
                    snapshot.obstacle_positions.len()
                );
            }
            last_score = snapshot.score;
        }

        let outcome = if snapshot.alive { "survived" } else { "crashed" };
        println!(
            "seed {seed}: {outcome} after {} ticks, score {}, distance {:.0}, final speed {:.2}",
            snapshot.time_ticks, snapshot.score, snapshot.distance, snapshot.speed
        );
        Ok(())
    }
}
