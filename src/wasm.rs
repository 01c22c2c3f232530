//! Browser bindings
//!
//! The JavaScript side owns the scene, HUD and frame loop. It calls
//! `advance()` once per animation frame and forwards key-press edges to
//! `shift_left` / `shift_right`.

use wasm_bindgen::prelude::*;

use crate::sim::{GameState, LaneShift, TickInput, tick};
use crate::tuning::Tuning;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        // Logger already installed by an earlier module instance
        return;
    }
    log::info!("Lane Runner core loaded");
}

/// One game session, driven from JavaScript
#[wasm_bindgen]
pub struct LaneRunner {
    state: GameState,
    idle_mode: bool,
}

#[wasm_bindgen]
impl LaneRunner {
    /// New session with default balance, seeded from the clock
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<LaneRunner, JsValue> {
        Self::with_seed(js_sys::Date::now() as u64)
    }

    /// New session with a fixed seed (replays)
    #[wasm_bindgen(js_name = withSeed)]
    pub fn with_seed(seed: u64) -> Result<LaneRunner, JsValue> {
        let state = GameState::new(seed, Tuning::default()).map_err(to_js_error)?;
        Ok(LaneRunner {
            state,
            idle_mode: false,
        })
    }

    /// New session from a JSON tuning override
    #[wasm_bindgen(js_name = withTuning)]
    pub fn with_tuning(seed: u64, tuning_json: &str) -> Result<LaneRunner, JsValue> {
        let tuning = Tuning::from_json(tuning_json).map_err(to_js_error)?;
        let state = GameState::new(seed, tuning).map_err(to_js_error)?;
        Ok(LaneRunner {
            state,
            idle_mode: false,
        })
    }

    #[wasm_bindgen(js_name = shiftLeft)]
    pub fn shift_left(&mut self) {
        self.state.shift_lane(LaneShift::Left);
    }

    #[wasm_bindgen(js_name = shiftRight)]
    pub fn shift_right(&mut self) {
        self.state.shift_lane(LaneShift::Right);
    }

    /// Let the autopilot drive (attract screen)
    #[wasm_bindgen(js_name = setIdleMode)]
    pub fn set_idle_mode(&mut self, idle: bool) {
        self.idle_mode = idle;
    }

    /// Run one frame and return the snapshot as JSON
    pub fn advance(&mut self) -> Result<String, JsValue> {
        let input = TickInput {
            shift: None,
            idle_mode: self.idle_mode,
        };
        let snapshot = tick(&mut self.state, &input);
        serde_json::to_string(&snapshot).map_err(to_js_error)
    }

    /// Start over with the same seed
    pub fn reset(&mut self) {
        self.state.reset();
    }

    /// Start over with a fresh clock seed (the restart button)
    pub fn restart(&mut self) {
        self.state.restart(js_sys::Date::now() as u64);
    }

    #[wasm_bindgen(getter)]
    pub fn alive(&self) -> bool {
        self.state.alive()
    }

    #[wasm_bindgen(getter)]
    pub fn score(&self) -> u32 {
        self.state.score.score
    }
}

fn to_js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}
