#![cfg(target_arch = "wasm32")]
//! WASM shell around the interaction engine. The surrounding JS application
//! owns the camera, the hand landmarker, the canvas renderer and the
//! requestAnimationFrame loop; this crate only moves data across the
//! boundary. Detector initialization failure is JS-side and fatal there;
//! nothing here retries it.

pub mod bridge;

use grasp_core::{EngineConfig, HandSignal, InteractionEngine, DEFAULT_SPAWN_COUNT};
use js_sys::Float32Array;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("grasp-web starting");
    Ok(())
}

#[wasm_bindgen]
pub struct GraspEngine {
    inner: InteractionEngine,
    last_signals: Vec<HandSignal>,
}

#[wasm_bindgen]
impl GraspEngine {
    #[wasm_bindgen(constructor)]
    pub fn new(width: f32, height: f32) -> Result<GraspEngine, JsValue> {
        let config = EngineConfig {
            width,
            height,
            ..EngineConfig::default()
        };
        let inner =
            InteractionEngine::new(config).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self {
            inner,
            last_signals: Vec::new(),
        })
    }

    pub fn spawn(&mut self, x: f32, y: f32) -> f64 {
        self.inner.spawn_manipulable(x, y) as f64
    }

    /// Clear all manipulables and respawn the default count.
    pub fn reset(&mut self) {
        self.inner.reset_all(DEFAULT_SPAWN_COUNT);
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.inner.resize(width, height);
    }

    pub fn manipulable_count(&self) -> u32 {
        self.inner.manipulable_count() as u32
    }

    /// One frame: `landmarks` is hand-major flat `[x, y]` normalized pairs,
    /// 21 landmarks per detected hand (empty when no hands), `dt` in
    /// seconds. Call once per animation tick, before reading snapshots.
    pub fn frame(&mut self, landmarks: &[f32], mirror_x: bool, dt: f32) {
        let hands = bridge::unpack_landmarks(landmarks, mirror_x);
        self.last_signals = self.inner.frame(Some(&hands), dt).into_vec();
    }

    /// Per body: `[id, kind, x, y, rotation, half_w, half_h]`.
    /// Kind codes: 0 boundary, 1 manipulable, 2 hand proxy.
    pub fn body_snapshot(&self) -> Float32Array {
        let packed = bridge::pack_bodies(&self.inner.world().snapshot());
        Float32Array::from(packed.as_slice())
    }

    /// Per active grab link: `[ax, ay, bx, by]` endpoint positions.
    pub fn link_snapshot(&self) -> Float32Array {
        let packed = bridge::pack_links(&self.inner.link_endpoints());
        Float32Array::from(packed.as_slice())
    }

    /// Canvas-space `[x, y]` pairs, 21 per hand detected last frame.
    pub fn skeleton_snapshot(&self) -> Float32Array {
        let config = self.inner.config();
        let packed = bridge::pack_skeletons(&self.last_signals, config.width, config.height);
        Float32Array::from(packed.as_slice())
    }
}
