//! The interaction engine: one explicit context object owning the world, the
//! hand slots, and the spawn RNG. Constructed once and held by the
//! frame-driving caller; there are no process-wide singletons.

use crate::constants::*;
use crate::error::EngineError;
use crate::interaction::{self, GrabState, HandSlot};
use crate::signal::{normalize_frame, HandSignal, RawHand};
use crate::world::World;
use glam::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rapier2d::prelude::RigidBodyHandle;
use smallvec::SmallVec;

#[derive(Clone, Debug)]
pub struct EngineConfig {
    /// Viewport size in canvas pixels.
    pub width: f32,
    pub height: f32,
    /// Number of trackable hands; detection index i maps to slot i.
    pub hand_slots: usize,
    pub grab_radius: f32,
    pub seed: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
            hand_slots: DEFAULT_HAND_SLOTS,
            grab_radius: GRAB_RADIUS,
            seed: 42,
        }
    }
}

pub struct InteractionEngine {
    world: World,
    slots: Vec<HandSlot>,
    config: EngineConfig,
    rng: StdRng,
}

impl InteractionEngine {
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        if config.hand_slots == 0 {
            return Err(EngineError::NoHandSlots);
        }
        if config.width <= 0.0 || config.height <= 0.0 {
            return Err(EngineError::InvalidViewport {
                width: config.width,
                height: config.height,
            });
        }
        let mut world = World::new(config.width, config.height);
        let slots = (0..config.hand_slots)
            .map(|_| HandSlot::new(world.create_hand_proxy()))
            .collect();
        let rng = StdRng::seed_from_u64(config.seed);
        Ok(Self {
            world,
            slots,
            config,
            rng,
        })
    }

    /// Spawn one manipulable at the given position; returns its stable id.
    pub fn spawn_manipulable(&mut self, x: f32, y: f32) -> u64 {
        let handle = self.world.spawn_manipulable(x, y, &mut self.rng);
        self.world.body_id(handle).unwrap_or_default()
    }

    /// Move one hand and run its grab state machine. Signals for slots
    /// outside the configured count are dropped.
    pub fn update_hand(&mut self, slot: usize, x: f32, y: f32, pinching: bool) {
        if slot >= self.slots.len() {
            log::debug!("dropping signal for out-of-range hand slot {slot}");
            return;
        }
        let held_elsewhere: SmallVec<[RigidBodyHandle; 2]> = self
            .slots
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != slot)
            .filter_map(|(_, s)| s.held)
            .collect();
        let position = Vec2::new(x, y);
        let grab_radius = self.config.grab_radius;
        let s = &mut self.slots[slot];
        s.active = true;
        s.position = position;
        self.world.set_proxy_position(s.proxy, position);
        interaction::step_slot(
            &mut self.world,
            s,
            position,
            pinching,
            grab_radius,
            &held_elsewhere,
        );
    }

    /// Remove every manipulable, release any slot left holding one, then
    /// respawn `respawn` bodies near the top center of the viewport.
    pub fn reset_all(&mut self, respawn: usize) {
        log::info!(
            "reset: clearing {} manipulables, respawning {respawn}",
            self.world.manipulable_count()
        );
        self.world.remove_all_manipulables();
        // Restore the slot invariant before any further logic observes it.
        for slot in &mut self.slots {
            if slot.held.is_some_and(|h| !self.world.contains(h)) {
                slot.held = None;
                slot.link = None;
                slot.state = GrabState::Released;
            }
        }
        let center = self.config.width / 2.0;
        for _ in 0..respawn {
            let jitter = self.rng.gen_range(-SPAWN_JITTER_X..SPAWN_JITTER_X);
            self.world
                .spawn_manipulable(center + jitter, SPAWN_Y, &mut self.rng);
        }
    }

    /// Recreate the boundaries for a new viewport size. Manipulables and any
    /// active grab links are preserved.
    pub fn resize(&mut self, width: f32, height: f32) {
        if width <= 0.0 || height <= 0.0 {
            return;
        }
        log::info!("resize: {width}x{height}");
        self.config.width = width;
        self.config.height = height;
        self.world.resize_boundaries(width, height);
    }

    /// One frame tick: normalize the raw detection, apply each detected
    /// signal to its index-matched slot, then advance the simulation. Slots
    /// with no signal this frame keep their position and state; they do not
    /// auto-release. Returns the normalized signals for skeleton rendering.
    pub fn frame(&mut self, detection: Option<&[RawHand]>, dt: f32) -> SmallVec<[HandSignal; 2]> {
        for slot in &mut self.slots {
            slot.active = false;
        }
        let signals = match detection {
            Some(hands) => normalize_frame(hands, self.config.width, self.config.height),
            None => SmallVec::new(),
        };
        for (i, signal) in signals.iter().enumerate() {
            if signal.detected {
                self.update_hand(i, signal.position.x, signal.position.y, signal.pinching);
            }
        }
        self.world.advance(dt);
        signals
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Mutable simulation access for the surrounding application (e.g.
    /// setting velocities). Slots tolerate out-of-band body removal: stale
    /// holds are cleared on the next update that touches them.
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn slots(&self) -> &[HandSlot] {
        &self.slots
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn manipulable_count(&self) -> usize {
        self.world.manipulable_count()
    }

    /// Endpoint pairs of every active grab link, for spring rendering.
    pub fn link_endpoints(&self) -> Vec<(Vec2, Vec2)> {
        self.slots
            .iter()
            .filter_map(|slot| slot.link)
            .filter_map(|link| self.world.spring_endpoints(link))
            .collect()
    }
}
