//! Per-hand grab state machine: Released <-> Held, driven by the pinch flag.
//!
//! Release is governed purely by the pinch flag (or the held body vanishing
//! out of band); the spring, not a distance cap, decides how strongly a held
//! body follows a hand that moves far away.

use crate::constants::SPIN_DAMPING;
use crate::world::World;
use glam::Vec2;
use rapier2d::prelude::{ImpulseJointHandle, RigidBodyHandle};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GrabState {
    Released,
    Held,
}

/// Fixed-index state holder for one trackable hand.
#[derive(Debug)]
pub struct HandSlot {
    pub proxy: RigidBodyHandle,
    pub held: Option<RigidBodyHandle>,
    pub link: Option<ImpulseJointHandle>,
    /// True if a signal was received for this slot in the current frame.
    pub active: bool,
    pub state: GrabState,
    /// Last known proxy position; retained across detector dropouts.
    pub position: Vec2,
}

impl HandSlot {
    pub fn new(proxy: RigidBodyHandle) -> Self {
        Self {
            proxy,
            held: None,
            link: None,
            active: false,
            state: GrabState::Released,
            position: Vec2::ZERO,
        }
    }
}

/// Run one frame of the slot's state machine after its proxy has been moved
/// to `position`. `held_elsewhere` lists bodies currently held by other
/// slots; they are never eligible grab targets (first-come exclusivity).
pub fn step_slot(
    world: &mut World,
    slot: &mut HandSlot,
    position: Vec2,
    pinching: bool,
    grab_radius: f32,
    held_elsewhere: &[RigidBodyHandle],
) {
    // The held body may have been destroyed out of band (bulk reset); the
    // spring went down with it, so just clear our references.
    if slot.held.is_some_and(|h| !world.contains(h)) {
        log::debug!("held body vanished, releasing slot");
        slot.held = None;
        slot.link = None;
        slot.state = GrabState::Released;
    }

    if let Some(held) = slot.held {
        world.damp_spin(held, SPIN_DAMPING);
    }

    match slot.state {
        GrabState::Released if pinching => try_grab(world, slot, position, grab_radius, held_elsewhere),
        GrabState::Held if !pinching => release(world, slot),
        _ => {}
    }
}

/// Grab the nearest manipulable within reach that no other slot holds.
/// No eligible target is a no-op, not an error.
fn try_grab(
    world: &mut World,
    slot: &mut HandSlot,
    position: Vec2,
    grab_radius: f32,
    held_elsewhere: &[RigidBodyHandle],
) {
    let target = world
        .manipulables_within(position, grab_radius)
        .into_iter()
        .find(|(h, _)| !held_elsewhere.contains(h));
    if let Some((target, distance)) = target {
        if let Some(link) = world.create_spring(slot.proxy, target) {
            log::debug!("grab: body at distance {distance:.1}");
            slot.link = Some(link);
            slot.held = Some(target);
            slot.state = GrabState::Held;
        }
    }
}

/// Tear down the slot's grab link, if any. Idempotent.
pub fn release(world: &mut World, slot: &mut HandSlot) {
    if let Some(link) = slot.link.take() {
        log::debug!("release: dropping held body");
        world.remove_spring(link);
    }
    slot.held = None;
    slot.state = GrabState::Released;
}
