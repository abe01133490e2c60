//! Rigid body world: static boundaries, dynamic manipulables, and per-hand
//! sensor proxies on top of a rapier2d simulation.
//!
//! Units are canvas pixels with +y pointing down, so gravity is positive.
//! Body kinds are carried explicitly and matched exhaustively wherever
//! kind-specific behavior occurs; there are no string labels.

use crate::constants::*;
use fnv::FnvHashMap;
use glam::Vec2;
use rand::Rng;
use rapier2d::prelude::*;

/// Closed set of body roles in the simulation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BodyKind {
    /// Immovable floor/wall segment confining manipulables.
    Boundary,
    /// Dynamic body the user can grab and move.
    Manipulable,
    /// Immovable non-colliding sensor anchored to a tracked hand.
    HandProxy,
}

#[derive(Clone, Copy, Debug)]
struct BodyMeta {
    id: u64,
    kind: BodyKind,
    half_extents: Vec2,
}

/// Render-facing view of one body.
#[derive(Clone, Copy, Debug)]
pub struct BodySnapshot {
    pub id: u64,
    pub kind: BodyKind,
    pub position: Vec2,
    pub rotation: f32,
    pub half_extents: Vec2,
}

pub struct World {
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    islands: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    ccd: CCDSolver,
    pipeline: PhysicsPipeline,
    params: IntegrationParameters,
    gravity: Vector<Real>,

    meta: FnvHashMap<RigidBodyHandle, BodyMeta>,
    /// Manipulable handles in creation order; ties in distance queries are
    /// broken by this order.
    manipulables: Vec<RigidBodyHandle>,
    walls: Vec<RigidBodyHandle>,
    next_id: u64,
    width: f32,
    height: f32,
}

impl World {
    pub fn new(width: f32, height: f32) -> Self {
        let mut world = Self {
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            islands: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            ccd: CCDSolver::new(),
            pipeline: PhysicsPipeline::new(),
            params: IntegrationParameters::default(),
            gravity: vector![0.0, GRAVITY_Y],
            meta: FnvHashMap::default(),
            manipulables: Vec::new(),
            walls: Vec::new(),
            next_id: 0,
            width,
            height,
        };
        world.create_boundaries();
        world
    }

    fn alloc_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn insert_static(&mut self, center: Vec2, half: Vec2, restitution: f32) -> RigidBodyHandle {
        let body = RigidBodyBuilder::fixed()
            .translation(vector![center.x, center.y])
            .build();
        let handle = self.bodies.insert(body);
        let collider = ColliderBuilder::cuboid(half.x, half.y)
            .friction(WALL_FRICTION)
            .restitution(restitution)
            .build();
        self.colliders
            .insert_with_parent(collider, handle, &mut self.bodies);
        let id = self.alloc_id();
        self.meta.insert(
            handle,
            BodyMeta {
                id,
                kind: BodyKind::Boundary,
                half_extents: half,
            },
        );
        handle
    }

    fn create_boundaries(&mut self) {
        let (w, h) = (self.width, self.height);
        let thick = WALL_THICKNESS;
        // Floor sits mostly below the viewport, side walls extend past the top
        // so tall stacks cannot escape sideways.
        let floor = self.insert_static(
            Vec2::new(w / 2.0, h + thick / 2.0 - FLOOR_SINK),
            Vec2::new(w / 2.0, thick / 2.0),
            FLOOR_RESTITUTION,
        );
        let left = self.insert_static(
            Vec2::new(-thick / 2.0, h / 2.0),
            Vec2::new(thick / 2.0, h),
            WALL_RESTITUTION,
        );
        let right = self.insert_static(
            Vec2::new(w + thick / 2.0, h / 2.0),
            Vec2::new(thick / 2.0, h),
            WALL_RESTITUTION,
        );
        self.walls = vec![floor, left, right];
    }

    /// Create the immovable sensor body anchoring one hand slot. Called once
    /// per slot at engine construction; proxies are never destroyed.
    pub fn create_hand_proxy(&mut self) -> RigidBodyHandle {
        let body = RigidBodyBuilder::fixed()
            .translation(vector![0.0, 0.0])
            .build();
        let handle = self.bodies.insert(body);
        let collider = ColliderBuilder::ball(PROXY_RADIUS).sensor(true).build();
        self.colliders
            .insert_with_parent(collider, handle, &mut self.bodies);
        let id = self.alloc_id();
        self.meta.insert(
            handle,
            BodyMeta {
                id,
                kind: BodyKind::HandProxy,
                half_extents: Vec2::splat(PROXY_RADIUS),
            },
        );
        handle
    }

    /// Spawn one manipulable: a rounded square of randomized size with the
    /// default material constants.
    pub fn spawn_manipulable<R: Rng>(&mut self, x: f32, y: f32, rng: &mut R) -> RigidBodyHandle {
        let size = rng.gen_range(CUBE_SIZE_MIN..CUBE_SIZE_MAX);
        let half = size / 2.0;
        let body = RigidBodyBuilder::dynamic()
            .translation(vector![x, y])
            .linear_damping(CUBE_AIR_DAMPING)
            .angular_damping(CUBE_AIR_DAMPING)
            .build();
        let handle = self.bodies.insert(body);
        let collider = ColliderBuilder::round_cuboid(
            half - CUBE_CORNER_RADIUS,
            half - CUBE_CORNER_RADIUS,
            CUBE_CORNER_RADIUS,
        )
        .friction(CUBE_FRICTION)
        .restitution(CUBE_RESTITUTION)
        .density(CUBE_DENSITY)
        .build();
        self.colliders
            .insert_with_parent(collider, handle, &mut self.bodies);
        let id = self.alloc_id();
        self.meta.insert(
            handle,
            BodyMeta {
                id,
                kind: BodyKind::Manipulable,
                half_extents: Vec2::splat(half),
            },
        );
        self.manipulables.push(handle);
        handle
    }

    /// Instantaneous teleport; the proxy is a fixed sensor so no impulse is
    /// synthesized from the move.
    pub fn set_proxy_position(&mut self, proxy: RigidBodyHandle, position: Vec2) {
        if let Some(body) = self.bodies.get_mut(proxy) {
            body.set_translation(vector![position.x, position.y], true);
        }
    }

    pub fn contains(&self, handle: RigidBodyHandle) -> bool {
        self.bodies.contains(handle)
    }

    pub fn position(&self, handle: RigidBodyHandle) -> Option<Vec2> {
        self.bodies
            .get(handle)
            .map(|b| Vec2::new(b.translation().x, b.translation().y))
    }

    pub fn body_id(&self, handle: RigidBodyHandle) -> Option<u64> {
        self.meta.get(&handle).map(|m| m.id)
    }

    /// Multiplicatively damp a body's angular velocity. Used to suppress
    /// unbounded spin induced by the grab spring.
    pub fn damp_spin(&mut self, handle: RigidBodyHandle, factor: f32) {
        if let Some(body) = self.bodies.get_mut(handle) {
            let angvel = body.angvel();
            body.set_angvel(angvel * factor, true);
        }
    }

    pub fn angular_velocity(&self, handle: RigidBodyHandle) -> Option<f32> {
        self.bodies.get(handle).map(|b| b.angvel())
    }

    pub fn set_angular_velocity(&mut self, handle: RigidBodyHandle, angvel: f32) {
        if let Some(body) = self.bodies.get_mut(handle) {
            body.set_angvel(angvel, true);
        }
    }

    /// Install the compliant spring pulling `target` toward the hand proxy.
    /// Returns `None` without installing anything if the proxy already
    /// anchors a spring or the target is already linked to any proxy; a
    /// manipulable belongs to at most one hand at a time.
    pub fn create_spring(
        &mut self,
        proxy: RigidBodyHandle,
        target: RigidBodyHandle,
    ) -> Option<ImpulseJointHandle> {
        // Springs die with their bodies, so the live joint set is the source
        // of truth for what is linked.
        let occupied = self
            .impulse_joints
            .iter()
            .any(|(_, j)| j.body1 == proxy || j.body2 == target);
        if occupied {
            return None;
        }
        let joint = SpringJointBuilder::new(GRAB_REST_LENGTH, GRAB_STIFFNESS, GRAB_DAMPING).build();
        Some(self.impulse_joints.insert(proxy, target, joint, true))
    }

    /// Remove a grab spring; a handle already dead (e.g. its target body was
    /// bulk-removed) is a no-op.
    pub fn remove_spring(&mut self, joint: ImpulseJointHandle) {
        self.impulse_joints.remove(joint, true);
    }

    pub fn spring_count(&self) -> usize {
        self.impulse_joints.len()
    }

    /// Endpoint positions of a live spring, for renderer line drawing.
    pub fn spring_endpoints(&self, joint: ImpulseJointHandle) -> Option<(Vec2, Vec2)> {
        let j = self.impulse_joints.get(joint)?;
        let a = self.position(j.body1)?;
        let b = self.position(j.body2)?;
        Some((a, b))
    }

    fn remove_body(&mut self, handle: RigidBodyHandle) {
        self.bodies.remove(
            handle,
            &mut self.islands,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            true,
        );
        self.meta.remove(&handle);
    }

    /// Remove every manipulable. Springs referencing removed bodies are torn
    /// down with them; callers owning hand slots must sweep stale holds
    /// before the next frame's logic runs.
    pub fn remove_all_manipulables(&mut self) {
        let doomed = std::mem::take(&mut self.manipulables);
        for handle in doomed {
            self.remove_body(handle);
        }
    }

    /// Destroy and recreate the boundary set for a new viewport size.
    /// Manipulables and springs are untouched.
    pub fn resize_boundaries(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
        let old = std::mem::take(&mut self.walls);
        for handle in old {
            self.remove_body(handle);
        }
        self.create_boundaries();
    }

    /// Advance the simulation by `dt` seconds. Body identities are preserved
    /// across steps.
    pub fn advance(&mut self, dt: f32) {
        if dt <= 0.0 {
            return;
        }
        self.params.dt = dt;
        self.pipeline.step(
            &self.gravity,
            &self.params,
            &mut self.islands,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd,
            None,
            &(),
            &(),
        );
    }

    /// Manipulables whose center lies within `radius` of `point`, ascending
    /// by distance; exact ties keep creation order.
    pub fn manipulables_within(&self, point: Vec2, radius: f32) -> Vec<(RigidBodyHandle, f32)> {
        let mut found: Vec<(RigidBodyHandle, f32)> = self
            .manipulables
            .iter()
            .filter_map(|&h| {
                let pos = self.position(h)?;
                let d = pos.distance(point);
                (d < radius).then_some((h, d))
            })
            .collect();
        found.sort_by(|a, b| a.1.total_cmp(&b.1));
        found
    }

    pub fn manipulable_count(&self) -> usize {
        self.manipulables.len()
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    /// Current state of every body, ordered by creation id.
    pub fn snapshot(&self) -> Vec<BodySnapshot> {
        let mut snaps: Vec<BodySnapshot> = self
            .bodies
            .iter()
            .filter_map(|(handle, body)| {
                let meta = self.meta.get(&handle)?;
                Some(BodySnapshot {
                    id: meta.id,
                    kind: meta.kind,
                    position: Vec2::new(body.translation().x, body.translation().y),
                    rotation: body.rotation().angle(),
                    half_extents: meta.half_extents,
                })
            })
            .collect();
        snaps.sort_by_key(|s| s.id);
        snaps
    }
}
