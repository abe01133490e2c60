// Flat-array conversions between the JS side (MediaPipe landmarks in,
// render snapshots out) and the core engine types.

use glam::Vec2;
use grasp_core::{BodyKind, BodySnapshot, HandSignal, RawHand, LANDMARKS_PER_HAND};

pub const FLOATS_PER_LANDMARK: usize = 2;
pub const FLOATS_PER_HAND: usize = LANDMARKS_PER_HAND * FLOATS_PER_LANDMARK;
pub const FLOATS_PER_BODY: usize = 7; // id, kind, x, y, rotation, hx, hy

/// Unpack hand-major `[x, y]` pairs, 21 per hand, normalized [0,1]. The
/// webcam image is mirrored, so `mirror_x` flips x to make on-screen motion
/// match the user's hand. Trailing partial hands are dropped.
pub fn unpack_landmarks(flat: &[f32], mirror_x: bool) -> Vec<RawHand> {
    if flat.len() % FLOATS_PER_HAND != 0 {
        log::warn!(
            "landmark buffer length {} is not a multiple of {FLOATS_PER_HAND}; truncating",
            flat.len()
        );
    }
    flat.chunks_exact(FLOATS_PER_HAND)
        .map(|hand| {
            hand.chunks_exact(FLOATS_PER_LANDMARK)
                .map(|p| {
                    let x = if mirror_x { 1.0 - p[0] } else { p[0] };
                    Vec2::new(x, p[1])
                })
                .collect()
        })
        .collect()
}

pub fn kind_code(kind: BodyKind) -> f32 {
    match kind {
        BodyKind::Boundary => 0.0,
        BodyKind::Manipulable => 1.0,
        BodyKind::HandProxy => 2.0,
    }
}

pub fn pack_bodies(snaps: &[BodySnapshot]) -> Vec<f32> {
    let mut out = Vec::with_capacity(snaps.len() * FLOATS_PER_BODY);
    for s in snaps {
        out.push(s.id as f32);
        out.push(kind_code(s.kind));
        out.push(s.position.x);
        out.push(s.position.y);
        out.push(s.rotation);
        out.push(s.half_extents.x);
        out.push(s.half_extents.y);
    }
    out
}

pub fn pack_links(links: &[(Vec2, Vec2)]) -> Vec<f32> {
    let mut out = Vec::with_capacity(links.len() * 4);
    for (a, b) in links {
        out.extend_from_slice(&[a.x, a.y, b.x, b.y]);
    }
    out
}

/// Scale each signal's raw landmarks into canvas pixel space for the JS
/// skeleton drawer. Mirroring was already applied at unpack time.
pub fn pack_skeletons(signals: &[HandSignal], width: f32, height: f32) -> Vec<f32> {
    let mut out = Vec::with_capacity(signals.len() * FLOATS_PER_HAND);
    for signal in signals.iter().filter(|s| s.detected) {
        for p in &signal.landmarks {
            out.push(p.x * width);
            out.push(p.y * height);
        }
    }
    out
}
