// Host-side tests for the flat-array bridge.
// The main crate is wasm-only, so we include the pure-Rust module directly.

#![allow(dead_code)]
mod bridge {
    include!("../src/bridge.rs");
}

use bridge::*;
use glam::Vec2;
use grasp_core::{BodyKind, BodySnapshot, HandSignal, LANDMARKS_PER_HAND};

fn flat_hand(x: f32, y: f32) -> Vec<f32> {
    let mut out = Vec::with_capacity(FLOATS_PER_HAND);
    for _ in 0..LANDMARKS_PER_HAND {
        out.push(x);
        out.push(y);
    }
    out
}

#[test]
fn unpack_without_mirror_keeps_coordinates() {
    let flat = flat_hand(0.25, 0.75);
    let hands = unpack_landmarks(&flat, false);
    assert_eq!(hands.len(), 1);
    assert_eq!(hands[0].len(), LANDMARKS_PER_HAND);
    assert_eq!(hands[0][0], Vec2::new(0.25, 0.75));
}

#[test]
fn unpack_with_mirror_flips_x_only() {
    let flat = flat_hand(0.25, 0.75);
    let hands = unpack_landmarks(&flat, true);
    assert_eq!(hands[0][0], Vec2::new(0.75, 0.75));
    assert_eq!(hands[0][20], Vec2::new(0.75, 0.75));
}

#[test]
fn unpack_drops_a_trailing_partial_hand() {
    // One full hand plus 8 stray floats: the partial tail is truncated.
    let mut flat = flat_hand(0.5, 0.5);
    flat.extend_from_slice(&[0.1; 8]);
    let hands = unpack_landmarks(&flat, false);
    assert_eq!(hands.len(), 1);
    assert_eq!(hands[0].len(), LANDMARKS_PER_HAND);
}

#[test]
fn unpack_splits_two_hands_in_order() {
    let mut flat = flat_hand(0.1, 0.2);
    flat.extend(flat_hand(0.8, 0.9));
    let hands = unpack_landmarks(&flat, false);
    assert_eq!(hands.len(), 2);
    assert_eq!(hands[0][0], Vec2::new(0.1, 0.2));
    assert_eq!(hands[1][0], Vec2::new(0.8, 0.9));
}

#[test]
fn kind_codes_are_stable() {
    assert_eq!(kind_code(BodyKind::Boundary), 0.0);
    assert_eq!(kind_code(BodyKind::Manipulable), 1.0);
    assert_eq!(kind_code(BodyKind::HandProxy), 2.0);
}

#[test]
fn pack_bodies_lays_out_seven_floats_per_body() {
    let snaps = vec![BodySnapshot {
        id: 3,
        kind: BodyKind::Manipulable,
        position: Vec2::new(100.0, 200.0),
        rotation: 0.5,
        half_extents: Vec2::new(30.0, 40.0),
    }];
    let flat = pack_bodies(&snaps);
    assert_eq!(flat.len(), FLOATS_PER_BODY);
    assert_eq!(flat, vec![3.0, 1.0, 100.0, 200.0, 0.5, 30.0, 40.0]);
}

#[test]
fn pack_links_lays_out_endpoint_pairs() {
    let links = vec![(Vec2::new(1.0, 2.0), Vec2::new(3.0, 4.0))];
    assert_eq!(pack_links(&links), vec![1.0, 2.0, 3.0, 4.0]);
}

#[test]
fn pack_skeletons_scales_to_pixels_and_skips_placeholders() {
    let detected = HandSignal {
        detected: true,
        position: Vec2::new(400.0, 300.0),
        pinching: false,
        pinch_distance: 0.2,
        landmarks: vec![Vec2::new(0.5, 0.5); LANDMARKS_PER_HAND],
    };
    let placeholder = HandSignal {
        detected: false,
        position: Vec2::ZERO,
        pinching: false,
        pinch_distance: f32::INFINITY,
        landmarks: Vec::new(),
    };
    let flat = pack_skeletons(&[placeholder, detected], 800.0, 600.0);
    assert_eq!(flat.len(), FLOATS_PER_HAND);
    assert_eq!(flat[0], 400.0);
    assert_eq!(flat[1], 300.0);
}
