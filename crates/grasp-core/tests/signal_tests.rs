// Host-side tests for the gesture normalizer.

use glam::Vec2;
use grasp_core::{is_pinch, normalize_frame, RawHand, INDEX_TIP, LANDMARKS_PER_HAND, THUMB_TIP};

fn hand_with_tips(thumb: Vec2, index: Vec2) -> RawHand {
    let mut hand = vec![Vec2::ZERO; LANDMARKS_PER_HAND];
    hand[THUMB_TIP] = thumb;
    hand[INDEX_TIP] = index;
    hand
}

#[test]
fn empty_frame_yields_empty_sequence() {
    let signals = normalize_frame(&[], 1280.0, 720.0);
    assert!(signals.is_empty());
}

#[test]
fn malformed_hand_becomes_a_non_detected_placeholder() {
    // A bad hand is silenced, not removed: later hands keep their
    // detection index.
    let short: RawHand = vec![Vec2::ZERO; 20];
    let ok = hand_with_tips(Vec2::new(0.5, 0.5), Vec2::new(0.6, 0.5));
    let signals = normalize_frame(&[short, ok], 1000.0, 1000.0);
    assert_eq!(signals.len(), 2);
    assert!(!signals[0].detected);
    assert!(!signals[0].pinching);
    assert!(signals[0].landmarks.is_empty());
    assert!(signals[1].detected);
}

#[test]
fn signals_preserve_input_order() {
    let a = hand_with_tips(Vec2::new(0.1, 0.1), Vec2::new(0.1, 0.1));
    let b = hand_with_tips(Vec2::new(0.9, 0.9), Vec2::new(0.9, 0.9));
    let signals = normalize_frame(&[a, b], 100.0, 100.0);
    assert_eq!(signals.len(), 2);
    assert!(signals[0].position.x < signals[1].position.x);
}

#[test]
fn position_is_tip_midpoint_in_pixel_space() {
    let signals = normalize_frame(
        &[hand_with_tips(Vec2::new(0.2, 0.4), Vec2::new(0.3, 0.6))],
        800.0,
        600.0,
    );
    assert_eq!(signals.len(), 1);
    let pos = signals[0].position;
    assert!((pos.x - 0.25 * 800.0).abs() < 1e-3);
    assert!((pos.y - 0.5 * 600.0).abs() < 1e-3);
}

#[test]
fn pinch_distance_is_euclidean_in_normalized_space() {
    let signals = normalize_frame(
        &[hand_with_tips(Vec2::new(0.2, 0.4), Vec2::new(0.3, 0.6))],
        800.0,
        600.0,
    );
    let expected = (0.1f32 * 0.1 + 0.2 * 0.2).sqrt();
    assert!((signals[0].pinch_distance - expected).abs() < 1e-6);
    assert!(!signals[0].pinching);
}

#[test]
fn close_tips_are_a_pinch() {
    let signals = normalize_frame(
        &[hand_with_tips(Vec2::new(0.50, 0.50), Vec2::new(0.51, 0.50))],
        800.0,
        600.0,
    );
    assert!(signals[0].pinching);
}

#[test]
fn pinch_threshold_is_strict_less_than() {
    // Exactly at the boundary is not a pinch; just under it is.
    assert!(!is_pinch(0.05));
    assert!(is_pinch(0.049));
    assert!(!is_pinch(0.051));
}
