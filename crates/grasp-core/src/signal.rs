//! Gesture normalizer: raw per-frame hand landmark detections in, canonical
//! `HandSignal`s out.
//!
//! The upstream detector (a MediaPipe-style hand landmarker, owned by the
//! surrounding application) reports zero or more hands per frame, each as an
//! ordered 21-point sequence in normalized [0,1]x[0,1] image space. Indices
//! are anatomically fixed; only the thumb tip and index fingertip carry
//! semantics here, the rest is passed through for skeleton rendering.
//!
//! No temporal smoothing is applied: a single-frame detector flicker passes
//! through unfiltered.

use crate::constants::PINCH_THRESHOLD;
use glam::Vec2;
use smallvec::SmallVec;

pub const LANDMARKS_PER_HAND: usize = 21;
pub const THUMB_TIP: usize = 4;
pub const INDEX_TIP: usize = 8;

/// One hand as reported by the upstream detector: normalized landmark points
/// in anatomical index order.
pub type RawHand = Vec<Vec2>;

/// Ephemeral per-frame gesture value for one detected hand. Not persisted
/// across frames.
#[derive(Clone, Debug)]
pub struct HandSignal {
    pub detected: bool,
    /// Thumb/index midpoint in target (canvas) pixel space.
    pub position: Vec2,
    pub pinching: bool,
    /// Thumb-tip to index-tip distance in normalized space.
    pub pinch_distance: f32,
    /// Raw normalized landmarks, for external skeleton rendering only.
    pub landmarks: Vec<Vec2>,
}

/// Strict less-than: a distance exactly at the threshold is not a pinch.
#[inline]
pub fn is_pinch(distance: f32) -> bool {
    distance < PINCH_THRESHOLD
}

/// Convert a raw detection frame into signals, one per input hand, in input
/// order. A hand with the wrong landmark count yields a non-detected
/// placeholder rather than being removed, so later hands keep their
/// detection index (slot mapping is index-based). An empty frame yields an
/// empty sequence, never an error.
pub fn normalize_frame(hands: &[RawHand], width: f32, height: f32) -> SmallVec<[HandSignal; 2]> {
    hands
        .iter()
        .map(|hand| {
            if hand.len() != LANDMARKS_PER_HAND {
                return HandSignal {
                    detected: false,
                    position: Vec2::ZERO,
                    pinching: false,
                    pinch_distance: f32::INFINITY,
                    landmarks: Vec::new(),
                };
            }
            let thumb = hand[THUMB_TIP];
            let index = hand[INDEX_TIP];
            let distance = thumb.distance(index);
            let mid = (thumb + index) * 0.5;
            HandSignal {
                detected: true,
                position: Vec2::new(mid.x * width, mid.y * height),
                pinching: is_pinch(distance),
                pinch_distance: distance,
                landmarks: hand.clone(),
            }
        })
        .collect()
}
