use thiserror::Error;

/// Construction-time failures. Per-frame oddities (unknown slot, no grab
/// target, malformed landmarks) are silent no-ops, not errors.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("engine requires at least one hand slot")]
    NoHandSlots,
    #[error("viewport dimensions must be positive, got {width}x{height}")]
    InvalidViewport { width: f32, height: f32 },
}
