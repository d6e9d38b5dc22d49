//! Shared numeric constants for the card engine.

// ── Card geometry ───────────────────────────────────────────────

/// Half the rendered card width in CSS pixels; centers the spawn point.
pub const CARD_HALF_WIDTH_PX: f64 = 160.0;

/// Distance from the bottom viewport edge up to the spawn point, in CSS pixels.
pub const SPAWN_BOTTOM_OFFSET_PX: f64 = 350.0;

// ── Printing ────────────────────────────────────────────────────

/// Rotation jitter applied at print time, sampled uniformly from ± this range.
pub const ROTATION_JITTER_DEG: f64 = 3.0;

/// Stack-order baseline. The first printed card lands at `BASE_Z + 1`.
pub const BASE_Z: i64 = 1;

/// Maximum message length, enforced by the input form rather than the engine.
pub const MAX_TEXT_CHARS: usize = 120;
