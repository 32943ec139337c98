//! Shared numeric constants for the viewport crate.

// ── Scale ───────────────────────────────────────────────────────

/// Default lower bound for gesture- and control-driven scale.
pub const DEFAULT_MIN_SCALE: f64 = 0.1;

/// Default upper bound for gesture- and control-driven scale.
pub const DEFAULT_MAX_SCALE: f64 = 5.0;

/// Strictly positive floor applied to every transform that reaches the scene.
pub const SCALE_FLOOR: f64 = 0.0001;

// ── Fit ─────────────────────────────────────────────────────────

/// Padding in container pixels kept around the scene by fit-to-view.
pub const DEFAULT_FIT_PADDING: f64 = 10.0;

// ── Timing ──────────────────────────────────────────────────────

/// Markup edits inside this window collapse into one render.
pub const DEFAULT_DEBOUNCE_MS: f64 = 600.0;

/// Fallback wait after a render request before geometry is trusted.
pub const DEFAULT_SETTLE_MS: f64 = 400.0;

// ── Gestures ────────────────────────────────────────────────────

/// Wheel delta (pixels) to log2 zoom factor.
pub const DEFAULT_WHEEL_SENSITIVITY: f64 = 0.002;

/// Wheel multiplier while ctrl is held (trackpad pinch).
pub const PINCH_WHEEL_MULTIPLIER: f64 = 10.0;

/// Zoom factor of a double click.
pub const DOUBLE_CLICK_ZOOM: f64 = 2.0;
