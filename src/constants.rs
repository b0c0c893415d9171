//! Crate-wide constants.
//!
//! Centralizes tuned thresholds and tolerances so they stay configurable
//! rather than scattered as magic numbers through the interaction code.

// ============================================================================
// Hit Testing
// ============================================================================

/// Screen-pixel tolerance around an entity box for pointer hit testing.
/// Divided by the current display scale before comparison in raster space.
pub const ENTITY_HIT_TOLERANCE_PX: f64 = 6.0;

/// Side length of a resize handle's square hit region, in screen pixels.
pub const HANDLE_HIT_SIZE_PX: f64 = 6.0;

// ============================================================================
// Gesture Thresholds
// ============================================================================

/// Minimum width and height (raster units) for a drawn draft box to be
/// finalized; smaller drafts are discarded silently.
pub const MIN_DRAW_SIZE_PX: f64 = 4.0;

/// Maximum pointer travel (screen pixels) for an armed OCR block click to
/// still count as a click on release.
pub const OCR_CLICK_SLOP_PX: f64 = 3.0;

/// Rubber-band rectangles smaller than this on both axes (screen pixels)
/// are treated as a simple click, not a selection.
pub const DRAG_SELECT_CLICK_MAX_PX: f64 = 3.0;

/// Minimum gap kept between opposing edges while resizing (raster units).
pub const MIN_RESIZE_EDGE_GAP_PX: f64 = 1.0;

// ============================================================================
// Stamping
// ============================================================================

/// Fallback side length (raster units) for a stamped instance box when the
/// creating descriptor carries no definition geometry.
pub const DEFAULT_STAMP_SIZE_PX: f64 = 24.0;

// ============================================================================
// Coordinate Transform
// ============================================================================

/// Slack allowed past the page edges when clamping boxes in point space.
pub const PDF_CLAMP_EPSILON_PTS: f64 = 0.5;
