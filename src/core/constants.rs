//! Engine-wide constants shared by the projection and geometry code.
//! Keeping them in a single place makes it easier to tweak crate-wide magic numbers.

/// Default square tile size in pixels; defines the pixel-space scale at zoom 0.
pub const TILE_SIZE: u32 = 256;

/// Default minimum zoom level a geometry is visible at.
pub const DEFAULT_ZOOM_MINIMUM: i32 = 0;

/// Default maximum zoom level a geometry is visible at.
pub const DEFAULT_ZOOM_MAXIMUM: i32 = 17;

/// Default pixel offset for metadata labels, applied as (+offset, -offset)
/// from the image rect's top-right corner (or from the anchor for plain points).
pub const DEFAULT_LABEL_OFFSET_PX: f64 = 5.0;

/// Default radius for procedurally generated circle geometries.
pub const DEFAULT_CIRCLE_RADIUS_PX: u32 = 10;

/// Latitude limit of the Web Mercator projection.
pub const MAX_LATITUDE: f64 = 85.0511287798;
