//! Shared crate-wide constants.

/// Distance from the left, right or top screen edge (in logical units) at
/// which a drag gesture is considered to be "at the edge".
///
/// Left/right proximity produces a quadrant snap, top proximity is reserved
/// for maximize.
pub const DEFAULT_EDGE_SNAP_SENSITIVITY: i32 = 50;

/// Edge sensitivity used by the terminal front-end, where one logical unit is
/// one cell.
pub const TERMINAL_EDGE_SNAP_SENSITIVITY: i32 = 2;

/// Smallest size a resize can shrink a window to.
pub const MIN_WINDOW_WIDTH: u16 = 6;
pub const MIN_WINDOW_HEIGHT: u16 = 3;

/// Size given to windows whose configuration does not carry one.
pub const DEFAULT_WINDOW_WIDTH: u16 = 640;
pub const DEFAULT_WINDOW_HEIGHT: u16 = 480;

/// Normalized y coordinate that ends the upper quadrant band of the snap
/// zone table. The band below it, down to [`SNAP_ZONE_LOWER_BAND`], maps to
/// the half-screen zones.
pub const SNAP_ZONE_UPPER_BAND: f32 = 0.25;

/// Normalized y coordinate at which the lower quadrant band starts.
pub const SNAP_ZONE_LOWER_BAND: f32 = 0.75;
