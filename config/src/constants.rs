//! # Configuration Constants
//!
//! Centralized constants for the mesh editing engine. Geometry tolerances,
//! tessellation parameters, editing defaults and display colors are all
//! defined here.
//!
//! ## Categories
//!
//! - **Precision**: Floating-point comparison tolerances
//! - **Tessellation**: Step counts for the procedural primitives
//! - **Editing**: Defaults for interactive topology edits
//! - **Limits**: Maximum values for safety bounds
//! - **Colors**: Display colors for fill and wire rendering

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Epsilon for floating-point comparisons, backing [`approx_zero`].
///
/// Mesh coordinates are stored as `f32`, so this is considerably looser than
/// a double precision tolerance would be.
///
/// # Example
///
/// ```rust
/// use config::constants::EPSILON;
///
/// fn approximately_equal(a: f32, b: f32) -> bool {
///     (a - b).abs() < EPSILON
/// }
///
/// assert!(approximately_equal(1.0, 1.0 + 1e-7));
/// ```
pub const EPSILON: f32 = 1e-6;

/// Distance below which two vertices are considered coincident.
///
/// Used when welding selected vertex pairs.
///
/// # Example
///
/// ```rust
/// use config::constants::VERTEX_MERGE_EPSILON;
///
/// fn vertices_should_merge(a: [f32; 3], b: [f32; 3]) -> bool {
///     let dx = a[0] - b[0];
///     let dy = a[1] - b[1];
///     let dz = a[2] - b[2];
///     (dx * dx + dy * dy + dz * dz).sqrt() < VERTEX_MERGE_EPSILON
/// }
///
/// assert!(vertices_should_merge([0.0; 3], [0.0, 0.0, 1e-5]));
/// ```
pub const VERTEX_MERGE_EPSILON: f32 = 1e-4;

// =============================================================================
// TESSELLATION CONSTANTS
// =============================================================================

/// Default number of steps for curved primitives (cylinder, sphere).
///
/// # Example
///
/// ```rust
/// use config::constants::{DEFAULT_STEPS, MIN_STEPS};
///
/// assert!(DEFAULT_STEPS >= MIN_STEPS);
/// ```
pub const DEFAULT_STEPS: u32 = 16;

/// Minimum number of steps accepted by the curved primitives.
///
/// Three steps is the smallest count that still encloses a volume.
pub const MIN_STEPS: u32 = 3;

/// Maximum number of steps for the curved primitives.
///
/// Larger requests are clamped to keep interactive editing responsive.
pub const MAX_STEPS: u32 = 256;

// =============================================================================
// EDITING CONSTANTS
// =============================================================================

/// Distance new caps are moved along the face normal when extruding.
///
/// # Example
///
/// ```rust
/// use config::constants::DEFAULT_EXTRUDE_DISTANCE;
///
/// assert!(DEFAULT_EXTRUDE_DISTANCE > 0.0);
/// ```
pub const DEFAULT_EXTRUDE_DISTANCE: f32 = 0.5;

// =============================================================================
// LIMIT CONSTANTS
// =============================================================================

/// Maximum number of vertices accepted when decoding a mesh.
///
/// Protects against corrupt count fields allocating unbounded memory.
pub const MAX_VERTICES: usize = 10_000_000;

/// Maximum number of triangles accepted when decoding a mesh.
pub const MAX_TRIANGLES: usize = 10_000_000;

/// Maximum number of edges accepted when decoding a mesh.
///
/// Every triangle contributes at most three edges.
pub const MAX_EDGES: usize = 3 * MAX_TRIANGLES;

// =============================================================================
// COLOR CONSTANTS
// =============================================================================

/// Default mesh color when none is specified (light gray).
///
/// RGBA values in range [0.0, 1.0].
pub const DEFAULT_COLOR: [f32; 4] = [0.8, 0.8, 0.8, 1.0];

/// Fill color of selected vertices, triangles or edges.
pub const SELECTED_COLOR: [f32; 4] = [1.0, 0.0, 0.0, 1.0];

/// Wireframe color of unselected edges.
pub const WIRE_COLOR: [f32; 4] = [0.1, 0.1, 0.1, 1.0];

/// Wireframe color of selected edges.
pub const SELECTED_WIRE_COLOR: [f32; 4] = [1.0, 0.5, 0.0, 1.0];

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Clamps a requested step count to `MIN_STEPS..=MAX_STEPS`.
///
/// # Example
///
/// ```rust
/// use config::constants::{clamp_steps, MAX_STEPS, MIN_STEPS};
///
/// assert_eq!(clamp_steps(1), MIN_STEPS);
/// assert_eq!(clamp_steps(12), 12);
/// assert_eq!(clamp_steps(100_000), MAX_STEPS);
/// ```
#[inline]
pub fn clamp_steps(steps: u32) -> u32 {
    steps.clamp(MIN_STEPS, MAX_STEPS)
}

/// Checks if a f32 value is approximately zero within EPSILON.
///
/// # Example
///
/// ```rust
/// use config::constants::approx_zero;
///
/// assert!(approx_zero(1e-7));
/// assert!(!approx_zero(0.1));
/// ```
#[inline]
pub fn approx_zero(value: f32) -> bool {
    value.abs() < EPSILON
}
