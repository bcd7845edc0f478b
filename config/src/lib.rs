//! # Config Crate
//!
//! Centralized configuration constants for the mesh editing engine.
//! All magic numbers and tunable parameters are defined here to ensure
//! consistency across crates and easy configuration management.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{clamp_steps, EPSILON, DEFAULT_STEPS};
//!
//! // Use EPSILON for floating-point comparisons
//! let value: f32 = 1e-7;
//! assert!(value.abs() < EPSILON);
//!
//! // Use the tessellation defaults for curved primitives
//! let requested = 0;
//! let steps = if requested > 0 { clamp_steps(requested) } else { DEFAULT_STEPS };
//! assert_eq!(steps, DEFAULT_STEPS);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **No Dependencies**: Pure constants and small helpers

pub mod constants;
