//! # Edit Mesh
//!
//! Editable triangle mesh engine for an interactive 3D editor.
//!
//! ## Architecture
//!
//! ```text
//! ItemCollection → Item (transform + scale) → Mesh → RenderBackend
//! ```
//!
//! - **Mesh**: vertices, triangles and edges addressed by index, with
//!   selection, marking, topology edits and a render cache
//! - **Item**: one mesh placed by position, rotation and scale
//! - **ItemCollection**: the items of a document
//! - **Manipulated**: selection and drag editing shared by meshes and
//!   collections
//!
//! ## Usage
//!
//! ```rust
//! use edit_mesh::{Item, SelectionMode};
//!
//! let mut item = Item::new();
//! let mesh = item.mesh_mut();
//! mesh.make_cube();
//! mesh.set_selection_mode(SelectionMode::Triangles);
//! mesh.set_triangle_selected(2, true);
//! mesh.set_triangle_selected(3, true);
//! mesh.extrude_selected_triangles();
//! assert_eq!(mesh.triangle_count(), 20);
//! ```

pub mod collection;
pub mod error;
pub mod io;
pub mod item;
pub mod manipulation;
pub mod math;
pub mod mesh;
pub mod render;
pub mod types;

pub use collection::ItemCollection;
pub use error::{MeshError, MeshResult};
pub use item::Item;
pub use manipulation::Manipulated;
pub use math::{Mat4, Matrix4x4, Quat, Quaternion, Transform, Vec3, Vector3D};
pub use mesh::{CacheState, Mesh, RenderCache};
pub use render::{FillBatch, RenderBackend, WireBatch};
pub use types::{Edge, MeshType, SelectionMode, Triangle, VertexIndex, ViewMode};
