//! # Item
//!
//! One mesh placed in the scene by a rigid transform plus a scale that only
//! the mesh draw call sees.

use crate::error::MeshResult;
use crate::math::Transform;
use crate::mesh::Mesh;
use crate::render::RenderBackend;
use crate::types::{MeshType, ViewMode};
use config::constants::DEFAULT_STEPS;
use glam::{Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// A mesh with its own position, rotation, scale and selection flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    mesh: Mesh,
    position: Vec3,
    rotation: Quat,
    scale: Vec3,
    selected: bool,
}

impl Default for Item {
    fn default() -> Self {
        Self::new()
    }
}

impl Item {
    /// Creates an unselected item with an empty mesh at the identity
    /// transform and unit scale.
    pub fn new() -> Self {
        Self::with_transform(Vec3::ZERO, Quat::IDENTITY, Vec3::ONE)
    }

    /// Creates an unselected item with an empty mesh at the given transform.
    pub fn with_transform(position: Vec3, rotation: Quat, scale: Vec3) -> Self {
        Self {
            mesh: Mesh::new(),
            position,
            rotation,
            scale,
            selected: false,
        }
    }

    /// Wraps an existing mesh at the identity transform.
    pub fn from_mesh(mesh: Mesh) -> Self {
        Self {
            mesh,
            ..Self::new()
        }
    }

    /// Creates an item holding a fresh primitive tessellated with
    /// `DEFAULT_STEPS`.
    pub fn with_mesh_type(mesh_type: MeshType) -> MeshResult<Self> {
        let mut item = Self::new();
        item.mesh.make_mesh_with_type(mesh_type, DEFAULT_STEPS)?;
        Ok(item)
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn mesh_mut(&mut self) -> &mut Mesh {
        &mut self.mesh
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    pub fn set_rotation(&mut self, rotation: Quat) {
        self.rotation = rotation;
    }

    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    pub fn set_scale(&mut self, scale: Vec3) {
        self.scale = scale;
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    /// Position and rotation, without scale.
    pub fn transform(&self) -> Transform {
        Transform::new(self.position, self.rotation)
    }

    /// `translate(position) * rotate(rotation) * scale(scale)`.
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }

    /// Draws the mesh under `parent`.
    ///
    /// The item's translation and rotation are composed into the matrix
    /// handed down; scale is applied only by the mesh draw call.
    pub fn draw<B: RenderBackend + ?Sized>(&mut self, backend: &mut B, parent: Mat4, mode: ViewMode) {
        let model = self.transform().under(parent);
        self.mesh
            .draw_with_mode(backend, model, mode, self.scale, self.selected);
    }

    pub fn move_by(&mut self, offset: Vec3) {
        self.position += offset;
    }

    /// Pre-multiplies the rotation: `new = offset * old`.
    pub fn rotate_by(&mut self, offset: Quat) {
        self.rotation = offset * self.rotation;
    }

    /// Adds `offset` to the scale componentwise.
    pub fn scale_by(&mut self, offset: Vec3) {
        self.scale += offset;
    }

    /// Returns a new item at the same transform whose mesh is a merged copy
    /// of this one.
    ///
    /// Afterwards this item is selected and the copy is not.
    pub fn clone_item(&mut self) -> Item {
        let mut copy = Item::with_transform(self.position, self.rotation, self.scale);
        copy.mesh.merge_with_mesh(&self.mesh);
        copy.selected = false;
        self.selected = true;
        copy
    }

    /// The mesh with the full item transform baked into its vertices.
    pub fn world_mesh(&self) -> Mesh {
        let mut mesh = self.mesh.clone();
        mesh.transform_with_matrix(&self.model_matrix());
        mesh
    }
}
