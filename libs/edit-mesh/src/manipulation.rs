//! # Manipulation
//!
//! The transform-editing contract shared by everything the editor can select
//! and drag: mesh elements in the active selection mode, and whole items in
//! a collection.

use crate::math::centroid;
use crate::mesh::Mesh;
use crate::types::{SelectionMode, Triangle, VertexIndex};
use glam::{Quat, Vec3};
use std::collections::BTreeMap;
use tracing::debug;

/// A sequence of selectable, movable elements.
pub trait Manipulated {
    /// Number of selectable elements.
    fn count(&self) -> usize;

    fn is_selected(&self, index: usize) -> bool;

    fn set_selected(&mut self, index: usize, selected: bool);

    /// Pivot for rotation and scaling; `None` when nothing is selected.
    fn selection_center(&self) -> Option<Vec3>;

    fn move_selected_by(&mut self, offset: Vec3);

    fn rotate_selected_by(&mut self, rotation: Quat);

    fn scale_selected_by(&mut self, offset: Vec3);

    /// Duplicates the selection; the copies become the selection.
    fn clone_selected(&mut self);

    fn remove_selected(&mut self);

    fn selected_count(&self) -> usize {
        (0..self.count()).filter(|&i| self.is_selected(i)).count()
    }

    fn select_all(&mut self) {
        for index in 0..self.count() {
            self.set_selected(index, true);
        }
    }

    fn deselect_all(&mut self) {
        for index in 0..self.count() {
            self.set_selected(index, false);
        }
    }
}

// =============================================================================
// MESH ELEMENTS
// =============================================================================

impl Mesh {
    /// Applies `f` to every vertex touched by the active selection.
    fn map_marked_vertices(&mut self, f: impl Fn(Vec3) -> Vec3) {
        self.make_marked_vertices();
        for index in self.marked_vertex_indices() {
            let moved = f(self.vertex_at(index));
            self.set_vertex_at(index, moved);
        }
    }
}

impl Manipulated for Mesh {
    fn count(&self) -> usize {
        self.element_count()
    }

    fn is_selected(&self, index: usize) -> bool {
        self.is_element_selected(index)
    }

    fn set_selected(&mut self, index: usize, selected: bool) {
        self.set_element_selected(index, selected);
    }

    fn selection_center(&self) -> Option<Vec3> {
        let vertices = self.selected_element_vertices();
        if vertices.is_empty() {
            return None;
        }
        Some(centroid(vertices.into_iter().map(|v| self.vertex_at(v))))
    }

    fn move_selected_by(&mut self, offset: Vec3) {
        self.map_marked_vertices(|p| p + offset);
    }

    fn rotate_selected_by(&mut self, rotation: Quat) {
        let Some(center) = self.selection_center() else {
            return;
        };
        self.map_marked_vertices(|p| center + rotation * (p - center));
    }

    /// Scales about the selection center by the factor `1 + offset`.
    fn scale_selected_by(&mut self, offset: Vec3) {
        let Some(center) = self.selection_center() else {
            return;
        };
        let factor = Vec3::ONE + offset;
        self.map_marked_vertices(|p| center + (p - center) * factor);
    }

    /// Copies the selected triangles onto fresh vertices. Only triangle mode
    /// has anything to clone.
    fn clone_selected(&mut self) {
        if self.selection_mode() != SelectionMode::Triangles {
            return;
        }
        let selected = self.selected_triangle_indices();
        if selected.is_empty() {
            return;
        }

        let mut copies: BTreeMap<VertexIndex, VertexIndex> = BTreeMap::new();
        for &index in &selected {
            let original = self.triangle_at(index);
            let mut corners = original.vertices;
            for corner in &mut corners {
                let copy = match copies.get(corner) {
                    Some(&copy) => copy,
                    None => {
                        let copy = self.add_vertex(self.vertex_at(*corner));
                        copies.insert(*corner, copy);
                        copy
                    }
                };
                *corner = copy;
            }
            self.set_triangle_selected(index, false);
            let [a, b, c] = corners;
            self.push_triangle(Triangle::new(a, b, c), true);
        }

        self.make_edges();
        self.make_marked_vertices();
        debug!(
            triangles = selected.len(),
            vertices = copies.len(),
            "cloned selected triangles"
        );
    }

    fn remove_selected(&mut self) {
        let removed = match self.selection_mode() {
            SelectionMode::Vertices => self.remove_selected_vertices(),
            SelectionMode::Triangles => self.remove_selected_triangles(),
            SelectionMode::Edges => self.remove_selected_edges(),
        };
        debug!(removed, mode = ?self.selection_mode(), "removed selection");
    }

    fn selected_count(&self) -> usize {
        Mesh::selected_count(self)
    }

    fn select_all(&mut self) {
        Mesh::select_all(self);
    }

    fn deselect_all(&mut self) {
        Mesh::deselect_all(self);
    }
}
