//! # Render Cache
//!
//! Flattened per-triangle-vertex buffers derived from the mesh. Each triangle
//! contributes its own copy of its three corners so normals stay flat per
//! face. Edges are flattened the same way, two entries per edge.
//!
//! State machine: `Stale -> fill_cache -> Fresh -> any mutation -> Stale`.
//! Only [`Mesh::update_color_cache`] may run while fresh and leave the cache
//! fresh.

use super::Mesh;
use crate::types::SelectionMode;
use config::constants::{SELECTED_COLOR, SELECTED_WIRE_COLOR, WIRE_COLOR};
use tracing::trace;

/// Whether the cached buffers reflect the current mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CacheState {
    #[default]
    Stale,
    Fresh,
}

/// Derived draw buffers.
#[derive(Debug, Clone, Default)]
pub struct RenderCache {
    state: CacheState,
    pub(crate) positions: Vec<[f32; 3]>,
    pub(crate) normals: Vec<[f32; 3]>,
    pub(crate) colors: Vec<[f32; 4]>,
    pub(crate) wire_positions: Vec<[f32; 3]>,
    pub(crate) wire_colors: Vec<[f32; 4]>,
}

impl RenderCache {
    pub fn state(&self) -> CacheState {
        self.state
    }

    #[inline]
    pub fn is_fresh(&self) -> bool {
        self.state == CacheState::Fresh
    }

    /// Marks the buffers as out of date; their contents are kept until the
    /// next fill.
    #[inline]
    pub fn invalidate(&mut self) {
        self.state = CacheState::Stale;
    }

    /// Triangle corner positions, three per triangle.
    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    /// Flat face normals, three per triangle.
    pub fn normals(&self) -> &[[f32; 3]] {
        &self.normals
    }

    /// Fill colors, three per triangle.
    pub fn colors(&self) -> &[[f32; 4]] {
        &self.colors
    }

    /// Edge endpoint positions, two per edge.
    pub fn wire_positions(&self) -> &[[f32; 3]] {
        &self.wire_positions
    }

    /// Edge endpoint colors, two per edge.
    pub fn wire_colors(&self) -> &[[f32; 4]] {
        &self.wire_colors
    }
}

impl Mesh {
    /// The render cache, fresh or not.
    pub fn cache(&self) -> &RenderCache {
        &self.cache
    }

    /// Marks the render cache stale.
    #[inline]
    pub fn reset_cache(&mut self) {
        self.cache.invalidate();
    }

    /// Rebuilds positions, normals and colors from the current geometry and
    /// selection.
    pub fn fill_cache(&mut self) {
        let triangle_corners = self.triangles.len() * 3;
        let mut positions = Vec::with_capacity(triangle_corners);
        let mut normals = Vec::with_capacity(triangle_corners);
        for triangle in &self.triangles {
            let [a, b, c] = triangle.vertices.map(|v| self.vertices[v.index()]);
            let normal = crate::math::triangle_normal(a, b, c).to_array();
            for corner in [a, b, c] {
                positions.push(corner.to_array());
                normals.push(normal);
            }
        }

        let mut wire_positions = Vec::with_capacity(self.edges.len() * 2);
        for edge in &self.edges {
            for v in edge.vertices {
                wire_positions.push(self.vertices[v.index()].to_array());
            }
        }

        self.cache.positions = positions;
        self.cache.normals = normals;
        self.cache.wire_positions = wire_positions;
        self.write_colors();
        self.cache.state = CacheState::Fresh;
        trace!(
            triangles = self.triangles.len(),
            edges = self.edges.len(),
            "filled render cache"
        );
    }

    /// Refreshes only the cached colors, e.g. after a color change.
    ///
    /// A stale cache is rebuilt completely instead.
    pub fn update_color_cache(&mut self) {
        if self.cache.is_fresh() {
            self.write_colors();
        } else {
            self.fill_cache();
        }
    }

    /// Fills the cache if it is stale.
    pub(crate) fn ensure_cache(&mut self) {
        if !self.cache.is_fresh() {
            self.fill_cache();
        }
    }

    fn write_colors(&mut self) {
        let base = self.color;
        let mut colors = Vec::with_capacity(self.triangles.len() * 3);
        for (index, triangle) in self.triangles.iter().enumerate() {
            match self.selection_mode {
                SelectionMode::Vertices => {
                    for v in triangle.vertices {
                        colors.push(if self.selected_vertices[v.index()] { SELECTED_COLOR } else { base });
                    }
                }
                SelectionMode::Triangles => {
                    let color = if self.selected_triangles[index] { SELECTED_COLOR } else { base };
                    colors.extend([color; 3]);
                }
                SelectionMode::Edges => colors.extend([base; 3]),
            }
        }

        let mut wire_colors = Vec::with_capacity(self.edges.len() * 2);
        for (index, edge) in self.edges.iter().enumerate() {
            match self.selection_mode {
                SelectionMode::Vertices => {
                    for v in edge.vertices {
                        wire_colors.push(if self.selected_vertices[v.index()] {
                            SELECTED_WIRE_COLOR
                        } else {
                            WIRE_COLOR
                        });
                    }
                }
                SelectionMode::Triangles => wire_colors.extend([WIRE_COLOR; 2]),
                SelectionMode::Edges => {
                    let color = if self.selected_edges[index] { SELECTED_WIRE_COLOR } else { WIRE_COLOR };
                    wire_colors.extend([color; 2]);
                }
            }
        }

        self.cache.colors = colors;
        self.cache.wire_colors = wire_colors;
    }
}
