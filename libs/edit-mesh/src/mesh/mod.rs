//! # Mesh Data Structure
//!
//! Editable triangle mesh: parallel arrays of vertices, triangles and edges,
//! per-element selection flags, per-vertex marked flags and a derived render
//! cache.
//!
//! Triangles and edges reference vertices by [`VertexIndex`]. Every operation
//! that removes vertices goes through one renumbering pass
//! ([`Mesh::remove_vertices_where`]) so that remaining references keep
//! pointing at the same positions.
//!
//! ## Submodules
//!
//! - `selection`: selection modes, flags and marking
//! - `topology`: split, turn, flip and extrude
//! - `primitives`: cube, cylinder and sphere generators
//! - `cache`: flattened render buffers and their staleness state

mod cache;
mod primitives;
mod selection;
mod topology;

#[cfg(test)]
mod tests;

pub use cache::{CacheState, RenderCache};

use crate::error::{MeshError, MeshResult};
use crate::render::{FillBatch, RenderBackend, WireBatch};
use crate::types::{Edge, SelectionMode, Triangle, VertexIndex, ViewMode};
use config::constants::{DEFAULT_COLOR, VERTEX_MERGE_EPSILON};
use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

/// An editable triangle mesh.
///
/// # Example
///
/// ```rust
/// use edit_mesh::Mesh;
/// use glam::Vec3;
///
/// let mut mesh = Mesh::new();
/// let a = mesh.add_vertex(Vec3::new(0.0, 0.0, 0.0));
/// let b = mesh.add_vertex(Vec3::new(1.0, 0.0, 0.0));
/// let c = mesh.add_vertex(Vec3::new(0.0, 1.0, 0.0));
/// mesh.add_triangle(a, b, c);
/// assert_eq!(mesh.triangle_count(), 1);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "MeshData")]
pub struct Mesh {
    pub(crate) vertices: Vec<Vec3>,
    pub(crate) triangles: Vec<Triangle>,
    pub(crate) edges: Vec<Edge>,
    /// One flag per vertex
    pub(crate) selected_vertices: Vec<bool>,
    /// One flag per triangle
    pub(crate) selected_triangles: Vec<bool>,
    /// One flag per edge
    pub(crate) selected_edges: Vec<bool>,
    /// One flag per vertex; drives which vertices element edits move
    pub(crate) marked_vertices: Vec<bool>,
    pub(crate) selection_mode: SelectionMode,
    /// RGBA fill color
    pub(crate) color: [f32; 4],
    #[serde(skip)]
    pub(crate) cache: RenderCache,
}

/// Deserialized fields of a [`Mesh`], checked before the mesh is built.
#[derive(Deserialize)]
struct MeshData {
    vertices: Vec<Vec3>,
    triangles: Vec<Triangle>,
    edges: Vec<Edge>,
    selected_vertices: Vec<bool>,
    selected_triangles: Vec<bool>,
    selected_edges: Vec<bool>,
    marked_vertices: Vec<bool>,
    selection_mode: SelectionMode,
    color: [f32; 4],
}

impl TryFrom<MeshData> for Mesh {
    type Error = MeshError;

    fn try_from(data: MeshData) -> MeshResult<Self> {
        let mesh = Mesh {
            vertices: data.vertices,
            triangles: data.triangles,
            edges: data.edges,
            selected_vertices: data.selected_vertices,
            selected_triangles: data.selected_triangles,
            selected_edges: data.selected_edges,
            marked_vertices: data.marked_vertices,
            selection_mode: data.selection_mode,
            color: data.color,
            cache: RenderCache::default(),
        };
        mesh.check_references()?;
        Ok(mesh)
    }
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Mesh {
    /// Geometry, flags and color; the render cache is derived and ignored.
    fn eq(&self, other: &Self) -> bool {
        self.vertices == other.vertices
            && self.triangles == other.triangles
            && self.edges == other.edges
            && self.selected_vertices == other.selected_vertices
            && self.selected_triangles == other.selected_triangles
            && self.selected_edges == other.selected_edges
            && self.marked_vertices == other.marked_vertices
            && self.selection_mode == other.selection_mode
            && self.color == other.color
    }
}

impl Mesh {
    /// Creates an empty mesh.
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            triangles: Vec::new(),
            edges: Vec::new(),
            selected_vertices: Vec::new(),
            selected_triangles: Vec::new(),
            selected_edges: Vec::new(),
            marked_vertices: Vec::new(),
            selection_mode: SelectionMode::default(),
            color: DEFAULT_COLOR,
            cache: RenderCache::default(),
        }
    }

    /// Removes all geometry and flags. Color and selection mode are kept.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.triangles.clear();
        self.edges.clear();
        self.selected_vertices.clear();
        self.selected_triangles.clear();
        self.selected_edges.clear();
        self.marked_vertices.clear();
        self.reset_cache();
    }

    // =========================================================================
    // ACCESSORS
    // =========================================================================

    /// Returns the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of triangles.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Returns the number of edges.
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns true if the mesh has no vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    #[inline]
    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    #[inline]
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    #[inline]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Returns the vertex position at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn vertex_at(&self, index: VertexIndex) -> Vec3 {
        self.check_vertex(index);
        self.vertices[index.index()]
    }

    /// Moves a vertex. Topology is untouched.
    pub fn set_vertex_at(&mut self, index: VertexIndex, position: Vec3) {
        self.check_vertex(index);
        self.vertices[index.index()] = position;
        self.reset_cache();
    }

    /// Returns the triangle at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn triangle_at(&self, index: usize) -> Triangle {
        self.check_triangle(index);
        self.triangles[index]
    }

    /// Returns the edge at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn edge_at(&self, index: usize) -> Edge {
        self.check_edge(index);
        self.edges[index]
    }

    /// Resolves a triangle's three corner positions.
    pub fn triangle_vertices(&self, triangle: &Triangle) -> [Vec3; 3] {
        triangle.vertices.map(|v| self.vertex_at(v))
    }

    /// Unit normal of the triangle at `index`.
    pub fn triangle_normal(&self, index: usize) -> Vec3 {
        let [a, b, c] = self.triangle_vertices(&self.triangle_at(index));
        crate::math::triangle_normal(a, b, c)
    }

    /// RGBA fill color.
    pub fn color(&self) -> [f32; 4] {
        self.color
    }

    /// Changes the fill color, refreshing only the cached colors.
    pub fn set_color(&mut self, color: [f32; 4]) {
        self.color = color;
        self.update_color_cache();
    }

    /// Computes the axis-aligned bounding box.
    ///
    /// Returns (min, max) corners, both zero for an empty mesh.
    pub fn bounding_box(&self) -> (Vec3, Vec3) {
        let Some(first) = self.vertices.first() else {
            return (Vec3::ZERO, Vec3::ZERO);
        };
        self.vertices[1..]
            .iter()
            .fold((*first, *first), |(min, max), v| (min.min(*v), max.max(*v)))
    }

    /// Validates the mesh for correctness.
    ///
    /// Checks:
    /// - All triangle and edge indices are in range
    /// - No degenerate triangles
    /// - Flag arrays match their element counts
    pub fn validate(&self) -> bool {
        self.check_references().is_ok() && !self.triangles.iter().any(Triangle::is_degenerate)
    }

    /// Checks that every index is in range and every flag array matches its
    /// element count. Degenerate triangles are allowed.
    pub fn check_references(&self) -> MeshResult<()> {
        let vertex_count = self.vertices.len();
        let flag_counts = [
            ("vertex selection", self.selected_vertices.len(), vertex_count),
            ("vertex marks", self.marked_vertices.len(), vertex_count),
            ("triangle selection", self.selected_triangles.len(), self.triangles.len()),
            ("edge selection", self.selected_edges.len(), self.edges.len()),
        ];
        for (name, len, expected) in flag_counts {
            if len != expected {
                return Err(MeshError::invalid_data(format!(
                    "{name} has {len} flags for {expected} elements"
                )));
            }
        }

        for (i, t) in self.triangles.iter().enumerate() {
            if let Some(v) = t.vertices.iter().find(|v| v.index() >= vertex_count) {
                return Err(MeshError::invalid_data(format!(
                    "triangle {i} references vertex {} of {vertex_count}",
                    v.0
                )));
            }
        }
        for (i, e) in self.edges.iter().enumerate() {
            if let Some(v) = e.vertices.iter().find(|v| v.index() >= vertex_count) {
                return Err(MeshError::invalid_data(format!(
                    "edge {i} references vertex {} of {vertex_count}",
                    v.0
                )));
            }
        }
        Ok(())
    }

    // =========================================================================
    // ADDING ELEMENTS
    // =========================================================================

    /// Adds a vertex and returns its index.
    pub fn add_vertex(&mut self, position: Vec3) -> VertexIndex {
        let index = VertexIndex::new(self.vertices.len());
        self.vertices.push(position);
        self.selected_vertices.push(false);
        self.marked_vertices.push(false);
        self.reset_cache();
        index
    }

    /// Adds a triangle by vertex indices and returns its index.
    ///
    /// # Panics
    ///
    /// Panics if any vertex index is out of range.
    pub fn add_triangle(&mut self, v1: VertexIndex, v2: VertexIndex, v3: VertexIndex) -> usize {
        self.add_triangle_record(Triangle::new(v1, v2, v3))
    }

    /// Adds an existing triangle value and returns its index.
    pub fn add_triangle_record(&mut self, triangle: Triangle) -> usize {
        self.push_triangle(triangle, false)
    }

    /// Adds the quad `v1 v2 v3 v4` as two triangles sharing the diagonal `v1-v3`.
    pub fn add_quad(&mut self, v1: VertexIndex, v2: VertexIndex, v3: VertexIndex, v4: VertexIndex) {
        self.add_triangle(v1, v2, v3);
        self.add_triangle(v1, v3, v4);
    }

    /// Adds an edge and returns its index.
    ///
    /// # Panics
    ///
    /// Panics if either vertex index is out of range.
    pub fn add_edge(&mut self, v1: VertexIndex, v2: VertexIndex) -> usize {
        self.push_edge(Edge::new(v1, v2), false)
    }

    pub(crate) fn push_triangle(&mut self, triangle: Triangle, selected: bool) -> usize {
        for v in triangle.vertices {
            self.check_vertex(v);
        }
        self.triangles.push(triangle);
        self.selected_triangles.push(selected);
        self.reset_cache();
        self.triangles.len() - 1
    }

    pub(crate) fn push_edge(&mut self, edge: Edge, selected: bool) -> usize {
        for v in edge.vertices {
            self.check_vertex(v);
        }
        self.edges.push(edge);
        self.selected_edges.push(selected);
        self.reset_cache();
        self.edges.len() - 1
    }

    // =========================================================================
    // REMOVING ELEMENTS
    // =========================================================================

    /// Removes one vertex, every triangle and edge using it, and renumbers
    /// the remaining references.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn remove_vertex_at_index(&mut self, index: VertexIndex) {
        self.check_vertex(index);
        let mut remove = vec![false; self.vertices.len()];
        remove[index.index()] = true;
        self.remove_vertices_where(&remove);
    }

    /// Removes the triangle at `index`, shifting later triangles down.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn remove_triangle_at_index(&mut self, index: usize) {
        self.check_triangle(index);
        self.triangles.remove(index);
        self.selected_triangles.remove(index);
        self.reset_cache();
    }

    /// Removes the edge at `index`, shifting later edges down.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn remove_edge_at_index(&mut self, index: usize) {
        self.check_edge(index);
        self.edges.remove(index);
        self.selected_edges.remove(index);
        self.reset_cache();
    }

    /// Removes every vertex whose `remove` flag is set.
    ///
    /// This is the single renumbering pass used by all vertex removals:
    /// triangles and edges that reference a removed vertex are dropped, all
    /// other references are rewritten to the vertex's new position. Returns
    /// the number of vertices removed.
    pub(crate) fn remove_vertices_where(&mut self, remove: &[bool]) -> usize {
        debug_assert_eq!(remove.len(), self.vertices.len());

        let mut remap = Vec::with_capacity(remove.len());
        let mut next = 0usize;
        for &gone in remove {
            if gone {
                remap.push(None);
            } else {
                remap.push(Some(VertexIndex::new(next)));
                next += 1;
            }
        }
        let removed = remove.len() - next;
        if removed == 0 {
            return 0;
        }

        let keep: Vec<bool> = remove.iter().map(|gone| !gone).collect();
        retain_by_mask(&mut self.vertices, &keep);
        retain_by_mask(&mut self.selected_vertices, &keep);
        retain_by_mask(&mut self.marked_vertices, &keep);

        let keep_triangles: Vec<bool> = self
            .triangles
            .iter()
            .map(|t| t.vertices.iter().all(|v| remap[v.index()].is_some()))
            .collect();
        retain_by_mask(&mut self.triangles, &keep_triangles);
        retain_by_mask(&mut self.selected_triangles, &keep_triangles);
        for triangle in &mut self.triangles {
            for v in &mut triangle.vertices {
                if let Some(new_index) = remap[v.index()] {
                    *v = new_index;
                }
            }
        }

        let keep_edges: Vec<bool> = self
            .edges
            .iter()
            .map(|e| e.vertices.iter().all(|v| remap[v.index()].is_some()))
            .collect();
        retain_by_mask(&mut self.edges, &keep_edges);
        retain_by_mask(&mut self.selected_edges, &keep_edges);
        for edge in &mut self.edges {
            for v in &mut edge.vertices {
                if let Some(new_index) = remap[v.index()] {
                    *v = new_index;
                }
            }
        }

        debug!(
            removed,
            triangles = self.triangles.len(),
            edges = self.edges.len(),
            "renumbered mesh after vertex removal"
        );
        self.reset_cache();
        removed
    }

    /// Removes every selected vertex along with the triangles and edges using it.
    pub fn remove_selected_vertices(&mut self) -> usize {
        let remove = self.selected_vertices.clone();
        self.remove_vertices_where(&remove)
    }

    /// Removes the selected triangles and every vertex no other triangle
    /// uses. Edges are rebuilt from what remains.
    pub fn remove_selected_triangles(&mut self) -> usize {
        let keep: Vec<bool> = self.selected_triangles.iter().map(|s| !s).collect();
        let removed = keep.iter().filter(|k| !**k).count();
        if removed == 0 {
            return 0;
        }
        retain_by_mask(&mut self.triangles, &keep);
        retain_by_mask(&mut self.selected_triangles, &keep);

        let mut unused = vec![true; self.vertices.len()];
        for v in self.triangles.iter().flat_map(|t| t.vertices) {
            unused[v.index()] = false;
        }
        self.remove_vertices_where(&unused);
        self.make_edges();
        debug!(removed, "removed selected triangles");
        removed
    }

    /// Removes the selected edges. Triangles and vertices are untouched.
    pub fn remove_selected_edges(&mut self) -> usize {
        let keep: Vec<bool> = self.selected_edges.iter().map(|s| !s).collect();
        let removed = keep.iter().filter(|k| !**k).count();
        if removed > 0 {
            retain_by_mask(&mut self.edges, &keep);
            retain_by_mask(&mut self.selected_edges, &keep);
            self.reset_cache();
        }
        removed
    }

    /// Removes vertices referenced by no triangle and no edge.
    pub fn remove_unused_vertices(&mut self) -> usize {
        let mut used = vec![false; self.vertices.len()];
        let references = self
            .triangles
            .iter()
            .flat_map(|t| t.vertices)
            .chain(self.edges.iter().flat_map(|e| e.vertices));
        for v in references {
            used[v.index()] = true;
        }
        let remove: Vec<bool> = used.iter().map(|u| !u).collect();
        self.remove_vertices_where(&remove)
    }

    /// Removes triangles naming fewer than three distinct vertices.
    pub fn remove_degenerated_triangles(&mut self) -> usize {
        let keep: Vec<bool> = self.triangles.iter().map(|t| !t.is_degenerate()).collect();
        let removed = keep.iter().filter(|k| !**k).count();
        if removed > 0 {
            retain_by_mask(&mut self.triangles, &keep);
            retain_by_mask(&mut self.selected_triangles, &keep);
            debug!(removed, "removed degenerate triangles");
            self.reset_cache();
        }
        removed
    }

    /// Removes edges with coincident endpoints and repeated undirected edges.
    pub fn remove_degenerated_edges(&mut self) -> usize {
        let mut seen = HashSet::with_capacity(self.edges.len());
        let keep: Vec<bool> = self
            .edges
            .iter()
            .map(|e| !e.is_degenerate() && seen.insert(e.key()))
            .collect();
        let removed = keep.iter().filter(|k| !**k).count();
        if removed > 0 {
            retain_by_mask(&mut self.edges, &keep);
            retain_by_mask(&mut self.selected_edges, &keep);
            debug!(removed, "removed degenerate edges");
            self.reset_cache();
        }
        removed
    }

    // =========================================================================
    // MERGING VERTICES
    // =========================================================================

    /// Collapses vertex `second` into `first` by rewriting every triangle and
    /// edge reference. The `second` slot stays in place, orphaned.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range.
    pub fn fast_merge_vertex_first(&mut self, first: VertexIndex, second: VertexIndex) {
        self.check_vertex(first);
        self.check_vertex(second);
        for triangle in &mut self.triangles {
            triangle.replace(second, first);
        }
        for edge in &mut self.edges {
            edge.replace(second, first);
        }
        self.reset_cache();
    }

    /// Moves the first selected vertex to the selection's centroid and
    /// collapses the other selected vertices into it without cleanup.
    ///
    /// Returns the surviving vertex, or `None` when fewer than two vertices
    /// are selected.
    pub fn fast_merge_selected_vertices(&mut self) -> Option<VertexIndex> {
        let selected = self.selected_vertex_indices();
        let (&first, rest) = selected.split_first()?;
        if rest.is_empty() {
            return None;
        }
        let center = crate::math::centroid(selected.iter().map(|v| self.vertices[v.index()]));
        self.vertices[first.index()] = center;
        for &other in rest {
            self.fast_merge_vertex_first(first, other);
        }
        Some(first)
    }

    /// Merges the selected vertices into one and removes the orphaned
    /// vertices, degenerate triangles and degenerate edges it leaves behind.
    pub fn merge_selected_vertices(&mut self) -> Option<VertexIndex> {
        let first = self.fast_merge_selected_vertices()?;
        let remove: Vec<bool> = self
            .selected_vertices
            .iter()
            .enumerate()
            .map(|(i, &selected)| selected && i != first.index())
            .collect();
        let removed_before_first = remove[..first.index()].iter().filter(|r| **r).count();
        let merged = self.remove_vertices_where(&remove);
        self.remove_degenerated_triangles();
        self.remove_degenerated_edges();
        debug!(merged, "merged selected vertices");
        Some(VertexIndex::new(first.index() - removed_before_first))
    }

    /// Welds selected vertices that lie within `VERTEX_MERGE_EPSILON` of each
    /// other, then cleans up like [`Mesh::merge_selected_vertices`].
    ///
    /// Returns the number of vertices welded away.
    pub fn merge_vertex_pairs(&mut self) -> usize {
        let selected = self.selected_vertex_indices();
        let mut remove = vec![false; self.vertices.len()];
        for (i, &first) in selected.iter().enumerate() {
            if remove[first.index()] {
                continue;
            }
            for &second in &selected[i + 1..] {
                if remove[second.index()] {
                    continue;
                }
                let distance = self.vertices[first.index()].distance(self.vertices[second.index()]);
                if distance < VERTEX_MERGE_EPSILON {
                    self.fast_merge_vertex_first(first, second);
                    remove[second.index()] = true;
                }
            }
        }
        let welded = self.remove_vertices_where(&remove);
        if welded > 0 {
            self.remove_degenerated_triangles();
            self.remove_degenerated_edges();
            debug!(welded, "welded coincident vertex pairs");
        }
        welded
    }

    // =========================================================================
    // WHOLE-MESH OPERATIONS
    // =========================================================================

    /// Appends another mesh, offsetting its vertex references by this mesh's
    /// vertex count.
    pub fn merge_with_mesh(&mut self, other: &Mesh) {
        let offset = self.vertices.len();

        self.vertices.extend_from_slice(&other.vertices);
        self.selected_vertices.extend_from_slice(&other.selected_vertices);
        self.marked_vertices.extend_from_slice(&other.marked_vertices);

        self.triangles.extend(other.triangles.iter().map(|t| Triangle {
            vertices: t.vertices.map(|v| v.offset(offset)),
        }));
        self.selected_triangles.extend_from_slice(&other.selected_triangles);

        self.edges.extend(other.edges.iter().map(|e| Edge {
            vertices: e.vertices.map(|v| v.offset(offset)),
        }));
        self.selected_edges.extend_from_slice(&other.selected_edges);

        debug!(
            offset,
            vertices = other.vertices.len(),
            triangles = other.triangles.len(),
            "merged mesh"
        );
        self.reset_cache();
    }

    /// Transforms every vertex position by a 4x4 matrix.
    pub fn transform_with_matrix(&mut self, matrix: &Mat4) {
        for v in &mut self.vertices {
            *v = matrix.transform_point3(*v);
        }
        self.reset_cache();
    }

    // =========================================================================
    // DRAWING
    // =========================================================================

    /// Fills the cached triangles with the given model matrix.
    pub fn draw_fill<B: RenderBackend + ?Sized>(&mut self, backend: &mut B, model: Mat4, highlighted: bool) {
        self.ensure_cache();
        backend.draw_fill(&FillBatch {
            model,
            positions: &self.cache.positions,
            normals: &self.cache.normals,
            colors: &self.cache.colors,
            highlighted,
        });
    }

    /// Strokes the cached edges with the given model matrix.
    pub fn draw_wire<B: RenderBackend + ?Sized>(&mut self, backend: &mut B, model: Mat4, highlighted: bool) {
        self.ensure_cache();
        backend.draw_wire(&WireBatch {
            model,
            positions: &self.cache.wire_positions,
            colors: &self.cache.wire_colors,
            highlighted,
        });
    }

    /// Draws in the given view mode, applying `scale` on top of `model`.
    pub fn draw_with_mode<B: RenderBackend + ?Sized>(
        &mut self,
        backend: &mut B,
        model: Mat4,
        mode: ViewMode,
        scale: Vec3,
        selected: bool,
    ) {
        let model = model * Mat4::from_scale(scale);
        match mode {
            ViewMode::Solid => self.draw_fill(backend, model, selected),
            ViewMode::Wireframe => self.draw_wire(backend, model, selected),
        }
    }

    // =========================================================================
    // PRECONDITIONS
    // =========================================================================

    #[inline]
    pub(crate) fn check_vertex(&self, index: VertexIndex) {
        assert!(
            index.index() < self.vertices.len(),
            "vertex index {} out of range (vertex count {})",
            index,
            self.vertices.len()
        );
    }

    #[inline]
    pub(crate) fn check_triangle(&self, index: usize) {
        assert!(
            index < self.triangles.len(),
            "triangle index {} out of range (triangle count {})",
            index,
            self.triangles.len()
        );
    }

    #[inline]
    pub(crate) fn check_edge(&self, index: usize) {
        assert!(
            index < self.edges.len(),
            "edge index {} out of range (edge count {})",
            index,
            self.edges.len()
        );
    }
}

/// Keeps the items whose mask entry is true, preserving order.
pub(crate) fn retain_by_mask<T>(items: &mut Vec<T>, keep: &[bool]) {
    debug_assert_eq!(items.len(), keep.len());
    let mut position = 0;
    items.retain(|_| {
        let kept = keep[position];
        position += 1;
        kept
    });
}
