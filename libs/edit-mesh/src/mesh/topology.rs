//! # Topology Edits
//!
//! Split, turn, flip and extrude. Adjacency is never stored; triangles
//! sharing an edge are found by comparing indices.

use super::Mesh;
use crate::math::{centroid, triangle_cross};
use crate::types::{Edge, SelectionMode, Triangle, VertexIndex};
use config::constants::{approx_zero, DEFAULT_EXTRUDE_DISTANCE};
use glam::Vec3;
use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::{debug, warn};

impl Mesh {
    /// Indices of the triangles having `a-b` as a side.
    pub fn triangles_sharing_edge(&self, a: VertexIndex, b: VertexIndex) -> Vec<usize> {
        self.triangles
            .iter()
            .enumerate()
            .filter(|(_, t)| t.has_edge(a, b))
            .map(|(i, _)| i)
            .collect()
    }

    /// Rebuilds the edge array from the triangles, one edge per distinct side.
    ///
    /// Sides shared by two triangles produce a single edge. Edge selection is
    /// cleared.
    pub fn make_edges(&mut self) {
        let mut seen = HashSet::with_capacity(self.triangles.len() * 2);
        self.edges.clear();
        for triangle in &self.triangles {
            for edge in triangle.edges() {
                if seen.insert(edge.key()) {
                    self.edges.push(edge);
                }
            }
        }
        self.selected_edges = vec![false; self.edges.len()];
        self.reset_cache();
    }

    // =========================================================================
    // SPLIT
    // =========================================================================

    /// Adds a vertex at the triangle's centroid and replaces the triangle by
    /// three triangles fanning from it. Returns the new vertex.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn split_triangle_at_index(&mut self, index: usize) -> VertexIndex {
        let triangle = self.triangle_at(index);
        let selected = self.selected_triangles[index];
        let [a, b, c] = triangle.vertices;
        let center = self.add_vertex(centroid(self.triangle_vertices(&triangle)));

        self.triangles[index] = Triangle::new(a, b, center);
        self.push_triangle(Triangle::new(b, c, center), selected);
        self.push_triangle(Triangle::new(c, a, center), selected);
        for corner in [a, b, c] {
            self.push_edge(Edge::new(corner, center), false);
        }
        self.reset_cache();
        center
    }

    /// Splits every selected triangle.
    pub fn split_selected_triangles(&mut self) -> usize {
        let selected = self.selected_triangle_indices();
        for &index in &selected {
            self.split_triangle_at_index(index);
        }
        debug!(count = selected.len(), "split selected triangles");
        selected.len()
    }

    /// Adds a vertex at the edge's midpoint and splits every triangle using
    /// the edge in two through it. Returns the new vertex.
    ///
    /// The edge itself becomes its first half; the second half and one edge
    /// per split triangle are appended.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn split_edge_at_index(&mut self, index: usize) -> VertexIndex {
        let edge = self.edge_at(index);
        let [a, b] = edge.vertices;
        let sharing = self.triangles_sharing_edge(a, b);
        let midpoint = self.add_vertex(self.vertex_at(a).lerp(self.vertex_at(b), 0.5));

        for &t in &sharing {
            let Some((p, q, r)) = self.triangles[t].oriented_edge(a, b) else {
                continue;
            };
            let selected = self.selected_triangles[t];
            self.triangles[t] = Triangle::new(p, midpoint, r);
            self.push_triangle(Triangle::new(midpoint, q, r), selected);
            self.push_edge(Edge::new(midpoint, r), false);
        }

        let edge_selected = self.selected_edges[index];
        self.edges[index] = Edge::new(a, midpoint);
        self.push_edge(Edge::new(midpoint, b), edge_selected);
        self.reset_cache();
        midpoint
    }

    /// Splits every selected edge.
    pub fn split_selected_edges(&mut self) -> usize {
        let selected = self.selected_edge_indices();
        for &index in &selected {
            self.split_edge_at_index(index);
        }
        debug!(count = selected.len(), "split selected edges");
        selected.len()
    }

    // =========================================================================
    // TURN
    // =========================================================================

    /// Swaps the diagonal of the quad formed by the two triangles sharing
    /// edge `index`.
    ///
    /// Returns `false` without touching the mesh when the edge does not border
    /// exactly two triangles.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn turn_edge_at_index(&mut self, index: usize) -> bool {
        let edge = self.edge_at(index);
        let [a, b] = edge.vertices;
        let sharing = self.triangles_sharing_edge(a, b);
        let &[first, second] = sharing.as_slice() else {
            warn!(edge = index, adjacent = sharing.len(), "cannot turn edge without two adjacent triangles");
            return false;
        };

        let Some((p, q, c)) = self.triangles[first].oriented_edge(a, b) else {
            return false;
        };
        let Some((_, _, d)) = self.triangles[second].oriented_edge(a, b) else {
            return false;
        };
        if c == d {
            warn!(edge = index, "cannot turn edge between coincident triangles");
            return false;
        }

        self.triangles[first] = Triangle::new(c, p, d);
        self.triangles[second] = Triangle::new(d, q, c);
        self.edges[index] = Edge::new(c, d);
        self.reset_cache();
        true
    }

    /// Turns every selected edge. Returns how many were turned.
    pub fn turn_selected_edges(&mut self) -> usize {
        let turned = self
            .selected_edge_indices()
            .into_iter()
            .filter(|&index| self.turn_edge_at_index(index))
            .count();
        debug!(turned, "turned selected edges");
        turned
    }

    // =========================================================================
    // FLIP
    // =========================================================================

    /// Reverses the winding of triangle `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn flip_triangle_at_index(&mut self, index: usize) {
        self.check_triangle(index);
        self.triangles[index].flip();
        self.reset_cache();
    }

    /// Reverses the winding of every selected triangle.
    pub fn flip_selected_triangles(&mut self) {
        for index in self.selected_triangle_indices() {
            self.flip_triangle_at_index(index);
        }
    }

    /// Reverses the winding of every triangle.
    pub fn flip_all_triangles(&mut self) {
        for triangle in &mut self.triangles {
            triangle.flip();
        }
        self.reset_cache();
    }

    // =========================================================================
    // EXTRUDE
    // =========================================================================

    /// Extrudes the selected triangles by `DEFAULT_EXTRUDE_DISTANCE`.
    pub fn extrude_selected_triangles(&mut self) -> usize {
        self.extrude_selected_triangles_by(DEFAULT_EXTRUDE_DISTANCE)
    }

    /// Extrudes the selected triangles along their aggregate normal.
    ///
    /// The selected region is treated as one patch and moved by `distance`.
    /// Vertices on the region's rim, or shared with unselected triangles, are
    /// duplicated and the cap is rewired onto the copies; vertices used only
    /// inside the region move in place. Every boundary side of the region
    /// gets a quad bridging old and new rims. Selection stays on the cap so
    /// repeated extrusion chains. Edges are rebuilt.
    ///
    /// Returns the number of side triangles created.
    pub fn extrude_selected_triangles_by(&mut self, distance: f32) -> usize {
        let selected = self.selected_triangle_indices();
        if selected.is_empty() {
            return 0;
        }

        let normal = selected
            .iter()
            .map(|&t| {
                let [a, b, c] = self.triangle_vertices(&self.triangles[t]);
                triangle_cross(a, b, c).normalize_or_zero()
            })
            .sum::<Vec3>()
            .normalize_or_zero();
        if approx_zero(normal.length()) {
            warn!(
                triangles = selected.len(),
                "cannot extrude triangles whose normals cancel out"
            );
            return 0;
        }
        let offset = normal * distance;

        let mut side_uses: HashMap<(VertexIndex, VertexIndex), usize> = HashMap::new();
        for &t in &selected {
            for edge in self.triangles[t].edges() {
                *side_uses.entry(edge.key()).or_default() += 1;
            }
        }

        let mut anchored: HashSet<VertexIndex> = side_uses
            .iter()
            .filter(|&(_, &uses)| uses == 1)
            .flat_map(|(&(a, b), _)| [a, b])
            .collect();
        for (triangle, &is_selected) in self.triangles.iter().zip(&self.selected_triangles) {
            if !is_selected {
                anchored.extend(triangle.vertices);
            }
        }

        // Region vertex -> cap vertex; interior vertices map to themselves
        let mut copies: BTreeMap<VertexIndex, VertexIndex> = BTreeMap::new();
        let mut moved = 0;
        for &t in &selected {
            for v in self.triangles[t].vertices {
                if copies.contains_key(&v) {
                    continue;
                }
                let target = if anchored.contains(&v) {
                    self.add_vertex(self.vertices[v.index()] + offset)
                } else {
                    self.vertices[v.index()] += offset;
                    moved += 1;
                    v
                };
                copies.insert(v, target);
            }
        }

        let mut sides = 0;
        for &t in &selected {
            for edge in self.triangles[t].edges() {
                if side_uses[&edge.key()] != 1 {
                    continue;
                }
                let [p, q] = edge.vertices;
                self.add_quad(p, q, copies[&q], copies[&p]);
                sides += 2;
            }
        }

        for &t in &selected {
            let cap = &mut self.triangles[t];
            cap.vertices = cap.vertices.map(|v| copies[&v]);
        }

        self.make_edges();
        if self.selection_mode == SelectionMode::Triangles {
            self.make_marked_vertices();
        }
        debug!(
            triangles = selected.len(),
            new_vertices = copies.len() - moved,
            moved,
            sides,
            "extruded selected triangles"
        );
        sides
    }

    // =========================================================================
    // EDITOR COMMANDS
    // =========================================================================

    /// Merges the selection into a single vertex.
    ///
    /// Outside vertex mode the corners of the selected triangles or edges are
    /// merged; their vertex selection is cleared again afterwards.
    pub fn merge_selected(&mut self) -> Option<VertexIndex> {
        if self.selection_mode == SelectionMode::Vertices {
            return self.merge_selected_vertices();
        }
        self.make_marked_vertices();
        self.selected_vertices.clone_from(&self.marked_vertices);
        let survivor = self.merge_selected_vertices();
        self.selected_vertices.fill(false);
        self.make_marked_vertices();
        survivor
    }

    /// Splits the selected triangles or edges. Returns how many were split.
    pub fn split_selected(&mut self) -> usize {
        match self.selection_mode {
            SelectionMode::Vertices => 0,
            SelectionMode::Triangles => self.split_selected_triangles(),
            SelectionMode::Edges => self.split_selected_edges(),
        }
    }

    /// Flips the selected triangles, or turns the selected edges.
    pub fn flip_selected(&mut self) {
        match self.selection_mode {
            SelectionMode::Vertices => {}
            SelectionMode::Triangles => self.flip_selected_triangles(),
            SelectionMode::Edges => {
                self.turn_selected_edges();
            }
        }
    }
}
