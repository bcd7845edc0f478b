//! Selection modes, per-element selection flags and vertex marking.

use super::Mesh;
use crate::types::{SelectionMode, VertexIndex};

impl Mesh {
    /// The element kind the editor currently selects.
    pub fn selection_mode(&self) -> SelectionMode {
        self.selection_mode
    }

    /// Switches the element kind. All selection and marking is cleared.
    pub fn set_selection_mode(&mut self, mode: SelectionMode) {
        self.selection_mode = mode;
        self.clear_all_selection();
        self.marked_vertices.fill(false);
        self.reset_cache();
    }

    pub(crate) fn clear_all_selection(&mut self) {
        self.selected_vertices.fill(false);
        self.selected_triangles.fill(false);
        self.selected_edges.fill(false);
    }

    // =========================================================================
    // PER-KIND FLAGS
    // =========================================================================

    pub fn is_vertex_selected(&self, index: VertexIndex) -> bool {
        self.check_vertex(index);
        self.selected_vertices[index.index()]
    }

    pub fn set_vertex_selected(&mut self, index: VertexIndex, selected: bool) {
        self.check_vertex(index);
        self.selected_vertices[index.index()] = selected;
        self.reset_cache();
    }

    pub fn is_triangle_selected(&self, index: usize) -> bool {
        self.check_triangle(index);
        self.selected_triangles[index]
    }

    pub fn set_triangle_selected(&mut self, index: usize, selected: bool) {
        self.check_triangle(index);
        self.selected_triangles[index] = selected;
        self.reset_cache();
    }

    pub fn is_edge_selected(&self, index: usize) -> bool {
        self.check_edge(index);
        self.selected_edges[index]
    }

    pub fn set_edge_selected(&mut self, index: usize, selected: bool) {
        self.check_edge(index);
        self.selected_edges[index] = selected;
        self.reset_cache();
    }

    /// Indices of the selected vertices in ascending order.
    pub fn selected_vertex_indices(&self) -> Vec<VertexIndex> {
        flagged(&self.selected_vertices).map(VertexIndex::new).collect()
    }

    /// Indices of the selected triangles in ascending order.
    pub fn selected_triangle_indices(&self) -> Vec<usize> {
        flagged(&self.selected_triangles).collect()
    }

    /// Indices of the selected edges in ascending order.
    pub fn selected_edge_indices(&self) -> Vec<usize> {
        flagged(&self.selected_edges).collect()
    }

    // =========================================================================
    // ACTIVE MODE
    // =========================================================================

    /// Number of elements of the active kind.
    pub fn element_count(&self) -> usize {
        match self.selection_mode {
            SelectionMode::Vertices => self.vertices.len(),
            SelectionMode::Triangles => self.triangles.len(),
            SelectionMode::Edges => self.edges.len(),
        }
    }

    /// Selection flag of element `index` of the active kind.
    pub fn is_element_selected(&self, index: usize) -> bool {
        match self.selection_mode {
            SelectionMode::Vertices => self.is_vertex_selected(VertexIndex::new(index)),
            SelectionMode::Triangles => self.is_triangle_selected(index),
            SelectionMode::Edges => self.is_edge_selected(index),
        }
    }

    /// Sets the selection flag of element `index` of the active kind.
    pub fn set_element_selected(&mut self, index: usize, selected: bool) {
        match self.selection_mode {
            SelectionMode::Vertices => self.set_vertex_selected(VertexIndex::new(index), selected),
            SelectionMode::Triangles => self.set_triangle_selected(index, selected),
            SelectionMode::Edges => self.set_edge_selected(index, selected),
        }
    }

    /// Number of selected elements of the active kind.
    pub fn selected_count(&self) -> usize {
        self.active_flags().iter().filter(|s| **s).count()
    }

    /// Selects every element of the active kind.
    pub fn select_all(&mut self) {
        self.active_flags_mut().fill(true);
        self.reset_cache();
    }

    /// Deselects every element of the active kind.
    pub fn deselect_all(&mut self) {
        self.active_flags_mut().fill(false);
        self.reset_cache();
    }

    fn active_flags(&self) -> &[bool] {
        match self.selection_mode {
            SelectionMode::Vertices => &self.selected_vertices,
            SelectionMode::Triangles => &self.selected_triangles,
            SelectionMode::Edges => &self.selected_edges,
        }
    }

    fn active_flags_mut(&mut self) -> &mut Vec<bool> {
        match self.selection_mode {
            SelectionMode::Vertices => &mut self.selected_vertices,
            SelectionMode::Triangles => &mut self.selected_triangles,
            SelectionMode::Edges => &mut self.selected_edges,
        }
    }

    // =========================================================================
    // MARKING
    // =========================================================================

    pub fn is_vertex_marked_at_index(&self, index: VertexIndex) -> bool {
        self.check_vertex(index);
        self.marked_vertices[index.index()]
    }

    pub fn set_vertex_marked(&mut self, marked: bool, index: VertexIndex) {
        self.check_vertex(index);
        self.marked_vertices[index.index()] = marked;
    }

    /// Marks or unmarks both endpoints of edge `index`.
    pub fn set_edge_marked(&mut self, marked: bool, index: usize) {
        let edge = self.edge_at(index);
        for v in edge.vertices {
            self.marked_vertices[v.index()] = marked;
        }
    }

    /// Marks or unmarks all three corners of triangle `index`.
    pub fn set_triangle_marked(&mut self, marked: bool, index: usize) {
        let triangle = self.triangle_at(index);
        for v in triangle.vertices {
            self.marked_vertices[v.index()] = marked;
        }
    }

    /// Recomputes the marked flags from the active selection.
    ///
    /// In vertex mode the marked vertices are the selected ones; otherwise a
    /// vertex is marked when it belongs to a selected triangle or edge.
    pub fn make_marked_vertices(&mut self) {
        match self.selection_mode {
            SelectionMode::Vertices => {
                self.marked_vertices.clone_from(&self.selected_vertices);
            }
            SelectionMode::Triangles => {
                self.marked_vertices.fill(false);
                for index in self.selected_triangle_indices() {
                    self.set_triangle_marked(true, index);
                }
            }
            SelectionMode::Edges => {
                self.marked_vertices.fill(false);
                for index in self.selected_edge_indices() {
                    self.set_edge_marked(true, index);
                }
            }
        }
    }

    /// Indices of the marked vertices in ascending order.
    pub fn marked_vertex_indices(&self) -> Vec<VertexIndex> {
        flagged(&self.marked_vertices).map(VertexIndex::new).collect()
    }

    /// Vertices touched by the active selection, ascending and without
    /// repeats. Same set [`Mesh::make_marked_vertices`] would mark.
    pub fn selected_element_vertices(&self) -> Vec<VertexIndex> {
        let mut touched = vec![false; self.vertices.len()];
        match self.selection_mode {
            SelectionMode::Vertices => touched.clone_from(&self.selected_vertices),
            SelectionMode::Triangles => {
                for index in flagged(&self.selected_triangles) {
                    for v in self.triangles[index].vertices {
                        touched[v.index()] = true;
                    }
                }
            }
            SelectionMode::Edges => {
                for index in flagged(&self.selected_edges) {
                    for v in self.edges[index].vertices {
                        touched[v.index()] = true;
                    }
                }
            }
        }
        flagged(&touched).map(VertexIndex::new).collect()
    }
}

fn flagged(flags: &[bool]) -> impl Iterator<Item = usize> + '_ {
    flags
        .iter()
        .enumerate()
        .filter_map(|(i, &flag)| flag.then_some(i))
}
