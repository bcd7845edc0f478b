//! # Mesh Tests
//!
//! Unit tests for element bookkeeping, renumbering, topology edits,
//! primitives and the render cache.

use super::*;
use crate::math::triangle_area;
use crate::render::RecordingBackend;
use crate::types::MeshType;
use approx::assert_relative_eq;
use config::constants::{
    DEFAULT_COLOR, DEFAULT_EXTRUDE_DISTANCE, SELECTED_COLOR, SELECTED_WIRE_COLOR,
};

fn v(i: usize) -> VertexIndex {
    VertexIndex::new(i)
}

/// Unit square in the XY plane as two triangles sharing the diagonal 0-2.
///
/// Edges: `[(0,1), (1,2), (2,0), (2,3), (3,0)]`, the diagonal is edge 2.
fn quad_mesh() -> Mesh {
    let mut mesh = Mesh::new();
    let a = mesh.add_vertex(Vec3::new(0.0, 0.0, 0.0));
    let b = mesh.add_vertex(Vec3::new(1.0, 0.0, 0.0));
    let c = mesh.add_vertex(Vec3::new(1.0, 1.0, 0.0));
    let d = mesh.add_vertex(Vec3::new(0.0, 1.0, 0.0));
    mesh.add_quad(a, b, c, d);
    mesh.make_edges();
    mesh
}

fn total_area(mesh: &Mesh) -> f32 {
    mesh.triangles()
        .iter()
        .map(|t| {
            let [a, b, c] = mesh.triangle_vertices(t);
            triangle_area(a, b, c)
        })
        .sum()
}

/// Signed volume enclosed by the mesh; positive for outward winding.
fn signed_volume(mesh: &Mesh) -> f32 {
    mesh.triangles()
        .iter()
        .map(|t| {
            let [a, b, c] = mesh.triangle_vertices(t);
            a.dot(b.cross(c)) / 6.0
        })
        .sum()
}

fn assert_indices_valid(mesh: &Mesh) {
    let count = mesh.vertex_count();
    for t in mesh.triangles() {
        assert!(t.vertices.iter().all(|v| v.index() < count), "{t:?} out of range");
    }
    for e in mesh.edges() {
        assert!(e.vertices.iter().all(|v| v.index() < count), "{e:?} out of range");
    }
}

/// Every edge borders exactly two triangles.
fn assert_closed(mesh: &Mesh) {
    for e in mesh.edges() {
        assert_eq!(mesh.triangles_sharing_edge(e.v1(), e.v2()).len(), 2, "{e:?}");
    }
}

// =============================================================================
// ELEMENT BOOKKEEPING
// =============================================================================

#[test]
fn test_mesh_new() {
    let mesh = Mesh::new();
    assert!(mesh.is_empty());
    assert_eq!(mesh.vertex_count(), 0);
    assert_eq!(mesh.triangle_count(), 0);
    assert_eq!(mesh.edge_count(), 0);
    assert_eq!(mesh.color(), DEFAULT_COLOR);
}

#[test]
fn test_mesh_add_elements() {
    let mesh = quad_mesh();
    assert_eq!(mesh.vertex_count(), 4);
    assert_eq!(mesh.triangle_count(), 2);
    assert_eq!(mesh.triangle_at(0), Triangle::new(v(0), v(1), v(2)));
    assert_eq!(mesh.triangle_at(1), Triangle::new(v(0), v(2), v(3)));
    assert_eq!(mesh.edge_count(), 5);
    assert!(mesh.edge_at(2).same_as(&Edge::new(v(0), v(2))));
    assert_eq!(mesh.vertex_at(v(2)), Vec3::new(1.0, 1.0, 0.0));
    assert!(mesh.validate());
}

#[test]
fn test_add_edge() {
    let mut mesh = quad_mesh();
    let index = mesh.add_edge(v(1), v(3));
    assert_eq!(index, 5);
    assert_eq!(mesh.edge_at(5), Edge::new(v(1), v(3)));
    assert!(!mesh.is_edge_selected(5));
}

#[test]
#[should_panic(expected = "out of range")]
fn test_vertex_at_out_of_range() {
    quad_mesh().vertex_at(v(4));
}

#[test]
#[should_panic(expected = "out of range")]
fn test_triangle_at_out_of_range() {
    quad_mesh().triangle_at(2);
}

#[test]
#[should_panic(expected = "out of range")]
fn test_edge_at_out_of_range() {
    quad_mesh().edge_at(5);
}

#[test]
#[should_panic(expected = "out of range")]
fn test_add_triangle_with_missing_vertex() {
    let mut mesh = quad_mesh();
    mesh.add_triangle(v(0), v(1), v(9));
}

#[test]
#[should_panic(expected = "out of range")]
fn test_remove_vertex_out_of_range() {
    quad_mesh().remove_vertex_at_index(v(4));
}

#[test]
fn test_bounding_box() {
    let mut mesh = Mesh::new();
    mesh.add_vertex(Vec3::new(-1.0, -2.0, -3.0));
    mesh.add_vertex(Vec3::new(4.0, 5.0, 6.0));
    let (min, max) = mesh.bounding_box();
    assert_eq!(min, Vec3::new(-1.0, -2.0, -3.0));
    assert_eq!(max, Vec3::new(4.0, 5.0, 6.0));
}

#[test]
fn test_validate_detects_degenerate() {
    let mut mesh = quad_mesh();
    mesh.add_triangle(v(0), v(0), v(1));
    assert!(!mesh.validate());
}

// =============================================================================
// REMOVAL AND RENUMBERING
// =============================================================================

#[test]
fn test_remove_vertex_renumbers_references() {
    let mut mesh = Mesh::new();
    for i in 0..5 {
        mesh.add_vertex(Vec3::new(i as f32, (i * i) as f32, 0.0));
    }
    mesh.add_triangle(v(0), v(1), v(2));
    mesh.add_triangle(v(2), v(3), v(4));
    mesh.add_edge(v(0), v(1));
    mesh.add_edge(v(3), v(4));

    mesh.remove_vertex_at_index(v(1));

    assert_eq!(mesh.vertex_count(), 4);
    // Triangle and edge touching the removed vertex are gone
    assert_eq!(mesh.triangles(), &[Triangle::new(v(1), v(2), v(3))]);
    assert_eq!(mesh.edges(), &[Edge::new(v(2), v(3))]);
    // References still resolve to the same positions
    assert_eq!(mesh.vertex_at(v(1)), Vec3::new(2.0, 4.0, 0.0));
    assert_eq!(mesh.vertex_at(v(3)), Vec3::new(4.0, 16.0, 0.0));
    assert!(mesh.validate());
}

#[test]
fn test_remove_last_vertex_keeps_other_indices() {
    let mut mesh = quad_mesh();
    mesh.remove_vertex_at_index(v(3));
    assert_eq!(mesh.triangles(), &[Triangle::new(v(0), v(1), v(2))]);
    assert_eq!(mesh.edge_count(), 3);
    assert_indices_valid(&mesh);
}

#[test]
fn test_remove_vertex_keeps_flags_aligned() {
    let mut mesh = quad_mesh();
    mesh.set_vertex_selected(v(3), true);
    mesh.set_vertex_marked(true, v(2));
    mesh.remove_vertex_at_index(v(1));
    assert!(mesh.is_vertex_selected(v(2)));
    assert!(mesh.is_vertex_marked_at_index(v(1)));
    assert!(!mesh.is_vertex_selected(v(0)));
    assert!(mesh.validate());
}

#[test]
fn test_remove_triangle_shifts_selection() {
    let mut mesh = quad_mesh();
    mesh.set_triangle_selected(1, true);
    mesh.remove_triangle_at_index(0);
    assert_eq!(mesh.triangle_count(), 1);
    assert_eq!(mesh.triangle_at(0), Triangle::new(v(0), v(2), v(3)));
    assert!(mesh.is_triangle_selected(0));
    // Vertices are untouched
    assert_eq!(mesh.vertex_count(), 4);
}

#[test]
fn test_remove_edge() {
    let mut mesh = quad_mesh();
    mesh.set_edge_selected(3, true);
    mesh.remove_edge_at_index(2);
    assert_eq!(mesh.edge_count(), 4);
    assert!(mesh.is_edge_selected(2));
    assert!(mesh.edge_at(2).same_as(&Edge::new(v(2), v(3))));
}

#[test]
fn test_remove_selected_vertices_on_cube() {
    let mut mesh = Mesh::new();
    mesh.make_cube();
    mesh.set_vertex_selected(v(0), true);
    let removed = mesh.remove_selected_vertices();

    assert_eq!(removed, 1);
    assert_eq!(mesh.vertex_count(), 7);
    // Vertex 0 is a corner of five cube triangles and five edges
    assert_eq!(mesh.triangle_count(), 7);
    assert_eq!(mesh.edge_count(), 13);
    assert!(mesh.validate());
}

#[test]
fn test_remove_degenerated_triangles() {
    let mut mesh = quad_mesh();
    mesh.add_triangle(v(1), v(1), v(2));
    mesh.add_triangle(v(3), v(2), v(3));
    let removed = mesh.remove_degenerated_triangles();
    assert_eq!(removed, 2);
    assert_eq!(mesh.triangle_count(), 2);
    assert!(mesh.triangles().iter().all(|t| !t.is_degenerate()));
}

#[test]
fn test_remove_degenerated_edges() {
    let mut mesh = quad_mesh();
    mesh.add_edge(v(1), v(0));
    mesh.add_edge(v(3), v(3));
    assert_eq!(mesh.remove_degenerated_edges(), 2);
    assert_eq!(mesh.edge_count(), 5);
}

#[test]
fn test_remove_unused_vertices() {
    let mut mesh = quad_mesh();
    mesh.add_vertex(Vec3::splat(9.0));
    mesh.add_vertex(Vec3::splat(8.0));
    assert_eq!(mesh.remove_unused_vertices(), 2);
    assert_eq!(mesh.vertex_count(), 4);
}

// =============================================================================
// MERGING
// =============================================================================

#[test]
fn test_fast_merge_leaves_orphan() {
    let mut mesh = quad_mesh();
    mesh.fast_merge_vertex_first(v(1), v(2));

    assert_eq!(mesh.vertex_count(), 4);
    assert!(mesh.triangles().iter().all(|t| !t.contains(v(2))));
    assert!(mesh.edges().iter().all(|e| !e.contains(v(2))));
    assert_eq!(mesh.triangle_at(1), Triangle::new(v(0), v(1), v(3)));
    assert!(mesh.triangle_at(0).is_degenerate());
}

#[test]
fn test_merge_selected_vertices_cleans_up() {
    let mut mesh = quad_mesh();
    mesh.set_vertex_selected(v(1), true);
    mesh.set_vertex_selected(v(2), true);

    let survivor = mesh.merge_selected_vertices();

    assert_eq!(survivor, Some(v(1)));
    assert_eq!(mesh.vertex_count(), 3);
    assert_eq!(mesh.vertex_at(v(1)), Vec3::new(1.0, 0.5, 0.0));
    assert_eq!(mesh.triangles(), &[Triangle::new(v(0), v(1), v(2))]);
    assert_eq!(mesh.edge_count(), 3);
    assert!(mesh.is_vertex_selected(v(1)));
    assert!(mesh.validate());
}

#[test]
fn test_merge_selected_vertices_needs_two() {
    let mut mesh = quad_mesh();
    mesh.set_vertex_selected(v(1), true);
    assert_eq!(mesh.merge_selected_vertices(), None);
    assert_eq!(mesh.vertex_count(), 4);
}

#[test]
fn test_merge_selected_vertices_renumbers_survivor() {
    let mut mesh = quad_mesh();
    mesh.set_vertex_selected(v(0), false);
    mesh.set_vertex_selected(v(2), true);
    mesh.set_vertex_selected(v(3), true);
    let survivor = mesh.merge_selected_vertices();
    assert_eq!(survivor, Some(v(2)));
    assert_eq!(mesh.vertex_at(v(2)), Vec3::new(0.5, 1.0, 0.0));
    assert_indices_valid(&mesh);
}

#[test]
fn test_merge_vertex_pairs_welds_coincident() {
    let mut mesh = Mesh::new();
    mesh.add_vertex(Vec3::new(0.0, 0.0, 0.0));
    mesh.add_vertex(Vec3::new(1.0, 0.0, 0.0));
    mesh.add_vertex(Vec3::new(0.0, 1.0, 0.0));
    mesh.add_vertex(Vec3::new(1.0, 0.0, 0.0));
    mesh.add_vertex(Vec3::new(1.0, 1.0, 0.0));
    mesh.add_triangle(v(0), v(1), v(2));
    mesh.add_triangle(v(3), v(4), v(2));
    mesh.select_all();

    let welded = mesh.merge_vertex_pairs();

    assert_eq!(welded, 1);
    assert_eq!(mesh.vertex_count(), 4);
    assert_eq!(mesh.triangle_at(1), Triangle::new(v(1), v(3), v(2)));
    assert!(mesh.validate());
}

#[test]
fn test_merge_with_mesh_offsets_indices() {
    let mut first = quad_mesh();
    let mut second = Mesh::new();
    second.make_cube();
    second.set_vertex_selected(v(7), true);

    first.merge_with_mesh(&second);

    assert_eq!(first.vertex_count(), 4 + 8);
    assert_eq!(first.triangle_count(), 2 + 12);
    assert_eq!(first.edge_count(), 5 + 18);
    for (index, t) in second.triangles().iter().enumerate() {
        assert_eq!(first.triangle_at(2 + index).vertices, t.vertices.map(|v| v.offset(4)));
    }
    for (index, e) in second.edges().iter().enumerate() {
        assert_eq!(first.edge_at(5 + index).vertices, e.vertices.map(|v| v.offset(4)));
    }
    assert!(first.is_vertex_selected(v(11)));
    assert!(first.validate());
}

#[test]
fn test_transform_with_matrix() {
    let mut mesh = quad_mesh();
    let triangles = mesh.triangles().to_vec();
    mesh.transform_with_matrix(&Mat4::from_translation(Vec3::new(0.0, 0.0, 2.0)));
    assert_eq!(mesh.vertex_at(v(2)), Vec3::new(1.0, 1.0, 2.0));
    assert_eq!(mesh.triangles(), triangles.as_slice());
}

// =============================================================================
// SPLIT
// =============================================================================

#[test]
fn test_split_triangle_preserves_area() {
    let mut mesh = quad_mesh();
    let area = total_area(&mesh);
    let center = mesh.split_triangle_at_index(0);

    assert_eq!(center, v(4));
    assert_eq!(mesh.vertex_count(), 5);
    assert_eq!(mesh.triangle_count(), 4);
    assert_eq!(mesh.edge_count(), 8);
    assert_relative_eq!(total_area(&mesh), area, epsilon = 1e-6);
    assert_relative_eq!(mesh.vertex_at(center).x, 2.0 / 3.0, epsilon = 1e-6);
    assert!(mesh.validate());
}

#[test]
fn test_split_triangle_areas_sum_to_original() {
    let mut mesh = quad_mesh();
    let [a, b, c] = mesh.triangle_vertices(&mesh.triangle_at(0));
    let original = triangle_area(a, b, c);
    mesh.split_triangle_at_index(0);
    let parts: f32 = [0, 2, 3]
        .iter()
        .map(|&i| {
            let [a, b, c] = mesh.triangle_vertices(&mesh.triangle_at(i));
            triangle_area(a, b, c)
        })
        .sum();
    assert_relative_eq!(parts, original, epsilon = 1e-6);
}

#[test]
fn test_split_triangle_keeps_winding() {
    let mut mesh = quad_mesh();
    mesh.split_triangle_at_index(0);
    for index in 0..mesh.triangle_count() {
        assert!(mesh.triangle_normal(index).z > 0.0);
    }
}

#[test]
fn test_split_shared_edge() {
    let mut mesh = quad_mesh();
    let midpoint = mesh.split_edge_at_index(2);

    assert_eq!(mesh.vertex_at(midpoint), Vec3::new(0.5, 0.5, 0.0));
    assert_eq!(mesh.triangle_count(), 4);
    assert!(mesh.triangles().iter().all(|t| t.contains(midpoint)));
    assert_eq!(mesh.edge_count(), 8);
    assert!(mesh.edge_at(2).same_as(&Edge::new(v(2), midpoint)));
    assert_relative_eq!(total_area(&mesh), 1.0, epsilon = 1e-6);
    // The two halves of the old diagonal are each shared by two triangles
    assert_eq!(mesh.triangles_sharing_edge(v(0), midpoint).len(), 2);
    assert_eq!(mesh.triangles_sharing_edge(v(2), midpoint).len(), 2);
    for index in 0..mesh.triangle_count() {
        assert!(mesh.triangle_normal(index).z > 0.0);
    }
}

#[test]
fn test_split_boundary_edge() {
    let mut mesh = quad_mesh();
    mesh.split_edge_at_index(0);
    assert_eq!(mesh.triangle_count(), 3);
    assert_eq!(mesh.edge_count(), 7);
    assert_relative_eq!(total_area(&mesh), 1.0, epsilon = 1e-6);
}

#[test]
fn test_split_edge_keeps_sphere_closed() {
    let mut mesh = Mesh::new();
    mesh.make_sphere(6).unwrap();
    mesh.set_selection_mode(SelectionMode::Edges);
    mesh.set_edge_selected(0, true);
    mesh.set_edge_selected(7, true);
    assert_eq!(mesh.split_selected_edges(), 2);
    assert_closed(&mesh);
    assert!(mesh.validate());
}

#[test]
fn test_split_selected_triangles() {
    let mut mesh = quad_mesh();
    mesh.set_selection_mode(SelectionMode::Triangles);
    mesh.set_triangle_selected(1, true);
    assert_eq!(mesh.split_selected_triangles(), 1);
    assert_eq!(mesh.triangle_count(), 4);
    // The pieces of the selected triangle stay selected
    assert_eq!(mesh.selected_triangle_indices(), vec![1, 2, 3]);
}

// =============================================================================
// TURN AND FLIP
// =============================================================================

#[test]
fn test_turn_edge_swaps_diagonal() {
    let mut mesh = quad_mesh();
    let before = mesh.triangles().to_vec();

    assert!(mesh.turn_edge_at_index(2));

    assert_eq!(mesh.vertex_count(), 4);
    assert_eq!(mesh.triangle_count(), 2);
    assert!(mesh.edge_at(2).same_as(&Edge::new(v(1), v(3))));
    assert!(!mesh.triangle_at(0).same_vertices(&before[0]));
    assert!(!mesh.triangle_at(1).same_vertices(&before[1]));
    assert_eq!(mesh.triangles_sharing_edge(v(1), v(3)).len(), 2);
    assert!(mesh.triangles_sharing_edge(v(0), v(2)).is_empty());
    for index in 0..2 {
        assert!(mesh.triangle_normal(index).z > 0.0);
    }
}

#[test]
fn test_turn_edge_twice_restores_triangles() {
    let mut mesh = quad_mesh();
    let before = mesh.triangles().to_vec();
    assert!(mesh.turn_edge_at_index(2));
    assert!(mesh.turn_edge_at_index(2));

    assert!(mesh.edge_at(2).same_as(&Edge::new(v(0), v(2))));
    for original in &before {
        assert!(mesh.triangles().iter().any(|t| t.same_vertices(original)));
    }
}

#[test]
fn test_turn_boundary_edge_is_noop() {
    let mut mesh = quad_mesh();
    let before = mesh.clone();
    assert!(!mesh.turn_edge_at_index(0));
    assert_eq!(mesh, before);
}

#[test]
fn test_turn_selected_edges_counts_turned() {
    let mut mesh = quad_mesh();
    mesh.set_selection_mode(SelectionMode::Edges);
    mesh.set_edge_selected(0, true);
    mesh.set_edge_selected(2, true);
    assert_eq!(mesh.turn_selected_edges(), 1);
}

#[test]
fn test_flip_triangle_inverts_normal() {
    let mut mesh = quad_mesh();
    assert!(mesh.triangle_normal(0).z > 0.0);
    mesh.flip_triangle_at_index(0);
    assert!(mesh.triangle_normal(0).z < 0.0);
    assert!(mesh.triangle_normal(1).z > 0.0);
}

#[test]
fn test_flip_all_triangles_inverts_volume() {
    let mut mesh = Mesh::new();
    mesh.make_cube();
    mesh.flip_all_triangles();
    assert_relative_eq!(signed_volume(&mesh), -8.0, epsilon = 1e-5);
}

#[test]
fn test_flip_selected_triangles() {
    let mut mesh = quad_mesh();
    mesh.set_selection_mode(SelectionMode::Triangles);
    mesh.set_triangle_selected(1, true);
    mesh.flip_selected_triangles();
    assert!(mesh.triangle_normal(0).z > 0.0);
    assert!(mesh.triangle_normal(1).z < 0.0);
}

// =============================================================================
// EXTRUDE
// =============================================================================

#[test]
fn test_extrude_single_triangle() {
    let mut mesh = quad_mesh();
    mesh.set_selection_mode(SelectionMode::Triangles);
    mesh.set_triangle_selected(0, true);

    let sides = mesh.extrude_selected_triangles_by(1.0);

    assert_eq!(sides, 6);
    assert_eq!(mesh.vertex_count(), 7);
    assert_eq!(mesh.triangle_count(), 8);
    let cap = mesh.triangle_at(0);
    assert_eq!(cap, Triangle::new(v(4), v(5), v(6)));
    for corner in mesh.triangle_vertices(&cap) {
        assert_relative_eq!(corner.z, 1.0);
    }
    assert_eq!(mesh.selected_triangle_indices(), vec![0]);
    assert_eq!(mesh.marked_vertex_indices(), vec![v(4), v(5), v(6)]);
    assert!(mesh.validate());
}

#[test]
fn test_extrude_chains() {
    let mut mesh = quad_mesh();
    mesh.set_selection_mode(SelectionMode::Triangles);
    mesh.set_triangle_selected(0, true);
    mesh.extrude_selected_triangles_by(1.0);
    mesh.extrude_selected_triangles_by(1.0);

    assert_eq!(mesh.vertex_count(), 10);
    assert_eq!(mesh.triangle_count(), 14);
    for corner in mesh.triangle_vertices(&mesh.triangle_at(0)) {
        assert_relative_eq!(corner.z, 2.0);
    }
}

#[test]
fn test_extrude_cube_face_keeps_closed_volume() {
    let mut mesh = Mesh::new();
    mesh.make_cube();
    mesh.set_selection_mode(SelectionMode::Triangles);
    // Triangles 2 and 3 form the top face
    mesh.set_triangle_selected(2, true);
    mesh.set_triangle_selected(3, true);

    let sides = mesh.extrude_selected_triangles_by(0.5);

    assert_eq!(sides, 8);
    assert_eq!(mesh.vertex_count(), 12);
    assert_eq!(mesh.triangle_count(), 20);
    assert_closed(&mesh);
    assert_relative_eq!(signed_volume(&mesh), 10.0, epsilon = 1e-4);
}

#[test]
fn test_extrude_pole_fan_moves_interior_vertex() {
    let mut mesh = Mesh::new();
    mesh.make_sphere(8).unwrap();
    mesh.set_selection_mode(SelectionMode::Triangles);
    for index in 0..mesh.triangle_count() {
        if mesh.triangle_at(index).vertices.contains(&v(0)) {
            mesh.set_triangle_selected(index, true);
        }
    }
    assert_eq!(mesh.selected_count(), 8);

    let sides = mesh.extrude_selected_triangles();

    // Only the eight rim vertices get copies; the pole moves with the cap
    assert_eq!(sides, 16);
    assert_eq!(mesh.vertex_count(), 66);
    assert_eq!(mesh.triangle_count(), 128);
    assert_relative_eq!(mesh.vertex_at(v(0)).z, 1.0 + DEFAULT_EXTRUDE_DISTANCE, epsilon = 1e-5);

    let mut used = vec![false; mesh.vertex_count()];
    for t in mesh.triangles() {
        for corner in t.vertices {
            used[corner.index()] = true;
        }
    }
    assert!(used.iter().all(|u| *u), "unreferenced vertex after extrude");
    assert_closed(&mesh);
    assert!(mesh.validate());
}

#[test]
fn test_extrude_opposite_faces_is_refused() {
    let mut mesh = Mesh::new();
    mesh.make_cube();
    mesh.set_selection_mode(SelectionMode::Triangles);
    // Bottom and top faces
    for index in 0..4 {
        mesh.set_triangle_selected(index, true);
    }
    assert_eq!(mesh.extrude_selected_triangles(), 0);
    assert_eq!(mesh.vertex_count(), 8);
    assert_eq!(mesh.triangle_count(), 12);
}

#[test]
fn test_extrude_without_selection() {
    let mut mesh = quad_mesh();
    assert_eq!(mesh.extrude_selected_triangles(), 0);
    assert_eq!(mesh.triangle_count(), 2);
}

// =============================================================================
// PRIMITIVES
// =============================================================================

#[test]
fn test_make_cube() {
    let mut mesh = Mesh::new();
    mesh.make_cube();
    assert_eq!(mesh.vertex_count(), 8);
    assert_eq!(mesh.triangle_count(), 12);
    assert_eq!(mesh.edge_count(), 18);
    assert!(mesh.validate());
    assert_closed(&mesh);
    assert_relative_eq!(signed_volume(&mesh), 8.0, epsilon = 1e-5);
}

#[test]
fn test_make_cube_replaces_content() {
    let mut mesh = quad_mesh();
    mesh.make_cube();
    assert_eq!(mesh.vertex_count(), 8);
    assert_eq!(mesh.triangle_count(), 12);
}

#[test]
fn test_make_sphere_counts() {
    let mut mesh = Mesh::new();
    mesh.make_sphere(8).unwrap();
    assert_eq!(mesh.vertex_count(), 2 + 8 * 7);
    assert_eq!(mesh.triangle_count(), 2 * 8 * 7);
    assert_eq!(mesh.edge_count(), 3 * mesh.triangle_count() / 2);
    assert!(mesh.triangles().iter().all(|t| !t.is_degenerate()));
    assert!(mesh.validate());
    assert_closed(&mesh);
    assert!(signed_volume(&mesh) > 0.0);
}

#[test]
fn test_make_sphere_on_unit_radius() {
    let mut mesh = Mesh::new();
    mesh.make_sphere(12).unwrap();
    for p in mesh.vertices() {
        assert_relative_eq!(p.length(), 1.0, epsilon = 1e-5);
    }
}

#[test]
fn test_make_cylinder_counts() {
    let mut mesh = Mesh::new();
    mesh.make_cylinder(8).unwrap();
    assert_eq!(mesh.vertex_count(), 18);
    assert_eq!(mesh.triangle_count(), 32);
    assert!(mesh.validate());
    assert_closed(&mesh);
    assert!(signed_volume(&mesh) > 0.0);
}

#[test]
fn test_make_primitive_too_few_steps() {
    let mut mesh = quad_mesh();
    assert!(matches!(
        mesh.make_sphere(2),
        Err(crate::MeshError::InvalidSteps { steps: 2, .. })
    ));
    assert!(mesh.make_cylinder(0).is_err());
    // Failed generation leaves the mesh untouched
    assert_eq!(mesh.triangle_count(), 2);
}

#[test]
fn test_make_mesh_with_type() {
    let mut mesh = Mesh::new();
    for mesh_type in MeshType::ALL {
        mesh.make_mesh_with_type(mesh_type, 6).unwrap();
        assert!(mesh.validate(), "{mesh_type}");
        assert_closed(&mesh);
    }
}

// =============================================================================
// SELECTION
// =============================================================================

#[test]
fn test_selection_mode_change_clears_selection() {
    let mut mesh = quad_mesh();
    mesh.set_vertex_selected(v(0), true);
    mesh.set_selection_mode(SelectionMode::Triangles);
    assert_eq!(mesh.selection_mode(), SelectionMode::Triangles);
    assert!(!mesh.is_vertex_selected(v(0)));
    assert_eq!(mesh.element_count(), 2);
}

#[test]
fn test_select_all_active_kind_only() {
    let mut mesh = quad_mesh();
    mesh.set_selection_mode(SelectionMode::Edges);
    mesh.select_all();
    assert_eq!(mesh.selected_count(), 5);
    assert!(mesh.selected_vertex_indices().is_empty());
    mesh.deselect_all();
    assert_eq!(mesh.selected_count(), 0);
}

#[test]
fn test_make_marked_vertices_from_triangles() {
    let mut mesh = quad_mesh();
    mesh.set_selection_mode(SelectionMode::Triangles);
    mesh.set_triangle_selected(1, true);
    mesh.make_marked_vertices();
    assert_eq!(mesh.marked_vertex_indices(), vec![v(0), v(2), v(3)]);
}

#[test]
fn test_make_marked_vertices_from_edges() {
    let mut mesh = quad_mesh();
    mesh.set_selection_mode(SelectionMode::Edges);
    mesh.set_edge_selected(0, true);
    mesh.make_marked_vertices();
    assert_eq!(mesh.marked_vertex_indices(), vec![v(0), v(1)]);
}

#[test]
fn test_set_triangle_marked() {
    let mut mesh = quad_mesh();
    mesh.set_triangle_marked(true, 0);
    assert!(mesh.is_vertex_marked_at_index(v(1)));
    assert!(!mesh.is_vertex_marked_at_index(v(3)));
    mesh.set_edge_marked(false, 0);
    assert!(!mesh.is_vertex_marked_at_index(v(0)));
    assert!(mesh.is_vertex_marked_at_index(v(2)));
}

// =============================================================================
// RENDER CACHE
// =============================================================================

#[test]
fn test_cache_starts_stale_and_fills() {
    let mut mesh = quad_mesh();
    assert_eq!(mesh.cache().state(), CacheState::Stale);
    mesh.fill_cache();
    assert_eq!(mesh.cache().state(), CacheState::Fresh);
    assert_eq!(mesh.cache().positions().len(), 6);
    assert_eq!(mesh.cache().normals().len(), 6);
    assert_eq!(mesh.cache().colors().len(), 6);
    assert_eq!(mesh.cache().wire_positions().len(), 10);
    assert_eq!(mesh.cache().normals()[0], [0.0, 0.0, 1.0]);
}

#[test]
fn test_mutations_invalidate_cache() {
    let mut mesh = quad_mesh();

    mesh.fill_cache();
    mesh.add_vertex(Vec3::ONE);
    assert!(!mesh.cache().is_fresh());

    mesh.fill_cache();
    mesh.flip_triangle_at_index(0);
    assert!(!mesh.cache().is_fresh());

    mesh.fill_cache();
    mesh.set_vertex_selected(v(0), true);
    assert!(!mesh.cache().is_fresh());

    mesh.fill_cache();
    mesh.transform_with_matrix(&Mat4::from_scale(Vec3::splat(2.0)));
    assert!(!mesh.cache().is_fresh());
}

#[test]
fn test_update_color_cache_stays_fresh() {
    let mut mesh = quad_mesh();
    mesh.fill_cache();
    mesh.set_color([0.0, 1.0, 0.0, 1.0]);
    assert!(mesh.cache().is_fresh());
    assert!(mesh.cache().colors().iter().all(|c| *c == [0.0, 1.0, 0.0, 1.0]));
}

#[test]
fn test_update_color_cache_rebuilds_stale() {
    let mut mesh = quad_mesh();
    mesh.update_color_cache();
    assert!(mesh.cache().is_fresh());
    assert_eq!(mesh.cache().positions().len(), 6);
}

#[test]
fn test_cache_colors_follow_triangle_selection() {
    let mut mesh = quad_mesh();
    mesh.set_selection_mode(SelectionMode::Triangles);
    mesh.set_triangle_selected(1, true);
    mesh.fill_cache();
    let colors = mesh.cache().colors();
    assert_eq!(colors[..3], [DEFAULT_COLOR; 3]);
    assert_eq!(colors[3..], [SELECTED_COLOR; 3]);
}

#[test]
fn test_cache_colors_follow_vertex_selection() {
    let mut mesh = quad_mesh();
    mesh.set_vertex_selected(v(1), true);
    mesh.fill_cache();
    // Triangle 0 is (0, 1, 2): only its second corner is selected
    assert_eq!(mesh.cache().colors()[0], DEFAULT_COLOR);
    assert_eq!(mesh.cache().colors()[1], SELECTED_COLOR);
    assert_eq!(mesh.cache().wire_colors()[1], SELECTED_WIRE_COLOR);
}

// =============================================================================
// DRAWING
// =============================================================================

#[test]
fn test_draw_fills_stale_cache() {
    let mut mesh = quad_mesh();
    let mut backend = RecordingBackend::default();
    mesh.draw_fill(&mut backend, Mat4::IDENTITY, false);
    assert!(mesh.cache().is_fresh());
    assert_eq!(backend.fills.len(), 1);
    assert_eq!(backend.fills[0].positions.len(), 6);
}

#[test]
fn test_draw_with_mode_applies_scale() {
    let mut mesh = quad_mesh();
    let mut backend = RecordingBackend::default();
    let scale = Vec3::new(2.0, 3.0, 4.0);

    mesh.draw_with_mode(&mut backend, Mat4::IDENTITY, ViewMode::Solid, scale, true);
    mesh.draw_with_mode(&mut backend, Mat4::IDENTITY, ViewMode::Wireframe, scale, false);

    assert_eq!(backend.fills.len(), 1);
    assert_eq!(backend.wires.len(), 1);
    assert_eq!(backend.fills[0].model, Mat4::from_scale(scale));
    assert!(backend.fills[0].highlighted);
    assert!(!backend.wires[0].highlighted);
    assert_eq!(backend.wires[0].positions.len(), 2 * mesh.edge_count());
}

#[test]
fn test_draw_sees_latest_geometry() {
    let mut mesh = quad_mesh();
    let mut backend = RecordingBackend::default();
    mesh.draw_fill(&mut backend, Mat4::IDENTITY, false);
    mesh.split_triangle_at_index(0);
    mesh.draw_fill(&mut backend, Mat4::IDENTITY, false);
    assert_eq!(backend.fills[1].positions.len(), 12);
}

// =============================================================================
// SERDE
// =============================================================================

#[test]
fn test_serde_snapshot_round_trip() {
    let mut mesh = Mesh::new();
    mesh.make_cube();
    mesh.set_vertex_selected(v(3), true);
    mesh.fill_cache();

    let json = serde_json::to_string(&mesh).unwrap();
    let restored: Mesh = serde_json::from_str(&json).unwrap();

    assert_eq!(restored, mesh);
    assert_eq!(restored.cache().state(), CacheState::Stale);
}

#[test]
fn test_check_references_reports_bad_index() {
    let mut mesh = Mesh::new();
    mesh.make_cube();
    assert!(mesh.check_references().is_ok());

    mesh.triangles[2].vertices[1] = v(40);
    let err = mesh.check_references().unwrap_err();
    assert!(err.to_string().contains("triangle 2 references vertex 40"));
    assert!(!mesh.validate());
}

#[test]
fn test_check_references_allows_degenerate_triangles() {
    let mut mesh = Mesh::new();
    mesh.make_cube();
    mesh.fast_merge_vertex_first(v(0), v(1));
    assert!(mesh.check_references().is_ok());
    assert!(!mesh.validate());
}
