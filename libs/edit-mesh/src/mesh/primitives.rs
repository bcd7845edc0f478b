//! # Primitives
//!
//! Procedural generators that replace the mesh content with a cube,
//! cylinder or sphere centered at the origin and spanning `[-1, 1]` on every
//! axis. Triangles wind counter-clockwise seen from outside.

use super::Mesh;
use crate::error::{MeshError, MeshResult};
use crate::types::{MeshType, VertexIndex};
use config::constants::{clamp_steps, MIN_STEPS};
use glam::Vec3;
use std::f32::consts::{PI, TAU};
use tracing::info;

impl Mesh {
    /// Replaces the content with the given primitive.
    ///
    /// `steps` is ignored for the cube.
    pub fn make_mesh_with_type(&mut self, mesh_type: MeshType, steps: u32) -> MeshResult<()> {
        match mesh_type {
            MeshType::Cube => {
                self.make_cube();
                Ok(())
            }
            MeshType::Cylinder => self.make_cylinder(steps),
            MeshType::Sphere => self.make_sphere(steps),
        }
    }

    /// Replaces the content with a cube: 8 vertices, 12 triangles.
    pub fn make_cube(&mut self) {
        self.clear();

        let v0 = self.add_vertex(Vec3::new(-1.0, -1.0, -1.0));
        let v1 = self.add_vertex(Vec3::new(1.0, -1.0, -1.0));
        let v2 = self.add_vertex(Vec3::new(1.0, 1.0, -1.0));
        let v3 = self.add_vertex(Vec3::new(-1.0, 1.0, -1.0));
        let v4 = self.add_vertex(Vec3::new(-1.0, -1.0, 1.0));
        let v5 = self.add_vertex(Vec3::new(1.0, -1.0, 1.0));
        let v6 = self.add_vertex(Vec3::new(1.0, 1.0, 1.0));
        let v7 = self.add_vertex(Vec3::new(-1.0, 1.0, 1.0));

        self.add_quad(v0, v3, v2, v1); // bottom
        self.add_quad(v4, v5, v6, v7); // top
        self.add_quad(v0, v1, v5, v4); // front
        self.add_quad(v2, v3, v7, v6); // back
        self.add_quad(v3, v0, v4, v7); // left
        self.add_quad(v1, v2, v6, v5); // right

        self.make_edges();
        info!(vertices = 8, triangles = 12, "made cube");
    }

    /// Replaces the content with a closed cylinder along Z.
    ///
    /// Produces `2 * steps + 2` vertices and `4 * steps` triangles.
    pub fn make_cylinder(&mut self, steps: u32) -> MeshResult<()> {
        let steps = checked_steps(steps)?;
        self.clear();

        let bottom = ring(self, steps, 1.0, -1.0);
        let top = ring(self, steps, 1.0, 1.0);
        let bottom_center = self.add_vertex(Vec3::new(0.0, 0.0, -1.0));
        let top_center = self.add_vertex(Vec3::new(0.0, 0.0, 1.0));

        for j in 0..steps {
            let next = (j + 1) % steps;
            self.add_quad(bottom[j], bottom[next], top[next], top[j]);
            self.add_triangle(top_center, top[j], top[next]);
            self.add_triangle(bottom_center, bottom[next], bottom[j]);
        }

        self.make_edges();
        info!(steps, triangles = self.triangle_count(), "made cylinder");
        Ok(())
    }

    /// Replaces the content with a UV sphere: `steps` slices around Z and
    /// `steps` stacks from pole to pole.
    ///
    /// Produces `2 + steps * (steps - 1)` vertices and
    /// `2 * steps * (steps - 1)` triangles.
    pub fn make_sphere(&mut self, steps: u32) -> MeshResult<()> {
        let steps = checked_steps(steps)?;
        self.clear();

        let north = self.add_vertex(Vec3::Z);
        let rings: Vec<Vec<VertexIndex>> = (1..steps)
            .map(|k| {
                let phi = PI * k as f32 / steps as f32;
                ring(self, steps, phi.sin(), phi.cos())
            })
            .collect();
        let south = self.add_vertex(Vec3::NEG_Z);

        let (Some(first), Some(last)) = (rings.first(), rings.last()) else {
            return Err(MeshError::InvalidSteps {
                steps: steps as u32,
                min: MIN_STEPS,
            });
        };

        for j in 0..steps {
            let next = (j + 1) % steps;
            self.add_triangle(north, first[j], first[next]);
            self.add_triangle(south, last[next], last[j]);
        }

        for pair in rings.windows(2) {
            let (upper, lower) = (&pair[0], &pair[1]);
            for j in 0..steps {
                let next = (j + 1) % steps;
                self.add_quad(upper[j], lower[j], lower[next], upper[next]);
            }
        }

        self.make_edges();
        info!(steps, triangles = self.triangle_count(), "made sphere");
        Ok(())
    }
}

fn checked_steps(steps: u32) -> MeshResult<usize> {
    if steps < MIN_STEPS {
        return Err(MeshError::InvalidSteps {
            steps,
            min: MIN_STEPS,
        });
    }
    Ok(clamp_steps(steps) as usize)
}

/// Adds `steps` vertices on a circle of `radius` at height `z`.
fn ring(mesh: &mut Mesh, steps: usize, radius: f32, z: f32) -> Vec<VertexIndex> {
    (0..steps)
        .map(|j| {
            let theta = TAU * j as f32 / steps as f32;
            mesh.add_vertex(Vec3::new(radius * theta.cos(), radius * theta.sin(), z))
        })
        .collect()
}
