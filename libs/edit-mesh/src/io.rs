//! # Binary Persistence
//!
//! Sequential little-endian records for meshes, items and documents.
//!
//! ## Layout
//!
//! ```text
//! Item      position 3×f32 | rotation x,y,z,w f32 | scale 3×f32 | selected u8 | Mesh
//! Mesh      vertex count u32   | vertices 3×f32 each
//!           triangle count u32 | triangles 3×u32 each
//!           edge count u32     | edges 2×u32 each
//!           vertex selected u8 × vertices | vertex marked u8 × vertices
//!           triangle selected u8 × triangles | edge selected u8 × edges
//!           selection mode u8 | color 4×f32
//! Document  item count u32 | Item × count
//! ```
//!
//! Decoding checks every count and index; a record that would break the
//! mesh invariants is rejected with [`MeshError::InvalidData`]. After a
//! failed decode the partially read stream is not usable.

use crate::collection::ItemCollection;
use crate::error::{MeshError, MeshResult};
use crate::item::Item;
use crate::mesh::{Mesh, RenderCache};
use crate::types::{Edge, SelectionMode, Triangle, VertexIndex};
use config::constants::{MAX_EDGES, MAX_TRIANGLES, MAX_VERTICES};
use glam::{Quat, Vec3};
use std::io::{Read, Write};
use tracing::debug;

// =============================================================================
// MESH
// =============================================================================

impl Mesh {
    /// Writes the mesh record.
    pub fn encode<W: Write>(&self, writer: &mut W) -> MeshResult<()> {
        if self.vertices.len() > MAX_VERTICES {
            return Err(MeshError::TooManyVertices {
                count: self.vertices.len(),
                max: MAX_VERTICES,
            });
        }
        if self.triangles.len() > MAX_TRIANGLES {
            return Err(MeshError::TooManyTriangles {
                count: self.triangles.len(),
                max: MAX_TRIANGLES,
            });
        }
        check_edge_count(self.edges.len())?;

        write_u32(writer, self.vertices.len() as u32)?;
        for v in &self.vertices {
            write_vec3(writer, *v)?;
        }
        write_u32(writer, self.triangles.len() as u32)?;
        for t in &self.triangles {
            for v in t.vertices {
                write_u32(writer, v.0)?;
            }
        }
        write_u32(writer, self.edges.len() as u32)?;
        for e in &self.edges {
            for v in e.vertices {
                write_u32(writer, v.0)?;
            }
        }

        write_flags(writer, &self.selected_vertices)?;
        write_flags(writer, &self.marked_vertices)?;
        write_flags(writer, &self.selected_triangles)?;
        write_flags(writer, &self.selected_edges)?;
        writer.write_all(&[self.selection_mode.to_byte()])?;
        for channel in self.color {
            write_f32(writer, channel)?;
        }
        Ok(())
    }

    /// Reads a mesh record.
    pub fn decode<R: Read>(reader: &mut R) -> MeshResult<Mesh> {
        let vertex_count = read_u32(reader)? as usize;
        if vertex_count > MAX_VERTICES {
            return Err(MeshError::TooManyVertices {
                count: vertex_count,
                max: MAX_VERTICES,
            });
        }
        let vertices = (0..vertex_count)
            .map(|_| read_vec3(reader))
            .collect::<MeshResult<Vec<_>>>()?;

        let triangle_count = read_u32(reader)? as usize;
        if triangle_count > MAX_TRIANGLES {
            return Err(MeshError::TooManyTriangles {
                count: triangle_count,
                max: MAX_TRIANGLES,
            });
        }
        let triangles = (0..triangle_count)
            .map(|i| -> MeshResult<Triangle> {
                let mut corners = [VertexIndex::default(); 3];
                for corner in &mut corners {
                    *corner = read_index(reader, vertex_count, || format!("triangle {i}"))?;
                }
                Ok(Triangle { vertices: corners })
            })
            .collect::<MeshResult<Vec<_>>>()?;

        let edge_count = read_u32(reader)? as usize;
        check_edge_count(edge_count)?;
        let edges = (0..edge_count)
            .map(|i| -> MeshResult<Edge> {
                let a = read_index(reader, vertex_count, || format!("edge {i}"))?;
                let b = read_index(reader, vertex_count, || format!("edge {i}"))?;
                Ok(Edge::new(a, b))
            })
            .collect::<MeshResult<Vec<_>>>()?;

        let selected_vertices = read_flags(reader, vertex_count)?;
        let marked_vertices = read_flags(reader, vertex_count)?;
        let selected_triangles = read_flags(reader, triangle_count)?;
        let selected_edges = read_flags(reader, edge_count)?;

        let mode_byte = read_u8(reader)?;
        let selection_mode = SelectionMode::from_byte(mode_byte).ok_or_else(|| {
            MeshError::invalid_data(format!("unknown selection mode {mode_byte}"))
        })?;

        let mut color = [0.0; 4];
        for channel in &mut color {
            *channel = read_f32(reader)?;
        }

        debug!(
            vertices = vertex_count,
            triangles = triangle_count,
            edges = edge_count,
            "decoded mesh"
        );
        Ok(Mesh {
            vertices,
            triangles,
            edges,
            selected_vertices,
            selected_triangles,
            selected_edges,
            marked_vertices,
            selection_mode,
            color,
            cache: RenderCache::default(),
        })
    }
}

// =============================================================================
// ITEM AND DOCUMENT
// =============================================================================

impl Item {
    /// Writes the transform, the selection flag and then the mesh.
    pub fn encode<W: Write>(&self, writer: &mut W) -> MeshResult<()> {
        write_vec3(writer, self.position())?;
        for component in self.rotation().to_array() {
            write_f32(writer, component)?;
        }
        write_vec3(writer, self.scale())?;
        writer.write_all(&[u8::from(self.is_selected())])?;
        self.mesh().encode(writer)
    }

    /// Reads an item record.
    pub fn decode<R: Read>(reader: &mut R) -> MeshResult<Item> {
        let position = read_vec3(reader)?;
        let mut rotation = [0.0; 4];
        for component in &mut rotation {
            *component = read_f32(reader)?;
        }
        let scale = read_vec3(reader)?;
        let selected = read_bool(reader)?;

        let mut item = Item::with_transform(position, Quat::from_array(rotation), scale);
        item.set_selected(selected);
        *item.mesh_mut() = Mesh::decode(reader)?;
        Ok(item)
    }
}

impl ItemCollection {
    /// Writes the item count followed by every item.
    pub fn encode<W: Write>(&self, writer: &mut W) -> MeshResult<()> {
        write_u32(writer, self.len() as u32)?;
        for item in self.items() {
            item.encode(writer)?;
        }
        Ok(())
    }

    /// Reads a whole document.
    pub fn decode<R: Read>(reader: &mut R) -> MeshResult<ItemCollection> {
        let count = read_u32(reader)? as usize;
        let items = (0..count)
            .map(|_| Item::decode(reader))
            .collect::<MeshResult<Vec<_>>>()?;
        debug!(items = count, "decoded document");
        Ok(ItemCollection::from_items(items))
    }
}

// =============================================================================
// PRIMITIVE READ/WRITE
// =============================================================================

fn write_u32<W: Write>(writer: &mut W, value: u32) -> MeshResult<()> {
    writer.write_all(&value.to_le_bytes())?;
    Ok(())
}

fn write_f32<W: Write>(writer: &mut W, value: f32) -> MeshResult<()> {
    writer.write_all(&value.to_le_bytes())?;
    Ok(())
}

fn write_vec3<W: Write>(writer: &mut W, v: Vec3) -> MeshResult<()> {
    for component in v.to_array() {
        write_f32(writer, component)?;
    }
    Ok(())
}

fn write_flags<W: Write>(writer: &mut W, flags: &[bool]) -> MeshResult<()> {
    let bytes: Vec<u8> = flags.iter().map(|&f| u8::from(f)).collect();
    writer.write_all(&bytes)?;
    Ok(())
}

fn read_u8<R: Read>(reader: &mut R) -> MeshResult<u8> {
    let mut buf = [0u8; 1];
    reader.read_exact(&mut buf)?;
    Ok(buf[0])
}

fn read_u32<R: Read>(reader: &mut R) -> MeshResult<u32> {
    let mut buf = [0u8; 4];
    reader.read_exact(&mut buf)?;
    Ok(u32::from_le_bytes(buf))
}

fn read_f32<R: Read>(reader: &mut R) -> MeshResult<f32> {
    let mut buf = [0u8; 4];
    reader.read_exact(&mut buf)?;
    Ok(f32::from_le_bytes(buf))
}

fn read_vec3<R: Read>(reader: &mut R) -> MeshResult<Vec3> {
    Ok(Vec3::new(read_f32(reader)?, read_f32(reader)?, read_f32(reader)?))
}

fn read_bool<R: Read>(reader: &mut R) -> MeshResult<bool> {
    match read_u8(reader)? {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(MeshError::invalid_data(format!("invalid flag byte {other}"))),
    }
}

fn read_flags<R: Read>(reader: &mut R, count: usize) -> MeshResult<Vec<bool>> {
    (0..count).map(|_| read_bool(reader)).collect()
}

/// Reads a vertex reference and checks it against the vertex count.
fn read_index<R: Read>(
    reader: &mut R,
    vertex_count: usize,
    owner: impl FnOnce() -> String,
) -> MeshResult<VertexIndex> {
    let index = VertexIndex(read_u32(reader)?);
    if index.index() >= vertex_count {
        return Err(MeshError::invalid_data(format!(
            "{} references vertex {index} of {vertex_count}",
            owner()
        )));
    }
    Ok(index)
}

fn check_edge_count(count: usize) -> MeshResult<()> {
    if count > MAX_EDGES {
        return Err(MeshError::invalid_data(format!(
            "edge count {count} exceeds {MAX_EDGES}"
        )));
    }
    Ok(())
}
