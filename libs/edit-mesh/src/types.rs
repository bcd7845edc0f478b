//! # Index Records
//!
//! Small value types addressing vertices by index: [`VertexIndex`],
//! [`Triangle`] and [`Edge`], plus the enums shared by the editor
//! ([`MeshType`], [`ViewMode`], [`SelectionMode`]).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Position of a vertex in a mesh's vertex sequence.
///
/// Kept distinct from plain integers so triangle/edge references cannot be
/// mixed up with triangle or edge positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VertexIndex(pub u32);

impl VertexIndex {
    /// Creates an index from a sequence position.
    #[inline]
    pub fn new(index: usize) -> Self {
        Self(index as u32)
    }

    /// Returns the position in the vertex sequence.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Returns this index shifted by `offset` vertices.
    #[inline]
    pub fn offset(self, offset: usize) -> Self {
        Self(self.0 + offset as u32)
    }
}

impl fmt::Display for VertexIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Three vertex indices in winding order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Triangle {
    pub vertices: [VertexIndex; 3],
}

impl Triangle {
    /// Creates a triangle from three vertex indices.
    #[inline]
    pub fn new(v1: VertexIndex, v2: VertexIndex, v3: VertexIndex) -> Self {
        Self {
            vertices: [v1, v2, v3],
        }
    }

    /// Returns true if the triangle references `vertex`.
    #[inline]
    pub fn contains(&self, vertex: VertexIndex) -> bool {
        self.vertices.contains(&vertex)
    }

    /// Returns true if both endpoints of the undirected edge are corners.
    pub fn has_edge(&self, a: VertexIndex, b: VertexIndex) -> bool {
        a != b && self.contains(a) && self.contains(b)
    }

    /// A triangle is degenerate when its slots name fewer than 3 distinct vertices.
    pub fn is_degenerate(&self) -> bool {
        let [a, b, c] = self.vertices;
        a == b || b == c || a == c
    }

    /// Reverses the winding order by swapping the first two slots.
    pub fn flip(&mut self) {
        self.vertices.swap(0, 1);
    }

    /// Rewrites every slot equal to `from` to `to`.
    pub fn replace(&mut self, from: VertexIndex, to: VertexIndex) {
        for v in &mut self.vertices {
            if *v == from {
                *v = to;
            }
        }
    }

    /// Rotates the corners so that `a` and `b` appear consecutively in
    /// winding order.
    ///
    /// Returns `(p, q, r)` where `p -> q` is the shared edge as this triangle
    /// traverses it and `r` is the opposite corner. `None` if the edge is not
    /// a side of this triangle.
    pub fn oriented_edge(&self, a: VertexIndex, b: VertexIndex) -> Option<(VertexIndex, VertexIndex, VertexIndex)> {
        if !self.has_edge(a, b) {
            return None;
        }
        (0..3).find_map(|i| {
            let p = self.vertices[i];
            let q = self.vertices[(i + 1) % 3];
            let r = self.vertices[(i + 2) % 3];
            ((p == a && q == b) || (p == b && q == a)).then_some((p, q, r))
        })
    }

    /// The three sides in winding order.
    pub fn edges(&self) -> [Edge; 3] {
        let [a, b, c] = self.vertices;
        [Edge::new(a, b), Edge::new(b, c), Edge::new(c, a)]
    }

    /// Same corners regardless of slot order.
    pub fn same_vertices(&self, other: &Triangle) -> bool {
        let mut lhs = self.vertices;
        let mut rhs = other.vertices;
        lhs.sort();
        rhs.sort();
        lhs == rhs
    }
}

/// Two vertex indices; undirected for lookup purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub vertices: [VertexIndex; 2],
}

impl Edge {
    /// Creates an edge between two vertices.
    #[inline]
    pub fn new(v1: VertexIndex, v2: VertexIndex) -> Self {
        Self { vertices: [v1, v2] }
    }

    #[inline]
    pub fn v1(&self) -> VertexIndex {
        self.vertices[0]
    }

    #[inline]
    pub fn v2(&self) -> VertexIndex {
        self.vertices[1]
    }

    /// Returns true if either endpoint is `vertex`.
    #[inline]
    pub fn contains(&self, vertex: VertexIndex) -> bool {
        self.vertices.contains(&vertex)
    }

    /// An edge whose endpoints coincide.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.vertices[0] == self.vertices[1]
    }

    /// Endpoints ordered low to high, used to compare undirected edges.
    pub fn key(&self) -> (VertexIndex, VertexIndex) {
        let [a, b] = self.vertices;
        if a <= b {
            (a, b)
        } else {
            (b, a)
        }
    }

    /// `(a, b)` and `(b, a)` name the same edge.
    pub fn same_as(&self, other: &Edge) -> bool {
        self.key() == other.key()
    }

    /// Rewrites every endpoint equal to `from` to `to`.
    pub fn replace(&mut self, from: VertexIndex, to: VertexIndex) {
        for v in &mut self.vertices {
            if *v == from {
                *v = to;
            }
        }
    }
}

/// Procedural primitives the editor can create.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MeshType {
    Cube,
    Cylinder,
    Sphere,
}

impl MeshType {
    /// Every primitive in menu order.
    pub const ALL: [MeshType; 3] = [MeshType::Cube, MeshType::Cylinder, MeshType::Sphere];

    /// Whether the step count affects the generated shape.
    pub fn uses_steps(self) -> bool {
        !matches!(self, MeshType::Cube)
    }
}

impl fmt::Display for MeshType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MeshType::Cube => "Cube",
            MeshType::Cylinder => "Cylinder",
            MeshType::Sphere => "Sphere",
        };
        f.write_str(name)
    }
}

/// How an item is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ViewMode {
    #[default]
    Solid,
    Wireframe,
}

/// Which element kind the editor selects and manipulates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SelectionMode {
    #[default]
    Vertices,
    Triangles,
    Edges,
}

impl SelectionMode {
    /// Single-byte tag used by the binary format.
    pub fn to_byte(self) -> u8 {
        match self {
            SelectionMode::Vertices => 0,
            SelectionMode::Triangles => 1,
            SelectionMode::Edges => 2,
        }
    }

    /// Inverse of [`SelectionMode::to_byte`].
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(SelectionMode::Vertices),
            1 => Some(SelectionMode::Triangles),
            2 => Some(SelectionMode::Edges),
            _ => None,
        }
    }
}
