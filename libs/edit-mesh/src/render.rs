//! # Rendering Contract
//!
//! The engine never talks to a graphics API. Draw entry points hand flattened
//! buffers to a [`RenderBackend`] together with the model matrix to apply,
//! so there is no hidden global matrix stack.

use glam::Mat4;

/// Triangles to fill, three entries per triangle in every buffer.
#[derive(Debug, Clone, Copy)]
pub struct FillBatch<'a> {
    /// Object to world transform, scale included.
    pub model: Mat4,
    pub positions: &'a [[f32; 3]],
    pub normals: &'a [[f32; 3]],
    pub colors: &'a [[f32; 4]],
    /// The owning item is selected.
    pub highlighted: bool,
}

impl FillBatch<'_> {
    /// Number of triangles in the batch.
    pub fn triangle_count(&self) -> usize {
        self.positions.len() / 3
    }
}

/// Line segments to stroke, two entries per edge.
#[derive(Debug, Clone, Copy)]
pub struct WireBatch<'a> {
    pub model: Mat4,
    pub positions: &'a [[f32; 3]],
    pub colors: &'a [[f32; 4]],
    pub highlighted: bool,
}

impl WireBatch<'_> {
    /// Number of segments in the batch.
    pub fn segment_count(&self) -> usize {
        self.positions.len() / 2
    }
}

/// Immediate-mode style drawing primitives supplied by the host application.
pub trait RenderBackend {
    /// Fill the given triangles.
    fn draw_fill(&mut self, batch: &FillBatch<'_>);

    /// Stroke the given line segments.
    fn draw_wire(&mut self, batch: &WireBatch<'_>);
}

/// Backend that keeps a summary of every batch it receives.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct RecordingBackend {
    pub fills: Vec<RecordedBatch>,
    pub wires: Vec<RecordedBatch>,
}

#[cfg(test)]
#[derive(Debug, Clone)]
pub(crate) struct RecordedBatch {
    pub model: Mat4,
    pub positions: Vec<[f32; 3]>,
    pub colors: Vec<[f32; 4]>,
    pub highlighted: bool,
}

#[cfg(test)]
impl RenderBackend for RecordingBackend {
    fn draw_fill(&mut self, batch: &FillBatch<'_>) {
        assert_eq!(batch.positions.len(), batch.normals.len());
        assert_eq!(batch.positions.len(), batch.colors.len());
        self.fills.push(RecordedBatch {
            model: batch.model,
            positions: batch.positions.to_vec(),
            colors: batch.colors.to_vec(),
            highlighted: batch.highlighted,
        });
    }

    fn draw_wire(&mut self, batch: &WireBatch<'_>) {
        assert_eq!(batch.positions.len(), batch.colors.len());
        self.wires.push(RecordedBatch {
            model: batch.model,
            positions: batch.positions.to_vec(),
            colors: batch.colors.to_vec(),
            highlighted: batch.highlighted,
        });
    }
}
