//! # Item Collection
//!
//! Ordered list of items forming a document. Item-level selection and
//! manipulation go through [`Manipulated`].

use crate::item::Item;
use crate::manipulation::Manipulated;
use crate::math::centroid;
use crate::mesh::Mesh;
use crate::render::RenderBackend;
use crate::types::ViewMode;
use glam::{Mat4, Quat, Vec3};
use std::ops::Range;
use tracing::debug;

/// The items of a document, in draw order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemCollection {
    items: Vec<Item>,
}

impl ItemCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_items(items: Vec<Item>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn item_at(&self, index: usize) -> &Item {
        &self.items[index]
    }

    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn item_at_mut(&mut self, index: usize) -> &mut Item {
        &mut self.items[index]
    }

    pub fn add_item(&mut self, item: Item) {
        self.items.push(item);
    }

    /// # Panics
    ///
    /// Panics if `index > len`.
    pub fn insert_item(&mut self, index: usize, item: Item) {
        self.items.insert(index, item);
    }

    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn remove_item_at(&mut self, index: usize) -> Item {
        self.items.remove(index)
    }

    pub fn remove_last_item(&mut self) -> Option<Item> {
        self.items.pop()
    }

    /// Removes and returns the items in `range`.
    ///
    /// # Panics
    ///
    /// Panics if the range is out of bounds.
    pub fn remove_items_in_range(&mut self, range: Range<usize>) -> Vec<Item> {
        self.items.drain(range).collect()
    }

    /// Unselects every item.
    pub fn deselect_all(&mut self) {
        for item in &mut self.items {
            item.set_selected(false);
        }
    }

    /// Total vertex and triangle counts over all items.
    pub fn vertex_and_triangle_count(&self) -> (usize, usize) {
        self.items.iter().fold((0, 0), |(vertices, triangles), item| {
            (
                vertices + item.mesh().vertex_count(),
                triangles + item.mesh().triangle_count(),
            )
        })
    }

    /// Merges every selected item into a single new item.
    ///
    /// Geometry is baked into world space, so the merged item sits at the
    /// identity transform in the place of the first selected item and keeps
    /// its color and selection mode. Does nothing unless at least two items
    /// are selected.
    pub fn merge_selected_items(&mut self) {
        let selected: Vec<usize> = (0..self.items.len())
            .filter(|&i| self.items[i].is_selected())
            .collect();
        let Some(&first) = selected.first() else {
            return;
        };
        if selected.len() < 2 {
            return;
        }

        let template = self.items[first].mesh();
        let mut mesh = Mesh::new();
        mesh.set_color(template.color());
        mesh.set_selection_mode(template.selection_mode());
        for &index in &selected {
            mesh.merge_with_mesh(&self.items[index].world_mesh());
        }
        let mut merged = Item::from_mesh(mesh);
        merged.set_selected(true);

        for &index in selected.iter().rev() {
            self.items.remove(index);
        }
        self.items.insert(first, merged);
        debug!(merged = selected.len(), "merged selected items");
    }

    /// Draws every item with the identity as parent.
    pub fn draw<B: RenderBackend + ?Sized>(&mut self, backend: &mut B, mode: ViewMode) {
        for item in &mut self.items {
            item.draw(backend, Mat4::IDENTITY, mode);
        }
    }

    fn selected_items_mut(&mut self) -> impl Iterator<Item = &mut Item> {
        self.items.iter_mut().filter(|item| item.is_selected())
    }
}

impl Manipulated for ItemCollection {
    fn count(&self) -> usize {
        self.items.len()
    }

    fn is_selected(&self, index: usize) -> bool {
        self.items[index].is_selected()
    }

    fn set_selected(&mut self, index: usize, selected: bool) {
        self.items[index].set_selected(selected);
    }

    /// Average position of the selected items.
    fn selection_center(&self) -> Option<Vec3> {
        let positions: Vec<Vec3> = self
            .items
            .iter()
            .filter(|item| item.is_selected())
            .map(Item::position)
            .collect();
        (!positions.is_empty()).then(|| centroid(positions))
    }

    fn move_selected_by(&mut self, offset: Vec3) {
        for item in self.selected_items_mut() {
            item.move_by(offset);
        }
    }

    /// Rotates each selected item about its own origin.
    fn rotate_selected_by(&mut self, rotation: Quat) {
        for item in self.selected_items_mut() {
            item.rotate_by(rotation);
        }
    }

    fn scale_selected_by(&mut self, offset: Vec3) {
        for item in self.selected_items_mut() {
            item.scale_by(offset);
        }
    }

    /// Appends a copy of every selected item. The copies end up selected and
    /// the originals unselected.
    fn clone_selected(&mut self) {
        let mut copies = Vec::new();
        for item in self.selected_items_mut() {
            let mut copy = item.clone_item();
            copy.set_selected(true);
            item.set_selected(false);
            copies.push(copy);
        }
        debug!(cloned = copies.len(), "cloned selected items");
        self.items.extend(copies);
    }

    fn remove_selected(&mut self) {
        let before = self.items.len();
        self.items.retain(|item| !item.is_selected());
        debug!(removed = before - self.items.len(), "removed selected items");
    }

    fn deselect_all(&mut self) {
        ItemCollection::deselect_all(self);
    }
}
