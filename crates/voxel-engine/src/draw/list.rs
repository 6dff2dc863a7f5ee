use crate::coords::Viewport;

use super::{DrawCmd, Quad, Triangle};

/// Paint layer. Higher values paint later (on top).
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct ZIndex(pub i32);

impl ZIndex {
    pub const WORLD: ZIndex = ZIndex(0);
    pub const OVERLAY: ZIndex = ZIndex(100);
}

#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    pub z: ZIndex,
    pub order: u32,
    pub cmd: DrawCmd,
}

/// Recorded draw commands for one frame.
#[derive(Debug, Default)]
pub struct DrawList {
    items: Vec<DrawItem>,
    next_order: u32,
}

impl DrawList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops recorded items, keeping capacity.
    #[inline]
    pub fn clear(&mut self) {
        self.items.clear();
        self.next_order = 0;
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items in insertion order.
    #[inline]
    pub fn items(&self) -> &[DrawItem] {
        &self.items
    }

    pub fn push(&mut self, z: ZIndex, cmd: DrawCmd) {
        let order = self.next_order;
        self.next_order = self.next_order.wrapping_add(1);
        self.items.push(DrawItem { z, order, cmd });
    }

    #[inline]
    pub fn triangle(&mut self, z: ZIndex, tri: Triangle) {
        self.push(z, DrawCmd::Triangle(tri));
    }

    #[inline]
    pub fn quad(&mut self, z: ZIndex, quad: Quad) {
        self.push(z, DrawCmd::Quad(quad));
    }

    /// Items in paint order: ascending z, ties by insertion order.
    pub fn iter_in_paint_order(&self) -> impl Iterator<Item = &DrawItem> {
        let mut sorted: Vec<&DrawItem> = self.items.iter().collect();
        sorted.sort_by_key(|item| (item.z, item.order));
        sorted.into_iter()
    }
}

/// The active frame a scene draws into.
pub struct Frame<'a> {
    pub viewport: Viewport,
    pub list: &'a mut DrawList,
}

impl<'a> Frame<'a> {
    #[inline]
    pub fn new(viewport: Viewport, list: &'a mut DrawList) -> Self {
        Self { viewport, list }
    }
}
