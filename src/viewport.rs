use tracing::info;

use crate::canvas::Canvas;

/// The shorter viewport side is divided into this many tiles.
pub const TILES_PER_SHORT_SIDE: u32 = 10;

/// Canvas dimensions and the tile edge derived from them.
///
/// Resize notifications are recorded with [`note_resize`](Self::note_resize)
/// and applied at the next frame boundary by
/// [`flush_pending`](Self::flush_pending), so a burst of resizes costs one
/// recompute.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewportTracker {
    width: u32,
    height: u32,
    tile_edge: u32,
    pending: Option<(u32, u32)>,
}

#[inline]
pub fn tile_edge_for(width: u32, height: u32) -> u32 {
    width.min(height) / TILES_PER_SHORT_SIDE
}

impl ViewportTracker {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
    #[inline]
    pub fn tile_edge(&self) -> u32 {
        self.tile_edge
    }
    #[inline]
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Resizes `canvas` to `width`x`height` and recomputes the tile edge.
    pub fn recompute<C: Canvas + ?Sized>(&mut self, width: u32, height: u32, canvas: &mut C) {
        canvas.resize(width, height);
        self.width = width;
        self.height = height;
        self.tile_edge = tile_edge_for(width, height);
        self.pending = None;

        info!(width, height, tile_edge = self.tile_edge, "viewport recomputed");
    }

    pub fn note_resize(&mut self, width: u32, height: u32) {
        self.pending = Some((width, height));
    }

    /// Applies the latest pending resize, if any. Returns whether one was
    /// applied.
    pub fn flush_pending<C: Canvas + ?Sized>(&mut self, canvas: &mut C) -> bool {
        match self.pending.take() {
            Some((width, height)) => {
                self.recompute(width, height, canvas);
                true
            }
            None => false,
        }
    }
}
