//! The animation loop: palette refresh, tile painting and tick scheduling.

use tinyrand::Rand;
use tracing::trace;

use crate::{
    canvas::Canvas,
    color::{self, Palette, PALETTE_SIZE},
    interval::IntervalController,
    viewport::ViewportTracker,
};

/// All mutable animation state, owned by the [`RenderLoop`].
#[derive(Debug, Clone)]
pub struct Scene {
    pub palette: Palette,
    pub interval: IntervalController,
    pub viewport: ViewportTracker,
}

impl Scene {
    pub fn new(interval: IntervalController) -> Self {
        Self {
            palette: color::palette_at(0.0),
            interval,
            viewport: ViewportTracker::new(),
        }
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(IntervalController::default())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LoopState {
    /// A tick is due at the next frame.
    Running,
    /// Waiting for the interval to elapse after the tick at `since_ms`.
    Scheduled { since_ms: f64 },
}

/// Result of one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Painted { tiles: usize },
    /// The tile edge was zero, nothing was drawn.
    Skipped,
}

pub struct RenderLoop<R> {
    state: LoopState,
    scene: Scene,
    rng: R,
    origin_ms: Option<f64>,
    ticks: u64,
}

impl<R: Rand> RenderLoop<R> {
    pub fn new(scene: Scene, rng: R) -> Self {
        Self {
            state: LoopState::Running,
            scene,
            rng,
            origin_ms: None,
            ticks: 0,
        }
    }

    #[inline]
    pub fn state(&self) -> LoopState {
        self.state
    }
    #[inline]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }
    #[inline]
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }
    #[inline]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Host time at which the next tick becomes due, using the current
    /// interval.
    pub fn next_due_ms(&self) -> Option<f64> {
        match self.state {
            LoopState::Running => None,
            LoopState::Scheduled { since_ms } => {
                Some(since_ms + f64::from(self.scene.interval.delay_ms()))
            }
        }
    }

    /// Offers a frame opportunity at host time `now_ms`. Ticks if one is due.
    pub fn on_frame<C: Canvas + ?Sized>(
        &mut self,
        now_ms: f64,
        canvas: &mut C,
    ) -> Option<TickOutcome> {
        if let Some(due_ms) = self.next_due_ms() {
            if now_ms < due_ms {
                return None;
            }
            self.state = LoopState::Running;
        }

        let origin_ms = *self.origin_ms.get_or_insert(now_ms);
        let outcome = self.tick(now_ms - origin_ms, canvas);
        self.state = LoopState::Scheduled { since_ms: now_ms };
        Some(outcome)
    }

    /// Refreshes the palette for elapsed time `time_ms` and paints the grid.
    pub fn tick<C: Canvas + ?Sized>(&mut self, time_ms: f64, canvas: &mut C) -> TickOutcome {
        self.ticks += 1;
        color::fill_palette(time_ms, &mut self.scene.palette);

        let outcome = paint_tiles(
            &self.scene.palette,
            &self.scene.viewport,
            &mut self.rng,
            canvas,
        );
        trace!(tick = self.ticks, time_ms, ?outcome, "tick");
        outcome
    }
}

/// Paints one randomly chosen palette color per tile.
pub fn paint_tiles<R: Rand, C: Canvas + ?Sized>(
    palette: &Palette,
    viewport: &ViewportTracker,
    rng: &mut R,
    canvas: &mut C,
) -> TickOutcome {
    let edge = viewport.tile_edge();
    if edge == 0 {
        return TickOutcome::Skipped;
    }

    let rgb = palette.map(|color| color.to_rgb());
    let (width, height) = viewport.dimensions();

    let mut tiles = 0;
    for x in (0..width).step_by(edge as usize) {
        for y in (0..height).step_by(edge as usize) {
            let index = rng.next_lim_u32(PALETTE_SIZE as u32) as usize;
            canvas.set_fill(rgb[index]);
            canvas.fill_rect(x, y, edge, edge);
            tiles += 1;
        }
    }

    TickOutcome::Painted { tiles }
}
