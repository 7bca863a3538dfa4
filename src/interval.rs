use tracing::debug;

pub const MIN_INTERVAL_MS: u32 = 10;
pub const MAX_INTERVAL_MS: u32 = 1000;
pub const DEFAULT_INTERVAL_MS: u32 = 100;

/// Something that can display the current redraw interval, e.g. a text
/// overlay or the window title.
pub trait IntervalReadout {
    fn show(&mut self, text: &str);
}

#[inline]
pub fn readout_text(delay_ms: u32) -> String {
    format!("Interval: {delay_ms}ms")
}

/// Owns the delay between animation ticks.
///
/// Positive adjustments shorten the delay (faster animation), negative ones
/// lengthen it. The delay never leaves `MIN_INTERVAL_MS..=MAX_INTERVAL_MS`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntervalController {
    delay_ms: u32,
}

impl IntervalController {
    pub fn new(initial_ms: u32) -> Self {
        Self {
            delay_ms: initial_ms.clamp(MIN_INTERVAL_MS, MAX_INTERVAL_MS),
        }
    }

    #[inline]
    pub fn delay_ms(&self) -> u32 {
        self.delay_ms
    }

    pub fn adjust(&mut self, delta: i32) -> u32 {
        let target = i64::from(self.delay_ms) - i64::from(delta);
        let clamped = target.clamp(i64::from(MIN_INTERVAL_MS), i64::from(MAX_INTERVAL_MS));
        let previous = self.delay_ms;
        self.delay_ms = clamped as u32;

        if previous != self.delay_ms {
            debug!(delta, previous, delay_ms = self.delay_ms, "interval adjusted");
        }

        self.delay_ms
    }

    /// Like [`adjust`](Self::adjust), then refreshes `readout` if present.
    pub fn adjust_and_show(
        &mut self,
        delta: i32,
        readout: Option<&mut (dyn IntervalReadout + '_)>,
    ) -> u32 {
        let delay_ms = self.adjust(delta);
        if let Some(readout) = readout {
            readout.show(&readout_text(delay_ms));
        }
        delay_ms
    }
}

impl Default for IntervalController {
    fn default() -> Self {
        Self::new(DEFAULT_INTERVAL_MS)
    }
}
