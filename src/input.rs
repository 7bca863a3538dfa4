//! Maps wheel, touch and pan input onto interval adjustments.
//!
//! All three channels share one sign convention: moving "up" (negative
//! vertical delta, as browsers report it) produces a positive delta, which
//! shortens the redraw interval.

use tracing::trace;

use crate::interval::{IntervalController, IntervalReadout};

/// Wheel `delta_y` pixels per interval step.
pub const WHEEL_STEP_DIVISOR: f64 = 50.0;

/// Interval change per touch-move sample.
pub const TOUCH_STEP: i32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchPhase {
    Start,
    Move,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Scroll with browser sign convention: negative `delta_y` scrolls up.
    Wheel { delta_y: f64 },
    Touch {
        phase: TouchPhase,
        points: Vec<TouchPoint>,
    },
    /// Vertical pan displacement since the previous pan sample.
    Pan { delta_y: f64 },
}

/// What the adapter did with an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOutcome {
    /// The interval was adjusted; holds the new delay.
    Adjusted(u32),
    /// Gesture state changed but the interval did not.
    Tracked,
    Ignored,
}

impl InputOutcome {
    /// Whether the host should suppress its own handling (e.g. native scroll).
    #[inline]
    pub fn suppresses_default(self) -> bool {
        !matches!(self, InputOutcome::Ignored)
    }
}

#[inline]
pub fn wheel_delta(delta_y: f64) -> i32 {
    (-(delta_y / WHEEL_STEP_DIVISOR).floor()) as i32
}

#[inline]
pub fn pan_delta(delta_y: f64) -> i32 {
    (-delta_y).round() as i32
}

#[derive(Debug, Default, Clone)]
pub struct InputAdapter {
    touch_start_y: Option<f64>,
}

impl InputAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn touch_start_y(&self) -> Option<f64> {
        self.touch_start_y
    }

    /// Routes `event` into `interval`, refreshing `readout` after every
    /// adjustment.
    pub fn handle(
        &mut self,
        event: &InputEvent,
        interval: &mut IntervalController,
        readout: Option<&mut (dyn IntervalReadout + '_)>,
    ) -> InputOutcome {
        let delta = match *event {
            InputEvent::Wheel { delta_y } => Some(wheel_delta(delta_y)),
            InputEvent::Pan { delta_y } => Some(pan_delta(delta_y)),
            InputEvent::Touch { phase, ref points } => {
                let Some(first) = points.first() else {
                    return InputOutcome::Ignored;
                };
                match self.touch(phase, first.y) {
                    Some(delta) => Some(delta),
                    None => return InputOutcome::Tracked,
                }
            }
        };

        match delta {
            Some(delta) => {
                let delay_ms = interval.adjust_and_show(delta, readout);
                trace!(?event, delta, delay_ms, "input applied");
                InputOutcome::Adjusted(delay_ms)
            }
            None => InputOutcome::Ignored,
        }
    }

    fn touch(&mut self, phase: TouchPhase, y: f64) -> Option<i32> {
        match phase {
            TouchPhase::Start => {
                self.touch_start_y = Some(y);
                None
            }
            TouchPhase::Move => {
                let start = *self.touch_start_y.get_or_insert(y);
                if y < start {
                    Some(TOUCH_STEP)
                } else if y > start {
                    Some(-TOUCH_STEP)
                } else {
                    None
                }
            }
            TouchPhase::End => {
                self.touch_start_y = None;
                None
            }
        }
    }
}

/// Turns raw pointer positions into vertical pan samples.
#[derive(Debug, Default, Clone)]
pub struct PanRecognizer {
    last_y: Option<f64>,
}

impl PanRecognizer {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.last_y.is_some()
    }

    pub fn press(&mut self, y: f64) {
        self.last_y = Some(y);
    }

    /// Returns a pan event for the displacement since the last sample, if a
    /// pan is in progress and the pointer moved.
    pub fn motion(&mut self, y: f64) -> Option<InputEvent> {
        let last_y = self.last_y.as_mut()?;
        let delta_y = y - *last_y;
        *last_y = y;
        (delta_y != 0.0).then_some(InputEvent::Pan { delta_y })
    }

    pub fn release(&mut self) {
        self.last_y = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn touch(phase: TouchPhase, y: f64) -> InputEvent {
        InputEvent::Touch {
            phase,
            points: vec![TouchPoint { y }],
        }
    }

    fn apply(
        adapter: &mut InputAdapter,
        interval: &mut IntervalController,
        event: InputEvent,
    ) -> InputOutcome {
        adapter.handle(&event, interval, None)
    }

    #[test]
    fn wheel_mapping() {
        assert_eq!(wheel_delta(-120.0), 3);
        assert_eq!(wheel_delta(120.0), -2);
        assert_eq!(wheel_delta(49.0), 0);
        assert_eq!(wheel_delta(-1.0), 1);
    }

    #[test]
    fn wheel_up_notch_decreases_delay() {
        let mut adapter = InputAdapter::new();
        let mut interval = IntervalController::default();
        let outcome = apply(&mut adapter, &mut interval, InputEvent::Wheel { delta_y: -120.0 });
        assert_eq!(outcome, InputOutcome::Adjusted(97));
        assert!(outcome.suppresses_default());
    }

    #[test]
    fn wheel_clamps_at_minimum() {
        let mut adapter = InputAdapter::new();
        let mut interval = IntervalController::new(12);
        let outcome = apply(&mut adapter, &mut interval, InputEvent::Wheel { delta_y: -120.0 });
        assert_eq!(outcome, InputOutcome::Adjusted(10));
    }

    #[test]
    fn small_wheel_is_adjusted_by_zero() {
        let mut adapter = InputAdapter::new();
        let mut interval = IntervalController::default();
        let outcome = apply(&mut adapter, &mut interval, InputEvent::Wheel { delta_y: 10.0 });
        assert_eq!(outcome, InputOutcome::Adjusted(100));
    }

    #[test]
    fn huge_deltas_saturate_in_gesture_direction() {
        assert_eq!(wheel_delta(-1.0e12), i32::MAX);
        assert_eq!(wheel_delta(1.0e12), i32::MIN);
        assert_eq!(pan_delta(-1.0e12), i32::MAX);
        assert_eq!(pan_delta(1.0e12), i32::MIN);

        let mut adapter = InputAdapter::new();
        let mut interval = IntervalController::default();
        for event in [
            InputEvent::Wheel { delta_y: -1.0e12 },
            InputEvent::Pan { delta_y: -1.0e12 },
        ] {
            assert_eq!(apply(&mut adapter, &mut interval, event), InputOutcome::Adjusted(10));
        }
        for event in [
            InputEvent::Wheel { delta_y: 1.0e12 },
            InputEvent::Pan { delta_y: 1.0e12 },
        ] {
            assert_eq!(
                apply(&mut adapter, &mut interval, event),
                InputOutcome::Adjusted(1000)
            );
        }
    }

    #[test]
    fn touch_drag_direction() {
        let mut adapter = InputAdapter::new();
        let mut interval = IntervalController::default();

        assert_eq!(
            apply(&mut adapter, &mut interval, touch(TouchPhase::Start, 300.0)),
            InputOutcome::Tracked
        );
        assert_eq!(
            apply(&mut adapter, &mut interval, touch(TouchPhase::Move, 250.0)),
            InputOutcome::Adjusted(90)
        );
        // start is kept, so moving below it reverses direction
        assert_eq!(
            apply(&mut adapter, &mut interval, touch(TouchPhase::Move, 350.0)),
            InputOutcome::Adjusted(100)
        );
        assert_eq!(
            apply(&mut adapter, &mut interval, touch(TouchPhase::Move, 350.0)),
            InputOutcome::Adjusted(110)
        );
        assert_eq!(
            apply(&mut adapter, &mut interval, touch(TouchPhase::Move, 300.0)),
            InputOutcome::Tracked
        );
        assert_eq!(adapter.touch_start_y(), Some(300.0));

        apply(&mut adapter, &mut interval, touch(TouchPhase::End, 300.0));
        assert_eq!(adapter.touch_start_y(), None);
    }

    #[test]
    fn move_without_start_records_start() {
        let mut adapter = InputAdapter::new();
        let mut interval = IntervalController::default();
        assert_eq!(
            apply(&mut adapter, &mut interval, touch(TouchPhase::Move, 40.0)),
            InputOutcome::Tracked
        );
        assert_eq!(adapter.touch_start_y(), Some(40.0));
    }

    #[test]
    fn empty_touch_is_ignored() {
        let mut adapter = InputAdapter::new();
        let mut interval = IntervalController::default();
        for phase in [TouchPhase::Start, TouchPhase::Move, TouchPhase::End] {
            let outcome = apply(
                &mut adapter,
                &mut interval,
                InputEvent::Touch {
                    phase,
                    points: Vec::new(),
                },
            );
            assert_eq!(outcome, InputOutcome::Ignored);
            assert!(!outcome.suppresses_default());
        }
        assert_eq!(interval.delay_ms(), 100);
        assert_eq!(adapter.touch_start_y(), None);
    }

    #[test]
    fn pan_uses_displacement() {
        let mut adapter = InputAdapter::new();
        let mut interval = IntervalController::default();
        assert_eq!(
            apply(&mut adapter, &mut interval, InputEvent::Pan { delta_y: -25.4 }),
            InputOutcome::Adjusted(75)
        );
        assert_eq!(
            apply(&mut adapter, &mut interval, InputEvent::Pan { delta_y: 5000.0 }),
            InputOutcome::Adjusted(1000)
        );
    }

    #[test]
    fn pan_recognizer_samples() {
        let mut pan = PanRecognizer::new();
        assert_eq!(pan.motion(10.0), None);

        pan.press(100.0);
        assert!(pan.is_active());
        assert_eq!(pan.motion(90.0), Some(InputEvent::Pan { delta_y: -10.0 }));
        assert_eq!(pan.motion(90.0), None);
        assert_eq!(pan.motion(95.0), Some(InputEvent::Pan { delta_y: 5.0 }));

        pan.release();
        assert!(!pan.is_active());
        assert_eq!(pan.motion(0.0), None);
    }
}
