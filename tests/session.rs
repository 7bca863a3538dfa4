use pretty_assertions::assert_eq;
use tilecycle::{
    color, Canvas, InputOutcome, IntervalController, LoopState, MouseButton, Session,
    TickOutcome, WindowEvent,
};
use tinyrand::{Seeded, StdRand};

fn session(width: u32, height: u32) -> Session<StdRand> {
    Session::new(
        width,
        height,
        IntervalController::default(),
        StdRand::seed(1),
        false,
    )
}

fn press(
    session: &mut Session<StdRand>,
    button: MouseButton,
    pressed: bool,
) -> Option<InputOutcome> {
    session.handle_event(WindowEvent::MouseButton { button, pressed })
}

fn move_to(session: &mut Session<StdRand>, y: f64) -> Option<InputOutcome> {
    session.handle_event(WindowEvent::MousePos { x: 10.0, y })
}

#[test]
fn startup_paints_full_grid() {
    let mut session = session(800, 600);
    assert_eq!(session.canvas().dimensions(), (800, 600));

    assert_eq!(session.frame(0.0), Some(TickOutcome::Painted { tiles: 140 }));
    let palette = color::palette_at(0.0).map(|c| c.to_rgb());
    assert!(session.canvas().pixels().iter().all(|p| palette.contains(p)));
}

#[test]
fn frames_are_throttled_by_interval() {
    let mut session = session(200, 200);
    let ticks: Vec<_> = (0..=30)
        .map(|frame| frame as f64 * 16.0)
        .filter(|now| session.frame(*now).is_some())
        .collect();
    // delay 100 -> first frame at or after each deadline
    assert_eq!(ticks, vec![0.0, 112.0, 224.0, 336.0, 448.0]);
    for pair in ticks.windows(2) {
        assert!(pair[1] - pair[0] >= 100.0);
    }
}

#[test]
fn scroll_changes_next_deadline() {
    let mut session = session(200, 200);
    session.frame(0.0);

    let outcome = session.handle_event(WindowEvent::Scroll { delta_y: -120.0 });
    assert_eq!(outcome, Some(InputOutcome::Adjusted(97)));
    assert_eq!(
        session.render_loop().state(),
        LoopState::Scheduled { since_ms: 0.0 }
    );
    assert_eq!(session.render_loop().next_due_ms(), Some(97.0));
}

#[test]
fn left_drag_acts_as_touch() {
    let mut session = session(200, 200);
    move_to(&mut session, 300.0);
    assert_eq!(press(&mut session, MouseButton::Left, true), Some(InputOutcome::Tracked));
    assert_eq!(move_to(&mut session, 250.0), Some(InputOutcome::Adjusted(90)));
    assert_eq!(move_to(&mut session, 350.0), Some(InputOutcome::Adjusted(100)));
    assert_eq!(move_to(&mut session, 360.0), Some(InputOutcome::Adjusted(110)));

    press(&mut session, MouseButton::Left, false);
    assert_eq!(move_to(&mut session, 0.0), None);
    assert_eq!(session.delay_ms(), 110);
}

#[test]
fn middle_drag_pans() {
    let mut session = session(200, 200);
    move_to(&mut session, 100.0);
    assert_eq!(press(&mut session, MouseButton::Middle, true), None);
    assert_eq!(move_to(&mut session, 60.0), Some(InputOutcome::Adjusted(60)));
    assert_eq!(move_to(&mut session, 10.0), Some(InputOutcome::Adjusted(10)));
    press(&mut session, MouseButton::Middle, false);
    assert_eq!(move_to(&mut session, 500.0), None);
}

#[test]
fn resize_waits_for_frame_boundary() {
    let mut session = session(800, 600);
    session.handle_event(WindowEvent::WindowResize { width: 100, height: 50 });
    session.handle_event(WindowEvent::WindowResize { width: 400, height: 300 });
    assert_eq!(session.canvas().dimensions(), (800, 600));

    assert_eq!(session.frame(0.0), Some(TickOutcome::Painted { tiles: 14 * 10 }));
    assert_eq!(session.canvas().dimensions(), (400, 300));
    assert_eq!(session.render_loop().scene().viewport.tile_edge(), 30);
}

#[test]
fn minimized_window_skips_painting() {
    let mut session = session(800, 600);
    session.handle_event(WindowEvent::WindowResize { width: 0, height: 0 });
    assert_eq!(session.frame(0.0), Some(TickOutcome::Skipped));
    assert_eq!(session.frame(100.0), Some(TickOutcome::Skipped));
}

#[test]
fn close_requests_exit() {
    let mut session = session(10, 10);
    assert!(!session.will_exit());
    session.handle_event(WindowEvent::WindowClose);
    assert!(session.will_exit());
}
