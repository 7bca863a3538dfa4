use std::{
    error::Error as StdError,
    fmt::{Debug, Display},
    io,
    path::PathBuf,
    time::{SystemTime, UNIX_EPOCH},
};

use tinyrand::{Rand, Seeded, StdRand};
use tracing::{info, trace};

pub mod canvas;
pub mod color;
pub mod config;
pub mod input;
pub mod interval;
pub mod render;
pub mod viewport;

mod platform;
use platform::{Window, WindowClient, WindowTrait};

pub use canvas::{Canvas, PixelCanvas};
pub use config::Config;
pub use input::{InputAdapter, InputEvent, InputOutcome, PanRecognizer, TouchPhase, TouchPoint};
pub use interval::{IntervalController, IntervalReadout};
pub use platform::WindowEvent;
pub use render::{LoopState, RenderLoop, Scene, TickOutcome};
pub use viewport::ViewportTracker;

pub struct EngineBuilder {
    width: u32,
    height: u32,

    title: String,

    interval_ms: u32,
    readout: bool,
    seed: Option<u64>,
}

impl EngineBuilder {
    pub fn with_dimensions(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            width: config.window.width,
            height: config.window.height,
            title: config.window.title.clone(),
            interval_ms: config.animation.interval_ms,
            readout: config.animation.readout,
            seed: config.animation.seed,
        }
    }

    #[inline]
    pub fn dimensions(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    #[inline]
    pub fn title(mut self, title: String) -> Self {
        self.title = title;
        self
    }

    #[inline]
    pub fn interval(mut self, interval_ms: u32) -> Self {
        self.interval_ms = interval_ms;
        self
    }

    /// Mirror the current interval into the window title.
    #[inline]
    pub fn readout(mut self, readout: bool) -> Self {
        self.readout = readout;
        self
    }

    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Opens the window. The animation starts with [`Engine::run`].
    pub fn build(self) -> Result<Engine, Error> {
        Engine::new(self)
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        let config = Config::default();
        Self::from_config(&config)
    }
}

#[derive(PartialEq, Eq, Hash, Debug, Clone, Copy)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_nanos() as u64)
}

pub struct Engine {
    window: Window,
    session: Session<StdRand>,
}

impl Engine {
    fn new(builder: EngineBuilder) -> Result<Self, Error> {
        let EngineBuilder {
            width,
            height,
            title,
            interval_ms,
            readout,
            seed,
        } = builder;

        let window = Window::new(width, height, &title)?;
        let (fb_width, fb_height) = window.framebuffer_dimensions();

        let seed = seed.unwrap_or_else(clock_seed);
        info!(fb_width, fb_height, interval_ms, seed, "starting tile cycle");

        let session = Session::new(
            fb_width,
            fb_height,
            IntervalController::new(interval_ms),
            StdRand::seed(seed),
            readout,
        );

        Ok(Self { window, session })
    }

    pub fn run(&mut self) {
        self.window.run(&mut self.session);
        info!(ticks = self.session.render_loop().ticks(), "window closed");
    }
}

/// Collects readout text until the host picks it up.
#[derive(Debug, Default)]
struct StatusReadout {
    pending: Option<String>,
}

impl IntervalReadout for StatusReadout {
    fn show(&mut self, text: &str) {
        self.pending = Some(text.to_owned());
    }
}

/// Everything the animation needs between host callbacks: the render loop,
/// input state, and the canvas it paints into.
///
/// Host events and frames are delivered one at a time on a single thread.
pub struct Session<R> {
    render: RenderLoop<R>,
    input: InputAdapter,
    pan: PanRecognizer,
    canvas: PixelCanvas,

    pointer: (f64, f64),
    touching: bool,

    readout: Option<StatusReadout>,

    will_exit: bool,
}

impl<R: Rand> Session<R> {
    pub fn new(
        width: u32,
        height: u32,
        controller: IntervalController,
        rng: R,
        readout: bool,
    ) -> Self {
        let mut canvas = PixelCanvas::default();
        let mut scene = Scene::new(controller);
        scene.viewport.recompute(width, height, &mut canvas);

        let mut readout = readout.then(StatusReadout::default);
        if let Some(readout) = &mut readout {
            readout.show(&interval::readout_text(scene.interval.delay_ms()));
        }

        Self {
            render: RenderLoop::new(scene, rng),
            input: InputAdapter::new(),
            pan: PanRecognizer::new(),
            canvas,

            pointer: (0.0, 0.0),
            touching: false,

            readout,

            will_exit: false,
        }
    }

    #[inline]
    pub fn render_loop(&self) -> &RenderLoop<R> {
        &self.render
    }
    #[inline]
    pub fn canvas(&self) -> &PixelCanvas {
        &self.canvas
    }
    #[inline]
    pub fn delay_ms(&self) -> u32 {
        self.render.scene().interval.delay_ms()
    }
    #[inline]
    pub fn will_exit(&self) -> bool {
        self.will_exit
    }

    /// Handles one host event. Returns the input outcome when the event was
    /// routed to the interval.
    pub fn handle_event(&mut self, event: WindowEvent) -> Option<InputOutcome> {
        match event {
            WindowEvent::Scroll { delta_y } => Some(self.apply(InputEvent::Wheel { delta_y })),
            WindowEvent::MouseButton {
                button: MouseButton::Left,
                pressed,
            } => {
                self.touching = pressed;
                let phase = if pressed {
                    TouchPhase::Start
                } else {
                    TouchPhase::End
                };
                Some(self.apply(InputEvent::Touch {
                    phase,
                    points: vec![TouchPoint { y: self.pointer.1 }],
                }))
            }
            WindowEvent::MouseButton {
                button: MouseButton::Middle,
                pressed,
            } => {
                if pressed {
                    self.pan.press(self.pointer.1);
                } else {
                    self.pan.release();
                }
                None
            }
            WindowEvent::MouseButton { .. } => None,
            WindowEvent::MousePos { x, y } => {
                self.pointer = (x, y);
                if self.touching {
                    Some(self.apply(InputEvent::Touch {
                        phase: TouchPhase::Move,
                        points: vec![TouchPoint { y }],
                    }))
                } else {
                    let pan = self.pan.motion(y)?;
                    Some(self.apply(pan))
                }
            }
            WindowEvent::WindowResize { width, height } => {
                self.render.scene_mut().viewport.note_resize(width, height);
                None
            }
            WindowEvent::WindowClose => {
                self.will_exit = true;
                None
            }
        }
    }

    fn apply(&mut self, event: InputEvent) -> InputOutcome {
        let readout = self
            .readout
            .as_mut()
            .map(|readout| readout as &mut dyn IntervalReadout);
        let outcome = self
            .input
            .handle(&event, &mut self.render.scene_mut().interval, readout);
        if outcome.suppresses_default() {
            trace!(?outcome, "default handling suppressed");
        }
        outcome
    }

    /// Frame boundary: applies a pending resize, then ticks if one is due.
    pub fn frame(&mut self, now_ms: f64) -> Option<TickOutcome> {
        let Self { render, canvas, .. } = self;
        render.scene_mut().viewport.flush_pending(canvas);
        render.on_frame(now_ms, canvas)
    }
}

impl<R: Rand> WindowClient for Session<R> {
    fn handle_event(&mut self, event: WindowEvent) {
        Session::handle_event(self, event);
    }

    fn frame(&mut self, now_ms: f64) -> bool {
        if self.will_exit {
            return false;
        }
        Session::frame(self, now_ms);
        true
    }

    fn get_pixels(&self) -> &[u8] {
        self.canvas.as_bytes()
    }

    fn pixel_dimensions(&self) -> (u32, u32) {
        self.canvas.dimensions()
    }

    fn take_status(&mut self) -> Option<String> {
        self.readout.as_mut()?.pending.take()
    }
}

pub enum Error {
    WindowInit(String),
    WindowCreation,
    Gl(&'static str),
    ConfigRead { path: PathBuf, source: io::Error },
    ConfigParse(String),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::WindowInit(err) => write!(f, "failed to initialize GLFW: {err}"),
            Error::WindowCreation => f.write_str("failed to create window"),
            Error::Gl(err) => write!(f, "opengl: {err}"),
            Error::ConfigRead { path, source } => {
                write!(f, "failed to read config {}: {source}", path.display())
            }
            Error::ConfigParse(err) => write!(f, "failed to parse config: {err}"),
        }
    }
}
impl Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Error::ConfigRead { source, .. } => Some(source),
            _ => None,
        }
    }
}
