use crate::{Error, MouseButton};

pub trait WindowTrait: Sized {
    fn new(width: u32, height: u32, title: &str) -> Result<Self, Error>;

    /// Drawable size in device pixels.
    fn framebuffer_dimensions(&self) -> (u32, u32);

    fn run<T>(&mut self, client: &mut T)
    where
        T: WindowClient;
}

pub trait WindowClient {
    fn handle_event(&mut self, event: WindowEvent);
    /// Offers a frame at `now_ms` host milliseconds. Returns `false` to exit.
    fn frame(&mut self, now_ms: f64) -> bool;
    fn get_pixels(&self) -> &[u8];
    fn pixel_dimensions(&self) -> (u32, u32);
    /// Text to mirror into the window chrome, if it changed.
    fn take_status(&mut self) -> Option<String>;
}

/// Host events, already converted to device pixels and browser-style
/// scroll deltas.
#[derive(Debug, Clone, PartialEq)]
pub enum WindowEvent {
    MouseButton { button: MouseButton, pressed: bool },
    MousePos { x: f64, y: f64 },
    /// Negative `delta_y` scrolls up.
    Scroll { delta_y: f64 },
    WindowClose,
    WindowResize { width: u32, height: u32 },
}

mod native;
pub type Window = native::GLFWWindow;
