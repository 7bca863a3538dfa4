use std::{thread, time};

use glfw::Context;
use tracing::{error, info};

use crate::{
    platform::{WindowClient, WindowEvent},
    Error, MouseButton,
};

use super::Gl;

/// GLFW reports scroll in lines with "up" positive; browsers report pixels
/// with "up" negative.
const WHEEL_PIXELS_PER_LINE: f64 = 120.0;

const FRAME_NANOS: u128 = 1_000_000_000 / 60;

pub struct GLFWWindow {
    glfw: glfw::Glfw,
    window: glfw::PWindow,
    events: glfw::GlfwReceiver<(f64, glfw::WindowEvent)>,

    title: String,

    gl: Gl,
}

impl GLFWWindow {
    /// Ratio between framebuffer pixels and window coordinates.
    fn pixel_scale(&self) -> (f64, f64) {
        let (window_width, window_height) = self.window.get_size();
        let (fb_width, fb_height) = self.window.get_framebuffer_size();
        if window_width <= 0 || window_height <= 0 {
            return (1.0, 1.0);
        }
        (
            fb_width as f64 / window_width as f64,
            fb_height as f64 / window_height as f64,
        )
    }
}

/// Converts a GLFW event into device pixels and browser-style scroll deltas.
/// `scale` maps window coordinates to framebuffer pixels.
fn convert_event(event: glfw::WindowEvent, scale: (f64, f64)) -> Option<WindowEvent> {
    use glfw::WindowEvent as E;
    use crate::platform::WindowEvent as W;
    let event = match event {
        E::FramebufferSize(width, height) => W::WindowResize {
            width: width.max(0) as u32,
            height: height.max(0) as u32,
        },
        E::Close => W::WindowClose,
        E::MouseButton(mouse_button, action, ..) => W::MouseButton {
            button: match mouse_button {
                glfw::MouseButtonLeft => MouseButton::Left,
                glfw::MouseButtonMiddle => MouseButton::Middle,
                glfw::MouseButtonRight => MouseButton::Right,
                _ => return None,
            },
            pressed: match action {
                glfw::Action::Release => false,
                glfw::Action::Press => true,
                glfw::Action::Repeat => return None,
            },
        },
        E::CursorPos(x, y) => W::MousePos {
            x: x * scale.0,
            y: y * scale.1,
        },
        E::Scroll(_, y) => W::Scroll {
            delta_y: -y * WHEEL_PIXELS_PER_LINE,
        },
        _ => return None,
    };
    Some(event)
}

impl crate::platform::WindowTrait for GLFWWindow {
    fn new(width: u32, height: u32, title: &str) -> Result<Self, Error> {
        let mut glfw = glfw::init(|err, description| {
            error!(?err, "glfw error: {description}");
        })
        .map_err(|err| Error::WindowInit(format!("{err:?}")))?;

        glfw.window_hint(glfw::WindowHint::ContextVersionMajor(3));
        glfw.window_hint(glfw::WindowHint::ContextVersionMinor(3));
        glfw.window_hint(glfw::WindowHint::OpenGlForwardCompat(true));
        glfw.window_hint(glfw::WindowHint::OpenGlProfile(
            glfw::OpenGlProfileHint::Core,
        ));

        let (mut window, events) = glfw
            .create_window(width, height, title, glfw::WindowMode::Windowed)
            .ok_or(Error::WindowCreation)?;

        window.make_current();

        window.set_framebuffer_size_polling(true);
        window.set_close_polling(true);
        window.set_scroll_polling(true);
        window.set_mouse_button_polling(true);
        window.set_cursor_pos_polling(true);

        let (fb_width, fb_height) = window.get_framebuffer_size();
        let gl = Gl::new(fb_width.max(0) as u32, fb_height.max(0) as u32, |s| {
            window.get_proc_address(s) as _
        })?;

        glfw.set_swap_interval(glfw::SwapInterval::Sync(1));

        info!(fb_width, fb_height, "window created");

        Ok(Self {
            glfw,
            window,
            events,

            title: title.to_owned(),

            gl,
        })
    }

    fn framebuffer_dimensions(&self) -> (u32, u32) {
        let size = self.window.get_framebuffer_size();

        (size.0.max(0) as u32, size.1.max(0) as u32)
    }

    fn run<T>(&mut self, client: &mut T)
    where
        T: WindowClient,
    {
        let instant = time::Instant::now();
        let mut next_frame_time = instant.elapsed().as_nanos() + FRAME_NANOS;

        loop {
            self.glfw.poll_events();

            let scale = self.pixel_scale();
            for (_, glfw_event) in glfw::flush_messages(&self.events) {
                if let Some(event) = convert_event(glfw_event, scale) {
                    client.handle_event(event);
                }
            }

            let cur_time = instant.elapsed().as_nanos();
            if cur_time >= next_frame_time {
                while next_frame_time <= cur_time {
                    next_frame_time += FRAME_NANOS;
                }

                if !client.frame(cur_time as f64 / 1_000_000.0) {
                    return;
                }

                if let Some(status) = client.take_status() {
                    self.window.set_title(&format!("{} - {status}", self.title));
                }

                let (width, height) = client.pixel_dimensions();
                self.gl.resize(width, height);
                self.gl.draw(client.get_pixels());
                self.window.swap_buffers();
            }

            let cur_time = instant.elapsed().as_nanos();
            if cur_time < next_frame_time {
                thread::sleep(time::Duration::from_nanos(
                    (next_frame_time - cur_time) as u64,
                ));
            }
        }
    }
}

impl Drop for GLFWWindow {
    fn drop(&mut self) {
        self.gl.deinit();
    }
}
