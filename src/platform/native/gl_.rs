use tracing::warn;

use crate::Error;

/// Uploads the canvas as a texture and stretches it over the whole window.
pub struct Gl {
    width: u32,
    height: u32,

    program: u32,
    vao: u32,
    pos_vbo: u32,
    uv_vbo: u32,
    texture: u32,
}

macro_rules! gl_load {
    ($($func:ident)+, $loader_function:ident) => {
        $(
            gl::$func::load_with(&mut $loader_function);
        )+
    };
}

const FULLSCREEN_QUAD: [f32; 8] = [-1.0, -1.0, 1.0, -1.0, -1.0, 1.0, 1.0, 1.0];
const QUAD_UVS: [f32; 8] = [0.0, 1.0, 1.0, 1.0, 0.0, 0.0, 1.0, 0.0];

unsafe fn upload_static(vbo: u32, attribute: u32, data: &[f32]) {
    let bytes = bytemuck::must_cast_slice::<f32, u8>(data);
    gl::BindBuffer(gl::ARRAY_BUFFER, vbo);
    gl::BufferData(
        gl::ARRAY_BUFFER,
        bytes.len() as isize,
        bytes.as_ptr() as *const _,
        gl::STATIC_DRAW,
    );
    gl::EnableVertexAttribArray(attribute);
    gl::VertexAttribPointer(attribute, 2, gl::FLOAT, 0, 0, std::ptr::null());
}

impl Gl {
    pub fn new<F>(width: u32, height: u32, mut loader_function: F) -> Result<Self, Error>
    where
        F: FnMut(&'static str) -> *const std::ffi::c_void,
    {
        unsafe {
            gl_load!(
                CreateProgram CreateShader ShaderSource CompileShader AttachShader LinkProgram DetachShader DeleteShader UseProgram GenVertexArrays BindVertexArray GenBuffers BindBuffer EnableVertexAttribArray VertexAttribPointer GenTextures ActiveTexture BindTexture TexParameteri PixelStorei TexImage2D ClearColor Clear DrawArrays Viewport BufferData DeleteProgram DeleteVertexArrays DeleteBuffers DeleteTextures GetProgramiv GetShaderiv GetError, loader_function);

            let program = gl::CreateProgram();

            unsafe fn compile_shader(
                program: u32,
                source: &str,
                shader_type: u32,
            ) -> Result<u32, Error> {
                let shader = gl::CreateShader(shader_type);
                gl::ShaderSource(
                    shader,
                    1,
                    &(source.as_bytes().as_ptr() as *const _),
                    &(source.len() as i32),
                );
                gl::CompileShader(shader);

                let mut status = 0;
                gl::GetShaderiv(shader, gl::COMPILE_STATUS, &mut status);
                if status != 1 {
                    gl::DeleteShader(shader);
                    return Err(Error::Gl("shader compilation error"));
                }

                gl::AttachShader(program, shader);

                Ok(shader)
            }

            let vertex_shader =
                compile_shader(program, include_str!("shader/vert.glsl"), gl::VERTEX_SHADER)?;
            let fragment_shader = compile_shader(
                program,
                include_str!("shader/frag.glsl"),
                gl::FRAGMENT_SHADER,
            )?;

            gl::LinkProgram(program);

            unsafe fn delete_shader(program: u32, shader: u32) {
                gl::DetachShader(program, shader);
                gl::DeleteShader(shader);
            }

            delete_shader(program, vertex_shader);
            delete_shader(program, fragment_shader);

            let mut status = 0;
            gl::GetProgramiv(program, gl::LINK_STATUS, &mut status);
            if status != 1 {
                gl::DeleteProgram(program);
                return Err(Error::Gl("program link error"));
            }

            gl::UseProgram(program);

            let mut vao = 0;
            gl::GenVertexArrays(1, &mut vao);
            gl::BindVertexArray(vao);

            let mut vbo_buf = [0, 0];
            gl::GenBuffers(2, vbo_buf.as_mut_ptr());
            let [pos_vbo, uv_vbo] = vbo_buf;

            upload_static(pos_vbo, 0, &FULLSCREEN_QUAD);
            upload_static(uv_vbo, 1, &QUAD_UVS);

            let mut texture = 0;
            gl::GenTextures(1, &mut texture);
            gl::ActiveTexture(gl::TEXTURE0);
            gl::BindTexture(gl::TEXTURE_2D, texture);
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_WRAP_S, gl::CLAMP_TO_EDGE as i32);
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_WRAP_T, gl::CLAMP_TO_EDGE as i32);
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MAG_FILTER, gl::NEAREST as i32);
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MIN_FILTER, gl::NEAREST as i32);
            gl::PixelStorei(gl::UNPACK_ALIGNMENT, 1);

            gl::ClearColor(0.0, 0.0, 0.0, 1.0);

            let mut obj = Self {
                width: 0,
                height: 0,

                program,
                vao,
                pos_vbo,
                uv_vbo,
                texture,
            };
            obj.resize(width, height);

            obj.check_for_gl_error();

            Ok(obj)
        }
    }

    #[inline]
    unsafe fn check_for_gl_error(&self) {
        let err = gl::GetError();
        if err != gl::NO_ERROR {
            warn!("opengl error {err:#02x}");
        }
    }

    /// Draws `pixels`, which must be `width * height` RGB triples.
    pub fn draw(&mut self, pixels: &[u8]) {
        unsafe {
            gl::Clear(gl::COLOR_BUFFER_BIT);

            if self.width == 0
                || self.height == 0
                || pixels.len() != self.width as usize * self.height as usize * 3
            {
                return;
            }

            gl::TexImage2D(
                gl::TEXTURE_2D,
                0,
                gl::RGB as i32,
                self.width as i32,
                self.height as i32,
                0,
                gl::RGB,
                gl::UNSIGNED_BYTE,
                pixels.as_ptr() as *const _,
            );

            gl::DrawArrays(gl::TRIANGLE_STRIP, 0, 4);

            self.check_for_gl_error();
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if (self.width, self.height) == (width, height) {
            return;
        }
        self.width = width;
        self.height = height;
        unsafe {
            gl::Viewport(0, 0, width as i32, height as i32);
        }
    }

    pub fn deinit(&mut self) {
        unsafe {
            gl::DeleteProgram(self.program);
            gl::DeleteVertexArrays(1, &self.vao);
            let buffers = [self.pos_vbo, self.uv_vbo];
            gl::DeleteBuffers(2, buffers.as_ptr());
            gl::DeleteTextures(1, &self.texture);
        }
    }
}
