mod font;
mod pixel_buffer;

pub use font::draw_char_centered;
pub use pixel_buffer::PixelBuffer;

use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::pixels::PixelFormatEnum;
use sdl2::render::{Canvas, Texture, TextureCreator};
use sdl2::video::{Window, WindowContext};
use sdl2::EventPump;
use thiserror::Error;

pub const WINDOW_WIDTH: u32 = 800;
pub const WINDOW_HEIGHT: u32 = 800;

/// Pixel size of one glyph cell
pub const CELL_WIDTH: u32 = 20;
pub const CELL_HEIGHT: u32 = 20;

#[derive(Debug, Error)]
pub enum DisplayError {
    #[error("SDL initialization failed: {0}")]
    Init(String),
    #[error("failed to create window: {0}")]
    Window(String),
    #[error("failed to create canvas: {0}")]
    Canvas(String),
    #[error("failed to create texture: {0}")]
    Texture(String),
    #[error("failed to present frame: {0}")]
    Present(String),
    #[error("invalid window title: {0}")]
    Title(#[from] std::ffi::NulError),
}

pub struct Display {
    canvas: Canvas<Window>,
    event_pump: EventPump,
    width: u32,
    height: u32,
}

pub struct RenderTarget<'a> {
    texture: Texture<'a>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Quit,
    KeyDown(Keycode),
}

impl Display {
    /// Open a centered window of the given size. Frame pacing is left to
    /// the caller, so VSync stays off.
    pub fn new(
        title: &str,
        width: u32,
        height: u32,
    ) -> Result<(Self, TextureCreator<WindowContext>), DisplayError> {
        let sdl_context = sdl2::init().map_err(DisplayError::Init)?;
        let video_subsystem = sdl_context.video().map_err(DisplayError::Init)?;

        let window = video_subsystem
            .window(title, width, height)
            .position_centered()
            .build()
            .map_err(|e| DisplayError::Window(e.to_string()))?;

        let canvas = window
            .into_canvas()
            .accelerated()
            .build()
            .map_err(|e| DisplayError::Canvas(e.to_string()))?;

        let texture_creator = canvas.texture_creator();
        let event_pump = sdl_context.event_pump().map_err(DisplayError::Init)?;

        log::info!("Opened {}x{} window", width, height);

        Ok((
            Self {
                canvas,
                event_pump,
                width,
                height,
            },
            texture_creator,
        ))
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn set_title(&mut self, title: &str) -> Result<(), DisplayError> {
        self.canvas.window_mut().set_title(title)?;
        Ok(())
    }

    pub fn present(
        &mut self,
        target: &mut RenderTarget,
        buffer: &PixelBuffer,
    ) -> Result<(), DisplayError> {
        target
            .texture
            .update(None, buffer.as_bytes(), (buffer.width() * 4) as usize)
            .map_err(|e| DisplayError::Present(e.to_string()))?;

        self.canvas
            .copy(&target.texture, None, None)
            .map_err(DisplayError::Present)?;
        self.canvas.present();
        Ok(())
    }

    pub fn poll_events(&mut self) -> Vec<InputEvent> {
        let mut events = Vec::new();

        for event in self.event_pump.poll_iter() {
            match event {
                Event::Quit { .. } => events.push(InputEvent::Quit),
                Event::KeyDown {
                    keycode: Some(k),
                    repeat: false,
                    ..
                } => events.push(InputEvent::KeyDown(k)),
                _ => {},
            }
        }

        events
    }
}

impl<'a> RenderTarget<'a> {
    /// Create a streaming texture matching the pixel buffer layout
    pub fn new(
        texture_creator: &'a TextureCreator<WindowContext>,
        width: u32,
        height: u32,
    ) -> Result<Self, DisplayError> {
        let texture = texture_creator
            .create_texture_streaming(PixelFormatEnum::RGBA8888, width, height)
            .map_err(|e| DisplayError::Texture(e.to_string()))?;
        Ok(Self { texture })
    }
}

#[cfg(test)]
mod tests {
    use super::font::{GLYPH_HEIGHT, GLYPH_WIDTH};
    use super::*;

    #[test]
    fn test_grid_divides_window() {
        assert_eq!(WINDOW_WIDTH % CELL_WIDTH, 0);
        assert_eq!(WINDOW_HEIGHT % CELL_HEIGHT, 0);
        assert_eq!(WINDOW_WIDTH / CELL_WIDTH, 40);
        assert_eq!(WINDOW_HEIGHT / CELL_HEIGHT, 40);
    }

    #[test]
    fn test_glyph_fits_cell() {
        assert!(GLYPH_WIDTH * 2 <= CELL_WIDTH);
        assert!(GLYPH_HEIGHT * 2 <= CELL_HEIGHT);
    }

    #[test]
    fn test_error_messages() {
        let err = DisplayError::Present("texture lost".into());
        assert_eq!(err.to_string(), "failed to present frame: texture lost");
        let nul = std::ffi::CString::new("a\0b").unwrap_err();
        assert!(DisplayError::from(nul).to_string().starts_with("invalid window title"));
    }
}
