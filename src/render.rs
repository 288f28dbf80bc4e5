use anyhow::Result;

use crate::Coords;
use crate::snake::Direction;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

pub const BACKGROUND_COLOR: Rgb = Rgb(0, 0, 0);
pub const BORDER_COLOR: Rgb = Rgb(93, 216, 228);
pub const APPLE_COLOR: Rgb = Rgb(255, 0, 0);
pub const SNAKE_COLOR: Rgb = Rgb(0, 255, 0);

/// A drawing surface addressed in pixel units, one `CELL_SIZE` square at a time.
pub trait Renderer {
    fn clear(&mut self, background: Rgb) -> Result<()>;

    /// Fills the cell whose top-left corner is `pos`, optionally outlined with `border`.
    fn fill_cell(&mut self, pos: Coords, fill: Rgb, border: Option<Rgb>) -> Result<()>;

    fn present(&mut self) -> Result<()>;
}

pub trait Drawable {
    fn draw(&self, renderer: &mut dyn Renderer) -> Result<()>;
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Quit,
    KeyDown(Direction),
}

/// Non-blocking source of input events.
pub trait InputSource {
    /// Drains everything queued since the last call.
    fn poll_events(&mut self) -> Result<Vec<InputEvent>>;
}
