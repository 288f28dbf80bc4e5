use std::{io::{Stdout, Write, stdout}, time::Duration};

use anyhow::{bail, Context, Result};
use crossterm::{cursor, execute, queue, style, terminal};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, poll, read};
use crossterm::style::Color;
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use log::{debug, error};

use crate::{Coords, TermInt};
use crate::grid::{Grid, CELL_SIZE};
use crate::render::{InputEvent, InputSource, Renderer, Rgb};
use crate::snake::Direction::*;

// Terminal characters are about twice as tall as they are wide
const CHARS_PER_CELL: TermInt = 2;

#[derive(Copy, Clone, PartialEq, Eq)]
struct Paint {
    fill: Rgb,
    border: Option<Rgb>,
}

/// Crossterm screen. The terminal is put into raw mode on the alternate
/// screen for as long as this value lives.
pub struct TermManager {
    columns: TermInt,
    rows: TermInt,
    term_size: (TermInt, TermInt),
    stdout: Stdout,
    back: Vec<Paint>,
    // None forces a repaint of that cell
    front: Vec<Option<Paint>>,
}

impl TermManager {
    pub fn new(grid: &Grid) -> Result<Self> {
        let needed_w = grid.columns() * CHARS_PER_CELL as i32 + 2;
        let needed_h = grid.rows() + 2;

        let term_size = terminal::size().context("Error reading terminal size")?;
        let (width, height) = term_size;
        if (width as i32) < needed_w || (height as i32) < needed_h {
            bail!("the terminal is {}x{} but a {}x{} board needs at least {}x{}",
                width, height, grid.columns(), grid.rows(), needed_w, needed_h);
        }

        let columns = grid.columns() as TermInt;
        let rows = grid.rows() as TermInt;

        let cells = columns as usize * rows as usize;
        let blank = Paint { fill: crate::render::BACKGROUND_COLOR, border: None };
        let mut term = TermManager {
            columns,
            rows,
            term_size,
            stdout: stdout(),
            back: vec![blank; cells],
            front: vec![None; cells],
        };

        term.setup()?;
        term.redraw_frame()?;
        Ok(term)
    }

    fn setup(&mut self) -> Result<()> {
        execute!(self.stdout, EnterAlternateScreen).context("Error entering alt screen")?;
        terminal::enable_raw_mode().context("Error setting raw mode")?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking).context("Error hiding cursor")?;
        Ok(())
    }

    fn restore(&mut self) -> Result<()> {
        terminal::disable_raw_mode().context("Error unsetting raw mode")?;
        execute!(self.stdout, style::ResetColor, cursor::Show, cursor::EnableBlinking, LeaveAlternateScreen)
            .context("Error leaving alt screen")?;
        Ok(())
    }

    /// Clears the screen, draws the board outline and schedules a full repaint.
    fn redraw_frame(&mut self) -> Result<()> {
        execute!(self.stdout, style::ResetColor, terminal::Clear(ClearType::All))?;

        let end_x = self.columns * CHARS_PER_CELL + 1;
        let end_y = self.rows + 1;

        for x in 0..=end_x {
            let ch = if x == 0 || x == end_x {'+'} else {'-'};
            self.print_at((x, 0), ch)?;
            self.print_at((x, end_y), ch)?;
        }

        for y in 1..end_y {
            self.print_at((0, y), '|')?;
            self.print_at((end_x, y), '|')?;
        }

        self.front.iter_mut().for_each(|cell| *cell = None);
        self.stdout.flush()?;
        Ok(())
    }

    fn print_at(&mut self, pos: (TermInt, TermInt), ch: char) -> Result<()> {
        queue!(self.stdout, cursor::MoveTo(pos.0, pos.1), style::Print(ch))?;
        Ok(())
    }

    fn cell_index(&self, pos: Coords) -> Option<usize> {
        let (col, row) = (pos.0 / CELL_SIZE, pos.1 / CELL_SIZE);
        if pos.0 < 0 || pos.1 < 0 || col >= self.columns as i32 || row >= self.rows as i32 {
            return None;
        }

        Some(row as usize * self.columns as usize + col as usize)
    }

    fn paint_cell(&mut self, index: usize, paint: Paint) -> Result<()> {
        let col = (index % self.columns as usize) as TermInt;
        let row = (index / self.columns as usize) as TermInt;
        let glyph = if paint.border.is_some() {"[]"} else {"  "};

        queue!(
            self.stdout,
            cursor::MoveTo(col * CHARS_PER_CELL + 1, row + 1),
            style::SetBackgroundColor(paint.fill.into()),
            style::SetForegroundColor(paint.border.unwrap_or(paint.fill).into()),
            style::Print(glyph)
        )?;
        Ok(())
    }
}

impl Drop for TermManager {
    fn drop(&mut self) {
        if let Err(err) = self.restore() {
            error!("Failed to restore the terminal: {:#}", err);
        }
    }
}

impl Renderer for TermManager {
    fn clear(&mut self, background: Rgb) -> Result<()> {
        let blank = Paint { fill: background, border: None };
        self.back.iter_mut().for_each(|cell| *cell = blank);
        Ok(())
    }

    fn fill_cell(&mut self, pos: Coords, fill: Rgb, border: Option<Rgb>) -> Result<()> {
        if let Some(index) = self.cell_index(pos) {
            self.back[index] = Paint { fill, border };
        }
        Ok(())
    }

    /// Only cells that changed since the last frame are written out.
    fn present(&mut self) -> Result<()> {
        let size = terminal::size().context("Error reading terminal size")?;
        if size != self.term_size {
            debug!("Terminal resized to {:?}", size);
            self.term_size = size;
            self.redraw_frame()?;
        }

        for index in 0..self.back.len() {
            let paint = self.back[index];
            if self.front[index] != Some(paint) {
                self.paint_cell(index, paint)?;
                self.front[index] = Some(paint);
            }
        }

        queue!(self.stdout, style::ResetColor)?;
        self.stdout.flush().context("Error flushing")?;
        Ok(())
    }
}

/// Keyboard side of the terminal. Reads whatever crossterm has queued.
pub struct TermKeys;

impl InputSource for TermKeys {
    fn poll_events(&mut self) -> Result<Vec<InputEvent>> {
        let mut events = vec![];

        while poll(Duration::ZERO)? {
            if let Event::Key(ev) = read()? {
                events.extend(key_to_event(&ev));
            }
        }

        Ok(events)
    }
}

impl From<Rgb> for Color {
    fn from(Rgb(r, g, b): Rgb) -> Self {
        Color::Rgb { r, g, b }
    }
}

fn key_to_event(ev: &KeyEvent) -> Option<InputEvent> {
    if ev.kind == KeyEventKind::Release {
        return None;
    }

    if is_ctrl_c(ev) {
        return Some(InputEvent::Quit);
    }

    match ev.code {
        KeyCode::Esc | KeyCode::Char('q') => Some(InputEvent::Quit),
        KeyCode::Char('w') | KeyCode::Up => Some(InputEvent::KeyDown(Up)),
        KeyCode::Char('a') | KeyCode::Left => Some(InputEvent::KeyDown(Left)),
        KeyCode::Char('s') | KeyCode::Down => Some(InputEvent::KeyDown(Down)),
        KeyCode::Char('d') | KeyCode::Right => Some(InputEvent::KeyDown(Right)),
        _ => None,
    }
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    ev.code == KeyCode::Char('c') && ev.modifiers.contains(KeyModifiers::CONTROL)
}
