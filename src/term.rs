use std::{io::{stdout, Stdout, Write}, time::Duration};

use crossterm::event::{poll, read, Event};
use crossterm::style::Color;
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue, style, terminal};

/// Raw-mode drawing surface. Everything is queued and written out in one
/// flush per frame.
pub struct TermManager {
    width: u16,
    height: u16,
    stdout: Stdout,
}

impl TermManager {
    pub fn new() -> crossterm::Result<Self> {
        let (width, height) = terminal::size()?;
        Ok(TermManager { width, height, stdout: stdout() })
    }

    pub fn setup(&mut self) -> crossterm::Result<()> {
        execute!(self.stdout, EnterAlternateScreen)?;
        terminal::enable_raw_mode()?;
        execute!(self.stdout, cursor::Hide)?;
        self.clear()
    }

    pub fn restore(&mut self) -> crossterm::Result<()> {
        execute!(self.stdout, cursor::Show)?;
        terminal::disable_raw_mode()?;
        execute!(self.stdout, LeaveAlternateScreen)
    }

    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    pub fn set_size(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
    }

    /// Drains every pending input event without blocking. Resize events
    /// come through here as well.
    pub fn poll_events(&self) -> crossterm::Result<Vec<Event>> {
        let mut events = vec![];

        while poll(Duration::from_millis(1))? {
            events.push(read()?);
        }

        Ok(events)
    }

    pub fn clear(&mut self) -> crossterm::Result<()> {
        execute!(self.stdout, terminal::Clear(ClearType::All))
    }

    /// Cells outside the current viewport are clipped, the way a canvas
    /// clips drawing past its edge.
    pub fn draw_glyph(&mut self, (x, y): (u16, u16), ch: char, color: Color) -> crossterm::Result<()> {
        if x >= self.width || y >= self.height {
            return Ok(());
        }

        queue!(
            self.stdout,
            cursor::MoveTo(x, y),
            style::SetForegroundColor(color),
            style::Print(ch)
        )
    }

    pub fn draw_text(&mut self, (x, y): (u16, u16), text: &str, color: Color) -> crossterm::Result<()> {
        if x >= self.width || y >= self.height {
            return Ok(());
        }

        let fitting: String = text.chars().take((self.width - x) as usize).collect();
        queue!(
            self.stdout,
            cursor::MoveTo(x, y),
            style::SetForegroundColor(color),
            style::Print(fitting)
        )
    }

    /// Horizontally centered block of lines, for the pause and game-over
    /// overlays.
    pub fn draw_center_lines(&mut self, lines: &[&str], color: Color) -> crossterm::Result<()> {
        let width = lines.iter().map(|line| line.chars().count()).max().unwrap_or(0) as u16;
        let top = (self.height / 2).saturating_sub(lines.len() as u16 / 2);
        let left = (self.width / 2).saturating_sub(width / 2);

        for (i, line) in lines.iter().enumerate() {
            let padded = format!("{line: ^width$}", line = line, width = width as usize);
            self.draw_text((left, top + i as u16), &padded, color)?;
        }

        Ok(())
    }

    pub fn draw_border(&mut self) -> crossterm::Result<()> {
        if self.width < 2 || self.height < 2 {
            return Ok(());
        }

        let end_x = self.width - 1;
        let end_y = self.height - 1;

        for x in 0..self.width {
            let ch = if x == 0 || x == end_x { '+' } else { '-' };
            self.draw_glyph((x, 0), ch, Color::White)?;
            self.draw_glyph((x, end_y), ch, Color::White)?;
        }

        for y in 1..end_y {
            self.draw_glyph((0, y), '|', Color::White)?;
            self.draw_glyph((end_x, y), '|', Color::White)?;
        }

        Ok(())
    }

    pub fn flush(&mut self) -> crossterm::Result<()> {
        self.stdout.flush()?;
        Ok(())
    }
}
