//! Terminal display and input handling

use crate::animation::GridSink;
use crate::color::{Channels, ColorAttr};
use crate::renderer::FrameBuffer;
use crossterm::{
    cursor::{self, MoveTo},
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute, queue,
    style::{Color, Colors, Print, ResetColor, SetColors},
    terminal::{
        self, ClearType, DisableLineWrap, EnableLineWrap, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use std::fs;
use std::io::{self, stdout, BufWriter, Stdout, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Console color for one half of a cell attribute
pub fn console_color(c: Channels) -> Color {
    match (c.red, c.green, c.blue, c.intense) {
        (false, false, false, false) => Color::Black,
        (false, false, false, true) => Color::DarkGrey,
        (false, false, true, false) => Color::DarkBlue,
        (false, false, true, true) => Color::Blue,
        (false, true, false, false) => Color::DarkGreen,
        (false, true, false, true) => Color::Green,
        (false, true, true, false) => Color::DarkCyan,
        (false, true, true, true) => Color::Cyan,
        (true, false, false, false) => Color::DarkRed,
        (true, false, false, true) => Color::Red,
        (true, false, true, false) => Color::DarkMagenta,
        (true, false, true, true) => Color::Magenta,
        (true, true, false, false) => Color::DarkYellow,
        (true, true, false, true) => Color::Yellow,
        (true, true, true, false) => Color::Grey,
        (true, true, true, true) => Color::White,
    }
}

/// Foreground and background colors for a cell
pub fn cell_colors(attr: ColorAttr) -> Colors {
    Colors::new(console_color(attr.foreground()), console_color(attr.background()))
}

/// Full-screen terminal sink with buffered output
pub struct TerminalDisplay {
    width: u16,
    height: u16,
    last_resize_check: Instant,
    buffer: BufWriter<Stdout>,
    paused: bool,
}

impl TerminalDisplay {
    pub fn new() -> io::Result<Self> {
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen)?;
        terminal::enable_raw_mode()?;
        execute!(stdout, terminal::Clear(ClearType::All), cursor::Hide, DisableLineWrap)?;

        let (width, height) = terminal::size()?;

        Ok(Self {
            width,
            height: height.saturating_sub(1), // status line
            last_resize_check: Instant::now(),
            buffer: BufWriter::new(stdout),
            paused: false,
        })
    }

    pub fn get_size(&self) -> (usize, usize) {
        (self.width as usize, self.height as usize)
    }

    /// Check if terminal has been resized
    pub fn check_resize(&mut self) -> bool {
        if self.last_resize_check.elapsed() < Duration::from_millis(100) {
            return false;
        }
        self.last_resize_check = Instant::now();

        if let Ok((new_width, new_height)) = terminal::size() {
            let new_height = new_height.saturating_sub(1);
            if new_width != self.width || new_height != self.height {
                self.width = new_width;
                self.height = new_height;
                return true;
            }
        }
        false
    }

    /// Check for keyboard input
    pub fn poll_input(&self, timeout: Duration) -> io::Result<Option<KeyEvent>> {
        if event::poll(timeout)? {
            if let Event::Key(key_event) = event::read()? {
                if key_event.kind != KeyEventKind::Release {
                    return Ok(Some(key_event));
                }
            }
        }
        Ok(None)
    }
}

impl GridSink for TerminalDisplay {
    /// Draw the grid clipped to the terminal, with a status line below it
    fn present(&mut self, frame: u64, grid: &FrameBuffer) -> io::Result<()> {
        if self.check_resize() {
            queue!(self.buffer, ResetColor, terminal::Clear(ClearType::All))?;
        }

        let cols = grid.width().min(self.width as usize);
        let mut last: Option<ColorAttr> = None;

        for (y, row) in grid.rows().take(self.height as usize).enumerate() {
            queue!(self.buffer, MoveTo(0, y as u16))?;
            for cell in &row[..cols] {
                if last != Some(cell.color) {
                    queue!(self.buffer, SetColors(cell_colors(cell.color)))?;
                    last = Some(cell.color);
                }
                queue!(self.buffer, Print(cell.glyph))?;
            }
        }

        let status_row = grid.height().min(self.height as usize) as u16;
        queue!(
            self.buffer,
            ResetColor,
            MoveTo(0, status_row),
            terminal::Clear(ClearType::CurrentLine),
            Print(status_line(frame))
        )?;

        self.buffer.flush()
    }

    /// Wait for the frame delay while watching the keyboard
    fn pace(&mut self, delay: Duration) -> io::Result<bool> {
        let deadline = Instant::now() + delay;
        loop {
            let timeout = if self.paused {
                Duration::from_millis(100)
            } else {
                deadline.saturating_duration_since(Instant::now())
            };

            if let Some(key) = self.poll_input(timeout)? {
                match parse_key_event(key) {
                    Action::Quit => return Ok(false),
                    Action::Pause => self.paused = !self.paused,
                    Action::None => {}
                }
            }

            if !self.paused && Instant::now() >= deadline {
                return Ok(true);
            }
        }
    }
}

impl Drop for TerminalDisplay {
    fn drop(&mut self) {
        let _ = execute!(self.buffer, ResetColor, EnableLineWrap, cursor::Show);
        let _ = terminal::disable_raw_mode();
        let _ = self.buffer.flush();
        let _ = execute!(stdout(), LeaveAlternateScreen);
    }
}

fn status_line(frame: u64) -> String {
    format!("Frame {} | [SPACE] Pause  [Q]uit", frame)
}

/// Key actions while animating
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    None,
    Quit,
    Pause,
}

/// Parse keyboard input into actions
pub fn parse_key_event(event: KeyEvent) -> Action {
    match event.code {
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        KeyCode::Char(' ') => Action::Pause,
        _ => Action::None,
    }
}

/// Writes every frame's glyphs to `frame_XXX.txt` in a directory
pub struct TextDump {
    dir: PathBuf,
    frames: usize,
}

impl TextDump {
    pub fn new<P: AsRef<Path>>(dir: P) -> io::Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir, frames: 0 })
    }

    pub fn frames_written(&self) -> usize {
        self.frames
    }
}

impl GridSink for TextDump {
    fn present(&mut self, frame: u64, grid: &FrameBuffer) -> io::Result<()> {
        let path = self.dir.join(format!("frame_{:03}.txt", self.frames));
        fs::write(&path, grid.to_ascii())?;
        tracing::info!(frame, path = %path.display(), "Wrote frame");
        self.frames += 1;
        Ok(())
    }

    fn pace(&mut self, _delay: Duration) -> io::Result<bool> {
        Ok(true)
    }
}
