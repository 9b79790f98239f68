//! Terminal embed for the tent illustration.
//!
//! Drag with the mouse to rotate, Space to pause or resume the idle spin,
//! R to reset the view, Q or Esc to quit.
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, MouseButton,
        MouseEvent, MouseEventKind,
    },
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal,
};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};

use tentview_core::{TentViewer, ViewerConfig};

pub mod renderer;

pub use renderer::CellSurface;

/// Terminal rows are roughly twice as tall as they are wide; vertical mouse
/// deltas are scaled up so rotation feels isotropic.
const CELL_ASPECT: f32 = 2.0;

/// Approximate pixels per cell, mapping mouse deltas onto the pixel-tuned
/// drag sensitivity of the presets
const CELL_PIXELS: f32 = 8.0;

/// Nominal 60 Hz frames elapsing per loop turn at the 30 FPS target
const TICKS_PER_FRAME: f32 = 2.0;

pub struct TerminalApp {
    viewer: TentViewer,
    surface: CellSurface,
    running: bool,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(config: ViewerConfig) -> io::Result<Self> {
        let (width, height) = terminal::size()?;

        Ok(Self {
            viewer: TentViewer::new(config),
            surface: CellSurface::new(width as usize, height as usize),
            running: true,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        })
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            stdout(),
            terminal::EnterAlternateScreen,
            EnableMouseCapture,
            cursor::Hide
        )?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(
            stdout(),
            DisableMouseCapture,
            terminal::LeaveAlternateScreen,
            cursor::Show
        )?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let target_frame_time = Duration::from_millis(1000 / 30); // 30 FPS target

        while self.running {
            let frame_start = Instant::now();

            // Drain pending input before advancing the frame
            while event::poll(Duration::from_millis(0))? {
                let ev = event::read()?;
                self.handle_event(ev);
            }

            self.viewer.tick(TICKS_PER_FRAME);
            self.render()?;

            // Frame timing
            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }

            // Update FPS counter
            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, ev: Event) {
        match ev {
            Event::Key(KeyEvent { code, .. }) => match code {
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.running = false;
                }
                KeyCode::Char(' ') => {
                    self.viewer.toggle_auto_rotate();
                }
                KeyCode::Char('r') => {
                    self.viewer.reset_view();
                }
                _ => {}
            },
            Event::Mouse(MouseEvent {
                kind, column, row, ..
            }) => {
                let x = column as f32 * CELL_PIXELS;
                let y = row as f32 * CELL_PIXELS * CELL_ASPECT;
                match kind {
                    MouseEventKind::Down(MouseButton::Left) => self.viewer.pointer_down(x, y),
                    MouseEventKind::Drag(MouseButton::Left) => self.viewer.pointer_move(x, y),
                    MouseEventKind::Up(MouseButton::Left) => self.viewer.pointer_up(),
                    _ => {}
                }
            }
            Event::Resize(width, height) => {
                self.surface = CellSurface::new(width as usize, height as usize);
            }
            _ => {}
        }
    }

    fn render(&mut self) -> io::Result<()> {
        self.viewer.render(&mut self.surface);

        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 0))?;

        self.surface.draw(&mut stdout)?;

        // Status line overlay
        let spin = if self.viewer.is_auto_rotating() {
            "on"
        } else {
            "off"
        };
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "Tentview | FPS: {:.1} | Spin: {} | Drag=Rotate Space=Spin R=Reset Q=Quit",
                self.fps, spin
            )),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}
