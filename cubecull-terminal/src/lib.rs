/// Terminal host for the cube hidden-surface renderer
///
/// Owns the event loop, the tick timer and the keyboard. Every frame is
/// produced by `cubecull_core::render_frame` into a [`CellSurface`].
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self},
};
use cubecull_core::{
    apply_command, render_frame, AnimationParams, AnimationState, Command, Mesh, RenderParams,
    Viewport,
};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};
use tracing::{debug, info};

pub mod renderer;

pub use renderer::CellSurface;

pub const TITLE: &str = "Cube hidden-surface demo";

/// Host-side configuration.
#[derive(Debug, Clone, Copy)]
pub struct TerminalConfig {
    pub render: RenderParams,
    pub animation: AnimationParams,
    /// Canvas units covered by one terminal column.
    pub cell_width: f32,
    /// Canvas units covered by one terminal row.
    pub cell_height: f32,
    pub start_paused: bool,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            render: RenderParams::default(),
            animation: AnimationParams::default(),
            cell_width: 8.0,
            cell_height: 16.0,
            start_paused: false,
        }
    }
}

/// What a key press asks the loop to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Quit,
    Command(Command),
    /// Unbound key; still triggers a redraw.
    Ignore,
}

/// Map a crossterm key event onto the core's command table.
pub fn key_action(key: &KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Esc => KeyAction::Quit,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => KeyAction::Quit,
        KeyCode::Char(c) => Command::from_key(c).map_or(KeyAction::Ignore, KeyAction::Command),
        KeyCode::Up => KeyAction::Command(Command::PitchUp),
        KeyCode::Down => KeyAction::Command(Command::PitchDown),
        KeyCode::Left => KeyAction::Command(Command::YawLeft),
        KeyCode::Right => KeyAction::Command(Command::YawRight),
        _ => KeyAction::Ignore,
    }
}

/// Main application struct for terminal 3D rendering
pub struct TerminalApp {
    mesh: Mesh,
    state: AnimationState,
    config: TerminalConfig,
    surface: CellSurface,
    quit: bool,
    dirty: bool,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(mesh: Mesh, config: TerminalConfig) -> io::Result<Self> {
        let (width, height) = terminal::size()?;

        Ok(Self {
            mesh,
            state: AnimationState {
                running: !config.start_paused,
                ..AnimationState::default()
            },
            config,
            surface: CellSurface::new(
                width as usize,
                height as usize,
                config.cell_width,
                config.cell_height,
            ),
            quit: false,
            dirty: true,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        })
    }

    pub fn state(&self) -> &AnimationState {
        &self.state
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            stdout(),
            terminal::EnterAlternateScreen,
            terminal::SetTitle(TITLE),
            cursor::Hide
        )?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let tick = self.config.animation.tick_interval;
        let mut next_tick = Instant::now() + tick;
        info!(tick_ms = tick.as_millis() as u64, "terminal loop started");

        while !self.quit {
            // Wait for input until the next tick is due
            let timeout = next_tick.saturating_duration_since(Instant::now());
            if event::poll(timeout)? {
                self.handle_event(event::read()?);
            }

            // Update
            let now = Instant::now();
            if now >= next_tick {
                next_tick = now + tick;
                self.on_tick();
            }

            // Render
            if self.dirty && !self.quit {
                self.render()?;
                self.dirty = false;
            }
        }

        Ok(())
    }

    fn on_tick(&mut self) {
        if self.state.running {
            self.state = self.state.tick(&self.config.animation);
            self.dirty = true;
        }
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => {
                match key_action(&key) {
                    KeyAction::Quit => self.quit = true,
                    KeyAction::Command(command) => {
                        self.state = apply_command(command, self.state, &self.config.animation);
                        debug!(?command, rotation = ?self.state.rotation, "key command");
                    }
                    KeyAction::Ignore => {}
                }
                self.dirty = true;
            }
            Event::Resize(width, height) => {
                self.surface.resize(width as usize, height as usize);
                self.dirty = true;
            }
            _ => {}
        }
    }

    fn render(&mut self) -> io::Result<()> {
        let (width, height) = self.surface.extent();
        render_frame(
            &mut self.surface,
            &self.mesh,
            &self.state.rotation,
            &Viewport::new(width, height),
            &self.config.render,
        );

        // Output to terminal
        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 0))?;

        self.surface.draw(&mut stdout)?;

        // Draw UI overlay
        let rotation = self.state.rotation;
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Black),
            Print(format!(
                "{TITLE} | FPS: {:.1} | X {:.0} Y {:.0} Z {:.0}{} | W/S A/D Q/E rotate, Space pause, R reset, Esc quit",
                self.fps,
                rotation.about_x,
                rotation.about_y,
                rotation.about_z,
                if self.state.running { "" } else { " (paused)" },
            )),
            ResetColor
        )?;

        stdout.flush()?;

        // Update FPS counter
        self.frame_count += 1;
        let now = Instant::now();
        if now - self.last_frame >= Duration::from_secs(1) {
            self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
            self.frame_count = 0;
            self.last_frame = now;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(key_action(&press(KeyCode::Esc)), KeyAction::Quit);
        assert_eq!(
            key_action(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            KeyAction::Quit
        );
        assert_eq!(
            key_action(&press(KeyCode::Char('q'))),
            KeyAction::Command(Command::RollLeft)
        );
        assert_eq!(
            key_action(&press(KeyCode::Char(' '))),
            KeyAction::Command(Command::ToggleAnimation)
        );
        assert_eq!(
            key_action(&press(KeyCode::Left)),
            KeyAction::Command(Command::YawLeft)
        );
        assert_eq!(key_action(&press(KeyCode::Char('z'))), KeyAction::Ignore);
        assert_eq!(key_action(&press(KeyCode::Tab)), KeyAction::Ignore);
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = TerminalConfig::default();
        assert!(config.render.validate().is_ok());
        assert!(config.animation.validate().is_ok());
        assert!(!config.start_paused);
    }
}
