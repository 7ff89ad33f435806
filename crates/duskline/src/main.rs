use std::fs::File;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use duskline_config::SceneConfig;
use duskline_scene::{FrameHost, SkyAnimator, StopHandle, Surface};
use ratatui::DefaultTerminal;

mod glyphs;
mod paint;
mod surface;

use paint::SceneView;
use surface::TerminalSurface;

/// Frame budget: roughly one display refresh.
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    init_logging()?;
    let config = SceneConfig::builtin()?;
    let terminal = ratatui::init();
    let result = App::new(config, terminal).run();
    ratatui::restore();
    result
}

/// Route log output to the file named by `DUSKLINE_LOG`.
///
/// The terminal owns stdout and stderr while the scene is drawn, so
/// without the variable logging stays off.
fn init_logging() -> color_eyre::Result<()> {
    let Some(path) = std::env::var_os("DUSKLINE_LOG") else {
        return Ok(());
    };
    let file = File::create(path)?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()?;
    Ok(())
}

/// The main application: owns the terminal and drives the animator.
pub struct App {
    /// Is the application running?
    running: bool,
    config: SceneConfig,
    terminal: DefaultTerminal,
    surface: TerminalSurface,
    started: Instant,
    /// Stops the animator when the user quits.
    stop: StopHandle,
    /// First terminal error, reported once the loop has ended.
    error: Option<color_eyre::Report>,
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(config: SceneConfig, terminal: DefaultTerminal) -> Self {
        Self {
            running: false,
            config,
            terminal,
            surface: TerminalSurface::new(),
            started: Instant::now(),
            stop: StopHandle::default(),
            error: None,
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self) -> color_eyre::Result<()> {
        let mut animator = SkyAnimator::new(self.config.clone(), rand::rng());
        self.stop = animator.stop_handle();
        self.running = true;

        let frames = animator.run(&mut self);
        log::info!("stopped after {frames} frames");

        match self.error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Draws the current state of the surface.
    fn draw(&mut self) -> color_eyre::Result<()> {
        let view = SceneView::new(&self.surface, &self.config);
        self.terminal
            .draw(|frame| frame.render_widget(view, frame.area()))?;
        Ok(())
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// Polling doubles as frame pacing.
    fn handle_crossterm_events(&mut self) -> color_eyre::Result<()> {
        if event::poll(FRAME_INTERVAL)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::Resize(_, _) => {}
                _ => {}
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            _ => {}
        }
    }

    /// Set running to false and stop the animator.
    fn quit(&mut self) {
        self.running = false;
        self.stop.stop();
    }

    fn fail(&mut self, err: color_eyre::Report) {
        log::error!("terminal error: {err}");
        self.error = Some(err);
        self.quit();
    }
}

impl FrameHost for App {
    fn next_frame(&mut self) -> Option<f64> {
        if let Err(err) = self.draw() {
            self.fail(err);
        }
        if self.running {
            if let Err(err) = self.handle_crossterm_events() {
                self.fail(err);
            }
        }
        if !self.running {
            return None;
        }
        let now = self.started.elapsed().as_secs_f64() * 1000.0;
        self.surface.advance(now);
        Some(now)
    }

    fn surface(&mut self) -> Option<&mut dyn Surface> {
        Some(&mut self.surface)
    }
}
