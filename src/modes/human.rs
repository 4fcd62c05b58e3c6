use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::{Duration, Instant};
use tokio::time::interval;

use crate::game::{Direction, GameConfig, GameEngine, GameState, InputSnapshot, Viewport};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::renderer::Renderer;
use crate::render::scene;

/// Rows reserved above and below the game grid: header, footer, grid frame
const CHROME_ROWS: u16 = 8;

pub struct HumanMode {
    engine: GameEngine,
    state: GameState,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
    /// Direction keys seen since the last frame sample
    held: InputSnapshot,
    viewport: Viewport,
    last_frame: Instant,
}

impl HumanMode {
    pub fn new(config: GameConfig) -> Self {
        let cell_size = config.cell_size;
        let mut engine = GameEngine::new(config);
        // Placeholder until the terminal size is known
        let viewport = engine.clamp_viewport(Viewport::new(0, 0));
        let state = engine.reset(viewport);

        Self {
            engine,
            state,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(cell_size),
            input_handler: InputHandler::new(),
            should_quit: false,
            held: InputSnapshot::default(),
            viewport,
            last_frame: Instant::now(),
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // Frames at 60 Hz; the engine's own move interval decides when the
        // snake actually advances
        let frame_interval = Duration::from_millis(16);
        let mut frame_timer = interval(frame_interval);

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        self.last_frame = Instant::now();

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event);
                    }
                }

                // Game frame: sample input, feed the real elapsed time in
                _ = frame_timer.tick() => {
                    let raw = Self::viewport_from_terminal(terminal, self.engine.config())?;
                    self.viewport = self.engine.clamp_viewport(raw);
                    self.update_game();
                }

                // Render frame
                _ = render_timer.tick() => {
                    let commands = scene::compose(&self.state, self.viewport, self.engine.config());
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &commands, &self.metrics);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Viewport pixel size from the live terminal size. Queried every frame,
    /// so resizing the terminal resizes the playfield immediately.
    fn viewport_from_terminal(
        terminal: &Terminal<CrosstermBackend<Stderr>>,
        config: &GameConfig,
    ) -> Result<Viewport> {
        let size = terminal.size().context("Failed to query terminal size")?;

        // The grid gets 80% of the width at two columns per cell, and the
        // height minus the header/footer chrome at one row per cell
        let cols = (u32::from(size.width) * 8 / 10) / 2;
        let rows = u32::from(size.height.saturating_sub(CHROME_ROWS));

        Ok(Viewport::new(
            cols * config.cell_size,
            rows * config.cell_size,
        ))
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return;
            }

            match self.input_handler.handle_key_event(key) {
                KeyAction::Press(direction) => self.hold(direction),
                KeyAction::Restart => self.reset_game(),
                KeyAction::Quit => self.should_quit = true,
                KeyAction::None => {}
            }
        }
    }

    fn hold(&mut self, direction: Direction) {
        match direction {
            Direction::Up => self.held.up = true,
            Direction::Down => self.held.down = true,
            Direction::Left => self.held.left = true,
            Direction::Right => self.held.right = true,
        }
    }

    fn update_game(&mut self) {
        let now = Instant::now();
        let delta = now.duration_since(self.last_frame).as_secs_f64();
        self.last_frame = now;

        let input = std::mem::take(&mut self.held);
        let result = self.engine.update(&mut self.state, delta, &input, self.viewport);

        // A collision already reset the state; the finished run's score is
        // sitting in last_score
        if result.info.collision.is_some() {
            self.metrics.on_run_over(self.state.last_score);
            self.metrics.on_run_start();
        }
    }

    fn reset_game(&mut self) {
        let previous = self.state.score;
        self.state = self.engine.reset(self.viewport);
        self.state.last_score = previous;
        self.held = InputSnapshot::default();
        self.metrics.on_run_start();
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}
