//! Terminal M4TCH runner (default binary).
//!
//! Uses crossterm for keyboard and mouse input and the framebuffer-based
//! renderer from `m4tch::term`. The session advances on a fixed timestep;
//! at most one selection is queued per frame.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event};

use m4tch::app::App;
use m4tch::config::{init_logging, AppConfig};
use m4tch::input::{handle_key_event, mouse_click, should_quit};
use m4tch::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};

fn main() -> Result<()> {
    let config = AppConfig::from_env()?;
    init_logging(&config)?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &config);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer, config: &AppConfig) -> Result<()> {
    let mut app = App::new(config);
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);

    let tick_duration = Duration::from_millis(config.tick_ms as u64);
    let mut last_tick = Instant::now();

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let viewport = Viewport::new(w, h);
        view.render_into(&app.snapshot(), &app.hud(), viewport, &mut fb);
        term.present(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        app.apply(action);
                    }
                }
                Event::Mouse(mouse) => {
                    let point = mouse_click(mouse)
                        .and_then(|(column, row)| view.pointer_to_grid(viewport, column, row));
                    if let Some((x, y)) = point {
                        app.click(x, y);
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            app.tick(config.tick_ms);
        }
    }
}
