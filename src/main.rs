//! Terminal runner (default binary).
//!
//! Usage: `brickfall [config.json]`
//!
//! Samples input and ticks the engine about 60 times a second, then redraws
//! through the framebuffer renderer. Set `BRICKFALL_LOG=<path>` to write logs
//! to a file (the terminal itself is busy drawing the game) and
//! `BRICKFALL_LOG_LEVEL` to change the level (default `info`).

use std::fs::File;
use std::str::FromStr;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{
    self, Event, KeyEventKind, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
    PushKeyboardEnhancementFlags,
};
use crossterm::{execute, terminal};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use tracing::{debug, info, Level};
use tracing_subscriber::prelude::*;

use brickfall::core::{EngineConfig, FieldEvent, GameEngine, GameSnapshot};
use brickfall::input::{should_quit, InputHandler};
use brickfall::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};

const FRAME: Duration = Duration::from_millis(16);

fn main() -> Result<()> {
    init_logging()?;

    let config = load_config()?;
    let mut engine = GameEngine::new(config, SmallRng::from_os_rng())?;
    info!(
        width = config.field_width,
        height = config.field_height,
        "starting"
    );

    let mut term = TerminalRenderer::new();
    term.enter()?;
    let enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false);
    debug!(enhanced, "keyboard enhancement");

    let result = push_keyboard_enhancement(enhanced)
        .and_then(|()| run(&mut term, &mut engine, InputHandler::for_terminal(enhanced)));

    // Always try to restore terminal state.
    if enhanced {
        let _ = execute!(std::io::stdout(), PopKeyboardEnhancementFlags);
    }
    let _ = term.exit();
    info!(score = engine.score(), level = engine.level(), "exiting");
    result
}

/// Ask for release events so held keys end on release instead of a timeout.
fn push_keyboard_enhancement(enhanced: bool) -> Result<()> {
    if enhanced {
        execute!(
            std::io::stdout(),
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        )?;
    }
    Ok(())
}

fn init_logging() -> Result<()> {
    let Ok(path) = std::env::var("BRICKFALL_LOG") else {
        return Ok(());
    };
    let level = match std::env::var("BRICKFALL_LOG_LEVEL") {
        Ok(name) => Level::from_str(&name).with_context(|| format!("bad log level {name:?}"))?,
        Err(_) => Level::INFO,
    };
    let file = File::create(&path).with_context(|| format!("creating log file {path}"))?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(level))
        .init();
    Ok(())
}

fn load_config() -> Result<EngineConfig> {
    let Some(path) = std::env::args().nth(1) else {
        return Ok(EngineConfig::default());
    };
    let text =
        std::fs::read_to_string(&path).with_context(|| format!("reading config {path}"))?;
    let config: EngineConfig =
        serde_json::from_str(&text).with_context(|| format!("parsing config {path}"))?;
    Ok(config)
}

fn run(
    term: &mut TerminalRenderer,
    engine: &mut GameEngine,
    mut input: InputHandler,
) -> Result<()> {
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = GameSnapshot::default();

    let start = Instant::now();
    let mut last_frame = start;

    loop {
        let timeout = FRAME.saturating_sub(last_frame.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => match key.kind {
                    KeyEventKind::Press => {
                        if should_quit(key) {
                            return Ok(());
                        }
                        input.handle_key_press(key.code, Instant::now());
                    }
                    KeyEventKind::Repeat => input.handle_key_repeat(key.code, Instant::now()),
                    KeyEventKind::Release => input.handle_key_release(key.code),
                },
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        if last_frame.elapsed() < FRAME {
            continue;
        }
        last_frame = Instant::now();

        let outcome = engine.tick_at(
            last_frame.duration_since(start).as_secs_f64(),
            input.snapshot(last_frame),
        );
        for event in &outcome.events {
            match event {
                FieldEvent::Stamped { figure_id, kind, .. } => {
                    debug!(figure_id, %kind, "figure settled")
                }
                FieldEvent::Cleared => info!("field cleared"),
                FieldEvent::Spawned { .. } | FieldEvent::RowRemoved { .. } => {}
            }
        }
        if outcome.lines_cleared > 0 {
            info!(
                lines = outcome.lines_cleared,
                score = engine.score(),
                "lines cleared"
            );
        }

        engine.snapshot_into(&mut snap);
        let (w, h) = terminal::size().unwrap_or((80, 24));
        view.render_into(&snap, Viewport::new(w, h), &mut fb);
        term.draw(&fb)?;
    }
}
