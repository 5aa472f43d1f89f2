//! Blockfall terminal runner (default binary).
//!
//! Owns the one engine, ticks it every `delay_ms` and feeds it key presses in
//! between. Uses crossterm for input and a framebuffer-based renderer.

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event};

use blockfall::config::{self, USAGE};
use blockfall::core::{Engine, GameSnapshot};
use blockfall::input::{handle_key_event, is_press, should_quit};
use blockfall::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use blockfall::types::GameConfig;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(game_config) = config::resolve(&args, rand::random::<u32>())? else {
        println!("{}", USAGE);
        return Ok(());
    };
    let mut engine = Engine::new(game_config).context("start game")?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut engine);

    // Always try to restore terminal state.
    let _ = term.exit();

    report(engine.config(), &engine.snapshot());
    result
}

fn run(term: &mut TerminalRenderer, engine: &mut Engine) -> Result<()> {
    let view = GameView::new(engine.catalog());
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut last_tick = Instant::now();

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        engine.snapshot_into(&mut snap);
        view.render_into(&snap, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        let tick_duration = Duration::from_millis(engine.delay_ms() as u64);
        let timeout = tick_duration.saturating_sub(last_tick.elapsed());

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if is_press(&key) => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        engine.apply_action(action);
                    }
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            engine.tick();
        }
    }
}

fn report(config: &GameConfig, snap: &GameSnapshot) {
    eprintln!(
        "[blockfall] {}x{} seed={} rotation={} game-over={} score={} level={} lines={} pieces={}{}",
        config.cols,
        config.rows,
        config.seed,
        config.rotation.as_str(),
        config.game_over.as_str(),
        snap.score,
        snap.level,
        snap.lines,
        snap.pieces_spawned,
        if snap.game_over { " (game over)" } else { "" },
    );
}
