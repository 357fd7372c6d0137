//! Terminal Flappy Bird runner (default binary).
//!
//! This is the gameplay entrypoint. It uses crossterm for input and a
//! framebuffer-based renderer, driving the simulation at a fixed 16 ms tick:
//! drain input, step the world, draw, sleep in the event poll until the next
//! tick is due.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use tui_flappy::core::GameState;
use tui_flappy::input::{handle_key_event, should_quit};
use tui_flappy::term::{GameView, RenderThrottle, TerminalRenderer, Viewport};
use tui_flappy::types::TICK_MS;

/// Redraw interval for frozen (paused / game-over) frames.
const STATIC_REDRAW_MS: u64 = 250;

fn main() -> Result<()> {
    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer) -> Result<()> {
    let mut game = GameState::new(clock_seed());
    let view = GameView::default();
    let mut throttle = RenderThrottle::new(STATIC_REDRAW_MS);

    let started = Instant::now();
    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let viewport = Viewport::new(w, h);
        let is_static = game.game_over() || game.paused();
        let now_ms = started.elapsed().as_millis() as u64;
        if throttle.should_render(now_ms, frame_fingerprint(&game, viewport), is_static) {
            let mut fb = view.render(&game, viewport);
            term.draw_swap(&mut fb)?;
        }

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        game.apply_action(action);
                    }
                }
                Event::Resize(..) => {
                    term.invalidate();
                }
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            game.tick();
        }
    }
}

/// Fingerprint of everything a frozen frame can show; a change forces a
/// redraw through the static-frame throttle (e.g. on terminal resize).
fn frame_fingerprint(game: &GameState, viewport: Viewport) -> u64 {
    let mut hasher = DefaultHasher::new();
    game.score().hash(&mut hasher);
    game.game_over().hash(&mut hasher);
    game.paused().hash(&mut hasher);
    viewport.width.hash(&mut hasher);
    viewport.height.hash(&mut hasher);
    hasher.finish()
}

/// Seed each session from the wall clock so runs differ between launches.
fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos().wrapping_add(d.as_secs() as u32))
        .unwrap_or(1)
}
