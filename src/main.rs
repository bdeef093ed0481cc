//! Terminal 2048 runner (default binary).
//!
//! Blocking event loop: render, wait for a key, feed the session. The
//! slide is presented for `travel_ms` before merges are applied, which is
//! the engine's animation-completion gate.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};

use tui_2048::core::{Catalog, GameConfig, Session, ShiftOutcome};
use tui_2048::input::{handle_key_event, should_quit};
use tui_2048::term::{GameView, TerminalRenderer, Viewport};
use tui_2048::types::{
    GameAction, DEFAULT_FOUR_CHANCE_PCT, DEFAULT_HEIGHT, DEFAULT_TRAVEL_MS, DEFAULT_WIDTH,
    DEFAULT_WIN_VALUE,
};

#[derive(Debug, Parser)]
#[command(name = "tui-2048", about = "Terminal 2048")]
struct Args {
    /// Board width in cells
    #[arg(long, default_value_t = DEFAULT_WIDTH)]
    width: u8,

    /// Board height in cells
    #[arg(long, default_value_t = DEFAULT_HEIGHT)]
    height: u8,

    /// Tile value that wins the game
    #[arg(long, default_value_t = DEFAULT_WIN_VALUE)]
    win: u32,

    /// Chance in percent that a spawned tile is a 4
    #[arg(long, default_value_t = DEFAULT_FOUR_CHANCE_PCT)]
    four_chance: u8,

    /// Slide animation duration in milliseconds
    #[arg(long, default_value_t = DEFAULT_TRAVEL_MS)]
    travel_ms: u64,

    /// RNG seed (defaults to a clock-derived value)
    #[arg(long)]
    seed: Option<u32>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = GameConfig {
        width: args.width,
        height: args.height,
        win_value: args.win,
        four_chance_pct: args.four_chance,
        travel_ms: args.travel_ms,
    };
    let seed = args.seed.unwrap_or_else(clock_seed);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, config, seed);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer, config: GameConfig, seed: u32) -> Result<()> {
    let mut session = Session::new(config, Catalog::standard(), seed)?;
    session.start()?;

    let view = GameView::default();
    let travel = Duration::from_millis(config.travel_ms);

    loop {
        render(term, &view, &mut session)?;

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if should_quit(key) {
                    return Ok(());
                }
                match handle_key_event(key) {
                    Some(GameAction::Shift(dir)) => {
                        if session.command(dir) == ShiftOutcome::Accepted {
                            // Show the slid board, hold for the travel
                            // time, then let merges and the spawn land.
                            render(term, &view, &mut session)?;
                            std::thread::sleep(travel);
                            session.complete_move()?;
                        }
                    }
                    Some(GameAction::Restart) => session.restart()?,
                    None => {}
                }
            }
            Event::Resize(..) => {
                // Next loop iteration re-renders at the new size.
            }
            _ => {}
        }
    }
}

fn render(term: &mut TerminalRenderer, view: &GameView, session: &mut Session) -> Result<()> {
    // This runner repaints whole frames, so per-tile events are only
    // drained to keep the queue from growing.
    session.take_events();

    let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
    let fb = view.render(&session.snapshot(), session.catalog(), Viewport::new(w, h));
    term.draw(&fb)?;
    Ok(())
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| (d.as_secs() as u32) ^ d.subsec_nanos())
        .unwrap_or(1)
}
