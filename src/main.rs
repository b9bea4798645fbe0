//! Terminal falling-block game (default binary).
//!
//! Fixed-timestep loop: render, poll input until the next tick, then apply
//! held-key repeats and gravity. The best score is read at startup and written
//! whenever a game ends with a new high.

use std::path::PathBuf;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};

use blockfall::core::GameSnapshot;
use blockfall::engine::{FileSlot, MemorySlot, ScoreSlot, Session, Weights};
use blockfall::input::{should_quit, InputHandler};
use blockfall::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use blockfall::types::{GameAction, TICK_MS};

/// Milliseconds between demo-mode placements.
const DEMO_STEP_MS: u32 = 160;

/// Falling-block puzzle in the terminal.
#[derive(Debug, Parser)]
#[command(
    name = "blockfall",
    version,
    about = "Falling-block puzzle in the terminal. Clear full rows to score.",
    long_about = "Falling-block puzzle in the terminal. Clear full rows to score.\n\n\
        CONTROLS:\n  Left/h/a  Move left    Right/l/d  Move right   Down/j/s  Soft drop\n  \
        Up/k/w/x  Rotate CW    z/y        Rotate CCW   Space     Hard drop\n  \
        Enter     Start        p          Pause        r         Restart\n  \
        q / Esc   Quit"
)]
struct Args {
    /// Seed for the piece sequence. Defaults to one derived from the clock.
    #[arg(long, env = "BLOCKFALL_SEED", value_name = "N")]
    seed: Option<u32>,

    /// File holding the best score. Defaults to $XDG_CONFIG_HOME/blockfall/best_score.
    #[arg(long, env = "BLOCKFALL_BEST_FILE", value_name = "PATH")]
    best_file: Option<PathBuf>,

    /// Keep the best score in memory only.
    #[arg(long, env = "BLOCKFALL_NO_PERSIST")]
    no_persist: bool,

    /// Start playing immediately instead of waiting for Enter.
    #[arg(long, env = "BLOCKFALL_AUTOSTART")]
    autostart: bool,

    /// Let the computer play.
    #[arg(long, env = "BLOCKFALL_DEMO")]
    demo: bool,
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}

fn main() -> Result<()> {
    let args = Args::parse();

    let slot: Box<dyn ScoreSlot> = if args.no_persist {
        Box::new(MemorySlot::new())
    } else {
        Box::new(args.best_file.map(FileSlot::new).unwrap_or_default())
    };
    let mut session = Session::open(args.seed.unwrap_or_else(clock_seed), slot);
    if args.autostart || args.demo {
        session.apply_action(GameAction::Start);
    }

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut session, args.demo);

    // Always try to restore terminal state.
    let _ = term.exit();

    if let Some(err) = session.take_store_error() {
        eprintln!("blockfall: could not save best score: {err}");
    }
    result
}

fn run<S: ScoreSlot>(term: &mut TerminalRenderer, session: &mut Session<S>, demo: bool) -> Result<()> {
    let view = GameView::default();
    let mut input = InputHandler::new();
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = GameSnapshot::default();
    let weights = Weights::default();

    let tick_duration = Duration::from_millis(TICK_MS as u64);
    let mut last_tick = Instant::now();
    let mut demo_timer_ms = 0;

    loop {
        session.snapshot_into(&mut snap);
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&snap, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        let timeout = tick_duration.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => match key.kind {
                    KeyEventKind::Press => {
                        if should_quit(key) {
                            return Ok(());
                        }
                        if let Some(action) = input.handle_key_press(key) {
                            session.apply_action(action);
                        }
                    }
                    // DAS/ARR produces repeats; terminal auto-repeat is ignored.
                    KeyEventKind::Repeat => {}
                    KeyEventKind::Release => input.handle_key_release(key),
                },
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();

            for action in input.update(TICK_MS) {
                session.apply_action(action);
            }

            if demo {
                demo_timer_ms += TICK_MS;
                if demo_timer_ms >= DEMO_STEP_MS {
                    demo_timer_ms = 0;
                    session.autoplay_step(&weights);
                }
            }

            session.tick(TICK_MS);
        }
    }
}
