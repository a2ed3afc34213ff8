//! Terminal runner (default binary).
//!
//! Plays the game in the terminal with crossterm input and the framebuffer
//! renderer. `--headless` runs a gravity-only game without a terminal and
//! prints a JSON summary.

use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use serde::Serialize;

use tui_blockfall::core::{GameConfig, GameObserver, GamePhase, GameState};
use tui_blockfall::input::{handle_key_event, should_quit, InputHandler};
use tui_blockfall::term::{FrameBuffer, GameView, PaintBuffer, TerminalRenderer, Viewport};
use tui_blockfall::types::{GameAction, PieceKind, FRAME_MS};

#[derive(Parser, Debug)]
#[command(name = "tui-blockfall", about = "Falling-block puzzle in the terminal")]
struct Args {
    /// Seed for the piece sequence (defaults to the clock).
    #[arg(long)]
    seed: Option<u32>,

    /// Field width in cells.
    #[arg(long, default_value_t = tui_blockfall::types::FIELD_WIDTH)]
    width: i32,

    /// Field height in cells.
    #[arg(long, default_value_t = tui_blockfall::types::FIELD_HEIGHT)]
    height: i32,

    /// Initial fall interval in milliseconds.
    #[arg(long, default_value_t = tui_blockfall::types::INITIAL_DROP_MS)]
    drop_ms: f64,

    /// Simulate without a terminal and print a JSON summary.
    #[arg(long)]
    headless: bool,

    /// Simulated time limit for --headless, in milliseconds.
    #[arg(long, default_value_t = 3_600_000)]
    max_ms: u64,
}

#[derive(Debug, Serialize)]
struct RunSummary {
    seed: u32,
    width: i32,
    height: i32,
    simulated_ms: u64,
    finished: bool,
    pieces_locked: u32,
    rows_cleared: u32,
    final_score: u32,
}

/// Prints phase and score changes as bracketed log lines.
struct ConsoleLog {
    started: Instant,
}

impl GameObserver for ConsoleLog {
    fn score_changed(&mut self, score: u32) {
        eprintln!("[Blockfall] score={} t={}ms", score, self.started.elapsed().as_millis());
    }

    fn phase_changed(&mut self, phase: GamePhase) {
        eprintln!("[Blockfall] phase={} t={}ms", phase.as_str(), self.started.elapsed().as_millis());
    }

    fn next_piece_changed(&mut self, kind: PieceKind) {
        eprintln!("[Blockfall] next={} t={}ms", kind.as_str(), self.started.elapsed().as_millis());
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(clock_seed);
    let config = GameConfig {
        width: args.width,
        height: args.height,
        initial_drop_ms: args.drop_ms,
        ..GameConfig::default()
    };
    let game = GameState::with_config(config, seed)?;

    if args.headless {
        return run_headless(game, seed, args.max_ms);
    }

    let mut term = TerminalRenderer::new();
    term.enter()?;
    let result = run(&mut term, game);
    // Always try to restore terminal state.
    let _ = term.exit();

    let score = result?;
    println!("[Blockfall] seed={} last score={}", seed, score);
    Ok(())
}

fn clock_seed() -> u32 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}

fn run_headless(mut game: GameState, seed: u32, max_ms: u64) -> Result<()> {
    game.set_observer(Box::new(ConsoleLog {
        started: Instant::now(),
    }));
    eprintln!("[Blockfall] headless run seed={}", seed);

    game.request_start();
    let mut simulated_ms = 0u64;
    while game.phase() != GamePhase::Idle && simulated_ms < max_ms {
        game.tick(FRAME_MS)?;
        simulated_ms += u64::from(FRAME_MS);
    }

    let finished = game.phase() == GamePhase::Idle;
    let summary = RunSummary {
        seed,
        width: game.field().width(),
        height: game.field().height(),
        simulated_ms,
        finished,
        pieces_locked: game.pieces_locked(),
        rows_cleared: game.rows_cleared(),
        final_score: if finished { game.last_score() } else { game.score() },
    };
    println!("{}", serde_json::to_string(&summary)?);
    Ok(())
}

fn run(term: &mut TerminalRenderer, mut game: GameState) -> Result<u32> {
    let paint = PaintBuffer::shared(game.field().width(), game.field().height());
    game.set_cell_observer(Box::new(paint.clone()));

    let view = GameView::default();
    let mut input = InputHandler::with_repeat_ms(game.config().key_repeat_ms);
    let mut fb = FrameBuffer::new(0, 0);

    let frame = Duration::from_millis(u64::from(FRAME_MS));
    let mut last_tick = Instant::now();

    loop {
        let timeout = frame.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => match key.kind {
                    KeyEventKind::Press | KeyEventKind::Repeat => {
                        if should_quit(key) {
                            return Ok(game.last_score().max(game.score()));
                        }
                        if let Some(action) = input.handle_key_press(key.code) {
                            game.apply_action(action);
                        }
                        match handle_key_event(key) {
                            // Held keys go through the input handler above.
                            Some(GameAction::MoveLeft | GameAction::MoveRight | GameAction::SoftDropOn) | None => {}
                            Some(action) => {
                                if key.kind == KeyEventKind::Press {
                                    if action == GameAction::Pause {
                                        input.reset();
                                    }
                                    game.apply_action(action);
                                }
                            }
                        }
                    }
                    KeyEventKind::Release => {
                        if let Some(action) = input.handle_key_release(key.code) {
                            game.apply_action(action);
                        }
                    }
                },
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        let elapsed = last_tick.elapsed();
        if elapsed < frame {
            continue;
        }
        last_tick = Instant::now();
        let elapsed_ms = elapsed.as_millis().min(u128::from(u32::MAX)) as u32;

        for action in input.update(elapsed_ms) {
            game.apply_action(action);
        }
        game.tick(elapsed_ms)?;

        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&paint.borrow(), &game.snapshot(), Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;
    }
}
