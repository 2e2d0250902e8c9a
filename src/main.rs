//! Headless console driver
//!
//! Plays a game against the native engine from the terminal. Human moves are
//! typed as coordinate pairs (`e2e4`); `resign` and `quit` end the session.
//! The board is printed after every move with White at the bottom unless
//! `--flip` is given.

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::info;
use xfchess_board::core::{snap_timer_minutes, GameConfig};
use xfchess_board::game::ai::AIDifficulty;
use xfchess_board::game::collaborators::{
    BoardRenderer, Collaborators, ErrorReporter, Headless, HighlightKind, PromotionPrompt,
};
use xfchess_board::game::resources::engine::NativeEngine;
use xfchess_board::game::resources::player::{PlayerKind, PromotionChoice};
use xfchess_board::game::types::{BoardState, Side, Square};
use xfchess_board::game::{BoardOrientation, GameError, GameOrchestrator, MoveOutcome};
use xfchess_board::init_tracing;

#[derive(Parser, Debug)]
#[command(name = "xfchess-board", about = "Play XFChess in the terminal")]
struct Args {
    /// JSON game config; the flags below override its fields
    #[arg(long)]
    config: Option<PathBuf>,

    /// Let the engine play White
    #[arg(long)]
    ai_white: bool,

    /// Play Black yourself instead of the engine
    #[arg(long)]
    human_black: bool,

    /// easy, medium or hard
    #[arg(long)]
    difficulty: Option<AIDifficulty>,

    /// Clock length in minutes (snapped to the nearest offered option)
    #[arg(long)]
    minutes: Option<u32>,

    /// Draw the board with Black at the bottom
    #[arg(long)]
    flip: bool,

    /// Default tracing filter when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log: String,
}

impl Args {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)
                .with_context(|| format!("loading game config from {}", path.display()))?,
            None => GameConfig::default(),
        };
        if self.ai_white {
            config.white = PlayerKind::Ai;
        }
        if self.human_black {
            config.black = PlayerKind::Human;
        }
        if let Some(difficulty) = self.difficulty {
            config.difficulty = difficulty;
        }
        if let Some(minutes) = self.minutes {
            config.timer_minutes = snap_timer_minutes(minutes);
        }
        if self.flip {
            config.bottom_is_white = false;
        }
        Ok(config)
    }
}

/// Prints the board as text
struct ConsoleBoard;

impl BoardRenderer for ConsoleBoard {
    fn render_board(&mut self, board: &BoardState, orientation: BoardOrientation) {
        println!();
        for row in 0..8u8 {
            let mut line = String::with_capacity(24);
            let mut rank_label = ' ';
            for col in 0..8u8 {
                let Some(display) = Square::new(row, col) else {
                    continue;
                };
                let logical = orientation.to_logical(display);
                if col == 0 {
                    rank_label = char::from(b'8' - logical.rank);
                }
                let cell = board
                    .piece_at(logical)
                    .map(|piece| piece.fen_char())
                    .unwrap_or('.');
                line.push(' ');
                line.push(cell);
            }
            println!("{}{}", rank_label, line);
        }
        let files: String = (0..8u8)
            .filter_map(|col| Square::new(0, col))
            .map(|display| {
                let file = orientation.to_logical(display).file;
                format!(" {}", char::from(b'a' + file))
            })
            .collect();
        println!(" {}", files);
    }

    fn highlight_squares(&mut self, _squares: &[Square], _kind: HighlightKind) {}

    fn clear_highlights(&mut self, _kind: HighlightKind) {}
}

/// Asks for the promotion piece on stdin
struct ConsolePrompt;

impl PromotionPrompt for ConsolePrompt {
    fn choose_promotion(&mut self, side: Side) -> PromotionChoice {
        print!("{} promotes - q, r, b or n (anything else cancels): ", side);
        let _ = io::stdout().flush();
        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return PromotionChoice::Cancelled;
        }
        answer
            .trim()
            .chars()
            .next()
            .map(|c| PromotionChoice::from_char(c.to_ascii_lowercase()))
            .unwrap_or(PromotionChoice::Cancelled)
    }
}

struct ConsoleErrors;

impl ErrorReporter for ConsoleErrors {
    fn report(&mut self, error: &GameError) {
        eprintln!("error: {}", error);
    }
}

fn parse_move(text: &str) -> Option<(Square, Square)> {
    let text = text.trim();
    if text.len() != 4 || !text.is_ascii() {
        return None;
    }
    Some((
        Square::from_algebraic(&text[..2])?,
        Square::from_algebraic(&text[2..])?,
    ))
}

/// Failures were already reported; only a move that never became a request
/// is illegal
fn is_illegal(outcome: Option<MoveOutcome>) -> bool {
    outcome.is_none()
}

/// One line from stdin, `None` at end of input
fn read_line() -> io::Result<Option<String>> {
    let mut line = String::new();
    match io::stdin().lock().read_line(&mut line)? {
        0 => Ok(None),
        _ => Ok(Some(line)),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args.log);

    let config = args.game_config()?;
    let collaborators = Collaborators {
        renderer: Box::new(ConsoleBoard),
        timer: Box::new(Headless),
        move_log: Box::new(Headless),
        promotion: Box::new(ConsolePrompt),
        errors: Box::new(ConsoleErrors),
    };

    let mut game = GameOrchestrator::new(config, NativeEngine::new(), collaborators)
        .context("starting the game")?;
    game.start();

    while !game.lifecycle().is_game_over() {
        if game.is_ai_pending() {
            game.wait_for_ai_move();
            continue;
        }
        if !game.is_synced() && game.refresh_status() == Some(MoveOutcome::Applied) {
            continue;
        }
        if game.is_ai_turn() {
            // The last search failed; let the player decide
            print!("AI move failed - retry or resign? ");
        } else {
            print!("{} to move: ", game.status().side_to_move());
        }
        io::stdout().flush()?;

        let Some(line) = read_line()? else {
            break;
        };
        match line.trim() {
            "quit" => break,
            "resign" => {
                let side = game.status().side_to_move();
                game.resign(side);
            }
            "retry" => {
                game.retry_ai_move();
            }
            text => match parse_move(text) {
                Some((from, to)) => {
                    let orientation = game.orientation();
                    game.handle_display_click(orientation.to_display(from));
                    let outcome = game.handle_display_click(orientation.to_display(to));
                    if outcome != Some(MoveOutcome::Applied) {
                        if let Some(selected) = game.selection().selected_square() {
                            game.handle_display_click(orientation.to_display(selected));
                        }
                    }
                    if is_illegal(outcome) {
                        println!("Illegal move: {}", text);
                    }
                }
                None => println!("Enter a move like e2e4, or resign / retry / quit"),
            },
        }
    }

    if let Some(reason) = game.lifecycle().reason() {
        println!("{} {}", reason.message(), reason.result());
    }
    println!("{}", game.move_log().movetext());
    info!("[GAME] Session ended after {} plies", game.move_log().ply_count());
    game.shutdown();
    Ok(())
}
