//! Engine client - owns the engine board and speaks the engine's call interface
//!
//! The client is the only path from game code to the engine. It:
//!
//! - allocates the board on [`EngineClient::create`] and treats failure as fatal
//! - converts logical squares to engine indices and masks back into [`MoveMask`]
//! - re-reads and parses the status after every applied move
//! - runs best-move searches on a worker thread ([`EngineClient::spawn_best_move`])
//! - releases the board exactly once, either via [`EngineClient::destroy`] or on drop
//!
//! The board sits behind a `parking_lot::Mutex` so the search worker and the
//! game thread can share it. The game's processing guard keeps the two from
//! ever contending; the lock is there so that an accidental overlap blocks
//! instead of corrupting engine memory.

use super::backend::EngineBackend;
use super::status::{GameStatus, StatusError};
use crate::game::bitboard::{square_index, MoveMask};
use crate::game::types::{PromotionPiece, Side, Square, NO_PROMOTION};
use crossbeam_channel::Receiver;
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Errors raised by the engine client
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The engine could not allocate a board; the game cannot start
    #[error("Engine failed to allocate a board")]
    BoardAllocation,

    /// The board was used after it was released
    #[error("Engine board has already been destroyed")]
    Destroyed,

    /// The status payload could not be decoded
    #[error("Malformed engine status: {0}")]
    MalformedStatus(#[from] StatusError),

    /// The best-move search reported a failure
    #[error("Engine search failed: {message}")]
    Compute { message: String },

    /// The search worker thread could not be started
    #[error("Failed to start engine worker: {0}")]
    Spawn(#[source] std::io::Error),

    /// The search worker exited without sending a result (it panicked)
    #[error("Engine worker stopped without reporting a result")]
    WorkerDisconnected,
}

/// Result type alias for engine operations
pub type EngineResult<T> = Result<T, EngineError>;

struct EngineBoard<B> {
    backend: B,
    live: bool,
}

impl<B: EngineBackend> EngineBoard<B> {
    fn release(&mut self) {
        if self.live {
            self.backend.destroy_board();
            self.live = false;
            info!("[ENGINE] Board destroyed");
        }
    }
}

/// Handle-owning adapter over an [`EngineBackend`]
pub struct EngineClient<B: EngineBackend> {
    board: Arc<Mutex<EngineBoard<B>>>,
}

impl<B: EngineBackend> EngineClient<B> {
    /// Allocates the engine board
    ///
    /// # Errors
    ///
    /// [`EngineError::BoardAllocation`] when the backend cannot provide a board.
    pub fn create(mut backend: B) -> EngineResult<Self> {
        if !backend.create_board() {
            error!("[ENGINE] Failed to initialize the chess board from the engine");
            return Err(EngineError::BoardAllocation);
        }
        info!("[ENGINE] Board created");
        Ok(Self {
            board: Arc::new(Mutex::new(EngineBoard {
                backend,
                live: true,
            })),
        })
    }

    fn with_board<R>(&self, f: impl FnOnce(&mut B) -> R) -> EngineResult<R> {
        let mut board = self.board.lock();
        if !board.live {
            return Err(EngineError::Destroyed);
        }
        Ok(f(&mut board.backend))
    }

    /// Legal destinations for the piece on `square`, fetched fresh from the engine
    pub fn legal_moves(&self, square: Square) -> EngineResult<MoveMask> {
        let index = square_index(square);
        let mask = MoveMask(self.with_board(|b| b.valid_moves(index))?);
        debug!("[ENGINE] Legal moves from {}: {:?}", square, mask);
        Ok(mask)
    }

    /// Applies a move and immediately re-reads the engine status
    ///
    /// Both calls happen under one lock so nothing can slip between the move
    /// and the status read.
    pub fn apply_move(
        &self,
        from: Square,
        to: Square,
        promotion: Option<PromotionPiece>,
    ) -> EngineResult<GameStatus> {
        let source = square_index(from);
        let target = square_index(to);
        let promotion_char = promotion.map(PromotionPiece::as_char).unwrap_or(NO_PROMOTION);

        debug!(
            "[ENGINE] MakeMove {} ({}) -> {} ({}) promotion '{}'",
            from, source, to, target, promotion_char
        );
        let payload = self.with_board(|b| {
            b.make_move(source, target, promotion_char);
            b.board_json()
        })?;
        parse_status(&payload)
    }

    /// Current engine status
    pub fn status(&self) -> EngineResult<GameStatus> {
        let payload = self.with_board(|b| b.board_json())?;
        parse_status(&payload)
    }

    /// Starts the best-move search on a worker thread
    ///
    /// The returned receiver yields exactly one result, or disconnects if the
    /// worker dies without producing one.
    pub fn spawn_best_move(&self, depth: u8, side: Side) -> EngineResult<Receiver<EngineResult<()>>> {
        let (sender, receiver) = crossbeam_channel::bounded(1);
        let board = Arc::clone(&self.board);

        std::thread::Builder::new()
            .name("xfchess-ai-search".into())
            .spawn(move || {
                let result = run_search(&board, depth, side);
                // The game may have been torn down while we searched
                let _ = sender.send(result);
            })
            .map_err(EngineError::Spawn)?;

        Ok(receiver)
    }

    /// Releases the engine board. Safe to call any number of times.
    pub fn destroy(&self) {
        self.board.lock().release();
    }

    pub fn is_destroyed(&self) -> bool {
        !self.board.lock().live
    }
}

fn parse_status(payload: &str) -> EngineResult<GameStatus> {
    GameStatus::parse(payload).map_err(|e| {
        warn!("[ENGINE] Could not parse status payload '{}': {}", payload, e);
        EngineError::from(e)
    })
}

fn run_search<B: EngineBackend>(
    board: &Mutex<EngineBoard<B>>,
    depth: u8,
    side: Side,
) -> EngineResult<()> {
    let mut board = board.lock();
    if !board.live {
        return Err(EngineError::Destroyed);
    }
    board
        .backend
        .make_best_move(depth, side.is_white())
        .map_err(|message| EngineError::Compute { message })
}

impl<B: EngineBackend> Drop for EngineClient<B> {
    fn drop(&mut self) {
        self.destroy();
    }
}
