//! Game orchestrator - owns the game and drives every move through it
//!
//! The orchestrator is the single place where game state changes. It owns the
//! engine client, the latest [`GameStatus`] (and with it the board), the
//! selection, the processing guard and the game lifecycle, and it drives the
//! outward collaborators (renderer, clock, move log, promotion prompt, error
//! reporter) plus the [`EventBus`].
//!
//! # Move Paths
//!
//! **Human**: pointer -> display square -> logical square -> selection state
//! machine -> [`GameOrchestrator::apply_human_move`] -> promotion prompt (if
//! needed) -> engine apply + status re-read -> commit.
//!
//! **AI**: [`GameOrchestrator::run_ai_move_if_due`] spawns the search on a
//! worker thread and parks a [`PendingAIMove`]. The orchestration thread picks
//! the result up with [`GameOrchestrator::poll_ai_move`] (once per frame) or
//! [`GameOrchestrator::wait_for_ai_move`] (blocking) and commits it there.
//!
//! # Commit Protocol
//!
//! Every applied move goes through the same steps, in order:
//!
//! 1. replace the status (board included) wholesale and redraw
//! 2. record the move in the log and notify the move-log collaborator
//! 3. switch the clock to the side now to move
//! 4. check for game end
//! 5. release the processing guard, then trigger the AI if it is now due
//!
//! A status payload that fails to parse stops the protocol at step 1 with the
//! last good status still in place. The engine has already applied the move by
//! then, so the game is marked unsynced: input and AI searches are held until
//! [`GameOrchestrator::refresh_status`] reads a good payload and commits the
//! move it missed.
//!
//! # Re-entrancy
//!
//! Human moves and AI searches both hold a [`ProcessingToken`] while they run.
//! A click or AI trigger arriving while a token is out is dropped without
//! touching the engine.

use crate::core::GameConfig;
use crate::game::ai::{AIStatistics, CompletedAIMove, PendingAIMove};
use crate::game::collaborators::{Collaborators, HighlightKind};
use crate::game::coordinates::BoardOrientation;
use crate::game::error::{GameError, GameResult};
use crate::game::events::{EventBus, GameEvent};
use crate::game::resources::engine::{EngineBackend, EngineClient, EngineError, GameStatus};
use crate::game::resources::game_over::{GameLifecycle, GameOverReason};
use crate::game::resources::history::MoveLog;
use crate::game::resources::player::{promoting_side, PromotionChoice};
use crate::game::resources::selection::{Selection, SelectionEffect};
use crate::game::resources::turn::{ProcessingGuard, ProcessingToken};
use crate::game::types::{BoardState, Side, Square};
use crate::input::BoardGeometry;
use crossbeam_channel::Receiver;
use tracing::{debug, info, warn};
use web_time::Instant;

/// What became of a requested move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The move reached the engine and the new status was committed
    Applied,
    /// Rejected before any engine call (busy, wrong turn, game over)
    Ignored,
    /// The promotion prompt was dismissed; nothing changed
    Cancelled,
    /// An engine or status error was reported; the last good state remains
    Failed,
}

pub struct GameOrchestrator<B: EngineBackend> {
    config: GameConfig,
    orientation: BoardOrientation,
    engine: EngineClient<B>,
    status: GameStatus,
    selection: Selection,
    guard: ProcessingGuard,
    lifecycle: GameLifecycle,
    pending_ai: Option<PendingAIMove>,
    /// Side whose move the engine applied but whose status was never read
    unsynced_mover: Option<Side>,
    move_log: MoveLog,
    ai_stats: AIStatistics,
    collaborators: Collaborators,
    events: EventBus,
}

impl<B: EngineBackend> GameOrchestrator<B> {
    /// Sets up a game on a fresh engine board
    ///
    /// # Errors
    ///
    /// Fails when the config is invalid, the engine cannot allocate a board,
    /// or the initial status cannot be read. None of these are recoverable.
    pub fn new(config: GameConfig, backend: B, collaborators: Collaborators) -> GameResult<Self> {
        config.validate()?;
        let engine = EngineClient::create(backend)?;
        let status = engine.status()?;

        info!(
            "[GAME] New game: White {:?}, Black {:?}, difficulty {}, {} min",
            config.white, config.black, config.difficulty, config.timer_minutes
        );

        let mut orchestrator = Self {
            orientation: BoardOrientation::from_bottom_side(config.bottom_is_white),
            config,
            engine,
            status,
            selection: Selection::Idle,
            guard: ProcessingGuard::default(),
            lifecycle: GameLifecycle::Ongoing,
            pending_ai: None,
            unsynced_mover: None,
            move_log: MoveLog::default(),
            ai_stats: AIStatistics::default(),
            collaborators,
            events: EventBus::default(),
        };

        orchestrator.render();
        let side = orchestrator.status.side_to_move();
        orchestrator.collaborators.timer.switch_active_side(side);
        Ok(orchestrator)
    }

    /// Begins play
    ///
    /// Ends the game at once if the initial position is already terminal,
    /// otherwise starts the AI when it has the first move. Returns `true` when
    /// an AI search was started.
    pub fn start(&mut self) -> bool {
        if self.check_game_end().is_some() {
            return false;
        }
        self.run_ai_move_if_due()
    }

    pub fn subscribe(&mut self) -> Receiver<GameEvent> {
        self.events.subscribe()
    }

    // ---- input path ------------------------------------------------------

    /// Click at pixel `(x, y)` on a board drawn with `geometry`
    pub fn handle_pointer(&mut self, x: f32, y: f32, geometry: BoardGeometry) -> Option<MoveOutcome> {
        match geometry.display_square_at(x, y) {
            Some(square) => self.handle_display_click(square),
            None => {
                debug!("[INPUT] Click at ({:.1}, {:.1}) missed the board", x, y);
                None
            }
        }
    }

    /// Click on a display square
    ///
    /// Returns the outcome when the click completed a move request, `None`
    /// when it only changed (or kept) the selection.
    ///
    /// An unsynced game re-reads the engine status first; the click only
    /// proceeds once that succeeds.
    pub fn handle_display_click(&mut self, square: Square) -> Option<MoveOutcome> {
        if self.lifecycle.is_game_over() {
            debug!("[INPUT] Game over, ignoring click on {}", square);
            return None;
        }
        if self.guard.is_busy() {
            debug!("[INPUT] Move in progress, ignoring click on {}", square);
            return None;
        }
        if !self.ensure_synced() {
            debug!("[INPUT] Engine status unreadable, ignoring click on {}", square);
            return None;
        }
        if self.lifecycle.is_game_over() || self.guard.is_busy() || self.is_ai_turn() {
            debug!("[INPUT] Not a human turn, ignoring click on {}", square);
            return None;
        }

        let logical = self.orientation.to_logical(square);
        let side = self.status.side_to_move();
        let selection = std::mem::take(&mut self.selection);
        let engine = &self.engine;
        let transition =
            match selection.on_click(logical, self.status.board(), side, |sq| engine.legal_moves(sq)) {
                Ok(transition) => transition,
                Err(e) => {
                    self.clear_highlights();
                    self.report(e.into());
                    return None;
                }
            };

        self.selection = transition.next;
        let mut outcome = None;
        for effect in transition.effects {
            match effect {
                SelectionEffect::ClearHighlights => self.clear_highlights(),
                SelectionEffect::Highlight { square, targets } => {
                    let selected = [self.orientation.to_display(square)];
                    let destinations: Vec<Square> = targets
                        .squares()
                        .map(|sq| self.orientation.to_display(sq))
                        .collect();
                    let renderer = &mut self.collaborators.renderer;
                    renderer.highlight_squares(&selected, HighlightKind::Selected);
                    renderer.highlight_squares(&destinations, HighlightKind::LegalTarget);
                }
                SelectionEffect::MoveRequested(request) => {
                    outcome = Some(self.apply_human_move(request.from, request.to));
                }
            }
        }
        outcome
    }

    /// Applies a human move given in logical coordinates
    ///
    /// The move is expected to have passed the engine's legal-move mask; the
    /// selection state machine guarantees that for clicks. Promotion detection
    /// relies on it: any pawn reaching its last rank here is a promotion.
    pub fn apply_human_move(&mut self, from: Square, to: Square) -> MoveOutcome {
        if self.lifecycle.is_game_over() {
            debug!("[GAME] Game over, ignoring move {} -> {}", from, to);
            return MoveOutcome::Ignored;
        }
        if self.is_ai_turn() {
            debug!("[GAME] Not a human turn, ignoring move {} -> {}", from, to);
            return MoveOutcome::Ignored;
        }
        if self.guard.is_busy() {
            debug!("[GAME] Already processing, ignoring move {} -> {}", from, to);
            return MoveOutcome::Ignored;
        }
        if !self.ensure_synced() {
            return MoveOutcome::Failed;
        }
        // The recovered status may have handed the move to the other side
        if self.lifecycle.is_game_over() || self.is_ai_turn() {
            debug!("[GAME] Turn moved on, ignoring move {} -> {}", from, to);
            return MoveOutcome::Ignored;
        }
        let Some(token) = self.guard.try_acquire() else {
            debug!("[GAME] Already processing, ignoring move {} -> {}", from, to);
            return MoveOutcome::Ignored;
        };

        self.selection = Selection::Idle;
        let mover = self.status.side_to_move();

        let promotion = match promoting_side(self.status.board(), from, to) {
            Some(side) => match self.collaborators.promotion.choose_promotion(side) {
                PromotionChoice::Piece(piece) => {
                    info!("[PROMOTION] {} promotes on {} to {:?}", side, to, piece);
                    Some(piece)
                }
                PromotionChoice::Cancelled => {
                    info!("[PROMOTION] Cancelled, move {} -> {} abandoned", from, to);
                    return MoveOutcome::Cancelled;
                }
            },
            None => None,
        };

        let status = match self.engine.apply_move(from, to, promotion) {
            Ok(status) => status,
            Err(e) => {
                self.fail_unsynced(e, mover);
                return MoveOutcome::Failed;
            }
        };

        self.commit_status(status, mover);
        drop(token);
        self.run_ai_move_if_due();
        MoveOutcome::Applied
    }

    // ---- AI path -----------------------------------------------------------

    fn should_skip_ai_spawn(&self) -> bool {
        self.pending_ai.is_some()
            || self.unsynced_mover.is_some()
            || self.lifecycle.is_game_over()
            || !self.is_ai_turn()
    }

    /// Starts the AI search if the side to move is AI-controlled
    ///
    /// No-op (returning `false`) when it is not the AI's turn, the game is
    /// over or unsynced, a search is already pending or another move holds
    /// the guard.
    pub fn run_ai_move_if_due(&mut self) -> bool {
        if self.should_skip_ai_spawn() {
            return false;
        }
        let Some(token) = self.guard.try_acquire() else {
            debug!("[AI] Guard held, not spawning a search");
            return false;
        };
        self.spawn_ai_search(token)
    }

    /// Recovery after a failed AI turn: runs the AI path again
    ///
    /// When the failure was a status read after the search had already moved,
    /// the status is recovered and committed instead of searching twice.
    /// Returns `true` when a search is running afterwards.
    pub fn retry_ai_move(&mut self) -> bool {
        if self.unsynced_mover.is_some() {
            if !self.ensure_synced() {
                return false;
            }
            return self.is_ai_pending();
        }
        info!("[AI] Retrying AI move for {}", self.status.side_to_move());
        self.run_ai_move_if_due()
    }

    fn spawn_ai_search(&mut self, token: ProcessingToken) -> bool {
        let start_time = Instant::now();
        let side = self.status.side_to_move();
        let depth = self.config.difficulty.search_depth();

        info!("[AI] ========== AI TASK SPAWNED ==========");
        info!(
            "[AI] AI Color: {} | Difficulty: {} | Depth: {}",
            side, self.config.difficulty, depth
        );
        info!("[AI] Move #{} | Ply #{}", self.status.full_moves(), self.move_log.ply_count() + 1);

        match self.engine.spawn_best_move(depth, side) {
            Ok(receiver) => {
                self.pending_ai = Some(PendingAIMove::new(receiver, side, depth, token));
                self.events.publish(GameEvent::AiThinking(side));
            }
            Err(e) => {
                drop(token);
                self.ai_stats.failures += 1;
                self.report(GameError::AiComputation {
                    message: e.to_string(),
                });
                return false;
            }
        }

        let spawn_duration = start_time.elapsed();
        if spawn_duration.as_millis() > 10 {
            warn!("[PERF] spawning the AI search took {}ms", spawn_duration.as_millis());
        }
        true
    }

    /// Applies the AI result if the search has finished; never blocks
    pub fn poll_ai_move(&mut self) -> Option<MoveOutcome> {
        let pending = self.pending_ai.take()?;
        match pending.try_take() {
            Ok(completed) => Some(self.finish_ai_move(completed)),
            Err(pending) => {
                self.pending_ai = Some(pending);
                None
            }
        }
    }

    /// Blocks until the pending search finishes, then applies it
    pub fn wait_for_ai_move(&mut self) -> Option<MoveOutcome> {
        let pending = self.pending_ai.take()?;
        Some(self.finish_ai_move(pending.wait()))
    }

    fn finish_ai_move(&mut self, completed: CompletedAIMove) -> MoveOutcome {
        self.ai_stats.record(&completed);
        let CompletedAIMove {
            side,
            depth,
            thinking_time,
            result,
            token,
        } = completed;

        info!("[AI] ========== AI COMPUTATION COMPLETE ==========");
        info!("[AI] Side: {} | Depth: {} | Time: {:.2}s", side, depth, thinking_time);

        if let Err(e) = result {
            drop(token);
            self.report(GameError::AiComputation {
                message: e.to_string(),
            });
            return MoveOutcome::Failed;
        }

        if self.lifecycle.is_game_over() {
            info!("[AI] Game already over, discarding AI move");
            return MoveOutcome::Ignored;
        }

        let status = match self.engine.status() {
            Ok(status) => status,
            Err(e) => {
                drop(token);
                self.fail_unsynced(e, side);
                return MoveOutcome::Failed;
            }
        };

        self.commit_status(status, side);
        drop(token);
        // Both sides may be engine-driven
        self.run_ai_move_if_due();
        MoveOutcome::Applied
    }

    // ---- status recovery -------------------------------------------------------

    /// Re-reads the engine status after a move whose status could not be read
    ///
    /// Returns `None` when the game is already in sync. Otherwise commits the
    /// move the engine applied (`Applied`), or reports the read failing again
    /// (`Failed`) and stays unsynced.
    pub fn refresh_status(&mut self) -> Option<MoveOutcome> {
        let mover = self.unsynced_mover?;
        let Some(token) = self.guard.try_acquire() else {
            debug!("[GAME] Guard held, status refresh deferred");
            return Some(MoveOutcome::Ignored);
        };

        match self.engine.status() {
            Ok(status) => {
                self.unsynced_mover = None;
                info!("[GAME] Engine status recovered after {}'s move", mover);
                self.commit_status(status, mover);
                drop(token);
                self.run_ai_move_if_due();
                Some(MoveOutcome::Applied)
            }
            Err(e) => {
                drop(token);
                self.report(e.into());
                Some(MoveOutcome::Failed)
            }
        }
    }

    pub fn is_synced(&self) -> bool {
        self.unsynced_mover.is_none()
    }

    fn ensure_synced(&mut self) -> bool {
        !matches!(
            self.refresh_status(),
            Some(MoveOutcome::Failed) | Some(MoveOutcome::Ignored)
        )
    }

    /// Reports a failed apply or status read. A malformed status means the
    /// engine already moved for `mover`.
    fn fail_unsynced(&mut self, error: EngineError, mover: Side) {
        if matches!(error, EngineError::MalformedStatus(_)) {
            warn!("[GAME] Engine applied {}'s move but its status was unreadable", mover);
            self.unsynced_mover = Some(mover);
        }
        self.report(error.into());
    }

    // ---- commit and game end -------------------------------------------------

    fn commit_status(&mut self, status: GameStatus, mover: Side) {
        let notation = status.last_move.clone();
        let move_number = match mover {
            Side::White => status.full_moves(),
            Side::Black => status.full_moves().saturating_sub(1).max(1),
        };
        let state = status.state;
        let next = status.side_to_move();

        self.status = status;
        self.selection = Selection::Idle;
        self.clear_highlights();
        self.render();

        info!("[GAME] {} played {} ({})", mover, notation, state);
        self.move_log.record(&notation, mover, move_number);
        self.collaborators
            .move_log
            .log_move(&notation, mover.is_white(), move_number);
        self.events.publish(GameEvent::MoveApplied {
            notation,
            side: mover,
            move_number,
            state,
        });

        self.collaborators.timer.switch_active_side(next);
        self.events.publish(GameEvent::TurnChanged(next));

        self.check_game_end();
    }

    /// Ends the game if the current status is terminal
    ///
    /// Returns the reason only for the call that actually ended the game;
    /// later calls return `None` and emit nothing.
    pub fn check_game_end(&mut self) -> Option<GameOverReason> {
        let reason =
            GameOverReason::from_engine_state(self.status.state, self.status.side_to_move())?;
        self.lifecycle.finish(reason).then(|| {
            self.end_game(reason);
            reason
        })
    }

    /// `side` resigns. Returns `false` if the game had already ended.
    pub fn resign(&mut self, side: Side) -> bool {
        let reason = GameOverReason::Resignation { loser: side };
        if !self.lifecycle.finish(reason) {
            debug!("[GAME] Game already over, ignoring resignation by {}", side);
            return false;
        }
        self.end_game(reason);
        true
    }

    fn end_game(&mut self, reason: GameOverReason) {
        self.selection = Selection::Idle;
        self.clear_highlights();
        self.collaborators.timer.pause();
        info!("[GAME] Game over: {} {}", reason.message(), reason.result());
        self.events.publish(GameEvent::GameOver(reason));
    }

    /// Ends the game and releases the engine board
    ///
    /// Waits for an in-flight search first so the worker never touches a
    /// released board.
    pub fn shutdown(mut self) {
        if let Some(pending) = self.pending_ai.take() {
            debug!("[AI] Waiting for the running search before shutdown");
            drop(pending.wait());
        }
        self.collaborators.timer.pause();
        self.engine.destroy();
        info!("[GAME] Shut down");
    }

    // ---- helpers ---------------------------------------------------------------

    fn render(&mut self) {
        self.collaborators
            .renderer
            .render_board(self.status.board(), self.orientation);
    }

    fn clear_highlights(&mut self) {
        let renderer = &mut self.collaborators.renderer;
        renderer.clear_highlights(HighlightKind::Selected);
        renderer.clear_highlights(HighlightKind::LegalTarget);
    }

    fn report(&mut self, error: GameError) {
        warn!("[GAME] {}", error);
        self.events.publish(GameEvent::Error(error.to_string()));
        self.collaborators.errors.report(&error);
    }

    // ---- accessors -------------------------------------------------------------

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &BoardState {
        self.status.board()
    }

    pub fn status(&self) -> &GameStatus {
        &self.status
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn lifecycle(&self) -> GameLifecycle {
        self.lifecycle
    }

    pub fn move_log(&self) -> &MoveLog {
        &self.move_log
    }

    pub fn ai_statistics(&self) -> &AIStatistics {
        &self.ai_stats
    }

    pub fn orientation(&self) -> BoardOrientation {
        self.orientation
    }

    pub fn is_processing(&self) -> bool {
        self.guard.is_busy()
    }

    pub fn is_ai_pending(&self) -> bool {
        self.pending_ai.is_some()
    }

    /// True when the side to move is AI-controlled and the game is still on
    pub fn is_ai_turn(&self) -> bool {
        !self.lifecycle.is_game_over() && self.config.is_ai(self.status.side_to_move())
    }
}
