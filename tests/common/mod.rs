//! Shared fixtures for integration tests
//!
//! - [`ScriptedEngine`]: an in-memory engine backend answering from a script
//!   (legal-move masks per square, a queue of status payloads) and recording
//!   every call it receives
//! - [`Recorder`]: collaborators that record what the orchestrator asked of them

#![allow(dead_code)]

use crossbeam_channel::Receiver;
use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use xfchess_board::game::bitboard::square_index;
use xfchess_board::game::collaborators::{
    BoardRenderer, Collaborators, ErrorReporter, HighlightKind, MoveLogSink, PromotionPrompt,
    TurnTimer,
};
use xfchess_board::game::resources::player::PromotionChoice;
use xfchess_board::game::types::{BoardState, PromotionPiece, Side, Square};
use xfchess_board::game::{BoardOrientation, EngineBackend, GameError};

pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
pub const AFTER_E4_FEN: &str = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1";
pub const AFTER_E5_FEN: &str = "rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq e6 0 2";

/// Builds an engine status payload
pub fn status_json(last_move: &str, state: &str, fen: &str) -> String {
    serde_json::json!({ "move": last_move, "state": state, "fen": fen }).to_string()
}

pub fn sq(name: &str) -> Square {
    Square::from_algebraic(name).unwrap()
}

// ============================================================================
// Scripted engine
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineCall {
    Create,
    Destroy,
    ValidMoves(u8),
    MakeMove(u8, u8, char),
    MakeBestMove(u8, bool),
    BoardJson,
}

#[derive(Default)]
struct Script {
    calls: Vec<EngineCall>,
    masks: HashMap<u8, u64>,
    queued: VecDeque<String>,
    current: String,
    best_move_error: Option<String>,
    refuse_board: bool,
}

impl Script {
    fn advance(&mut self) {
        if let Some(next) = self.queued.pop_front() {
            self.current = next;
        }
    }
}

pub struct ScriptedEngine {
    script: Arc<Mutex<Script>>,
    gate: Option<Receiver<()>>,
}

/// Test-side view of a [`ScriptedEngine`]
#[derive(Clone)]
pub struct ScriptHandle {
    script: Arc<Mutex<Script>>,
}

impl ScriptedEngine {
    /// Engine whose status starts at `initial_payload`
    pub fn new(initial_payload: &str) -> (Self, ScriptHandle) {
        let script = Arc::new(Mutex::new(Script {
            current: initial_payload.to_string(),
            ..Script::default()
        }));
        (
            Self {
                script: Arc::clone(&script),
                gate: None,
            },
            ScriptHandle { script },
        )
    }

    pub fn starting_position() -> (Self, ScriptHandle) {
        Self::new(&status_json("", "ongoing", START_FEN))
    }

    /// Every best-move search blocks until one `()` arrives on `gate`
    pub fn with_gate(mut self, gate: Receiver<()>) -> Self {
        self.gate = Some(gate);
        self
    }
}

impl EngineBackend for ScriptedEngine {
    fn create_board(&mut self) -> bool {
        let mut script = self.script.lock();
        script.calls.push(EngineCall::Create);
        !script.refuse_board
    }

    fn destroy_board(&mut self) {
        self.script.lock().calls.push(EngineCall::Destroy);
    }

    fn valid_moves(&mut self, square: u8) -> u64 {
        let mut script = self.script.lock();
        script.calls.push(EngineCall::ValidMoves(square));
        script.masks.get(&square).copied().unwrap_or(0)
    }

    fn make_move(&mut self, source: u8, target: u8, promotion: char) {
        let mut script = self.script.lock();
        script.calls.push(EngineCall::MakeMove(source, target, promotion));
        script.advance();
    }

    fn make_best_move(&mut self, depth: u8, white: bool) -> Result<(), String> {
        if let Some(gate) = &self.gate {
            // A closed gate releases every waiting search
            let _ = gate.recv();
        }
        let mut script = self.script.lock();
        script.calls.push(EngineCall::MakeBestMove(depth, white));
        if let Some(message) = script.best_move_error.take() {
            return Err(message);
        }
        script.advance();
        Ok(())
    }

    fn board_json(&mut self) -> String {
        let mut script = self.script.lock();
        script.calls.push(EngineCall::BoardJson);
        script.current.clone()
    }
}

impl ScriptHandle {
    /// Legal destinations the engine reports for `from`
    pub fn set_moves(&self, from: &str, targets: &[&str]) {
        let mask = targets
            .iter()
            .fold(0u64, |mask, name| mask | 1u64 << square_index(sq(name)));
        self.script.lock().masks.insert(square_index(sq(from)), mask);
    }

    /// Status the engine reports after its next applied move
    pub fn queue_status(&self, payload: String) {
        self.script.lock().queued.push_back(payload);
    }

    /// Replaces the status the engine reports right now
    pub fn set_status(&self, payload: String) {
        self.script.lock().current = payload;
    }

    /// The next best-move search fails with `message`
    pub fn fail_next_search(&self, message: &str) {
        self.script.lock().best_move_error = Some(message.to_string());
    }

    pub fn refuse_board(&self) {
        self.script.lock().refuse_board = true;
    }

    pub fn calls(&self) -> Vec<EngineCall> {
        self.script.lock().calls.clone()
    }

    pub fn count(&self, matches: impl Fn(&EngineCall) -> bool) -> usize {
        self.script.lock().calls.iter().filter(|c| matches(c)).count()
    }

    pub fn moves_made(&self) -> Vec<EngineCall> {
        self.script
            .lock()
            .calls
            .iter()
            .filter(|c| matches!(c, EngineCall::MakeMove(..)))
            .cloned()
            .collect()
    }

    pub fn searches(&self) -> usize {
        self.count(|c| matches!(c, EngineCall::MakeBestMove(..)))
    }

    pub fn destroys(&self) -> usize {
        self.count(|c| matches!(c, EngineCall::Destroy))
    }
}

// ============================================================================
// Recording collaborators
// ============================================================================

#[derive(Debug, Default)]
pub struct Recording {
    pub renders: Vec<BoardState>,
    pub orientations: Vec<BoardOrientation>,
    pub highlights: Vec<(Vec<Square>, HighlightKind)>,
    pub clears: usize,
    pub timer_sides: Vec<Side>,
    pub timer_pauses: usize,
    pub logged: Vec<(String, bool, u32)>,
    pub prompts: Vec<Side>,
    pub promotion_answers: VecDeque<PromotionChoice>,
    pub errors: Vec<String>,
}

#[derive(Clone, Default)]
pub struct Recorder {
    inner: Arc<Mutex<Recording>>,
}

impl Recorder {
    pub fn collaborators(&self) -> Collaborators {
        Collaborators {
            renderer: Box::new(self.clone()),
            timer: Box::new(self.clone()),
            move_log: Box::new(self.clone()),
            promotion: Box::new(self.clone()),
            errors: Box::new(self.clone()),
        }
    }

    pub fn answer_promotion(&self, choice: PromotionChoice) {
        self.inner.lock().promotion_answers.push_back(choice);
    }

    pub fn with<R>(&self, f: impl FnOnce(&Recording) -> R) -> R {
        f(&self.inner.lock())
    }

    pub fn renders(&self) -> usize {
        self.with(|r| r.renders.len())
    }

    pub fn logged(&self) -> Vec<(String, bool, u32)> {
        self.with(|r| r.logged.clone())
    }

    pub fn errors(&self) -> Vec<String> {
        self.with(|r| r.errors.clone())
    }

    pub fn prompts(&self) -> Vec<Side> {
        self.with(|r| r.prompts.clone())
    }

    pub fn timer_sides(&self) -> Vec<Side> {
        self.with(|r| r.timer_sides.clone())
    }

    /// Squares of the most recent highlight of `kind`
    pub fn last_highlight(&self, kind: HighlightKind) -> Option<Vec<Square>> {
        self.with(|r| {
            r.highlights
                .iter()
                .rev()
                .find(|(_, k)| *k == kind)
                .map(|(squares, _)| squares.clone())
        })
    }
}

impl BoardRenderer for Recorder {
    fn render_board(&mut self, board: &BoardState, orientation: BoardOrientation) {
        let mut rec = self.inner.lock();
        rec.renders.push(board.clone());
        rec.orientations.push(orientation);
    }

    fn highlight_squares(&mut self, squares: &[Square], kind: HighlightKind) {
        self.inner.lock().highlights.push((squares.to_vec(), kind));
    }

    fn clear_highlights(&mut self, _kind: HighlightKind) {
        self.inner.lock().clears += 1;
    }
}

impl TurnTimer for Recorder {
    fn switch_active_side(&mut self, side: Side) {
        self.inner.lock().timer_sides.push(side);
    }

    fn pause(&mut self) {
        self.inner.lock().timer_pauses += 1;
    }
}

impl MoveLogSink for Recorder {
    fn log_move(&mut self, notation: &str, was_white_move: bool, move_number: u32) {
        self.inner
            .lock()
            .logged
            .push((notation.to_string(), was_white_move, move_number));
    }
}

impl PromotionPrompt for Recorder {
    fn choose_promotion(&mut self, side: Side) -> PromotionChoice {
        let mut rec = self.inner.lock();
        rec.prompts.push(side);
        rec.promotion_answers
            .pop_front()
            .unwrap_or(PromotionChoice::Piece(PromotionPiece::Queen))
    }
}

impl ErrorReporter for Recorder {
    fn report(&mut self, error: &GameError) {
        self.inner.lock().errors.push(error.to_string());
    }
}
