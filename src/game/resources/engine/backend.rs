//! The engine collaborator as seen by this crate
//!
//! Rule knowledge (legality, check detection, search) lives entirely behind
//! this trait. One backend value owns one engine board; [`EngineClient`]
//! wraps it and makes sure it is never touched from two operations at once.
//!
//! Squares cross this boundary as engine indices, see
//! [`crate::game::bitboard::square_index`].
//!
//! [`EngineClient`]: super::EngineClient

/// Calls exposed by an external chess engine
pub trait EngineBackend: Send + 'static {
    /// Allocates the engine board in the starting position.
    /// Returns `false` when the engine cannot provide a board.
    fn create_board(&mut self) -> bool;

    /// Releases the engine board. Called at most once per created board.
    fn destroy_board(&mut self);

    /// Legal destinations of the piece on `square` as a 64-bit mask
    fn valid_moves(&mut self, square: u8) -> u64;

    /// Applies a move. `promotion` is one of `'-'`, `'q'`, `'r'`, `'b'`, `'n'`.
    fn make_move(&mut self, source: u8, target: u8, promotion: char);

    /// Searches `depth` plies for the given side and plays the best move.
    /// Blocking and potentially slow; only ever called off the game thread.
    fn make_best_move(&mut self, depth: u8, white: bool) -> Result<(), String>;

    /// JSON status payload: `{"move": .., "state": .., "fen": ..}`
    fn board_json(&mut self) -> String;
}
