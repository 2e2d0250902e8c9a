//! Engine status payload parsing
//!
//! After every applied move the engine reports one JSON object:
//!
//! ```text
//! {
//!   "move": "e2e4",
//!   "state": "ongoing",
//!   "fen": "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1"
//! }
//! ```
//!
//! [`GameStatus::parse`] turns that into a fully populated [`GameStatus`] or a
//! [`StatusError`]. There is no partially-parsed result: callers either get
//! every field or keep their previous status.

use crate::game::types::{BoardState, PlacementError, Side, Square};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Errors produced while decoding an engine status payload
#[derive(Debug, thiserror::Error)]
pub enum StatusError {
    #[error("status payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("status payload is missing the '{0}' field")]
    MissingField(&'static str),

    #[error("FEN has {0} fields, expected 6")]
    FenFieldCount(usize),

    #[error("FEN piece placement is malformed: {0}")]
    Placement(#[from] PlacementError),

    #[error("FEN side-to-move field '{0}' is not 'w' or 'b'")]
    SideToMove(String),

    #[error("FEN en-passant field '{0}' is not '-' or a square")]
    EnPassant(String),

    #[error("FEN {field} '{value}' is not a number")]
    Clock { field: &'static str, value: String },

    #[error("unknown game state tag '{0}'")]
    UnknownState(String),
}

/// Game state tag reported alongside every position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameState {
    Ongoing,
    Check,
    Mate,
    Stalemate,
    DrawRepetition,
    DrawFifty,
    DrawInsufficient,
}

impl GameState {
    /// True for every state that ends the game
    pub fn is_terminal(self) -> bool {
        !matches!(self, GameState::Ongoing | GameState::Check)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            GameState::Ongoing => "ongoing",
            GameState::Check => "check",
            GameState::Mate => "mate",
            GameState::Stalemate => "stalemate",
            GameState::DrawRepetition => "draw_repetition",
            GameState::DrawFifty => "draw_fifty",
            GameState::DrawInsufficient => "draw_insufficient",
        }
    }
}

impl FromStr for GameState {
    type Err = StatusError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag {
            "ongoing" => Ok(GameState::Ongoing),
            "check" => Ok(GameState::Check),
            "mate" => Ok(GameState::Mate),
            "stalemate" => Ok(GameState::Stalemate),
            "draw_repetition" => Ok(GameState::DrawRepetition),
            // Older engine builds report the fifty-move draw as draw_50
            "draw_fifty" | "draw_50" => Ok(GameState::DrawFifty),
            "draw_insufficient" => Ok(GameState::DrawInsufficient),
            other => Err(StatusError::UnknownState(other.to_string())),
        }
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed FEN record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fen {
    pub placement: BoardState,
    pub side_to_move: Side,
    pub castling: String,
    pub en_passant: Option<Square>,
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
    raw: String,
}

impl Fen {
    pub fn parse(fen: &str) -> Result<Self, StatusError> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        if fields.len() != 6 {
            return Err(StatusError::FenFieldCount(fields.len()));
        }

        let placement = BoardState::from_placement(fields[0])?;
        let side_to_move = match fields[1] {
            "w" => Side::White,
            "b" => Side::Black,
            other => return Err(StatusError::SideToMove(other.to_string())),
        };
        let en_passant = match fields[3] {
            "-" => None,
            name => Some(
                Square::from_algebraic(name)
                    .ok_or_else(|| StatusError::EnPassant(name.to_string()))?,
            ),
        };

        Ok(Fen {
            placement,
            side_to_move,
            castling: fields[2].to_string(),
            en_passant,
            halfmove_clock: parse_clock("half-move clock", fields[4])?,
            fullmove_number: parse_clock("full-move number", fields[5])?,
            raw: fields.join(" "),
        })
    }

    pub fn is_white_turn(&self) -> bool {
        self.side_to_move == Side::White
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

fn parse_clock(field: &'static str, value: &str) -> Result<u32, StatusError> {
    value.parse().map_err(|_| StatusError::Clock {
        field,
        value: value.to_string(),
    })
}

#[derive(Deserialize)]
struct RawStatus {
    #[serde(rename = "move", alias = "Move")]
    last_move: Option<String>,
    #[serde(alias = "State")]
    state: Option<String>,
    #[serde(alias = "Fen", alias = "FEN")]
    fen: Option<String>,
}

/// Snapshot of the engine after the latest applied move
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameStatus {
    pub fen: Fen,
    pub last_move: String,
    pub state: GameState,
}

impl GameStatus {
    /// Parses the engine's JSON status payload
    pub fn parse(payload: &str) -> Result<Self, StatusError> {
        let raw: RawStatus = serde_json::from_str(payload)?;
        let last_move = raw.last_move.ok_or(StatusError::MissingField("move"))?;
        let state = raw.state.ok_or(StatusError::MissingField("state"))?;
        let fen = raw.fen.ok_or(StatusError::MissingField("fen"))?;

        Ok(GameStatus {
            fen: Fen::parse(&fen)?,
            last_move,
            state: state.parse()?,
        })
    }

    pub fn board(&self) -> &BoardState {
        &self.fen.placement
    }

    pub fn side_to_move(&self) -> Side {
        self.fen.side_to_move
    }

    pub fn is_white_turn(&self) -> bool {
        self.fen.is_white_turn()
    }

    pub fn full_moves(&self) -> u32 {
        self.fen.fullmove_number
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    fn payload(mv: &str, state: &str, fen: &str) -> String {
        serde_json::json!({ "move": mv, "state": state, "fen": fen }).to_string()
    }

    #[test]
    fn test_parse_starting_status() {
        //! White to move with full-move number 1 in the initial position
        let status = GameStatus::parse(&payload("", "ongoing", START_FEN)).unwrap();
        assert!(status.is_white_turn());
        assert_eq!(status.full_moves(), 1);
        assert_eq!(status.fen.halfmove_clock, 0);
        assert_eq!(status.fen.castling, "KQkq");
        assert_eq!(status.fen.en_passant, None);
        assert_eq!(status.state, GameState::Ongoing);
        assert_eq!(status.board(), &BoardState::starting_position());
        assert_eq!(status.fen.as_str(), START_FEN);
    }

    #[test]
    fn test_parse_after_e4() {
        let fen = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1";
        let status = GameStatus::parse(&payload("e2e4", "ongoing", fen)).unwrap();
        assert_eq!(status.side_to_move(), Side::Black);
        assert_eq!(status.last_move, "e2e4");
        assert_eq!(status.fen.en_passant, Square::from_algebraic("e3"));
        assert_eq!(status.board().code(Square::from_algebraic("e4").unwrap()), "P");
    }

    #[test]
    fn test_capitalised_field_names() {
        //! The engine's older builds capitalise the keys
        let json = format!(r#"{{"Move":"e2e4","State":"check","Fen":"{}"}}"#, START_FEN);
        let status = GameStatus::parse(&json).unwrap();
        assert_eq!(status.state, GameState::Check);
    }

    #[test]
    fn test_missing_field_is_error() {
        let json = format!(r#"{{"move":"e2e4","fen":"{}"}}"#, START_FEN);
        assert!(matches!(
            GameStatus::parse(&json),
            Err(StatusError::MissingField("state"))
        ));
    }

    #[test]
    fn test_malformed_payloads() {
        assert!(matches!(GameStatus::parse("not json"), Err(StatusError::Json(_))));
        assert!(matches!(
            GameStatus::parse(&payload("", "ongoing", "8/8/8/8/8/8/8/8 w")),
            Err(StatusError::FenFieldCount(2))
        ));
        assert!(matches!(
            GameStatus::parse(&payload("", "ongoing", "8/8/8/8 w - - 0 1")),
            Err(StatusError::Placement(PlacementError::RankCount(4)))
        ));
        assert!(matches!(
            GameStatus::parse(&payload("", "ongoing", "8/8/8/8/8/8/8/8 x - - 0 1")),
            Err(StatusError::SideToMove(_))
        ));
        assert!(matches!(
            GameStatus::parse(&payload("", "ongoing", "8/8/8/8/8/8/8/8 w - - zero 1")),
            Err(StatusError::Clock { .. })
        ));
        assert!(matches!(
            GameStatus::parse(&payload("", "won", START_FEN)),
            Err(StatusError::UnknownState(_))
        ));
    }

    #[test]
    fn test_state_vocabulary() {
        //! Terminal classification and the draw_50 alias
        assert!(!GameState::Ongoing.is_terminal());
        assert!(!GameState::Check.is_terminal());
        for tag in ["mate", "stalemate", "draw_repetition", "draw_fifty", "draw_insufficient"] {
            assert!(tag.parse::<GameState>().unwrap().is_terminal(), "{tag}");
        }
        assert_eq!("draw_50".parse::<GameState>().unwrap(), GameState::DrawFifty);
    }
}
