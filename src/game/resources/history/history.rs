//! Move log record
//!
//! Rows pair White's and Black's move under one full-move number, the way a
//! scoresheet reads:
//!
//! ```text
//! 1. e2e4   e7e5
//! 2. g1f3   b8c6
//! 3. f1b5
//! ```
//!
//! The orchestrator records every applied move here and forwards the same
//! `(notation, side, move number)` triple to the move-log collaborator.

use crate::game::types::Side;

/// One scoresheet row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveLogEntry {
    pub turn: u32,
    pub white_move: Option<String>,
    pub black_move: Option<String>,
}

/// Chronological move record for the current game
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveLog {
    entries: Vec<MoveLogEntry>,
}

impl MoveLog {
    /// Records one move
    ///
    /// A White move always opens a new row. A Black move fills the open row
    /// for `turn`, or opens its own row when the game started with Black to
    /// move.
    pub fn record(&mut self, notation: &str, side: Side, turn: u32) {
        match side {
            Side::White => self.entries.push(MoveLogEntry {
                turn,
                white_move: Some(notation.to_string()),
                black_move: None,
            }),
            Side::Black => match self.entries.last_mut() {
                Some(last) if last.turn == turn && last.black_move.is_none() => {
                    last.black_move = Some(notation.to_string());
                }
                _ => self.entries.push(MoveLogEntry {
                    turn,
                    white_move: None,
                    black_move: Some(notation.to_string()),
                }),
            },
        }
    }

    pub fn entries(&self) -> &[MoveLogEntry] {
        &self.entries
    }

    pub fn last_entry(&self) -> Option<&MoveLogEntry> {
        self.entries.last()
    }

    /// Number of half-moves recorded
    pub fn ply_count(&self) -> usize {
        self.entries
            .iter()
            .map(|e| e.white_move.is_some() as usize + e.black_move.is_some() as usize)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Scoresheet as one line: `1. e2e4 e7e5 2. g1f3`
    pub fn movetext(&self) -> String {
        let mut parts = Vec::with_capacity(self.entries.len() * 3);
        for entry in &self.entries {
            match &entry.white_move {
                Some(white) => parts.push(format!("{}. {}", entry.turn, white)),
                None => parts.push(format!("{}...", entry.turn)),
            }
            if let Some(black) = &entry.black_move {
                parts.push(black.clone());
            }
        }
        parts.join(" ")
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
