//! Integration tests for configuration, coordinates and engine decoding
//!
//! Exhaustive checks over all 64 squares for the coordinate mapping and the
//! engine square indexing, plus config file loading.

use xfchess_board::core::{CoreError, GameConfig};
use xfchess_board::game::ai::AIDifficulty;
use xfchess_board::game::bitboard::{square_from_index, square_index, MoveMask};
use xfchess_board::game::coordinates::{to_display, to_logical};
use xfchess_board::game::resources::engine::{GameState, GameStatus};
use xfchess_board::game::resources::player::PlayerKind;
use xfchess_board::game::types::{Side, Square};

// ============================================================================
// Coordinates and indexing
// ============================================================================

#[test]
fn test_flip_round_trip_all_squares() {
    //! to_logical undoes to_display for every square and both flips
    for square in Square::all() {
        for flipped in [false, true] {
            assert_eq!(to_logical(to_display(square, flipped), flipped), square);
        }
        assert_eq!(to_display(square, false), square);
    }
}

#[test]
fn test_square_index_is_bijection() {
    let mut seen = [false; 64];
    for square in Square::all() {
        let index = square_index(square);
        assert!(!seen[index as usize], "index {} assigned twice", index);
        seen[index as usize] = true;
        assert_eq!(square_from_index(index), square);
    }
    assert!(seen.iter().all(|s| *s));
}

#[test]
fn test_square_index_formula() {
    //! index = file + 8 * (7 - rank)
    for square in Square::all() {
        assert_eq!(
            square_index(square) as u32,
            square.file as u32 + 8 * (7 - square.rank as u32)
        );
    }
    assert_eq!(square_index(Square::from_algebraic("a1").unwrap()), 0);
    assert_eq!(square_index(Square::from_algebraic("h8").unwrap()), 63);
}

#[test]
fn test_mask_round_trip_sampled() {
    let samples = [
        0u64,
        u64::MAX,
        0x0000_0000_1010_0000,
        0x8000_0000_0000_0001,
        0xDEAD_BEEF_CAFE_F00D,
    ];
    for bits in samples {
        let mask = MoveMask(bits);
        assert_eq!(MoveMask::encode(mask.decode()), mask);
        assert_eq!(mask.decode().len() as u32, bits.count_ones());
    }
}

// ============================================================================
// Status decoding
// ============================================================================

#[test]
fn test_status_turn_and_move_number() {
    //! "... w ... 0 1" is White to move on move 1
    let payload = r#"{"move":"","state":"ongoing","fen":"rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"}"#;
    let status = GameStatus::parse(payload).unwrap();
    assert!(status.is_white_turn());
    assert_eq!(status.full_moves(), 1);
    assert_eq!(status.state, GameState::Ongoing);
    assert_eq!(status.side_to_move(), Side::White);
}

#[test]
fn test_status_legacy_aliases() {
    let payload = r#"{"Move":"h2h3","State":"draw_50","Fen":"8/8/8/8/8/8/7P/k6K b - - 50 80"}"#;
    let status = GameStatus::parse(payload).unwrap();
    assert_eq!(status.state, GameState::DrawFifty);
    assert_eq!(status.last_move, "h2h3");
    assert_eq!(status.fen.halfmove_clock, 50);
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn test_load_config_file() {
    let path = std::env::temp_dir().join(format!("xfchess-board-config-{}.json", std::process::id()));
    std::fs::write(
        &path,
        r#"{"white":"ai","black":"human","difficulty":"easy","timer_minutes":3}"#,
    )
    .unwrap();

    let config = GameConfig::load(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(config.white, PlayerKind::Ai);
    assert_eq!(config.black, PlayerKind::Human);
    assert_eq!(config.difficulty, AIDifficulty::Easy);
    assert_eq!(config.timer_minutes, 3);
    assert!(config.is_ai(Side::White));
}

#[test]
fn test_missing_config_file() {
    let result = GameConfig::load("/nonexistent/xfchess-board/config.json");
    assert!(matches!(result, Err(CoreError::ConfigIo(_))));
}

#[test]
fn test_malformed_config_json() {
    let result = GameConfig::from_json(r#"{"white":"robot"}"#);
    assert!(matches!(result, Err(CoreError::ConfigSerialization(_))));
}
