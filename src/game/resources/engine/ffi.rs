//! Native engine backend over the ChessEngine C ABI
//!
//! Only compiled with the `native-engine` feature; the build then links
//! against the `ChessEngine` shared library.

use super::backend::EngineBackend;
use std::ffi::{c_char, c_int, c_void, CStr};
use std::ptr;

/// Size of the buffer handed to `GetBoardJSON`
const JSON_BUFFER_SIZE: usize = 256;

#[link(name = "ChessEngine")]
extern "C" {
    fn CreateBoard() -> *mut c_void;
    fn DestroyBoard(board: *mut c_void);
    fn ValidMoves(board: *mut c_void, square: c_int) -> u64;
    fn MakeMove(board: *mut c_void, source: c_int, target: c_int, promotion: c_char);
    fn MakeBestMove(board: *mut c_void, depth: c_int, white: bool);
    fn GetBoardJSON(board: *mut c_void, output: *mut c_char, size: c_int);
}

/// One board allocated by the native engine
pub struct NativeEngine {
    board: *mut c_void,
}

// SAFETY: the engine board is plain heap memory with no thread affinity.
// EngineClient serialises all access behind a mutex.
unsafe impl Send for NativeEngine {}

impl NativeEngine {
    pub fn new() -> Self {
        Self {
            board: ptr::null_mut(),
        }
    }
}

impl Default for NativeEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineBackend for NativeEngine {
    fn create_board(&mut self) -> bool {
        // SAFETY: CreateBoard has no preconditions and returns null on failure
        self.board = unsafe { CreateBoard() };
        !self.board.is_null()
    }

    fn destroy_board(&mut self) {
        if !self.board.is_null() {
            // SAFETY: board came from CreateBoard and is released once
            unsafe { DestroyBoard(self.board) };
            self.board = ptr::null_mut();
        }
    }

    fn valid_moves(&mut self, square: u8) -> u64 {
        // SAFETY: board is live while EngineClient reports it live
        unsafe { ValidMoves(self.board, c_int::from(square)) }
    }

    fn make_move(&mut self, source: u8, target: u8, promotion: char) {
        // SAFETY: as above; promotion is always ASCII
        unsafe {
            MakeMove(
                self.board,
                c_int::from(source),
                c_int::from(target),
                promotion as u8 as c_char,
            )
        }
    }

    fn make_best_move(&mut self, depth: u8, white: bool) -> Result<(), String> {
        if self.board.is_null() {
            return Err("engine board is not allocated".into());
        }
        // SAFETY: board is non-null and owned by this backend
        unsafe { MakeBestMove(self.board, c_int::from(depth), white) };
        Ok(())
    }

    fn board_json(&mut self) -> String {
        let mut buffer = [0 as c_char; JSON_BUFFER_SIZE];
        // SAFETY: the engine writes a NUL-terminated string of at most `size` bytes
        unsafe {
            GetBoardJSON(self.board, buffer.as_mut_ptr(), JSON_BUFFER_SIZE as c_int);
        }
        // Force termination in case the engine filled the whole buffer
        buffer[JSON_BUFFER_SIZE - 1] = 0;
        // SAFETY: buffer is NUL-terminated above
        unsafe { CStr::from_ptr(buffer.as_ptr()) }
            .to_string_lossy()
            .into_owned()
    }
}

impl Drop for NativeEngine {
    fn drop(&mut self) {
        self.destroy_board();
    }
}
