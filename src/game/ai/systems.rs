//! AI search task tracking

use crate::game::resources::engine::{EngineError, EngineResult};
use crate::game::resources::turn::ProcessingToken;
use crate::game::types::Side;
use crossbeam_channel::{Receiver, TryRecvError};
use web_time::Instant;

/// An AI search running on the worker thread
///
/// Holds the processing token for the whole search, so no human move and no
/// second AI trigger can start until the result has been applied and this
/// value dropped.
#[derive(Debug)]
pub struct PendingAIMove {
    receiver: Receiver<EngineResult<()>>,
    ready: Option<EngineResult<()>>,
    side: Side,
    depth: u8,
    started: Instant,
    token: ProcessingToken,
}

/// Outcome of a finished search with its timing
#[derive(Debug)]
pub struct CompletedAIMove {
    pub side: Side,
    pub depth: u8,
    pub thinking_time: f32,
    pub result: EngineResult<()>,
    pub token: ProcessingToken,
}

impl PendingAIMove {
    pub fn new(
        receiver: Receiver<EngineResult<()>>,
        side: Side,
        depth: u8,
        token: ProcessingToken,
    ) -> Self {
        Self {
            receiver,
            ready: None,
            side,
            depth,
            started: Instant::now(),
            token,
        }
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn depth(&self) -> u8 {
        self.depth
    }

    fn poll_ready(&mut self) {
        if self.ready.is_some() {
            return;
        }
        match self.receiver.try_recv() {
            Ok(result) => self.ready = Some(result),
            Err(TryRecvError::Disconnected) => {
                self.ready = Some(Err(EngineError::WorkerDisconnected))
            }
            Err(TryRecvError::Empty) => {}
        }
    }

    /// True once the worker has sent its result or died
    pub fn is_finished(&mut self) -> bool {
        self.poll_ready();
        self.ready.is_some()
    }

    /// Takes the result if the search has finished, otherwise gives `self` back
    pub fn try_take(mut self) -> Result<CompletedAIMove, PendingAIMove> {
        self.poll_ready();
        match self.ready.take() {
            Some(result) => Ok(self.complete(result)),
            None => Err(self),
        }
    }

    /// Blocks until the search finishes
    pub fn wait(mut self) -> CompletedAIMove {
        let result = match self.ready.take() {
            Some(result) => result,
            None => self
                .receiver
                .recv()
                .unwrap_or(Err(EngineError::WorkerDisconnected)),
        };
        self.complete(result)
    }

    fn complete(self, result: EngineResult<()>) -> CompletedAIMove {
        CompletedAIMove {
            side: self.side,
            depth: self.depth,
            thinking_time: self.started.elapsed().as_secs_f32(),
            result,
            token: self.token,
        }
    }
}

/// Running totals over the game's AI searches
#[derive(Debug, Default, Clone, PartialEq)]
pub struct AIStatistics {
    pub moves_computed: u32,
    pub failures: u32,
    pub last_depth: u8,
    pub last_thinking_time: f32,
}

impl AIStatistics {
    pub fn record(&mut self, completed: &CompletedAIMove) {
        self.last_depth = completed.depth;
        self.last_thinking_time = completed.thinking_time;
        match completed.result {
            Ok(()) => self.moves_computed += 1,
            Err(_) => self.failures += 1,
        }
    }
}
