//! Game events published by the orchestrator
//!
//! Listeners register with [`EventBus::subscribe`] and read from the returned
//! channel. Every live subscriber receives every event, in publication order.
//! Subscribers whose receiver has been dropped are pruned on the next publish.

use crate::game::resources::engine::GameState;
use crate::game::resources::game_over::GameOverReason;
use crate::game::types::Side;
use crossbeam_channel::{Receiver, Sender};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// A move (human or AI) was applied and the new status committed
    MoveApplied {
        notation: String,
        side: Side,
        move_number: u32,
        state: GameState,
    },
    /// `Side` is now to move
    TurnChanged(Side),
    /// The AI search for `Side` has started
    AiThinking(Side),
    /// Published once per game
    GameOver(GameOverReason),
    /// A recoverable error surfaced at the orchestration boundary
    Error(String),
}

#[derive(Debug, Default)]
pub struct EventBus {
    subscribers: Vec<Sender<GameEvent>>,
}

impl EventBus {
    pub fn subscribe(&mut self) -> Receiver<GameEvent> {
        let (sender, receiver) = crossbeam_channel::unbounded();
        self.subscribers.push(sender);
        receiver
    }

    pub fn publish(&mut self, event: GameEvent) {
        self.subscribers
            .retain(|subscriber| subscriber.send(event.clone()).is_ok());
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}
