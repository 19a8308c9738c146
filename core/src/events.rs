use alloc::boxed::Box;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::{CardIndex, Score};

/// Signals the presentation layer needs to animate flips, play sounds, and
/// show end-of-game panels. The engine queues these; drain them after every
/// operation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Board or session was (re)built; re-bind input handlers.
    BoardBuilt,
    CardRevealed(CardIndex),
    /// Emitted as soon as the second card of a pair is compared. A
    /// mismatched pair flips back later, after the configured delay.
    PairResolved {
        matched: bool,
        indices: [CardIndex; 2],
    },
    GameOver { final_score: Score },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

/// Callback-style fan-out over drained engine events, for embedders that
/// prefer subscribe/unsubscribe wiring over polling the queue.
#[derive(Default)]
pub struct EventBus {
    next_id: u64,
    subscribers: Vec<(SubscriptionId, Box<dyn FnMut(&GameEvent)>)>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, callback: impl FnMut(&GameEvent) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub_id, _)| *sub_id != id);
        self.subscribers.len() != before
    }

    pub fn dispatch(&mut self, events: &[GameEvent]) {
        for event in events {
            for (_, callback) in &mut self.subscribers {
                callback(event);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use core::cell::RefCell;

    #[test]
    fn subscribers_see_events_until_unsubscribed() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut bus = EventBus::new();

        let sink = Rc::clone(&seen);
        let id = bus.subscribe(move |event| sink.borrow_mut().push(*event));

        bus.dispatch(&[GameEvent::BoardBuilt, GameEvent::CardRevealed(3)]);
        assert_eq!(
            *seen.borrow(),
            [GameEvent::BoardBuilt, GameEvent::CardRevealed(3)]
        );

        assert!(bus.unsubscribe(id));
        assert!(!bus.unsubscribe(id));

        bus.dispatch(&[GameEvent::GameOver { final_score: 20 }]);
        assert_eq!(seen.borrow().len(), 2);
    }

    #[test]
    fn events_fan_out_to_every_subscriber() {
        let left = Rc::new(RefCell::new(0u32));
        let right = Rc::new(RefCell::new(0u32));
        let mut bus = EventBus::new();

        let counter = Rc::clone(&left);
        bus.subscribe(move |_| *counter.borrow_mut() += 1);
        let counter = Rc::clone(&right);
        bus.subscribe(move |_| *counter.borrow_mut() += 1);

        bus.dispatch(&[GameEvent::BoardBuilt]);
        assert_eq!((*left.borrow(), *right.borrow()), (1, 1));
    }
}
