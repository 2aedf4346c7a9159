//! Synchronous notification of combat, turn and battle events.
//!
//! Listeners subscribe to one [`EventTopic`] and are called in subscription
//! order, on the engine's thread, before the triggering engine call returns.

use crate::error::DeadCharacter;
use crate::state::{CharacterId, TurnState};

use super::turns::BattleSummary;

/// Something observable that happened during a battle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CombatEvent {
    /// HP was removed from a living character.
    CharacterDamaged {
        target: CharacterId,
        source: Option<CharacterId>,
        amount: u32,
        remaining_hp: u32,
    },

    /// A character reached 0 HP. Fires exactly once per death.
    CharacterKilled {
        target: CharacterId,
        killer: Option<CharacterId>,
        death: DeadCharacter,
    },

    CharacterRevived { target: CharacterId, hp: u32 },

    /// Control passed to `turn.active` and its housekeeping ran.
    TurnStarted { turn: TurnState },

    /// One side prevailed or both were wiped out.
    BattleEnded { summary: BattleSummary },

    /// The turn ceiling was reached with both sides still standing.
    BattleAborted { summary: BattleSummary },
}

impl CombatEvent {
    pub const fn topic(&self) -> EventTopic {
        match self {
            Self::CharacterDamaged { .. }
            | Self::CharacterKilled { .. }
            | Self::CharacterRevived { .. } => EventTopic::Combat,
            Self::TurnStarted { .. } => EventTopic::Turn,
            Self::BattleEnded { .. } | Self::BattleAborted { .. } => EventTopic::Battle,
        }
    }
}

/// Event categories listeners subscribe to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
pub enum EventTopic {
    Combat,
    Turn,
    Battle,
}

/// Receives events for the topic it was subscribed to.
pub trait CombatListener {
    fn on_event(&mut self, event: &CombatEvent);
}

impl<F> CombatListener for F
where
    F: FnMut(&CombatEvent),
{
    fn on_event(&mut self, event: &CombatEvent) {
        self(event)
    }
}

/// Handle returned by [`EventBus::subscribe`], used to unsubscribe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

struct Subscription {
    id: ListenerId,
    topic: EventTopic,
    listener: Box<dyn CombatListener>,
}

/// Topic-routed listener registry.
#[derive(Default)]
pub struct EventBus {
    subscriptions: Vec<Subscription>,
    next_id: u64,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(
        &mut self,
        topic: EventTopic,
        listener: impl CombatListener + 'static,
    ) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.subscriptions.push(Subscription {
            id,
            topic,
            listener: Box::new(listener),
        });
        id
    }

    /// Returns false if the listener was already gone.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.subscriptions.len();
        self.subscriptions.retain(|s| s.id != id);
        self.subscriptions.len() != before
    }

    pub fn emit(&mut self, event: &CombatEvent) {
        let topic = event.topic();
        for subscription in self.subscriptions.iter_mut().filter(|s| s.topic == topic) {
            subscription.listener.on_event(event);
        }
    }

    pub fn listener_count(&self, topic: EventTopic) -> usize {
        self.subscriptions.iter().filter(|s| s.topic == topic).count()
    }
}

impl core::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.subscriptions.len())
            .field("next_id", &self.next_id)
            .finish()
    }
}
