use crate::{Slot, UpgradeOutcome};
use serde::{Deserialize, Serialize};

/// State transitions worth broadcasting. The request layer drains these
/// to notify clients; the engine itself never does IO.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Event {
    UpgradeResolved {
        item: String,
        outcome: UpgradeOutcome,
        level: u8,
        cost: i64,
        gold: i64,
    },
    PerkUnlocked {
        item: String,
        perk: String,
        permanent: bool,
    },
    Enchanted {
        slot: Slot,
        attribute: String,
        tier: u8,
        cost: i64,
        xp: i64,
    },
    EnchantmentRerolled {
        slot: Slot,
        index: usize,
        attribute: String,
        tier: u8,
        cost: i64,
        xp: i64,
    },
    ItemEquipped {
        item: String,
        slot: Slot,
        displaced: Option<String>,
    },
    ItemUnequipped { item: String, slot: Slot },
    BadgeUnlocked { badge: String },
    PowerChanged { power: i64 },
}

#[derive(Debug, Default)]
pub struct EventBus {
    queue: Vec<Event>,
}

impl EventBus {
    pub fn push(&mut self, event: Event) {
        self.queue.push(event);
    }

    pub fn drain(&mut self) -> impl Iterator<Item = Event> + '_ {
        self.queue.drain(..)
    }
}
