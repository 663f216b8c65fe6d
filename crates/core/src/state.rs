use crate::{Enchantment, Slot};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Kinds of temporary boosts the idle loop can hand out. Only `Power`
/// participates in power aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoostKind {
    Power,
    GoldRate,
    XpRate,
}

/// A temporary flat bonus. Expiry is the caller's concern: the engine
/// treats every boost present in the state as active.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Boost {
    pub kind: BoostKind,
    pub amount: f64,
}

/// One player's full progression snapshot. Operations consume a snapshot
/// and return a new one; nothing here is shared or locked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    pub player_level: u32,
    pub gold: i64,
    pub xp: i64,
    /// At most one item per slot.
    pub equipment: HashMap<Slot, String>,
    /// Forge level per item id. Item-keyed on purpose: progress belongs to
    /// the item identity and must survive any amount of slot churn.
    pub upgrade_levels: HashMap<String, u8>,
    /// Enchantments per slot. Slot-keyed on purpose, unlike the forge
    /// levels above: unequipping abandons the slot's enchantments.
    pub enchantments: HashMap<Slot, Vec<Enchantment>>,
    /// Level-15 milestone perks. Grows monotonically, never pruned.
    pub permanent_perks: HashSet<String>,
    pub badges: HashSet<String>,
    #[serde(default)]
    pub boosts: Vec<Boost>,
    #[serde(default)]
    pub permanent_power_bonus: f64,
    #[serde(default)]
    pub colossus_multiplier: f64,
    /// One-way flag for the achievement system; set on first weapon equip.
    #[serde(default)]
    pub weapon_equipped: bool,
    /// Last computed power. A cache of `compute_power`, never a source of
    /// truth.
    #[serde(default)]
    pub power: i64,
}

impl PlayerState {
    pub fn new(player_level: u32) -> Self {
        Self {
            player_level,
            gold: 0,
            xp: 0,
            equipment: HashMap::new(),
            upgrade_levels: HashMap::new(),
            enchantments: HashMap::new(),
            permanent_perks: HashSet::new(),
            badges: HashSet::new(),
            boosts: Vec::new(),
            permanent_power_bonus: 0.0,
            colossus_multiplier: 0.0,
            weapon_equipped: false,
            power: 0,
        }
    }

    /// The slot an item currently occupies, if any.
    pub fn equipped_slot_of(&self, item_id: &str) -> Option<Slot> {
        self.equipment
            .iter()
            .find(|(_, id)| id.as_str() == item_id)
            .map(|(slot, _)| *slot)
    }

    pub fn is_equipped(&self, item_id: &str) -> bool {
        self.equipped_slot_of(item_id).is_some()
    }

    /// Forge level of an item, defaulting to 0 for items never forged.
    pub fn upgrade_level(&self, item_id: &str) -> u8 {
        self.upgrade_levels.get(item_id).copied().unwrap_or(0)
    }

    pub fn slot_enchantments(&self, slot: Slot) -> &[Enchantment] {
        self.enchantments
            .get(&slot)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}
