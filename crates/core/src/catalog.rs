use crate::{AttributeEffect, EnchantAttributeDef, ForgeAttributeDef};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rarity {
    Common,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    /// How many enchantments a slot holding an item of this rarity fits.
    pub fn enchant_slots(self) -> usize {
        match self {
            Rarity::Common => 1,
            Rarity::Rare => 2,
            Rarity::Epic => 3,
            Rarity::Legendary => 4,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Slot {
    Weapon,
    Helmet,
    Chest,
    Gloves,
    Legs,
    Boots,
    Ring,
    Amulet,
}

/// Perk ids granted when an item crosses forge levels 5, 10 and 15.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MilestonePerks {
    #[serde(default, rename = "5")]
    pub level5: Option<String>,
    #[serde(default, rename = "10")]
    pub level10: Option<String>,
    #[serde(default, rename = "15")]
    pub level15: Option<String>,
}

impl MilestonePerks {
    pub fn at(&self, level: u8) -> Option<&str> {
        match level {
            5 => self.level5.as_deref(),
            10 => self.level10.as_deref(),
            15 => self.level15.as_deref(),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemDef {
    pub id: String,
    pub name: String,
    pub rarity: Rarity,
    pub slot: Slot,
    pub base_power: i64,
    #[serde(default)]
    pub milestone_perks: MilestonePerks,
}

/// Condition checked by the equip path when deciding whether a badge
/// has just been earned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BadgeTrigger {
    /// A weapon has been equipped at least once.
    WeaponEquipped,
    /// At least this many permanent perks are unlocked.
    PermanentPerks(u32),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BadgeDef {
    pub id: String,
    pub name: String,
    pub trigger: BadgeTrigger,
    pub effect: AttributeEffect,
}

/// Static reference content: items, attribute tables, badges. Loaded once
/// at process start and injected into every operation, so tests can
/// substitute small fixture catalogs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    pub items: Vec<ItemDef>,
    pub forge_attributes: Vec<ForgeAttributeDef>,
    pub enchant_attributes: Vec<EnchantAttributeDef>,
    #[serde(default)]
    pub badges: Vec<BadgeDef>,
}

impl Catalog {
    pub fn item(&self, id: &str) -> Option<&ItemDef> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn forge_attribute(&self, id: &str) -> Option<&ForgeAttributeDef> {
        self.forge_attributes.iter().find(|attr| attr.id == id)
    }

    pub fn enchant_attribute(&self, id: &str) -> Option<&EnchantAttributeDef> {
        self.enchant_attributes.iter().find(|attr| attr.id == id)
    }

    pub fn badge(&self, id: &str) -> Option<&BadgeDef> {
        self.badges.iter().find(|badge| badge.id == id)
    }
}
