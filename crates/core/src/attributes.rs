use serde::{Deserialize, Serialize};

/// A single effect carried by a perk, badge, or enchantment tier.
///
/// Only the power-shaped variants participate in power aggregation;
/// the rate bonuses are consumed by the idle income loop outside this
/// crate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum AttributeEffect {
    /// Flat power added to the total.
    AddPower(f64),
    /// Flat power per player level, added to the total.
    AddPowerPerLevel(f64),
    /// Fractional bonus applied to the equipment-power subtotal only.
    MultiplyEquipmentPower(f64),
    /// Fractional bonus applied to the whole power total.
    MultiplyPower(f64),
    /// Fractional bonus to gold income. No power contribution.
    AddGoldRate(f64),
    /// Fractional bonus to experience income. No power contribution.
    AddXpRate(f64),
}

/// A milestone perk granted by forging an item to level 5, 10 or 15.
/// The magnitude is fixed per perk; there are no tiers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForgeAttributeDef {
    pub id: String,
    pub name: String,
    pub effect: AttributeEffect,
}

/// The effect family of an enchantable attribute. The magnitude comes
/// from the rolled tier, not from this kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnchantEffectKind {
    AddPower,
    AddPowerPerLevel,
    MultiplyEquipmentPower,
    AddGoldRate,
    AddXpRate,
}

pub const ENCHANT_TIERS: usize = 5;

/// An attribute that can be rolled onto an equipment slot, with one
/// magnitude per tier 1..=5.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnchantAttributeDef {
    pub id: String,
    pub name: String,
    pub kind: EnchantEffectKind,
    pub tier_values: [f64; ENCHANT_TIERS],
}

impl EnchantAttributeDef {
    pub fn value_at(&self, tier: u8) -> f64 {
        let idx = (tier.clamp(1, ENCHANT_TIERS as u8) - 1) as usize;
        self.tier_values[idx]
    }
}

/// A rolled enchantment as stored on a slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enchantment {
    pub attribute: String,
    pub tier: u8,
}
