use crate::{AttributeEffect, BoostKind, Catalog, EnchantEffectKind, ForgeConfig, PlayerState};

/// Running buckets for one aggregation pass. Multipliers within a bucket
/// stack additively, so contribution order never matters.
#[derive(Debug, Default)]
struct Totals {
    additive: f64,
    equipment_multiplier: f64,
    total_multiplier: f64,
}

impl Totals {
    fn apply(&mut self, effect: AttributeEffect, player_level: u32) {
        match effect {
            AttributeEffect::AddPower(value) => self.additive += value,
            AttributeEffect::AddPowerPerLevel(value) => {
                self.additive += value * player_level as f64;
            }
            AttributeEffect::MultiplyEquipmentPower(value) => {
                self.equipment_multiplier += value;
            }
            AttributeEffect::MultiplyPower(value) => self.total_multiplier += value,
            AttributeEffect::AddGoldRate(_) | AttributeEffect::AddXpRate(_) => {}
        }
    }
}

/// Derives the player's combat power from scratch. Total over any
/// well-formed state; dangling catalog references mean corrupted static
/// data and abort.
///
/// Rounding happens exactly once, on the final sum. Per-item rounding
/// would drift the total and is deliberately absent.
pub fn compute_power(state: &PlayerState, catalog: &Catalog, config: &ForgeConfig) -> i64 {
    let base = state.player_level as f64 * config.power.level_power_factor
        + state.permanent_power_bonus;

    let mut equipment = 0.0;
    let mut totals = Totals::default();

    for (slot, item_id) in &state.equipment {
        let item = catalog
            .item(item_id)
            .expect("equipped item missing from catalog");
        let level = state.upgrade_level(item_id);

        let item_power = item.base_power as f64 * (1.0 + state.colossus_multiplier);
        equipment += item_power
            + item_power * level as f64 * config.power.bonus_per_upgrade_level;

        // Milestone perks at 5 and 10 are live only while the item sits
        // equipped at that level. The level-15 perk is account-wide and
        // arrives through the permanent set instead.
        for milestone in [5u8, 10] {
            if level >= milestone {
                if let Some(perk_id) = item.milestone_perks.at(milestone) {
                    let perk = catalog
                        .forge_attribute(perk_id)
                        .expect("milestone perk missing from catalog");
                    totals.apply(perk.effect, state.player_level);
                }
            }
        }

        for enchantment in state.slot_enchantments(*slot) {
            let attr = catalog
                .enchant_attribute(&enchantment.attribute)
                .expect("enchantment attribute missing from catalog");
            let value = attr.value_at(enchantment.tier);
            let effect = match attr.kind {
                EnchantEffectKind::AddPower => AttributeEffect::AddPower(value),
                EnchantEffectKind::AddPowerPerLevel => AttributeEffect::AddPowerPerLevel(value),
                EnchantEffectKind::MultiplyEquipmentPower => {
                    AttributeEffect::MultiplyEquipmentPower(value)
                }
                EnchantEffectKind::AddGoldRate => AttributeEffect::AddGoldRate(value),
                EnchantEffectKind::AddXpRate => AttributeEffect::AddXpRate(value),
            };
            totals.apply(effect, state.player_level);
        }
    }

    for perk_id in &state.permanent_perks {
        let perk = catalog
            .forge_attribute(perk_id)
            .expect("permanent perk missing from catalog");
        totals.apply(perk.effect, state.player_level);
    }

    for badge_id in &state.badges {
        let badge = catalog
            .badge(badge_id)
            .expect("earned badge missing from catalog");
        totals.apply(badge.effect, state.player_level);
    }

    for boost in &state.boosts {
        if boost.kind == BoostKind::Power {
            totals.additive += boost.amount;
        }
    }

    let total = (base + equipment * (1.0 + totals.equipment_multiplier) + totals.additive)
        * (1.0 + totals.total_multiplier);
    total.round().max(0.0) as i64
}
