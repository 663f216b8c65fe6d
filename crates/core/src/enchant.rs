use crate::{
    compute_power, pick_index, sample_weighted, Catalog, Enchantment, Event, EventBus,
    ForgeConfig, PlayerState, RngState, Slot,
};
use thiserror::Error;

#[derive(Debug, Clone)]
pub struct EnchantReport {
    pub enchantment: Enchantment,
    /// Position of the new or replaced enchantment on the slot.
    pub index: usize,
    pub xp_spent: i64,
    pub message: String,
    pub state: PlayerState,
}

#[derive(Debug, Error)]
pub enum EnchantError {
    #[error("nothing is equipped in the {0:?} slot")]
    SlotEmpty(Slot),
    #[error("unknown item: {0}")]
    UnknownItem(String),
    #[error("{item} has no free enchantment slot ({cap} used)")]
    NoEnchantSlots { item: String, cap: usize },
    #[error("cost multiplier {multiplier} is outside {min}..={max}")]
    InvalidCostMultiplier { multiplier: u8, min: u8, max: u8 },
    #[error("not enough experience: the enchantment costs {needed}, you have {have}")]
    NotEnoughXp { needed: i64, have: i64 },
    #[error("no enchantment at index {index}, the slot holds {len}")]
    InvalidEnchantIndex { index: usize, len: usize },
    #[error("no enchantable attribute left for this slot")]
    NoAttributesAvailable,
    #[error("missing tier odds for cost multiplier {0}")]
    MissingTierOdds(u8),
    #[error("tier odds for cost multiplier {0} have no positive weight")]
    DegenerateTierOdds(u8),
}

/// Rolls a new enchantment onto the slot's equipped item. The cost dial
/// trades XP for better tier odds; the attribute itself is picked
/// uniformly among attributes not already on the slot.
pub fn enchant_item(
    state: &PlayerState,
    catalog: &Catalog,
    config: &ForgeConfig,
    slot: Slot,
    cost_multiplier: u8,
    rng: &mut RngState,
    events: &mut EventBus,
) -> Result<EnchantReport, EnchantError> {
    let (item, cost) = enchant_context(state, catalog, config, slot, cost_multiplier)?;

    let existing = state.slot_enchantments(slot);
    let cap = item.rarity.enchant_slots();
    if existing.len() >= cap {
        return Err(EnchantError::NoEnchantSlots {
            item: item.name.clone(),
            cap,
        });
    }

    let attribute = pick_attribute(catalog, existing, None, rng)?;
    let tier = roll_tier(config, cost_multiplier, rng)?;
    let enchantment = Enchantment {
        attribute: attribute.clone(),
        tier,
    };

    let mut next = state.clone();
    next.xp -= cost;
    let list = next.enchantments.entry(slot).or_default();
    list.push(enchantment.clone());
    let index = list.len() - 1;
    next.power = compute_power(&next, catalog, config);

    let attr_name = catalog
        .enchant_attribute(&attribute)
        .map(|attr| attr.name.clone())
        .unwrap_or_else(|| attribute.clone());
    let message = format!("{} gained {} (tier {})", item.name, attr_name, tier);

    events.push(Event::Enchanted {
        slot,
        attribute,
        tier,
        cost,
        xp: next.xp,
    });
    if next.power != state.power {
        events.push(Event::PowerChanged { power: next.power });
    }

    Ok(EnchantReport {
        enchantment,
        index,
        xp_spent: cost,
        message,
        state: next,
    })
}

/// Re-rolls the enchantment at `index` in place: fresh attribute pick
/// (the other entries' attributes stay excluded, its own may repeat) and
/// an independent tier roll at the same cost as a new enchantment.
pub fn reroll_enchantment(
    state: &PlayerState,
    catalog: &Catalog,
    config: &ForgeConfig,
    slot: Slot,
    index: usize,
    cost_multiplier: u8,
    rng: &mut RngState,
    events: &mut EventBus,
) -> Result<EnchantReport, EnchantError> {
    let (item, cost) = enchant_context(state, catalog, config, slot, cost_multiplier)?;

    let existing = state.slot_enchantments(slot);
    if index >= existing.len() {
        return Err(EnchantError::InvalidEnchantIndex {
            index,
            len: existing.len(),
        });
    }

    let attribute = pick_attribute(catalog, existing, Some(index), rng)?;
    let tier = roll_tier(config, cost_multiplier, rng)?;
    let enchantment = Enchantment {
        attribute: attribute.clone(),
        tier,
    };

    let mut next = state.clone();
    next.xp -= cost;
    if let Some(list) = next.enchantments.get_mut(&slot) {
        list[index] = enchantment.clone();
    }
    next.power = compute_power(&next, catalog, config);

    let attr_name = catalog
        .enchant_attribute(&attribute)
        .map(|attr| attr.name.clone())
        .unwrap_or_else(|| attribute.clone());
    let message = format!(
        "{} rerolled enchantment {} into {} (tier {})",
        item.name, index, attr_name, tier
    );

    events.push(Event::EnchantmentRerolled {
        slot,
        index,
        attribute,
        tier,
        cost,
        xp: next.xp,
    });
    if next.power != state.power {
        events.push(Event::PowerChanged { power: next.power });
    }

    Ok(EnchantReport {
        enchantment,
        index,
        xp_spent: cost,
        message,
        state: next,
    })
}

/// Shared preconditions: dial range, occupied slot, known item, XP cover.
fn enchant_context<'a>(
    state: &PlayerState,
    catalog: &'a Catalog,
    config: &ForgeConfig,
    slot: Slot,
    cost_multiplier: u8,
) -> Result<(&'a crate::ItemDef, i64), EnchantError> {
    let min = config.enchant.min_cost_multiplier;
    let max = config.enchant.max_cost_multiplier;
    if cost_multiplier < min || cost_multiplier > max {
        return Err(EnchantError::InvalidCostMultiplier {
            multiplier: cost_multiplier,
            min,
            max,
        });
    }

    let item_id = state
        .equipment
        .get(&slot)
        .ok_or(EnchantError::SlotEmpty(slot))?;
    let item = catalog
        .item(item_id)
        .ok_or_else(|| EnchantError::UnknownItem(item_id.clone()))?;

    let cost = config
        .enchant
        .xp_cost(state.upgrade_level(item_id), cost_multiplier);
    if state.xp < cost {
        return Err(EnchantError::NotEnoughXp {
            needed: cost,
            have: state.xp,
        });
    }

    Ok((item, cost))
}

/// Uniform pick among attributes not already present on the slot.
/// `reroll_index` exempts the entry being replaced from the exclusion.
fn pick_attribute(
    catalog: &Catalog,
    existing: &[Enchantment],
    reroll_index: Option<usize>,
    rng: &mut RngState,
) -> Result<String, EnchantError> {
    let taken: Vec<&str> = existing
        .iter()
        .enumerate()
        .filter(|(idx, _)| Some(*idx) != reroll_index)
        .map(|(_, enchantment)| enchantment.attribute.as_str())
        .collect();
    let pool: Vec<usize> = catalog
        .enchant_attributes
        .iter()
        .enumerate()
        .filter(|(_, attr)| !taken.contains(&attr.id.as_str()))
        .map(|(idx, _)| idx)
        .collect();
    pick_index(&pool, rng)
        .map(|idx| catalog.enchant_attributes[idx].id.clone())
        .ok_or(EnchantError::NoAttributesAvailable)
}

fn roll_tier(
    config: &ForgeConfig,
    cost_multiplier: u8,
    rng: &mut RngState,
) -> Result<u8, EnchantError> {
    let row = config
        .tier_odds(cost_multiplier)
        .ok_or(EnchantError::MissingTierOdds(cost_multiplier))?;
    sample_weighted(&row.weights, rng)
        .map(|idx| idx as u8 + 1)
        .ok_or(EnchantError::DegenerateTierOdds(cost_multiplier))
}
