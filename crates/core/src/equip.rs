use crate::{
    compute_power, BadgeTrigger, Catalog, Event, EventBus, ForgeConfig, PlayerState, Slot,
};
use thiserror::Error;

#[derive(Debug, Clone)]
pub struct EquipReport {
    pub slot: Slot,
    /// Item pushed out of the slot, if it was occupied.
    pub displaced: Option<String>,
    pub new_badges: Vec<String>,
    pub message: String,
    pub state: PlayerState,
}

#[derive(Debug, Error)]
pub enum EquipError {
    #[error("unknown item: {0}")]
    UnknownItem(String),
}

/// Places an item into its slot. Forge levels are item-keyed and are never
/// touched here: the displaced occupant keeps its progress, the incoming
/// item brings its own. Slot-keyed enchantments do not move with items,
/// so displacing an occupant clears the slot's enchantment list exactly
/// like an unequip would.
pub fn equip_item(
    state: &PlayerState,
    catalog: &Catalog,
    config: &ForgeConfig,
    item_id: &str,
    events: &mut EventBus,
) -> Result<EquipReport, EquipError> {
    let item = catalog
        .item(item_id)
        .ok_or_else(|| EquipError::UnknownItem(item_id.to_string()))?;
    let slot = item.slot;

    // Already sitting in its slot: nothing to do, keep the slot's
    // enchantments intact.
    if state.equipment.get(&slot).map(String::as_str) == Some(item_id) {
        return Ok(EquipReport {
            slot,
            displaced: None,
            new_badges: Vec::new(),
            message: format!("{} is already equipped", item.name),
            state: state.clone(),
        });
    }

    let mut next = state.clone();

    // Defensive: pull the item out of whatever other slot it sits in.
    if let Some(previous_slot) = next.equipped_slot_of(item_id) {
        next.equipment.remove(&previous_slot);
        next.enchantments.remove(&previous_slot);
    }

    let displaced = next.equipment.insert(slot, item_id.to_string());
    if displaced.is_some() {
        next.enchantments.remove(&slot);
    }

    if slot == Slot::Weapon {
        next.weapon_equipped = true;
    }

    let new_badges = unlock_badges(&mut next, catalog);
    next.power = compute_power(&next, catalog, config);

    events.push(Event::ItemEquipped {
        item: item_id.to_string(),
        slot,
        displaced: displaced.clone(),
    });
    for badge in &new_badges {
        events.push(Event::BadgeUnlocked {
            badge: badge.clone(),
        });
    }
    if next.power != state.power {
        events.push(Event::PowerChanged { power: next.power });
    }

    let message = format!("{} equipped in the {:?} slot", item.name, slot);
    Ok(EquipReport {
        slot,
        displaced,
        new_badges,
        message,
        state: next,
    })
}

/// Clears a slot. The item's forge level and any permanent perks survive;
/// the slot's enchantments do not. No-op when the slot is already empty.
pub fn unequip_item(
    state: &PlayerState,
    catalog: &Catalog,
    config: &ForgeConfig,
    slot: Slot,
    events: &mut EventBus,
) -> PlayerState {
    let mut next = state.clone();
    let Some(item_id) = next.equipment.remove(&slot) else {
        return next;
    };
    next.enchantments.remove(&slot);
    next.power = compute_power(&next, catalog, config);

    events.push(Event::ItemUnequipped {
        item: item_id,
        slot,
    });
    if next.power != state.power {
        events.push(Event::PowerChanged { power: next.power });
    }
    next
}

/// Evaluates badge triggers against the updated state and records newly
/// earned badges. Earned badges are never revoked.
fn unlock_badges(state: &mut PlayerState, catalog: &Catalog) -> Vec<String> {
    let mut unlocked = Vec::new();
    for badge in &catalog.badges {
        if state.badges.contains(&badge.id) {
            continue;
        }
        let earned = match badge.trigger {
            BadgeTrigger::WeaponEquipped => state.weapon_equipped,
            BadgeTrigger::PermanentPerks(count) => {
                state.permanent_perks.len() >= count as usize
            }
        };
        if earned {
            state.badges.insert(badge.id.clone());
            unlocked.push(badge.id.clone());
        }
    }
    unlocked
}
