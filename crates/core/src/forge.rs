use crate::{
    compute_power, sample_weighted, Catalog, Event, EventBus, ForgeConfig, PlayerState, RngState,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UpgradeOutcome {
    Success,
    Stay,
    Downgrade,
}

#[derive(Debug, Clone)]
pub struct UpgradeReport {
    pub outcome: UpgradeOutcome,
    /// Forge level after the attempt.
    pub level: u8,
    pub gold_spent: i64,
    /// Milestone perk crossed by this attempt, if any.
    pub unlocked_perk: Option<String>,
    pub message: String,
    pub state: PlayerState,
}

#[derive(Debug, Error)]
pub enum UpgradeError {
    #[error("unknown item: {0}")]
    UnknownItem(String),
    #[error("{0} must be equipped before it can be forged")]
    NotEquipped(String),
    #[error("{item} is already at the maximum forge level {level}")]
    AlreadyMaxLevel { item: String, level: u8 },
    #[error("not enough gold: the forge costs {needed}, you have {have}")]
    NotEnoughGold { needed: i64, have: i64 },
    #[error("missing upgrade rule for level {0}")]
    MissingUpgradeRule(u8),
    #[error("upgrade odds for level {0} have no positive weight")]
    DegenerateOdds(u8),
}

/// One forge attempt on an equipped item. Gold is spent on the attempt
/// itself, whatever the outcome; precondition failures spend nothing and
/// leave the snapshot untouched.
pub fn upgrade_item(
    state: &PlayerState,
    catalog: &Catalog,
    config: &ForgeConfig,
    item_id: &str,
    safe: bool,
    rng: &mut RngState,
    events: &mut EventBus,
) -> Result<UpgradeReport, UpgradeError> {
    let item = catalog
        .item(item_id)
        .ok_or_else(|| UpgradeError::UnknownItem(item_id.to_string()))?;
    if !state.is_equipped(item_id) {
        return Err(UpgradeError::NotEquipped(item.name.clone()));
    }

    let level = state.upgrade_level(item_id);
    if level >= config.upgrade.max_level {
        return Err(UpgradeError::AlreadyMaxLevel {
            item: item.name.clone(),
            level,
        });
    }

    let rule = config
        .upgrade_rule(level)
        .ok_or(UpgradeError::MissingUpgradeRule(level))?;
    let cost = if safe {
        rule.gold_cost * config.upgrade.safe_cost_multiplier
    } else {
        rule.gold_cost
    };
    if state.gold < cost {
        return Err(UpgradeError::NotEnoughGold {
            needed: cost,
            have: state.gold,
        });
    }

    // Safe mode buys out the downgrade branch; its mass moves to stay.
    let weights = if safe {
        [rule.success, rule.stay + rule.downgrade, 0.0]
    } else {
        [rule.success, rule.stay, rule.downgrade]
    };
    let outcome = match sample_weighted(&weights, rng) {
        Some(0) => UpgradeOutcome::Success,
        Some(1) => UpgradeOutcome::Stay,
        Some(2) => UpgradeOutcome::Downgrade,
        _ => return Err(UpgradeError::DegenerateOdds(level)),
    };

    let mut next = state.clone();
    next.gold -= cost;
    let new_level = match outcome {
        UpgradeOutcome::Success => level + 1,
        UpgradeOutcome::Stay => level,
        UpgradeOutcome::Downgrade => level.saturating_sub(1),
    };
    next.upgrade_levels.insert(item_id.to_string(), new_level);

    let mut unlocked_perk = None;
    if outcome == UpgradeOutcome::Success {
        // Level steps are +-1, so crossing a milestone from below means
        // landing exactly on it.
        if let Some(perk_id) = item.milestone_perks.at(new_level) {
            let permanent = new_level == config.upgrade.max_level;
            if permanent {
                next.permanent_perks.insert(perk_id.to_string());
            }
            unlocked_perk = Some(perk_id.to_string());
            events.push(Event::PerkUnlocked {
                item: item_id.to_string(),
                perk: perk_id.to_string(),
                permanent,
            });
        }
    }

    next.power = compute_power(&next, catalog, config);

    let message = match outcome {
        UpgradeOutcome::Success => format!("{} reached forge level {}", item.name, new_level),
        UpgradeOutcome::Stay => format!("The forge held: {} stays at level {}", item.name, level),
        UpgradeOutcome::Downgrade => {
            format!("The forge slipped: {} fell to level {}", item.name, new_level)
        }
    };

    events.push(Event::UpgradeResolved {
        item: item_id.to_string(),
        outcome,
        level: new_level,
        cost,
        gold: next.gold,
    });
    if next.power != state.power {
        events.push(Event::PowerChanged { power: next.power });
    }

    Ok(UpgradeReport {
        outcome,
        level: new_level,
        gold_spent: cost,
        unlocked_perk,
        message,
        state: next,
    })
}
