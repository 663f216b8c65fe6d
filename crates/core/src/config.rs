use crate::ENCHANT_TIERS;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const PROBABILITY_EPSILON: f64 = 1e-9;

/// Cost and outcome odds for one forge attempt at the given current level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpgradeRule {
    pub level: u8,
    pub gold_cost: i64,
    pub success: f64,
    pub stay: f64,
    pub downgrade: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpgradeConfig {
    pub max_level: u8,
    pub safe_cost_multiplier: i64,
    pub rules: Vec<UpgradeRule>,
}

/// Tier weights for one position of the enchant cost dial.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TierOdds {
    pub multiplier: u8,
    pub weights: [f64; ENCHANT_TIERS],
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnchantConfig {
    pub base_xp_cost: i64,
    pub level_cost_multiplier: f64,
    pub min_cost_multiplier: u8,
    pub max_cost_multiplier: u8,
    pub tier_odds: Vec<TierOdds>,
}

impl EnchantConfig {
    /// XP price of one enchant or reroll on an item at `upgrade_level`
    /// with the dial at `cost_multiplier`.
    pub fn xp_cost(&self, upgrade_level: u8, cost_multiplier: u8) -> i64 {
        let scaled = self.base_xp_cost as f64
            * self.level_cost_multiplier.powi(upgrade_level as i32)
            * cost_multiplier as f64;
        scaled.floor() as i64
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerConfig {
    pub level_power_factor: f64,
    pub bonus_per_upgrade_level: f64,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("upgrade rule {index} covers level {found}, expected level {expected}")]
    NonContiguousUpgradeRules {
        index: usize,
        expected: u8,
        found: u8,
    },
    #[error("expected {expected} upgrade rules, found {found}")]
    WrongUpgradeRuleCount { expected: usize, found: usize },
    #[error("upgrade odds for level {level} sum to {sum}, expected 1")]
    UpgradeOddsNotNormalized { level: u8, sum: f64 },
    #[error("tier odds row {index} covers multiplier {found}, expected {expected}")]
    NonContiguousTierOdds {
        index: usize,
        expected: u8,
        found: u8,
    },
    #[error("expected {expected} tier odds rows, found {found}")]
    WrongTierOddsCount { expected: usize, found: usize },
    #[error("tier odds for multiplier {multiplier} sum to {sum}, expected 1")]
    TierOddsNotNormalized { multiplier: u8, sum: f64 },
    #[error("negative probability in odds for {context}")]
    NegativeProbability { context: String },
}

/// All tunable tables of the progression economy. Static content,
/// validated once after load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForgeConfig {
    pub upgrade: UpgradeConfig,
    pub enchant: EnchantConfig,
    pub power: PowerConfig,
}

impl ForgeConfig {
    /// Odds row for an attempt from `level` to `level + 1`.
    pub fn upgrade_rule(&self, level: u8) -> Option<&UpgradeRule> {
        self.upgrade.rules.iter().find(|rule| rule.level == level)
    }

    pub fn tier_odds(&self, multiplier: u8) -> Option<&TierOdds> {
        self.enchant
            .tier_odds
            .iter()
            .find(|row| row.multiplier == multiplier)
    }

    /// Checks probability conservation and table shape. Corrupt tables are
    /// a deployment error, so callers are expected to fail hard on `Err`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let expected = self.upgrade.max_level as usize;
        if self.upgrade.rules.len() != expected {
            return Err(ConfigError::WrongUpgradeRuleCount {
                expected,
                found: self.upgrade.rules.len(),
            });
        }
        for (index, rule) in self.upgrade.rules.iter().enumerate() {
            if rule.level as usize != index {
                return Err(ConfigError::NonContiguousUpgradeRules {
                    index,
                    expected: index as u8,
                    found: rule.level,
                });
            }
            if rule.success < 0.0 || rule.stay < 0.0 || rule.downgrade < 0.0 {
                return Err(ConfigError::NegativeProbability {
                    context: format!("upgrade level {}", rule.level),
                });
            }
            let sum = rule.success + rule.stay + rule.downgrade;
            if (sum - 1.0).abs() > PROBABILITY_EPSILON {
                return Err(ConfigError::UpgradeOddsNotNormalized {
                    level: rule.level,
                    sum,
                });
            }
        }
        let expected_rows = (self.enchant.max_cost_multiplier
            - self.enchant.min_cost_multiplier) as usize
            + 1;
        if self.enchant.tier_odds.len() != expected_rows {
            return Err(ConfigError::WrongTierOddsCount {
                expected: expected_rows,
                found: self.enchant.tier_odds.len(),
            });
        }
        for (index, row) in self.enchant.tier_odds.iter().enumerate() {
            let expected = self.enchant.min_cost_multiplier + index as u8;
            if row.multiplier != expected {
                return Err(ConfigError::NonContiguousTierOdds {
                    index,
                    expected,
                    found: row.multiplier,
                });
            }
            if row.weights.iter().any(|w| *w < 0.0) {
                return Err(ConfigError::NegativeProbability {
                    context: format!("tier odds multiplier {}", row.multiplier),
                });
            }
            let sum: f64 = row.weights.iter().sum();
            if (sum - 1.0).abs() > PROBABILITY_EPSILON {
                return Err(ConfigError::TierOddsNotNormalized {
                    multiplier: row.multiplier,
                    sum,
                });
            }
        }
        Ok(())
    }
}
