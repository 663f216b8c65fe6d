use anyhow::Context;
use everforge_core::{
    BadgeDef, Catalog, EnchantAttributeDef, EnchantConfig, ForgeAttributeDef, ForgeConfig,
    ItemDef, PowerConfig, UpgradeConfig,
};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

const BADGES_FILE: &str = "badges.json";

/// Loads the item catalog and attribute tables from a content directory.
/// Badges are optional; everything else is required.
pub fn load_catalog(dir: &Path) -> anyhow::Result<Catalog> {
    let items: Vec<ItemDef> = load_json(dir.join("items.json"))?;
    let forge_attributes: Vec<ForgeAttributeDef> = load_json(dir.join("forge_attributes.json"))?;
    let enchant_attributes: Vec<EnchantAttributeDef> =
        load_json(dir.join("enchant_attributes.json"))?;
    let badges_path = dir.join(BADGES_FILE);
    let badges: Vec<BadgeDef> = if badges_path.exists() {
        load_json(badges_path)?
    } else {
        Vec::new()
    };

    let catalog = Catalog {
        items,
        forge_attributes,
        enchant_attributes,
        badges,
    };
    verify_catalog(&catalog)?;
    Ok(catalog)
}

/// Loads and validates the odds/cost tables from a content directory.
pub fn load_config(dir: &Path) -> anyhow::Result<ForgeConfig> {
    let upgrade: UpgradeConfig = load_json(dir.join("upgrade.json"))?;
    let enchant: EnchantConfig = load_json(dir.join("enchant.json"))?;
    let power: PowerConfig = load_json(dir.join("power.json"))?;

    let config = ForgeConfig {
        upgrade,
        enchant,
        power,
    };
    config.validate().context("validate forge config")?;
    Ok(config)
}

/// Cross-checks catalog references: every milestone perk must name a known
/// forge attribute. A dangling id here would abort power aggregation at
/// runtime, so it is rejected at load time instead.
pub fn verify_catalog(catalog: &Catalog) -> anyhow::Result<()> {
    for item in &catalog.items {
        for milestone in [5u8, 10, 15] {
            if let Some(perk_id) = item.milestone_perks.at(milestone) {
                if catalog.forge_attribute(perk_id).is_none() {
                    anyhow::bail!(
                        "item {} references unknown perk {} at milestone {}",
                        item.id,
                        perk_id,
                        milestone
                    );
                }
            }
        }
    }
    Ok(())
}

fn load_json<T: DeserializeOwned>(path: PathBuf) -> anyhow::Result<T> {
    let raw = fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
    let value =
        serde_json::from_str(&raw).with_context(|| format!("parse {}", path.display()))?;
    Ok(value)
}
