use crate::verify_catalog;
use anyhow::Context;
use everforge_core::{
    BadgeDef, Catalog, EnchantAttributeDef, EnchantConfig, ForgeAttributeDef, ForgeConfig,
    ItemDef, PowerConfig, UpgradeConfig,
};

const ITEMS_JSON: &str = include_str!("../assets/items.json");
const FORGE_ATTRIBUTES_JSON: &str = include_str!("../assets/forge_attributes.json");
const ENCHANT_ATTRIBUTES_JSON: &str = include_str!("../assets/enchant_attributes.json");
const BADGES_JSON: &str = include_str!("../assets/badges.json");
const UPGRADE_JSON: &str = include_str!("../assets/upgrade.json");
const ENCHANT_JSON: &str = include_str!("../assets/enchant.json");
const POWER_JSON: &str = include_str!("../assets/power.json");

/// The item catalog and attribute tables the game ships with.
pub fn builtin_catalog() -> anyhow::Result<Catalog> {
    let items: Vec<ItemDef> = serde_json::from_str(ITEMS_JSON).context("parse items.json")?;
    let forge_attributes: Vec<ForgeAttributeDef> =
        serde_json::from_str(FORGE_ATTRIBUTES_JSON).context("parse forge_attributes.json")?;
    let enchant_attributes: Vec<EnchantAttributeDef> =
        serde_json::from_str(ENCHANT_ATTRIBUTES_JSON).context("parse enchant_attributes.json")?;
    let badges: Vec<BadgeDef> = serde_json::from_str(BADGES_JSON).context("parse badges.json")?;

    let catalog = Catalog {
        items,
        forge_attributes,
        enchant_attributes,
        badges,
    };
    verify_catalog(&catalog)?;
    Ok(catalog)
}

/// The shipped odds/cost tables: the 15-row forge curve, the 10-row tier
/// odds dial, and the power factors.
pub fn builtin_config() -> anyhow::Result<ForgeConfig> {
    let upgrade: UpgradeConfig =
        serde_json::from_str(UPGRADE_JSON).context("parse upgrade.json")?;
    let enchant: EnchantConfig =
        serde_json::from_str(ENCHANT_JSON).context("parse enchant.json")?;
    let power: PowerConfig = serde_json::from_str(POWER_JSON).context("parse power.json")?;

    let config = ForgeConfig {
        upgrade,
        enchant,
        power,
    };
    config.validate().context("validate builtin forge config")?;
    Ok(config)
}
