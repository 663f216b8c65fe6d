use everforge_core::{
    enchant_item, reroll_enchantment, Catalog, EnchantAttributeDef, EnchantConfig, EnchantError,
    EnchantEffectKind, Enchantment, EventBus, ForgeConfig, ItemDef, MilestonePerks, PlayerState,
    PowerConfig, Rarity, RngState, Slot, TierOdds, UpgradeConfig,
};

fn config() -> ForgeConfig {
    ForgeConfig {
        upgrade: UpgradeConfig {
            max_level: 15,
            safe_cost_multiplier: 3,
            rules: Vec::new(),
        },
        enchant: EnchantConfig {
            base_xp_cost: 1000,
            level_cost_multiplier: 1.5,
            min_cost_multiplier: 1,
            max_cost_multiplier: 10,
            tier_odds: (1..=10)
                .map(|multiplier| TierOdds {
                    multiplier,
                    weights: [0.2, 0.2, 0.2, 0.2, 0.2],
                })
                .collect(),
        },
        power: PowerConfig {
            level_power_factor: 5.0,
            bonus_per_upgrade_level: 0.05,
        },
    }
}

/// Same config with the top dial position forcing tier 5.
fn config_forcing_tier5_at_max() -> ForgeConfig {
    let mut config = config();
    config.enchant.tier_odds[9].weights = [0.0, 0.0, 0.0, 0.0, 1.0];
    config
}

fn attr(id: &str, kind: EnchantEffectKind) -> EnchantAttributeDef {
    EnchantAttributeDef {
        id: id.into(),
        name: id.into(),
        kind,
        tier_values: [1.0, 2.0, 3.0, 4.0, 5.0],
    }
}

fn catalog(rarity: Rarity, attributes: Vec<EnchantAttributeDef>) -> Catalog {
    Catalog {
        items: vec![ItemDef {
            id: "emberfang".into(),
            name: "Emberfang".into(),
            rarity,
            slot: Slot::Weapon,
            base_power: 20,
            milestone_perks: MilestonePerks::default(),
        }],
        forge_attributes: Vec::new(),
        enchant_attributes: attributes,
        badges: Vec::new(),
    }
}

fn three_attributes() -> Vec<EnchantAttributeDef> {
    vec![
        attr("power_shard", EnchantEffectKind::AddPower),
        attr("scaling_rune", EnchantEffectKind::AddPowerPerLevel),
        attr("midas_sigil", EnchantEffectKind::AddGoldRate),
    ]
}

fn equipped_state(xp: i64) -> PlayerState {
    let mut state = PlayerState::new(10);
    state.xp = xp;
    state.equipment.insert(Slot::Weapon, "emberfang".into());
    state
}

#[test]
fn xp_cost_scales_with_forge_level_and_dial() {
    let catalog = catalog(Rarity::Epic, three_attributes());
    let config = config();
    let mut rng = RngState::from_seed(11);
    let mut events = EventBus::default();

    // floor(1000 * 1.5^2 * 4) = 9000
    let mut state = equipped_state(9_000);
    state.upgrade_levels.insert("emberfang".into(), 2);
    let report = enchant_item(
        &state, &catalog, &config, Slot::Weapon, 4, &mut rng, &mut events,
    )
    .unwrap();
    assert_eq!(report.xp_spent, 9_000);
    assert_eq!(report.state.xp, 0);
    assert_eq!(report.state.slot_enchantments(Slot::Weapon).len(), 1);

    let mut state = equipped_state(8_999);
    state.upgrade_levels.insert("emberfang".into(), 2);
    let err = enchant_item(
        &state, &catalog, &config, Slot::Weapon, 4, &mut rng, &mut events,
    )
    .unwrap_err();
    assert!(matches!(
        err,
        EnchantError::NotEnoughXp {
            needed: 9_000,
            have: 8_999
        }
    ));
}

#[test]
fn rarity_caps_the_enchantment_count() {
    let catalog = catalog(Rarity::Common, three_attributes());
    let config = config();
    let mut rng = RngState::from_seed(12);
    let mut events = EventBus::default();

    let state = equipped_state(100_000);
    let state = enchant_item(
        &state, &catalog, &config, Slot::Weapon, 1, &mut rng, &mut events,
    )
    .unwrap()
    .state;

    let err = enchant_item(
        &state, &catalog, &config, Slot::Weapon, 1, &mut rng, &mut events,
    )
    .unwrap_err();
    assert!(matches!(err, EnchantError::NoEnchantSlots { cap: 1, .. }));
}

#[test]
fn duplicate_attributes_are_excluded() {
    let attributes = vec![
        attr("power_shard", EnchantEffectKind::AddPower),
        attr("scaling_rune", EnchantEffectKind::AddPowerPerLevel),
    ];
    let catalog = catalog(Rarity::Epic, attributes);
    let config = config();
    let mut rng = RngState::from_seed(13);
    let mut events = EventBus::default();

    let mut state = equipped_state(1_000_000);
    for _ in 0..2 {
        state = enchant_item(
            &state, &catalog, &config, Slot::Weapon, 1, &mut rng, &mut events,
        )
        .unwrap()
        .state;
    }
    let rolled = state.slot_enchantments(Slot::Weapon);
    assert_eq!(rolled.len(), 2);
    assert_ne!(rolled[0].attribute, rolled[1].attribute);

    // Epic fits three, but both attributes are taken.
    let err = enchant_item(
        &state, &catalog, &config, Slot::Weapon, 1, &mut rng, &mut events,
    )
    .unwrap_err();
    assert!(matches!(err, EnchantError::NoAttributesAvailable));
}

#[test]
fn dial_position_drives_tier_odds() {
    let catalog = catalog(Rarity::Legendary, three_attributes());
    let config = config_forcing_tier5_at_max();
    let mut rng = RngState::from_seed(14);
    let mut events = EventBus::default();

    let state = equipped_state(1_000_000);
    let report = enchant_item(
        &state, &catalog, &config, Slot::Weapon, 10, &mut rng, &mut events,
    )
    .unwrap();
    assert_eq!(report.enchantment.tier, 5);
    assert_eq!(report.xp_spent, 10_000);
}

#[test]
fn reroll_replaces_in_place() {
    let catalog = catalog(Rarity::Epic, three_attributes());
    let config = config();
    let mut rng = RngState::from_seed(15);
    let mut events = EventBus::default();

    let mut state = equipped_state(1_000_000);
    state.enchantments.insert(
        Slot::Weapon,
        vec![
            Enchantment {
                attribute: "power_shard".into(),
                tier: 1,
            },
            Enchantment {
                attribute: "scaling_rune".into(),
                tier: 2,
            },
        ],
    );

    let report = reroll_enchantment(
        &state, &catalog, &config, Slot::Weapon, 0, 1, &mut rng, &mut events,
    )
    .unwrap();
    assert_eq!(report.index, 0);
    let rolled = report.state.slot_enchantments(Slot::Weapon);
    assert_eq!(rolled.len(), 2);
    // The untouched entry stays; the rerolled one may keep its own
    // attribute but never copies a neighbour's.
    assert_eq!(rolled[1].attribute, "scaling_rune");
    assert_ne!(rolled[0].attribute, "scaling_rune");
    assert_eq!(report.state.xp, 1_000_000 - 1_000);
    // The message talks about the enchantment position, not an equipment slot.
    assert!(report.message.contains("rerolled enchantment 0"));
}

#[test]
fn reroll_index_must_exist() {
    let catalog = catalog(Rarity::Epic, three_attributes());
    let config = config();
    let mut rng = RngState::from_seed(16);
    let mut events = EventBus::default();

    let state = equipped_state(1_000_000);
    let err = reroll_enchantment(
        &state, &catalog, &config, Slot::Weapon, 0, 1, &mut rng, &mut events,
    )
    .unwrap_err();
    assert!(matches!(
        err,
        EnchantError::InvalidEnchantIndex { index: 0, len: 0 }
    ));
}

#[test]
fn slot_and_dial_preconditions() {
    let catalog = catalog(Rarity::Epic, three_attributes());
    let config = config();
    let mut rng = RngState::from_seed(17);
    let mut events = EventBus::default();

    let empty = PlayerState::new(10);
    let err = enchant_item(
        &empty, &catalog, &config, Slot::Weapon, 1, &mut rng, &mut events,
    )
    .unwrap_err();
    assert!(matches!(err, EnchantError::SlotEmpty(Slot::Weapon)));

    let state = equipped_state(1_000_000);
    for dial in [0u8, 11] {
        let err = enchant_item(
            &state, &catalog, &config, Slot::Weapon, dial, &mut rng, &mut events,
        )
        .unwrap_err();
        assert!(matches!(err, EnchantError::InvalidCostMultiplier { .. }));
    }
}
