use everforge_data::{builtin_catalog, builtin_config};

#[test]
fn builtin_config_validates() {
    let config = builtin_config().unwrap();
    config.validate().unwrap();
}

#[test]
fn upgrade_curve_shape() {
    let config = builtin_config().unwrap();
    let rules = &config.upgrade.rules;
    assert_eq!(rules.len(), 15);

    // Tutorial levels are risk-free.
    for rule in &rules[..3] {
        assert_eq!(rule.success, 1.0);
        assert_eq!(rule.downgrade, 0.0);
    }

    // Risk rises monotonically with level, cost strictly so.
    for pair in rules.windows(2) {
        assert!(pair[1].success <= pair[0].success);
        assert!(pair[1].downgrade >= pair[0].downgrade);
        assert!(pair[1].gold_cost > pair[0].gold_cost);
    }

    // Late levels sit in the intended 0.2..0.3 success band.
    for rule in &rules[12..] {
        assert!(rule.success >= 0.2 && rule.success <= 0.3);
    }

    for rule in rules {
        let sum = rule.success + rule.stay + rule.downgrade;
        assert!((sum - 1.0).abs() < 1e-9, "level {} sums to {sum}", rule.level);
    }
}

#[test]
fn tier_odds_shape() {
    let config = builtin_config().unwrap();
    let rows = &config.enchant.tier_odds;
    assert_eq!(rows.len(), 10);

    for row in rows {
        let sum: f64 = row.weights.iter().sum();
        assert!(
            (sum - 1.0).abs() < 1e-9,
            "multiplier {} sums to {sum}",
            row.multiplier
        );
    }

    // Paying more always shifts mass toward tier 5 and away from tier 1.
    for pair in rows.windows(2) {
        assert!(pair[1].weights[4] > pair[0].weights[4]);
        assert!(pair[1].weights[0] < pair[0].weights[0]);
    }
}

#[test]
fn xp_cost_formula() {
    let config = builtin_config().unwrap();
    assert_eq!(config.enchant.xp_cost(0, 1), 1_000);
    assert_eq!(config.enchant.xp_cost(2, 4), 9_000); // floor(1000 * 2.25 * 4)
    assert_eq!(config.enchant.xp_cost(1, 3), 4_500);
}

#[test]
fn catalog_references_resolve() {
    let catalog = builtin_catalog().unwrap();
    assert!(!catalog.items.is_empty());
    assert!(!catalog.enchant_attributes.is_empty());

    for item in &catalog.items {
        for milestone in [5u8, 10, 15] {
            if let Some(perk) = item.milestone_perks.at(milestone) {
                assert!(
                    catalog.forge_attribute(perk).is_some(),
                    "item {} has dangling perk {perk}",
                    item.id
                );
            }
        }
    }
}

#[test]
fn catalog_ids_are_unique() {
    let catalog = builtin_catalog().unwrap();
    let mut item_ids: Vec<&str> = catalog.items.iter().map(|i| i.id.as_str()).collect();
    item_ids.sort_unstable();
    let before = item_ids.len();
    item_ids.dedup();
    assert_eq!(item_ids.len(), before);

    let mut attr_ids: Vec<&str> = catalog
        .enchant_attributes
        .iter()
        .map(|a| a.id.as_str())
        .collect();
    attr_ids.sort_unstable();
    let before = attr_ids.len();
    attr_ids.dedup();
    assert_eq!(attr_ids.len(), before);
}
