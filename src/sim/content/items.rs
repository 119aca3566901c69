//! Collectible item definitions
//!
//! Effects go through the capability-scoped `ItemEffectContext`; weights are
//! recomputed live so rarity adapts to the player's situation (heal becomes
//! likelier when hurt, equipment drops stop at max level).

use super::{ItemDefinition, ItemEffectContext, ItemWeightState};
use crate::config::GameConfig;
use crate::sim::state::{EquipmentType, ItemKind};

pub fn create_default_items(config: &GameConfig) -> Vec<ItemDefinition> {
    let effects = config.items.effects;
    let weights = config.items.weights;

    let score_item = ItemDefinition {
        id: "item-score",
        kind: ItemKind::Score,
        apply: Box::new(move |ctx: &mut ItemEffectContext<'_>| {
            ctx.add_score(effects.score);
        }),
        weight: Box::new(move |_| weights.score),
    };

    let gauge_item = ItemDefinition {
        id: "item-gauge",
        kind: ItemKind::Gauge,
        apply: Box::new(move |ctx: &mut ItemEffectContext<'_>| {
            ctx.add_gauge(effects.gauge);
        }),
        weight: Box::new(move |_| weights.gauge),
    };

    let heal_item = ItemDefinition {
        id: "item-heal",
        kind: ItemKind::Heal,
        apply: Box::new(move |ctx: &mut ItemEffectContext<'_>| {
            ctx.heal(effects.heal);
        }),
        weight: Box::new(move |state: &ItemWeightState| {
            let urgency_boost = if state.hp_ratio < 0.4 { 15.0 } else { 0.0 };
            weights.heal + urgency_boost
        }),
    };

    let magnet_item = ItemDefinition {
        id: "item-equip-magnet",
        kind: ItemKind::EquipMagnet,
        apply: Box::new(|ctx: &mut ItemEffectContext<'_>| {
            ctx.upgrade_equipment(EquipmentType::Magnet);
        }),
        weight: Box::new(move |state: &ItemWeightState| {
            if state.magnet_level >= state.max_level {
                0.0
            } else {
                weights.equip_magnet
            }
        }),
    };

    let barrier_item = ItemDefinition {
        id: "item-equip-barrier-generator",
        kind: ItemKind::EquipBarrierGenerator,
        apply: Box::new(|ctx: &mut ItemEffectContext<'_>| {
            ctx.upgrade_equipment(EquipmentType::BarrierGenerator);
        }),
        weight: Box::new(move |state: &ItemWeightState| {
            if state.barrier_generator_level >= state.max_level {
                0.0
            } else {
                weights.equip_barrier_generator
            }
        }),
    };

    vec![score_item, gauge_item, heal_item, magnet_item, barrier_item]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::fixtures::playing_state;

    fn weight_state(hp_ratio: f32, magnet_level: u32) -> ItemWeightState {
        ItemWeightState {
            hp_ratio,
            gauge_ratio: 1.0,
            magnet_level,
            barrier_generator_level: 0,
            max_level: 5,
        }
    }

    #[test]
    fn heal_weight_boosts_below_forty_percent_hp() {
        let config = GameConfig::default();
        let items = create_default_items(&config);
        let heal = items.iter().find(|i| i.id == "item-heal").unwrap();

        assert_eq!((heal.weight)(&weight_state(1.0, 0)), 20.0);
        assert_eq!((heal.weight)(&weight_state(0.39, 0)), 35.0);
    }

    #[test]
    fn equipment_weight_drops_to_zero_at_max_level() {
        let config = GameConfig::default();
        let items = create_default_items(&config);
        let magnet = items.iter().find(|i| i.id == "item-equip-magnet").unwrap();

        assert!((magnet.weight)(&weight_state(1.0, 0)) > 0.0);
        assert_eq!((magnet.weight)(&weight_state(1.0, 5)), 0.0);
    }

    #[test]
    fn score_item_adds_configured_score() {
        let config = GameConfig::default();
        let items = create_default_items(&config);
        let score = items.iter().find(|i| i.id == "item-score").unwrap();

        let mut state = playing_state();
        let mut ctx = ItemEffectContext::new(&mut state, &config);
        (score.apply)(&mut ctx);
        assert_eq!(state.score, 250.0);
    }

    #[test]
    fn gauge_item_clamps_at_max() {
        let config = GameConfig::default();
        let items = create_default_items(&config);
        let gauge = items.iter().find(|i| i.id == "item-gauge").unwrap();

        let mut state = playing_state();
        state.player.ultimate_gauge = 90.0;
        let mut ctx = ItemEffectContext::new(&mut state, &config);
        (gauge.apply)(&mut ctx);
        assert_eq!(state.player.ultimate_gauge, 100.0);
    }

    #[test]
    fn heal_item_caps_at_max_hp() {
        let config = GameConfig::default();
        let items = create_default_items(&config);
        let heal = items.iter().find(|i| i.id == "item-heal").unwrap();

        let mut state = playing_state();
        state.player.hp = 95.0;
        let mut ctx = ItemEffectContext::new(&mut state, &config);
        (heal.apply)(&mut ctx);
        assert_eq!(state.player.hp, 100.0);
    }

    #[test]
    fn equipment_item_levels_up_equipment() {
        let config = GameConfig::default();
        let items = create_default_items(&config);
        let magnet = items.iter().find(|i| i.id == "item-equip-magnet").unwrap();

        let mut state = playing_state();
        let mut ctx = ItemEffectContext::new(&mut state, &config);
        (magnet.apply)(&mut ctx);
        assert_eq!(state.equipment.magnet_level, 1);
    }
}
