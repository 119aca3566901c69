//! Item spawning and selection

use glam::Vec2;

use crate::config::GameConfig;
use crate::sim::content::{ContentRegistry, ItemDefinition, ItemWeightState};
use crate::sim::rng::GameRng;
use crate::sim::state::{EngineState, Item};

const SPAWN_PADDING: f32 = 24.0;

pub fn clamp_gauge(value: f32, max: f32) -> f32 {
    value.clamp(0.0, max)
}

/// Roll one definition from the live weights. Returns `None` only for an
/// empty definition list.
pub fn pick_weighted_item<'a>(
    defs: &'a [ItemDefinition],
    state: &EngineState,
    rng: &mut GameRng,
) -> Option<&'a ItemDefinition> {
    if defs.is_empty() {
        return None;
    }

    let weight_state = ItemWeightState {
        hp_ratio: state.hp_ratio(),
        gauge_ratio: state.gauge_ratio(),
        magnet_level: state.equipment.magnet_level,
        barrier_generator_level: state.equipment.barrier_generator_level,
        max_level: state.equipment.max_level,
    };
    let weights: Vec<f32> = defs.iter().map(|def| (def.weight)(&weight_state)).collect();
    let index = rng.pick_index(&weights);
    defs.get(index).or_else(|| defs.first())
}

pub struct ItemSpawnParams<'a> {
    pub state: &'a mut EngineState,
    pub config: &'a GameConfig,
    pub registry: &'a ContentRegistry,
    pub rng: &'a mut GameRng,
    pub dt_ms: f32,
}

pub fn update_item_spawning(params: ItemSpawnParams<'_>) {
    let ItemSpawnParams {
        state,
        config,
        registry,
        rng,
        dt_ms,
    } = params;

    state.item_spawn_timer_ms -= dt_ms;

    while state.item_spawn_timer_ms <= 0.0 {
        state.item_spawn_timer_ms += config.items.spawn_interval_ms;

        if state.items.len() >= config.items.max_concurrent {
            continue;
        }

        let Some(selected) = pick_weighted_item(registry.items(), state, rng) else {
            return;
        };
        let kind = selected.kind;
        let definition_id = selected.id.to_string();

        let x = rng.next_between(SPAWN_PADDING, config.world.width - SPAWN_PADDING);
        let y = rng.next_between(SPAWN_PADDING, config.world.height - SPAWN_PADDING);
        let angle = rng.next_between(0.0, std::f32::consts::TAU);
        let speed = config.items.drift_speed;

        let id = state.next_entity_id();
        state.items.push(Item {
            id,
            position: Vec2::new(x, y),
            velocity: Vec2::new(angle.cos(), angle.sin()) * speed,
            radius: config.items.radius,
            alive: true,
            kind,
            definition_id,
        });
    }
}
