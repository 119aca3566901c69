//! Pluggable content definitions
//!
//! Characters, ultimates, bullet patterns, and items are immutable
//! definitions keyed by string id, registered once at startup and looked up
//! by id during simulation. Definitions are data plus behavior functions;
//! they receive narrow capability contexts and can never reach the rest of
//! the engine state.

pub mod items;
pub mod patterns;

use std::collections::HashMap;

use glam::Vec2;

use super::difficulty::DifficultyTier;
use super::rng::GameRng;
use super::state::{
    Bullet, BulletBehavior, EngineState, EquipmentType, ItemKind,
};
use crate::config::GameConfig;

/// A selectable player character.
#[derive(Debug, Clone)]
pub struct CharacterDefinition {
    pub id: &'static str,
    pub radius: f32,
    pub move_speed: f32,
    pub max_hp: f32,
    pub ultimate_id: &'static str,
}

/// Read-only gauge view handed to `can_activate`.
#[derive(Debug, Clone, Copy)]
pub struct UltimateStateView {
    pub gauge: f32,
    pub max_gauge: f32,
}

/// Capability handed to an ultimate's `activate`: clearing the field is the
/// only thing it can do.
pub struct UltimateContext<'a> {
    bullets: &'a mut Vec<Bullet>,
}

impl<'a> UltimateContext<'a> {
    pub fn new(bullets: &'a mut Vec<Bullet>) -> Self {
        Self { bullets }
    }

    /// Remove every live bullet, returning the count for FX scaling.
    pub fn clear_bullets(&mut self) -> usize {
        let removed = self.bullets.len();
        self.bullets.clear();
        removed
    }
}

/// Gauge-gated ability. `can_activate` and the gauge cost are independent
/// gates; both must pass.
pub struct UltimateDefinition {
    pub id: &'static str,
    pub gauge_cost: f32,
    pub can_activate: fn(UltimateStateView) -> bool,
    pub activate: fn(&mut UltimateContext<'_>),
}

/// One bullet requested by a pattern.
#[derive(Debug, Clone)]
pub struct BulletSpawn {
    pub position: Vec2,
    pub velocity: Vec2,
    pub radius: f32,
    pub damage: f32,
    pub behavior: Option<BulletBehavior>,
}

/// Everything a pattern may see while spawning. The RNG handle is the only
/// source of randomness; passing it explicitly keeps seeded runs reproducible.
pub struct BulletSpawnContext<'a> {
    pub world_width: f32,
    pub world_height: f32,
    pub player_position: Vec2,
    pub bullet_speed: f32,
    pub bullet_radius: f32,
    pub bullet_damage: f32,
    pub angle_jitter_rad: f32,
    pub rng: &'a mut GameRng,
}

/// The single extension point for new attack patterns.
pub struct BulletPatternDefinition {
    pub id: &'static str,
    pub spawn: fn(&mut BulletSpawnContext<'_>, &DifficultyTier) -> Vec<BulletSpawn>,
}

/// Capability-scoped effect context: an item definition can adjust score,
/// gauge, hp, and equipment levels. Nothing else.
pub struct ItemEffectContext<'a> {
    state: &'a mut EngineState,
    config: &'a GameConfig,
}

impl<'a> ItemEffectContext<'a> {
    pub fn new(state: &'a mut EngineState, config: &'a GameConfig) -> Self {
        Self { state, config }
    }

    pub fn add_score(&mut self, amount: f32) {
        self.state.score += amount;
    }

    pub fn add_gauge(&mut self, amount: f32) {
        self.state.player.ultimate_gauge = super::systems::item::clamp_gauge(
            self.state.player.ultimate_gauge + amount,
            self.state.player.ultimate_gauge_max,
        );
    }

    pub fn heal(&mut self, amount: f32) {
        self.state.player.hp = (self.state.player.hp + amount).min(self.state.player.max_hp);
    }

    pub fn upgrade_equipment(&mut self, equipment: EquipmentType) {
        super::systems::equipment::upgrade_equipment_level(self.state, equipment, self.config);
    }
}

/// Inputs to live item weighting.
#[derive(Debug, Clone, Copy)]
pub struct ItemWeightState {
    pub hp_ratio: f32,
    pub gauge_ratio: f32,
    pub magnet_level: u32,
    pub barrier_generator_level: u32,
    pub max_level: u32,
}

/// A collectible definition: an effect plus a live spawn weight.
pub struct ItemDefinition {
    pub id: &'static str,
    pub kind: ItemKind,
    pub apply: Box<dyn Fn(&mut ItemEffectContext<'_>)>,
    pub weight: Box<dyn Fn(&ItemWeightState) -> f32>,
}

/// Lookup table for all registered content. Created fresh per engine
/// instance; lives for the process. A missing id is a broken deployment,
/// so lookups fail fast.
#[derive(Default)]
pub struct ContentRegistry {
    characters: HashMap<&'static str, CharacterDefinition>,
    ultimates: HashMap<&'static str, UltimateDefinition>,
    patterns: HashMap<&'static str, BulletPatternDefinition>,
    items: Vec<ItemDefinition>,
}

impl ContentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_character(&mut self, def: CharacterDefinition) {
        self.characters.insert(def.id, def);
    }

    pub fn register_ultimate(&mut self, def: UltimateDefinition) {
        self.ultimates.insert(def.id, def);
    }

    pub fn register_bullet_pattern(&mut self, def: BulletPatternDefinition) {
        self.patterns.insert(def.id, def);
    }

    /// Insert or overwrite by id, preserving registration order.
    pub fn register_item(&mut self, def: ItemDefinition) {
        if let Some(existing) = self.items.iter_mut().find(|item| item.id == def.id) {
            *existing = def;
        } else {
            self.items.push(def);
        }
    }

    pub fn character(&self, id: &str) -> &CharacterDefinition {
        self.characters
            .get(id)
            .unwrap_or_else(|| panic!("character not found: {id}"))
    }

    pub fn ultimate(&self, id: &str) -> &UltimateDefinition {
        self.ultimates
            .get(id)
            .unwrap_or_else(|| panic!("ultimate not found: {id}"))
    }

    pub fn bullet_pattern(&self, id: &str) -> &BulletPatternDefinition {
        self.patterns
            .get(id)
            .unwrap_or_else(|| panic!("bullet pattern not found: {id}"))
    }

    pub fn item(&self, id: &str) -> &ItemDefinition {
        self.items
            .iter()
            .find(|item| item.id == id)
            .unwrap_or_else(|| panic!("item not found: {id}"))
    }

    /// All item definitions in registration order.
    pub fn items(&self) -> &[ItemDefinition] {
        &self.items
    }
}

pub const DEFAULT_CHARACTER_ID: &str = "default-runner";
pub const SCREEN_CLEAR_ULTIMATE_ID: &str = "screen-clear";

fn default_character() -> CharacterDefinition {
    CharacterDefinition {
        id: DEFAULT_CHARACTER_ID,
        radius: 10.0,
        move_speed: 260.0,
        max_hp: 100.0,
        ultimate_id: SCREEN_CLEAR_ULTIMATE_ID,
    }
}

fn screen_clear_ultimate() -> UltimateDefinition {
    UltimateDefinition {
        id: SCREEN_CLEAR_ULTIMATE_ID,
        gauge_cost: 100.0,
        can_activate: |view| view.gauge >= view.max_gauge,
        activate: |ctx| {
            ctx.clear_bullets();
        },
    }
}

/// Registry with the shipped content set.
pub fn create_default_registry(config: &GameConfig) -> ContentRegistry {
    let mut registry = ContentRegistry::new();

    registry.register_character(default_character());
    registry.register_ultimate(screen_clear_ultimate());
    registry.register_bullet_pattern(patterns::edge_shot_pattern());
    registry.register_bullet_pattern(patterns::split_burst_shot_pattern());
    registry.register_bullet_pattern(patterns::spiral_seeder_shot_pattern());

    for item in items::create_default_items(config) {
        registry.register_item(item);
    }

    registry
}
