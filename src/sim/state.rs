//! Simulation state and entity types
//!
//! One mutable aggregate, owned exclusively by the engine and passed by
//! `&mut` into each system. Entities die by `alive = false` and are filtered
//! out before the tick that observed the death completes; nothing is ever
//! resurrected.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::screen::ScreenState;

/// The player-controlled entity. Exactly one per run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: u32,
    pub position: Vec2,
    pub radius: f32,
    pub alive: bool,
    pub move_speed: f32,
    pub hp: f32,
    pub max_hp: f32,
    pub invulnerable_until_ms: f32,
    pub ultimate_gauge: f32,
    pub ultimate_gauge_max: f32,
    pub character_id: String,
    pub ultimate_id: String,
}

/// Optional per-bullet self-mutation rule. A bullet carries at most one;
/// its timers belong to that bullet alone, and offspring never inherit it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum BulletBehavior {
    SplitOnTimeout {
        trigger_after_ms: f32,
        fragment_count: u32,
        fragment_speed_multiplier: f32,
        fragment_radius_multiplier: f32,
        fragment_damage_multiplier: f32,
        start_angle_rad: f32,
    },
    SpiralEmitter {
        emit_interval_ms: f32,
        next_emit_at_ms: f32,
        bullets_per_emission: u32,
        turn_rate_rad: f32,
        current_angle_rad: f32,
        emit_speed_multiplier: f32,
        emit_radius_multiplier: f32,
        emit_damage_multiplier: f32,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub id: u32,
    pub position: Vec2,
    pub velocity: Vec2,
    pub radius: f32,
    pub damage: f32,
    pub age_ms: f32,
    pub alive: bool,
    pub behavior: Option<BulletBehavior>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ItemKind {
    Score,
    Gauge,
    Heal,
    EquipMagnet,
    EquipBarrierGenerator,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub id: u32,
    pub position: Vec2,
    pub velocity: Vec2,
    pub radius: f32,
    pub alive: bool,
    pub kind: ItemKind,
    /// Back-reference into the content registry; lookup only, not ownership.
    pub definition_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EquipmentType {
    Magnet,
    BarrierGenerator,
}

/// Passive equipment levels. Level 0 = not owned.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EquipmentState {
    pub magnet_level: u32,
    pub barrier_generator_level: u32,
    pub max_level: u32,
}

impl EquipmentState {
    pub fn new(max_level: u32) -> Self {
        Self {
            magnet_level: 0,
            barrier_generator_level: 0,
            max_level,
        }
    }
}

/// A bullet-blocking orb orbiting the player.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Barrier {
    pub id: u32,
    pub position: Vec2,
    pub radius: f32,
    pub alive: bool,
    pub orbit_angle_rad: f32,
    pub orbit_distance: f32,
}

/// Presentation timing for the ultimate blast. Purely cosmetic; renderers
/// read it, the simulation only advances the clock.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UltimateFx {
    pub active: bool,
    pub elapsed_ms: f32,
    pub duration_ms: f32,
    pub flash_duration_ms: f32,
    pub shake_duration_ms: f32,
    pub max_shake_px: f32,
    pub ring_max_radius: f32,
    pub origin: Vec2,
    pub cleared_bullets: u32,
}

impl UltimateFx {
    pub fn idle(world_width: f32, world_height: f32) -> Self {
        Self {
            active: false,
            elapsed_ms: 0.0,
            duration_ms: 700.0,
            flash_duration_ms: 190.0,
            shake_duration_ms: 280.0,
            max_shake_px: 10.0,
            ring_max_radius: world_width.hypot(world_height),
            origin: Vec2::new(world_width / 2.0, world_height / 2.0),
            cleared_bullets: 0,
        }
    }
}

/// Complete simulation state for one engine instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineState {
    pub screen_state: ScreenState,
    /// Which state a pause came from; `None` outside `Paused`.
    pub paused_from: Option<ScreenState>,
    pub countdown_ms_remaining: f32,
    pub elapsed_ms: f32,
    pub score: f32,
    pub best_score: u64,
    pub now_ms: f32,
    pub bullet_spawn_timer_ms: f32,
    pub item_spawn_timer_ms: f32,
    pub barrier_spawn_cooldown_ms: f32,
    pub active_pattern_id: String,
    pub active_character_id: String,
    pub player: Player,
    pub equipment: EquipmentState,
    pub bullets: Vec<Bullet>,
    pub items: Vec<Item>,
    pub barriers: Vec<Barrier>,
    pub ultimate_fx: UltimateFx,
    next_id: u32,
}

impl EngineState {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        screen_state: ScreenState,
        countdown_ms: f32,
        best_score: u64,
        bullet_spawn_timer_ms: f32,
        item_spawn_timer_ms: f32,
        player: Player,
        equipment: EquipmentState,
        ultimate_fx: UltimateFx,
    ) -> Self {
        let active_character_id = player.character_id.clone();
        Self {
            screen_state,
            paused_from: None,
            countdown_ms_remaining: countdown_ms,
            elapsed_ms: 0.0,
            score: 0.0,
            best_score,
            now_ms: 0.0,
            bullet_spawn_timer_ms,
            item_spawn_timer_ms,
            barrier_spawn_cooldown_ms: 0.0,
            active_pattern_id: "edge-shot".to_string(),
            active_character_id,
            player,
            equipment,
            bullets: Vec::new(),
            items: Vec::new(),
            barriers: Vec::new(),
            ultimate_fx,
            next_id: 1,
        }
    }

    /// Allocate a fresh entity id. Ids are unique within a run.
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn hp_ratio(&self) -> f32 {
        if self.player.max_hp > 0.0 {
            self.player.hp / self.player.max_hp
        } else {
            0.0
        }
    }

    pub fn gauge_ratio(&self) -> f32 {
        if self.player.ultimate_gauge_max > 0.0 {
            self.player.ultimate_gauge / self.player.ultimate_gauge_max
        } else {
            0.0
        }
    }
}
