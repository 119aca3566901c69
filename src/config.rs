//! Game configuration and tuning
//!
//! One static structure consumed read-only by the simulation. The defaults
//! are the shipped balance; serde derives allow loading an override file.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sim::difficulty::DifficultyTier;

/// Configuration errors are deployment bugs, not runtime conditions.
/// Engine construction fails loudly on any of these.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("difficulty tiers must contain at least one tier")]
    EmptyDifficultyTiers,
    #[error("difficulty tier {index} starts at {from_sec}s but the previous tier ends at {expected}s")]
    DiscontiguousDifficultyTiers {
        index: usize,
        from_sec: f32,
        expected: f32,
    },
    #[error("only the final difficulty tier may be open-ended (tier {index} has no upper bound)")]
    UnboundedInnerTier { index: usize },
}

/// World bounds in pixels
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WorldConfig {
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControlsConfig {
    pub up: String,
    pub down: String,
    pub left: String,
    pub right: String,
    pub ultimate: String,
    pub pause: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PlayerConfig {
    pub radius: f32,
    pub move_speed: f32,
    pub max_hp: f32,
    pub invulnerability_ms: f32,
    pub start_x: f32,
    pub start_y: f32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScoreConfig {
    pub points_per_second: f32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CombatConfig {
    pub bullet_contact_damage: f32,
    pub bullet_radius: f32,
    /// Bullets and items whose center leaves the world expanded by this
    /// margin are despawned.
    pub bullet_despawn_margin: f32,
    pub bullet_angle_jitter_rad: f32,
}

/// Unlock/weight schedule for bullet patterns. Chances are rolled per spawn
/// cycle; `edge-shot` fills whatever probability mass remains.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternsConfig {
    pub primary_id: String,
    pub split_burst_id: String,
    pub spiral_seeder_id: String,
    pub split_burst_unlock_sec: f32,
    pub spiral_seeder_unlock_sec: f32,
    pub split_burst_chance_mid: f32,
    pub split_burst_chance_late: f32,
    pub spiral_seeder_chance_mid: f32,
    pub spiral_seeder_chance_late: f32,
    pub split_burst_late_sec: f32,
    pub spiral_seeder_late_sec: f32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct UltimateConfig {
    pub max_gauge: f32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ItemEffectsConfig {
    pub score: f32,
    pub gauge: f32,
    pub heal: f32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ItemWeightsConfig {
    pub score: f32,
    pub gauge: f32,
    pub heal: f32,
    pub equip_magnet: f32,
    pub equip_barrier_generator: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemsConfig {
    pub spawn_interval_ms: f32,
    pub max_concurrent: usize,
    pub radius: f32,
    pub drift_speed: f32,
    pub effects: ItemEffectsConfig,
    pub weights: ItemWeightsConfig,
}

/// Equipment tuning. Index 0 of each `*_by_level` table is level 1;
/// level 0 means the equipment is not owned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EquipmentConfig {
    pub max_level: u32,
    pub magnet_range_by_level: Vec<f32>,
    pub magnet_pull_speed_by_level: Vec<f32>,
    pub barrier_interval_ms_by_level: Vec<f32>,
    pub barrier_max_count_by_level: Vec<usize>,
    pub barrier_radius: f32,
    pub barrier_orbit_distance: f32,
    pub barrier_orbit_angular_speed_rad: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    pub world: WorldConfig,
    pub countdown_ms: f32,
    pub controls: ControlsConfig,
    pub player: PlayerConfig,
    pub score: ScoreConfig,
    pub combat: CombatConfig,
    pub patterns: PatternsConfig,
    pub ultimate: UltimateConfig,
    pub items: ItemsConfig,
    pub equipment: EquipmentConfig,
    pub difficulty_tiers: Vec<DifficultyTier>,
}

const WORLD_WIDTH: f32 = 1280.0;
const WORLD_HEIGHT: f32 = 720.0;

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            world: WorldConfig {
                width: WORLD_WIDTH,
                height: WORLD_HEIGHT,
            },
            countdown_ms: 3000.0,
            controls: ControlsConfig {
                up: "ArrowUp".into(),
                down: "ArrowDown".into(),
                left: "ArrowLeft".into(),
                right: "ArrowRight".into(),
                ultimate: "KeyZ".into(),
                pause: "KeyX".into(),
            },
            player: PlayerConfig {
                radius: 10.0,
                move_speed: 260.0,
                max_hp: 100.0,
                invulnerability_ms: 300.0,
                start_x: WORLD_WIDTH / 2.0,
                start_y: WORLD_HEIGHT / 2.0,
            },
            score: ScoreConfig {
                points_per_second: 10.0,
            },
            combat: CombatConfig {
                bullet_contact_damage: 12.0,
                bullet_radius: 6.0,
                bullet_despawn_margin: 32.0,
                bullet_angle_jitter_rad: 0.28,
            },
            patterns: PatternsConfig {
                primary_id: "edge-shot".into(),
                split_burst_id: "split-burst-shot".into(),
                spiral_seeder_id: "spiral-seeder-shot".into(),
                split_burst_unlock_sec: 22.0,
                spiral_seeder_unlock_sec: 48.0,
                split_burst_chance_mid: 0.3,
                split_burst_chance_late: 0.48,
                spiral_seeder_chance_mid: 0.14,
                spiral_seeder_chance_late: 0.26,
                split_burst_late_sec: 65.0,
                spiral_seeder_late_sec: 90.0,
            },
            ultimate: UltimateConfig { max_gauge: 100.0 },
            items: ItemsConfig {
                spawn_interval_ms: 4500.0,
                max_concurrent: 2,
                radius: 8.0,
                drift_speed: 35.0,
                effects: ItemEffectsConfig {
                    score: 250.0,
                    gauge: 35.0,
                    heal: 20.0,
                },
                weights: ItemWeightsConfig {
                    score: 55.0,
                    gauge: 25.0,
                    heal: 20.0,
                    equip_magnet: 6.0,
                    equip_barrier_generator: 6.0,
                },
            },
            equipment: EquipmentConfig {
                max_level: 5,
                magnet_range_by_level: vec![70.0, 100.0, 135.0, 175.0, 240.0],
                magnet_pull_speed_by_level: vec![240.0, 280.0, 330.0, 390.0, 460.0],
                barrier_interval_ms_by_level: vec![9000.0, 7600.0, 6200.0, 4800.0, 3400.0],
                barrier_max_count_by_level: vec![1, 1, 2, 2, 3],
                barrier_radius: 10.0,
                barrier_orbit_distance: 34.0,
                barrier_orbit_angular_speed_rad: 2.6,
            },
            difficulty_tiers: vec![
                DifficultyTier {
                    from_sec: 0.0,
                    to_sec: Some(30.0),
                    bullet_speed: 120.0,
                    spawn_interval_ms: 800.0,
                    max_bullets: 8,
                },
                DifficultyTier {
                    from_sec: 30.0,
                    to_sec: Some(90.0),
                    bullet_speed: 170.0,
                    spawn_interval_ms: 500.0,
                    max_bullets: 16,
                },
                DifficultyTier {
                    from_sec: 90.0,
                    to_sec: None,
                    bullet_speed: 240.0,
                    spawn_interval_ms: 300.0,
                    max_bullets: 28,
                },
            ],
        }
    }
}

impl GameConfig {
    /// Validate invariants that the rest of the simulation relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        crate::sim::difficulty::validate_tiers(&self.difficulty_tiers)
    }
}
