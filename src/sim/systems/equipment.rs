//! Passive equipment: item magnet and barrier generator
//!
//! Level tables are indexed with level 1 at index 0; a level past the table
//! end reads the last entry, so shortening a table in config is safe.

use std::f32::consts::TAU;

use glam::Vec2;

use crate::config::GameConfig;
use crate::sim::state::{Barrier, EngineState, EquipmentType};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpgradeResult {
    pub leveled_up: bool,
    pub reached_max: bool,
}

fn level_value_f32(level: u32, values: &[f32]) -> f32 {
    if level == 0 || values.is_empty() {
        return 0.0;
    }
    let index = (values.len() - 1).min(level as usize - 1);
    values[index]
}

fn level_value_usize(level: u32, values: &[usize]) -> usize {
    if level == 0 || values.is_empty() {
        return 0;
    }
    let index = (values.len() - 1).min(level as usize - 1);
    values[index]
}

pub fn magnet_range_for_level(level: u32, config: &GameConfig) -> f32 {
    level_value_f32(level, &config.equipment.magnet_range_by_level)
}

pub fn magnet_pull_speed_for_level(level: u32, config: &GameConfig) -> f32 {
    level_value_f32(level, &config.equipment.magnet_pull_speed_by_level)
}

pub fn barrier_interval_ms_for_level(level: u32, config: &GameConfig) -> f32 {
    level_value_f32(level, &config.equipment.barrier_interval_ms_by_level)
}

pub fn barrier_max_count_for_level(level: u32, config: &GameConfig) -> usize {
    level_value_usize(level, &config.equipment.barrier_max_count_by_level)
}

/// Spread all barriers evenly around the orbit, keeping the first barrier's
/// angle as the anchor so existing orbs do not visibly jump.
fn rebalance_barrier_angles(barriers: &mut [Barrier]) {
    let Some(first) = barriers.first() else {
        return;
    };
    let base_angle = first.orbit_angle_rad;
    let step = TAU / barriers.len() as f32;

    for (index, barrier) in barriers.iter_mut().enumerate() {
        barrier.orbit_angle_rad = base_angle + index as f32 * step;
    }
}

pub fn upgrade_equipment_level(
    state: &mut EngineState,
    equipment: EquipmentType,
    config: &GameConfig,
) -> UpgradeResult {
    match equipment {
        EquipmentType::Magnet => {
            if state.equipment.magnet_level >= state.equipment.max_level {
                return UpgradeResult {
                    leveled_up: false,
                    reached_max: true,
                };
            }

            state.equipment.magnet_level += 1;
            UpgradeResult {
                leveled_up: true,
                reached_max: state.equipment.magnet_level >= state.equipment.max_level,
            }
        }
        EquipmentType::BarrierGenerator => {
            if state.equipment.barrier_generator_level >= state.equipment.max_level {
                return UpgradeResult {
                    leveled_up: false,
                    reached_max: true,
                };
            }

            state.equipment.barrier_generator_level += 1;

            // A higher level has a shorter interval; pull a stale or unset
            // cooldown down so the upgrade pays off immediately.
            let interval = barrier_interval_ms_for_level(state.equipment.barrier_generator_level, config);
            if interval > 0.0
                && (state.barrier_spawn_cooldown_ms <= 0.0
                    || state.barrier_spawn_cooldown_ms > interval)
            {
                state.barrier_spawn_cooldown_ms = interval;
            }

            UpgradeResult {
                leveled_up: true,
                reached_max: state.equipment.barrier_generator_level >= state.equipment.max_level,
            }
        }
    }
}

/// Accelerate items toward the player while they are inside magnet range,
/// capping item speed at 1.8x the pull speed.
pub fn apply_magnet_attraction(state: &mut EngineState, config: &GameConfig, dt_sec: f32) {
    let level = state.equipment.magnet_level;
    if level == 0 {
        return;
    }

    let range = magnet_range_for_level(level, config);
    let pull_speed = magnet_pull_speed_for_level(level, config);
    if range <= 0.0 || pull_speed <= 0.0 {
        return;
    }

    let range_sq = range * range;
    let max_velocity = pull_speed * 1.8;

    for item in &mut state.items {
        let to_player = state.player.position - item.position;
        let dist_sq = to_player.length_squared();
        if dist_sq <= 0.0 || dist_sq > range_sq {
            continue;
        }

        let dir = to_player / dist_sq.sqrt();
        item.velocity += dir * pull_speed * dt_sec;

        let speed = item.velocity.length();
        if speed > max_velocity {
            item.velocity *= max_velocity / speed;
        }
    }
}

/// Spawn barriers on a cooldown until the level's max count is reached. The
/// cooldown only runs while a slot is free; at capacity it is re-armed so a
/// replacement is never instant.
pub fn update_barrier_generator(state: &mut EngineState, config: &GameConfig, dt_ms: f32) {
    let level = state.equipment.barrier_generator_level;
    if level == 0 {
        return;
    }

    let max_count = barrier_max_count_for_level(level, config);
    let interval_ms = barrier_interval_ms_for_level(level, config);
    if max_count == 0 || interval_ms <= 0.0 {
        return;
    }

    if state.barriers.len() >= max_count {
        if state.barrier_spawn_cooldown_ms <= 0.0 {
            state.barrier_spawn_cooldown_ms = interval_ms;
        }
        return;
    }

    state.barrier_spawn_cooldown_ms -= dt_ms;

    while state.barrier_spawn_cooldown_ms <= 0.0 && state.barriers.len() < max_count {
        let id = state.next_entity_id();
        state.barriers.push(Barrier {
            id,
            position: state.player.position,
            radius: config.equipment.barrier_radius,
            alive: true,
            orbit_angle_rad: 0.0,
            orbit_distance: config.equipment.barrier_orbit_distance,
        });

        rebalance_barrier_angles(&mut state.barriers);
        state.barrier_spawn_cooldown_ms += interval_ms;
    }
}

pub fn update_barrier_orbit(state: &mut EngineState, config: &GameConfig, dt_sec: f32) {
    if state.barriers.is_empty() {
        return;
    }

    let angular_speed = config.equipment.barrier_orbit_angular_speed_rad;
    for barrier in &mut state.barriers {
        if !barrier.alive {
            continue;
        }

        barrier.orbit_angle_rad += angular_speed * dt_sec;
        barrier.position = state.player.position
            + Vec2::new(
                barrier.orbit_angle_rad.cos(),
                barrier.orbit_angle_rad.sin(),
            ) * barrier.orbit_distance;
    }
}

/// Barriers and bullets destroy each other on contact, one bullet per
/// barrier per tick.
pub fn resolve_barrier_bullet_collisions(state: &mut EngineState) {
    if state.barriers.is_empty() || state.bullets.is_empty() {
        return;
    }

    for barrier in &mut state.barriers {
        if !barrier.alive {
            continue;
        }

        for bullet in &mut state.bullets {
            if !bullet.alive {
                continue;
            }

            let radius_sum = barrier.radius + bullet.radius;
            if barrier.position.distance_squared(bullet.position) <= radius_sum * radius_sum {
                barrier.alive = false;
                bullet.alive = false;
                break;
            }
        }
    }

    state.barriers.retain(|barrier| barrier.alive);
    state.bullets.retain(|bullet| bullet.alive);
}
