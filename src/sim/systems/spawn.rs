//! Bullet spawning
//!
//! A countdown timer re-arms by the tier's spawn interval, catching up with
//! multiple spawn cycles after a long step. Each cycle rolls a pattern from
//! the unlock schedule; the tier's bullet cap is enforced before the pattern
//! runs and again per inserted bullet.

use crate::config::{GameConfig, PatternsConfig};
use crate::sim::content::{BulletSpawnContext, ContentRegistry};
use crate::sim::difficulty::DifficultyTier;
use crate::sim::rng::GameRng;
use crate::sim::state::{Bullet, EngineState};

/// Weighted pattern choice for one spawn cycle. `edge-shot` takes whatever
/// probability the unlocked specials leave behind.
pub fn choose_pattern_id(
    elapsed_sec: f32,
    patterns: &PatternsConfig,
    rng: &mut GameRng,
) -> String {
    let split_chance = if elapsed_sec >= patterns.split_burst_late_sec {
        patterns.split_burst_chance_late
    } else if elapsed_sec >= patterns.split_burst_unlock_sec {
        patterns.split_burst_chance_mid
    } else {
        0.0
    };

    let spiral_chance = if elapsed_sec >= patterns.spiral_seeder_late_sec {
        patterns.spiral_seeder_chance_late
    } else if elapsed_sec >= patterns.spiral_seeder_unlock_sec {
        patterns.spiral_seeder_chance_mid
    } else {
        0.0
    };

    let edge_weight = (1.0 - split_chance - spiral_chance).max(0.0);
    match rng.pick_index(&[edge_weight, split_chance, spiral_chance]) {
        1 => patterns.split_burst_id.clone(),
        2 => patterns.spiral_seeder_id.clone(),
        _ => patterns.primary_id.clone(),
    }
}

pub struct BulletSpawnParams<'a> {
    pub state: &'a mut EngineState,
    pub config: &'a GameConfig,
    pub difficulty: &'a DifficultyTier,
    pub registry: &'a ContentRegistry,
    pub rng: &'a mut GameRng,
    pub dt_ms: f32,
}

pub fn update_bullet_spawning(params: BulletSpawnParams<'_>) {
    let BulletSpawnParams {
        state,
        config,
        difficulty,
        registry,
        rng,
        dt_ms,
    } = params;

    state.bullet_spawn_timer_ms -= dt_ms;

    while state.bullet_spawn_timer_ms <= 0.0 {
        state.bullet_spawn_timer_ms += difficulty.spawn_interval_ms;

        if state.bullets.len() >= difficulty.max_bullets {
            continue;
        }

        let pattern_id = choose_pattern_id(state.elapsed_ms / 1000.0, &config.patterns, rng);
        let pattern = registry.bullet_pattern(&pattern_id);
        state.active_pattern_id = pattern_id;

        let mut ctx = BulletSpawnContext {
            world_width: config.world.width,
            world_height: config.world.height,
            player_position: state.player.position,
            bullet_speed: difficulty.bullet_speed,
            bullet_radius: config.combat.bullet_radius,
            bullet_damage: config.combat.bullet_contact_damage,
            angle_jitter_rad: config.combat.bullet_angle_jitter_rad,
            rng: &mut *rng,
        };
        let spawns = (pattern.spawn)(&mut ctx, difficulty);

        for spawn in spawns {
            if state.bullets.len() >= difficulty.max_bullets {
                break;
            }
            let id = state.next_entity_id();
            state.bullets.push(Bullet {
                id,
                position: spawn.position,
                velocity: spawn.velocity,
                radius: spawn.radius,
                damage: spawn.damage,
                age_ms: 0.0,
                alive: true,
                behavior: spawn.behavior.clone(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::content::create_default_registry;
    use crate::sim::state::fixtures::playing_state;

    fn tier() -> DifficultyTier {
        DifficultyTier {
            from_sec: 0.0,
            to_sec: Some(30.0),
            bullet_speed: 120.0,
            spawn_interval_ms: 800.0,
            max_bullets: 8,
        }
    }

    #[test]
    fn timer_catches_up_with_multiple_spawn_cycles() {
        let config = GameConfig::default();
        let registry = create_default_registry(&config);
        let mut rng = GameRng::new(1);
        let mut state = playing_state();
        state.bullet_spawn_timer_ms = 100.0;

        update_bullet_spawning(BulletSpawnParams {
            state: &mut state,
            config: &config,
            difficulty: &tier(),
            registry: &registry,
            rng: &mut rng,
            dt_ms: 2450.0,
        });

        // Spawns due at 100, 900, and 1700ms within the step.
        assert_eq!(state.bullets.len(), 3);
        assert!(state.bullet_spawn_timer_ms > 0.0);
        assert!(state.bullets.iter().all(|b| b.age_ms == 0.0 && b.alive));
    }

    #[test]
    fn spawning_skips_cycles_at_the_cap() {
        let config = GameConfig::default();
        let registry = create_default_registry(&config);
        let mut rng = GameRng::new(1);
        let mut state = playing_state();
        state.bullet_spawn_timer_ms = 0.0;
        for i in 0..8 {
            let bullet = crate::sim::state::fixtures::plain_bullet(
                100 + i,
                glam::Vec2::new(5.0, 5.0),
                4.0,
                10.0,
            );
            state.bullets.push(bullet);
        }

        update_bullet_spawning(BulletSpawnParams {
            state: &mut state,
            config: &config,
            difficulty: &tier(),
            registry: &registry,
            rng: &mut rng,
            dt_ms: 1600.0,
        });

        assert_eq!(state.bullets.len(), 8);
    }

    #[test]
    fn fresh_ids_per_spawn() {
        let config = GameConfig::default();
        let registry = create_default_registry(&config);
        let mut rng = GameRng::new(2);
        let mut state = playing_state();
        state.bullet_spawn_timer_ms = 0.0;

        update_bullet_spawning(BulletSpawnParams {
            state: &mut state,
            config: &config,
            difficulty: &tier(),
            registry: &registry,
            rng: &mut rng,
            dt_ms: 10.0,
        });

        let mut ids: Vec<u32> = state.bullets.iter().map(|b| b.id).collect();
        let before = ids.len();
        ids.dedup();
        assert_eq!(ids.len(), before);
    }

    #[test]
    fn only_edge_shot_before_unlock() {
        let config = GameConfig::default();
        let mut rng = GameRng::new(4);
        for _ in 0..128 {
            let id = choose_pattern_id(10.0, &config.patterns, &mut rng);
            assert_eq!(id, "edge-shot");
        }
    }

    #[test]
    fn specials_appear_after_unlock() {
        let config = GameConfig::default();
        let mut rng = GameRng::new(4);
        let mut split = 0;
        let mut spiral = 0;
        for _ in 0..512 {
            match choose_pattern_id(120.0, &config.patterns, &mut rng).as_str() {
                "split-burst-shot" => split += 1,
                "spiral-seeder-shot" => spiral += 1,
                _ => {}
            }
        }
        // Late-game chances are 0.48 and 0.26.
        assert!(split > 150, "split picked {split} times");
        assert!(spiral > 60, "spiral picked {spiral} times");
    }

    #[test]
    fn split_burst_locked_until_mid_threshold() {
        let config = GameConfig::default();
        let mut rng = GameRng::new(9);
        let mut split = 0;
        for _ in 0..256 {
            if choose_pattern_id(22.0, &config.patterns, &mut rng) == "split-burst-shot" {
                split += 1;
            }
        }
        assert!(split > 30, "mid chance 0.3 picked {split} of 256");
    }
}
