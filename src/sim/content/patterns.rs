//! Bullet-emission patterns
//!
//! All three shipped patterns spawn from a random world edge and aim at the
//! player with angle jitter; they differ in speed, size, and the behavior
//! they attach.

use glam::Vec2;
use std::f32::consts::TAU;

use super::{BulletPatternDefinition, BulletSpawn, BulletSpawnContext};
use crate::sim::difficulty::DifficultyTier;
use crate::sim::rng::GameRng;
use crate::sim::state::BulletBehavior;

/// Uniform point on one of the four world edges. `side` 0..4 maps to
/// top/right/bottom/left.
fn pick_edge_point(side: u32, world_width: f32, world_height: f32, t: f32) -> Vec2 {
    match side {
        0 => Vec2::new(t * world_width, 0.0),
        1 => Vec2::new(world_width, t * world_height),
        2 => Vec2::new(t * world_width, world_height),
        _ => Vec2::new(0.0, t * world_height),
    }
}

fn aim_at_player(ctx: &mut BulletSpawnContext<'_>, jitter_scale: f32) -> (Vec2, f32) {
    let side = ctx.rng.next_between(0.0, 4.0) as u32;
    let spawn = pick_edge_point(side, ctx.world_width, ctx.world_height, ctx.rng.next());

    let to_player = ctx.player_position - spawn;
    let base_angle = to_player.y.atan2(to_player.x);
    let jitter = ctx.angle_jitter_rad * jitter_scale;
    let angle = base_angle + ctx.rng.next_between(-jitter, jitter);

    (spawn, angle)
}

fn edge_shot_spawn(
    ctx: &mut BulletSpawnContext<'_>,
    _difficulty: &DifficultyTier,
) -> Vec<BulletSpawn> {
    let (spawn, angle) = aim_at_player(ctx, 1.0);

    vec![BulletSpawn {
        position: spawn,
        velocity: Vec2::new(angle.cos(), angle.sin()) * ctx.bullet_speed,
        radius: ctx.bullet_radius,
        damage: ctx.bullet_damage,
        behavior: None,
    }]
}

pub fn edge_shot_pattern() -> BulletPatternDefinition {
    BulletPatternDefinition {
        id: "edge-shot",
        spawn: edge_shot_spawn,
    }
}

fn fragment_count_for_band(elapsed_from_sec: f32) -> u32 {
    if elapsed_from_sec >= 90.0 {
        12
    } else if elapsed_from_sec >= 30.0 {
        10
    } else {
        8
    }
}

/// Two disjoint timing bands widen the per-bullet spread far beyond a single
/// uniform range; do not collapse into one band.
fn pick_split_delay_ms(rng: &mut GameRng) -> f32 {
    if rng.next() < 0.5 {
        rng.next_between(500.0, 900.0)
    } else {
        rng.next_between(1100.0, 1950.0)
    }
}

fn split_burst_shot_spawn(
    ctx: &mut BulletSpawnContext<'_>,
    difficulty: &DifficultyTier,
) -> Vec<BulletSpawn> {
    let (spawn, angle) = aim_at_player(ctx, 0.5);

    let trigger_after_ms = pick_split_delay_ms(ctx.rng);
    let start_angle_rad = ctx.rng.next_between(0.0, TAU);

    vec![BulletSpawn {
        position: spawn,
        velocity: Vec2::new(angle.cos(), angle.sin()) * ctx.bullet_speed * 0.72,
        radius: ctx.bullet_radius * 1.15,
        damage: (ctx.bullet_damage * 0.75).max(4.0),
        behavior: Some(BulletBehavior::SplitOnTimeout {
            trigger_after_ms,
            fragment_count: fragment_count_for_band(difficulty.from_sec),
            fragment_speed_multiplier: 1.08,
            fragment_radius_multiplier: 0.82,
            fragment_damage_multiplier: 0.65,
            start_angle_rad,
        }),
    }]
}

pub fn split_burst_shot_pattern() -> BulletPatternDefinition {
    BulletPatternDefinition {
        id: "split-burst-shot",
        spawn: split_burst_shot_spawn,
    }
}

fn bullets_per_emission_for_band(elapsed_from_sec: f32) -> u32 {
    if elapsed_from_sec >= 90.0 {
        4
    } else if elapsed_from_sec >= 30.0 {
        3
    } else {
        2
    }
}

fn spiral_seeder_shot_spawn(
    ctx: &mut BulletSpawnContext<'_>,
    difficulty: &DifficultyTier,
) -> Vec<BulletSpawn> {
    let (spawn, angle) = aim_at_player(ctx, 0.45);

    let clockwise = ctx.rng.next() < 0.5;
    let turn_rate = if clockwise { 1.0 } else { -1.0 } * ctx.rng.next_between(0.38, 0.58);
    let emit_interval_ms = ctx.rng.next_between(170.0, 260.0);
    let next_emit_at_ms = ctx.rng.next_between(240.0, 430.0);
    let current_angle_rad = ctx.rng.next_between(0.0, TAU);

    vec![BulletSpawn {
        position: spawn,
        velocity: Vec2::new(angle.cos(), angle.sin()) * difficulty.bullet_speed * 0.42,
        radius: ctx.bullet_radius * 1.22,
        damage: (ctx.bullet_damage * 0.7).max(4.0),
        behavior: Some(BulletBehavior::SpiralEmitter {
            emit_interval_ms,
            next_emit_at_ms,
            bullets_per_emission: bullets_per_emission_for_band(difficulty.from_sec),
            turn_rate_rad: turn_rate,
            current_angle_rad,
            emit_speed_multiplier: 1.08,
            emit_radius_multiplier: 0.72,
            emit_damage_multiplier: 0.55,
        }),
    }]
}

pub fn spiral_seeder_shot_pattern() -> BulletPatternDefinition {
    BulletPatternDefinition {
        id: "spiral-seeder-shot",
        spawn: spiral_seeder_shot_spawn,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_tier(from_sec: f32) -> DifficultyTier {
        DifficultyTier {
            from_sec,
            to_sec: None,
            bullet_speed: 120.0,
            spawn_interval_ms: 800.0,
            max_bullets: 8,
        }
    }

    fn test_ctx<'a>(rng: &'a mut GameRng) -> BulletSpawnContext<'a> {
        BulletSpawnContext {
            world_width: 1280.0,
            world_height: 720.0,
            player_position: Vec2::new(640.0, 360.0),
            bullet_speed: 120.0,
            bullet_radius: 6.0,
            bullet_damage: 12.0,
            angle_jitter_rad: 0.28,
            rng,
        }
    }

    #[test]
    fn edge_shot_spawns_on_an_edge_at_tier_speed() {
        let mut rng = GameRng::new(11);
        for _ in 0..64 {
            let mut ctx = test_ctx(&mut rng);
            let spawns = edge_shot_spawn(&mut ctx, &test_tier(0.0));
            assert_eq!(spawns.len(), 1);
            let spawn = &spawns[0];

            let on_edge = spawn.position.x == 0.0
                || spawn.position.x == 1280.0
                || spawn.position.y == 0.0
                || spawn.position.y == 720.0;
            assert!(on_edge, "spawn {:?} not on an edge", spawn.position);
            assert!((spawn.velocity.length() - 120.0).abs() < 0.01);
            assert!(spawn.behavior.is_none());
        }
    }

    #[test]
    fn edge_shot_aims_toward_player_within_jitter() {
        let mut rng = GameRng::new(3);
        for _ in 0..64 {
            let mut ctx = test_ctx(&mut rng);
            let spawns = edge_shot_spawn(&mut ctx, &test_tier(0.0));
            let spawn = &spawns[0];

            let to_player = (Vec2::new(640.0, 360.0) - spawn.position).normalize();
            let dir = spawn.velocity.normalize();
            let angle_err = to_player.angle_to(dir).abs();
            assert!(angle_err <= 0.28 + 1e-3, "angle error {angle_err}");
        }
    }

    #[test]
    fn split_burst_scales_speed_damage_and_radius() {
        let mut rng = GameRng::new(5);
        let mut ctx = test_ctx(&mut rng);
        let spawns = split_burst_shot_spawn(&mut ctx, &test_tier(0.0));
        let spawn = &spawns[0];

        assert!((spawn.velocity.length() - 120.0 * 0.72).abs() < 0.01);
        assert!((spawn.radius - 6.0 * 1.15).abs() < 1e-5);
        assert_eq!(spawn.damage, 9.0);
        match &spawn.behavior {
            Some(BulletBehavior::SplitOnTimeout {
                trigger_after_ms,
                fragment_count,
                ..
            }) => {
                let in_fast = (500.0..=900.0).contains(trigger_after_ms);
                let in_slow = (1100.0..=1950.0).contains(trigger_after_ms);
                assert!(in_fast || in_slow, "delay {trigger_after_ms} outside both bands");
                assert_eq!(*fragment_count, 8);
            }
            other => panic!("expected split behavior, got {other:?}"),
        }
    }

    #[test]
    fn split_delay_uses_both_bands() {
        let mut rng = GameRng::new(99);
        let mut fast = 0;
        let mut slow = 0;
        for _ in 0..200 {
            let delay = pick_split_delay_ms(&mut rng);
            if delay <= 900.0 {
                fast += 1;
            } else {
                assert!(delay >= 1100.0);
                slow += 1;
            }
        }
        assert!(fast > 50 && slow > 50, "fast={fast} slow={slow}");
    }

    #[test]
    fn fragment_counts_follow_elapsed_bands() {
        assert_eq!(fragment_count_for_band(0.0), 8);
        assert_eq!(fragment_count_for_band(30.0), 10);
        assert_eq!(fragment_count_for_band(90.0), 12);
    }

    #[test]
    fn spiral_seeder_attaches_emitter_with_band_emission_count() {
        let mut rng = GameRng::new(8);
        let mut ctx = test_ctx(&mut rng);
        let spawns = spiral_seeder_shot_spawn(&mut ctx, &test_tier(30.0));
        let spawn = &spawns[0];

        assert!((spawn.velocity.length() - 120.0 * 0.42).abs() < 0.01);
        assert!((spawn.radius - 6.0 * 1.22).abs() < 1e-5);
        match &spawn.behavior {
            Some(BulletBehavior::SpiralEmitter {
                emit_interval_ms,
                next_emit_at_ms,
                bullets_per_emission,
                turn_rate_rad,
                ..
            }) => {
                assert!((170.0..=260.0).contains(emit_interval_ms));
                assert!((240.0..=430.0).contains(next_emit_at_ms));
                assert_eq!(*bullets_per_emission, 3);
                assert!((0.38..=0.58).contains(&turn_rate_rad.abs()));
            }
            other => panic!("expected spiral behavior, got {other:?}"),
        }
    }
}
