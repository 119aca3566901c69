//! Timed bullet behaviors: split bursts and spiral emitters
//!
//! Runs after spawning so fresh bullets age from the next tick. Offspring
//! are plain bullets and never inherit the parent's behavior; the shared
//! bullet cap counts live parents plus everything queued this tick.

use glam::Vec2;

use crate::sim::state::{Bullet, BulletBehavior, EngineState};

fn radial_bullet(
    id: u32,
    position: Vec2,
    angle: f32,
    speed: f32,
    radius: f32,
    damage: f32,
) -> Bullet {
    Bullet {
        id,
        position,
        velocity: Vec2::new(angle.cos(), angle.sin()) * speed,
        radius,
        damage,
        age_ms: 0.0,
        alive: true,
        behavior: None,
    }
}

pub fn update_burst_bullets(state: &mut EngineState, dt_ms: f32, max_bullets: usize) {
    // Detach the bullet list so fresh ids can be drawn while iterating.
    let mut bullets = std::mem::take(&mut state.bullets);
    let mut active_count = bullets.len();
    let mut spawned: Vec<Bullet> = Vec::new();

    for bullet in &mut bullets {
        if !bullet.alive {
            continue;
        }

        bullet.age_ms += dt_ms;

        match &mut bullet.behavior {
            None => {}
            Some(BulletBehavior::SplitOnTimeout {
                trigger_after_ms,
                fragment_count,
                fragment_speed_multiplier,
                fragment_radius_multiplier,
                fragment_damage_multiplier,
                start_angle_rad,
            }) => {
                if bullet.age_ms < *trigger_after_ms {
                    continue;
                }

                let fragment_count = (*fragment_count).max(4) as usize;
                let speed = (bullet.velocity.length() * *fragment_speed_multiplier).max(40.0);
                let radius = (bullet.radius * *fragment_radius_multiplier).max(2.5);
                let damage = (bullet.damage * *fragment_damage_multiplier).max(1.0);
                let start_angle = *start_angle_rad;
                let position = bullet.position;

                bullet.alive = false;
                active_count -= 1;

                let available = max_bullets.saturating_sub(active_count + spawned.len());
                let spawn_count = fragment_count.min(available);
                for i in 0..spawn_count {
                    let angle =
                        start_angle + (i as f32 * std::f32::consts::TAU) / fragment_count as f32;
                    let id = state.next_entity_id();
                    spawned.push(radial_bullet(id, position, angle, speed, radius, damage));
                }
            }
            Some(BulletBehavior::SpiralEmitter {
                emit_interval_ms,
                next_emit_at_ms,
                bullets_per_emission,
                turn_rate_rad,
                current_angle_rad,
                emit_speed_multiplier,
                emit_radius_multiplier,
                emit_damage_multiplier,
            }) => {
                let per_emission = (*bullets_per_emission).max(1) as usize;
                let speed = (bullet.velocity.length() * *emit_speed_multiplier).max(55.0);
                let radius = (bullet.radius * *emit_radius_multiplier).max(2.5);
                let damage = (bullet.damage * *emit_damage_multiplier).max(1.0);
                let position = bullet.position;

                // Catch up on every emission due inside this step.
                while bullet.age_ms >= *next_emit_at_ms {
                    let available = max_bullets.saturating_sub(active_count + spawned.len());
                    let emission_count = per_emission.min(available);
                    for i in 0..emission_count {
                        let angle = *current_angle_rad
                            + (i as f32 * std::f32::consts::TAU) / per_emission as f32;
                        let id = state.next_entity_id();
                        spawned.push(radial_bullet(id, position, angle, speed, radius, damage));
                    }
                    *current_angle_rad += *turn_rate_rad;
                    *next_emit_at_ms += *emit_interval_ms;
                }
            }
        }
    }

    bullets.retain(|bullet| bullet.alive);
    bullets.append(&mut spawned);
    state.bullets = bullets;
}
