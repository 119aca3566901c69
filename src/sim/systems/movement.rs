//! Entity integration and bounds handling
//!
//! The player clamps to the world; bullets and items fly free and are
//! culled by center position once they leave the margin-expanded bounds.

use glam::Vec2;

use crate::config::WorldConfig;
use crate::input::InputSnapshot;
use crate::sim::state::{Bullet, Item, Player};

pub fn update_player_movement(
    player: &mut Player,
    input: &InputSnapshot,
    dt_sec: f32,
    world: &WorldConfig,
) {
    player.position += Vec2::new(input.move_x, input.move_y) * player.move_speed * dt_sec;

    player.position.x = player
        .position
        .x
        .clamp(player.radius, world.width - player.radius);
    player.position.y = player
        .position
        .y
        .clamp(player.radius, world.height - player.radius);
}

pub fn update_bullet_movement(bullets: &mut [Bullet], dt_sec: f32) {
    for bullet in bullets {
        bullet.position += bullet.velocity * dt_sec;
    }
}

pub fn update_item_movement(items: &mut [Item], dt_sec: f32) {
    for item in items {
        item.position += item.velocity * dt_sec;
    }
}

fn in_bounds(position: Vec2, world: &WorldConfig, margin: f32) -> bool {
    position.x >= -margin
        && position.x <= world.width + margin
        && position.y >= -margin
        && position.y <= world.height + margin
}

pub fn cull_out_of_bounds_bullets(bullets: &mut Vec<Bullet>, world: &WorldConfig, margin: f32) {
    bullets.retain(|bullet| bullet.alive && in_bounds(bullet.position, world, margin));
}

pub fn cull_out_of_bounds_items(items: &mut Vec<Item>, world: &WorldConfig, margin: f32) {
    items.retain(|item| item.alive && in_bounds(item.position, world, margin));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::fixtures::{plain_bullet, playing_state};

    fn world() -> WorldConfig {
        WorldConfig {
            width: 1280.0,
            height: 720.0,
        }
    }

    fn input(move_x: f32, move_y: f32) -> InputSnapshot {
        InputSnapshot {
            move_x,
            move_y,
            ultimate_pressed: false,
            pause_pressed: false,
        }
    }

    #[test]
    fn player_moves_by_speed_and_axis() {
        let mut state = playing_state();
        state.player.position = Vec2::new(400.0, 300.0);

        update_player_movement(&mut state.player, &input(1.0, 0.0), 0.5, &world());

        assert_eq!(state.player.position, Vec2::new(530.0, 300.0));
    }

    #[test]
    fn player_clamps_to_world_minus_radius() {
        let mut state = playing_state();
        state.player.position = Vec2::new(5.0, 715.0);

        update_player_movement(&mut state.player, &input(-1.0, 1.0), 1.0, &world());

        assert_eq!(state.player.position, Vec2::new(10.0, 710.0));
    }

    #[test]
    fn bullets_integrate_velocity() {
        let mut bullet = plain_bullet(1, Vec2::new(100.0, 100.0), 6.0, 12.0);
        bullet.velocity = Vec2::new(120.0, -60.0);
        let mut bullets = vec![bullet];

        update_bullet_movement(&mut bullets, 0.25);

        assert_eq!(bullets[0].position, Vec2::new(130.0, 85.0));
    }

    #[test]
    fn cull_removes_bullets_past_the_margin_by_center() {
        let world = world();
        let mut bullets = vec![
            plain_bullet(1, Vec2::new(-31.9, 100.0), 6.0, 12.0),
            plain_bullet(2, Vec2::new(-32.1, 100.0), 6.0, 12.0),
            plain_bullet(3, Vec2::new(100.0, 752.1), 6.0, 12.0),
        ];

        cull_out_of_bounds_bullets(&mut bullets, &world, 32.0);

        assert_eq!(bullets.len(), 1);
        assert_eq!(bullets[0].id, 1);
    }

    #[test]
    fn cull_removes_dead_bullets_even_in_bounds() {
        let world = world();
        let mut dead = plain_bullet(1, Vec2::new(100.0, 100.0), 6.0, 12.0);
        dead.alive = false;
        let mut bullets = vec![dead];

        cull_out_of_bounds_bullets(&mut bullets, &world, 32.0);

        assert!(bullets.is_empty());
    }
}
