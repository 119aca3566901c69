//! Player contact resolution
//!
//! Circle-vs-circle via squared distance. A bullet is consumed on contact
//! whether or not the player is invulnerable; invulnerability only skips
//! the damage.

use crate::sim::state::{EngineState, Item};

pub struct CollisionOutcome {
    pub took_damage: bool,
}

pub fn resolve_bullet_collisions(
    state: &mut EngineState,
    invulnerability_ms: f32,
) -> CollisionOutcome {
    let mut took_damage = false;
    let player = &mut state.player;

    for bullet in &mut state.bullets {
        if !bullet.alive {
            continue;
        }

        let radius_sum = player.radius + bullet.radius;
        if player.position.distance_squared(bullet.position) <= radius_sum * radius_sum {
            bullet.alive = false;

            if state.now_ms >= player.invulnerable_until_ms {
                player.hp = (player.hp - bullet.damage).max(0.0);
                player.invulnerable_until_ms = state.now_ms + invulnerability_ms;
                took_damage = true;
            }
        }
    }

    state.bullets.retain(|bullet| bullet.alive);
    CollisionOutcome { took_damage }
}

/// Pull every item touching the player out of the world, returning them so
/// the caller can apply their effects in collection order.
pub fn collect_touched_items(state: &mut EngineState) -> Vec<Item> {
    let mut collected = Vec::new();
    let player = &state.player;

    for item in &mut state.items {
        if !item.alive {
            continue;
        }

        let radius_sum = player.radius + item.radius;
        if player.position.distance_squared(item.position) <= radius_sum * radius_sum {
            item.alive = false;
            collected.push(item.clone());
        }
    }

    state.items.retain(|item| item.alive);
    collected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::fixtures::{plain_bullet, playing_state};
    use crate::sim::state::{Item, ItemKind};
    use glam::Vec2;

    #[test]
    fn touching_bullet_damages_and_grants_invulnerability() {
        let mut state = playing_state();
        state.now_ms = 1000.0;
        state
            .bullets
            .push(plain_bullet(1, Vec2::new(112.0, 100.0), 6.0, 12.0));

        let outcome = resolve_bullet_collisions(&mut state, 300.0);

        assert!(outcome.took_damage);
        assert_eq!(state.player.hp, 88.0);
        assert_eq!(state.player.invulnerable_until_ms, 1300.0);
        assert!(state.bullets.is_empty());
    }

    #[test]
    fn invulnerable_player_consumes_bullet_without_damage() {
        let mut state = playing_state();
        state.now_ms = 1000.0;
        state.player.invulnerable_until_ms = 1200.0;
        state
            .bullets
            .push(plain_bullet(1, Vec2::new(112.0, 100.0), 6.0, 12.0));

        let outcome = resolve_bullet_collisions(&mut state, 300.0);

        assert!(!outcome.took_damage);
        assert_eq!(state.player.hp, 100.0);
        // The bullet does not pass through.
        assert!(state.bullets.is_empty());
        // The window is not extended either.
        assert_eq!(state.player.invulnerable_until_ms, 1200.0);
    }

    #[test]
    fn hp_floors_at_zero() {
        let mut state = playing_state();
        state.player.hp = 5.0;
        state
            .bullets
            .push(plain_bullet(1, Vec2::new(100.0, 100.0), 6.0, 12.0));

        resolve_bullet_collisions(&mut state, 300.0);

        assert_eq!(state.player.hp, 0.0);
    }

    #[test]
    fn distant_bullet_is_untouched() {
        let mut state = playing_state();
        state
            .bullets
            .push(plain_bullet(1, Vec2::new(400.0, 400.0), 6.0, 12.0));

        let outcome = resolve_bullet_collisions(&mut state, 300.0);

        assert!(!outcome.took_damage);
        assert_eq!(state.bullets.len(), 1);
    }

    #[test]
    fn touched_items_are_collected_and_removed() {
        let mut state = playing_state();
        state.items.push(Item {
            id: 1,
            position: Vec2::new(110.0, 100.0),
            velocity: Vec2::ZERO,
            radius: 8.0,
            alive: true,
            kind: ItemKind::Heal,
            definition_id: "item-heal".into(),
        });
        state.items.push(Item {
            id: 2,
            position: Vec2::new(600.0, 600.0),
            velocity: Vec2::ZERO,
            radius: 8.0,
            alive: true,
            kind: ItemKind::Score,
            definition_id: "item-score".into(),
        });

        let collected = collect_touched_items(&mut state);

        assert_eq!(collected.len(), 1);
        assert_eq!(collected[0].id, 1);
        assert_eq!(state.items.len(), 1);
        assert_eq!(state.items[0].id, 2);
    }
}
