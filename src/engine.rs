//! Game engine orchestration
//!
//! Owns the state, content registry, RNG, and score store, and advances the
//! simulation one fixed step at a time. Rendering is behind a trait so the
//! engine stays headless-testable.

use glam::Vec2;

use crate::config::{ConfigError, GameConfig};
use crate::input::InputSnapshot;
use crate::persistence::ScoreStore;
use crate::sim::content::{create_default_registry, ContentRegistry, ItemEffectContext, DEFAULT_CHARACTER_ID};
use crate::sim::difficulty::pick_difficulty_tier;
use crate::sim::rng::GameRng;
use crate::sim::screen::{toggle_pause_state, ScreenState};
use crate::sim::state::{EngineState, EquipmentState, Player, UltimateFx};
use crate::sim::systems::{burst, collision, equipment, item, movement, spawn, ultimate};

/// Render-facing projection of the current state. All values are already
/// rounded for display.
#[derive(Debug, Clone, PartialEq)]
pub struct GameSnapshot {
    pub screen_state: ScreenState,
    /// Whole seconds left on the countdown, never shown as 0 mid-count.
    pub countdown_sec: u32,
    pub score: u64,
    pub best_score: u64,
    pub hp: u32,
    pub max_hp: u32,
    pub ultimate_gauge: u32,
    pub ultimate_ready: bool,
    pub elapsed_sec: f32,
    pub is_paused: bool,
    pub equipment_magnet_level: u32,
    pub equipment_magnet_range: f32,
    pub equipment_barrier_level: u32,
    pub equipment_barrier_count: usize,
    pub equipment_barrier_max: usize,
    pub equipment_barrier_cooldown_sec: f32,
}

/// Drawing backend. The engine calls this once per frame with the raw
/// simulation state; presentation decisions belong to the implementor.
pub trait Renderer {
    fn render(&mut self, state: &EngineState);
}

pub struct GameEngine {
    config: GameConfig,
    registry: ContentRegistry,
    state: EngineState,
    input: InputSnapshot,
    rng: GameRng,
    score_store: Option<ScoreStore>,
}

impl GameEngine {
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let registry = create_default_registry(&config);
        let state = create_state(&config, &registry, ScreenState::Title, 0);

        Ok(Self {
            config,
            registry,
            state,
            input: InputSnapshot::default(),
            rng: GameRng::from_time(),
            score_store: None,
        })
    }

    /// Attach persistent score storage and pick up its stored best score.
    pub fn with_score_store(mut self, store: ScoreStore) -> Self {
        self.state.best_score = store.load_best_score();
        self.score_store = Some(store);
        self
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> &EngineState {
        &self.state
    }

    pub fn registry_mut(&mut self) -> &mut ContentRegistry {
        &mut self.registry
    }

    /// Begin a fresh run from the countdown. A `None` seed derives one from
    /// the wall clock; passing a seed makes the whole run reproducible.
    pub fn start_run(&mut self, seed: Option<u64>) {
        self.rng = match seed {
            Some(seed) => GameRng::new(seed),
            None => GameRng::from_time(),
        };

        let best_score = self.state.best_score;
        self.state = create_state(&self.config, &self.registry, ScreenState::Countdown, best_score);
        log::info!("run started (seed {})", self.rng.seed());
    }

    /// Replace the input snapshot used by subsequent ticks.
    pub fn handle_input(&mut self, input: InputSnapshot) {
        self.input = input;
    }

    pub fn pause(&mut self) {
        let transition = toggle_pause_state(self.state.screen_state, self.state.paused_from);
        if transition.next_state == ScreenState::Paused {
            self.state.screen_state = transition.next_state;
            self.state.paused_from = transition.paused_from;
        }
    }

    pub fn resume(&mut self) {
        if self.state.screen_state != ScreenState::Paused {
            return;
        }
        let transition = toggle_pause_state(self.state.screen_state, self.state.paused_from);
        self.state.screen_state = transition.next_state;
        self.state.paused_from = transition.paused_from;
    }

    /// Back to the title screen, keeping only the best score.
    pub fn reset(&mut self) {
        let best_score = self.state.best_score;
        self.state = create_state(&self.config, &self.registry, ScreenState::Title, best_score);
        self.input = InputSnapshot::default();
    }

    /// Advance the simulation by one fixed step.
    pub fn update(&mut self, dt_ms: f32) {
        self.state.now_ms += dt_ms;

        if self.input.pause_pressed {
            let transition = toggle_pause_state(self.state.screen_state, self.state.paused_from);
            self.state.screen_state = transition.next_state;
            self.state.paused_from = transition.paused_from;
        }

        match self.state.screen_state {
            ScreenState::Title | ScreenState::GameOver | ScreenState::Paused => {}
            ScreenState::Countdown => {
                self.state.countdown_ms_remaining =
                    (self.state.countdown_ms_remaining - dt_ms).max(0.0);
                if self.state.countdown_ms_remaining == 0.0 {
                    self.state.screen_state = ScreenState::Playing;
                }
            }
            ScreenState::Playing => self.update_playing(dt_ms),
        }
    }

    pub fn render(&self, renderer: &mut dyn Renderer) {
        renderer.render(&self.state);
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let state = &self.state;
        let countdown_sec = if state.screen_state == ScreenState::Countdown {
            ((state.countdown_ms_remaining / 1000.0).ceil() as u32).max(1)
        } else {
            0
        };

        let magnet_level = state.equipment.magnet_level;
        let barrier_level = state.equipment.barrier_generator_level;

        GameSnapshot {
            screen_state: state.screen_state,
            countdown_sec,
            score: state.score.floor() as u64,
            best_score: state.best_score,
            hp: state.player.hp.ceil() as u32,
            max_hp: state.player.max_hp as u32,
            ultimate_gauge: state.player.ultimate_gauge.floor() as u32,
            ultimate_ready: state.player.ultimate_gauge >= state.player.ultimate_gauge_max,
            elapsed_sec: state.elapsed_ms / 1000.0,
            is_paused: state.screen_state == ScreenState::Paused,
            equipment_magnet_level: magnet_level,
            equipment_magnet_range: equipment::magnet_range_for_level(magnet_level, &self.config),
            equipment_barrier_level: barrier_level,
            equipment_barrier_count: state.barriers.len(),
            equipment_barrier_max: equipment::barrier_max_count_for_level(
                barrier_level,
                &self.config,
            ),
            equipment_barrier_cooldown_sec: if barrier_level > 0 {
                (state.barrier_spawn_cooldown_ms / 1000.0).max(0.0)
            } else {
                0.0
            },
        }
    }

    fn update_playing(&mut self, dt_ms: f32) {
        let dt_sec = dt_ms / 1000.0;
        self.state.elapsed_ms += dt_ms;
        self.state.score += self.config.score.points_per_second * dt_sec;
        self.update_ultimate_fx(dt_ms);

        let difficulty =
            *pick_difficulty_tier(self.state.elapsed_ms / 1000.0, &self.config.difficulty_tiers);

        movement::update_player_movement(
            &mut self.state.player,
            &self.input,
            dt_sec,
            &self.config.world,
        );

        if self.input.ultimate_pressed {
            let bullets_before_cast = self.state.bullets.len();
            let def = self.registry.ultimate(&self.state.player.ultimate_id);
            if ultimate::try_activate_ultimate(&mut self.state, def) {
                let cleared = bullets_before_cast.saturating_sub(self.state.bullets.len());
                self.trigger_ultimate_fx(cleared);
                log::info!("ultimate activated, cleared {cleared} bullets");
            }
        }

        spawn::update_bullet_spawning(spawn::BulletSpawnParams {
            state: &mut self.state,
            config: &self.config,
            difficulty: &difficulty,
            registry: &self.registry,
            rng: &mut self.rng,
            dt_ms,
        });

        burst::update_burst_bullets(&mut self.state, dt_ms, difficulty.max_bullets);

        item::update_item_spawning(item::ItemSpawnParams {
            state: &mut self.state,
            config: &self.config,
            registry: &self.registry,
            rng: &mut self.rng,
            dt_ms,
        });

        movement::update_bullet_movement(&mut self.state.bullets, dt_sec);
        movement::update_item_movement(&mut self.state.items, dt_sec);
        equipment::apply_magnet_attraction(&mut self.state, &self.config, dt_sec);
        equipment::update_barrier_generator(&mut self.state, &self.config, dt_ms);
        equipment::update_barrier_orbit(&mut self.state, &self.config, dt_sec);

        let margin = self.config.combat.bullet_despawn_margin;
        movement::cull_out_of_bounds_bullets(&mut self.state.bullets, &self.config.world, margin);
        movement::cull_out_of_bounds_items(&mut self.state.items, &self.config.world, margin);

        equipment::resolve_barrier_bullet_collisions(&mut self.state);
        collision::resolve_bullet_collisions(&mut self.state, self.config.player.invulnerability_ms);

        let collected = collision::collect_touched_items(&mut self.state);
        for collected_item in collected {
            let def = self.registry.item(&collected_item.definition_id);
            let mut ctx = ItemEffectContext::new(&mut self.state, &self.config);
            (def.apply)(&mut ctx);
        }

        if self.state.player.hp <= 0.0 {
            self.state.player.hp = 0.0;
            self.state.screen_state = ScreenState::GameOver;
            self.state.paused_from = None;

            let best = self.state.best_score.max(self.state.score.floor() as u64);
            if let Some(store) = &self.score_store {
                store.save_best_score(best);
            }
            self.state.best_score = best;
            log::info!(
                "game over at {:.1}s, score {}",
                self.state.elapsed_ms / 1000.0,
                best
            );
        }
    }

    fn trigger_ultimate_fx(&mut self, cleared_bullets: usize) {
        let intensity = (cleared_bullets as f32 / 20.0).min(1.0);
        let world = &self.config.world;

        self.state.ultimate_fx = UltimateFx {
            active: true,
            elapsed_ms: 0.0,
            duration_ms: 700.0 + intensity * 160.0,
            flash_duration_ms: 190.0 + intensity * 70.0,
            shake_duration_ms: 280.0 + intensity * 120.0,
            max_shake_px: 10.0 + intensity * 8.0,
            ring_max_radius: world.width.hypot(world.height) * (0.9 + intensity * 0.25),
            origin: self.state.player.position,
            cleared_bullets: cleared_bullets as u32,
        };
    }

    fn update_ultimate_fx(&mut self, dt_ms: f32) {
        let fx = &mut self.state.ultimate_fx;
        if !fx.active {
            return;
        }

        fx.elapsed_ms = (fx.elapsed_ms + dt_ms).min(fx.duration_ms);
        if fx.elapsed_ms >= fx.duration_ms {
            fx.active = false;
        }
    }
}

fn create_state(
    config: &GameConfig,
    registry: &ContentRegistry,
    screen_state: ScreenState,
    best_score: u64,
) -> EngineState {
    let character = registry.character(DEFAULT_CHARACTER_ID);
    let bullet_spawn_timer_ms = config
        .difficulty_tiers
        .first()
        .map(|tier| tier.spawn_interval_ms)
        .unwrap_or(800.0);

    let mut state = EngineState::new(
        screen_state,
        config.countdown_ms,
        best_score,
        bullet_spawn_timer_ms,
        config.items.spawn_interval_ms,
        Player {
            id: 0,
            position: Vec2::new(config.player.start_x, config.player.start_y),
            radius: character.radius,
            alive: true,
            move_speed: character.move_speed,
            hp: character.max_hp,
            max_hp: character.max_hp,
            invulnerable_until_ms: 0.0,
            ultimate_gauge: config.ultimate.max_gauge,
            ultimate_gauge_max: config.ultimate.max_gauge,
            character_id: character.id.to_string(),
            ultimate_id: character.ultimate_id.to_string(),
        },
        EquipmentState::new(config.equipment.max_level),
        UltimateFx::idle(config.world.width, config.world.height),
    );
    state.player.id = state.next_entity_id();
    state
}
