//! Game controller
//!
//! Owns the world, the upcoming-piece queue, the launcher and the score. The
//! host forwards pointer/click events, calls [`Controller::tick`] once per
//! frame and then [`Controller::render`].

use glam::Vec2;
use rand_pcg::Pcg32;

use crate::platform::{Hooks, Rect, Renderer};
use crate::sim::{
    Body, BodyId, Catalog, GameState, Launcher, PieceKind, PieceQueue, RngState, ScheduledSpawn,
    SpawnSchedule, World,
};
use crate::tuning::Tuning;

pub struct Controller {
    tuning: Tuning,
    catalog: Catalog,
    state: GameState,
    world: World,
    queue: PieceQueue,
    launcher: Launcher,
    schedule: SpawnSchedule,
    rng: Pcg32,
    hooks: Hooks,
    /// Last accepted drop, for the click cooldown
    last_drop_ms: Option<f64>,
}

impl Controller {
    pub fn new(tuning: Tuning, catalog: Catalog, seed: u64, hooks: Hooks) -> Self {
        let high_score = hooks.store.load().unwrap_or(0);
        let launcher = Launcher::new(
            PieceKind(0),
            catalog.get(PieceKind(0)).radius,
            Vec2::new(tuning.field_width / 2.0, tuning.launcher_y),
        );

        let mut controller = Self {
            tuning,
            catalog,
            state: GameState::new(high_score),
            world: World::new(0),
            queue: PieceQueue::new(),
            launcher,
            schedule: SpawnSchedule::new(),
            rng: RngState::new(seed).to_rng(),
            hooks,
            last_drop_ms: None,
        };

        controller.hooks.display.show_high(high_score);
        controller.fill_queue();
        log::info!("New game (seed {}, high score {})", seed, high_score);
        controller
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn queue(&self) -> &PieceQueue {
        &self.queue
    }

    pub fn launcher(&self) -> &Launcher {
        &self.launcher
    }

    /// Merge children still waiting for their delay to pass
    pub fn pending_spawns(&self) -> usize {
        self.schedule.len()
    }

    pub fn is_game_over(&self) -> bool {
        self.state.game_over
    }

    /// Move the launcher under the pointer
    pub fn on_pointer_move(&mut self, x: f32) {
        self.launcher.follow(x, self.tuning.field_width);
    }

    /// Drop the launcher's piece. Returns the new body, or `None` if the
    /// click was rejected by the cooldown or the game is over.
    pub fn on_click(&mut self, now_ms: f64) -> Option<BodyId> {
        if self.state.game_over {
            log::debug!("Drop ignored: game over");
            return None;
        }
        let cooling = self
            .last_drop_ms
            .is_some_and(|last| now_ms - last < self.tuning.click_cooldown_ms);
        if cooling {
            return None;
        }

        let kind = self.queue.dequeue()?;
        let id = self.world.spawn(&self.catalog, kind, self.launcher.pos);
        log::debug!(
            "Dropped {} (body {}) at x={:.1}",
            self.catalog.get(kind).name,
            id.0,
            self.launcher.pos.x
        );

        self.fill_queue();
        self.last_drop_ms = Some(now_ms);
        Some(id)
    }

    /// Advance one frame
    pub fn tick(&mut self, now_ms: f64) {
        self.deliver_due_spawns(now_ms);

        if self.state.game_over {
            return;
        }

        let report = self.world.step(&self.tuning, &self.catalog);
        for merge in report.merges {
            self.schedule.schedule(ScheduledSpawn {
                epoch: self.world.epoch(),
                due_ms: now_ms + self.tuning.merge_spawn_delay_ms,
                kind: merge.kind,
                pos: merge.pos,
            });
        }

        let line_y = self.tuning.line_y;
        let hold_ms = self.tuning.game_over_hold_ms;
        let mut expired = false;
        for body in self.world.bodies_mut() {
            expired |= update_line_timer(body, line_y, now_ms, hold_ms);
        }

        if expired {
            self.state.game_over = true;
            log::info!("Game over with score {}", self.state.score);
            self.hooks.notifier.on_game_over();
        }
    }

    /// Start a new run. Pending merge children from the old run are dropped
    /// when they come due.
    pub fn reset(&mut self) {
        self.state.reset();
        self.world = World::new(self.world.epoch() + 1);
        self.publish_score();
        self.fill_queue();
        log::info!("Game reset (epoch {})", self.world.epoch());
    }

    /// Draw the current frame
    pub fn render(&self, renderer: &mut dyn Renderer) {
        renderer.clear(Rect::from_size(
            self.tuning.field_width,
            self.tuning.field_height,
        ));

        if let Some(on_deck) = self.queue.get(1) {
            renderer.draw_preview(self.catalog.get(on_deck));
        }

        if self.state.game_over {
            return;
        }

        renderer.draw_launcher(&self.launcher, self.catalog.get(self.launcher.kind));
        for body in self.world.bodies() {
            renderer.draw_body(body, self.catalog.get(body.kind));
        }
    }

    /// Top the queue up and put its head in the launcher
    fn fill_queue(&mut self) {
        let pool = self.tuning.spawn_pool.min(self.catalog.len());
        let target = self.tuning.max_queue_size.max(1);
        self.queue.refill(&mut self.rng, target, pool);

        let kind = self.queue.peek().unwrap_or(PieceKind(0));
        self.launcher.kind = kind;
        self.launcher.radius = self.catalog.get(kind).radius;
        let x = self.launcher.pos.x;
        self.launcher.follow(x, self.tuning.field_width);
    }

    fn deliver_due_spawns(&mut self, now_ms: f64) {
        for spawn in self.schedule.take_due(now_ms) {
            if spawn.epoch != self.world.epoch() {
                log::debug!(
                    "Discarding merge child from epoch {} (now {})",
                    spawn.epoch,
                    self.world.epoch()
                );
                continue;
            }

            let id = self.world.spawn(&self.catalog, spawn.kind, spawn.pos);
            let piece = self.catalog.get(spawn.kind);
            log::debug!("Merge produced {} (body {})", piece.name, id.0);

            if self.state.add_points(piece.points) {
                log::info!("New high score {}", self.state.high_score);
                self.hooks.store.save(self.state.high_score);
            }
            self.publish_score();
        }
    }

    fn publish_score(&mut self) {
        self.hooks.display.show(self.state.score);
        self.hooks.display.show_final(self.state.score);
        self.hooks.display.show_high(self.state.high_score);
    }
}

/// Update a body's line timer. Returns true once the body has stayed above
/// the line for `hold_ms`.
pub fn update_line_timer(body: &mut Body, line_y: f32, now_ms: f64, hold_ms: f64) -> bool {
    if !body.has_crossed_line(line_y) {
        body.crossed_line_at = None;
        return false;
    }

    match body.crossed_line_at {
        None => {
            body.crossed_line_at = Some(now_ms);
            false
        }
        Some(since) => now_ms - since >= hold_ms,
    }
}
