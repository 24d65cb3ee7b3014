//! Fruit Drop entry point
//!
//! Native: runs a seeded auto-player headlessly against the controller on a
//! virtual 60 Hz clock, logging the run and persisting the best score.
//! Web: installs logging; the host page drives the controller.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::Path;

    use fruit_drop::platform::{GameOverNotifier, Hooks, Rect, Renderer, ScoreDisplay};
    use fruit_drop::sim::{Body, Catalog, Launcher, PieceType};
    use fruit_drop::{Controller, FileStore, Tuning};
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;

    /// Virtual frame length
    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Frames between auto-player drops (just over the click cooldown)
    const DROP_EVERY: u64 = 45;
    const DEFAULT_MAX_FRAMES: u64 = 36_000;

    /// Logs score changes
    #[derive(Default)]
    struct LogDisplay {
        last_high: u64,
    }

    impl ScoreDisplay for LogDisplay {
        fn show(&mut self, score: u64) {
            log::debug!("Score: {}", score);
        }

        fn show_final(&mut self, _score: u64) {}

        fn show_high(&mut self, score: u64) {
            if score != self.last_high {
                log::debug!("High score: {}", score);
                self.last_high = score;
            }
        }
    }

    struct LogNotifier;

    impl GameOverNotifier for LogNotifier {
        fn on_game_over(&mut self) {
            log::warn!("GAME OVER");
        }
    }

    /// Counts draw calls instead of drawing
    #[derive(Default)]
    struct FrameStats {
        frames: u64,
        bodies_drawn: u64,
        largest_radius: f32,
    }

    impl Renderer for FrameStats {
        fn clear(&mut self, _rect: Rect) {
            self.frames += 1;
        }

        fn draw_body(&mut self, body: &Body, _piece: &PieceType) {
            self.bodies_drawn += 1;
            self.largest_radius = self.largest_radius.max(body.radius());
        }

        fn draw_launcher(&mut self, _launcher: &Launcher, _piece: &PieceType) {}

        fn draw_preview(&mut self, _piece: &PieceType) {}
    }

    fn load_tuning() -> Tuning {
        match std::env::var("FRUIT_DROP_TUNING") {
            Ok(path) => Tuning::load_from(Path::new(&path)).unwrap_or_else(|e| {
                log::warn!("{}; using default tuning", e);
                Tuning::default()
            }),
            Err(_) => Tuning::default(),
        }
    }

    pub fn run() {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
        log::info!("Fruit Drop (headless) starting...");

        let mut args = std::env::args().skip(1);
        let seed = args
            .next()
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(|| fruit_drop::platform::time::now_ms() as u64);
        let max_frames = args
            .next()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_MAX_FRAMES);

        let tuning = load_tuning();
        let field_width = tuning.field_width;
        let store = FileStore::default_location();
        log::info!("High score file: {}", store.path().display());

        let hooks = Hooks::new(
            Box::new(LogDisplay::default()),
            Box::new(store),
            Box::new(LogNotifier),
        );
        let mut game = Controller::new(tuning, Catalog::default(), seed, hooks);
        let mut player = Pcg32::seed_from_u64(seed.wrapping_add(1));
        let mut stats = FrameStats::default();

        for frame in 0..max_frames {
            let now = frame as f64 * FRAME_MS;
            if frame % DROP_EVERY == 0 {
                game.on_pointer_move(player.random_range(0.0..field_width));
                game.on_click(now);
            }

            game.tick(now);
            game.render(&mut stats);

            if game.is_game_over() {
                break;
            }
        }

        let state = game.state();
        log::info!(
            "Finished after {} frames ({:.1}s): score {}, high score {}, {} bodies, largest radius {}",
            stats.frames,
            stats.frames as f64 * FRAME_MS / 1000.0,
            state.score,
            state.high_score,
            game.world().len(),
            stats.largest_radius
        );
        log::debug!("Total body draws: {}", stats.bodies_drawn);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).expect("Failed to init logger");
    log::info!("Fruit Drop core loaded; the host page drives the controller");
}
