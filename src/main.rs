//! Brick Blitz entry point
//!
//! Handles platform-specific initialization and runs the game loop. The
//! browser build wires pointer events into the simulation and mirrors game
//! state into a DOM HUD; the native build runs a short headless demo
//! session, which is handy for profiling the sim and sanity-checking
//! balance changes.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::PointerEvent;

    use brick_blitz::consts::*;
    use brick_blitz::platform::KeyValueStore;
    use brick_blitz::sim::{GameEvent, GamePhase, GameState, TickInput, tick};
    use brick_blitz::{Settings, TranslationService};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        input: TickInput,
        accumulator: f32,
        last_time: f64,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
        show_fps: bool,
    }

    impl Game {
        fn new(seed: u64, show_fps: bool) -> Self {
            Self {
                state: GameState::new(seed),
                input: TickInput::default(),
                accumulator: 0.0,
                last_time: 0.0,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
                show_fps,
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32, time: f64) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let input = self.input.clone();
                tick(&mut self.state, &input, SIM_DT);
                self.accumulator -= SIM_DT;
                substeps += 1;

                // Clear one-shot inputs after processing
                self.input.launch = false;
            }

            // Track frame times for FPS
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;
            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }
        }

        /// Reset game state for a fresh run (launch velocity back to base)
        fn restart(&mut self, seed: u64) {
            self.state = GameState::new(seed);
            self.accumulator = 0.0;
            self.input = TickInput::default();
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Brick Blitz starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let settings = Settings::load();

        // Fetch translations in the background; a failure is logged and the
        // bundled base strings stay in place
        {
            let language = settings.language;
            wasm_bindgen_futures::spawn_local(async move {
                let mut translations = TranslationService::new(KeyValueStore::open());
                match translations.refresh(language).await {
                    Ok(fetched) => {
                        if fetched {
                            log::info!("translations ready for {}", language.as_code());
                        }
                    }
                    Err(err) => log::error!("translation fetch failed: {err:?}"),
                }
            });
        }

        // Initialize game
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, settings.show_fps)));

        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(game.clone());
        setup_restart_button(game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Brick Blitz running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        // Pointer move: paddle tracks the pointer x
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                game.borrow_mut().input.pointer_x = Some(event.client_x() as f32);
            });
            let _ = window
                .add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Pointer up: release a resting ball
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: PointerEvent| {
                game.borrow_mut().input.launch = true;
            });
            let _ = window
                .add_event_listener_with_callback("pointerup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_restart_button(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let seed = js_sys::Date::now() as u64;
                game.borrow_mut().restart(seed);
                log::info!("Game restarted with seed: {}", seed);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt, time);

            for event in g.state.drain_events() {
                match event {
                    GameEvent::LevelCleared { level } => {
                        log::info!("level {} cleared", level);
                    }
                    GameEvent::GameOver => {
                        log::info!("scene -> GameOver");
                    }
                    _ => {}
                }
            }

            update_hud(&g);
        }

        request_animation_frame(game);
    }

    /// Mirror game state into the DOM HUD
    fn update_hud(game: &Game) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        if let Some(el) = document.query_selector("#hud-balls .hud-value").ok().flatten() {
            el.set_text_content(Some(&game.state.balls.len().to_string()));
        }

        if let Some(el) = document.query_selector("#hud-blocks .hud-value").ok().flatten() {
            el.set_text_content(Some(&game.state.active_blocks().to_string()));
        }

        if let Some(el) = document.query_selector("#hud-level .hud-value").ok().flatten() {
            el.set_text_content(Some(&(game.state.level + 1).to_string()));
        }

        if let Some(el) = document.get_element_by_id("hud-fps") {
            if game.show_fps {
                let _ = el.set_attribute("class", "hud-item");
                if let Some(val) = document.query_selector("#hud-fps .hud-value").ok().flatten() {
                    val.set_text_content(Some(&game.fps.to_string()));
                }
            } else {
                let _ = el.set_attribute("class", "hud-item hidden");
            }
        }

        // Show the serve prompt while a ball is waiting on the paddle
        if let Some(el) = document.get_element_by_id("serve-prompt") {
            let serving = game.state.phase == GamePhase::Playing
                && game.state.balls.iter().any(|b| b.on_paddle);
            let _ = el.set_attribute("class", if serving { "" } else { "hidden" });
        }

        // Game over overlay
        if let Some(el) = document.get_element_by_id("game-over") {
            if game.state.phase == GamePhase::GameOver {
                let _ = el.set_attribute("class", "");
                if let Some(level_el) = document.get_element_by_id("final-level") {
                    level_el.set_text_content(Some(&(game.state.level + 1).to_string()));
                }
            } else {
                let _ = el.set_attribute("class", "hidden");
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use brick_blitz::consts::SIM_DT;
    use brick_blitz::sim::{GameEvent, GamePhase, GameState, TickInput, tick};

    env_logger::init();
    log::info!("Brick Blitz (native) starting...");

    // Headless demo: an autopilot shadows the lowest free ball and fires
    // the launch input periodically so block-spawned balls get released too
    let seed = 0xB10C5;
    let mut state = GameState::new(seed);
    let mut blocks_destroyed = 0u32;
    let mut balls_lost = 0u32;

    for tick_no in 0u64..60 * 120 {
        let target = state
            .balls
            .iter()
            .filter(|b| !b.on_paddle)
            .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
            .map(|b| b.pos.x);
        let input = TickInput {
            pointer_x: target,
            launch: tick_no % 30 == 0,
        };
        tick(&mut state, &input, SIM_DT);

        for event in state.drain_events() {
            match event {
                GameEvent::BlockDestroyed { .. } => blocks_destroyed += 1,
                GameEvent::BallLost { .. } => balls_lost += 1,
                GameEvent::LevelCleared { level } => log::info!("cleared grid {}", level),
                _ => {}
            }
        }

        if state.phase == GamePhase::GameOver {
            break;
        }
    }

    println!(
        "demo over: level {}, {} blocks destroyed, {} balls lost, {} ticks",
        state.level + 1,
        blocks_destroyed,
        balls_lost,
        state.time_ticks
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
