//! Grid Snake entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent};

    use grid_snake::consts::SESSION_KEY;
    use grid_snake::engine::{GameEngine, GameOverCallback};
    use grid_snake::platform::{AnimationFrameScheduler, CanvasSurface, LocalStorageStore};
    use grid_snake::sim::{Difficulty, Direction, GameStatus};

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Grid Snake starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Construction is the one fatal path: no surface, no game.
        let surface = CanvasSurface::new(canvas).expect("canvas 2d context unavailable");

        let scheduler = AnimationFrameScheduler::new();
        let armed = scheduler.armed_flag();

        let on_game_over: GameOverCallback = Box::new(|score| {
            let document = web_sys::window().unwrap().document().unwrap();
            if let Some(el) = document.get_element_by_id("final-score") {
                el.set_text_content(Some(&score.to_string()));
            }
            if let Some(el) = document.get_element_by_id("game-over") {
                let _ = el.set_attribute("class", "");
            }
            // A finished run is not resumable
            clear_saved_session();
            log::info!("game over, final score {score}");
        });

        let seed = js_sys::Date::now() as u64;
        let engine = GameEngine::new(
            Box::new(surface),
            Box::new(scheduler),
            Box::new(LocalStorageStore::new()),
            Difficulty::Normal,
            seed,
            Some(on_game_over),
        )
        .expect("engine construction failed");

        log::info!("Engine initialized with seed: {seed}");

        let mut engine = engine;
        if let Some(json) = load_saved_session() {
            if engine.restore_session(&json) {
                log::info!("Restored saved session");
            } else {
                clear_saved_session();
            }
        }

        let engine = Rc::new(RefCell::new(engine));
        setup_input_handlers(engine.clone());
        setup_auto_pause(engine.clone());

        request_animation_frame(engine, armed, Rc::new(Cell::new(0.0)));

        log::info!("Grid Snake running!");
    }

    fn setup_input_handlers(engine: Rc<RefCell<GameEngine>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let mut engine = engine.borrow_mut();
            match event.key().as_str() {
                "ArrowUp" | "w" | "W" => engine.change_direction(Direction::Up),
                "ArrowDown" | "s" | "S" => engine.change_direction(Direction::Down),
                "ArrowLeft" | "a" | "A" => engine.change_direction(Direction::Left),
                "ArrowRight" | "d" | "D" => engine.change_direction(Direction::Right),
                " " | "Enter" => match engine.game_state().status {
                    GameStatus::Playing => {
                        engine.pause_game();
                        save_session(&engine);
                    }
                    GameStatus::Idle | GameStatus::Paused => engine.start_game(),
                    GameStatus::GameOver => {
                        engine.reset_game();
                        hide_game_over();
                        engine.start_game();
                    }
                },
                "Escape" => {
                    engine.pause_game();
                    save_session(&engine);
                }
                "r" | "R" => {
                    engine.reset_game();
                    clear_saved_session();
                    hide_game_over();
                }
                _ => return,
            }
            event.prevent_default();
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_auto_pause(engine: Rc<RefCell<GameEngine>>) {
        let document = web_sys::window().unwrap().document().unwrap();
        let document_clone = document.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                let mut engine = engine.borrow_mut();
                if engine.game_state().status == GameStatus::Playing {
                    engine.pause_game();
                    save_session(&engine);
                    log::info!("Auto-paused (tab hidden)");
                }
            }
        });
        let _ = document
            .add_event_listener_with_callback("visibilitychange", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn local_storage() -> Option<web_sys::Storage> {
        web_sys::window().and_then(|w| w.local_storage().ok()).flatten()
    }

    /// Save the paused session to LocalStorage
    fn save_session(engine: &GameEngine) {
        if let (Some(json), Some(storage)) = (engine.session_snapshot(), local_storage()) {
            if storage.set_item(SESSION_KEY, &json).is_ok() {
                log::info!("Session saved");
            }
        }
    }

    /// Load a saved session from LocalStorage
    fn load_saved_session() -> Option<String> {
        local_storage()?.get_item(SESSION_KEY).ok()?
    }

    /// Clear the saved session from LocalStorage
    fn clear_saved_session() {
        if let Some(storage) = local_storage() {
            let _ = storage.remove_item(SESSION_KEY);
        }
    }

    fn hide_game_over() {
        let document = web_sys::window().unwrap().document().unwrap();
        if let Some(el) = document.get_element_by_id("game-over") {
            let _ = el.set_attribute("class", "hidden");
        }
    }

    fn request_animation_frame(
        engine: Rc<RefCell<GameEngine>>,
        armed: Rc<Cell<bool>>,
        last_time: Rc<Cell<f64>>,
    ) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(engine, armed, last_time, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(
        engine: Rc<RefCell<GameEngine>>,
        armed: Rc<Cell<bool>>,
        last_time: Rc<Cell<f64>>,
        time: f64,
    ) {
        {
            let mut engine = engine.borrow_mut();

            let dt = if last_time.get() > 0.0 {
                time - last_time.get()
            } else {
                0.0
            };
            last_time.set(time);

            // The scheduler arms the loop only while the engine wants ticks
            if armed.get() {
                engine.update(dt);
            }
            engine.render();
            update_hud(&engine);
        }

        request_animation_frame(engine, armed, last_time);
    }

    fn update_hud(engine: &GameEngine) {
        let document = web_sys::window().unwrap().document().unwrap();
        let state = engine.game_state();

        if let Some(el) = document.get_element_by_id("hud-score") {
            el.set_text_content(Some(&state.score.to_string()));
        }
        if let Some(el) = document.get_element_by_id("hud-level") {
            el.set_text_content(Some(&state.level.to_string()));
        }
        if let Some(el) = document.get_element_by_id("hud-highscore") {
            el.set_text_content(Some(&state.high_score.to_string()));
        }
        if let Some(el) = document.get_element_by_id("pause-hint") {
            let class = if state.status == GameStatus::Paused {
                ""
            } else {
                "hidden"
            };
            let _ = el.set_attribute("class", class);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Grid Snake (native) starting...");
    log::info!("The game targets the browser - build with trunk/wasm-pack for the web version");
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
