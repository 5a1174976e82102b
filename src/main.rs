//! Swarm Arena entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

    use swarm_arena::consts::MAX_FRAME_DT;
    use swarm_arena::sim::{GamePhase, GameState, TickInput, tick};
    use swarm_arena::{Settings, leaderboard, render};

    /// Leaderboard service endpoint
    const LEADERBOARD_URL: &str = "https://swarm-arena-leaderboard.workers.dev/";

    /// Game instance holding all state
    struct Game {
        state: GameState,
        input: TickInput,
        settings: Settings,
        ctx: Option<CanvasRenderingContext2d>,
        last_time: f64,
        fps: u32,
        /// One submission per run
        score_submitted: bool,
    }

    impl Game {
        fn new(seed: u64, width: f32, height: f32) -> Self {
            Self {
                state: GameState::new(seed, width, height),
                input: TickInput::default(),
                settings: Settings::load(),
                ctx: None,
                last_time: 0.0,
                fps: 0,
                score_submitted: false,
            }
        }

        /// Run one simulation step with the sampled input snapshot
        fn update(&mut self, dt: f32) {
            let was_over = self.state.phase == GamePhase::GameOver;
            if self.input.restart {
                self.score_submitted = false;
            }

            let input = self.input.clone();
            tick(&mut self.state, &input, dt);

            // Clear one-shot intents after the tick consumed them
            self.input.pause = false;
            self.input.restart = false;
            self.input.choose = None;

            // Entering GameOver: submit the final score off the frame path
            if !was_over && self.state.phase == GamePhase::GameOver && !self.score_submitted {
                self.score_submitted = true;
                leaderboard::client::submit_score(
                    LEADERBOARD_URL,
                    &self.settings.player_name,
                    self.state.kills,
                );
            }

            if dt > 0.0 {
                self.fps = (1.0 / dt).round() as u32;
            }
        }

        fn render(&self) {
            if let Some(ref ctx) = self.ctx {
                render::draw(ctx, &self.state, &self.settings);
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let hud = self.state.hud();

            if let Some(el) = document.get_element_by_id("hp-fill") {
                if let Ok(el) = el.dyn_into::<web_sys::HtmlElement>() {
                    let pct = (hud.hp / hud.max_hp).clamp(0.0, 1.0) * 100.0;
                    let _ = el.style().set_property("width", &format!("{pct}%"));
                }
            }
            if let Some(el) = document.get_element_by_id("xp-fill") {
                if let Ok(el) = el.dyn_into::<web_sys::HtmlElement>() {
                    let pct = (hud.xp as f32 / hud.xp_to_next as f32).clamp(0.0, 1.0) * 100.0;
                    let _ = el.style().set_property("width", &format!("{pct}%"));
                }
            }
            if let Some(el) = document.get_element_by_id("level") {
                el.set_text_content(Some(&hud.level.to_string()));
            }
            if let Some(el) = document.get_element_by_id("time") {
                el.set_text_content(Some(&hud.time));
            }
            if let Some(el) = document.get_element_by_id("kills") {
                el.set_text_content(Some(&hud.kills.to_string()));
            }
            if let Some(el) = document.get_element_by_id("fps") {
                let text = if self.settings.show_fps {
                    self.fps.to_string()
                } else {
                    String::new()
                };
                el.set_text_content(Some(&text));
            }
            if let Some(el) = document.get_element_by_id("info") {
                let text = if hud.awaiting_upgrade {
                    "Choose an upgrade"
                } else if hud.paused {
                    "Paused"
                } else {
                    ""
                };
                el.set_text_content(Some(text));
            }

            // Overlay panels
            set_hidden(&document, "overlay", !(hud.awaiting_upgrade || hud.game_over));
            set_hidden(&document, "upgrade-menu", !hud.awaiting_upgrade);
            set_hidden(&document, "gameover", !hud.game_over);

            if hud.awaiting_upgrade {
                for (index, choice) in self.state.upgrade_choices.iter().enumerate() {
                    if let Some(el) = document.get_element_by_id(&format!("upgrade-{index}")) {
                        el.set_text_content(Some(&format!(
                            "{}. {} - {}",
                            index + 1,
                            choice.name(),
                            choice.description()
                        )));
                    }
                }
            }
        }
    }

    fn set_hidden(document: &web_sys::Document, id: &str, hidden: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("class", if hidden { "hidden" } else { "" });
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Swarm Arena starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("game")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let width = window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(800.0);
        let height = window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(600.0);
        canvas.set_width(width as u32);
        canvas.set_height(height as u32);

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, width as f32, height as f32)));

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .expect("no 2d context")
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");
        game.borrow_mut().ctx = Some(ctx);

        log::info!("Game initialized with seed: {}", seed);

        setup_keyboard(game.clone());
        setup_resize(&canvas, game.clone());
        setup_buttons(game.clone());

        request_animation_frame(game);

        log::info!("Swarm Arena running!");
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let key = event.key().to_lowercase();
                if matches!(
                    key.as_str(),
                    "arrowup" | "arrowdown" | "arrowleft" | "arrowright" | " "
                ) {
                    event.prevent_default();
                }

                let mut g = game.borrow_mut();
                match key.as_str() {
                    "w" | "arrowup" => g.input.up = true,
                    "s" | "arrowdown" => g.input.down = true,
                    "a" | "arrowleft" => g.input.left = true,
                    "d" | "arrowright" => g.input.right = true,
                    "p" => g.input.pause = true,
                    "r" => g.input.restart = true,
                    "1" | "2" | "3" => {
                        let index = key.parse::<usize>().unwrap_or(1) - 1;
                        g.input.choose = Some(index);
                    }
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().to_lowercase().as_str() {
                    "w" | "arrowup" => g.input.up = false,
                    "s" | "arrowdown" => g.input.down = false,
                    "a" | "arrowleft" => g.input.left = false,
                    "d" | "arrowright" => g.input.right = false,
                    _ => {}
                }
            });
            let _ =
                window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let canvas = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let window = web_sys::window().unwrap();
            let width = window
                .inner_width()
                .ok()
                .and_then(|v| v.as_f64())
                .unwrap_or(800.0);
            let height = window
                .inner_height()
                .ok()
                .and_then(|v| v.as_f64())
                .unwrap_or(600.0);
            canvas.set_width(width as u32);
            canvas.set_height(height as u32);
            game.borrow_mut()
                .state
                .resize(width as f32, height as f32);
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_buttons(game: Rc<RefCell<Game>>) {
        let document = web_sys::window().unwrap().document().unwrap();

        for index in 0..3usize {
            if let Some(btn) = document.get_element_by_id(&format!("upgrade-{index}")) {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                    game.borrow_mut().input.choose = Some(index);
                });
                let _ =
                    btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }

        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                game.borrow_mut().input.restart = true;
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
                MAX_FRAME_DT
            };
            g.last_time = time;

            g.update(dt);
            g.render();
            g.update_hud();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use swarm_arena::sim::{GamePhase, GameState, TickInput, tick};

    env_logger::init();
    log::info!("Swarm Arena (native) starting headless run...");

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(1);
    let mut state = GameState::new(seed, 1280.0, 720.0);
    let dt = 1.0 / 60.0;

    // Wander in a square so the swarm has to chase
    let mut input = TickInput::default();
    for frame in 0..(10 * 60 * 60) {
        input.up = (frame / 180) % 4 == 0;
        input.right = (frame / 180) % 4 == 1;
        input.down = (frame / 180) % 4 == 2;
        input.left = (frame / 180) % 4 == 3;

        // Headless runs always take the first upgrade offered
        input.choose = if state.phase == GamePhase::AwaitingUpgrade {
            Some(0)
        } else {
            None
        };

        tick(&mut state, &input, dt);

        if frame % (10 * 60) == 0 {
            let hud = state.hud();
            log::info!(
                "t={} level={} kills={} enemies={}",
                hud.time,
                hud.level,
                hud.kills,
                state.enemies.len()
            );
        }
        if state.phase == GamePhase::GameOver {
            break;
        }
    }

    let hud = state.hud();
    println!(
        "run over: survived {} with {} kills at level {} (seed {})",
        hud.time, hud.kills, hud.level, seed
    );
}
