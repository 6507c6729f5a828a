//! Duel Pong entry point
//!
//! On the web this wires the DOM menu, keyboard/mouse input, Web Audio, and
//! WebGPU to the engine and drives it from `requestAnimationFrame`. Natively it
//! plays one headless PvC match and logs the result.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod web_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        Document, Event, EventTarget, HtmlCanvasElement, HtmlElement, HtmlInputElement,
        HtmlSelectElement, KeyboardEvent, MouseEvent,
    };

    use duel_pong::audio::AudioManager;
    use duel_pong::consts::FRAME_DT;
    use duel_pong::renderer::RenderState;
    use duel_pong::sim::{Engine, GameOverReport, GamePhase, InputSnapshot};
    use duel_pong::ui::{self, MenuSink, winner_banner};
    use duel_pong::{BallSettings, ControlMode, Difficulty, GameConfig, GameMode, PvpMode};

    /// Longest frame the timers are allowed to see (tab switches, stalls)
    const MAX_FRAME_SECS: f32 = 0.1;

    /// DOM-backed menu and score display
    struct DomMenu {
        document: Document,
    }

    impl DomMenu {
        fn set_text(&self, id: &str, text: &str) {
            if let Some(el) = self.document.get_element_by_id(id) {
                el.set_text_content(Some(text));
            }
        }

        fn set_display(&self, id: &str, display: &str) {
            let Some(el) = self.html(id) else { return };
            let _ = el.style().set_property("display", display);
        }

        fn set_active_menu(&self, id: &str, active: bool) {
            let Some(el) = self.document.get_element_by_id(id) else {
                return;
            };
            let classes = el.class_list();
            let _ = if active {
                classes.add_1("activeMenu")
            } else {
                classes.remove_1("activeMenu")
            };
        }

        fn html(&self, id: &str) -> Option<HtmlElement> {
            self.document.get_element_by_id(id)?.dyn_into().ok()
        }

        fn input_value(&self, id: &str) -> Option<String> {
            let el: HtmlInputElement = self.document.get_element_by_id(id)?.dyn_into().ok()?;
            Some(el.value())
        }

        fn set_select_value(&self, id: &str, value: &str) {
            let select = self
                .document
                .get_element_by_id(id)
                .and_then(|el| el.dyn_into::<HtmlSelectElement>().ok());
            if let Some(select) = select {
                select.set_value(value);
            }
        }

        fn show_game(&self) {
            self.set_display("gameCanvas", "block");
            self.set_display("scoreDisplay", "flex");
            self.set_text("player1Score", "0");
            self.set_text("player2Score", "0");
        }

        fn hide_game(&self) {
            self.set_display("gameCanvas", "none");
            self.set_display("scoreDisplay", "none");
        }

        fn show_start_menu(&self) {
            self.set_active_menu("startMenu", true);
            self.hide_game();
        }

        /// Toggle which selectors apply to the chosen game mode
        fn show_mode_options(&self, mode: GameMode) {
            for (id, display) in ui::selector_displays(mode) {
                self.set_display(id, display);
            }
            if mode == GameMode::PvC {
                self.set_select_value("pvpModeSelect", PvpMode::Default.as_str());
                self.set_select_value("controlModeSelect", ControlMode::Keyboard.as_str());
            }
        }

        fn set_active_button(&self, active: &str, others: &[&str]) {
            if let Some(el) = self.document.get_element_by_id(active) {
                let _ = el.class_list().add_1("active");
            }
            for id in others {
                if let Some(el) = self.document.get_element_by_id(id) {
                    let _ = el.class_list().remove_1("active");
                }
            }
        }

        /// Ball color, size, and speed as currently set in the menu
        fn ball_settings(&self) -> Option<BallSettings> {
            BallSettings::from_menu(
                &self.input_value("ballColor")?,
                &self.input_value("ballSize")?,
                &self.input_value("ballSpeed")?,
            )
        }

        fn update_slider_labels(&self) {
            if let Some(size) = self.input_value("ballSize") {
                self.set_text("ballSizeValue", &size);
            }
            if let Some(speed) = self.input_value("ballSpeed") {
                self.set_text("ballSpeedValue", &speed);
            }
        }
    }

    impl MenuSink for DomMenu {
        fn score_changed(&mut self, player1: u32, player2: u32) {
            self.set_text("player1Score", &player1.to_string());
            self.set_text("player2Score", &player2.to_string());
        }

        fn game_over(&mut self, report: &GameOverReport) {
            self.hide_game();
            self.set_active_menu("gameOverMenu", true);
            self.set_text("winnerText", &winner_banner(report));
            self.set_text("finalScore1", &report.player1_score.to_string());
            self.set_text("finalScore2", &report.player2_score.to_string());
        }
    }

    /// Game instance holding all state
    struct Game {
        engine: Engine,
        input: InputSnapshot,
        menu: DomMenu,
        audio: AudioManager,
        render_state: RenderState,
        last_time: f64,
    }

    impl Game {
        /// Push the menu's ball settings into the engine
        fn apply_ball_settings(&mut self) {
            let Some(settings) = self.menu.ball_settings() else {
                log::warn!("Ball settings unreadable, keeping {:?}", self.engine.ball_settings());
                return;
            };
            self.engine
                .update_settings(&settings.color, settings.size, settings.speed);
        }

        fn start(&mut self) {
            self.menu.set_active_menu("startMenu", false);
            self.menu.set_active_menu("gameOverMenu", false);
            self.menu.show_game();
            self.apply_ball_settings();
            self.audio.resume();
            let events = self.engine.start_game();
            ui::play_sounds(&events, &mut self.audio);
        }

        fn frame(&mut self, time: f64) {
            let dt = if self.last_time > 0.0 {
                (((time - self.last_time) / 1000.0) as f32).min(MAX_FRAME_SECS)
            } else {
                FRAME_DT
            };
            self.last_time = time;

            let result = self.engine.tick(&self.input, dt);
            if self.engine.phase() == GamePhase::Idle {
                return;
            }
            ui::dispatch(
                &self.engine,
                &result,
                &mut self.menu,
                &mut self.audio,
                &mut self.render_state,
            );
        }
    }

    /// Attach `handler` to `event` on `target` for the page lifetime
    fn listen<F>(target: &EventTarget, event: &str, handler: F)
    where
        F: FnMut(Event) + 'static,
    {
        let closure = Closure::<dyn FnMut(_)>::new(handler);
        let _ = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn listen_id<F>(document: &Document, id: &str, event: &str, handler: F)
    where
        F: FnMut(Event) + 'static,
    {
        let Some(el) = document.get_element_by_id(id) else {
            log::warn!("Missing #{id}, {event} handler not attached");
            return;
        };
        listen(&el, event, handler);
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Duel Pong starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let config = GameConfig::default();
        let court = (config.canvas_width, config.canvas_height);

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");
        canvas.set_width(court.0 as u32);
        canvas.set_height(court.1 as u32);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = match instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone())) {
            Ok(surface) => surface,
            Err(e) => {
                log::error!("Failed to create surface: {e}");
                return;
            }
        };

        let adapter = match instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
        {
            Ok(adapter) => adapter,
            Err(e) => {
                log::error!("Failed to get adapter: {e}");
                return;
            }
        };

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state =
            match RenderState::new(surface, &adapter, court.0 as u32, court.1 as u32, court).await
            {
                Ok(state) => state,
                Err(e) => {
                    log::error!("Failed to create device: {e}");
                    return;
                }
            };

        let seed = js_sys::Date::now() as u64;
        let menu = DomMenu {
            document: document.clone(),
        };
        menu.update_slider_labels();
        menu.show_mode_options(GameMode::PvP);
        menu.show_start_menu();

        let game = Rc::new(RefCell::new(Game {
            engine: Engine::new(config, seed),
            input: InputSnapshot::default(),
            menu,
            audio: AudioManager::new(),
            render_state,
            last_time: 0.0,
        }));

        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(&window, &canvas, court.1, game.clone());
        setup_menu(&document, game.clone());

        request_animation_frame(game);

        log::info!("Duel Pong running!");
    }

    fn setup_input_handlers(
        window: &web_sys::Window,
        canvas: &HtmlCanvasElement,
        court_height: f32,
        game: Rc<RefCell<Game>>,
    ) {
        // Key down; Escape leaves the match
        {
            let game = game.clone();
            listen(window, "keydown", move |event: Event| {
                let Ok(event) = event.dyn_into::<KeyboardEvent>() else {
                    return;
                };
                let mut g = game.borrow_mut();
                let key = event.key();
                if key == "Escape" {
                    if matches!(g.engine.phase(), GamePhase::Running | GamePhase::Paused) {
                        g.engine.exit_to_menu();
                        g.input.keys.clear();
                        g.menu.show_start_menu();
                    }
                    return;
                }
                g.input.key_event(&key, true);
            });
        }

        // Key up
        {
            let game = game.clone();
            listen(window, "keyup", move |event: Event| {
                let Ok(event) = event.dyn_into::<KeyboardEvent>() else {
                    return;
                };
                game.borrow_mut().input.key_event(&event.key(), false);
            });
        }

        // Mouse move: pointer y in court pixels
        {
            let canvas_clone = canvas.clone();
            listen(canvas, "mousemove", move |event: Event| {
                let Ok(event) = event.dyn_into::<MouseEvent>() else {
                    return;
                };
                let rect = canvas_clone.get_bounding_client_rect();
                if rect.height() <= 0.0 {
                    return;
                }
                let y = (event.client_y() as f64 - rect.top()) / rect.height();
                game.borrow_mut().input.pointer_y =
                    Some(y as f32 * court_height).filter(|y| y.is_finite());
            });
        }
    }

    fn setup_menu(document: &Document, game: Rc<RefCell<Game>>) {
        // Game mode buttons
        for (id, other, mode) in [
            ("pvpMode", "pvcMode", GameMode::PvP),
            ("pvcMode", "pvpMode", GameMode::PvC),
        ] {
            let game = game.clone();
            listen_id(document, id, "click", move |_| {
                let mut g = game.borrow_mut();
                g.menu.set_active_button(id, &[other]);
                g.engine.set_game_mode(mode);
                g.menu.show_mode_options(mode);
            });
        }

        // Difficulty buttons
        let difficulty_ids = ["easyMode", "mediumMode", "hardMode"];
        for (id, difficulty) in difficulty_ids
            .into_iter()
            .zip([Difficulty::Easy, Difficulty::Medium, Difficulty::Hard])
        {
            let game = game.clone();
            listen_id(document, id, "click", move |_| {
                let mut g = game.borrow_mut();
                let others: Vec<&str> = difficulty_ids.into_iter().filter(|o| *o != id).collect();
                g.menu.set_active_button(id, &others);
                g.engine.set_difficulty(difficulty);
            });
        }

        // Dropdowns
        {
            let game = game.clone();
            listen_id(document, "pvpModeSelect", "change", move |event| {
                let Some(value) = select_value(&event) else { return };
                match PvpMode::from_str(&value) {
                    Some(mode) => game.borrow_mut().engine.set_pvp_mode(mode),
                    None => log::warn!("Unknown PvP mode: {value}"),
                }
            });
        }
        {
            let game = game.clone();
            listen_id(document, "controlModeSelect", "change", move |event| {
                let Some(value) = select_value(&event) else { return };
                match ControlMode::from_str(&value) {
                    Some(mode) => game.borrow_mut().engine.set_control_mode(mode),
                    None => log::warn!("Unknown control mode: {value}"),
                }
            });
        }

        // Ball sliders and color
        for id in ["ballColor", "ballSize", "ballSpeed"] {
            let game = game.clone();
            listen_id(document, id, "input", move |_| {
                let mut g = game.borrow_mut();
                g.menu.update_slider_labels();
                g.apply_ball_settings();
            });
        }

        // Start / restart
        for id in ["startGame", "restartGame"] {
            let game = game.clone();
            listen_id(document, id, "click", move |_| game.borrow_mut().start());
        }

        // Back to menu
        listen_id(document, "backToMenu", "click", move |_| {
            let g = game.borrow();
            g.menu.set_active_menu("gameOverMenu", false);
            g.menu.show_start_menu();
        });
    }

    fn select_value(event: &Event) -> Option<String> {
        let select: HtmlSelectElement = event.target()?.dyn_into().ok()?;
        Some(select.value())
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        game.borrow_mut().frame(time);
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    web_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use duel_pong::audio::MutedAudio;
    use duel_pong::consts::FRAME_DT;
    use duel_pong::renderer::FrameCounter;
    use duel_pong::sim::{Engine, GameOverReport, InputSnapshot, Key, Player};
    use duel_pong::ui::{self, ScoreLog};
    use duel_pong::{Difficulty, GameConfig, GameMode};

    /// Give up after ten simulated minutes
    const MAX_TICKS: u32 = 60 * 60 * 10;

    /// Player 1 chases the ball's y with the keyboard
    fn chase_ball(engine: &Engine) -> InputSnapshot {
        let paddle = engine.paddle(Player::Player1);
        let target = engine.ball().pos.y;
        let center = paddle.center().y;
        if target < center - engine.config().paddle_speed {
            InputSnapshot::with_keys(&[Key::W])
        } else if target > center + engine.config().paddle_speed {
            InputSnapshot::with_keys(&[Key::S])
        } else {
            InputSnapshot::default()
        }
    }

    /// Play one PvC match at `difficulty` on the virtual clock
    pub fn play_match(config: GameConfig, difficulty: Difficulty, seed: u64) -> Option<GameOverReport> {
        let mut engine = Engine::new(config, seed);
        engine.set_game_mode(GameMode::PvC);
        engine.set_difficulty(difficulty);

        let mut menu = ScoreLog::default();
        let mut audio = MutedAudio;
        let mut render = FrameCounter::default();

        let events = engine.start_game();
        ui::play_sounds(&events, &mut audio);

        for _ in 0..MAX_TICKS {
            let input = chase_ball(&engine);
            let result = engine.tick(&input, FRAME_DT);
            ui::dispatch(&engine, &result, &mut menu, &mut audio, &mut render);
            if result.game_over().is_some() {
                break;
            }
        }

        log::info!("Rendered {} frames", render.frames);
        menu.result
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    use duel_pong::{Difficulty, GameConfig};

    env_logger::init();
    log::info!("Duel Pong (native) starting...");
    log::info!("Native mode plays a headless match - use `trunk serve` for the web version");

    // Optional JSON config overrides as the first argument
    let config = match std::env::args().nth(1) {
        Some(path) => {
            let json = std::fs::read_to_string(&path)?;
            GameConfig::from_json(&json).unwrap_or_else(|e| {
                log::warn!("Ignoring {path}: {e}");
                GameConfig::default()
            })
        }
        None => GameConfig::default(),
    };

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default();

    match headless::play_match(config, Difficulty::Medium, seed) {
        Some(report) => println!(
            "{} Wins! {} - {}",
            report.winner, report.player1_score, report.player2_score
        ),
        None => println!("No winner within the time limit"),
    }
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
