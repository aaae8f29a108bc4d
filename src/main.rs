//! Space Jump entry point
//!
//! Browser builds wire the DOM, assets and audio around the simulation and run
//! it from `requestAnimationFrame`. Native builds are a small headless CLI.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        AddEventListenerOptions, CanvasRenderingContext2d, Document, Event, EventTarget,
        HtmlCanvasElement, HtmlElement, KeyboardEvent,
    };

    use space_jump::assets::{self, AssetStore};
    use space_jump::audio::{AudioManager, SoundEffect};
    use space_jump::highscores::HighScore;
    use space_jump::input::{InputState, TouchButton};
    use space_jump::renderer::build_frame;
    use space_jump::renderer::canvas::CanvasRenderer;
    use space_jump::settings::Settings;
    use space_jump::sim::{GameEvent, GamePhase, GameState, SessionCommand, apply, tick};
    use space_jump::{Tuning, Viewport};

    /// Where the image and sound files are served from
    const ASSET_PATH: &str = "assets";
    /// Orientation changes report stale sizes for a moment
    const RESIZE_DELAY_MS: i32 = 100;

    /// Game instance holding all state
    struct Game {
        state: GameState,
        input: InputState,
        assets: Rc<RefCell<AssetStore>>,
        audio: AudioManager,
        renderer: CanvasRenderer,
        canvas: HtmlCanvasElement,
        settings: Settings,
    }

    impl Game {
        /// One animation frame: sample input, tick, react to events, draw
        fn frame(&mut self, time: f64) {
            let input = self.input.snapshot();
            tick(&mut self.state, &input);

            for event in self.state.drain_events() {
                self.handle_event(event);
            }

            self.render(time);
            self.update_hud();
        }

        fn handle_event(&mut self, event: GameEvent) {
            match event {
                GameEvent::Jumped { .. } => self.audio.play(SoundEffect::Jump, &self.settings),
                GameEvent::ScoreIncreased { .. } => {
                    self.audio.play(SoundEffect::Coin, &self.settings)
                }
                GameEvent::GameOver { score } => {
                    self.input.clear();
                    set_text("finalScore", &score.to_string());
                    set_display("gameOver", "block");
                    log::info!("Game over with score {}", score);
                }
                GameEvent::PlatformBroke { .. } | GameEvent::CoinCollected { .. } => {}
            }
        }

        fn render(&self, time: f64) {
            let assets = self.assets.borrow();
            let cmds = build_frame(&self.state, &*assets, &self.settings.render_options(), time);
            self.renderer.render(&cmds, &assets);
        }

        fn update_hud(&self) {
            if self.state.phase == GamePhase::Playing {
                set_text("score", &self.state.score.to_string());
            }
        }

        /// Apply a session command and sync the overlays
        fn command(&mut self, command: SessionCommand) {
            if !apply(&mut self.state, command) {
                return;
            }
            self.input.clear();
            match command {
                SessionCommand::StartGame => set_display("startScreen", "none"),
                SessionCommand::Restart => set_display("gameOver", "none"),
                SessionCommand::ExitToMenu => {
                    set_display("gameOver", "none");
                    set_display("startScreen", "flex");
                }
            }
            set_text("score", &self.state.score.to_string());
        }

        /// Re-measure the window and resize the canvas
        fn resize(&mut self) {
            let viewport = measure_viewport();
            self.canvas.set_width(viewport.width as u32);
            self.canvas.set_height(viewport.height as u32);
            self.renderer
                .resize(viewport.width as u32, viewport.height as u32);
            self.state.resize(viewport);
            log::info!("Canvas resized to {}x{}", viewport.width, viewport.height);
        }
    }

    fn document() -> Option<Document> {
        web_sys::window()?.document()
    }

    fn set_text(id: &str, text: &str) {
        if let Some(el) = document().and_then(|d| d.get_element_by_id(id)) {
            el.set_text_content(Some(text));
        }
    }

    fn set_display(id: &str, value: &str) {
        let el = document()
            .and_then(|d| d.get_element_by_id(id))
            .and_then(|el| el.dyn_into::<HtmlElement>().ok());
        if let Some(el) = el {
            let _ = el.style().set_property("display", value);
        }
    }

    fn measure_viewport() -> Viewport {
        let Some(window) = web_sys::window() else {
            return Viewport::default();
        };
        let width = window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(400.0);
        let height = window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(700.0);
        Viewport::for_window(width as f32, height as f32)
    }

    /// Attach a listener that lives for the rest of the page
    fn listen(target: &EventTarget, event: &str, handler: impl FnMut(Event) + 'static) {
        let closure = Closure::<dyn FnMut(Event)>::new(handler);
        let _ = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Attach a click handler to the element with this id, if present
    fn on_click(id: &str, handler: impl FnMut(Event) + 'static) {
        match document().and_then(|d| d.get_element_by_id(id)) {
            Some(el) => listen(&el, "click", handler),
            None => log::warn!("Missing #{} element", id),
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Space Jump starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .expect("context query failed")
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");

        let viewport = measure_viewport();
        canvas.set_width(viewport.width as u32);
        canvas.set_height(viewport.height as u32);

        let seed = js_sys::Date::now() as u64;
        log::info!("Session seed: {}", seed);

        // The game starts only once every asset attempt has resolved
        let pending: Rc<RefCell<Option<Rc<RefCell<Game>>>>> = Rc::new(RefCell::new(None));
        let assets = {
            let pending = pending.clone();
            assets::load_all(ASSET_PATH, move || {
                if let Some(game) = pending.borrow_mut().take() {
                    init(game);
                }
            })
        };

        let game = Game {
            state: GameState::new(seed, viewport, Tuning::default()),
            input: InputState::new(),
            audio: AudioManager::new(assets.clone()),
            assets: assets.clone(),
            renderer: CanvasRenderer::new(ctx, viewport.width as u32, viewport.height as u32),
            canvas,
            settings: Settings::load(),
        };
        *pending.borrow_mut() = Some(Rc::new(RefCell::new(game)));

        // Everything may have resolved before the game existed
        if assets.borrow().tracker.is_complete() {
            if let Some(game) = pending.borrow_mut().take() {
                init(game);
            }
        }
    }

    /// Hook up the DOM and start the frame loop
    fn init(game: Rc<RefCell<Game>>) {
        setup_keyboard(game.clone());
        setup_touch_buttons(game.clone());
        setup_menu_buttons(game.clone());
        setup_viewport_handlers(game.clone());

        request_animation_frame(game);
        log::info!("Space Jump running!");
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };

        {
            let game = game.clone();
            listen(&window, "keydown", move |event: Event| {
                let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                    return;
                };
                let code = event.code();
                let mut g = game.borrow_mut();
                if !event.repeat() {
                    match code.as_str() {
                        "KeyI" => {
                            g.input.idle_mode = !g.input.idle_mode;
                            log::info!(
                                "Autopilot {}",
                                if g.input.idle_mode { "on" } else { "off" }
                            );
                        }
                        "KeyQ" => {
                            let preset = g.settings.cycle_quality();
                            g.settings.save();
                            log::info!("Quality set to {}", preset.as_str());
                        }
                        "KeyM" => {
                            let muted = g.settings.toggle_mute();
                            g.settings.save();
                            log::info!("Sound {}", if muted { "muted" } else { "on" });
                        }
                        _ => {}
                    }
                }
                g.input.key_down(&code);
            });
        }

        listen(&window, "keyup", move |event: Event| {
            if let Some(event) = event.dyn_ref::<KeyboardEvent>() {
                game.borrow_mut().input.key_up(&event.code());
            }
        });
    }

    fn setup_touch_buttons(game: Rc<RefCell<Game>>) {
        let Some(document) = document() else { return };

        for button in [TouchButton::Left, TouchButton::Right] {
            let Some(el) = document.get_element_by_id(button.element_id()) else {
                log::warn!("Missing #{} element", button.element_id());
                continue;
            };

            for (event, down) in [
                ("touchstart", true),
                ("touchend", false),
                ("mousedown", true),
                ("mouseup", false),
            ] {
                let game = game.clone();
                listen(&el, event, move |event: Event| {
                    if event.type_().starts_with("touch") {
                        event.prevent_default();
                    }
                    game.borrow_mut().input.button(button, down);
                });
            }
        }

        // Keep the page from scrolling under the controls
        let closure = Closure::<dyn FnMut(Event)>::new(|event: Event| {
            event.prevent_default();
        });
        let options = AddEventListenerOptions::new();
        options.set_passive(false);
        let _ = document.add_event_listener_with_callback_and_add_event_listener_options(
            "touchmove",
            closure.as_ref().unchecked_ref(),
            &options,
        );
        closure.forget();
    }

    fn setup_menu_buttons(game: Rc<RefCell<Game>>) {
        {
            let game = game.clone();
            on_click("startPlayBtn", move |_| {
                let mut g = game.borrow_mut();
                g.command(SessionCommand::StartGame);
            });
        }
        {
            let game = game.clone();
            on_click("playBtn", move |_| {
                game.borrow_mut().command(SessionCommand::Restart);
            });
        }
        for id in ["startLeaderboardBtn", "topScorerBtn"] {
            let game = game.clone();
            on_click(id, move |_| {
                // Drop the borrow before the blocking dialog
                let score = game.borrow().state.score;
                let message = HighScore::check_and_store(score).message();
                if let Some(window) = web_sys::window() {
                    let _ = window.alert_with_message(&message);
                }
            });
        }
        {
            let game = game.clone();
            on_click("exitBtn", move |_| {
                let confirmed = web_sys::window()
                    .and_then(|w| {
                        w.confirm_with_message("Are you sure you want to exit to the main menu?")
                            .ok()
                    })
                    .unwrap_or(false);
                if confirmed {
                    game.borrow_mut().command(SessionCommand::ExitToMenu);
                }
            });
        }
        on_click("startExitBtn", |_| {
            let Some(window) = web_sys::window() else { return };
            let confirmed = window
                .confirm_with_message("Are you sure you want to exit the game?")
                .unwrap_or(false);
            if confirmed && window.close().is_err() {
                let _ = window.alert_with_message("Please close this tab manually.");
            }
        });
    }

    fn setup_viewport_handlers(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };

        listen(&window, "orientationchange", move |_event: Event| {
            let game = game.clone();
            let delayed = Closure::once(move || game.borrow_mut().resize());
            if let Some(window) = web_sys::window() {
                let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
                    delayed.as_ref().unchecked_ref(),
                    RESIZE_DELAY_MS,
                );
            }
            delayed.forget();
        });
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };
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
    wasm_game::run().await;
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod cli {
    use std::path::PathBuf;

    use anyhow::{Context, Result};
    use clap::{Parser, Subcommand};

    use space_jump::frame::{DEFAULT_APP_URL, FrameEmbed, FrameManifest};
    use space_jump::sim::{Driver, GameState, run_session};
    use space_jump::{Tuning, Viewport};

    #[derive(Parser)]
    #[command(name = "space-jump")]
    #[command(about = "Headless tools for Space Jump")]
    struct Cli {
        #[command(subcommand)]
        command: Commands,
    }

    #[derive(Subcommand)]
    enum Commands {
        /// Run a seeded session and print a JSON summary
        Simulate {
            #[arg(long, default_value_t = 1)]
            seed: u64,
            /// Maximum frames to run (60 per second of play)
            #[arg(long, default_value_t = 3600)]
            frames: u64,
            #[arg(long, default_value_t = 400.0)]
            width: f32,
            #[arg(long, default_value_t = 700.0)]
            height: f32,
            /// JSON file overriding gameplay tuning
            #[arg(long)]
            tuning: Option<PathBuf>,
            /// Leave the controls alone instead of using the autopilot
            #[arg(long)]
            no_input: bool,
        },
        /// Print the mini-app manifest
        Manifest {
            #[arg(long, default_value = DEFAULT_APP_URL)]
            app_url: String,
        },
        /// Print the embed JSON for the `fc:frame` meta tag
        Embed {
            #[arg(long, default_value = DEFAULT_APP_URL)]
            app_url: String,
        },
    }

    pub fn run() -> Result<()> {
        let cli = Cli::parse();

        match cli.command {
            Commands::Simulate {
                seed,
                frames,
                width,
                height,
                tuning,
                no_input,
            } => simulate(seed, frames, Viewport::new(width, height), tuning, no_input),
            Commands::Manifest { app_url } => {
                let json = serde_json::to_string_pretty(&FrameManifest::for_app(&app_url))
                    .context("Failed to serialize manifest")?;
                println!("{}", json);
                Ok(())
            }
            Commands::Embed { app_url } => {
                let json = FrameEmbed::for_app(&app_url)
                    .meta_content()
                    .context("Failed to serialize embed")?;
                println!("{}", json);
                Ok(())
            }
        }
    }

    fn load_tuning(path: Option<PathBuf>) -> Result<Tuning> {
        let Some(path) = path else {
            return Ok(Tuning::default());
        };
        let json = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Tuning::from_json(&json).with_context(|| format!("Invalid tuning in {}", path.display()))
    }

    fn simulate(
        seed: u64,
        frames: u64,
        viewport: Viewport,
        tuning: Option<PathBuf>,
        no_input: bool,
    ) -> Result<()> {
        if viewport.width <= 0.0 || viewport.height <= 0.0 {
            anyhow::bail!("Viewport must be positive, got {}x{}", viewport.width, viewport.height);
        }
        let tuning = load_tuning(tuning)?;
        let driver = if no_input {
            Driver::NoInput
        } else {
            Driver::Autopilot
        };

        log::info!("Simulating seed {} for up to {} frames", seed, frames);
        let mut state = GameState::new(seed, viewport, tuning);
        let summary = run_session(&mut state, frames, driver);

        let json =
            serde_json::to_string_pretty(&summary).context("Failed to serialize summary")?;
        println!("{}", json);
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    env_logger::init();
    cli::run()
}
