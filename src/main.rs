//! Money Catcher entry point
//!
//! Handles platform-specific initialization and owns the round bookkeeping
//! (score, lives, timer) that the simulation reports into.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

use money_catcher::sim::{GameEvent, GameMode, TickInput};

/// Length of a Timed round in seconds
const ROUND_SECONDS: f32 = 60.0;
/// Starting lives in Survival
const SURVIVAL_LIVES: u32 = 5;

/// Host-side state for one round
#[derive(Debug, Clone)]
struct Round {
    mode: GameMode,
    playing: bool,
    score: i64,
    caught: u32,
    missed: u32,
    lives: u32,
    time_left: f32,
}

impl Round {
    fn new(mode: GameMode) -> Self {
        Self {
            mode,
            playing: false,
            score: 0,
            caught: 0,
            missed: 0,
            lives: SURVIVAL_LIVES,
            time_left: ROUND_SECONDS,
        }
    }

    /// Reset the counters and begin playing
    fn start(&mut self) {
        *self = Self {
            playing: true,
            ..Self::new(self.mode)
        };
        log::info!("Round started ({:?})", self.mode);
    }

    fn apply(&mut self, events: &[GameEvent]) {
        for event in events {
            match *event {
                GameEvent::Score { delta } => {
                    self.score += delta;
                    if delta > 0 {
                        self.caught += 1;
                    }
                }
                GameEvent::Miss => self.missed += 1,
                GameEvent::PenaltyHit => {
                    if self.mode == GameMode::Survival {
                        self.lives = self.lives.saturating_sub(1);
                        if self.lives == 0 {
                            self.finish();
                        }
                    }
                }
            }
        }
    }

    /// Run the Timed clock down by `dt` seconds
    fn advance_clock(&mut self, dt: f32) {
        if !self.playing || self.mode != GameMode::Timed {
            return;
        }
        self.time_left = (self.time_left - dt).max(0.0);
        if self.time_left <= 0.0 {
            self.finish();
        }
    }

    fn finish(&mut self) {
        if self.playing {
            self.playing = false;
            log::info!(
                "Round over: ${} ({} caught, {} missed)",
                money_catcher::format_money(self.score),
                self.caught,
                self.missed
            );
        }
    }

    fn tick_input(&self, width: f32, height: f32, pointer_x: Option<f32>) -> TickInput {
        TickInput {
            is_playing: self.playing,
            lives: self.lives,
            mode: self.mode,
            viewport_width: width,
            viewport_height: height,
            pointer_x,
        }
    }
}

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, MouseEvent, TouchEvent};

    use super::Round;
    use money_catcher::platform::web::AnimationLoop;
    use money_catcher::renderer::{MeshSurface, RenderInitError, RenderState, render};
    use money_catcher::sim::{GameMode, Scene, autopilot, tick};
    use money_catcher::{Settings, format_money};

    thread_local! {
        static FRAME_LOOP: RefCell<Option<AnimationLoop>> = const { RefCell::new(None) };
    }

    /// Game instance holding all state
    struct Game {
        scene: Scene,
        settings: Settings,
        round: Round,
        render_state: Option<RenderState>,
        mesh: MeshSurface,
        canvas: HtmlCanvasElement,
        last_time: f64,
        /// Latest pointer position in CSS pixels
        pointer_x: Option<f32>,
        autopilot: bool,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl Game {
        fn new(seed: u64, settings: Settings, canvas: HtmlCanvasElement) -> Self {
            let mut scene = Scene::new(seed);
            scene.apply_settings(&settings);
            let segments = settings.quality.circle_segments();
            Self {
                scene,
                settings,
                round: Round::new(GameMode::Timed),
                render_state: None,
                mesh: MeshSurface::new(0.0, 0.0, segments),
                canvas,
                last_time: 0.0,
                pointer_x: None,
                autopilot: false,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
            }
        }

        /// Logical canvas size, resizing the backing store to match
        fn sync_size(&mut self) -> (f32, f32) {
            let dpr = web_sys::window().map(|w| w.device_pixel_ratio()).unwrap_or(1.0);
            let css_w = self.canvas.client_width().max(0);
            let css_h = self.canvas.client_height().max(0);
            let backing_w = (css_w as f64 * dpr) as u32;
            let backing_h = (css_h as f64 * dpr) as u32;
            if self.canvas.width() != backing_w || self.canvas.height() != backing_h {
                self.canvas.set_width(backing_w);
                self.canvas.set_height(backing_h);
                if let Some(ref mut render_state) = self.render_state {
                    render_state.resize(backing_w, backing_h);
                }
            }
            (css_w as f32, css_h as f32)
        }

        /// One display refresh: tick, render, HUD
        fn frame(&mut self, time: f64) {
            let dt = if self.last_time > 0.0 {
                ((time - self.last_time) / 1000.0) as f32
            } else {
                0.0
            };
            self.last_time = time;
            self.track_fps(time);

            let (width, height) = self.sync_size();
            let pointer_x = if self.autopilot && self.scene.has_viewport() {
                Some(autopilot::target_x(&self.scene))
            } else {
                self.pointer_x
            };

            let input = self.round.tick_input(width, height, pointer_x);
            let events = tick(&mut self.scene, &input);
            self.round.apply(&events);
            self.round.advance_clock(dt.min(0.1));

            self.render(width, height);
            self.update_hud();
        }

        fn render(&mut self, width: f32, height: f32) {
            self.mesh.begin_frame(width, height);
            if !render(&self.scene, &self.settings, Some(&mut self.mesh)) {
                return;
            }
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(self.mesh.vertices(), (width, height)) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        render_state.reconfigure();
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        fn track_fps(&mut self, time: f64) {
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

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let round = &self.round;

            set_text(&document, "hud-score", &format!("${}", format_money(round.score)));
            set_text(&document, "hud-caught", &round.caught.to_string());
            set_text(&document, "hud-missed", &round.missed.to_string());
            set_text(&document, "hud-mode", match round.mode {
                GameMode::Timed => "TIMED",
                GameMode::Survival => "SURVIVAL",
            });
            match round.mode {
                GameMode::Timed => {
                    set_text(&document, "hud-time", &format!("{:.0}", round.time_left.ceil()));
                    set_visible(&document, "hud-time-item", true);
                    set_visible(&document, "hud-lives-item", false);
                }
                GameMode::Survival => {
                    set_text(&document, "hud-lives", &round.lives.to_string());
                    set_visible(&document, "hud-time-item", false);
                    set_visible(&document, "hud-lives-item", true);
                }
            }

            set_visible(&document, "hud-fps-item", self.settings.show_fps);
            if self.settings.show_fps {
                set_text(&document, "hud-fps", &self.fps.to_string());
            }

            set_visible(&document, "start-prompt", !round.playing);
            set_text(&document, "final-score", &format!("${}", format_money(round.score)));
        }

        fn start_round(&mut self) {
            if !self.round.playing {
                self.round.start();
            }
        }

        fn toggle_mode(&mut self) {
            if self.round.playing {
                return;
            }
            let mode = match self.round.mode {
                GameMode::Timed => GameMode::Survival,
                GameMode::Survival => GameMode::Timed,
            };
            self.round = Round::new(mode);
            log::info!("Mode: {:?}", mode);
        }
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            if el.text_content().as_deref() != Some(text) {
                el.set_text_content(Some(text));
            }
        }
    }

    fn set_visible(document: &Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let class = if visible { "hud-item" } else { "hud-item hidden" };
            let _ = el.set_attribute("class", class);
        }
    }

    /// Settings from the page URL (`?quality=low&seed=7&fps=1`)
    fn settings_from_location(window: &web_sys::Window) -> Settings {
        let mut settings = Settings::default();
        let query = window.location().search().unwrap_or_default();
        if let Err(e) = settings.apply_query(&query) {
            log::warn!("Ignoring settings query: {}", e);
        }
        settings
    }

    async fn init_gpu(
        canvas: &HtmlCanvasElement,
        width: u32,
        height: u32,
    ) -> Result<RenderState, RenderInitError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        RenderState::new(surface, &adapter, width, height).await
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Money Catcher starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let settings = settings_from_location(&window);
        let seed = settings.seed.unwrap_or_else(|| js_sys::Date::now() as u64);
        log::info!(
            "Game initialized with seed: {} ({} quality)",
            seed,
            settings.quality.as_str()
        );

        let game = Rc::new(RefCell::new(Game::new(seed, settings, canvas.clone())));

        // Without a GPU the game still runs; frames are composed but not shown
        match init_gpu(&canvas, width, height).await {
            Ok(render_state) => game.borrow_mut().render_state = Some(render_state),
            Err(e) => log::error!("WebGPU unavailable: {}", e),
        }

        setup_input_handlers(&canvas, game.clone());

        let frame_game = game.clone();
        let frame_loop = AnimationLoop::start(move |time| frame_game.borrow_mut().frame(time));
        FRAME_LOOP.with(|slot| *slot.borrow_mut() = Some(frame_loop));
        setup_teardown();

        log::info!("Money Catcher running!");
    }

    /// Stop the frame loop when the page goes away
    fn setup_teardown() {
        let window = web_sys::window().expect("no window");
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            // Dropping the loop cancels the pending frame and frees its closure
            FRAME_LOOP.with(|slot| slot.borrow_mut().take());
        });
        let _ = window.add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn touch_x(canvas: &HtmlCanvasElement, event: &TouchEvent) -> Option<f32> {
        let touch = event.touches().get(0)?;
        let rect = canvas.get_bounding_client_rect();
        Some(touch.client_x() as f32 - rect.left() as f32)
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Mouse move
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                game.borrow_mut().pointer_x = Some(event.offset_x() as f32);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Click starts a round
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().start_round();
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch move
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(x) = touch_x(&canvas_clone, &event) {
                    game.borrow_mut().pointer_x = Some(x);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start (also starts a round)
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let mut g = game.borrow_mut();
                if let Some(x) = touch_x(&canvas_clone, &event) {
                    g.pointer_x = Some(x);
                }
                g.start_round();
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        {
            let window = web_sys::window().expect("no window");
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    " " | "Enter" => g.start_round(),
                    "m" | "M" => g.toggle_mode(),
                    "i" | "I" => {
                        g.autopilot = !g.autopilot;
                        log::info!("Autopilot: {}", g.autopilot);
                    }
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
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

/// Headless demo: one round played by the autopilot, drawn into a mesh
#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use super::Round;
    use money_catcher::Settings;
    use money_catcher::platform::LoopControl;
    use money_catcher::renderer::{MeshSurface, render};
    use money_catcher::sim::{GameMode, Scene, autopilot, tick};

    const VIEWPORT: (f32, f32) = (800.0, 600.0);
    const TICK_SECONDS: f32 = 1.0 / 60.0;

    pub fn run(settings: &Settings, mode: GameMode, max_ticks: u64) -> Round {
        let seed = settings.seed.unwrap_or(0x5EED);
        let (width, height) = VIEWPORT;

        let mut scene = Scene::with_viewport(seed, width, height);
        scene.apply_settings(settings);
        let mut mesh = MeshSurface::new(width, height, settings.quality.circle_segments());
        let mut round = Round::new(mode);
        round.start();

        let control = LoopControl::new();
        let mut ticks = 0;
        let mut peak_vertices = 0;
        while control.is_running() && ticks < max_ticks {
            let pointer_x = Some(autopilot::target_x(&scene));
            let events = tick(&mut scene, &round.tick_input(width, height, pointer_x));
            round.apply(&events);
            round.advance_clock(TICK_SECONDS);

            mesh.begin_frame(width, height);
            if render(&scene, settings, Some(&mut mesh)) {
                peak_vertices = peak_vertices.max(mesh.vertex_count());
            }

            ticks += 1;
            if !round.playing {
                control.stop();
            }
        }

        log::info!(
            "Headless run (seed {}, {} quality): {} ticks, score ${}, {} caught, {} missed, {} lives, peak {} vertices",
            scene.seed,
            settings.quality.as_str(),
            ticks,
            money_catcher::format_money(round.score),
            round.caught,
            round.missed,
            round.lives,
            peak_vertices
        );
        round
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use money_catcher::Settings;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Money Catcher (native) starting...");
    log::info!("Native mode runs a headless autopilot round - run with `trunk serve` for the web version");

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => match Settings::from_file(std::path::Path::new(&path)) {
            Ok(settings) => settings,
            Err(e) => {
                log::error!("Could not load settings from {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => Settings::default(),
    };
    let mode = match args.next().as_deref() {
        Some("survival") => GameMode::Survival,
        _ => GameMode::Timed,
    };

    let round = headless::run(&settings, mode, u64::from(ROUND_SECONDS as u32) * 60 * 10);
    println!(
        "Final score: ${} ({} caught, {} missed)",
        money_catcher::format_money(round.score),
        round.caught,
        round.missed
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_scoring() {
        let mut round = Round::new(GameMode::Timed);
        round.start();
        round.apply(&[
            GameEvent::Score { delta: 8000 },
            GameEvent::Score { delta: -2000 },
            GameEvent::PenaltyHit,
            GameEvent::Miss,
        ]);
        assert_eq!(round.score, 6000);
        assert_eq!(round.caught, 1);
        assert_eq!(round.missed, 1);
        // Timed mode never costs lives
        assert_eq!(round.lives, SURVIVAL_LIVES);
        assert!(round.playing);
    }

    #[test]
    fn test_survival_ends_at_zero_lives() {
        let mut round = Round::new(GameMode::Survival);
        round.start();
        for _ in 0..SURVIVAL_LIVES {
            round.apply(&[GameEvent::PenaltyHit]);
        }
        assert_eq!(round.lives, 0);
        assert!(!round.playing);
        assert!(!round.tick_input(400.0, 600.0, None).is_playing);
    }

    #[test]
    fn test_timed_clock() {
        let mut round = Round::new(GameMode::Timed);
        round.advance_clock(10.0);
        assert_eq!(round.time_left, ROUND_SECONDS);

        round.start();
        round.advance_clock(ROUND_SECONDS - 1.0);
        assert!(round.playing);
        round.advance_clock(2.0);
        assert!(!round.playing);
        assert_eq!(round.time_left, 0.0);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_headless_round_finishes() {
        let settings = money_catcher::Settings {
            seed: Some(3),
            ..Default::default()
        };
        let round = headless::run(&settings, GameMode::Timed, 60 * 70);
        assert!(!round.playing);
        assert!(round.caught > 0);
    }
}
