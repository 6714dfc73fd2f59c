//! Paddle Bounce entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, MouseEvent, TouchEvent};

    use paddle_bounce::config::RenderBackend;
    use paddle_bounce::platform::web::{self, AnimationFrames};
    use paddle_bounce::renderer::canvas::CanvasSurface;
    use paddle_bounce::renderer::{Color, RenderState, ShapeBatch};
    use paddle_bounce::sim::Bounds;
    use paddle_bounce::ui::DomHud;
    use paddle_bounce::{GameConfig, Session, surface_size};

    /// Where frames are drawn
    enum Backend {
        Gpu {
            render_state: RenderState,
            batch: ShapeBatch,
        },
        Canvas(CanvasSurface),
    }

    /// Game instance holding all state
    struct Game {
        session: Session,
        frames: AnimationFrames,
        hud: DomHud,
        backend: Backend,
        canvas: HtmlCanvasElement,
    }

    /// Filled once startup finishes; callbacks before that are dropped
    type SharedGame = Rc<RefCell<Option<Game>>>;

    impl Game {
        /// Run one tick and present it
        fn frame(&mut self) {
            let Game {
                session,
                frames,
                hud,
                backend,
                ..
            } = self;

            match backend {
                Backend::Gpu {
                    render_state,
                    batch,
                } => {
                    if session.on_frame(batch, frames, hud).is_none() {
                        return;
                    }
                    match render_state.render(batch) {
                        Ok(_) => {}
                        Err(wgpu::SurfaceError::Lost) => {
                            render_state.resize(render_state.size.0, render_state.size.1);
                        }
                        Err(wgpu::SurfaceError::OutOfMemory) => {
                            log::error!("Out of memory!");
                        }
                        Err(e) => log::warn!("Render error: {:?}", e),
                    }
                }
                Backend::Canvas(surface) => {
                    session.on_frame(surface, frames, hud);
                }
            }
        }

        fn restart(&mut self) {
            let Game {
                session,
                frames,
                hud,
                ..
            } = self;
            session.initialize(frames, hud);
        }

        fn pointer_moved(&mut self, sample: paddle_bounce::platform::PointerSample) {
            let rect = web::surface_rect(&self.canvas);
            self.session.on_pointer(&rect, sample);
        }
    }

    fn with_game(game: &SharedGame, f: impl FnOnce(&mut Game)) {
        if let Some(g) = game.borrow_mut().as_mut() {
            f(g);
        }
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("Logger init failed: {}", e).into());
        }

        log::info!("Paddle Bounce starting...");

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .ok_or_else(|| JsValue::from_str("no #gameCanvas element"))?
            .dyn_into()?;

        let config = GameConfig::load();
        let bounds = surface_size(web::viewport_width(&window), &config);
        canvas.set_width(bounds.width as u32);
        canvas.set_height(bounds.height as u32);
        log::info!("Surface size {}x{}", bounds.width, bounds.height);

        let backend = create_backend(&window, &canvas, &config, bounds).await?;

        let game: SharedGame = Rc::new(RefCell::new(None));
        let mut frames = AnimationFrames::new(window.clone());
        {
            let game = game.clone();
            frames.set_callback(move |_time: f64| {
                with_game(&game, Game::frame);
            });
        }

        // Starts the first round and schedules its first frame
        let mut hud = DomHud::new(&document);
        let session = Session::new(config, bounds, &mut frames, &mut hud);

        *game.borrow_mut() = Some(Game {
            session,
            frames,
            hud,
            backend,
            canvas: canvas.clone(),
        });

        setup_input_handlers(&canvas, game.clone());
        setup_restart_button(&document, game);

        log::info!("Paddle Bounce running!");
        Ok(())
    }

    /// Pick the backend: WebGPU when configured and available, else canvas 2D
    async fn create_backend(
        window: &web_sys::Window,
        canvas: &HtmlCanvasElement,
        config: &GameConfig,
        bounds: Bounds,
    ) -> Result<Backend, JsValue> {
        if config.backend == RenderBackend::Gpu && web::webgpu_available(window) {
            match create_gpu_backend(canvas, bounds, config.palette.background).await {
                Ok(backend) => {
                    log::info!("Rendering with WebGPU");
                    return Ok(backend);
                }
                Err(e) => log::warn!("WebGPU setup failed ({}), trying canvas 2D", e),
            }
        }

        let surface = CanvasSurface::from_canvas(canvas)
            .ok_or_else(|| JsValue::from_str("canvas 2D context unavailable"))?;
        log::info!("Rendering with canvas 2D");
        Ok(Backend::Canvas(surface))
    }

    async fn create_gpu_backend(
        canvas: &HtmlCanvasElement,
        bounds: Bounds,
        background: Color,
    ) -> Result<Backend, Box<dyn std::error::Error>> {
        let (width, height) = (bounds.width as u32, bounds.height as u32);
        if width == 0 || height == 0 {
            return Err("surface has zero size".into());
        }

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height, background).await?;
        Ok(Backend::Gpu {
            render_state,
            batch: ShapeBatch::new(),
        })
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: SharedGame) {
        // Mouse move
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let sample = web::mouse_sample(&event);
                with_game(&game, |g| g.pointer_moved(sample));
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch move (first contact point)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(sample) = web::touch_sample(&event) {
                    with_game(&game, |g| g.pointer_moved(sample));
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_restart_button(document: &web_sys::Document, game: SharedGame) {
        let Some(btn) = document.get_element_by_id("restartBtn") else {
            log::warn!("No #restartBtn element, restart disabled");
            return;
        };

        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            with_game(&game, Game::restart);
            log::info!("Game restarted");
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        log::error!("Startup failed: {:?}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Paddle Bounce (native) starting...");
    log::info!("Native mode runs headless - run with `trunk serve` for the web version");

    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless run: an autopilot plays one round on a queued scheduler, then a
/// second round with the paddle left alone until the ball is missed.
#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use paddle_bounce::platform::{PointerSample, SurfaceRect};
    use paddle_bounce::renderer::ShapeBatch;
    use paddle_bounce::ui::LogHud;
    use paddle_bounce::{GameConfig, QueuedFrames, Session, surface_size};

    /// Simulated `window.innerWidth`
    const VIEWPORT_WIDTH: f32 = 520.0;
    /// Frames the autopilot plays before restarting
    const AUTOPILOT_FRAMES: u32 = 3000;
    /// Upper bound for the unattended round
    const MAX_FRAMES: u32 = 10_000;

    pub fn run() {
        let config = GameConfig::load();
        let bounds = surface_size(VIEWPORT_WIDTH, &config);
        let rect = SurfaceRect {
            left: 0.0,
            top: 0.0,
            width: bounds.width,
            height: bounds.height,
        };

        let mut frames = QueuedFrames::new();
        let mut hud = LogHud::default();
        let mut batch = ShapeBatch::new();
        let mut session = Session::new(config, bounds, &mut frames, &mut hud);

        // Round 1: follow the ball
        for _ in 0..AUTOPILOT_FRAMES {
            let x = session.state().ball.pos.x;
            session.on_pointer(&rect, PointerSample::new(x, 0.0));
            if frames.fire().is_none() {
                break;
            }
            session.on_frame(&mut batch, &mut frames, &mut hud);
        }
        log::info!(
            "Autopilot round: {} ticks, score {}, {} vertices in last frame",
            session.ticks(),
            session.score(),
            batch.vertices().len()
        );

        // Round 2: hands off
        session.initialize(&mut frames, &mut hud);
        let mut fired = 0;
        while fired < MAX_FRAMES && frames.fire().is_some() {
            session.on_frame(&mut batch, &mut frames, &mut hud);
            fired += 1;
        }
        log::info!(
            "Unattended round: game over {} after {} ticks",
            session.is_game_over(),
            session.ticks()
        );

        match serde_json::to_string_pretty(session.state()) {
            Ok(json) => println!("{}", json),
            Err(e) => log::error!("Failed to serialize final state: {}", e),
        }
        log::info!(
            "Frames requested {}, cancelled {}",
            frames.requested(),
            frames.cancelled()
        );
    }
}
