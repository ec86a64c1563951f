//! Snowglobe - a winter scene in a window
//!
//! Snow falls over a cottage and trees; drag flakes with the mouse, tilt
//! with the arrow keys or shake the window to stir them up.

use std::process::ExitCode;
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::WindowId,
};

use snowglobe::config::AppConfig;
use snowglobe::input::{InputAction, InputMapper};
use snowglobe::scene::{compose_scene, SceneAssets};
use snowglobe::systems::{
    MotionForce, RenderError, RenderSystem, SimulationSystem, WindowSystem,
};
use snowglobe_core::{Scene, Vec2};
use snowglobe_input::{MotionController, PointerEvent, PointerTracker};

/// Main application state
struct App {
    /// Application configuration
    config: AppConfig,
    /// Terrain outlines, kept for respawning
    assets: SceneAssets,
    scene: Scene,
    window: Option<WindowSystem>,
    render: Option<RenderSystem>,
    pointer: Option<PointerTracker>,
    simulation: SimulationSystem,
    motion: MotionController,
}

impl App {
    fn new(config: AppConfig, assets: SceneAssets) -> Self {
        let scene = compose_scene(&config, &assets);
        let simulation = SimulationSystem::new(config.physics.step_duration());
        let motion = MotionController::new(
            config.motion.tilt_acceleration,
            config.motion.shake_sensitivity,
        );

        Self {
            config,
            assets,
            scene,
            window: None,
            render: None,
            pointer: None,
            simulation,
            motion,
        }
    }

    /// Rebuild the scene with fresh snow
    fn respawn(&mut self) {
        self.scene = compose_scene(&self.config, &self.assets);
        self.simulation.reset();
        log::info!("Scene respawned");
    }

    /// Force applied by device motion: at the canvas centre
    fn motion_force(&self) -> MotionForce {
        MotionForce {
            point: Vec2::new(self.config.scene.width / 2.0, self.config.scene.height / 2.0),
            scale: self.config.motion.force_scale,
        }
    }

    fn handle_pointer(&mut self, event: PointerEvent) {
        let physics = self.scene.physics_mut();
        match event {
            PointerEvent::Down(position) => {
                if let Some(key) = physics.pointer_down(position) {
                    log::debug!("Grabbed body {:?}", key);
                }
            }
            PointerEvent::Move(position) => physics.pointer_move(position),
            PointerEvent::Up => {
                physics.pointer_up();
            }
        }
    }

    fn handle_action(&mut self, action: InputAction, event_loop: &ActiveEventLoop) {
        match action {
            InputAction::Exit => event_loop.exit(),
            InputAction::Respawn => self.respawn(),
            InputAction::ToggleColliders => {
                if let Some(render) = &mut self.render {
                    let shown = render.toggle_colliders();
                    log::info!("Collider outlines: {}", if shown { "ON" } else { "OFF" });
                }
            }
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let motion = self.motion.sample();
        let force = self.motion_force();
        self.simulation.update(&mut self.scene, motion, force);

        if let Some(render) = &mut self.render {
            match render.render_frame(&self.scene) {
                Ok(()) => {}
                Err(RenderError::SurfaceLost) => render.recover_surface(),
                Err(RenderError::OutOfMemory) => {
                    log::error!("GPU out of memory");
                    event_loop.exit();
                    return;
                }
                Err(e) => log::warn!("{}", e),
            }
        }

        // Request next frame
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window = match WindowSystem::create(event_loop, &self.config.window, &self.config.scene) {
            Ok(window) => window,
            Err(e) => {
                log::error!("{}", e);
                event_loop.exit();
                return;
            }
        };

        let render = match RenderSystem::new(window.window().clone(), &self.config) {
            Ok(render) => render,
            Err(e) => {
                log::error!("{}", e);
                event_loop.exit();
                return;
            }
        };

        self.pointer = Some(PointerTracker::new(
            self.config.scene.width,
            self.config.scene.height,
            render.size(),
        ));
        self.simulation.reset();
        window.request_redraw();

        self.window = Some(window);
        self.render = Some(render);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                if let Some(render) = &mut self.render {
                    render.resize(size);
                }
                if let Some(pointer) = &mut self.pointer {
                    pointer.resize(size);
                }
                if let Some(window) = &self.window {
                    window.check_orientation(size);
                }
            }

            WindowEvent::Moved(position) => {
                self.motion.process_window_moved(position);
            }

            WindowEvent::Focused(false) => {
                self.motion.reset();
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key) = event.physical_key {
                    if !event.repeat {
                        if let Some(action) = InputMapper::map_keyboard(key, event.state) {
                            self.handle_action(action, event_loop);
                            return;
                        }
                    }
                    // Pass to motion controller for tilt keys
                    self.motion.process_keyboard(key, event.state);
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                if let Some(pointer) = &mut self.pointer {
                    let pointer_event = pointer.process_cursor_moved(position);
                    self.handle_pointer(pointer_event);
                }
            }

            WindowEvent::MouseInput { state, button, .. } => {
                let pointer_event = self
                    .pointer
                    .as_mut()
                    .and_then(|pointer| pointer.process_mouse_button(button, state));
                if let Some(pointer_event) = pointer_event {
                    self.handle_pointer(pointer_event);
                }
            }

            WindowEvent::RedrawRequested => self.redraw(event_loop),

            _ => {}
        }
    }
}

fn main() -> ExitCode {
    let loaded = AppConfig::load();

    // Initialize logging; RUST_LOG still wins over the configured level
    let level = loaded
        .as_ref()
        .map(|config| config.debug.log_level.clone())
        .unwrap_or_else(|_| "info".to_string());
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
    log::info!("Starting Snowglobe");

    let config = loaded.unwrap_or_else(|e| {
        log::warn!("Failed to load config: {}. Using defaults.", e);
        AppConfig::default()
    });

    // Bundled terrain is required
    let assets = match SceneAssets::load(&config.scene) {
        Ok(assets) => assets,
        Err(e) => {
            log::error!("Failed to load scene assets: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            log::error!("Failed to create event loop: {}", e);
            return ExitCode::FAILURE;
        }
    };
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config, assets);
    if let Err(e) = event_loop.run_app(&mut app) {
        log::error!("Event loop error: {}", e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
