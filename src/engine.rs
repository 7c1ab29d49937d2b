use std::sync::Arc;
use std::time::Instant;

use log::{error, info, warn};
use winit::application::ApplicationHandler;
use winit::event::{ElementState, KeyEvent, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::PhysicalKey;
use winit::window::WindowId;

use crate::config::GameConfig;
use crate::error::EngineError;
use crate::input::{InputState, WindowMessage};
use crate::renderer::Renderer;
use crate::renderer::draw::DrawList;
use crate::scene::Scene;
use crate::window::{apply_window_settings, window_attributes};

/// Longest frame step fed to the scene, in seconds. Keeps the player from
/// jumping after a stall such as a window drag.
pub const MAX_FRAME_DT: f32 = 0.25;

// ── Color ──────────────────────────────────────────────────────────────────

/// Linear RGBA colour.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Color(pub [f32; 4]);

impl Color {
    pub const WHITE: Self = Self([1.0, 1.0, 1.0, 1.0]);
    pub const BLACK: Self = Self([0.0, 0.0, 0.0, 1.0]);
}

// ── run ─────────────────────────────────────────────────────────────────────

/// Open the window and drive the scene until it requests to quit or the
/// window is closed.
///
/// Returns the first fatal error hit while starting up or rendering.
pub fn run(config: GameConfig) -> Result<(), EngineError> {
    let event_loop = EventLoop::new()?;
    let mut app = App {
        config,
        running: None,
        input: InputState::new(),
        draw_list: DrawList::new(),
        last_instant: None,
        error: None,
    };
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

// ── App (winit ApplicationHandler) ──────────────────────────────────────────

/// Everything that exists only while the window does.
struct Running {
    renderer: Renderer,
    scene: Scene,
}

struct App {
    config: GameConfig,
    running: Option<Running>,
    input: InputState,
    /// Reused across frames to keep its allocations.
    draw_list: DrawList,
    last_instant: Option<Instant>,
    error: Option<EngineError>,
}

impl App {
    fn start(&mut self, event_loop: &ActiveEventLoop) -> Result<Running, EngineError> {
        let window = Arc::new(event_loop.create_window(window_attributes(&self.config.window))?);
        apply_window_settings(&window, &self.config.window);
        info!("created window {:?} ({:?})", self.config.window.title, self.config.window.mode);

        let mut renderer = pollster::block_on(Renderer::new(window))?;
        let mut scene = Scene::init(&self.config, &mut renderer)?;

        let (width, height) = renderer.size();
        scene.handle_message(WindowMessage::Resize { width, height });
        Ok(Running { renderer, scene })
    }

    /// Stop the loop; `run` hands `err` back to the caller to report.
    fn fail(&mut self, event_loop: &ActiveEventLoop, err: EngineError) {
        self.error = Some(err);
        event_loop.exit();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.running.is_some() {
            return;
        }
        match self.start(event_loop) {
            Ok(running) => self.running = Some(running),
            Err(err) => self.fail(event_loop, err),
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(running) = self.running.as_ref() {
            running.renderer.window.request_redraw();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let Some(running) = self.running.as_mut() else { return };

        let message = match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
                return;
            }

            WindowEvent::Resized(size) => {
                running.renderer.resize(size);
                Some(WindowMessage::Resize { width: size.width, height: size.height })
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.input.mouse_pos = [position.x as f32, position.y as f32];
                None
            }

            WindowEvent::MouseInput { button: MouseButton::Left, state: ElementState::Pressed, .. } => {
                let [x, y] = self.input.mouse_pos;
                Some(WindowMessage::Click { x, y })
            }

            WindowEvent::KeyboardInput {
                event: KeyEvent { physical_key: PhysicalKey::Code(code), state, repeat, .. },
                ..
            } => match state {
                // Held keys auto-repeat; only the first press counts.
                ElementState::Pressed => (self.input.press(code) && !repeat).then_some(WindowMessage::KeyDown(code)),
                ElementState::Released => {
                    self.input.release(code);
                    Some(WindowMessage::KeyUp(code))
                }
            },

            WindowEvent::RedrawRequested => {
                let now = Instant::now();
                let dt = match self.last_instant {
                    Some(prev) => now.duration_since(prev).as_secs_f32().min(MAX_FRAME_DT),
                    None => 0.0,
                };
                self.last_instant = Some(now);

                running.scene.update(dt);
                running.scene.draw(&mut self.draw_list);

                match running.renderer.render(&self.draw_list) {
                    Ok(()) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        running.renderer.reconfigure();
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        error!("GPU out of memory, exiting");
                        event_loop.exit();
                    }
                    Err(e) => warn!("render error: {e}"),
                }
                None
            }

            _ => None,
        };

        if let Some(message) = message {
            running.scene.handle_message(message);
            if running.scene.quit_requested() {
                info!("quit requested, closing");
                event_loop.exit();
            }
        }
    }
}
