// ============================================================================
// CRATE CONFIGURATION & IMPORTS
// ============================================================================

pub mod app;
pub mod config;
pub mod controller;
pub mod error;
pub mod font;
pub mod geometry;
pub mod raster;
pub mod render;
pub mod spin;

pub use app::AppState;
pub use config::{Color, RouletteConfig};
pub use controller::{Controller, Frame, SpinOutcome};
pub use error::RouletteError;
pub use geometry::{color_for_index, resolve_winner_index, slice_arc};
pub use spin::{ease_out_cubic, Sample, SpinAnimator, SpinPlan, SpinSession};

// External crate imports
use pixels::{Pixels, SurfaceTexture};

// Standard library imports
use std::sync::mpsc::Receiver;
use std::time::Instant;

// Window management imports
use winit::dpi::LogicalSize;
use winit::event::{ElementState, Event, MouseButton, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::keyboard::{Key, NamedKey};
use winit::window::WindowBuilder;

use raster::Canvas;

// ============================================================================
// PUBLIC API - MAIN INTERFACE
// ============================================================================

/// Commands another thread can feed into a running wheel
#[derive(Debug, Clone, PartialEq)]
pub enum RouletteCommand {
    AddName(String),
    Spin,
}

/// Main wheel struct - the primary public interface
#[derive(Debug, Clone)]
pub struct Roulette {
    config: RouletteConfig,
    names: Vec<String>,
    seed: Option<u64>,
}

impl Roulette {
    pub fn new(config: RouletteConfig) -> Self {
        Self {
            config,
            names: Vec::new(),
            seed: None,
        }
    }

    /// Fixes the random source so every spin sequence repeats.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Queues a name to be on the wheel when the window opens.
    pub fn add_name(&mut self, name: impl Into<String>) {
        self.names.push(name.into());
    }

    pub fn config(&self) -> &RouletteConfig {
        &self.config
    }

    /// Opens the window and blocks until it closes. Returns the last winner.
    pub fn show(&self) -> Result<Option<String>, RouletteError> {
        self.run_window(None)
    }

    pub fn show_with_commands(
        &self,
        receiver: Receiver<RouletteCommand>,
    ) -> Result<Option<String>, RouletteError> {
        self.run_window(Some(receiver))
    }

    fn controller(&self) -> Controller {
        let mut controller = match self.seed {
            Some(seed) => Controller::seeded(seed),
            None => Controller::new(),
        };
        for name in &self.names {
            controller.add_name(name);
        }
        controller
    }

    fn run_window(
        &self,
        receiver: Option<Receiver<RouletteCommand>>,
    ) -> Result<Option<String>, RouletteError> {
        let width = self.config.window_width();
        let height = self.config.window_height();
        let font = font::load_font(self.config.font_path.as_deref())?;

        let event_loop = EventLoop::new()?;
        let window = WindowBuilder::new()
            .with_title(&self.config.title)
            .with_inner_size(LogicalSize::new(width as f64, height as f64))
            .with_resizable(false)
            .build(&event_loop)?;

        let window = std::sync::Arc::new(window);
        let window_clone = window.clone();

        // The buffer keeps logical size; pixels scales it onto the surface.
        let size = window.inner_size();
        let surface_texture = SurfaceTexture::new(size.width, size.height, &window);
        let mut pixels = Pixels::new(width as u32, height as u32, surface_texture)?;

        let mut app = AppState::new(self.controller());
        let mut cursor: Option<(usize, usize)> = None;

        let frame_duration = self.config.frame_interval();
        let mut last_frame = Instant::now();

        log::info!(
            "Opened {}x{} wheel with {} names",
            width,
            height,
            app.controller().names().len()
        );

        event_loop.run(|event, window_target| {
            window_target.set_control_flow(ControlFlow::Poll);
            match event {
                Event::WindowEvent { event, .. } => match event {
                    WindowEvent::CloseRequested => {
                        window_target.exit();
                    }
                    WindowEvent::Resized(new_size) => {
                        if let Err(e) = pixels.resize_surface(new_size.width, new_size.height) {
                            log::error!("Failed to resize surface: {}", e);
                            window_target.exit();
                        }
                    }
                    WindowEvent::KeyboardInput { event, .. } => {
                        if event.state != ElementState::Pressed {
                            return;
                        }
                        match &event.logical_key {
                            Key::Named(NamedKey::Enter) => app.submit(Instant::now()),
                            Key::Named(NamedKey::Backspace) => app.backspace(),
                            Key::Named(NamedKey::Escape) => window_target.exit(),
                            _ => {
                                if let Some(text) = event.text.as_deref() {
                                    app.type_text(text);
                                }
                            }
                        }
                    }
                    WindowEvent::CursorMoved { position, .. } => {
                        cursor = pixels
                            .window_pos_to_pixel((position.x as f32, position.y as f32))
                            .ok();
                    }
                    WindowEvent::MouseInput {
                        state: ElementState::Pressed,
                        button: MouseButton::Left,
                        ..
                    } => {
                        if let Some((x, y)) = cursor {
                            app.click(x as f64, y as f64, &self.config, Instant::now());
                        }
                    }
                    WindowEvent::RedrawRequested => {
                        let now = Instant::now();
                        if let Some(ref receiver) = receiver {
                            app.drain_commands(receiver, now);
                        }
                        app.tick(now);

                        let frame = pixels.frame_mut();
                        let mut canvas = Canvas::new(frame, width, height);
                        app.render(&mut canvas, &self.config, font.as_ref());
                        if let Err(e) = pixels.render() {
                            log::error!("Render failed: {}", e);
                            window_target.exit();
                        }
                    }
                    _ => {}
                },
                Event::AboutToWait => {
                    if last_frame.elapsed() >= frame_duration {
                        window_clone.request_redraw();
                        last_frame = Instant::now();
                    }
                }
                _ => {}
            }
        })?;

        Ok(app.controller().winner().map(str::to_string))
    }
}
