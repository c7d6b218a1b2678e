//! Buoyancy Lab
//!
//! Interactive demonstration of Archimedes' principle: pick a liquid and an
//! object density and watch the object float, hang or sink.

mod config;
mod gui;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context as _;
use buoyancy_simulation::{InteractionController, SimulationParams};
use catppuccin::PALETTE;
use clap::Parser;
use config::{AppConfig, ViewConfig};
use gui::Gui;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::*,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

/// Archimedes' principle, interactively
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Path to a JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override window width (logical points)
    #[arg(long)]
    width: Option<u32>,

    /// Override window height (logical points)
    #[arg(long)]
    height: Option<u32>,
}

/// sRGB byte to the linear value wgpu expects for a clear color
fn srgb_to_linear(c: u8) -> f64 {
    let x = c as f64 / 255.0;
    if x <= 0.04045 {
        x / 12.92
    } else {
        ((x + 0.055) / 1.055).powf(2.4)
    }
}

fn clear_color() -> wgpu::Color {
    let base = PALETTE.mocha.colors.base.rgb;
    wgpu::Color {
        r: srgb_to_linear(base.r),
        g: srgb_to_linear(base.g),
        b: srgb_to_linear(base.b),
        a: 1.0,
    }
}

struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,

    gui: Gui,
    controller: InteractionController,
    view_config: ViewConfig,
}

impl GpuState {
    async fn new(
        window: Arc<Window>,
        controller: InteractionController,
        view_config: ViewConfig,
    ) -> anyhow::Result<Self> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());

        let surface = instance
            .create_surface(window.clone())
            .context("failed to create surface")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("no compatible GPU adapter")?;

        log::info!("✓ Using GPU: {}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("Device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: wgpu::MemoryHints::default(),
                experimental_features: wgpu::ExperimentalFeatures::default(),
                trace: wgpu::Trace::Off,
            })
            .await
            .context("failed to create device")?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .or_else(|| surface_caps.formats.first().copied())
            .context("surface reports no supported formats")?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: if view_config.vsync {
                wgpu::PresentMode::AutoVsync
            } else {
                wgpu::PresentMode::AutoNoVsync
            },
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let gui = Gui::new(&device, config.format, &window);
        log::info!("✓ GUI initialized");

        Ok(Self {
            surface,
            device,
            queue,
            config,
            gui,
            controller,
            view_config,
        })
    }

    fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    /// Returns true when the GUI wants another frame immediately
    fn render(&mut self, window: &Window) -> Result<bool, wgpu::SurfaceError> {
        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            });

        // Background
        {
            let _clear_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Clear Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(clear_color()),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
        }

        let repaint = self.gui.render(
            &self.device,
            &self.queue,
            &mut encoder,
            window,
            &view,
            &mut self.controller,
            &self.view_config,
        );

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(repaint)
    }
}

struct App {
    app_config: AppConfig,
    // Moved into GpuState once the window exists
    controller: Option<InteractionController>,
    window: Option<Arc<Window>>,
    gpu_state: Option<GpuState>,
    last_title: String,
    error: Option<anyhow::Error>,
}

impl App {
    fn new(app_config: AppConfig, controller: InteractionController) -> Self {
        Self {
            app_config,
            controller: Some(controller),
            window: None,
            gpu_state: None,
            last_title: String::new(),
            error: None,
        }
    }

    fn init_window(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<()> {
        let window_config = &self.app_config.window;
        let window_attributes = Window::default_attributes()
            .with_title(window_config.title.as_str())
            .with_inner_size(LogicalSize::new(window_config.width, window_config.height));

        let window = Arc::new(
            event_loop
                .create_window(window_attributes)
                .context("failed to create window")?,
        );

        let controller = self
            .controller
            .take()
            .context("simulation controller already consumed")?;
        let gpu_state = pollster::block_on(GpuState::new(
            window.clone(),
            controller,
            self.app_config.view.clone(),
        ))?;

        window.request_redraw();
        self.window = Some(window);
        self.gpu_state = Some(gpu_state);
        log::info!("Window created, rendering started");
        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: anyhow::Error) {
        log::error!("{:#}", error);
        self.error = Some(error);
        event_loop.exit();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(error) = self.init_window(event_loop) {
                self.fail(event_loop, error);
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        // Handle GUI events
        let mut egui_consumed = false;
        if let (Some(gpu_state), Some(window)) = (&mut self.gpu_state, &self.window) {
            egui_consumed = gpu_state.gui.handle_event(window, &event);
        }

        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested, exiting");
                event_loop.exit();
            }

            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => event_loop.exit(),

            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::KeyR),
                        state: ElementState::Pressed,
                        repeat: false,
                        ..
                    },
                ..
            } if !egui_consumed => {
                if let Some(gpu_state) = &mut self.gpu_state {
                    if !gpu_state.gui.wants_keyboard_input() {
                        gpu_state.controller.reset();
                    }
                }
            }

            WindowEvent::Resized(physical_size) => {
                if let Some(gpu_state) = &mut self.gpu_state {
                    gpu_state.resize(physical_size);
                }
            }

            WindowEvent::RedrawRequested => {
                if let (Some(window), Some(gpu_state)) = (&self.window, &mut self.gpu_state) {
                    match gpu_state.render(window) {
                        Ok(repaint) => {
                            if repaint {
                                window.request_redraw();
                            }
                            let title =
                                gui::window_title(&self.app_config.window.title, &gpu_state.controller);
                            if title != self.last_title {
                                window.set_title(&title);
                                self.last_title = title;
                            }
                        }
                        Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                            gpu_state.resize(window.inner_size())
                        }
                        Err(wgpu::SurfaceError::OutOfMemory) => {
                            log::error!("Out of memory!");
                            event_loop.exit();
                        }
                        Err(e) => log::warn!("Render error: {:?}", e),
                    }
                }
                // Input events schedule the next frame
                return;
            }

            _ => {}
        }

        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn load_config(args: &Args) -> anyhow::Result<AppConfig> {
    let mut config = match &args.config {
        Some(path) => match AppConfig::from_file(path) {
            Ok(cfg) => {
                log::info!("Loaded config from {}", path.display());
                cfg
            }
            Err(e) => {
                log::warn!("Failed to load config: {}, using defaults", e);
                AppConfig::default()
            }
        },
        None => AppConfig::default(),
    };

    if let Some(width) = args.width {
        config.window.width = width;
    }
    if let Some(height) = args.height {
        config.window.height = height;
    }
    config
        .validate()
        .context("invalid command line overrides")?;
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    // Initialize logger (RUST_LOG=debug for per-slider output)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = load_config(&args)?;

    log::info!("Starting buoyancy lab...");
    let controller = InteractionController::new(SimulationParams::default())
        .context("failed to initialise simulation")?;

    let event_loop = EventLoop::new().context("failed to create event loop")?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = App::new(config, controller);
    event_loop.run_app(&mut app).context("event loop failed")?;

    match app.error.take() {
        Some(error) => Err(error),
        None => Ok(()),
    }
}
