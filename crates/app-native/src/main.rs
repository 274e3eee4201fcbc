use std::sync::Arc;
use std::time::Instant;

use glam::Vec2;
use netfield_core::camera::pointer_from_pixels;
use netfield_core::constants::MAX_SCROLL_PROGRESS;
use netfield_core::{CameraRig, HostInput, NetRenderer, RenderBridge, Scene, Variant};
use winit::{
    dpi::PhysicalSize,
    event::*,
    event_loop::EventLoop,
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowBuilder},
};

/// Pixels of virtual scroll per wheel notch.
const WHEEL_LINE_PX: f32 = 40.0;

/// Desktop stand-in for a scrolling page: the wheel drives a virtual scroll
/// offset, the cursor drives the pointer, digits pick the backdrop.
struct App {
    window: Arc<Window>,
    renderer: NetRenderer<'static>,
    scene: Scene,
    variant: Variant,
    seed: u64,
    pointer: Vec2,
    scroll_y: f32,
    last_frame: Instant,
}

impl App {
    fn new(window: Arc<Window>, variant: Variant, seed: u64) -> anyhow::Result<Self> {
        let size = window.inner_size();
        let backdrop = variant.build(seed)?;
        let (points, segments) = (backdrop.point_count(), backdrop.max_segments());

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(Arc::clone(&window))?;
        let renderer = pollster::block_on(NetRenderer::new(
            &instance,
            surface,
            size.width,
            size.height,
            points,
            segments,
        ))?;

        Ok(Self {
            window,
            renderer,
            scene: Scene::new(backdrop, CameraRig::default()),
            variant,
            seed,
            pointer: Vec2::ZERO,
            scroll_y: 0.0,
            last_frame: Instant::now(),
        })
    }

    fn viewport_height(&self) -> f32 {
        self.window.inner_size().height as f32
    }

    fn resize(&mut self, size: PhysicalSize<u32>) {
        self.renderer.resize(size.width, size.height);
        self.scroll(0.0);
    }

    fn cursor_moved(&mut self, x: f64, y: f64) {
        let size = self.window.inner_size();
        self.pointer = pointer_from_pixels(
            x as f32,
            y as f32,
            size.width as f32,
            size.height as f32,
        );
    }

    fn scroll(&mut self, delta_px: f32) {
        let max = MAX_SCROLL_PROGRESS * self.viewport_height();
        self.scroll_y = (self.scroll_y + delta_px).clamp(0.0, max.max(0.0));
    }

    fn switch_variant(&mut self, variant: Variant) -> anyhow::Result<()> {
        if variant == self.variant {
            return Ok(());
        }
        self.scene.set_backdrop(variant.build(self.seed)?);
        self.variant = variant;
        self.window
            .set_title(&format!("netfield: {}", self.variant));
        Ok(())
    }

    fn frame(&mut self) -> Result<(), wgpu::SurfaceError> {
        let now = Instant::now();
        let dt = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;

        let input = HostInput {
            dt,
            scroll_y: self.scroll_y,
            viewport_height: self.viewport_height(),
            pointer: self.pointer,
        };
        let frame = self.scene.tick(&input);
        self.renderer.draw(&frame)
    }
}

fn variant_for_key(code: KeyCode) -> Option<Variant> {
    let index = match code {
        KeyCode::Digit1 => 0,
        KeyCode::Digit2 => 1,
        KeyCode::Digit3 => 2,
        KeyCode::Digit4 => 3,
        KeyCode::Digit5 => 4,
        KeyCode::Digit6 => 5,
        _ => return None,
    };
    Variant::ALL.get(index).copied()
}

/// `netfield-native [variant] [seed]`
fn parse_args() -> anyhow::Result<(Variant, u64)> {
    let mut args = std::env::args().skip(1);
    let variant = match args.next() {
        Some(name) => name.parse()?,
        None => Variant::default(),
    };
    let seed = match args.next() {
        Some(seed) => seed
            .parse()
            .map_err(|e| anyhow::anyhow!("invalid seed `{}`: {}", seed, e))?,
        None => rand::random(),
    };
    Ok((variant, seed))
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let (variant, seed) = parse_args()?;
    log::info!("[native] variant={} seed={}", variant, seed);

    let event_loop = EventLoop::new()?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title(format!("netfield: {}", variant))
            .with_inner_size(PhysicalSize::new(1280, 800))
            .build(&event_loop)?,
    );
    let mut app = App::new(window, variant, seed)?;

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent { event, .. } => match event {
            WindowEvent::CloseRequested => elwt.exit(),
            WindowEvent::Resized(size) => app.resize(size),
            WindowEvent::CursorMoved { position, .. } => app.cursor_moved(position.x, position.y),
            WindowEvent::CursorLeft { .. } => app.pointer = Vec2::ZERO,
            WindowEvent::MouseWheel { delta, .. } => {
                let px = match delta {
                    MouseScrollDelta::LineDelta(_, y) => -y * WHEEL_LINE_PX,
                    MouseScrollDelta::PixelDelta(pos) => -pos.y as f32,
                };
                app.scroll(px);
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state: ElementState::Pressed,
                        repeat: false,
                        ..
                    },
                ..
            } => {
                if code == KeyCode::Escape {
                    elwt.exit();
                } else if let Some(next) = variant_for_key(code) {
                    if let Err(e) = app.switch_variant(next) {
                        log::error!("[native] cannot switch to {}: {}", next, e);
                    }
                }
            }
            _ => {}
        },
        Event::AboutToWait => match app.frame() {
            Ok(()) => app.window.request_redraw(),
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("[native] surface lost, reconfiguring");
                app.renderer.reconfigure();
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("[native] out of GPU memory");
                elwt.exit();
            }
            Err(e) => log::warn!("[native] frame skipped: {:?}", e),
        },
        _ => {}
    })?;
    Ok(())
}
