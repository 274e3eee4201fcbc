use crate::dom;
use glam::Vec2;
use instant::Instant;
use netfield_core::{HostInput, NetRenderer, RenderBridge, Scene};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Everything the animation-frame callback owns between frames.
pub struct FrameContext {
    pub scene: Scene,
    pub renderer: NetRenderer<'static>,
    pub canvas: web::HtmlCanvasElement,
    pub pointer: Rc<RefCell<Vec2>>,
    pub last_instant: Instant,
}

impl FrameContext {
    pub fn new(
        scene: Scene,
        renderer: NetRenderer<'static>,
        canvas: web::HtmlCanvasElement,
        pointer: Rc<RefCell<Vec2>>,
    ) -> Self {
        Self {
            scene,
            renderer,
            canvas,
            pointer,
            last_instant: Instant::now(),
        }
    }

    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt = now.duration_since(self.last_instant).as_secs_f32();
        self.last_instant = now;

        self.renderer
            .resize_if_needed(self.canvas.width(), self.canvas.height());

        let input = HostInput {
            dt,
            scroll_y: dom::scroll_y(),
            viewport_height: dom::viewport_height(),
            pointer: *self.pointer.borrow(),
        };
        let snapshot = self.scene.tick(&input);
        match self.renderer.draw(&snapshot) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("[web] surface lost, reconfiguring");
                self.renderer.reconfigure();
            }
            Err(e) => log::error!("[web] render error: {:?}", e),
        }
    }
}

pub async fn init_gpu(
    canvas: &web::HtmlCanvasElement,
    points: usize,
    segments: usize,
) -> anyhow::Result<NetRenderer<'static>> {
    let instance = wgpu::Instance::default();
    let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
    NetRenderer::new(
        &instance,
        surface,
        canvas.width(),
        canvas.height(),
        points,
        segments,
    )
    .await
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
