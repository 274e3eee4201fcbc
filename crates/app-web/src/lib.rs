#![cfg(target_arch = "wasm32")]
use glam::Vec2;
use netfield_core::{CameraRig, Scene};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod dom;
mod events;
mod frame;
mod input;

const CANVAS_ID: &str = "netfield-canvas";

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("netfield-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", CANVAS_ID))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    let variant = input::variant_from_attribute(canvas.get_attribute("data-variant").as_deref());
    let seed = input::seed_from_attribute(
        canvas.get_attribute("data-seed").as_deref(),
        input::seed_from_unit(js_sys::Math::random()),
    );
    log::info!("[web] variant={} seed={}", variant, seed);

    dom::sync_canvas_backing_size(&canvas);
    dom::add_resize_listener(&canvas);

    let backdrop = variant.build(seed)?;
    let renderer =
        frame::init_gpu(&canvas, backdrop.point_count(), backdrop.max_segments()).await?;

    let pointer = Rc::new(RefCell::new(Vec2::ZERO));
    events::wire_pointer(pointer.clone());

    let scene = Scene::new(backdrop, CameraRig::default());
    let ctx = frame::FrameContext::new(scene, renderer, canvas, pointer);
    frame::start_loop(Rc::new(RefCell::new(ctx)));
    Ok(())
}
