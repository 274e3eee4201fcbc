use crate::dom;
use glam::Vec2;
use netfield_core::camera::pointer_from_pixels;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Track the pointer over the whole page, normalized against the viewport.
///
/// The canvas sits behind the content, so listening on the window keeps
/// parallax alive while the pointer is over text.
pub fn wire_pointer(pointer: Rc<RefCell<Vec2>>) {
    let Some(window) = web::window() else {
        return;
    };
    {
        let pointer = pointer.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
            *pointer.borrow_mut() = pointer_from_pixels(
                ev.client_x() as f32,
                ev.client_y() as f32,
                dom::viewport_width(),
                dom::viewport_height(),
            );
        }) as Box<dyn FnMut(web::PointerEvent)>);
        let _ = window
            .add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
        closure.forget();
    }
    // Recenter when the pointer leaves the page.
    if let Some(root) = dom::window_document().and_then(|d| d.document_element()) {
        let closure = Closure::wrap(Box::new(move || {
            *pointer.borrow_mut() = Vec2::ZERO;
        }) as Box<dyn FnMut()>);
        let _ = root
            .add_event_listener_with_callback("mouseleave", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
