#![cfg_attr(target_arch = "wasm32", allow(dead_code))]

//! Camera controllers, noise height fields and surface meshing for the WebGL
//! applets. Everything outside `wasm` is plain Rust and is tested on the host.

pub mod applets;
pub mod controllers;
pub mod cube;
pub mod maths;
pub mod settings;
pub mod spiral;
pub mod surface;

// Only compile wasm-specific code when targeting wasm32.

#[cfg(target_arch = "wasm32")]
mod wasm {
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, HtmlFormElement};

    use crate::applets::AppletId;

    mod controllers;
    mod cube;
    mod render;
    mod resize;
    mod shader;
    mod spiral;
    mod terrain;

    pub use controllers::{SphericalController, TrackballController};
    pub use resize::CanvasResize;

    type Factory = fn(HtmlCanvasElement, HtmlFormElement, Option<String>) -> Result<(), JsValue>;

    const APPLETS: [(AppletId, Factory); 3] = [
        (AppletId::Spiral, spiral::start as Factory),
        (AppletId::Cube, cube::start as Factory),
        (AppletId::Terrain, terrain::start as Factory),
    ];

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).ok();

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        let canvas = document
            .get_element_by_id("c")
            .ok_or("canvas not found")?
            .dyn_into::<HtmlCanvasElement>()?;
        let form = document
            .get_element_by_id("settings")
            .ok_or("settings form not found")?
            .dyn_into::<HtmlFormElement>()?;

        let id = match canvas.get_attribute("data-applet") {
            Some(key) => key
                .parse::<AppletId>()
                .map_err(|e| JsValue::from_str(&e.to_string()))?,
            None => AppletId::default(),
        };
        let (_, start) = APPLETS
            .iter()
            .find(|(applet, _)| *applet == id)
            .ok_or("applet not registered")?;

        log::info!("starting {}", id.name());
        start(canvas.clone(), form, canvas.get_attribute("data-settings"))
    }
}

#[cfg(target_arch = "wasm32")]
pub use wasm::{CanvasResize, SphericalController, TrackballController};
