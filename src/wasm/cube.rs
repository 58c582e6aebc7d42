use std::cell::{Cell, RefCell};
use std::rc::Rc;

use log::{info, warn};
use wasm_bindgen::JsValue;
use web_sys::{HtmlCanvasElement, HtmlFormElement, WebGl2RenderingContext as GL};

use super::controllers::SphericalController;
use super::render::{self, Lighting, LitMesh};
use crate::cube::{self, CubeChange, CubeScene, CubeSettings};

const LIGHTING: Lighting = Lighting {
    color: [1.0, 1.0, 1.0],
    ambient: [0.0, 0.1, 0.0],
    directional: [0.5, 0.3, 0.6],
    direction: [0.5, 0.4, 1.0],
};

struct CubeApplet {
    gl: GL,
    canvas: HtmlCanvasElement,
    mesh: LitMesh,
    scene: CubeScene,
    camera: SphericalController,
}

impl CubeApplet {
    fn frame(&self) {
        let aspect = render::begin_frame(&self.gl, &self.canvas);
        let mvp = self.scene.mvp(aspect, self.camera.view_matrix());
        self.mesh.draw(&mvp, &self.scene.normal_matrix(), &LIGHTING);
    }
}

pub fn start(canvas: HtmlCanvasElement, form: HtmlFormElement, settings: Option<String>) -> Result<(), JsValue> {
    let settings = match settings {
        Some(json) => CubeSettings::from_json(&json).map_err(|e| JsValue::from_str(&e.to_string()))?,
        None => CubeSettings::default(),
    };
    let gl = render::context(&canvas)?;

    let dirty = Rc::new(Cell::new(true));
    render::keep_fitted(&canvas, dirty.clone())?;

    let scene = CubeScene::new(settings);
    let mut mesh = LitMesh::new(&gl)?;
    mesh.upload(scene.positions(), scene.normals());
    let camera = SphericalController::attach(&canvas, cube::EYE, {
        let dirty = dirty.clone();
        move |_| dirty.set(true)
    })?;
    info!("cube applet started with {:?}, {} vertices", settings, scene.vertex_count());

    let applet = Rc::new(RefCell::new(CubeApplet {
        gl,
        canvas,
        mesh,
        scene,
        camera,
    }));

    render::on_input(&form, {
        let applet = applet.clone();
        let dirty = dirty.clone();
        move |name, value| match CubeChange::parse(&name, &value) {
            Ok(change) => {
                applet.borrow_mut().scene.apply(change);
                dirty.set(true);
            }
            Err(e) => warn!("ignored setting {}={}: {}", name, value, e),
        }
    })?;

    render::animate(move || {
        let mut applet = applet.borrow_mut();
        let moved = applet.scene.advance();
        if dirty.replace(false) | moved {
            applet.frame();
        }
    })
}
