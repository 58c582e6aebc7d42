use std::cell::{Cell, RefCell};
use std::f32::consts::PI;
use std::rc::Rc;

use glam::{Mat4, Vec3};
use log::{debug, info, warn};
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{Event, HtmlButtonElement, HtmlCanvasElement, HtmlElement, HtmlFormElement, WebGl2RenderingContext as GL};

use super::controllers::{SphericalController, TrackballController};
use super::render::{self, Lighting, LitMesh};
use crate::controllers::TrackballOptions;
use crate::maths::matrix::{normal_matrix, Transform3D};
use crate::settings::{CameraKind, Rebuild, SettingsChange, TerrainSettings};

const EYE: Vec3 = Vec3::new(0.0, 0.0, 10.0);
const FIELD_OF_VIEW: f32 = PI / 5.0;
const LIGHTING: Lighting = Lighting {
    color: [1.0, 1.0, 1.0],
    ambient: [0.2, 0.2, 0.2],
    directional: [0.6, 0.6, 0.6],
    direction: [0.5, 0.4, 1.0],
};

enum Camera {
    Trackball(TrackballController),
    Spherical(SphericalController),
}

impl Camera {
    fn attach(kind: CameraKind, canvas: &HtmlElement, dirty: Rc<Cell<bool>>) -> Result<Self, JsValue> {
        let camera = match kind {
            CameraKind::Trackball => Camera::Trackball(TrackballController::attach(
                canvas,
                &TrackballOptions::looking_from(EYE),
                move |_| dirty.set(true),
            )?),
            CameraKind::Spherical => {
                Camera::Spherical(SphericalController::attach(canvas, EYE, move |_| dirty.set(true))?)
            }
        };
        debug!("camera controller: {:?}", kind);
        Ok(camera)
    }

    fn view_matrix(&self) -> Mat4 {
        match self {
            Camera::Trackball(c) => c.view_matrix(),
            Camera::Spherical(c) => c.view_matrix(),
        }
    }
}

/// Noise terrain lit by one directional light, viewed through a
/// pointer-driven camera.
struct TerrainApplet {
    gl: GL,
    canvas: HtmlCanvasElement,
    mesh: LitMesh,
    settings: TerrainSettings,
    camera: Camera,
    dirty: Rc<Cell<bool>>,
}

impl TerrainApplet {
    fn new(gl: GL, canvas: HtmlCanvasElement, settings: TerrainSettings, dirty: Rc<Cell<bool>>) -> Result<Self, JsValue> {
        let mesh = LitMesh::new(&gl)?;
        let camera = Camera::attach(settings.camera, &canvas, dirty.clone())?;

        let mut applet = Self {
            gl,
            canvas,
            mesh,
            settings,
            camera,
            dirty,
        };
        applet.rebuild_mesh();
        Ok(applet)
    }

    fn rebuild_mesh(&mut self) {
        let mesh = self.settings.build_mesh();
        self.mesh.upload(&mesh.positions, &mesh.normals);
        self.dirty.set(true);
    }

    fn apply(&mut self, change: SettingsChange) -> Result<(), JsValue> {
        match self.settings.apply(change) {
            Rebuild::Mesh => self.rebuild_mesh(),
            Rebuild::Camera => {
                self.camera = Camera::attach(self.settings.camera, &self.canvas, self.dirty.clone())?;
                self.dirty.set(true);
            }
        }
        Ok(())
    }

    fn frame(&self) {
        let aspect = render::begin_frame(&self.gl, &self.canvas);
        let model = Mat4::IDENTITY;
        let mvp = Transform3D::new()
            .perspective(FIELD_OF_VIEW, aspect, 1.0, f32::INFINITY)
            .then(self.camera.view_matrix())
            .then(model)
            .matrix();
        self.mesh.draw(&mvp, &normal_matrix(&model), &LIGHTING);
    }
}

fn clock_seed() -> u32 {
    js_sys::Date::now() as u64 as u32
}

/// Start the terrain applet: build the mesh, wire the settings form and the
/// camera, and redraw on animation frames whenever something changed.
pub fn start(canvas: HtmlCanvasElement, form: HtmlFormElement, settings: Option<String>) -> Result<(), JsValue> {
    let settings =
        TerrainSettings::load(settings.as_deref(), clock_seed).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let gl = render::context(&canvas)?;

    let dirty = Rc::new(Cell::new(true));
    render::keep_fitted(&canvas, dirty.clone())?;
    let applet = Rc::new(RefCell::new(TerrainApplet::new(gl, canvas, settings, dirty)?));
    info!("terrain applet started with {:?}", settings);

    render::on_input(&form, {
        let applet = applet.clone();
        move |name, value| {
            let result = SettingsChange::parse(&name, &value)
                .map_err(|e| JsValue::from_str(&e.to_string()))
                .and_then(|change| applet.borrow_mut().apply(change));
            if let Err(e) = result {
                warn!("ignored setting {}={}: {:?}", name, value, e);
            }
        }
    })?;

    let on_click = {
        let applet = applet.clone();
        Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            let is_reseed = event
                .target()
                .and_then(|t| t.dyn_into::<HtmlButtonElement>().ok())
                .is_some_and(|button| button.name() == "reseed");
            if !is_reseed {
                return;
            }
            event.prevent_default();
            if let Err(e) = applet.borrow_mut().apply(SettingsChange::Seed(clock_seed())) {
                warn!("reseed failed: {:?}", e);
            }
        })
    };
    form.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
    on_click.forget();

    render::animate(move || {
        let applet = applet.borrow();
        if applet.dirty.replace(false) {
            applet.frame();
        }
    })
}
