use std::cell::{Cell, RefCell};
use std::rc::Rc;

use glam::{Mat3, Mat4};
use js_sys::Float32Array;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{
    window, Event, HtmlCanvasElement, HtmlFormElement, HtmlInputElement, HtmlSelectElement,
    WebGl2RenderingContext as GL, WebGlBuffer, WebGlProgram, WebGlUniformLocation, WebGlVertexArrayObject,
};

use super::resize::CanvasResize;
use super::shader;

pub fn context(canvas: &HtmlCanvasElement) -> Result<GL, JsValue> {
    let gl = canvas
        .get_context("webgl2")?
        .ok_or("WebGL2 not supported")?
        .dyn_into::<GL>()?;
    Ok(gl)
}

/// Sets the viewport to the whole canvas and clears it to black. Returns the
/// canvas aspect ratio.
pub fn begin_frame(gl: &GL, canvas: &HtmlCanvasElement) -> f32 {
    let width = canvas.width();
    let height = canvas.height().max(1);

    gl.viewport(0, 0, width as i32, height as i32);
    gl.clear_color(0.0, 0.0, 0.0, 1.0);
    gl.clear(GL::COLOR_BUFFER_BIT | GL::DEPTH_BUFFER_BIT);
    width as f32 / height as f32
}

#[derive(Debug, Clone, Copy)]
pub struct Lighting {
    pub color: [f32; 3],
    pub ambient: [f32; 3],
    pub directional: [f32; 3],
    pub direction: [f32; 3],
}

struct LitUniforms {
    mvp: WebGlUniformLocation,
    normal_matrix: WebGlUniformLocation,
    color: WebGlUniformLocation,
    ambient_light: WebGlUniformLocation,
    directional_light: WebGlUniformLocation,
    light_direction: WebGlUniformLocation,
}

/// A triangle list with flat normals, drawn with the lit program.
pub struct LitMesh {
    gl: GL,
    program: WebGlProgram,
    vao: WebGlVertexArrayObject,
    position_buffer: WebGlBuffer,
    normal_buffer: WebGlBuffer,
    uniforms: LitUniforms,
    vertex_count: i32,
}

impl LitMesh {
    pub fn new(gl: &GL) -> Result<Self, JsValue> {
        let program = shader::create_program(gl, shader::LIT_VERTEX, shader::LIT_FRAGMENT)?;
        gl.use_program(Some(&program));
        gl.enable(GL::CULL_FACE);
        gl.enable(GL::DEPTH_TEST);

        let uniforms = LitUniforms {
            mvp: shader::uniform(gl, &program, "u_mvp")?,
            normal_matrix: shader::uniform(gl, &program, "u_normal_matrix")?,
            color: shader::uniform(gl, &program, "u_color")?,
            ambient_light: shader::uniform(gl, &program, "u_ambient_light")?,
            directional_light: shader::uniform(gl, &program, "u_directional_light")?,
            light_direction: shader::uniform(gl, &program, "u_light_direction")?,
        };

        let vao = gl.create_vertex_array().ok_or("unable to create vertex array")?;
        gl.bind_vertex_array(Some(&vao));
        let position_buffer = attribute_buffer(gl, &program, "a_position", 3)?;
        let normal_buffer = attribute_buffer(gl, &program, "a_normal", 3)?;

        Ok(Self {
            gl: gl.clone(),
            program,
            vao,
            position_buffer,
            normal_buffer,
            uniforms,
            vertex_count: 0,
        })
    }

    /// Replaces both buffers; `normals` must match `positions` in length.
    pub fn upload(&mut self, positions: &[f32], normals: &[f32]) {
        let gl = &self.gl;
        gl.bind_vertex_array(Some(&self.vao));
        for (buffer, data) in [(&self.position_buffer, positions), (&self.normal_buffer, normals)] {
            gl.bind_buffer(GL::ARRAY_BUFFER, Some(buffer));
            gl.buffer_data_with_array_buffer_view(GL::ARRAY_BUFFER, &Float32Array::from(data), GL::STATIC_DRAW);
        }
        self.vertex_count = (positions.len() / 3) as i32;
    }

    pub fn draw(&self, mvp: &Mat4, normal_matrix: &Mat3, lighting: &Lighting) {
        let gl = &self.gl;
        gl.use_program(Some(&self.program));
        gl.bind_vertex_array(Some(&self.vao));
        gl.uniform3fv_with_f32_array(Some(&self.uniforms.color), &lighting.color);
        gl.uniform3fv_with_f32_array(Some(&self.uniforms.ambient_light), &lighting.ambient);
        gl.uniform3fv_with_f32_array(Some(&self.uniforms.directional_light), &lighting.directional);
        gl.uniform3fv_with_f32_array(Some(&self.uniforms.light_direction), &lighting.direction);
        gl.uniform_matrix4fv_with_f32_array(Some(&self.uniforms.mvp), false, &mvp.to_cols_array());
        gl.uniform_matrix3fv_with_f32_array(Some(&self.uniforms.normal_matrix), false, &normal_matrix.to_cols_array());
        gl.draw_arrays(GL::TRIANGLES, 0, self.vertex_count);
    }
}

/// Creates a buffer bound to attribute `name`, `size` floats per vertex.
/// Expects the target vertex array to be bound.
pub fn attribute_buffer(gl: &GL, program: &WebGlProgram, name: &str, size: i32) -> Result<WebGlBuffer, JsValue> {
    let location = shader::attribute(gl, program, name)?;
    let buffer = gl.create_buffer().ok_or("unable to create buffer")?;
    gl.bind_buffer(GL::ARRAY_BUFFER, Some(&buffer));
    gl.enable_vertex_attrib_array(location);
    gl.vertex_attrib_pointer_with_i32(location, size, GL::FLOAT, false, 0, 0);
    Ok(buffer)
}

/// Name and value of the form control that fired `event`. Checkboxes report
/// `true` or `false`.
fn control_value(event: &Event) -> Option<(String, String)> {
    let target = event.target()?;
    if let Some(input) = target.dyn_ref::<HtmlInputElement>() {
        let value = if input.type_() == "checkbox" {
            input.checked().to_string()
        } else {
            input.value()
        };
        Some((input.name(), value))
    } else {
        target
            .dyn_ref::<HtmlSelectElement>()
            .map(|select| (select.name(), select.value()))
    }
}

/// Forwards every `input` event on `form` to `on_change` as (name, value)
/// for the life of the page.
pub fn on_input(form: &HtmlFormElement, mut on_change: impl FnMut(String, String) + 'static) -> Result<(), JsValue> {
    let closure = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        if let Some((name, value)) = control_value(&event) {
            on_change(name, value);
        }
    });
    form.add_event_listener_with_callback("input", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Keeps the canvas fitted to its CSS box for the life of the page, raising
/// `dirty` whenever it is resized.
pub fn keep_fitted(canvas: &HtmlCanvasElement, dirty: Rc<Cell<bool>>) -> Result<(), JsValue> {
    let resize = CanvasResize::attach(canvas, move || dirty.set(true))?;
    std::mem::forget(resize);
    Ok(())
}

/// Calls `frame` on every animation frame for the life of the page.
pub fn animate(mut frame: impl FnMut() + 'static) -> Result<(), JsValue> {
    // The closure reschedules itself through `slot`, which is filled once the
    // closure exists.
    let slot: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let next = slot.clone();
    *slot.borrow_mut() = Some(Closure::<dyn FnMut()>::new(move || {
        frame();

        if let (Some(window), Some(closure)) = (window(), next.borrow().as_ref()) {
            window
                .request_animation_frame(closure.as_ref().unchecked_ref())
                .ok();
        }
    }));

    let first = slot.borrow();
    window()
        .ok_or("no window")?
        .request_animation_frame(first.as_ref().ok_or("animation closure missing")?.as_ref().unchecked_ref())?;
    Ok(())
}
