use std::cell::Cell;
use std::rc::Rc;

use js_sys::Float32Array;
use log::info;
use wasm_bindgen::JsValue;
use web_sys::{HtmlCanvasElement, HtmlFormElement, WebGl2RenderingContext as GL};

use super::render;
use super::shader;
use crate::spiral::{outlines, side, square, SQUARE_COUNT};

/// The spiral has no settings; the form and page JSON are ignored.
pub fn start(canvas: HtmlCanvasElement, _form: HtmlFormElement, _settings: Option<String>) -> Result<(), JsValue> {
    let gl = render::context(&canvas)?;
    let program = shader::create_program(&gl, shader::FLAT_VERTEX, shader::FLAT_FRAGMENT)?;
    gl.use_program(Some(&program));
    let transform = shader::uniform(&gl, &program, "u_transform")?;
    let color = shader::uniform(&gl, &program, "u_color")?;

    let vao = gl.create_vertex_array().ok_or("unable to create vertex array")?;
    gl.bind_vertex_array(Some(&vao));
    let positions = render::attribute_buffer(&gl, &program, "a_position", 2)?;

    let dirty = Rc::new(Cell::new(true));
    render::keep_fitted(&canvas, dirty.clone())?;
    info!("spiral applet started with {} squares", SQUARE_COUNT);

    render::animate(move || {
        if !dirty.replace(false) {
            return;
        }
        render::begin_frame(&gl, &canvas);
        let (width, height) = (canvas.width() as f32, canvas.height() as f32);

        gl.bind_vertex_array(Some(&vao));
        gl.bind_buffer(GL::ARRAY_BUFFER, Some(&positions));
        let corners = square(side(width, height));
        gl.buffer_data_with_array_buffer_view(GL::ARRAY_BUFFER, &Float32Array::from(&corners[..]), GL::STATIC_DRAW);

        for outline in outlines(width, height, SQUARE_COUNT) {
            gl.uniform_matrix3fv_with_f32_array(Some(&transform), false, &outline.transform.to_cols_array());
            gl.uniform3fv_with_f32_array(Some(&color), &outline.color);
            gl.draw_arrays(GL::LINE_LOOP, 0, 4);
        }
    })
}
