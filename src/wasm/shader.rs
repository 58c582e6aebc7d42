use wasm_bindgen::JsValue;
use web_sys::{WebGl2RenderingContext as GL, WebGlProgram, WebGlShader, WebGlUniformLocation};

/// Triangle lists with per-vertex normals, lit by ambient plus one
/// directional light.
pub const LIT_VERTEX: &str = r#"#version 300 es
in vec4 a_position;
in vec3 a_normal;

uniform mat4 u_mvp;
uniform mat3 u_normal_matrix;

out vec3 v_normal;

void main() {
    gl_Position = u_mvp * a_position;
    v_normal = u_normal_matrix * a_normal;
}
"#;

pub const LIT_FRAGMENT: &str = r#"#version 300 es
precision highp float;

in vec3 v_normal;

uniform vec3 u_color;
uniform vec3 u_ambient_light;
uniform vec3 u_directional_light;
uniform vec3 u_light_direction;

out vec4 out_color;

void main() {
    vec3 normal = normalize(v_normal);
    float diffuse = max(dot(normal, normalize(u_light_direction)), 0.0);
    vec3 light = u_ambient_light + u_directional_light * diffuse;
    out_color = vec4(u_color * light, 1.0);
}
"#;

/// 2D outlines in pixel space; `u_transform` maps pixels to clip space.
pub const FLAT_VERTEX: &str = r#"#version 300 es
in vec2 a_position;

uniform mat3 u_transform;

void main() {
    gl_Position = vec4((u_transform * vec3(a_position, 1.0)).xy, 0.0, 1.0);
}
"#;

pub const FLAT_FRAGMENT: &str = r#"#version 300 es
precision highp float;

uniform vec3 u_color;

out vec4 out_color;

void main() {
    out_color = vec4(u_color, 1.0);
}
"#;

pub fn compile_shader(gl: &GL, kind: u32, source: &str) -> Result<WebGlShader, JsValue> {
    let shader = gl
        .create_shader(kind)
        .ok_or("unable to create shader object")?;
    gl.shader_source(&shader, source);
    gl.compile_shader(&shader);

    if gl
        .get_shader_parameter(&shader, GL::COMPILE_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        Ok(shader)
    } else {
        let log = gl
            .get_shader_info_log(&shader)
            .unwrap_or_else(|| "unknown error creating shader".into());
        gl.delete_shader(Some(&shader));
        Err(JsValue::from_str(&log))
    }
}

pub fn link_program(gl: &GL, vertex: &WebGlShader, fragment: &WebGlShader) -> Result<WebGlProgram, JsValue> {
    let program = gl
        .create_program()
        .ok_or("unable to create program object")?;
    gl.attach_shader(&program, vertex);
    gl.attach_shader(&program, fragment);
    gl.link_program(&program);

    if gl
        .get_program_parameter(&program, GL::LINK_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        Ok(program)
    } else {
        let log = gl
            .get_program_info_log(&program)
            .unwrap_or_else(|| "unknown error linking program".into());
        gl.delete_program(Some(&program));
        Err(JsValue::from_str(&log))
    }
}

/// Compiles and links both stages; the shader objects are released once the
/// program holds them.
pub fn create_program(gl: &GL, vertex_source: &str, fragment_source: &str) -> Result<WebGlProgram, JsValue> {
    let vertex = compile_shader(gl, GL::VERTEX_SHADER, vertex_source)?;
    let fragment = compile_shader(gl, GL::FRAGMENT_SHADER, fragment_source)?;
    let program = link_program(gl, &vertex, &fragment);
    gl.delete_shader(Some(&vertex));
    gl.delete_shader(Some(&fragment));
    program
}

pub fn uniform(gl: &GL, program: &WebGlProgram, name: &str) -> Result<WebGlUniformLocation, JsValue> {
    gl.get_uniform_location(program, name)
        .ok_or_else(|| JsValue::from_str(&format!("unable to get uniform location for {name}")))
}

pub fn attribute(gl: &GL, program: &WebGlProgram, name: &str) -> Result<u32, JsValue> {
    u32::try_from(gl.get_attrib_location(program, name))
        .map_err(|_| JsValue::from_str(&format!("unable to get attribute location for {name}")))
}
