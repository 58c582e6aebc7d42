use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{window, HtmlCanvasElement};

/// Keeps the canvas backing store the same size as its CSS box.
pub struct CanvasResize {
    closure: Option<Closure<dyn FnMut()>>,
}

/// Returns true when the backing store had to change.
pub fn fit_to_display(canvas: &HtmlCanvasElement) -> bool {
    let width = canvas.client_width().max(0) as u32;
    let height = canvas.client_height().max(0) as u32;
    if canvas.width() != width || canvas.height() != height {
        canvas.set_width(width);
        canvas.set_height(height);
        true
    } else {
        false
    }
}

impl CanvasResize {
    /// Resizes once now and again on every window `resize`, calling
    /// `on_resize` whenever the size actually changed.
    pub fn attach(canvas: &HtmlCanvasElement, mut on_resize: impl FnMut() + 'static) -> Result<Self, JsValue> {
        let window = window().ok_or("no window")?;
        let closure = {
            let canvas = canvas.clone();
            Closure::<dyn FnMut()>::new(move || {
                if fit_to_display(&canvas) {
                    on_resize();
                }
            })
        };
        window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
        fit_to_display(canvas);

        Ok(Self {
            closure: Some(closure),
        })
    }

    pub fn discard(&mut self) {
        if let (Some(closure), Some(window)) = (self.closure.take(), window()) {
            window
                .remove_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())
                .ok();
        }
    }
}

impl Drop for CanvasResize {
    fn drop(&mut self) {
        self.discard();
    }
}
