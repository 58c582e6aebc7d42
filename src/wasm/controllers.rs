use std::cell::{OnceCell, RefCell};
use std::rc::Rc;

use glam::{DVec3, Mat4, Vec2, Vec3};
use js_sys::Function;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{Document, EventTarget, HtmlElement, MouseEvent, WheelEvent};

use crate::controllers::{SphericalRotator, TrackballOptions, TrackballRotator};

type MouseClosure = Closure<dyn FnMut(MouseEvent)>;
type WheelClosure = Closure<dyn FnMut(WheelEvent)>;

fn function_of<T: ?Sized>(closure: &Closure<T>) -> Function {
    closure.as_ref().unchecked_ref::<Function>().clone()
}

/// Pointer position relative to the element's top-left corner.
fn element_position(element: &HtmlElement, event: &MouseEvent) -> Vec2 {
    let rect = element.get_bounding_client_rect();
    Vec2::new(
        (event.client_x() as f64 - rect.left()) as f32,
        (event.client_y() as f64 - rect.top()) as f32,
    )
}

fn element_size(element: &HtmlElement) -> Vec2 {
    Vec2::new(element.client_width() as f32, element.client_height() as f32)
}

/// A set of (target, event, listener) registrations removed together.
#[derive(Default)]
struct Listeners(Vec<(EventTarget, &'static str, Function)>);

impl Listeners {
    fn add(&mut self, target: &EventTarget, event: &'static str, f: Function) -> Result<(), JsValue> {
        target.add_event_listener_with_callback(event, &f)?;
        self.0.push((target.clone(), event, f));
        Ok(())
    }

    fn remove_all(&mut self) {
        for (target, event, f) in self.0.drain(..) {
            target.remove_event_listener_with_callback(event, &f).ok();
        }
    }
}

/// Document-level listeners that only live for the duration of a drag.
struct DragListeners {
    on_move: Function,
    on_up: Function,
}

impl DragListeners {
    fn attach(&self, target: &EventTarget) {
        target.add_event_listener_with_callback("mousemove", &self.on_move).ok();
        target.add_event_listener_with_callback("mouseup", &self.on_up).ok();
    }

    fn detach(&self, target: &EventTarget) {
        target.remove_event_listener_with_callback("mousemove", &self.on_move).ok();
        target.remove_event_listener_with_callback("mouseup", &self.on_up).ok();
    }
}

/// Trackball rotation bound to an element's mouse and wheel events.
///
/// `on_drag` receives the new view matrix after every drag step and every
/// wheel event. The rotator is not borrowed while `on_drag` runs, so the
/// callback may call [`TrackballController::view_matrix`].
pub struct TrackballController {
    rotator: Rc<RefCell<TrackballRotator>>,
    document: Document,
    listeners: Listeners,
    drag: Rc<OnceCell<DragListeners>>,
    discarded: bool,
    _mouse: Vec<MouseClosure>,
    _wheel: WheelClosure,
}

impl TrackballController {
    pub fn attach(
        element: &HtmlElement,
        options: &TrackballOptions,
        on_drag: impl FnMut(Mat4) + 'static,
    ) -> Result<Self, JsValue> {
        let document = element.owner_document().ok_or("element has no document")?;
        let rotator = Rc::new(RefCell::new(TrackballRotator::new(options)));
        let on_drag: Rc<RefCell<dyn FnMut(Mat4)>> = Rc::new(RefCell::new(on_drag));
        let drag: Rc<OnceCell<DragListeners>> = Rc::new(OnceCell::new());

        let on_move = MouseClosure::new({
            let element = element.clone();
            let rotator = rotator.clone();
            let on_drag = on_drag.clone();
            move |event: MouseEvent| {
                let pointer = element_position(&element, &event);
                let view = rotator.borrow_mut().drag(pointer);
                if let Some(view) = view {
                    (&mut *on_drag.borrow_mut())(view);
                }
            }
        });

        let on_up = MouseClosure::new({
            let rotator = rotator.clone();
            let drag = drag.clone();
            let document = document.clone();
            move |_: MouseEvent| {
                let mut rotator = rotator.borrow_mut();
                if rotator.is_dragging() {
                    rotator.end();
                    if let Some(listeners) = drag.get() {
                        listeners.detach(&document);
                    }
                }
            }
        });

        drag.set(DragListeners {
            on_move: function_of(&on_move),
            on_up: function_of(&on_up),
        })
        .ok();

        let on_down = MouseClosure::new({
            let element = element.clone();
            let rotator = rotator.clone();
            let drag = drag.clone();
            let document = document.clone();
            move |event: MouseEvent| {
                let mut rotator = rotator.borrow_mut();
                if rotator.is_dragging() {
                    return;
                }
                rotator.begin(element_position(&element, &event), element_size(&element));
                if let Some(listeners) = drag.get() {
                    listeners.attach(&document);
                }
            }
        });

        let on_wheel = WheelClosure::new({
            let rotator = rotator.clone();
            let on_drag = on_drag.clone();
            move |event: WheelEvent| {
                event.prevent_default();
                let view = rotator.borrow_mut().wheel(event.delta_y() as f32);
                (&mut *on_drag.borrow_mut())(view);
            }
        });

        let mut listeners = Listeners::default();
        listeners.add(element, "mousedown", function_of(&on_down))?;
        listeners.add(element, "wheel", function_of(&on_wheel))?;

        Ok(Self {
            rotator,
            document,
            listeners,
            drag,
            discarded: false,
            _mouse: vec![on_down, on_move, on_up],
            _wheel: on_wheel,
        })
    }

    pub fn view_matrix(&self) -> Mat4 {
        self.rotator.borrow().view_matrix()
    }

    pub fn view_distance(&self) -> f32 {
        self.rotator.borrow().view_distance()
    }

    /// Removes every listener, including document-level drag listeners.
    /// Safe to call more than once.
    pub fn discard(&mut self) {
        if self.discarded {
            return;
        }
        self.discarded = true;
        self.listeners.remove_all();
        if let Some(drag) = self.drag.get() {
            drag.detach(&self.document);
        }
        if let Ok(mut rotator) = self.rotator.try_borrow_mut() {
            rotator.end();
        }
        log::debug!("trackball controller discarded");
    }
}

impl Drop for TrackballController {
    fn drop(&mut self) {
        self.discard();
    }
}

/// Spherical orbit bound to an element. `on_drag` receives the new eye
/// position; mouse moves only count between mousedown and mouseup.
pub struct SphericalController {
    rotator: Rc<RefCell<SphericalRotator>>,
    element: HtmlElement,
    listeners: Listeners,
    drag: Rc<OnceCell<DragListeners>>,
    discarded: bool,
    _mouse: Vec<MouseClosure>,
    _wheel: WheelClosure,
}

impl SphericalController {
    pub fn attach(
        element: &HtmlElement,
        eye: Vec3,
        on_drag: impl FnMut(DVec3) + 'static,
    ) -> Result<Self, JsValue> {
        let rotator = Rc::new(RefCell::new(SphericalRotator::new(eye.as_dvec3())));
        let on_drag: Rc<RefCell<dyn FnMut(DVec3)>> = Rc::new(RefCell::new(on_drag));
        let drag: Rc<OnceCell<DragListeners>> = Rc::new(OnceCell::new());

        let on_move = MouseClosure::new({
            let element = element.clone();
            let rotator = rotator.clone();
            let on_drag = on_drag.clone();
            move |event: MouseEvent| {
                let eye = rotator.borrow_mut().drag(
                    event.movement_x() as f64,
                    event.movement_y() as f64,
                    element.client_width().max(1) as f64,
                    element.client_height().max(1) as f64,
                );
                (&mut *on_drag.borrow_mut())(eye);
            }
        });

        let on_up = MouseClosure::new({
            let drag = drag.clone();
            let element = element.clone();
            move |_: MouseEvent| {
                if let Some(listeners) = drag.get() {
                    listeners.detach(&element);
                }
            }
        });

        drag.set(DragListeners {
            on_move: function_of(&on_move),
            on_up: function_of(&on_up),
        })
        .ok();

        let on_down = MouseClosure::new({
            let drag = drag.clone();
            let element = element.clone();
            move |_: MouseEvent| {
                if let Some(listeners) = drag.get() {
                    listeners.attach(&element);
                }
            }
        });

        let on_wheel = WheelClosure::new({
            let rotator = rotator.clone();
            let on_drag = on_drag.clone();
            move |event: WheelEvent| {
                event.prevent_default();
                let eye = rotator.borrow_mut().wheel(event.delta_y());
                (&mut *on_drag.borrow_mut())(eye);
            }
        });

        let mut listeners = Listeners::default();
        listeners.add(element, "mousedown", function_of(&on_down))?;
        listeners.add(element, "wheel", function_of(&on_wheel))?;

        Ok(Self {
            rotator,
            element: element.clone(),
            listeners,
            drag,
            discarded: false,
            _mouse: vec![on_down, on_move, on_up],
            _wheel: on_wheel,
        })
    }

    pub fn view_matrix(&self) -> Mat4 {
        self.rotator.borrow().view_matrix().as_mat4()
    }

    pub fn discard(&mut self) {
        if self.discarded {
            return;
        }
        self.discarded = true;
        self.listeners.remove_all();
        if let Some(drag) = self.drag.get() {
            drag.detach(&self.element);
        }
        log::debug!("spherical controller discarded");
    }
}

impl Drop for SphericalController {
    fn drop(&mut self) {
        self.discard();
    }
}
