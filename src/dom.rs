//! Browser binding.
//!
//! [`SvgEditor`] mounts an [`EditorCore`] on an existing `<svg>` element. It
//! owns the real DOM nodes, one per [`crate::element::Element`], and keeps
//! them in sync with the core once per animation frame. Input is delegated:
//! a few listeners on the root resolve the hit node back to a
//! [`DragTarget`] through the [`ATTR_ELEMENT_ID`] attribute, and window
//! listeners exist only while a drag is in progress.
//!
//! Nothing in this module holds shape state. It translates events into core
//! calls and core [`Action`]s into DOM effects.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use log::{debug, info, warn};
use uuid::Uuid;
use wasm_bindgen::prelude::*;
use wasm_bindgen::{JsCast, closure::Closure};
use web_sys::{AddEventListenerOptions, Document, Event, EventTarget, MouseEvent, TouchEvent, Window};

use crate::config::EditorConfig;
use crate::consts::{ATTR_ELEMENT_ID, CLASS_UNSELECTABLE, SVG_NS};
use crate::container::{Container, ShapeKind};
use crate::editor::{Action, EditorCore};
use crate::element::{ElementId, ShapeOptions, Styled};
use crate::error::{DomError, ShapeError};
use crate::geometry::{Delta, Point, Size};
use crate::gesture::{Button, FrameThrottle, PointerSample};
use crate::shape::DragTarget;

/// Route `log` output to the browser console and install the panic hook.
///
/// Safe to call more than once.
#[cfg(feature = "browser")]
pub fn init_logging() {
    console_error_panic_hook::set_once();
    if let Err(err) = console_log::init_with_level(log::Level::Debug) {
        debug!("dom: logger already installed: {err}");
    }
}

#[cfg(not(feature = "browser"))]
pub fn init_logging() {}

// =============================================================
// Listeners
// =============================================================

type Handler = fn(&Rc<Inner>, Event);

/// An attached event listener. Detaching does not drop the callback; a
/// listener detached from inside its own callback is parked until the next
/// frame.
struct Listener {
    target: EventTarget,
    kind: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    fn attach(target: &EventTarget, kind: &'static str, callback: Closure<dyn FnMut(Event)>) -> Result<Self, DomError> {
        target.add_event_listener_with_callback(kind, callback.as_ref().unchecked_ref())?;
        Ok(Self { target: target.clone(), kind, callback })
    }

    /// Attach with `passive: false` so the callback may cancel the default.
    fn attach_active(
        target: &EventTarget,
        kind: &'static str,
        callback: Closure<dyn FnMut(Event)>,
    ) -> Result<Self, DomError> {
        let options = AddEventListenerOptions::new();
        options.set_passive(false);
        target.add_event_listener_with_callback_and_add_event_listener_options(
            kind,
            callback.as_ref().unchecked_ref(),
            &options,
        )?;
        Ok(Self { target: target.clone(), kind, callback })
    }

    fn detach(&self) {
        if let Err(err) = self.target.remove_event_listener_with_callback(self.kind, self.callback.as_ref().unchecked_ref())
        {
            warn!("dom: could not remove {} listener: {err:?}", self.kind);
        }
    }
}

/// Wrap `f` so it only runs while the editor is alive.
fn handler(inner: &Rc<Inner>, f: Handler) -> Closure<dyn FnMut(Event)> {
    let weak = Rc::downgrade(inner);
    Closure::wrap(Box::new(move |event: Event| {
        if let Some(inner) = weak.upgrade() {
            f(&inner, event);
        }
    }) as Box<dyn FnMut(Event)>)
}

// =============================================================
// Shared state
// =============================================================

/// Mirror of the nodes currently in the document.
#[derive(Default)]
struct View {
    nodes: HashMap<ElementId, web_sys::Element>,
    targets: HashMap<ElementId, DragTarget>,
    order: Vec<ElementId>,
}

struct Inner {
    core: RefCell<EditorCore>,
    view: RefCell<View>,
    window: Window,
    document: Document,
    root: web_sys::Element,
    touch: bool,
    raf_pending: Cell<bool>,
    resize_throttle: RefCell<FrameThrottle<()>>,
    listeners: RefCell<Vec<Listener>>,
    capture: RefCell<Vec<Listener>>,
    retired: RefCell<Vec<Listener>>,
}

// =============================================================
// Frames and rendering
// =============================================================

/// Run `task` on the next animation frame.
fn schedule_frame(window: &Window, task: impl FnOnce() + 'static) -> Result<(), DomError> {
    let holder: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
    let holder_for_cb = Rc::clone(&holder);
    let mut task = Some(task);
    let cb = Closure::wrap(Box::new(move |_ts: f64| {
        if let Some(task) = task.take() {
            task();
        }
        holder_for_cb.borrow_mut().take();
    }) as Box<dyn FnMut(f64)>);

    window.request_animation_frame(cb.as_ref().unchecked_ref())?;
    *holder.borrow_mut() = Some(cb);
    Ok(())
}

/// Coalesce render requests into one per frame. Renders immediately when no
/// frame can be requested.
fn request_render(inner: &Rc<Inner>) {
    if inner.raf_pending.replace(true) {
        return;
    }
    let weak = Rc::downgrade(inner);
    let scheduled = schedule_frame(&inner.window, move || {
        let Some(inner) = weak.upgrade() else {
            return;
        };
        inner.raf_pending.set(false);
        inner.retired.borrow_mut().clear();
        render(&inner);
    });
    if let Err(err) = scheduled {
        warn!("dom: animation frame unavailable, rendering now: {err}");
        inner.raf_pending.set(false);
        render(inner);
    }
}

fn render(inner: &Inner) {
    let core = inner.core.borrow();
    let mut view = inner.view.borrow_mut();
    if let Err(err) = sync(inner, &core.container, &mut view) {
        warn!("dom: render failed: {err}");
    }
}

/// Bring the document in line with the container: create missing nodes,
/// write changed attributes, drop stale nodes and fix the draw order.
fn sync(inner: &Inner, container: &Container, view: &mut View) -> Result<(), DomError> {
    let mut order = Vec::new();
    let mut targets = HashMap::new();

    for layer in container.layers() {
        let id = layer.element.id();
        let node = match view.nodes.get(&id) {
            Some(node) => node.clone(),
            None => {
                let node = inner.document.create_element_ns(Some(SVG_NS), layer.element.tag())?;
                node.set_attribute(ATTR_ELEMENT_ID, &id.to_string())?;
                view.nodes.insert(id, node.clone());
                node
            }
        };
        for (key, value) in layer.element.attrs() {
            if node.get_attribute(key).as_deref() != Some(value) {
                node.set_attribute(key, value)?;
            }
        }
        targets.insert(id, layer.target);
        order.push(id);
    }

    view.nodes.retain(|id, node| {
        let keep = targets.contains_key(id);
        if !keep {
            node.remove();
        }
        keep
    });

    if order != view.order {
        for id in &order {
            if let Some(node) = view.nodes.get(id) {
                inner.root.append_child(node)?;
            }
        }
        view.order = order;
    }
    view.targets = targets;
    Ok(())
}

// =============================================================
// Actions
// =============================================================

fn apply(inner: &Rc<Inner>, actions: Vec<Action>, event: Option<&Event>) {
    for action in actions {
        match action {
            Action::RenderNeeded => request_render(inner),
            Action::SetUnselectable(on) => set_unselectable(inner, on),
            Action::CaptureStarted => {
                if let Err(err) = start_capture(inner) {
                    warn!("dom: could not capture pointer: {err}");
                }
            }
            Action::CaptureEnded => end_capture(inner),
            Action::StopPropagation => {
                if let Some(event) = event {
                    event.stop_propagation();
                }
            }
            Action::PreventDefault => {
                if let Some(event) = event {
                    event.prevent_default();
                }
            }
            Action::SelectionChanged(id) => debug!("dom: selection changed to {id:?}"),
        }
    }
}

fn set_unselectable(inner: &Inner, on: bool) {
    let Some(body) = inner.document.body() else {
        return;
    };
    let classes = body.class_list();
    let result = if on { classes.add_1(CLASS_UNSELECTABLE) } else { classes.remove_1(CLASS_UNSELECTABLE) };
    if let Err(err) = result {
        warn!("dom: could not toggle {CLASS_UNSELECTABLE}: {err:?}");
    }
}

/// Follow the pointer on the window until the gesture ends.
fn start_capture(inner: &Rc<Inner>) -> Result<(), DomError> {
    let mut capture = inner.capture.borrow_mut();
    if !capture.is_empty() {
        return Ok(());
    }
    let window: &EventTarget = inner.window.as_ref();
    if inner.touch {
        // Window touch listeners default to passive.
        capture.push(Listener::attach_active(window, "touchmove", handler(inner, on_move))?);
        capture.push(Listener::attach(window, "touchend", handler(inner, on_up))?);
        capture.push(Listener::attach(window, "touchcancel", handler(inner, on_up))?);
    } else {
        capture.push(Listener::attach(window, "mousemove", handler(inner, on_move))?);
        capture.push(Listener::attach(window, "mouseup", handler(inner, on_up))?);
    }
    Ok(())
}

fn end_capture(inner: &Inner) {
    let mut capture = inner.capture.borrow_mut();
    for listener in capture.iter() {
        listener.detach();
    }
    inner.retired.borrow_mut().extend(capture.drain(..));
}

// =============================================================
// Event translation
// =============================================================

fn resolve_target(inner: &Inner, event: &Event) -> Option<DragTarget> {
    let target = event.target()?;
    let node = target.dyn_ref::<web_sys::Element>()?;
    let raw = node.get_attribute(ATTR_ELEMENT_ID)?;
    let id = match Uuid::parse_str(&raw) {
        Ok(id) => id,
        Err(err) => {
            debug!("dom: ignoring node with bad id {raw:?}: {err}");
            return None;
        }
    };
    inner.view.borrow().targets.get(&id).copied()
}

fn sample(event: &Event) -> Option<PointerSample> {
    if let Some(mouse) = event.dyn_ref::<MouseEvent>() {
        return Some(PointerSample {
            client: Point::new(f64::from(mouse.client_x()), f64::from(mouse.client_y())),
            movement: Some(Delta::new(f64::from(mouse.movement_x()), f64::from(mouse.movement_y()))),
            button: Button::from_dom(mouse.button()),
        });
    }
    let touch = event.dyn_ref::<TouchEvent>()?.changed_touches().get(0)?;
    Some(PointerSample::primary(Point::new(f64::from(touch.client_x()), f64::from(touch.client_y()))))
}

/// Viewport position to root-relative position.
fn local_point(root: &web_sys::Element, client: Point) -> Point {
    let rect = root.get_bounding_client_rect();
    Point::new(client.x - rect.left(), client.y - rect.top())
}

fn measure(root: &web_sys::Element) -> Size {
    let rect = root.get_bounding_client_rect();
    Size::new(rect.width(), rect.height())
}

// =============================================================
// Handlers
// =============================================================

fn on_mouse_down(inner: &Rc<Inner>, event: Event) {
    let Some(sample) = sample(&event) else {
        return;
    };
    let target = resolve_target(inner, &event);
    let actions = inner.core.borrow_mut().on_pointer_down(target, sample);
    apply(inner, actions, Some(&event));
}

fn on_touch_start(inner: &Rc<Inner>, event: Event) {
    let Some(sample) = sample(&event) else {
        return;
    };
    let target = resolve_target(inner, &event);
    let actions = inner.core.borrow_mut().on_pointer_down(target, sample);
    apply(inner, actions, Some(&event));

    let point = local_point(&inner.root, sample.client);
    let actions = inner.core.borrow_mut().on_tap(target, point, js_sys::Date::now());
    apply(inner, actions, Some(&event));
}

fn on_double_click(inner: &Rc<Inner>, event: Event) {
    let Some(sample) = sample(&event) else {
        return;
    };
    let target = resolve_target(inner, &event);
    let point = local_point(&inner.root, sample.client);
    let actions = inner.core.borrow_mut().on_double_click(target, point);
    apply(inner, actions, Some(&event));
}

fn on_move(inner: &Rc<Inner>, event: Event) {
    let Some(sample) = sample(&event) else {
        return;
    };
    let actions = inner.core.borrow_mut().on_pointer_move(sample);
    apply(inner, actions, Some(&event));
}

fn on_up(inner: &Rc<Inner>, event: Event) {
    let actions = inner.core.borrow_mut().on_pointer_up();
    apply(inner, actions, Some(&event));
}

/// Native drag-and-drop would steal the gesture.
fn on_drag_start(_inner: &Rc<Inner>, event: Event) {
    event.prevent_default();
}

fn on_window_resize(inner: &Rc<Inner>, _event: Event) {
    if !inner.resize_throttle.borrow_mut().offer(()) {
        return;
    }
    let weak = Rc::downgrade(inner);
    let scheduled = schedule_frame(&inner.window, move || {
        if let Some(inner) = weak.upgrade() {
            deliver_resize(&inner);
        }
    });
    if let Err(err) = scheduled {
        warn!("dom: animation frame unavailable, resizing now: {err}");
        deliver_resize(inner);
    }
}

fn deliver_resize(inner: &Rc<Inner>) {
    if inner.resize_throttle.borrow_mut().on_frame().is_none() {
        return;
    }
    let size = measure(&inner.root);
    let actions = inner.core.borrow_mut().on_viewport_resize(size);
    apply(inner, actions, None);
}

fn install(inner: &Rc<Inner>) -> Result<(), DomError> {
    let root: &EventTarget = inner.root.as_ref();
    let window: &EventTarget = inner.window.as_ref();
    let mut listeners = inner.listeners.borrow_mut();
    if inner.touch {
        listeners.push(Listener::attach(root, "touchstart", handler(inner, on_touch_start))?);
    } else {
        listeners.push(Listener::attach(root, "mousedown", handler(inner, on_mouse_down))?);
        listeners.push(Listener::attach(root, "dblclick", handler(inner, on_double_click))?);
    }
    listeners.push(Listener::attach(root, "dragstart", handler(inner, on_drag_start))?);
    listeners.push(Listener::attach(window, "resize", handler(inner, on_window_resize))?);
    Ok(())
}

fn parse_id(raw: &str) -> Result<ElementId, DomError> {
    Ok(Uuid::parse_str(raw)?)
}

fn parse_kind(raw: Option<String>) -> Result<Option<ShapeKind>, ShapeError> {
    raw.as_deref().map(str::parse::<ShapeKind>).transpose()
}

// =============================================================
// JavaScript API
// =============================================================

/// An editor mounted on one `<svg>` element.
///
/// Options and values cross the boundary as JSON strings; element ids as
/// UUID strings.
#[wasm_bindgen]
pub struct SvgEditor {
    inner: Rc<Inner>,
}

impl SvgEditor {
    /// Mount on `root`: tag it as a container, measure it and start
    /// listening for input.
    ///
    /// # Errors
    ///
    /// Fails outside a browser window or when a listener cannot be attached.
    pub fn mount(root: web_sys::Element, config: EditorConfig) -> Result<Self, DomError> {
        let window = web_sys::window().ok_or(DomError::NoWindow)?;
        let document = window.document().ok_or(DomError::NoDocument)?;
        let touch = config.touch;
        let core = EditorCore::new(config, measure(&root));
        if let Some(classes) = core.container.element().attr("class") {
            for class in classes.split_whitespace() {
                root.class_list().add_1(class)?;
            }
        }

        let inner = Rc::new(Inner {
            core: RefCell::new(core),
            view: RefCell::new(View::default()),
            window,
            document,
            root,
            touch,
            raf_pending: Cell::new(false),
            resize_throttle: RefCell::new(FrameThrottle::default()),
            listeners: RefCell::new(Vec::new()),
            capture: RefCell::new(Vec::new()),
            retired: RefCell::new(Vec::new()),
        });
        install(&inner)?;
        render(&inner);
        info!("dom: editor mounted ({} input)", if touch { "touch" } else { "mouse" });
        Ok(Self { inner })
    }

    fn run(&self, actions: Vec<Action>) {
        apply(&self.inner, actions, None);
    }

    fn added(&self, id: ElementId) -> String {
        request_render(&self.inner);
        id.to_string()
    }
}

#[wasm_bindgen]
impl SvgEditor {
    /// `config` is an optional JSON object, e.g. `{"touch": true}`.
    #[wasm_bindgen(constructor)]
    pub fn new(root: web_sys::Element, config: Option<String>) -> Result<SvgEditor, JsValue> {
        init_logging();
        let config = match config {
            Some(raw) => EditorConfig::from_json(&raw)?,
            None => EditorConfig::default(),
        };
        Ok(Self::mount(root, config)?)
    }

    pub fn add_rect(&self, options: &str) -> Result<String, JsValue> {
        let options = ShapeOptions::from_json(options)?;
        let id = self.inner.core.borrow_mut().add_rect(&options);
        Ok(self.added(id))
    }

    pub fn add_polygon(&self, options: &str) -> Result<String, JsValue> {
        let options = ShapeOptions::from_json(options)?;
        let id = self.inner.core.borrow_mut().add_polygon(&options);
        Ok(self.added(id))
    }

    pub fn add_resizable_rect(&self, options: &str) -> Result<String, JsValue> {
        let options = ShapeOptions::from_json(options)?;
        let id = self.inner.core.borrow_mut().add_resizable_rect(&options)?;
        Ok(self.added(id))
    }

    pub fn add_bordered_rect(&self, options: &str) -> Result<String, JsValue> {
        let options = ShapeOptions::from_json(options)?;
        let id = self.inner.core.borrow_mut().add_bordered_rect(&options)?;
        Ok(self.added(id))
    }

    /// Replace a polygon's vertices with a flat `[x0, y0, x1, y1, ...]` list.
    pub fn set_points(&self, id: &str, points: Vec<f64>) -> Result<bool, JsValue> {
        let id = parse_id(id)?;
        let changed = self.inner.core.borrow_mut().set_polygon_points(id, &points);
        if changed {
            request_render(&self.inner);
        }
        Ok(changed)
    }

    pub fn select(&self, id: &str) -> Result<(), JsValue> {
        let id = parse_id(id)?;
        let actions = self.inner.core.borrow_mut().select(id);
        self.run(actions);
        Ok(())
    }

    pub fn deselect(&self) {
        let actions = self.inner.core.borrow_mut().deselect();
        self.run(actions);
    }

    /// `kind` is one of `rect`, `polygon`, `resizableRect`, `borderedRect`;
    /// absent means any.
    pub fn remove_active(&self, kind: Option<String>) -> Result<(), JsValue> {
        let kind = parse_kind(kind)?;
        let actions = self.inner.core.borrow_mut().remove_active(kind);
        self.run(actions);
        Ok(())
    }

    pub fn remove_all(&self, kind: Option<String>) -> Result<(), JsValue> {
        let kind = parse_kind(kind)?;
        let actions = self.inner.core.borrow_mut().remove_all(kind);
        self.run(actions);
        Ok(())
    }

    pub fn toggle_all(&self, visible: bool, kind: Option<String>) -> Result<(), JsValue> {
        let kind = parse_kind(kind)?;
        let actions = self.inner.core.borrow_mut().toggle_all(visible, kind);
        self.run(actions);
        Ok(())
    }

    /// Whether polygon `id` is simple. `undefined` for other shapes.
    pub fn is_simple(&self, id: &str, highlight: bool) -> Result<Option<bool>, JsValue> {
        let id = parse_id(id)?;
        let simple = self.inner.core.borrow_mut().check_simple(id, highlight);
        if highlight && simple == Some(false) {
            request_render(&self.inner);
        }
        Ok(simple)
    }

    /// JSON value of a shape: `{"width", "height"}` for rectangles, a flat
    /// point list for polygons. `relative` divides by the container size.
    pub fn value(&self, id: &str, relative: bool) -> Result<Option<String>, JsValue> {
        let id = parse_id(id)?;
        let value = self.inner.core.borrow().value_of(id, relative);
        let encoded = value.map(|v| serde_json::to_string(&v)).transpose().map_err(DomError::from)?;
        Ok(encoded)
    }

    #[must_use]
    pub fn active_element(&self) -> Option<String> {
        self.inner.core.borrow().container.active_element().map(|id| id.to_string())
    }

    /// Detach every listener and remove every node this editor created.
    pub fn destroy(&self) {
        self.inner.resize_throttle.borrow_mut().detach();
        for listener in self.inner.listeners.borrow_mut().drain(..) {
            listener.detach();
        }
        for listener in self.inner.capture.borrow_mut().drain(..) {
            listener.detach();
        }
        self.inner.retired.borrow_mut().clear();
        let mut view = self.inner.view.borrow_mut();
        for node in view.nodes.values() {
            node.remove();
        }
        *view = View::default();
        info!("dom: editor destroyed");
    }
}
