//! WebAssembly entry point and DOM binding.

use std::cell::RefCell;
use std::rc::Rc;

use galleria_core::{
    Gallery, GalleryCommand, GalleryConfig, GalleryError, GalleryResult, PointerEvent,
    PointerKind, RotateDirection, ShortcutRegistry,
};
use kurbo::Point;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{CustomEvent, CustomEventInit, Element, HtmlElement};

use crate::dom::{
    CLASS_BUTTON_NEXT, CLASS_BUTTON_PREV, CLASS_GALLERY, CLASS_SLIDE_CONTAINER, CONFIG_ATTRIBUTE,
    DomEffect, initial_effects, plan_all,
};

/// Initialize panic reporting and logging.
#[wasm_bindgen(start)]
pub fn start() {
    // Set up panic hook for better error messages
    console_error_panic_hook::set_once();

    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Galleria: logger already initialized".into());
    }
}

fn to_js(err: GalleryError) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}

/// Document handles plus the gallery state behind them.
///
/// The gallery sits in its own `RefCell` and is never borrowed while effects
/// run, so listeners of `slideChangeEvent` may call back into the gallery.
struct Shared {
    gallery: RefCell<Gallery>,
    root: Element,
    containers: Vec<HtmlElement>,
}

impl Shared {
    /// Run a gallery operation and apply whatever it changed.
    fn run<T>(&self, op: impl FnOnce(&mut Gallery) -> GalleryResult<T>) -> Result<T, JsValue> {
        let (value, events) = {
            let mut gallery = self
                .gallery
                .try_borrow_mut()
                .map_err(|_| JsValue::from_str("Gallery is busy"))?;
            let value = op(&mut *gallery).map_err(to_js)?;
            (value, gallery.drain_events())
        };
        self.apply_all(&plan_all(&events));
        Ok(value)
    }

    fn apply_all(&self, effects: &[DomEffect]) {
        for effect in effects {
            if let Err(e) = self.apply(effect) {
                log::warn!("Failed to apply {:?}: {:?}", effect, e);
            }
        }
    }

    fn apply(&self, effect: &DomEffect) -> Result<(), JsValue> {
        match effect {
            DomEffect::AddClass { slide, class } => self.container(*slide)?.class_list().add_1(class),
            DomEffect::RemoveClass { slide, class } => {
                self.container(*slide)?.class_list().remove_1(class)
            }
            DomEffect::SetTransform { slide, css } => {
                let Some(image) = self.container(*slide)?.query_selector("img")? else {
                    log::debug!("Slide {} has no image", slide);
                    return Ok(());
                };
                let image = image.dyn_into::<HtmlElement>().map_err(JsValue::from)?;
                image.style().set_property("transform", css)
            }
            DomEffect::Dispatch { name, detail } => {
                let init = CustomEventInit::new();
                init.set_detail(&serde_wasm_bindgen::to_value(detail)?);
                let event = CustomEvent::new_with_event_init_dict(name, &init)?;
                self.root.dispatch_event(&event).map(drop)
            }
        }
    }

    fn container(&self, slide: usize) -> Result<&HtmlElement, JsValue> {
        self.containers
            .get(slide)
            .ok_or_else(|| JsValue::from_str(&format!("No slide container {}", slide)))
    }
}

/// Image gallery bound to a DOM subtree.
///
/// ```js
/// const gallery = new WebGallery("#photos");
/// gallery.rotate_slide(true);
/// ```
#[wasm_bindgen]
pub struct WebGallery {
    shared: Rc<Shared>,
}

#[wasm_bindgen]
impl WebGallery {
    /// Bind to the element matching `selector` inside `parent` (default: `document.body`).
    #[wasm_bindgen(constructor)]
    pub fn new(selector: &str, parent: Option<Element>) -> Result<WebGallery, JsValue> {
        let parent = match parent {
            Some(parent) => parent,
            None => web_sys::window()
                .and_then(|window| window.document())
                .and_then(|document| document.body())
                .ok_or_else(|| JsValue::from_str("No document body"))?
                .into(),
        };

        let root = parent
            .query_selector(selector)?
            .ok_or_else(|| JsValue::from_str(&format!("No element matches {}", selector)))?;

        let nodes = parent.query_selector_all(&format!("{} > .{}", selector, CLASS_SLIDE_CONTAINER))?;
        let mut containers = Vec::with_capacity(nodes.length() as usize);
        for i in 0..nodes.length() {
            if let Some(node) = nodes.item(i) {
                containers.push(node.dyn_into::<HtmlElement>().map_err(JsValue::from)?);
            }
        }

        let config = match root.get_attribute(CONFIG_ATTRIBUTE) {
            Some(json) => GalleryConfig::from_json(&json).map_err(to_js)?,
            None => GalleryConfig::default(),
        };
        let gallery = Gallery::new(containers.len(), config).map_err(to_js)?;

        root.class_list().add_1(CLASS_GALLERY)?;
        if !root.has_attribute("tabindex") {
            root.set_attribute("tabindex", "0")?;
        }

        let shared = Rc::new(Shared {
            gallery: RefCell::new(gallery),
            root,
            containers,
        });
        shared.apply_all(&initial_effects(&shared.gallery.borrow()));

        setup_buttons(&shared)?;
        setup_keyboard(&shared)?;
        setup_pointer(&shared)?;

        log::info!("Galleria bound to {} with {} slides", selector, shared.containers.len());
        Ok(WebGallery { shared })
    }

    /// Number of slides.
    pub fn len(&self) -> usize {
        self.shared.gallery.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.shared.gallery.borrow().is_empty()
    }

    /// Index of the selected slide.
    pub fn selected(&self) -> usize {
        self.shared.gallery.borrow().selected()
    }

    pub fn next_slide(&self) -> Result<usize, JsValue> {
        self.shared.run(Gallery::next_slide)
    }

    pub fn prev_slide(&self) -> Result<usize, JsValue> {
        self.shared.run(Gallery::prev_slide)
    }

    pub fn select_slide(&self, index: isize) -> Result<usize, JsValue> {
        self.shared.run(|gallery| gallery.select_slide(index))
    }

    /// Toggle zoom on the selected slide; returns whether it is now zoomed.
    pub fn zoom_slide(&self) -> Result<bool, JsValue> {
        self.shared.run(Gallery::toggle_zoom)
    }

    /// Rotate the selected slide by one step; left unless `rotate_right`.
    pub fn rotate_slide(&self, rotate_right: Option<bool>) -> Result<(), JsValue> {
        let direction = if rotate_right.unwrap_or(false) {
            RotateDirection::Right
        } else {
            RotateDirection::Left
        };
        self.shared
            .run(|gallery| gallery.rotate_slide(direction).map(drop))
    }

    pub fn reset_slide(&self) -> Result<(), JsValue> {
        self.shared.run(Gallery::reset_slide)
    }

    /// CSS transform currently applied to a slide's image.
    pub fn transform_css(&self, index: usize) -> Result<String, JsValue> {
        self.shared.gallery.borrow().transform_css(index).map_err(to_js)
    }
}

fn listen<E: JsCast + 'static>(
    target: &web_sys::EventTarget,
    event: &str,
    handler: impl Fn(E) + 'static,
) -> Result<(), JsValue> {
    let closure = Closure::wrap(Box::new(move |event: web_sys::Event| {
        match event.dyn_into::<E>() {
            Ok(event) => handler(event),
            Err(_) => log::debug!("Ignoring unexpected event type"),
        }
    }) as Box<dyn Fn(_)>);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    // Listeners live as long as the page.
    closure.forget();
    Ok(())
}

fn report(result: Result<(), JsValue>) {
    if let Err(e) = result {
        log::warn!("Gallery operation failed: {:?}", e);
    }
}

fn setup_buttons(shared: &Rc<Shared>) -> Result<(), JsValue> {
    for (class, command) in [
        (CLASS_BUTTON_NEXT, GalleryCommand::Next),
        (CLASS_BUTTON_PREV, GalleryCommand::Prev),
    ] {
        let Some(button) = shared.root.query_selector(&format!(".{}", class))? else {
            log::debug!("No .{} button", class);
            continue;
        };
        let shared = Rc::clone(shared);
        listen(&button, "click", move |_: web_sys::MouseEvent| {
            report(shared.run(|gallery| gallery.apply(command)));
        })?;
    }
    Ok(())
}

fn setup_keyboard(shared: &Rc<Shared>) -> Result<(), JsValue> {
    let handle = Rc::clone(shared);
    listen(&shared.root, "keydown", move |event: web_sys::KeyboardEvent| {
        if let Some(command) = ShortcutRegistry::command_for_key(&event.key()) {
            event.prevent_default();
            report(handle.run(|gallery| gallery.apply(command)));
        }
    })
}

fn mouse_position(event: &web_sys::MouseEvent) -> Point {
    Point::new(f64::from(event.client_x()), f64::from(event.client_y()))
}

fn touch_position(event: &web_sys::TouchEvent) -> Option<Point> {
    event
        .changed_touches()
        .get(0)
        .map(|touch| Point::new(f64::from(touch.client_x()), f64::from(touch.client_y())))
}

fn setup_pointer(shared: &Rc<Shared>) -> Result<(), JsValue> {
    for (index, container) in shared.containers.iter().enumerate() {
        let mouse_events: [(&str, fn(Point) -> PointerEvent); 3] = [
            ("mousedown", |position| PointerEvent::Down {
                position,
                kind: PointerKind::Mouse,
            }),
            ("mousemove", |position| PointerEvent::Move {
                position,
                kind: PointerKind::Mouse,
            }),
            ("mouseup", |position| PointerEvent::Up {
                position,
                kind: PointerKind::Mouse,
            }),
        ];
        for (name, make) in mouse_events {
            let handle = Rc::clone(shared);
            listen(container, name, move |event: web_sys::MouseEvent| {
                event.prevent_default();
                let pointer = make(mouse_position(&event));
                report(handle.run(|gallery| gallery.handle_pointer(index, pointer)));
            })?;
        }

        let handle = Rc::clone(shared);
        listen(container, "mouseleave", move |_: web_sys::MouseEvent| {
            report(handle.run(|gallery| gallery.handle_pointer(index, PointerEvent::Cancel)));
        })?;

        let touch_events: [(&str, fn(Point) -> PointerEvent); 3] = [
            ("touchstart", |position| PointerEvent::Down {
                position,
                kind: PointerKind::Touch,
            }),
            ("touchmove", |position| PointerEvent::Move {
                position,
                kind: PointerKind::Touch,
            }),
            ("touchend", |position| PointerEvent::Up {
                position,
                kind: PointerKind::Touch,
            }),
        ];
        for (name, make) in touch_events {
            let handle = Rc::clone(shared);
            listen(container, name, move |event: web_sys::TouchEvent| {
                event.prevent_default();
                let Some(position) = touch_position(&event) else {
                    return;
                };
                let pointer = make(position);
                report(handle.run(|gallery| gallery.handle_pointer(index, pointer)));
            })?;
        }

        let handle = Rc::clone(shared);
        listen(container, "touchcancel", move |_: web_sys::TouchEvent| {
            report(handle.run(|gallery| gallery.handle_pointer(index, PointerEvent::Cancel)));
        })?;
    }
    Ok(())
}
