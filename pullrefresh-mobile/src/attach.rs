//! Binding a controller directly to a DOM element
//!
//! Each bound element carries a `data-pull-refresh-id` attribute pointing into
//! a thread-local registry, so attaching twice to the same element is a no-op.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use pullrefresh_common::{
    Controller, DragTracker, Error, Input, Outcome, RefreshConfig, RefreshHooks, Registry, Result,
    Surface,
};
use tracing::debug;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{AddEventListenerOptions, HtmlElement, TouchEvent};

use crate::dom::DomSurface;
use crate::driver::{drive, Notify, Shared, Tasks};

const ID_ATTR: &str = "data-pull-refresh-id";

thread_local! {
    static BINDINGS: RefCell<Registry<u32, Binding>> = RefCell::new(Registry::new());
    static NEXT_ID: Cell<u32> = const { Cell::new(1) };
}

struct Listener {
    target: HtmlElement,
    event: &'static str,
    closure: Closure<dyn FnMut(TouchEvent)>,
}

impl Listener {
    fn new(
        target: &HtmlElement,
        event: &'static str,
        passive: bool,
        handler: impl FnMut(TouchEvent) + 'static,
    ) -> Result<Self> {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(TouchEvent)>);

        let options = AddEventListenerOptions::new();
        options.set_passive(passive);

        target
            .add_event_listener_with_callback_and_add_event_listener_options(
                event,
                closure.as_ref().unchecked_ref(),
                &options,
            )
            .map_err(|e| Error::Bind(format!("{}: {:?}", event, e)))?;

        Ok(Self {
            target: target.clone(),
            event,
            closure,
        })
    }

    fn remove(&self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref());
    }
}

struct Binding {
    controller: Shared<DomSurface>,
    tasks: Tasks,
    listeners: Vec<Listener>,
}

impl Binding {
    fn new(element: &HtmlElement, config: RefreshConfig, hooks: RefreshHooks) -> Result<Self> {
        let surface = DomSurface::new(element.clone(), &config.refresh_panel_id);
        let tracker = Rc::new(RefCell::new(DragTracker::new(config.drag_threshold)));
        let controller = Rc::new(RefCell::new(Controller::new(surface, config, hooks)?));
        let tasks = Tasks::default();
        let notify: Notify = Rc::new(|| {});

        let on_start = {
            let tracker = tracker.clone();
            move |e: TouchEvent| {
                if e.touches().length() > 1 {
                    return;
                }
                if let Some((x, y)) = first_touch(&e) {
                    tracker.borrow_mut().begin(x, y);
                }
            }
        };

        let on_move = {
            let tracker = tracker.clone();
            let controller = controller.clone();
            let tasks = tasks.clone();
            let notify = notify.clone();
            move |e: TouchEvent| {
                let Some((x, y)) = first_touch(&e) else {
                    return;
                };
                let Some(drag) = tracker.borrow_mut().track(x, y) else {
                    return;
                };

                let outcome = controller.borrow_mut().dispatch(Input::DragMove(drag));
                if matches!(outcome, Outcome::Consumed) {
                    e.prevent_default();
                }
                drive(controller.clone(), outcome, tasks.clone(), notify.clone());
            }
        };

        let on_end = {
            let tracker = tracker.clone();
            let controller = controller.clone();
            let tasks = tasks.clone();
            let notify = notify.clone();
            move |_: TouchEvent| end_drag(&tracker, &controller, &tasks, &notify)
        };

        let on_cancel = {
            let controller = controller.clone();
            let tasks = tasks.clone();
            move |_: TouchEvent| end_drag(&tracker, &controller, &tasks, &notify)
        };

        let listeners = vec![
            Listener::new(element, "touchstart", true, on_start)?,
            // Non-passive so a consumed pull can suppress native scrolling
            Listener::new(element, "touchmove", false, on_move)?,
            Listener::new(element, "touchend", true, on_end)?,
            Listener::new(element, "touchcancel", true, on_cancel)?,
        ];

        Ok(Self {
            controller,
            tasks,
            listeners,
        })
    }

    fn teardown(self) {
        self.tasks.abort_all();
        for listener in &self.listeners {
            listener.remove();
        }

        // Detach may be requested from inside one of the listeners, so the
        // closures and the controller borrow are released on a later tick.
        spawn_local(async move {
            let Binding {
                controller,
                listeners,
                ..
            } = self;
            drop(listeners);

            match Rc::try_unwrap(controller) {
                Ok(cell) => {
                    cell.into_inner().detach();
                }
                Err(shared) => shared.borrow_mut().surface_mut().clear_offset(),
            }
        });
    }
}

fn end_drag(
    tracker: &RefCell<DragTracker>,
    controller: &Shared<DomSurface>,
    tasks: &Tasks,
    notify: &Notify,
) {
    if !tracker.borrow_mut().finish() {
        return;
    }
    let outcome = controller.borrow_mut().dispatch(Input::DragEnd);
    drive(controller.clone(), outcome, tasks.clone(), notify.clone());
}

fn first_touch(e: &TouchEvent) -> Option<(f64, f64)> {
    e.touches()
        .get(0)
        .map(|touch| (touch.client_x() as f64, touch.client_y() as f64))
}

fn binding_id(element: &HtmlElement) -> Option<u32> {
    element.get_attribute(ID_ATTR)?.parse().ok()
}

/// Bind pull-to-refresh to `element`.
///
/// Returns `true` when a new controller was created and `false` when the
/// element was already bound (the new configuration is then ignored).
pub fn attach(element: &HtmlElement, config: RefreshConfig, hooks: RefreshHooks) -> Result<bool> {
    BINDINGS.with(|bindings| {
        let mut bindings = bindings.borrow_mut();

        if let Some(id) = binding_id(element) {
            if bindings.contains(&id) {
                debug!(id, "element already has a refresh controller");
                return Ok(false);
            }
        }

        let id = NEXT_ID.with(|next| {
            let id = next.get();
            next.set(id.wrapping_add(1));
            id
        });

        let created = bindings
            .attach(id, || Binding::new(element, config, hooks))?
            .is_created();

        if let Err(e) = element.set_attribute(ID_ATTR, &id.to_string()) {
            if let Some(binding) = bindings.detach(&id) {
                binding.teardown();
            }
            return Err(Error::Bind(format!("{:?}", e)));
        }

        debug!(id, "refresh controller attached");
        Ok(created)
    })
}

/// Remove the controller bound to `element`, if any
pub fn detach(element: &HtmlElement) -> bool {
    let Some(id) = binding_id(element) else {
        return false;
    };
    let _ = element.remove_attribute(ID_ATTR);

    let binding = BINDINGS.with(|bindings| bindings.borrow_mut().detach(&id));
    match binding {
        Some(binding) => {
            binding.teardown();
            debug!(id, "refresh controller detached");
            true
        }
        None => false,
    }
}

/// Animate `element` back to rest, abandoning any pending update
pub fn reset(element: &HtmlElement) -> bool {
    let Some(id) = binding_id(element) else {
        return false;
    };

    let bound = BINDINGS.with(|bindings| {
        bindings
            .borrow()
            .get(&id)
            .map(|binding| (binding.controller.clone(), binding.tasks.clone()))
    });

    match bound {
        Some((controller, tasks)) => {
            // Busy when called from one of the controller's own callbacks
            let Ok(mut ctrl) = controller.try_borrow_mut() else {
                return false;
            };
            let outcome = ctrl.dispatch(Input::Reset);
            drop(ctrl);
            drive(controller, outcome, tasks, Rc::new(|| {}));
            true
        }
        None => false,
    }
}

/// Whether `element` currently has a refresh controller
pub fn is_attached(element: &HtmlElement) -> bool {
    binding_id(element)
        .map(|id| BINDINGS.with(|bindings| bindings.borrow().contains(&id)))
        .unwrap_or(false)
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn element() -> HtmlElement {
        let document = web_sys::window().unwrap().document().unwrap();
        document.create_element("div").unwrap().dyn_into().unwrap()
    }

    #[wasm_bindgen_test]
    fn test_attach_is_idempotent() {
        let target = element();
        assert!(!is_attached(&target));

        assert!(attach(&target, RefreshConfig::default(), RefreshHooks::new()).unwrap());
        assert!(is_attached(&target));
        assert!(target.has_attribute(ID_ATTR));

        let config = RefreshConfig {
            min_drag_distance: 20.0,
            ..Default::default()
        };
        assert!(!attach(&target, config, RefreshHooks::new()).unwrap());
    }

    #[wasm_bindgen_test]
    fn test_detach_unbinds() {
        let target = element();
        attach(&target, RefreshConfig::default(), RefreshHooks::new()).unwrap();

        assert!(detach(&target));
        assert!(!is_attached(&target));
        assert!(!target.has_attribute(ID_ATTR));
        assert!(!detach(&target));
        assert!(!reset(&target));

        // A detached element can be bound again
        assert!(attach(&target, RefreshConfig::default(), RefreshHooks::new()).unwrap());
        detach(&target);
    }

    #[wasm_bindgen_test]
    fn test_invalid_config_leaves_element_unbound() {
        let target = element();
        let config = RefreshConfig {
            min_drag_distance: 70.0,
            max_drag_distance: 60.0,
            ..Default::default()
        };

        assert!(matches!(
            attach(&target, config, RefreshHooks::new()),
            Err(Error::InvalidConfig(_))
        ));
        assert!(!is_attached(&target));
    }
}
