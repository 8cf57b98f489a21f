//! Pull-to-refresh component for mobile

use std::cell::RefCell;
use std::rc::Rc;

use pullrefresh_common::{
    Controller, DoneHandle, DragTracker, Input, Outcome, RefreshConfig, RefreshHooks, ViewState,
};
use tracing::error;
use web_sys::{Element, TouchEvent};
use yew::prelude::*;

use crate::driver::{drive, Notify, Tasks};

#[derive(Properties, PartialEq)]
pub struct PullToRefreshProps {
    #[prop_or_default]
    pub children: Children,
    /// Called on release past the threshold; call `done()` once refreshed
    pub on_refresh: Callback<DoneHandle>,
    #[prop_or_default]
    pub config: RefreshConfig,
    #[prop_or_default]
    pub on_drag_start: Option<Callback<()>>,
    #[prop_or_default]
    pub on_drag_end: Option<Callback<()>>,
}

#[derive(Clone)]
struct Callbacks {
    on_refresh: Callback<DoneHandle>,
    on_drag_start: Option<Callback<()>>,
    on_drag_end: Option<Callback<()>>,
}

// Hooks read the latest callbacks so a re-render with new props does not
// require a new controller.
fn hooks(latest: Rc<RefCell<Callbacks>>) -> RefreshHooks {
    let start = latest.clone();
    let end = latest.clone();

    RefreshHooks::new()
        .on_drag_start(move || {
            if let Some(ref callback) = start.borrow().on_drag_start {
                callback.emit(());
            }
        })
        .on_drag_end(move || {
            if let Some(ref callback) = end.borrow().on_drag_end {
                callback.emit(());
            }
        })
        .on_update(move |done| latest.borrow().on_refresh.emit(done))
}

#[function_component(PullToRefresh)]
pub fn pull_to_refresh(props: &PullToRefreshProps) -> Html {
    let container = use_node_ref();
    let force_update = use_force_update();
    let tracker = use_mut_ref(DragTracker::default);
    let tasks = use_memo((), |_| Tasks::default());

    let latest = use_mut_ref(|| Callbacks {
        on_refresh: props.on_refresh.clone(),
        on_drag_start: props.on_drag_start.clone(),
        on_drag_end: props.on_drag_end.clone(),
    });
    *latest.borrow_mut() = Callbacks {
        on_refresh: props.on_refresh.clone(),
        on_drag_start: props.on_drag_start.clone(),
        on_drag_end: props.on_drag_end.clone(),
    };

    let controller = {
        let latest = latest.clone();
        let tracker = tracker.clone();
        use_memo(props.config.clone(), move |config| {
            *tracker.borrow_mut() = DragTracker::new(config.drag_threshold);
            match Controller::new(ViewState::default(), config.clone(), hooks(latest)) {
                Ok(controller) => Some(Rc::new(RefCell::new(controller))),
                Err(e) => {
                    error!("pull-to-refresh disabled: {}", e);
                    None
                }
            }
        })
    };

    {
        let tasks = tasks.clone();
        use_effect_with((), move |_| move || tasks.abort_all());
    }

    let notify: Notify = {
        let force_update = force_update.clone();
        Rc::new(move || force_update.force_update())
    };

    let on_touch_start = {
        let tracker = tracker.clone();

        Callback::from(move |e: TouchEvent| {
            if e.touches().length() > 1 {
                return;
            }
            if let Some(touch) = e.touches().get(0) {
                tracker
                    .borrow_mut()
                    .begin(touch.client_x() as f64, touch.client_y() as f64);
            }
        })
    };

    let on_touch_move = {
        let tracker = tracker.clone();
        let controller = controller.clone();
        let container = container.clone();
        let tasks = tasks.clone();
        let notify = notify.clone();

        Callback::from(move |e: TouchEvent| {
            let Some(ref controller) = *controller else {
                return;
            };
            let Some(touch) = e.touches().get(0) else {
                return;
            };
            let Some(drag) = tracker
                .borrow_mut()
                .track(touch.client_x() as f64, touch.client_y() as f64)
            else {
                return;
            };

            let outcome = {
                let mut ctrl = controller.borrow_mut();
                if let Some(element) = container.cast::<Element>() {
                    ctrl.surface_mut().scroll_top = element.scroll_top() as f64;
                }
                ctrl.dispatch(Input::DragMove(drag))
            };

            if matches!(outcome, Outcome::Consumed) {
                e.prevent_default();
                notify();
            }
            drive(controller.clone(), outcome, (*tasks).clone(), notify.clone());
        })
    };

    let on_touch_end = {
        let tracker = tracker.clone();
        let controller = controller.clone();
        let tasks = tasks.clone();
        let notify = notify.clone();

        Callback::from(move |_: TouchEvent| {
            if !tracker.borrow_mut().finish() {
                return;
            }
            let Some(ref controller) = *controller else {
                return;
            };

            let outcome = controller.borrow_mut().dispatch(Input::DragEnd);
            notify();
            drive(controller.clone(), outcome, (*tasks).clone(), notify.clone());
        })
    };

    let view = match *controller {
        Some(ref controller) => controller.borrow().surface().clone(),
        None => ViewState::default(),
    };

    html! {
        <div
            class="pull-to-refresh-container"
            ref={container}
            ontouchstart={on_touch_start}
            ontouchmove={on_touch_move}
            ontouchend={on_touch_end.clone()}
            ontouchcancel={on_touch_end}
        >
            {if let Some(ref message) = view.message {
                html! {
                    <div id={props.config.refresh_panel_id.clone()} class="refresh-panel">
                        {message.clone()}
                    </div>
                }
            } else {
                html! {}
            }}

            <div class="pull-to-refresh-content" style={view.offset_style()}>
                {props.children.clone()}
            </div>
        </div>
    }
}
