//! Async side of the controller: waiting on updates and running animations

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use futures::future::{AbortHandle, Abortable};
use gloo_timers::future::TimeoutFuture;
use pullrefresh_common::{Controller, Input, Outcome, ResetAnimation, Surface};
use tracing::trace;
use wasm_bindgen_futures::spawn_local;

const FRAME_MS: u32 = 16;

pub(crate) type Shared<S> = Rc<RefCell<Controller<S>>>;

/// Called after every change the driver makes, e.g. to re-render
pub(crate) type Notify = Rc<dyn Fn()>;

/// Abort handles for every task spawned on behalf of one controller
#[derive(Clone, Default)]
pub(crate) struct Tasks {
    handles: Rc<RefCell<Vec<AbortHandle>>>,
}

impl Tasks {
    fn spawn<F>(&self, future: F)
    where
        F: std::future::Future<Output = ()> + 'static,
    {
        let (handle, registration) = AbortHandle::new_pair();
        {
            let mut handles = self.handles.borrow_mut();
            handles.retain(|h| !h.is_aborted());
            handles.push(handle.clone());
        }
        spawn_local(async move {
            let _ = Abortable::new(future, registration).await;
            // Mark finished tasks so the next spawn prunes them
            handle.abort();
        });
    }

    pub(crate) fn abort_all(&self) {
        for handle in self.handles.borrow_mut().drain(..) {
            handle.abort();
        }
    }
}

/// Follow an outcome until the controller needs no more driving
pub(crate) fn drive<S: Surface + 'static>(
    controller: Shared<S>,
    outcome: Outcome,
    tasks: Tasks,
    notify: Notify,
) {
    match outcome {
        Outcome::AwaitUpdate(signal) => {
            let spawner = tasks.clone();
            tasks.spawn(async move {
                let completion = signal.await;
                let next = controller
                    .borrow_mut()
                    .dispatch(Input::UpdateFinished(completion));
                notify();
                drive(controller, next, spawner, notify);
            });
        }
        Outcome::Animate(anim) => {
            tasks.spawn(animate(controller, anim, notify));
        }
        Outcome::Ignored | Outcome::Consumed | Outcome::Animating | Outcome::Settled => {}
    }
}

async fn animate<S: Surface>(controller: Shared<S>, anim: ResetAnimation, notify: Notify) {
    let started = js_sys::Date::now();

    loop {
        TimeoutFuture::new(FRAME_MS).await;

        let elapsed = Duration::from_secs_f64(((js_sys::Date::now() - started) / 1000.0).max(0.0));
        let outcome = controller.borrow_mut().dispatch(Input::AnimationFrame {
            ticket: anim.ticket,
            elapsed,
        });
        notify();

        match outcome {
            Outcome::Animating => continue,
            Outcome::Ignored => {
                trace!(ticket = ?anim.ticket, "reset animation superseded");
                break;
            }
            _ => break,
        }
    }
}
