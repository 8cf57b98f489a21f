//! Caller-supplied callbacks and the update completion signal

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::channel::oneshot;

/// How a pending update came to an end
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// `DoneHandle::done` was called
    Done,
    /// The handle was dropped without calling `done`
    Abandoned,
}

/// Handed to `on_update`; call [`DoneHandle::done`] when the refresh finished.
///
/// `done` consumes the handle, so completion can be signalled at most once.
#[must_use = "the refresh panel stays pinned until `done` is called"]
pub struct DoneHandle {
    tx: oneshot::Sender<()>,
}

impl DoneHandle {
    pub fn done(self) {
        // Receiver gone means the controller was reset or detached meanwhile
        let _ = self.tx.send(());
    }
}

impl fmt::Debug for DoneHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DoneHandle")
            .field("pending", &!self.tx.is_canceled())
            .finish()
    }
}

/// Resolves once the matching [`DoneHandle`] is used or dropped
#[derive(Debug)]
pub struct UpdateSignal {
    rx: oneshot::Receiver<()>,
}

impl Future for UpdateSignal {
    type Output = Completion;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match Pin::new(&mut self.rx).poll(cx) {
            Poll::Ready(Ok(())) => Poll::Ready(Completion::Done),
            Poll::Ready(Err(oneshot::Canceled)) => Poll::Ready(Completion::Abandoned),
            Poll::Pending => Poll::Pending,
        }
    }
}

/// Create a linked handle/signal pair
pub fn update_channel() -> (DoneHandle, UpdateSignal) {
    let (tx, rx) = oneshot::channel();
    (DoneHandle { tx }, UpdateSignal { rx })
}

type Hook = Box<dyn FnMut()>;
type UpdateHook = Box<dyn FnMut(DoneHandle)>;

/// Optional callbacks fired by the controller
#[derive(Default)]
pub struct RefreshHooks {
    on_drag_start: Option<Hook>,
    on_drag_end: Option<Hook>,
    on_update: Option<UpdateHook>,
}

impl RefreshHooks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fired once per gesture when a valid downward drag begins
    pub fn on_drag_start(mut self, hook: impl FnMut() + 'static) -> Self {
        self.on_drag_start = Some(Box::new(hook));
        self
    }

    /// Fired when a valid drag is released
    pub fn on_drag_end(mut self, hook: impl FnMut() + 'static) -> Self {
        self.on_drag_end = Some(Box::new(hook));
        self
    }

    /// Fired when the drag is released past the threshold
    pub fn on_update(mut self, hook: impl FnMut(DoneHandle) + 'static) -> Self {
        self.on_update = Some(Box::new(hook));
        self
    }

    pub(crate) fn drag_start(&mut self) {
        if let Some(hook) = self.on_drag_start.as_mut() {
            hook();
        }
    }

    pub(crate) fn drag_end(&mut self) {
        if let Some(hook) = self.on_drag_end.as_mut() {
            hook();
        }
    }

    /// Without an update hook the handle is dropped and the signal resolves
    /// as abandoned straight away.
    pub(crate) fn update(&mut self, done: DoneHandle) {
        match self.on_update.as_mut() {
            Some(hook) => hook(done),
            None => drop(done),
        }
    }
}

impl fmt::Debug for RefreshHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RefreshHooks")
            .field("on_drag_start", &self.on_drag_start.is_some())
            .field("on_drag_end", &self.on_drag_end.is_some())
            .field("on_update", &self.on_update.is_some())
            .finish()
    }
}
