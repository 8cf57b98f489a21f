//! Gesture-driven refresh controller
//!
//! The controller owns a [`Surface`] (the draggable element plus the refresh
//! panel) and moves between [`State`]s in response to [`Input`]s. Everything
//! goes through [`Controller::dispatch`]; the returned [`Outcome`] tells the
//! host what, if anything, it has to wait for next.

use std::time::Duration;

use tracing::{debug, trace, warn};

use crate::animation::{ResetAnimation, Ticket};
use crate::config::RefreshConfig;
use crate::gesture::{Direction, DragMove};
use crate::hooks::{update_channel, Completion, RefreshHooks, UpdateSignal};
use crate::Result;

/// The element being pulled and the panel that shows status messages
pub trait Surface {
    /// Current scroll offset of the target; pulling only starts at 0
    fn scroll_top(&self) -> f64;

    /// Move the target down by `offset` pixels
    fn set_offset(&mut self, offset: f64);

    /// Drop any inline positioning so the target returns to its natural layout
    fn clear_offset(&mut self);

    /// Replace the content of the refresh panel
    fn show_message(&mut self, message: &str);
}

/// Which side of the release threshold the current drag is on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragZone {
    /// Below `min_drag_distance`; releasing cancels
    Pulling,
    /// At or past `min_drag_distance`; releasing refreshes
    Releasable,
}

/// Public view of the controller state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Idle,
    Dragging(DragZone),
    /// Pinned at `max_drag_distance` until the update completes
    Updating,
    Resetting,
}

#[derive(Debug)]
enum Phase {
    Idle,
    Dragging { zone: DragZone },
    Updating,
    Resetting(ResetAnimation),
}

/// Everything that can drive the controller
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Input {
    DragMove(DragMove),
    DragEnd,
    UpdateFinished(Completion),
    AnimationFrame { ticket: Ticket, elapsed: Duration },
    /// Programmatic reset from any state
    Reset,
}

/// What the host has to do after a dispatch
#[derive(Debug)]
pub enum Outcome {
    /// Input did not apply; leave the default browser behaviour alone
    Ignored,
    /// Input was handled; the host should suppress default handling
    Consumed,
    /// Await the signal, then dispatch `Input::UpdateFinished`
    AwaitUpdate(UpdateSignal),
    /// Start delivering `Input::AnimationFrame`s for this animation
    Animate(ResetAnimation),
    /// Animation advanced; keep delivering frames
    Animating,
    /// Back at rest with inline positioning cleared
    Settled,
}

/// Pull-to-refresh state machine bound to one surface
#[derive(Debug)]
pub struct Controller<S: Surface> {
    surface: S,
    config: RefreshConfig,
    hooks: RefreshHooks,
    phase: Phase,
    /// Last offset written to the surface
    offset: f64,
    next_ticket: u64,
}

impl<S: Surface> Controller<S> {
    /// Validate the configuration and bind a controller to `surface`
    pub fn new(surface: S, config: RefreshConfig, hooks: RefreshHooks) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            surface,
            config,
            hooks,
            phase: Phase::Idle,
            offset: 0.0,
            next_ticket: 0,
        })
    }

    pub fn config(&self) -> &RefreshConfig {
        &self.config
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Offset the target was last moved to
    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn state(&self) -> State {
        match self.phase {
            Phase::Idle => State::Idle,
            Phase::Dragging { zone } => State::Dragging(zone),
            Phase::Updating => State::Updating,
            Phase::Resetting(_) => State::Resetting,
        }
    }

    /// True once the threshold has been crossed, until the panel resets
    pub fn panel_open(&self) -> bool {
        matches!(
            self.phase,
            Phase::Dragging {
                zone: DragZone::Releasable
            } | Phase::Updating
        )
    }

    /// Show an arbitrary message in the refresh panel
    pub fn show_message(&mut self, message: &str) {
        self.surface.show_message(message);
    }

    /// Apply one input and report what the host needs to do next
    pub fn dispatch(&mut self, input: Input) -> Outcome {
        match input {
            Input::DragMove(drag) => self.drag_move(drag),
            Input::DragEnd => self.drag_end(),
            Input::UpdateFinished(completion) => self.update_finished(completion),
            Input::AnimationFrame { ticket, elapsed } => self.animation_frame(ticket, elapsed),
            Input::Reset => self.reset(),
        }
    }

    /// Unbind from the surface, clearing any inline offset
    pub fn detach(mut self) -> S {
        debug!(state = ?self.state(), "detaching refresh controller");
        self.surface.clear_offset();
        self.surface
    }

    fn drag_move(&mut self, drag: DragMove) -> Outcome {
        if self.surface.scroll_top() != 0.0 {
            trace!(scroll_top = self.surface.scroll_top(), "drag ignored, not at scroll top");
            return Outcome::Ignored;
        }

        if drag.direction != Direction::Down || !drag.distance.is_finite() {
            trace!(?drag, "drag ignored, not a downward pull");
            return Outcome::Ignored;
        }

        match self.phase {
            Phase::Updating => return Outcome::Ignored,
            Phase::Idle | Phase::Resetting(_) => {
                debug!("pull gesture started");
                self.hooks.drag_start();
            }
            Phase::Dragging { .. } => {}
        }

        self.move_to(drag.distance.clamp(0.0, self.config.max_drag_distance));

        let zone = if drag.distance < self.config.min_drag_distance {
            self.surface.show_message(&self.config.pull_message);
            DragZone::Pulling
        } else {
            self.surface.show_message(&self.config.release_message);
            DragZone::Releasable
        };

        if !matches!(self.phase, Phase::Dragging { zone: current } if current == zone) {
            debug!(?zone, distance = drag.distance, "drag zone changed");
        }
        self.phase = Phase::Dragging { zone };

        Outcome::Consumed
    }

    fn drag_end(&mut self) -> Outcome {
        if matches!(self.phase, Phase::Updating) {
            return Outcome::Ignored;
        }

        // Every recognised drag ends with the hook, pull or not
        self.hooks.drag_end();

        let zone = match self.phase {
            Phase::Dragging { zone } => zone,
            _ => {
                trace!("drag ended without a pull");
                return Outcome::Ignored;
            }
        };

        match zone {
            DragZone::Releasable => {
                self.move_to(self.config.max_drag_distance);
                self.surface.show_message(&self.config.update_message);
                self.phase = Phase::Updating;

                debug!("released past threshold, starting update");
                let (done, signal) = update_channel();
                self.hooks.update(done);

                Outcome::AwaitUpdate(signal)
            }
            DragZone::Pulling => {
                debug!("released before threshold, resetting");
                self.begin_reset()
            }
        }
    }

    fn update_finished(&mut self, completion: Completion) -> Outcome {
        if !matches!(self.phase, Phase::Updating) {
            trace!(?completion, "stale update completion ignored");
            return Outcome::Ignored;
        }

        if completion == Completion::Abandoned {
            warn!("update handle dropped without calling done, resetting anyway");
        } else {
            debug!("update finished");
        }

        self.begin_reset()
    }

    fn animation_frame(&mut self, ticket: Ticket, elapsed: Duration) -> Outcome {
        let anim = match self.phase {
            Phase::Resetting(anim) if anim.ticket == ticket => anim,
            _ => return Outcome::Ignored,
        };

        if anim.is_finished(elapsed) {
            self.settle();
            return Outcome::Settled;
        }

        self.move_to(anim.offset_at(elapsed));
        Outcome::Animating
    }

    fn reset(&mut self) -> Outcome {
        match self.phase {
            Phase::Idle => Outcome::Ignored,
            _ => {
                debug!(state = ?self.state(), "programmatic reset");
                self.begin_reset()
            }
        }
    }

    fn begin_reset(&mut self) -> Outcome {
        let from = self.offset;
        let duration = self.config.animation_duration();

        if from <= 0.0 || duration.is_zero() {
            self.settle();
            return Outcome::Settled;
        }

        self.next_ticket += 1;
        let anim = ResetAnimation {
            ticket: Ticket(self.next_ticket),
            from,
            duration,
            easing: self.config.easing,
        };
        self.phase = Phase::Resetting(anim);

        Outcome::Animate(anim)
    }

    fn move_to(&mut self, offset: f64) {
        self.offset = offset;
        self.surface.set_offset(offset);
    }

    fn settle(&mut self) {
        self.surface.clear_offset();
        self.offset = 0.0;
        self.phase = Phase::Idle;
        debug!("refresh panel back at rest");
    }
}
