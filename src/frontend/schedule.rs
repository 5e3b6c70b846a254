use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gloo::render::{request_animation_frame, AnimationFrame};
use gloo::timers::callback::Timeout;

use super::dom::now_ms;
use crate::throttle::{FrameBatch, Submission, Throttle};

struct ThrottledState<A> {
    throttle: RefCell<Throttle<A>>,
    trailing: RefCell<Option<Timeout>>,
    callback: Box<dyn Fn(A)>,
}

pub(crate) struct ThrottledCallback<A: 'static> {
    state: Rc<ThrottledState<A>>,
}

impl<A: 'static> ThrottledCallback<A> {
    pub(crate) fn new(interval_ms: u32, callback: impl Fn(A) + 'static) -> Self {
        Self {
            state: Rc::new(ThrottledState {
                throttle: RefCell::new(Throttle::new(f64::from(interval_ms))),
                trailing: RefCell::new(None),
                callback: Box::new(callback),
            }),
        }
    }

    pub(crate) fn call(&self, args: A) {
        let submission = self.state.throttle.borrow_mut().submit(now_ms(), args);

        match submission {
            Submission::RunNow(args) => {
                // A leading run makes any stale trailing timer pointless.
                self.state.trailing.borrow_mut().take();
                (self.state.callback)(args);
            }
            Submission::Defer { delay_ms } => {
                let state = Rc::downgrade(&self.state);
                let timeout = Timeout::new(delay_ms.ceil() as u32, move || fire_trailing(&state));
                // Replacing the handle cancels the superseded timer.
                *self.state.trailing.borrow_mut() = Some(timeout);
            }
        }
    }

    pub(crate) fn cancel(&self) {
        self.state.trailing.borrow_mut().take();
        self.state.throttle.borrow_mut().cancel();
    }
}

fn fire_trailing<A>(state: &Weak<ThrottledState<A>>) {
    let Some(state) = state.upgrade() else {
        return;
    };

    let args = state.throttle.borrow_mut().fire(now_ms());
    if let Some(args) = args {
        (state.callback)(args);
    }
}

struct FrameState {
    batch: RefCell<FrameBatch>,
    handle: RefCell<Option<AnimationFrame>>,
    callback: Box<dyn Fn()>,
}

pub(crate) struct FrameScheduler {
    state: Rc<FrameState>,
}

impl FrameScheduler {
    pub(crate) fn new(callback: impl Fn() + 'static) -> Self {
        Self {
            state: Rc::new(FrameState {
                batch: RefCell::new(FrameBatch::new()),
                handle: RefCell::new(None),
                callback: Box::new(callback),
            }),
        }
    }

    pub(crate) fn request(&self) {
        if !self.state.batch.borrow_mut().request() {
            return;
        }

        let state = Rc::downgrade(&self.state);
        let handle = request_animation_frame(move |_timestamp| {
            let Some(state) = state.upgrade() else {
                return;
            };
            state.batch.borrow_mut().begin_frame();
            (state.callback)();
        });
        *self.state.handle.borrow_mut() = Some(handle);
    }

    pub(crate) fn cancel(&self) {
        self.state.handle.borrow_mut().take();
        self.state.batch.borrow_mut().begin_frame();
    }
}
