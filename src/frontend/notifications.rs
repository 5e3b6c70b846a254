use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gloo::timers::callback::Timeout;
use web_sys::MouseEvent;
use yew::prelude::*;

use super::dom::now_ms;
use crate::notification::{Severity, Toast, ToastId, ToastPhase, ToastSlot, ENTER_DELAY_MS, EXIT_ANIMATION_MS};

pub(crate) const HOST_ELEMENT_ID: &str = "notification-root";

#[derive(Default)]
struct ToastTimers {
    enter: Option<Timeout>,
    dismiss: Option<Timeout>,
    exit: Option<Timeout>,
}

struct NotifierInner {
    slot: RefCell<ToastSlot>,
    timers: RefCell<ToastTimers>,
    render: RefCell<Option<Callback<Option<Toast>>>>,
    duration_ms: u32,
}

#[derive(Clone)]
pub(crate) struct Notifier {
    inner: Rc<NotifierInner>,
}

impl PartialEq for Notifier {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Notifier {
    pub(crate) fn new(duration_ms: u32) -> Self {
        Self {
            inner: Rc::new(NotifierInner {
                slot: RefCell::new(ToastSlot::new()),
                timers: RefCell::new(ToastTimers::default()),
                render: RefCell::new(None),
                duration_ms,
            }),
        }
    }

    pub(crate) fn show(&self, message: impl Into<String>, severity: Severity) -> ToastId {
        let id = self.inner.slot.borrow_mut().show(message, severity, now_ms());
        self.render();

        let weak = Rc::downgrade(&self.inner);
        let enter = Timeout::new(ENTER_DELAY_MS, move || {
            with_notifier(&weak, |notifier| {
                if notifier.inner.slot.borrow_mut().mark_visible(id) {
                    notifier.render();
                }
            });
        });

        let weak = Rc::downgrade(&self.inner);
        let dismiss = Timeout::new(self.inner.duration_ms, move || {
            with_notifier(&weak, |notifier| notifier.close(id));
        });

        // Dropping the previous toast's timers cancels them.
        *self.inner.timers.borrow_mut() = ToastTimers {
            enter: Some(enter),
            dismiss: Some(dismiss),
            exit: None,
        };
        id
    }

    /// Animates the toast out, then detaches it. Repeated calls and calls for
    /// a toast that was already replaced are no-ops.
    pub(crate) fn close(&self, id: ToastId) {
        if !self.inner.slot.borrow_mut().begin_close(id) {
            return;
        }
        self.render();

        let weak = Rc::downgrade(&self.inner);
        let exit = Timeout::new(EXIT_ANIMATION_MS, move || {
            with_notifier(&weak, |notifier| {
                if notifier.inner.slot.borrow_mut().detach(id) {
                    notifier.render();
                }
            });
        });
        self.inner.timers.borrow_mut().exit = Some(exit);
    }

    pub(crate) fn current(&self) -> Option<Toast> {
        self.inner.slot.borrow().current().cloned()
    }

    fn attach(&self, render: Callback<Option<Toast>>) {
        render.emit(self.current());
        *self.inner.render.borrow_mut() = Some(render);
    }

    fn detach(&self) {
        self.inner.render.borrow_mut().take();
    }

    pub(crate) fn teardown(&self) {
        self.detach();
        *self.inner.timers.borrow_mut() = ToastTimers::default();
    }

    fn render(&self) {
        let snapshot = self.current();
        if let Some(render) = self.inner.render.borrow().as_ref() {
            render.emit(snapshot);
        }
    }
}

fn with_notifier(inner: &Weak<NotifierInner>, f: impl FnOnce(&Notifier)) {
    if let Some(inner) = inner.upgrade() {
        f(&Notifier { inner });
    }
}

fn toast_style(toast: &Toast) -> String {
    let offset = if toast.phase == ToastPhase::Visible { "0" } else { "100%" };
    format!(
        "position: fixed; top: 100px; right: 20px; background: {}; color: white; \
         padding: 16px 20px; border-radius: 8px; box-shadow: 0 4px 12px rgba(0,0,0,0.15); \
         z-index: 1001; transform: translateX({offset}); transition: transform 0.3s ease; \
         max-width: 400px; font-weight: 500;",
        toast.severity.background(),
    )
}

#[derive(Properties, PartialEq)]
pub(crate) struct NotificationHostProps {
    pub notifier: Notifier,
}

#[function_component(NotificationHost)]
pub(crate) fn notification_host(props: &NotificationHostProps) -> Html {
    let toast = use_state(|| None::<Toast>);

    {
        let toast = toast.clone();
        use_effect_with(props.notifier.clone(), move |notifier| {
            notifier.attach(Callback::from(move |next: Option<Toast>| toast.set(next)));
            let notifier = notifier.clone();
            move || notifier.detach()
        });
    }

    let Some(current) = (*toast).clone() else {
        return html! {};
    };

    let on_close = {
        let notifier = props.notifier.clone();
        let id = current.id;
        Callback::from(move |_: MouseEvent| notifier.close(id))
    };

    html! {
        <div
            key={current.id.value().to_string()}
            class={classes!("notification", current.severity.class_name())}
            role={if current.severity == Severity::Error { "alert" } else { "status" }}
            style={toast_style(&current)}
        >
            <div class="notification__content">
                <span class="notification__message">{current.message.clone()}</span>
                <button
                    class="notification__close"
                    type="button"
                    aria-label="Close notification"
                    onclick={on_close}
                >
                    {"×"}
                </button>
            </div>
        </div>
    }
}
