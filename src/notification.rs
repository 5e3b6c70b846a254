pub const ENTER_DELAY_MS: u32 = 100;
pub const EXIT_ANIMATION_MS: u32 = 300;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
    Info,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Info => "info",
        }
    }

    pub fn class_name(self) -> String {
        format!("notification--{}", self.as_str())
    }

    pub fn background(self) -> &'static str {
        match self {
            Self::Success => "var(--color-success)",
            Self::Error => "var(--color-error)",
            Self::Info => "var(--color-info)",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ToastId(u64);

impl ToastId {
    pub fn value(self) -> u64 {
        self.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastPhase {
    Entering,
    Visible,
    Closing,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: ToastId,
    pub message: String,
    pub severity: Severity,
    pub created_at_ms: f64,
    pub phase: ToastPhase,
}

#[derive(Debug, Default)]
pub struct ToastSlot {
    next_id: u64,
    current: Option<Toast>,
}

impl ToastSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&Toast> {
        self.current.as_ref()
    }

    pub fn show(&mut self, message: impl Into<String>, severity: Severity, now_ms: f64) -> ToastId {
        self.next_id += 1;
        let id = ToastId(self.next_id);
        self.current = Some(Toast {
            id,
            message: message.into(),
            severity,
            created_at_ms: now_ms,
            phase: ToastPhase::Entering,
        });
        id
    }

    pub fn mark_visible(&mut self, id: ToastId) -> bool {
        match self.live_mut(id) {
            Some(toast) if toast.phase == ToastPhase::Entering => {
                toast.phase = ToastPhase::Visible;
                true
            }
            _ => false,
        }
    }

    /// Starts the exit animation. Returns `false` if `id` is no longer live
    /// or is already closing.
    pub fn begin_close(&mut self, id: ToastId) -> bool {
        match self.live_mut(id) {
            Some(toast) if toast.phase != ToastPhase::Closing => {
                toast.phase = ToastPhase::Closing;
                true
            }
            _ => false,
        }
    }

    pub fn detach(&mut self, id: ToastId) -> bool {
        if self.live_mut(id).is_none() {
            return false;
        }
        self.current = None;
        true
    }

    fn live_mut(&mut self, id: ToastId) -> Option<&mut Toast> {
        self.current.as_mut().filter(|toast| toast.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_show_replaces_first() {
        let mut slot = ToastSlot::new();
        let first = slot.show("first", Severity::Info, 0.0);
        let second = slot.show("second", Severity::Error, 10.0);

        assert_ne!(first, second);
        let current = slot.current().expect("one toast");
        assert_eq!(current.message, "second");
        assert_eq!(current.severity, Severity::Error);
    }

    #[test]
    fn stale_timers_do_not_touch_replacement() {
        let mut slot = ToastSlot::new();
        let first = slot.show("first", Severity::Info, 0.0);
        let second = slot.show("second", Severity::Success, 1.0);

        assert!(!slot.mark_visible(first));
        assert!(!slot.begin_close(first));
        assert!(!slot.detach(first));
        assert_eq!(slot.current().map(|toast| toast.id), Some(second));
    }

    #[test]
    fn close_is_idempotent() {
        let mut slot = ToastSlot::new();
        let id = slot.show("hello", Severity::Success, 0.0);

        assert!(slot.mark_visible(id));
        assert!(slot.begin_close(id));
        assert!(!slot.begin_close(id));
        assert!(slot.detach(id));
        assert!(!slot.detach(id));
        assert!(!slot.begin_close(id));
        assert!(slot.current().is_none());
    }

    #[test]
    fn severity_classes() {
        assert_eq!(Severity::Error.class_name(), "notification--error");
        assert_eq!(Severity::Success.background(), "var(--color-success)");
    }
}
