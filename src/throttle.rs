#[derive(Debug, PartialEq)]
pub enum Submission<A> {
    RunNow(A),
    /// Inside the interval: arguments are parked for a trailing call. Any
    /// previously scheduled trailing timer is superseded by one firing after
    /// `delay_ms`.
    Defer { delay_ms: f64 },
}

#[derive(Debug)]
pub struct Throttle<A> {
    interval_ms: f64,
    last_ran: Option<f64>,
    parked: Option<A>,
}

impl<A> Throttle<A> {
    pub fn new(interval_ms: f64) -> Self {
        Self {
            interval_ms: interval_ms.max(0.0),
            last_ran: None,
            parked: None,
        }
    }

    pub fn submit(&mut self, now: f64, args: A) -> Submission<A> {
        match self.last_ran {
            Some(last_ran) if now - last_ran < self.interval_ms => {
                self.parked = Some(args);
                Submission::Defer {
                    delay_ms: (self.interval_ms - (now - last_ran)).max(0.0),
                }
            }
            _ => {
                self.parked = None;
                self.last_ran = Some(now);
                Submission::RunNow(args)
            }
        }
    }

    pub fn fire(&mut self, now: f64) -> Option<A> {
        let args = self.parked.take()?;
        self.last_ran = Some(now);
        Some(args)
    }

    #[cfg(test)]
    fn has_pending(&self) -> bool {
        self.parked.is_some()
    }

    pub fn cancel(&mut self) {
        self.parked = None;
    }
}

#[derive(Debug, Default)]
pub struct FrameBatch {
    pending: bool,
}

impl FrameBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` when the caller should request a frame; further requests
    /// are no-ops until the frame begins.
    pub fn request(&mut self) -> bool {
        if self.pending {
            return false;
        }
        self.pending = true;
        true
    }

    pub fn begin_frame(&mut self) {
        self.pending = false;
    }

    #[cfg(test)]
    fn is_pending(&self) -> bool {
        self.pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_call_runs_immediately() {
        let mut throttle = Throttle::new(100.0);
        assert_eq!(throttle.submit(0.0, 1), Submission::RunNow(1));
        assert!(!throttle.has_pending());
    }

    #[test]
    fn burst_inside_interval_coalesces_to_latest_args() {
        let mut throttle = Throttle::new(100.0);
        assert_eq!(throttle.submit(0.0, "a"), Submission::RunNow("a"));
        assert_eq!(throttle.submit(10.0, "b"), Submission::Defer { delay_ms: 90.0 });
        assert_eq!(throttle.submit(40.0, "c"), Submission::Defer { delay_ms: 60.0 });

        assert_eq!(throttle.fire(100.0), Some("c"));
        assert_eq!(throttle.fire(100.0), None);
    }

    #[test]
    fn trailing_call_starts_a_new_interval() {
        let mut throttle = Throttle::new(100.0);
        throttle.submit(0.0, 1);
        throttle.submit(50.0, 2);
        assert_eq!(throttle.fire(100.0), Some(2));

        assert_eq!(throttle.submit(150.0, 3), Submission::Defer { delay_ms: 50.0 });
        assert_eq!(throttle.submit(200.0, 4), Submission::RunNow(4));
        assert!(!throttle.has_pending());
    }

    #[test]
    fn cancel_drops_parked_args() {
        let mut throttle = Throttle::new(100.0);
        throttle.submit(0.0, 1);
        throttle.submit(1.0, 2);
        throttle.cancel();
        assert_eq!(throttle.fire(100.0), None);
    }

    #[test]
    fn frame_batch_requests_once_per_frame() {
        let mut batch = FrameBatch::new();
        assert!(batch.request());
        assert!(!batch.request());
        assert!(!batch.request());
        batch.begin_frame();
        assert!(!batch.is_pending());
        assert!(batch.request());
    }
}
