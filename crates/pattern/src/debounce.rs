//! Poll-driven debouncing.
//!
//! There is no timer thread: the owner calls [`Debouncer::poll`] from its own event loop and
//! the pending request fires once the quiescence window has elapsed on the injected [`Clock`].

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Monotonic time source, as an offset from an arbitrary origin.
pub trait Clock {
    fn now(&self) -> Duration;
}

#[derive(Clone, Copy, Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// A clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<Duration>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    pub fn set(&self, now: Duration) {
        self.now.set(now);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

impl<C: Clock + ?Sized> Clock for Rc<C> {
    fn now(&self) -> Duration {
        (**self).now()
    }
}

#[derive(Debug)]
struct Pending<T> {
    payload: T,
    due: Duration,
    generation: u64,
}

/// At most one pending request. Scheduling replaces (and thereby cancels) the previous one;
/// a request fires at most once.
#[derive(Debug)]
pub struct Debouncer<T> {
    window: Duration,
    pending: Option<Pending<T>>,
    generation: u64,
}

impl<T> Debouncer<T> {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
            generation: 0,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Arm `payload` to fire one window after `now`. Returns the request's generation.
    pub fn schedule(&mut self, payload: T, now: Duration) -> u64 {
        self.generation += 1;
        if self.pending.is_some() {
            log::trace!(
                target: "pattern.validate",
                "request {} superseded by {}",
                self.generation - 1,
                self.generation
            );
        }
        self.pending = Some(Pending {
            payload,
            due: now + self.window,
            generation: self.generation,
        });
        self.generation
    }

    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|p| p.payload)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn due_at(&self) -> Option<Duration> {
        self.pending.as_ref().map(|p| p.due)
    }

    /// The pending payload and its generation, if its window has elapsed by `now`.
    pub fn poll(&mut self, now: Duration) -> Option<(T, u64)> {
        if self.pending.as_ref()?.due > now {
            return None;
        }
        self.pending.take().map(|p| (p.payload, p.generation))
    }
}
