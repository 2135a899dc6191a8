//! Debounce scheduling for validation runs.
//!
//! A [`Debouncer`] holds at most one pending call. Each new call
//! replaces the pending one and restarts the wait, so only the most
//! recent arguments are ever delivered, and only once the caller has
//! been quiet for the whole wait. There are no threads: the host event
//! loop polls the debouncer and runs the work itself.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Wait used for validation while typing.
pub const DEFAULT_WAIT: Duration = Duration::from_millis(200);

/// Source of the current time.
pub trait Clock {
    fn now(&self) -> Instant;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Clock that only moves when told to. Clones share the same time.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Rc<Cell<Instant>>,
}

impl ManualClock {
    #[must_use]
    pub fn new() -> Self {
        Self {
            now: Rc::new(Cell::new(Instant::now())),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }
}

/// Identifies one scheduled call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket(u64);

#[derive(Debug)]
struct Pending<A> {
    deadline: Instant,
    args: A,
    ticket: Ticket,
}

/// Delay-and-coalesce gate holding the latest arguments.
#[derive(Debug)]
pub struct Debouncer<A, C = SystemClock> {
    wait: Duration,
    clock: C,
    pending: Option<Pending<A>>,
    issued: u64,
}

impl<A> Debouncer<A> {
    #[must_use]
    pub const fn new(wait: Duration) -> Self {
        Self::with_clock(wait, SystemClock)
    }
}

impl<A, C: Clock> Debouncer<A, C> {
    #[must_use]
    pub const fn with_clock(wait: Duration, clock: C) -> Self {
        Self {
            wait,
            clock,
            pending: None,
            issued: 0,
        }
    }

    #[must_use]
    pub const fn wait(&self) -> Duration {
        self.wait
    }

    #[must_use]
    pub const fn clock(&self) -> &C {
        &self.clock
    }

    /// Schedule `args` to be due `wait` from now, discarding any call
    /// still pending.
    pub fn call(&mut self, args: A) -> Ticket {
        self.issued += 1;
        let ticket = Ticket(self.issued);
        let pending = Pending {
            deadline: self.clock.now() + self.wait,
            args,
            ticket,
        };
        match self.pending.replace(pending) {
            Some(previous) => tracing::trace!(
                replaced = previous.ticket.0,
                ticket = ticket.0,
                "debounce: pending call replaced"
            ),
            None => tracing::trace!(ticket = ticket.0, "debounce: call scheduled"),
        }
        ticket
    }

    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Whether `ticket` is the call currently waiting to fire.
    #[must_use]
    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.pending.as_ref().is_some_and(|p| p.ticket == ticket)
    }

    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.deadline)
    }

    /// Time left before the pending call is due, zero if overdue.
    #[must_use]
    pub fn time_until_due(&self) -> Option<Duration> {
        let now = self.clock.now();
        self.deadline()
            .map(|deadline| deadline.saturating_duration_since(now))
    }

    /// Take the pending arguments if their deadline has passed.
    pub fn take_due(&mut self) -> Option<A> {
        if self.pending.as_ref()?.deadline > self.clock.now() {
            return None;
        }
        let pending = self.pending.take()?;
        tracing::trace!(ticket = pending.ticket.0, "debounce: call fired");
        Some(pending.args)
    }
}

/// A function wrapped in a [`Debouncer`].
pub struct Debounced<A, F, C = SystemClock> {
    debouncer: Debouncer<A, C>,
    f: F,
}

impl<A, F, C> Debounced<A, F, C>
where
    F: FnMut(A),
    C: Clock,
{
    /// Schedule `f(args)`, replacing any call not yet fired.
    pub fn call(&mut self, args: A) -> Ticket {
        self.debouncer.call(args)
    }

    /// Run `f` if the pending call is due. Returns whether it ran.
    pub fn poll(&mut self) -> bool {
        self.debouncer.take_due().is_some_and(|args| {
            (self.f)(args);
            true
        })
    }

    #[must_use]
    pub const fn debouncer(&self) -> &Debouncer<A, C> {
        &self.debouncer
    }
}

/// Wrap `f` so that bursts of calls collapse into one call with the
/// last arguments, `wait` after the burst ends.
pub const fn debounce<A, F: FnMut(A)>(wait: Duration, f: F) -> Debounced<A, F> {
    debounce_with_clock(wait, SystemClock, f)
}

/// [`debounce`] with an explicit clock.
pub const fn debounce_with_clock<A, F, C>(wait: Duration, clock: C, f: F) -> Debounced<A, F, C>
where
    F: FnMut(A),
    C: Clock,
{
    Debounced {
        debouncer: Debouncer::with_clock(wait, clock),
        f,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_due_before_wait() {
        let clock = ManualClock::new();
        let mut debouncer = Debouncer::with_clock(Duration::from_millis(100), clock.clone());
        debouncer.call(1);
        clock.advance(Duration::from_millis(99));
        assert_eq!(debouncer.take_due(), None);
        clock.advance(Duration::from_millis(1));
        assert_eq!(debouncer.take_due(), Some(1));
        assert_eq!(debouncer.take_due(), None);
    }

    #[test]
    fn new_call_replaces_ticket() {
        let mut debouncer = Debouncer::with_clock(DEFAULT_WAIT, ManualClock::new());
        let first = debouncer.call("a");
        let second = debouncer.call("b");
        assert!(!debouncer.is_current(first));
        assert!(debouncer.is_current(second));
    }

    #[test]
    fn time_until_due_saturates() {
        let clock = ManualClock::new();
        let mut debouncer = Debouncer::with_clock(Duration::from_millis(10), clock.clone());
        assert_eq!(debouncer.time_until_due(), None);
        debouncer.call(());
        clock.advance(Duration::from_millis(50));
        assert_eq!(debouncer.time_until_due(), Some(Duration::ZERO));
    }
}
