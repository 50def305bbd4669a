use std::time::Instant;

/// Monotonic time source for position bookkeeping and progress cadence.
///
/// Abstracted so tests can drive the engine and reporter with a manual
/// clock instead of real sleeps.
pub trait Clock {
    fn now(&self) -> Instant;
}

/// Default clock backed by `Instant::now`.
#[derive(Debug, Default, Clone, Copy)]
pub struct MonotonicClock;

impl Clock for MonotonicClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}
