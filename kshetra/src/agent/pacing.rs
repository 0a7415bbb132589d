//! Step pacing strategies.

use std::fmt;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Called by a runner after every physical step.
pub trait Pacer: Send + Sync + fmt::Debug {
    fn pause(&self);
}

/// Run as fast as possible.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoPacing;

impl Pacer for NoPacing {
    fn pause(&self) {}
}

/// Sleep a fixed delay per step, for watching a run live.
#[derive(Clone, Copy, Debug)]
pub struct FixedDelay(pub Duration);

impl Pacer for FixedDelay {
    fn pause(&self) {
        thread::sleep(self.0);
    }
}

/// `NoPacing` for a zero delay, `FixedDelay` otherwise.
pub fn pacer_for(delay: Duration) -> Arc<dyn Pacer> {
    if delay.is_zero() {
        Arc::new(NoPacing)
    } else {
        Arc::new(FixedDelay(delay))
    }
}
