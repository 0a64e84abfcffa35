use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Asked before every capture cycle; `true` ends the run.
pub trait StopSignal {
    fn should_stop(&self) -> bool;
}

/// Shareable stop switch, e.g. flipped by an interrupt handler.
#[derive(Debug, Clone, Default)]
pub struct StopFlag(Arc<AtomicBool>);

impl StopFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trigger(&self) {
        self.0.store(true, Ordering::SeqCst);
    }
}

impl StopSignal for StopFlag {
    fn should_stop(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Stops after a fixed number of checks.
#[derive(Debug)]
pub struct CycleLimit {
    remaining: std::cell::Cell<u64>,
}

impl CycleLimit {
    pub fn new(cycles: u64) -> Self {
        Self {
            remaining: std::cell::Cell::new(cycles),
        }
    }
}

impl StopSignal for CycleLimit {
    fn should_stop(&self) -> bool {
        match self.remaining.get() {
            0 => true,
            n => {
                self.remaining.set(n - 1);
                false
            }
        }
    }
}
