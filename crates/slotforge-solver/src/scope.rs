//! Per-call solve scope.

use std::time::{Duration, Instant};

use slotforge_core::{Result, SlotForgeError};

use crate::termination::Termination;

/// State of a single solve call: start time, termination conditions and
/// augmentation counter.
///
/// A scope lives for one call only; nothing carries over between solves.
#[derive(Default)]
pub struct SolveScope<'a> {
    start_time: Option<Instant>,
    terminations: Vec<Box<dyn Termination + 'a>>,
    augmentation_count: u64,
}

impl<'a> SolveScope<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a termination condition. Any fired condition cancels the solve.
    pub fn with_termination(mut self, termination: impl Termination + 'a) -> Self {
        self.terminations.push(Box::new(termination));
        self
    }

    pub fn start_solving(&mut self) {
        self.start_time = Some(Instant::now());
        self.augmentation_count = 0;
    }

    pub fn elapsed(&self) -> Option<Duration> {
        self.start_time.map(|t| t.elapsed())
    }

    pub fn increment_augmentation_count(&mut self) -> u64 {
        self.augmentation_count += 1;
        self.augmentation_count
    }

    pub fn augmentation_count(&self) -> u64 {
        self.augmentation_count
    }

    pub fn should_terminate(&self) -> bool {
        self.terminations.iter().any(|t| t.is_terminated(self))
    }

    /// Fails with [`SlotForgeError::Cancelled`] if any condition has fired.
    pub fn check_termination(&self) -> Result<()> {
        if self.should_terminate() {
            Err(SlotForgeError::Cancelled)
        } else {
            Ok(())
        }
    }
}

impl std::fmt::Debug for SolveScope<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SolveScope")
            .field("start_time", &self.start_time)
            .field("terminations", &self.terminations)
            .field("augmentation_count", &self.augmentation_count)
            .finish()
    }
}
