//! Run-scoped reporting collaborator.
//!
//! Passed explicitly through the pipeline instead of living as global state;
//! forwards to the `log` facade and counts warnings so the completion line
//! can say how many there were.

use log::{info, warn};

#[derive(Debug, Default)]
pub struct Reporter {
    warnings: usize,
}

impl Reporter {
    pub fn new() -> Self {
        Reporter::default()
    }

    pub fn info(&self, message: impl AsRef<str>) {
        info!("{}", message.as_ref());
    }

    pub fn warn(&mut self, message: impl AsRef<str>) {
        self.warnings += 1;
        warn!("{}", message.as_ref());
    }

    pub fn warning_count(&self) -> usize {
        self.warnings
    }
}
