//! Progress and warning channels.
//!
//! The pipeline never prints. Progress notices ("got id 12 for ...") and
//! per-item warnings ("failed to get id for ...") are handed to a
//! [`Reporter`]; the CLI decides where each channel goes.

use std::cell::RefCell;

pub trait Reporter {
    /// Normal progress output.
    fn progress(&self, message: &str);

    /// Non-fatal per-item failure.
    fn warning(&self, message: &str);
}

/// Discards everything.
pub struct Silent;

impl Reporter for Silent {
    fn progress(&self, _message: &str) {}
    fn warning(&self, _message: &str) {}
}

/// Keeps every message in memory, split by channel.
#[derive(Debug, Default)]
pub struct Collected {
    progress: RefCell<Vec<String>>,
    warnings: RefCell<Vec<String>>,
}

impl Collected {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.warnings.borrow().clone()
    }

    pub fn progress_messages(&self) -> Vec<String> {
        self.progress.borrow().clone()
    }
}

impl Reporter for Collected {
    fn progress(&self, message: &str) {
        self.progress.borrow_mut().push(message.to_string());
    }

    fn warning(&self, message: &str) {
        self.warnings.borrow_mut().push(message.to_string());
    }
}
