//! Progress and message sinks for an import run.

use std::sync::{Mutex, PoisonError};
use tracing::{info, warn};

/// Receives stage labels and per-item failure messages, in order.
pub trait ImportObserver: Send + Sync {
    /// A stage boundary was passed.
    fn on_progress(&self, label: &str);

    /// An item failed without stopping the run.
    fn on_message(&self, message: &str);
}

/// Forwards everything to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl ImportObserver for TracingObserver {
    fn on_progress(&self, label: &str) {
        info!("{}", label);
    }

    fn on_message(&self, message: &str) {
        warn!("{}", message);
    }
}

/// Records everything it receives.
#[derive(Debug, Default)]
pub struct CollectingObserver {
    progress: Mutex<Vec<String>>,
    messages: Mutex<Vec<String>>,
}

impl CollectingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn progress(&self) -> Vec<String> {
        self.progress.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl ImportObserver for CollectingObserver {
    fn on_progress(&self, label: &str) {
        self.progress
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(label.to_string());
    }

    fn on_message(&self, message: &str) {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message.to_string());
    }
}
