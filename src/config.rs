use std::time::Duration;

use crate::schedule::DEFAULT_WAIT;
use crate::theme::ThemeMode;

/// Settings for an editing [`Session`](crate::Session).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// Quiet period before validation runs.
    pub wait: Duration,
    pub mode: ThemeMode,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            wait: DEFAULT_WAIT,
            mode: ThemeMode::default(),
        }
    }
}

impl SessionConfig {
    #[must_use]
    pub const fn with_wait(mut self, wait: Duration) -> Self {
        self.wait = wait;
        self
    }

    #[must_use]
    pub const fn with_mode(mut self, mode: ThemeMode) -> Self {
        self.mode = mode;
        self
    }
}
