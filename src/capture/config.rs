//! Sequencer configuration types

use std::time::Duration;

/// How long a terminal state is shown before returning to ready.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(500);

/// Configuration for the capture sequencer
#[derive(Debug, Clone)]
pub struct SequencerConfig {
    /// Time spent in Done/Error before the automatic reset to Ready
    pub settle_delay: Duration,
}

impl Default for SequencerConfig {
    fn default() -> Self {
        Self {
            settle_delay: DEFAULT_SETTLE_DELAY,
        }
    }
}

impl SequencerConfig {
    pub fn builder() -> SequencerConfigBuilder {
        SequencerConfigBuilder::default()
    }
}

/// Builder for SequencerConfig
#[derive(Default)]
pub struct SequencerConfigBuilder {
    settle_delay: Option<Duration>,
}

impl SequencerConfigBuilder {
    pub fn settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = Some(delay);
        self
    }

    pub fn build(self) -> SequencerConfig {
        let default = SequencerConfig::default();
        SequencerConfig {
            settle_delay: self.settle_delay.unwrap_or(default.settle_delay),
        }
    }
}
