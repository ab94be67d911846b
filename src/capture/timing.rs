//! Per-stage timings of one capture session, logged at debug level once the
//! session is over.

use std::fmt;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::image_pipeline::channel::Channel;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Stage {
    Capture,
    Decode,
    Isolate,
    Composite,
    Persist,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Capture => "capture",
            Stage::Decode => "decode",
            Stage::Isolate => "isolate",
            Stage::Composite => "composite",
            Stage::Persist => "persist",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy)]
struct StepTiming {
    stage: Stage,
    /// `None` for stages that work on all three exposures at once
    channel: Option<Channel>,
    duration: Duration,
}

#[derive(Debug, Default)]
pub(crate) struct SessionTimings {
    steps: Vec<StepTiming>,
}

impl SessionTimings {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Starts timing `stage` for `channel`; hand the timer back to [`record`].
    ///
    /// [`record`]: SessionTimings::record
    pub(crate) fn start(&self, stage: Stage, channel: Option<Channel>) -> Timer {
        Timer {
            stage,
            channel,
            start: Instant::now(),
        }
    }

    pub(crate) fn record(&mut self, timer: Timer) {
        self.steps.push(StepTiming {
            stage: timer.stage,
            channel: timer.channel,
            duration: timer.start.elapsed(),
        });
    }

    fn total(&self) -> Duration {
        self.steps.iter().map(|s| s.duration).sum()
    }

    /// Time spent in `stage` over all channels.
    fn stage_total(&self, stage: Stage) -> Duration {
        self.steps
            .iter()
            .filter(|s| s.stage == stage)
            .map(|s| s.duration)
            .sum()
    }

    pub(crate) fn log_summary(&self) {
        let total = self.total();
        for step in &self.steps {
            debug!(
                stage = %step.stage,
                channel = step.channel.map(|c| c.to_string()).unwrap_or_default(),
                elapsed_ms = step.duration.as_secs_f64() * 1000.0,
                "session step"
            );
        }
        let decode = self.stage_total(Stage::Decode);
        debug!(
            steps = self.steps.len(),
            total_ms = total.as_secs_f64() * 1000.0,
            decode_ms = decode.as_secs_f64() * 1000.0,
            "session timings"
        );
    }
}

/// Running measurement for one stage, obtained from [`SessionTimings::start`].
#[derive(Debug)]
pub(crate) struct Timer {
    stage: Stage,
    channel: Option<Channel>,
    start: Instant,
}
