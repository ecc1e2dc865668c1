//! Structured progress events emitted by the training loop

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::info;

/// Running totals at a point of the training loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Progress {
    /// Examples processed so far
    pub processed: u64,
    /// Examples whose predicted label was wrong
    pub mistakes: u64,
    /// Updates performed by the learning rule
    pub update_num: u64,
}

impl Progress {
    /// Fraction of processed examples that were mispredicted. Zero when
    /// nothing has been processed.
    pub fn mistake_rate(&self) -> f32 {
        if self.processed == 0 {
            return 0.0;
        }
        (self.mistakes as f64 / self.processed as f64) as f32
    }

    /// Mistake rate with 6 decimal digits
    pub fn formatted_rate(&self) -> String {
        format!("{:.6}", self.mistake_rate())
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t\t\t{}\t\t{}",
            self.processed,
            self.formatted_rate(),
            self.update_num
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TrainEvent {
    /// Training is about to start
    Started { summary: String },
    /// Emitted when the processed count reaches 2, 4, 8, ...
    Checkpoint(Progress),
    /// The stream is exhausted
    Finished(Progress),
}

/// Consumer of training events
pub trait ProgressSink {
    fn on_event(&mut self, event: TrainEvent);
}

impl ProgressSink for Vec<TrainEvent> {
    fn on_event(&mut self, event: TrainEvent) {
        self.push(event);
    }
}

/// Renders training events as a table through `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl ProgressSink for TracingSink {
    fn on_event(&mut self, event: TrainEvent) {
        match event {
            TrainEvent::Started { summary } => {
                info!("Model Information:\n{}", summary);
                info!("Training Process....");
                info!("Iterate No.\t\tError Rate\t\tUpdate No.");
            }
            TrainEvent::Checkpoint(progress) | TrainEvent::Finished(progress) => {
                info!("{}", progress);
            }
        }
    }
}
