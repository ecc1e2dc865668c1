use std::borrow::Cow;

use tracing::{debug, info};

use crate::data::{DataPoint, DataStream, Label};
use crate::online::OnlineModel;
use crate::progress::{Progress, ProgressSink, TrainEvent};

/// Label returned by a model that does not predict anything
pub const NEUTRAL_LABEL: Label = 0;

/// An online learning rule built on [`OnlineModel`]
pub trait OnlineLearner {
    fn model(&self) -> &OnlineModel;

    fn model_mut(&mut self) -> &mut OnlineModel;

    /// Predicts a label for one example and updates on it.
    ///
    /// Implementations call [`OnlineModel::advance`] first and use the
    /// returned rates. `scores` holds one slot per scorer
    /// (`ModelBase::clf_num`) for the rule to fill.
    fn iterate(&mut self, x: &DataPoint, scores: &mut [f32]) -> Label;

    /// Prepares an example before `iterate`. Defaults to the base model's
    /// normalization.
    fn preprocess<'a>(&self, x: &'a DataPoint) -> Cow<'a, DataPoint> {
        self.model().base().preprocess(x)
    }

    fn begin_train(&mut self) {}

    fn end_train(&mut self) {}

    /// Human readable description printed when training starts
    fn summary(&self) -> String {
        self.model().summary()
    }

    /// Runs one pass over `stream`, reporting progress to `sink`.
    ///
    /// Returns the mistake rate over all processed examples, `0.0` for an
    /// empty stream.
    fn train<S>(&mut self, stream: &mut S, sink: &mut dyn ProgressSink) -> f32
    where
        S: DataStream + ?Sized,
        Self: Sized,
    {
        sink.on_event(TrainEvent::Started {
            summary: self.summary(),
        });
        self.begin_train();
        info!("training {} model", self.model().base().type_name());

        let mut scores = vec![0.0f32; self.model().base().clf_num()];
        let mut mistakes: u64 = 0;
        let mut processed: u64 = 0;
        let mut show_count: u64 = 2;

        while let Some(batch) = stream.next_batch() {
            for point in batch {
                let x = self.preprocess(point);
                let label = self.iterate(&x, &mut scores);
                if label != x.label {
                    mistakes += 1;
                }
                processed += 1;

                if processed >= show_count {
                    sink.on_event(TrainEvent::Checkpoint(Progress {
                        processed,
                        mistakes,
                        update_num: self.model().base().update_num(),
                    }));
                    show_count <<= 1;
                }
            }
        }

        let progress = Progress {
            processed,
            mistakes,
            update_num: self.model().base().update_num(),
        };
        debug!("stream exhausted after {} examples", processed);
        sink.on_event(TrainEvent::Finished(progress));
        self.end_train();
        info!(
            "training finished: {} examples, mistake rate {}",
            processed,
            progress.formatted_rate()
        );

        progress.mistake_rate()
    }
}

/// The bare model only runs the bookkeeping step and predicts the
/// neutral label.
impl OnlineLearner for OnlineModel {
    fn model(&self) -> &OnlineModel {
        self
    }

    fn model_mut(&mut self) -> &mut OnlineModel {
        self
    }

    fn iterate(&mut self, x: &DataPoint, _scores: &mut [f32]) -> Label {
        self.advance(x.dim());
        NEUTRAL_LABEL
    }
}
