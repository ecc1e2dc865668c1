mod config;
mod data;
mod error;
mod hyperparameters;
mod learner;
mod model;
mod online;
mod progress;
mod schedule;
mod snapshot;
pub mod rules;

pub use config::ModelConfig;
pub use data::{DataPoint, DataStream, Label, MiniBatch, SyntheticStream, VecStream};
pub use error::{ModelError, Result};
pub use hyperparameters::OnlineHyperparameters;
pub use learner::{OnlineLearner, NEUTRAL_LABEL};
pub use model::{ModelBase, Norm};
pub use online::{OnlineModel, Rates};
pub use progress::{Progress, ProgressSink, TracingSink, TrainEvent};
pub use rules::Perceptron;
pub use schedule::DecaySchedule;
pub use snapshot::ONLINE_SECTION;
