use tracing::debug;

use crate::error::{ModelError, Result};
use crate::hyperparameters::OnlineHyperparameters;
use crate::model::ModelBase;
use crate::schedule::DecaySchedule;

/// Learning rates in effect for the current example
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rates {
    pub eta: f32,
    pub bias_eta: f32,
}

/// Base of every online learning rule.
///
/// Holds the hyperparameters and the iteration state. A rule calls
/// [`OnlineModel::advance`] once per example, before predicting, and uses
/// the returned rates for its update.
#[derive(Debug, Clone)]
pub struct OnlineModel {
    base: ModelBase,
    hp: OnlineHyperparameters,
    schedule: DecaySchedule,
    cur_iter_num: u64,
    eta: f32,
    bias_eta: f32,
}

impl OnlineModel {
    /// Create a new online model with default hyperparameters
    ///
    /// # Arguments
    ///
    /// * `class_num` - Number of classes the model separates
    /// * `type_name` - Name recorded in snapshots and summaries
    pub fn new(class_num: usize, type_name: impl Into<String>) -> Self {
        let hp = OnlineHyperparameters::default();
        OnlineModel {
            base: ModelBase::new(class_num, type_name),
            schedule: DecaySchedule::from_power_t(hp.power_t),
            cur_iter_num: hp.initial_t,
            eta: hp.eta0,
            bias_eta: hp.bias_eta0,
            hp,
        }
    }

    pub fn base(&self) -> &ModelBase {
        &self.base
    }

    pub fn base_mut(&mut self) -> &mut ModelBase {
        &mut self.base
    }

    pub fn hyperparameters(&self) -> &OnlineHyperparameters {
        &self.hp
    }

    pub fn schedule(&self) -> DecaySchedule {
        self.schedule
    }

    pub fn cur_iter_num(&self) -> u64 {
        self.cur_iter_num
    }

    pub fn dim(&self) -> usize {
        self.hp.dim
    }

    pub fn aggressive(&self) -> bool {
        self.hp.aggressive
    }

    /// Current weight learning rate
    pub fn eta(&self) -> f32 {
        self.eta
    }

    /// Current bias learning rate
    pub fn bias_eta(&self) -> f32 {
        self.bias_eta
    }

    pub fn rates(&self) -> Rates {
        Rates {
            eta: self.eta,
            bias_eta: self.bias_eta,
        }
    }

    /// Sets a parameter from its textual value.
    ///
    /// Names other than `power_t`, `eta`, `bias_eta`, `t`, `dim` and
    /// `aggressive` go to [`ModelBase::set_parameter`]. Values are
    /// validated before anything is assigned.
    pub fn set_parameter(&mut self, name: &str, value: &str) -> Result<()> {
        match name {
            "power_t" => self.set_power_t(parse_rate(name, value)?),
            "eta" => self.set_eta0(parse_rate(name, value)?),
            "bias_eta" => self.set_bias_eta0(parse_rate(name, value)?),
            "t" => {
                let t = parse_int(name, value)?;
                let t = u64::try_from(t)
                    .map_err(|_| ModelError::invalid(name, value, "must be >= 0"))?;
                self.set_initial_t(t);
                Ok(())
            }
            "dim" => {
                // negative dimensions never grow the model
                if let Ok(dim) = usize::try_from(parse_int(name, value)?) {
                    self.update_dim(dim);
                }
                Ok(())
            }
            "aggressive" => {
                self.set_aggressive(value == "true");
                Ok(())
            }
            _ => self.base.set_parameter(name, value),
        }
    }

    /// Sets the decay exponent and re-selects the schedule
    pub fn set_power_t(&mut self, power_t: f32) -> Result<()> {
        check_rate("power_t", power_t)?;
        self.hp.power_t = power_t;
        self.schedule = DecaySchedule::from_power_t(power_t);
        self.refresh_rates();
        debug!("power_t set to {}, schedule {:?}", power_t, self.schedule);
        Ok(())
    }

    pub fn set_eta0(&mut self, eta0: f32) -> Result<()> {
        check_rate("eta", eta0)?;
        self.hp.eta0 = eta0;
        self.refresh_rates();
        debug!("eta set to {}", eta0);
        Ok(())
    }

    pub fn set_bias_eta0(&mut self, bias_eta0: f32) -> Result<()> {
        check_rate("bias_eta", bias_eta0)?;
        self.hp.bias_eta0 = bias_eta0;
        self.refresh_rates();
        debug!("bias_eta set to {}", bias_eta0);
        Ok(())
    }

    /// Sets the starting iteration and resets the iteration counter to it
    pub fn set_initial_t(&mut self, initial_t: u64) {
        self.hp.initial_t = initial_t;
        self.cur_iter_num = initial_t;
        self.refresh_rates();
        debug!("iteration counter reset to {}", initial_t);
    }

    pub fn set_aggressive(&mut self, aggressive: bool) {
        self.hp.aggressive = aggressive;
    }

    /// Grows the feature dimension. Never shrinks.
    pub fn update_dim(&mut self, dim: usize) {
        if dim > self.hp.dim {
            self.hp.dim = dim;
        }
    }

    /// Per-example bookkeeping every rule runs before its own update:
    /// grows the dimension, counts the example and refreshes the rates
    /// for the new iteration.
    pub fn advance(&mut self, example_dim: usize) -> Rates {
        self.update_dim(example_dim);
        self.cur_iter_num += 1;
        self.refresh_rates();
        self.rates()
    }

    /// Recomputes the rates for the current iteration. Before the first
    /// example the base rates apply.
    pub(crate) fn refresh_rates(&mut self) {
        let coeff = if self.cur_iter_num == 0 {
            1.0
        } else {
            self.schedule.coefficient(self.cur_iter_num)
        };
        self.eta = self.hp.eta0 * coeff;
        self.bias_eta = self.hp.bias_eta0 * coeff;
    }
}

fn check_rate(name: &str, value: f32) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ModelError::invalid(name, &value.to_string(), "must be a finite number >= 0"))
    }
}

fn parse_rate(name: &str, value: &str) -> Result<f32> {
    value
        .trim()
        .parse::<f32>()
        .map_err(|e| ModelError::invalid(name, value, e.to_string()))
}

fn parse_int(name: &str, value: &str) -> Result<i64> {
    value
        .trim()
        .parse::<i64>()
        .map_err(|e| ModelError::invalid(name, value, e.to_string()))
}
