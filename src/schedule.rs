//! Power-law learning rate decay

/// Coefficient function of (iteration, exponent), selected once per
/// `power_t` change.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DecaySchedule {
    /// `power_t == 0`
    Const,
    /// `power_t == 0.5`
    #[default]
    Sqrt,
    /// `power_t == 1`
    Linear,
    /// Any other exponent
    General(f32),
}

impl DecaySchedule {
    /// Pick the variant for an exponent. Fast paths match exactly.
    pub fn from_power_t(power_t: f32) -> Self {
        if power_t == 0.0 {
            DecaySchedule::Const
        } else if power_t == 0.5 {
            DecaySchedule::Sqrt
        } else if power_t == 1.0 {
            DecaySchedule::Linear
        } else {
            DecaySchedule::General(power_t)
        }
    }

    /// Evaluates `iter ^ power_t`
    pub fn eval(&self, iter: u64) -> f32 {
        match self {
            DecaySchedule::Const => 1.0,
            DecaySchedule::Sqrt => (iter as f32).sqrt(),
            DecaySchedule::Linear => iter as f32,
            DecaySchedule::General(power_t) => (iter as f32).powf(*power_t),
        }
    }

    /// Learning rate multiplier at `iter`, i.e. `1 / eval(iter)`
    pub fn coefficient(&self, iter: u64) -> f32 {
        1.0 / self.eval(iter)
    }
}
