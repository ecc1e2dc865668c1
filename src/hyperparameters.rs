use serde::{Deserialize, Serialize};

/// Hyperparameters for an online model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OnlineHyperparameters {
    /// Base learning rate for the weights
    pub eta0: f32,

    /// Base learning rate for the bias term
    pub bias_eta0: f32,

    /// Decay exponent of the learning rate
    pub power_t: f32,

    /// Iteration count training starts from
    pub initial_t: u64,

    /// Feature dimension seen so far
    pub dim: usize,

    /// Aggressive updates, interpreted by the learning rule
    pub aggressive: bool,
}

impl Default for OnlineHyperparameters {
    fn default() -> Self {
        OnlineHyperparameters {
            eta0: 1.0,
            bias_eta0: 0.0,
            power_t: 0.5,
            initial_t: 0,
            dim: 1,
            aggressive: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_hyperparameters() {
        let hp = OnlineHyperparameters::default();

        assert_eq!(hp.eta0, 1.0);
        assert_eq!(hp.bias_eta0, 0.0);
        assert_eq!(hp.power_t, 0.5);
        assert_eq!(hp.initial_t, 0);
        assert_eq!(hp.dim, 1);
        assert!(hp.aggressive);
    }

    #[test]
    fn test_serde_roundtrip() {
        let hp = OnlineHyperparameters {
            eta0: 0.25,
            power_t: 1.0,
            initial_t: 12,
            aggressive: false,
            ..Default::default()
        };
        let json = serde_json::to_string(&hp).unwrap();
        assert!(json.contains("\"initial_t\":12"));

        let restored: OnlineHyperparameters = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, hp);
    }
}
