use ndarray::{s, Array1};

use crate::data::{DataPoint, Label};
use crate::learner::OnlineLearner;
use crate::online::OnlineModel;

/// Binary perceptron with a bias term over labels `1` and `-1`.
///
/// Updates on every mistake. When `aggressive` is set it also updates on
/// a correct prediction with zero margin.
#[derive(Debug, Clone)]
pub struct Perceptron {
    model: OnlineModel,
    weights: Array1<f32>,
    bias: f32,
}

impl Perceptron {
    pub fn new() -> Self {
        let model = OnlineModel::new(2, "perceptron");
        let weights = Array1::zeros(model.dim());
        Perceptron {
            model,
            weights,
            bias: 0.0,
        }
    }

    pub fn weights(&self) -> &Array1<f32> {
        &self.weights
    }

    pub fn bias(&self) -> f32 {
        self.bias
    }

    pub fn score(&self, x: &DataPoint) -> f32 {
        let n = x.dim().min(self.weights.len());
        self.weights.slice(s![..n]).dot(&x.features.slice(s![..n])) + self.bias
    }

    fn grow(&mut self, dim: usize) {
        let old = self.weights.len();
        if dim > old {
            let mut weights = Array1::zeros(dim);
            weights.slice_mut(s![..old]).assign(&self.weights);
            self.weights = weights;
        }
    }
}

impl Default for Perceptron {
    fn default() -> Self {
        Self::new()
    }
}

impl OnlineLearner for Perceptron {
    fn model(&self) -> &OnlineModel {
        &self.model
    }

    fn model_mut(&mut self) -> &mut OnlineModel {
        &mut self.model
    }

    fn iterate(&mut self, x: &DataPoint, scores: &mut [f32]) -> Label {
        let rates = self.model.advance(x.dim());
        self.grow(self.model.dim());

        let score = self.score(x);
        if let Some(slot) = scores.first_mut() {
            *slot = score;
        }
        let predicted: Label = if score >= 0.0 { 1 } else { -1 };

        let y = if x.label > 0 { 1.0 } else { -1.0 };
        let margin = y * score;
        let wrong = predicted != x.label;
        if wrong || (self.model.aggressive() && margin <= 0.0) {
            let n = x.dim();
            self.weights
                .slice_mut(s![..n])
                .scaled_add(rates.eta * y, &x.features);
            self.bias += rates.bias_eta * y;
            self.model.base_mut().inc_update_num();
        }

        predicted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_updates_on_mistake() {
        let mut p = Perceptron::new();
        p.model_mut().set_parameter("aggressive", "false").unwrap();
        p.model_mut().set_parameter("bias_eta", "1").unwrap();
        let mut scores = [0.0f32];

        // zero weights score 0 and predict 1: a mistake for label -1
        let x = DataPoint::new(vec![1.0, 2.0], -1);
        assert_eq!(p.iterate(&x, &mut scores), 1);
        assert_eq!(p.weights().to_vec(), vec![-1.0, -2.0]);
        assert_eq!(p.bias(), -1.0);
        assert_eq!(p.model().base().update_num(), 1);

        // second step has eta = 1/sqrt(2) but no mistake
        assert_eq!(p.iterate(&x, &mut scores), -1);
        assert!(scores[0] < 0.0);
        assert_eq!(p.model().base().update_num(), 1);
        assert_eq!(p.model().cur_iter_num(), 2);
    }

    #[test]
    fn test_aggressive_updates_on_zero_margin() {
        let mut p = Perceptron::new();
        let mut scores = [0.0f32];
        let x = DataPoint::new(vec![1.0], 1);

        assert_eq!(p.iterate(&x, &mut scores), 1);
        assert_eq!(p.model().base().update_num(), 1);
        assert_eq!(p.weights()[0], 1.0);
    }

    #[test]
    fn test_weights_grow_with_dim() {
        let mut p = Perceptron::new();
        let mut scores = [0.0f32];
        p.iterate(&DataPoint::new(vec![1.0], -1), &mut scores);
        p.iterate(&DataPoint::new(vec![1.0, 1.0, 1.0], 1), &mut scores);
        assert_eq!(p.weights().len(), 3);
        assert_eq!(p.model().dim(), 3);

        // narrower examples still score against the leading weights
        p.iterate(&DataPoint::new(vec![1.0], 1), &mut scores);
        assert_eq!(p.weights().len(), 3);
    }
}
