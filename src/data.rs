//! Labeled examples and the streams that supply them.

use std::ops::Index;

use ndarray::Array1;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;

pub type Label = i32;

/// A labeled, dense feature vector
#[derive(Debug, Clone, PartialEq)]
pub struct DataPoint {
    pub features: Array1<f32>,
    pub label: Label,
}

impl DataPoint {
    pub fn new(features: Vec<f32>, label: Label) -> Self {
        DataPoint {
            features: Array1::from_vec(features),
            label,
        }
    }

    pub fn dim(&self) -> usize {
        self.features.len()
    }
}

/// An ordered group of examples handed out by one pull
#[derive(Debug, Clone, Default)]
pub struct MiniBatch {
    points: Vec<DataPoint>,
}

impl MiniBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DataPoint> {
        self.points.iter()
    }

    pub fn push(&mut self, point: DataPoint) {
        self.points.push(point);
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }
}

impl Index<usize> for MiniBatch {
    type Output = DataPoint;

    fn index(&self, index: usize) -> &DataPoint {
        &self.points[index]
    }
}

impl<'a> IntoIterator for &'a MiniBatch {
    type Item = &'a DataPoint;
    type IntoIter = std::slice::Iter<'a, DataPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

/// Pull-based source of mini-batches.
///
/// The returned batch borrows the stream, so it is released before the
/// next pull. Implementations may reuse the batch storage between pulls.
pub trait DataStream {
    /// Next batch, or `None` once the stream is exhausted
    fn next_batch(&mut self) -> Option<&MiniBatch>;
}

/// In-memory stream over a fixed set of examples
#[derive(Debug, Clone)]
pub struct VecStream {
    data: Vec<DataPoint>,
    order: Vec<usize>,
    batch_size: usize,
    cursor: usize,
    batch: MiniBatch,
    rng: Option<fastrand::Rng>,
}

impl VecStream {
    pub fn new(data: Vec<DataPoint>, batch_size: usize) -> Self {
        let order = (0..data.len()).collect();
        VecStream {
            data,
            order,
            batch_size: batch_size.max(1),
            cursor: 0,
            batch: MiniBatch::new(),
            rng: None,
        }
    }

    /// Visit the examples in a seeded random order, reshuffled on every
    /// [`VecStream::reset`].
    pub fn with_shuffle(mut self, seed: u64) -> Self {
        let mut rng = fastrand::Rng::with_seed(seed);
        rng.shuffle(&mut self.order);
        self.rng = Some(rng);
        self
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Rewind for another pass
    pub fn reset(&mut self) {
        self.cursor = 0;
        if let Some(rng) = self.rng.as_mut() {
            rng.shuffle(&mut self.order);
        }
    }
}

impl DataStream for VecStream {
    fn next_batch(&mut self) -> Option<&MiniBatch> {
        if self.cursor >= self.order.len() {
            return None;
        }
        let end = (self.cursor + self.batch_size).min(self.order.len());

        self.batch.clear();
        for &i in &self.order[self.cursor..end] {
            self.batch.push(self.data[i].clone());
        }
        self.cursor = end;
        Some(&self.batch)
    }
}

/// Seeded generator of two Gaussian clusters centred at `+separation`
/// and `-separation` on every axis, labelled `1` and `-1`.
#[derive(Debug, Clone)]
pub struct SyntheticStream {
    rng: StdRng,
    dim: usize,
    separation: f32,
    noise: f32,
    batch_size: usize,
    remaining: usize,
    batch: MiniBatch,
}

impl SyntheticStream {
    pub fn new(dim: usize, len: usize, batch_size: usize, seed: u64) -> Self {
        SyntheticStream {
            rng: StdRng::seed_from_u64(seed),
            dim,
            separation: 1.0,
            noise: 1.0,
            batch_size: batch_size.max(1),
            remaining: len,
            batch: MiniBatch::new(),
        }
    }

    pub fn with_separation(mut self, separation: f32) -> Self {
        self.separation = separation;
        self
    }

    /// Standard deviation of the per-feature noise
    pub fn with_noise(mut self, noise: f32) -> Self {
        self.noise = noise;
        self
    }

    fn sample(&mut self) -> DataPoint {
        let label: Label = if self.rng.random_bool(0.5) { 1 } else { -1 };
        let center = label as f32 * self.separation;
        let features = (0..self.dim)
            .map(|_| {
                let z: f32 = self.rng.sample(StandardNormal);
                center + self.noise * z
            })
            .collect();
        DataPoint::new(features, label)
    }
}

impl DataStream for SyntheticStream {
    fn next_batch(&mut self) -> Option<&MiniBatch> {
        if self.remaining == 0 {
            return None;
        }
        let n = self.batch_size.min(self.remaining);
        self.remaining -= n;

        self.batch.clear();
        for _ in 0..n {
            let point = self.sample();
            self.batch.push(point);
        }
        Some(&self.batch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points(n: usize) -> Vec<DataPoint> {
        (0..n).map(|i| DataPoint::new(vec![i as f32], i as Label)).collect()
    }

    #[test]
    fn test_vec_stream_batches() {
        let mut stream = VecStream::new(points(5), 2);
        let mut sizes = Vec::new();
        let mut labels = Vec::new();
        while let Some(batch) = stream.next_batch() {
            sizes.push(batch.len());
            labels.extend(batch.iter().map(|p| p.label));
        }
        assert_eq!(sizes, vec![2, 2, 1]);
        assert_eq!(labels, vec![0, 1, 2, 3, 4]);
        assert!(stream.next_batch().is_none());

        stream.reset();
        assert_eq!(stream.next_batch().map(|b| b[0].label), Some(0));
    }

    #[test]
    fn test_vec_stream_shuffle_is_a_permutation() {
        let mut stream = VecStream::new(points(20), 3).with_shuffle(7);
        let mut labels = Vec::new();
        while let Some(batch) = stream.next_batch() {
            labels.extend(batch.iter().map(|p| p.label));
        }
        let mut sorted = labels.clone();
        sorted.sort();
        assert_eq!(sorted, (0..20).collect::<Vec<Label>>());
    }

    #[test]
    fn test_synthetic_stream() {
        let mut stream = SyntheticStream::new(4, 10, 4, 42);
        let mut total = 0;
        while let Some(batch) = stream.next_batch() {
            for point in batch {
                assert_eq!(point.dim(), 4);
                assert!(point.label == 1 || point.label == -1);
            }
            total += batch.len();
        }
        assert_eq!(total, 10);
    }

    #[test]
    fn test_synthetic_stream_is_deterministic() {
        let collect = |seed| {
            let mut stream = SyntheticStream::new(3, 6, 6, seed);
            stream.next_batch().map(|b| b.iter().cloned().collect::<Vec<_>>())
        };
        assert_eq!(collect(1), collect(1));
    }
}
