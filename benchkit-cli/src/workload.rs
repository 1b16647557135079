//! Batched Gram-matrix workload for `benchkit bench`
//!
//! Each strategy computes `out[b] = x[b] · x[b]ᵀ` for every matrix in a
//! batch of `rows × cols` matrices, producing `rows × rows` results.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Row-major batch of equally sized `f32` matrices
#[derive(Debug, Clone)]
pub struct Batch {
    data: Vec<f32>,
    batch: usize,
    rows: usize,
    cols: usize,
}

/// A named product strategy
pub type Strategy = fn(&Batch) -> Vec<f32>;

/// All strategies, in comparison order
pub const STRATEGIES: [(&str, Strategy); 3] = [
    ("naive", gram_naive),
    ("transposed", gram_transposed),
    ("iter_zip", gram_iter_zip),
];

impl Batch {
    /// Uniform values in `[-1, 1)`. A fixed `seed` gives a reproducible batch.
    pub fn random(batch: usize, rows: usize, cols: usize, seed: Option<u64>) -> Self {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let data = (0..batch * rows * cols)
            .map(|_| rng.gen_range(-1.0f32..1.0))
            .collect();
        Self {
            data,
            batch,
            rows,
            cols,
        }
    }

    /// Batch from existing row-major data
    pub fn from_vec(data: Vec<f32>, batch: usize, rows: usize, cols: usize) -> Option<Self> {
        (data.len() == batch * rows * cols).then_some(Self {
            data,
            batch,
            rows,
            cols,
        })
    }

    /// `(batch, rows, cols)`
    pub fn shape(&self) -> (usize, usize, usize) {
        (self.batch, self.rows, self.cols)
    }

    fn matrix(&self, b: usize) -> &[f32] {
        let len = self.rows * self.cols;
        &self.data[b * len..(b + 1) * len]
    }

    fn output(&self) -> Vec<f32> {
        vec![0.0; self.batch * self.rows * self.rows]
    }
}

/// Materialize `xᵀ`, then the textbook `i, j, k` product with a strided
/// read of the transpose.
pub fn gram_naive(x: &Batch) -> Vec<f32> {
    let (rows, cols) = (x.rows, x.cols);
    let mut out = x.output();
    let mut t = vec![0.0f32; cols * rows];

    for b in 0..x.batch {
        let m = x.matrix(b);
        for i in 0..rows {
            for k in 0..cols {
                t[k * rows + i] = m[i * cols + k];
            }
        }

        let o = &mut out[b * rows * rows..(b + 1) * rows * rows];
        for i in 0..rows {
            for j in 0..rows {
                let mut acc = 0.0f32;
                for k in 0..cols {
                    acc += m[i * cols + k] * t[k * rows + j];
                }
                o[i * rows + j] = acc;
            }
        }
    }
    out
}

/// Dot products of row pairs; both operands are read contiguously.
pub fn gram_transposed(x: &Batch) -> Vec<f32> {
    let (rows, cols) = (x.rows, x.cols);
    let mut out = x.output();

    for b in 0..x.batch {
        let m = x.matrix(b);
        let o = &mut out[b * rows * rows..(b + 1) * rows * rows];
        for i in 0..rows {
            let ri = &m[i * cols..(i + 1) * cols];
            for j in 0..rows {
                let rj = &m[j * cols..(j + 1) * cols];
                let mut acc = 0.0f32;
                for k in 0..cols {
                    acc += ri[k] * rj[k];
                }
                o[i * rows + j] = acc;
            }
        }
    }
    out
}

/// Same dot products expressed with chunk and zip iterators.
pub fn gram_iter_zip(x: &Batch) -> Vec<f32> {
    let (rows, cols) = (x.rows, x.cols);
    if rows == 0 || cols == 0 {
        return x.output();
    }

    x.data
        .chunks_exact(rows * cols)
        .flat_map(|m| {
            m.chunks_exact(cols).flat_map(move |ri| {
                m.chunks_exact(cols)
                    .map(move |rj| ri.iter().zip(rj).map(|(a, b)| a * b).sum::<f32>())
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_product() {
        // [[1, 2], [3, 4]] · its transpose = [[5, 11], [11, 25]]
        let x = Batch::from_vec(vec![1.0, 2.0, 3.0, 4.0], 1, 2, 2).unwrap();
        for (name, strategy) in STRATEGIES {
            assert_eq!(strategy(&x), [5.0, 11.0, 11.0, 25.0], "{name}");
        }
    }

    #[test]
    fn test_strategies_agree() {
        let x = Batch::random(3, 5, 7, Some(42));
        let expected = gram_naive(&x);
        assert_eq!(expected.len(), 3 * 5 * 5);

        for (name, strategy) in STRATEGIES {
            let got = strategy(&x);
            assert_eq!(got.len(), expected.len(), "{name}");
            for (a, b) in got.iter().zip(&expected) {
                assert!((a - b).abs() < 1e-4, "{name}: {a} != {b}");
            }
        }
    }

    #[test]
    fn test_seeded_batch_is_reproducible() {
        let a = Batch::random(2, 3, 4, Some(7));
        let b = Batch::random(2, 3, 4, Some(7));
        assert_eq!(a.data, b.data);
        assert_eq!(a.shape(), (2, 3, 4));
        assert!(a.data.iter().all(|v| (-1.0..1.0).contains(v)));
    }

    #[test]
    fn test_shape_mismatch_rejected() {
        assert!(Batch::from_vec(vec![0.0; 5], 1, 2, 2).is_none());
    }

    #[test]
    fn test_empty_columns() {
        let x = Batch::from_vec(Vec::new(), 2, 3, 0).unwrap();
        for (name, strategy) in STRATEGIES {
            assert_eq!(strategy(&x), vec![0.0; 18], "{name}");
        }
    }
}
