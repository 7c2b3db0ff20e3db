// ============================================================
// Layer 4 — Synthetic Batch
// ============================================================
// Uniform [0, 1) pixels, for exercising the graph without an
// input file. A fixed seed gives the same pixels on every run;
// it does not touch the backend RNG (weights, latent noise).

use anyhow::Result;
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::domain::{array::HostArray, shape::GraphShape, traits::BatchSource};

pub struct SyntheticBatch {
    rng: StdRng,
}

impl SyntheticBatch {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }
}

impl BatchSource for SyntheticBatch {
    fn next_batch(&mut self, shape: &GraphShape) -> Result<HostArray> {
        let dims = shape.input_dims();
        let data: Vec<f32> = (0..dims[0] * dims[1]).map(|_| self.rng.gen::<f32>()).collect();
        tracing::info!("Generated synthetic batch {:?}", dims);
        HostArray::new(dims, data)
    }
}
