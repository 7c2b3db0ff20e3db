// ============================================================
// Layer 5 — Latent Prior
// ============================================================
// p(z) = N(0, I) over the full latent sample tensor, so its
// batch shape matches what the encoder emits:
//   [sample_size, batch_size, latent_size]

use burn::prelude::*;

use crate::ml::distribution::Normal;

/// Standard Normal prior with batch shape `(sample_size, batch_size, latent_size)`.
pub fn prior<B: Backend>(
    sample_size: usize,
    batch_size:  usize,
    latent_size: usize,
    device:      &B::Device,
) -> Normal<B, 3> {
    Normal::standard([sample_size, batch_size, latent_size], device)
}
