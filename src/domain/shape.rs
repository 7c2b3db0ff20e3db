// ============================================================
// Layer 3 — GraphShape Domain Type
// ============================================================
// The VAE graph is built for fixed dimensions. Every array that
// crosses the graph boundary is checked against these:
//
//   input   [batch_size, img_size]
//   latent  [sample_size, batch_size, latent_size]
//   output  [sample_size, batch_size, img_size]

use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};

use crate::domain::array::HostArray;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphShape {
    pub sample_size: usize,
    pub batch_size:  usize,
    pub latent_size: usize,
    pub img_size:    usize,
}

impl GraphShape {
    pub fn new(sample_size: usize, batch_size: usize, latent_size: usize, img_size: usize) -> Self {
        Self { sample_size, batch_size, latent_size, img_size }
    }

    pub fn input_dims(&self) -> [usize; 2] {
        [self.batch_size, self.img_size]
    }

    pub fn latent_dims(&self) -> [usize; 3] {
        [self.sample_size, self.batch_size, self.latent_size]
    }

    pub fn output_dims(&self) -> [usize; 3] {
        [self.sample_size, self.batch_size, self.img_size]
    }

    /// All dimensions must be at least one.
    pub fn validate(&self) -> Result<()> {
        ensure!(self.sample_size > 0, "sample_size must be at least 1");
        ensure!(self.batch_size > 0, "batch_size must be at least 1");
        ensure!(self.latent_size > 0, "latent_size must be at least 1");
        ensure!(self.img_size > 0, "img_size must be at least 1");
        Ok(())
    }

    /// An image batch must be exactly `[batch_size, img_size]`.
    pub fn check_input(&self, images: &HostArray) -> Result<()> {
        images.validate()?;
        ensure!(
            images.shape == self.input_dims(),
            "image batch must have shape {:?}, got {:?}",
            self.input_dims(),
            images.shape
        );
        Ok(())
    }

    /// A latent array must be exactly `[sample_size, batch_size, latent_size]`.
    pub fn check_latent(&self, latent: &HostArray) -> Result<()> {
        latent.validate()?;
        ensure!(
            latent.shape == self.latent_dims(),
            "latent array must have shape {:?}, got {:?}",
            self.latent_dims(),
            latent.shape
        );
        Ok(())
    }
}
