// ============================================================
// Layer 2 — Run Configuration
// ============================================================
// Model hyperparameters plus where to run them. Serialisable
// so one config file can drive `encode` and a later `decode`
// with identical graph dimensions.

use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::domain::{backend::BackendKind, shape::GraphShape};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub img_size:    usize,
    pub batch_size:  usize,
    pub latent_size: usize,
    pub sample_size: usize,
    pub units:       usize,
    pub backend:     BackendKind,
    /// Where `elbo` appends its CSV report, if anywhere
    pub report_dir:  Option<PathBuf>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            img_size:    784,
            batch_size:  20,
            latent_size: 10,
            sample_size: 1,
            units:       500,
            backend:     BackendKind::Cpu,
            report_dir:  None,
        }
    }
}

impl RunConfig {
    pub fn graph_shape(&self) -> GraphShape {
        GraphShape::new(self.sample_size, self.batch_size, self.latent_size, self.img_size)
    }

    pub fn validate(&self) -> Result<()> {
        self.graph_shape().validate()?;
        ensure!(self.units > 0, "units must be at least 1");
        Ok(())
    }
}
