// ============================================================
// Layer 4 — JSON Batch Loader
// ============================================================
// Supplies an image batch stored as a HostArray JSON file.
// The file must already hold exactly one [batch_size, img_size]
// batch; no resizing or padding is done here.

use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::domain::{array::HostArray, shape::GraphShape, traits::BatchSource};
use crate::infra::array_store::read_array;

/// Reads one batch of flattened images from a JSON file.
/// Implements the BatchSource trait from Layer 3.
pub struct JsonArrayFile {
    path: PathBuf,
}

impl JsonArrayFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl BatchSource for JsonArrayFile {
    fn next_batch(&mut self, shape: &GraphShape) -> Result<HostArray> {
        tracing::info!("Loading image batch from '{}'", self.path.display());
        let batch = read_array(&self.path)?;
        shape
            .check_input(&batch)
            .with_context(|| format!("'{}' does not fit the graph", self.path.display()))?;
        Ok(batch)
    }
}
