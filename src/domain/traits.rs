// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The application layer programs against these traits so that
// the source of input batches (a JSON file, a synthetic
// generator) and the storage of settings can be swapped
// without touching the use cases.
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use anyhow::Result;
use std::path::Path;

use crate::domain::{array::HostArray, shape::GraphShape};

// ─── BatchSource ──────────────────────────────────────────────────────────────
/// Any component that can supply an image batch for the graph.
///
/// Implementations:
///   - JsonArrayFile  → reads a HostArray from disk
///   - SyntheticBatch → uniform random pixels
pub trait BatchSource {
    /// Produce one `[batch_size, img_size]` batch for `shape`.
    fn next_batch(&mut self, shape: &GraphShape) -> Result<HostArray>;
}

// ─── Persistable ──────────────────────────────────────────────────────────────
/// Any component whose state can be saved and restored from disk.
///
/// Implementations:
///   - RunConfig → pretty-printed JSON
pub trait Persistable: Sized {
    fn save(&self, path: &Path) -> Result<()>;

    fn load(path: &Path) -> Result<Self>;
}
