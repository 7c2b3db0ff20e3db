// ============================================================
// Layer 4 — Input Batches
// ============================================================
// Sources of [batch_size, img_size] image batches for the
// graph. Both implement the BatchSource trait from Layer 3.
//
//   JsonArrayFile   → a HostArray JSON file on disk
//   SyntheticBatch  → uniform random pixels from `rand`

/// Reads an image batch from a JSON array file
pub mod loader;

/// Generates a random image batch
pub mod synthetic;
