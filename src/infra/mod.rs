// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// File-system concerns shared by several layers:
//
//   array_store.rs  — HostArray ⇄ JSON files (inputs, latents,
//                     decoded samples)
//   config_store.rs — RunConfig ⇄ pretty JSON
//   metrics.rs      — ELBO report CSV logger
//
// Reference: Rust Book §9 (Error Handling with anyhow)
//            Rust Book §12 (I/O and File Handling)

/// JSON files holding host arrays
pub mod array_store;

/// Run configuration persistence
pub mod config_store;

/// ELBO evaluation CSV logger
pub mod metrics;
