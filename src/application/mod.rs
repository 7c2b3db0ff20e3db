// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// Orchestrates the other layers for one CLI invocation:
// pick an input source, build the session, run the graph,
// write the result.
//
// Rules for this layer:
//   - No tensor code here (that's Layer 5)
//   - No printing here (that's Layer 1)
//   - Only workflow coordination

/// Settings shared by every command
pub mod run_config;

/// ELBO evaluation of one batch
pub mod evaluate_use_case;

/// encode / decode / reconstruct / generate
pub mod codec_use_case;

pub use run_config::RunConfig;
