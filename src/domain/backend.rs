// ============================================================
// Layer 3 — Backend Choice
// ============================================================
// Which compute backend runs the graph. Kept as a plain enum
// here so configs can name it without depending on burn.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// NdArray on the CPU
    #[default]
    Cpu,
    /// Wgpu on the default adapter
    Wgpu,
}
