// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust structs and traits that describe the VAE graph
// from the outside: host-side arrays and the static shapes
// that every tensor entering or leaving the graph must match.
//
// Rules for this layer:
//   - NO Burn framework types allowed here
//   - NO file I/O
//   - Only plain Rust structs, enums, and traits
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

// Dense row-major array living in host memory
pub mod array;

// Compute backend selection
pub mod backend;

// Static graph dimensions (sample, batch, latent, image)
pub mod shape;

// Core abstractions (traits) that other layers implement
pub mod traits;
