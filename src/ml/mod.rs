// ============================================================
// Layer 5 — ML / Model Layer (Burn)
// ============================================================
// This layer contains ALL Burn tensor code. The other layers
// exchange plain HostArray values with it through Inferencer.
//
// What's in this layer:
//
//   distribution.rs — Diagonal Normal: log_prob, reparameterised
//                     sampling, analytic KL
//   prior.rs        — Standard Normal prior p(z)
//   encoder.rs      — Recognition model q(z|x)
//   decoder.rs      — Generative model p(x|z)
//   model.rs        — The VAE graph and its ELBO,
//                     encode / decode / reconstruct / generate
//   inferencer.rs   — Runs the graph on host arrays
//   session.rs      — Runtime backend selection (cpu / wgpu)
//
// Reference: Burn Book §3 (Building Blocks)
//            Kingma & Welling (2014) Auto-Encoding Variational Bayes

/// Factorised Normal distribution over tensors
pub mod distribution;

/// Latent prior p(z)
pub mod prior;

/// Recognition network q(z|x)
pub mod encoder;

/// Decoder network p(x|z)
pub mod decoder;

/// Full VAE graph and ELBO objective
pub mod model;

/// Inference engine over host arrays
pub mod inferencer;

/// Backend-erased inference session
pub mod session;
