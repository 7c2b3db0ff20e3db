// ============================================================
// Layer 5 — Diagonal Normal Distribution
// ============================================================
// Every stochastic node of the VAE is a fully factorised
// Normal: the prior p(z), the recognition model q(z|x) and
// the decoder p(x|z). Only three things are needed from it:
//
//   log_prob(x) = -½((x - μ)/σ)² - ln σ - ½ ln 2π
//   sample()    = μ + σ ⊙ ε,  ε ~ N(0, I)
//   kl(q ‖ p)   = ln(σp/σq) + (σq² + (μq - μp)²) / (2σp²) - ½
//
// Sampling uses the reparameterisation trick so gradients flow
// back into μ and σ when the backend is an AutodiffBackend.
//
// Reference: Kingma & Welling (2014) Auto-Encoding Variational Bayes

use burn::{prelude::*, tensor::Distribution};

/// ½ ln(2π)
const HALF_LN_2PI: f64 = 0.918_938_533_204_672_7;

/// A Normal distribution with independent elements.
/// `loc` and `scale` share the batch shape of the distribution.
#[derive(Debug, Clone)]
pub struct Normal<B: Backend, const D: usize> {
    pub loc:   Tensor<B, D>,
    pub scale: Tensor<B, D>,
}

impl<B: Backend, const D: usize> Normal<B, D> {
    pub fn new(loc: Tensor<B, D>, scale: Tensor<B, D>) -> Self {
        Self { loc, scale }
    }

    /// Standard Normal of the given batch shape: μ = 0, σ = 1.
    pub fn standard(shape: [usize; D], device: &B::Device) -> Self {
        Self {
            loc:   Tensor::zeros(shape, device),
            scale: Tensor::ones(shape, device),
        }
    }

    pub fn batch_shape(&self) -> [usize; D] {
        self.loc.dims()
    }

    pub fn mean(&self) -> Tensor<B, D> {
        self.loc.clone()
    }

    /// Element-wise log density. `x` must broadcast against the batch shape.
    pub fn log_prob(&self, x: Tensor<B, D>) -> Tensor<B, D> {
        let z = (x - self.loc.clone()) / self.scale.clone();
        z.clone() * z * (-0.5) - self.scale.clone().log() - HALF_LN_2PI
    }

    /// One reparameterised draw with the batch shape.
    pub fn sample(&self) -> Tensor<B, D> {
        let eps = Tensor::random(
            self.loc.shape(),
            Distribution::Normal(0.0, 1.0),
            &self.loc.device(),
        );
        self.loc.clone() + self.scale.clone() * eps
    }

    /// Element-wise KL(self ‖ other).
    pub fn kl_divergence(&self, other: &Normal<B, D>) -> Tensor<B, D> {
        let var_ratio = (self.scale.clone() / other.scale.clone()).powf_scalar(2.0);
        let diff = (self.loc.clone() - other.loc.clone()) / other.scale.clone();
        (var_ratio.clone() + diff.clone() * diff - 1.0 - var_ratio.log()) * 0.5
    }
}

impl<B: Backend> Normal<B, 2> {
    /// `n` independent draws stacked on a new leading sample axis:
    /// batch shape [b, k] → [n, b, k].
    pub fn sample_n(&self, n: usize) -> Tensor<B, 3> {
        let [b, k] = self.batch_shape();
        let loc = self.loc.clone().unsqueeze::<3>().expand([n, b, k]);
        let scale = self.scale.clone().unsqueeze::<3>().expand([n, b, k]);
        let eps = Tensor::random([n, b, k], Distribution::Normal(0.0, 1.0), &loc.device());
        loc + scale * eps
    }

    /// View of this distribution broadcast over a leading sample axis,
    /// so it can score a `[n, b, k]` latent sample.
    pub fn expand_samples(&self, n: usize) -> Normal<B, 3> {
        let [b, k] = self.batch_shape();
        Normal {
            loc:   self.loc.clone().unsqueeze::<3>().expand([n, b, k]),
            scale: self.scale.clone().unsqueeze::<3>().expand([n, b, k]),
        }
    }
}
