// ============================================================
// Layer 5 — Recognition Model (Encoder)
// ============================================================
// q(z | x): one ReLU hidden layer, then two linear heads that
// give the mean and the log standard deviation of a diagonal
// Normal over the latent space.
//
//   x [batch, img_size]
//     → Linear(img_size → units) → ReLU
//     → loc   = Linear(units → latent_size)
//     → scale = exp(clamp(Linear(units → latent_size)))

use burn::{
    nn::{Linear, LinearConfig},
    prelude::*,
    tensor::activation::relu,
};

use crate::ml::distribution::Normal;

/// Bounds on the log standard deviation. Keeps σ strictly positive
/// and finite even for badly scaled inputs.
pub const LOG_SCALE_MIN: f64 = -15.0;
pub const LOG_SCALE_MAX: f64 = 10.0;

#[derive(Config, Debug)]
pub struct EncoderConfig {
    /// Flattened image dimension
    pub img_size:    usize,
    /// Latent variable dimension
    pub latent_size: usize,
    /// Hidden layer width
    #[config(default = 500)]
    pub units:       usize,
}

impl EncoderConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> Encoder<B> {
        Encoder {
            hidden:    LinearConfig::new(self.img_size, self.units).init(device),
            loc:       LinearConfig::new(self.units, self.latent_size).init(device),
            log_scale: LinearConfig::new(self.units, self.latent_size).init(device),
        }
    }
}

#[derive(Module, Debug)]
pub struct Encoder<B: Backend> {
    pub hidden:    Linear<B>,
    pub loc:       Linear<B>,
    pub log_scale: Linear<B>,
}

impl<B: Backend> Encoder<B> {
    /// input: [batch, img_size] → q(z|x) with batch shape [batch, latent_size]
    pub fn forward(&self, input: Tensor<B, 2>) -> Normal<B, 2> {
        let h = relu(self.hidden.forward(input));
        let loc = self.loc.forward(h.clone());
        let scale = self
            .log_scale
            .forward(h)
            .clamp(LOG_SCALE_MIN, LOG_SCALE_MAX)
            .exp();
        Normal::new(loc, scale)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;

    type TestBackend = NdArray<f32>;

    #[test]
    fn test_encoder_batch_shape() {
        let device = Default::default();
        let encoder = EncoderConfig::new(12, 3).with_units(8).init::<TestBackend>(&device);
        let q = encoder.forward(Tensor::ones([5, 12], &device));
        assert_eq!(q.batch_shape(), [5, 3]);
        assert_eq!(q.scale.dims(), [5, 3]);
    }

    #[test]
    fn test_encoder_scale_is_positive() {
        let device = Default::default();
        let encoder = EncoderConfig::new(6, 2).with_units(4).init::<TestBackend>(&device);
        let q = encoder.forward(Tensor::random(
            [3, 6],
            burn::tensor::Distribution::Normal(0.0, 100.0),
            &device,
        ));
        let scale: Vec<f32> = q.scale.into_data().to_vec().unwrap();
        assert!(scale.iter().all(|&s| s > 0.0 && s.is_finite()));
    }
}
