// ============================================================
// Layer 5 — Decoder
// ============================================================
// p(x | z): mirrors the encoder. Applied to the whole latent
// sample tensor at once, since Linear acts on the last axis.
//
//   z [sample, batch, latent_size]
//     → Linear(latent_size → units) → ReLU
//     → loc   = Linear(units → img_size)
//     → scale = exp(clamp(Linear(units → img_size)))

use burn::{
    nn::{Linear, LinearConfig},
    prelude::*,
    tensor::activation::relu,
};

use crate::ml::distribution::Normal;
use crate::ml::encoder::{LOG_SCALE_MAX, LOG_SCALE_MIN};

#[derive(Config, Debug)]
pub struct DecoderConfig {
    /// Flattened image dimension
    pub img_size:    usize,
    /// Latent variable dimension
    pub latent_size: usize,
    /// Hidden layer width
    #[config(default = 500)]
    pub units:       usize,
}

impl DecoderConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> Decoder<B> {
        Decoder {
            hidden:    LinearConfig::new(self.latent_size, self.units).init(device),
            loc:       LinearConfig::new(self.units, self.img_size).init(device),
            log_scale: LinearConfig::new(self.units, self.img_size).init(device),
        }
    }
}

#[derive(Module, Debug)]
pub struct Decoder<B: Backend> {
    pub hidden:    Linear<B>,
    pub loc:       Linear<B>,
    pub log_scale: Linear<B>,
}

impl<B: Backend> Decoder<B> {
    /// latent: [sample, batch, latent_size] → p(x|z) with batch shape [sample, batch, img_size]
    pub fn forward(&self, latent: Tensor<B, 3>) -> Normal<B, 3> {
        let h = relu(self.hidden.forward(latent));
        let loc = self.loc.forward(h.clone());
        let scale = self
            .log_scale
            .forward(h)
            .clamp(LOG_SCALE_MIN, LOG_SCALE_MAX)
            .exp();
        Normal::new(loc, scale)
    }
}
