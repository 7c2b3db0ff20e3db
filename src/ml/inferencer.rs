// ============================================================
// Layer 5 — Inferencer
// ============================================================
// Owns a VAE and its device, and runs the graph on host arrays.
// This is the only place where HostArray is turned into burn
// tensors and back, so the application layer never touches
// tensor types.

use anyhow::{anyhow, Result};
use burn::{
    prelude::*,
    tensor::{ElementConversion, TensorData},
};
use serde::{Deserialize, Serialize};

use crate::domain::{array::HostArray, shape::GraphShape};
use crate::ml::model::{Vae, VaeConfig};

/// Plain-number view of the ELBO for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElboReport {
    pub likelihood:       f64,
    pub latent_prior:     f64,
    pub latent_posterior: f64,
    pub elbo:             f64,
    /// Closed-form Σ KL(q(z|x) ‖ p(z)), for comparison with the
    /// Monte Carlo estimate `latent_posterior - latent_prior`
    pub analytic_kl:      f64,
}

pub struct Inferencer<B: Backend> {
    model:  Vae<B>,
    device: B::Device,
}

impl<B: Backend> Inferencer<B> {
    pub fn new(cfg: &VaeConfig, device: B::Device) -> Result<Self> {
        let model = cfg.init::<B>(&device)?;
        tracing::info!(
            "VAE ready: img_size={}, latent_size={}, batch_size={}, sample_size={}",
            cfg.img_size, cfg.latent_size, cfg.batch_size, cfg.sample_size,
        );
        Ok(Self { model, device })
    }

    pub fn shape(&self) -> GraphShape {
        self.model.shape()
    }

    pub fn elbo(&self, images: &HostArray) -> Result<ElboReport> {
        let input = self.images_to_tensor(images)?;
        let graph = self.model.forward(input.clone())?;
        let kl = self.model.analytic_kl(input)?;

        let report = ElboReport {
            likelihood:       to_scalar(graph.terms.likelihood),
            latent_prior:     to_scalar(graph.terms.latent_prior),
            latent_posterior: to_scalar(graph.terms.latent_posterior),
            elbo:             to_scalar(graph.loss),
            analytic_kl:      to_scalar(kl),
        };
        tracing::debug!("ELBO terms: {:?}", report);
        Ok(report)
    }

    pub fn encode(&self, images: &HostArray) -> Result<HostArray> {
        let latent = self.model.encode(self.images_to_tensor(images)?)?;
        to_host(latent)
    }

    pub fn decode(&self, latent: &HostArray) -> Result<HostArray> {
        let shape = self.shape();
        shape.check_latent(latent)?;
        let tensor = Tensor::<B, 3>::from_data(
            TensorData::new(latent.data.clone(), shape.latent_dims()),
            &self.device,
        );
        to_host(self.model.decode(tensor)?)
    }

    pub fn reconstruct(&self, images: &HostArray) -> Result<HostArray> {
        to_host(self.model.reconstruct(self.images_to_tensor(images)?)?)
    }

    pub fn generate(&self) -> Result<HostArray> {
        to_host(self.model.generate(&self.device))
    }

    fn images_to_tensor(&self, images: &HostArray) -> Result<Tensor<B, 2>> {
        let shape = self.shape();
        shape.check_input(images)?;
        Ok(Tensor::from_data(
            TensorData::new(images.data.clone(), shape.input_dims()),
            &self.device,
        ))
    }
}

fn to_scalar<B: Backend>(t: Tensor<B, 1>) -> f64 {
    t.into_scalar().elem::<f64>()
}

fn to_host<B: Backend, const D: usize>(t: Tensor<B, D>) -> Result<HostArray> {
    let dims = t.dims().to_vec();
    let data = t
        .into_data()
        .convert::<f32>()
        .to_vec::<f32>()
        .map_err(|e| anyhow!("Tensor readback: {e:?}"))?;
    HostArray::new(dims, data)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;

    type TestBackend = NdArray<f32>;

    fn inferencer() -> Inferencer<TestBackend> {
        let cfg = VaeConfig::new(6)
            .with_batch_size(2)
            .with_latent_size(2)
            .with_sample_size(3)
            .with_units(5);
        Inferencer::new(&cfg, Default::default()).unwrap()
    }

    fn images() -> HostArray {
        HostArray::new([2, 6], (0..12).map(|i| i as f32 / 12.0).collect()).unwrap()
    }

    #[test]
    fn test_elbo_report_is_consistent() {
        let r = inferencer().elbo(&images()).unwrap();
        assert!(r.elbo.is_finite());
        let combined = r.likelihood + r.latent_prior - r.latent_posterior;
        assert!((r.elbo - combined).abs() < 1e-3 * r.elbo.abs().max(1.0));
        assert!(r.analytic_kl >= -1e-4);
    }

    #[test]
    fn test_encode_then_decode_shapes() {
        let inf = inferencer();
        let z = inf.encode(&images()).unwrap();
        assert_eq!(z.shape, vec![3, 2, 2]);
        let x = inf.decode(&z).unwrap();
        assert_eq!(x.shape, vec![3, 2, 6]);
        assert_eq!(x.len(), 36);
    }

    #[test]
    fn test_generate_and_reconstruct_shapes() {
        let inf = inferencer();
        assert_eq!(inf.generate().unwrap().shape, vec![3, 2, 6]);
        assert_eq!(inf.reconstruct(&images()).unwrap().shape, vec![3, 2, 6]);
    }

    #[test]
    fn test_wrong_shapes_are_errors() {
        let inf = inferencer();
        assert!(inf.encode(&HostArray::zeros([2, 5])).is_err());
        assert!(inf.decode(&HostArray::zeros([3, 2, 3])).is_err());
    }
}
