// ============================================================
// Layer 5 — Variational Auto-Encoder
// ============================================================
// Wires the three stochastic components into a single graph
// and a single differentiable objective:
//
//   x ──► encoder q(z|x) ──► z ~ q   [S, B, L]
//                             │
//                             ├──► decoder p(x|z)
//                             └──► prior   p(z)
//
//   ELBO = Σ log p(x|z) / S + Σ log p(z) / S - Σ log q(z|x) / S
//
// The sums run over every element (samples, batch, features).
// Dividing by S gives the Monte Carlo estimate of the
// expectation under q; the result is NOT averaged over batch.
//
// Reference: Kingma & Welling (2014) Auto-Encoding Variational Bayes

use anyhow::{ensure, Result};
use burn::{prelude::*, tensor::backend::AutodiffBackend};

use crate::domain::shape::GraphShape;
use crate::ml::{
    decoder::{Decoder, DecoderConfig},
    distribution::Normal,
    encoder::{Encoder, EncoderConfig},
    prior::prior,
};

// NOTE: #[derive(Config)] already generates Clone and Serialize/Deserialize.
#[derive(Config, Debug)]
pub struct VaeConfig {
    /// Flattened dimension of one input image
    pub img_size:    usize,
    /// Minibatch size; fixes the first input dimension
    #[config(default = 20)]
    pub batch_size:  usize,
    /// Dimension of the latent Normal variable
    #[config(default = 10)]
    pub latent_size: usize,
    /// Number of latent samples drawn from the recognition model.
    /// Usually 1 (stochastic integration).
    #[config(default = 1)]
    pub sample_size: usize,
    /// Hidden layer width of encoder and decoder
    #[config(default = 500)]
    pub units:       usize,
}

impl VaeConfig {
    pub fn graph_shape(&self) -> GraphShape {
        GraphShape::new(self.sample_size, self.batch_size, self.latent_size, self.img_size)
    }

    pub fn validate(&self) -> Result<()> {
        self.graph_shape().validate()?;
        ensure!(self.units > 0, "units must be at least 1");
        Ok(())
    }

    /// Build the full static graph. Parameters are freshly initialised.
    pub fn init<B: Backend>(&self, device: &B::Device) -> Result<Vae<B>> {
        self.validate()?;
        let encoder = EncoderConfig::new(self.img_size, self.latent_size)
            .with_units(self.units)
            .init(device);
        let decoder = DecoderConfig::new(self.img_size, self.latent_size)
            .with_units(self.units)
            .init(device);
        tracing::debug!(
            "VAE graph: input {:?}, latent {:?}, units={}",
            self.graph_shape().input_dims(),
            self.graph_shape().latent_dims(),
            self.units,
        );
        Ok(Vae {
            encoder,
            decoder,
            img_size:    self.img_size,
            batch_size:  self.batch_size,
            latent_size: self.latent_size,
            sample_size: self.sample_size,
        })
    }
}

#[derive(Module, Debug)]
pub struct Vae<B: Backend> {
    pub encoder:     Encoder<B>,
    pub decoder:     Decoder<B>,
    pub img_size:    usize,
    pub batch_size:  usize,
    pub latent_size: usize,
    pub sample_size: usize,
}

/// The three Monte Carlo terms of the ELBO, each a one-element tensor.
#[derive(Debug, Clone)]
pub struct ElboTerms<B: Backend> {
    /// Σ log p(x|z) / S
    pub likelihood:       Tensor<B, 1>,
    /// Σ log p(z) / S
    pub latent_prior:     Tensor<B, 1>,
    /// Σ log q(z|x) / S
    pub latent_posterior: Tensor<B, 1>,
}

impl<B: Backend> ElboTerms<B> {
    pub fn elbo(&self) -> Tensor<B, 1> {
        self.likelihood.clone() + self.latent_prior.clone() - self.latent_posterior.clone()
    }
}

/// Every node of one forward pass through the graph.
#[derive(Debug, Clone)]
pub struct VaeGraph<B: Backend> {
    /// q(z|x), batch shape [B, L]
    pub encoder: Normal<B, 2>,
    /// z ~ q(z|x), shape [S, B, L]
    pub latent:  Tensor<B, 3>,
    /// p(x|z), batch shape [S, B, img]
    pub decoder: Normal<B, 3>,
    /// p(z), batch shape [S, B, L]
    pub prior:   Normal<B, 3>,
    pub terms:   ElboTerms<B>,
    /// The ELBO (to be maximised), shape [1]
    pub loss:    Tensor<B, 1>,
}

impl<B: Backend> Vae<B> {
    pub fn shape(&self) -> GraphShape {
        GraphShape::new(self.sample_size, self.batch_size, self.latent_size, self.img_size)
    }

    fn check_input(&self, input: &Tensor<B, 2>) -> Result<()> {
        let expected = self.shape().input_dims();
        ensure!(
            input.dims() == expected,
            "image batch must have shape {:?}, got {:?}",
            expected,
            input.dims()
        );
        Ok(())
    }

    fn check_latent(&self, latent: &Tensor<B, 3>) -> Result<()> {
        let expected = self.shape().latent_dims();
        ensure!(
            latent.dims() == expected,
            "latent tensor must have shape {:?}, got {:?}",
            expected,
            latent.dims()
        );
        Ok(())
    }

    /// input: [batch_size, img_size] → the full graph including the ELBO.
    pub fn forward(&self, input: Tensor<B, 2>) -> Result<VaeGraph<B>> {
        self.check_input(&input)?;
        let [s, b, l] = self.shape().latent_dims();
        let device = input.device();

        let encoder = self.encoder.forward(input.clone());
        let latent = encoder.sample_n(s);
        let decoder = self.decoder.forward(latent.clone());
        let prior = prior::<B>(s, b, l, &device);

        // The input is scored once per latent sample.
        let observed = input.unsqueeze::<3>().expand([s, b, self.img_size]);
        let likelihood = decoder.log_prob(observed);
        let latent_prior = prior.log_prob(latent.clone());
        let latent_posterior = encoder.expand_samples(s).log_prob(latent.clone());

        let scale = s as f64;
        let terms = ElboTerms {
            likelihood:       likelihood.sum() / scale,
            latent_prior:     latent_prior.sum() / scale,
            latent_posterior: latent_posterior.sum() / scale,
        };
        let loss = terms.elbo();

        Ok(VaeGraph { encoder, latent, decoder, prior, terms, loss })
    }

    /// Negative ELBO, for minimisation by a gradient-based optimiser.
    pub fn forward_loss(&self, input: Tensor<B, 2>) -> Result<(Tensor<B, 1>, VaeGraph<B>)>
    where
        B: AutodiffBackend,
    {
        let graph = self.forward(input)?;
        Ok((graph.loss.clone().neg(), graph))
    }

    /// img: [batch_size, img_size] → z: [sample_size, batch_size, latent_size]
    pub fn encode(&self, img: Tensor<B, 2>) -> Result<Tensor<B, 3>> {
        self.check_input(&img)?;
        Ok(self.encoder.forward(img).sample_n(self.sample_size))
    }

    /// z: [sample_size, batch_size, latent_size] → x: [sample_size, batch_size, img_size]
    pub fn decode(&self, latent: Tensor<B, 3>) -> Result<Tensor<B, 3>> {
        self.check_latent(&latent)?;
        Ok(self.decoder.forward(latent).sample())
    }

    pub fn reconstruct(&self, img: Tensor<B, 2>) -> Result<Tensor<B, 3>> {
        let latent = self.encode(img)?;
        self.decode(latent)
    }

    /// Decode a draw from the prior: ancestral sampling from the generative model.
    pub fn generate(&self, device: &B::Device) -> Tensor<B, 3> {
        let [s, b, l] = self.shape().latent_dims();
        let z = prior::<B>(s, b, l, device).sample();
        self.decoder.forward(z).sample()
    }

    /// Σ KL(q(z|x) ‖ p(z)) over batch and latent dims, shape [1].
    /// The closed form of `latent_posterior - latent_prior` in expectation.
    pub fn analytic_kl(&self, img: Tensor<B, 2>) -> Result<Tensor<B, 1>> {
        self.check_input(&img)?;
        let q = self.encoder.forward(img);
        let p = Normal::standard(q.batch_shape(), &q.loc.device());
        Ok(q.kl_divergence(&p).sum())
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::{Autodiff, NdArray};
    use burn::tensor::ElementConversion;

    type TestBackend = NdArray<f32>;
    type TestAutodiffBackend = Autodiff<NdArray<f32>>;

    fn scalar<B: Backend>(t: Tensor<B, 1>) -> f64 {
        t.into_scalar().elem::<f64>()
    }

    fn config() -> VaeConfig {
        VaeConfig::new(12)
            .with_batch_size(4)
            .with_latent_size(3)
            .with_sample_size(2)
            .with_units(8)
    }

    fn images<B: Backend>(device: &B::Device) -> Tensor<B, 2> {
        Tensor::random([4, 12], burn::tensor::Distribution::Uniform(0.0, 1.0), device)
    }

    #[test]
    fn test_default_hyperparameters() {
        let cfg = VaeConfig::new(784);
        assert_eq!(cfg.batch_size, 20);
        assert_eq!(cfg.latent_size, 10);
        assert_eq!(cfg.sample_size, 1);
        assert_eq!(cfg.units, 500);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let device = Default::default();
        assert!(config().with_sample_size(0).init::<TestBackend>(&device).is_err());
        assert!(config().with_units(0).init::<TestBackend>(&device).is_err());
    }

    #[test]
    fn test_graph_shapes() {
        let device = Default::default();
        let vae = config().init::<TestBackend>(&device).unwrap();
        let graph = vae.forward(images(&device)).unwrap();

        assert_eq!(graph.encoder.batch_shape(), [4, 3]);
        assert_eq!(graph.latent.dims(), [2, 4, 3]);
        assert_eq!(graph.decoder.batch_shape(), [2, 4, 12]);
        assert_eq!(graph.prior.batch_shape(), [2, 4, 3]);
        assert_eq!(graph.loss.dims(), [1]);
    }

    #[test]
    fn test_loss_combines_terms() {
        let device = Default::default();
        let vae = config().init::<TestBackend>(&device).unwrap();
        let graph = vae.forward(images(&device)).unwrap();

        let lik = scalar(graph.terms.likelihood.clone());
        let pri = scalar(graph.terms.latent_prior.clone());
        let post = scalar(graph.terms.latent_posterior.clone());
        let loss = scalar(graph.loss.clone());
        assert!(loss.is_finite());
        assert!((loss - (lik + pri - post)).abs() < 1e-3 * loss.abs().max(1.0));
    }

    #[test]
    fn test_terms_are_divided_by_sample_size() {
        let device = Default::default();
        let vae = config().init::<TestBackend>(&device).unwrap();
        let input = images::<TestBackend>(&device);
        let graph = vae.forward(input.clone()).unwrap();

        // Re-score the same input and latent sample by hand.
        let observed = input.unsqueeze::<3>().expand([2, 4, 12]);
        let lik_sum = scalar(graph.decoder.log_prob(observed).sum());
        let lik = scalar(graph.terms.likelihood.clone());
        assert!((lik - lik_sum / 2.0).abs() < 1e-3 * lik.abs().max(1.0));

        let prior_sum = scalar(graph.prior.log_prob(graph.latent.clone()).sum());
        let post_sum = scalar(graph.encoder.expand_samples(2).log_prob(graph.latent.clone()).sum());
        let pri = scalar(graph.terms.latent_prior.clone());
        let post = scalar(graph.terms.latent_posterior.clone());
        assert!((pri - prior_sum / 2.0).abs() < 1e-3 * pri.abs().max(1.0));
        assert!((post - post_sum / 2.0).abs() < 1e-3 * post.abs().max(1.0));
    }

    #[test]
    fn test_forward_rejects_wrong_batch() {
        let device = Default::default();
        let vae = config().init::<TestBackend>(&device).unwrap();
        let err = vae.forward(Tensor::zeros([3, 12], &device)).unwrap_err();
        assert!(err.to_string().contains("[4, 12]"));
    }

    #[test]
    fn test_encode_shape() {
        let device = Default::default();
        let vae = config().init::<TestBackend>(&device).unwrap();
        let z = vae.encode(images(&device)).unwrap();
        assert_eq!(z.dims(), [2, 4, 3]);
    }

    #[test]
    fn test_decode_shape_and_validation() {
        let device = Default::default();
        let vae = config().init::<TestBackend>(&device).unwrap();
        let x = vae.decode(Tensor::zeros([2, 4, 3], &device)).unwrap();
        assert_eq!(x.dims(), [2, 4, 12]);
        assert!(vae.decode(Tensor::zeros([1, 4, 3], &device)).is_err());
    }

    #[test]
    fn test_reconstruct_and_generate_shapes() {
        let device = Default::default();
        let vae = config().init::<TestBackend>(&device).unwrap();
        assert_eq!(vae.reconstruct(images(&device)).unwrap().dims(), [2, 4, 12]);
        assert_eq!(vae.generate(&device).dims(), [2, 4, 12]);
    }

    #[test]
    fn test_analytic_kl_is_non_negative() {
        let device = Default::default();
        let vae = config().init::<TestBackend>(&device).unwrap();
        let kl = scalar(vae.analytic_kl(images(&device)).unwrap());
        assert!(kl >= -1e-4, "got {kl}");
    }

    #[test]
    fn test_elbo_is_differentiable() {
        let device = Default::default();
        let vae = config().init::<TestAutodiffBackend>(&device).unwrap();
        let (loss, _) = vae.forward_loss(images(&device)).unwrap();
        let grads = loss.backward();

        assert!(vae.encoder.hidden.weight.val().grad(&grads).is_some());
        assert!(vae.encoder.log_scale.weight.val().grad(&grads).is_some());
        assert!(vae.decoder.loc.weight.val().grad(&grads).is_some());
    }
}
