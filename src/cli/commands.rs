// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Subcommands: elbo, encode, decode, reconstruct, generate,
// init-config. Every graph command shares ModelArgs so the
// same dimensions can be given as flags or as a config file.

use clap::{Args, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::application::RunConfig;
use crate::domain::backend::BackendKind;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Evaluate the ELBO of one image batch
    Elbo(ElboArgs),

    /// Sample latents from the recognition model for an image batch
    Encode(TransformArgs),

    /// Sample images from the decoder for a latent array
    Decode(TransformArgs),

    /// Encode an image batch, then decode the latents
    Reconstruct(TransformArgs),

    /// Decode a draw from the prior
    Generate(GenerateArgs),

    /// Write a config file with the given (or default) settings
    InitConfig(InitConfigArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum BackendArg {
    Cpu,
    Wgpu,
}

impl From<BackendArg> for BackendKind {
    fn from(b: BackendArg) -> Self {
        match b {
            BackendArg::Cpu  => BackendKind::Cpu,
            BackendArg::Wgpu => BackendKind::Wgpu,
        }
    }
}

/// Graph dimensions and backend. Ignored when --config is given.
#[derive(Args, Debug, Clone)]
pub struct ModelArgs {
    /// Load all settings from this JSON config instead of flags
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Flattened dimension of one input image
    #[arg(long, default_value_t = 784)]
    pub img_size: usize,

    /// Minibatch size; fixes the first input dimension
    #[arg(long, default_value_t = 20)]
    pub batch_size: usize,

    /// Dimension of the latent Normal variable
    #[arg(long, default_value_t = 10)]
    pub latent_size: usize,

    /// Latent samples drawn per image (Monte Carlo sample size)
    #[arg(long, default_value_t = 1)]
    pub sample_size: usize,

    /// Hidden layer width of encoder and decoder
    #[arg(long, default_value_t = 500)]
    pub units: usize,

    /// Compute backend
    #[arg(long, value_enum, default_value_t = BackendArg::Cpu)]
    pub backend: BackendArg,
}

/// Convert CLI ModelArgs into the application-layer RunConfig.
impl From<ModelArgs> for RunConfig {
    fn from(a: ModelArgs) -> Self {
        RunConfig {
            img_size:    a.img_size,
            batch_size:  a.batch_size,
            latent_size: a.latent_size,
            sample_size: a.sample_size,
            units:       a.units,
            backend:     a.backend.into(),
            report_dir:  None,
        }
    }
}

#[derive(Args, Debug)]
pub struct ElboArgs {
    #[command(flatten)]
    pub model: ModelArgs,

    /// JSON image batch [batch_size, img_size]; random pixels if omitted
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Seed for the random input pixels only; model weights and
    /// latent noise stay unseeded
    #[arg(long)]
    pub seed: Option<u64>,

    /// Append the ELBO terms to <dir>/elbo.csv
    #[arg(long)]
    pub report_dir: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct TransformArgs {
    #[command(flatten)]
    pub model: ModelArgs,

    /// JSON array to read
    #[arg(long)]
    pub input: PathBuf,

    /// JSON array to write
    #[arg(long)]
    pub output: PathBuf,
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub model: ModelArgs,

    /// JSON array to write
    #[arg(long)]
    pub output: PathBuf,
}

#[derive(Args, Debug)]
pub struct InitConfigArgs {
    #[command(flatten)]
    pub model: ModelArgs,

    /// Where to write the config
    #[arg(long, default_value = "vae.json")]
    pub output: PathBuf,
}
