// ============================================================
// Layer 2 — CodecUseCase
// ============================================================
// The graph traversed in either direction:
//
//   encode       images [B, img]    → latents [S, B, L]
//   decode       latents [S, B, L]  → images  [S, B, img]
//   reconstruct  images [B, img]    → images  [S, B, img]
//   generate     (prior)            → images  [S, B, img]
//
// Inputs and outputs are HostArray JSON files.

use anyhow::Result;
use std::path::PathBuf;

use crate::application::RunConfig;
use crate::data::loader::JsonArrayFile;
use crate::domain::{array::HostArray, traits::BatchSource};
use crate::infra::array_store::{read_array, write_array};
use crate::ml::session::Session;

#[derive(Debug, Clone)]
pub enum CodecOp {
    Encode      { input: PathBuf, output: PathBuf },
    Decode      { input: PathBuf, output: PathBuf },
    Reconstruct { input: PathBuf, output: PathBuf },
    Generate    { output: PathBuf },
}

impl CodecOp {
    fn output(&self) -> &PathBuf {
        match self {
            CodecOp::Encode { output, .. }
            | CodecOp::Decode { output, .. }
            | CodecOp::Reconstruct { output, .. }
            | CodecOp::Generate { output } => output,
        }
    }
}

pub struct CodecUseCase {
    config: RunConfig,
    op:     CodecOp,
}

impl CodecUseCase {
    pub fn new(config: RunConfig, op: CodecOp) -> Self {
        Self { config, op }
    }

    /// Run the operation, write its output file and return the result.
    pub fn execute(&self) -> Result<HostArray> {
        self.config.validate()?;
        let shape = self.config.graph_shape();
        let session = Session::new(&self.config)?;
        tracing::debug!("Session graph: {:?}", session.shape());

        let result = match &self.op {
            CodecOp::Encode { input, .. } => {
                let images = JsonArrayFile::new(input).next_batch(&shape)?;
                session.encode(&images)?
            }
            CodecOp::Decode { input, .. } => {
                let latent = read_array(input)?;
                session.decode(&latent)?
            }
            CodecOp::Reconstruct { input, .. } => {
                let images = JsonArrayFile::new(input).next_batch(&shape)?;
                session.reconstruct(&images)?
            }
            CodecOp::Generate { .. } => session.generate()?,
        };

        write_array(self.op.output(), &result)?;
        tracing::info!("Wrote {:?} to '{}'", result.shape, self.op.output().display());
        Ok(result)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> RunConfig {
        RunConfig {
            img_size:    5,
            batch_size:  2,
            latent_size: 3,
            sample_size: 2,
            units:       4,
            ..RunConfig::default()
        }
    }

    #[test]
    fn test_encode_output_feeds_decode() {
        let dir = std::env::temp_dir().join(format!("vae-elbo-codec-{}", std::process::id()));
        let images = dir.join("images.json");
        let latent = dir.join("latent.json");
        let decoded = dir.join("decoded.json");
        write_array(&images, &HostArray::zeros([2, 5])).unwrap();

        let z = CodecUseCase::new(
            small_config(),
            CodecOp::Encode { input: images, output: latent.clone() },
        )
        .execute()
        .unwrap();
        assert_eq!(z.shape, vec![2, 2, 3]);

        let x = CodecUseCase::new(
            small_config(),
            CodecOp::Decode { input: latent, output: decoded.clone() },
        )
        .execute()
        .unwrap();
        assert_eq!(x.shape, vec![2, 2, 5]);
        assert_eq!(read_array(&decoded).unwrap(), x);
    }

    #[test]
    fn test_decode_rejects_latent_of_other_graph() {
        let dir = std::env::temp_dir().join(format!("vae-elbo-codec-bad-{}", std::process::id()));
        let latent = dir.join("latent.json");
        write_array(&latent, &HostArray::zeros([1, 2, 3])).unwrap();

        let result = CodecUseCase::new(
            small_config(),
            CodecOp::Decode { input: latent, output: dir.join("out.json") },
        )
        .execute();
        assert!(result.is_err());
    }

    #[test]
    fn test_generate_writes_samples() {
        let dir = std::env::temp_dir().join(format!("vae-elbo-codec-gen-{}", std::process::id()));
        let out = dir.join("samples.json");
        let x = CodecUseCase::new(small_config(), CodecOp::Generate { output: out.clone() })
            .execute()
            .unwrap();
        assert_eq!(x.shape, vec![2, 2, 5]);
        assert!(out.exists());
    }
}
