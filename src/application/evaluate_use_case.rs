// ============================================================
// Layer 2 — EvaluateUseCase
// ============================================================
// Evaluates the ELBO of one image batch:
//
//   Step 1: Pick a batch source    (Layer 4 - data)
//   Step 2: Build the session      (Layer 5 - ml)
//   Step 3: Run the graph          (Layer 5 - ml)
//   Step 4: Append the CSV report  (Layer 6 - infra)

use anyhow::Result;
use std::path::PathBuf;

use crate::application::RunConfig;
use crate::data::{loader::JsonArrayFile, synthetic::SyntheticBatch};
use crate::domain::traits::BatchSource;
use crate::infra::metrics::ElboLogger;
use crate::ml::{inferencer::ElboReport, session::Session};

pub struct EvaluateUseCase {
    config: RunConfig,
    /// JSON image batch; a synthetic batch is used when absent
    input:  Option<PathBuf>,
    /// Seed for the synthetic batch
    seed:   Option<u64>,
}

impl EvaluateUseCase {
    pub fn new(config: RunConfig, input: Option<PathBuf>, seed: Option<u64>) -> Self {
        Self { config, input, seed }
    }

    pub fn execute(&self) -> Result<ElboReport> {
        let cfg = &self.config;
        cfg.validate()?;
        let shape = cfg.graph_shape();

        let mut source: Box<dyn BatchSource> = match &self.input {
            Some(path) => Box::new(JsonArrayFile::new(path)),
            None => Box::new(SyntheticBatch::new(self.seed)),
        };
        let batch = source.next_batch(&shape)?;

        let session = Session::new(cfg)?;
        let report = session.elbo(&batch)?;
        tracing::info!(
            "ELBO {:.4} (likelihood {:.4}, prior {:.4}, posterior {:.4})",
            report.elbo, report.likelihood, report.latent_prior, report.latent_posterior,
        );

        if let Some(dir) = &cfg.report_dir {
            let logger = ElboLogger::new(dir)?;
            let run = logger.log(&report)?;
            tracing::info!("Report appended as run {} to '{}'", run, logger.csv_path().display());
        }

        Ok(report)
    }
}
