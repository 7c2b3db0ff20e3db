// ============================================================
// Layer 6 — ELBO Logger
// ============================================================
// Appends one CSV row per `elbo` evaluation so repeated runs
// (different seeds, different hyperparameters) can be compared.
//
// Output file: <report_dir>/elbo.csv
//
//   run,likelihood,latent_prior,latent_posterior,elbo,analytic_kl
//   1,-1043.112305,-27.402100,-3.118820,-1067.395585,14.230011
//
// `run` counts rows already in the file, so it keeps increasing
// across processes.

use anyhow::{Context, Result};
use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
};

use crate::ml::inferencer::ElboReport;

const HEADER: &str = "run,likelihood,latent_prior,latent_posterior,elbo,analytic_kl";

pub struct ElboLogger {
    csv_path: PathBuf,
}

impl ElboLogger {
    /// Create the report directory and the CSV header if they don't exist yet.
    pub fn new(dir: &Path) -> Result<Self> {
        fs::create_dir_all(dir)
            .with_context(|| format!("Cannot create report directory '{}'", dir.display()))?;

        let csv_path = dir.join("elbo.csv");
        if !csv_path.exists() {
            let mut f = fs::File::create(&csv_path)?;
            writeln!(f, "{HEADER}")?;
            tracing::debug!("Created ELBO CSV: '{}'", csv_path.display());
        }

        Ok(Self { csv_path })
    }

    /// Append one report; returns the run number it was logged under.
    pub fn log(&self, r: &ElboReport) -> Result<usize> {
        let run = self.rows()? + 1;

        let mut f = OpenOptions::new()
            .append(true)
            .open(&self.csv_path)
            .with_context(|| format!("Cannot open '{}'", self.csv_path.display()))?;

        writeln!(
            f,
            "{},{:.6},{:.6},{:.6},{:.6},{:.6}",
            run, r.likelihood, r.latent_prior, r.latent_posterior, r.elbo, r.analytic_kl,
        )?;

        tracing::debug!("Logged run {} elbo={:.4}", run, r.elbo);
        Ok(run)
    }

    pub fn csv_path(&self) -> &Path {
        &self.csv_path
    }

    fn rows(&self) -> Result<usize> {
        let text = fs::read_to_string(&self.csv_path)?;
        Ok(text.lines().skip(1).filter(|l| !l.trim().is_empty()).count())
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn report(elbo: f64) -> ElboReport {
        ElboReport {
            likelihood:       elbo,
            latent_prior:     -1.0,
            latent_posterior: -1.0,
            elbo,
            analytic_kl:      0.25,
        }
    }

    #[test]
    fn test_header_written_once_and_runs_increment() {
        let dir = std::env::temp_dir().join(format!("vae-elbo-metrics-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);

        let logger = ElboLogger::new(&dir).unwrap();
        assert_eq!(logger.log(&report(-10.0)).unwrap(), 1);

        // A second logger on the same directory must append, not truncate.
        let logger = ElboLogger::new(&dir).unwrap();
        assert_eq!(logger.log(&report(-9.5)).unwrap(), 2);

        let text = fs::read_to_string(logger.csv_path()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], HEADER);
        assert!(lines[2].starts_with("2,-9.500000,"));
    }
}
