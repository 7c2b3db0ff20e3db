// ============================================================
// Layer 6 — Config Store
// ============================================================
// Persists RunConfig as pretty JSON so the same graph
// dimensions can be reused across `encode`, `decode` and
// `elbo` invocations. Latents written by `encode` only make
// sense to a `decode` run with the same sample/batch/latent
// sizes.

use anyhow::{Context, Result};
use std::{fs, path::Path};

use crate::application::RunConfig;
use crate::domain::traits::Persistable;

impl Persistable for RunConfig {
    fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)
            .with_context(|| format!("Cannot write config to '{}'", path.display()))?;
        tracing::debug!("Saved run config to '{}'", path.display());
        Ok(())
    }

    fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("Cannot read config from '{}'", path.display()))?;
        let cfg: RunConfig = serde_json::from_str(&json)
            .with_context(|| format!("'{}' is not a valid run config", path.display()))?;
        cfg.validate()
            .with_context(|| format!("Invalid settings in '{}'", path.display()))?;
        Ok(cfg)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::backend::BackendKind;

    #[test]
    fn test_save_then_load() {
        let path = std::env::temp_dir()
            .join(format!("vae-elbo-config-{}", std::process::id()))
            .join("run.json");
        let mut cfg = RunConfig::default();
        cfg.latent_size = 4;
        cfg.backend = BackendKind::Wgpu;
        cfg.save(&path).unwrap();

        let loaded = RunConfig::load(&path).unwrap();
        assert_eq!(loaded, cfg);
    }

    #[test]
    fn test_load_rejects_zero_sizes() {
        let path = std::env::temp_dir()
            .join(format!("vae-elbo-config-bad-{}", std::process::id()))
            .join("run.json");
        let mut cfg = RunConfig::default();
        cfg.sample_size = 0;
        cfg.save(&path).unwrap();
        assert!(RunConfig::load(&path).is_err());
    }
}
