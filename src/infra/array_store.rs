// ============================================================
// Layer 6 — Array Store
// ============================================================
// Reads and writes HostArray values as JSON files. Latents
// produced by `encode` are fed back into `decode` through this
// format, so both directions must agree exactly.
//
// File layout:
//   { "shape": [1, 20, 10], "data": [ ... 200 floats ... ] }

use anyhow::{bail, Context, Result};
use std::{fs, path::Path};

use crate::domain::array::HostArray;

/// Read a HostArray from a JSON file and check its shape/data invariant.
pub fn read_array(path: &Path) -> Result<HostArray> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Cannot read array from '{}'", path.display()))?;
    let array: HostArray = serde_json::from_str(&json)
        .with_context(|| format!("'{}' is not a valid array file", path.display()))?;
    array
        .validate()
        .with_context(|| format!("Corrupt array file '{}'", path.display()))?;
    tracing::debug!("Read array {:?} from '{}'", array.shape, path.display());
    Ok(array)
}

/// Write a HostArray as JSON, creating parent directories as needed.
/// Non-finite values are rejected: JSON has no encoding for them.
pub fn write_array(path: &Path, array: &HostArray) -> Result<()> {
    if let Some(i) = array.data.iter().position(|v| !v.is_finite()) {
        bail!(
            "Cannot write '{}': value {} at index {} is not finite",
            path.display(),
            array.data[i],
            i
        );
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Cannot create directory '{}'", parent.display()))?;
    }
    let json = serde_json::to_string(array)?;
    fs::write(path, json)
        .with_context(|| format!("Cannot write array to '{}'", path.display()))?;
    tracing::debug!("Wrote array {:?} to '{}'", array.shape, path.display());
    Ok(())
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn scratch(name: &str) -> std::path::PathBuf {
        std::env::temp_dir()
            .join(format!("vae-elbo-{}", std::process::id()))
            .join(name)
    }

    #[test]
    fn test_write_then_read() {
        let path = scratch("latent.json");
        let a = HostArray::new([1, 2, 2], vec![0.5, -1.0, 2.25, 0.0]).unwrap();
        write_array(&path, &a).unwrap();
        assert_eq!(read_array(&path).unwrap(), a);
    }

    #[test]
    fn test_read_rejects_inconsistent_file() {
        let path = scratch("broken.json");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, r#"{"shape":[3],"data":[1.0]}"#).unwrap();
        assert!(read_array(&path).is_err());
    }

    #[test]
    fn test_read_rejects_overflowing_shape() {
        let path = scratch("huge.json");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, r#"{"shape":[4294967296,4294967296,2],"data":[]}"#).unwrap();
        let err = read_array(&path).unwrap_err();
        assert!(format!("{err:#}").contains("too many elements"));
    }

    #[test]
    fn test_write_rejects_non_finite_values() {
        let path = scratch("overflowed.json");
        let a = HostArray::new([1, 3], vec![1.0, f32::INFINITY, f32::NAN]).unwrap();
        let err = write_array(&path, &a).unwrap_err();
        assert!(err.to_string().contains("index 1"));
        assert!(!path.exists());
    }

    #[test]
    fn test_missing_file_names_path() {
        let err = read_array(Path::new("/nonexistent/vae.json")).unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/vae.json"));
    }
}
