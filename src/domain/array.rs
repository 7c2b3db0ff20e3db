// ============================================================
// Layer 3 — HostArray Domain Type
// ============================================================
// A dense, row-major f32 array in host memory. This is the
// currency between the CLI / file layer and the model layer:
// images go in as [batch, img_size], latents come out as
// [sample, batch, latent].
//
// JSON form:
//   { "shape": [2, 3], "data": [0.1, 0.2, 0.3, 0.4, 0.5, 0.6] }

use anyhow::{bail, ensure, Result};
use serde::{Deserialize, Serialize};

/// A row-major array of f32 values with an explicit shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostArray {
    /// Size of each dimension, outermost first
    pub shape: Vec<usize>,

    /// Flattened values, `shape.iter().product()` of them
    pub data: Vec<f32>,
}

impl HostArray {
    /// Create a new array, rejecting data whose length does not
    /// match the shape.
    pub fn new(shape: impl Into<Vec<usize>>, data: Vec<f32>) -> Result<Self> {
        let shape = shape.into();
        let expected = element_count(&shape)?;
        ensure!(
            data.len() == expected,
            "array of shape {:?} needs {} values, got {}",
            shape,
            expected,
            data.len()
        );
        Ok(Self { shape, data })
    }

    /// # Panics
    /// If the shape holds more elements than can be allocated.
    pub fn zeros(shape: impl Into<Vec<usize>>) -> Self {
        let shape = shape.into();
        let len = shape.iter().fold(1usize, |n, &d| n.saturating_mul(d));
        Self { shape, data: vec![0.0; len] }
    }

    pub fn rank(&self) -> usize {
        self.shape.len()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Shape as a fixed-size array. Fails if the rank is not `N`.
    pub fn dims<const N: usize>(&self) -> Result<[usize; N]> {
        if self.shape.len() != N {
            bail!("expected a rank-{} array, got shape {:?}", N, self.shape);
        }
        let mut dims = [0usize; N];
        dims.copy_from_slice(&self.shape);
        Ok(dims)
    }

    /// Re-checks the shape/data invariant. Used after deserialising,
    /// since serde bypasses `new`.
    pub fn validate(&self) -> Result<()> {
        let expected = element_count(&self.shape)?;
        ensure!(
            self.data.len() == expected,
            "array of shape {:?} needs {} values, got {}",
            self.shape,
            expected,
            self.data.len()
        );
        Ok(())
    }
}

/// Number of elements in `shape`, or an error if it overflows `usize`.
fn element_count(shape: &[usize]) -> Result<usize> {
    match shape.iter().try_fold(1usize, |n, &d| n.checked_mul(d)) {
        Some(n) => Ok(n),
        None => bail!("array shape {:?} has too many elements", shape),
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_accepts_matching_length() {
        let a = HostArray::new([2, 3], vec![0.0; 6]).unwrap();
        assert_eq!(a.rank(), 2);
        assert_eq!(a.len(), 6);
    }

    #[test]
    fn test_new_rejects_wrong_length() {
        assert!(HostArray::new([2, 3], vec![0.0; 5]).is_err());
    }

    #[test]
    fn test_dims_checks_rank() {
        let a = HostArray::zeros([1, 2, 3]);
        assert_eq!(a.dims::<3>().unwrap(), [1, 2, 3]);
        assert!(a.dims::<2>().is_err());
    }

    #[test]
    fn test_overflowing_shape_is_an_error() {
        assert!(HostArray::new([usize::MAX, 2], Vec::new()).is_err());
    }

    #[test]
    fn test_validate_catches_tampered_json() {
        let a: HostArray = serde_json::from_str(r#"{"shape":[2,2],"data":[1.0,2.0]}"#).unwrap();
        assert!(a.validate().is_err());
    }
}
