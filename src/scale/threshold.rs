use anyhow::{ensure, Result};

use super::color::{Rgb, GREENS_7};

/// Default class breaks for the greens ramp.
pub const DEFAULT_THRESHOLDS: [f64; 6] = [10.0, 50.0, 100.0, 1000.0, 2000.0, 3000.0];

/// Step function from values to colors: `k` strictly increasing thresholds, `k + 1` colors.
///
/// Bucket `i` is the smallest index with `value < thresholds[i]`, or `k` when the value is
/// at or above every threshold. Colors are expected light → dark, so classification is
/// monotonic in value.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorScale {
    thresholds: Vec<f64>,
    colors: Vec<Rgb>,
}

impl ColorScale {
    pub fn new(thresholds: Vec<f64>, colors: Vec<Rgb>) -> Result<Self> {
        ensure!(colors.len() == thresholds.len() + 1,
            "[scale] {} colors for {} thresholds; expected {}",
            colors.len(), thresholds.len(), thresholds.len() + 1);
        ensure!(thresholds.iter().all(|t| t.is_finite()),
            "[scale] thresholds must be finite: {:?}", thresholds);
        ensure!(thresholds.windows(2).all(|w| w[0] < w[1]),
            "[scale] thresholds must be strictly increasing: {:?}", thresholds);

        Ok(Self { thresholds, colors })
    }

    #[inline]
    pub fn thresholds(&self) -> &[f64] { &self.thresholds }

    #[inline]
    pub fn colors(&self) -> &[Rgb] { &self.colors }

    /// Bucket index for `value`. NaN falls into bucket 0.
    #[inline]
    pub fn bucket(&self, value: f64) -> usize {
        self.thresholds.partition_point(|&t| t <= value)
    }

    #[inline]
    pub fn classify(&self, value: f64) -> Rgb {
        self.colors[self.bucket(value)]
    }
}

impl Default for ColorScale {
    fn default() -> Self {
        Self { thresholds: DEFAULT_THRESHOLDS.to_vec(), colors: GREENS_7.to_vec() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_default_breaks() {
        let scale = ColorScale::default();
        assert_eq!(scale.classify(5.0), GREENS_7[0]);
        assert_eq!(scale.classify(10.0), GREENS_7[1]);
        assert_eq!(scale.classify(999.0), GREENS_7[3]);
        assert_eq!(scale.classify(3000.0), GREENS_7[6]);
        assert_eq!(scale.classify(5000.0), GREENS_7[6]);
    }

    #[test]
    fn zero_and_negative_values_use_lowest_bucket() {
        let scale = ColorScale::default();
        assert_eq!(scale.bucket(0.0), 0);
        assert_eq!(scale.bucket(-12.0), 0);
        assert_eq!(scale.bucket(f64::NAN), 0);
        assert_eq!(scale.bucket(f64::INFINITY), 6);
    }

    #[test]
    fn bucket_is_monotonic() {
        let scale = ColorScale::default();
        let values = [-1.0, 0.0, 9.99, 10.0, 49.0, 50.0, 100.0, 101.0, 999.0, 1000.0, 2500.0, 3000.0, 1e9];
        for pair in values.windows(2) {
            assert!(scale.bucket(pair[0]) <= scale.bucket(pair[1]), "{} vs {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn rejects_length_mismatch() {
        let err = ColorScale::new(vec![1.0, 2.0], GREENS_7[..2].to_vec()).unwrap_err();
        assert!(err.to_string().contains("expected 3"));
    }

    #[test]
    fn rejects_unordered_thresholds() {
        assert!(ColorScale::new(vec![2.0, 1.0], GREENS_7[..3].to_vec()).is_err());
        assert!(ColorScale::new(vec![1.0, 1.0], GREENS_7[..3].to_vec()).is_err());
        assert!(ColorScale::new(vec![1.0, f64::NAN], GREENS_7[..3].to_vec()).is_err());
    }

    #[test]
    fn single_color_scale_without_thresholds() {
        let scale = ColorScale::new(vec![], vec![GREENS_7[4]]).unwrap();
        assert_eq!(scale.classify(-1e9), GREENS_7[4]);
        assert_eq!(scale.classify(1e9), GREENS_7[4]);
    }
}
