//! Subgroup samples: one rational subgroup of individual measurements.

use serde::{Deserialize, Serialize};

use crate::error::SpcError;

/// One subgroup of measurements with its derived statistics.
///
/// The raw values are fixed at construction; the mean and range are computed
/// once and never drift from them. Deserialization goes through
/// [`SubgroupSample::new`] as well.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSubgroup")]
pub struct SubgroupSample {
    sample_id: usize,
    raw_values: Vec<f64>,
    mean: f64,
    range: f64,
}

impl SubgroupSample {
    /// Build a subgroup from its measurements.
    ///
    /// `sample_id` is the 1-based position of the subgroup in its series.
    ///
    /// # Returns
    ///
    /// `None` if `raw_values` is empty or contains NaN/Inf.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_spc_sim::spc::SubgroupSample;
    ///
    /// let s = SubgroupSample::new(1, vec![99.5, 100.0, 101.5]).unwrap();
    /// assert!((s.mean() - 100.333).abs() < 1e-3);
    /// assert!((s.range() - 2.0).abs() < 1e-12);
    /// ```
    pub fn new(sample_id: usize, raw_values: Vec<f64>) -> Option<Self> {
        let mean = u_numflow::stats::mean(&raw_values)?;
        let range = u_numflow::stats::max(&raw_values)? - u_numflow::stats::min(&raw_values)?;
        Some(Self {
            sample_id,
            raw_values,
            mean,
            range,
        })
    }

    /// 1-based position of this subgroup in its series.
    pub fn sample_id(&self) -> usize {
        self.sample_id
    }

    /// The individual measurements, in draw order.
    pub fn raw_values(&self) -> &[f64] {
        &self.raw_values
    }

    /// Arithmetic mean of the measurements (X-bar).
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Largest minus smallest measurement (R).
    pub fn range(&self) -> f64 {
        self.range
    }

    /// Number of measurements in the subgroup.
    pub fn len(&self) -> usize {
        self.raw_values.len()
    }

    /// Always `false`: construction and deserialization reject empty subgroups.
    pub fn is_empty(&self) -> bool {
        self.raw_values.is_empty()
    }
}

/// Serialized form of a subgroup.
///
/// `mean` and `range` are optional; when present they must match the values
/// recomputed from `raw_values`, up to text round-trip error.
#[derive(Deserialize)]
struct RawSubgroup {
    sample_id: usize,
    raw_values: Vec<f64>,
    mean: Option<f64>,
    range: Option<f64>,
}

impl TryFrom<RawSubgroup> for SubgroupSample {
    type Error = SpcError;

    fn try_from(raw: RawSubgroup) -> Result<Self, Self::Error> {
        let sample_id = raw.sample_id;
        let sample = Self::new(sample_id, raw.raw_values)
            .ok_or(SpcError::InvalidSubgroup { sample_id })?;
        let mean_ok = raw.mean.map_or(true, |m| matches_stat(m, sample.mean));
        let range_ok = raw.range.map_or(true, |r| matches_stat(r, sample.range));
        if !(mean_ok && range_ok) {
            return Err(SpcError::InvalidSubgroup { sample_id });
        }
        Ok(sample)
    }
}

fn matches_stat(stored: f64, recomputed: f64) -> bool {
    (stored - recomputed).abs() <= 1e-9 * recomputed.abs().max(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_and_range() {
        let s = SubgroupSample::new(2, vec![45.0, 47.0, 50.0, 53.0, 55.0]).expect("valid");
        assert_eq!(s.sample_id(), 2);
        assert_eq!(s.len(), 5);
        assert!((s.mean() - 50.0).abs() < f64::EPSILON);
        assert!((s.range() - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_constant_subgroup_has_zero_range() {
        let s = SubgroupSample::new(1, vec![100.0; 5]).expect("valid");
        assert!((s.mean() - 100.0).abs() < f64::EPSILON);
        assert!(s.range().abs() < f64::EPSILON);
    }

    #[test]
    fn test_single_value_subgroup() {
        let s = SubgroupSample::new(1, vec![7.5]).expect("valid");
        assert!((s.mean() - 7.5).abs() < f64::EPSILON);
        assert!(s.range().abs() < f64::EPSILON);
    }

    #[test]
    fn test_rejects_empty() {
        assert!(SubgroupSample::new(1, Vec::new()).is_none());
    }

    #[test]
    fn test_rejects_non_finite() {
        assert!(SubgroupSample::new(1, vec![1.0, f64::NAN]).is_none());
        assert!(SubgroupSample::new(1, vec![f64::INFINITY, 1.0]).is_none());
    }

    #[test]
    fn test_deserialize_round_trip() {
        let s = SubgroupSample::new(4, vec![99.5, 100.0, 101.5]).expect("valid");
        let json = serde_json::to_string(&s).expect("serialize");
        let back: SubgroupSample = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back.sample_id(), 4);
        assert_eq!(back.raw_values(), s.raw_values());
        assert!((back.mean() - s.mean()).abs() < 1e-9);
        assert!(!back.is_empty());
    }

    #[test]
    fn test_deserialize_recomputes_missing_statistics() {
        let s: SubgroupSample =
            serde_json::from_str(r#"{"sample_id":1,"raw_values":[9.0,11.0,10.0]}"#)
                .expect("deserialize");
        assert!((s.mean() - 10.0).abs() < f64::EPSILON);
        assert!((s.range() - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_deserialize_rejects_empty_values() {
        let parsed: Result<SubgroupSample, _> =
            serde_json::from_str(r#"{"sample_id":1,"raw_values":[],"mean":500.0,"range":-3.0}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_deserialize_rejects_inconsistent_statistics() {
        let bad_mean: Result<SubgroupSample, _> = serde_json::from_str(
            r#"{"sample_id":1,"raw_values":[9.0,11.0],"mean":500.0,"range":2.0}"#,
        );
        assert!(bad_mean.is_err());

        let bad_range: Result<SubgroupSample, _> = serde_json::from_str(
            r#"{"sample_id":1,"raw_values":[9.0,11.0],"mean":10.0,"range":-3.0}"#,
        );
        assert!(bad_range.is_err());
    }

    #[test]
    fn test_raw_values_preserved_in_order() {
        let s = SubgroupSample::new(1, vec![3.0, 1.0, 2.0]).expect("valid");
        assert_eq!(s.raw_values(), &[3.0, 1.0, 2.0]);
    }
}
