//! Composite score math.

use crate::error::{QualityError, QualityResult};
use qc_core::family::FieldGroup;

/// Round to two decimal places, the precision reports display and export.
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Mean of a rate slice; None for an empty slice.
pub(crate) fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// Weighted blend of required- and recommended-field completeness rates.
///
/// `score = w * mean(required) + (1 - w) * mean(recommended)`. Fails when
/// either slice is empty — the mean of zero elements is undefined and must
/// not silently default to 0 or 100.
pub fn composite_score(
    required_rates: &[f64],
    recommended_rates: &[f64],
    required_weight: f64,
) -> QualityResult<f64> {
    let avg_required = mean(required_rates).ok_or(QualityError::EmptyFieldSet {
        group: FieldGroup::Required,
    })?;
    let avg_recommended = mean(recommended_rates).ok_or(QualityError::EmptyFieldSet {
        group: FieldGroup::Recommended,
    })?;
    Ok(required_weight * avg_required + (1.0 - required_weight) * avg_recommended)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights() {
        let score = composite_score(&[100.0, 80.0], &[50.0], 0.7).unwrap();
        // 0.7 * 90 + 0.3 * 50
        assert!((score - 78.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_required_rejected() {
        let err = composite_score(&[], &[50.0], 0.7).unwrap_err();
        assert!(matches!(
            err,
            QualityError::EmptyFieldSet {
                group: FieldGroup::Required
            }
        ));
    }

    #[test]
    fn test_empty_recommended_rejected() {
        let err = composite_score(&[90.0], &[], 0.7).unwrap_err();
        assert!(matches!(
            err,
            QualityError::EmptyFieldSet {
                group: FieldGroup::Recommended
            }
        ));
    }

    #[test]
    fn test_monotone_in_each_rate() {
        let base = composite_score(&[80.0, 60.0], &[40.0], 0.7).unwrap();
        let bump_required = composite_score(&[85.0, 60.0], &[40.0], 0.7).unwrap();
        let bump_recommended = composite_score(&[80.0, 60.0], &[45.0], 0.7).unwrap();
        assert!(bump_required > base);
        assert!(bump_recommended > base);
    }

    #[test]
    fn test_bounded_by_group_means() {
        let required = [90.0, 70.0];
        let recommended = [30.0, 50.0];
        let score = composite_score(&required, &recommended, 0.7).unwrap();
        let avg_required: f64 = 80.0;
        let avg_recommended: f64 = 40.0;
        assert!(score >= avg_recommended.min(avg_required));
        assert!(score <= avg_recommended.max(avg_required));
    }

    #[test]
    fn test_extreme_weights() {
        let all_required = composite_score(&[80.0], &[20.0], 1.0).unwrap();
        let all_recommended = composite_score(&[80.0], &[20.0], 0.0).unwrap();
        assert!((all_required - 80.0).abs() < 1e-9);
        assert!((all_recommended - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(89.999), 90.0);
        assert_eq!(round2(66.666_666), 66.67);
        assert_eq!(round2(0.0), 0.0);
    }
}
