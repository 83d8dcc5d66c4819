use crate::core::reference::ReferenceData;
use crate::domain::model::{AssessmentInput, AssessmentResult, Classification, ReferenceCurve, Sex};
use crate::domain::ports::ReferenceSource;
use crate::utils::error::Result;

/// Weight on `curve` at a fractional age, linearly interpolated between
/// the neighbouring whole months. Ages outside 0..=24 clamp to the end
/// points, NaN clamps to month 0.
pub fn interpolate_at(curve: &ReferenceCurve, age_months: f64) -> f64 {
    let first = curve.first();
    let last = curve.last();
    if age_months.is_nan() || age_months <= f64::from(first.age_months) {
        return first.weight_kg;
    }
    if age_months >= f64::from(last.age_months) {
        return last.weight_kg;
    }

    let lo = age_months.floor();
    let hi = age_months.ceil();
    let points = curve.points();
    let y_lo = points[lo as usize].weight_kg;
    if lo == hi {
        return y_lo;
    }
    let y_hi = points[hi as usize].weight_kg;

    y_lo + ((age_months - lo) / (hi - lo)) * (y_hi - y_lo)
}

/// Places `weight_kg` against the p15/p85 band. Weights that are not
/// positive mean nothing was entered and read as within range.
pub fn classify_weight(weight_kg: f64, p15: f64, p85: f64) -> Classification {
    if weight_kg.is_nan() || weight_kg <= 0.0 {
        return Classification::Within;
    }
    if weight_kg < p15 {
        Classification::Under
    } else if weight_kg > p85 {
        Classification::Over
    } else {
        Classification::Within
    }
}

pub struct GrowthEngine<R: ReferenceSource> {
    source: R,
}

impl GrowthEngine<&'static ReferenceData> {
    pub fn simplified() -> Self {
        Self {
            source: ReferenceData::simplified(),
        }
    }
}

impl GrowthEngine<ReferenceData> {
    /// Validates the tables once; a malformed table is fatal.
    pub fn new(source: ReferenceData) -> Result<Self> {
        source.validate()?;
        Ok(Self { source })
    }
}

impl<R: ReferenceSource> GrowthEngine<R> {
    pub fn source(&self) -> &R {
        &self.source
    }

    pub fn classify(&self, age_months: f64, weight_kg: f64, sex: Sex) -> AssessmentResult {
        let set = self.source.curve_set(sex);
        let p15 = interpolate_at(&set.p15, age_months);
        let p50 = interpolate_at(&set.p50, age_months);
        let p85 = interpolate_at(&set.p85, age_months);

        let classification = classify_weight(weight_kg, p15, p85);
        tracing::debug!(
            %sex,
            age_months,
            weight_kg,
            p15,
            p85,
            %classification,
            "Assessed weight-for-age"
        );

        AssessmentResult {
            p15,
            p50,
            p85,
            classification,
            label: classification.label(),
            color: classification.color(),
        }
    }

    pub fn assess(&self, input: &AssessmentInput) -> AssessmentResult {
        self.classify(input.age_months, input.weight_kg, input.sex)
    }
}

/// Classifies against the built-in tables.
pub fn classify(age_months: f64, weight_kg: f64, sex: Sex) -> AssessmentResult {
    GrowthEngine::simplified().classify(age_months, weight_kg, sex)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::reference::reference_set;
    use crate::domain::model::CURVE_POINTS;

    #[test]
    fn test_integer_ages_hit_table_exactly() {
        for sex in Sex::ALL {
            let set = reference_set(sex);
            for curve in [&set.p15, &set.p50, &set.p85] {
                for i in 0..CURVE_POINTS {
                    assert_eq!(interpolate_at(curve, i as f64), curve.weight_at(i).unwrap());
                }
            }
        }
    }

    #[test]
    fn test_out_of_range_ages_clamp() {
        let curve = &reference_set(Sex::Male).p50;
        assert_eq!(interpolate_at(curve, -3.0), 3.3);
        assert_eq!(interpolate_at(curve, -0.01), 3.3);
        assert_eq!(interpolate_at(curve, 24.5), 12.2);
        assert_eq!(interpolate_at(curve, 120.0), 12.2);
        assert_eq!(interpolate_at(curve, f64::INFINITY), 12.2);
        assert_eq!(interpolate_at(curve, f64::NAN), 3.3);
    }

    #[test]
    fn test_midpoint_interpolation() {
        let curve = &reference_set(Sex::Male).p15;
        // months 6 and 7: 7.2 and 7.5
        let mid = interpolate_at(curve, 6.5);
        assert!((mid - 7.35).abs() < 1e-9);
    }

    #[test]
    fn test_interpolation_stays_between_neighbours_and_rises() {
        let curve = &reference_set(Sex::Female).p85;
        for n in 0..(CURVE_POINTS - 1) {
            let a = curve.weight_at(n).unwrap();
            let b = curve.weight_at(n + 1).unwrap();
            let mut previous = a;
            for step in 1..10 {
                let v = interpolate_at(curve, n as f64 + step as f64 / 10.0);
                assert!(v >= a.min(b) && v <= a.max(b));
                assert!(v >= previous);
                previous = v;
            }
        }
    }

    #[test]
    fn test_classify_weight_boundaries_are_within() {
        assert_eq!(classify_weight(7.2, 7.2, 8.9), Classification::Within);
        assert_eq!(classify_weight(8.9, 7.2, 8.9), Classification::Within);
        assert_eq!(classify_weight(7.19, 7.2, 8.9), Classification::Under);
        assert_eq!(classify_weight(8.91, 7.2, 8.9), Classification::Over);
    }

    #[test]
    fn test_classify_weight_non_positive_is_within() {
        assert_eq!(classify_weight(0.0, 7.2, 8.9), Classification::Within);
        assert_eq!(classify_weight(-1.0, 7.2, 8.9), Classification::Within);
        assert_eq!(classify_weight(f64::NAN, 7.2, 8.9), Classification::Within);
    }

    #[test]
    fn test_engine_reports_interpolated_band() {
        let result = classify(6.0, 7.5, Sex::Male);
        assert_eq!(result.p15, 7.2);
        assert_eq!(result.p50, 7.9);
        assert_eq!(result.p85, 8.9);
        assert_eq!(result.classification, Classification::Within);
        assert_eq!(result.label, "Within range");
    }

    #[test]
    fn test_assess_matches_classify_for_six_month_boy() {
        let engine = GrowthEngine::simplified();
        for (weight_kg, expected) in [
            (6.8, Classification::Under),
            (10.0, Classification::Over),
            (7.5, Classification::Within),
            (0.0, Classification::Within),
        ] {
            let input = AssessmentInput {
                age_months: 6.0,
                weight_kg,
                sex: Sex::Male,
            };
            let result = engine.assess(&input);
            assert_eq!(result, engine.classify(6.0, weight_kg, Sex::Male));
            assert_eq!(result.classification, expected, "{} kg", weight_kg);
        }
    }

    #[test]
    fn test_engine_uses_custom_source() {
        use crate::core::reference::CurveTables;
        let good = CurveTables {
            p15: vec![3.0; CURVE_POINTS],
            p50: vec![3.5; CURVE_POINTS],
            p85: vec![4.0; CURVE_POINTS],
        };
        let data = ReferenceData::from_tables(good.clone(), good).unwrap();
        let engine = GrowthEngine::new(data).unwrap();
        assert_eq!(
            engine.classify(3.0, 3.5, Sex::Female).classification,
            Classification::Within
        );
    }
}
