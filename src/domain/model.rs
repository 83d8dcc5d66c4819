use crate::utils::error::{GrowthError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Ages covered by a reference curve, in whole months: 0..=24.
pub const CURVE_POINTS: usize = 25;
pub const MAX_CURVE_AGE: u8 = (CURVE_POINTS - 1) as u8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    pub const ALL: [Sex; 2] = [Sex::Male, Sex::Female];

    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Male => "male",
            Sex::Female => "female",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sex {
    type Err = GrowthError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" | "m" | "boy" => Ok(Sex::Male),
            "female" | "f" | "girl" => Ok(Sex::Female),
            other => Err(GrowthError::InvalidInputError {
                field: "sex".to_string(),
                message: format!("'{}' is not one of male, female", other),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Percentile {
    P15,
    P50,
    P85,
}

impl Percentile {
    pub const ALL: [Percentile; 3] = [Percentile::P15, Percentile::P50, Percentile::P85];

    pub fn as_str(&self) -> &'static str {
        match self {
            Percentile::P15 => "p15",
            Percentile::P50 => "p50",
            Percentile::P85 => "p85",
        }
    }
}

impl fmt::Display for Percentile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReferencePoint {
    pub age_months: u8,
    pub weight_kg: f64,
}

/// One percentile curve sampled at every whole month from 0 to 24.
///
/// The fixed-size array makes the point count structural; the age of
/// point `i` is always `i`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReferenceCurve {
    points: [ReferencePoint; CURVE_POINTS],
}

impl ReferenceCurve {
    pub fn from_table(weights: &[f64; CURVE_POINTS]) -> Self {
        let mut points = [ReferencePoint {
            age_months: 0,
            weight_kg: 0.0,
        }; CURVE_POINTS];
        for (i, (point, weight)) in points.iter_mut().zip(weights.iter()).enumerate() {
            point.age_months = i as u8;
            point.weight_kg = *weight;
        }
        Self { points }
    }

    /// Builds a curve from an arbitrary slice, as read from configuration.
    pub fn from_weights(sex: Sex, percentile: Percentile, weights: &[f64]) -> Result<Self> {
        let table: &[f64; CURVE_POINTS] =
            weights
                .try_into()
                .map_err(|_| GrowthError::ReferenceTableError {
                    sex: sex.to_string(),
                    percentile: percentile.to_string(),
                    reason: format!("expected {} points, got {}", CURVE_POINTS, weights.len()),
                })?;
        let curve = Self::from_table(table);
        curve.validate(sex, percentile)?;
        Ok(curve)
    }

    pub fn points(&self) -> &[ReferencePoint] {
        &self.points
    }

    pub fn first(&self) -> &ReferencePoint {
        &self.points[0]
    }

    pub fn last(&self) -> &ReferencePoint {
        &self.points[CURVE_POINTS - 1]
    }

    /// Weight at a whole month. `None` past month 24.
    pub fn weight_at(&self, age_months: usize) -> Option<f64> {
        self.points.get(age_months).map(|p| p.weight_kg)
    }

    pub fn validate(&self, sex: Sex, percentile: Percentile) -> Result<()> {
        let fail = |reason: String| GrowthError::ReferenceTableError {
            sex: sex.to_string(),
            percentile: percentile.to_string(),
            reason,
        };

        for (i, point) in self.points.iter().enumerate() {
            if point.age_months as usize != i {
                return Err(fail(format!(
                    "point {} has age {} months",
                    i, point.age_months
                )));
            }
            if !point.weight_kg.is_finite() || point.weight_kg <= 0.0 {
                return Err(fail(format!(
                    "weight at month {} must be positive, got {}",
                    i, point.weight_kg
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReferenceCurveSet {
    pub p15: ReferenceCurve,
    pub p50: ReferenceCurve,
    pub p85: ReferenceCurve,
}

impl ReferenceCurveSet {
    pub fn curve(&self, percentile: Percentile) -> &ReferenceCurve {
        match percentile {
            Percentile::P15 => &self.p15,
            Percentile::P50 => &self.p50,
            Percentile::P85 => &self.p85,
        }
    }

    /// Checks every curve and the p15 <= p50 <= p85 ordering at each month.
    pub fn validate(&self, sex: Sex) -> Result<()> {
        for percentile in Percentile::ALL {
            self.curve(percentile).validate(sex, percentile)?;
        }

        let rows = self
            .p15
            .points()
            .iter()
            .zip(self.p50.points())
            .zip(self.p85.points());
        for ((low, mid), high) in rows {
            if low.weight_kg > mid.weight_kg {
                return Err(GrowthError::ReferenceTableError {
                    sex: sex.to_string(),
                    percentile: Percentile::P15.to_string(),
                    reason: format!(
                        "{} kg exceeds p50 {} kg at month {}",
                        low.weight_kg, mid.weight_kg, low.age_months
                    ),
                });
            }
            if mid.weight_kg > high.weight_kg {
                return Err(GrowthError::ReferenceTableError {
                    sex: sex.to_string(),
                    percentile: Percentile::P85.to_string(),
                    reason: format!(
                        "{} kg is below p50 {} kg at month {}",
                        high.weight_kg, mid.weight_kg, mid.age_months
                    ),
                });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AssessmentInput {
    pub age_months: f64,
    pub weight_kg: f64,
    pub sex: Sex,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    Under,
    Within,
    Over,
}

impl Classification {
    pub fn label(&self) -> &'static str {
        match self {
            Classification::Under => "Under (below 15th centile)",
            Classification::Over => "Over (above 85th centile)",
            Classification::Within => "Within range",
        }
    }

    /// Display color token, kept in step with the chart's curve colors.
    pub fn color(&self) -> &'static str {
        match self {
            Classification::Under => "#ffb74d",
            Classification::Over => "#81c784",
            Classification::Within => "#64B5F6",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::Under => "under",
            Classification::Within => "within",
            Classification::Over => "over",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssessmentResult {
    pub p15: f64,
    pub p50: f64,
    pub p85: f64,
    pub classification: Classification,
    pub label: &'static str,
    pub color: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(start: f64) -> Vec<f64> {
        (0..CURVE_POINTS).map(|i| start + i as f64 * 0.5).collect()
    }

    #[test]
    fn test_sex_from_str() {
        assert_eq!("male".parse::<Sex>().unwrap(), Sex::Male);
        assert_eq!("Girl".parse::<Sex>().unwrap(), Sex::Female);
        assert_eq!(" F ".parse::<Sex>().unwrap(), Sex::Female);
        assert!("other".parse::<Sex>().is_err());
    }

    #[test]
    fn test_curve_ages_follow_index() {
        let curve = ReferenceCurve::from_weights(Sex::Male, Percentile::P50, &ramp(3.0)).unwrap();
        for (i, point) in curve.points().iter().enumerate() {
            assert_eq!(point.age_months as usize, i);
        }
        assert_eq!(curve.last().age_months, MAX_CURVE_AGE);
        assert_eq!(curve.weight_at(25), None);
    }

    #[test]
    fn test_curve_rejects_wrong_length() {
        let err =
            ReferenceCurve::from_weights(Sex::Female, Percentile::P15, &[3.0; 24]).unwrap_err();
        assert!(matches!(err, GrowthError::ReferenceTableError { .. }));
        assert!(err.to_string().contains("got 24"));
    }

    #[test]
    fn test_curve_rejects_non_positive_weight() {
        let mut weights = ramp(3.0);
        weights[7] = 0.0;
        assert!(ReferenceCurve::from_weights(Sex::Male, Percentile::P85, &weights).is_err());
    }

    #[test]
    fn test_curve_set_rejects_crossed_percentiles() {
        let set = ReferenceCurveSet {
            p15: ReferenceCurve::from_weights(Sex::Male, Percentile::P15, &ramp(3.0)).unwrap(),
            p50: ReferenceCurve::from_weights(Sex::Male, Percentile::P50, &ramp(2.0)).unwrap(),
            p85: ReferenceCurve::from_weights(Sex::Male, Percentile::P85, &ramp(4.0)).unwrap(),
        };
        let err = set.validate(Sex::Male).unwrap_err();
        assert!(err.to_string().contains("male p15"));
    }

    #[test]
    fn test_classification_labels() {
        assert_eq!(Classification::Under.label(), "Under (below 15th centile)");
        assert_eq!(Classification::Over.label(), "Over (above 85th centile)");
        assert_eq!(Classification::Within.label(), "Within range");
        assert_eq!(Classification::Within.color(), "#64B5F6");
    }
}
