//! Built-in weight-for-age reference tables (0–24 months).
//!
//! These are simplified WHO-like percentiles for rapid screening, not the
//! WHO LMS standard. Replacement tables can be supplied through the
//! `[reference]` configuration section.

use crate::domain::model::{Percentile, ReferenceCurve, ReferenceCurveSet, Sex, CURVE_POINTS};
use crate::domain::ports::ReferenceSource;
use crate::utils::error::Result;
use once_cell::sync::Lazy;

const BOYS_P15: [f64; CURVE_POINTS] = [
    2.9, 3.9, 4.9, 5.7, 6.3, 6.8, 7.2, 7.5, 7.8, 8.0, 8.2, 8.4, 8.6, 8.8, 9.0, 9.2, 9.4, 9.6, 9.8,
    10.0, 10.2, 10.4, 10.6, 10.7, 10.8,
];
const BOYS_P50: [f64; CURVE_POINTS] = [
    3.3, 4.5, 5.6, 6.4, 7.0, 7.5, 7.9, 8.3, 8.6, 8.9, 9.2, 9.4, 9.6, 9.8, 10.0, 10.2, 10.4, 10.6,
    10.8, 11.0, 11.2, 11.5, 11.8, 12.0, 12.2,
];
const BOYS_P85: [f64; CURVE_POINTS] = [
    3.8, 5.1, 6.3, 7.2, 7.9, 8.5, 8.9, 9.3, 9.7, 10.0, 10.3, 10.5, 10.8, 11.0, 11.3, 11.5, 11.8,
    12.0, 12.3, 12.6, 12.9, 13.3, 13.6, 13.9, 14.2,
];

const GIRLS_P15: [f64; CURVE_POINTS] = [
    2.8, 3.7, 4.6, 5.3, 5.9, 6.3, 6.6, 6.9, 7.1, 7.3, 7.5, 7.7, 7.9, 8.1, 8.3, 8.5, 8.7, 8.9, 9.1,
    9.3, 9.5, 9.7, 9.9, 10.1, 10.2,
];
const GIRLS_P50: [f64; CURVE_POINTS] = [
    3.2, 4.2, 5.2, 6.0, 6.6, 7.1, 7.5, 7.8, 8.1, 8.4, 8.6, 8.8, 9.0, 9.2, 9.4, 9.6, 9.8, 10.0,
    10.2, 10.4, 10.6, 10.8, 11.1, 11.3, 11.5,
];
const GIRLS_P85: [f64; CURVE_POINTS] = [
    3.7, 4.8, 5.9, 6.8, 7.5, 8.0, 8.5, 8.9, 9.2, 9.5, 9.8, 10.0, 10.2, 10.5, 10.7, 10.9, 11.2,
    11.4, 11.7, 11.9, 12.2, 12.5, 12.8, 13.0, 13.2,
];

// The built-in tables are constants, so a failed check is a build defect.
static SIMPLIFIED: Lazy<ReferenceData> = Lazy::new(|| {
    let data = ReferenceData {
        male: ReferenceCurveSet {
            p15: ReferenceCurve::from_table(&BOYS_P15),
            p50: ReferenceCurve::from_table(&BOYS_P50),
            p85: ReferenceCurve::from_table(&BOYS_P85),
        },
        female: ReferenceCurveSet {
            p15: ReferenceCurve::from_table(&GIRLS_P15),
            p50: ReferenceCurve::from_table(&GIRLS_P50),
            p85: ReferenceCurve::from_table(&GIRLS_P85),
        },
    };
    if let Err(err) = data.validate() {
        panic!("built-in reference tables are invalid: {}", err);
    }
    data
});

/// Built-in curves for one sex.
pub fn reference_set(sex: Sex) -> &'static ReferenceCurveSet {
    SIMPLIFIED.curve_set(sex)
}

/// Raw p15/p50/p85 weights for one sex, as they appear in configuration.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CurveTables {
    pub p15: Vec<f64>,
    pub p50: Vec<f64>,
    pub p85: Vec<f64>,
}

impl CurveTables {
    pub fn into_curve_set(self, sex: Sex) -> Result<ReferenceCurveSet> {
        let set = ReferenceCurveSet {
            p15: ReferenceCurve::from_weights(sex, Percentile::P15, &self.p15)?,
            p50: ReferenceCurve::from_weights(sex, Percentile::P50, &self.p50)?,
            p85: ReferenceCurve::from_weights(sex, Percentile::P85, &self.p85)?,
        };
        set.validate(sex)?;
        Ok(set)
    }
}

/// Both sexes' curve sets.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceData {
    male: ReferenceCurveSet,
    female: ReferenceCurveSet,
}

impl ReferenceData {
    pub fn simplified() -> &'static ReferenceData {
        &SIMPLIFIED
    }

    pub fn from_tables(male: CurveTables, female: CurveTables) -> Result<Self> {
        let data = Self {
            male: male.into_curve_set(Sex::Male)?,
            female: female.into_curve_set(Sex::Female)?,
        };
        tracing::debug!("Loaded custom reference tables");
        Ok(data)
    }

    pub fn validate(&self) -> Result<()> {
        for sex in Sex::ALL {
            self.curve_set(sex).validate(sex)?;
        }
        Ok(())
    }
}

impl ReferenceSource for ReferenceData {
    fn curve_set(&self, sex: Sex) -> &ReferenceCurveSet {
        match sex {
            Sex::Male => &self.male,
            Sex::Female => &self.female,
        }
    }
}
