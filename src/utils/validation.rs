use crate::utils::error::{GrowthError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Inclusive bounds applied to raw caregiver input before assessment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeasurementBounds {
    pub min: f64,
    pub max: f64,
}

impl MeasurementBounds {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn clamp(&self, value: f64) -> f64 {
        value.max(self.min).min(self.max)
    }
}

pub const AGE_BOUNDS: MeasurementBounds = MeasurementBounds::new(0.0, 24.0);
pub const WEIGHT_BOUNDS: MeasurementBounds = MeasurementBounds::new(0.0, 25.0);

/// Parses a number typed by a person. A comma is accepted as the decimal
/// separator; text that is not a number reads as `0.0` so that an empty
/// field means "no measurement" rather than an error.
pub fn parse_measurement(field_name: &str, raw: &str) -> f64 {
    let normalized = raw.trim().replace(',', ".");
    match normalized.parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => {
            if !normalized.is_empty() {
                tracing::warn!("Ignoring non-numeric {} input: {:?}", field_name, raw);
            }
            0.0
        }
    }
}

pub fn sanitize_measurement(field_name: &str, raw: &str, bounds: MeasurementBounds) -> f64 {
    bounds.clamp(parse_measurement(field_name, raw))
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    // NaN compares as unordered and must not slip through
    if value.partial_cmp(&min).is_none() || value < min || value > max {
        return Err(GrowthError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

pub fn validate_one_of(field_name: &str, value: &str, allowed: &[&str]) -> Result<()> {
    if !allowed.contains(&value) {
        return Err(GrowthError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Valid values: {}", allowed.join(", ")),
        });
    }
    Ok(())
}
