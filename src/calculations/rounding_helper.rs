use super::calculator::{CalculationError, CalculationResult};

pub struct RoundingHelper;

impl RoundingHelper {
    pub fn round(value: f64, decimals: u32) -> f64 {
        let factor = 10f64.powi(decimals as i32);
        (value * factor).round() / factor
    }

    pub fn require_positive(name: &str, value: f64) -> Result<f64, CalculationError> {
        if value.is_finite() && value > 0.0 {
            Ok(value)
        } else {
            Err(CalculationError::new(&format!(
                "{} must be a positive number.",
                name
            )))
        }
    }

    pub fn require_non_negative(name: &str, value: f64) -> Result<f64, CalculationError> {
        if value.is_finite() && value >= 0.0 {
            Ok(value)
        } else {
            Err(CalculationError::new(&format!(
                "{} must be zero or a positive number.",
                name
            )))
        }
    }

    // Last line of defence against overflow slipping into a result.
    pub fn ensure_finite(result: CalculationResult) -> Result<CalculationResult, CalculationError> {
        match result
            .numeric_fields()
            .into_iter()
            .find(|(_, value)| !value.is_finite() || *value < 0.0)
        {
            Some((name, value)) => Err(CalculationError::new(&format!(
                "{} evaluated to {}.",
                name, value
            ))),
            None => Ok(result),
        }
    }
}
