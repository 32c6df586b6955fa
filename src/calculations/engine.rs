//! Entry points for sizing a grit chamber.
//!
//! The functions are pure: identical arguments give identical results and
//! nothing is cached between calls, so callers may recompute on every input
//! event.
use super::aerated_calculator::AeratedCalculator;
use super::calculator::{CalculationError, CalculationResult, Calculator, DesignInput};
use super::horizontal_calculator::HorizontalCalculator;
use super::parameters::{AeratedParams, HorizontalParams, ParameterSet, VerticalParams};
use super::vertical_calculator::VerticalCalculator;

pub fn calculate_horizontal(
    input: &DesignInput,
    params: &HorizontalParams,
) -> Result<CalculationResult, CalculationError> {
    HorizontalCalculator::new(params)?.perform_calculation(input)
}

pub fn calculate_aerated(
    input: &DesignInput,
    params: &AeratedParams,
) -> Result<CalculationResult, CalculationError> {
    AeratedCalculator::new(params)?.perform_calculation(input)
}

pub fn calculate_vertical(
    input: &DesignInput,
    params: &VerticalParams,
) -> Result<CalculationResult, CalculationError> {
    VerticalCalculator::new(params)?.perform_calculation(input)
}

pub fn create_calculator(params: &ParameterSet) -> Result<Box<dyn Calculator>, CalculationError> {
    let calculator: Box<dyn Calculator> = match params {
        ParameterSet::Horizontal(p) => Box::new(HorizontalCalculator::new(p)?),
        ParameterSet::Aerated(p) => Box::new(AeratedCalculator::new(p)?),
        ParameterSet::Vertical(p) => Box::new(VerticalCalculator::new(p)?),
    };
    Ok(calculator)
}

/// Sizes the chamber selected by `input` with the matching parameter set.
pub fn try_calculate(
    input: &DesignInput,
    params: &ParameterSet,
) -> Result<CalculationResult, CalculationError> {
    if params.chamber_type() != input.chamber_type {
        return Err(CalculationError::new(&format!(
            "{} parameters cannot size a {} chamber.",
            params.chamber_type(),
            input.chamber_type
        )));
    }

    let out_of_range = params.out_of_range_fields();
    if !out_of_range.is_empty() {
        log::warn!(
            "{} parameters outside recommended range: {}",
            input.chamber_type,
            out_of_range.join(", ")
        );
    }

    let calculator = create_calculator(params)?;
    log::debug!(
        "Sizing {} chamber for Q={} Kz={}",
        calculator.chamber_type(),
        input.flow_rate,
        input.variation_coefficient
    );
    calculator.perform_calculation(input)
}

/// Like [`try_calculate`], but declines with `None` instead of an error.
pub fn calculate(input: &DesignInput, params: &ParameterSet) -> Option<CalculationResult> {
    match try_calculate(input, params) {
        Ok(result) => Some(result),
        Err(e) => {
            log::debug!("Calculation declined: {}", e);
            None
        }
    }
}
