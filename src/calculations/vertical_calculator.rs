use super::calculator::{
    CalculationDetails, CalculationError, CalculationResult, Calculator, ChamberType, DesignInput,
};
use super::constants::{FREEBOARD, LENGTH_DECIMALS};
use super::parameters::VerticalParams;
use super::rounding_helper::RoundingHelper;
use std::f64::consts::PI;

pub struct VerticalCalculator {
    rise_velocity: f64,
    residence_time: f64,
}

impl VerticalCalculator {
    pub fn new(params: &VerticalParams) -> Result<Self, CalculationError> {
        Ok(VerticalCalculator {
            rise_velocity: RoundingHelper::require_positive("Rise velocity", params.v_up)?,
            residence_time: RoundingHelper::require_positive("Residence time", params.t)?,
        })
    }
}

impl Calculator for VerticalCalculator {
    fn chamber_type(&self) -> ChamberType {
        ChamberType::Vertical
    }

    fn perform_calculation(
        &self,
        input: &DesignInput,
    ) -> Result<CalculationResult, CalculationError> {
        input.validate()?;

        let area = input.flow_rate / self.rise_velocity;
        let diameter = (4.0 * area / PI).sqrt();
        let effective_depth = self.rise_velocity * self.residence_time;
        // Grit cone taken as half the diameter high.
        let cone_height = diameter / 2.0;
        let total_depth = FREEBOARD + effective_depth + cone_height;

        log::debug!(
            "Vertical chamber: A={:.3} D={:.3} h2={:.3} h4={:.3}",
            area,
            diameter,
            effective_depth,
            cone_height
        );

        let diameter_rounded = RoundingHelper::round(diameter, LENGTH_DECIMALS);
        RoundingHelper::ensure_finite(CalculationResult {
            chamber_type: ChamberType::Vertical,
            length: diameter_rounded,
            total_width: diameter_rounded,
            total_depth: RoundingHelper::round(total_depth, LENGTH_DECIMALS),
            effective_depth: RoundingHelper::round(effective_depth, LENGTH_DECIMALS),
            num_channels: None,
            volume_grit: None,
            air_supply: None,
            diameter: Some(diameter_rounded),
            details: CalculationDetails {
                area: RoundingHelper::round(area, LENGTH_DECIMALS),
                cone_height: Some(RoundingHelper::round(cone_height, LENGTH_DECIMALS)),
                ..CalculationDetails::default()
            },
        })
    }
}
