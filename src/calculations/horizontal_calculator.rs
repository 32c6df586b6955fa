use super::calculator::{
    CalculationDetails, CalculationError, CalculationResult, Calculator, ChamberType, DesignInput,
};
use super::constants::{
    FREEBOARD, GRIT_REFERENCE_VOLUME, GRIT_VOLUME_DECIMALS, HOPPER_ALLOWANCE, LENGTH_DECIMALS,
    MIN_HOPPER_DEPTH, SECONDS_PER_DAY,
};
use super::parameters::HorizontalParams;
use super::rounding_helper::RoundingHelper;

pub struct HorizontalCalculator {
    velocity: f64,
    residence_time: f64,
    effective_depth: f64,
    channel_width: f64,
    grit_load: f64,
    cleaning_interval: f64,
}

impl HorizontalCalculator {
    pub fn new(params: &HorizontalParams) -> Result<Self, CalculationError> {
        Ok(HorizontalCalculator {
            velocity: RoundingHelper::require_positive("Design velocity", params.v)?,
            residence_time: RoundingHelper::require_positive("Residence time", params.t)?,
            effective_depth: RoundingHelper::require_positive("Effective depth", params.h2)?,
            channel_width: RoundingHelper::require_positive("Channel width", params.b_grid)?,
            grit_load: RoundingHelper::require_non_negative("Grit load", params.x_grit)?,
            cleaning_interval: RoundingHelper::require_non_negative(
                "Cleaning interval",
                params.t_clean,
            )?,
        })
    }

    // Smallest channel count whose combined width covers the requirement.
    fn channel_count(&self, required_width: f64) -> Result<u32, CalculationError> {
        let n = (required_width / self.channel_width).ceil().max(1.0);
        if n > f64::from(u32::MAX) {
            return Err(CalculationError::new("Channel count is out of range."));
        }
        Ok(n as u32)
    }

    // Q / Kz stands in for the average flow over the cleaning interval.
    fn grit_volume(&self, input: &DesignInput) -> f64 {
        (input.flow_rate * self.grit_load * self.cleaning_interval * SECONDS_PER_DAY)
            / (input.variation_coefficient * GRIT_REFERENCE_VOLUME)
    }
}

impl Calculator for HorizontalCalculator {
    fn chamber_type(&self) -> ChamberType {
        ChamberType::Horizontal
    }

    fn perform_calculation(
        &self,
        input: &DesignInput,
    ) -> Result<CalculationResult, CalculationError> {
        input.validate()?;

        let length = self.velocity * self.residence_time;
        let area = input.flow_rate / self.velocity;
        let required_width = area / self.effective_depth;
        let num_channels = self.channel_count(required_width)?;
        let total_width = f64::from(num_channels) * self.channel_width;

        let volume_grit = self.grit_volume(input);
        // Grit spread over the plan area, floored at a buildable hopper.
        let grit_depth =
            (volume_grit / (length * total_width) + HOPPER_ALLOWANCE).max(MIN_HOPPER_DEPTH);
        let total_depth = FREEBOARD + self.effective_depth + grit_depth;

        log::debug!(
            "Horizontal chamber: L={:.3} A={:.3} n={} V_grit={:.4} h3={:.3}",
            length,
            area,
            num_channels,
            volume_grit,
            grit_depth
        );

        RoundingHelper::ensure_finite(CalculationResult {
            chamber_type: ChamberType::Horizontal,
            length: RoundingHelper::round(length, LENGTH_DECIMALS),
            total_width: RoundingHelper::round(total_width, LENGTH_DECIMALS),
            total_depth: RoundingHelper::round(total_depth, LENGTH_DECIMALS),
            effective_depth: RoundingHelper::round(self.effective_depth, LENGTH_DECIMALS),
            num_channels: Some(num_channels),
            volume_grit: Some(RoundingHelper::round(volume_grit, GRIT_VOLUME_DECIMALS)),
            air_supply: None,
            diameter: None,
            details: CalculationDetails {
                area: RoundingHelper::round(area, LENGTH_DECIMALS),
                grit_depth: Some(RoundingHelper::round(grit_depth, LENGTH_DECIMALS)),
                velocity_check: Some(self.velocity),
                ..CalculationDetails::default()
            },
        })
    }
}
