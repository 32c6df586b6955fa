use super::calculator::{
    CalculationDetails, CalculationError, CalculationResult, Calculator, ChamberType, DesignInput,
};
use super::constants::{
    AERATED_SUMP_DEPTH, AIR_SUPPLY_DECIMALS, FREEBOARD, LENGTH_DECIMALS, SECONDS_PER_HOUR,
    SECONDS_PER_MINUTE, TOTAL_VOLUME_DECIMALS,
};
use super::parameters::AeratedParams;
use super::rounding_helper::RoundingHelper;

pub struct AeratedCalculator {
    residence_minutes: f64,
    horizontal_velocity: f64,
    air_ratio: f64,
    width_depth_ratio: f64,
}

impl AeratedCalculator {
    pub fn new(params: &AeratedParams) -> Result<Self, CalculationError> {
        Ok(AeratedCalculator {
            residence_minutes: RoundingHelper::require_positive("Residence time", params.t)?,
            horizontal_velocity: RoundingHelper::require_positive(
                "Horizontal velocity",
                params.v_horizontal,
            )?,
            air_ratio: RoundingHelper::require_non_negative("Air ratio", params.air_ratio)?,
            width_depth_ratio: RoundingHelper::require_positive(
                "Width/depth ratio",
                params.width_depth_ratio,
            )?,
        })
    }
}

impl Calculator for AeratedCalculator {
    fn chamber_type(&self) -> ChamberType {
        ChamberType::Aerated
    }

    fn perform_calculation(
        &self,
        input: &DesignInput,
    ) -> Result<CalculationResult, CalculationError> {
        input.validate()?;

        let q = input.flow_rate;
        let volume = q * self.residence_minutes * SECONDS_PER_MINUTE;
        let area = q / self.horizontal_velocity;
        let length = volume / area;

        // A = B * h2 with B = ratio * h2
        let effective_depth = (area / self.width_depth_ratio).sqrt();
        let width = self.width_depth_ratio * effective_depth;

        let air_supply = self.air_ratio * q * SECONDS_PER_HOUR;
        let total_depth = FREEBOARD + effective_depth + AERATED_SUMP_DEPTH;

        log::debug!(
            "Aerated chamber: V={:.3} A={:.3} L={:.3} h2={:.3} air={:.1}",
            volume,
            area,
            length,
            effective_depth,
            air_supply
        );

        RoundingHelper::ensure_finite(CalculationResult {
            chamber_type: ChamberType::Aerated,
            length: RoundingHelper::round(length, LENGTH_DECIMALS),
            total_width: RoundingHelper::round(width, LENGTH_DECIMALS),
            total_depth: RoundingHelper::round(total_depth, LENGTH_DECIMALS),
            effective_depth: RoundingHelper::round(effective_depth, LENGTH_DECIMALS),
            num_channels: None,
            volume_grit: None,
            air_supply: Some(RoundingHelper::round(air_supply, AIR_SUPPLY_DECIMALS)),
            diameter: None,
            details: CalculationDetails {
                area: RoundingHelper::round(area, LENGTH_DECIMALS),
                volume: Some(RoundingHelper::round(volume, TOTAL_VOLUME_DECIMALS)),
                ..CalculationDetails::default()
            },
        })
    }
}
