use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// Every chamber calculator sizes one chamber from a design input.
pub trait Calculator {
    fn chamber_type(&self) -> ChamberType;

    fn perform_calculation(&self, input: &DesignInput)
        -> Result<CalculationResult, CalculationError>;
}

// Invalid input is the only way a calculation can fail.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("Calculation Error: {message}")]
pub struct CalculationError {
    message: String,
}

impl CalculationError {
    pub fn new(message: &str) -> Self {
        CalculationError {
            message: message.to_string(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChamberType {
    Horizontal,
    Aerated,
    Vertical,
}

impl ChamberType {
    pub const ALL: [ChamberType; 3] = [
        ChamberType::Horizontal,
        ChamberType::Aerated,
        ChamberType::Vertical,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ChamberType::Horizontal => "HORIZONTAL",
            ChamberType::Aerated => "AERATED",
            ChamberType::Vertical => "VERTICAL",
        }
    }
}

impl fmt::Display for ChamberType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChamberType {
    type Err = CalculationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "HORIZONTAL" => Ok(ChamberType::Horizontal),
            "AERATED" => Ok(ChamberType::Aerated),
            "VERTICAL" => Ok(ChamberType::Vertical),
            other => Err(CalculationError::new(&format!(
                "Unknown chamber type: {}",
                other
            ))),
        }
    }
}

/// Peak design flow and variation coefficient for one calculation.
///
/// Construct through [`DesignInput::new`] or [`DesignInput::from_text`];
/// both refuse values that are not finite and strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignInput {
    pub flow_rate: f64,
    pub variation_coefficient: f64,
    pub chamber_type: ChamberType,
}

impl DesignInput {
    pub fn new(
        flow_rate: f64,
        variation_coefficient: f64,
        chamber_type: ChamberType,
    ) -> Result<Self, CalculationError> {
        let input = DesignInput {
            flow_rate,
            variation_coefficient,
            chamber_type,
        };
        input.validate()?;
        Ok(input)
    }

    /// Parses raw form text. `None` means the form does not hold a usable
    /// design flow yet and nothing should be calculated.
    pub fn from_text(
        flow_rate: &str,
        variation_coefficient: &str,
        chamber_type: ChamberType,
    ) -> Option<Self> {
        let q = flow_rate.trim().parse::<f64>().ok()?;
        let kz = variation_coefficient.trim().parse::<f64>().ok()?;
        DesignInput::new(q, kz, chamber_type).ok()
    }

    pub fn validate(&self) -> Result<(), CalculationError> {
        if !self.flow_rate.is_finite() || self.flow_rate <= 0.0 {
            return Err(CalculationError::new("Design flow must be a positive number."));
        }
        if !self.variation_coefficient.is_finite() || self.variation_coefficient <= 0.0 {
            return Err(CalculationError::new(
                "Variation coefficient must be a positive number.",
            ));
        }
        Ok(())
    }
}

/// Intermediate quantities shown in the derivation listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationDetails {
    pub area: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grit_depth: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub velocity_check: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cone_height: Option<f64>,
}

/// Sized chamber. Lengths in m, volumes in m³, air supply in m³/h.
///
/// The vertical-flow chamber is circular, so its diameter fills the
/// `length`, `total_width` and `diameter` slots alike.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResult {
    pub chamber_type: ChamberType,
    pub length: f64,
    pub total_width: f64,
    pub total_depth: f64,
    pub effective_depth: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_channels: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume_grit: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub air_supply: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diameter: Option<f64>,
    pub details: CalculationDetails,
}

impl CalculationResult {
    /// Every numeric field, optional ones included when present.
    pub fn numeric_fields(&self) -> Vec<(&'static str, f64)> {
        let mut fields = vec![
            ("length", self.length),
            ("totalWidth", self.total_width),
            ("totalDepth", self.total_depth),
            ("effectiveDepth", self.effective_depth),
            ("area", self.details.area),
        ];
        let optional = [
            ("numChannels", self.num_channels.map(f64::from)),
            ("volumeGrit", self.volume_grit),
            ("airSupply", self.air_supply),
            ("diameter", self.diameter),
            ("gritDepth", self.details.grit_depth),
            ("velocityCheck", self.details.velocity_check),
            ("volume", self.details.volume),
            ("coneHeight", self.details.cone_height),
        ];
        fields.extend(
            optional
                .into_iter()
                .filter_map(|(name, value)| value.map(|v| (name, v))),
        );
        fields
    }
}
