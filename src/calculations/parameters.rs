//! Engineering coefficients for the three chamber types.
//!
//! Defaults follow the design manual's worked examples. The ranges are the
//! manual's recommendations and only advisory: out-of-range values are still
//! computed.
use super::calculator::ChamberType;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParameterError {
    #[error("Unknown parameter '{name}' for {chamber_type} chamber")]
    UnknownField {
        chamber_type: ChamberType,
        name: String,
    },
    #[error("JSON error: {0}")]
    Json(String),
}

/// Recommended window for one coefficient. `max` is `None` when the manual
/// only gives a lower bound.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ParamRange {
    pub name: &'static str,
    pub unit: &'static str,
    pub min: f64,
    pub max: Option<f64>,
}

impl ParamRange {
    const fn new(name: &'static str, unit: &'static str, min: f64, max: Option<f64>) -> Self {
        ParamRange {
            name,
            unit,
            min,
            max,
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && self.max.map_or(true, |max| value <= max)
    }
}

pub const HORIZONTAL_RANGES: [ParamRange; 6] = [
    ParamRange::new("v", "m/s", 0.15, Some(0.3)),
    ParamRange::new("t", "s", 30.0, Some(60.0)),
    ParamRange::new("h2", "m", 0.25, Some(1.2)),
    ParamRange::new("b_grid", "m", 0.6, None),
    ParamRange::new("x_grit", "m3/10^6 m3", 15.0, Some(60.0)),
    ParamRange::new("t_clean", "d", 1.0, Some(2.0)),
];

pub const AERATED_RANGES: [ParamRange; 4] = [
    ParamRange::new("t", "min", 1.0, Some(3.0)),
    ParamRange::new("v_horizontal", "m/s", 0.06, Some(0.12)),
    ParamRange::new("air_ratio", "m3/m3", 0.1, Some(0.2)),
    ParamRange::new("width_depth_ratio", "-", 1.0, Some(2.0)),
];

pub const VERTICAL_RANGES: [ParamRange; 2] = [
    ParamRange::new("v_up", "m/s", 0.02, Some(0.1)),
    ParamRange::new("t", "s", 30.0, Some(60.0)),
];

fn out_of_range(ranges: &[ParamRange], values: &[f64]) -> Vec<&'static str> {
    ranges
        .iter()
        .zip(values)
        .filter(|(range, value)| !range.contains(**value))
        .map(|(range, _)| range.name)
        .collect()
}

fn unknown_field(chamber_type: ChamberType, name: &str) -> ParameterError {
    ParameterError::UnknownField {
        chamber_type,
        name: name.to_string(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HorizontalParams {
    /// Design velocity [m/s].
    pub v: f64,
    /// Residence time [s].
    pub t: f64,
    /// Effective water depth [m].
    pub h2: f64,
    /// Width per channel [m].
    pub b_grid: f64,
    /// Grit load [m³ per 10⁶ m³ sewage].
    pub x_grit: f64,
    /// Days between cleanings.
    #[serde(alias = "T_clean")]
    pub t_clean: f64,
}

impl Default for HorizontalParams {
    fn default() -> Self {
        HorizontalParams {
            v: 0.25,
            t: 30.0,
            h2: 1.0,
            b_grid: 0.6,
            x_grit: 30.0,
            t_clean: 2.0,
        }
    }
}

impl HorizontalParams {
    pub fn out_of_range_fields(&self) -> Vec<&'static str> {
        out_of_range(
            &HORIZONTAL_RANGES,
            &[self.v, self.t, self.h2, self.b_grid, self.x_grit, self.t_clean],
        )
    }

    pub fn set_field(&mut self, name: &str, value: f64) -> Result<(), ParameterError> {
        let field = match name {
            "v" => &mut self.v,
            "t" => &mut self.t,
            "h2" => &mut self.h2,
            "b_grid" => &mut self.b_grid,
            "x_grit" => &mut self.x_grit,
            "t_clean" | "T_clean" => &mut self.t_clean,
            _ => return Err(unknown_field(ChamberType::Horizontal, name)),
        };
        *field = value;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AeratedParams {
    /// Residence time [min].
    pub t: f64,
    /// Horizontal velocity [m/s].
    pub v_horizontal: f64,
    /// Air per water volume [m³/m³].
    pub air_ratio: f64,
    /// Width to effective depth.
    pub width_depth_ratio: f64,
}

impl Default for AeratedParams {
    fn default() -> Self {
        AeratedParams {
            t: 2.0,
            v_horizontal: 0.1,
            air_ratio: 0.2,
            width_depth_ratio: 1.5,
        }
    }
}

impl AeratedParams {
    pub fn out_of_range_fields(&self) -> Vec<&'static str> {
        out_of_range(
            &AERATED_RANGES,
            &[self.t, self.v_horizontal, self.air_ratio, self.width_depth_ratio],
        )
    }

    pub fn set_field(&mut self, name: &str, value: f64) -> Result<(), ParameterError> {
        let field = match name {
            "t" => &mut self.t,
            "v_horizontal" => &mut self.v_horizontal,
            "air_ratio" => &mut self.air_ratio,
            "width_depth_ratio" => &mut self.width_depth_ratio,
            _ => return Err(unknown_field(ChamberType::Aerated, name)),
        };
        *field = value;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerticalParams {
    /// Rise velocity [m/s].
    pub v_up: f64,
    /// Residence time [s].
    pub t: f64,
}

impl Default for VerticalParams {
    fn default() -> Self {
        VerticalParams { v_up: 0.05, t: 30.0 }
    }
}

impl VerticalParams {
    pub fn out_of_range_fields(&self) -> Vec<&'static str> {
        out_of_range(&VERTICAL_RANGES, &[self.v_up, self.t])
    }

    pub fn set_field(&mut self, name: &str, value: f64) -> Result<(), ParameterError> {
        let field = match name {
            "v_up" => &mut self.v_up,
            "t" => &mut self.t,
            _ => return Err(unknown_field(ChamberType::Vertical, name)),
        };
        *field = value;
        Ok(())
    }
}

/// One parameter set, tagged with the chamber type it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "params", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ParameterSet {
    Horizontal(HorizontalParams),
    Aerated(AeratedParams),
    Vertical(VerticalParams),
}

impl ParameterSet {
    pub fn default_for(chamber_type: ChamberType) -> Self {
        match chamber_type {
            ChamberType::Horizontal => ParameterSet::Horizontal(HorizontalParams::default()),
            ChamberType::Aerated => ParameterSet::Aerated(AeratedParams::default()),
            ChamberType::Vertical => ParameterSet::Vertical(VerticalParams::default()),
        }
    }

    pub fn chamber_type(&self) -> ChamberType {
        match self {
            ParameterSet::Horizontal(_) => ChamberType::Horizontal,
            ParameterSet::Aerated(_) => ChamberType::Aerated,
            ParameterSet::Vertical(_) => ChamberType::Vertical,
        }
    }

    pub fn ranges(&self) -> &'static [ParamRange] {
        match self {
            ParameterSet::Horizontal(_) => &HORIZONTAL_RANGES,
            ParameterSet::Aerated(_) => &AERATED_RANGES,
            ParameterSet::Vertical(_) => &VERTICAL_RANGES,
        }
    }

    pub fn out_of_range_fields(&self) -> Vec<&'static str> {
        match self {
            ParameterSet::Horizontal(p) => p.out_of_range_fields(),
            ParameterSet::Aerated(p) => p.out_of_range_fields(),
            ParameterSet::Vertical(p) => p.out_of_range_fields(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, ParameterError> {
        serde_json::from_str(json).map_err(|e| ParameterError::Json(e.to_string()))
    }
}

/// The three sets a design session edits side by side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChamberParameters {
    pub horizontal: HorizontalParams,
    pub aerated: AeratedParams,
    pub vertical: VerticalParams,
}

impl ChamberParameters {
    pub fn active(&self, chamber_type: ChamberType) -> ParameterSet {
        match chamber_type {
            ChamberType::Horizontal => ParameterSet::Horizontal(self.horizontal),
            ChamberType::Aerated => ParameterSet::Aerated(self.aerated),
            ChamberType::Vertical => ParameterSet::Vertical(self.vertical),
        }
    }

    pub fn set_field(
        &mut self,
        chamber_type: ChamberType,
        name: &str,
        value: f64,
    ) -> Result<(), ParameterError> {
        match chamber_type {
            ChamberType::Horizontal => self.horizontal.set_field(name, value),
            ChamberType::Aerated => self.aerated.set_field(name, value),
            ChamberType::Vertical => self.vertical.set_field(name, value),
        }
    }

    pub fn replace(&mut self, set: ParameterSet) {
        match set {
            ParameterSet::Horizontal(p) => self.horizontal = p,
            ParameterSet::Aerated(p) => self.aerated = p,
            ParameterSet::Vertical(p) => self.vertical = p,
        }
    }
}
