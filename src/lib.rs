//! Sizing of wastewater grit chambers (horizontal-flow, aerated and
//! vertical-flow) after the design-manual formula chains.
pub mod backend;
pub mod calculations;
pub mod report;
pub mod utils;

pub use calculations::calculator::{
    CalculationDetails, CalculationError, CalculationResult, Calculator, ChamberType, DesignInput,
};
pub use calculations::engine::{
    calculate, calculate_aerated, calculate_horizontal, calculate_vertical, try_calculate,
};
pub use calculations::parameters::{
    AeratedParams, ChamberParameters, HorizontalParams, ParameterSet, VerticalParams,
};
