pub mod aerated_calculator;
pub mod calculator;
pub mod constants;
pub mod engine;
pub mod horizontal_calculator;
pub mod parameters;
pub mod rounding_helper;
pub mod vertical_calculator;
