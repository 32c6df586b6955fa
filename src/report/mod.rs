pub mod formula_breakdown;
