use crate::calculations::calculator::{CalculationResult, DesignInput};
use crate::calculations::constants::{AERATED_SUMP_DEPTH, FREEBOARD, MIN_HOPPER_DEPTH};
use crate::calculations::parameters::{
    AeratedParams, HorizontalParams, ParameterSet, VerticalParams,
};
use serde::Serialize;

/// One line of the derivation listing, e.g. `L = v × t` / `0.25 × 30 = 7.5`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormulaStep {
    pub label: &'static str,
    pub formula: &'static str,
    pub substitution: String,
    pub value: f64,
    pub unit: &'static str,
}

impl FormulaStep {
    fn new(
        label: &'static str,
        formula: &'static str,
        substitution: String,
        value: f64,
        unit: &'static str,
    ) -> Self {
        FormulaStep {
            label,
            formula,
            substitution,
            value,
            unit,
        }
    }

    pub fn to_line(&self) -> String {
        format!(
            "{:<18} {:<28} {} = {} {}",
            self.label, self.formula, self.substitution, self.value, self.unit
        )
        .trim_end()
        .to_string()
    }
}

pub fn formula_steps(
    input: &DesignInput,
    params: &ParameterSet,
    result: &CalculationResult,
) -> Vec<FormulaStep> {
    match params {
        ParameterSet::Horizontal(p) => horizontal_steps(input, p, result),
        ParameterSet::Aerated(p) => aerated_steps(input, p, result),
        ParameterSet::Vertical(p) => vertical_steps(input, p, result),
    }
}

pub fn format_steps(steps: &[FormulaStep]) -> String {
    steps
        .iter()
        .map(FormulaStep::to_line)
        .collect::<Vec<_>>()
        .join("\n")
}

fn horizontal_steps(
    input: &DesignInput,
    p: &HorizontalParams,
    result: &CalculationResult,
) -> Vec<FormulaStep> {
    let q = input.flow_rate;
    let n = result.num_channels.unwrap_or_default();
    let grit_volume = result.volume_grit.unwrap_or_default();
    let grit_depth = result.details.grit_depth.unwrap_or(MIN_HOPPER_DEPTH);

    vec![
        FormulaStep::new(
            "Length",
            "L = v × t",
            format!("{} × {}", p.v, p.t),
            result.length,
            "m",
        ),
        FormulaStep::new(
            "Flow area",
            "A = Q / v",
            format!("{} / {}", q, p.v),
            result.details.area,
            "m²",
        ),
        FormulaStep::new(
            "Channels",
            "n = ⌈A / (h2 × b)⌉",
            format!("⌈{} / ({} × {})⌉", result.details.area, p.h2, p.b_grid),
            f64::from(n),
            "",
        ),
        FormulaStep::new(
            "Total width",
            "B = n × b",
            format!("{} × {}", n, p.b_grid),
            result.total_width,
            "m",
        ),
        FormulaStep::new(
            "Grit volume",
            "V = (Q·X·T·86400)/(Kz·10⁶)",
            format!(
                "({} × {} × {} × 86400) / ({} × 10⁶)",
                q, p.x_grit, p.t_clean, input.variation_coefficient
            ),
            grit_volume,
            "m³",
        ),
        FormulaStep::new(
            "Grit depth",
            "h3 = max(0.4, V/(L·B) + 0.2)",
            format!(
                "max({}, {} / ({} × {}) + 0.2)",
                MIN_HOPPER_DEPTH, grit_volume, result.length, result.total_width
            ),
            grit_depth,
            "m",
        ),
        FormulaStep::new(
            "Total depth",
            "H = h1 + h2 + h3",
            format!("{} + {} + {}", FREEBOARD, result.effective_depth, grit_depth),
            result.total_depth,
            "m",
        ),
    ]
}

fn aerated_steps(
    input: &DesignInput,
    p: &AeratedParams,
    result: &CalculationResult,
) -> Vec<FormulaStep> {
    let q = input.flow_rate;
    let volume = result.details.volume.unwrap_or_default();

    vec![
        FormulaStep::new(
            "Total volume",
            "V = Q × t × 60",
            format!("{} × {} × 60", q, p.t),
            volume,
            "m³",
        ),
        FormulaStep::new(
            "Flow area",
            "A = Q / v",
            format!("{} / {}", q, p.v_horizontal),
            result.details.area,
            "m²",
        ),
        FormulaStep::new(
            "Length",
            "L = V / A",
            format!("{} / {}", volume, result.details.area),
            result.length,
            "m",
        ),
        FormulaStep::new(
            "Effective depth",
            "h2 = √(A / (B/h2))",
            format!("√({} / {})", result.details.area, p.width_depth_ratio),
            result.effective_depth,
            "m",
        ),
        FormulaStep::new(
            "Width",
            "B = (B/h2) × h2",
            format!("{} × {}", p.width_depth_ratio, result.effective_depth),
            result.total_width,
            "m",
        ),
        FormulaStep::new(
            "Air supply",
            "q = d × Q × 3600",
            format!("{} × {} × 3600", p.air_ratio, q),
            result.air_supply.unwrap_or_default(),
            "m³/h",
        ),
        FormulaStep::new(
            "Total depth",
            "H = h1 + h2 + sump",
            format!(
                "{} + {} + {}",
                FREEBOARD, result.effective_depth, AERATED_SUMP_DEPTH
            ),
            result.total_depth,
            "m",
        ),
    ]
}

fn vertical_steps(
    input: &DesignInput,
    p: &VerticalParams,
    result: &CalculationResult,
) -> Vec<FormulaStep> {
    let diameter = result.diameter.unwrap_or(result.length);
    let cone_height = result.details.cone_height.unwrap_or_default();

    vec![
        FormulaStep::new(
            "Surface area",
            "A = Q / v_up",
            format!("{} / {}", input.flow_rate, p.v_up),
            result.details.area,
            "m²",
        ),
        FormulaStep::new(
            "Diameter",
            "D = √(4A / π)",
            format!("√(4 × {} / π)", result.details.area),
            diameter,
            "m",
        ),
        FormulaStep::new(
            "Effective depth",
            "h2 = v_up × t",
            format!("{} × {}", p.v_up, p.t),
            result.effective_depth,
            "m",
        ),
        FormulaStep::new(
            "Cone height",
            "h4 = D / 2",
            format!("{} / 2", diameter),
            cone_height,
            "m",
        ),
        FormulaStep::new(
            "Total depth",
            "H = h1 + h2 + h4",
            format!("{} + {} + {}", FREEBOARD, result.effective_depth, cone_height),
            result.total_depth,
            "m",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::calculator::ChamberType;
    use crate::calculations::engine::calculate;

    fn steps_for(chamber_type: ChamberType, q: f64) -> Vec<FormulaStep> {
        let input = DesignInput::new(q, 1.5, chamber_type).unwrap();
        let params = ParameterSet::default_for(chamber_type);
        let result = calculate(&input, &params).unwrap();
        formula_steps(&input, &params, &result)
    }

    #[test]
    fn horizontal_listing_matches_result() {
        let steps = steps_for(ChamberType::Horizontal, 0.2);
        assert_eq!(steps.len(), 7);
        assert_eq!(steps[0].substitution, "0.25 × 30");
        assert_eq!(steps[0].value, 7.5);
        assert_eq!(steps[1].substitution, "0.2 / 0.25");
        assert_eq!(steps[2].value, 2.0);
        assert_eq!(steps[6].substitution, "0.3 + 1 + 0.4");
        assert_eq!(steps[6].value, 1.7);
    }

    #[test]
    fn aerated_listing_uses_configured_air_ratio() {
        let steps = steps_for(ChamberType::Aerated, 1.2);
        let air = steps.iter().find(|s| s.label == "Air supply").unwrap();
        assert_eq!(air.substitution, "0.2 × 1.2 × 3600");
        assert_eq!(air.value, 864.0);
        assert_eq!(steps[2].substitution, "144 / 12");
    }

    #[test]
    fn vertical_listing_reports_cone() {
        let steps = steps_for(ChamberType::Vertical, 0.2);
        let last = steps.last().unwrap();
        assert_eq!(last.substitution, "0.3 + 1.5 + 1.13");
        assert_eq!(last.value, 2.93);
    }

    #[test]
    fn format_steps_renders_one_line_per_step() {
        let text = format_steps(&steps_for(ChamberType::Vertical, 0.2));
        assert_eq!(text.lines().count(), 5);
        assert!(text.lines().next().unwrap().contains("= 4 m²"));
    }
}
