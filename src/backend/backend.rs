use crate::calculations::calculator::{ChamberType, DesignInput};
use crate::calculations::engine::try_calculate;
use crate::calculations::parameters::{ChamberParameters, ParameterSet};
use crate::report::formula_breakdown::formula_steps;
use crate::utils::logger::clear_logs;
use serde_json::{json, Value};

const DEFAULT_FLOW_RATE: &str = "0.2";
const DEFAULT_VARIATION_COEFFICIENT: &str = "1.5";

/// Editable state of one design session.
///
/// Flow and Kz are kept as the text the user typed; they are only parsed
/// when a calculation is requested.
pub struct CommandHandler {
    flow_rate: String,
    variation_coefficient: String,
    chamber_type: ChamberType,
    pub(crate) parameters: ChamberParameters,
}

impl CommandHandler {
    pub fn new() -> CommandHandler {
        CommandHandler {
            flow_rate: DEFAULT_FLOW_RATE.to_string(),
            variation_coefficient: DEFAULT_VARIATION_COEFFICIENT.to_string(),
            chamber_type: ChamberType::Horizontal,
            parameters: ChamberParameters::default(),
        }
    }

    pub fn chamber_type(&self) -> ChamberType {
        self.chamber_type
    }

    pub fn design_input(&self) -> Option<DesignInput> {
        DesignInput::from_text(
            &self.flow_rate,
            &self.variation_coefficient,
            self.chamber_type,
        )
    }

    pub fn active_parameters(&self) -> ParameterSet {
        self.parameters.active(self.chamber_type)
    }

    pub fn update_flow_rate(&mut self, flow_rate: String) -> Result<String, String> {
        self.flow_rate = flow_rate;
        let result = json!({
            "success": true,
            "message": "Design flow updated successfully",
            "flowRate": self.flow_rate,
        });
        log::info!("Design flow updated. {}", self.flow_rate);
        Ok(result.to_string())
    }

    pub fn update_variation_coefficient(
        &mut self,
        variation_coefficient: String,
    ) -> Result<String, String> {
        self.variation_coefficient = variation_coefficient;
        let result = json!({
            "success": true,
            "message": "Variation coefficient updated successfully",
            "variationCoefficient": self.variation_coefficient,
        });
        log::info!("Variation coefficient updated. {}", self.variation_coefficient);
        Ok(result.to_string())
    }

    pub fn select_chamber_type(&mut self, chamber_type: &str) -> Result<String, String> {
        self.chamber_type = chamber_type.parse::<ChamberType>().map_err(|e| {
            let error_message = format!("Error selecting chamber type: {}", e);
            log::error!("{}", error_message);
            error_message
        })?;
        let result = json!({
            "success": true,
            "message": "Chamber type selected successfully",
            "chamberType": self.chamber_type,
        });
        log::info!("Chamber type selected. {}", self.chamber_type);
        Ok(result.to_string())
    }

    pub fn update_parameter(
        &mut self,
        chamber_type: &str,
        name: &str,
        value: f64,
    ) -> Result<String, String> {
        let chamber_type = chamber_type
            .parse::<ChamberType>()
            .map_err(|e| e.to_string())?;
        self.parameters
            .set_field(chamber_type, name, value)
            .map_err(|e| {
                let error_message = format!("Error updating parameter: {}", e);
                log::error!("{}", error_message);
                error_message
            })?;

        let result = json!({
            "success": true,
            "message": "Parameter updated successfully",
            "chamberType": chamber_type,
            "name": name,
            "value": value,
        });
        log::info!("{} parameter {} set to {}", chamber_type, name, value);
        Ok(result.to_string())
    }

    pub fn load_parameters(&mut self, parameter_json: &str) -> Result<String, String> {
        let set = ParameterSet::from_json(parameter_json).map_err(|e| {
            let error_message = format!("Error loading parameters: {}", e);
            log::error!("{}", error_message);
            error_message
        })?;
        self.parameters.replace(set);

        log::info!("{} parameters loaded.", set.chamber_type());
        Ok(json!({
            "success": true,
            "message": "Parameters loaded successfully",
            "parameters": set,
        })
        .to_string())
    }

    pub fn get_parameters(&self) -> Result<String, String> {
        let set = self.active_parameters();
        Ok(json!({
            "success": true,
            "chamberType": self.chamber_type,
            "parameters": set,
            "ranges": set.ranges(),
            "outOfRange": set.out_of_range_fields(),
        })
        .to_string())
    }

    /// Sizes the selected chamber. An unusable input is not an error: the
    /// answer simply carries `"result": null` so the caller can show a
    /// neutral prompt instead of a stale result.
    pub fn calculate(&self) -> Result<String, String> {
        let params = self.active_parameters();
        let warnings = params.out_of_range_fields();

        let outcome = self
            .design_input()
            .and_then(|input| match try_calculate(&input, &params) {
                Ok(result) => Some((input, result)),
                Err(e) => {
                    log::info!("No result: {}", e);
                    None
                }
            });

        let result = match outcome {
            Some((input, result)) => {
                let steps = formula_steps(&input, &params, &result);
                json!({
                    "success": true,
                    "message": "Calculation completed successfully",
                    "chamberType": self.chamber_type,
                    "result": serde_json::to_value(&result).map_err(|e| e.to_string())?,
                    "steps": serde_json::to_value(&steps).map_err(|e| e.to_string())?,
                    "warnings": warnings,
                })
            }
            None => json!({
                "success": true,
                "message": "Enter a valid design flow to generate results",
                "chamberType": self.chamber_type,
                "result": Value::Null,
                "steps": [],
                "warnings": warnings,
            }),
        };

        Ok(result.to_string())
    }

    pub fn reset(&mut self) {
        *self = CommandHandler::new();
        clear_logs();
    }
}

impl Default for CommandHandler {
    fn default() -> Self {
        CommandHandler::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(answer: Result<String, String>) -> Value {
        serde_json::from_str(&answer.unwrap()).unwrap()
    }

    #[test]
    fn default_session_sizes_horizontal_example() {
        let handler = CommandHandler::new();
        let answer = parse(handler.calculate());

        assert_eq!(answer["chamberType"], "HORIZONTAL");
        assert_eq!(answer["result"]["length"], 7.5);
        assert_eq!(answer["result"]["numChannels"], 2);
        assert_eq!(answer["result"]["volumeGrit"], 0.691);
        assert_eq!(answer["result"]["details"]["gritDepth"], 0.4);
        assert!(answer["result"].get("airSupply").is_none());
        assert_eq!(answer["steps"].as_array().unwrap().len(), 7);
    }

    #[test]
    fn invalid_flow_text_gives_no_result() {
        let mut handler = CommandHandler::new();
        for text in ["", "abc", "0", "-0.2"] {
            handler.update_flow_rate(text.to_string()).unwrap();
            let answer = parse(handler.calculate());
            assert!(answer["result"].is_null(), "{:?}", text);
            assert!(answer["steps"].as_array().unwrap().is_empty());
        }
    }

    #[test]
    fn switching_chamber_type_uses_its_parameters() {
        let mut handler = CommandHandler::new();
        handler.update_flow_rate("1.2".to_string()).unwrap();
        handler.select_chamber_type("aerated").unwrap();
        let answer = parse(handler.calculate());

        assert_eq!(answer["chamberType"], "AERATED");
        assert_eq!(answer["result"]["airSupply"], 864.0);
        assert_eq!(answer["result"]["totalDepth"], 3.63);

        assert!(handler.select_chamber_type("radial").is_err());
        assert_eq!(handler.chamber_type(), ChamberType::Aerated);
    }

    #[test]
    fn parameter_edits_reach_the_calculation() {
        let mut handler = CommandHandler::new();
        handler.select_chamber_type("VERTICAL").unwrap();
        handler.update_parameter("VERTICAL", "t", 60.0).unwrap();
        let answer = parse(handler.calculate());
        assert_eq!(answer["result"]["effectiveDepth"], 3.0);

        assert!(handler.update_parameter("VERTICAL", "x_grit", 1.0).is_err());
    }

    #[test]
    fn out_of_range_edits_are_reported_as_warnings() {
        let mut handler = CommandHandler::new();
        handler.update_parameter("HORIZONTAL", "v", 0.5).unwrap();
        let answer = parse(handler.calculate());
        assert_eq!(answer["warnings"], json!(["v"]));
        assert!(answer["result"].is_object());
    }

    #[test]
    fn degenerate_edit_declines_instead_of_failing() {
        let mut handler = CommandHandler::new();
        handler.update_parameter("HORIZONTAL", "h2", 0.0).unwrap();
        let answer = parse(handler.calculate());
        assert!(answer["result"].is_null());
    }

    #[test]
    fn load_parameters_from_json() {
        let mut handler = CommandHandler::new();
        handler
            .load_parameters(r#"{"type":"HORIZONTAL","params":{"b_grid":1.0}}"#)
            .unwrap();
        let answer = parse(handler.get_parameters());
        assert_eq!(answer["parameters"]["params"]["b_grid"], 1.0);
        assert_eq!(answer["ranges"].as_array().unwrap().len(), 6);

        assert!(handler.load_parameters("{not json").is_err());
    }

    #[test]
    fn reset_restores_defaults() {
        let mut handler = CommandHandler::new();
        handler.update_flow_rate("5".to_string()).unwrap();
        handler.select_chamber_type("VERTICAL").unwrap();
        handler.reset();
        assert_eq!(handler.chamber_type(), ChamberType::Horizontal);
        assert_eq!(handler.design_input().unwrap().flow_rate, 0.2);
    }
}
