use crate::backend::backend::CommandHandler;
use crate::backend::batch_processing::BatchProcessor;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

pub struct AppState {
    command_handler: Mutex<CommandHandler>,
}

fn lock_handler(state: &AppState) -> Result<MutexGuard<'_, CommandHandler>, String> {
    state
        .command_handler
        .lock()
        .map_err(|_| "Failed to acquire lock on CommandHandler".to_string())
}

pub fn create_app_state() -> AppState {
    AppState {
        command_handler: Mutex::new(CommandHandler::new()),
    }
}

pub fn update_flow_rate(state: &AppState, flow_rate: String) -> Result<String, String> {
    lock_handler(state)?.update_flow_rate(flow_rate)
}

pub fn update_variation_coefficient(
    state: &AppState,
    variation_coefficient: String,
) -> Result<String, String> {
    lock_handler(state)?.update_variation_coefficient(variation_coefficient)
}

pub fn select_chamber_type(state: &AppState, chamber_type: String) -> Result<String, String> {
    lock_handler(state)?.select_chamber_type(&chamber_type)
}

pub fn update_parameter(
    state: &AppState,
    chamber_type: String,
    name: String,
    value: f64,
) -> Result<String, String> {
    lock_handler(state)?.update_parameter(&chamber_type, &name, value)
}

pub fn load_parameters(state: &AppState, parameter_json: String) -> Result<String, String> {
    lock_handler(state)?.load_parameters(&parameter_json)
}

pub fn get_parameters(state: &AppState) -> Result<String, String> {
    lock_handler(state)?.get_parameters()
}

pub fn calculate_chamber(state: &AppState) -> Result<String, String> {
    lock_handler(state)?.calculate()
}

pub fn clear_command_handler_state(state: &AppState) -> Result<(), String> {
    lock_handler(state)?.reset();
    Ok(())
}

pub fn run_batch_process(
    state: &AppState,
    input_path: String,
    output_path: String,
) -> Result<String, String> {
    let parameters = lock_handler(state)?.parameters;
    let processor = BatchProcessor::new(parameters);

    match processor.process_file(Path::new(&input_path), Path::new(&output_path)) {
        Ok(summary) => Ok(format!(
            "Batch processing completed successfully: {} sized, {} declined",
            summary.sized, summary.declined
        )),
        Err(e) => Err(format!("Error during batch processing: {}", e)),
    }
}
