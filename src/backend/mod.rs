pub mod backend;
pub mod batch_processing;
