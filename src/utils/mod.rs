pub mod commands;
pub mod logger;
