pub mod analysis_logger;
pub mod animated_logger;
