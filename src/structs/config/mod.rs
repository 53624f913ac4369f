pub mod analysis_config;
pub mod architecture_config;
pub mod config;
pub mod optimization_config;
pub mod output_config;
pub mod security_config;
pub mod sync_config;
