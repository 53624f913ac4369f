pub mod architecture_vocabulary;
pub mod optimization_rules;
pub mod security_rules;
