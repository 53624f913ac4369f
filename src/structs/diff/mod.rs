pub mod change;
pub mod code_difference;
pub mod diff_statistics;
