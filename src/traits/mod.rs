pub mod diff_presenter;
pub mod git_runner;
