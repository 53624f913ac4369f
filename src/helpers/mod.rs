pub mod config_helper;
pub mod git_helper;
pub mod html_helper;
pub mod path_helper;
