pub mod report_renderer;
pub mod report_server;
pub mod report_store;
pub mod terminal_presenter;
