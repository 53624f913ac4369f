use std::path::Path;

/// Where visual output goes: the terminal, a browser, or an editor host.
pub trait DiffPresenter: Send + Sync {
    /// Shows the change between two commits after a sync moved HEAD.
    fn present_diff(&self, previous: &str, current: &str, report_path: Option<&Path>);

    /// Shows a rendered HTML report.
    fn present_report(&self, report_path: &Path);
}
