use std::path::Path;
use crate::helpers::git_helper::short_hash;
use crate::traits::diff_presenter::DiffPresenter;

/// CLI presenter: logs locations and optionally hands reports to the browser.
pub struct TerminalPresenter {
    open_in_browser: bool,
}

impl TerminalPresenter {
    pub fn new(open_in_browser: bool) -> Self {
        Self { open_in_browser }
    }

    fn open(&self, path: &Path) {
        let target = path.display().to_string();
        match webbrowser::open(&target) {
            Ok(_) => log::info!("🌐 Opened {} in the browser", target),
            Err(e) => {
                log::warn!("⚠️ Could not open the browser: {}", e);
                log::info!("💡 Open {} manually", target);
            }
        }
    }
}

impl DiffPresenter for TerminalPresenter {
    fn present_diff(&self, previous: &str, current: &str, report_path: Option<&Path>) {
        log::info!("🔀 HEAD moved {} → {}", short_hash(previous), short_hash(current));
        if let Some(path) = report_path {
            log::info!("📝 Diff report: {}", path.display());
        }
    }

    fn present_report(&self, report_path: &Path) {
        log::info!("📄 Report written to {}", report_path.display());
        if self.open_in_browser {
            self.open(report_path);
        }
    }
}
