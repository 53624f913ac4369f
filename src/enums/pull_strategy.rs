/// Update attempts, tried in declaration order until one succeeds.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum PullStrategy {
    /// `git pull` as configured by the repository.
    Plain,
    /// Disposable branch reset to the remote tracking branch, merged back.
    BranchResetMerge,
}

impl PullStrategy {
    pub const SEQUENCE: [PullStrategy; 2] = [PullStrategy::Plain, PullStrategy::BranchResetMerge];

    pub fn name(&self) -> &'static str {
        match self {
            PullStrategy::Plain => "pull",
            PullStrategy::BranchResetMerge => "branch-reset-merge recovery",
        }
    }
}
