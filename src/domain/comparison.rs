use chrono::{DateTime, FixedOffset};
use serde::Serialize;

const SUBJECT_WIDTH: usize = 50;

/// Which two states of the repository are being compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonMode {
    /// HEAD against the merge base with the base branch.
    BranchDivergence,
    /// HEAD against HEAD~1.
    SinceLast,
    /// Working tree (staged and unstaged) against HEAD.
    Uncommitted,
}

impl ComparisonMode {
    pub fn from_flags(since_last: bool, uncommitted: bool) -> Self {
        if since_last {
            ComparisonMode::SinceLast
        } else if uncommitted {
            ComparisonMode::Uncommitted
        } else {
            ComparisonMode::BranchDivergence
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ComparisonMode::BranchDivergence => "branch",
            ComparisonMode::SinceLast => "since-last",
            ComparisonMode::Uncommitted => "uncommitted",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitDescriptor {
    pub timestamp: DateTime<FixedOffset>,
    pub short_id: String,
    pub subject: String,
}

impl CommitDescriptor {
    /// `<date> <time> <short-id> <subject>`, with long subjects cut to fit.
    pub fn display_line(&self) -> String {
        format!(
            "{} {} {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S"),
            self.short_id,
            truncate_subject(&self.subject, SUBJECT_WIDTH)
        )
    }
}

fn truncate_subject(subject: &str, width: usize) -> String {
    if subject.chars().count() <= width {
        return subject.to_string();
    }
    let kept: String = subject.chars().take(width.saturating_sub(3)).collect();
    format!("{kept}...")
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitPair {
    pub base: CommitDescriptor,
    pub head: CommitDescriptor,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonContext {
    pub mode: ComparisonMode,
    /// Present only when both endpoints are commits.
    pub commits: Option<CommitPair>,
}

impl ComparisonContext {
    pub fn without_commits(mode: ComparisonMode) -> Self {
        Self {
            mode,
            commits: None,
        }
    }
}

/// A mode with its base revision resolved, shared by the diff and the metadata
/// lookup so both describe the same endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonRange {
    pub mode: ComparisonMode,
    /// Commit the diff starts from; `HEAD` for working-tree comparisons.
    pub base: String,
}

impl ComparisonRange {
    pub fn new(mode: ComparisonMode, base: impl Into<String>) -> Self {
        Self {
            mode,
            base: base.into(),
        }
    }

    /// Whether the diff ends at `HEAD` rather than the working tree.
    pub fn is_committed(&self) -> bool {
        self.mode != ComparisonMode::Uncommitted
    }
}
