use tracing::{debug, warn};

use crate::context::AppContext;
use crate::domain::comparison::{CommitPair, ComparisonMode};
use crate::domain::record::{ChangeRecord, RawChange};
use crate::domain::sort::{SortKey, sort_records};
use crate::error::AppResult;
use crate::services::LineCounter;

pub struct ChangeWorkflowOutcome {
    pub mode: ComparisonMode,
    /// Sorted, one record per changed path.
    pub records: Vec<ChangeRecord>,
    pub commits: Option<CommitPair>,
}

/// Pairs every raw change with the current line count of its file.
pub async fn build_records(
    raw: Vec<RawChange>,
    line_counter: &dyn LineCounter,
) -> AppResult<Vec<ChangeRecord>> {
    let mut records = Vec::with_capacity(raw.len());
    for change in raw {
        let total_lines = line_counter.count_lines(&change.path).await?;
        if total_lines.is_none() {
            debug!(path = %change.path, "file absent, no line count");
        }
        records.push(ChangeRecord::from_raw(change, total_lines));
    }
    Ok(records)
}

pub async fn collect_changes(
    ctx: &AppContext,
    mode: ComparisonMode,
    sort: SortKey,
) -> AppResult<ChangeWorkflowOutcome> {
    if mode == ComparisonMode::BranchDivergence {
        debug!(base = %ctx.config.base_branch, "comparing against base branch");
    }
    let range = ctx.change_source.range(mode).await?;
    debug!(base = %range.base, "resolved comparison base");
    let raw = ctx.change_source.changes(&range).await?;
    let mut records = build_records(raw, ctx.line_counter.as_ref()).await?;
    sort_records(&mut records, sort);

    let commits = match ctx.change_source.comparison(&range).await {
        Ok(comparison) => {
            debug!(mode = comparison.mode.as_str(), "loaded comparison metadata");
            comparison.commits
        }
        Err(err) => {
            warn!(%err, "comparison metadata unavailable");
            None
        }
    };

    Ok(ChangeWorkflowOutcome {
        mode,
        records,
        commits,
    })
}
