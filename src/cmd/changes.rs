use crate::context::AppContext;
use crate::domain::comparison::ComparisonMode;
use crate::domain::sort::SortKey;
use crate::error::AppResult;
use crate::render::{self, RenderMode, Report};
use crate::workflow::changes::collect_changes;

#[derive(Debug, Clone)]
pub struct ChangesCommandArgs {
    pub mode: ComparisonMode,
    pub sort: SortKey,
    pub render: RenderMode,
    pub color: bool,
}

/// Rendered report, ready to be written to stdout.
pub async fn run(ctx: &AppContext, args: ChangesCommandArgs) -> AppResult<String> {
    let outcome = collect_changes(ctx, args.mode, args.sort).await?;
    let report = Report::new(&outcome.records, outcome.mode, outcome.commits.as_ref())
        .with_sort(args.sort);
    // JSON is never colored.
    let color = args.color && args.render != RenderMode::Json;
    render::render(args.render, &report, color)
}
