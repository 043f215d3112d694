use crate::domain::comparison::CommitPair;
use crate::domain::record::Totals;

/// Trailing block shared by the tree and flat layouts.
pub fn summary_lines(totals: &Totals, file_count: usize, commits: Option<&CommitPair>) -> Vec<String> {
    let mut lines = vec![
        format!(
            "Total: +{} -{} (net: {})",
            totals.insertions,
            totals.deletions,
            totals.signed_net()
        ),
        format!("Files: {file_count}"),
    ];

    if let Some(commits) = commits {
        lines.push(String::new());
        lines.push("Compare:".to_string());
        lines.push(format!("    {}", commits.base.display_line()));
        lines.push(format!("    {}", commits.head.display_line()));
    }

    lines
}
