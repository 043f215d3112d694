//! Output encodings for a change report.
//!
//! [`render`] dispatches once on [`RenderMode`]; each arm is a pure function of
//! the ordered records, totals and comparison metadata.

pub mod columns;
pub mod flat;
pub mod json;
pub mod summary;
pub mod tree;

use crate::domain::comparison::{CommitPair, ComparisonMode};
use crate::domain::record::{ChangeRecord, Totals};
use crate::domain::sort::SortKey;
use crate::domain::tree::ChangeTree;
use crate::error::AppResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    Tree,
    Flat,
    Json,
}

impl RenderMode {
    /// `--json` takes precedence over `--flat`.
    pub fn resolve(flat: bool, json: bool) -> Self {
        match (flat, json) {
            (_, true) => RenderMode::Json,
            (true, false) => RenderMode::Flat,
            (false, false) => RenderMode::Tree,
        }
    }
}

/// Everything a renderer needs; records are already sorted.
#[derive(Debug, Clone)]
pub struct Report<'a> {
    pub records: &'a [ChangeRecord],
    pub totals: Totals,
    pub mode: ComparisonMode,
    pub commits: Option<&'a CommitPair>,
    /// Order the records were sorted in.
    pub sort: SortKey,
}

impl<'a> Report<'a> {
    pub fn new(
        records: &'a [ChangeRecord],
        mode: ComparisonMode,
        commits: Option<&'a CommitPair>,
    ) -> Self {
        Self {
            records,
            totals: Totals::of(records),
            mode,
            commits,
            sort: SortKey::default(),
        }
    }

    pub fn with_sort(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }
}

pub fn render(mode: RenderMode, report: &Report<'_>, color: bool) -> AppResult<String> {
    let body = match mode {
        RenderMode::Json => return Ok(format!("{}\n", json::to_json(report)?)),
        RenderMode::Flat => flat::flat_lines(report.records, color),
        RenderMode::Tree => {
            let mut tree = ChangeTree::assemble(report.records);
            if report.sort.groups_alphabetically() {
                tree.sort_directories();
            }
            debug_assert_eq!(tree.flatten().len(), report.records.len());
            tree::tree_lines(&tree, color)
        }
    };

    let mut lines = body;
    if !lines.is_empty() {
        lines.push(String::new());
    }
    lines.extend(summary::summary_lines(
        &report.totals,
        report.records.len(),
        report.commits,
    ));

    let mut output = lines.join("\n");
    output.push('\n');
    Ok(output)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::Value;

    use super::*;
    use crate::domain::record::RawChange;
    use crate::domain::sort::{SortKey, sort_records};

    fn scenario() -> Vec<ChangeRecord> {
        vec![
            ChangeRecord::from_raw(RawChange::new("web/src/app/api/route.ts", 110, 18), Some(360)),
            ChangeRecord::from_raw(RawChange::new("web/src/lib/db/schemas.ts", 342, 0), Some(342)),
            ChangeRecord::from_raw(RawChange::new("web/src/lib/db/validation.ts", 458, 0), Some(458)),
        ]
    }

    #[rstest]
    #[case(false, false, RenderMode::Tree)]
    #[case(true, false, RenderMode::Flat)]
    #[case(false, true, RenderMode::Json)]
    #[case(true, true, RenderMode::Json)]
    fn resolves_render_mode(#[case] flat: bool, #[case] json: bool, #[case] expected: RenderMode) {
        assert_eq!(RenderMode::resolve(flat, json), expected);
    }

    #[test]
    fn flat_scenario_sorted_by_name() {
        let mut records = scenario();
        sort_records(&mut records, SortKey::Name);
        let report = Report::new(&records, ComparisonMode::SinceLast, None);

        assert_eq!(
            render(RenderMode::Flat, &report, false).unwrap(),
            "web/src/app/api/route.ts      360  +110 -18\n\
             web/src/lib/db/schemas.ts     342  +342 - 0\n\
             web/src/lib/db/validation.ts  458  +458 - 0\n\
             \n\
             Total: +910 -18 (net: +892)\n\
             Files: 3\n"
        );
    }

    #[test]
    fn changes_sort_reorders_but_keeps_totals() {
        let mut records = scenario();
        sort_records(&mut records, SortKey::Changes);
        let report = Report::new(&records, ComparisonMode::SinceLast, None);
        let output = render(RenderMode::Flat, &report, false).unwrap();
        let order = output
            .lines()
            .take(3)
            .map(|line| line.split_whitespace().next().unwrap())
            .collect::<Vec<_>>();

        assert_eq!(
            order,
            vec![
                "web/src/lib/db/validation.ts",
                "web/src/lib/db/schemas.ts",
                "web/src/app/api/route.ts",
            ]
        );
        assert!(output.contains("Total: +910 -18 (net: +892)\nFiles: 3\n"));
    }

    #[test]
    fn tree_lists_directories_by_name_under_name_sort() {
        let mut records = vec![
            ChangeRecord::from_raw(RawChange::new("api/zeta.rs", 2, 0), Some(2)),
            ChangeRecord::from_raw(RawChange::new("web/alpha.rs", 1, 0), Some(1)),
        ];
        sort_records(&mut records, SortKey::Name);
        let report = Report::new(&records, ComparisonMode::SinceLast, None).with_sort(SortKey::Name);

        let output = render(RenderMode::Tree, &report, false).unwrap();
        assert_eq!(
            output.lines().collect::<Vec<_>>(),
            vec![
                "├── api/",
                "│   └── zeta.rs   2  +2 -0",
                "└── web/",
                "    └── alpha.rs  1  +1 -0",
                "",
                "Total: +3 -0 (net: +3)",
                "Files: 2",
            ]
        );
    }

    #[test]
    fn tree_keeps_change_order_under_changes_sort() {
        let mut records = vec![
            ChangeRecord::from_raw(RawChange::new("api/zeta.rs", 2, 0), Some(2)),
            ChangeRecord::from_raw(RawChange::new("web/alpha.rs", 9, 0), Some(9)),
        ];
        sort_records(&mut records, SortKey::Changes);
        let report =
            Report::new(&records, ComparisonMode::SinceLast, None).with_sort(SortKey::Changes);
        let output = render(RenderMode::Tree, &report, false).unwrap();

        assert!(output.starts_with("├── web/\n"));
        assert!(output.contains("└── api/\n"));
    }

    #[rstest]
    #[case(RenderMode::Tree)]
    #[case(RenderMode::Flat)]
    fn empty_report_prints_zero_summary(#[case] mode: RenderMode) {
        let report = Report::new(&[], ComparisonMode::Uncommitted, None);
        assert_eq!(
            render(mode, &report, false).unwrap(),
            "Total: +0 -0 (net: +0)\nFiles: 0\n"
        );
    }

    #[test]
    fn deleted_file_shows_placeholder_and_null() {
        let records = vec![
            ChangeRecord::from_raw(RawChange::new("src/gone.rs", 0, 30), None),
            ChangeRecord::from_raw(RawChange::new("src/kept.rs", 2, 1), Some(0)),
        ];
        let report = Report::new(&records, ComparisonMode::Uncommitted, None);

        let flat = render(RenderMode::Flat, &report, false).unwrap();
        assert!(flat.starts_with("src/gone.rs  -  +0 -30\nsrc/kept.rs  0  +2 - 1\n"));

        let json: Value = serde_json::from_str(&render(RenderMode::Json, &report, false).unwrap()).unwrap();
        assert_eq!(json["files"][0]["totalLines"], Value::Null);
        assert_eq!(json["files"][1]["totalLines"], 0);
    }

    #[test]
    fn json_recovers_every_flat_value() {
        let records = scenario();
        let report = Report::new(&records, ComparisonMode::SinceLast, None);
        let flat = render(RenderMode::Flat, &report, false).unwrap();
        let json: Value = serde_json::from_str(&render(RenderMode::Json, &report, false).unwrap()).unwrap();

        for (line, file) in flat.lines().zip(json["files"].as_array().unwrap()) {
            let mut fields = Vec::new();
            let mut tokens = line.split_whitespace();
            while let Some(token) = tokens.next() {
                match token {
                    "+" | "-" => fields.push(format!("{token}{}", tokens.next().unwrap())),
                    _ => fields.push(token.to_string()),
                }
            }
            assert_eq!(fields[0].as_str(), file["path"]);
            assert_eq!(fields[1], file["totalLines"].to_string());
            assert_eq!(fields[2], format!("+{}", file["insertions"]));
            assert_eq!(fields[3], format!("-{}", file["deletions"]));
        }
        assert_eq!(json["fileCount"], 3);
    }

    #[test]
    fn colored_flat_output_marks_counts() {
        colored::control::set_override(true);
        let records = scenario();
        let report = Report::new(&records, ComparisonMode::SinceLast, None);
        let output = render(RenderMode::Flat, &report, true).unwrap();
        assert!(output.contains("\u{1b}[32m+110\u{1b}[0m"));
        assert!(output.contains("\u{1b}[31m-18\u{1b}[0m"));
        assert!(output.contains("Total: +910 -18 (net: +892)"));
    }
}
