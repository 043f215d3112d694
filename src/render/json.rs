use serde::Serialize;

use crate::domain::comparison::CommitPair;
use crate::domain::record::{ChangeRecord, Totals};
use crate::error::AppResult;
use crate::render::Report;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonReport<'a> {
    files: &'a [ChangeRecord],
    totals: Totals,
    file_count: usize,
    mode: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    compare: Option<&'a CommitPair>,
}

/// Lossless machine-readable document; never colored.
pub fn to_json(report: &Report<'_>) -> AppResult<String> {
    let document = JsonReport {
        files: report.records,
        totals: report.totals,
        file_count: report.records.len(),
        mode: report.mode.as_str(),
        compare: report.commits,
    };
    Ok(serde_json::to_string_pretty(&document)?)
}

#[cfg(test)]
mod tests {
    use chrono::DateTime;
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};

    use super::*;
    use crate::domain::comparison::{CommitDescriptor, ComparisonMode};
    use crate::domain::record::RawChange;

    fn records() -> Vec<ChangeRecord> {
        vec![
            ChangeRecord::from_raw(RawChange::new("web/src/app/api/route.ts", 110, 18), Some(360)),
            ChangeRecord::from_raw(RawChange::new("web/src/legacy.ts", 0, 25), None),
        ]
    }

    #[test]
    fn encodes_records_totals_and_mode() {
        let records = records();
        let report = Report::new(&records, ComparisonMode::SinceLast, None);
        let value: Value = serde_json::from_str(&to_json(&report).unwrap()).unwrap();

        assert_eq!(
            value,
            json!({
                "files": [
                    {"path": "web/src/app/api/route.ts", "insertions": 110, "deletions": 18, "totalLines": 360},
                    {"path": "web/src/legacy.ts", "insertions": 0, "deletions": 25, "totalLines": null}
                ],
                "totals": {"insertions": 110, "deletions": 43, "net": 67},
                "fileCount": 2,
                "mode": "since-last"
            })
        );
    }

    #[test]
    fn empty_set_has_empty_files_and_zero_totals() {
        let report = Report::new(&[], ComparisonMode::Uncommitted, None);
        let value: Value = serde_json::from_str(&to_json(&report).unwrap()).unwrap();

        assert_eq!(value["files"], json!([]));
        assert_eq!(value["totals"], json!({"insertions": 0, "deletions": 0, "net": 0}));
        assert_eq!(value["fileCount"], 0);
    }

    #[test]
    fn includes_untruncated_commit_pair() {
        let subject = "Refactor the request validation layer so that every route shares one schema";
        let descriptor = |id: &str| CommitDescriptor {
            timestamp: DateTime::parse_from_rfc3339("2025-01-14T09:03:27+01:00").unwrap(),
            short_id: id.to_string(),
            subject: subject.to_string(),
        };
        let commits = CommitPair {
            base: descriptor("0a1b2c"),
            head: descriptor("9f8e7d"),
        };
        let records = records();
        let report = Report::new(&records, ComparisonMode::BranchDivergence, Some(&commits));
        let value: Value = serde_json::from_str(&to_json(&report).unwrap()).unwrap();

        assert_eq!(value["mode"], "branch");
        assert_eq!(
            value["compare"]["head"],
            json!({"timestamp": "2025-01-14T09:03:27+01:00", "shortId": "9f8e7d", "subject": subject})
        );
        assert_eq!(value["compare"]["base"]["shortId"], "0a1b2c");
    }

    #[test]
    fn output_is_plain_text() {
        colored::control::set_override(true);
        let records = records();
        let report = Report::new(&records, ComparisonMode::SinceLast, None);
        assert!(!to_json(&report).unwrap().contains('\u{1b}'));
    }
}
