use colored::Colorize;

use crate::domain::record::ChangeRecord;

/// Shown in the line-count column for files that no longer exist.
pub const ABSENT_PLACEHOLDER: &str = "-";

/// Widths of the `<lines>  +<ins> -<del>` columns for one render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatColumns {
    lines: usize,
    insertions: usize,
    deletions: usize,
}

impl StatColumns {
    pub fn measure<'a>(records: impl IntoIterator<Item = &'a ChangeRecord>) -> Self {
        records.into_iter().fold(
            Self {
                lines: 1,
                insertions: 1,
                deletions: 1,
            },
            |widths, record| Self {
                lines: widths.lines.max(line_count_text(record).len()),
                insertions: widths.insertions.max(digits(record.insertions)),
                deletions: widths.deletions.max(digits(record.deletions)),
            },
        )
    }

    pub fn format(&self, record: &ChangeRecord, color: bool) -> String {
        let lines = format!("{:>width$}", line_count_text(record), width = self.lines);
        let insertions = format!("+{:>width$}", record.insertions, width = self.insertions);
        let deletions = format!("-{:>width$}", record.deletions, width = self.deletions);

        if color {
            format!("{lines}  {} {}", insertions.green(), deletions.red())
        } else {
            format!("{lines}  {insertions} {deletions}")
        }
    }
}

fn line_count_text(record: &ChangeRecord) -> String {
    match record.total_lines {
        Some(count) => count.to_string(),
        None => ABSENT_PLACEHOLDER.to_string(),
    }
}

fn digits(value: usize) -> usize {
    value.to_string().len()
}

/// Pads `text` with spaces to `width` characters.
pub fn pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    format!("{text}{}", " ".repeat(width.saturating_sub(len)))
}
