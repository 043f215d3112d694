use crate::domain::record::ChangeRecord;
use crate::render::columns::{StatColumns, pad};

/// One line per record: full path, then the aligned stat columns.
pub fn flat_lines(records: &[ChangeRecord], color: bool) -> Vec<String> {
    let path_width = records
        .iter()
        .map(|record| record.path.chars().count())
        .max()
        .unwrap_or(0);
    let columns = StatColumns::measure(records);

    records
        .iter()
        .map(|record| {
            format!(
                "{}  {}",
                pad(&record.path, path_width),
                columns.format(record, color)
            )
        })
        .collect()
}
