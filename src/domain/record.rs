use serde::Serialize;

/// One changed path as reported by the change source, before enrichment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawChange {
    pub path: String,
    pub insertions: usize,
    pub deletions: usize,
}

impl RawChange {
    pub fn new(path: impl Into<String>, insertions: usize, deletions: usize) -> Self {
        Self {
            path: path.into(),
            insertions,
            deletions,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeRecord {
    pub path: String,
    pub insertions: usize,
    pub deletions: usize,
    /// `None` when the file no longer exists, which is not the same as an empty file.
    pub total_lines: Option<usize>,
}

impl ChangeRecord {
    pub fn from_raw(raw: RawChange, total_lines: Option<usize>) -> Self {
        Self {
            path: raw.path,
            insertions: raw.insertions,
            deletions: raw.deletions,
            total_lines,
        }
    }

    pub fn changes(&self) -> usize {
        self.insertions + self.deletions
    }

    /// Final path component.
    pub fn name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub insertions: usize,
    pub deletions: usize,
    pub net: i64,
}

impl Totals {
    pub fn of(records: &[ChangeRecord]) -> Self {
        let insertions: usize = records.iter().map(|record| record.insertions).sum();
        let deletions: usize = records.iter().map(|record| record.deletions).sum();
        Self {
            insertions,
            deletions,
            net: insertions as i64 - deletions as i64,
        }
    }

    /// `+N` for zero and positive values, `-N` otherwise.
    pub fn signed_net(&self) -> String {
        if self.net >= 0 {
            format!("+{}", self.net)
        } else {
            self.net.to_string()
        }
    }
}
