use std::cmp::Ordering;

use crate::domain::record::ChangeRecord;

#[derive(clap::ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    /// File name, ascending
    #[default]
    Name,
    /// Lines changed, descending
    Changes,
    /// Full path, ascending
    Path,
}

impl SortKey {
    /// Whether sibling directories in a tree are listed by name.
    pub fn groups_alphabetically(&self) -> bool {
        !matches!(self, SortKey::Changes)
    }

    fn compare(&self, a: &ChangeRecord, b: &ChangeRecord) -> Ordering {
        match self {
            SortKey::Name => a.name().cmp(b.name()).then_with(|| a.path.cmp(&b.path)),
            SortKey::Path => a.path.cmp(&b.path),
            SortKey::Changes => b
                .changes()
                .cmp(&a.changes())
                .then_with(|| a.path.cmp(&b.path)),
        }
    }
}

pub fn sort_records(records: &mut [ChangeRecord], key: SortKey) {
    records.sort_by(|a, b| key.compare(a, b));
}
