use crate::domain::record::ChangeRecord;
use crate::domain::tree::{ChangeTree, NodeId};
use crate::render::columns::{StatColumns, pad};

const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const PIPE: &str = "│   ";
const GAP: &str = "    ";

struct TreeLine<'a> {
    text: String,
    record: Option<&'a ChangeRecord>,
}

/// Box-drawing layout of the tree; file lines carry aligned stat columns.
pub fn tree_lines(tree: &ChangeTree<'_>, color: bool) -> Vec<String> {
    let mut lines = Vec::new();
    collect(tree, ChangeTree::ROOT, "", &mut lines);

    let text_width = lines
        .iter()
        .filter(|line| line.record.is_some())
        .map(|line| line.text.chars().count())
        .max()
        .unwrap_or(0);
    let columns = StatColumns::measure(lines.iter().filter_map(|line| line.record));

    lines
        .into_iter()
        .map(|line| match line.record {
            Some(record) => format!(
                "{}  {}",
                pad(&line.text, text_width),
                columns.format(record, color)
            ),
            None => line.text,
        })
        .collect()
}

fn collect<'a>(tree: &ChangeTree<'a>, id: NodeId, prefix: &str, lines: &mut Vec<TreeLine<'a>>) {
    let children = tree.node(id).children().collect::<Vec<_>>();
    let count = children.len();

    for (index, child) in children.into_iter().enumerate() {
        let last = index + 1 == count;
        let connector = if last { LAST_BRANCH } else { BRANCH };
        let node = tree.node(child);

        match node.record() {
            Some(record) => lines.push(TreeLine {
                text: format!("{prefix}{connector}{}", node.name),
                record: Some(record),
            }),
            None => {
                lines.push(TreeLine {
                    text: format!("{prefix}{connector}{}/", node.name),
                    record: None,
                });
                let extension = if last { GAP } else { PIPE };
                collect(tree, child, &format!("{prefix}{extension}"), lines);
            }
        }
    }
}
