//! Directory hierarchy assembled from an ordered set of change records.
//!
//! Nodes live in a single arena owned by [`ChangeTree`]; edges run parent to
//! child by index only, since every traversal starts at the root.

use std::collections::HashMap;

use crate::domain::record::ChangeRecord;

pub type NodeId = usize;

#[derive(Debug)]
pub struct TreeNode<'a> {
    pub name: String,
    directories: Vec<NodeId>,
    files: Vec<NodeId>,
    lookup: HashMap<String, NodeId>,
    record: Option<&'a ChangeRecord>,
}

impl<'a> TreeNode<'a> {
    fn directory(name: &str) -> Self {
        Self {
            name: name.to_string(),
            directories: Vec::new(),
            files: Vec::new(),
            lookup: HashMap::new(),
            record: None,
        }
    }

    fn file(name: &str, record: &'a ChangeRecord) -> Self {
        Self {
            record: Some(record),
            ..Self::directory(name)
        }
    }

    pub fn record(&self) -> Option<&'a ChangeRecord> {
        self.record
    }

    /// Child directories first, then files; each group keeps insertion order.
    pub fn children(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.directories.iter().chain(self.files.iter()).copied()
    }
}

#[derive(Debug)]
pub struct ChangeTree<'a> {
    nodes: Vec<TreeNode<'a>>,
}

impl<'a> ChangeTree<'a> {
    pub const ROOT: NodeId = 0;

    /// Builds the hierarchy; sibling order follows the order of `records`.
    pub fn assemble(records: &'a [ChangeRecord]) -> Self {
        let mut tree = Self {
            nodes: vec![TreeNode::directory(".")],
        };

        for record in records {
            let mut segments = record.path.split('/').collect::<Vec<_>>();
            let Some(file_name) = segments.pop() else {
                continue;
            };

            let parent = segments
                .into_iter()
                .fold(Self::ROOT, |node, segment| tree.directory_child(node, segment));

            let leaf = tree.push(TreeNode::file(file_name, record));
            tree.nodes[parent].files.push(leaf);
        }

        tree
    }

    /// Reorders every directory's child directories by name; files keep their order.
    pub fn sort_directories(&mut self) {
        for id in 0..self.nodes.len() {
            let mut directories = std::mem::take(&mut self.nodes[id].directories);
            directories.sort_by(|&a, &b| self.nodes[a].name.cmp(&self.nodes[b].name));
            self.nodes[id].directories = directories;
        }
    }

    pub fn node(&self, id: NodeId) -> &TreeNode<'a> {
        &self.nodes[id]
    }

    /// Depth-first `(path, record)` pairs, reproducing the assembled input set.
    pub fn flatten(&self) -> Vec<(String, &'a ChangeRecord)> {
        let mut out = Vec::new();
        self.collect_leaves(Self::ROOT, "", &mut out);
        out
    }

    fn collect_leaves(&self, id: NodeId, prefix: &str, out: &mut Vec<(String, &'a ChangeRecord)>) {
        for child in self.node(id).children() {
            let node = self.node(child);
            let path = if prefix.is_empty() {
                node.name.clone()
            } else {
                format!("{prefix}/{}", node.name)
            };
            match node.record() {
                Some(record) => out.push((path, record)),
                None => self.collect_leaves(child, &path, out),
            }
        }
    }

    fn directory_child(&mut self, parent: NodeId, segment: &str) -> NodeId {
        if let Some(&existing) = self.nodes[parent].lookup.get(segment) {
            return existing;
        }
        let id = self.push(TreeNode::directory(segment));
        let node = &mut self.nodes[parent];
        node.lookup.insert(segment.to_string(), id);
        node.directories.push(id);
        id
    }

    fn push(&mut self, node: TreeNode<'a>) -> NodeId {
        self.nodes.push(node);
        self.nodes.len() - 1
    }
}
