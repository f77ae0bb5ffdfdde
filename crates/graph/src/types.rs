use flowspec_analysis::Role;
use petgraph::graph::{DiGraph, NodeIndex};
use serde::Serialize;
use std::collections::HashMap;

/// Node in the source graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileNode {
    /// Relative path — the node identity.
    pub path: String,

    /// Basename, used as the display label.
    pub name: String,

    /// Classified role.
    pub role: Role,
}

/// Directed reference graph over collected files.
///
/// Invariant: edges only connect nodes present in the node set. Cycles and
/// self-loops are representable (import cycles are legal).
pub struct SourceGraph {
    pub graph: DiGraph<FileNode, ()>,

    /// Relative path -> NodeIndex for identity lookups.
    path_index: HashMap<String, NodeIndex>,

    /// Basename -> all nodes carrying it, for reference resolution.
    name_index: HashMap<String, Vec<NodeIndex>>,
}

impl SourceGraph {
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            path_index: HashMap::new(),
            name_index: HashMap::new(),
        }
    }

    pub fn add_node(&mut self, node: FileNode) -> NodeIndex {
        let path = node.path.clone();
        let name = node.name.clone();

        let idx = self.graph.add_node(node);
        self.path_index.insert(path, idx);
        self.name_index.entry(name).or_default().push(idx);
        idx
    }

    pub fn add_edge(&mut self, from: NodeIndex, to: NodeIndex) {
        self.graph.add_edge(from, to, ());
    }

    pub fn find_by_path(&self, path: &str) -> Option<NodeIndex> {
        self.path_index.get(path).copied()
    }

    /// All nodes whose basename matches. Several files may share a basename;
    /// none of them is silently dropped.
    pub fn find_by_name(&self, name: &str) -> &[NodeIndex] {
        self.name_index
            .get(name)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn get_node(&self, idx: NodeIndex) -> Option<&FileNode> {
        self.graph.node_weight(idx)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &FileNode> {
        self.graph.node_weights()
    }

    /// Edge endpoints as node data, for rendering and tests.
    pub fn edges(&self) -> impl Iterator<Item = (&FileNode, &FileNode)> {
        self.graph.edge_indices().filter_map(move |e| {
            let (from, to) = self.graph.edge_endpoints(e)?;
            Some((self.graph.node_weight(from)?, self.graph.node_weight(to)?))
        })
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}

impl Default for SourceGraph {
    fn default() -> Self {
        Self::new()
    }
}
