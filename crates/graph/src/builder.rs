use crate::types::{FileNode, SourceGraph};
use flowspec_analysis::{classify, extract_references, SourceFile, GRAPH_EXTENSIONS};

/// Build the reference graph over a collected corpus.
///
/// Phase 1 creates one node per file; phase 2 resolves each file's textual
/// references by basename against the corpus. References to files outside
/// the corpus (external packages, bare module names) carry no edge and are
/// dropped silently. Self-loops are not suppressed.
pub fn build_graph(files: &[SourceFile]) -> SourceGraph {
    let mut graph = SourceGraph::new();

    for file in files {
        graph.add_node(FileNode {
            path: file.path.to_string_lossy().into_owned(),
            name: file.name.clone(),
            role: classify(&file.name),
        });
    }

    for file in files {
        let path = file.path.to_string_lossy();
        let Some(from) = graph.find_by_path(&path) else {
            continue;
        };

        for reference in extract_references(&file.text) {
            let Some(target_name) = graph_target_basename(&reference) else {
                continue;
            };
            let targets: Vec<_> = graph.find_by_name(&target_name).to_vec();
            for to in targets {
                graph.add_edge(from, to);
            }
        }
    }

    log::info!(
        "Built source graph: {} nodes, {} edges",
        graph.node_count(),
        graph.edge_count()
    );

    graph
}

/// Basename of a reference path, only when it ends in a recognized source
/// extension. Everything else (packages, styles, assets) resolves to None.
fn graph_target_basename(reference: &str) -> Option<String> {
    let has_source_ext = GRAPH_EXTENSIONS
        .iter()
        .any(|ext| reference.ends_with(&format!(".{ext}")));
    if !has_source_ext {
        return None;
    }

    reference
        .rsplit('/')
        .next()
        .filter(|name| !name.is_empty())
        .map(|name| name.to_string())
}
