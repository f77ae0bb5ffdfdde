use crate::types::SourceGraph;
use flowspec_analysis::Role;

/// Fill colors per role, matching the report palette.
const fn role_color(role: Role) -> &'static str {
    match role {
        Role::Component => "lightblue",
        Role::Route => "lightgreen",
        Role::Api => "lightcoral",
        Role::Form => "lightyellow",
        Role::Other => "lightgray",
    }
}

/// Render the graph as a Graphviz digraph. Node ids are relative paths
/// (unique); labels show the basename and role.
pub fn export_dot(graph: &SourceGraph) -> String {
    let mut dot = String::new();
    dot.push_str("digraph SourceGraph {\n");
    dot.push_str("  rankdir=TB;\n");
    dot.push_str("  node [shape=box, style=filled];\n\n");

    for node in graph.nodes() {
        dot.push_str(&format!(
            "  \"{}\" [fillcolor={}, label=\"{}\\n({})\"];\n",
            node.path,
            role_color(node.role),
            node.name,
            node.role.label()
        ));
    }

    dot.push('\n');

    for (from, to) in graph.edges() {
        dot.push_str(&format!("  \"{}\" -> \"{}\";\n", from.path, to.path));
    }

    dot.push_str("}\n");
    dot
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build_graph;
    use flowspec_analysis::SourceFile;
    use std::path::PathBuf;

    fn file(path: &str, text: &str) -> SourceFile {
        let path = PathBuf::from(path);
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        SourceFile {
            ext: path.extension().unwrap().to_string_lossy().into_owned(),
            path,
            name,
            size: text.len() as u64,
            text: text.to_string(),
        }
    }

    #[test]
    fn dot_contains_every_node_and_edge() {
        let files = vec![
            file("src/AppRouter.tsx", "import './Home.tsx';"),
            file("src/Home.tsx", "export default 1;"),
        ];
        let graph = build_graph(&files);
        let dot = export_dot(&graph);

        assert!(dot.starts_with("digraph SourceGraph {"));
        assert!(dot.contains(r#""src/AppRouter.tsx" [fillcolor=lightgreen"#));
        assert!(dot.contains(r#"label="AppRouter.tsx\n(Route)""#));
        assert!(dot.contains(r#""src/Home.tsx" [fillcolor=lightblue"#));
        assert!(dot.contains(r#""src/AppRouter.tsx" -> "src/Home.tsx";"#));
        assert!(dot.trim_end().ends_with('}'));
    }

    #[test]
    fn empty_graph_still_renders_valid_skeleton() {
        let dot = export_dot(&SourceGraph::new());
        assert!(dot.contains("digraph SourceGraph"));
        assert!(dot.trim_end().ends_with('}'));
    }
}
