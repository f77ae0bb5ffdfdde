use flowspec_analysis::{Role, Signals};
use flowspec_graph::SourceGraph;
use std::collections::BTreeMap;
use std::fmt::Write;

/// Per-artifact validation results for the run report.
#[derive(Debug, Default)]
pub struct ValidationSummary {
    pub total: usize,
    pub valid: usize,
    pub failures: Vec<(String, Vec<String>)>,
}

impl ValidationSummary {
    pub fn invalid(&self) -> usize {
        self.total - self.valid
    }

    pub fn record(&mut self, filename: &str, failures: Vec<String>) {
        self.total += 1;
        if failures.is_empty() {
            self.valid += 1;
        } else {
            self.failures.push((filename.to_string(), failures));
        }
    }
}

/// Render the markdown run report: what was analyzed, what was generated,
/// and how the artifacts validated.
#[allow(clippy::too_many_arguments)]
pub fn render_run_report(
    framework: &str,
    file_count: usize,
    graph: &SourceGraph,
    signals: &Signals,
    features: &[String],
    flow_count: usize,
    validation: &ValidationSummary,
) -> String {
    let mut md = String::new();

    md.push_str("# Test Generation Report\n\n");

    md.push_str("## Analysis\n\n");
    writeln!(md, "- **Framework**: {framework}").ok();
    writeln!(md, "- **Source files**: {file_count}").ok();
    writeln!(
        md,
        "- **Dependency graph**: {} nodes, {} edges",
        graph.node_count(),
        graph.edge_count()
    )
    .ok();
    writeln!(md, "- **Routes**: {}", signals.routes.len()).ok();
    writeln!(md, "- **API endpoints**: {}", signals.endpoints.len()).ok();
    writeln!(md, "- **User flows parsed**: {flow_count}").ok();
    md.push('\n');

    md.push_str("## Role distribution\n\n");
    for (role, count) in role_distribution(graph) {
        writeln!(md, "- {}: {count}", role.label()).ok();
    }
    md.push('\n');

    if !features.is_empty() {
        md.push_str("## Features identified\n\n");
        for feature in features {
            writeln!(md, "- {feature}").ok();
        }
        md.push('\n');
    }

    md.push_str("## Validation\n\n");
    writeln!(
        md,
        "{} artifact(s) generated: {} valid, {} invalid",
        validation.total,
        validation.valid,
        validation.invalid()
    )
    .ok();
    for (filename, failures) in &validation.failures {
        md.push('\n');
        writeln!(md, "### {filename}").ok();
        for failure in failures {
            writeln!(md, "- {failure}").ok();
        }
    }

    md
}

fn role_distribution(graph: &SourceGraph) -> BTreeMap<Role, usize> {
    let mut counts = BTreeMap::new();
    for node in graph.nodes() {
        *counts.entry(node.role).or_insert(0) += 1;
    }
    counts
}
