use serde::Serialize;

/// Heading marker that starts a new flow block.
pub const FLOW_HEADING: &str = "## Flow:";

/// One user flow cut out of a flow document. Transient: consumed
/// immediately to build a generation request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlowRecord {
    pub name: String,

    /// Raw block content, heading line included.
    pub content: String,

    /// Canonical output filename derived from the name.
    pub filename: String,
}

/// Split a flow document into records by heading markers.
///
/// Content before the first heading is discarded; a document with zero
/// headings yields zero flows.
pub fn parse_flow_document(text: &str) -> Vec<FlowRecord> {
    let mut flows = Vec::new();
    let mut current: Option<FlowRecord> = None;

    for raw in text.lines() {
        let line = raw.trim();
        if let Some(rest) = line.strip_prefix(FLOW_HEADING) {
            if let Some(flow) = current.take() {
                flows.push(flow);
            }
            let name = rest.trim().to_string();
            current = Some(FlowRecord {
                filename: flow_filename(&name),
                content: format!("{line}\n"),
                name,
            });
        } else if let Some(flow) = current.as_mut() {
            flow.content.push_str(line);
            flow.content.push('\n');
        }
    }

    if let Some(flow) = current.take() {
        flows.push(flow);
    }

    log::debug!("Parsed {} flows from document", flows.len());
    flows
}

/// Derive the canonical `.spec.ts` filename for a flow name.
///
/// Pure and referentially transparent: the same name always produces the
/// same filename, which keeps re-runs idempotent.
pub fn flow_filename(name: &str) -> String {
    let mut filename = name.to_lowercase().replace(' ', "_").replace(':', "");
    filename = filename.replace('-', "_");
    while filename.contains("__") {
        filename = filename.replace("__", "_");
    }
    format!("{filename}.spec.ts")
}
