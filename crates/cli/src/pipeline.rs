use crate::client::{GenerationClient, GenerationOptions};
use crate::config::GenConfig;
use crate::prompts;
use crate::report::{render_run_report, ValidationSummary};
use crate::run::RunContext;
use anyhow::{Context, Result};
use flowspec_analysis::{
    detect_framework, extract_signals, is_page_like, synthesize_features, Framework, Signals,
    SourceCollector, SourceFile,
};
use flowspec_extract::{extract_artifacts, parse_flow_document, validate, Artifact, FlowRecord};
use flowspec_graph::{build_graph, export_dot, SourceGraph};
use serde::Serialize;
use std::collections::HashSet;
use std::path::Path;

/// Output cap for the user-flow document; per-flow generation is
/// unbounded since truncated code fails validation anyway.
const FLOW_DOC_NUM_PREDICT: i64 = 2000;

/// Static analysis of one source tree, shared by `analyze` and `generate`.
pub struct Analysis {
    pub files: Vec<SourceFile>,
    pub framework: Framework,
    pub graph: SourceGraph,
    pub signals: Signals,
    pub pages: Vec<String>,
    pub features: Vec<String>,
}

pub fn analyze_corpus(root: &Path, config: &GenConfig) -> Result<Analysis> {
    let collector = SourceCollector::new(root, config.max_file_size)
        .with_context(|| format!("Cannot scan {}", root.display()))?;
    let files = collector.collect();

    let framework = detect_framework(root);
    let graph = build_graph(&files);

    let mut signals = Signals::default();
    for file in &files {
        signals.merge(&extract_signals(&file.text));
    }

    let pages: Vec<String> = files
        .iter()
        .filter(|f| is_page_like(&f.name))
        .map(|f| f.name.clone())
        .collect();
    let features = synthesize_features(&signals.routes, &pages);

    Ok(Analysis {
        files,
        framework,
        graph,
        signals,
        pages,
        features,
    })
}

/// Flat analysis summary for `analyze --json`.
#[derive(Serialize)]
pub struct AnalysisOutput {
    pub framework: String,
    pub files: usize,
    pub nodes: usize,
    pub edges: usize,
    pub routes: Vec<String>,
    pub endpoints: Vec<String>,
    pub features: Vec<String>,
}

impl AnalysisOutput {
    pub fn from_analysis(analysis: &Analysis) -> Self {
        Self {
            framework: analysis.framework.as_str().to_string(),
            files: analysis.files.len(),
            nodes: analysis.graph.node_count(),
            edges: analysis.graph.edge_count(),
            routes: analysis.signals.routes.clone(),
            endpoints: analysis.signals.endpoints.clone(),
            features: analysis.features.clone(),
        }
    }
}

#[derive(Debug)]
pub struct PipelineOutcome {
    pub flows: usize,
    pub artifacts: usize,
    pub valid: usize,
    pub invalid: usize,
}

/// Full generation run: analyze, ask for a user-flow document, generate one
/// suite per flow, extract and validate artifacts, write everything under a
/// fresh run directory.
///
/// Every per-unit failure degrades: a flow whose generation fails yields no
/// artifact and the run continues. Zero artifacts is a valid outcome.
pub async fn run_generate(
    root: &Path,
    out_base: &Path,
    config: &GenConfig,
) -> Result<PipelineOutcome> {
    let analysis = analyze_corpus(root, config)?;
    let ctx = RunContext::create(out_base)?;
    let client = GenerationClient::new(config)?;

    ctx.save_report("source_graph.dot", &export_dot(&analysis.graph))?;

    let flow_doc = generate_flow_document(&client, &ctx, &analysis).await;
    if !flow_doc.is_empty() {
        ctx.save_report("user_flows.md", &flow_doc)?;
    }
    let flows = parse_flow_document(&flow_doc);
    log::info!("Parsed {} user flows", flows.len());

    let mut artifacts: Vec<Artifact> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    for flow in &flows {
        let Some(artifact) = generate_flow_suite(&client, &ctx, &analysis, flow).await else {
            continue;
        };
        if seen.insert(artifact.filename.clone()) {
            artifacts.push(artifact);
        } else {
            log::debug!("Skipping duplicate artifact {}", artifact.filename);
        }
    }

    let mut validation = ValidationSummary::default();
    for artifact in &artifacts {
        let result = validate(&artifact.content);
        if !result.valid {
            log::warn!(
                "{} failed validation: {}",
                artifact.filename,
                result.failures.join("; ")
            );
        }
        validation.record(&artifact.filename, result.failures);
        // Invalid artifacts are kept on disk for inspection.
        ctx.save_test(&artifact.filename, &artifact.content)?;
    }

    let report = render_run_report(
        analysis.framework.as_str(),
        analysis.files.len(),
        &analysis.graph,
        &analysis.signals,
        &analysis.features,
        flows.len(),
        &validation,
    );
    ctx.save_report("run_report.md", &report)?;
    ctx.cleanup()?;

    log::info!(
        "Run {} complete: {} artifact(s), {} valid, {} invalid",
        ctx.run_id,
        validation.total,
        validation.valid,
        validation.invalid()
    );

    Ok(PipelineOutcome {
        flows: flows.len(),
        artifacts: artifacts.len(),
        valid: validation.valid,
        invalid: validation.invalid(),
    })
}

/// Ask for the user-flow document. A failed call degrades to an empty
/// document, which parses to zero flows.
async fn generate_flow_document(
    client: &GenerationClient,
    ctx: &RunContext,
    analysis: &Analysis,
) -> String {
    let prompt = prompts::user_flows_prompt(
        analysis.framework.as_str(),
        &analysis.signals.routes,
        &analysis.pages,
        &analysis.signals.endpoints,
        &analysis.features,
        &analysis.signals,
    );
    if let Err(e) = ctx.save_log("user_flow_prompt.txt", &prompt) {
        log::warn!("Could not save user flow prompt: {e:#}");
    }

    match client
        .generate(&prompt, GenerationOptions::bounded(FLOW_DOC_NUM_PREDICT))
        .await
    {
        Ok(doc) => doc,
        Err(e) => {
            log::warn!("User flow generation failed, continuing with zero flows: {e:#}");
            String::new()
        }
    }
}

/// Generate and extract one suite for a flow. Returns `None` when the call
/// fails or nothing extractable comes back.
async fn generate_flow_suite(
    client: &GenerationClient,
    ctx: &RunContext,
    analysis: &Analysis,
    flow: &FlowRecord,
) -> Option<Artifact> {
    let stem = flow.filename.trim_end_matches(".spec.ts");
    let prompt = prompts::flow_test_prompt(
        flow,
        analysis.framework.as_str(),
        &analysis.signals.routes,
        &analysis.pages,
    );
    if let Err(e) = ctx.save_log(&format!("flow_prompt_{stem}.txt"), &prompt) {
        log::warn!("Could not save prompt for {}: {e:#}", flow.name);
    }

    let response = match client
        .generate(&prompt, GenerationOptions::unbounded())
        .await
    {
        Ok(response) => response,
        Err(e) => {
            log::warn!("Generation for flow '{}' failed, skipping: {e:#}", flow.name);
            return None;
        }
    };
    if let Err(e) = ctx.save_log(&format!("flow_response_{stem}.txt"), &response) {
        log::warn!("Could not save response for {}: {e:#}", flow.name);
    }

    let picked = pick_for_flow(extract_artifacts(&response), flow);
    if picked.is_none() {
        log::warn!("No artifact recovered for flow '{}'", flow.name);
    }
    picked
}

/// Prefer the artifact named after the flow; otherwise take the first one
/// the cascade recovered, renamed to the flow's canonical filename.
fn pick_for_flow(mut extracted: Vec<Artifact>, flow: &FlowRecord) -> Option<Artifact> {
    if let Some(pos) = extracted.iter().position(|a| a.filename == flow.filename) {
        return Some(extracted.swap_remove(pos));
    }
    let first = extracted.into_iter().next()?;
    Some(Artifact {
        filename: flow.filename.clone(),
        content: first.content,
    })
}
