use flowspec_analysis::Signals;
use flowspec_extract::{FlowRecord, FLOW_HEADING};
use std::fmt::Write;

// Bounded samples for prompt context; extraction itself is never capped.
const ROUTE_SAMPLE: usize = 20;
const PAGE_SAMPLE: usize = 20;
const ENDPOINT_SAMPLE: usize = 15;
const UI_SAMPLE: usize = 5;

/// Prompt asking the model for a user-flow description document built from
/// the analyzed codebase context. The required output format matches what
/// the flow parser consumes.
pub fn user_flows_prompt(
    framework: &str,
    routes: &[String],
    pages: &[String],
    endpoints: &[String],
    features: &[String],
    signals: &Signals,
) -> String {
    let mut prompt = String::new();

    prompt.push_str(
        "You are a senior QA automation architect analyzing a frontend codebase \
         for test generation. Generate SPECIFIC user flows based on the routes, \
         components, and APIs listed below.\n\n",
    );
    prompt.push_str(
        "REQUIREMENTS:\n\
         - Use ONLY the routes, components, and API endpoints listed below\n\
         - Use exact names from the lists; do not invent generic examples\n\
         - Generate 8-15 distinct flows covering different application features\n\
         - Exclude authentication flows (login, registration, password reset)\n\
         - Cover error scenarios, empty states, and validation failures\n\n",
    );

    writeln!(prompt, "FRAMEWORK: {framework}\n").ok();
    section(&mut prompt, "ROUTES FOUND", routes, ROUTE_SAMPLE);
    section(&mut prompt, "COMPONENTS DETECTED", pages, PAGE_SAMPLE);
    section(&mut prompt, "API ENDPOINTS", endpoints, ENDPOINT_SAMPLE);
    section(&mut prompt, "FEATURES IDENTIFIED", features, features.len());
    section(&mut prompt, "BUTTONS", &signals.buttons, UI_SAMPLE);
    section(&mut prompt, "MODALS", &signals.modals, UI_SAMPLE);
    section(&mut prompt, "NAVIGATION", &signals.navigation, UI_SAMPLE);

    writeln!(
        prompt,
        "OUTPUT FORMAT - one block per flow, exactly this structure:\n\n\
         {FLOW_HEADING} [Flow Name Based on Actual Components]\n\n\
         - **Route**: [route from the list above]\n\
         - **Components**: [component names from the list above]\n\
         - **UI Elements**: [button text, form fields, modal titles from above]\n\
         - **Steps**:\n\
           1. [specific user action]\n\
           2. [system response]\n\
           3. [validation or error handling]"
    )
    .ok();

    prompt
}

/// Prompt asking the model for one complete Playwright suite covering a
/// single flow. Instructs the exact labeled output format the extractor's
/// first strategy recovers.
pub fn flow_test_prompt(
    flow: &FlowRecord,
    framework: &str,
    routes: &[String],
    pages: &[String],
) -> String {
    let mut prompt = String::new();

    prompt.push_str(
        "You are a senior QA automation architect specializing in Playwright \
         test generation. Generate a COMPREHENSIVE Playwright test file for the \
         following user flow.\n\n\
         REQUIREMENTS:\n\
         - Generate ONLY the test file for this specific flow\n\
         - Cover success paths, error paths, validation, and edge cases\n\
         - Use the exact routes, components, and API endpoints from the flow\n\
         - The code must be complete and syntactically valid TypeScript\n\n",
    );

    writeln!(prompt, "USER FLOW TO TEST:\n{}", flow.content).ok();

    writeln!(prompt, "APPLICATION CONTEXT:\nFramework: {framework}").ok();
    section(&mut prompt, "Routes", routes, ROUTE_SAMPLE);
    section(&mut prompt, "Components", pages, PAGE_SAMPLE);

    writeln!(
        prompt,
        "REQUIRED OUTPUT FORMAT - start your response with exactly this marker:\n\n\
         FILENAME: {}\n\
         ```typescript\n\
         import {{ test, expect }} from '@playwright/test';\n\n\
         test.describe('{}', () => {{\n\
           // all test cases for this flow\n\
         }});\n\
         ```",
        flow.filename, flow.name
    )
    .ok();

    prompt
}

fn section(prompt: &mut String, title: &str, items: &[String], cap: usize) {
    if items.is_empty() {
        return;
    }
    writeln!(prompt, "{title}:").ok();
    for item in items.iter().take(cap) {
        writeln!(prompt, "- {item}").ok();
    }
    prompt.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use flowspec_extract::flow_filename;

    fn strings(prefix: &str, n: usize) -> Vec<String> {
        (0..n).map(|i| format!("{prefix}{i}")).collect()
    }

    #[test]
    fn user_flows_prompt_caps_each_section() {
        let routes = strings("/route", 50);
        let pages = strings("Page", 50);
        let endpoints = strings("/api/e", 50);
        let prompt = user_flows_prompt(
            "react",
            &routes,
            &pages,
            &endpoints,
            &[],
            &Signals::default(),
        );

        assert!(prompt.contains("- /route19"));
        assert!(!prompt.contains("- /route20"));
        assert!(prompt.contains("- Page19"));
        assert!(!prompt.contains("- Page20"));
        assert!(prompt.contains("- /api/e14"));
        assert!(!prompt.contains("- /api/e15"));
    }

    #[test]
    fn user_flows_prompt_demands_parseable_headings() {
        let prompt = user_flows_prompt("vue", &[], &[], &[], &[], &Signals::default());
        assert!(prompt.contains(FLOW_HEADING));
        assert!(prompt.contains("Exclude authentication flows"));
    }

    #[test]
    fn flow_prompt_embeds_flow_content_and_filename_marker() {
        let name = "Create Item".to_string();
        let flow = FlowRecord {
            filename: flow_filename(&name),
            content: "## Flow: Create Item\n- Route: /items/new\n".to_string(),
            name,
        };
        let prompt = flow_test_prompt(&flow, "react", &[], &[]);

        assert!(prompt.contains("FILENAME: create_item.spec.ts"));
        assert!(prompt.contains("- Route: /items/new"));
        assert!(prompt.contains("test.describe('Create Item'"));
    }
}
