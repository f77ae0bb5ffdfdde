use serde::{Deserialize, Serialize};

/// Role assigned to a source file. Exactly one per file, derived from the
/// filename alone; never mutated after classification within a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Role {
    Route,
    Api,
    Component,
    Form,
    Other,
}

impl Role {
    pub const fn label(self) -> &'static str {
        match self {
            Role::Route => "Route",
            Role::Api => "API",
            Role::Component => "Component",
            Role::Form => "Form",
            Role::Other => "Other",
        }
    }
}

/// Ordered classification rules; first match wins.
///
/// Classification is a pure function of the filename (which carries the
/// extension). File content is intentionally not consulted — this keeps the
/// classifier fast and deterministic, and it is a behavioral contract, not
/// an oversight.
const RULES: &[(fn(&str) -> bool, Role)] = &[
    (is_route_name, Role::Route),
    (is_api_name, Role::Api),
    (is_component_ext, Role::Component),
    (is_form_name, Role::Form),
];

pub fn classify(filename: &str) -> Role {
    let lowered = filename.to_lowercase();
    for (matches, role) in RULES {
        if matches(&lowered) {
            return *role;
        }
    }
    Role::Other
}

fn is_route_name(lowered: &str) -> bool {
    // "router" contains "route"; one check covers both keywords.
    lowered.contains("route")
}

fn is_api_name(lowered: &str) -> bool {
    lowered.contains("api") || lowered.contains("service")
}

fn is_component_ext(lowered: &str) -> bool {
    lowered.ends_with(".tsx") || lowered.ends_with(".jsx") || lowered.ends_with(".vue")
}

fn is_form_name(lowered: &str) -> bool {
    lowered.contains("form") || lowered.contains("input")
}

/// Page-like files feed the feature synthesizer and prompt context.
pub fn is_page_like(filename: &str) -> bool {
    let lowered = filename.to_lowercase();
    ["page", "component", "view", "screen"]
        .iter()
        .any(|kw| lowered.contains(kw))
}
