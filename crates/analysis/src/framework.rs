use ignore::WalkBuilder;
use serde::Serialize;
use std::path::Path;

/// Frontend framework detected from package.json dependencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Framework {
    React,
    Vue,
    Angular,
    Svelte,
    Unknown,
}

impl Framework {
    pub const fn as_str(self) -> &'static str {
        match self {
            Framework::React => "react",
            Framework::Vue => "vue",
            Framework::Angular => "angular",
            Framework::Svelte => "svelte",
            Framework::Unknown => "unknown",
        }
    }
}

/// Dependency names that vote for a framework. One point per present name.
const INDICATORS: &[(Framework, &[&str])] = &[
    (Framework::React, &["react", "react-dom", "@types/react"]),
    (Framework::Vue, &["vue", "@vue/cli-service"]),
    (Framework::Angular, &["@angular/core", "@angular/cli"]),
    (Framework::Svelte, &["svelte", "svelte-preprocess"]),
];

/// Detect the frontend framework by scoring dependencies across every
/// package.json under the root. Unreadable or invalid manifests are skipped
/// with a warning; a corpus with no votes is `Unknown`.
pub fn detect_framework(root: &Path) -> Framework {
    let mut scores = [0usize; INDICATORS.len()];

    let walker = WalkBuilder::new(root)
        .hidden(true)
        .git_ignore(true)
        .filter_entry(|entry| {
            entry
                .file_name()
                .to_str()
                .map(|name| name != "node_modules")
                .unwrap_or(true)
        })
        .build();

    for result in walker {
        let Ok(entry) = result else { continue };
        if entry.file_name().to_str() != Some("package.json") {
            continue;
        }
        let path = entry.path();

        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) => {
                log::warn!("Could not read {}: {e}", path.display());
                continue;
            }
        };
        let manifest: serde_json::Value = match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("Invalid package.json {}: {e}", path.display());
                continue;
            }
        };

        for section in ["dependencies", "devDependencies"] {
            let Some(deps) = manifest.get(section).and_then(|v| v.as_object()) else {
                continue;
            };
            for (i, (_, names)) in INDICATORS.iter().enumerate() {
                scores[i] += names.iter().filter(|n| deps.contains_key(**n)).count();
            }
        }
    }

    // Strictly-greater comparison keeps the earlier indicator on ties.
    let mut best = Framework::Unknown;
    let mut best_score = 0usize;
    for (i, (framework, _)) in INDICATORS.iter().enumerate() {
        if scores[i] > best_score {
            best_score = scores[i];
            best = *framework;
        }
    }

    if best_score == 0 {
        log::info!("No framework indicators found");
        return Framework::Unknown;
    }

    log::info!("Detected framework: {}", best.as_str());
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn detects_react_from_dependencies() {
        let temp = tempdir().unwrap();
        fs::write(
            temp.path().join("package.json"),
            r#"{"dependencies": {"react": "^18.0.0", "react-dom": "^18.0.0"}}"#,
        )
        .unwrap();

        assert_eq!(detect_framework(temp.path()), Framework::React);
    }

    #[test]
    fn dev_dependencies_also_vote() {
        let temp = tempdir().unwrap();
        fs::write(
            temp.path().join("package.json"),
            r#"{"devDependencies": {"svelte": "^4.0.0", "svelte-preprocess": "^5.0.0"}}"#,
        )
        .unwrap();

        assert_eq!(detect_framework(temp.path()), Framework::Svelte);
    }

    #[test]
    fn unknown_when_no_manifest_or_no_votes() {
        let temp = tempdir().unwrap();
        assert_eq!(detect_framework(temp.path()), Framework::Unknown);

        fs::write(
            temp.path().join("package.json"),
            r#"{"dependencies": {"lodash": "^4.0.0"}}"#,
        )
        .unwrap();
        assert_eq!(detect_framework(temp.path()), Framework::Unknown);
    }

    #[test]
    fn invalid_manifest_is_skipped_not_fatal() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("package.json"), "not json at all").unwrap();
        assert_eq!(detect_framework(temp.path()), Framework::Unknown);
    }

    #[test]
    fn ties_resolve_to_earlier_indicator_order() {
        let temp = tempdir().unwrap();
        fs::write(
            temp.path().join("package.json"),
            r#"{"dependencies": {"react": "1", "vue": "1"}}"#,
        )
        .unwrap();

        assert_eq!(detect_framework(temp.path()), Framework::React);
    }
}
