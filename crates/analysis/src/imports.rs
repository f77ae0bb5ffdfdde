use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// Independent textual patterns that capture an imported path. Several
/// patterns may capture the same path; the result is de-duplicated.
static IMPORT_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r#"import\s+.*?\s+from\s+['"]([^'"]+)['"]"#).unwrap(),
        Regex::new(r#"import\s+['"]([^'"]+)['"]"#).unwrap(),
        Regex::new(r#"require\(['"]([^'"]+)['"]\)"#).unwrap(),
        Regex::new(r#"from\s+['"]([^'"]+)['"]"#).unwrap(),
    ]
});

/// Extract the set of referenced module paths from file text.
///
/// Order-insensitive; no resolution is attempted here. Whether a path points
/// at a collected file is decided by the graph builder.
pub fn extract_references(text: &str) -> HashSet<String> {
    let mut refs = HashSet::new();
    for pattern in IMPORT_PATTERNS.iter() {
        for capture in pattern.captures_iter(text) {
            if let Some(path) = capture.get(1) {
                refs.insert(path.as_str().to_string());
            }
        }
    }
    refs
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn captures_common_import_syntaxes() {
        let text = r#"
import React from 'react';
import { Button } from "./components/Button.tsx";
import './styles.css';
const api = require('./api/client.js');
"#;
        let refs = extract_references(text);

        assert!(refs.contains("react"));
        assert!(refs.contains("./components/Button.tsx"));
        assert!(refs.contains("./styles.css"));
        assert!(refs.contains("./api/client.js"));
    }

    #[test]
    fn deduplicates_across_patterns() {
        // Both the `import ... from` and the bare `from` pattern match here.
        let text = r#"import { x } from './dup.ts';"#;
        let refs = extract_references(text);

        let dups: Vec<&String> = refs.iter().filter(|r| r.contains("dup")).collect();
        assert_eq!(dups.len(), 1);
    }

    #[test]
    fn empty_input_yields_empty_set() {
        assert!(extract_references("").is_empty());
        assert!(extract_references("const x = 1;").is_empty());
    }
}
