use serde::Serialize;

/// Minimum trimmed length for a non-trivial artifact.
pub const MIN_CONTENT_LEN: usize = 100;

/// Import line every Playwright suite must carry.
pub const IMPORT_MARKER: &str = "import { test, expect }";

const TEST_MARKERS: &[&str] = &["test(", "test.describe"];

/// Outcome of a structural check, with one entry per failed rule.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Validation {
    pub valid: bool,
    pub failures: Vec<String>,
}

/// Structurally check an artifact: long enough, imports the test runner,
/// declares at least one test, and has balanced braces. A cheap gate, not a
/// parse; invalid artifacts are still persisted, only flagged.
pub fn validate(content: &str) -> Validation {
    let trimmed = content.trim();
    let mut failures = Vec::new();

    if trimmed.len() < MIN_CONTENT_LEN {
        failures.push(format!(
            "content too short ({} < {MIN_CONTENT_LEN} chars)",
            trimmed.len()
        ));
    }

    if !trimmed.contains(IMPORT_MARKER) {
        failures.push(format!("missing import line `{IMPORT_MARKER}`"));
    }

    if !TEST_MARKERS.iter().any(|m| trimmed.contains(m)) {
        failures.push("no test declaration found".to_string());
    }

    let opens = trimmed.matches('{').count();
    let closes = trimmed.matches('}').count();
    if opens != closes {
        failures.push(format!("unbalanced braces ({opens} open, {closes} close)"));
    }

    Validation {
        valid: failures.is_empty(),
        failures,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const WELL_FORMED: &str = "\
import { test, expect } from '@playwright/test';

test.describe('checkout', () => {
    test('adds an item to the cart', async ({ page }) => {
        await page.goto('/checkout');
        await expect(page.locator('h1')).toBeVisible();
    });
});
";

    #[test]
    fn well_formed_suite_passes() {
        let v = validate(WELL_FORMED);
        assert!(v.valid, "failures: {:?}", v.failures);
        assert!(v.failures.is_empty());
    }

    #[test]
    fn extra_closing_brace_fails() {
        let broken = format!("{WELL_FORMED}}}");
        let v = validate(&broken);

        assert!(!v.valid);
        assert_eq!(v.failures, vec!["unbalanced braces (4 open, 5 close)"]);
    }

    #[test]
    fn short_content_fails_even_with_markers() {
        let v = validate("import { test, expect }\ntest('x', () => {});");
        assert!(!v.valid);
        assert!(v.failures[0].starts_with("content too short"));
    }

    #[test]
    fn missing_import_is_reported() {
        let body = "test.describe('x', () => {});\n".repeat(10);
        let v = validate(&body);

        assert!(!v.valid);
        assert!(v
            .failures
            .iter()
            .any(|f| f.contains("missing import line")));
    }

    #[test]
    fn missing_test_declaration_is_reported() {
        let body = format!("{IMPORT_MARKER} from '@playwright/test';\n{}", "x".repeat(100));
        let v = validate(&body);

        assert!(!v.valid);
        assert!(v.failures.iter().any(|f| f == "no test declaration found"));
    }

    #[test]
    fn all_failures_accumulate() {
        let v = validate("}{");
        assert!(!v.valid);
        // Short, no import, no test. Braces are balanced by count.
        assert_eq!(v.failures.len(), 3);
    }

    #[test]
    fn length_check_uses_trimmed_content() {
        let padded = format!("{}\n\n\n", " ".repeat(300));
        let v = validate(&padded);
        assert!(v.failures[0].starts_with("content too short (0 <"));
    }
}
