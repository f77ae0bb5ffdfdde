use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::HashSet;

/// A named unit of generated content recovered from generation output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Artifact {
    pub filename: String,
    pub content: String,
}

/// Expected artifact filenames with the domain keywords used by the
/// content-similarity fallback. Data-driven: new expected artifacts extend
/// this table without touching the cascade.
pub const EXPECTED_ARTIFACTS: &[(&str, &[&str])] = &[
    (
        "visual.spec.ts",
        &[
            "visual",
            "responsive",
            "viewport",
            "theme",
            "dark",
            "light",
            "mobile",
            "desktop",
        ],
    ),
    (
        "flow.spec.ts",
        &[
            "flow",
            "login",
            "navigation",
            "user",
            "authentication",
            "wizard",
            "form",
        ],
    ),
    (
        "component.spec.ts",
        &[
            "component",
            "interactive",
            "button",
            "modal",
            "dropdown",
            "form",
            "input",
        ],
    ),
    (
        "accessibility.spec.ts",
        &[
            "accessibility",
            "aria",
            "keyboard",
            "focus",
            "screen reader",
            "tab",
        ],
    ),
];

/// Lines scanned backwards from a bare fence for a filename token.
const FENCE_LOOKBACK_LINES: usize = 10;

const PLACEHOLDER_PREFIX: &str = "artifact_";

static FILENAME_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"FILENAME:\s*(\S+\.spec\.ts)").unwrap());

static HEADING_FENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)####\s*(\S+\.spec\.ts)\s*\n```(?:typescript|javascript|ts|js)?\s*\n(.*?)\n```")
        .unwrap()
});

static INLINE_FENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?s)([A-Za-z0-9_./-]*[A-Za-z0-9_-]\.spec\.ts):\s*\n```(?:typescript|javascript|ts|js)?\s*\n(.*?)\n```",
    )
    .unwrap()
});

static FENCED_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)```(?:typescript|javascript|ts|js)?\s*\n(.*?)\n```").unwrap());

static FILENAME_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([A-Za-z0-9_-][A-Za-z0-9_.-]*\.spec\.ts)").unwrap());

/// Recover labeled documents from arbitrary generated text.
///
/// An ordered cascade of independent strategies; candidates are merged
/// first-seen-wins by filename, so an earlier strategy's content is never
/// replaced by a later one. Empty contents are discarded before counting.
/// Total over its input: worst case is an empty result, never a failure.
pub fn extract_artifacts(text: &str) -> Vec<Artifact> {
    let mut cascade = Cascade::default();

    cascade.merge(explicit_labels(text), "explicit-label");
    cascade.merge(heading_markers(text), "heading-marker");
    cascade.merge(inline_filenames(text), "inline-filename");

    // Backward search over bare fences only when nothing was labeled.
    if cascade.artifacts.is_empty() {
        cascade.merge(bare_fences(text), "bare-fence");
    }

    // Similarity mapping only while expected artifacts are still missing.
    if cascade.expected_recovered() < EXPECTED_ARTIFACTS.len() {
        let fallback = similarity_fallback(text, &cascade.labeled_contents);
        cascade.merge(fallback, "content-similarity");
    }

    cascade.artifacts
}

/// Merge state for the strategy cascade: first-seen-wins by filename, plus
/// the set of fence bodies that were labeled (under a non-placeholder name)
/// by an earlier strategy.
#[derive(Default)]
struct Cascade {
    artifacts: Vec<Artifact>,
    seen: HashSet<String>,
    labeled_contents: HashSet<String>,
}

impl Cascade {
    fn merge(&mut self, candidates: Vec<Artifact>, strategy: &str) {
        let mut kept = 0;
        for candidate in candidates {
            let content = candidate.content.trim();
            if content.is_empty() {
                continue;
            }
            // Placeholder names are synthesized, not labels; their content
            // stays eligible for the similarity fallback.
            if !candidate.filename.starts_with(PLACEHOLDER_PREFIX) {
                self.labeled_contents.insert(content.to_string());
            }
            if self.seen.insert(candidate.filename.clone()) {
                self.artifacts.push(Artifact {
                    filename: candidate.filename,
                    content: content.to_string(),
                });
                kept += 1;
            }
        }
        if kept > 0 {
            log::debug!("strategy {strategy} recovered {kept} artifact(s)");
        }
    }

    fn expected_recovered(&self) -> usize {
        EXPECTED_ARTIFACTS
            .iter()
            .filter(|(name, _)| self.seen.contains(*name))
            .count()
    }
}

/// Strategy 1: `FILENAME: <name>.spec.ts` markers; content spans from the
/// marker to the next marker or end of text.
fn explicit_labels(text: &str) -> Vec<Artifact> {
    let markers: Vec<(usize, usize, String)> = FILENAME_MARKER
        .captures_iter(text)
        .filter_map(|cap| {
            let whole = cap.get(0)?;
            let name = cap.get(1)?;
            Some((whole.start(), whole.end(), name.as_str().to_string()))
        })
        .collect();

    markers
        .iter()
        .enumerate()
        .map(|(i, (_, end, filename))| {
            let content_end = markers
                .get(i + 1)
                .map(|(start, _, _)| *start)
                .unwrap_or(text.len());
            Artifact {
                filename: filename.clone(),
                content: text[*end..content_end].to_string(),
            }
        })
        .collect()
}

/// Strategy 2: `#### <name>.spec.ts` heading immediately followed by a
/// fenced block; content is the fence body.
fn heading_markers(text: &str) -> Vec<Artifact> {
    HEADING_FENCE
        .captures_iter(text)
        .filter_map(|cap| {
            Some(Artifact {
                filename: cap.get(1)?.as_str().to_string(),
                content: cap.get(2)?.as_str().to_string(),
            })
        })
        .collect()
}

/// Strategy 3: a `<name>.spec.ts:` line immediately followed by a fenced
/// block.
fn inline_filenames(text: &str) -> Vec<Artifact> {
    INLINE_FENCE
        .captures_iter(text)
        .filter_map(|cap| {
            Some(Artifact {
                filename: cap.get(1)?.as_str().to_string(),
                content: cap.get(2)?.as_str().to_string(),
            })
        })
        .collect()
}

/// Strategy 4: every fenced block, with a bounded backward search of the
/// preceding lines for a filename token; otherwise a positional placeholder.
fn bare_fences(text: &str) -> Vec<Artifact> {
    FENCED_BLOCK
        .captures_iter(text)
        .enumerate()
        .filter_map(|(i, cap)| {
            let whole = cap.get(0)?;
            let body = cap.get(1)?.as_str();
            let filename = lookback_filename(&text[..whole.start()])
                .unwrap_or_else(|| placeholder_filename(i));
            Some(Artifact {
                filename,
                content: body.to_string(),
            })
        })
        .collect()
}

fn lookback_filename(preceding: &str) -> Option<String> {
    preceding
        .lines()
        .rev()
        .take(FENCE_LOOKBACK_LINES)
        .find_map(|line| {
            FILENAME_TOKEN
                .captures(line)
                .and_then(|cap| cap.get(1))
                .map(|m| m.as_str().to_string())
        })
}

fn placeholder_filename(index: usize) -> String {
    format!("{PLACEHOLDER_PREFIX}{}.spec.ts", index + 1)
}

/// Strategy 5: score each still-unlabeled fenced block against the expected
/// filenames by keyword overlap (case-insensitive substring count). Ties
/// keep the earlier expected filename in its canonical order; an all-zero
/// score falls back to the positional placeholder.
fn similarity_fallback(text: &str, labeled: &HashSet<String>) -> Vec<Artifact> {
    FENCED_BLOCK
        .captures_iter(text)
        .enumerate()
        .filter_map(|(i, cap)| {
            let body = cap.get(1)?.as_str().trim();
            if body.is_empty() || labeled.contains(body) {
                return None;
            }

            let lowered = body.to_lowercase();
            let mut best: Option<&str> = None;
            let mut best_score = 0usize;
            for (filename, keywords) in EXPECTED_ARTIFACTS {
                let score = keywords.iter().filter(|kw| lowered.contains(*kw)).count();
                if score > best_score {
                    best_score = score;
                    best = Some(filename);
                }
            }

            Some(Artifact {
                filename: best
                    .map(|f| f.to_string())
                    .unwrap_or_else(|| placeholder_filename(i)),
                content: body.to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn by_name<'a>(artifacts: &'a [Artifact], name: &str) -> Option<&'a Artifact> {
        artifacts.iter().find(|a| a.filename == name)
    }

    #[test]
    fn explicit_labels_split_on_markers() {
        let text = "FILENAME: a.spec.ts\nhello\nFILENAME: b.spec.ts\nworld";
        let artifacts = extract_artifacts(text);

        assert_eq!(artifacts.len(), 2);
        assert_eq!(artifacts[0].filename, "a.spec.ts");
        assert_eq!(artifacts[0].content, "hello");
        assert_eq!(artifacts[1].filename, "b.spec.ts");
        assert_eq!(artifacts[1].content, "world");
    }

    #[test]
    fn heading_marker_takes_fence_body() {
        let text = "#### visual.spec.ts\n```typescript\nconst a = 1;\n```\n";
        let artifacts = extract_artifacts(text);

        let a = by_name(&artifacts, "visual.spec.ts").unwrap();
        assert_eq!(a.content, "const a = 1;");
    }

    #[test]
    fn inline_filename_then_fence() {
        let text = "flow.spec.ts:\n```typescript\nconst b = 2;\n```\n";
        let artifacts = extract_artifacts(text);

        let a = by_name(&artifacts, "flow.spec.ts").unwrap();
        assert_eq!(a.content, "const b = 2;");
    }

    #[test]
    fn first_seen_wins_across_strategies() {
        // The explicit label and the heading marker both claim a.spec.ts;
        // the explicit label runs first and its content is retained.
        let text = concat!(
            "FILENAME: a.spec.ts\nfrom explicit\n",
            "#### a.spec.ts\n```typescript\nfrom heading\n```\n",
        );
        let artifacts = extract_artifacts(text);

        let a = by_name(&artifacts, "a.spec.ts").unwrap();
        assert!(a.content.starts_with("from explicit"));
        // The heading fence body was labeled (then deduplicated), so the
        // similarity fallback does not resurrect it under another name.
        assert_eq!(artifacts.len(), 1);
    }

    #[test]
    fn bare_fence_finds_filename_in_preceding_lines() {
        let text = "\
Here is the generated suite for checkout.spec.ts as requested.
Line of filler.
```typescript
const c = 3;
```
";
        let artifacts = extract_artifacts(text);
        let a = by_name(&artifacts, "checkout.spec.ts").unwrap();
        assert_eq!(a.content, "const c = 3;");
    }

    #[test]
    fn bare_fence_without_label_gets_positional_placeholder() {
        let text = "no names anywhere zzz qqq\n```\nxyzzy();\n```\n";
        let artifacts = extract_artifacts(text);

        assert_eq!(artifacts.len(), 1);
        assert_eq!(artifacts[0].filename, "artifact_1.spec.ts");
        assert_eq!(artifacts[0].content, "xyzzy();");
    }

    #[test]
    fn labeled_run_maps_leftover_fences_by_similarity_not_position() {
        let text = "\
FILENAME: a.spec.ts
labeled content
```
keyboard focus aria checks
```
";
        let artifacts = extract_artifacts(text);

        assert!(by_name(&artifacts, "a.spec.ts").is_some());
        // The bare-fence strategy is skipped (a label was found), and the
        // leftover fence maps to an expected filename by keyword overlap.
        assert!(by_name(&artifacts, "accessibility.spec.ts").is_some());
        assert!(by_name(&artifacts, "artifact_1.spec.ts").is_none());
    }

    #[test]
    fn similarity_fallback_maps_blocks_to_expected_filenames() {
        let text = "\
```typescript
await page.setViewportSize({ width: 320, height: 640 }); // responsive mobile theme
```
```typescript
await expect(dialog).toHaveAttribute('aria-modal'); // keyboard focus accessibility
```
";
        let artifacts = extract_artifacts(text);

        assert!(by_name(&artifacts, "visual.spec.ts").is_some());
        assert!(by_name(&artifacts, "accessibility.spec.ts").is_some());
    }

    #[test]
    fn similarity_ties_keep_earlier_expected_filename() {
        // "form" appears in both the flow and component keyword lists with
        // equal score; the earlier canonical entry (flow.spec.ts) wins.
        let text = "```\nsubmit the form\n```\n";
        let artifacts = extract_artifacts(text);

        assert!(by_name(&artifacts, "flow.spec.ts").is_some());
        assert!(by_name(&artifacts, "component.spec.ts").is_none());
    }

    #[test]
    fn empty_contents_are_discarded() {
        let text = "FILENAME: a.spec.ts\n\n   \nFILENAME: b.spec.ts\nreal";
        let artifacts = extract_artifacts(text);

        assert!(by_name(&artifacts, "a.spec.ts").is_none());
        assert_eq!(by_name(&artifacts, "b.spec.ts").unwrap().content, "real");
    }

    #[test]
    fn never_fails_on_arbitrary_input() {
        for junk in ["", "```", "```\n", "}{", "\u{0}\u{1}binary\u{2}", "FILENAME:"] {
            let artifacts = extract_artifacts(junk);
            assert!(artifacts.is_empty(), "junk {junk:?} produced {artifacts:?}");
        }
    }
}
