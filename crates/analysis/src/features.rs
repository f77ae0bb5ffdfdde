/// Fixed feature checklist: tag → keywords. A tag is emitted at most once
/// when any route or page name contains one of its keywords. Output order
/// follows this table, not input order. Data-driven so new tags extend the
/// table without touching the matching logic.
pub const FEATURE_CHECKLIST: &[(&str, &[&str])] = &[
    ("Dashboard Management", &["dashboard"]),
    ("Create Operations", &["create"]),
    ("Edit Operations", &["edit"]),
    ("Delete Operations", &["delete"]),
    ("Project Management", &["project"]),
    ("User Management", &["user", "profile"]),
    ("Content Management", &["content"]),
    ("File Management", &["file", "upload", "download"]),
    ("Search and Filtering", &["search", "filter"]),
    ("Settings and Configuration", &["setting", "config"]),
    ("E-commerce", &["cart", "checkout", "order"]),
    ("Blog/Content Publishing", &["blog", "post", "article"]),
    ("Analytics and Reporting", &["analytics", "report", "stats"]),
    ("Communication", &["message", "chat", "notification"]),
    ("Calendar/Scheduling", &["calendar", "schedule", "event"]),
];

/// Derive coarse feature tags from aggregated routes and page names.
/// Tags are independent; a corpus can emit zero, one, or many.
pub fn synthesize_features(routes: &[String], pages: &[String]) -> Vec<String> {
    let haystacks: Vec<String> = routes
        .iter()
        .chain(pages.iter())
        .map(|s| s.to_lowercase())
        .collect();

    let mut features = Vec::new();
    for (tag, keywords) in FEATURE_CHECKLIST {
        let hit = haystacks
            .iter()
            .any(|h| keywords.iter().any(|kw| h.contains(kw)));
        if hit {
            features.push((*tag).to_string());
        }
    }
    features
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn tags_follow_checklist_order_not_input_order() {
        // Input mentions e-commerce before dashboard, output is checklist order.
        let routes = strings(&["/checkout", "/dashboard"]);
        let features = synthesize_features(&routes, &[]);
        assert_eq!(features, vec!["Dashboard Management", "E-commerce"]);
    }

    #[test]
    fn page_names_also_match() {
        let pages = strings(&["UserProfilePage.tsx"]);
        let features = synthesize_features(&[], &pages);
        assert_eq!(features, vec!["User Management"]);
    }

    #[test]
    fn each_tag_emitted_at_most_once() {
        let routes = strings(&["/cart", "/checkout", "/orders"]);
        let features = synthesize_features(&routes, &[]);
        assert_eq!(features, vec!["E-commerce"]);
    }

    #[test]
    fn empty_input_emits_no_tags() {
        assert!(synthesize_features(&[], &[]).is_empty());
    }

    #[test]
    fn matching_is_case_insensitive() {
        let routes = strings(&["/Admin/DASHBOARD"]);
        assert_eq!(
            synthesize_features(&routes, &[]),
            vec!["Dashboard Management"]
        );
    }
}
