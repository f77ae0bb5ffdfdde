use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// Per-file static signals: category → insertion-ordered, de-duplicated
/// string lists. Extraction is deliberately permissive and never capped;
/// bounded samples are taken only when building prompt context.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Signals {
    pub routes: Vec<String>,
    pub endpoints: Vec<String>,
    pub buttons: Vec<String>,
    pub modals: Vec<String>,
    pub navigation: Vec<String>,
    pub dropdowns: Vec<String>,
    pub tables: Vec<String>,
    pub cards: Vec<String>,
}

impl Signals {
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
            && self.endpoints.is_empty()
            && self.buttons.is_empty()
            && self.modals.is_empty()
            && self.navigation.is_empty()
            && self.dropdowns.is_empty()
            && self.tables.is_empty()
            && self.cards.is_empty()
    }

    /// Merge another file's signals, keeping first-seen order per category.
    pub fn merge(&mut self, other: &Signals) {
        for route in &other.routes {
            push_unique(&mut self.routes, route);
        }
        for endpoint in &other.endpoints {
            push_unique(&mut self.endpoints, endpoint);
        }
        for button in &other.buttons {
            push_unique(&mut self.buttons, button);
        }
        for modal in &other.modals {
            push_unique(&mut self.modals, modal);
        }
        for nav in &other.navigation {
            push_unique(&mut self.navigation, nav);
        }
        for dropdown in &other.dropdowns {
            push_unique(&mut self.dropdowns, dropdown);
        }
        for table in &other.tables {
            push_unique(&mut self.tables, table);
        }
        for card in &other.cards {
            push_unique(&mut self.cards, card);
        }
    }
}

static QUOTED_STRING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"["'](/[^"']*)["']"#).unwrap());

static ENDPOINT_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r#"fetch\(["']([^"']+)["']"#).unwrap(),
        Regex::new(r#"axios\.(?:get|post|put|delete)\(["']([^"']+)["']"#).unwrap(),
        Regex::new(r#"(/api/[^"'\s]+)"#).unwrap(),
    ]
});

static BUTTON_TEXT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<button[^>]*>([^<]*)</button>").unwrap());
static MODAL_TITLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)(?:Modal|Dialog|Popup)[^>]*title=["']([^"']*)["']"#).unwrap());
static NAV_TEXT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<nav[^>]*>([^<]*)</nav>").unwrap());
static SELECT_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<select[^>]*>").unwrap());
static TABLE_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<table[^>]*>").unwrap());
static CARD_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<(?:\w+)?(?:Card|Panel|Box)[^>]*>").unwrap());

/// Extract route strings, API endpoints, and UI element signals from file
/// text. Produces false positives by design (any quoted `/...` string is a
/// route candidate); downstream consumers must tolerate the noise.
pub fn extract_signals(text: &str) -> Signals {
    let mut signals = Signals::default();

    for capture in QUOTED_STRING.captures_iter(text) {
        if let Some(m) = capture.get(1) {
            push_unique(&mut signals.routes, m.as_str());
        }
    }

    for pattern in ENDPOINT_PATTERNS.iter() {
        for capture in pattern.captures_iter(text) {
            if let Some(m) = capture.get(1) {
                if m.as_str().starts_with("/api/") {
                    push_unique(&mut signals.endpoints, m.as_str());
                }
            }
        }
    }

    for capture in BUTTON_TEXT.captures_iter(text) {
        if let Some(m) = capture.get(1) {
            let label = m.as_str().trim();
            if !label.is_empty() {
                push_unique(&mut signals.buttons, label);
            }
        }
    }

    for capture in MODAL_TITLE.captures_iter(text) {
        if let Some(m) = capture.get(1) {
            push_unique(&mut signals.modals, m.as_str());
        }
    }

    for capture in NAV_TEXT.captures_iter(text) {
        if let Some(m) = capture.get(1) {
            let label = m.as_str().trim();
            if !label.is_empty() {
                push_unique(&mut signals.navigation, label);
            }
        }
    }

    for m in SELECT_TAG.find_iter(text) {
        push_unique(&mut signals.dropdowns, m.as_str());
    }
    for m in TABLE_TAG.find_iter(text) {
        push_unique(&mut signals.tables, m.as_str());
    }
    for m in CARD_TAG.find_iter(text) {
        push_unique(&mut signals.cards, m.as_str());
    }

    signals
}

fn push_unique(list: &mut Vec<String>, value: &str) {
    if !list.iter().any(|existing| existing == value) {
        list.push(value.to_string());
    }
}
