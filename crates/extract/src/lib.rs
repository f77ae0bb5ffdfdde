//! # Flowspec Extract
//!
//! Turns unreliable generated text into discrete, validated artifacts.
//!
//! ```text
//! Flow document (## Flow: headings)
//!     │
//!     └──> Flow Parser ──> FlowRecord[] ──> generation requests
//!
//! Generation response (free text)
//!     │
//!     ├──> Artifact Extractor (strategy cascade, first-seen-wins)
//!     │      └─> filename -> content
//!     │
//!     └──> Artifact Validator (structural pass/fail)
//! ```
//!
//! Every operation here is total: malformed input yields empty results,
//! never an error. A run that extracts zero artifacts is a valid outcome.

mod artifacts;
mod flows;
mod validate;

pub use artifacts::{extract_artifacts, Artifact, EXPECTED_ARTIFACTS};
pub use flows::{flow_filename, parse_flow_document, FlowRecord, FLOW_HEADING};
pub use validate::{validate, Validation, IMPORT_MARKER, MIN_CONTENT_LEN};
