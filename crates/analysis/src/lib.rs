//! # Flowspec Analysis
//!
//! Static, pattern-based analysis of a frontend source tree.
//!
//! ## Pipeline
//!
//! ```text
//! Directory
//!     │
//!     ├──> Source Collector (.gitignore aware, size capped)
//!     │      └─> SourceFile[]
//!     │
//!     ├──> Reference Extractor (import/require patterns)
//!     │      └─> referenced paths per file
//!     │
//!     ├──> Role Classifier (filename rules, first match wins)
//!     │      └─> Route / Api / Component / Form / Other
//!     │
//!     └──> Signal Extractor (routes, endpoints, UI elements)
//!            └─> Feature Synthesizer (coarse feature tags)
//! ```
//!
//! All extraction is textual. There is no AST-level parsing and no import
//! resolution beyond "does a collected file with that basename exist" —
//! the output is best-effort static signal, not verified structure.

mod error;
mod features;
mod framework;
mod imports;
mod roles;
mod scanner;
mod signals;

pub use error::{AnalysisError, Result};
pub use features::{synthesize_features, FEATURE_CHECKLIST};
pub use framework::{detect_framework, Framework};
pub use imports::extract_references;
pub use roles::{classify, is_page_like, Role};
pub use scanner::{SourceCollector, SourceFile, GRAPH_EXTENSIONS, SOURCE_EXTENSIONS};
pub use signals::{extract_signals, Signals};
