//! # Flowspec Graph
//!
//! Directed reference graph over a collected source corpus.
//!
//! ```text
//! SourceFile[]
//!     │
//!     ├──> Graph Builder
//!     │      ├─ One node per file (relative path identity)
//!     │      ├─ Extract references (textual patterns)
//!     │      └─ Edge only when the target basename exists in the corpus
//!     │
//!     ├──> SourceGraph (petgraph)
//!     │      ├─ Nodes: files with role + display label
//!     │      └─ Edges: file references (cycles and self-loops are legal)
//!     │
//!     └──> DOT export (role-colored Graphviz description)
//! ```
//!
//! Node identity is the file's path relative to the scanned root; the
//! basename is only a display label, so same-named files in different
//! directories stay distinct nodes.

mod builder;
mod dot;
mod types;

pub use builder::build_graph;
pub use dot::export_dot;
pub use types::{FileNode, SourceGraph};
