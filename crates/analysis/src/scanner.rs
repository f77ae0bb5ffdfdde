use crate::error::{AnalysisError, Result};
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

/// Frontend source extensions collected by default.
pub const SOURCE_EXTENSIONS: &[&str] = &["tsx", "jsx", "js", "ts", "vue", "html"];

/// Extensions whose references participate in the dependency graph.
pub const GRAPH_EXTENSIONS: &[&str] = &["tsx", "jsx", "ts", "js"];

/// A collected source file. Immutable once read; discarded at end of run.
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// Path relative to the scanned root (node identity downstream).
    pub path: PathBuf,

    /// Basename, kept as a display label.
    pub name: String,

    /// Lowercased extension.
    pub ext: String,

    /// Size in bytes.
    pub size: u64,

    /// Full text content.
    pub text: String,
}

/// Collector for frontend source files under a root directory.
///
/// Unreadable and oversized files are skipped, never fatal; one bad file
/// must not poison the rest of the collection.
pub struct SourceCollector {
    root: PathBuf,
    extensions: Vec<String>,
    max_file_size: u64,
}

impl SourceCollector {
    pub fn new(root: impl AsRef<Path>, max_file_size: u64) -> Result<Self> {
        Self::with_extensions(root, max_file_size, SOURCE_EXTENSIONS)
    }

    pub fn with_extensions(
        root: impl AsRef<Path>,
        max_file_size: u64,
        extensions: &[&str],
    ) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        if !root.is_dir() {
            return Err(AnalysisError::InvalidPath(format!(
                "Path does not exist or is not a directory: {}",
                root.display()
            )));
        }

        Ok(Self {
            root,
            extensions: extensions.iter().map(|e| e.to_lowercase()).collect(),
            max_file_size,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Collect matching files in traversal order (.gitignore aware).
    ///
    /// Traversal order is not stable across filesystems; callers must treat
    /// the result as a set.
    pub fn collect(&self) -> Vec<SourceFile> {
        let mut files = Vec::new();

        let walker = WalkBuilder::new(&self.root)
            .hidden(true)
            .git_ignore(true)
            .git_global(true)
            .git_exclude(true)
            .filter_entry(|entry| !is_ignored_dir(entry.path()))
            .build();

        for result in walker {
            let entry = match result {
                Ok(entry) => entry,
                Err(e) => {
                    log::warn!("Failed to read entry: {e}");
                    continue;
                }
            };

            let Some(file_type) = entry.file_type() else {
                continue;
            };
            if !file_type.is_file() {
                continue;
            }

            let path = entry.path();
            let Some(ext) = extension_of(path) else {
                continue;
            };
            if !self.extensions.iter().any(|e| e == &ext) {
                continue;
            }

            let size = match entry.metadata() {
                Ok(meta) => meta.len(),
                Err(e) => {
                    log::warn!("Could not stat {}: {e}", path.display());
                    continue;
                }
            };
            if size > self.max_file_size {
                log::debug!(
                    "Skipping large file {} ({} bytes > {})",
                    path.display(),
                    size,
                    self.max_file_size
                );
                continue;
            }

            let text = match std::fs::read_to_string(path) {
                Ok(text) => text,
                Err(e) => {
                    log::warn!("Could not read {}: {e}", path.display());
                    continue;
                }
            };

            let rel = path.strip_prefix(&self.root).unwrap_or(path).to_path_buf();
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();

            files.push(SourceFile {
                path: rel,
                name,
                ext,
                size,
                text,
            });
        }

        log::info!("Collected {} source files", files.len());
        files
    }
}

fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
}

fn is_ignored_dir(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(|name| {
            let lowered = name.to_lowercase();
            IGNORED_SCOPES.iter().any(|ignored| ignored == &lowered)
        })
        .unwrap_or(false)
}

const IGNORED_SCOPES: &[&str] = &[
    ".git",
    "node_modules",
    ".next",
    ".nuxt",
    ".svelte-kit",
    "dist",
    "build",
    "coverage",
    "storybook-static",
    ".cache",
    "vendor",
];

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn collects_only_allowed_extensions() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("App.tsx"), "export const App = 1;").unwrap();
        fs::write(temp.path().join("notes.md"), "# notes").unwrap();
        fs::write(temp.path().join("util.js"), "module.exports = {};").unwrap();

        let collector = SourceCollector::new(temp.path(), 10_000).unwrap();
        let files = collector.collect();

        let mut names: Vec<&str> = files.iter().map(|f| f.name.as_str()).collect();
        names.sort_unstable();
        assert_eq!(names, vec!["App.tsx", "util.js"]);
    }

    #[test]
    fn skips_oversized_files() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("big.ts"), "x".repeat(64)).unwrap();
        fs::write(temp.path().join("small.ts"), "y").unwrap();

        let collector = SourceCollector::new(temp.path(), 16).unwrap();
        let files = collector.collect();

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].name, "small.ts");
    }

    #[test]
    fn skips_node_modules() {
        let temp = tempdir().unwrap();
        let nm = temp.path().join("node_modules").join("pkg");
        fs::create_dir_all(&nm).unwrap();
        fs::write(nm.join("index.js"), "exports.x = 1;").unwrap();
        fs::write(temp.path().join("main.js"), "console.log(1);").unwrap();

        let collector = SourceCollector::new(temp.path(), 10_000).unwrap();
        let files = collector.collect();

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].name, "main.js");
    }

    #[test]
    fn rejects_missing_root() {
        let temp = tempdir().unwrap();
        let missing = temp.path().join("nope");
        assert!(SourceCollector::new(&missing, 10_000).is_err());
    }

    #[test]
    fn records_relative_paths() {
        let temp = tempdir().unwrap();
        let sub = temp.path().join("src").join("pages");
        fs::create_dir_all(&sub).unwrap();
        fs::write(sub.join("Home.tsx"), "export default function Home() {}").unwrap();

        let collector = SourceCollector::new(temp.path(), 10_000).unwrap();
        let files = collector.collect();

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].path, PathBuf::from("src/pages/Home.tsx"));
        assert_eq!(files[0].ext, "tsx");
    }
}
