use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// Per-run output layout, created once and threaded by reference.
///
/// All paths are fixed at creation; nothing in the run mutates them.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub run_id: String,
    pub run_dir: PathBuf,
    pub logs_dir: PathBuf,
    pub tests_dir: PathBuf,
    pub reports_dir: PathBuf,
}

impl RunContext {
    /// Create `<base>/run_<epoch-millis>/{logs,tests,reports}`.
    pub fn create(base: &Path) -> Result<Self> {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .context("System clock before Unix epoch")?
            .as_millis();
        Self::create_with_id(base, &millis.to_string())
    }

    pub fn create_with_id(base: &Path, run_id: &str) -> Result<Self> {
        let run_dir = base.join(format!("run_{run_id}"));
        let logs_dir = run_dir.join("logs");
        let tests_dir = run_dir.join("tests");
        let reports_dir = run_dir.join("reports");

        for dir in [&run_dir, &logs_dir, &tests_dir, &reports_dir] {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?;
        }

        log::info!("Created run directory: {}", run_dir.display());
        Ok(Self {
            run_id: run_id.to_string(),
            run_dir,
            logs_dir,
            tests_dir,
            reports_dir,
        })
    }

    pub fn save_log(&self, name: &str, content: &str) -> Result<PathBuf> {
        save(&self.logs_dir, name, content)
    }

    pub fn save_test(&self, name: &str, content: &str) -> Result<PathBuf> {
        save(&self.tests_dir, name, content)
    }

    pub fn save_report(&self, name: &str, content: &str) -> Result<PathBuf> {
        save(&self.reports_dir, name, content)
    }

    /// Remove subdirectories that ended up empty. Safe to call repeatedly;
    /// a directory removed by an earlier call is simply absent.
    pub fn cleanup(&self) -> Result<()> {
        for dir in [&self.logs_dir, &self.tests_dir, &self.reports_dir] {
            if dir.is_dir() && dir.read_dir()?.next().is_none() {
                fs::remove_dir(dir)
                    .with_context(|| format!("Failed to remove {}", dir.display()))?;
                log::debug!("Removed empty directory {}", dir.display());
            }
        }
        Ok(())
    }
}

fn save(dir: &Path, name: &str, content: &str) -> Result<PathBuf> {
    let path = dir.join(name);
    fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    log::debug!("Saved {} ({} bytes)", path.display(), content.len());
    Ok(path)
}
