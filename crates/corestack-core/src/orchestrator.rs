//! Generation orchestrator
//!
//! Renders every applicable unit, checks that no two units claim the same
//! path, ensures the directory plan and then writes all files concurrently.
//! A failed write is recorded against its unit and never cancels siblings.

use crate::error::{Result, ScaffoldError, UnitFailure};
use crate::generators::{self, FeatureArea, FileWrite};
use crate::options::ProjectOptions;
use crate::planner::DirectoryPlan;
use futures::future::join_all;
use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};
use tokio::fs;

/// A rendered unit waiting to be written
#[derive(Debug, Clone)]
pub struct RenderedUnit {
    pub unit: &'static str,
    pub area: FeatureArea,
    pub writes: Vec<FileWrite>,
}

/// What happened to one unit
#[derive(Debug, Clone)]
pub struct UnitOutcome {
    pub unit: &'static str,
    pub area: FeatureArea,
    /// Relative paths written successfully
    pub written: Vec<String>,
    pub failures: Vec<UnitFailure>,
}

impl UnitOutcome {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Aggregated result of a generation run
#[derive(Debug, Clone, Default)]
pub struct GenerationReport {
    pub files_written: usize,
    pub directories_created: usize,
    pub units: Vec<UnitOutcome>,
}

impl GenerationReport {
    /// Every failure across all units, in registry order
    pub fn failures(&self) -> Vec<UnitFailure> {
        self.units
            .iter()
            .flat_map(|outcome| outcome.failures.iter().cloned())
            .collect()
    }

    pub fn is_success(&self) -> bool {
        self.units.iter().all(UnitOutcome::is_success)
    }

    /// Relative paths of every file written
    pub fn written_paths(&self) -> impl Iterator<Item = &str> {
        self.units
            .iter()
            .flat_map(|outcome| outcome.written.iter().map(String::as_str))
    }
}

/// Drives the directory plan and generator units for one project
#[derive(Debug, Clone, Default)]
pub struct Orchestrator {
    fail_fast: bool,
}

impl Orchestrator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Turn any unit failure into an error instead of a report entry
    pub fn fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }

    /// Render every applicable unit and check the no-shared-path invariant
    pub fn render(opts: &ProjectOptions) -> Result<Vec<RenderedUnit>> {
        let rendered: Vec<RenderedUnit> = generators::applicable(opts)
            .into_iter()
            .map(|unit| RenderedUnit {
                unit: unit.name(),
                area: unit.area(),
                writes: unit.render(opts),
            })
            .collect();

        let mut owners: HashMap<&str, &'static str> = HashMap::new();
        for unit in &rendered {
            for write in &unit.writes {
                if let Some(first) = owners.insert(write.path.as_str(), unit.unit) {
                    return Err(ScaffoldError::PathCollision {
                        path: write.path.clone(),
                        first,
                        second: unit.unit,
                    });
                }
            }
        }

        Ok(rendered)
    }

    /// Generate every file for `opts` under `opts.project_path`
    pub async fn generate(&self, opts: &ProjectOptions) -> Result<GenerationReport> {
        let rendered = Self::render(opts)?;
        let root = opts.project_path.as_path();

        let directories_created = DirectoryPlan::for_options(opts).ensure(root).await?;
        tracing::debug!(
            directories = directories_created,
            units = rendered.len(),
            "directory plan ensured"
        );

        let units = join_all(rendered.iter().map(|unit| write_unit(root, unit))).await;
        let files_written = units.iter().map(|outcome| outcome.written.len()).sum();
        let report = GenerationReport {
            files_written,
            directories_created,
            units,
        };

        if self.fail_fast && !report.is_success() {
            return Err(ScaffoldError::Generation(report.failures()));
        }
        Ok(report)
    }
}

async fn write_unit(root: &Path, unit: &RenderedUnit) -> UnitOutcome {
    let results = join_all(unit.writes.iter().map(|write| write_file(root, write))).await;

    let mut outcome = UnitOutcome {
        unit: unit.unit,
        area: unit.area,
        written: Vec::new(),
        failures: Vec::new(),
    };
    for (write, result) in unit.writes.iter().zip(results) {
        match result {
            Ok(()) => outcome.written.push(write.path.clone()),
            Err(message) => {
                tracing::warn!(unit = unit.unit, path = %write.path, %message, "write failed");
                outcome.failures.push(UnitFailure {
                    unit: unit.unit,
                    path: write.path.clone(),
                    message,
                });
            }
        }
    }
    tracing::debug!(unit = unit.unit, files = outcome.written.len(), "unit finished");
    outcome
}

async fn write_file(root: &Path, write: &FileWrite) -> std::result::Result<(), String> {
    let target = resolve_inside(root, &write.path)?;
    fs::write(&target, &write.contents)
        .await
        .map_err(|e| format!("Failed to write {}: {}", target.display(), e))
}

/// Join a relative path onto `root`, refusing anything that would leave it
pub(crate) fn resolve_inside(root: &Path, relative: &str) -> std::result::Result<PathBuf, String> {
    let path = Path::new(relative);
    if relative.is_empty() {
        return Err("empty path".to_string());
    }
    for component in path.components() {
        match component {
            Component::Normal(_) | Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(format!("path {} escapes the project root", relative));
            }
        }
    }
    Ok(root.join(path))
}
