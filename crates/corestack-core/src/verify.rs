//! Completion verification and the project marker
//!
//! After generation the project root must contain a handful of artifacts.
//! When they are all present a marker file is written recording how the
//! project was generated; sub-generators use it to find the project root.

use crate::error::{Result, ScaffoldError};
use crate::options::{AuthProvider, Database, PackageManager, ProjectOptions, Template, UiComponent};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;
use walkdir::WalkDir;

/// Marker file written at the project root
pub const MARKER_FILE: &str = ".corestack.json";

/// Name recorded in the marker
pub const GENERATOR_NAME: &str = "create-corestack";

/// Version recorded in the marker and compared by sub-generators
pub const GENERATOR_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Files every generated project must contain
pub const REQUIRED_ARTIFACTS: &[&str] = &[
    "package.json",
    ".env.example",
    "prisma/schema.prisma",
    "src/app/layout.tsx",
];

/// Contents of [`MARKER_FILE`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionMarker {
    pub generator: String,
    /// Generator version that created the project
    pub version: String,
    pub project_name: String,
    pub template: Template,
    pub database: Database,
    pub auth_provider: AuthProvider,
    pub package_manager: PackageManager,
    pub include_example_code: bool,
    #[serde(default)]
    pub components: Vec<UiComponent>,
    pub created_at: DateTime<Utc>,
}

impl CompletionMarker {
    pub fn from_options(opts: &ProjectOptions) -> Self {
        Self {
            generator: GENERATOR_NAME.to_string(),
            version: GENERATOR_VERSION.to_string(),
            project_name: opts.project_name.clone(),
            template: opts.template,
            database: opts.database,
            auth_provider: opts.auth_provider,
            package_manager: opts.package_manager,
            include_example_code: opts.include_example_code,
            components: opts.components.iter().copied().collect(),
            created_at: Utc::now(),
        }
    }
}

/// Outcome of the final checks
#[derive(Debug, Clone)]
pub struct Verification {
    pub marker: CompletionMarker,
    /// Files in the project, excluding `node_modules` and `.git`
    pub file_count: usize,
    /// Whether `.gitignore` gained the marker entry during this run
    pub ignore_entry_added: bool,
}

/// Check that every required artifact exists, listing all that do not
pub async fn verify_project(root: &Path) -> Result<()> {
    let mut missing = Vec::new();
    for artifact in REQUIRED_ARTIFACTS {
        let path = root.join(artifact);
        if !fs::try_exists(&path).await.unwrap_or(false) {
            missing.push(path);
        }
    }
    if missing.is_empty() {
        Ok(())
    } else {
        Err(ScaffoldError::MissingArtifacts(missing))
    }
}

/// Write [`MARKER_FILE`] for `opts` and return what was written
pub async fn write_completion_marker(root: &Path, opts: &ProjectOptions) -> Result<CompletionMarker> {
    let marker = CompletionMarker::from_options(opts);
    let mut json = serde_json::to_string_pretty(&marker)?;
    json.push('\n');
    fs::write(root.join(MARKER_FILE), json).await?;
    Ok(marker)
}

/// Read the marker of an existing project
pub async fn read_completion_marker(root: &Path) -> Result<CompletionMarker> {
    let path = root.join(MARKER_FILE);
    let content = match fs::read_to_string(&path).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ScaffoldError::NotAProject {
                path: root.to_path_buf(),
            })
        }
        Err(e) => return Err(e.into()),
    };
    Ok(serde_json::from_str(&content)?)
}

/// Append `entry` to `.gitignore` unless a line already matches it
///
/// Creates the file when absent. Returns whether the entry was added.
pub async fn ensure_ignore_entry(root: &Path, entry: &str) -> Result<bool> {
    let path = root.join(".gitignore");
    let existing = match fs::read_to_string(&path).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
        Err(e) => return Err(e.into()),
    };

    if existing.lines().any(|line| line.trim() == entry) {
        return Ok(false);
    }

    let mut updated = existing;
    if !updated.is_empty() && !updated.ends_with('\n') {
        updated.push('\n');
    }
    updated.push_str(entry);
    updated.push('\n');
    fs::write(&path, updated).await?;
    Ok(true)
}

/// Walk up from `start` to the nearest directory holding [`MARKER_FILE`]
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(MARKER_FILE).is_file())
        .map(Path::to_path_buf)
}

/// Count project files, skipping dependency and VCS directories
pub fn count_project_files(root: &Path) -> usize {
    WalkDir::new(root)
        .into_iter()
        .filter_entry(|entry| {
            let name = entry.file_name().to_string_lossy();
            !(entry.depth() > 0 && (name == "node_modules" || name == ".git" || name == ".next"))
        })
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .count()
}

/// Verify artifacts, then write the marker and its ignore entry
///
/// Nothing is rolled back on failure; a missing artifact leaves the tree as is
/// and no marker is written.
pub async fn finalize(root: &Path, opts: &ProjectOptions) -> Result<Verification> {
    verify_project(root).await?;
    let marker = write_completion_marker(root, opts).await?;
    let ignore_entry_added = ensure_ignore_entry(root, MARKER_FILE).await?;
    let file_count = count_project_files(root);
    tracing::debug!(files = file_count, "project verified");
    Ok(Verification {
        marker,
        file_count,
        ignore_entry_added,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::test_support::options;
    use tempfile::TempDir;

    async fn touch_required(root: &Path) {
        for artifact in REQUIRED_ARTIFACTS {
            let path = root.join(artifact);
            fs::create_dir_all(path.parent().unwrap()).await.unwrap();
            fs::write(path, "x").await.unwrap();
        }
    }

    #[tokio::test]
    async fn test_verify_lists_every_missing_artifact() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("package.json"), "{}").await.unwrap();

        match verify_project(temp.path()).await {
            Err(ScaffoldError::MissingArtifacts(missing)) => {
                assert_eq!(missing.len(), REQUIRED_ARTIFACTS.len() - 1);
                let message = ScaffoldError::MissingArtifacts(missing).to_string();
                assert!(message.contains(".env.example"));
                assert!(message.contains("schema.prisma"));
                assert!(message.contains("layout.tsx"));
            }
            other => panic!("expected missing artifacts, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_marker_round_trip() {
        let temp = TempDir::new().unwrap();
        let opts = options(Template::Dashboard, Database::Mysql, AuthProvider::Google, false);

        let written = write_completion_marker(temp.path(), &opts).await.unwrap();
        let read = read_completion_marker(temp.path()).await.unwrap();
        assert_eq!(written, read);
        assert_eq!(read.template, opts.template);
        assert_eq!(read.database, opts.database);
        assert_eq!(read.auth_provider, opts.auth_provider);
        assert_eq!(read.version, GENERATOR_VERSION);

        let raw = fs::read_to_string(temp.path().join(MARKER_FILE)).await.unwrap();
        assert!(raw.contains("\"authProvider\": \"google\""));
        assert!(raw.contains("\"createdAt\""));

        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(json["version"], GENERATOR_VERSION);
        assert!(json.get("generatorVersion").is_none());
        for key in ["createdAt", "projectName", "template", "database", "authProvider"] {
            assert!(json.get(key).is_some(), "marker is missing {}", key);
        }
    }

    #[tokio::test]
    async fn test_missing_marker_is_not_a_project() {
        let temp = TempDir::new().unwrap();
        assert!(matches!(
            read_completion_marker(temp.path()).await,
            Err(ScaffoldError::NotAProject { .. })
        ));
    }

    #[tokio::test]
    async fn test_ignore_entry_appended_once() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(".gitignore"), "node_modules").await.unwrap();

        assert!(ensure_ignore_entry(temp.path(), MARKER_FILE).await.unwrap());
        assert!(!ensure_ignore_entry(temp.path(), MARKER_FILE).await.unwrap());

        let content = fs::read_to_string(temp.path().join(".gitignore")).await.unwrap();
        assert_eq!(content, format!("node_modules\n{}\n", MARKER_FILE));
    }

    #[tokio::test]
    async fn test_ignore_file_created_when_absent() {
        let temp = TempDir::new().unwrap();
        assert!(ensure_ignore_entry(temp.path(), MARKER_FILE).await.unwrap());
        let content = fs::read_to_string(temp.path().join(".gitignore")).await.unwrap();
        assert_eq!(content, format!("{}\n", MARKER_FILE));
    }

    #[tokio::test]
    async fn test_finalize_writes_marker_and_counts_files() {
        let temp = TempDir::new().unwrap();
        let opts = options(Template::Barebones, Database::Sqlite, AuthProvider::None, false);
        touch_required(temp.path()).await;
        fs::create_dir_all(temp.path().join("node_modules/pkg")).await.unwrap();
        fs::write(temp.path().join("node_modules/pkg/index.js"), "").await.unwrap();

        let verification = finalize(temp.path(), &opts).await.unwrap();
        assert!(verification.ignore_entry_added);
        // required artifacts, marker and .gitignore
        assert_eq!(verification.file_count, REQUIRED_ARTIFACTS.len() + 2);
        assert_eq!(find_project_root(&temp.path().join("prisma")), Some(temp.path().to_path_buf()));
    }
}
