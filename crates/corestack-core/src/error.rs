//! Error types for project generation

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the generation pipeline
///
/// Only configuration errors and the initial directory creation are fatal to
/// a run. Unit and step failures are normally carried as values in the
/// generation and lifecycle reports; they only surface here when the caller
/// asked for fail-fast behavior.
#[derive(Debug, Error)]
pub enum ScaffoldError {
    /// Project name does not satisfy package-name rules
    #[error("Invalid project name '{name}': {reason}")]
    InvalidProjectName {
        /// The rejected name
        name: String,
        /// Which rule it broke
        reason: String,
    },

    /// Target directory exists, has content, and overwrite was not confirmed
    #[error(
        "Directory {} already exists and is not empty. Use --force to generate into it anyway.",
        .path.display()
    )]
    TargetNotEmpty {
        /// The occupied target directory
        path: PathBuf,
    },

    /// Sub-generators must run inside a project created by this tool
    #[error(
        "{} is not a corestack project (no completion marker found). Run this command from the project root.",
        .path.display()
    )]
    NotAProject {
        /// Directory that was searched
        path: PathBuf,
    },

    /// Unknown value for an option that has no default (sub-generator input)
    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidInput {
        /// Option name
        field: &'static str,
        /// Rejected value
        value: String,
        /// Accepted values or rule
        reason: String,
    },

    /// The project root could not be created
    #[error("Failed to create project directory {}: {source}", .path.display())]
    CreateDirectory {
        /// Project root
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Two generator units were planned to write the same file
    #[error("Generator units '{first}' and '{second}' both write {path}")]
    PathCollision {
        /// Shared relative path
        path: String,
        /// Unit that claimed the path first
        first: &'static str,
        /// Unit that claimed it again
        second: &'static str,
    },

    /// One or more generator units failed (fail-fast mode)
    #[error("{}", UnitFailures(.0))]
    Generation(Vec<UnitFailure>),

    /// Expected artifacts are missing after generation
    #[error("{}", MissingList(.0))]
    MissingArtifacts(Vec<PathBuf>),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ScaffoldError {
    /// Configuration errors are reported before any filesystem activity
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            ScaffoldError::InvalidProjectName { .. }
                | ScaffoldError::TargetNotEmpty { .. }
                | ScaffoldError::NotAProject { .. }
                | ScaffoldError::InvalidInput { .. }
        )
    }
}

/// A single generator unit failure, attributed to the unit that owned the file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitFailure {
    /// Generator unit name
    pub unit: &'static str,
    /// Relative path the unit tried to write
    pub path: String,
    /// Human-readable cause
    pub message: String,
}

impl fmt::Display for UnitFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.unit, self.path, self.message)
    }
}

struct UnitFailures<'a>(&'a [UnitFailure]);

impl fmt::Display for UnitFailures<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} file(s) could not be generated:", self.0.len())?;
        for failure in self.0 {
            write!(f, "\n  - {}", failure)?;
        }
        Ok(())
    }
}

struct MissingList<'a>(&'a [PathBuf]);

impl fmt::Display for MissingList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Project is incomplete, missing:")?;
        for path in self.0 {
            write!(f, "\n  - {}", path.display())?;
        }
        Ok(())
    }
}

pub type Result<T> = std::result::Result<T, ScaffoldError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_artifacts_lists_every_path() {
        let err = ScaffoldError::MissingArtifacts(vec![
            PathBuf::from("package.json"),
            PathBuf::from("prisma/schema.prisma"),
        ]);
        let message = err.to_string();
        assert!(message.contains("package.json"));
        assert!(message.contains("prisma/schema.prisma"));
    }

    #[test]
    fn test_generation_error_names_units() {
        let err = ScaffoldError::Generation(vec![UnitFailure {
            unit: "prisma-schema",
            path: "prisma/schema.prisma".to_string(),
            message: "permission denied".to_string(),
        }]);
        let message = err.to_string();
        assert!(message.starts_with("1 file(s)"));
        assert!(message.contains("[prisma-schema]"));
    }

    #[test]
    fn test_configuration_classification() {
        let err = ScaffoldError::InvalidProjectName {
            name: "Bad".to_string(),
            reason: "uppercase".to_string(),
        };
        assert!(err.is_configuration());
        let err = ScaffoldError::MissingArtifacts(vec![]);
        assert!(!err.is_configuration());
    }
}
