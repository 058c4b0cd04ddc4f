//! Project lifecycle: the ordered steps of a create run
//!
//! Steps run strictly in sequence. Each one produces a [`StepRecord`]; only
//! creating the project directory can end the run early. Every other failure
//! is recorded with a remediation hint and the run continues, so the final
//! checks always execute.

mod environment;
mod runner;

pub use environment::generate_secret;
pub use runner::LifecycleRunner;

use crate::orchestrator::GenerationReport;
use crate::verify::Verification;
use std::fmt;
use std::time::Duration;

/// Default limit for the dependency install
pub const INSTALL_TIMEOUT: Duration = Duration::from_secs(5 * 60);
/// Default limit for Prisma client generation
pub const CLIENT_TIMEOUT: Duration = Duration::from_secs(60);
/// Limit for each git command
pub const GIT_TIMEOUT: Duration = Duration::from_secs(30);

pub const INSTALL_TIMEOUT_ENV: &str = "CORESTACK_INSTALL_TIMEOUT_SECS";
pub const CLIENT_TIMEOUT_ENV: &str = "CORESTACK_CLIENT_TIMEOUT_SECS";

/// A lifecycle step, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    CreateDirectory,
    GenerateFiles,
    SetupEnvironment,
    InitGit,
    InstallDependencies,
    GenerateClient,
    FinalChecks,
}

impl Step {
    pub const ALL: [Step; 7] = [
        Step::CreateDirectory,
        Step::GenerateFiles,
        Step::SetupEnvironment,
        Step::InitGit,
        Step::InstallDependencies,
        Step::GenerateClient,
        Step::FinalChecks,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Step::CreateDirectory => "create-directory",
            Step::GenerateFiles => "generate-files",
            Step::SetupEnvironment => "setup-environment",
            Step::InitGit => "init-git",
            Step::InstallDependencies => "install-dependencies",
            Step::GenerateClient => "generate-client",
            Step::FinalChecks => "final-checks",
        }
    }

    /// Progress label shown while the step runs
    pub fn label(&self) -> &'static str {
        match self {
            Step::CreateDirectory => "Creating project directory",
            Step::GenerateFiles => "Generating project files",
            Step::SetupEnvironment => "Setting up environment",
            Step::InitGit => "Initializing git repository",
            Step::InstallDependencies => "Installing dependencies",
            Step::GenerateClient => "Generating Prisma client",
            Step::FinalChecks => "Running final checks",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a step ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Done(String),
    Skipped(String),
    Failed {
        message: String,
        /// Command the user can run to finish the step by hand
        remediation: Option<String>,
    },
}

impl StepOutcome {
    pub fn failed(message: impl Into<String>) -> Self {
        StepOutcome::Failed {
            message: message.into(),
            remediation: None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, StepOutcome::Failed { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepRecord {
    pub step: Step,
    pub outcome: StepOutcome,
}

/// Everything a completed run produced
#[derive(Debug, Clone, Default)]
pub struct LifecycleReport {
    pub steps: Vec<StepRecord>,
    pub generation: Option<GenerationReport>,
    pub verification: Option<Verification>,
}

impl LifecycleReport {
    pub fn outcome(&self, step: Step) -> Option<&StepOutcome> {
        self.steps
            .iter()
            .find(|record| record.step == step)
            .map(|record| &record.outcome)
    }

    pub fn failed_steps(&self) -> impl Iterator<Item = &StepRecord> {
        self.steps.iter().filter(|record| record.outcome.is_failed())
    }

    /// No step failed
    pub fn is_clean(&self) -> bool {
        self.failed_steps().next().is_none()
    }
}

/// Limits and switches for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSettings {
    pub install_timeout: Duration,
    pub client_timeout: Duration,
    pub git_timeout: Duration,
    /// Abort with an error when any generator unit fails
    pub fail_fast: bool,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            install_timeout: INSTALL_TIMEOUT,
            client_timeout: CLIENT_TIMEOUT,
            git_timeout: GIT_TIMEOUT,
            fail_fast: false,
        }
    }
}

impl RunSettings {
    /// Defaults with the timeout overrides from the process environment
    pub fn from_env() -> Self {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply timeout overrides looked up by variable name
    ///
    /// Values are whole seconds; unparsable or zero values are ignored.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let seconds = |key: &str| {
            lookup(key)
                .and_then(|raw| raw.trim().parse::<u64>().ok())
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
        };
        if let Some(limit) = seconds(INSTALL_TIMEOUT_ENV) {
            self.install_timeout = limit;
        }
        if let Some(limit) = seconds(CLIENT_TIMEOUT_ENV) {
            self.client_timeout = limit;
        }
        self
    }

    pub fn fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_names_are_kebab_case() {
        let names: Vec<_> = Step::ALL.iter().map(Step::as_str).collect();
        assert_eq!(names[0], "create-directory");
        assert_eq!(names[6], "final-checks");
        assert!(names.iter().all(|n| !n.contains('_')));
    }

    #[test]
    fn test_default_timeouts() {
        let settings = RunSettings::default();
        assert_eq!(settings.install_timeout, Duration::from_secs(300));
        assert_eq!(settings.client_timeout, Duration::from_secs(60));
        assert_eq!(settings.git_timeout, Duration::from_secs(30));
        assert!(!settings.fail_fast);
    }

    #[test]
    fn test_timeout_overrides() {
        let settings = RunSettings::default().with_overrides(|key| match key {
            INSTALL_TIMEOUT_ENV => Some("600".to_string()),
            CLIENT_TIMEOUT_ENV => Some("soon".to_string()),
            _ => None,
        });
        assert_eq!(settings.install_timeout, Duration::from_secs(600));
        assert_eq!(settings.client_timeout, CLIENT_TIMEOUT);

        let zero = RunSettings::default().with_overrides(|_| Some("0".to_string()));
        assert_eq!(zero, RunSettings::default());
    }

    #[test]
    fn test_report_lookup() {
        let report = LifecycleReport {
            steps: vec![
                StepRecord {
                    step: Step::CreateDirectory,
                    outcome: StepOutcome::Done(String::new()),
                },
                StepRecord {
                    step: Step::InstallDependencies,
                    outcome: StepOutcome::failed("boom"),
                },
            ],
            ..Default::default()
        };
        assert!(!report.is_clean());
        assert_eq!(report.failed_steps().count(), 1);
        assert!(report.outcome(Step::GenerateClient).is_none());
    }
}
