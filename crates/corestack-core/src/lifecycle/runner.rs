use super::environment::setup_environment;
use super::{LifecycleReport, RunSettings, Step, StepOutcome, StepRecord};
use crate::error::{Result, ScaffoldError};
use crate::options::ProjectOptions;
use crate::orchestrator::Orchestrator;
use crate::process::{CommandRunner, Invocation, ProcessError};
use crate::progress::ProgressReporter;
use crate::verify;
use std::time::Duration;
use tokio::fs;

const VERSION_CHECK_TIMEOUT: Duration = Duration::from_secs(10);
const INITIAL_COMMIT_MESSAGE: &str = "Initial commit from create-corestack";

/// Runs the create lifecycle for one set of options
pub struct LifecycleRunner<R: CommandRunner, P: ProgressReporter> {
    commands: R,
    reporter: P,
    settings: RunSettings,
}

impl<R: CommandRunner, P: ProgressReporter> LifecycleRunner<R, P> {
    pub fn new(commands: R, reporter: P) -> Self {
        Self {
            commands,
            reporter,
            settings: RunSettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: RunSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn commands(&self) -> &R {
        &self.commands
    }

    pub fn reporter(&self) -> &P {
        &self.reporter
    }

    /// Run every step for `opts`
    ///
    /// Returns `Err` only when the project directory cannot be created, or
    /// when fail-fast is set and a generator unit failed. All other failures
    /// are recorded in the report.
    pub async fn run(&self, opts: &ProjectOptions) -> Result<LifecycleReport> {
        let mut report = LifecycleReport::default();
        let root = opts.project_path.as_path();

        self.reporter.begin(Step::CreateDirectory);
        if let Err(source) = fs::create_dir_all(root).await {
            self.reporter.fail(Step::CreateDirectory, &source.to_string());
            return Err(ScaffoldError::CreateDirectory {
                path: root.to_path_buf(),
                source,
            });
        }
        self.record(
            &mut report,
            Step::CreateDirectory,
            StepOutcome::Done(root.display().to_string()),
        );

        self.reporter.begin(Step::GenerateFiles);
        let orchestrator = Orchestrator::new().fail_fast(self.settings.fail_fast);
        let outcome = match orchestrator.generate(opts).await {
            Ok(generation) => {
                let failures = generation.failures();
                let outcome = if failures.is_empty() {
                    StepOutcome::Done(format!("{} files written", generation.files_written))
                } else {
                    StepOutcome::failed(
                        failures
                            .iter()
                            .map(ToString::to_string)
                            .collect::<Vec<_>>()
                            .join("\n"),
                    )
                };
                report.generation = Some(generation);
                outcome
            }
            Err(err @ ScaffoldError::Generation(_)) => {
                self.reporter.fail(Step::GenerateFiles, &err.to_string());
                return Err(err);
            }
            Err(err) => StepOutcome::failed(err.to_string()),
        };
        self.record(&mut report, Step::GenerateFiles, outcome);

        self.reporter.begin(Step::SetupEnvironment);
        let outcome = match setup_environment(opts).await {
            Ok(summary) => StepOutcome::Done(summary),
            Err(e) => StepOutcome::failed(format!("Failed to set up environment: {}", e)),
        };
        self.record(&mut report, Step::SetupEnvironment, outcome);

        if opts.init_git {
            self.reporter.begin(Step::InitGit);
            let outcome = self.init_git(opts).await;
            self.record(&mut report, Step::InitGit, outcome);
        } else {
            self.record(
                &mut report,
                Step::InitGit,
                StepOutcome::Skipped("git initialization disabled".to_string()),
            );
        }

        if opts.skip_install {
            for step in [Step::InstallDependencies, Step::GenerateClient] {
                self.record(
                    &mut report,
                    step,
                    StepOutcome::Skipped("install disabled".to_string()),
                );
            }
        } else {
            self.reporter.begin(Step::InstallDependencies);
            let outcome = self.install_dependencies(opts).await;
            self.record(&mut report, Step::InstallDependencies, outcome);

            // Attempted even after a failed install so its manual command is reported
            self.reporter.begin(Step::GenerateClient);
            let outcome = self.generate_client(opts).await;
            self.record(&mut report, Step::GenerateClient, outcome);
        }

        self.reporter.begin(Step::FinalChecks);
        let outcome = match verify::finalize(root, opts).await {
            Ok(verification) => {
                let detail = format!("{} files in project", verification.file_count);
                report.verification = Some(verification);
                StepOutcome::Done(detail)
            }
            Err(e) => StepOutcome::failed(e.to_string()),
        };
        self.record(&mut report, Step::FinalChecks, outcome);

        Ok(report)
    }

    /// Report the outcome and append it to the run
    fn record(&self, report: &mut LifecycleReport, step: Step, outcome: StepOutcome) {
        match &outcome {
            StepOutcome::Done(detail) => self.reporter.complete(step, detail),
            StepOutcome::Skipped(reason) => self.reporter.skip(step, reason),
            StepOutcome::Failed {
                message,
                remediation,
            } => {
                let mut text = message.clone();
                if let Some(command) = remediation {
                    text.push_str(&format!("\nRun manually: {}", command));
                }
                tracing::warn!(step = step.as_str(), %message, "step failed");
                self.reporter.fail(step, &text);
            }
        }
        report.steps.push(StepRecord { step, outcome });
    }

    async fn run_in_project(
        &self,
        opts: &ProjectOptions,
        invocation: &Invocation,
        limit: Duration,
    ) -> std::result::Result<(), ProcessError> {
        self.commands
            .run(invocation, &opts.project_path, limit)
            .await
            .map(|_| ())
    }

    async fn init_git(&self, opts: &ProjectOptions) -> StepOutcome {
        let limit = self.settings.git_timeout;
        let init = Invocation::new("git", ["init"]);
        if let Err(e) = self.run_in_project(opts, &init, limit).await {
            return StepOutcome::Failed {
                message: e.to_string(),
                remediation: Some(format!("cd {} && git init", opts.project_path.display())),
            };
        }

        let add = Invocation::new("git", ["add", "-A"]);
        let commit = Invocation::new("git", ["commit", "-m", INITIAL_COMMIT_MESSAGE]);
        let committed = match self.run_in_project(opts, &add, limit).await {
            Ok(()) => self.run_in_project(opts, &commit, limit).await,
            Err(e) => Err(e),
        };

        match committed {
            Ok(()) => StepOutcome::Done("repository initialized with an initial commit".to_string()),
            Err(e) => {
                tracing::warn!(error = %e, "initial commit skipped");
                self.reporter
                    .note(&format!("Repository created without an initial commit ({})", e));
                StepOutcome::Done("repository initialized".to_string())
            }
        }
    }

    async fn install_dependencies(&self, opts: &ProjectOptions) -> StepOutcome {
        let pm = opts.package_manager;
        let version = Invocation::new(pm.as_str(), ["--version"]);
        if self
            .run_in_project(opts, &version, VERSION_CHECK_TIMEOUT)
            .await
            .is_err()
        {
            self.reporter.note(&format!(
                "{} was not found on PATH; the install will probably fail",
                pm
            ));
        }

        let install = pm.install_command();
        match self
            .run_in_project(opts, &install, self.settings.install_timeout)
            .await
        {
            Ok(()) => StepOutcome::Done(format!("installed with {}", pm)),
            Err(e) => StepOutcome::Failed {
                message: e.to_string(),
                remediation: Some(format!("cd {} && {}", opts.project_path.display(), install)),
            },
        }
    }

    async fn generate_client(&self, opts: &ProjectOptions) -> StepOutcome {
        let generate = opts.package_manager.client_generate_command();
        match self
            .run_in_project(opts, &generate, self.settings.client_timeout)
            .await
        {
            Ok(()) => StepOutcome::Done("Prisma client generated".to_string()),
            Err(e) => StepOutcome::Failed {
                message: e.to_string(),
                remediation: Some(format!("cd {} && {}", opts.project_path.display(), generate)),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::test_support::options;
    use crate::options::{AuthProvider, Database, Template};
    use crate::process::{ScriptedFailure, ScriptedRunner};
    use crate::progress::{ProgressEvent, RecordingReporter};
    use tempfile::TempDir;

    fn opts_in(temp: &TempDir) -> ProjectOptions {
        let mut opts = options(Template::Barebones, Database::Sqlite, AuthProvider::None, false);
        opts.project_path = temp.path().join("app");
        opts
    }

    #[tokio::test]
    async fn test_full_run_records_every_step_in_order() {
        let temp = TempDir::new().unwrap();
        let opts = opts_in(&temp);
        let runner = LifecycleRunner::new(ScriptedRunner::new(), RecordingReporter::new());

        let report = runner.run(&opts).await.unwrap();
        let steps: Vec<Step> = report.steps.iter().map(|r| r.step).collect();
        assert_eq!(steps, Step::ALL.to_vec());
        assert!(report.is_clean(), "{:?}", report.failed_steps().collect::<Vec<_>>());
        assert_eq!(
            runner.commands().calls(),
            vec![
                "git init",
                "git add -A",
                "git commit -m \"Initial commit from create-corestack\"",
                "npm --version",
                "npm install",
                "npx prisma generate",
            ]
        );
        assert!(report.verification.is_some());
    }

    #[tokio::test]
    async fn test_failed_commit_is_noted_not_failed() {
        let temp = TempDir::new().unwrap();
        let opts = opts_in(&temp);
        let commands = ScriptedRunner::new().fail_on(
            "git commit",
            ScriptedFailure::Exit(128, "Please tell me who you are.".to_string()),
        );
        let runner = LifecycleRunner::new(commands, RecordingReporter::new());

        let report = runner.run(&opts).await.unwrap();
        assert!(matches!(report.outcome(Step::InitGit), Some(StepOutcome::Done(_))));
        assert!(runner
            .reporter()
            .events()
            .iter()
            .any(|e| matches!(e, ProgressEvent::Note(n) if n.contains("without an initial commit"))));
    }

    #[tokio::test]
    async fn test_missing_git_fails_only_that_step() {
        let temp = TempDir::new().unwrap();
        let mut opts = opts_in(&temp);
        opts.skip_install = true;
        let commands = ScriptedRunner::new().fail_on("git", ScriptedFailure::Missing);
        let runner = LifecycleRunner::new(commands, RecordingReporter::new());

        let report = runner.run(&opts).await.unwrap();
        assert!(report.outcome(Step::InitGit).unwrap().is_failed());
        assert!(matches!(report.outcome(Step::FinalChecks), Some(StepOutcome::Done(_))));
    }

    #[tokio::test]
    async fn test_install_timeout_still_attempts_client() {
        let temp = TempDir::new().unwrap();
        let mut opts = opts_in(&temp);
        opts.init_git = false;
        let commands = ScriptedRunner::new()
            .fail_on("npm install", ScriptedFailure::Timeout)
            .fail_on("npm --version", ScriptedFailure::Missing)
            .fail_on("npx prisma generate", ScriptedFailure::Exit(1, "Cannot find module 'prisma'".to_string()));
        let runner = LifecycleRunner::new(commands, RecordingReporter::new());

        let report = runner.run(&opts).await.unwrap();
        match report.outcome(Step::InstallDependencies) {
            Some(StepOutcome::Failed { message, remediation }) => {
                assert!(message.contains("timed out"));
                assert!(remediation.as_deref().unwrap().ends_with("&& npm install"));
            }
            other => panic!("unexpected install outcome {:?}", other),
        }
        match report.outcome(Step::GenerateClient) {
            Some(StepOutcome::Failed { remediation, .. }) => {
                assert!(remediation.as_deref().unwrap().ends_with("&& npx prisma generate"));
            }
            other => panic!("unexpected client outcome {:?}", other),
        }
        assert!(matches!(report.outcome(Step::FinalChecks), Some(StepOutcome::Done(_))));
        assert_eq!(
            runner.commands().calls(),
            vec!["npm --version", "npm install", "npx prisma generate"]
        );
        assert!(runner
            .reporter()
            .events()
            .iter()
            .any(|e| matches!(e, ProgressEvent::Note(n) if n.contains("not found on PATH"))));
    }

    #[tokio::test]
    async fn test_client_generation_failure_is_not_fatal() {
        let temp = TempDir::new().unwrap();
        let mut opts = opts_in(&temp);
        opts.init_git = false;
        let commands = ScriptedRunner::new().fail_on("npx prisma generate", ScriptedFailure::Timeout);
        let runner = LifecycleRunner::new(commands, RecordingReporter::new());

        let report = runner.run(&opts).await.unwrap();
        assert!(matches!(
            report.outcome(Step::InstallDependencies),
            Some(StepOutcome::Done(_))
        ));
        match report.outcome(Step::GenerateClient) {
            Some(StepOutcome::Failed { message, remediation }) => {
                assert!(message.contains("timed out"));
                let hint = remediation.as_deref().unwrap();
                assert!(hint.starts_with(&format!("cd {}", opts.project_path.display())));
                assert!(hint.ends_with("&& npx prisma generate"));
            }
            other => panic!("unexpected client outcome {:?}", other),
        }
        assert!(matches!(report.outcome(Step::FinalChecks), Some(StepOutcome::Done(_))));
        assert_eq!(report.failed_steps().count(), 1);
    }

    #[tokio::test]
    async fn test_directory_creation_failure_is_fatal() {
        let temp = TempDir::new().unwrap();
        let blocker = temp.path().join("file");
        std::fs::write(&blocker, "not a directory").unwrap();
        let mut opts = opts_in(&temp);
        opts.project_path = blocker.join("app");
        let runner = LifecycleRunner::new(ScriptedRunner::new(), RecordingReporter::new());

        let result = runner.run(&opts).await;
        assert!(matches!(result, Err(ScaffoldError::CreateDirectory { .. })));
        assert!(runner.commands().calls().is_empty());
    }
}
