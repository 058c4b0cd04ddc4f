//! Integration tests for full create runs

use corestack_core::progress::ProgressEvent;
use corestack_core::verify::{ensure_ignore_entry, read_completion_marker};
use corestack_core::{
    check_target_available, AuthProvider, Database, LifecycleRunner, ProjectOptions,
    RecordingReporter, ScaffoldError, ScriptedFailure, ScriptedRunner, Step, StepOutcome, Template,
    GENERATOR_VERSION, MARKER_FILE,
};
use std::fs;
use tempfile::TempDir;

fn build(temp: &TempDir, template: &str, db: &str, auth: &str) -> ProjectOptions {
    ProjectOptions::builder("acme-app")
        .base_dir(temp.path())
        .template(template)
        .database(db)
        .auth_provider(auth)
        .package_manager("npm")
        .build()
        .unwrap()
        .options
}

/// Minimal project without install: no package manager command is run
#[tokio::test]
async fn test_barebones_without_install() {
    let temp = TempDir::new().unwrap();
    let mut opts = build(&temp, "barebones", "sqlite", "none");
    opts.include_example_code = false;
    opts.skip_install = true;
    opts.init_git = false;

    check_target_available(&opts.project_path, false).unwrap();
    let runner = LifecycleRunner::new(ScriptedRunner::new(), RecordingReporter::new());
    let report = runner.run(&opts).await.unwrap();

    assert!(report.is_clean(), "unexpected failures: {:?}", report.steps);
    assert!(runner.commands().calls().is_empty());
    assert!(matches!(
        report.outcome(Step::InstallDependencies),
        Some(StepOutcome::Skipped(_))
    ));
    assert!(matches!(
        report.outcome(Step::GenerateClient),
        Some(StepOutcome::Skipped(_))
    ));
    assert!(matches!(report.outcome(Step::FinalChecks), Some(StepOutcome::Done(_))));

    let root = &opts.project_path;
    assert!(root.join("package.json").is_file());
    assert!(root.join("prisma/schema.prisma").is_file());
    assert!(root.join(MARKER_FILE).is_file());
    assert!(!root.join("src/app/admin").exists());
    assert!(!root.join("src/server/api/routers/post.ts").exists());
}

/// A non-empty target is refused before anything is written
#[tokio::test]
async fn test_existing_directory_is_refused() {
    let temp = TempDir::new().unwrap();
    let opts = build(&temp, "barebones", "sqlite", "none");
    fs::create_dir_all(&opts.project_path).unwrap();
    fs::write(opts.project_path.join("notes.txt"), "keep me").unwrap();

    let err = check_target_available(&opts.project_path, false).unwrap_err();
    assert!(matches!(err, ScaffoldError::TargetNotEmpty { .. }));
    assert!(err.is_configuration());

    let entries: Vec<_> = fs::read_dir(&opts.project_path).unwrap().collect();
    assert_eq!(entries.len(), 1);

    // Confirmed overwrite is accepted
    assert!(check_target_available(&opts.project_path, true).is_ok());
}

/// `--yes` on a non-empty target stops the create flow before any write
#[cfg(feature = "tui")]
#[tokio::test]
async fn test_yes_into_existing_directory_writes_nothing() {
    use corestack_core::tui::{confirm_target, CreateArgs};

    let temp = TempDir::new().unwrap();
    let opts = build(&temp, "full-system", "sqlite", "discord");
    fs::create_dir_all(&opts.project_path).unwrap();
    fs::write(opts.project_path.join("notes.txt"), "keep me").unwrap();

    let args = CreateArgs {
        project_name: Some("acme-app".to_string()),
        yes: true,
        ..Default::default()
    };
    let err = confirm_target(&opts.project_path, &args).unwrap_err();
    let scaffold_err = err.downcast_ref::<ScaffoldError>().unwrap();
    assert!(matches!(scaffold_err, ScaffoldError::TargetNotEmpty { .. }));
    assert!(scaffold_err.is_configuration());

    let entries: Vec<String> = fs::read_dir(&opts.project_path)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(entries, vec!["notes.txt".to_string()]);
    assert_eq!(
        fs::read_to_string(opts.project_path.join("notes.txt")).unwrap(),
        "keep me"
    );
    assert!(!opts.project_path.join(MARKER_FILE).exists());
}

/// Install failure is recorded with a remediation hint and final checks still run
#[tokio::test]
async fn test_install_failure_is_not_fatal() {
    let temp = TempDir::new().unwrap();
    let opts = build(&temp, "dashboard", "postgresql", "github");

    let commands = ScriptedRunner::new().fail_on(
        "npm install",
        ScriptedFailure::Exit(1, "npm ERR! network timeout".to_string()),
    );
    let runner = LifecycleRunner::new(commands, RecordingReporter::new());
    let report = runner.run(&opts).await.unwrap();

    match report.outcome(Step::InstallDependencies) {
        Some(StepOutcome::Failed {
            message,
            remediation,
        }) => {
            assert!(message.contains("network timeout"));
            let hint = remediation.as_deref().unwrap();
            assert!(hint.ends_with("&& npm install"));
        }
        other => panic!("install should have failed, got {:?}", other),
    }
    // Later steps still run after the failed install
    assert!(matches!(
        report.outcome(Step::GenerateClient),
        Some(StepOutcome::Done(_))
    ));
    assert!(matches!(report.outcome(Step::FinalChecks), Some(StepOutcome::Done(_))));
    assert_eq!(
        runner.commands().calls().last().map(String::as_str),
        Some("npx prisma generate")
    );

    let events = runner.reporter().events();
    assert!(events.iter().any(|e| matches!(
        e,
        ProgressEvent::Fail(Step::InstallDependencies, text) if text.contains("Run manually:")
    )));
}

/// Credentials auth gets the password flow and no OAuth markup
#[tokio::test]
async fn test_credentials_project() {
    let temp = TempDir::new().unwrap();
    let mut opts = build(&temp, "full-system", "mysql", "credentials");
    opts.skip_install = true;
    opts.init_git = false;

    let runner = LifecycleRunner::new(ScriptedRunner::new(), RecordingReporter::new());
    let report = runner.run(&opts).await.unwrap();
    assert!(report.is_clean(), "unexpected failures: {:?}", report.steps);

    let root = &opts.project_path;
    let password = fs::read_to_string(root.join("src/server/auth/password.ts")).unwrap();
    assert!(password.contains("bcrypt"));
    let actions = fs::read_to_string(root.join("src/app/(auth)/actions.ts")).unwrap();
    assert!(actions.contains("registerUser"));
    assert!(actions.contains("loginUser"));
    assert!(root.join("src/app/(auth)/register/page.tsx").is_file());

    let buttons = fs::read_to_string(root.join("src/components/auth/oauth-buttons.tsx")).unwrap();
    assert!(!buttons.contains("signIn("));

    let schema = fs::read_to_string(root.join("prisma/schema.prisma")).unwrap();
    assert!(schema.contains("provider = \"mysql\""));
    assert!(schema.contains("password"));
}

/// The marker mirrors the options and the ignore entry is written once
#[tokio::test]
async fn test_marker_round_trip() {
    let temp = TempDir::new().unwrap();
    let mut opts = build(&temp, "admin", "postgresql", "google");
    opts.skip_install = true;
    opts.init_git = false;

    let runner = LifecycleRunner::new(ScriptedRunner::new(), RecordingReporter::new());
    let report = runner.run(&opts).await.unwrap();
    let verification = report.verification.as_ref().unwrap();
    assert!(verification.file_count > 0);

    let marker = read_completion_marker(&opts.project_path).await.unwrap();
    assert_eq!(marker.template, Template::Admin);
    assert_eq!(marker.database, Database::Postgresql);
    assert_eq!(marker.auth_provider, AuthProvider::Google);
    assert_eq!(marker.project_name, "acme-app");

    let raw = fs::read_to_string(opts.project_path.join(MARKER_FILE)).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(json["version"], GENERATOR_VERSION);
    assert_eq!(json["projectName"], "acme-app");
    assert_eq!(json["template"], "admin");
    assert!(json.get("createdAt").is_some());

    assert!(!ensure_ignore_entry(&opts.project_path, MARKER_FILE).await.unwrap());
    let gitignore = fs::read_to_string(opts.project_path.join(".gitignore")).unwrap();
    assert_eq!(gitignore.lines().filter(|l| l.trim() == MARKER_FILE).count(), 1);
}
