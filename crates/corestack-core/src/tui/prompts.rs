//! Charm-style CLI prompts using cliclack

use crate::error::ScaffoldError;
use crate::lifecycle::{LifecycleReport, LifecycleRunner, RunSettings, Step, StepOutcome};
use crate::options::{
    check_target_available, validate_project_name, AuthProvider, ComponentGroup, Database,
    PackageManager, ProjectOptions, Template,
};
use crate::process::SystemRunner;
use crate::product::ProductConfig;
use crate::progress::{ConsoleReporter, ProgressReporter};
use crate::runtime::{check_runtimes, detect_package_manager};
use anyhow::Result;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

const DEFAULT_PROJECT_NAME: &str = "my-corestack-app";

/// CLI arguments for the create command
///
/// Every `Some` answers the matching question up front; `yes` accepts the
/// default for the rest.
#[derive(Debug, Clone, Default)]
pub struct CreateArgs {
    pub project_name: Option<String>,

    /// Target directory, defaults to `./<project-name>`
    pub directory: Option<PathBuf>,

    pub template: Option<String>,
    pub database: Option<String>,
    pub auth_provider: Option<String>,
    pub package_manager: Option<String>,

    /// Component groups; `None` asks
    pub groups: Option<Vec<String>>,

    /// Individual component ids
    pub components: Vec<String>,

    pub examples: Option<bool>,
    pub git: Option<bool>,
    pub install: Option<bool>,

    /// Auto-confirm all prompts (non-interactive mode)
    pub yes: bool,

    /// Generate into a non-empty directory without asking
    pub force: bool,

    /// Abort on the first generator unit failure
    pub fail_fast: bool,
}

/// Run the create flow with interactive prompts
pub async fn run<C: ProductConfig>(config: &C, args: CreateArgs) -> Result<LifecycleReport> {
    cliclack::intro(format!("{} v{}", config.display_name(), crate::GENERATOR_VERSION))?;

    let project_name = select_name(&args)?;
    let template = select_template(&args)?;
    let database = select_database(&args)?;
    let auth_provider = select_auth(&args)?;
    let package_manager = select_package_manager(&args)?;
    let groups = select_groups(&args)?;
    let examples = confirm_or(args.examples, args.yes, "Include example code?", true)?;
    let git = confirm_or(args.git, args.yes, "Initialize a git repository?", true)?;
    let install = confirm_or(args.install, args.yes, "Install dependencies?", true)?;

    let mut builder = ProjectOptions::builder(project_name)
        .template(template)
        .database(database)
        .auth_provider(auth_provider)
        .package_manager(package_manager)
        .component_groups(groups)
        .components(args.components.clone())
        .include_example_code(examples)
        .init_git(git)
        .skip_install(!install);
    if let Some(directory) = &args.directory {
        builder = builder.project_path(directory.clone());
    }
    let normalized = builder.build()?;
    for fallback in &normalized.fallbacks {
        cliclack::log::warning(fallback.to_string())?;
    }
    let opts = normalized.options;

    confirm_target(&opts.project_path, &args)?;

    if install {
        check_tools(opts.package_manager)?;
    }

    let settings = RunSettings::from_env().fail_fast(args.fail_fast);
    let report = if console::Term::stdout().is_term() {
        run_lifecycle(&opts, settings, SpinnerReporter::default()).await?
    } else {
        run_lifecycle(&opts, settings, ConsoleReporter).await?
    };

    print_summary(config, &opts, &report)?;
    Ok(report)
}

async fn run_lifecycle<P: ProgressReporter>(
    opts: &ProjectOptions,
    settings: RunSettings,
    reporter: P,
) -> Result<LifecycleReport> {
    let runner = LifecycleRunner::new(SystemRunner, reporter).with_settings(settings);
    Ok(runner.run(opts).await?)
}

fn select_name(args: &CreateArgs) -> Result<String> {
    if let Some(name) = &args.project_name {
        validate_project_name(name)?;
        cliclack::log::info(format!("Project name: {}", name))?;
        return Ok(name.clone());
    }
    if args.yes {
        return Ok(DEFAULT_PROJECT_NAME.to_string());
    }

    let name: String = cliclack::input("Project name")
        .placeholder(DEFAULT_PROJECT_NAME)
        .default_input(DEFAULT_PROJECT_NAME)
        .validate(|input: &String| validate_project_name(input).map_err(|e| e.to_string()))
        .interact()?;
    Ok(name)
}

/// A flag value wins; with `--yes` the default is taken without asking
fn preset<'a>(flag: &'a Option<String>, yes: bool, default: &'a str) -> Option<&'a str> {
    match flag {
        Some(value) => Some(value.as_str()),
        None if yes => Some(default),
        None => None,
    }
}

fn select_template(args: &CreateArgs) -> Result<String> {
    if let Some(value) = preset(&args.template, args.yes, Template::default().as_str()) {
        return Ok(value.to_string());
    }
    let mut select = cliclack::select("Select a template").initial_value(Template::default());
    for template in Template::ALL {
        select = select.item(template, template.display_name(), template.description());
    }
    let template: Template = select.interact()?;
    Ok(template.as_str().to_string())
}

fn select_database(args: &CreateArgs) -> Result<String> {
    if let Some(value) = preset(&args.database, args.yes, Database::default().as_str()) {
        return Ok(value.to_string());
    }
    let mut select = cliclack::select("Select a database").initial_value(Database::default());
    for database in Database::ALL {
        select = select.item(database, database.display_name(), "");
    }
    let database: Database = select.interact()?;
    Ok(database.as_str().to_string())
}

fn select_auth(args: &CreateArgs) -> Result<String> {
    if let Some(value) = preset(&args.auth_provider, args.yes, AuthProvider::default().as_str()) {
        return Ok(value.to_string());
    }
    let mut select =
        cliclack::select("Select an authentication provider").initial_value(AuthProvider::default());
    for provider in AuthProvider::ALL {
        let hint = if provider.is_oauth() { "OAuth" } else { "" };
        select = select.item(provider, provider.display_name(), hint);
    }
    let provider: AuthProvider = select.interact()?;
    Ok(provider.as_str().to_string())
}

fn select_package_manager(args: &CreateArgs) -> Result<String> {
    if let Some(value) = &args.package_manager {
        return Ok(value.clone());
    }
    let detected = detect_package_manager();
    if args.yes {
        return Ok(detected.as_str().to_string());
    }
    let mut select = cliclack::select("Select a package manager").initial_value(detected);
    for pm in PackageManager::ALL {
        let hint = if pm == detected { "detected" } else { "" };
        select = select.item(pm, pm.as_str(), hint);
    }
    let pm: PackageManager = select.interact()?;
    Ok(pm.as_str().to_string())
}

fn select_groups(args: &CreateArgs) -> Result<Vec<String>> {
    if let Some(groups) = &args.groups {
        return Ok(groups.clone());
    }
    if args.yes {
        return Ok(Vec::new());
    }
    let mut multi = cliclack::multiselect("Select UI component groups (optional)");
    for group in ComponentGroup::ALL {
        let ids: Vec<&str> = group.components().iter().map(|c| c.id()).collect();
        multi = multi.item(group, group.display_name(), ids.join(", "));
    }
    let selected: Vec<ComponentGroup> = multi.required(false).interact()?;
    Ok(selected.iter().map(|g| g.id().to_string()).collect())
}

fn confirm_or(flag: Option<bool>, yes: bool, prompt: &str, default: bool) -> Result<bool> {
    match flag {
        Some(value) => Ok(value),
        None if yes => Ok(default),
        None => Ok(cliclack::confirm(prompt).initial_value(default).interact()?),
    }
}

/// Ask before generating into a non-empty directory
///
/// `--force` answers yes. `--yes` does not: it only accepts defaults, and
/// overwriting is never a default.
pub fn confirm_target(path: &Path, args: &CreateArgs) -> Result<()> {
    let occupied = check_target_available(path, false).is_err();
    if !occupied {
        return Ok(());
    }
    if args.force {
        cliclack::log::warning(format!(
            "Generating into non-empty directory {}",
            path.display()
        ))?;
        return Ok(());
    }
    if !args.yes {
        cliclack::log::warning(format!("{} already exists and is not empty", path.display()))?;
        let overwrite: bool = cliclack::confirm("Generate into it anyway? Existing files may be overwritten")
            .initial_value(false)
            .interact()?;
        if overwrite {
            return Ok(());
        }
    }
    Err(ScaffoldError::TargetNotEmpty {
        path: path.to_path_buf(),
    }
    .into())
}

fn check_tools(package_manager: PackageManager) -> Result<()> {
    let spinner = cliclack::spinner();
    spinner.start("Checking tools...");

    match check_runtimes(package_manager) {
        Ok(tools) => {
            let info: Vec<String> = tools
                .iter()
                .map(|t| {
                    if t.available {
                        format!("{} ({})", t.name, t.version.as_deref().unwrap_or("unknown"))
                    } else {
                        format!("{} (not installed)", t.name)
                    }
                })
                .collect();
            spinner.stop(format!("Detected tools: {}", info.join(", ")));
        }
        Err(e) => {
            // Generation does not need Node.js; installing will fail and be reported
            spinner.error("Missing tools");
            cliclack::log::warning(e.to_string())?;
        }
    }
    Ok(())
}

fn print_summary<C: ProductConfig>(
    config: &C,
    opts: &ProjectOptions,
    report: &LifecycleReport,
) -> Result<()> {
    if let Some(generation) = &report.generation {
        cliclack::log::success(format!(
            "Created {} files in {}",
            generation.files_written,
            opts.project_path.display()
        ))?;
    }

    for record in report.failed_steps() {
        if let StepOutcome::Failed {
            message,
            remediation,
        } = &record.outcome
        {
            let mut text = format!("{}: {}", record.step.label(), message);
            if let Some(command) = remediation {
                text.push_str(&format!("\nRun manually: {}", command));
            }
            cliclack::log::error(text)?;
        }
    }

    let steps = config.next_steps(opts, report);

    println!();
    println!("  Next steps");
    println!();

    for (i, step) in steps.iter().enumerate() {
        println!("  {}.  {}", i + 1, step);
    }

    if report.is_clean() {
        cliclack::outro("Happy coding!")?;
    } else {
        cliclack::outro(format!(
            "Finished with problems. See {} for help.",
            config.docs_url()
        ))?;
    }

    Ok(())
}

/// One cliclack spinner per running step
#[derive(Default)]
pub struct SpinnerReporter {
    active: Mutex<Option<cliclack::ProgressBar>>,
}

impl SpinnerReporter {
    fn take(&self) -> Option<cliclack::ProgressBar> {
        self.active.lock().ok().and_then(|mut slot| slot.take())
    }
}

impl ProgressReporter for SpinnerReporter {
    fn begin(&self, step: Step) {
        let spinner = cliclack::spinner();
        spinner.start(format!("{}...", step.label()));
        if let Ok(mut slot) = self.active.lock() {
            *slot = Some(spinner);
        }
    }

    fn complete(&self, step: Step, detail: &str) {
        if let Some(spinner) = self.take() {
            if detail.is_empty() {
                spinner.stop(step.label());
            } else {
                spinner.stop(format!("{}: {}", step.label(), detail));
            }
        }
    }

    fn fail(&self, step: Step, message: &str) {
        let first = message.lines().next().unwrap_or(message);
        match self.take() {
            Some(spinner) => {
                spinner.error(format!("{}: {}", step.label(), first));
            }
            None => {
                let _ = cliclack::log::error(format!("{}: {}", step.label(), first));
            }
        }
    }

    fn skip(&self, step: Step, reason: &str) {
        if let Some(spinner) = self.take() {
            spinner.stop(format!("{} skipped", step.label()));
        }
        let _ = cliclack::log::remark(format!("{} skipped ({})", step.label(), reason));
    }

    fn note(&self, message: &str) {
        let _ = cliclack::log::remark(message);
    }
}
