//! Product configuration for the CLI binary
//!
//! The binary and the prompt flow take their names, links and closing
//! instructions from a [`ProductConfig`] instead of hard-coding them.

use crate::generators::env::provider_env_vars;
use crate::lifecycle::{LifecycleReport, Step, StepOutcome};
use crate::options::ProjectOptions;

/// Identity and messaging of a scaffolding CLI
pub trait ProductConfig: Clone + Send + Sync + 'static {
    /// Internal product name (used for the command and the banner)
    fn name(&self) -> &'static str;

    /// Human-readable display name
    fn display_name(&self) -> &'static str;

    /// URL for product documentation
    fn docs_url(&self) -> &'static str;

    /// CLI description shown in help text
    fn cli_description(&self) -> &'static str;

    /// Upgrade/install command shown in version warnings
    fn upgrade_command(&self) -> &'static str;

    /// Instructions printed after a create run
    fn next_steps(&self, opts: &ProjectOptions, report: &LifecycleReport) -> Vec<String>;
}

/// The corestack generator
#[derive(Debug, Clone, Copy, Default)]
pub struct Corestack;

impl ProductConfig for Corestack {
    fn name(&self) -> &'static str {
        "create-corestack"
    }

    fn display_name(&self) -> &'static str {
        "Corestack"
    }

    fn docs_url(&self) -> &'static str {
        "https://corestack.dev/docs"
    }

    fn cli_description(&self) -> &'static str {
        "Create full-stack Next.js applications with Prisma, tRPC and NextAuth"
    }

    fn upgrade_command(&self) -> &'static str {
        "cargo install create-corestack --force"
    }

    fn next_steps(&self, opts: &ProjectOptions, report: &LifecycleReport) -> Vec<String> {
        let pm = opts.package_manager;
        let mut steps = vec![format!("cd {}", opts.project_path.display())];

        let installed = matches!(
            report.outcome(Step::InstallDependencies),
            Some(StepOutcome::Done(_))
        );
        if !installed {
            steps.push(pm.install_command().to_string());
        }

        let vars = provider_env_vars(opts.auth_provider);
        if !vars.is_empty() {
            steps.push(format!("Fill in {} in .env", vars.join(" and ")));
        }

        steps.push(pm.run_script("db:push"));
        steps.push(pm.run_script("dev"));
        steps
    }
}
