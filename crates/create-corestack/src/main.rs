//! create-corestack - Project generation for full-stack Next.js applications

use anyhow::{Context, Result};
use clap::{Args as ClapArgs, Parser, Subcommand};
use colored::Colorize;
use corestack_core::scaffolds::{self, ProjectContext, ScaffoldRequest};
use corestack_core::tui::CreateArgs;
use corestack_core::{Corestack, ProductConfig};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "create-corestack")]
#[command(about = "Create full-stack Next.js applications with Prisma, tRPC and NextAuth")]
#[command(version)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Create options when no subcommand is given
    #[command(flatten)]
    pub create: CliCreateArgs,

    /// Print diagnostic logs (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new project (default)
    Create(CliCreateArgs),
    /// Add code to an existing project
    #[command(visible_alias = "g")]
    Generate(GenerateArgs),
}

#[derive(ClapArgs, Debug, Default)]
pub struct CliCreateArgs {
    /// Project name (lowercase letters, digits, '-', '_', '.')
    pub project_name: Option<String>,

    /// Auto-confirm all prompts with their defaults (non-interactive mode)
    #[arg(short, long)]
    pub yes: bool,

    /// Template: full-system, admin, dashboard, barebones
    #[arg(short, long)]
    pub template: Option<String>,

    /// Database: sqlite, postgresql, mysql
    #[arg(long = "db")]
    pub database: Option<String>,

    /// Auth provider: discord, github, google, credentials, none
    #[arg(long = "auth")]
    pub auth: Option<String>,

    /// Package manager: npm, pnpm, yarn, bun
    #[arg(long = "pm")]
    pub package_manager: Option<String>,

    /// Leave out the example posts feature
    #[arg(long = "no-examples")]
    pub no_examples: bool,

    /// Do not install dependencies or generate the Prisma client
    #[arg(long = "no-install")]
    pub no_install: bool,

    /// Do not initialize a git repository
    #[arg(long = "no-git")]
    pub no_git: bool,

    /// Additional UI components (comma-separated ids)
    #[arg(long, value_delimiter = ',')]
    pub components: Vec<String>,

    /// UI component groups (comma-separated: forms,layout,feedback,overlay,data-display)
    #[arg(long, value_delimiter = ',')]
    pub groups: Option<Vec<String>>,

    /// Project directory to create (defaults to ./<project-name>)
    #[arg(short, long)]
    pub directory: Option<PathBuf>,

    /// Generate into a non-empty directory without asking
    #[arg(long)]
    pub force: bool,

    /// Stop at the first file that cannot be generated
    #[arg(long = "fail-fast")]
    pub fail_fast: bool,
}

/// `--no-x` flags only ever answer "no"; otherwise the prompt decides
fn negated(flag: bool) -> Option<bool> {
    flag.then_some(false)
}

impl From<CliCreateArgs> for CreateArgs {
    fn from(args: CliCreateArgs) -> Self {
        CreateArgs {
            project_name: args.project_name,
            directory: args.directory,
            template: args.template,
            database: args.database,
            auth_provider: args.auth,
            package_manager: args.package_manager,
            groups: args.groups,
            components: args.components,
            examples: negated(args.no_examples),
            git: negated(args.no_git),
            install: negated(args.no_install),
            yes: args.yes,
            force: args.force,
            fail_fast: args.fail_fast,
        }
    }
}

#[derive(ClapArgs, Debug)]
pub struct GenerateArgs {
    #[command(subcommand)]
    pub kind: GenerateKind,

    /// Run as if started in this directory
    #[arg(short = 'C', long = "cwd", global = true)]
    pub cwd: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum GenerateKind {
    /// A page under src/app
    Page {
        name: String,
        /// Route path, defaults to the kebab-cased name
        #[arg(short, long)]
        route: Option<String>,
        /// Redirect signed-out visitors to /login
        #[arg(short, long)]
        protected: bool,
        /// Place the page under src/app/admin
        #[arg(short, long)]
        admin: bool,
    },
    /// A tRPC router
    Api {
        name: String,
        /// Use protectedProcedure
        #[arg(short, long)]
        protected: bool,
    },
    /// Prisma model, router and list page
    Crud {
        name: String,
        /// Model fields, e.g. title:string,views:int
        #[arg(short, long, default_value = "")]
        fields: String,
        #[arg(short, long)]
        protected: bool,
        #[arg(short, long)]
        admin: bool,
        /// Skip the list page
        #[arg(long = "no-page")]
        no_page: bool,
        /// Skip the router
        #[arg(long = "no-api")]
        no_api: bool,
    },
    /// Page, router and component folder
    Module {
        name: String,
        #[arg(short, long)]
        protected: bool,
    },
    /// A standalone component
    Component {
        name: String,
        /// ui, feature or layout
        #[arg(short = 't', long = "type", default_value = "feature")]
        kind: String,
    },
}

impl From<GenerateKind> for ScaffoldRequest {
    fn from(kind: GenerateKind) -> Self {
        match kind {
            GenerateKind::Page {
                name,
                route,
                protected,
                admin,
            } => ScaffoldRequest::Page {
                name,
                route,
                protected,
                admin,
            },
            GenerateKind::Api { name, protected } => ScaffoldRequest::Api { name, protected },
            GenerateKind::Crud {
                name,
                fields,
                protected,
                admin,
                no_page,
                no_api,
            } => ScaffoldRequest::Crud {
                name,
                fields,
                protected,
                admin,
                page: !no_page,
                api: !no_api,
            },
            GenerateKind::Module { name, protected } => ScaffoldRequest::Module { name, protected },
            GenerateKind::Component { name, kind } => ScaffoldRequest::Component { name, kind },
        }
    }
}

const VERBOSE_DIRECTIVES: &str = "corestack_core=debug,create_corestack=debug";

/// `RUST_LOG` wins over `--verbose`, which wins over the `warn` default
fn filter_directives(rust_log: Option<String>, verbose: bool) -> String {
    match rust_log {
        Some(directives) if !directives.trim().is_empty() => directives,
        _ if verbose => VERBOSE_DIRECTIVES.to_string(),
        _ => "warn".to_string(),
    }
}

fn init_tracing(verbose: bool) {
    let directives = filter_directives(std::env::var(EnvFilter::DEFAULT_ENV).ok(), verbose);
    let filter = EnvFilter::try_new(&directives).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn generate<C: ProductConfig>(config: &C, args: GenerateArgs) -> Result<()> {
    let cwd = match args.cwd {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to read the current directory")?,
    };
    let ctx = ProjectContext::locate(&cwd).await?;
    tracing::debug!(root = %ctx.root.display(), "found project");

    if let Some(warning) = ctx.compatibility_warning(config.upgrade_command()) {
        eprintln!("{}", warning.yellow());
    }

    let outcome = scaffolds::run(&ctx, &args.kind.into()).await?;

    for path in &outcome.written {
        println!("  {} {}", "created".green(), path);
    }
    for path in &outcome.skipped {
        println!("  {} {} (already exists)", "skipped".dimmed(), path);
    }
    for hint in &outcome.hints {
        println!();
        println!("{}", hint.cyan());
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();
    init_tracing(args.verbose);
    let config = Corestack;

    match args.command {
        Some(Command::Generate(generate_args)) => generate(&config, generate_args).await,
        Some(Command::Create(create_args)) => create(&config, create_args).await,
        None => create(&config, args.create).await,
    }
}

async fn create<C: ProductConfig>(config: &C, args: CliCreateArgs) -> Result<()> {
    let result = corestack_core::run(config, args.into()).await;

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    result.map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_invocation_is_create() {
        let args = Args::parse_from(["create-corestack", "my-app", "--yes", "--db", "postgresql"]);
        assert!(args.command.is_none());
        assert_eq!(args.create.project_name.as_deref(), Some("my-app"));
        assert_eq!(args.create.database.as_deref(), Some("postgresql"));
    }

    #[test]
    fn test_negated_flags() {
        let args = Args::parse_from(["create-corestack", "create", "app", "--no-install", "--groups", "forms,overlay"]);
        let Some(Command::Create(create)) = args.command else {
            panic!("expected create");
        };
        let converted: CreateArgs = create.into();
        assert_eq!(converted.install, Some(false));
        assert_eq!(converted.git, None);
        assert_eq!(converted.groups, Some(vec!["forms".to_string(), "overlay".to_string()]));
    }

    #[test]
    fn test_generate_alias_and_cwd() {
        let args = Args::parse_from([
            "create-corestack", "g", "crud", "product", "-f", "name:string", "--no-page", "-C", "/tmp/app",
        ]);
        let Some(Command::Generate(generate)) = args.command else {
            panic!("expected generate");
        };
        assert_eq!(generate.cwd, Some(PathBuf::from("/tmp/app")));
        match ScaffoldRequest::from(generate.kind) {
            ScaffoldRequest::Crud { page, api, fields, .. } => {
                assert!(!page);
                assert!(api);
                assert_eq!(fields, "name:string");
            }
            other => panic!("unexpected request {:?}", other),
        }
    }

    #[test]
    fn test_rust_log_overrides_verbose() {
        let from_env = Some("corestack_core=trace".to_string());
        assert_eq!(filter_directives(from_env.clone(), true), "corestack_core=trace");
        assert_eq!(filter_directives(from_env, false), "corestack_core=trace");
        assert_eq!(filter_directives(None, true), VERBOSE_DIRECTIVES);
        assert_eq!(filter_directives(Some(" ".to_string()), true), VERBOSE_DIRECTIVES);
        assert_eq!(filter_directives(None, false), "warn");
    }
}
