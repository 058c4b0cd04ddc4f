//! Corestack Core - generator library for full-stack Next.js projects
//!
//! Produces a ready-to-run application (Next.js App Router, Prisma, tRPC,
//! NextAuth and a Tailwind component kit) from a single validated set of
//! options, then runs the post-generation lifecycle: environment setup, git,
//! dependency install and Prisma client generation.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Core Operations** - option normalization, directory planning,
//!   pure generator units that render file contents
//! - **Layer 2: Workflow Orchestration** - the [`Orchestrator`] writes every
//!   unit's files concurrently and the [`LifecycleRunner`] sequences the
//!   steps around it, reporting through an injected [`ProgressReporter`]
//! - **Layer 3: CLI/TUI Interface** - Optional cliclack-based prompts (feature-gated)
//!
//! Sub-generators for existing projects live in [`scaffolds`].
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based TUI prompts module
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use corestack_core::{LifecycleRunner, ProjectOptions, SilentReporter, SystemRunner};
//!
//! let opts = ProjectOptions::builder("my-app")
//!     .template("dashboard")
//!     .database("postgresql")
//!     .build()?
//!     .options;
//! corestack_core::check_target_available(&opts.project_path, false)?;
//!
//! let report = LifecycleRunner::new(SystemRunner, SilentReporter)
//!     .run(&opts)
//!     .await?;
//! ```

pub mod error;
pub mod generators;
pub mod lifecycle;
pub mod options;
pub mod orchestrator;
pub mod planner;
pub mod process;
pub mod product;
pub mod progress;
pub mod runtime;
pub mod scaffolds;
pub mod verify;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use error::{Result, ScaffoldError, UnitFailure};
pub use lifecycle::{LifecycleReport, LifecycleRunner, RunSettings, Step, StepOutcome, StepRecord};
pub use options::{
    check_target_available, AuthProvider, ComponentGroup, Database, OptionsBuilder,
    PackageManager, ProjectOptions, Template, UiComponent,
};
pub use orchestrator::{GenerationReport, Orchestrator};
pub use planner::DirectoryPlan;
pub use process::{CommandRunner, ScriptedFailure, ScriptedRunner, SystemRunner};
pub use product::{Corestack, ProductConfig};
pub use progress::{ConsoleReporter, ProgressReporter, RecordingReporter, SilentReporter};
pub use runtime::{check_runtimes, detect_package_manager, ToolInfo};
pub use scaffolds::{ProjectContext, ScaffoldOutcome, ScaffoldRequest};
pub use verify::{CompletionMarker, GENERATOR_VERSION, MARKER_FILE};

#[cfg(feature = "tui")]
pub use tui::run;
