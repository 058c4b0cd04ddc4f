//! Generator units
//!
//! A unit is a pure renderer: given the options it returns the files it owns.
//! Units never touch the filesystem themselves; the orchestrator writes their
//! output after the directory plan has been ensured. Variant-dependent
//! content is chosen through exhaustive matches on the option enums, so every
//! combination has defined output.

pub mod app;
pub mod auth;
pub mod env;
pub mod manifest;
pub mod prisma;
pub mod trpc;
pub mod ui;

use crate::options::{ProjectOptions, UiComponent};
use std::fmt;

/// One file to write, relative to the project root with `/` separators
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileWrite {
    pub path: String,
    pub contents: String,
}

impl FileWrite {
    pub fn new(path: impl Into<String>, contents: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            contents: contents.into(),
        }
    }

    /// Parent directory in the same relative form ("" for the root)
    pub fn parent_dir(&self) -> &str {
        self.path.rsplit_once('/').map(|(dir, _)| dir).unwrap_or("")
    }
}

/// Logical feature area a unit belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FeatureArea {
    Manifest,
    Tooling,
    Environment,
    Database,
    Auth,
    Trpc,
    App,
    Admin,
    Dashboard,
    Examples,
    Ui,
}

impl fmt::Display for FeatureArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FeatureArea::Manifest => "manifest",
            FeatureArea::Tooling => "tooling",
            FeatureArea::Environment => "environment",
            FeatureArea::Database => "database",
            FeatureArea::Auth => "auth",
            FeatureArea::Trpc => "trpc",
            FeatureArea::App => "app",
            FeatureArea::Admin => "admin",
            FeatureArea::Dashboard => "dashboard",
            FeatureArea::Examples => "examples",
            FeatureArea::Ui => "ui",
        };
        f.write_str(name)
    }
}

/// A cohesive file-producing unit
pub trait GeneratorUnit: Send + Sync {
    /// Stable name used to attribute failures
    fn name(&self) -> &'static str;

    fn area(&self) -> FeatureArea;

    /// Whether the unit runs for these options
    fn applies(&self, _opts: &ProjectOptions) -> bool {
        true
    }

    /// Render the unit's files
    fn render(&self, opts: &ProjectOptions) -> Vec<FileWrite>;
}

/// Unit backed by plain functions, used for every fixed unit
pub struct FnUnit {
    pub name: &'static str,
    pub area: FeatureArea,
    pub applies: fn(&ProjectOptions) -> bool,
    pub render: fn(&ProjectOptions) -> Vec<FileWrite>,
}

impl GeneratorUnit for FnUnit {
    fn name(&self) -> &'static str {
        self.name
    }

    fn area(&self) -> FeatureArea {
        self.area
    }

    fn applies(&self, opts: &ProjectOptions) -> bool {
        (self.applies)(opts)
    }

    fn render(&self, opts: &ProjectOptions) -> Vec<FileWrite> {
        (self.render)(opts)
    }
}

fn always(_: &ProjectOptions) -> bool {
    true
}

/// Every unit known to the generator, in a stable order
pub fn registry() -> Vec<Box<dyn GeneratorUnit>> {
    let fixed = [
        FnUnit {
            name: "package-manifest",
            area: FeatureArea::Manifest,
            applies: always,
            render: manifest::package_manifest,
        },
        FnUnit {
            name: "tooling-config",
            area: FeatureArea::Tooling,
            applies: always,
            render: manifest::tooling_config,
        },
        FnUnit {
            name: "project-docs",
            area: FeatureArea::Tooling,
            applies: always,
            render: manifest::project_docs,
        },
        FnUnit {
            name: "env-example",
            area: FeatureArea::Environment,
            applies: always,
            render: env::env_example,
        },
        FnUnit {
            name: "prisma-schema",
            area: FeatureArea::Database,
            applies: always,
            render: prisma::prisma_schema,
        },
        FnUnit {
            name: "database-client",
            area: FeatureArea::Database,
            applies: always,
            render: prisma::database_client,
        },
        FnUnit {
            name: "auth-config",
            area: FeatureArea::Auth,
            applies: always,
            render: auth::auth_config,
        },
        FnUnit {
            name: "auth-credentials",
            area: FeatureArea::Auth,
            applies: auth::uses_credentials,
            render: auth::credentials_flow,
        },
        FnUnit {
            name: "auth-pages",
            area: FeatureArea::Auth,
            applies: always,
            render: auth::auth_pages,
        },
        FnUnit {
            name: "oauth-buttons",
            area: FeatureArea::Auth,
            applies: always,
            render: auth::oauth_buttons,
        },
        FnUnit {
            name: "route-guard",
            area: FeatureArea::Auth,
            applies: auth::has_protected_routes,
            render: auth::route_guard,
        },
        FnUnit {
            name: "trpc-server",
            area: FeatureArea::Trpc,
            applies: always,
            render: trpc::trpc_server,
        },
        FnUnit {
            name: "trpc-client",
            area: FeatureArea::Trpc,
            applies: always,
            render: trpc::trpc_client,
        },
        FnUnit {
            name: "app-shell",
            area: FeatureArea::App,
            applies: always,
            render: app::app_shell,
        },
        FnUnit {
            name: "admin-panel",
            area: FeatureArea::Admin,
            applies: |opts| opts.template.has_admin(),
            render: app::admin_panel,
        },
        FnUnit {
            name: "dashboard",
            area: FeatureArea::Dashboard,
            applies: |opts| opts.template.has_dashboard(),
            render: app::dashboard,
        },
        FnUnit {
            name: "example-posts",
            area: FeatureArea::Examples,
            applies: |opts| opts.include_example_code,
            render: app::example_posts,
        },
        FnUnit {
            name: "ui-utils",
            area: FeatureArea::Ui,
            applies: always,
            render: ui::utils,
        },
    ];

    let mut units: Vec<Box<dyn GeneratorUnit>> = fixed
        .into_iter()
        .map(|unit| Box::new(unit) as Box<dyn GeneratorUnit>)
        .collect();
    units.extend(
        UiComponent::ALL
            .into_iter()
            .map(|component| Box::new(ui::ComponentUnit::new(component)) as Box<dyn GeneratorUnit>),
    );
    units
}

/// Units that apply to `opts`, in registry order
pub fn applicable(opts: &ProjectOptions) -> Vec<Box<dyn GeneratorUnit>> {
    registry()
        .into_iter()
        .filter(|unit| unit.applies(opts))
        .collect()
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::options::{AuthProvider, Database, PackageManager, ProjectOptions, Template};

    /// Options for a given combination, rooted at a fixed fake path
    pub fn options(
        template: Template,
        database: Database,
        auth: AuthProvider,
        examples: bool,
    ) -> ProjectOptions {
        ProjectOptions::builder("test-app")
            .base_dir("/tmp/corestack-tests")
            .template(template.as_str())
            .database(database.as_str())
            .auth_provider(auth.as_str())
            .package_manager(PackageManager::Npm.as_str())
            .include_example_code(examples)
            .build()
            .unwrap()
            .options
    }

    /// Every template/database/auth/example combination
    pub fn all_combinations() -> Vec<ProjectOptions> {
        let mut all = Vec::new();
        for template in Template::ALL {
            for database in Database::ALL {
                for auth in AuthProvider::ALL {
                    for examples in [true, false] {
                        all.push(options(template, database, auth, examples));
                    }
                }
            }
        }
        all
    }
}
