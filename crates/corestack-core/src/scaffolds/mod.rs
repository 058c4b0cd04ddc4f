//! Sub-generators for existing projects (`generate page|api|crud|module|component`)
//!
//! They run inside a project created by this tool, found through its
//! completion marker. Unlike the create run they are not planned up front:
//! each one creates the directories it writes into and never overwrites an
//! existing file.

pub mod compat;
mod component;
mod crud;
pub mod names;
mod page;
mod router;

pub use component::ComponentKind;
pub use crud::{Field, FieldType};
pub use names::Name;

use crate::error::{Result, ScaffoldError};
use crate::orchestrator::resolve_inside;
use crate::verify::{find_project_root, read_completion_marker, CompletionMarker, GENERATOR_VERSION};
use std::path::{Path, PathBuf};
use tokio::fs;

/// A located project and its marker
#[derive(Debug, Clone)]
pub struct ProjectContext {
    pub root: PathBuf,
    pub marker: CompletionMarker,
}

impl ProjectContext {
    /// Find the project containing `cwd`
    pub async fn locate(cwd: &Path) -> Result<Self> {
        let root = find_project_root(cwd).ok_or_else(|| ScaffoldError::NotAProject {
            path: cwd.to_path_buf(),
        })?;
        let marker = read_completion_marker(&root).await?;
        Ok(Self { root, marker })
    }

    /// Upgrade warning when the project is newer than this generator
    pub fn compatibility_warning(&self, upgrade_command: &str) -> Option<String> {
        compat::check_compatibility(GENERATOR_VERSION, &self.marker.version, upgrade_command)
    }
}

/// What a sub-generator should produce
#[derive(Debug, Clone)]
pub enum ScaffoldRequest {
    Page {
        name: String,
        route: Option<String>,
        protected: bool,
        admin: bool,
    },
    Api {
        name: String,
        protected: bool,
    },
    Crud {
        name: String,
        fields: String,
        protected: bool,
        admin: bool,
        page: bool,
        api: bool,
    },
    Module {
        name: String,
        protected: bool,
    },
    Component {
        name: String,
        kind: String,
    },
}

/// Files produced by a sub-generator and what the user should do next
#[derive(Debug, Clone, Default)]
pub struct ScaffoldOutcome {
    /// Relative paths written
    pub written: Vec<String>,
    /// Relative paths left alone because they already existed
    pub skipped: Vec<String>,
    /// Manual follow-ups, such as registering a router
    pub hints: Vec<String>,
}

impl ScaffoldOutcome {
    fn merge(&mut self, other: ScaffoldOutcome) {
        self.written.extend(other.written);
        self.skipped.extend(other.skipped);
        self.hints.extend(other.hints);
    }

    /// Write `contents` to `relative` unless the file exists
    async fn create(&mut self, root: &Path, relative: String, contents: String) -> Result<()> {
        let target = resolve_inside(root, &relative).map_err(|reason| ScaffoldError::InvalidInput {
            field: "path",
            value: relative.clone(),
            reason,
        })?;
        if fs::try_exists(&target).await? {
            tracing::debug!(path = %relative, "exists, not overwriting");
            self.skipped.push(relative);
            return Ok(());
        }
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(&target, contents).await?;
        self.written.push(relative);
        Ok(())
    }
}

/// Run one sub-generator inside the project at `ctx`
pub async fn run(ctx: &ProjectContext, request: &ScaffoldRequest) -> Result<ScaffoldOutcome> {
    match request {
        ScaffoldRequest::Page {
            name,
            route,
            protected,
            admin,
        } => {
            let name = Name::parse(name)?;
            let route = match route {
                Some(route) => names::parse_route(route)?,
                None => name.kebab(),
            };
            page::generate(ctx, &name, &route, *protected, *admin).await
        }
        ScaffoldRequest::Api { name, protected } => {
            router::generate(ctx, &Name::parse(name)?, *protected).await
        }
        ScaffoldRequest::Crud {
            name,
            fields,
            protected,
            admin,
            page,
            api,
        } => {
            let name = Name::parse(name)?;
            let fields = crud::parse_fields(fields)?;
            let options = crud::CrudOptions {
                protected: *protected,
                admin: *admin,
                page: *page,
                api: *api,
            };
            crud::generate(ctx, &name, &fields, &options).await
        }
        ScaffoldRequest::Module { name, protected } => {
            let name = Name::parse(name)?;
            let mut outcome = page::generate(ctx, &name, &name.kebab(), *protected, false).await?;
            outcome.merge(router::generate(ctx, &name, *protected).await?);
            outcome.merge(component::generate_module_folder(ctx, &name).await?);
            Ok(outcome)
        }
        ScaffoldRequest::Component { name, kind } => {
            let name = Name::parse(name)?;
            let kind: ComponentKind = kind.parse()?;
            component::generate(ctx, &name, kind).await
        }
    }
}

/// The two lines that register `router` in the root router
pub(crate) fn registration_hint(name: &Name) -> String {
    format!(
        "Register the router in src/server/api/root.ts:\n  import {{ {camel}Router }} from \"~/server/api/routers/{camel}\";\n  {camel}: {camel}Router,",
        camel = name.camel()
    )
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::generators::test_support::options;
    use crate::options::{AuthProvider, Database, Template};
    use crate::verify::write_completion_marker;
    use tempfile::TempDir;

    /// A temp project with a marker and a minimal schema
    pub async fn project(database: Database) -> (TempDir, ProjectContext) {
        let temp = TempDir::new().unwrap();
        let opts = options(Template::FullSystem, database, AuthProvider::Discord, false);
        write_completion_marker(temp.path(), &opts).await.unwrap();
        fs::create_dir_all(temp.path().join("prisma")).await.unwrap();
        fs::write(
            temp.path().join("prisma/schema.prisma"),
            "model User {\n  id String @id\n}\n",
        )
        .await
        .unwrap();
        let ctx = ProjectContext::locate(temp.path()).await.unwrap();
        (temp, ctx)
    }
}
