//! Project options: the single configuration value threaded through generation
//!
//! Options are built once by [`OptionsBuilder::build`], which is the only place
//! where raw user input is validated and unknown values are replaced by their
//! documented defaults. Every generator unit receives the resulting
//! [`ProjectOptions`] by reference and never re-interprets raw input.

pub mod components;
pub mod kinds;
pub mod name;

use crate::error::{Result, ScaffoldError};
use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};

pub use components::{ComponentGroup, UiComponent};
pub use kinds::{AuthProvider, Database, PackageManager, Template};
pub use name::validate_project_name;

/// Fully validated, immutable generation options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectOptions {
    pub project_name: String,
    /// Absolute target root
    pub project_path: PathBuf,
    pub template: Template,
    pub database: Database,
    pub auth_provider: AuthProvider,
    pub include_example_code: bool,
    pub package_manager: PackageManager,
    /// Resolved set: base components, selected groups, template requirements
    /// and individually requested components
    pub components: BTreeSet<UiComponent>,
    pub component_groups: BTreeSet<ComponentGroup>,
    pub init_git: bool,
    pub skip_install: bool,
}

impl ProjectOptions {
    /// Shorthand for a builder seeded with a project name
    pub fn builder(project_name: impl Into<String>) -> OptionsBuilder {
        OptionsBuilder::new(project_name)
    }

    pub fn has_component(&self, component: UiComponent) -> bool {
        self.components.contains(&component)
    }
}

/// A raw value that was replaced by its default during normalization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fallback {
    pub field: &'static str,
    pub given: String,
    pub used: String,
}

impl fmt::Display for Fallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.used.is_empty() {
            write!(f, "Ignoring unknown {} '{}'", self.field, self.given)
        } else {
            write!(
                f,
                "Unknown {} '{}', using '{}'",
                self.field, self.given, self.used
            )
        }
    }
}

/// Builder output: the options plus every default that was applied
#[derive(Debug, Clone)]
pub struct NormalizedOptions {
    pub options: ProjectOptions,
    pub fallbacks: Vec<Fallback>,
}

/// Collects raw option values and normalizes them in one pass
#[derive(Debug, Clone)]
pub struct OptionsBuilder {
    project_name: String,
    project_path: Option<PathBuf>,
    base_dir: Option<PathBuf>,
    template: Option<String>,
    database: Option<String>,
    auth_provider: Option<String>,
    package_manager: Option<String>,
    include_example_code: bool,
    components: Vec<String>,
    component_groups: Vec<String>,
    init_git: bool,
    skip_install: bool,
}

impl OptionsBuilder {
    pub fn new(project_name: impl Into<String>) -> Self {
        Self {
            project_name: project_name.into(),
            project_path: None,
            base_dir: None,
            template: None,
            database: None,
            auth_provider: None,
            package_manager: None,
            include_example_code: true,
            components: Vec::new(),
            component_groups: Vec::new(),
            init_git: true,
            skip_install: false,
        }
    }

    /// Explicit target directory (relative paths resolve against the base directory)
    pub fn project_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.project_path = Some(path.into());
        self
    }

    /// Directory that relative paths and the default `<name>` directory resolve against
    pub fn base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(dir.into());
        self
    }

    pub fn template(mut self, value: impl Into<String>) -> Self {
        self.template = Some(value.into());
        self
    }

    pub fn database(mut self, value: impl Into<String>) -> Self {
        self.database = Some(value.into());
        self
    }

    pub fn auth_provider(mut self, value: impl Into<String>) -> Self {
        self.auth_provider = Some(value.into());
        self
    }

    pub fn package_manager(mut self, value: impl Into<String>) -> Self {
        self.package_manager = Some(value.into());
        self
    }

    pub fn include_example_code(mut self, include: bool) -> Self {
        self.include_example_code = include;
        self
    }

    pub fn components<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.components.extend(ids.into_iter().map(Into::into));
        self
    }

    pub fn component_groups<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.component_groups
            .extend(ids.into_iter().map(Into::into));
        self
    }

    pub fn init_git(mut self, init: bool) -> Self {
        self.init_git = init;
        self
    }

    pub fn skip_install(mut self, skip: bool) -> Self {
        self.skip_install = skip;
        self
    }

    /// Validate the name, resolve the path and normalize every choice
    ///
    /// An invalid project name is the only error; unknown enum values fall
    /// back to their defaults and are reported in `fallbacks`.
    pub fn build(self) -> Result<NormalizedOptions> {
        validate_project_name(&self.project_name)?;

        let base_dir = match self.base_dir {
            Some(dir) => dir,
            None => std::env::current_dir()?,
        };
        let project_path = match self.project_path {
            Some(path) if path.is_absolute() => path,
            Some(path) => base_dir.join(path),
            None => base_dir.join(&self.project_name),
        };

        let mut fallbacks = Vec::new();
        let template = normalize(
            "template",
            self.template.as_deref(),
            Template::parse_or_default,
            &mut fallbacks,
        );
        let database = normalize(
            "database",
            self.database.as_deref(),
            Database::parse_or_default,
            &mut fallbacks,
        );
        let auth_provider = normalize(
            "auth provider",
            self.auth_provider.as_deref(),
            AuthProvider::parse_or_default,
            &mut fallbacks,
        );
        let package_manager = normalize(
            "package manager",
            self.package_manager.as_deref(),
            PackageManager::parse_or_default,
            &mut fallbacks,
        );

        let mut component_groups = BTreeSet::new();
        for raw in &self.component_groups {
            match raw.parse::<ComponentGroup>() {
                Ok(group) => {
                    component_groups.insert(group);
                }
                Err(_) => fallbacks.push(Fallback {
                    field: "component group",
                    given: raw.clone(),
                    used: String::new(),
                }),
            }
        }

        let mut components: BTreeSet<UiComponent> = UiComponent::BASE.into_iter().collect();
        for group in &component_groups {
            components.extend(group.components().iter().copied());
        }
        components.extend(required_components(template).iter().copied());
        for raw in &self.components {
            match raw.parse::<UiComponent>() {
                Ok(component) => {
                    components.insert(component);
                }
                Err(_) => fallbacks.push(Fallback {
                    field: "component",
                    given: raw.clone(),
                    used: String::new(),
                }),
            }
        }

        let options = ProjectOptions {
            project_name: self.project_name,
            project_path,
            template,
            database,
            auth_provider,
            include_example_code: self.include_example_code,
            package_manager,
            components,
            component_groups,
            init_git: self.init_git,
            skip_install: self.skip_install,
        };

        Ok(NormalizedOptions { options, fallbacks })
    }
}

/// Components the template's own pages import
pub fn required_components(template: Template) -> &'static [UiComponent] {
    if template.has_admin() {
        &[UiComponent::Table, UiComponent::Badge]
    } else {
        &[]
    }
}

fn normalize<T: fmt::Display + Default>(
    field: &'static str,
    raw: Option<&str>,
    parse: fn(&str) -> (T, bool),
    fallbacks: &mut Vec<Fallback>,
) -> T {
    let Some(raw) = raw else {
        return T::default();
    };
    let (value, fell_back) = parse(raw);
    if fell_back {
        fallbacks.push(Fallback {
            field,
            given: raw.to_string(),
            used: value.to_string(),
        });
    }
    value
}

/// Refuse to generate into a non-empty directory unless overwrite was confirmed
///
/// Runs before any filesystem write. A missing or empty directory is always
/// acceptable.
pub fn check_target_available(path: &Path, overwrite: bool) -> Result<()> {
    if overwrite || !path.exists() {
        return Ok(());
    }
    if !path.is_dir() {
        return Err(ScaffoldError::TargetNotEmpty {
            path: path.to_path_buf(),
        });
    }
    let occupied = std::fs::read_dir(path)?.next().is_some();
    if occupied {
        return Err(ScaffoldError::TargetNotEmpty {
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let normalized = ProjectOptions::builder("my-app")
            .base_dir("/tmp/work")
            .build()
            .unwrap();
        let opts = normalized.options;
        assert_eq!(opts.project_path, PathBuf::from("/tmp/work/my-app"));
        assert_eq!(opts.template, Template::FullSystem);
        assert_eq!(opts.database, Database::Sqlite);
        assert_eq!(opts.auth_provider, AuthProvider::Discord);
        assert_eq!(opts.package_manager, PackageManager::Npm);
        assert!(opts.include_example_code);
        assert!(normalized.fallbacks.is_empty());
    }

    #[test]
    fn test_invalid_name_rejected_before_path_use() {
        let result = ProjectOptions::builder("Bad Name")
            .project_path("/definitely/not/used")
            .build();
        assert!(matches!(
            result,
            Err(ScaffoldError::InvalidProjectName { .. })
        ));
    }

    #[test]
    fn test_unknown_values_fall_back_once() {
        let normalized = ProjectOptions::builder("my-app")
            .base_dir("/tmp")
            .template("enterprise")
            .database("oracle")
            .auth_provider("okta")
            .package_manager("cargo")
            .build()
            .unwrap();
        let opts = &normalized.options;
        assert_eq!(opts.template, Template::FullSystem);
        assert_eq!(opts.database, Database::Sqlite);
        assert_eq!(opts.auth_provider, AuthProvider::Discord);
        assert_eq!(opts.package_manager, PackageManager::Npm);
        assert_eq!(normalized.fallbacks.len(), 4);
        assert_eq!(normalized.fallbacks[3].used, "npm");
    }

    #[test]
    fn test_component_resolution() {
        let normalized = ProjectOptions::builder("my-app")
            .base_dir("/tmp")
            .template("barebones")
            .component_groups(["forms", "sparkles"])
            .components(["avatar", "carousel"])
            .build()
            .unwrap();
        let opts = &normalized.options;
        for base in UiComponent::BASE {
            assert!(opts.has_component(base));
        }
        assert!(opts.has_component(UiComponent::Textarea));
        assert!(opts.has_component(UiComponent::Avatar));
        assert!(!opts.has_component(UiComponent::Table));
        assert_eq!(normalized.fallbacks.len(), 2);
    }

    #[test]
    fn test_admin_template_pulls_required_components() {
        let opts = ProjectOptions::builder("my-app")
            .base_dir("/tmp")
            .template("admin")
            .build()
            .unwrap()
            .options;
        assert!(opts.has_component(UiComponent::Table));
        assert!(opts.has_component(UiComponent::Badge));
    }

    #[test]
    fn test_relative_path_resolves_against_base() {
        let opts = ProjectOptions::builder("my-app")
            .base_dir("/work")
            .project_path("apps/web")
            .build()
            .unwrap()
            .options;
        assert_eq!(opts.project_path, PathBuf::from("/work/apps/web"));
    }

    #[test]
    fn test_target_availability() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("fresh");
        assert!(check_target_available(&missing, false).is_ok());

        let empty = temp.path().join("empty");
        std::fs::create_dir(&empty).unwrap();
        assert!(check_target_available(&empty, false).is_ok());

        let occupied = temp.path().join("occupied");
        std::fs::create_dir(&occupied).unwrap();
        std::fs::write(occupied.join("README.md"), "hi").unwrap();
        assert!(matches!(
            check_target_available(&occupied, false),
            Err(ScaffoldError::TargetNotEmpty { .. })
        ));
        assert!(check_target_available(&occupied, true).is_ok());
    }
}
