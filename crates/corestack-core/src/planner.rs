//! Directory planning
//!
//! Generator units never create directories. Every directory a unit writes
//! into is listed here and created before the first file is written.

use crate::options::{ProjectOptions, Template};
use std::io;
use std::path::Path;
use tokio::fs;

/// Directories every project gets, parents before children
pub const BASE_DIRECTORIES: &[&str] = &[
    "prisma",
    "public",
    "src",
    "src/app",
    "src/app/(auth)",
    "src/app/(auth)/login",
    "src/app/(auth)/register",
    "src/app/api",
    "src/app/api/auth",
    "src/app/api/auth/[...nextauth]",
    "src/app/api/trpc",
    "src/app/api/trpc/[trpc]",
    "src/components",
    "src/components/auth",
    "src/components/ui",
    "src/lib",
    "src/server",
    "src/server/api",
    "src/server/api/routers",
    "src/server/auth",
    "src/styles",
    "src/trpc",
];

const ADMIN_DIRECTORIES: &[&str] = &[
    "src/app/admin",
    "src/app/admin/users",
    "src/app/admin/settings",
    "src/components/admin",
];

const DASHBOARD_DIRECTORIES: &[&str] = &[
    "src/app/dashboard",
    "src/app/dashboard/settings",
    "src/components/dashboard",
];

const EXAMPLE_DIRECTORIES: &[&str] = &["src/app/posts", "src/components/posts"];

/// Ordered, de-duplicated set of relative directories to ensure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryPlan {
    directories: Vec<&'static str>,
}

impl DirectoryPlan {
    /// Plan for a template, with or without the example addendum
    pub fn new(template: Template, include_example_code: bool) -> Self {
        let mut directories: Vec<&'static str> = BASE_DIRECTORIES.to_vec();
        if template.has_admin() {
            directories.extend_from_slice(ADMIN_DIRECTORIES);
        }
        if template.has_dashboard() {
            directories.extend_from_slice(DASHBOARD_DIRECTORIES);
        }
        if include_example_code {
            directories.extend_from_slice(EXAMPLE_DIRECTORIES);
        }

        let mut seen = std::collections::HashSet::new();
        directories.retain(|dir| seen.insert(*dir));

        Self { directories }
    }

    pub fn for_options(opts: &ProjectOptions) -> Self {
        Self::new(opts.template, opts.include_example_code)
    }

    pub fn directories(&self) -> &[&'static str] {
        &self.directories
    }

    /// Whether `dir` (relative, `/`-separated) is planned; the root always is
    pub fn contains(&self, dir: &str) -> bool {
        dir.is_empty() || self.directories.contains(&dir)
    }

    /// Create every planned directory under `root`
    ///
    /// Idempotent: directories that already exist are left alone. Returns the
    /// number of planned directories.
    pub async fn ensure(&self, root: &Path) -> io::Result<usize> {
        for dir in &self.directories {
            fs::create_dir_all(root.join(dir)).await?;
        }
        tracing::debug!(count = self.directories.len(), root = %root.display(), "directories ensured");
        Ok(self.directories.len())
    }
}
