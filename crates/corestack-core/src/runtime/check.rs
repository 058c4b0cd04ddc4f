//! Tool detection for Node.js and the package managers

use crate::options::PackageManager;
use anyhow::Result;
use std::process::Command;

/// Detection result for one command-line tool
#[derive(Debug, Clone)]
pub struct ToolInfo {
    pub name: &'static str,
    pub version: Option<String>,
    pub available: bool,
}

/// Run `<program> --version` and report what came back
pub fn check_tool(program: &'static str) -> ToolInfo {
    let output = Command::new(program).arg("--version").output();

    match output {
        Ok(out) if out.status.success() => {
            let version = String::from_utf8_lossy(&out.stdout).trim().to_string();
            ToolInfo {
                name: program,
                version: Some(version),
                available: true,
            }
        }
        _ => ToolInfo {
            name: program,
            version: None,
            available: false,
        },
    }
}

/// Package managers in order of preference for the prompt default
const PREFERENCE: [PackageManager; 4] = [
    PackageManager::Bun,
    PackageManager::Pnpm,
    PackageManager::Yarn,
    PackageManager::Npm,
];

/// First package manager that `available` accepts, npm when none do
pub fn pick_package_manager(available: impl Fn(&'static str) -> bool) -> PackageManager {
    PREFERENCE
        .into_iter()
        .find(|pm| available(pm.as_str()))
        .unwrap_or_default()
}

/// Suggest a package manager based on what is installed
pub fn detect_package_manager() -> PackageManager {
    pick_package_manager(|program| check_tool(program).available)
}

/// Node.js is required to run the generated project
///
/// Missing Node.js is an error; the package manager is only reported.
pub fn check_runtimes(package_manager: PackageManager) -> Result<Vec<ToolInfo>> {
    let node = check_tool("node");
    if !node.available {
        anyhow::bail!(
            "Missing required runtimes:\n  - Node.js (install from https://nodejs.org)"
        );
    }

    let mut results = vec![node];
    if package_manager != PackageManager::Npm {
        results.push(check_tool(package_manager.as_str()));
    }
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_tool_is_unavailable() {
        let info = check_tool("corestack-definitely-missing-binary");
        assert!(!info.available);
        assert!(info.version.is_none());
    }

    #[test]
    fn test_preference_order() {
        assert_eq!(pick_package_manager(|_| true), PackageManager::Bun);
        assert_eq!(pick_package_manager(|p| p == "yarn" || p == "npm"), PackageManager::Yarn);
        assert_eq!(pick_package_manager(|_| false), PackageManager::Npm);
    }
}
