//! Generator and project version compatibility

use semver::Version;

/// Warn when the project was created by a newer generator than this one
pub fn check_compatibility(
    generator_version: &str,
    project_version: &str,
    upgrade_command: &str,
) -> Option<String> {
    let generator = parse_version(generator_version)?;
    let project = parse_version(project_version)?;

    if generator < project {
        Some(format!(
            "Warning: This project was created with create-corestack {}.\n\
             You are running version {}; generated code may not match the project.\n\
             Consider updating: {}",
            project_version, generator_version, upgrade_command
        ))
    } else {
        None
    }
}

/// Parse a version, tolerating a leading `v`
fn parse_version(raw: &str) -> Option<Version> {
    let cleaned = raw.trim().strip_prefix('v').unwrap_or(raw.trim());
    Version::parse(cleaned).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generator_older_than_project() {
        let warning = check_compatibility("0.1.0", "0.2.0", "cargo install create-corestack --force");
        assert!(warning.unwrap().contains("0.2.0"));
    }

    #[test]
    fn test_same_or_newer_generator() {
        assert!(check_compatibility("0.1.0", "0.1.0", "x").is_none());
        assert!(check_compatibility("0.3.0", "v0.2.9", "x").is_none());
    }

    #[test]
    fn test_unparsable_versions_are_ignored() {
        assert!(check_compatibility("invalid", "0.1.0", "x").is_none());
        assert!(check_compatibility("0.1.0", "", "x").is_none());
    }
}
