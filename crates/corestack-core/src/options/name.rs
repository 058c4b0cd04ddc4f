//! Package-name validation for project names

use crate::error::{Result, ScaffoldError};

/// npm rejects names longer than this
const MAX_NAME_LENGTH: usize = 214;

const RESERVED_NAMES: &[&str] = &["node_modules", "favicon.ico"];

/// Validate a project name against npm package-name rules
///
/// The name becomes both the directory name and the `name` field of the
/// generated `package.json`, so it must be lowercase, URL-safe, and must not
/// start with `.` or `_`.
pub fn validate_project_name(name: &str) -> Result<()> {
    let reject = |reason: &str| {
        Err(ScaffoldError::InvalidProjectName {
            name: name.to_string(),
            reason: reason.to_string(),
        })
    };

    if name.is_empty() {
        return reject("name cannot be empty");
    }
    if name.trim() != name {
        return reject("name cannot contain leading or trailing spaces");
    }
    if name.len() > MAX_NAME_LENGTH {
        return reject("name cannot be longer than 214 characters");
    }
    if name.starts_with('.') || name.starts_with('_') {
        return reject("name cannot start with a period or an underscore");
    }
    if name.chars().any(|c| c.is_ascii_uppercase()) {
        return reject("name must be lowercase");
    }
    if let Some(bad) = name.chars().find(|c| !is_url_safe(*c)) {
        return reject(&format!("character '{}' is not URL-safe", bad));
    }
    if RESERVED_NAMES.contains(&name) {
        return reject("name is reserved");
    }

    Ok(())
}

fn is_url_safe(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '-' | '.' | '_' | '~')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_project_names() {
        for name in ["my-app", "app", "a1", "my.app", "my_app", "x~y", "123app"] {
            assert!(validate_project_name(name).is_ok(), "should accept {}", name);
        }
    }

    #[test]
    fn test_invalid_project_names() {
        for name in [
            "",
            " my-app",
            "MyApp",
            ".hidden",
            "_private",
            "my app",
            "my/app",
            "my@app",
            "node_modules",
            "caf\u{e9}",
        ] {
            assert!(validate_project_name(name).is_err(), "should reject {:?}", name);
        }
    }

    #[test]
    fn test_length_limit() {
        let long = "a".repeat(215);
        assert!(validate_project_name(&long).is_err());
        let max = "a".repeat(214);
        assert!(validate_project_name(&max).is_ok());
    }

    #[test]
    fn test_reason_is_reported() {
        let err = validate_project_name("Bad").unwrap_err();
        assert!(err.to_string().contains("lowercase"));
    }
}
