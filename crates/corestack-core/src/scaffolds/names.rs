//! Name normalization for generated identifiers and paths

use crate::error::{Result, ScaffoldError};

/// Split `name` into lowercase words on separators and camelCase humps
fn words(name: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut prev_lower = false;

    for c in name.chars() {
        if !c.is_ascii_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev_lower = false;
            continue;
        }
        if c.is_ascii_uppercase() && prev_lower && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        prev_lower = c.is_ascii_lowercase() || c.is_ascii_digit();
        current.push(c.to_ascii_lowercase());
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

/// A validated scaffold name in the casings the generators need
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Name {
    words: Vec<String>,
}

impl Name {
    /// Accepts letters, digits, spaces, `-` and `_`, starting with a letter
    pub fn parse(raw: &str) -> Result<Self> {
        let invalid = |reason: &str| ScaffoldError::InvalidInput {
            field: "name",
            value: raw.to_string(),
            reason: reason.to_string(),
        };

        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(invalid("name cannot be empty"));
        }
        if !trimmed.chars().next().is_some_and(|c| c.is_ascii_alphabetic()) {
            return Err(invalid("name must start with a letter"));
        }
        if let Some(bad) = trimmed
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, ' ' | '-' | '_')))
        {
            return Err(invalid(&format!("unexpected character '{}'", bad)));
        }

        Ok(Self {
            words: words(trimmed),
        })
    }

    /// `blog-post`
    pub fn kebab(&self) -> String {
        self.words.join("-")
    }

    /// `BlogPost`
    pub fn pascal(&self) -> String {
        self.words.iter().map(|w| capitalize(w)).collect()
    }

    /// `blogPost`
    pub fn camel(&self) -> String {
        let pascal = self.pascal();
        let mut chars = pascal.chars();
        match chars.next() {
            Some(first) => first.to_ascii_lowercase().to_string() + chars.as_str(),
            None => String::new(),
        }
    }

    /// `Blog post`
    pub fn title(&self) -> String {
        capitalize(&self.words.join(" "))
    }
}

/// Validate and normalize a route like `/blog/[slug]/` to `blog/[slug]`
pub fn parse_route(raw: &str) -> Result<String> {
    let route = raw.trim().trim_matches('/');
    let valid_segment = |segment: &str| {
        !segment.is_empty()
            && segment != "."
            && segment != ".."
            && segment.chars().all(|c| {
                c.is_ascii_lowercase()
                    || c.is_ascii_digit()
                    || matches!(c, '-' | '_' | '[' | ']' | '(' | ')' | '.')
            })
    };

    if route.is_empty() || !route.split('/').all(valid_segment) {
        return Err(ScaffoldError::InvalidInput {
            field: "route",
            value: raw.to_string(),
            reason: "use lowercase path segments such as blog/[slug]".to_string(),
        });
    }
    Ok(route.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_casings() {
        for raw in ["blog post", "blog-post", "blog_post", "blogPost", "BlogPost"] {
            let name = Name::parse(raw).unwrap();
            assert_eq!(name.kebab(), "blog-post", "{}", raw);
            assert_eq!(name.pascal(), "BlogPost", "{}", raw);
            assert_eq!(name.camel(), "blogPost", "{}", raw);
        }
        assert_eq!(Name::parse("order item").unwrap().title(), "Order item");
    }

    #[test]
    fn test_rejects_bad_names() {
        assert!(Name::parse("").is_err());
        assert!(Name::parse("1st").is_err());
        assert!(Name::parse("../etc").is_err());
        assert!(Name::parse("a/b").is_err());
    }

    #[test]
    fn test_routes() {
        assert_eq!(parse_route("/blog/[slug]/").unwrap(), "blog/[slug]");
        assert_eq!(parse_route("(marketing)/about").unwrap(), "(marketing)/about");
        assert!(parse_route("../secret").is_err());
        assert!(parse_route("Blog").is_err());
        assert!(parse_route("/").is_err());
    }
}
