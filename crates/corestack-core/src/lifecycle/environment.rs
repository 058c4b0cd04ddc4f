//! Local environment setup: `.env` and runtime directories

use crate::generators::env::render_dotenv;
use crate::options::ProjectOptions;
use rand::RngCore;
use std::path::Path;
use tokio::fs;

/// Directory created for admin uploads
const UPLOADS_DIR: &str = "public/uploads";

/// 32 random bytes, hex encoded
pub fn generate_secret() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Write `.env` unless present and create template directories
///
/// Returns a short summary of what changed.
pub(super) async fn setup_environment(opts: &ProjectOptions) -> std::io::Result<String> {
    let root = opts.project_path.as_path();
    let mut done = Vec::new();

    let dotenv = root.join(".env");
    if fs::try_exists(&dotenv).await? {
        done.push("kept existing .env".to_string());
    } else {
        let secret = generate_secret();
        fs::write(&dotenv, render_dotenv(opts, Some(&secret))).await?;
        done.push("wrote .env with a fresh AUTH_SECRET".to_string());
    }

    if opts.template.has_admin() {
        ensure_dir(root, UPLOADS_DIR).await?;
        done.push(format!("created {}", UPLOADS_DIR));
    }

    Ok(done.join(", "))
}

async fn ensure_dir(root: &Path, relative: &str) -> std::io::Result<()> {
    fs::create_dir_all(root.join(relative)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::test_support::options;
    use crate::options::{AuthProvider, Database, Template};
    use tempfile::TempDir;

    #[test]
    fn test_secret_shape() {
        let a = generate_secret();
        let b = generate_secret();
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn test_existing_env_is_kept() {
        let temp = TempDir::new().unwrap();
        let mut opts = options(Template::Admin, Database::Sqlite, AuthProvider::Github, false);
        opts.project_path = temp.path().to_path_buf();
        fs::write(temp.path().join(".env"), "KEEP=1\n").await.unwrap();

        let summary = setup_environment(&opts).await.unwrap();
        assert!(summary.contains("kept existing .env"));
        assert_eq!(fs::read_to_string(temp.path().join(".env")).await.unwrap(), "KEEP=1\n");
        assert!(temp.path().join(UPLOADS_DIR).is_dir());
    }

    #[tokio::test]
    async fn test_new_env_gets_secret() {
        let temp = TempDir::new().unwrap();
        let mut opts = options(Template::Barebones, Database::Sqlite, AuthProvider::Github, false);
        opts.project_path = temp.path().to_path_buf();

        setup_environment(&opts).await.unwrap();
        let dotenv = fs::read_to_string(temp.path().join(".env")).await.unwrap();
        assert!(!dotenv.contains("AUTH_SECRET=\"\""));
        assert!(dotenv.contains("AUTH_GITHUB_ID"));
        assert!(!temp.path().join(UPLOADS_DIR).exists());
    }
}
