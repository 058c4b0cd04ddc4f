//! Environment variables: `.env.example`, `src/env.js` and the local `.env`

use super::FileWrite;
use crate::options::{AuthProvider, ProjectOptions};

/// Client credentials each provider reads from the environment
pub fn provider_env_vars(provider: AuthProvider) -> &'static [&'static str] {
    match provider {
        AuthProvider::Discord => &["AUTH_DISCORD_ID", "AUTH_DISCORD_SECRET"],
        AuthProvider::Github => &["AUTH_GITHUB_ID", "AUTH_GITHUB_SECRET"],
        AuthProvider::Google => &["AUTH_GOOGLE_ID", "AUTH_GOOGLE_SECRET"],
        AuthProvider::Credentials | AuthProvider::None => &[],
    }
}

/// Render the dotenv body; `secret` fills `AUTH_SECRET` when given
pub fn render_dotenv(opts: &ProjectOptions, secret: Option<&str>) -> String {
    let mut out = String::new();
    out.push_str("# Since .env is gitignored, you can use .env.example to build a new `.env` file\n");
    out.push_str("# when you clone the repo. Keep this file up-to-date when you add new variables.\n\n");

    out.push_str("# Next Auth\n");
    out.push_str("# You can generate a new secret on the command line with:\n");
    out.push_str("# npx auth secret\n");
    out.push_str(&format!("AUTH_SECRET=\"{}\"\n", secret.unwrap_or("")));

    let vars = provider_env_vars(opts.auth_provider);
    if !vars.is_empty() {
        out.push_str(&format!(
            "\n# Next Auth {} Provider\n",
            opts.auth_provider.display_name()
        ));
        for var in vars {
            out.push_str(&format!("{}=\"\"\n", var));
        }
    }

    out.push_str(&format!(
        "\n# Prisma ({})\n",
        opts.database.display_name()
    ));
    out.push_str(&format!(
        "DATABASE_URL=\"{}\"\n",
        opts.database.connection_url(&opts.project_name)
    ));
    out
}

/// `.env.example` and the validated environment module
pub fn env_example(opts: &ProjectOptions) -> Vec<FileWrite> {
    vec![
        FileWrite::new(".env.example", render_dotenv(opts, None)),
        FileWrite::new("src/env.js", env_module(opts)),
    ]
}

fn env_module(opts: &ProjectOptions) -> String {
    let vars = provider_env_vars(opts.auth_provider);

    let mut server = String::new();
    server.push_str("    AUTH_SECRET:\n");
    server.push_str("      process.env.NODE_ENV === \"production\"\n");
    server.push_str("        ? z.string()\n");
    server.push_str("        : z.string().optional(),\n");
    for var in vars {
        server.push_str(&format!("    {}: z.string(),\n", var));
    }
    server.push_str("    DATABASE_URL: z.string().url(),\n");
    server.push_str("    NODE_ENV: z\n");
    server.push_str("      .enum([\"development\", \"test\", \"production\"])\n");
    server.push_str("      .default(\"development\"),\n");

    let mut runtime = String::new();
    runtime.push_str("    AUTH_SECRET: process.env.AUTH_SECRET,\n");
    for var in vars {
        runtime.push_str(&format!("    {}: process.env.{},\n", var, var));
    }
    runtime.push_str("    DATABASE_URL: process.env.DATABASE_URL,\n");
    runtime.push_str("    NODE_ENV: process.env.NODE_ENV,\n");

    let mut out = String::new();
    out.push_str("import { createEnv } from \"@t3-oss/env-nextjs\";\n");
    out.push_str("import { z } from \"zod\";\n\n");
    out.push_str("export const env = createEnv({\n");
    out.push_str("  /**\n   * Server-side environment variables, never exposed to the client.\n   */\n");
    out.push_str("  server: {\n");
    out.push_str(&server);
    out.push_str("  },\n\n");
    out.push_str("  /**\n   * Client-side variables must be prefixed with `NEXT_PUBLIC_`.\n   */\n");
    out.push_str("  client: {},\n\n");
    out.push_str("  runtimeEnv: {\n");
    out.push_str(&runtime);
    out.push_str("  },\n");
    out.push_str("  skipValidation: !!process.env.SKIP_ENV_VALIDATION,\n");
    out.push_str("  emptyStringAsUndefined: true,\n");
    out.push_str("});\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::test_support::options;
    use crate::options::{Database, Template};

    #[test]
    fn test_provider_vars_in_example() {
        let opts = options(Template::Barebones, Database::Postgresql, AuthProvider::Github, false);
        let files = env_example(&opts);
        let example = &files[0].contents;
        assert!(example.contains("AUTH_GITHUB_ID=\"\""));
        assert!(example.contains("DATABASE_URL=\"postgresql://"));
        assert!(files[1].contents.contains("AUTH_GITHUB_SECRET: z.string()"));
    }

    #[test]
    fn test_credentials_needs_no_client_ids() {
        let opts = options(Template::Barebones, Database::Sqlite, AuthProvider::Credentials, false);
        let example = render_dotenv(&opts, None);
        assert!(!example.contains("_ID="));
        assert!(example.contains("AUTH_SECRET=\"\""));
    }

    #[test]
    fn test_secret_is_filled_in() {
        let opts = options(Template::Barebones, Database::Sqlite, AuthProvider::None, false);
        let dotenv = render_dotenv(&opts, Some("s3cret"));
        assert!(dotenv.contains("AUTH_SECRET=\"s3cret\""));
    }
}
