//! Package manifest, tooling configuration and project docs

use super::FileWrite;
use crate::options::{AuthProvider, ProjectOptions};
use crate::verify::MARKER_FILE;
use serde_json::{json, Map, Value};

const DEPENDENCIES: &[(&str, &str)] = &[
    ("@auth/prisma-adapter", "^2.7.2"),
    ("@prisma/client", "^6.0.1"),
    ("@t3-oss/env-nextjs", "^0.11.1"),
    ("@tanstack/react-query", "^5.62.0"),
    ("@trpc/client", "^11.0.0-rc.648"),
    ("@trpc/react-query", "^11.0.0-rc.648"),
    ("@trpc/server", "^11.0.0-rc.648"),
    ("class-variance-authority", "^0.7.1"),
    ("clsx", "^2.1.1"),
    ("next", "^15.0.3"),
    ("next-auth", "5.0.0-beta.25"),
    ("react", "^19.0.0"),
    ("react-dom", "^19.0.0"),
    ("server-only", "^0.0.1"),
    ("superjson", "^2.2.2"),
    ("tailwind-merge", "^2.5.5"),
    ("zod", "^3.23.8"),
];

const DEV_DEPENDENCIES: &[(&str, &str)] = &[
    ("@types/node", "^22.10.1"),
    ("@types/react", "^19.0.1"),
    ("@types/react-dom", "^19.0.1"),
    ("@typescript-eslint/eslint-plugin", "^8.17.0"),
    ("@typescript-eslint/parser", "^8.17.0"),
    ("autoprefixer", "^10.4.20"),
    ("eslint", "^8.57.1"),
    ("eslint-config-next", "^15.0.3"),
    ("postcss", "^8.4.49"),
    ("prettier", "^3.4.2"),
    ("prettier-plugin-tailwindcss", "^0.6.9"),
    ("prisma", "^6.0.1"),
    ("tailwindcss", "^3.4.16"),
    ("typescript", "^5.7.2"),
];

fn sorted_map(entries: impl IntoIterator<Item = (&'static str, &'static str)>) -> Value {
    let mut entries: Vec<_> = entries.into_iter().collect();
    entries.sort_by_key(|(name, _)| *name);
    let map: Map<String, Value> = entries
        .into_iter()
        .map(|(name, version)| (name.to_string(), Value::String(version.to_string())))
        .collect();
    Value::Object(map)
}

fn pretty(value: &Value) -> String {
    // serializing a Value built from strings and objects cannot fail
    let mut out = serde_json::to_string_pretty(value).unwrap_or_default();
    out.push('\n');
    out
}

/// `package.json`
pub fn package_manifest(opts: &ProjectOptions) -> Vec<FileWrite> {
    let mut dependencies: Vec<(&str, &str)> = DEPENDENCIES.to_vec();
    let mut dev_dependencies: Vec<(&str, &str)> = DEV_DEPENDENCIES.to_vec();
    if opts.auth_provider == AuthProvider::Credentials {
        dependencies.push(("bcryptjs", "^2.4.3"));
        dev_dependencies.push(("@types/bcryptjs", "^2.4.6"));
    }

    let manifest = json!({
        "name": opts.project_name,
        "version": "0.1.0",
        "private": true,
        "type": "module",
        "scripts": {
            "dev": "next dev",
            "build": "next build",
            "start": "next start",
            "lint": "next lint",
            "typecheck": "tsc --noEmit",
            "format": "prettier --write .",
            "db:push": "prisma db push",
            "db:migrate": "prisma migrate dev",
            "db:generate": "prisma generate",
            "db:studio": "prisma studio"
        },
        "dependencies": sorted_map(dependencies),
        "devDependencies": sorted_map(dev_dependencies),
    });

    vec![FileWrite::new("package.json", pretty(&manifest))]
}

const NEXT_CONFIG: &str = r#"/**
 * Importing env.js validates environment variables at build time.
 */
import "./src/env.js";

/** @type {import("next").NextConfig} */
const config = {
  reactStrictMode: true,
};

export default config;
"#;

const POSTCSS_CONFIG: &str = r#"module.exports = {
  plugins: {
    tailwindcss: {},
    autoprefixer: {},
  },
};
"#;

const TAILWIND_CONFIG: &str = r#"import { type Config } from "tailwindcss";
import { fontFamily } from "tailwindcss/defaultTheme";

export default {
  content: ["./src/**/*.tsx"],
  theme: {
    extend: {
      fontFamily: {
        sans: ["var(--font-sans)", ...fontFamily.sans],
      },
      colors: {
        border: "hsl(var(--border))",
        background: "hsl(var(--background))",
        foreground: "hsl(var(--foreground))",
        primary: {
          DEFAULT: "hsl(var(--primary))",
          foreground: "hsl(var(--primary-foreground))",
        },
        muted: {
          DEFAULT: "hsl(var(--muted))",
          foreground: "hsl(var(--muted-foreground))",
        },
        destructive: {
          DEFAULT: "hsl(var(--destructive))",
          foreground: "hsl(var(--destructive-foreground))",
        },
      },
      borderRadius: {
        lg: "var(--radius)",
        md: "calc(var(--radius) - 2px)",
        sm: "calc(var(--radius) - 4px)",
      },
    },
  },
  plugins: [],
} satisfies Config;
"#;

const ESLINT_CONFIG: &str = r#"/** @type {import("eslint").Linter.Config} */
const config = {
  parser: "@typescript-eslint/parser",
  parserOptions: {
    project: true,
  },
  plugins: ["@typescript-eslint"],
  extends: [
    "next/core-web-vitals",
    "plugin:@typescript-eslint/recommended-type-checked",
    "plugin:@typescript-eslint/stylistic-type-checked",
  ],
  rules: {
    "@typescript-eslint/consistent-type-imports": [
      "warn",
      { prefer: "type-imports", fixStyle: "inline-type-imports" },
    ],
    "@typescript-eslint/no-unused-vars": ["warn", { argsIgnorePattern: "^_" }],
    "@typescript-eslint/require-await": "off",
  },
};

module.exports = config;
"#;

const PRETTIER_CONFIG: &str = r#"/** @type {import("prettier").Config & import("prettier-plugin-tailwindcss").PluginOptions} */
export default {
  plugins: ["prettier-plugin-tailwindcss"],
};
"#;

/// TypeScript, Next.js, Tailwind, ESLint and Prettier configuration
pub fn tooling_config(_opts: &ProjectOptions) -> Vec<FileWrite> {
    let tsconfig = json!({
        "compilerOptions": {
            "esModuleInterop": true,
            "skipLibCheck": true,
            "target": "es2022",
            "allowJs": true,
            "resolveJsonModule": true,
            "moduleDetection": "force",
            "isolatedModules": true,
            "strict": true,
            "noUncheckedIndexedAccess": true,
            "checkJs": true,
            "lib": ["dom", "dom.iterable", "ES2022"],
            "noEmit": true,
            "module": "ESNext",
            "moduleResolution": "Bundler",
            "jsx": "preserve",
            "plugins": [{ "name": "next" }],
            "incremental": true,
            "baseUrl": ".",
            "paths": { "~/*": ["./src/*"] }
        },
        "include": [
            ".eslintrc.cjs",
            "next-env.d.ts",
            "**/*.ts",
            "**/*.tsx",
            "**/*.cjs",
            "**/*.js",
            ".next/types/**/*.ts"
        ],
        "exclude": ["node_modules"]
    });

    vec![
        FileWrite::new("tsconfig.json", pretty(&tsconfig)),
        FileWrite::new("next.config.js", NEXT_CONFIG),
        FileWrite::new("postcss.config.cjs", POSTCSS_CONFIG),
        FileWrite::new("tailwind.config.ts", TAILWIND_CONFIG),
        FileWrite::new(".eslintrc.cjs", ESLINT_CONFIG),
        FileWrite::new("prettier.config.js", PRETTIER_CONFIG),
    ]
}

const GITIGNORE: &str = r#"# dependencies
/node_modules
/.pnp
.pnp.js

# testing
/coverage

# database
/prisma/db.sqlite
/prisma/db.sqlite-journal
db.sqlite

# next.js
/.next/
/out/
next-env.d.ts

# production
/build

# misc
.DS_Store
*.pem

# debug
npm-debug.log*
yarn-debug.log*
yarn-error.log*
.pnpm-debug.log*

# local env files
.env
.env*.local

# typescript
*.tsbuildinfo

# idea files
.idea
"#;

fn auth_setup_notes(provider: AuthProvider) -> &'static str {
    match provider {
        AuthProvider::Discord => {
            "Create an application at https://discord.com/developers/applications and copy its client ID and secret into `AUTH_DISCORD_ID` and `AUTH_DISCORD_SECRET`. Add `http://localhost:3000/api/auth/callback/discord` as a redirect URL."
        }
        AuthProvider::Github => {
            "Create an OAuth app at https://github.com/settings/developers and copy its client ID and secret into `AUTH_GITHUB_ID` and `AUTH_GITHUB_SECRET`. Use `http://localhost:3000/api/auth/callback/github` as the callback URL."
        }
        AuthProvider::Google => {
            "Create OAuth credentials at https://console.cloud.google.com/apis/credentials and copy them into `AUTH_GOOGLE_ID` and `AUTH_GOOGLE_SECRET`. Add `http://localhost:3000/api/auth/callback/google` as an authorized redirect URI."
        }
        AuthProvider::Credentials => {
            "Users register with an email and password at `/register`. Passwords are hashed with bcrypt before they are stored."
        }
        AuthProvider::None => {
            "No sign-in provider is configured. Add one to `src/server/auth/config.ts` when you need authentication."
        }
    }
}

/// `README.md` and `.gitignore`
pub fn project_docs(opts: &ProjectOptions) -> Vec<FileWrite> {
    let pm = opts.package_manager;
    let mut readme = String::new();
    readme.push_str(&format!("# {}\n\n", opts.project_name));
    readme.push_str(&format!(
        "A Next.js application with Prisma ({}), tRPC and NextAuth, generated from the `{}` template.\n\n",
        opts.database.display_name(),
        opts.template
    ));
    readme.push_str("## Getting started\n\n```bash\n");
    readme.push_str(&format!("{}\n", pm.install_command()));
    readme.push_str(&format!("{}\n", pm.run_script("db:push")));
    readme.push_str(&format!("{}\n", pm.run_script("dev")));
    readme.push_str("```\n\n");
    readme.push_str("Copy `.env.example` to `.env` and fill in the values before starting the server.\n\n");
    readme.push_str(&format!(
        "## Authentication ({})\n\n{}\n\n",
        opts.auth_provider.display_name(),
        auth_setup_notes(opts.auth_provider)
    ));
    readme.push_str("## Project layout\n\n");
    readme.push_str("- `src/app` - routes and pages (App Router)\n");
    readme.push_str("- `src/server/api` - tRPC routers and procedures\n");
    readme.push_str("- `src/server/auth` - NextAuth configuration\n");
    readme.push_str("- `src/components/ui` - UI components\n");
    readme.push_str("- `prisma/schema.prisma` - database schema\n");
    if opts.template.has_admin() {
        readme.push_str("- `src/app/admin` - admin panel (requires the `ADMIN` role)\n");
    }
    if opts.template.has_dashboard() {
        readme.push_str("- `src/app/dashboard` - signed-in user dashboard\n");
    }
    readme.push_str(&format!(
        "\nThe `{}` file records how this project was generated. It is ignored by git.\n",
        MARKER_FILE
    ));

    vec![
        FileWrite::new("README.md", readme),
        FileWrite::new(".gitignore", GITIGNORE),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::test_support::options;
    use crate::options::{Database, Template};

    #[test]
    fn test_package_manifest_is_valid_json() {
        let opts = options(Template::Barebones, Database::Sqlite, AuthProvider::Discord, false);
        let files = package_manifest(&opts);
        let parsed: Value = serde_json::from_str(&files[0].contents).unwrap();
        assert_eq!(parsed["name"], "test-app");
        assert!(parsed["dependencies"]["next-auth"].is_string());
        assert!(parsed["dependencies"].get("bcryptjs").is_none());
    }

    #[test]
    fn test_credentials_adds_bcrypt() {
        let opts = options(Template::Barebones, Database::Sqlite, AuthProvider::Credentials, false);
        let files = package_manifest(&opts);
        let parsed: Value = serde_json::from_str(&files[0].contents).unwrap();
        assert!(parsed["dependencies"]["bcryptjs"].is_string());
        assert!(parsed["devDependencies"]["@types/bcryptjs"].is_string());
    }

    #[test]
    fn test_dependencies_are_sorted() {
        let opts = options(Template::Barebones, Database::Sqlite, AuthProvider::Credentials, false);
        let files = package_manifest(&opts);
        let parsed: Value = serde_json::from_str(&files[0].contents).unwrap();
        let names: Vec<_> = parsed["dependencies"].as_object().unwrap().keys().cloned().collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }

    #[test]
    fn test_tsconfig_maps_tilde_alias() {
        let opts = options(Template::Barebones, Database::Sqlite, AuthProvider::None, false);
        let files = tooling_config(&opts);
        let tsconfig: Value = serde_json::from_str(&files[0].contents).unwrap();
        assert_eq!(tsconfig["compilerOptions"]["paths"]["~/*"][0], "./src/*");
    }

    #[test]
    fn test_readme_uses_package_manager() {
        let opts = ProjectOptions::builder("pnpm-app")
            .base_dir("/tmp")
            .package_manager("pnpm")
            .build()
            .unwrap()
            .options;
        let files = project_docs(&opts);
        assert!(files[0].contents.contains("pnpm install"));
        assert!(files[0].contents.contains("pnpm dev"));
        assert!(files[1].contents.contains(".env"));
    }
}
