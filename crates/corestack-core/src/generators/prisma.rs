//! Prisma schema and database client

use super::FileWrite;
use crate::options::{AuthProvider, Database, ProjectOptions};

/// Long OAuth token columns need `@db.Text` on engines that support it
fn text_column(database: Database) -> &'static str {
    if database.supports_native_types() {
        " @db.Text"
    } else {
        ""
    }
}

/// SQLite has no native enums, so the role is stored as a string there
fn role_field(database: Database) -> &'static str {
    if database.supports_native_types() {
        "  role          Role      @default(USER)\n"
    } else {
        "  role          String    @default(\"USER\")\n"
    }
}

fn user_model(opts: &ProjectOptions) -> String {
    let mut out = String::from("model User {\n");
    out.push_str("  id            String    @id @default(cuid())\n");
    out.push_str("  name          String?\n");
    out.push_str("  email         String?   @unique\n");
    out.push_str("  emailVerified DateTime?\n");
    out.push_str("  image         String?\n");
    if opts.auth_provider == AuthProvider::Credentials {
        out.push_str("  password      String?\n");
    }
    out.push_str(role_field(opts.database));
    out.push_str("  createdAt     DateTime  @default(now())\n");
    out.push_str("  accounts      Account[]\n");
    out.push_str("  sessions      Session[]\n");
    if opts.include_example_code {
        out.push_str("  posts         Post[]\n");
    }
    out.push_str("}\n");
    out
}

fn account_model(database: Database) -> String {
    let text = text_column(database);
    let mut out = String::from("model Account {\n");
    out.push_str("  id                       String  @id @default(cuid())\n");
    out.push_str("  userId                   String\n");
    out.push_str("  type                     String\n");
    out.push_str("  provider                 String\n");
    out.push_str("  providerAccountId        String\n");
    out.push_str(&format!("  refresh_token            String?{}\n", text));
    out.push_str(&format!("  access_token             String?{}\n", text));
    out.push_str("  expires_at               Int?\n");
    out.push_str("  token_type               String?\n");
    out.push_str("  scope                    String?\n");
    out.push_str(&format!("  id_token                 String?{}\n", text));
    out.push_str("  session_state            String?\n");
    out.push_str("  refresh_token_expires_in Int?\n");
    out.push_str("  user                     User    @relation(fields: [userId], references: [id], onDelete: Cascade)\n\n");
    out.push_str("  @@unique([provider, providerAccountId])\n");
    out.push_str("}\n");
    out
}

const SESSION_MODELS: &str = r#"model Session {
  id           String   @id @default(cuid())
  sessionToken String   @unique
  userId       String
  expires      DateTime
  user         User     @relation(fields: [userId], references: [id], onDelete: Cascade)
}

model VerificationToken {
  identifier String
  token      String   @unique
  expires    DateTime

  @@unique([identifier, token])
}
"#;

const POST_MODEL: &str = r#"model Post {
  id          Int      @id @default(autoincrement())
  name        String
  createdAt   DateTime @default(now())
  updatedAt   DateTime @updatedAt
  createdBy   User     @relation(fields: [createdById], references: [id])
  createdById String

  @@index([name])
}
"#;

const ROLE_ENUM: &str = r#"enum Role {
  USER
  ADMIN
}
"#;

/// `prisma/schema.prisma`
pub fn prisma_schema(opts: &ProjectOptions) -> Vec<FileWrite> {
    let mut schema = String::new();
    schema.push_str("// Prisma schema, see https://pris.ly/d/prisma-schema\n\n");
    schema.push_str("generator client {\n  provider = \"prisma-client-js\"\n}\n\n");
    schema.push_str(&format!(
        "datasource db {{\n  provider = \"{}\"\n  url      = env(\"DATABASE_URL\")\n}}\n\n",
        opts.database.prisma_provider()
    ));

    if opts.include_example_code {
        schema.push_str(POST_MODEL);
        schema.push('\n');
    }

    schema.push_str("// Necessary for NextAuth\n");
    schema.push_str(&account_model(opts.database));
    schema.push('\n');
    schema.push_str(SESSION_MODELS);
    schema.push('\n');
    schema.push_str(&user_model(opts));

    if opts.database.supports_native_types() {
        schema.push('\n');
        schema.push_str(ROLE_ENUM);
    }

    vec![FileWrite::new("prisma/schema.prisma", schema)]
}

const DB_CLIENT: &str = r#"import { PrismaClient } from "@prisma/client";

import { env } from "~/env";

const createPrismaClient = () =>
  new PrismaClient({
    log:
      env.NODE_ENV === "development" ? ["query", "error", "warn"] : ["error"],
  });

const globalForPrisma = globalThis as unknown as {
  prisma: ReturnType<typeof createPrismaClient> | undefined;
};

export const db = globalForPrisma.prisma ?? createPrismaClient();

if (env.NODE_ENV !== "production") globalForPrisma.prisma = db;
"#;

/// `src/server/db.ts`
pub fn database_client(_opts: &ProjectOptions) -> Vec<FileWrite> {
    vec![FileWrite::new("src/server/db.ts", DB_CLIENT)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::test_support::options;
    use crate::options::Template;

    fn schema(opts: &ProjectOptions) -> String {
        prisma_schema(opts).remove(0).contents
    }

    #[test]
    fn test_sqlite_schema_has_no_native_types() {
        let opts = options(Template::FullSystem, Database::Sqlite, AuthProvider::Discord, true);
        let schema = schema(&opts);
        assert!(schema.contains("provider = \"sqlite\""));
        assert!(!schema.contains("@db.Text"));
        assert!(!schema.contains("enum Role"));
        assert!(schema.contains("role          String    @default(\"USER\")"));
    }

    #[test]
    fn test_postgres_schema_uses_native_types() {
        let opts = options(Template::Admin, Database::Postgresql, AuthProvider::Github, false);
        let schema = schema(&opts);
        assert!(schema.contains("provider = \"postgresql\""));
        assert!(schema.contains("String? @db.Text"));
        assert!(schema.contains("enum Role"));
        assert!(!schema.contains("model Post"));
    }

    #[test]
    fn test_credentials_adds_password_column() {
        let opts = options(Template::Barebones, Database::Mysql, AuthProvider::Credentials, false);
        assert!(schema(&opts).contains("password      String?"));
        let opts = options(Template::Barebones, Database::Mysql, AuthProvider::Google, false);
        assert!(!schema(&opts).contains("password"));
    }

    #[test]
    fn test_examples_add_post_relation() {
        let opts = options(Template::Barebones, Database::Sqlite, AuthProvider::None, true);
        let schema = schema(&opts);
        assert!(schema.contains("model Post"));
        assert!(schema.contains("posts         Post[]"));
    }
}
