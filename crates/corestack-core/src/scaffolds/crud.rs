//! CRUD resource: Prisma model, router and list page

use super::page::page_dir;
use super::router::{procedure_kind, router_path};
use super::{registration_hint, Name, ProjectContext, ScaffoldOutcome};
use crate::error::{Result, ScaffoldError};
use crate::options::Database;
use std::fmt;
use std::str::FromStr;
use tokio::fs;

const SCHEMA_PATH: &str = "prisma/schema.prisma";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    String,
    Text,
    Int,
    Float,
    Boolean,
    DateTime,
}

impl FieldType {
    fn prisma_type(&self, database: Database) -> &'static str {
        match self {
            FieldType::String => "String",
            FieldType::Text if database.supports_native_types() => "String @db.Text",
            FieldType::Text => "String",
            FieldType::Int => "Int",
            FieldType::Float => "Float",
            FieldType::Boolean => "Boolean",
            FieldType::DateTime => "DateTime",
        }
    }

    fn zod(&self) -> &'static str {
        match self {
            FieldType::String => "z.string().min(1)",
            FieldType::Text => "z.string()",
            FieldType::Int => "z.number().int()",
            FieldType::Float => "z.number()",
            FieldType::Boolean => "z.boolean()",
            FieldType::DateTime => "z.coerce.date()",
        }
    }
}

impl FromStr for FieldType {
    type Err = ScaffoldError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "string" => Ok(FieldType::String),
            "text" => Ok(FieldType::Text),
            "int" => Ok(FieldType::Int),
            "float" => Ok(FieldType::Float),
            "boolean" | "bool" => Ok(FieldType::Boolean),
            "datetime" | "date" => Ok(FieldType::DateTime),
            _ => Err(ScaffoldError::InvalidInput {
                field: "fields",
                value: s.to_string(),
                reason: "field types are string, text, int, float, boolean, datetime".to_string(),
            }),
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldType::String => "string",
            FieldType::Text => "text",
            FieldType::Int => "int",
            FieldType::Float => "float",
            FieldType::Boolean => "boolean",
            FieldType::DateTime => "datetime",
        };
        f.write_str(name)
    }
}

/// One `name:type` model field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub kind: FieldType,
}

/// Columns every generated model already has
const RESERVED_FIELDS: &[&str] = &["id", "createdAt", "updatedAt"];

/// Parse `title:string,views:int`; an empty string yields no fields
pub fn parse_fields(raw: &str) -> Result<Vec<Field>> {
    let mut fields: Vec<Field> = Vec::new();
    for entry in raw.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        let invalid = |reason: &str| ScaffoldError::InvalidInput {
            field: "fields",
            value: entry.to_string(),
            reason: reason.to_string(),
        };
        let (raw_name, raw_type) = entry
            .split_once(':')
            .ok_or_else(|| invalid("expected name:type"))?;
        let name = Name::parse(raw_name)
            .map_err(|_| invalid("field names must start with a letter"))?
            .camel();
        if RESERVED_FIELDS.contains(&name.as_str()) {
            return Err(invalid("this column is generated automatically"));
        }
        if fields.iter().any(|f| f.name == name) {
            return Err(invalid("duplicate field"));
        }
        fields.push(Field {
            name,
            kind: raw_type.parse()?,
        });
    }
    Ok(fields)
}

#[derive(Debug, Clone, Copy)]
pub(super) struct CrudOptions {
    pub protected: bool,
    pub admin: bool,
    pub page: bool,
    pub api: bool,
}

fn render_model(name: &Name, fields: &[Field], database: Database) -> String {
    let width = fields
        .iter()
        .map(|f| f.name.len())
        .chain(RESERVED_FIELDS.iter().map(|f| f.len()))
        .max()
        .unwrap_or(0);

    let mut out = format!("model {} {{\n", name.pascal());
    out.push_str(&format!("  {:<width$} String   @id @default(cuid())\n", "id", width = width));
    for field in fields {
        out.push_str(&format!(
            "  {:<width$} {}\n",
            field.name,
            field.kind.prisma_type(database),
            width = width
        ));
    }
    out.push_str(&format!("  {:<width$} DateTime @default(now())\n", "createdAt", width = width));
    out.push_str(&format!("  {:<width$} DateTime @updatedAt\n", "updatedAt", width = width));
    out.push_str("}\n");
    out
}

/// Top-level block (`model`, `enum`, `type`, `view`) already declaring `name`
fn declared_kind<'a>(schema: &'a str, name: &str) -> Option<&'a str> {
    schema.lines().find_map(|line| {
        let mut parts = line.split_whitespace();
        let kind = parts.next()?;
        let is_block = matches!(kind, "model" | "enum" | "type" | "view");
        (is_block && parts.next() == Some(name)).then_some(kind)
    })
}

fn render_router(name: &Name, fields: &[Field], protected: bool) -> String {
    let camel = name.camel();
    let procedure = procedure_kind(protected);

    let mut out = String::new();
    out.push_str("import { z } from \"zod\";\n\n");
    out.push_str(&format!(
        "import {{ createTRPCRouter, {} }} from \"~/server/api/trpc\";\n\n",
        procedure
    ));
    out.push_str(&format!("const {}Input = z.object({{\n", camel));
    for field in fields {
        out.push_str(&format!("  {}: {},\n", field.name, field.kind.zod()));
    }
    out.push_str("});\n\n");
    out.push_str(&format!("export const {}Router = createTRPCRouter({{\n", camel));
    out.push_str(&format!("  list: {}.query(({{ ctx }}) => {{\n", procedure));
    out.push_str(&format!(
        "    return ctx.db.{}.findMany({{ orderBy: {{ createdAt: \"desc\" }} }});\n",
        camel
    ));
    out.push_str("  }),\n\n");
    out.push_str(&format!("  byId: {}\n", procedure));
    out.push_str("    .input(z.object({ id: z.string() }))\n");
    out.push_str("    .query(({ ctx, input }) => {\n");
    out.push_str(&format!(
        "      return ctx.db.{}.findUnique({{ where: {{ id: input.id }} }});\n",
        camel
    ));
    out.push_str("    }),\n\n");
    out.push_str(&format!("  create: {}\n", procedure));
    out.push_str(&format!("    .input({}Input)\n", camel));
    out.push_str("    .mutation(({ ctx, input }) => {\n");
    out.push_str(&format!("      return ctx.db.{}.create({{ data: input }});\n", camel));
    out.push_str("    }),\n\n");
    out.push_str(&format!("  update: {}\n", procedure));
    out.push_str(&format!(
        "    .input(z.object({{ id: z.string(), data: {}Input.partial() }}))\n",
        camel
    ));
    out.push_str("    .mutation(({ ctx, input }) => {\n");
    out.push_str(&format!(
        "      return ctx.db.{}.update({{ where: {{ id: input.id }}, data: input.data }});\n",
        camel
    ));
    out.push_str("    }),\n\n");
    out.push_str(&format!("  delete: {}\n", procedure));
    out.push_str("    .input(z.object({ id: z.string() }))\n");
    out.push_str("    .mutation(({ ctx, input }) => {\n");
    out.push_str(&format!(
        "      return ctx.db.{}.delete({{ where: {{ id: input.id }} }});\n",
        camel
    ));
    out.push_str("    }),\n");
    out.push_str("});\n");
    out
}

fn render_list_page(name: &Name, fields: &[Field], protected: bool) -> String {
    let camel = name.camel();
    // First text-like field doubles as the item label
    let label = fields
        .iter()
        .find(|f| matches!(f.kind, FieldType::String | FieldType::Text))
        .map(|f| format!("item.{}", f.name))
        .unwrap_or_else(|| "item.id".to_string());

    let mut out = String::new();
    if protected {
        out.push_str("import { redirect } from \"next/navigation\";\n\n");
        out.push_str("import { auth } from \"~/server/auth\";\n");
    }
    out.push_str("import { api } from \"~/trpc/server\";\n\n");
    out.push_str(&format!(
        "export default async function {}ListPage() {{\n",
        name.pascal()
    ));
    if protected {
        out.push_str("  const session = await auth();\n");
        out.push_str("  if (!session) redirect(\"/login\");\n\n");
    }
    out.push_str(&format!("  const items = await api.{}.list();\n\n", camel));
    out.push_str("  return (\n");
    out.push_str("    <main className=\"mx-auto max-w-4xl space-y-6 p-8\">\n");
    out.push_str(&format!(
        "      <h1 className=\"text-3xl font-bold\">{}</h1>\n",
        name.title()
    ));
    out.push_str("      {items.length === 0 ? (\n");
    out.push_str("        <p className=\"text-muted-foreground\">Nothing here yet.</p>\n");
    out.push_str("      ) : (\n");
    out.push_str("        <ul className=\"divide-y rounded-md border\">\n");
    out.push_str("          {items.map((item) => (\n");
    out.push_str("            <li key={item.id} className=\"p-4\">\n");
    out.push_str(&format!("              {{String({})}}\n", label));
    out.push_str("            </li>\n");
    out.push_str("          ))}\n");
    out.push_str("        </ul>\n");
    out.push_str("      )}\n");
    out.push_str("    </main>\n");
    out.push_str("  );\n");
    out.push_str("}\n");
    out
}

/// Append the model to the schema unless a model of that name exists
///
/// Any other block with the same name (e.g. `enum Role`) is a conflict.
async fn append_model(
    ctx: &ProjectContext,
    name: &Name,
    fields: &[Field],
    outcome: &mut ScaffoldOutcome,
) -> Result<()> {
    let path = ctx.root.join(SCHEMA_PATH);
    let mut schema = fs::read_to_string(&path).await?;
    match declared_kind(&schema, &name.pascal()) {
        Some("model") => {
            outcome.skipped.push(SCHEMA_PATH.to_string());
            return Ok(());
        }
        Some(kind) => {
            return Err(ScaffoldError::InvalidInput {
                field: "name",
                value: name.pascal(),
                reason: format!("the schema already declares `{} {}`", kind, name.pascal()),
            });
        }
        None => {}
    }

    if !schema.ends_with('\n') {
        schema.push('\n');
    }
    schema.push('\n');
    schema.push_str(&render_model(name, fields, ctx.marker.database));
    fs::write(&path, schema).await?;
    outcome.written.push(SCHEMA_PATH.to_string());
    outcome.hints.push(format!(
        "Apply the schema change: {}",
        ctx.marker.package_manager.run_script("db:push")
    ));
    Ok(())
}

pub(super) async fn generate(
    ctx: &ProjectContext,
    name: &Name,
    fields: &[Field],
    options: &CrudOptions,
) -> Result<ScaffoldOutcome> {
    let mut outcome = ScaffoldOutcome::default();
    append_model(ctx, name, fields, &mut outcome).await?;

    if options.api {
        outcome
            .create(
                &ctx.root,
                router_path(name),
                render_router(name, fields, options.protected),
            )
            .await?;
        outcome.hints.push(registration_hint(name));
    }

    if options.page {
        let path = format!("{}/page.tsx", page_dir(&name.kebab(), options.admin));
        outcome
            .create(&ctx.root, path, render_list_page(name, fields, options.protected))
            .await?;
    }

    Ok(outcome)
}
