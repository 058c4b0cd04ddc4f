use super::{Name, ProjectContext, ScaffoldOutcome};
use crate::error::Result;

/// Directory under `src/app` the page lives in
pub(super) fn page_dir(route: &str, admin: bool) -> String {
    if admin {
        format!("src/app/admin/{}", route)
    } else {
        format!("src/app/{}", route)
    }
}

pub(super) fn render_page(name: &Name, protected: bool) -> String {
    let component = format!("{}Page", name.pascal());
    let mut out = String::new();
    if protected {
        out.push_str("import { redirect } from \"next/navigation\";\n\n");
        out.push_str("import { auth } from \"~/server/auth\";\n\n");
        out.push_str(&format!("export default async function {}() {{\n", component));
        out.push_str("  const session = await auth();\n");
        out.push_str("  if (!session) redirect(\"/login\");\n\n");
    } else {
        out.push_str(&format!("export default function {}() {{\n", component));
    }
    out.push_str("  return (\n");
    out.push_str("    <main className=\"mx-auto max-w-4xl space-y-6 p-8\">\n");
    out.push_str(&format!(
        "      <h1 className=\"text-3xl font-bold\">{}</h1>\n",
        name.title()
    ));
    out.push_str("    </main>\n");
    out.push_str("  );\n");
    out.push_str("}\n");
    out
}

pub(super) async fn generate(
    ctx: &ProjectContext,
    name: &Name,
    route: &str,
    protected: bool,
    admin: bool,
) -> Result<ScaffoldOutcome> {
    let mut outcome = ScaffoldOutcome::default();
    let path = format!("{}/page.tsx", page_dir(route, admin));
    outcome
        .create(&ctx.root, path, render_page(name, protected))
        .await?;
    if admin && !ctx.marker.template.has_admin() {
        outcome.hints.push(
            "This project has no admin area; the page is not behind the admin layout".to_string(),
        );
    }
    Ok(outcome)
}
