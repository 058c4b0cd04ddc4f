use super::{Name, ProjectContext, ScaffoldOutcome};
use crate::error::{Result, ScaffoldError};
use std::str::FromStr;

/// Where a standalone component lives and how it is shaped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentKind {
    /// Primitive under `src/components/ui`
    Ui,
    /// Feature component under `src/components`
    Feature,
    /// Layout wrapper under `src/components/layout`
    Layout,
}

impl ComponentKind {
    fn path(&self, name: &Name) -> String {
        match self {
            ComponentKind::Ui => format!("src/components/ui/{}.tsx", name.kebab()),
            ComponentKind::Feature => format!("src/components/{}.tsx", name.kebab()),
            ComponentKind::Layout => format!("src/components/layout/{}.tsx", name.kebab()),
        }
    }
}

impl FromStr for ComponentKind {
    type Err = ScaffoldError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ui" => Ok(ComponentKind::Ui),
            "feature" => Ok(ComponentKind::Feature),
            "layout" => Ok(ComponentKind::Layout),
            _ => Err(ScaffoldError::InvalidInput {
                field: "type",
                value: s.to_string(),
                reason: "expected one of ui, feature, layout".to_string(),
            }),
        }
    }
}

fn render_ui(name: &Name) -> String {
    let pascal = name.pascal();
    format!(
        r#"import * as React from "react";

import {{ cn }} from "~/lib/utils";

export interface {pascal}Props extends React.HTMLAttributes<HTMLDivElement> {{}}

const {pascal} = React.forwardRef<HTMLDivElement, {pascal}Props>(
  ({{ className, ...props }}, ref) => (
    <div ref={{ref}} className={{cn("", className)}} {{...props}} />
  ),
);
{pascal}.displayName = "{pascal}";

export {{ {pascal} }};
"#
    )
}

fn render_feature(name: &Name) -> String {
    let pascal = name.pascal();
    let title = name.title();
    format!(
        r#""use client";

import {{ useState }} from "react";

import {{ Card, CardContent, CardHeader, CardTitle }} from "~/components/ui/card";

export function {pascal}() {{
  const [open, setOpen] = useState(false);

  return (
    <Card>
      <CardHeader>
        <CardTitle>{title}</CardTitle>
      </CardHeader>
      <CardContent>
        <button type="button" onClick={{() => setOpen((v) => !v)}}>
          {{open ? "Hide" : "Show"}} details
        </button>
        {{open && <p className="text-muted-foreground mt-2 text-sm">Details go here.</p>}}
      </CardContent>
    </Card>
  );
}}
"#
    )
}

fn render_layout(name: &Name) -> String {
    let pascal = name.pascal();
    format!(
        r#"import type {{ ReactNode }} from "react";

export function {pascal}({{ children }}: {{ children: ReactNode }}) {{
  return <div className="mx-auto flex min-h-screen max-w-6xl flex-col p-6">{{children}}</div>;
}}
"#
    )
}

pub(super) async fn generate(
    ctx: &ProjectContext,
    name: &Name,
    kind: ComponentKind,
) -> Result<ScaffoldOutcome> {
    let contents = match kind {
        ComponentKind::Ui => render_ui(name),
        ComponentKind::Feature => render_feature(name),
        ComponentKind::Layout => render_layout(name),
    };
    let mut outcome = ScaffoldOutcome::default();
    outcome.create(&ctx.root, kind.path(name), contents).await?;
    Ok(outcome)
}

/// `src/components/<name>/` with a card component and a barrel file
pub(super) async fn generate_module_folder(
    ctx: &ProjectContext,
    name: &Name,
) -> Result<ScaffoldOutcome> {
    let kebab = name.kebab();
    let pascal = name.pascal();
    let title = name.title();

    let card = format!(
        r#"import {{ Card, CardDescription, CardHeader, CardTitle }} from "~/components/ui/card";

export function {pascal}Card({{ label }}: {{ label: string }}) {{
  return (
    <Card>
      <CardHeader>
        <CardTitle>{{label}}</CardTitle>
        <CardDescription>{title}</CardDescription>
      </CardHeader>
    </Card>
  );
}}
"#
    );
    let index = format!("export {{ {pascal}Card }} from \"./{kebab}-card\";\n");

    let mut outcome = ScaffoldOutcome::default();
    outcome
        .create(&ctx.root, format!("src/components/{}/{}-card.tsx", kebab, kebab), card)
        .await?;
    outcome
        .create(&ctx.root, format!("src/components/{}/index.ts", kebab), index)
        .await?;
    Ok(outcome)
}
