use super::{registration_hint, Name, ProjectContext, ScaffoldOutcome};
use crate::error::Result;

pub(super) fn procedure_kind(protected: bool) -> &'static str {
    if protected {
        "protectedProcedure"
    } else {
        "publicProcedure"
    }
}

pub(super) fn router_path(name: &Name) -> String {
    format!("src/server/api/routers/{}.ts", name.camel())
}

/// Router backed by an in-memory list, for endpoints without a model yet
fn render_router(name: &Name, protected: bool) -> String {
    let camel = name.camel();
    let pascal = name.pascal();
    let procedure = procedure_kind(protected);

    let mut out = String::new();
    out.push_str("import { TRPCError } from \"@trpc/server\";\n");
    out.push_str("import { z } from \"zod\";\n\n");
    out.push_str(&format!(
        "import {{ createTRPCRouter, {} }} from \"~/server/api/trpc\";\n\n",
        procedure
    ));
    out.push_str(&format!(
        "export interface {} {{\n  id: string;\n  name: string;\n  createdAt: Date;\n}}\n\n",
        pascal
    ));
    out.push_str("// In-memory store; replace with a Prisma model to persist data.\n");
    out.push_str(&format!("const items: {}[] = [];\n\n", pascal));
    out.push_str(&format!("export const {}Router = createTRPCRouter({{\n", camel));
    out.push_str(&format!("  list: {}.query(() => items),\n\n", procedure));
    out.push_str(&format!("  byId: {}\n", procedure));
    out.push_str("    .input(z.object({ id: z.string() }))\n");
    out.push_str("    .query(({ input }) => {\n");
    out.push_str("      const item = items.find((i) => i.id === input.id);\n");
    out.push_str("      if (!item) throw new TRPCError({ code: \"NOT_FOUND\" });\n");
    out.push_str("      return item;\n");
    out.push_str("    }),\n\n");
    out.push_str(&format!("  create: {}\n", procedure));
    out.push_str("    .input(z.object({ name: z.string().min(1) }))\n");
    out.push_str("    .mutation(({ input }) => {\n");
    out.push_str(&format!(
        "      const item: {} = {{ id: crypto.randomUUID(), name: input.name, createdAt: new Date() }};\n",
        pascal
    ));
    out.push_str("      items.push(item);\n");
    out.push_str("      return item;\n");
    out.push_str("    }),\n");
    out.push_str("});\n");
    out
}

pub(super) async fn generate(
    ctx: &ProjectContext,
    name: &Name,
    protected: bool,
) -> Result<ScaffoldOutcome> {
    let mut outcome = ScaffoldOutcome::default();
    outcome
        .create(&ctx.root, router_path(name), render_router(name, protected))
        .await?;
    outcome.hints.push(registration_hint(name));
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_router_procedures() {
        let name = Name::parse("order-items").unwrap();
        let router = render_router(&name, false);
        assert!(router.contains("export const orderItemsRouter = createTRPCRouter({"));
        assert!(router.contains("list: publicProcedure"));
        assert!(router.contains("byId: publicProcedure"));
        assert!(router.contains("create: publicProcedure"));
        assert_eq!(router_path(&name), "src/server/api/routers/orderItems.ts");
    }

    #[test]
    fn test_protected_router() {
        let name = Name::parse("secrets").unwrap();
        let router = render_router(&name, true);
        assert!(router.contains("import { createTRPCRouter, protectedProcedure }"));
        assert!(!router.contains("publicProcedure"));
    }

    #[test]
    fn test_registration_hint() {
        let hint = registration_hint(&Name::parse("order items").unwrap());
        assert!(hint.contains("import { orderItemsRouter } from \"~/server/api/routers/orderItems\";"));
        assert!(hint.contains("orderItems: orderItemsRouter,"));
    }
}
