//! tRPC server setup, root router and React client bindings

use super::FileWrite;
use crate::options::ProjectOptions;

const TRPC_INIT: &str = r#"/**
 * tRPC context, procedures and router factory. Feature routers live in
 * `./routers` and are merged in `./root.ts`.
 */
import { initTRPC, TRPCError } from "@trpc/server";
import superjson from "superjson";
import { ZodError } from "zod";

import { auth } from "~/server/auth";
import { db } from "~/server/db";

export const createTRPCContext = async (opts: { headers: Headers }) => {
  const session = await auth();

  return {
    db,
    session,
    ...opts,
  };
};

const t = initTRPC.context<typeof createTRPCContext>().create({
  transformer: superjson,
  errorFormatter({ shape, error }) {
    return {
      ...shape,
      data: {
        ...shape.data,
        zodError:
          error.cause instanceof ZodError ? error.cause.flatten() : null,
      },
    };
  },
});

export const createCallerFactory = t.createCallerFactory;

export const createTRPCRouter = t.router;

export const publicProcedure = t.procedure;

export const protectedProcedure = t.procedure.use(({ ctx, next }) => {
  if (!ctx.session?.user) {
    throw new TRPCError({ code: "UNAUTHORIZED" });
  }
  return next({
    ctx: {
      session: { ...ctx.session, user: ctx.session.user },
    },
  });
});

export const adminProcedure = protectedProcedure.use(({ ctx, next }) => {
  if (ctx.session.user.role !== "ADMIN") {
    throw new TRPCError({ code: "FORBIDDEN" });
  }
  return next();
});
"#;

const HEALTH_ROUTER: &str = r#"import { createTRPCRouter, publicProcedure } from "~/server/api/trpc";

export const healthRouter = createTRPCRouter({
  check: publicProcedure.query(async ({ ctx }) => {
    await ctx.db.$queryRaw`SELECT 1`;
    return { status: "ok", time: new Date() };
  }),
});
"#;

/// (import name, module, router key) for every router merged into root.ts
fn routers(opts: &ProjectOptions) -> Vec<(&'static str, &'static str, &'static str)> {
    let mut routers = vec![("healthRouter", "health", "health")];
    if opts.include_example_code {
        routers.push(("postRouter", "post", "post"));
    }
    if opts.template.has_admin() {
        routers.push(("adminRouter", "admin", "admin"));
    }
    routers
}

fn render_root(opts: &ProjectOptions) -> String {
    let routers = routers(opts);
    let mut out = String::new();
    for (import, module, _) in &routers {
        out.push_str(&format!(
            "import {{ {} }} from \"~/server/api/routers/{}\";\n",
            import, module
        ));
    }
    out.push_str("import { createCallerFactory, createTRPCRouter } from \"~/server/api/trpc\";\n\n");
    out.push_str("/**\n * Primary router. Routers added in /api/routers are registered here.\n */\n");
    out.push_str("export const appRouter = createTRPCRouter({\n");
    for (import, _, key) in &routers {
        out.push_str(&format!("  {}: {},\n", key, import));
    }
    out.push_str("});\n\n");
    out.push_str("export type AppRouter = typeof appRouter;\n\n");
    out.push_str("export const createCaller = createCallerFactory(appRouter);\n");
    out
}

/// Context, procedures, root router and the health router
pub fn trpc_server(opts: &ProjectOptions) -> Vec<FileWrite> {
    vec![
        FileWrite::new("src/server/api/trpc.ts", TRPC_INIT),
        FileWrite::new("src/server/api/root.ts", render_root(opts)),
        FileWrite::new("src/server/api/routers/health.ts", HEALTH_ROUTER),
    ]
}

const QUERY_CLIENT: &str = r#"import {
  defaultShouldDehydrateQuery,
  QueryClient,
} from "@tanstack/react-query";
import SuperJSON from "superjson";

export const createQueryClient = () =>
  new QueryClient({
    defaultOptions: {
      queries: {
        staleTime: 30 * 1000,
      },
      dehydrate: {
        serializeData: SuperJSON.serialize,
        shouldDehydrateQuery: (query) =>
          defaultShouldDehydrateQuery(query) ||
          query.state.status === "pending",
      },
      hydrate: {
        deserializeData: SuperJSON.deserialize,
      },
    },
  });
"#;

const REACT_PROVIDER: &str = r#""use client";

import { QueryClientProvider, type QueryClient } from "@tanstack/react-query";
import { loggerLink, unstable_httpBatchStreamLink } from "@trpc/client";
import { createTRPCReact } from "@trpc/react-query";
import { type inferRouterInputs, type inferRouterOutputs } from "@trpc/server";
import { useState } from "react";
import SuperJSON from "superjson";

import { type AppRouter } from "~/server/api/root";
import { createQueryClient } from "./query-client";

let clientQueryClientSingleton: QueryClient | undefined = undefined;
const getQueryClient = () => {
  if (typeof window === "undefined") {
    return createQueryClient();
  }
  return (clientQueryClientSingleton ??= createQueryClient());
};

export const api = createTRPCReact<AppRouter>();

export type RouterInputs = inferRouterInputs<AppRouter>;
export type RouterOutputs = inferRouterOutputs<AppRouter>;

export function TRPCReactProvider(props: { children: React.ReactNode }) {
  const queryClient = getQueryClient();

  const [trpcClient] = useState(() =>
    api.createClient({
      links: [
        loggerLink({
          enabled: (op) =>
            process.env.NODE_ENV === "development" ||
            (op.direction === "down" && op.result instanceof Error),
        }),
        unstable_httpBatchStreamLink({
          transformer: SuperJSON,
          url: getBaseUrl() + "/api/trpc",
          headers: () => {
            const headers = new Headers();
            headers.set("x-trpc-source", "nextjs-react");
            return headers;
          },
        }),
      ],
    }),
  );

  return (
    <QueryClientProvider client={queryClient}>
      <api.Provider client={trpcClient} queryClient={queryClient}>
        {props.children}
      </api.Provider>
    </QueryClientProvider>
  );
}

function getBaseUrl() {
  if (typeof window !== "undefined") return window.location.origin;
  return `http://localhost:${process.env.PORT ?? 3000}`;
}
"#;

const SERVER_CALLER: &str = r#"import "server-only";

import { createHydrationHelpers } from "@trpc/react-query/rsc";
import { headers } from "next/headers";
import { cache } from "react";

import { createCaller, type AppRouter } from "~/server/api/root";
import { createTRPCContext } from "~/server/api/trpc";
import { createQueryClient } from "./query-client";

const createContext = cache(async () => {
  const heads = new Headers(await headers());
  heads.set("x-trpc-source", "rsc");

  return createTRPCContext({
    headers: heads,
  });
});

const getQueryClient = cache(createQueryClient);
const caller = createCaller(createContext);

export const { trpc: api, HydrateClient } = createHydrationHelpers<AppRouter>(
  caller,
  getQueryClient,
);
"#;

const TRPC_ROUTE: &str = r#"import { fetchRequestHandler } from "@trpc/server/adapters/fetch";
import { type NextRequest } from "next/server";

import { appRouter } from "~/server/api/root";
import { createTRPCContext } from "~/server/api/trpc";

const createContext = async (req: NextRequest) => {
  return createTRPCContext({
    headers: req.headers,
  });
};

const handler = (req: NextRequest) =>
  fetchRequestHandler({
    endpoint: "/api/trpc",
    req,
    router: appRouter,
    createContext: () => createContext(req),
    onError:
      process.env.NODE_ENV === "development"
        ? ({ path, error }) => {
            console.error(
              `tRPC failed on ${path ?? "<no-path>"}: ${error.message}`,
            );
          }
        : undefined,
  });

export { handler as GET, handler as POST };
"#;

/// React provider, RSC caller, query client and the fetch route handler
pub fn trpc_client(_opts: &ProjectOptions) -> Vec<FileWrite> {
    vec![
        FileWrite::new("src/trpc/react.tsx", REACT_PROVIDER),
        FileWrite::new("src/trpc/server.ts", SERVER_CALLER),
        FileWrite::new("src/trpc/query-client.ts", QUERY_CLIENT),
        FileWrite::new("src/app/api/trpc/[trpc]/route.ts", TRPC_ROUTE),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::test_support::options;
    use crate::options::{AuthProvider, Database, Template};

    #[test]
    fn test_root_router_registers_optional_routers() {
        let opts = options(Template::FullSystem, Database::Sqlite, AuthProvider::Discord, true);
        let root = render_root(&opts);
        assert!(root.contains("import { postRouter } from \"~/server/api/routers/post\";"));
        assert!(root.contains("  post: postRouter,"));
        assert!(root.contains("  admin: adminRouter,"));
        assert!(root.contains("  health: healthRouter,"));
    }

    #[test]
    fn test_barebones_root_router_is_minimal() {
        let opts = options(Template::Barebones, Database::Sqlite, AuthProvider::Discord, false);
        let root = render_root(&opts);
        assert!(!root.contains("postRouter"));
        assert!(!root.contains("adminRouter"));
        assert!(root.contains("export type AppRouter"));
    }

    #[test]
    fn test_dashboard_template_has_no_admin_router() {
        let opts = options(Template::Dashboard, Database::Mysql, AuthProvider::Google, true);
        let root = render_root(&opts);
        assert!(!root.contains("adminRouter"));
        assert!(root.contains("postRouter"));
    }
}
