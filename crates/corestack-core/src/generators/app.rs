//! App Router pages: the shell every project gets, plus the admin panel,
//! the user dashboard and the example posts feature.

use super::FileWrite;
use crate::options::{AuthProvider, ProjectOptions};

const ROOT_LAYOUT: &str = r#"import "~/styles/globals.css";

import { type Metadata } from "next";
import { Inter } from "next/font/google";

import { TRPCReactProvider } from "~/trpc/react";

const inter = Inter({
  subsets: ["latin"],
  variable: "--font-sans",
});

export const metadata: Metadata = {
  title: "__PROJECT_TITLE__",
  description: "Generated by create-corestack",
  icons: [{ rel: "icon", url: "/favicon.ico" }],
};

export default function RootLayout({
  children,
}: Readonly<{ children: React.ReactNode }>) {
  return (
    <html lang="en" className={inter.variable}>
      <body className="min-h-screen bg-background font-sans text-foreground antialiased">
        <TRPCReactProvider>{children}</TRPCReactProvider>
      </body>
    </html>
  );
}
"#;

const NOT_FOUND: &str = r#"import Link from "next/link";

export default function NotFound() {
  return (
    <main className="flex min-h-screen flex-col items-center justify-center gap-4">
      <h1 className="text-4xl font-bold">404</h1>
      <p className="text-muted-foreground">This page could not be found.</p>
      <Link href="/" className="underline">
        Go home
      </Link>
    </main>
  );
}
"#;

const GLOBALS_CSS: &str = r#"@tailwind base;
@tailwind components;
@tailwind utilities;

@layer base {
  :root {
    --background: 0 0% 100%;
    --foreground: 222.2 84% 4.9%;
    --primary: 222.2 47.4% 11.2%;
    --primary-foreground: 210 40% 98%;
    --muted: 210 40% 96.1%;
    --muted-foreground: 215.4 16.3% 46.9%;
    --destructive: 0 84.2% 60.2%;
    --destructive-foreground: 210 40% 98%;
    --border: 214.3 31.8% 91.4%;
    --radius: 0.5rem;
  }

  .dark {
    --background: 222.2 84% 4.9%;
    --foreground: 210 40% 98%;
    --primary: 210 40% 98%;
    --primary-foreground: 222.2 47.4% 11.2%;
    --muted: 217.2 32.6% 17.5%;
    --muted-foreground: 215 20.2% 65.1%;
    --destructive: 0 62.8% 30.6%;
    --destructive-foreground: 210 40% 98%;
    --border: 217.2 32.6% 17.5%;
  }

  * {
    @apply border-border;
  }
}
"#;

/// Title-cased project name for page metadata
fn display_title(project_name: &str) -> String {
    project_name
        .split(|c: char| c == '-' || c == '_' || c == '.')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn home_links(opts: &ProjectOptions) -> Vec<(&'static str, &'static str, &'static str)> {
    let mut links = Vec::new();
    if opts.template.has_dashboard() {
        links.push(("/dashboard", "Dashboard", "Your account overview and settings."));
    }
    if opts.template.has_admin() {
        links.push(("/admin", "Admin", "Manage users and roles."));
    }
    if opts.include_example_code {
        links.push(("/posts", "Posts", "A small tRPC and Prisma example."));
    }
    links
}

fn render_home(opts: &ProjectOptions) -> String {
    let mut out = String::new();
    out.push_str("import Link from \"next/link\";\n\n");
    out.push_str("import { SignOutButton } from \"~/components/auth/sign-out-button\";\n");
    out.push_str("import { auth } from \"~/server/auth\";\n\n");
    out.push_str("export default async function Home() {\n");
    out.push_str("  const session = await auth();\n\n");
    out.push_str("  return (\n");
    out.push_str("    <main className=\"mx-auto flex min-h-screen max-w-3xl flex-col justify-center gap-10 p-8\">\n");
    out.push_str("      <div className=\"space-y-2\">\n");
    out.push_str(&format!(
        "        <h1 className=\"text-4xl font-bold tracking-tight\">{}</h1>\n",
        display_title(&opts.project_name)
    ));
    out.push_str(&format!(
        "        <p className=\"text-muted-foreground\">{}</p>\n",
        opts.template.description()
    ));
    out.push_str("      </div>\n");

    let links = home_links(opts);
    if !links.is_empty() {
        out.push_str("      <div className=\"grid gap-4 sm:grid-cols-2\">\n");
        for (href, title, blurb) in links {
            out.push_str(&format!(
                "        <Link href=\"{}\" className=\"rounded-lg border p-4 hover:bg-muted\">\n",
                href
            ));
            out.push_str(&format!("          <h2 className=\"font-semibold\">{}</h2>\n", title));
            out.push_str(&format!(
                "          <p className=\"text-sm text-muted-foreground\">{}</p>\n",
                blurb
            ));
            out.push_str("        </Link>\n");
        }
        out.push_str("      </div>\n");
    }

    out.push_str("      <div className=\"flex items-center gap-4\">\n");
    out.push_str("        {session ? (\n");
    out.push_str("          <>\n");
    out.push_str("            <span className=\"text-sm\">Signed in as {session.user.name ?? session.user.email}</span>\n");
    out.push_str("            <SignOutButton />\n");
    out.push_str("          </>\n");
    out.push_str("        ) : (\n");
    out.push_str("          <Link href=\"/login\" className=\"underline\">\n");
    out.push_str("            Sign in\n");
    out.push_str("          </Link>\n");
    out.push_str("        )}\n");
    out.push_str("      </div>\n");
    out.push_str("    </main>\n");
    out.push_str("  );\n");
    out.push_str("}\n");
    out
}

/// Root layout, home page, 404 page and global styles
pub fn app_shell(opts: &ProjectOptions) -> Vec<FileWrite> {
    let layout = ROOT_LAYOUT.replace("__PROJECT_TITLE__", &display_title(&opts.project_name));
    vec![
        FileWrite::new("src/app/layout.tsx", layout),
        FileWrite::new("src/app/page.tsx", render_home(opts)),
        FileWrite::new("src/app/not-found.tsx", NOT_FOUND),
        FileWrite::new("src/styles/globals.css", GLOBALS_CSS),
    ]
}

const ADMIN_LAYOUT: &str = r#"import { redirect } from "next/navigation";

import { AdminNav } from "~/components/admin/admin-nav";
import { auth } from "~/server/auth";

export default async function AdminLayout({
  children,
}: {
  children: React.ReactNode;
}) {
  const session = await auth();
  if (!session) redirect("/login");
  if (session.user.role !== "ADMIN") redirect("/");

  return (
    <div className="flex min-h-screen">
      <AdminNav />
      <main className="flex-1 p-8">{children}</main>
    </div>
  );
}
"#;

const ADMIN_NAV: &str = r#"import Link from "next/link";

import { SignOutButton } from "~/components/auth/sign-out-button";

const links = [
  { href: "/admin", label: "Overview" },
  { href: "/admin/users", label: "Users" },
  { href: "/admin/settings", label: "Settings" },
];

export function AdminNav() {
  return (
    <aside className="flex w-56 flex-col gap-1 border-r p-4">
      <span className="mb-4 text-lg font-semibold">Admin</span>
      {links.map((link) => (
        <Link
          key={link.href}
          href={link.href}
          className="rounded-md px-3 py-2 text-sm hover:bg-muted"
        >
          {link.label}
        </Link>
      ))}
      <div className="mt-auto">
        <SignOutButton />
      </div>
    </aside>
  );
}
"#;

const ADMIN_USERS_PAGE: &str = r#"import { UserTable } from "~/components/admin/user-table";
import { api } from "~/trpc/server";

export default async function AdminUsersPage() {
  const users = await api.admin.listUsers();

  return (
    <div className="space-y-6">
      <h1 className="text-2xl font-bold">Users</h1>
      <UserTable users={users} />
    </div>
  );
}
"#;

const USER_TABLE: &str = r#""use client";

import { useRouter } from "next/navigation";

import { Badge } from "~/components/ui/badge";
import { Button } from "~/components/ui/button";
import {
  Table,
  TableBody,
  TableCell,
  TableHead,
  TableHeader,
  TableRow,
} from "~/components/ui/table";
import { api, type RouterOutputs } from "~/trpc/react";

type User = RouterOutputs["admin"]["listUsers"][number];

export function UserTable({ users }: { users: User[] }) {
  const router = useRouter();
  const setRole = api.admin.setRole.useMutation({
    onSuccess: () => router.refresh(),
  });

  return (
    <Table>
      <TableHeader>
        <TableRow>
          <TableHead>Name</TableHead>
          <TableHead>Email</TableHead>
          <TableHead>Role</TableHead>
          <TableHead className="text-right">Actions</TableHead>
        </TableRow>
      </TableHeader>
      <TableBody>
        {users.map((user) => (
          <TableRow key={user.id}>
            <TableCell>{user.name ?? "-"}</TableCell>
            <TableCell>{user.email ?? "-"}</TableCell>
            <TableCell>
              <Badge variant={user.role === "ADMIN" ? "default" : "secondary"}>
                {user.role}
              </Badge>
            </TableCell>
            <TableCell className="text-right">
              <Button
                variant="outline"
                size="sm"
                disabled={setRole.isPending}
                onClick={() =>
                  setRole.mutate({
                    userId: user.id,
                    role: user.role === "ADMIN" ? "USER" : "ADMIN",
                  })
                }
              >
                {user.role === "ADMIN" ? "Revoke admin" : "Make admin"}
              </Button>
            </TableCell>
          </TableRow>
        ))}
      </TableBody>
    </Table>
  );
}
"#;

fn render_admin_router(opts: &ProjectOptions) -> String {
    let mut out = String::new();
    out.push_str("import { TRPCError } from \"@trpc/server\";\n");
    out.push_str("import { z } from \"zod\";\n\n");
    out.push_str("import { adminProcedure, createTRPCRouter } from \"~/server/api/trpc\";\n\n");
    out.push_str("export const adminRouter = createTRPCRouter({\n");
    out.push_str("  stats: adminProcedure.query(async ({ ctx }) => {\n");
    if opts.include_example_code {
        out.push_str("    const [users, admins, posts] = await Promise.all([\n");
        out.push_str("      ctx.db.user.count(),\n");
        out.push_str("      ctx.db.user.count({ where: { role: \"ADMIN\" } }),\n");
        out.push_str("      ctx.db.post.count(),\n");
        out.push_str("    ]);\n");
        out.push_str("    return { users, admins, posts };\n");
    } else {
        out.push_str("    const [users, admins] = await Promise.all([\n");
        out.push_str("      ctx.db.user.count(),\n");
        out.push_str("      ctx.db.user.count({ where: { role: \"ADMIN\" } }),\n");
        out.push_str("    ]);\n");
        out.push_str("    return { users, admins };\n");
    }
    out.push_str("  }),\n\n");
    out.push_str(
        r#"  listUsers: adminProcedure.query(({ ctx }) => {
    return ctx.db.user.findMany({
      orderBy: { createdAt: "desc" },
      select: { id: true, name: true, email: true, role: true, createdAt: true },
    });
  }),

  setRole: adminProcedure
    .input(z.object({ userId: z.string(), role: z.enum(["USER", "ADMIN"]) }))
    .mutation(async ({ ctx, input }) => {
      if (input.userId === ctx.session.user.id && input.role !== "ADMIN") {
        throw new TRPCError({
          code: "BAD_REQUEST",
          message: "You cannot remove your own admin role.",
        });
      }
      return ctx.db.user.update({
        where: { id: input.userId },
        data: { role: input.role },
        select: { id: true, role: true },
      });
    }),
});
"#,
    );
    out
}

fn render_admin_overview(opts: &ProjectOptions) -> String {
    let mut cards = vec![("Users", "stats.users"), ("Admins", "stats.admins")];
    if opts.include_example_code {
        cards.push(("Posts", "stats.posts"));
    }

    let mut out = String::new();
    out.push_str("import {\n  Card,\n  CardContent,\n  CardHeader,\n  CardTitle,\n} from \"~/components/ui/card\";\n");
    out.push_str("import { api } from \"~/trpc/server\";\n\n");
    out.push_str("export default async function AdminOverviewPage() {\n");
    out.push_str("  const stats = await api.admin.stats();\n\n");
    out.push_str("  return (\n");
    out.push_str("    <div className=\"space-y-6\">\n");
    out.push_str("      <h1 className=\"text-2xl font-bold\">Overview</h1>\n");
    out.push_str("      <div className=\"grid gap-4 md:grid-cols-3\">\n");
    for (title, expr) in cards {
        out.push_str("        <Card>\n");
        out.push_str("          <CardHeader>\n");
        out.push_str(&format!("            <CardTitle>{}</CardTitle>\n", title));
        out.push_str("          </CardHeader>\n");
        out.push_str(&format!(
            "          <CardContent className=\"text-3xl font-bold\">{{{}}}</CardContent>\n",
            expr
        ));
        out.push_str("        </Card>\n");
    }
    out.push_str("      </div>\n");
    out.push_str("    </div>\n");
    out.push_str("  );\n");
    out.push_str("}\n");
    out
}

/// Escape text placed between JSX tags
fn jsx_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('{', "&#123;")
        .replace('}', "&#125;")
}

fn render_admin_settings(opts: &ProjectOptions) -> String {
    let rows = [
        ("Template", opts.template.display_name().to_string()),
        ("Database", opts.database.display_name().to_string()),
        ("Authentication", opts.auth_provider.display_name().to_string()),
    ];

    let mut out = String::new();
    out.push_str("import {\n  Card,\n  CardContent,\n  CardDescription,\n  CardHeader,\n  CardTitle,\n} from \"~/components/ui/card\";\n\n");
    out.push_str("export default function AdminSettingsPage() {\n");
    out.push_str("  return (\n");
    out.push_str("    <div className=\"space-y-6\">\n");
    out.push_str("      <h1 className=\"text-2xl font-bold\">Settings</h1>\n");
    out.push_str("      <Card>\n");
    out.push_str("        <CardHeader>\n");
    out.push_str("          <CardTitle>Stack</CardTitle>\n");
    out.push_str("          <CardDescription>How this application was configured.</CardDescription>\n");
    out.push_str("        </CardHeader>\n");
    out.push_str("        <CardContent>\n");
    out.push_str("          <dl className=\"grid grid-cols-2 gap-2 text-sm\">\n");
    for (label, value) in rows {
        out.push_str(&format!("            <dt className=\"text-muted-foreground\">{}</dt>\n", label));
        out.push_str(&format!("            <dd>{}</dd>\n", jsx_text(&value)));
    }
    out.push_str("          </dl>\n");
    out.push_str("        </CardContent>\n");
    out.push_str("      </Card>\n");
    out.push_str("    </div>\n");
    out.push_str("  );\n");
    out.push_str("}\n");
    out
}

/// Role-gated admin area with user management
pub fn admin_panel(opts: &ProjectOptions) -> Vec<FileWrite> {
    vec![
        FileWrite::new("src/app/admin/layout.tsx", ADMIN_LAYOUT),
        FileWrite::new("src/app/admin/page.tsx", render_admin_overview(opts)),
        FileWrite::new("src/app/admin/users/page.tsx", ADMIN_USERS_PAGE),
        FileWrite::new("src/app/admin/settings/page.tsx", render_admin_settings(opts)),
        FileWrite::new("src/components/admin/admin-nav.tsx", ADMIN_NAV),
        FileWrite::new("src/components/admin/user-table.tsx", USER_TABLE),
        FileWrite::new("src/server/api/routers/admin.ts", render_admin_router(opts)),
    ]
}

const DASHBOARD_LAYOUT: &str = r#"import { redirect } from "next/navigation";

import { Sidebar } from "~/components/dashboard/sidebar";
import { auth } from "~/server/auth";

export default async function DashboardLayout({
  children,
}: {
  children: React.ReactNode;
}) {
  const session = await auth();
  if (!session) redirect("/login");

  return (
    <div className="flex min-h-screen">
      <Sidebar />
      <main className="flex-1 p-8">{children}</main>
    </div>
  );
}
"#;

const STAT_CARD: &str = r#"import {
  Card,
  CardContent,
  CardDescription,
  CardHeader,
  CardTitle,
} from "~/components/ui/card";

export function StatCard({
  title,
  value,
  description,
}: {
  title: string;
  value: string | number;
  description?: string;
}) {
  return (
    <Card>
      <CardHeader>
        <CardTitle className="text-sm font-medium">{title}</CardTitle>
        {description && <CardDescription>{description}</CardDescription>}
      </CardHeader>
      <CardContent className="text-3xl font-bold">{value}</CardContent>
    </Card>
  );
}
"#;

const DASHBOARD_SETTINGS: &str = r#"import {
  Card,
  CardContent,
  CardDescription,
  CardHeader,
  CardTitle,
} from "~/components/ui/card";
import { Input } from "~/components/ui/input";
import { Label } from "~/components/ui/label";
import { auth } from "~/server/auth";

export default async function DashboardSettingsPage() {
  const session = await auth();

  return (
    <div className="max-w-xl space-y-6">
      <h1 className="text-2xl font-bold">Settings</h1>
      <Card>
        <CardHeader>
          <CardTitle>Profile</CardTitle>
          <CardDescription>Details from your sign-in provider.</CardDescription>
        </CardHeader>
        <CardContent className="space-y-4">
          <div className="space-y-2">
            <Label htmlFor="name">Name</Label>
            <Input id="name" defaultValue={session?.user.name ?? ""} disabled />
          </div>
          <div className="space-y-2">
            <Label htmlFor="email">Email</Label>
            <Input id="email" defaultValue={session?.user.email ?? ""} disabled />
          </div>
        </CardContent>
      </Card>
    </div>
  );
}
"#;

fn render_sidebar(opts: &ProjectOptions) -> String {
    let mut links = vec![("/dashboard", "Overview"), ("/dashboard/settings", "Settings")];
    if opts.include_example_code {
        links.push(("/posts", "Posts"));
    }
    if opts.template.has_admin() {
        links.push(("/admin", "Admin"));
    }

    let mut out = String::new();
    out.push_str("import Link from \"next/link\";\n\n");
    out.push_str("import { SignOutButton } from \"~/components/auth/sign-out-button\";\n\n");
    out.push_str("const links = [\n");
    for (href, label) in links {
        out.push_str(&format!("  {{ href: \"{}\", label: \"{}\" }},\n", href, label));
    }
    out.push_str("];\n\n");
    out.push_str(
        r#"export function Sidebar() {
  return (
    <aside className="flex w-56 flex-col gap-1 border-r p-4">
      <Link href="/" className="mb-4 text-lg font-semibold">
        Home
      </Link>
      {links.map((link) => (
        <Link
          key={link.href}
          href={link.href}
          className="rounded-md px-3 py-2 text-sm hover:bg-muted"
        >
          {link.label}
        </Link>
      ))}
      <div className="mt-auto">
        <SignOutButton />
      </div>
    </aside>
  );
}
"#,
    );
    out
}

fn render_dashboard_home(opts: &ProjectOptions) -> String {
    let mut out = String::new();
    out.push_str("import { StatCard } from \"~/components/dashboard/stat-card\";\n");
    out.push_str("import { auth } from \"~/server/auth\";\n");
    out.push_str("import { db } from \"~/server/db\";\n\n");
    out.push_str("export default async function DashboardPage() {\n");
    out.push_str("  const session = await auth();\n");
    out.push_str("  const userId = session?.user.id ?? \"\";\n");
    out.push_str("  const accounts = await db.account.count({ where: { userId } });\n");
    if opts.include_example_code {
        out.push_str("  const posts = await db.post.count({ where: { createdById: userId } });\n");
    }
    out.push('\n');
    out.push_str("  return (\n");
    out.push_str("    <div className=\"space-y-6\">\n");
    out.push_str("      <h1 className=\"text-2xl font-bold\">\n");
    out.push_str("        Welcome back{session?.user.name ? `, ${session.user.name}` : \"\"}\n");
    out.push_str("      </h1>\n");
    out.push_str("      <div className=\"grid gap-4 md:grid-cols-3\">\n");
    out.push_str("        <StatCard title=\"Role\" value={session?.user.role ?? \"USER\"} />\n");
    let accounts_hint = match opts.auth_provider {
        AuthProvider::Credentials => "Email and password",
        AuthProvider::Discord | AuthProvider::Github | AuthProvider::Google | AuthProvider::None => {
            "Connected sign-in providers"
        }
    };
    out.push_str(&format!(
        "        <StatCard title=\"Linked accounts\" value={{accounts}} description=\"{}\" />\n",
        accounts_hint
    ));
    if opts.include_example_code {
        out.push_str("        <StatCard title=\"Posts\" value={posts} description=\"Written by you\" />\n");
    }
    out.push_str("      </div>\n");
    out.push_str("    </div>\n");
    out.push_str("  );\n");
    out.push_str("}\n");
    out
}

/// Signed-in user dashboard
pub fn dashboard(opts: &ProjectOptions) -> Vec<FileWrite> {
    vec![
        FileWrite::new("src/app/dashboard/layout.tsx", DASHBOARD_LAYOUT),
        FileWrite::new("src/app/dashboard/page.tsx", render_dashboard_home(opts)),
        FileWrite::new("src/app/dashboard/settings/page.tsx", DASHBOARD_SETTINGS),
        FileWrite::new("src/components/dashboard/sidebar.tsx", render_sidebar(opts)),
        FileWrite::new("src/components/dashboard/stat-card.tsx", STAT_CARD),
    ]
}

const POST_ROUTER: &str = r#"import { z } from "zod";

import {
  createTRPCRouter,
  protectedProcedure,
  publicProcedure,
} from "~/server/api/trpc";

export const postRouter = createTRPCRouter({
  list: publicProcedure.query(({ ctx }) => {
    return ctx.db.post.findMany({
      orderBy: { createdAt: "desc" },
      take: 20,
      include: { createdBy: { select: { name: true } } },
    });
  }),

  create: protectedProcedure
    .input(z.object({ name: z.string().min(1).max(200) }))
    .mutation(async ({ ctx, input }) => {
      return ctx.db.post.create({
        data: {
          name: input.name,
          createdBy: { connect: { id: ctx.session.user.id } },
        },
      });
    }),

  getLatest: protectedProcedure.query(async ({ ctx }) => {
    const post = await ctx.db.post.findFirst({
      orderBy: { createdAt: "desc" },
      where: { createdBy: { id: ctx.session.user.id } },
    });

    return post ?? null;
  }),
});
"#;

const POSTS_PAGE: &str = r#"import { CreatePost } from "~/components/posts/create-post";
import { PostList } from "~/components/posts/post-list";
import { auth } from "~/server/auth";
import { api, HydrateClient } from "~/trpc/server";

export default async function PostsPage() {
  const session = await auth();
  void api.post.list.prefetch();

  return (
    <HydrateClient>
      <main className="mx-auto max-w-2xl space-y-8 p-8">
        <h1 className="text-3xl font-bold">Posts</h1>
        {session ? (
          <CreatePost />
        ) : (
          <p className="text-muted-foreground">Sign in to write a post.</p>
        )}
        <PostList />
      </main>
    </HydrateClient>
  );
}
"#;

const POST_LIST: &str = r#""use client";

import { Card, CardContent } from "~/components/ui/card";
import { api } from "~/trpc/react";

export function PostList() {
  const [posts] = api.post.list.useSuspenseQuery();

  if (posts.length === 0) {
    return <p className="text-muted-foreground">No posts yet.</p>;
  }

  return (
    <div className="space-y-3">
      {posts.map((post) => (
        <Card key={post.id}>
          <CardContent className="pt-6">
            <p>{post.name}</p>
            <p className="text-sm text-muted-foreground">
              by {post.createdBy.name ?? "anonymous"}
            </p>
          </CardContent>
        </Card>
      ))}
    </div>
  );
}
"#;

const CREATE_POST: &str = r#""use client";

import { useState } from "react";

import { Button } from "~/components/ui/button";
import { Input } from "~/components/ui/input";
import { api } from "~/trpc/react";

export function CreatePost() {
  const utils = api.useUtils();
  const [name, setName] = useState("");

  const createPost = api.post.create.useMutation({
    onSuccess: async () => {
      await utils.post.invalidate();
      setName("");
    },
  });

  return (
    <form
      onSubmit={(e) => {
        e.preventDefault();
        createPost.mutate({ name });
      }}
      className="flex gap-2"
    >
      <Input
        placeholder="What's on your mind?"
        value={name}
        onChange={(e) => setName(e.target.value)}
      />
      <Button type="submit" disabled={createPost.isPending || name.length === 0}>
        {createPost.isPending ? "Posting..." : "Post"}
      </Button>
    </form>
  );
}
"#;

/// Post router, posts page and its client components
pub fn example_posts(_opts: &ProjectOptions) -> Vec<FileWrite> {
    vec![
        FileWrite::new("src/server/api/routers/post.ts", POST_ROUTER),
        FileWrite::new("src/app/posts/page.tsx", POSTS_PAGE),
        FileWrite::new("src/components/posts/post-list.tsx", POST_LIST),
        FileWrite::new("src/components/posts/create-post.tsx", CREATE_POST),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::test_support::options;
    use crate::options::{Database, Template};

    #[test]
    fn test_display_title() {
        assert_eq!(display_title("my-cool_app"), "My Cool App");
        assert_eq!(display_title("app"), "App");
    }

    #[test]
    fn test_layout_title_is_substituted() {
        let opts = options(Template::Barebones, Database::Sqlite, AuthProvider::Discord, false);
        let files = app_shell(&opts);
        assert!(files[0].contents.contains("title: \"Test App\""));
        assert!(!files[0].contents.contains("__PROJECT_TITLE__"));
    }

    #[test]
    fn test_home_links_follow_template() {
        let opts = options(Template::Barebones, Database::Sqlite, AuthProvider::Discord, false);
        let home = render_home(&opts);
        assert!(!home.contains("href=\"/admin\""));
        assert!(!home.contains("href=\"/dashboard\""));

        let opts = options(Template::FullSystem, Database::Sqlite, AuthProvider::Discord, true);
        let home = render_home(&opts);
        assert!(home.contains("href=\"/admin\""));
        assert!(home.contains("href=\"/dashboard\""));
        assert!(home.contains("href=\"/posts\""));
    }

    #[test]
    fn test_admin_stats_only_count_posts_with_examples() {
        let with = options(Template::Admin, Database::Postgresql, AuthProvider::Github, true);
        assert!(render_admin_router(&with).contains("ctx.db.post.count()"));
        assert!(render_admin_overview(&with).contains("{stats.posts}"));

        let without = options(Template::Admin, Database::Postgresql, AuthProvider::Github, false);
        assert!(!render_admin_router(&without).contains("ctx.db.post"));
        assert!(!render_admin_overview(&without).contains("stats.posts"));
    }

    #[test]
    fn test_admin_panel_includes_router() {
        let opts = options(Template::Admin, Database::Sqlite, AuthProvider::Credentials, false);
        let files = admin_panel(&opts);
        assert!(files
            .iter()
            .any(|f| f.path == "src/server/api/routers/admin.ts"));
        let settings = render_admin_settings(&opts);
        assert!(settings.contains("<dd>Email &amp; password</dd>"));
    }

    #[test]
    fn test_sidebar_links_admin_only_for_full_system() {
        let full = options(Template::FullSystem, Database::Sqlite, AuthProvider::Discord, false);
        assert!(render_sidebar(&full).contains("href: \"/admin\""));

        let dashboard = options(Template::Dashboard, Database::Sqlite, AuthProvider::Discord, false);
        assert!(!render_sidebar(&dashboard).contains("href: \"/admin\""));
    }

    #[test]
    fn test_dashboard_counts_posts_with_examples() {
        let opts = options(Template::Dashboard, Database::Sqlite, AuthProvider::Google, true);
        assert!(render_dashboard_home(&opts).contains("db.post.count"));
        let opts = options(Template::Dashboard, Database::Sqlite, AuthProvider::Google, false);
        assert!(!render_dashboard_home(&opts).contains("db.post"));
    }
}
