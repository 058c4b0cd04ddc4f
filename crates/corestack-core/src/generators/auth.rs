//! NextAuth wiring, sign-in pages and route protection
//!
//! Provider-specific content comes from [`provider_wiring`] and the login
//! variants below. Both are exhaustive over [`AuthProvider`], so `none`
//! still yields a config exporting `auth`, `handlers`, `signIn` and
//! `signOut`, and a login page that renders without a working sign-in.

use super::FileWrite;
use crate::options::{AuthProvider, ProjectOptions};

/// Provider import and entry for the `providers` array
struct ProviderWiring {
    imports: &'static str,
    entry: &'static str,
}

const CREDENTIALS_ENTRY: &str = r#"    Credentials({
      credentials: {
        email: { label: "Email", type: "email" },
        password: { label: "Password", type: "password" },
      },
      authorize: async (raw) => {
        const parsed = credentialsSchema.safeParse(raw);
        if (!parsed.success) return null;

        const user = await db.user.findUnique({
          where: { email: parsed.data.email },
        });
        if (!user?.password) return null;

        const valid = await verifyPassword(parsed.data.password, user.password);
        return valid ? user : null;
      },
    }),
"#;

fn provider_wiring(provider: AuthProvider) -> ProviderWiring {
    match provider {
        AuthProvider::Discord => ProviderWiring {
            imports: "import DiscordProvider from \"next-auth/providers/discord\";\n",
            entry: "    DiscordProvider,\n",
        },
        AuthProvider::Github => ProviderWiring {
            imports: "import GitHubProvider from \"next-auth/providers/github\";\n",
            entry: "    GitHubProvider,\n",
        },
        AuthProvider::Google => ProviderWiring {
            imports: "import GoogleProvider from \"next-auth/providers/google\";\n",
            entry: "    GoogleProvider,\n",
        },
        AuthProvider::Credentials => ProviderWiring {
            imports: concat!(
                "import Credentials from \"next-auth/providers/credentials\";\n",
                "import { z } from \"zod\";\n",
            ),
            entry: CREDENTIALS_ENTRY,
        },
        AuthProvider::None => ProviderWiring {
            imports: "",
            entry: "    // No sign-in provider configured. See https://authjs.dev/getting-started/authentication\n",
        },
    }
}

const DATABASE_SESSION_CALLBACKS: &str = r#"  callbacks: {
    session: ({ session, user }) => ({
      ...session,
      user: {
        ...session.user,
        id: user.id,
        role: user.role ?? "USER",
      },
    }),
  },
"#;

// Credentials sign-in only works with JWT sessions
const JWT_SESSION_CALLBACKS: &str = r#"  session: { strategy: "jwt" },
  callbacks: {
    jwt: ({ token, user }) => {
      if (user) {
        token.sub = user.id;
        token.role = user.role ?? "USER";
      }
      return token;
    },
    session: ({ session, token }) => ({
      ...session,
      user: {
        ...session.user,
        id: token.sub ?? "",
        role: typeof token.role === "string" ? token.role : "USER",
      },
    }),
  },
"#;

const SESSION_AUGMENTATION: &str = r#"/**
 * Module augmentation for `next-auth` types. Adds the user id and role to the
 * session object.
 */
declare module "next-auth" {
  interface Session extends DefaultSession {
    user: {
      id: string;
      role: string;
    } & DefaultSession["user"];
  }

  interface User {
    role?: string;
  }
}
"#;

const AUTH_INDEX: &str = r#"import NextAuth from "next-auth";
import { cache } from "react";

import { authConfig } from "./config";

const { auth: uncachedAuth, handlers, signIn, signOut } = NextAuth(authConfig);

const auth = cache(uncachedAuth);

export { auth, handlers, signIn, signOut };
"#;

const AUTH_ROUTE: &str = r#"import { handlers } from "~/server/auth";

export const { GET, POST } = handlers;
"#;

fn render_auth_config(provider: AuthProvider) -> String {
    let wiring = provider_wiring(provider);
    let mut out = String::new();
    out.push_str("import { PrismaAdapter } from \"@auth/prisma-adapter\";\n");
    out.push_str("import { type DefaultSession, type NextAuthConfig } from \"next-auth\";\n");
    out.push_str(wiring.imports);
    out.push('\n');
    out.push_str("import { db } from \"~/server/db\";\n");
    if provider == AuthProvider::Credentials {
        out.push_str("import { verifyPassword } from \"./password\";\n");
    }
    out.push('\n');
    out.push_str(SESSION_AUGMENTATION);
    out.push('\n');
    if provider == AuthProvider::Credentials {
        out.push_str("const credentialsSchema = z.object({\n");
        out.push_str("  email: z.string().email(),\n");
        out.push_str("  password: z.string().min(8),\n");
        out.push_str("});\n\n");
    }
    out.push_str("export const authConfig = {\n");
    out.push_str("  providers: [\n");
    out.push_str(wiring.entry);
    out.push_str("  ],\n");
    out.push_str("  adapter: PrismaAdapter(db),\n");
    out.push_str("  pages: {\n    signIn: \"/login\",\n  },\n");
    match provider {
        AuthProvider::Credentials => out.push_str(JWT_SESSION_CALLBACKS),
        AuthProvider::Discord | AuthProvider::Github | AuthProvider::Google | AuthProvider::None => {
            out.push_str(DATABASE_SESSION_CALLBACKS)
        }
    }
    out.push_str("} satisfies NextAuthConfig;\n");
    out
}

/// `src/server/auth/{config,index}.ts` and the NextAuth route handler
pub fn auth_config(opts: &ProjectOptions) -> Vec<FileWrite> {
    vec![
        FileWrite::new(
            "src/server/auth/config.ts",
            render_auth_config(opts.auth_provider),
        ),
        FileWrite::new("src/server/auth/index.ts", AUTH_INDEX),
        FileWrite::new("src/app/api/auth/[...nextauth]/route.ts", AUTH_ROUTE),
    ]
}

pub fn uses_credentials(opts: &ProjectOptions) -> bool {
    opts.auth_provider == AuthProvider::Credentials
}

const PASSWORD_HELPERS: &str = r#"import bcrypt from "bcryptjs";

const SALT_ROUNDS = 12;

export async function hashPassword(password: string): Promise<string> {
  return bcrypt.hash(password, SALT_ROUNDS);
}

export async function verifyPassword(
  password: string,
  hash: string,
): Promise<boolean> {
  return bcrypt.compare(password, hash);
}
"#;

const AUTH_ACTIONS: &str = r#""use server";

import { AuthError } from "next-auth";
import { z } from "zod";

import { signIn } from "~/server/auth";
import { hashPassword } from "~/server/auth/password";
import { db } from "~/server/db";

const registerSchema = z.object({
  name: z.string().min(1).max(100),
  email: z.string().email(),
  password: z.string().min(8),
});

export type FormState = { error?: string } | undefined;

export async function registerUser(
  _prev: FormState,
  formData: FormData,
): Promise<FormState> {
  const parsed = registerSchema.safeParse(Object.fromEntries(formData));
  if (!parsed.success) {
    return {
      error:
        "Please provide a name, a valid email and a password of at least 8 characters.",
    };
  }

  const existing = await db.user.findUnique({
    where: { email: parsed.data.email },
  });
  if (existing) {
    return { error: "An account with this email already exists." };
  }

  await db.user.create({
    data: {
      name: parsed.data.name,
      email: parsed.data.email,
      password: await hashPassword(parsed.data.password),
    },
  });

  return loginUser(undefined, formData);
}

export async function loginUser(
  _prev: FormState,
  formData: FormData,
): Promise<FormState> {
  try {
    await signIn("credentials", {
      email: formData.get("email"),
      password: formData.get("password"),
      redirectTo: "/",
    });
  } catch (error) {
    if (error instanceof AuthError) {
      return { error: "Invalid email or password." };
    }
    throw error;
  }
  return undefined;
}
"#;

const REGISTER_PAGE: &str = r#""use client";

import Link from "next/link";
import { useActionState } from "react";

import { Button } from "~/components/ui/button";
import {
  Card,
  CardContent,
  CardDescription,
  CardHeader,
  CardTitle,
} from "~/components/ui/card";
import { Input } from "~/components/ui/input";
import { Label } from "~/components/ui/label";
import { registerUser } from "../actions";

export default function RegisterPage() {
  const [state, formAction, pending] = useActionState(registerUser, undefined);

  return (
    <main className="flex min-h-screen items-center justify-center p-4">
      <Card className="w-full max-w-sm">
        <CardHeader>
          <CardTitle>Create an account</CardTitle>
          <CardDescription>Sign up with your email and a password.</CardDescription>
        </CardHeader>
        <CardContent>
          <form action={formAction} className="space-y-4">
            <div className="space-y-2">
              <Label htmlFor="name">Name</Label>
              <Input id="name" name="name" required />
            </div>
            <div className="space-y-2">
              <Label htmlFor="email">Email</Label>
              <Input id="email" name="email" type="email" required />
            </div>
            <div className="space-y-2">
              <Label htmlFor="password">Password</Label>
              <Input id="password" name="password" type="password" minLength={8} required />
            </div>
            {state?.error && (
              <p className="text-sm text-destructive">{state.error}</p>
            )}
            <Button type="submit" className="w-full" disabled={pending}>
              {pending ? "Creating account..." : "Create account"}
            </Button>
          </form>
          <p className="mt-4 text-center text-sm text-muted-foreground">
            Already have an account?{" "}
            <Link href="/login" className="underline">
              Sign in
            </Link>
          </p>
        </CardContent>
      </Card>
    </main>
  );
}
"#;

/// Password hashing, register/login server actions and the register page
pub fn credentials_flow(_opts: &ProjectOptions) -> Vec<FileWrite> {
    vec![
        FileWrite::new("src/server/auth/password.ts", PASSWORD_HELPERS),
        FileWrite::new("src/app/(auth)/actions.ts", AUTH_ACTIONS),
        FileWrite::new("src/app/(auth)/register/page.tsx", REGISTER_PAGE),
    ]
}

const CARD_IMPORTS: &str = r#"import {
  Card,
  CardContent,
  CardDescription,
  CardHeader,
  CardTitle,
} from "~/components/ui/card";
"#;

const CREDENTIALS_LOGIN_PAGE: &str = r#""use client";

import Link from "next/link";
import { useActionState } from "react";

import { Button } from "~/components/ui/button";
import {
  Card,
  CardContent,
  CardDescription,
  CardHeader,
  CardTitle,
} from "~/components/ui/card";
import { Input } from "~/components/ui/input";
import { Label } from "~/components/ui/label";
import { loginUser } from "../actions";

export default function LoginPage() {
  const [state, formAction, pending] = useActionState(loginUser, undefined);

  return (
    <main className="flex min-h-screen items-center justify-center p-4">
      <Card className="w-full max-w-sm">
        <CardHeader>
          <CardTitle>Sign in</CardTitle>
          <CardDescription>Use your email and password.</CardDescription>
        </CardHeader>
        <CardContent>
          <form action={formAction} className="space-y-4">
            <div className="space-y-2">
              <Label htmlFor="email">Email</Label>
              <Input id="email" name="email" type="email" required />
            </div>
            <div className="space-y-2">
              <Label htmlFor="password">Password</Label>
              <Input id="password" name="password" type="password" required />
            </div>
            {state?.error && (
              <p className="text-sm text-destructive">{state.error}</p>
            )}
            <Button type="submit" className="w-full" disabled={pending}>
              {pending ? "Signing in..." : "Sign in"}
            </Button>
          </form>
          <p className="mt-4 text-center text-sm text-muted-foreground">
            No account yet?{" "}
            <Link href="/register" className="underline">
              Create one
            </Link>
          </p>
        </CardContent>
      </Card>
    </main>
  );
}
"#;

/// Server-rendered login page around a provider-specific card body
fn server_login_page(description: &str, body: &str, extra_imports: &str) -> String {
    let mut out = String::new();
    out.push_str("import { redirect } from \"next/navigation\";\n\n");
    out.push_str("import { OAuthButtons } from \"~/components/auth/oauth-buttons\";\n");
    out.push_str(extra_imports);
    out.push_str(CARD_IMPORTS);
    out.push_str("import { auth } from \"~/server/auth\";\n\n");
    out.push_str("export default async function LoginPage() {\n");
    out.push_str("  const session = await auth();\n");
    out.push_str("  if (session) redirect(\"/\");\n\n");
    out.push_str("  return (\n");
    out.push_str("    <main className=\"flex min-h-screen items-center justify-center p-4\">\n");
    out.push_str("      <Card className=\"w-full max-w-sm\">\n");
    out.push_str("        <CardHeader>\n");
    out.push_str("          <CardTitle>Sign in</CardTitle>\n");
    out.push_str(&format!(
        "          <CardDescription>{}</CardDescription>\n",
        description
    ));
    out.push_str("        </CardHeader>\n");
    out.push_str("        <CardContent className=\"space-y-2\">\n");
    out.push_str(body);
    out.push_str("        </CardContent>\n");
    out.push_str("      </Card>\n");
    out.push_str("    </main>\n");
    out.push_str("  );\n");
    out.push_str("}\n");
    out
}

fn login_page(provider: AuthProvider) -> String {
    match provider {
        AuthProvider::Discord | AuthProvider::Github | AuthProvider::Google => server_login_page(
            &format!("Continue with your {} account.", provider.display_name()),
            "          <OAuthButtons />\n",
            "",
        ),
        AuthProvider::Credentials => CREDENTIALS_LOGIN_PAGE.to_string(),
        AuthProvider::None => server_login_page(
            "Authentication has not been set up for this project yet.",
            concat!(
                "          <Button className=\"w-full\" disabled>\n",
                "            Sign-in is not configured\n",
                "          </Button>\n",
                "          <OAuthButtons />\n",
            ),
            "import { Button } from \"~/components/ui/button\";\n",
        ),
    }
}

const SIGN_OUT_BUTTON: &str = r#"import { Button } from "~/components/ui/button";
import { signOut } from "~/server/auth";

export function SignOutButton() {
  return (
    <form
      action={async () => {
        "use server";
        await signOut({ redirectTo: "/" });
      }}
    >
      <Button type="submit" variant="outline" size="sm">
        Sign out
      </Button>
    </form>
  );
}
"#;

/// Login page and sign-out button
pub fn auth_pages(opts: &ProjectOptions) -> Vec<FileWrite> {
    vec![
        FileWrite::new("src/app/(auth)/login/page.tsx", login_page(opts.auth_provider)),
        FileWrite::new("src/components/auth/sign-out-button.tsx", SIGN_OUT_BUTTON),
    ]
}

const NO_OAUTH_BUTTONS: &str = r#"/**
 * This project does not use OAuth providers, so there is nothing to render.
 */
export function OAuthButtons() {
  return null;
}
"#;

fn oauth_button_markup(provider_id: &str, label: &str) -> String {
    let mut out = String::new();
    out.push_str("import { Button } from \"~/components/ui/button\";\n");
    out.push_str("import { signIn } from \"~/server/auth\";\n\n");
    out.push_str("export function OAuthButtons() {\n");
    out.push_str("  return (\n");
    out.push_str("    <form\n");
    out.push_str("      action={async () => {\n");
    out.push_str("        \"use server\";\n");
    out.push_str(&format!(
        "        await signIn(\"{}\", {{ redirectTo: \"/\" }});\n",
        provider_id
    ));
    out.push_str("      }}\n");
    out.push_str("    >\n");
    out.push_str("      <Button type=\"submit\" className=\"w-full\">\n");
    out.push_str(&format!("        Continue with {}\n", label));
    out.push_str("      </Button>\n");
    out.push_str("    </form>\n");
    out.push_str("  );\n");
    out.push_str("}\n");
    out
}

/// `src/components/auth/oauth-buttons.tsx`
pub fn oauth_buttons(opts: &ProjectOptions) -> Vec<FileWrite> {
    let provider = opts.auth_provider;
    let contents = match provider {
        AuthProvider::Discord | AuthProvider::Github | AuthProvider::Google => {
            oauth_button_markup(provider.as_str(), provider.display_name())
        }
        AuthProvider::Credentials | AuthProvider::None => NO_OAUTH_BUTTONS.to_string(),
    };
    vec![FileWrite::new("src/components/auth/oauth-buttons.tsx", contents)]
}

pub fn has_protected_routes(opts: &ProjectOptions) -> bool {
    opts.template.has_admin() || opts.template.has_dashboard()
}

/// `src/middleware.ts`, redirecting signed-out visitors away from private areas
pub fn route_guard(opts: &ProjectOptions) -> Vec<FileWrite> {
    let mut prefixes = Vec::new();
    if opts.template.has_dashboard() {
        prefixes.push("/dashboard");
    }
    if opts.template.has_admin() {
        prefixes.push("/admin");
    }
    let matcher = prefixes
        .iter()
        .map(|p| format!("\"{}/:path*\"", p))
        .collect::<Vec<_>>()
        .join(", ");

    let mut out = String::new();
    out.push_str("import { NextResponse, type NextRequest } from \"next/server\";\n\n");
    out.push_str("// Only checks that a session cookie exists. Pages verify the session itself.\n");
    out.push_str("const SESSION_COOKIES = [\n");
    out.push_str("  \"authjs.session-token\",\n");
    out.push_str("  \"__Secure-authjs.session-token\",\n");
    out.push_str("];\n\n");
    out.push_str("export function middleware(request: NextRequest) {\n");
    out.push_str("  const hasSession = SESSION_COOKIES.some((name) => request.cookies.has(name));\n");
    out.push_str("  if (!hasSession) {\n");
    out.push_str("    const url = new URL(\"/login\", request.url);\n");
    out.push_str("    url.searchParams.set(\"callbackUrl\", request.nextUrl.pathname);\n");
    out.push_str("    return NextResponse.redirect(url);\n");
    out.push_str("  }\n");
    out.push_str("  return NextResponse.next();\n");
    out.push_str("}\n\n");
    out.push_str(&format!(
        "export const config = {{\n  matcher: [{}],\n}};\n",
        matcher
    ));

    vec![FileWrite::new("src/middleware.ts", out)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::test_support::options;
    use crate::options::{Database, Template};

    fn file<'a>(files: &'a [FileWrite], path: &str) -> &'a str {
        &files
            .iter()
            .find(|f| f.path == path)
            .unwrap_or_else(|| panic!("{} not rendered", path))
            .contents
    }

    #[test]
    fn test_auth_config_is_complete_for_every_provider() {
        for provider in AuthProvider::ALL {
            let opts = options(Template::Barebones, Database::Sqlite, provider, false);
            let files = auth_config(&opts);
            let config = file(&files, "src/server/auth/config.ts");
            let index = file(&files, "src/server/auth/index.ts");

            assert!(config.contains("export const authConfig"), "{}", provider);
            assert!(config.contains("providers: ["), "{}", provider);
            assert!(config.contains("} satisfies NextAuthConfig;"), "{}", provider);
            assert!(index.contains("export { auth, handlers, signIn, signOut }"));

            for marker in ["{{", "}}", "__", "undefined_provider"] {
                assert!(!config.contains(marker), "{} contains {}", provider, marker);
            }
            assert_eq!(
                config.matches('{').count(),
                config.matches('}').count(),
                "unbalanced braces for {}",
                provider
            );
        }
    }

    #[test]
    fn test_none_provider_keeps_exports_without_providers() {
        let opts = options(Template::Barebones, Database::Sqlite, AuthProvider::None, false);
        let files = auth_config(&opts);
        let config = file(&files, "src/server/auth/config.ts");
        assert!(!config.contains("next-auth/providers"));

        let pages = auth_pages(&opts);
        let login = file(&pages, "src/app/(auth)/login/page.tsx");
        assert!(login.contains("Sign-in is not configured"));
        assert!(login.contains("import { Button }"));
    }

    #[test]
    fn test_credentials_generates_password_flow() {
        let opts = options(Template::FullSystem, Database::Postgresql, AuthProvider::Credentials, true);
        assert!(uses_credentials(&opts));

        let files = credentials_flow(&opts);
        assert!(file(&files, "src/server/auth/password.ts").contains("bcrypt.hash"));
        let actions = file(&files, "src/app/(auth)/actions.ts");
        assert!(actions.contains("export async function registerUser"));
        assert!(actions.contains("export async function loginUser"));
        assert!(actions.contains("hashPassword"));

        let config = render_auth_config(AuthProvider::Credentials);
        assert!(config.contains("verifyPassword"));
        assert!(config.contains("strategy: \"jwt\""));

        let buttons = oauth_buttons(&opts);
        let markup = &buttons[0].contents;
        assert!(!markup.contains("signIn("));
        assert!(!markup.contains("<Button"));
        assert!(markup.contains("return null"));
    }

    #[test]
    fn test_oauth_buttons_use_provider_id() {
        let opts = options(Template::Barebones, Database::Sqlite, AuthProvider::Github, false);
        let buttons = oauth_buttons(&opts);
        assert!(buttons[0].contents.contains("signIn(\"github\""));
        assert!(buttons[0].contents.contains("Continue with GitHub"));
        assert!(!uses_credentials(&opts));
    }

    #[test]
    fn test_route_guard_matches_template_areas() {
        let opts = options(Template::Dashboard, Database::Sqlite, AuthProvider::Discord, false);
        let guard = route_guard(&opts).remove(0).contents;
        assert!(guard.contains("\"/dashboard/:path*\""));
        assert!(!guard.contains("/admin"));

        let opts = options(Template::FullSystem, Database::Sqlite, AuthProvider::Discord, false);
        let guard = route_guard(&opts).remove(0).contents;
        assert!(guard.contains("\"/dashboard/:path*\", \"/admin/:path*\""));

        let opts = options(Template::Barebones, Database::Sqlite, AuthProvider::Discord, false);
        assert!(!has_protected_routes(&opts));
    }
}
