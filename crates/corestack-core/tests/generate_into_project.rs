//! Integration tests for sub-generators run against a freshly created project

use corestack_core::scaffolds::{self, ProjectContext, ScaffoldRequest};
use corestack_core::{LifecycleRunner, ProjectOptions, ScaffoldError, ScriptedRunner, SilentReporter};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

async fn created_project(temp: &TempDir) -> PathBuf {
    let opts = ProjectOptions::builder("shop")
        .base_dir(temp.path())
        .template("full-system")
        .database("postgresql")
        .skip_install(true)
        .init_git(false)
        .build()
        .unwrap()
        .options;
    LifecycleRunner::new(ScriptedRunner::new(), SilentReporter)
        .run(&opts)
        .await
        .unwrap();
    opts.project_path
}

#[tokio::test]
async fn test_generate_outside_project_is_refused() {
    let temp = TempDir::new().unwrap();
    let err = ProjectContext::locate(temp.path()).await.unwrap_err();
    assert!(matches!(err, ScaffoldError::NotAProject { .. }));
    assert!(err.is_configuration());
}

#[tokio::test]
async fn test_crud_extends_generated_schema() {
    let temp = TempDir::new().unwrap();
    let root = created_project(&temp).await;
    let ctx = ProjectContext::locate(&root.join("src/app")).await.unwrap();
    assert_eq!(ctx.root, root);

    let request = ScaffoldRequest::Crud {
        name: "order".to_string(),
        fields: "reference:string,notes:text,total:float,shipped:boolean".to_string(),
        protected: true,
        admin: true,
        page: true,
        api: true,
    };
    let outcome = scaffolds::run(&ctx, &request).await.unwrap();

    let schema = fs::read_to_string(root.join("prisma/schema.prisma")).unwrap();
    assert!(schema.contains("model User {"));
    assert!(schema.contains("model Order {"));
    assert!(schema.contains("@db.Text"));

    assert!(root.join("src/server/api/routers/order.ts").is_file());
    assert!(root.join("src/app/admin/order/page.tsx").is_file());
    assert!(outcome
        .hints
        .iter()
        .any(|h| h.contains("order: orderRouter,")));
}

#[tokio::test]
async fn test_unknown_field_type_writes_nothing() {
    let temp = TempDir::new().unwrap();
    let root = created_project(&temp).await;
    let ctx = ProjectContext::locate(&root).await.unwrap();
    let before = fs::read_to_string(root.join("prisma/schema.prisma")).unwrap();

    let request = ScaffoldRequest::Crud {
        name: "ticket".to_string(),
        fields: "title:uuid".to_string(),
        protected: false,
        admin: false,
        page: true,
        api: true,
    };
    let err = scaffolds::run(&ctx, &request).await.unwrap_err();
    assert!(err.is_configuration());

    let after = fs::read_to_string(root.join("prisma/schema.prisma")).unwrap();
    assert_eq!(before, after);
    assert!(!root.join("src/server/api/routers/ticket.ts").exists());
}

#[tokio::test]
async fn test_page_route_cannot_escape_project() {
    let temp = TempDir::new().unwrap();
    let root = created_project(&temp).await;
    let ctx = ProjectContext::locate(&root).await.unwrap();

    let request = ScaffoldRequest::Page {
        name: "sneaky".to_string(),
        route: Some("../../outside".to_string()),
        protected: false,
        admin: false,
    };
    assert!(scaffolds::run(&ctx, &request).await.is_err());
    assert!(!temp.path().join("outside").exists());
}
