//! End-to-end invocation tests against configuration files on disk and an
//! in-memory database.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::rc::Rc;

use tempfile::TempDir;

use tds::app::Application;
use tds::auth::LocalActor;
use tds::commands::{Capability, CommandContext, HandlerRegistry};
use tds::config::ConfigPaths;
use tds::db::{ConnectionDescriptor, Connector, Database, Project};
use tds::params::ParameterBag;
use tds::render::{RenderData, Renderer, TextRenderer};
use tds::ui::{MockUI, NonInteractiveUI, OutputMode, UserInterface};
use tds::{ErrorKind, Result, TdsError};

const DEPLOY_CONFIG: &str = r#"
env:
  environment: staging
repo:
  build_host: ci01
  url: https://repo.example.com
"#;

const DBACCESS_DEV: &str = r#"
db:
  user: tds_dev
  password: dev-secret
  hostname: db01
  db_name: tagopsdb
"#;

fn setup_config() -> TempDir {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("deploy.yml"), DEPLOY_CONFIG).unwrap();
    fs::write(temp.path().join("dbaccess.dev.yml"), DBACCESS_DEV).unwrap();
    temp
}

/// Records every query and every connection.
#[derive(Clone, Default)]
struct FakeDb {
    queries: Rc<RefCell<Vec<Vec<String>>>>,
    connections: Rc<RefCell<Vec<ConnectionDescriptor>>>,
}

impl Database for FakeDb {
    fn list_projects(&self, names: &[String]) -> Result<Vec<Project>> {
        self.queries.borrow_mut().push(names.to_vec());
        Ok(names
            .iter()
            .enumerate()
            .map(|(i, name)| Project {
                id: i as i64 + 1,
                name: name.clone(),
            })
            .collect())
    }
}

impl Connector for FakeDb {
    fn connect(&self, descriptor: &ConnectionDescriptor) -> Result<Box<dyn Database>> {
        self.connections.borrow_mut().push(descriptor.clone());
        Ok(Box::new(self.clone()))
    }
}

/// Keeps whatever it is asked to render.
#[derive(Default)]
struct RecordingRenderer {
    rendered: RefCell<Vec<RenderData>>,
}

impl Renderer for RecordingRenderer {
    fn render(&self, data: &RenderData, _ui: &mut dyn UserInterface) -> Result<()> {
        self.rendered.borrow_mut().push(data.clone());
        Ok(())
    }
}

struct Foo {
    calls: Rc<RefCell<Vec<String>>>,
}

impl Capability for Foo {
    fn name(&self) -> &'static str {
        "Foo"
    }

    fn operations(&self) -> &'static [&'static str] {
        &["do_thing", "fail"]
    }

    fn invoke(&self, operation: &str, ctx: &mut CommandContext<'_>) -> Result<Option<RenderData>> {
        self.calls.borrow_mut().push(operation.to_string());
        match operation {
            "fail" => Err(TdsError::Other(anyhow::anyhow!("handler exploded"))),
            _ => Ok(Some(RenderData::new().section(
                "environment",
                serde_json::Value::from(ctx.params.get_str("environment").unwrap_or_default()),
            ))),
        }
    }
}

fn app(temp: &TempDir, groups: &[&str], db: &FakeDb) -> Application {
    let actor = LocalActor::new("alice", groups.iter().map(|g| g.to_string()).collect());
    Application::new(ConfigPaths::new(temp.path()))
        .with_actor(actor)
        .with_connector(db.clone())
}

fn args(command: &str, subcommand: &str) -> ParameterBag {
    [("command_name", command), ("subcommand_name", subcommand)]
        .into_iter()
        .collect()
}

#[test]
fn repository_list_end_to_end() {
    let temp = setup_config();
    let db = FakeDb::default();
    let renderer = RecordingRenderer::default();
    let mut ui = MockUI::new();

    let mut params = args("repository", "list");
    params.insert("projects", vec!["proj1"]).unwrap();

    app(&temp, &["engteam"], &db)
        .run(params, &mut ui, &renderer)
        .unwrap();

    assert_eq!(*db.queries.borrow(), vec![vec!["proj1".to_string()]]);

    let rendered = renderer.rendered.borrow();
    assert_eq!(rendered.len(), 1);
    let projects = rendered[0].get("projects").unwrap();
    assert_eq!(projects[0]["name"], "proj1");
    assert_eq!(rendered[0].len(), 1);
}

#[test]
fn configured_credentials_open_the_session() {
    let temp = setup_config();
    let db = FakeDb::default();
    let mut ui = MockUI::new();

    app(&temp, &["engteam"], &db)
        .run(args("repository", "list"), &mut ui, &TextRenderer)
        .unwrap();

    let connections = db.connections.borrow();
    assert_eq!(connections.len(), 1);
    assert_eq!(connections[0].username, "tds_dev");
    assert_eq!(connections[0].password, "dev-secret");
    assert_eq!(connections[0].host, "db01");
    assert_eq!(connections[0].database, "tagopsdb");
    assert_eq!(connections[0].recycle.as_secs(), 3600);
    assert!(ui.prompts_shown().is_empty());
}

#[test]
fn dbuser_prompts_for_password() {
    let temp = setup_config();
    let db = FakeDb::default();
    let mut ui = MockUI::new();
    ui.set_prompt_response("db_password", "typed-secret");

    let mut params = args("repository", "list");
    params.insert("dbuser", "alice_admin").unwrap();

    app(&temp, &["engteam"], &db)
        .run(params, &mut ui, &TextRenderer)
        .unwrap();

    let connections = db.connections.borrow();
    assert_eq!(connections[0].username, "alice_admin");
    assert_eq!(connections[0].password, "typed-secret");
    assert_eq!(connections[0].host, "db01");
    assert_eq!(ui.prompts_shown(), ["db_password"]);
}

#[test]
fn non_interactive_dbuser_without_answer_fails_before_connecting() {
    let temp = setup_config();
    let db = FakeDb::default();
    let mut ui = NonInteractiveUI::with_overrides(OutputMode::Normal, HashMap::new());

    let mut params = args("repository", "list");
    params.insert("dbuser", "x").unwrap();

    let err = app(&temp, &["engteam"], &db)
        .run(params, &mut ui, &TextRenderer)
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Configuration);
    assert_eq!(err.kind().exit_code(), 3);
    assert!(err.to_string().contains("Cannot prompt"));
    assert!(err.to_string().contains("TDS_PROMPT_DB_PASSWORD"));
    assert!(db.connections.borrow().is_empty());
}

#[test]
fn non_interactive_dbuser_reads_answer_from_environment() {
    let temp = setup_config();
    let db = FakeDb::default();
    let overrides = HashMap::from([(
        "TDS_PROMPT_DB_PASSWORD".to_string(),
        "scripted-secret".to_string(),
    )]);
    let mut ui = NonInteractiveUI::with_overrides(OutputMode::Normal, overrides);

    let mut params = args("repository", "list");
    params.insert("dbuser", "x").unwrap();

    app(&temp, &["engteam"], &db)
        .run(params, &mut ui, &TextRenderer)
        .unwrap();

    let connections = db.connections.borrow();
    assert_eq!(connections[0].username, "x");
    assert_eq!(connections[0].password, "scripted-secret");
}

#[test]
fn unreadable_deploy_config_is_a_configuration_error() {
    let temp = TempDir::new().unwrap();
    fs::create_dir(temp.path().join("deploy.yml")).unwrap();
    let db = FakeDb::default();
    let mut ui = MockUI::new();

    let err = app(&temp, &["engteam"], &db)
        .run(args("repository", "list"), &mut ui, &TextRenderer)
        .unwrap_err();

    assert!(matches!(err, TdsError::ConfigReadError { .. }));
    assert_eq!(err.kind(), ErrorKind::Configuration);
    assert!(db.connections.borrow().is_empty());
}

#[test]
fn repository_list_override_bypasses_convention() {
    let temp = setup_config();
    let db = FakeDb::default();
    let mut ui = MockUI::new();

    // No Repository capability is registered; only the override can answer.
    let registry = HandlerRegistry::new().with_override(
        "repository",
        "list",
        tds::commands::exec_repository_list,
    );

    app(&temp, &["engteam"], &db)
        .with_registry(registry)
        .run(args("repository", "list"), &mut ui, &TextRenderer)
        .unwrap();

    assert_eq!(db.queries.borrow().len(), 1);
    assert!(ui.has_output("No projects found"));
}

#[test]
fn repository_list_requires_dev() {
    let temp = setup_config();
    fs::write(temp.path().join("dbaccess.disabled.yml"), DBACCESS_DEV).unwrap();
    let db = FakeDb::default();
    let mut ui = MockUI::new();

    let err = app(&temp, &["tdsdisabled"], &db)
        .run(args("repository", "list"), &mut ui, &TextRenderer)
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Access);
    assert!(err.to_string().contains("alice"));
    assert!(db.queries.borrow().is_empty());
}

#[test]
fn convention_resolves_capability_operation() {
    let temp = setup_config();
    let db = FakeDb::default();
    let renderer = RecordingRenderer::default();
    let mut ui = MockUI::new();
    let calls = Rc::new(RefCell::new(Vec::new()));

    let registry = HandlerRegistry::standard().with_capability(Foo {
        calls: calls.clone(),
    });

    app(&temp, &["engteam"], &db)
        .with_registry(registry)
        .run(args("foo", "do-thing"), &mut ui, &renderer)
        .unwrap();

    assert_eq!(*calls.borrow(), ["do_thing"]);
    let rendered = renderer.rendered.borrow();
    assert_eq!(
        rendered[0].get("environment"),
        Some(&serde_json::Value::from("staging"))
    );
}

#[test]
fn unknown_capability_is_unresolved() {
    let temp = setup_config();
    let db = FakeDb::default();
    let mut ui = MockUI::new();

    let err = app(&temp, &["engteam"], &db)
        .run(args("foo", "do-thing"), &mut ui, &TextRenderer)
        .unwrap_err();

    assert!(matches!(err, TdsError::UnresolvedCommand { .. }));
    assert_eq!(err.kind(), ErrorKind::UnresolvedCommand);
}

#[test]
fn handler_errors_propagate_unchanged() {
    let temp = setup_config();
    let db = FakeDb::default();
    let mut ui = MockUI::new();
    let calls = Rc::new(RefCell::new(Vec::new()));

    let err = app(&temp, &["engteam"], &db)
        .with_registry(HandlerRegistry::new().with_capability(Foo {
            calls: calls.clone(),
        }))
        .run(args("foo", "fail"), &mut ui, &TextRenderer)
        .unwrap_err();

    assert_eq!(err.to_string(), "handler exploded");
    assert_eq!(err.kind(), ErrorKind::Handler);
    assert_eq!(*calls.borrow(), ["fail"]);
}

#[test]
fn exclusive_options_fail_before_dispatch() {
    let temp = setup_config();
    let db = FakeDb::default();
    let mut ui = MockUI::new();

    let mut params = args("repository", "list");
    params.insert("hosts", vec!["web01"]).unwrap();
    params.insert("all_apptypes", true).unwrap();

    let err = app(&temp, &["engteam"], &db)
        .run(params, &mut ui, &TextRenderer)
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Configuration);
    assert!(db.connections.borrow().is_empty());
    assert!(db.queries.borrow().is_empty());
}

#[test]
fn missing_credentials_file_is_a_configuration_error() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("deploy.yml"), DEPLOY_CONFIG).unwrap();
    let db = FakeDb::default();
    let mut ui = MockUI::new();

    let err = app(&temp, &["engteam"], &db)
        .run(args("repository", "list"), &mut ui, &TextRenderer)
        .unwrap_err();

    assert!(matches!(err, TdsError::ConfigNotFound { .. }));
    assert!(err.to_string().contains("dbaccess.dev.yml"));
    assert!(db.connections.borrow().is_empty());
}

#[test]
fn stage_operator_reads_stage_credentials() {
    let temp = setup_config();
    fs::write(
        temp.path().join("dbaccess.stage.yml"),
        DBACCESS_DEV.replace("tds_dev", "tds_stage"),
    )
    .unwrap();
    let db = FakeDb::default();
    let mut ui = MockUI::new();

    app(&temp, &["stageteam"], &db)
        .run(args("auth", "show-level"), &mut ui, &TextRenderer)
        .unwrap();

    assert_eq!(db.connections.borrow()[0].username, "tds_stage");
    assert!(ui.has_output("user_level: stage"));
    assert!(ui.has_output("explicit: false"));
}
