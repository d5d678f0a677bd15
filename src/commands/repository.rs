//! `repository` commands.

use crate::auth::{AccessLevel, Authorizer};
use crate::db::{Database, Project};
use crate::error::Result;
use crate::render::RenderData;

use super::{Capability, CommandContext};

/// Project repository queries.
#[derive(Debug, Default, Clone, Copy)]
pub struct Repository;

impl Repository {
    /// Projects named in `names`, or all of them when `names` is empty.
    pub fn list(db: &dyn Database, names: &[String]) -> Result<Vec<Project>> {
        db.list_projects(names)
    }
}

impl Capability for Repository {
    fn name(&self) -> &'static str {
        "Repository"
    }

    fn operations(&self) -> &'static [&'static str] {
        &["list"]
    }

    fn invoke(&self, operation: &str, ctx: &mut CommandContext<'_>) -> Result<Option<RenderData>> {
        match operation {
            "list" => {
                Authorizer::require(ctx.user_level(), AccessLevel::Dev, ctx.account()?)?;
                let names = ctx.params.get_strings("projects");
                let projects = Self::list(ctx.session.db(), &names)?;
                Ok(Some(RenderData::new().serialized("projects", &projects)?))
            }
            _ => Err(super::CommandId::new("repository", operation).unresolved()),
        }
    }
}

/// Override for `repository list`.
///
/// Requires at least `dev` before touching the database, then renders the
/// listing directly.
pub fn exec_repository_list(ctx: &mut CommandContext<'_>) -> Result<()> {
    Authorizer::require(ctx.user_level(), AccessLevel::Dev, ctx.account()?)?;

    let names = ctx.params.get_strings("projects");
    tracing::debug!("Listing projects {:?}", names);
    let projects = Repository::list(ctx.session.db(), &names)?;

    let data = RenderData::new().serialized("projects", &projects)?;
    ctx.render(&data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{ConnectionDescriptor, Session, RECYCLE_INTERVAL};
    use crate::params::ParameterBag;
    use crate::render::TextRenderer;
    use crate::ui::MockUI;
    use crate::TdsError;

    struct Fixed;

    impl Database for Fixed {
        fn list_projects(&self, names: &[String]) -> Result<Vec<Project>> {
            let all = [(1, "tagconfig"), (2, "tds")];
            Ok(all
                .iter()
                .filter(|(_, n)| names.is_empty() || names.iter().any(|x| x == n))
                .map(|(id, n)| Project {
                    id: *id,
                    name: n.to_string(),
                })
                .collect())
        }
    }

    fn session() -> Session {
        let descriptor = ConnectionDescriptor {
            username: "tds".into(),
            password: "secret".into(),
            host: "db01".into(),
            database: "tagopsdb".into(),
            recycle: RECYCLE_INTERVAL,
        };
        Session::new(Box::new(Fixed), &descriptor)
    }

    fn params(level: &str, projects: &[&str]) -> ParameterBag {
        let mut params = ParameterBag::new();
        params.insert("user", "alice").unwrap();
        params.insert("user_level", level).unwrap();
        let projects: Vec<serde_yaml::Value> = projects.iter().map(|p| (*p).into()).collect();
        params.insert("projects", projects).unwrap();
        params
    }

    #[test]
    fn override_lists_requested_projects() {
        let session = session();
        let mut params = params("dev", &["tds"]);
        let mut ui = MockUI::new();
        let mut ctx = CommandContext {
            params: &mut params,
            session: &session,
            ui: &mut ui,
            renderer: &TextRenderer,
        };

        exec_repository_list(&mut ctx).unwrap();

        assert!(ui.has_output("tds"));
        assert!(!ui.has_output("tagconfig"));
    }

    #[test]
    fn override_rejects_disabled_level() {
        let session = session();
        let mut params = params("disabled", &[]);
        let mut ui = MockUI::new();
        let mut ctx = CommandContext {
            params: &mut params,
            session: &session,
            ui: &mut ui,
            renderer: &TextRenderer,
        };

        let err = exec_repository_list(&mut ctx).unwrap_err();
        assert!(matches!(err, TdsError::InsufficientAccess { .. }));
        assert!(err.to_string().contains("alice"));
        assert!(ui.outputs().is_empty());
    }

    #[test]
    fn override_without_user_fails() {
        let session = session();
        let mut params = ParameterBag::new();
        params.insert("user_level", "admin").unwrap();
        let mut ui = MockUI::new();
        let mut ctx = CommandContext {
            params: &mut params,
            session: &session,
            ui: &mut ui,
            renderer: &TextRenderer,
        };

        let err = exec_repository_list(&mut ctx).unwrap_err();
        assert!(matches!(err, TdsError::ConfigValidationError { .. }));
        assert!(err.to_string().contains("'user'"));
        assert!(ui.outputs().is_empty());
    }

    #[test]
    fn capability_list_returns_render_data() {
        let session = session();
        let mut params = params("admin", &[]);
        let mut ui = MockUI::new();
        let mut ctx = CommandContext {
            params: &mut params,
            session: &session,
            ui: &mut ui,
            renderer: &TextRenderer,
        };

        let data = Repository.invoke("list", &mut ctx).unwrap().unwrap();
        let projects = data.get("projects").unwrap().as_array().unwrap();
        assert_eq!(projects.len(), 2);
        assert_eq!(projects[0]["name"], "tagconfig");
    }
}
