//! Add, edit and delete routes shared by every list collection.

use axum::{
    Form, Router,
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use percent_encoding::utf8_percent_encode;
use serde::Deserialize;
use std::sync::Arc;

use crate::{
    auth::CurrentSession,
    content::forms::{ItemForm, JourneyForm, ProjectForm, SkillGroupForm, save},
    error::AppError,
    portfolio::Portfolio,
    state::AppState,
    sync::{Decision, DeleteFlow, SyncedList},
    tabs::{KEY_ESCAPE, category_href},
};

use super::{Page, template};

/// Which project collection a route acts on. Ignored by the About lists.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Scope {
    pub category: Option<String>,
}

impl Scope {
    fn query(&self) -> String {
        match &self.category {
            Some(key) => format!("?category={}", utf8_percent_encode(key, KEY_ESCAPE)),
            None => String::new(),
        }
    }
}

/// A form whose items live in an admin-editable list.
pub trait Editable: ItemForm + Sync {
    /// Route prefix, e.g. `/admin/journey`.
    const PREFIX: &'static str;

    fn list(portfolio: &Portfolio, scope: &Scope) -> Option<Arc<SyncedList<Self::Item>>>;

    /// Where to go after a save or delete.
    fn return_to(scope: &Scope) -> String;

    /// Short text naming an item on the delete prompt.
    fn label(item: &Self::Item) -> String;
}

impl Editable for SkillGroupForm {
    const PREFIX: &'static str = "/admin/arsenal";

    fn list(portfolio: &Portfolio, _: &Scope) -> Option<Arc<SyncedList<Self::Item>>> {
        Some(portfolio.arsenal.clone())
    }

    fn return_to(_: &Scope) -> String {
        "/".to_string()
    }

    fn label(item: &Self::Item) -> String {
        item.title.clone()
    }
}

impl Editable for JourneyForm {
    const PREFIX: &'static str = "/admin/journey";

    fn list(portfolio: &Portfolio, _: &Scope) -> Option<Arc<SyncedList<Self::Item>>> {
        Some(portfolio.journey.clone())
    }

    fn return_to(_: &Scope) -> String {
        "/".to_string()
    }

    fn label(item: &Self::Item) -> String {
        format!("{} · {}", item.role, item.company)
    }
}

impl Editable for ProjectForm {
    const PREFIX: &'static str = "/admin/projects";

    fn list(portfolio: &Portfolio, scope: &Scope) -> Option<Arc<SyncedList<Self::Item>>> {
        portfolio.projects(scope.category.as_deref()?)
    }

    fn return_to(scope: &Scope) -> String {
        scope
            .category
            .as_deref()
            .map(category_href)
            .unwrap_or_else(|| "/".to_string())
    }

    fn label(item: &Self::Item) -> String {
        item.title.clone()
    }
}

pub fn routes<F: Editable>() -> Router<AppState> {
    let p = F::PREFIX;
    Router::new()
        .route(&format!("{p}/new"), get(new_form::<F>))
        .route(p, post(create::<F>))
        .route(&format!("{p}/{{id}}/edit"), get(edit_form::<F>))
        .route(&format!("{p}/{{id}}"), post(update::<F>))
        .route(
            &format!("{p}/{{id}}/delete"),
            get(confirm_delete::<F>).post(delete::<F>),
        )
}

/// The scoped list, hydrated. Unknown categories are a 404.
async fn mounted_list<F: Editable>(
    state: &AppState,
    scope: &Scope,
) -> Result<Arc<SyncedList<F::Item>>, AppError> {
    // Custom categories must be known before their projects resolve.
    state.portfolio.mount_shell().await;
    let list = F::list(&state.portfolio, scope).ok_or(AppError::NotFound)?;
    list.mount().await;
    Ok(list)
}

fn render_form<F: Editable>(
    page: &Page,
    form: &F,
    editing: bool,
    action: &str,
    scope: &Scope,
) -> Response {
    let heading = if editing {
        format!("Edit {}", F::NOUN)
    } else {
        format!("New {}", F::NOUN)
    };
    Html(
        template::form_page(
            &page.chrome(),
            &heading,
            action,
            &form.fields(),
            &F::return_to(scope),
        )
        .into_string(),
    )
    .into_response()
}

// ── Add ───────────────────────────────────────────────────────────────────────

async fn new_form<F: Editable>(
    State(state): State<AppState>,
    current: CurrentSession,
    Query(scope): Query<Scope>,
) -> Result<Response, AppError> {
    let page = Page::load(&state, &current, F::return_to(&scope)).await;
    mounted_list::<F>(&state, &scope).await?;
    let action = format!("{}{}", F::PREFIX, scope.query());
    Ok(render_form(&page, &F::default(), false, &action, &scope))
}

async fn create<F: Editable>(
    State(state): State<AppState>,
    current: CurrentSession,
    Query(scope): Query<Scope>,
    Form(form): Form<F>,
) -> Result<Response, AppError> {
    let list = mounted_list::<F>(&state, &scope).await?;
    if save(&list, None, form.clone()).is_some() {
        tracing::info!(collection = %list.key(), "{} added", F::NOUN);
        return Ok(Redirect::to(&F::return_to(&scope)).into_response());
    }
    // Missing required fields: nothing is written, the form comes back as sent.
    let page = Page::load(&state, &current, F::return_to(&scope)).await;
    let action = format!("{}{}", F::PREFIX, scope.query());
    Ok(render_form(&page, &form, false, &action, &scope))
}

// ── Edit ──────────────────────────────────────────────────────────────────────

async fn edit_form<F: Editable>(
    State(state): State<AppState>,
    current: CurrentSession,
    Path(id): Path<String>,
    Query(scope): Query<Scope>,
) -> Result<Response, AppError> {
    let page = Page::load(&state, &current, F::return_to(&scope)).await;
    let list = mounted_list::<F>(&state, &scope).await?;
    let item = list.get(&id).ok_or(AppError::NotFound)?;
    let action = format!("{}/{}{}", F::PREFIX, id, scope.query());
    Ok(render_form(&page, &F::from_item(&item), true, &action, &scope))
}

async fn update<F: Editable>(
    State(state): State<AppState>,
    current: CurrentSession,
    Path(id): Path<String>,
    Query(scope): Query<Scope>,
    Form(form): Form<F>,
) -> Result<Response, AppError> {
    let list = mounted_list::<F>(&state, &scope).await?;
    if save(&list, Some(&id), form.clone()).is_some() {
        tracing::info!(collection = %list.key(), id = %id, "{} edited", F::NOUN);
        return Ok(Redirect::to(&F::return_to(&scope)).into_response());
    }
    let page = Page::load(&state, &current, F::return_to(&scope)).await;
    let action = format!("{}/{}{}", F::PREFIX, id, scope.query());
    Ok(render_form(&page, &form, true, &action, &scope))
}

// ── Delete ────────────────────────────────────────────────────────────────────

async fn confirm_delete<F: Editable>(
    State(state): State<AppState>,
    current: CurrentSession,
    Path(id): Path<String>,
    Query(scope): Query<Scope>,
) -> Result<Response, AppError> {
    let page = Page::load(&state, &current, F::return_to(&scope)).await;
    let list = mounted_list::<F>(&state, &scope).await?;
    let flow = DeleteFlow::Idle.request(id);
    let pending = flow.pending_id().unwrap_or_default();
    let item = list.get(pending).ok_or(AppError::NotFound)?;

    let action = format!("{}/{}/delete{}", F::PREFIX, pending, scope.query());
    Ok(Html(
        template::confirm_delete_page(
            &page.chrome(),
            F::NOUN,
            &F::label(&item),
            &action,
            &F::return_to(&scope),
        )
        .into_string(),
    )
    .into_response())
}

#[derive(Deserialize)]
struct DecisionForm {
    decision: Decision,
}

async fn delete<F: Editable>(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(scope): Query<Scope>,
    Form(form): Form<DecisionForm>,
) -> Result<Response, AppError> {
    let list = mounted_list::<F>(&state, &scope).await?;
    let flow = DeleteFlow::Idle.request(id).resolve(form.decision);
    if let Some(ticket) = list.remove_item(&flow) {
        tracing::info!(collection = %list.key(), id = ?flow.applied_id(), "{} deleted", F::NOUN);
        drop(ticket);
    }
    Ok(Redirect::to(&F::return_to(&scope)).into_response())
}
