use axum::{
    Form,
    body::Body,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Redirect, Response},
};
use std::io;
use tokio_util::io::ReaderStream;

use crate::{
    auth::CurrentSession,
    content::forms::{CategoryForm, ResumeForm},
    error::AppError,
    state::AppState,
    tabs::{self, category_href},
};

use super::{
    Page,
    template::{self, AboutView},
};

// ── Public pages ──────────────────────────────────────────────────────────────

pub async fn about(State(state): State<AppState>, current: CurrentSession) -> Response {
    let page = Page::load(&state, &current, "/").await;
    let portfolio = &state.portfolio;
    portfolio.mount_about().await;

    let arsenal = portfolio.arsenal.snapshot();
    let journey = portfolio.journey.snapshot();
    let resume_href = portfolio.resume_href();
    let view = AboutView {
        resume_href: &resume_href,
        arsenal: &arsenal,
        journey: &journey,
    };
    Html(template::about_page(&page.chrome(), &view).into_string()).into_response()
}

pub async fn category(
    State(state): State<AppState>,
    current: CurrentSession,
    Path(storage_key): Path<String>,
) -> Result<Response, AppError> {
    let page = Page::load(&state, &current, category_href(&storage_key)).await;
    let category = state
        .portfolio
        .category(&storage_key)
        .ok_or(AppError::NotFound)?;
    let list = state
        .portfolio
        .projects(&storage_key)
        .ok_or(AppError::NotFound)?;
    list.mount().await;

    let projects = list.snapshot();
    let body = template::category_page(&page.chrome(), &category, &projects);
    Ok(Html(body.into_string()).into_response())
}

/// The bundled resume file, used when no link override is stored.
pub async fn resume_file(State(state): State<AppState>) -> Result<Response, AppError> {
    let path = state.site.resume_path.as_ref().ok_or(AppError::NotFound)?;
    let file = tokio::fs::File::open(path).await.map_err(io_err)?;
    let content_length = file.metadata().await.map_err(AppError::Io)?.len();

    let mime: &'static str = mime_guess::from_path(path)
        .first_raw()
        .unwrap_or("application/octet-stream");

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, mime)
        .header(header::CONTENT_LENGTH, content_length)
        .body(Body::from_stream(ReaderStream::new(file)))
        .map_err(|e| AppError::Internal(e.to_string()))
}

fn io_err(e: io::Error) -> AppError {
    if e.kind() == io::ErrorKind::NotFound {
        AppError::NotFound
    } else {
        AppError::Io(e)
    }
}

// ── Resume link ───────────────────────────────────────────────────────────────

pub async fn resume_form(State(state): State<AppState>, current: CurrentSession) -> Response {
    let page = Page::load(&state, &current, "/").await;
    state.portfolio.resume.mount().await;
    let form = ResumeForm {
        link: state.portfolio.resume.snapshot(),
    };
    Html(
        template::form_page(
            &page.chrome(),
            "Update Resume Link",
            "/admin/resume",
            &form.fields(),
            "/",
        )
        .into_string(),
    )
    .into_response()
}

/// Stores the link as given. An empty link falls back to the bundled file.
pub async fn save_resume(State(state): State<AppState>, Form(form): Form<ResumeForm>) -> Response {
    let resume = &state.portfolio.resume;
    resume.mount().await;
    let link = form.link.trim().to_string();
    tracing::info!(empty = link.is_empty(), "resume link updated");
    drop(resume.mutate(link));
    Redirect::to("/").into_response()
}

// ── Domain tabs ───────────────────────────────────────────────────────────────

pub async fn tab_form(State(state): State<AppState>, current: CurrentSession) -> Response {
    let page = Page::load(&state, &current, "/admin/tabs").await;
    render_tab_form(&page, &CategoryForm::default())
}

pub async fn add_tab(
    State(state): State<AppState>,
    current: CurrentSession,
    Form(form): Form<CategoryForm>,
) -> Response {
    // Registered tabs must be hydrated before a new one is appended.
    state.portfolio.mount_shell().await;
    match tabs::add_category(&state.portfolio.custom_categories, form.clone()) {
        Some((created, _ticket)) => {
            Redirect::to(&category_href(&created.storage_key)).into_response()
        }
        None => {
            let page = Page::load(&state, &current, "/admin/tabs").await;
            render_tab_form(&page, &form)
        }
    }
}

fn render_tab_form(page: &Page, form: &CategoryForm) -> Response {
    Html(
        template::form_page(
            &page.chrome(),
            "Add Domain Tab",
            "/admin/tabs",
            &form.fields(),
            "/",
        )
        .into_string(),
    )
    .into_response()
}
