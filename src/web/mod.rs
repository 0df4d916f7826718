//! HTTP surface: public pages, the sign-in flow and the admin edit routes.

mod handlers;
mod items;
mod login;
pub mod template;

use axum::{
    Router,
    extract::Request,
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Redirect, Response},
    routing::get,
};
use std::sync::Arc;
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

use crate::{
    auth::CurrentSession,
    content::forms::{JourneyForm, ProjectForm, SkillGroupForm},
    error::AppError,
    state::{AppState, SiteConfig},
    tabs::Tab,
};

pub use items::{Editable, Scope};
use template::Chrome;

// ── Router ────────────────────────────────────────────────────────────────────

/// The complete application, layers included.
pub fn app(state: AppState) -> Router {
    // CatchPanicLayer is outermost so it recovers from panics anywhere in the stack.
    Router::new()
        .route("/healthz", get(|| async { StatusCode::OK }))
        .merge(router(state.clone()))
        .fallback(|| async { AppError::NotFound })
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::new())
}

pub fn router(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/", get(handlers::about))
        .route("/category/{storage_key}", get(handlers::category))
        .route("/resume", get(handlers::resume_file))
        .route("/admin/login", get(login::get_login).post(login::post_login))
        .route("/admin/login/cancel", get(login::cancel))
        .route("/admin/toggle", axum::routing::post(login::toggle));

    let protected = Router::new()
        .route(
            "/admin/resume",
            get(handlers::resume_form).post(handlers::save_resume),
        )
        .route("/admin/tabs", get(handlers::tab_form).post(handlers::add_tab))
        .merge(items::routes::<SkillGroupForm>())
        .merge(items::routes::<JourneyForm>())
        .merge(items::routes::<ProjectForm>())
        .route_layer(middleware::from_fn_with_state(state, require_admin));

    Router::new().merge(public).merge(protected)
}

// ── Admin gate ────────────────────────────────────────────────────────────────

async fn require_admin(current: CurrentSession, req: Request, next: Next) -> Response {
    if current.is_admin() {
        next.run(req).await
    } else {
        tracing::debug!(path = %req.uri().path(), "admin route refused");
        Redirect::to("/admin/login").into_response()
    }
}

// ── Page context ──────────────────────────────────────────────────────────────

/// Owned inputs for [`Chrome`], gathered once per request.
struct Page {
    site: Arc<SiteConfig>,
    tabs: Vec<Tab>,
    active: String,
    is_admin: bool,
    flash: Option<String>,
}

impl Page {
    /// Hydrates the navigation and takes the pending flash notice.
    async fn load(state: &AppState, current: &CurrentSession, active: impl Into<String>) -> Self {
        state.portfolio.mount_shell().await;
        let flash = match &current.token {
            Some(token) => state.sessions.take_flash(token).await,
            None => None,
        };
        Self {
            site: state.site.clone(),
            tabs: state.portfolio.tabs(),
            active: active.into(),
            is_admin: current.is_admin(),
            flash,
        }
    }

    fn chrome(&self) -> Chrome<'_> {
        Chrome {
            site: &self.site,
            tabs: &self.tabs,
            active: &self.active,
            is_admin: self.is_admin,
            flash: self.flash.as_deref(),
        }
    }
}
