use axum::{
    Form,
    extract::State,
    http::{HeaderMap, HeaderValue, header},
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use crate::{
    auth::{CurrentSession, SessionRegistry, Toggle, extract_cookie, session_cookie},
    error::AuthError,
    state::AppState,
};

use super::template;

/// Cookie the identity provider sets alongside its form post.
const CSRF_COOKIE: &str = "g_csrf_token";

// ── Login page ────────────────────────────────────────────────────────────────

/// Anonymous visitors get no stored session until a credential succeeds.
pub async fn get_login(State(state): State<AppState>, current: CurrentSession) -> Response {
    let mut session = current.session.clone();
    if session.is_admin() {
        return Redirect::to("/").into_response();
    }
    state.auth.begin_login(&mut session);
    if let Some(token) = &current.token {
        state.sessions.put(token, session).await;
    }

    Html(template::login_page(&state.site, None).into_string()).into_response()
}

/// Body of the provider's redirect-mode post.
#[derive(Deserialize, Default)]
#[serde(default)]
pub struct CredentialForm {
    pub credential: Option<String>,
    pub g_csrf_token: Option<String>,
}

pub async fn post_login(
    State(state): State<AppState>,
    current: CurrentSession,
    headers: HeaderMap,
    Form(form): Form<CredentialForm>,
) -> Response {
    let mut session = current.session.clone();

    let result = match check_csrf(&headers, form.g_csrf_token.as_deref()) {
        Err(reason) => Err(state.auth.on_credential_error(&session, reason)),
        Ok(()) => match form.credential.as_deref().filter(|c| !c.trim().is_empty()) {
            None => Err(state
                .auth
                .on_credential_error(&session, "no credential returned")),
            Some(raw) => state.auth.on_credential(&mut session, raw),
        },
    };

    match result {
        Ok(welcome) => {
            // Fresh token on privilege change.
            if let Some(old) = &current.token {
                state.sessions.remove(old).await;
            }
            let token = SessionRegistry::new_token();
            state.sessions.put(&token, session).await;
            state.sessions.set_flash(&token, welcome.to_string()).await;
            with_cookie(Redirect::to("/").into_response(), &token)
        }
        Err(err) => login_failed(&state, &err),
    }
}

fn check_csrf(headers: &HeaderMap, body_token: Option<&str>) -> Result<(), &'static str> {
    let Some(body_token) = body_token else {
        return Ok(());
    };
    match extract_cookie(headers, CSRF_COOKIE) {
        Some(cookie) if cookie == body_token => Ok(()),
        Some(_) => Err("CSRF token mismatch"),
        None => Err("CSRF cookie missing"),
    }
}

fn login_failed(state: &AppState, err: &AuthError) -> Response {
    let body = template::login_page(&state.site, Some(err.user_message()));
    (err.status(), Html(body.into_string())).into_response()
}

// ── Cancel / toggle ───────────────────────────────────────────────────────────

pub async fn cancel(State(state): State<AppState>, current: CurrentSession) -> Response {
    if let Some(token) = &current.token {
        let mut session = current.session.clone();
        if session.login_open() {
            state.auth.cancel_login(&mut session);
            state.sessions.put(token, session).await;
        }
    }
    Redirect::to("/").into_response()
}

/// The lock button: signs an admin out, sends anyone else to the login page.
pub async fn toggle(State(state): State<AppState>, current: CurrentSession) -> Response {
    let mut session = current.session.clone();
    let target = match state.auth.toggle_logout(&mut session) {
        Toggle::SignedOut => "/",
        Toggle::LoginRequested => "/admin/login",
    };
    if let Some(token) = &current.token {
        state.sessions.put(token, session).await;
    }
    Redirect::to(target).into_response()
}

fn with_cookie(mut response: Response, token: &str) -> Response {
    match HeaderValue::from_str(&session_cookie(token)) {
        Ok(value) => {
            response.headers_mut().append(header::SET_COOKIE, value);
        }
        Err(e) => tracing::error!("cannot encode session cookie: {}", e),
    }
    response
}
