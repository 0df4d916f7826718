use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use folio_server::{
    auth::{AllowList, AuthController, SessionRegistry},
    portfolio::Portfolio,
    state::{AppState, SiteConfig},
    store::MemoryStore,
    sync::SyncEngine,
    web,
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

struct Harness {
    app: Router,
    store: Arc<MemoryStore>,
    portfolio: Arc<Portfolio>,
    sessions: SessionRegistry,
}

fn harness() -> Harness {
    let store = Arc::new(MemoryStore::new());
    let portfolio = Arc::new(Portfolio::new(SyncEngine::new(store.clone())));
    let sessions = SessionRegistry::default();
    let state = AppState {
        portfolio: portfolio.clone(),
        auth: Arc::new(AuthController::new(AllowList::parse("owner@example.com"))),
        sessions: sessions.clone(),
        site: Arc::new(SiteConfig {
            owner: "Aditya".into(),
            google_client_id: Some("client-id".into()),
            resume_path: None,
        }),
    };
    Harness {
        app: web::app(state),
        store,
        portfolio,
        sessions,
    }
}

fn token(claims: Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"RS256"}"#);
    let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
    format!("{header}.{payload}.sig")
}

fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut req = Request::get(uri);
    if let Some(c) = cookie {
        req = req.header(header::COOKIE, c);
    }
    req.body(Body::empty()).unwrap()
}

fn post_form(uri: &str, cookie: Option<&str>, body: &str) -> Request<Body> {
    let mut req =
        Request::post(uri).header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(c) = cookie {
        req = req.header(header::COOKIE, c);
    }
    req.body(Body::from(body.to_string())).unwrap()
}

async fn body_text(res: axum::response::Response) -> String {
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn location(res: &axum::response::Response) -> &str {
    res.headers()[header::LOCATION].to_str().unwrap()
}

/// Signs in as the allowed owner and returns the session cookie pair.
async fn sign_in(app: &Router) -> String {
    let credential = token(json!({ "email": "Owner@Example.com", "name": "Ada" }));
    let res = app
        .clone()
        .oneshot(post_form("/admin/login", None, &format!("credential={credential}")))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    let set_cookie = res.headers()[header::SET_COOKIE].to_str().unwrap();
    set_cookie.split(';').next().unwrap().to_string()
}

#[tokio::test]
async fn health_check() {
    let h = harness();
    let res = h.app.oneshot(get("/healthz", None)).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn visitors_see_content_without_edit_controls() {
    let h = harness();
    let res = h.app.oneshot(get("/", None)).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let html = body_text(res).await;
    assert!(html.contains("Technical Arsenal"));
    assert!(html.contains("Professional Journey"));
    assert!(html.contains("href=\"/resume\""));
    assert!(!html.contains("/admin/arsenal/new"));
}

#[tokio::test]
async fn admin_routes_redirect_visitors_to_login() {
    let h = harness();
    let res = h
        .app
        .clone()
        .oneshot(post_form("/admin/journey", None, "role=SDE&company=Acme"))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/admin/login");

    h.portfolio.engine().flush().await;
    assert!(h.store.raw("journey").await.is_none());
}

#[tokio::test]
async fn allowed_account_unlocks_admin_mode() {
    let h = harness();
    let cookie = sign_in(&h.app).await;

    let res = h.app.clone().oneshot(get("/", Some(&cookie))).await.unwrap();
    let html = body_text(res).await;
    assert!(html.contains("Admin mode unlocked! Welcome Ada"));
    assert!(html.contains("/admin/arsenal/new"));

    // The welcome notice is shown once.
    let res = h.app.oneshot(get("/", Some(&cookie))).await.unwrap();
    assert!(!body_text(res).await.contains("Admin mode unlocked!"));
}

#[tokio::test]
async fn unknown_account_is_refused() {
    let h = harness();
    let credential = token(json!({ "email": "stranger@example.com" }));
    let res = h
        .app
        .oneshot(post_form("/admin/login", None, &format!("credential={credential}")))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert!(res.headers().get(header::SET_COOKIE).is_none());
    assert!(body_text(res).await.contains("Unauthorized Google account."));
}

#[tokio::test]
async fn malformed_credential_is_a_decode_error() {
    let h = harness();
    let res = h
        .app
        .oneshot(post_form("/admin/login", None, "credential=garbage"))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert!(body_text(res).await.contains("Error decoding Google credential."));
}

#[tokio::test]
async fn csrf_mismatch_fails_login() {
    let h = harness();
    let credential = token(json!({ "email": "owner@example.com" }));
    let res = h
        .app
        .oneshot(post_form(
            "/admin/login",
            Some("g_csrf_token=abc"),
            &format!("credential={credential}&g_csrf_token=xyz"),
        ))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert!(body_text(res).await.contains("Google login failed!"));
}

#[tokio::test]
async fn toggle_signs_admin_out() {
    let h = harness();
    let cookie = sign_in(&h.app).await;

    let res = h
        .app
        .clone()
        .oneshot(post_form("/admin/toggle", Some(&cookie), ""))
        .await
        .unwrap();
    assert_eq!(location(&res), "/");

    let res = h.app.oneshot(get("/admin/resume", Some(&cookie))).await.unwrap();
    assert_eq!(location(&res), "/admin/login");
}

#[tokio::test]
async fn toggle_sends_visitors_to_login() {
    let h = harness();
    let res = h
        .app
        .oneshot(post_form("/admin/toggle", None, ""))
        .await
        .unwrap();
    assert_eq!(location(&res), "/admin/login");
    assert!(res.headers().get(header::SET_COOKIE).is_none());
}

#[tokio::test]
async fn anonymous_visits_store_no_sessions() {
    let h = harness();
    for _ in 0..50 {
        let res = h.app.clone().oneshot(get("/admin/login", None)).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert!(res.headers().get(header::SET_COOKIE).is_none());

        let res = h
            .app
            .clone()
            .oneshot(post_form("/admin/toggle", None, ""))
            .await
            .unwrap();
        assert_eq!(location(&res), "/admin/login");

        h.app
            .clone()
            .oneshot(get("/admin/login/cancel", None))
            .await
            .unwrap();
    }
    assert!(h.sessions.is_empty().await);

    sign_in(&h.app).await;
    assert_eq!(h.sessions.len().await, 1);
}

#[tokio::test]
async fn admin_adds_project_to_builtin_category() {
    let h = harness();
    let cookie = sign_in(&h.app).await;

    let res = h
        .app
        .clone()
        .oneshot(post_form(
            "/admin/projects?category=se_projects",
            Some(&cookie),
            "title=Folio&desc=Portfolio+server&tags=Rust%2C+axum",
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/category/se_projects");

    h.portfolio.engine().flush().await;
    let stored = h.store.raw("category_se_projects").await.unwrap();
    assert_eq!(stored["data"][0]["title"], json!("Folio"));
    assert_eq!(stored["data"][0]["tags"], json!(["Rust", "axum"]));
    assert_eq!(stored["data"][1]["id"], json!("se1"));
}

#[tokio::test]
async fn incomplete_form_is_returned_unsaved() {
    let h = harness();
    let cookie = sign_in(&h.app).await;

    let res = h
        .app
        .oneshot(post_form(
            "/admin/projects?category=ai_projects",
            Some(&cookie),
            "title=Half+done",
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(body_text(res).await.contains("Half done"));

    h.portfolio.engine().flush().await;
    let stored = h.store.raw("category_ai_projects").await.unwrap();
    assert_eq!(stored["data"], json!([]));
}

#[tokio::test]
async fn delete_needs_confirmation() {
    let h = harness();
    let cookie = sign_in(&h.app).await;

    let res = h
        .app
        .clone()
        .oneshot(get("/admin/journey/j1/delete", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(body_text(res).await.contains("value=\"confirm\""));

    let res = h
        .app
        .clone()
        .oneshot(post_form("/admin/journey/j1/delete", Some(&cookie), "decision=cancel"))
        .await
        .unwrap();
    assert_eq!(location(&res), "/");
    assert!(h.portfolio.journey.get("j1").is_some());

    h.app
        .oneshot(post_form("/admin/journey/j1/delete", Some(&cookie), "decision=confirm"))
        .await
        .unwrap();
    assert!(h.portfolio.journey.get("j1").is_none());
}

#[tokio::test]
async fn new_tab_gets_its_own_page() {
    let h = harness();
    let cookie = sign_in(&h.app).await;

    let res = h
        .app
        .clone()
        .oneshot(post_form(
            "/admin/tabs",
            Some(&cookie),
            "title=Design&description=Pixels&concepts=Figma%2C+Motion",
        ))
        .await
        .unwrap();
    assert_eq!(location(&res), "/category/design_projects");

    let res = h
        .app
        .oneshot(get("/category/design_projects", None))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let html = body_text(res).await;
    assert!(html.contains("Pixels"));
    assert!(html.contains("Motion"));
    assert!(html.contains("No projects added yet."));
}

#[tokio::test]
async fn adding_a_tab_keeps_the_welcome_notice() {
    let h = harness();
    let cookie = sign_in(&h.app).await;

    let res = h
        .app
        .clone()
        .oneshot(post_form("/admin/tabs", Some(&cookie), "title=Design"))
        .await
        .unwrap();
    assert_eq!(location(&res), "/category/design_projects");

    let res = h.app.oneshot(get("/", Some(&cookie))).await.unwrap();
    assert!(body_text(res).await.contains("Admin mode unlocked! Welcome Ada"));
}

#[tokio::test]
async fn unknown_category_is_not_found() {
    let h = harness();
    let res = h
        .app
        .oneshot(get("/category/nothing_here", None))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn stored_resume_link_replaces_bundled_file() {
    let h = harness();
    let cookie = sign_in(&h.app).await;

    h.app
        .clone()
        .oneshot(post_form(
            "/admin/resume",
            Some(&cookie),
            "link=https%3A%2F%2Fdrive.example%2Fcv",
        ))
        .await
        .unwrap();

    let res = h.app.oneshot(get("/", None)).await.unwrap();
    assert!(body_text(res).await.contains("https://drive.example/cv"));
}
