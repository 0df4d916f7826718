use axum::extract::FromRef;
use std::{path::PathBuf, sync::Arc};

use crate::{
    auth::{AuthController, SessionRegistry},
    portfolio::Portfolio,
};

#[derive(Clone)]
pub struct AppState {
    pub portfolio: Arc<Portfolio>,
    pub auth: Arc<AuthController>,
    pub sessions: SessionRegistry,
    pub site: Arc<SiteConfig>,
}

/// Static facts about the site, fixed at startup.
#[derive(Debug, Clone, Default)]
pub struct SiteConfig {
    /// Name shown in the page title and the brand button.
    pub owner: String,
    /// Google Identity Services client id. Without it the sign-in button
    /// cannot be rendered.
    pub google_client_id: Option<String>,
    /// Bundled resume served at `/resume` when no link override is stored.
    pub resume_path: Option<PathBuf>,
}

impl FromRef<AppState> for SessionRegistry {
    fn from_ref(state: &AppState) -> Self {
        state.sessions.clone()
    }
}
