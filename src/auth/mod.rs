//! Admin sign-in.
//!
//! A visitor becomes admin by presenting an identity provider credential
//! whose e-mail is on the [`AllowList`]. The [`AuthController`] is the only
//! thing that flips a [`Session`] into admin mode.

mod allow_list;
pub mod credential;
mod sessions;

pub use allow_list::AllowList;
pub use sessions::{
    CurrentSession, SESSION_COOKIE, SESSION_TTL, SessionRegistry, extract_cookie, session_cookie,
};

use std::fmt;

use crate::error::AuthError;

/// Per-visitor sign-in state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    is_admin: bool,
    login_open: bool,
}

impl Session {
    pub fn is_admin(&self) -> bool {
        self.is_admin
    }

    /// Whether the sign-in prompt is currently offered.
    pub fn login_open(&self) -> bool {
        self.login_open
    }
}

/// Shown after a successful sign-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Welcome {
    pub display_name: String,
}

impl fmt::Display for Welcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Admin mode unlocked! Welcome {}", self.display_name)
    }
}

/// What the lock button did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    SignedOut,
    LoginRequested,
}

pub struct AuthController {
    allow_list: AllowList,
}

impl AuthController {
    pub fn new(allow_list: AllowList) -> Self {
        Self { allow_list }
    }

    /// Offer the sign-in prompt. Admin state is untouched.
    pub fn begin_login(&self, session: &mut Session) {
        session.login_open = true;
    }

    pub fn cancel_login(&self, session: &mut Session) {
        session.login_open = false;
    }

    /// Check a raw credential and, if its owner is allowed, enter admin mode.
    pub fn on_credential(&self, session: &mut Session, raw: &str) -> Result<Welcome, AuthError> {
        let claims = credential::decode(raw).inspect_err(|e| {
            tracing::warn!("rejected credential: {}", e);
        })?;

        if !self.allow_list.contains(&claims.email) {
            tracing::warn!(email = %claims.email, "sign-in by account not on the allow-list");
            return Err(AuthError::Unauthorized {
                email: claims.email,
            });
        }

        session.is_admin = true;
        session.login_open = false;
        tracing::info!(email = %claims.email, "admin mode unlocked");

        let display_name = claims
            .name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| "Admin".to_string());
        Ok(Welcome { display_name })
    }

    /// The provider's own flow failed (cancelled, errored, nothing returned).
    pub fn on_credential_error(&self, _session: &Session, reason: impl Into<String>) -> AuthError {
        let err = AuthError::Provider(reason.into());
        tracing::warn!("{}", err);
        err
    }

    /// Sign out an admin immediately, or start signing in anyone else.
    pub fn toggle_logout(&self, session: &mut Session) -> Toggle {
        if session.is_admin {
            session.is_admin = false;
            tracing::info!("admin mode locked");
            Toggle::SignedOut
        } else {
            self.begin_login(session);
            Toggle::LoginRequested
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::credential::encode_unsigned;
    use serde_json::json;

    fn controller() -> AuthController {
        AuthController::new(AllowList::parse("owner@example.com"))
    }

    #[test]
    fn allowed_email_in_any_case_unlocks() {
        for email in ["owner@example.com", "OWNER@example.COM", "Owner@Example.Com"] {
            let auth = controller();
            let mut session = Session::default();
            auth.begin_login(&mut session);

            let token = encode_unsigned(&json!({ "email": email, "name": "Aditya" }));
            let welcome = auth.on_credential(&mut session, &token).unwrap();

            assert!(session.is_admin());
            assert!(!session.login_open());
            assert_eq!(welcome.to_string(), "Admin mode unlocked! Welcome Aditya");
        }
    }

    #[test]
    fn unknown_email_leaves_session_alone() {
        let auth = controller();
        let mut session = Session::default();
        auth.begin_login(&mut session);
        let before = session.clone();

        let token = encode_unsigned(&json!({ "email": "someone@else.com" }));
        let err = auth.on_credential(&mut session, &token).unwrap_err();

        assert_eq!(
            err,
            AuthError::Unauthorized {
                email: "someone@else.com".into()
            }
        );
        assert_eq!(session, before);
    }

    #[test]
    fn garbage_token_leaves_session_alone() {
        let auth = controller();
        let mut session = Session::default();

        assert!(matches!(
            auth.on_credential(&mut session, "not-a-token"),
            Err(AuthError::Decode(_))
        ));
        assert!(!session.is_admin());
    }

    #[test]
    fn missing_name_falls_back() {
        let auth = controller();
        let mut session = Session::default();
        let token = encode_unsigned(&json!({ "email": "owner@example.com", "name": "  " }));

        let welcome = auth.on_credential(&mut session, &token).unwrap();
        assert_eq!(welcome.display_name, "Admin");
    }

    #[test]
    fn toggle_signs_out_admin_without_prompt() {
        let auth = controller();
        let mut session = Session::default();
        let token = encode_unsigned(&json!({ "email": "owner@example.com" }));
        auth.on_credential(&mut session, &token).unwrap();

        assert_eq!(auth.toggle_logout(&mut session), Toggle::SignedOut);
        assert!(!session.is_admin());
        assert!(!session.login_open());
    }

    #[test]
    fn toggle_opens_login_for_visitors() {
        let auth = controller();
        let mut session = Session::default();

        assert_eq!(auth.toggle_logout(&mut session), Toggle::LoginRequested);
        assert!(session.login_open());
        assert!(!session.is_admin());
    }

    #[test]
    fn provider_error_is_reported() {
        let auth = controller();
        let session = Session::default();
        let err = auth.on_credential_error(&session, "popup closed");
        assert_eq!(err, AuthError::Provider("popup closed".into()));
        assert_eq!(err.user_message(), "Google login failed!");
    }
}
