use std::future::{Ready, ready};

use actix_session::SessionExt;
use actix_web::{FromRequest, HttpRequest, dev::Payload};

pub const LOGIN_USERNAME_KEY: &str = "loginUsername";

/// Per-request view of the session store, resolved once at extraction so
/// handlers receive the login state as an explicit argument instead of
/// reaching into ambient session state.
#[derive(Debug, Clone)]
pub struct SessionContext {
    pub username: Option<String>,
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let session = req.get_session();
        // An unreadable/corrupt session cookie counts as not logged in.
        let username = session.get::<String>(LOGIN_USERNAME_KEY).unwrap_or(None);
        ready(Ok(SessionContext { username }))
    }
}

impl SessionContext {
    /// True iff no username is stored in the session (empty counts as absent).
    pub fn is_not_login(&self) -> bool {
        self.username.as_deref().is_none_or(|u| u.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_or_missing_username_means_not_logged_in() {
        assert!(SessionContext { username: None }.is_not_login());
        assert!(SessionContext { username: Some(String::new()) }.is_not_login());
        assert!(!SessionContext { username: Some("admin".into()) }.is_not_login());
    }
}
