use thiserror::Error;
use tracing::{debug, info, warn};

use super::{AuthUser, SessionData};
use crate::api::{ApiClient, ApiError};
use crate::models::RegisterRequest;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("{0} response did not include a token")]
    MissingToken(&'static str),

    #[error("Not signed in")]
    NotAuthenticated,

    #[error("This action requires the {0} role")]
    Forbidden(&'static str),

    #[error("User profile has not been loaded")]
    ProfileUnavailable,

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Failed to persist session: {0:#}")]
    Store(anyhow::Error),
}

/// Sign-in lifecycle on top of the shared client and its session store.
#[derive(Clone)]
pub struct AuthService {
    client: ApiClient,
}

impl AuthService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn session(&self) -> Option<SessionData> {
        self.client.store().load()
    }

    pub fn is_authenticated(&self) -> bool {
        self.client.store().access_token().is_some()
    }

    pub fn current_user(&self) -> Option<AuthUser> {
        self.session().and_then(|s| s.user)
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<SessionData, AuthError> {
        let payload = self.client.auth().login(email, password).await?;
        let session =
            SessionData::from_auth_payload(&payload).ok_or(AuthError::MissingToken("Login"))?;
        self.persist(&session)?;
        info!(email = %email, "Signed in");
        Ok(session)
    }

    pub async fn sign_up(&self, request: &RegisterRequest) -> Result<SessionData, AuthError> {
        let payload = self.client.auth().register(request).await?;
        let session = SessionData::from_auth_payload(&payload)
            .ok_or(AuthError::MissingToken("Registration"))?;
        self.persist(&session)?;
        info!(email = %request.email, "Registered and signed in");
        Ok(session)
    }

    /// Tell the backend, then forget the session regardless of the outcome.
    pub async fn sign_out(&self) -> Result<(), AuthError> {
        if let Err(e) = self.client.auth().logout().await {
            warn!(error = %e, "Logout request failed, clearing session anyway");
        }
        self.client.store().clear().map_err(AuthError::Store)?;
        info!("Signed out");
        Ok(())
    }

    /// Complete a session that has a token but no user profile.
    ///
    /// Failures are logged and leave the session untouched.
    pub async fn bootstrap(&self) -> Option<SessionData> {
        let session = self.session()?;
        if session.is_complete() {
            return Some(session);
        }

        debug!("Session has no user profile, fetching /auth/me");
        match self.client.auth().me().await {
            Ok(user) => {
                // The call may have refreshed the token; build on the latest copy
                let mut next = self.session().unwrap_or(session);
                next.user = Some(AuthUser::from(user));
                if let Err(e) = self.client.store().save(&next) {
                    warn!(error = %e, "Failed to persist hydrated session");
                }
                Some(next)
            }
            Err(e) => {
                warn!(error = %e, "Could not hydrate user profile");
                self.session()
            }
        }
    }

    pub async fn change_password(&self, current: &str, new: &str) -> Result<(), AuthError> {
        self.client.auth().change_password(current, new).await?;
        Ok(())
    }

    // ===== Guards =====

    pub fn require_authenticated(&self) -> Result<SessionData, AuthError> {
        self.session()
            .filter(|s| !s.token.is_empty())
            .ok_or(AuthError::NotAuthenticated)
    }

    pub fn require_admin(&self) -> Result<AuthUser, AuthError> {
        let user = self.require_user()?;
        if user.is_admin() {
            Ok(user)
        } else {
            Err(AuthError::Forbidden("Admin"))
        }
    }

    pub fn require_admin_or_lecturer(&self) -> Result<AuthUser, AuthError> {
        let user = self.require_user()?;
        if user.can_manage_courses() {
            Ok(user)
        } else {
            Err(AuthError::Forbidden("Admin or Lecturer"))
        }
    }

    fn require_user(&self) -> Result<AuthUser, AuthError> {
        let session = self.require_authenticated()?;
        // A token without a profile cannot pass a role check
        session.user.ok_or(AuthError::ProfileUnavailable)
    }

    fn persist(&self, session: &SessionData) -> Result<(), AuthError> {
        self.client.store().save(session).map_err(AuthError::Store)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::auth::{MemorySessionStore, SessionStore};
    use crate::config::ClientConfig;
    use crate::models::Role;

    fn service_with(session: Option<SessionData>) -> AuthService {
        let store = match session {
            Some(s) => MemorySessionStore::with_session(s),
            None => MemorySessionStore::new(),
        };
        let store: Arc<dyn SessionStore> = Arc::new(store);
        let client = ApiClient::new(&ClientConfig::new("http://127.0.0.1:9"), store).unwrap();
        AuthService::new(client)
    }

    fn session_with_role(role: Option<Role>) -> SessionData {
        let mut session = SessionData::new("token");
        session.user = role.map(|r| AuthUser {
            role: Some(r),
            ..Default::default()
        });
        session
    }

    #[test]
    fn test_guards_without_session() {
        let service = service_with(None);
        assert!(!service.is_authenticated());
        assert!(matches!(
            service.require_authenticated(),
            Err(AuthError::NotAuthenticated)
        ));
        assert!(matches!(
            service.require_admin(),
            Err(AuthError::NotAuthenticated)
        ));
    }

    #[test]
    fn test_admin_guard() {
        let admin = service_with(Some(session_with_role(Some(Role::Admin))));
        assert!(admin.require_admin().is_ok());
        assert!(admin.require_admin_or_lecturer().is_ok());

        let lecturer = service_with(Some(session_with_role(Some(Role::Lecturer))));
        assert!(matches!(
            lecturer.require_admin(),
            Err(AuthError::Forbidden("Admin"))
        ));
        assert!(lecturer.require_admin_or_lecturer().is_ok());

        let student = service_with(Some(session_with_role(Some(Role::Student))));
        assert!(student.require_admin_or_lecturer().is_err());
    }

    #[test]
    fn test_incomplete_session_is_authenticated_but_not_privileged() {
        let service = service_with(Some(session_with_role(None)));
        assert!(service.is_authenticated());
        assert!(service.current_user().is_none());
        assert!(service.require_authenticated().is_ok());
        assert!(service.require_admin().is_err());
    }
}
