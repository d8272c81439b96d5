//! Session state machine layered over an external identity provider.
//!
//! The provider owns credentials, tokens, and session validation. This
//! module only tracks the resulting state, classifies provider failures so
//! callers can branch on them, and bootstraps the local profile record.

use uuid::Uuid;

use crate::config::AppConfig;
use crate::core::services::ServiceResult;
use crate::domain::UserProfile;
use crate::storage::DataStore;

/// A resolved provider session: the stable user id plus the email it was
/// issued for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: Uuid,
    pub email: String,
}

/// Raw failure reported by the identity provider, before classification.
#[derive(Debug, Clone)]
pub struct ProviderFailure(pub String);

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("email address not confirmed")]
    EmailNotConfirmed,
    #[error("identity provider error: {0}")]
    Provider(String),
}

impl AuthError {
    /// Maps raw provider messages onto the cases callers branch on: an
    /// unconfirmed email triggers a resend flow, bad credentials a retry
    /// prompt, anything else a generic failure.
    pub fn classify(failure: &ProviderFailure) -> Self {
        let lowered = failure.0.to_lowercase();
        if lowered.contains("email not confirmed") {
            AuthError::EmailNotConfirmed
        } else if lowered.contains("invalid login credentials")
            || lowered.contains("invalid credentials")
        {
            AuthError::InvalidCredentials
        } else {
            AuthError::Provider(failure.0.clone())
        }
    }
}

pub type AuthResult<T> = Result<T, AuthError>;

/// External identity collaborator.
pub trait IdentityProvider {
    fn sign_in(&self, email: &str, password: &str) -> Result<Session, ProviderFailure>;
    fn sign_up(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> Result<Session, ProviderFailure>;
    fn sign_out(&self) -> Result<(), ProviderFailure>;
    fn session(&self) -> Result<Option<Session>, ProviderFailure>;
}

/// Authentication lifecycle as observed by the rest of the system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    /// Session bootstrap has not resolved yet.
    Loading,
    SignedOut,
    SignedIn(Session),
}

/// Owns the current [`AuthState`] and notifies subscribers on transitions.
pub struct AuthService {
    provider: Box<dyn IdentityProvider>,
    state: AuthState,
    listeners: Vec<Box<dyn Fn(&AuthState)>>,
}

impl AuthService {
    pub fn new(provider: Box<dyn IdentityProvider>) -> Self {
        Self {
            provider,
            state: AuthState::Loading,
            listeners: Vec::new(),
        }
    }

    pub fn state(&self) -> &AuthState {
        &self.state
    }

    /// Registers a state-change listener, invoked after every transition.
    pub fn subscribe(&mut self, listener: impl Fn(&AuthState) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Resolves the persisted session, moving out of `Loading`. A provider
    /// failure lands on `SignedOut` and is reported to the caller.
    pub fn bootstrap(&mut self) -> AuthResult<()> {
        match self.provider.session() {
            Ok(Some(session)) => {
                self.transition(AuthState::SignedIn(session));
                Ok(())
            }
            Ok(None) => {
                self.transition(AuthState::SignedOut);
                Ok(())
            }
            Err(failure) => {
                self.transition(AuthState::SignedOut);
                Err(AuthError::classify(&failure))
            }
        }
    }

    pub fn sign_in(&mut self, email: &str, password: &str) -> AuthResult<Session> {
        match self.provider.sign_in(email, password) {
            Ok(session) => {
                self.transition(AuthState::SignedIn(session.clone()));
                Ok(session)
            }
            Err(failure) => {
                let err = AuthError::classify(&failure);
                tracing::warn!(%email, "sign-in failed: {err}");
                Err(err)
            }
        }
    }

    pub fn sign_up(
        &mut self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> AuthResult<Session> {
        let session = self
            .provider
            .sign_up(email, password, display_name)
            .map_err(|failure| AuthError::classify(&failure))?;
        self.transition(AuthState::SignedIn(session.clone()));
        Ok(session)
    }

    pub fn sign_out(&mut self) -> AuthResult<()> {
        self.provider
            .sign_out()
            .map_err(|failure| AuthError::classify(&failure))?;
        self.transition(AuthState::SignedOut);
        Ok(())
    }

    /// Returns the stored profile for the session, creating it on first
    /// sign-in. The configured admin email seeds `is_admin` exactly once,
    /// at creation; afterwards the stored flag is authoritative.
    pub fn ensure_profile(
        store: &dyn DataStore,
        session: &Session,
        display_name: &str,
        config: &AppConfig,
    ) -> ServiceResult<UserProfile> {
        if let Some(existing) = store.profile_by_user(session.user_id)? {
            return Ok(existing);
        }
        let is_admin = config
            .admin_email
            .as_deref()
            .map(|seed| seed.eq_ignore_ascii_case(&session.email))
            .unwrap_or(false);
        let profile = UserProfile::new(session.user_id, display_name, &session.email, is_admin);
        store.insert_profile(&profile)?;
        tracing::info!(user = %session.user_id, admin = is_admin, "profile created");
        Ok(profile)
    }

    fn transition(&mut self, next: AuthState) {
        self.state = next;
        for listener in &self.listeners {
            listener(&self.state);
        }
    }
}
