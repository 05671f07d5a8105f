use std::sync::Arc;

use tracing::{info, warn};

use crate::api::AuthApi;
use crate::error::AppError;
use crate::models::{AuthResponse, LoginRequest, RegisterRequest, UserProfile};
use crate::session::{Session, SessionStore};

pub struct AuthService {
    api: Arc<dyn AuthApi>,
    session: Arc<dyn SessionStore>,
}

impl AuthService {
    pub fn new(api: Arc<dyn AuthApi>, session: Arc<dyn SessionStore>) -> Self {
        Self { api, session }
    }

    pub async fn login(&self, req: LoginRequest) -> Result<UserProfile, AppError> {
        self.ensure_guest()?;
        req.validate()?;
        info!("Logging in as {}", req.email);
        let response = self.api.login(&req).await.inspect_err(|e| {
            warn!("Login failed for {}: {}", req.email, e);
        })?;
        self.persist(response)
    }

    pub async fn register(&self, req: RegisterRequest) -> Result<UserProfile, AppError> {
        self.ensure_guest()?;
        req.validate()?;
        info!("Registering {}", req.email);
        let response = self.api.register(&req).await.inspect_err(|e| {
            warn!("Registration failed for {}: {}", req.email, e);
        })?;
        self.persist(response)
    }

    pub fn logout(&self) -> Result<(), AppError> {
        self.session.clear()?;
        info!("Session cleared");
        Ok(())
    }

    /// Profile of the logged-in operator.
    pub fn current_user(&self) -> Result<UserProfile, AppError> {
        self.session
            .load()?
            .filter(|s| !s.token.is_empty())
            .map(|s| s.user)
            .ok_or(AppError::MissingToken)
    }

    // login and register are only reachable without a session
    fn ensure_guest(&self) -> Result<(), AppError> {
        if self.session.token().is_ok() {
            return Err(AppError::BadRequest(
                "Already logged in. Log out first.".to_string(),
            ));
        }
        Ok(())
    }

    fn persist(&self, response: AuthResponse) -> Result<UserProfile, AppError> {
        if response.token.is_empty() {
            return Err(AppError::MissingToken);
        }
        let session = Session {
            token: response.token,
            user: response.user,
        };
        self.session.save(&session)?;
        Ok(session.user)
    }
}
