use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::config::ApiConfig;
use crate::error::{AppError, ErrorResponse};
use crate::models::{AuthResponse, LoginRequest, RegisterRequest, Resource};
use crate::session::SessionStore;

/// CRUD endpoints of one entity collection.
#[async_trait]
pub trait ResourceApi<R: Resource>: Send + Sync {
    async fn list(&self) -> Result<Vec<R>, AppError>;
    /// `None` when the server answers 204 No Content.
    async fn create(&self, draft: &R::Draft) -> Result<Option<R>, AppError>;
    async fn update(&self, id: i64, draft: &R::Draft) -> Result<Option<R>, AppError>;
    async fn delete(&self, id: i64) -> Result<(), AppError>;
}

#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn login(&self, req: &LoginRequest) -> Result<AuthResponse, AppError>;
    async fn register(&self, req: &RegisterRequest) -> Result<AuthResponse, AppError>;
}

pub struct HttpAdminClient {
    client: Client,
    config: ApiConfig,
    session: Arc<dyn SessionStore>,
}

impl HttpAdminClient {
    pub fn new(config: ApiConfig, session: Arc<dyn SessionStore>) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AppError::BadRequest(format!("Failed to build http client: {}", e)))?;
        Ok(Self {
            client,
            config,
            session,
        })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    fn authorized(&self, request: RequestBuilder) -> Result<RequestBuilder, AppError> {
        let token = self.session.token()?;
        Ok(request
            .header("Authorization", format!("Bearer {}", token))
            .header("Content-Type", "application/json"))
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, AppError> {
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("API responded {}: {}", status, body);
            return Err(AppError::from_status(status, &body));
        }
        Ok(response)
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, AppError> {
        let body = response.text().await?;
        serde_json::from_str::<T>(&body).map_err(|e| {
            tracing::error!("Failed to parse response: {}", e);
            AppError::Decode(e.to_string())
        })
    }

    async fn decode_optional<T: DeserializeOwned>(response: Response) -> Result<Option<T>, AppError> {
        if response.status() == StatusCode::NO_CONTENT {
            return Ok(None);
        }
        let body = response.text().await?;
        if body.trim().is_empty() {
            return Ok(None);
        }
        serde_json::from_str::<T>(&body)
            .map(Some)
            .map_err(|e| AppError::Decode(e.to_string()))
    }

    async fn authenticate<B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<AuthResponse, AppError> {
        let url = self.config.api_url(path);
        let request = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(body);
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Auth request to {} failed with {}", path, status);
            // rejected credentials keep the server's message for the form
            return Err(match AppError::from_status(status, &body) {
                AppError::Unauthorized(status) => AppError::Api {
                    status,
                    message: ErrorResponse::message_of(&body),
                },
                other => other,
            });
        }
        Self::decode(response).await
    }
}

#[async_trait]
impl<R: Resource> ResourceApi<R> for HttpAdminClient {
    async fn list(&self) -> Result<Vec<R>, AppError> {
        let url = self.config.api_url(R::PATH);
        debug!("GET {}", url);
        let request = self.authorized(self.client.get(&url))?;
        let response = self.send(request).await?;
        let records: Vec<R> = Self::decode(response).await?;
        info!("Fetched {} {}", records.len(), R::TITLE);
        Ok(records)
    }

    async fn create(&self, draft: &R::Draft) -> Result<Option<R>, AppError> {
        let url = self.config.api_url(R::PATH);
        debug!("POST {}", url);
        let request = self.authorized(self.client.post(&url))?.json(draft);
        let response = self.send(request).await?;
        Self::decode_optional(response).await
    }

    async fn update(&self, id: i64, draft: &R::Draft) -> Result<Option<R>, AppError> {
        let url = self.config.api_url(&format!("{}/{}", R::PATH, id));
        debug!("PUT {}", url);

        let mut body = serde_json::to_value(draft)?;
        if let Some(fields) = body.as_object_mut() {
            fields.insert(R::ID_FIELD.to_string(), serde_json::Value::from(id));
        }

        let request = self.authorized(self.client.put(&url))?.json(&body);
        let response = self.send(request).await?;
        Self::decode_optional(response).await
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let url = self.config.api_url(&format!("{}/{}", R::PATH, id));
        debug!("DELETE {}", url);
        let request = self.authorized(self.client.delete(&url))?;
        self.send(request).await?;
        info!("Deleted {} {}", R::TITLE, id);
        Ok(())
    }
}

#[async_trait]
impl AuthApi for HttpAdminClient {
    async fn login(&self, req: &LoginRequest) -> Result<AuthResponse, AppError> {
        self.authenticate("Auth/login", req).await
    }

    async fn register(&self, req: &RegisterRequest) -> Result<AuthResponse, AppError> {
        self.authenticate("Auth/register", req).await
    }
}
