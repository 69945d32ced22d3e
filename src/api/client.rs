use serde::de::DeserializeOwned;
use serde::Serialize;

use super::http::{HttpRequest, HttpResponse, HttpTransport, Method};
use super::types::*;
use crate::config::join_url;
use crate::error::AppError;

pub const LOGIN_PATH: &str = "/api/auth/login";
pub const SIGNUP_PATH: &str = "/api/auth/signup";
pub const APPLICATIONS_PATH: &str = "/api/applications";
pub const GENERATE_FORM_PATH: &str = "/api/owl-agent/generate-uscis-form";
pub const DOWNLOAD_FORM_PATH: &str = "/api/owl-agent/download-form";
pub const SESSION_PATH: &str = "/api/owl-agent/session";

/// `base/{id}` with the id percent-encoded as a single path segment.
fn resource_path(base: &str, id: &str) -> String {
    format!("{}/{}", base, urlencoding::encode(id))
}

/// Typed wrapper over the backend's REST surface.
///
/// Holds the base URL and, once signed in, the bearer token attached to every
/// request. Each method issues exactly one request.
#[derive(Debug, Clone)]
pub struct ApiClient<T> {
    transport: T,
    base_url: String,
    token: Option<String>,
}

impl<T: HttpTransport> ApiClient<T> {
    pub fn new(transport: T, base_url: impl Into<String>) -> Self {
        Self {
            transport,
            base_url: base_url.into(),
            token: None,
        }
    }

    /// Attach a bearer token. Empty tokens are treated as absent.
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.trim().is_empty());
        self
    }

    #[cfg(test)]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    #[cfg(test)]
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    // -- Auth --

    pub async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, AppError> {
        self.post_json(LOGIN_PATH, request).await
    }

    pub async fn signup(&self, request: &SignupRequest) -> Result<AuthResponse, AppError> {
        self.post_json(SIGNUP_PATH, request).await
    }

    // -- Applications --

    pub async fn create_application(
        &self,
        request: &CreateApplicationRequest,
    ) -> Result<Application, AppError> {
        self.require_token()?;
        let envelope: ApplicationEnvelope = self.post_json(APPLICATIONS_PATH, request).await?;
        Ok(envelope.application)
    }

    pub async fn list_applications(&self) -> Result<Vec<Application>, AppError> {
        self.require_token()?;
        let list: ApplicationList = self.get_json(APPLICATIONS_PATH).await?;
        Ok(list.into_vec())
    }

    pub async fn get_application(&self, id: &str) -> Result<Application, AppError> {
        self.require_token()?;
        let path = resource_path(APPLICATIONS_PATH, id);
        let envelope: ApplicationEnvelope = self.get_json(&path).await?;
        Ok(envelope.application)
    }

    // -- Owl agent --

    pub async fn get_session(&self, session_id: &str) -> Result<crate::session::SessionProgress, AppError> {
        let path = resource_path(SESSION_PATH, session_id);
        let envelope: crate::session::SessionEnvelope = self.get_json(&path).await?;
        Ok(envelope.session)
    }

    pub async fn generate_form(&self, session_id: &str) -> Result<GeneratedForm, AppError> {
        let body = GenerateFormRequest {
            session_id: session_id.to_string(),
        };
        let response: GenerateFormResponse = self.post_json(GENERATE_FORM_PATH, &body).await?;
        Ok(response.form)
    }

    /// Fetch the rendered PDF for a generated form.
    pub async fn download_form(&self, form_id: &str) -> Result<Vec<u8>, AppError> {
        let path = resource_path(DOWNLOAD_FORM_PATH, form_id);
        let response = self.execute(self.request(Method::Get, &path)).await?;
        Ok(response.body)
    }

    // -- Plumbing --

    fn require_token(&self) -> Result<(), AppError> {
        if self.token.is_some() {
            Ok(())
        } else {
            Err(AppError::Unauthenticated)
        }
    }

    fn request(&self, method: Method, path: &str) -> HttpRequest {
        let request = HttpRequest::new(method, join_url(&self.base_url, path));
        match &self.token {
            Some(token) => request.header("Authorization", &format!("Bearer {}", token)),
            None => request,
        }
    }

    async fn get_json<R: DeserializeOwned>(&self, path: &str) -> Result<R, AppError> {
        let response = self.execute(self.request(Method::Get, path)).await?;
        response.json()
    }

    async fn post_json<B: Serialize, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<R, AppError> {
        let body = serde_json::to_string(body).map_err(|e| AppError::Decode(e.to_string()))?;
        let request = self.request(Method::Post, path).json_body(body);
        let response = self.execute(request).await?;
        response.json()
    }

    /// Send and turn non-2xx statuses into `AppError::Server`.
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, AppError> {
        let method = request.method;
        let url = request.url.clone();
        log::info!("{} {}", method.as_str(), url);

        let response = self.transport.send(request).await.map_err(|e| {
            log::warn!("{} {} failed: {}", method.as_str(), url, e);
            e
        })?;

        if response.is_success() {
            return Ok(response);
        }

        let message = serde_json::from_slice::<ErrorBody>(&response.body)
            .ok()
            .and_then(|body| body.message());
        log::warn!(
            "{} {} returned {}: {}",
            method.as_str(),
            url,
            response.status,
            message.as_deref().unwrap_or("no details")
        );
        Err(AppError::Server {
            status: response.status,
            message,
        })
    }
}
