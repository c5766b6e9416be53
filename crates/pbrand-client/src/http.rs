//! HTTP implementation of the PharmaBrand backend contract.
//!
//! Every operation is one JSON request against the configured base URL.
//! Non-success responses are turned into a single error shape: the body's
//! `message` (or FastAPI's `detail`) when present, else a generic
//! "Failed to <operation>. Status: N" message.

use async_trait::async_trait;
use pbrand_core::api::{BrandApi, ComplianceCheckResponse, ExportResponse, FieldAck};
use pbrand_core::project::{CreateProjectRequest, Project, ProjectDetail};
use pbrand_core::{BrandError, BrandResult, PackageField, Session, UserId};
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::ClientConfig;

#[derive(Deserialize)]
#[serde(untagged)]
enum CreateProjectResponse {
    Wrapped { project: Project },
    Bare(Project),
}

impl CreateProjectResponse {
    fn into_project(self) -> Project {
        match self {
            Self::Wrapped { project } | Self::Bare(project) => project,
        }
    }
}

#[derive(Deserialize)]
struct ProjectList {
    #[serde(default)]
    projects: Option<Vec<Project>>,
}

/// Pull a human-readable message out of an error body.
fn error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["message", "detail"]
        .iter()
        .filter_map(|key| value.get(*key)?.as_str())
        .map(str::trim)
        .find(|msg| !msg.is_empty())
        .map(str::to_string)
}

/// Backend client over HTTP.
#[derive(Clone)]
pub struct HttpBrandApi {
    base_url: String,
    access_token: Option<String>,
    client: reqwest::Client,
}

impl HttpBrandApi {
    /// Create a client from configuration.
    pub fn new(config: &ClientConfig) -> BrandResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| BrandError::config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            access_token: config.access_token.clone(),
            client,
        })
    }

    /// Create a client with default settings (localhost:5040).
    pub fn default_client() -> BrandResult<Self> {
        Self::new(&ClientConfig::default())
    }

    /// Send the session's access token with every request.
    pub fn with_session(mut self, session: &Session) -> Self {
        if let Some(token) = &session.access_token {
            self.access_token = Some(token.clone());
        }
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.client.request(method, format!("{}{}", self.base_url, path));
        match &self.access_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send a request and decode the JSON body, or map the failure.
    ///
    /// `action` completes the sentence "Failed to ...".
    async fn execute<T: DeserializeOwned>(&self, builder: RequestBuilder, action: &str) -> BrandResult<T> {
        let response = builder.send().await.map_err(|e| {
            warn!(error = %e, "Failed to {action}: request did not complete");
            BrandError::transport(None, format!("Failed to {action}. Server unreachable."))
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = error_message(&body)
                .unwrap_or_else(|| format!("Failed to {action}. Status: {}", status.as_u16()));
            warn!(status = %status.as_u16(), message = %message, "Failed to {action}");
            if status == StatusCode::NOT_FOUND {
                return Err(BrandError::NotFound(message));
            }
            return Err(BrandError::transport(Some(status.as_u16()), message));
        }

        let result = response.json::<T>().await.map_err(|e| {
            warn!(error = %e, "Failed to {action}: undecodable response");
            BrandError::transport(
                Some(status.as_u16()),
                format!("Failed to {action}. Server response not readable."),
            )
        })?;

        debug!(status = %status.as_u16(), "Completed: {action}");
        Ok(result)
    }
}

#[async_trait]
impl BrandApi for HttpBrandApi {
    async fn create_project(&self, request: &CreateProjectRequest) -> BrandResult<Project> {
        let builder = self.request(Method::POST, "/api/projects/create").json(request);
        let response: CreateProjectResponse = self.execute(builder, "create project").await?;
        Ok(response.into_project())
    }

    async fn list_projects(&self, owner: Option<&UserId>) -> BrandResult<Vec<Project>> {
        let mut builder = self.request(Method::GET, "/api/projects/list");
        if let Some(owner) = owner {
            builder = builder.query(&[("user_id", owner.as_str())]);
        }
        let list: ProjectList = self.execute(builder, "fetch projects").await?;
        Ok(list.projects.unwrap_or_default())
    }

    async fn fetch_project(&self, id: &str) -> BrandResult<ProjectDetail> {
        let builder = self.request(Method::GET, &format!("/api/projects/{id}"));
        self.execute(builder, "fetch project").await
    }

    async fn update_package_field(
        &self,
        id: &str,
        field: PackageField,
        value: &str,
    ) -> BrandResult<FieldAck> {
        let path = format!("/api/projects/{id}/{}", field.as_str());
        let builder = self.request(Method::PATCH, &path).json(value);
        let action = format!("update {}", field.label().to_lowercase());
        self.execute(builder, &action).await
    }

    async fn request_compliance_check(&self, id: &str) -> BrandResult<ComplianceCheckResponse> {
        let builder = self.request(Method::POST, &format!("/api/projects/{id}/compliance_check"));
        self.execute(builder, "request compliance check").await
    }

    async fn export_leaflet_pdf(&self, id: &str) -> BrandResult<ExportResponse> {
        let builder = self.request(Method::GET, &format!("/api/projects/{id}/export/pdf"));
        self.execute(builder, "export PDF").await
    }
}
