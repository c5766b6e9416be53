//! Backend contract.
//!
//! Every capability of the PharmaBrand backend is one request/response pair
//! behind [`BrandApi`]. The HTTP implementation lives in `pbrand-client`;
//! the workflows in this crate only see the trait.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::BrandResult;
use crate::package::{ComplianceStatus, PackageField};
use crate::project::model::{CreateProjectRequest, Project, ProjectDetail};
use crate::session::UserId;

/// Acknowledgement returned by a field update.
///
/// The payload is whatever the backend echoes back; the client only relies
/// on the call having succeeded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldAck(pub serde_json::Value);

/// Result of a compliance check request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceCheckResponse {
    #[serde(default)]
    pub status: Option<String>,
}

impl ComplianceCheckResponse {
    /// Status reported by the backend; a missing status counts as approved.
    pub fn resolved_status(&self) -> ComplianceStatus {
        match self.status.as_deref() {
            Some(s) if !s.trim().is_empty() => ComplianceStatus::from_str(s),
            _ => ComplianceStatus::Approved,
        }
    }
}

/// Result of a leaflet PDF export.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportResponse {
    #[serde(default)]
    pub url: Option<String>,
}

/// Request/response operations offered by the backend.
#[async_trait]
pub trait BrandApi: Send + Sync {
    async fn create_project(&self, request: &CreateProjectRequest) -> BrandResult<Project>;

    /// List projects, filtered by owner when one is given.
    async fn list_projects(&self, owner: Option<&UserId>) -> BrandResult<Vec<Project>>;

    async fn fetch_project(&self, id: &str) -> BrandResult<ProjectDetail>;

    /// Replace the active entry of the field's backing sequence with `value`.
    async fn update_package_field(
        &self,
        id: &str,
        field: PackageField,
        value: &str,
    ) -> BrandResult<FieldAck>;

    async fn request_compliance_check(&self, id: &str) -> BrandResult<ComplianceCheckResponse>;

    async fn export_leaflet_pdf(&self, id: &str) -> BrandResult<ExportResponse>;
}

/// Opens a URL in a new viewing context (browser tab, viewer, terminal link).
pub trait LinkOpener {
    fn open(&self, url: &str) -> BrandResult<()>;
}
