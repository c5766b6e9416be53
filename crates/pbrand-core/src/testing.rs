//! In-memory backend used by the unit tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::api::{BrandApi, ComplianceCheckResponse, ExportResponse, FieldAck, LinkOpener};
use crate::error::{BrandError, BrandResult};
use crate::package::PackageField;
use crate::project::model::{CreateProjectRequest, Project, ProjectDetail};
use crate::session::UserId;

#[derive(Default)]
struct FakeState {
    projects: Vec<ProjectDetail>,
    failures: HashMap<&'static str, (Option<u16>, String)>,
    compliance_status: Option<String>,
    export_url: Option<String>,
    calls: Vec<&'static str>,
}

/// Durable fake backend: updates are written into the stored package so a
/// later fetch sees them.
#[derive(Default)]
pub(crate) struct FakeApi {
    state: Mutex<FakeState>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_project(detail: serde_json::Value) -> Self {
        let api = Self::new();
        let detail: ProjectDetail = serde_json::from_value(detail).unwrap();
        api.state.lock().unwrap().projects.push(detail);
        api
    }

    /// Make every call of `op` fail until cleared.
    pub fn fail(&self, op: &'static str, status: Option<u16>, message: &str) {
        self.state
            .lock()
            .unwrap()
            .failures
            .insert(op, (status, message.to_string()));
    }

    pub fn clear_failure(&self, op: &'static str) {
        self.state.lock().unwrap().failures.remove(op);
    }

    pub fn set_compliance_status(&self, status: Option<&str>) {
        self.state.lock().unwrap().compliance_status = status.map(str::to_string);
    }

    pub fn set_export_url(&self, url: Option<&str>) {
        self.state.lock().unwrap().export_url = url.map(str::to_string);
    }

    pub fn calls(&self, op: &str) -> usize {
        self.state.lock().unwrap().calls.iter().filter(|c| **c == op).count()
    }

    pub fn total_calls(&self) -> usize {
        self.state.lock().unwrap().calls.len()
    }

    pub fn stored(&self, id: &str) -> ProjectDetail {
        let state = self.state.lock().unwrap();
        state.projects.iter().find(|d| d.project.id == id).cloned().unwrap()
    }

    fn enter(&self, op: &'static str) -> BrandResult<()> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(op);
        match state.failures.get(op) {
            Some((status, message)) => Err(BrandError::transport(*status, message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl BrandApi for FakeApi {
    async fn create_project(&self, request: &CreateProjectRequest) -> BrandResult<Project> {
        self.enter("create_project")?;
        let mut state = self.state.lock().unwrap();
        let id = format!("p{}", state.projects.len() + 1);
        let detail: ProjectDetail = serde_json::from_value(serde_json::json!({
            "project": {
                "id": id,
                "project_name": request.project_name,
                "molecule_names": request.molecule_names,
                "therapeutic_area": request.therapeutic_area,
                "key_differentiating_benefits": request.key_differentiating_benefits,
                "user_id": "demo-user"
            }
        }))?;
        let project = detail.project.clone();
        state.projects.push(detail);
        Ok(project)
    }

    async fn list_projects(&self, owner: Option<&UserId>) -> BrandResult<Vec<Project>> {
        self.enter("list_projects")?;
        let state = self.state.lock().unwrap();
        Ok(state
            .projects
            .iter()
            .map(|d| d.project.clone())
            .filter(|p| owner.is_none() || p.owner.as_ref() == owner)
            .collect())
    }

    async fn fetch_project(&self, id: &str) -> BrandResult<ProjectDetail> {
        self.enter("fetch_project")?;
        let state = self.state.lock().unwrap();
        state
            .projects
            .iter()
            .find(|d| d.project.id == id)
            .cloned()
            .ok_or_else(|| BrandError::NotFound(format!("project {id}")))
    }

    async fn update_package_field(
        &self,
        id: &str,
        field: PackageField,
        value: &str,
    ) -> BrandResult<FieldAck> {
        self.enter("update_package_field")?;
        let mut state = self.state.lock().unwrap();
        let detail = state
            .projects
            .iter_mut()
            .find(|d| d.project.id == id)
            .ok_or_else(|| BrandError::NotFound(format!("project {id}")))?;
        detail.brand_package.apply_field(field, value);
        Ok(FieldAck(serde_json::json!({"success": true})))
    }

    async fn request_compliance_check(&self, _id: &str) -> BrandResult<ComplianceCheckResponse> {
        self.enter("request_compliance_check")?;
        let state = self.state.lock().unwrap();
        Ok(ComplianceCheckResponse {
            status: state.compliance_status.clone(),
        })
    }

    async fn export_leaflet_pdf(&self, _id: &str) -> BrandResult<ExportResponse> {
        self.enter("export_leaflet_pdf")?;
        let state = self.state.lock().unwrap();
        Ok(ExportResponse {
            url: state.export_url.clone(),
        })
    }
}

/// Records opened URLs instead of opening them.
#[derive(Default)]
pub(crate) struct RecordingOpener {
    pub opened: Mutex<Vec<String>>,
}

impl LinkOpener for RecordingOpener {
    fn open(&self, url: &str) -> BrandResult<()> {
        self.opened.lock().unwrap().push(url.to_string());
        Ok(())
    }
}
