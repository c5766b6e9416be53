//! Project store: the loaded project, its brand package, and the editors
//! and workflows that mutate it.
//!
//! The local `brand_package` copy changes only in two ways: a successful
//! [`ProjectStore::load`], or a field commit the backend acknowledged and
//! that is still the latest submission for its field.

use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::api::{BrandApi, FieldAck, LinkOpener};
use crate::compliance::{CheckOutcome, ComplianceWorkflow};
use crate::editor::{FieldEditor, Resolution, Submission};
use crate::error::{BrandError, BrandResult};
use crate::insights::Insights;
use crate::package::{BrandPackage, ComplianceStatus, PackageField};
use crate::project::model::{Project, ProjectDetail};
use crate::session::Session;

/// Message shown when an export yields no usable link.
pub const EXPORT_FAILED: &str = "Export failed.";

/// A field update that has been submitted but not yet applied.
///
/// Sending does not borrow the store, so saves of different fields (or a
/// superseding save of the same field) can be in flight together.
#[derive(Debug, Clone)]
pub struct PendingCommit {
    project_id: String,
    submission: Submission,
}

impl PendingCommit {
    pub fn field(&self) -> PackageField {
        self.submission.field
    }

    pub fn value(&self) -> &str {
        &self.submission.value
    }

    /// Issue the update call.
    pub async fn send(&self, api: &dyn BrandApi) -> BrandResult<FieldAck> {
        api.update_package_field(&self.project_id, self.submission.field, &self.submission.value)
            .await
    }
}

pub struct ProjectStore {
    api: Arc<dyn BrandApi>,
    session: Option<Session>,
    detail: Option<ProjectDetail>,
    editors: [FieldEditor; 3],
    compliance: ComplianceWorkflow,
    error: Option<String>,
    export_error: Option<String>,
    feedback: Option<String>,
}

impl ProjectStore {
    pub fn new(api: Arc<dyn BrandApi>) -> Self {
        Self {
            api,
            session: None,
            detail: None,
            editors: PackageField::ALL.map(|field| FieldEditor::new(field, "")),
            compliance: ComplianceWorkflow::default(),
            error: None,
            export_error: None,
            feedback: None,
        }
    }

    pub fn with_session(mut self, session: Session) -> Self {
        self.session = Some(session);
        self
    }

    pub fn api(&self) -> Arc<dyn BrandApi> {
        Arc::clone(&self.api)
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn detail(&self) -> Option<&ProjectDetail> {
        self.detail.as_ref()
    }

    pub fn project(&self) -> Option<&Project> {
        self.detail.as_ref().map(|d| &d.project)
    }

    pub fn insights(&self) -> Option<&Insights> {
        self.detail.as_ref().map(|d| &d.insights)
    }

    pub fn brand_package(&self) -> Option<&BrandPackage> {
        self.detail.as_ref().map(|d| &d.brand_package)
    }

    pub fn editor(&self, field: PackageField) -> &FieldEditor {
        &self.editors[field.index()]
    }

    pub fn working_value(&self, field: PackageField) -> &str {
        self.editor(field).value()
    }

    pub fn compliance(&self) -> &ComplianceWorkflow {
        &self.compliance
    }

    /// Store-level error from the last failed load.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn export_error(&self) -> Option<&str> {
        self.export_error.as_deref()
    }

    /// Short confirmation from the last successful action.
    pub fn feedback(&self) -> Option<&str> {
        self.feedback.as_deref()
    }

    /// Projects owned by the session user, or all projects without a session.
    pub async fn list_owned_projects(&self) -> BrandResult<Vec<Project>> {
        let owner = self.session.as_ref().map(|s| &s.user_id);
        self.api.list_projects(owner).await
    }

    /// Fetch a project and replace everything held locally.
    ///
    /// On failure the previous data stays as it was.
    pub async fn load(&mut self, id: &str) -> BrandResult<()> {
        info!(project_id = %id, "Loading project");
        match self.api.fetch_project(id).await {
            Ok(detail) => {
                for editor in &mut self.editors {
                    editor.reseed(detail.brand_package.field_value(editor.field()));
                }
                self.compliance
                    .reset(detail.brand_package.compliance_status.clone());
                self.detail = Some(detail);
                self.error = None;
                self.export_error = None;
                self.feedback = None;
                Ok(())
            }
            Err(e) => {
                warn!(project_id = %id, error = %e, "Failed to load project");
                self.error = Some(e.user_message());
                Err(e)
            }
        }
    }

    /// Apply a keystroke to a field's working value.
    pub fn set_working_value(&mut self, field: PackageField, text: impl Into<String>) {
        self.editors[field.index()].input(text);
    }

    fn loaded_id(&self) -> BrandResult<String> {
        self.detail
            .as_ref()
            .map(|d| d.project.id.clone())
            .ok_or(BrandError::NotLoaded)
    }

    /// Submit `value` for `field`, superseding any save of that field still
    /// in flight.
    pub fn begin_commit(
        &mut self,
        field: PackageField,
        value: impl Into<String>,
    ) -> BrandResult<PendingCommit> {
        let project_id = self.loaded_id()?;
        let submission = self.editors[field.index()].submit(value.into());
        debug!(field = %field, generation = submission.generation, "Field submitted");
        Ok(PendingCommit {
            project_id,
            submission,
        })
    }

    /// Explicit save of the field's current working value.
    ///
    /// Refused while a save of the same field is outstanding.
    pub fn begin_save(&mut self, field: PackageField) -> BrandResult<PendingCommit> {
        let project_id = self.loaded_id()?;
        let submission = self.editors[field.index()].begin_save()?;
        Ok(PendingCommit {
            project_id,
            submission,
        })
    }

    /// Apply the backend's answer to a pending commit.
    ///
    /// Stale answers are dropped and reported as `Ok(Resolution::Stale)`.
    /// A failed save comes back as the backend's error, so `Ok` only ever
    /// carries `Saved` or `Stale`.
    pub fn finish_commit(
        &mut self,
        pending: PendingCommit,
        result: BrandResult<FieldAck>,
    ) -> BrandResult<Resolution> {
        let field = pending.field();
        if self.project().map(|p| p.id.as_str()) != Some(pending.project_id.as_str()) {
            debug!(field = %field, "Dropping response for a project that is no longer loaded");
            return Ok(Resolution::Stale);
        }

        let outcome = result.as_ref().map(|_| ()).map_err(BrandError::user_message);
        let resolution = self.editors[field.index()].resolve(&pending.submission, outcome);

        match &resolution {
            Resolution::Saved => {
                if let Some(detail) = self.detail.as_mut() {
                    detail.brand_package.apply_field(field, &pending.submission.value);
                }
                info!(project_id = %pending.project_id, field = %field, "Field saved");
                self.feedback = Some(format!("{} saved!", field.label()));
            }
            Resolution::Failed(message) => {
                warn!(project_id = %pending.project_id, field = %field, error = %message, "Field save failed");
                self.feedback = None;
            }
            Resolution::Stale => {
                debug!(field = %field, generation = pending.submission.generation, "Dropping stale field response");
            }
        }

        match result {
            Err(e) if resolution != Resolution::Stale => Err(e),
            _ => Ok(resolution),
        }
    }

    /// Submit, send and apply in one step.
    pub async fn commit_field(
        &mut self,
        field: PackageField,
        value: impl Into<String>,
    ) -> BrandResult<Resolution> {
        let pending = self.begin_commit(field, value)?;
        let result = pending.send(self.api.as_ref()).await;
        self.finish_commit(pending, result)
    }

    /// Save the field's working value, as the save button does.
    pub async fn save(&mut self, field: PackageField) -> BrandResult<Resolution> {
        let pending = self.begin_save(field)?;
        let result = pending.send(self.api.as_ref()).await;
        self.finish_commit(pending, result)
    }

    /// Ask the backend to evaluate compliance and adopt the returned status.
    pub async fn request_compliance_check(&mut self) -> BrandResult<ComplianceStatus> {
        let id = self.loaded_id()?;
        let ticket = self.compliance.begin_check();
        info!(project_id = %id, "Requesting compliance check");

        let result = self.api.request_compliance_check(&id).await;
        let status = result.as_ref().map(|r| r.resolved_status());
        let outcome = self
            .compliance
            .finish_check(ticket, status.map_err(BrandError::user_message));

        match outcome {
            CheckOutcome::Updated(status) => {
                if let Some(detail) = self.detail.as_mut() {
                    detail.brand_package.compliance_status = status.clone();
                }
                self.feedback = Some("Compliance check requested!".to_string());
                Ok(status)
            }
            CheckOutcome::Failed(message) => {
                warn!(project_id = %id, error = %message, "Compliance check failed");
                self.feedback = None;
                Err(result.err().unwrap_or_else(|| BrandError::transport(None, message)))
            }
            CheckOutcome::Stale => Ok(self.compliance.status().clone()),
        }
    }

    /// Export the leaflet as PDF and open the returned link.
    pub async fn export_leaflet(&mut self, opener: &dyn LinkOpener) -> BrandResult<String> {
        let id = self.loaded_id()?;
        self.export_error = None;

        let url = match self.api.export_leaflet_pdf(&id).await {
            Ok(response) => response.url.filter(|u| !u.trim().is_empty()),
            Err(e) => {
                warn!(project_id = %id, error = %e, "Leaflet export failed");
                self.export_error = Some(e.user_message());
                return Err(e);
            }
        };

        let Some(url) = url else {
            self.export_error = Some(EXPORT_FAILED.to_string());
            return Err(BrandError::Export(EXPORT_FAILED.to_string()));
        };

        opener.open(&url)?;
        info!(project_id = %id, url = %url, "Leaflet exported");
        Ok(url)
    }

    /// Open the link of one logo concept.
    pub fn export_logo(&mut self, index: usize, opener: &dyn LinkOpener) -> BrandResult<String> {
        let url = self
            .brand_package()
            .ok_or(BrandError::NotLoaded)?
            .logo_concepts
            .get(index)
            .map(|logo| logo.url.clone())
            .filter(|u| !u.trim().is_empty());

        let Some(url) = url else {
            self.export_error = Some(EXPORT_FAILED.to_string());
            return Err(BrandError::Export(EXPORT_FAILED.to_string()));
        };
        opener.open(&url)?;
        self.export_error = None;
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::EditorState;
    use crate::session::UserId;
    use crate::testing::{FakeApi, RecordingOpener};
    use pretty_assertions::assert_eq;

    fn backend() -> Arc<FakeApi> {
        Arc::new(FakeApi::with_project(serde_json::json!({
            "project": {"id": "p1", "user_id": "u1", "molecule_names": "Empagliflozin"},
            "insights": {"competitors": ["Jardiance"]},
            "brand_package": {
                "brand_names": ["Glucora", "Linavia"],
                "slogans": [{"en": "Old", "bn": "পুরাতন"}],
                "logo_concepts": [{"url": "https://img/glucora.png"}],
                "leaflet_json": {"sections": [{"title": "Introduction", "content": "Intro"}]}
            }
        })))
    }

    async fn loaded(api: &Arc<FakeApi>) -> ProjectStore {
        let mut store = ProjectStore::new(api.clone());
        store.load("p1").await.unwrap();
        store
    }

    #[tokio::test]
    async fn test_load_seeds_working_values() {
        let api = backend();
        let store = loaded(&api).await;

        assert_eq!(store.working_value(PackageField::Slogan), "Old");
        assert_eq!(store.working_value(PackageField::BrandName), "Glucora");
        assert_eq!(store.working_value(PackageField::Leaflet), "Intro");
        assert_eq!(store.compliance().status(), &ComplianceStatus::Pending);
    }

    #[tokio::test]
    async fn test_malformed_generated_package_still_loads() {
        let api = Arc::new(FakeApi::with_project(serde_json::json!({
            "project": {"id": "p2"},
            "brand_package": {
                "slogans": [{"en": "Old", "bn": null}],
                "leaflet_json": {"sections": {"Introduction": "x"}}
            }
        })));
        let mut store = ProjectStore::new(api.clone());
        store.load("p2").await.unwrap();

        assert_eq!(store.working_value(PackageField::Slogan), "Old");
        assert_eq!(store.working_value(PackageField::Leaflet), "");
    }

    #[tokio::test]
    async fn test_failed_load_keeps_previous_data() {
        let api = backend();
        let mut store = loaded(&api).await;
        store.set_working_value(PackageField::Slogan, "typed");

        api.fail("fetch_project", Some(500), "db down");
        assert!(store.load("p1").await.is_err());

        assert_eq!(store.error(), Some("db down"));
        assert_eq!(store.project().unwrap().id, "p1");
        assert_eq!(store.working_value(PackageField::Slogan), "typed");
    }

    #[tokio::test]
    async fn test_unknown_project_is_not_found() {
        let api = backend();
        let mut store = ProjectStore::new(api.clone());
        let err = store.load("nope").await.unwrap_err();
        assert!(matches!(err, BrandError::NotFound(_)));
        assert!(store.detail().is_none());
    }

    #[tokio::test]
    async fn test_commit_then_reload_round_trips() {
        let api = backend();
        let mut store = loaded(&api).await;

        let resolution = store.commit_field(PackageField::BrandName, "Diabriva").await.unwrap();
        assert_eq!(resolution, Resolution::Saved);
        assert_eq!(store.brand_package().unwrap().brand_names.entries()[1], "Linavia");
        assert_eq!(store.feedback(), Some("Brand name saved!"));
        assert_eq!(api.stored("p1").brand_package.brand_names.entries()[0], "Diabriva");

        store.load("p1").await.unwrap();
        assert_eq!(store.working_value(PackageField::BrandName), "Diabriva");
        assert!(store.editor(PackageField::BrandName).is_saved());
    }

    #[tokio::test]
    async fn test_failed_save_keeps_typed_text_and_shows_server_message() {
        let api = backend();
        let mut store = loaded(&api).await;
        api.fail("update_package_field", Some(500), "db down");

        store.set_working_value(PackageField::Leaflet, "New body");
        let err = store.save(PackageField::Leaflet).await.unwrap_err();

        assert_eq!(err.user_message(), "db down");
        let editor = store.editor(PackageField::Leaflet);
        assert_eq!(editor.value(), "New body");
        assert_eq!(editor.error(), Some("db down"));
        assert_eq!(editor.state(), EditorState::Editing);
        assert_eq!(store.brand_package().unwrap().field_value(PackageField::Leaflet), "Intro");
    }

    #[tokio::test]
    async fn test_failed_commit_is_returned_as_error() {
        let api = backend();
        let mut store = loaded(&api).await;
        api.fail("update_package_field", Some(500), "db down");

        let first = store.begin_commit(PackageField::Slogan, "A").unwrap();
        let second = store.begin_commit(PackageField::Slogan, "B").unwrap();
        let first_result = first.send(&*api).await;
        let second_result = second.send(&*api).await;

        assert_eq!(store.finish_commit(first, first_result).unwrap(), Resolution::Stale);
        let err = store.finish_commit(second, second_result).unwrap_err();
        assert_eq!(err.user_message(), "db down");
        assert_eq!(store.editor(PackageField::Slogan).error(), Some("db down"));
    }

    #[tokio::test]
    async fn test_later_submission_wins_regardless_of_arrival_order() {
        for second_arrives_first in [true, false] {
            let api = backend();
            let mut store = loaded(&api).await;

            let first = store.begin_commit(PackageField::Slogan, "A").unwrap();
            let second = store.begin_commit(PackageField::Slogan, "B").unwrap();
            let (first_result, second_result) =
                tokio::join!(first.send(&*api), second.send(&*api));

            if second_arrives_first {
                store.finish_commit(second, second_result).unwrap();
                store.finish_commit(first, first_result).unwrap();
            } else {
                store.finish_commit(first, first_result).unwrap();
                store.finish_commit(second, second_result).unwrap();
            }

            let editor = store.editor(PackageField::Slogan);
            assert_eq!(editor.confirmed(), "B");
            assert_eq!(editor.value(), "B");
            assert_eq!(store.brand_package().unwrap().field_value(PackageField::Slogan), "B");
        }
    }

    #[tokio::test]
    async fn test_save_refused_while_same_field_saving() {
        let api = backend();
        let mut store = loaded(&api).await;
        store.set_working_value(PackageField::BrandName, "X");

        let pending = store.begin_save(PackageField::BrandName).unwrap();
        assert!(matches!(
            store.begin_save(PackageField::BrandName),
            Err(BrandError::SaveInProgress(PackageField::BrandName))
        ));
        // Other fields are independent.
        assert!(store.begin_save(PackageField::Slogan).is_ok());

        let result = pending.send(&*api).await;
        assert_eq!(store.finish_commit(pending, result).unwrap(), Resolution::Saved);
    }

    #[tokio::test]
    async fn test_commit_requires_loaded_project() {
        let mut store = ProjectStore::new(Arc::new(FakeApi::new()));
        assert!(matches!(
            store.commit_field(PackageField::Slogan, "x").await,
            Err(BrandError::NotLoaded)
        ));
    }

    #[tokio::test]
    async fn test_compliance_defaults_to_approved_and_is_repeatable() {
        let api = backend();
        let mut store = loaded(&api).await;

        assert_eq!(store.request_compliance_check().await.unwrap(), ComplianceStatus::Approved);
        assert_eq!(store.request_compliance_check().await.unwrap(), ComplianceStatus::Approved);
        assert_eq!(api.calls("request_compliance_check"), 2);
        assert_eq!(
            store.brand_package().unwrap().compliance_status,
            ComplianceStatus::Approved
        );

        api.set_compliance_status(Some("rejected"));
        assert_eq!(store.request_compliance_check().await.unwrap(), ComplianceStatus::Rejected);
    }

    #[tokio::test]
    async fn test_failed_compliance_check_keeps_status() {
        let api = backend();
        let mut store = loaded(&api).await;
        store.request_compliance_check().await.unwrap();

        api.fail("request_compliance_check", Some(503), "evaluator offline");
        let err = store.request_compliance_check().await.unwrap_err();

        assert_eq!(err.user_message(), "evaluator offline");
        assert_eq!(store.compliance().status(), &ComplianceStatus::Approved);
        assert_eq!(store.compliance().error(), Some("evaluator offline"));
    }

    #[tokio::test]
    async fn test_export_opens_returned_url() {
        let api = backend();
        let mut store = loaded(&api).await;
        let opener = RecordingOpener::default();

        api.set_export_url(Some("https://x/y.pdf"));
        assert_eq!(store.export_leaflet(&opener).await.unwrap(), "https://x/y.pdf");
        assert_eq!(*opener.opened.lock().unwrap(), vec!["https://x/y.pdf".to_string()]);
    }

    #[tokio::test]
    async fn test_export_without_url_reports_failure() {
        let api = backend();
        let mut store = loaded(&api).await;
        let opener = RecordingOpener::default();

        api.set_export_url(None);
        let err = store.export_leaflet(&opener).await.unwrap_err();

        assert_eq!(err.user_message(), EXPORT_FAILED);
        assert_eq!(store.export_error(), Some(EXPORT_FAILED));
        assert!(opener.opened.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failed_export_surfaces_server_message() {
        let api = backend();
        let mut store = loaded(&api).await;
        let opener = RecordingOpener::default();

        api.fail("export_leaflet_pdf", Some(503), "pdf renderer offline");
        let err = store.export_leaflet(&opener).await.unwrap_err();

        assert_eq!(err.user_message(), "pdf renderer offline");
        assert_eq!(err.status(), Some(503));
        assert_eq!(store.export_error(), Some("pdf renderer offline"));
        assert!(opener.opened.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_export_logo_by_index() {
        let api = backend();
        let mut store = loaded(&api).await;
        let opener = RecordingOpener::default();

        assert_eq!(store.export_logo(0, &opener).unwrap(), "https://img/glucora.png");
        assert!(matches!(store.export_logo(3, &opener), Err(BrandError::Export(_))));
    }

    #[tokio::test]
    async fn test_list_uses_session_identity() {
        let api = backend();
        let store = ProjectStore::new(api.clone()).with_session(Session::new(UserId::new("u1")));
        assert_eq!(store.list_owned_projects().await.unwrap().len(), 1);

        let other = ProjectStore::new(api.clone()).with_session(Session::new(UserId::new("u2")));
        assert!(other.list_owned_projects().await.unwrap().is_empty());
    }
}
