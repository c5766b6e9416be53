//! Project creation: local validation, then a single create call.

use tracing::{info, warn};

use crate::api::BrandApi;
use crate::error::{BrandError, BrandResult};
use crate::project::model::{CreateProjectRequest, Project};

/// Shown when neither a brief nor the structured fields were given.
pub const MISSING_FIELDS_MESSAGE: &str =
    "Molecule names and Therapeutic Area are required if not using a natural language prompt.";

const ALREADY_CREATED_MESSAGE: &str = "This project has already been created.";

/// The new-project form, as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateProjectForm {
    pub project_name: String,
    pub molecule_names: String,
    pub therapeutic_area: String,
    pub key_differentiating_benefits: String,
    pub natural_language_prompt: String,
}

fn non_empty(s: &str) -> Option<String> {
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_string())
}

impl CreateProjectForm {
    /// Valid iff a brief is given, or both molecule and therapeutic area are.
    pub fn validate(&self) -> BrandResult<CreateProjectRequest> {
        let prompt = non_empty(&self.natural_language_prompt);
        let molecule = non_empty(&self.molecule_names);
        let area = non_empty(&self.therapeutic_area);

        if prompt.is_none() && (molecule.is_none() || area.is_none()) {
            return Err(BrandError::validation(MISSING_FIELDS_MESSAGE));
        }

        Ok(CreateProjectRequest {
            project_name: non_empty(&self.project_name),
            molecule_names: molecule.unwrap_or_default(),
            therapeutic_area: area.unwrap_or_default(),
            key_differentiating_benefits: non_empty(&self.key_differentiating_benefits),
            natural_language_prompt: prompt,
        })
    }
}

/// Form-scoped creation workflow.
#[derive(Debug, Default)]
pub struct ProjectCreationFlow {
    form: CreateProjectForm,
    submitting: bool,
    error: Option<String>,
    created: Option<Project>,
}

impl ProjectCreationFlow {
    pub fn new(form: CreateProjectForm) -> Self {
        Self {
            form,
            ..Default::default()
        }
    }

    pub fn form(&self) -> &CreateProjectForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut CreateProjectForm {
        &mut self.form
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn created(&self) -> Option<&Project> {
        self.created.as_ref()
    }

    pub fn is_complete(&self) -> bool {
        self.created.is_some()
    }

    /// Validate and submit the form.
    ///
    /// `on_created` runs once with the new project. On any failure the form
    /// is left as typed so the user can retry.
    pub async fn submit<F>(&mut self, api: &dyn BrandApi, on_created: F) -> BrandResult<Project>
    where
        F: FnOnce(&Project),
    {
        if self.created.is_some() {
            return Err(BrandError::validation(ALREADY_CREATED_MESSAGE));
        }

        let request = match self.form.validate() {
            Ok(request) => request,
            Err(e) => {
                self.error = Some(e.user_message());
                return Err(e);
            }
        };

        self.submitting = true;
        self.error = None;
        let result = api.create_project(&request).await;
        self.submitting = false;

        match result {
            Ok(project) => {
                info!(project_id = %project.id, "Project created");
                on_created(&project);
                self.created = Some(project.clone());
                Ok(project)
            }
            Err(e) => {
                warn!(error = %e, "Project creation failed");
                self.error = Some(e.user_message());
                Err(e)
            }
        }
    }
}
