//! Project domain models.

use serde::{Deserialize, Serialize};

use crate::insights::Insights;
use crate::package::model::null_as_default;
use crate::package::BrandPackage;
use crate::session::UserId;

/// Title shown for a project with neither a name nor a molecule.
pub const UNTITLED_PROJECT: &str = "Untitled Project";

/// A pharmaceutical product launch effort.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ProjectRecord")]
pub struct Project {
    pub id: String,
    pub name: Option<String>,
    pub molecule: Option<String>,
    pub therapeutic_area: Option<String>,
    pub benefits: Option<String>,
    pub owner: Option<UserId>,
    pub status: Option<String>,
    pub created_at: Option<String>,
}

impl Project {
    /// Name, else molecule, else a placeholder.
    pub fn display_title(&self) -> &str {
        [&self.name, &self.molecule]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .find(|s| !s.trim().is_empty())
            .unwrap_or(UNTITLED_PROJECT)
    }
}

/// Project row as the backend sends it.
///
/// List and create responses use the long column names; the fetch endpoint
/// adds short aliases next to them, so both spellings may be present.
#[derive(Debug, Deserialize)]
struct ProjectRecord {
    id: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    project_name: Option<String>,
    #[serde(default)]
    molecule: Option<String>,
    #[serde(default)]
    molecule_names: Option<String>,
    #[serde(default)]
    therapeutic_area: Option<String>,
    #[serde(default)]
    benefits: Option<String>,
    #[serde(default)]
    key_differentiating_benefits: Option<String>,
    #[serde(default)]
    owner: Option<UserId>,
    #[serde(default)]
    user_id: Option<UserId>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    created_at: Option<String>,
}

impl From<ProjectRecord> for Project {
    fn from(row: ProjectRecord) -> Self {
        Self {
            id: row.id,
            name: row.name.or(row.project_name),
            molecule: row.molecule.or(row.molecule_names),
            therapeutic_area: row.therapeutic_area,
            benefits: row.benefits.or(row.key_differentiating_benefits),
            owner: row.owner.or(row.user_id),
            status: row.status,
            created_at: row.created_at,
        }
    }
}

/// Everything the backend returns for one project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectDetail {
    pub project: Project,
    #[serde(default, deserialize_with = "null_as_default")]
    pub insights: Insights,
    #[serde(default, deserialize_with = "null_as_default")]
    pub brand_package: BrandPackage,
}

/// Body of the create-project request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateProjectRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,
    pub molecule_names: String,
    pub therapeutic_area: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_differentiating_benefits: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub natural_language_prompt: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_project_from_list_row() {
        let project: Project = serde_json::from_value(serde_json::json!({
            "id": "p1",
            "user_id": "u1",
            "project_name": null,
            "molecule_names": "Empagliflozin 10mg",
            "therapeutic_area": "Type 2 Diabetes",
            "key_differentiating_benefits": "Once daily"
        }))
        .unwrap();

        assert_eq!(project.owner, Some(UserId::new("u1")));
        assert_eq!(project.molecule.as_deref(), Some("Empagliflozin 10mg"));
        assert_eq!(project.benefits.as_deref(), Some("Once daily"));
        assert_eq!(project.display_title(), "Empagliflozin 10mg");
    }

    #[test]
    fn test_project_with_both_spellings() {
        let project: Project = serde_json::from_value(serde_json::json!({
            "id": "p1",
            "molecule_names": "A",
            "molecule": "A",
            "key_differentiating_benefits": "B",
            "benefits": "B"
        }))
        .unwrap();
        assert_eq!(project.molecule.as_deref(), Some("A"));
        assert_eq!(project.benefits.as_deref(), Some("B"));
    }

    #[test]
    fn test_display_title_falls_back() {
        let project: Project = serde_json::from_value(serde_json::json!({"id": "p9", "project_name": ""})).unwrap();
        assert_eq!(project.display_title(), UNTITLED_PROJECT);
    }

    #[test]
    fn test_detail_tolerates_null_sections() {
        let detail: ProjectDetail = serde_json::from_value(serde_json::json!({
            "project": {"id": "p1"},
            "insights": null,
            "brand_package": {"slogans": [{"en": "Old"}], "leaflet_json": null}
        }))
        .unwrap();
        assert!(detail.insights.competitors.is_empty());
        assert_eq!(detail.brand_package.slogans.len(), 1);
    }

    #[test]
    fn test_create_request_omits_empty_optionals() {
        let request = CreateProjectRequest {
            molecule_names: "M".into(),
            therapeutic_area: "T".into(),
            ..Default::default()
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json, serde_json::json!({"molecule_names": "M", "therapeutic_area": "T"}));
    }
}
