//! Projects and the flow that creates them.

pub mod creation;
pub mod model;

pub use creation::{CreateProjectForm, ProjectCreationFlow, MISSING_FIELDS_MESSAGE};
pub use model::{CreateProjectRequest, Project, ProjectDetail};
