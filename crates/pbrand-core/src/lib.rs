//! PharmaBrand Core Library
//!
//! Domain models and editing workflows for pharmaceutical brand packages:
//! project creation, the project store with its per-field editors, and the
//! compliance-check workflow. Network access goes through [`api::BrandApi`].

pub mod api;
pub mod compliance;
pub mod editor;
pub mod error;
pub mod insights;
pub mod package;
pub mod project;
pub mod session;
pub mod store;

#[cfg(test)]
mod testing;

pub use api::{BrandApi, LinkOpener};
pub use error::{BrandError, BrandResult};
pub use package::PackageField;
pub use session::{Session, UserId};
pub use store::ProjectStore;
