//! Brand package model and its editable fields.

pub mod model;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use model::{BrandPackage, ComplianceStatus, Leaflet, LeafletSection, LogoConcept, Slogan, Variants};

/// The three brand-package fields a user can edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PackageField {
    BrandName,
    Slogan,
    Leaflet,
}

impl PackageField {
    pub const ALL: [PackageField; 3] = [Self::BrandName, Self::Slogan, Self::Leaflet];

    /// Convert to string. Doubles as the update endpoint's path segment.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BrandName => "brand_name",
            Self::Slogan => "slogan",
            Self::Leaflet => "leaflet",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::BrandName => "Brand name",
            Self::Slogan => "Slogan",
            Self::Leaflet => "Leaflet",
        }
    }

    pub(crate) fn index(&self) -> usize {
        match self {
            Self::BrandName => 0,
            Self::Slogan => 1,
            Self::Leaflet => 2,
        }
    }
}

impl fmt::Display for PackageField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
