//! Brand package domain models.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

use super::PackageField;

/// Locale whose slogan text is the editable one.
pub const ACTIVE_SLOGAN_LOCALE: &str = "en";

/// Title given to a leaflet section created by an edit on an empty leaflet.
pub const DEFAULT_SECTION_TITLE: &str = "Leaflet";

/// Treat an explicit JSON `null` like a missing value.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Any value of the wrong shape reads as the default.
fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    Ok(serde_json::from_value(Value::deserialize(deserializer)?).unwrap_or_default())
}

/// Non-strings (null, arrays, objects) read as empty text.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        _ => String::new(),
    })
}

/// Accept only an array; malformed entries keep their position as defaults.
fn lenient_variants<'de, D, T>(deserializer: D) -> Result<Variants<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let Value::Array(items) = Value::deserialize(deserializer)? else {
        return Ok(Variants::default());
    };
    Ok(Variants::new(
        items
            .into_iter()
            .map(|item| serde_json::from_value(item).unwrap_or_default())
            .collect(),
    ))
}

/// A backing sequence of candidates plus the index of the editable entry.
///
/// Serialized as a plain JSON array; the active index is local state and
/// always starts at 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variants<T> {
    entries: Vec<T>,
    active: usize,
}

impl<T> Variants<T> {
    pub fn new(entries: Vec<T>) -> Self {
        Self { entries, active: 0 }
    }

    pub fn entries(&self) -> &[T] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    /// The currently editable entry, if the sequence reaches that far.
    pub fn active(&self) -> Option<&T> {
        self.entries.get(self.active)
    }

    pub fn active_mut(&mut self) -> Option<&mut T> {
        self.entries.get_mut(self.active)
    }

    /// Make another entry the editable one. Returns false when out of range.
    ///
    /// Local only: the update endpoints always write position 0, and the
    /// store's editors are not reseeded when the index moves.
    pub fn select(&mut self, index: usize) -> bool {
        if index < self.entries.len() {
            self.active = index;
            true
        } else {
            false
        }
    }

    /// Replace the active entry, or append when the sequence is too short.
    ///
    /// Other entries are left untouched.
    pub fn replace_active(&mut self, value: T) {
        match self.entries.get_mut(self.active) {
            Some(slot) => *slot = value,
            None => {
                self.entries.push(value);
                self.active = self.entries.len() - 1;
            }
        }
    }
}

impl<T> Default for Variants<T> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<T> From<Vec<T>> for Variants<T> {
    fn from(entries: Vec<T>) -> Self {
        Self::new(entries)
    }
}

impl<T: Serialize> Serialize for Variants<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.entries.serialize(serializer)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Variants<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<T>::deserialize(deserializer).map(Self::new)
    }
}

/// One slogan, keyed by locale (`en`, `bn`, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Slogan(pub BTreeMap<String, String>);

impl<'de> Deserialize<'de> for Slogan {
    /// Locales without a text value are skipped.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let Value::Object(map) = Value::deserialize(deserializer)? else {
            return Ok(Self::default());
        };
        Ok(Self(
            map.into_iter()
                .filter_map(|(locale, text)| match text {
                    Value::String(text) => Some((locale, text)),
                    _ => None,
                })
                .collect(),
        ))
    }
}

impl Slogan {
    pub fn text(&self, locale: &str) -> Option<&str> {
        self.0.get(locale).map(String::as_str)
    }

    pub fn set_text(&mut self, locale: &str, text: impl Into<String>) {
        self.0.insert(locale.to_string(), text.into());
    }
}

/// A generated logo concept. Read-only, export only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogoConcept {
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeafletSection {
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub content: String,
}

/// Leaflet draft as produced by the generator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Leaflet {
    #[serde(default, deserialize_with = "lenient_variants")]
    pub sections: Variants<LeafletSection>,
    /// Layout keys the client does not interpret.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Regulatory compliance status of a brand package.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum ComplianceStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
    /// A status this client does not know yet.
    Other(String),
}

impl ComplianceStatus {
    /// Parse from string.
    pub fn from_str(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "" | "pending" => Self::Pending,
            "approved" => Self::Approved,
            "rejected" => Self::Rejected,
            other => Self::Other(other.to_string()),
        }
    }

    /// Convert to string.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Other(s) => s,
        }
    }
}

impl fmt::Display for ComplianceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ComplianceStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ComplianceStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.map(|s| Self::from_str(&s)).unwrap_or_default())
    }
}

/// The generated, editable bundle attached to a project.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BrandPackage {
    #[serde(default, deserialize_with = "null_as_default")]
    pub brand_names: Variants<String>,
    #[serde(default, deserialize_with = "lenient_variants")]
    pub slogans: Variants<Slogan>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub logo_concepts: Vec<LogoConcept>,
    #[serde(default, deserialize_with = "or_default")]
    pub leaflet_json: Leaflet,
    #[serde(default)]
    pub compliance_status: ComplianceStatus,
}

impl BrandPackage {
    /// Current text of an editable field, empty when the backing entry is missing.
    pub fn field_value(&self, field: PackageField) -> String {
        match field {
            PackageField::BrandName => self.brand_names.active().cloned(),
            PackageField::Slogan => self
                .slogans
                .active()
                .and_then(|s| s.text(ACTIVE_SLOGAN_LOCALE))
                .map(str::to_string),
            PackageField::Leaflet => self
                .leaflet_json
                .sections
                .active()
                .map(|s| s.content.clone()),
        }
        .unwrap_or_default()
    }

    /// Write an editable field into the active entry of its backing sequence.
    pub fn apply_field(&mut self, field: PackageField, value: &str) {
        match field {
            PackageField::BrandName => self.brand_names.replace_active(value.to_string()),
            PackageField::Slogan => match self.slogans.active_mut() {
                Some(slogan) => slogan.set_text(ACTIVE_SLOGAN_LOCALE, value),
                None => {
                    let mut slogan = Slogan::default();
                    slogan.set_text(ACTIVE_SLOGAN_LOCALE, value);
                    self.slogans.replace_active(slogan);
                }
            },
            PackageField::Leaflet => match self.leaflet_json.sections.active_mut() {
                Some(section) => section.content = value.to_string(),
                None => self.leaflet_json.sections.replace_active(LeafletSection {
                    title: DEFAULT_SECTION_TITLE.to_string(),
                    content: value.to_string(),
                }),
            },
        }
    }
}
