//! Strategic insights: a read-only snapshot fetched with the project.

use serde::{Deserialize, Deserializer, Serialize};

use crate::package::model::null_as_default;

/// A palette entry suggested for the brand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaletteColor {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub hex: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl PaletteColor {
    /// True when `hex` is a `#RRGGBB` color.
    pub fn is_valid_hex(&self) -> bool {
        let bytes = self.hex.as_bytes();
        bytes.len() == 7 && bytes[0] == b'#' && bytes[1..].iter().all(u8::is_ascii_hexdigit)
    }
}

/// A cited clinical trial. Only the name is interpreted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClinicalTrial {
    pub name: String,
    #[serde(flatten)]
    pub details: serde_json::Map<String, serde_json::Value>,
}

impl<'de> Deserialize<'de> for ClinicalTrial {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Record {
            #[serde(default)]
            name: String,
            #[serde(flatten)]
            details: serde_json::Map<String, serde_json::Value>,
        }

        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Name(String),
            Record(Record),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Name(name) => Self {
                name,
                details: serde_json::Map::new(),
            },
            Raw::Record(Record { name, details }) => Self { name, details },
        })
    }
}

/// Server-derived insights. Never mutated by the client.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Insights {
    #[serde(default, deserialize_with = "null_as_default")]
    pub competitors: Vec<String>,
    #[serde(default)]
    pub brand_positioning: Option<String>,
    #[serde(default, deserialize_with = "lenient_palette")]
    pub color_palette: Vec<PaletteColor>,
    #[serde(default, alias = "cited_trials", deserialize_with = "null_as_default")]
    pub clinical_trials: Vec<ClinicalTrial>,
}

impl Insights {
    /// Palette entries with a well-formed hex code.
    pub fn valid_colors(&self) -> impl Iterator<Item = &PaletteColor> {
        self.color_palette.iter().filter(|c| c.is_valid_hex())
    }

    pub fn trial_names(&self) -> Vec<&str> {
        self.clinical_trials.iter().map(|t| t.name.as_str()).collect()
    }
}

/// Accept only an array of color objects; anything else reads as empty.
fn lenient_palette<'de, D>(deserializer: D) -> Result<Vec<PaletteColor>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let serde_json::Value::Array(items) = value else {
        return Ok(Vec::new());
    };
    Ok(items
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect())
}
