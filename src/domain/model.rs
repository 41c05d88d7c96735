use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Placeholder used when a species record carries no scientific name.
pub const UNKNOWN_SCIENTIFIC_NAME: &str = "Unknown";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VernacularName {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpeciesRecord {
    #[serde(rename = "scientificName", default)]
    pub scientific_name: Option<String>,
    #[serde(rename = "vernacularNames", default, deserialize_with = "null_as_empty")]
    pub vernacular_names: Vec<VernacularName>,
}

impl SpeciesRecord {
    pub fn scientific_name_or_default(&self) -> &str {
        self.scientific_name
            .as_deref()
            .unwrap_or(UNKNOWN_SCIENTIFIC_NAME)
    }
}

pub type SpeciesCollection = Vec<SpeciesRecord>;

/// Structured answer produced by the generative model for one fruit.
///
/// Every field is kept exactly as the model wrote it, whatever its JSON type.
/// Absent fields stay `None` and are left out on write; fields the model adds
/// are kept in `extra` and written back out untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FruitQueryResult {
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "present")]
    pub fruit: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "present")]
    pub scientific_name: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "present")]
    pub etymology: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "present")]
    pub origin: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "present")]
    pub cultivation_practices: Option<Value>,
    /// Usually numbered citations (`"1"` etymology, `"2"` origin, `"3"` cultivation),
    /// but any JSON the model returns is kept.
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "present")]
    pub references: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FruitQueryResult {
    pub fn fruit(&self) -> Option<&str> {
        self.fruit.as_ref().and_then(Value::as_str)
    }

    pub fn scientific_name(&self) -> Option<&str> {
        self.scientific_name.as_ref().and_then(Value::as_str)
    }
}

pub type ResultBatch = Vec<FruitQueryResult>;

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    })
}

/// A field that is present maps to `Some`, even when its value is `null`.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
