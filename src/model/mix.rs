use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// The collections mixes are persisted in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum Collection {
    Liquids,
    Bases,
}

impl Collection {
    /// Page listing the collection, where a successful creation lands.
    pub fn listing_path(&self) -> &'static str {
        match self {
            Collection::Liquids => "/liquids",
            Collection::Bases => "/bases",
        }
    }
}

/// Fields as submitted by the liquid and base creation forms.
///
/// Values are taken as-is: nothing here checks that the strength or the PG/VG
/// ratios are numbers, or that any field is present at all. The backend owns
/// the column types and constraints and rejects what it cannot store.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MixForm {
    pub name: Option<String>,
    pub nicotine_type: Option<String>,
    pub nicotine_strength: Option<String>,
    pub pg_content: Option<String>,
    pub vg_content: Option<String>,
}

/// A liquid or base row.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MixRecord {
    #[serde(default, deserialize_with = "opaque")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "opaque")]
    pub nicotine_type: Option<String>,
    #[serde(default, deserialize_with = "opaque")]
    pub nicotine_strength: Option<String>,
    #[serde(default, deserialize_with = "opaque")]
    pub pg: Option<String>,
    #[serde(default, deserialize_with = "opaque")]
    pub vg: Option<String>,
}

impl From<MixForm> for MixRecord {
    fn from(form: MixForm) -> Self {
        Self {
            name: form.name,
            nicotine_type: form.nicotine_type,
            nicotine_strength: form.nicotine_strength,
            pg: form.pg_content,
            vg: form.vg_content,
        }
    }
}

// Numeric columns come back as JSON numbers.
fn opaque<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::String(value) => Some(value),
        other => Some(other.to_string()),
    })
}
