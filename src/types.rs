use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Root `site.json` document. Only `title` and `items` are required; the rest is best-effort.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub metadata: SiteMetadata,
    pub items: Vec<ItemRecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SiteMetadata {
    #[serde(default, deserialize_with = "null_as_default")]
    pub site: SiteInfo,
    #[serde(default, deserialize_with = "null_as_default")]
    pub theme: ThemeInfo,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SiteInfo {
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub created: Option<Value>,
    #[serde(default)]
    pub updated: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThemeInfo {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub variables: ThemeVariables,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeVariables {
    #[serde(default)]
    pub hex_code: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
}

/// One content entry of a manifest.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemRecord {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub metadata: ItemMetadata,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemMetadata {
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub created: Option<Value>,
    #[serde(default)]
    pub updated: Option<Value>,
    #[serde(default)]
    pub readtime: Option<Value>,
}

// `"metadata": null` is treated like a missing key.
fn null_as_default<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(d)?.unwrap_or_default())
}

/// Keys a body must carry before it is accepted as a manifest.
pub const REQUIRED_KEYS: &[&str] = &["title", "items"];

/// Shallow shape check, then lenient deserialization. `None` means the schema is violated.
pub fn manifest_from_value(body: Value) -> Option<Manifest> {
    let obj = body.as_object()?;
    if REQUIRED_KEYS.iter().any(|k| !obj.contains_key(*k)) {
        return None;
    }
    if !obj["title"].is_string() || !obj["items"].is_array() {
        return None;
    }
    serde_json::from_value(body).ok()
}

/// Render a loose JSON scalar as display text (`4` and `"4"` both become `4`).
pub(crate) fn scalar_text(v: Option<&Value>) -> Option<String> {
    match v? {
        Value::String(s) => Some(s.trim().to_string()).filter(|s| !s.is_empty()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
