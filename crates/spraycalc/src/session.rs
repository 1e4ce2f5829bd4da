use crate::colour::{paint_colour, ColourStandard};
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Last-used form metadata carried across sessions.
///
/// Dimensions and face selections are never part of this record.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionMeta {
    pub project_name: Option<String>,
    pub client_site: Option<String>,
    pub colour_name: Option<String>,
    pub colour_standard: Option<String>,
    pub ral_code: Option<String>,
    pub paint_manufacturer: Option<String>,
    pub paint_location: Option<String>,
    pub element_type: Option<String>,
    pub price_per_m2: Option<String>,
    pub price_tier: Option<String>,
}

impl SessionMeta {
    /// Parse a stored record field by field.
    ///
    /// A document that is not a JSON object yields the defaults; a field with an
    /// unusable value is skipped and the rest are kept.
    pub fn from_json_lenient(json: &str) -> Self {
        let value: Value = match serde_json::from_str(json) {
            Ok(value) => value,
            Err(err) => {
                warn!("ignoring unreadable session record: {err}");
                return Self::default();
            }
        };
        let Some(map) = value.as_object() else {
            warn!("ignoring session record that is not an object");
            return Self::default();
        };

        Self {
            project_name: string_field(map, "projectName"),
            client_site: string_field(map, "clientSite"),
            colour_name: string_field(map, "colourName"),
            colour_standard: string_field(map, "colourStandard"),
            ral_code: string_field(map, "ralCode"),
            paint_manufacturer: string_field(map, "paintManufacturer"),
            paint_location: string_field(map, "paintLocation"),
            element_type: string_field(map, "elementType"),
            price_per_m2: string_field(map, "pricePerM2"),
            price_tier: string_field(map, "priceTier"),
        }
    }

    pub fn colour_standard(&self) -> ColourStandard {
        self.colour_standard
            .as_deref()
            .map(ColourStandard::from_label)
            .unwrap_or_default()
    }

    /// Paint colour for the proxy, from the stored colour standard and code.
    pub fn paint_colour(&self) -> u32 {
        paint_colour(self.colour_standard(), self.ral_code.as_deref().unwrap_or(""))
    }
}

fn string_field(map: &Map<String, Value>, key: &str) -> Option<String> {
    match map.get(key) {
        None | Some(Value::Null) => None,
        Some(Value::String(text)) if text.is_empty() => None,
        Some(Value::String(text)) => Some(text.clone()),
        Some(Value::Number(number)) => Some(number.to_string()),
        Some(other) => {
            warn!(field = key, "ignoring session field with unexpected value {other}");
            None
        }
    }
}

/// JSON file holding the last-used [`SessionMeta`].
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the default location (`~/.spraycalc/session.json`).
    pub fn at_default_path() -> Result<Self> {
        Ok(Self::new(Self::default_path()?))
    }

    /// Resolve the default session path (`~/.spraycalc/session.json`).
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| anyhow!("could not determine home directory"))?;
        Ok(home.join(".spraycalc").join("session.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Best-effort load: missing or unreadable files yield defaults.
    pub fn load(&self) -> SessionMeta {
        if !self.path.exists() {
            return SessionMeta::default();
        }
        match fs::read_to_string(&self.path) {
            Ok(data) => SessionMeta::from_json_lenient(&data),
            Err(err) => {
                warn!("could not read session {}: {err}", self.path.display());
                SessionMeta::default()
            }
        }
    }

    /// Persist the record, ensuring the directory exists.
    pub fn save(&self, meta: &SessionMeta) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create session directory {}", parent.display()))?;
        }
        let data = serde_json::to_vec_pretty(meta).context("serialize session")?;
        fs::write(&self.path, data)
            .with_context(|| format!("write session {}", self.path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colour::DEFAULT_PAINT_COLOUR;

    #[test]
    fn corrupt_document_yields_defaults() {
        assert_eq!(SessionMeta::from_json_lenient("{not json"), SessionMeta::default());
        assert_eq!(SessionMeta::from_json_lenient("[1, 2]"), SessionMeta::default());
    }

    #[test]
    fn bad_fields_are_skipped_individually() {
        let meta = SessionMeta::from_json_lenient(
            r#"{
                "projectName": "Kitchen",
                "clientSite": {"nested": true},
                "pricePerM2": 30,
                "elementType": "",
                "paintLocation": "external"
            }"#,
        );
        assert_eq!(meta.project_name.as_deref(), Some("Kitchen"));
        assert_eq!(meta.client_site, None);
        assert_eq!(meta.price_per_m2.as_deref(), Some("30"));
        assert_eq!(meta.element_type, None);
        assert_eq!(meta.paint_location.as_deref(), Some("external"));
    }

    #[test]
    fn uses_camel_case_keys() {
        let meta = SessionMeta {
            ral_code: Some("9010".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_string(&meta).expect("serialize");
        assert!(json.contains("\"ralCode\":\"9010\""));
    }

    #[test]
    fn paint_colour_follows_ral_code() {
        let meta = SessionMeta {
            colour_standard: Some("RAL".to_string()),
            ral_code: Some("9010".to_string()),
            ..Default::default()
        };
        assert_eq!(meta.paint_colour(), 0xFAFAFA);
        assert_eq!(SessionMeta::default().paint_colour(), DEFAULT_PAINT_COLOUR);
    }
}
