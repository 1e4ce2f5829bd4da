use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::OnceLock;

const RAL_CLASSIC: &str = include_str!("../data/ral_classic.json");

/// Fill used when no palette colour can be resolved (olive).
pub const DEFAULT_PAINT_COLOUR: u32 = 0x708238;

/// Colour system the customer specified the paint in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ColourStandard {
    #[serde(rename = "RAL")]
    Ral,
    #[serde(rename = "BS")]
    Bs,
    #[serde(rename = "NCS")]
    Ncs,
    #[default]
    Other,
}

impl ColourStandard {
    pub fn as_str(self) -> &'static str {
        match self {
            ColourStandard::Ral => "RAL",
            ColourStandard::Bs => "BS",
            ColourStandard::Ncs => "NCS",
            ColourStandard::Other => "Other",
        }
    }

    /// Lenient parse of a stored label; unrecognised labels read as `Other`.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_uppercase().as_str() {
            "RAL" => ColourStandard::Ral,
            "BS" => ColourStandard::Bs,
            "NCS" => ColourStandard::Ncs,
            _ => ColourStandard::Other,
        }
    }
}

#[derive(Deserialize)]
struct RalEntry {
    code: String,
    hex: String,
}

fn ral_palette() -> &'static HashMap<String, u32> {
    static PALETTE: OnceLock<HashMap<String, u32>> = OnceLock::new();
    PALETTE.get_or_init(|| {
        let entries: Vec<RalEntry> = match serde_json::from_str(RAL_CLASSIC) {
            Ok(entries) => entries,
            Err(err) => {
                tracing::error!("built-in RAL palette is unreadable: {err}");
                Vec::new()
            }
        };
        entries
            .into_iter()
            .filter_map(|entry| {
                let hex = entry.hex.trim_start_matches('#');
                u32::from_str_radix(hex, 16)
                    .ok()
                    .map(|rgb| (entry.code, rgb))
            })
            .collect()
    })
}

/// Look up a RAL Classic code such as `"9010"`.
pub fn ral_colour(code: &str) -> Option<u32> {
    ral_palette().get(code.trim()).copied()
}

/// Colour to paint the proxy with for the given specification.
pub fn paint_colour(standard: ColourStandard, code: &str) -> u32 {
    match standard {
        ColourStandard::Ral => ral_colour(code).unwrap_or(DEFAULT_PAINT_COLOUR),
        _ => DEFAULT_PAINT_COLOUR,
    }
}

/// `#RRGGBB` form of a packed colour.
pub fn to_hex(colour: u32) -> String {
    format!("#{:06X}", colour & 0x00FF_FFFF)
}
