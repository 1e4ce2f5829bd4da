use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

const BUILTIN_PRICE_TABLE: &str = include_str!("../data/price_table.json");

/// How a deployment prices painted area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PricingMode {
    /// The user types a price per m².
    #[default]
    Flat,
    /// The price per m² comes from the price table.
    Tiered,
}

/// Where the painted element will live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaintLocation {
    #[default]
    Internal,
    External,
}

impl PaintLocation {
    pub fn as_str(self) -> &'static str {
        match self {
            PaintLocation::Internal => "internal",
            PaintLocation::External => "external",
        }
    }

    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "internal" => Some(PaintLocation::Internal),
            "external" => Some(PaintLocation::External),
            _ => None,
        }
    }
}

impl fmt::Display for PaintLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PaintLocation::Internal => "Internal",
            PaintLocation::External => "External",
        })
    }
}

/// Price level used by the tiered table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum PriceTier {
    #[default]
    One,
    Two,
    Three,
}

impl PriceTier {
    pub fn number(self) -> u8 {
        match self {
            PriceTier::One => 1,
            PriceTier::Two => 2,
            PriceTier::Three => 3,
        }
    }

    fn index(self) -> usize {
        usize::from(self.number() - 1)
    }

    pub fn from_number(number: u8) -> Option<Self> {
        match number {
            1 => Some(PriceTier::One),
            2 => Some(PriceTier::Two),
            3 => Some(PriceTier::Three),
            _ => None,
        }
    }
}

impl TryFrom<u8> for PriceTier {
    type Error = String;

    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        PriceTier::from_number(value).ok_or_else(|| format!("price tier must be 1-3, got {value}"))
    }
}

impl From<PriceTier> for u8 {
    fn from(tier: PriceTier) -> Self {
        tier.number()
    }
}

/// Prices per m² for one element type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceTableEntry {
    pub element_type: String,
    pub internal: [f64; 3],
    pub external: [f64; 3],
}

impl PriceTableEntry {
    pub fn unit_price(&self, location: PaintLocation, tier: PriceTier) -> f64 {
        let row = match location {
            PaintLocation::Internal => &self.internal,
            PaintLocation::External => &self.external,
        };
        row[tier.index()]
    }
}

/// Reference prices keyed by element type, in display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct PriceTable {
    pub entries: Vec<PriceTableEntry>,
}

impl PriceTable {
    /// The table shipped with the crate.
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_PRICE_TABLE).context("parse built-in price table")
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let table: PriceTable = serde_json::from_str(json).context("deserialize price table")?;
        Ok(table)
    }

    /// Load a table from a JSON file.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path)
            .with_context(|| format!("read price table {}", path.display()))?;
        Self::from_json(&data).with_context(|| format!("load price table {}", path.display()))
    }

    pub fn entry(&self, element_type: &str) -> Option<&PriceTableEntry> {
        self.entries
            .iter()
            .find(|entry| entry.element_type == element_type)
    }

    /// Element type labels in table order.
    pub fn element_types(&self) -> Vec<&str> {
        self.entries
            .iter()
            .map(|entry| entry.element_type.as_str())
            .collect()
    }

    pub fn lookup(&self, element_type: &str, location: PaintLocation, tier: PriceTier) -> Option<f64> {
        self.entry(element_type)
            .map(|entry| entry.unit_price(location, tier))
    }
}

/// The inputs that determine the price per m².
#[derive(Debug, Clone, PartialEq)]
pub enum PricingSpec {
    Flat {
        unit_price: Option<f64>,
    },
    Tiered {
        element_type: Option<String>,
        location: PaintLocation,
        tier: PriceTier,
    },
}

impl PricingSpec {
    /// Resolve the price per m², if there is a usable one.
    pub fn unit_price(&self, table: &PriceTable) -> Option<f64> {
        let resolved = match self {
            PricingSpec::Flat { unit_price } => *unit_price,
            PricingSpec::Tiered {
                element_type,
                location,
                tier,
            } => element_type
                .as_deref()
                .and_then(|label| table.lookup(label, *location, *tier)),
        };
        resolved.filter(|price| price.is_finite() && *price > 0.0)
    }

    pub fn tier(&self) -> Option<PriceTier> {
        match self {
            PricingSpec::Flat { .. } => None,
            PricingSpec::Tiered { tier, .. } => Some(*tier),
        }
    }
}

/// Price of `area_m2` under `spec`; zero when no unit price resolves.
pub fn price(area_m2: f64, spec: &PricingSpec, table: &PriceTable) -> f64 {
    match spec.unit_price(table) {
        Some(unit_price) if area_m2 > 0.0 => area_m2 * unit_price,
        _ => 0.0,
    }
}
