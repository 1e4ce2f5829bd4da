use crate::pricing::{PaintLocation, PriceTier, PricingMode, PricingSpec};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Panel size used by visual proxies when an input is still empty.
pub const DISPLAY_DEFAULT_DIMENSIONS: Dimensions = Dimensions {
    width: 600.0,
    height: 800.0,
    thickness: 30.0,
};

/// Panel dimensions in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
    pub thickness: f64,
}

impl Dimensions {
    pub fn new(width: f64, height: f64, thickness: f64) -> Self {
        Self {
            width,
            height,
            thickness,
        }
    }

    /// Replace non-positive values with the display defaults so a proxy is always drawable.
    pub fn or_display_defaults(&self) -> Self {
        let pick = |value: f64, fallback: f64| if value > 0.0 { value } else { fallback };
        Self {
            width: pick(self.width, DISPLAY_DEFAULT_DIMENSIONS.width),
            height: pick(self.height, DISPLAY_DEFAULT_DIMENSIONS.height),
            thickness: pick(self.thickness, DISPLAY_DEFAULT_DIMENSIONS.thickness),
        }
    }
}

/// Parse a numeric input for display, treating anything unusable as zero.
///
/// The whole trimmed input must be a number: `"600mm"` reads as zero rather than 600,
/// so a stray unit never silently prices a panel.
pub fn parse_lenient(input: &str) -> f64 {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .unwrap_or(0.0)
}

/// Parse a numeric input for commit: only finite values above zero pass.
pub fn parse_positive(input: &str) -> Option<f64> {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite() && *value > 0.0)
}

/// Raw values of the element form, exactly as typed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ElementForm {
    pub element_type: Option<String>,
    pub width: String,
    pub height: String,
    pub thickness: String,
    /// Only consulted in flat pricing mode.
    pub unit_price: String,
    pub paint_location: PaintLocation,
    /// Only consulted in tiered pricing mode.
    pub tier: PriceTier,
}

impl ElementForm {
    /// Display snapshot of the dimensions; unusable inputs count as zero.
    pub fn dimensions(&self) -> Dimensions {
        Dimensions {
            width: parse_lenient(&self.width),
            height: parse_lenient(&self.height),
            thickness: parse_lenient(&self.thickness),
        }
    }

    /// Pricing inputs for the given mode.
    pub fn pricing_spec(&self, mode: PricingMode) -> PricingSpec {
        match mode {
            PricingMode::Flat => PricingSpec::Flat {
                unit_price: parse_positive(&self.unit_price),
            },
            PricingMode::Tiered => PricingSpec::Tiered {
                element_type: self.element_type.clone(),
                location: self.paint_location,
                tier: self.tier,
            },
        }
    }

    pub fn has_element_type(&self) -> bool {
        self.element_type
            .as_deref()
            .is_some_and(|label| !label.trim().is_empty())
    }

    /// Clear the per-element inputs, keeping type and pricing metadata.
    pub fn clear_dimensions(&mut self) {
        self.width.clear();
        self.height.clear();
        self.thickness.clear();
    }

    /// Evaluate every commit-blocking check at once.
    pub fn check(&self, mode: PricingMode, faces_selected: usize) -> FieldErrors {
        FieldErrors {
            element_type: !self.has_element_type(),
            width: parse_positive(&self.width).is_none(),
            height: parse_positive(&self.height).is_none(),
            thickness: parse_positive(&self.thickness).is_none(),
            unit_price: mode == PricingMode::Flat && parse_positive(&self.unit_price).is_none(),
            faces: faces_selected == 0,
        }
    }
}

/// Per-field "currently invalid" flags surfaced next to each input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FieldErrors {
    pub element_type: bool,
    pub width: bool,
    pub height: bool,
    pub thickness: bool,
    pub unit_price: bool,
    pub faces: bool,
}

impl FieldErrors {
    pub fn is_clear(&self) -> bool {
        *self == Self::default()
    }

    /// Names of the raised flags, in form order.
    pub fn fields(&self) -> Vec<&'static str> {
        [
            (self.element_type, "element type"),
            (self.width, "width"),
            (self.height, "height"),
            (self.thickness, "thickness"),
            (self.unit_price, "price per m²"),
            (self.faces, "faces"),
        ]
        .into_iter()
        .filter_map(|(raised, name)| raised.then_some(name))
        .collect()
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.fields().join(", "))
    }
}

/// Why an element could not be added to the project.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommitError {
    #[error("element rejected, invalid fields: {0}")]
    Rejected(FieldErrors),
}
