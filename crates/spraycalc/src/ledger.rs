use crate::face::Face;
use crate::form::Dimensions;
use crate::pricing::{PaintLocation, PriceTier};
use serde::{Deserialize, Serialize};
use std::fmt;
use ulid::Ulid;

/// Unique identifier for a committed element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(Ulid);

impl ElementId {
    /// Create a new ElementId with a random ULID.
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for ElementId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A priced line item: one panel with a fixed set of painted faces.
///
/// Elements are frozen at creation; corrections are a remove followed by a new add.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    id: ElementId,
    element_type: String,
    dimensions: Dimensions,
    faces: Vec<Face>,
    area_m2: f64,
    paint_location: PaintLocation,
    unit_price: f64,
    tier: Option<PriceTier>,
    price: f64,
}

impl Element {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        element_type: impl Into<String>,
        dimensions: Dimensions,
        faces: Vec<Face>,
        area_m2: f64,
        paint_location: PaintLocation,
        unit_price: f64,
        tier: Option<PriceTier>,
        price: f64,
    ) -> Self {
        Self {
            id: ElementId::new(),
            element_type: element_type.into(),
            dimensions,
            faces,
            area_m2,
            paint_location,
            unit_price,
            tier,
            price,
        }
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn element_type(&self) -> &str {
        &self.element_type
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn area_m2(&self) -> f64 {
        self.area_m2
    }

    pub fn paint_location(&self) -> PaintLocation {
        self.paint_location
    }

    pub fn unit_price(&self) -> f64 {
        self.unit_price
    }

    pub fn tier(&self) -> Option<PriceTier> {
        self.tier
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    /// Face count with initials, e.g. `2 (F, T)`.
    pub fn faces_summary(&self) -> String {
        let initials: Vec<String> = self.faces.iter().map(|f| f.initial().to_string()).collect();
        format!("{} ({})", self.faces.len(), initials.join(", "))
    }
}

/// The ordered list of elements making up the current quote.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectLedger {
    elements: Vec<Element>,
}

impl ProjectLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an element, returning its id.
    pub fn add(&mut self, element: Element) -> ElementId {
        let id = element.id;
        self.elements.push(element);
        id
    }

    /// Remove the element with `id`. Unknown ids leave the ledger untouched.
    pub fn remove(&mut self, id: ElementId) -> Option<Element> {
        let index = self.elements.iter().position(|element| element.id == id)?;
        Some(self.elements.remove(index))
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.iter().find(|element| element.id == id)
    }

    /// Sum of element prices.
    pub fn total(&self) -> f64 {
        self.elements.iter().map(Element::price).sum()
    }

    /// Sum of painted area over all elements.
    pub fn total_area_m2(&self) -> f64 {
        self.elements.iter().map(Element::area_m2).sum()
    }

    pub fn clear(&mut self) {
        self.elements.clear();
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Elements in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter()
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn element(price: f64) -> Element {
        Element::new(
            "Flat",
            Dimensions::new(600.0, 800.0, 30.0),
            vec![Face::Front],
            0.48,
            PaintLocation::Internal,
            25.0,
            None,
            price,
        )
    }

    #[test]
    fn ids_are_unique() {
        assert_ne!(ElementId::new(), ElementId::new());
    }

    #[test]
    fn add_keeps_insertion_order() {
        let mut ledger = ProjectLedger::new();
        let a = ledger.add(element(10.0));
        let b = ledger.add(element(20.0));
        let c = ledger.add(element(5.0));
        let order: Vec<ElementId> = ledger.iter().map(Element::id).collect();
        assert_eq!(order, vec![a, b, c]);
    }

    #[test]
    fn remove_unknown_id_is_noop() {
        let mut ledger = ProjectLedger::new();
        ledger.add(element(10.0));
        let before = ledger.elements().to_vec();
        assert!(ledger.remove(ElementId::new()).is_none());
        assert_eq!(ledger.elements(), before.as_slice());
    }

    #[test]
    fn total_tracks_removals() {
        let mut ledger = ProjectLedger::new();
        assert_eq!(ledger.total(), 0.0);
        ledger.add(element(10.0));
        let middle = ledger.add(element(20.5));
        ledger.add(element(5.25));
        assert_eq!(ledger.total(), 35.75);

        let removed = ledger.remove(middle).expect("element present");
        assert_eq!(ledger.total(), 35.75 - removed.price());
        assert_eq!(ledger.len(), 2);
    }

    #[test]
    fn clear_empties_ledger() {
        let mut ledger = ProjectLedger::new();
        ledger.add(element(10.0));
        assert_eq!(ledger.total_area_m2(), 0.48);
        ledger.clear();
        assert!(ledger.is_empty());
        assert_eq!(ledger.total(), 0.0);
        assert_eq!(ledger.total_area_m2(), 0.0);
    }

    #[test]
    fn faces_summary_uses_initials() {
        let element = Element::new(
            "Shaker",
            Dimensions::new(500.0, 700.0, 22.0),
            vec![Face::Front, Face::Top],
            0.361,
            PaintLocation::External,
            30.0,
            Some(PriceTier::Two),
            10.83,
        );
        assert_eq!(element.faces_summary(), "2 (F, T)");
    }

    #[test]
    fn element_round_trips_through_json() {
        let original = element(12.0);
        let json = serde_json::to_string(&original).expect("serialize");
        let restored: Element = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(restored, original);
    }
}
