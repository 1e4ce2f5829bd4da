use crate::area::area_m2;
use crate::face::{Face, FaceSet, UnknownFace};
use crate::form::{parse_positive, ElementForm, FieldErrors};
use crate::format::{format_area, format_price};
use crate::picker::VisualPicker;
use crate::pricing::{price, PaintLocation, PriceTable, PriceTier, PricingMode};
use tracing::debug;

/// Values derived from the live form, as last shown to the user.
#[derive(Debug, Clone, PartialEq)]
pub struct Readout {
    pub area_m2: f64,
    pub price: f64,
    /// Resolved price per m², if one is usable.
    pub unit_price: Option<f64>,
    pub area_display: String,
    pub price_display: String,
    pub faces_label: String,
    pub no_face_selected: bool,
}

/// Owns the face selection and form inputs and keeps every derived value and the
/// picker in step with them.
///
/// Each mutating call runs one full refresh before returning, so callers never see a
/// selection that disagrees with the displayed area, price or highlight.
pub struct FaceToggleController<P: VisualPicker> {
    faces: FaceSet,
    form: ElementForm,
    mode: PricingMode,
    table: PriceTable,
    currency_symbol: String,
    picker: P,
    errors: FieldErrors,
    readout: Readout,
}

impl<P: VisualPicker> FaceToggleController<P> {
    pub fn new(
        mode: PricingMode,
        table: PriceTable,
        currency_symbol: impl Into<String>,
        picker: P,
    ) -> Self {
        let currency_symbol = currency_symbol.into();
        let mut controller = Self {
            faces: FaceSet::new(),
            form: ElementForm::default(),
            mode,
            table,
            readout: Readout {
                area_m2: 0.0,
                price: 0.0,
                unit_price: None,
                area_display: format_area(0.0),
                price_display: format_price(&currency_symbol, 0.0),
                faces_label: String::new(),
                no_face_selected: false,
            },
            currency_symbol,
            picker,
            errors: FieldErrors::default(),
        };
        controller.refresh();
        controller
    }

    pub fn faces(&self) -> &FaceSet {
        &self.faces
    }

    pub fn form(&self) -> &ElementForm {
        &self.form
    }

    pub fn mode(&self) -> PricingMode {
        self.mode
    }

    pub fn table(&self) -> &PriceTable {
        &self.table
    }

    pub fn currency_symbol(&self) -> &str {
        &self.currency_symbol
    }

    pub fn picker(&self) -> &P {
        &self.picker
    }

    /// Mutable access for picker settings that do not touch selection (colours, placement).
    pub fn picker_mut(&mut self) -> &mut P {
        &mut self.picker
    }

    pub fn readout(&self) -> &Readout {
        &self.readout
    }

    pub fn errors(&self) -> FieldErrors {
        self.errors
    }

    /// Flip one face and refresh.
    pub fn toggle(&mut self, face: Face) {
        let selected = self.faces.toggle(face);
        debug!(%face, selected, "face toggled");
        self.refresh();
    }

    /// Toggle by wire token; unknown tokens are rejected and nothing changes.
    pub fn toggle_token(&mut self, token: &str) -> Result<Face, UnknownFace> {
        let face: Face = token.parse()?;
        self.toggle(face);
        Ok(face)
    }

    /// Resolve a pointer event on the proxy and toggle whatever it hit.
    pub fn pick(&mut self, event: &P::Event) -> Option<Face> {
        let face = self.picker.resolve(event)?;
        self.toggle(face);
        Some(face)
    }

    pub fn set_width(&mut self, input: impl Into<String>) {
        self.form.width = input.into();
        if parse_positive(&self.form.width).is_some() {
            self.errors.width = false;
        }
        self.refresh();
    }

    pub fn set_height(&mut self, input: impl Into<String>) {
        self.form.height = input.into();
        if parse_positive(&self.form.height).is_some() {
            self.errors.height = false;
        }
        self.refresh();
    }

    pub fn set_thickness(&mut self, input: impl Into<String>) {
        self.form.thickness = input.into();
        if parse_positive(&self.form.thickness).is_some() {
            self.errors.thickness = false;
        }
        self.refresh();
    }

    pub fn set_unit_price(&mut self, input: impl Into<String>) {
        self.form.unit_price = input.into();
        if parse_positive(&self.form.unit_price).is_some() {
            self.errors.unit_price = false;
        }
        self.refresh();
    }

    pub fn set_element_type(&mut self, element_type: Option<String>) {
        self.form.element_type = element_type;
        self.refresh();
        if self.form.has_element_type() && !self.missing_tiered_price() {
            self.errors.element_type = false;
        }
    }

    pub fn set_paint_location(&mut self, location: PaintLocation) {
        self.form.paint_location = location;
        self.refresh();
    }

    pub fn set_tier(&mut self, tier: PriceTier) {
        self.form.tier = tier;
        self.refresh();
    }

    /// Run every commit check, raising the failing field flags.
    pub fn validate(&mut self) -> FieldErrors {
        let mut errors = self.form.check(self.mode, self.faces.count());
        if self.missing_tiered_price() {
            errors.element_type = true;
        }
        self.errors = errors;
        errors
    }

    /// Tiered pricing with no table row for the chosen type, location and tier.
    fn missing_tiered_price(&self) -> bool {
        self.mode == PricingMode::Tiered && self.readout.unit_price.is_none()
    }

    /// Clear dimensions and restore the front-only selection; pricing metadata stays.
    pub fn reset_element(&mut self) {
        self.form.clear_dimensions();
        self.faces.reset();
        self.errors = FieldErrors::default();
        self.refresh();
    }

    /// Recompute everything derived from the live state, in order: figures, proxy,
    /// no-face flag, faces label.
    pub fn refresh(&mut self) {
        let dims = self.form.dimensions();
        let spec = self.form.pricing_spec(self.mode);
        let area = area_m2(&dims, &self.faces);
        let total = price(area, &spec, &self.table);
        self.readout.area_m2 = area;
        self.readout.price = total;
        self.readout.unit_price = spec.unit_price(&self.table);
        self.readout.area_display = format_area(area);
        self.readout.price_display = format_price(&self.currency_symbol, total);

        self.picker.update(&dims, &self.faces);

        let no_face = self.faces.is_empty();
        self.readout.no_face_selected = no_face;
        self.errors.faces = no_face;

        self.readout.faces_label = self.faces.label();

        debug!(
            area_m2 = area,
            price = total,
            faces = %self.readout.faces_label,
            "estimate refreshed"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::Dimensions;
    use crate::picker::HeadlessPicker;

    /// Picker that remembers every update it receives.
    #[derive(Default)]
    struct RecordingPicker {
        updates: Vec<(Dimensions, FaceSet)>,
    }

    impl VisualPicker for RecordingPicker {
        type Event = Face;

        fn update(&mut self, dims: &Dimensions, faces: &FaceSet) {
            self.updates.push((*dims, *faces));
        }

        fn resolve(&self, event: &Face) -> Option<Face> {
            Some(*event)
        }
    }

    fn flat_controller() -> FaceToggleController<HeadlessPicker> {
        let table = PriceTable::builtin().expect("builtin table");
        FaceToggleController::new(PricingMode::Flat, table, "£", HeadlessPicker)
    }

    #[test]
    fn starts_with_front_only_and_zero_figures() {
        let controller = flat_controller();
        let readout = controller.readout();
        assert_eq!(controller.faces().selected(), vec![Face::Front]);
        assert_eq!(readout.area_display, "0.000 m²");
        assert_eq!(readout.price_display, "£0.00");
        assert_eq!(readout.faces_label, "Front");
        assert!(!readout.no_face_selected);
    }

    #[test]
    fn dimension_edits_update_readout() {
        let mut controller = flat_controller();
        controller.set_width("600");
        controller.set_height("800");
        controller.set_thickness("30");
        controller.set_unit_price("30");
        controller.toggle(Face::Top);

        let readout = controller.readout();
        assert_eq!(readout.area_display, "0.498 m²");
        assert_eq!(readout.price_display, "£14.94");
        assert_eq!(readout.faces_label, "Front, Top");
    }

    #[test]
    fn deselecting_everything_raises_no_face_flag() {
        let mut controller = flat_controller();
        controller.toggle(Face::Front);
        assert!(controller.readout().no_face_selected);
        assert!(controller.errors().faces);
        assert_eq!(controller.readout().faces_label, "None");

        controller.toggle(Face::Back);
        assert!(!controller.readout().no_face_selected);
        assert!(!controller.errors().faces);
    }

    #[test]
    fn double_toggle_restores_state_and_figures() {
        let mut controller = flat_controller();
        controller.set_width("600");
        controller.set_height("800");
        controller.set_thickness("30");
        controller.set_unit_price("30");
        let faces = *controller.faces();
        let readout = controller.readout().clone();

        controller.toggle(Face::Left);
        assert_ne!(controller.readout().area_m2, readout.area_m2);
        controller.toggle(Face::Left);

        assert_eq!(*controller.faces(), faces);
        assert_eq!(*controller.readout(), readout);
    }

    #[test]
    fn unknown_token_changes_nothing() {
        let mut controller = flat_controller();
        let before = *controller.faces();
        assert!(controller.toggle_token("inside").is_err());
        assert_eq!(*controller.faces(), before);

        assert_eq!(controller.toggle_token("back"), Ok(Face::Back));
        assert!(controller.faces().is_selected(Face::Back));
    }

    #[test]
    fn picker_sees_all_six_faces_on_every_refresh() {
        let table = PriceTable::builtin().expect("builtin table");
        let mut controller =
            FaceToggleController::new(PricingMode::Flat, table, "£", RecordingPicker::default());
        controller.set_width("450");
        controller.pick(&Face::Bottom);

        let updates = &controller.picker().updates;
        // construction, width edit, pick
        assert_eq!(updates.len(), 3);
        let (dims, faces) = updates[2];
        assert_eq!(dims.width, 450.0);
        assert_eq!(faces, FaceSet::from_faces([Face::Front, Face::Bottom]));
    }

    #[test]
    fn valid_input_clears_field_flag() {
        let mut controller = flat_controller();
        let errors = controller.validate();
        assert!(errors.width && errors.unit_price && errors.element_type);

        controller.set_width("abc");
        assert!(controller.errors().width);
        controller.set_width("600");
        assert!(!controller.errors().width);

        controller.set_unit_price("0");
        assert!(controller.errors().unit_price);
        controller.set_unit_price("12.5");
        assert!(!controller.errors().unit_price);

        controller.set_element_type(Some("Flat".to_string()));
        assert!(!controller.errors().element_type);
    }

    #[test]
    fn tiered_mode_prices_from_table() {
        let table = PriceTable::builtin().expect("builtin table");
        let mut controller =
            FaceToggleController::new(PricingMode::Tiered, table, "£", HeadlessPicker);
        controller.set_width("1000");
        controller.set_height("1000");
        controller.set_thickness("20");
        assert_eq!(controller.readout().price, 0.0);

        controller.set_element_type(Some("Timber".to_string()));
        assert_eq!(controller.readout().unit_price, Some(35.0));
        assert_eq!(controller.readout().price_display, "£35.00");

        controller.set_paint_location(PaintLocation::External);
        controller.set_tier(PriceTier::Three);
        assert_eq!(controller.readout().unit_price, Some(58.0));
        assert_eq!(controller.readout().price_display, "£58.00");
    }

    #[test]
    fn reset_element_keeps_pricing_metadata() {
        let mut controller = flat_controller();
        controller.set_element_type(Some("Veneer".to_string()));
        controller.set_unit_price("40");
        controller.set_width("600");
        controller.toggle(Face::Back);

        controller.reset_element();
        assert_eq!(controller.form().width, "");
        assert_eq!(controller.form().unit_price, "40");
        assert_eq!(controller.form().element_type.as_deref(), Some("Veneer"));
        assert_eq!(*controller.faces(), FaceSet::new());
    }
}
