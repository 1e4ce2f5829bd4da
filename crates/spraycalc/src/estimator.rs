use crate::colour::ColourStandard;
use crate::config::EstimatorConfig;
use crate::controller::FaceToggleController;
use crate::form::{parse_positive, CommitError};
use crate::ledger::{Element, ElementId, ProjectLedger};
use crate::picker::VisualPicker;
use crate::pricing::{PaintLocation, PriceTable, PriceTier};
use crate::session::{SessionMeta, SessionStore};
use anyhow::Result;
use tracing::{info, warn};

/// A quoting session: the live element form, the committed elements, and the
/// metadata remembered between sessions.
pub struct Estimator<P: VisualPicker> {
    controller: FaceToggleController<P>,
    ledger: ProjectLedger,
    meta: SessionMeta,
    store: Option<SessionStore>,
}

impl<P: VisualPicker> Estimator<P> {
    /// Estimator without persistence.
    pub fn new(controller: FaceToggleController<P>) -> Self {
        Self {
            controller,
            ledger: ProjectLedger::new(),
            meta: SessionMeta::default(),
            store: None,
        }
    }

    /// Build from configuration, restoring the last session's metadata.
    pub fn from_config(config: &EstimatorConfig, picker: P) -> Result<Self> {
        let table: PriceTable = config.price_table()?;
        let controller = FaceToggleController::new(
            config.pricing_mode,
            table,
            config.currency_symbol.clone(),
            picker,
        );
        let mut estimator = Self::new(controller).with_store(config.session_store()?);
        estimator.restore_session();
        Ok(estimator)
    }

    pub fn with_store(mut self, store: SessionStore) -> Self {
        self.store = Some(store);
        self
    }

    pub fn controller(&self) -> &FaceToggleController<P> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut FaceToggleController<P> {
        &mut self.controller
    }

    pub fn ledger(&self) -> &ProjectLedger {
        &self.ledger
    }

    pub fn meta(&self) -> &SessionMeta {
        &self.meta
    }

    /// Project-level metadata (name, client, colour) edited outside the element form.
    pub fn meta_mut(&mut self) -> &mut SessionMeta {
        &mut self.meta
    }

    /// Record the paint colour specification and repaint the proxy with it.
    pub fn set_colour(&mut self, standard: ColourStandard, code: impl Into<String>) {
        self.meta.colour_standard = Some(standard.as_str().to_string());
        self.meta.ral_code = Some(code.into());
        self.controller
            .picker_mut()
            .set_paint_colour(self.meta.paint_colour());
    }

    pub fn total(&self) -> f64 {
        self.ledger.total()
    }

    /// Apply stored metadata to the form. Unusable values leave the defaults in place.
    pub fn restore_session(&mut self) {
        let Some(store) = &self.store else {
            return;
        };
        let meta = store.load();

        if let Some(element_type) = meta.element_type.clone() {
            self.controller.set_element_type(Some(element_type));
        }
        if let Some(location) = meta.paint_location.as_deref().and_then(PaintLocation::parse) {
            self.controller.set_paint_location(location);
        }
        if let Some(unit_price) = meta.price_per_m2.clone() {
            self.controller.set_unit_price(unit_price);
        }
        if let Some(tier) = meta
            .price_tier
            .as_deref()
            .and_then(|tier| tier.trim().parse::<u8>().ok())
            .and_then(PriceTier::from_number)
        {
            self.controller.set_tier(tier);
        }
        self.controller
            .picker_mut()
            .set_paint_colour(meta.paint_colour());
        self.meta = meta;
        info!(
            element_type = self.meta.element_type.as_deref().unwrap_or("-"),
            "session restored"
        );
    }

    /// Commit the live form as a new element.
    ///
    /// On rejection the ledger is untouched and the failing field flags stay raised.
    /// On success the element carries exactly the area and price shown before commit,
    /// and the form is reset for the next element.
    pub fn add_element(&mut self) -> Result<ElementId, CommitError> {
        let errors = self.controller.validate();
        let readout = self.controller.readout().clone();
        let unit_price = match readout.unit_price {
            Some(unit_price) if errors.is_clear() => unit_price,
            _ => {
                warn!(fields = %errors, "element rejected");
                return Err(CommitError::Rejected(errors));
            }
        };

        let form = self.controller.form();
        let element = Element::new(
            form.element_type.clone().unwrap_or_default(),
            form.dimensions(),
            self.controller.faces().selected(),
            readout.area_m2,
            form.paint_location,
            unit_price,
            form.pricing_spec(self.controller.mode()).tier(),
            readout.price,
        );
        let id = self.ledger.add(element);
        info!(
            %id,
            area_m2 = readout.area_m2,
            price = readout.price,
            elements = self.ledger.len(),
            "element added"
        );

        self.save_session();
        self.controller.reset_element();
        Ok(id)
    }

    /// Drop an element from the quote. Unknown ids are ignored.
    pub fn remove_element(&mut self, id: ElementId) -> Option<Element> {
        let removed = self.ledger.remove(id);
        if let Some(element) = &removed {
            info!(%id, price = element.price(), "element removed");
        }
        removed
    }

    /// Empty the quote. A non-empty ledger is only cleared if `confirm` agrees.
    pub fn clear_project<F: FnOnce() -> bool>(&mut self, confirm: F) -> bool {
        if !self.ledger.is_empty() && !confirm() {
            return false;
        }
        self.ledger.clear();
        info!("project cleared");
        true
    }

    /// Copy the form's pricing metadata into the session record and persist it.
    fn save_session(&mut self) {
        let form = self.controller.form();
        self.meta.element_type = form.element_type.clone();
        self.meta.paint_location = Some(form.paint_location.as_str().to_string());
        self.meta.price_per_m2 =
            parse_positive(&form.unit_price).map(|_| form.unit_price.trim().to_string());
        self.meta.price_tier = Some(form.tier.number().to_string());

        if let Some(store) = &self.store {
            if let Err(err) = store.save(&self.meta) {
                warn!("could not save session: {err:#}");
            }
        }
    }
}
