mod area;
mod colour;
mod config;
mod controller;
mod estimator;
mod face;
mod form;
mod format;
mod ledger;
pub mod picker;
mod pricing;
mod session;

pub use area::{area_m2, face_area_mm2};
pub use colour::*;
pub use config::EstimatorConfig;
pub use controller::{FaceToggleController, Readout};
pub use estimator::Estimator;
pub use face::{Face, FaceSet, UnknownFace};
pub use form::*;
pub use format::*;
pub use ledger::*;
pub use picker::{HeadlessPicker, VisualPicker};
pub use pricing::*;
pub use session::{SessionMeta, SessionStore};
