use crate::face::{Face, FaceSet};
use crate::form::Dimensions;
use glam::Vec3;

pub mod box3d;
pub mod net;

pub use box3d::{BoxPicker, Ray, SurfaceFinish, BOX_FACE_MAPPING};
pub use net::NetPicker;

/// Minimum axis component for a normal to count as pointing along that axis.
pub const NORMAL_THRESHOLD: f32 = 0.6;

/// A clickable rendering of the panel.
///
/// The estimator pushes the current dimensions and selection in through `update`;
/// pointer events come back out as faces through `resolve`.
pub trait VisualPicker {
    /// Whatever the frontend hands over when the user clicks the proxy.
    type Event;

    /// Rebuild the proxy for the given panel and highlight state. Must be idempotent.
    fn update(&mut self, dims: &Dimensions, faces: &FaceSet);

    /// Map a pointer event to the face it hit, if any.
    fn resolve(&self, event: &Self::Event) -> Option<Face>;

    /// Colour used for painted faces; proxies that draw nothing ignore it.
    fn set_paint_colour(&mut self, _colour: u32) {}
}

/// Picker without a proxy: events already name the face (legend, checkbox, CLI).
#[derive(Debug, Clone, Copy, Default)]
pub struct HeadlessPicker;

impl VisualPicker for HeadlessPicker {
    type Event = Face;

    fn update(&mut self, _dims: &Dimensions, _faces: &FaceSet) {}

    fn resolve(&self, event: &Face) -> Option<Face> {
        Some(*event)
    }
}

/// Classify a world-space surface normal by its dominant axis.
///
/// Checked in the order ±Z, ±Y, ±X; anything below the threshold on every axis
/// (bevels, chamfers) reads as the front.
pub fn face_from_normal(normal: Vec3) -> Face {
    if normal.z > NORMAL_THRESHOLD {
        Face::Front
    } else if normal.z < -NORMAL_THRESHOLD {
        Face::Back
    } else if normal.y > NORMAL_THRESHOLD {
        Face::Top
    } else if normal.y < -NORMAL_THRESHOLD {
        Face::Bottom
    } else if normal.x > NORMAL_THRESHOLD {
        Face::Right
    } else if normal.x < -NORMAL_THRESHOLD {
        Face::Left
    } else {
        Face::Front
    }
}
