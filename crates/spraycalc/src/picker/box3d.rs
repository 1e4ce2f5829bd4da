use super::{face_from_normal, VisualPicker};
use crate::colour::DEFAULT_PAINT_COLOUR;
use crate::face::{Face, FaceSet};
use crate::form::Dimensions;
use glam::{Mat4, Vec3};

/// Scene units per millimetre of panel.
pub const SCENE_UNITS_PER_MM: f32 = 1.0 / 500.0;

/// Face carried by each side of the box, in side-index order (+X, −X, +Y, −Y, +Z, −Z).
pub const BOX_FACE_MAPPING: [Face; 6] = [
    Face::Right,
    Face::Left,
    Face::Top,
    Face::Bottom,
    Face::Front,
    Face::Back,
];

const SIDE_NORMALS: [Vec3; 6] = [
    Vec3::X,
    Vec3::NEG_X,
    Vec3::Y,
    Vec3::NEG_Y,
    Vec3::Z,
    Vec3::NEG_Z,
];

/// A ray in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }
}

/// How the renderer should draw one side of the box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceFinish {
    Painted,
    Bare,
}

/// Box-shaped 3D proxy of the panel.
///
/// Width runs along X, height along Y and thickness along Z, centred on the origin and
/// lifted by a tenth of its height before `placement` is applied.
#[derive(Debug, Clone)]
pub struct BoxPicker {
    placement: Mat4,
    half_extents: Vec3,
    /// Sides carry explicit face tags; otherwise hits are classified by normal.
    tagged: bool,
    finishes: [SurfaceFinish; 6],
    paint_colour: u32,
}

impl Default for BoxPicker {
    fn default() -> Self {
        Self::new()
    }
}

impl BoxPicker {
    pub fn new() -> Self {
        let mut picker = Self {
            placement: Mat4::IDENTITY,
            half_extents: Vec3::ZERO,
            tagged: true,
            finishes: [SurfaceFinish::Bare; 6],
            paint_colour: DEFAULT_PAINT_COLOUR,
        };
        picker.update(&Dimensions::default(), &FaceSet::new());
        picker
    }

    /// Proxy whose sides carry no face tags, so picks fall back to the normal policy.
    pub fn untagged() -> Self {
        Self {
            tagged: false,
            ..Self::new()
        }
    }

    /// Place the proxy in the world (rigid transforms only).
    pub fn with_placement(mut self, placement: Mat4) -> Self {
        self.placement = placement;
        self
    }

    pub fn paint_colour(&self) -> u32 {
        self.paint_colour
    }

    pub fn half_extents(&self) -> Vec3 {
        self.half_extents
    }

    /// Full transform from box space to world space.
    pub fn world_transform(&self) -> Mat4 {
        let lift = Mat4::from_translation(Vec3::new(0.0, self.half_extents.y * 0.2, 0.0));
        self.placement * lift
    }

    /// Finish of the side showing `face`.
    pub fn surface(&self, face: Face) -> SurfaceFinish {
        BOX_FACE_MAPPING
            .iter()
            .position(|mapped| *mapped == face)
            .map(|side| self.finishes[side])
            .unwrap_or(SurfaceFinish::Bare)
    }

    /// Finishes in side-index order, ready for a multi-material box.
    pub fn surfaces(&self) -> [SurfaceFinish; 6] {
        self.finishes
    }
}

impl VisualPicker for BoxPicker {
    type Event = Ray;

    fn update(&mut self, dims: &Dimensions, faces: &FaceSet) {
        let dims = dims.or_display_defaults();
        self.half_extents = Vec3::new(
            dims.width as f32,
            dims.height as f32,
            dims.thickness as f32,
        ) * SCENE_UNITS_PER_MM
            * 0.5;
        self.finishes = BOX_FACE_MAPPING.map(|face| {
            if faces.is_selected(face) {
                SurfaceFinish::Painted
            } else {
                SurfaceFinish::Bare
            }
        });
    }

    fn resolve(&self, ray: &Ray) -> Option<Face> {
        let world = self.world_transform();
        let to_local = world.inverse();
        let origin = to_local.transform_point3(ray.origin);
        let direction = to_local.transform_vector3(ray.direction);

        let side = entry_side(origin, direction, self.half_extents)?;
        if self.tagged {
            Some(BOX_FACE_MAPPING[side])
        } else {
            let normal = world.transform_vector3(SIDE_NORMALS[side]).normalize_or_zero();
            Some(face_from_normal(normal))
        }
    }

    fn set_paint_colour(&mut self, colour: u32) {
        self.paint_colour = colour;
    }
}

/// Slab test against an origin-centred box, returning the side index the ray enters through.
///
/// Rays starting inside the box or pointing away from it miss.
fn entry_side(origin: Vec3, direction: Vec3, half: Vec3) -> Option<usize> {
    let mut t_enter = f32::NEG_INFINITY;
    let mut t_exit = f32::INFINITY;
    let mut side = None;

    for axis in 0..3 {
        let o = origin[axis];
        let d = direction[axis];
        let h = half[axis];

        if d.abs() < f32::EPSILON {
            if o < -h || o > h {
                return None;
            }
            continue;
        }

        let t_min_side = (-h - o) / d;
        let t_max_side = (h - o) / d;
        // Travelling +axis enters through the negative side, and vice versa.
        let (t_near, near_side, t_far) = if d > 0.0 {
            (t_min_side, axis * 2 + 1, t_max_side)
        } else {
            (t_max_side, axis * 2, t_min_side)
        };

        if t_near > t_enter {
            t_enter = t_near;
            side = Some(near_side);
        }
        t_exit = t_exit.min(t_far);
    }

    if t_enter < 0.0 || t_exit < t_enter {
        return None;
    }
    side
}
