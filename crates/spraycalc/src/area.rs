use crate::face::{Face, FaceSet};
use crate::form::Dimensions;

const MM2_PER_M2: f64 = 1_000_000.0;

/// Area of a single face in mm².
pub fn face_area_mm2(face: Face, dims: &Dimensions) -> f64 {
    let Dimensions {
        width,
        height,
        thickness,
    } = *dims;
    match face {
        Face::Front | Face::Back => width * height,
        Face::Top | Face::Bottom => width * thickness,
        Face::Left | Face::Right => height * thickness,
    }
}

/// Total painted area in m² over the selected faces.
///
/// Negative or non-finite dimensions contribute nothing, so the result is never negative.
pub fn area_m2(dims: &Dimensions, faces: &FaceSet) -> f64 {
    let sane = |value: f64| if value.is_finite() && value > 0.0 { value } else { 0.0 };
    let dims = Dimensions {
        width: sane(dims.width),
        height: sane(dims.height),
        thickness: sane(dims.thickness),
    };

    let total_mm2: f64 = faces
        .selected()
        .into_iter()
        .map(|face| face_area_mm2(face, &dims))
        .sum();
    total_mm2 / MM2_PER_M2
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn panel() -> Dimensions {
        Dimensions::new(600.0, 800.0, 30.0)
    }

    #[test]
    fn front_and_top() {
        let faces = FaceSet::from_faces([Face::Front, Face::Top]);
        assert_relative_eq!(area_m2(&panel(), &faces), 0.498, epsilon = 1e-12);
    }

    #[test]
    fn all_faces() {
        let faces = FaceSet::from_faces(Face::ALL);
        // 2 * (480000 + 18000 + 24000) mm²
        assert_relative_eq!(area_m2(&panel(), &faces), 1.044, epsilon = 1e-12);
    }

    #[test]
    fn no_faces_is_zero() {
        assert_eq!(area_m2(&panel(), &FaceSet::empty()), 0.0);
    }

    #[test]
    fn missing_dimensions_degrade_to_zero() {
        let dims = Dimensions::new(600.0, 0.0, 30.0);
        let faces = FaceSet::from_faces([Face::Front, Face::Left]);
        assert_eq!(area_m2(&dims, &faces), 0.0);

        let negative = Dimensions::new(-600.0, 800.0, 30.0);
        assert_eq!(area_m2(&negative, &FaceSet::new()), 0.0);
    }

    #[test]
    fn per_face_contributions() {
        let dims = panel();
        assert_eq!(face_area_mm2(Face::Back, &dims), 480_000.0);
        assert_eq!(face_area_mm2(Face::Bottom, &dims), 18_000.0);
        assert_eq!(face_area_mm2(Face::Right, &dims), 24_000.0);
    }

    #[test]
    fn area_grows_with_selection() {
        let dims = panel();
        let mut faces = FaceSet::empty();
        let mut previous = area_m2(&dims, &faces);
        for face in Face::ALL {
            faces.set(face, true);
            let current = area_m2(&dims, &faces);
            assert!(current >= previous);
            previous = current;
        }
    }
}
