use glam::{Mat4, Vec3};
use kurbo::Point;
use spraycalc::picker::{BoxPicker, NetPicker, Ray, SurfaceFinish};
use spraycalc::*;

fn table() -> PriceTable {
    PriceTable::builtin().expect("builtin table")
}

#[test]
fn test_net_clicks_toggle_faces_and_repaint() {
    let mut controller = FaceToggleController::new(PricingMode::Flat, table(), "£", NetPicker::new());
    controller.set_width("600");
    controller.set_height("800");
    controller.set_thickness("30");
    controller.set_unit_price("30");

    let top = controller.picker().rect(Face::Top).expect("top laid out");
    assert_eq!(controller.pick(&top.center()), Some(Face::Top));
    assert_eq!(controller.readout().area_display, "0.498 m²");
    assert_eq!(controller.readout().faces_label, "Front, Top");

    let svg = controller.picker().to_svg().expect("render");
    let painted = to_hex(DEFAULT_PAINT_COLOUR);
    assert_eq!(svg.matches(&format!("fill=\"{painted}\"")).count(), 2);

    // A click on empty canvas changes nothing.
    let faces = *controller.faces();
    assert_eq!(controller.pick(&Point::new(0.5, 0.5)), None);
    assert_eq!(*controller.faces(), faces);
}

#[test]
fn test_net_follows_dimension_edits() {
    let mut controller = FaceToggleController::new(PricingMode::Flat, table(), "£", NetPicker::new());
    controller.set_width("600");
    controller.set_height("800");
    controller.set_thickness("30");
    let thin = controller.picker().rect(Face::Left).expect("left").width();

    controller.set_thickness("120");
    let thick = controller.picker().rect(Face::Left).expect("left").width();
    assert!(thick > thin);
}

#[test]
fn test_box_picks_stay_in_sync_with_selection() {
    let mut controller = FaceToggleController::new(PricingMode::Flat, table(), "£", BoxPicker::new());
    controller.set_width("600");
    controller.set_height("800");
    controller.set_thickness("30");

    let centre = controller
        .picker()
        .world_transform()
        .transform_point3(Vec3::ZERO);

    let from_behind = Ray::new(centre + Vec3::new(0.0, 0.0, -5.0), Vec3::Z);
    assert_eq!(controller.pick(&from_behind), Some(Face::Back));
    assert_eq!(controller.picker().surface(Face::Back), SurfaceFinish::Painted);

    let from_front = Ray::new(centre + Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z);
    assert_eq!(controller.pick(&from_front), Some(Face::Front));
    assert_eq!(controller.picker().surface(Face::Front), SurfaceFinish::Bare);
    assert_eq!(controller.readout().faces_label, "Back");

    // Every side reflects the logical selection after each pick.
    for face in Face::ALL {
        let painted = controller.picker().surface(face) == SurfaceFinish::Painted;
        assert_eq!(painted, controller.faces().is_selected(face), "{face}");
    }
}

#[test]
fn test_box_miss_is_noop() {
    let mut controller = FaceToggleController::new(PricingMode::Flat, table(), "£", BoxPicker::new());
    let before = *controller.faces();
    let ray = Ray::new(Vec3::new(50.0, 0.0, 5.0), Vec3::NEG_Z);
    assert_eq!(controller.pick(&ray), None);
    assert_eq!(*controller.faces(), before);
}

#[test]
fn test_untagged_box_uses_normal_policy() {
    // Turned upside down: the box's top side now faces world -Y.
    let placement = Mat4::from_rotation_x(std::f32::consts::PI);
    let picker = BoxPicker::untagged().with_placement(placement);
    let mut controller = FaceToggleController::new(PricingMode::Flat, table(), "£", picker);

    let centre = controller
        .picker()
        .world_transform()
        .transform_point3(Vec3::ZERO);
    let from_below = Ray::new(centre + Vec3::new(0.0, -5.0, 0.0), Vec3::Y);
    assert_eq!(controller.pick(&from_below), Some(Face::Bottom));
}

#[test]
fn test_estimator_colour_reaches_proxy() {
    let controller = FaceToggleController::new(PricingMode::Flat, table(), "£", BoxPicker::new());
    let mut estimator = Estimator::new(controller);
    estimator.set_colour(ColourStandard::Ral, "3020");
    assert_eq!(estimator.controller().picker().paint_colour(), 0xC1121C);

    estimator.set_colour(ColourStandard::Ncs, "S 2050-Y90R");
    assert_eq!(
        estimator.controller().picker().paint_colour(),
        DEFAULT_PAINT_COLOUR
    );
}
