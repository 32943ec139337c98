use super::*;
use crate::geom::{ContainerBounds, SceneBounds};
use crate::scene::SceneGraph;
use crate::testing::FakeScene;

fn scene_with(attr: &str) -> FakeScene {
    let mut scene = FakeScene::with_bounds(SceneBounds::new(0.0, 0.0, 400.4, 199.6));
    scene.set_root_transform(attr);
    scene
}

#[test]
fn refresh_without_scene_is_noop() {
    let mut reporter = MetricsReporter::new();
    let mut controls = TransformControls::default();
    assert!(reporter.refresh(None, &mut controls).is_none());
    assert_eq!(reporter.display(), &MetricsDisplay::default());
    assert_eq!(controls, TransformControls::default());
}

#[test]
fn refresh_reports_gesture_transform_in_display_and_controls() {
    let scene = scene_with("translate(50,30) scale(2.5)");
    let mut reporter = MetricsReporter::new();
    let mut controls = TransformControls::default();

    let t = reporter.refresh(Some(&scene), &mut controls);

    assert_eq!(t, Some(Transform::new(50.0, 30.0, 2.5)));
    let d = reporter.display();
    assert_eq!(d.g_tx, "50.00");
    assert_eq!(d.g_ty, "30.00");
    assert_eq!(d.g_scale, "2.500");
    assert_eq!(controls.translate_x.slider, "50");
    assert_eq!(controls.translate_x.number, "50");
    assert_eq!(controls.translate_y.number, "30");
    assert_eq!(controls.scale.slider, "2.5");
}

#[test]
fn refresh_rounds_position_and_size() {
    let scene = scene_with("translate(0,0) scale(1)");
    let mut reporter = MetricsReporter::new();
    reporter.refresh(Some(&scene), &mut TransformControls::default());
    let d = reporter.display();
    // FakeScene rect is (12.4, 56.6, 800, 600).
    assert_eq!(d.svg_x, "12");
    assert_eq!(d.svg_y, "57");
    assert_eq!(d.svg_w, "800");
    assert_eq!(d.svg_h, "600");
    assert_eq!(d.g_w, "400");
    assert_eq!(d.g_h, "200");
}

#[test]
fn refresh_rounds_negative_half_up() {
    let scene = scene_with("translate(0,0) scale(1)");
    scene.state.borrow_mut().rect = Some(ContainerBounds { left: -2.5, top: -0.4, width: 10.0, height: 10.0 });
    let mut reporter = MetricsReporter::new();
    reporter.refresh(Some(&scene), &mut TransformControls::default());
    assert_eq!(reporter.display().svg_x, "-2");
    assert_eq!(reporter.display().svg_y, "0");
}

#[test]
fn refresh_formats_fractional_transform() {
    let scene = scene_with("translate(-3.14159,2.71828) scale(0.33333)");
    let mut reporter = MetricsReporter::new();
    reporter.refresh(Some(&scene), &mut TransformControls::default());
    let d = reporter.display();
    assert_eq!(d.g_tx, "-3.14");
    assert_eq!(d.g_ty, "2.72");
    assert_eq!(d.g_scale, "0.333");
}

#[test]
fn refresh_without_transform_attr_reports_identity() {
    let scene = FakeScene::default();
    let mut reporter = MetricsReporter::new();
    let t = reporter.refresh(Some(&scene), &mut TransformControls::default());
    assert_eq!(t, Some(Transform::IDENTITY));
    assert_eq!(reporter.display().g_scale, "1.000");
}

#[test]
fn unmeasurable_scene_leaves_size_fields_unchanged() {
    let mut reporter = MetricsReporter::new();
    let mut controls = TransformControls::default();

    let measurable = scene_with("translate(0,0) scale(1)");
    reporter.refresh(Some(&measurable), &mut controls);

    let mut unmeasurable = FakeScene::unmeasurable();
    unmeasurable.set_root_transform("translate(5,5) scale(2)");
    let t = reporter.refresh(Some(&unmeasurable), &mut controls);

    assert_eq!(t, Some(Transform::new(5.0, 5.0, 2.0)));
    assert_eq!(reporter.display().g_w, "400");
    assert_eq!(reporter.display().g_h, "200");
    assert_eq!(reporter.display().g_tx, "5.00");
}

#[test]
fn scene_without_rect_still_reports_transform() {
    let scene = scene_with("translate(1,2) scale(3)");
    scene.state.borrow_mut().rect = None;
    let mut reporter = MetricsReporter::new();
    reporter.refresh(Some(&scene), &mut TransformControls::default());
    assert_eq!(reporter.display().svg_x, "");
    assert_eq!(reporter.display().g_scale, "3.000");
}
