#![allow(clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-10;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn point_approx_eq(a: Point, b: Point) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
}

// --- Defaults ---

#[test]
fn default_is_identity() {
    let t = Transform::default();
    assert_eq!(t.translate_x, 0.0);
    assert_eq!(t.translate_y, 0.0);
    assert_eq!(t.scale, 1.0);
}

#[test]
fn default_scale_range() {
    let range = ScaleRange::default();
    assert_eq!(range.min, 0.1);
    assert_eq!(range.max, 5.0);
}

// --- Floor / clamp ---

#[test]
fn floored_raises_zero_scale() {
    let t = Transform::new(1.0, 2.0, 0.0).floored();
    assert_eq!(t.scale, SCALE_FLOOR);
    assert_eq!(t.translate_x, 1.0);
    assert_eq!(t.translate_y, 2.0);
}

#[test]
fn floored_raises_negative_scale() {
    assert_eq!(Transform::new(0.0, 0.0, -3.0).floored().scale, SCALE_FLOOR);
}

#[test]
fn floored_replaces_nan_scale() {
    assert_eq!(Transform::new(0.0, 0.0, f64::NAN).floored().scale, SCALE_FLOOR);
}

#[test]
fn floored_keeps_positive_scale() {
    assert_eq!(Transform::new(0.0, 0.0, 0.05).floored().scale, 0.05);
}

#[test]
fn clamped_limits_to_max() {
    let t = Transform::new(5.0, 6.0, 9.0).clamped(ScaleRange::default());
    assert_eq!(t.scale, 5.0);
    assert_eq!(t.translate_x, 5.0);
}

#[test]
fn clamped_limits_to_min() {
    assert_eq!(Transform::new(0.0, 0.0, 0.01).clamped(ScaleRange::default()).scale, 0.1);
}

#[test]
fn range_clamp_nan_goes_to_min() {
    assert_eq!(ScaleRange::new(0.5, 2.0).clamp(f64::NAN), 0.5);
}

// --- Coordinate conversion ---

#[test]
fn screen_to_scene_identity() {
    let t = Transform::IDENTITY;
    assert!(point_approx_eq(t.screen_to_scene(Point::new(50.0, 75.0)), Point::new(50.0, 75.0)));
}

#[test]
fn screen_to_scene_with_translate_and_scale() {
    let t = Transform::new(20.0, 10.0, 2.0);
    assert!(point_approx_eq(t.screen_to_scene(Point::new(20.0, 10.0)), Point::new(0.0, 0.0)));
    assert!(point_approx_eq(t.screen_to_scene(Point::new(40.0, 30.0)), Point::new(10.0, 10.0)));
}

#[test]
fn scene_to_screen_inverts_screen_to_scene() {
    let t = Transform::new(-13.5, 42.0, 1.7);
    let p = Point::new(123.0, -45.0);
    assert!(point_approx_eq(t.scene_to_screen(t.screen_to_scene(p)), p));
}

#[test]
fn zoomed_about_keeps_anchor_fixed() {
    let t = Transform::new(30.0, -12.0, 1.5);
    let anchor = Point::new(400.0, 300.0);
    let before = t.screen_to_scene(anchor);
    let z = t.zoomed_about(anchor, 3.0);
    assert_eq!(z.scale, 3.0);
    assert!(point_approx_eq(z.screen_to_scene(anchor), before));
}

#[test]
fn zoomed_about_origin_from_identity_only_scales() {
    let z = Transform::IDENTITY.zoomed_about(Point::new(0.0, 0.0), 2.0);
    assert!(z.approx_eq(&Transform::new(0.0, 0.0, 2.0), EPSILON));
}

#[test]
fn approx_eq_respects_epsilon() {
    let a = Transform::new(1.0, 2.0, 3.0);
    let b = Transform::new(1.0 + 1e-7, 2.0, 3.0);
    assert!(a.approx_eq(&b, 1e-6));
    assert!(!a.approx_eq(&b, 1e-9));
}
