#![allow(clippy::float_cmp)]

use super::*;

#[test]
fn defaults_describe_identity() {
    let controls = TransformControls::default();
    assert_eq!(controls.read(), Transform::IDENTITY);
    assert_eq!(controls.scale.slider, "1");
    assert_eq!(controls.scale.number, "1");
}

#[test]
fn slider_edit_mirrors_to_number() {
    let mut controls = TransformControls::default();
    controls.edit(ControlField::TranslateX, ControlSide::Slider, "42");
    assert_eq!(controls.translate_x.number, "42");
    assert_eq!(controls.translate_x.slider, "42");
}

#[test]
fn number_edit_mirrors_to_slider() {
    let mut controls = TransformControls::default();
    controls.edit(ControlField::Scale, ControlSide::Number, "2.5");
    assert_eq!(controls.scale.slider, "2.5");
}

#[test]
fn edit_returns_combined_transform() {
    let mut controls = TransformControls::default();
    controls.edit(ControlField::TranslateX, ControlSide::Slider, "10");
    controls.edit(ControlField::TranslateY, ControlSide::Number, "-20.5");
    let t = controls.edit(ControlField::Scale, ControlSide::Slider, "3");
    assert_eq!(t, Transform::new(10.0, -20.5, 3.0));
}

#[test]
fn non_numeric_translate_reads_zero() {
    let mut controls = TransformControls::default();
    let t = controls.edit(ControlField::TranslateY, ControlSide::Number, "abc");
    assert_eq!(t.translate_y, 0.0);
    // The raw text stays in the widget.
    assert_eq!(controls.translate_y.slider, "abc");
}

#[test]
fn empty_scale_reads_one() {
    let mut controls = TransformControls::default();
    assert_eq!(controls.edit(ControlField::Scale, ControlSide::Number, "").scale, 1.0);
}

#[test]
fn zero_scale_reads_one() {
    let mut controls = TransformControls::default();
    assert_eq!(controls.edit(ControlField::Scale, ControlSide::Number, "0").scale, 1.0);
}

#[test]
fn infinite_value_falls_back() {
    let mut controls = TransformControls::default();
    assert_eq!(controls.edit(ControlField::TranslateX, ControlSide::Number, "inf").translate_x, 0.0);
}

#[test]
fn surrounding_whitespace_is_tolerated() {
    let mut controls = TransformControls::default();
    assert_eq!(controls.edit(ControlField::TranslateX, ControlSide::Number, " 7.5 ").translate_x, 7.5);
}

#[test]
fn sync_from_writes_both_sides() {
    let mut controls = TransformControls::default();
    controls.sync_from(Transform::new(50.0, 30.0, 2.5));
    assert_eq!(controls.translate_x, ControlBinding { slider: "50".into(), number: "50".into() });
    assert_eq!(controls.translate_y.number, "30");
    assert_eq!(controls.scale.slider, "2.5");
    assert_eq!(controls.read(), Transform::new(50.0, 30.0, 2.5));
}

#[test]
fn binding_accessor_matches_field() {
    let mut controls = TransformControls::default();
    controls.sync_from(Transform::new(1.0, 2.0, 3.0));
    assert_eq!(controls.binding(ControlField::TranslateX).slider, "1");
    assert_eq!(controls.binding(ControlField::TranslateY).slider, "2");
    assert_eq!(controls.binding(ControlField::Scale).slider, "3");
}
