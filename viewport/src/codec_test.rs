#![allow(clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-9;

// --- parse: well-formed ---

#[test]
fn parse_canonical_form() {
    let t = parse("translate(10,20) scale(1.5)");
    assert_eq!(t, Transform::new(10.0, 20.0, 1.5));
}

#[test]
fn parse_space_separated_translate() {
    let t = parse("translate(10 20) scale(2)");
    assert_eq!(t, Transform::new(10.0, 20.0, 2.0));
}

#[test]
fn parse_comma_and_space_separated_translate() {
    let t = parse("translate(10, 20)");
    assert_eq!(t.translate_x, 10.0);
    assert_eq!(t.translate_y, 20.0);
    assert_eq!(t.scale, 1.0);
}

#[test]
fn parse_signed_values() {
    let t = parse("translate(-12.5,+3) scale(0.25)");
    assert_eq!(t, Transform::new(-12.5, 3.0, 0.25));
}

#[test]
fn parse_scientific_notation() {
    let t = parse("translate(1e2,-2.5E-1) scale(3e-1)");
    assert!((t.translate_x - 100.0).abs() < EPSILON);
    assert!((t.translate_y + 0.25).abs() < EPSILON);
    assert!((t.scale - 0.3).abs() < EPSILON);
}

#[test]
fn parse_scale_before_translate() {
    let t = parse("scale(2) translate(5,6)");
    assert_eq!(t, Transform::new(5.0, 6.0, 2.0));
}

// --- parse: partial / malformed ---

#[test]
fn parse_empty_is_identity() {
    assert_eq!(parse(""), Transform::IDENTITY);
}

#[test]
fn parse_none_attr_is_identity() {
    assert_eq!(parse_attr(None), Transform::IDENTITY);
}

#[test]
fn parse_garbage_is_identity() {
    assert_eq!(parse("rotate(45) skewX(3)"), Transform::IDENTITY);
}

#[test]
fn parse_translate_only_defaults_scale() {
    let t = parse("translate(7,8)");
    assert_eq!(t, Transform::new(7.0, 8.0, 1.0));
}

#[test]
fn parse_scale_only_defaults_translate() {
    let t = parse("scale(4)");
    assert_eq!(t, Transform::new(0.0, 0.0, 4.0));
}

#[test]
fn parse_single_argument_translate_is_ignored() {
    assert_eq!(parse("translate(10)"), Transform::IDENTITY);
}

#[test]
fn parse_unparseable_number_falls_back() {
    let t = parse("translate(--1,2) scale(1e)");
    assert_eq!(t, Transform::IDENTITY);
}

#[test]
fn parse_overflowing_number_falls_back() {
    let t = parse("scale(1e400)");
    assert_eq!(t.scale, 1.0);
}

// --- serialize ---

#[test]
fn serialize_identity() {
    assert_eq!(serialize(&Transform::IDENTITY), "translate(0,0) scale(1)");
}

#[test]
fn serialize_fractional_values() {
    assert_eq!(serialize(&Transform::new(10.0, 105.0, 1.95)), "translate(10,105) scale(1.95)");
}

#[test]
fn serialize_negative_values() {
    assert_eq!(serialize(&Transform::new(-3.5, -0.25, 0.5)), "translate(-3.5,-0.25) scale(0.5)");
}

// --- round trip ---

#[test]
fn parse_inverts_serialize() {
    for t in [
        Transform::new(0.0, 0.0, 1.0),
        Transform::new(-250.75, 13.125, 0.1),
        Transform::new(1e-7, 123_456.789, 4.999),
        Transform::new(50.0, 30.0, 2.5),
    ] {
        let back = parse(&serialize(&t));
        assert!(back.approx_eq(&t, EPSILON), "{t:?} came back as {back:?}");
    }
}
