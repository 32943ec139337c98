//! Text encoding of the scene root's `transform` attribute.
//!
//! The canonical form is `translate(<x>,<y>) scale(<s>)`. Parsing is lenient: the
//! translate and scale components are located independently, and any component that is
//! missing or does not parse to a finite number takes its identity value. Parsing never
//! fails.

#[cfg(test)]
#[path = "codec_test.rs"]
mod codec_test;

use std::sync::OnceLock;

use regex::Regex;

use crate::transform::Transform;

const TRANSLATE_PATTERN: &str = r"translate\(([-\d+.eE]+)[, ]+([-\d+.eE]+)\)";
const SCALE_PATTERN: &str = r"scale\(([-\d+.eE]+)\)";

fn translate_re() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| compile(TRANSLATE_PATTERN)).as_ref()
}

fn scale_re() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| compile(SCALE_PATTERN)).as_ref()
}

/// Compile a built-in pattern. A failure is logged and disables the matcher.
pub(crate) fn compile(pattern: &str) -> Option<Regex> {
    match Regex::new(pattern) {
        Ok(re) => Some(re),
        Err(e) => {
            log::error!("codec: pattern {pattern:?} does not compile: {e}");
            None
        }
    }
}

/// Parse a transform attribute. Absent or malformed input yields [`Transform::IDENTITY`].
#[must_use]
pub fn parse(text: &str) -> Transform {
    let mut out = Transform::IDENTITY;
    if text.is_empty() {
        return out;
    }

    if let Some(caps) = translate_re().and_then(|re| re.captures(text)) {
        if let (Some(x), Some(y)) = (finite(&caps[1]), finite(&caps[2])) {
            out.translate_x = x;
            out.translate_y = y;
        }
    }
    if let Some(caps) = scale_re().and_then(|re| re.captures(text)) {
        if let Some(s) = finite(&caps[1]) {
            out.scale = s;
        }
    }
    out
}

/// Parse an optional attribute value; `None` is the identity.
#[must_use]
pub fn parse_attr(text: Option<&str>) -> Transform {
    text.map_or(Transform::IDENTITY, parse)
}

/// Encode a transform in the form written to the scene root.
#[must_use]
pub fn serialize(t: &Transform) -> String {
    format!("translate({},{}) scale({})", t.translate_x, t.translate_y, t.scale)
}

fn finite(raw: &str) -> Option<f64> {
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() => Some(v),
        _ => None,
    }
}
