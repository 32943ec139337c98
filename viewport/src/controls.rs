//! Paired slider / number inputs for the three transform components.
//!
//! Values are held as text, the way the widgets hold them. An edit on either side of a
//! pair is copied to the other side, then all three pairs are read back into one
//! [`Transform`] that goes through the controller's single setter.

#[cfg(test)]
#[path = "controls_test.rs"]
mod controls_test;

use crate::transform::Transform;

/// Which transform component a control pair edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlField {
    TranslateX,
    TranslateY,
    Scale,
}

/// Which widget of a pair produced an edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlSide {
    Slider,
    Number,
}

/// A slider and a number field reflecting one logical value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ControlBinding {
    pub slider: String,
    pub number: String,
}

impl ControlBinding {
    fn with_value(value: &str) -> Self {
        Self { slider: value.to_owned(), number: value.to_owned() }
    }

    /// Write `value` to both widgets.
    pub fn set(&mut self, value: &str) {
        value.clone_into(&mut self.slider);
        value.clone_into(&mut self.number);
    }

    /// Record an edit on one side and mirror it to the other.
    pub fn edit(&mut self, side: ControlSide, raw: &str) {
        match side {
            ControlSide::Slider => {
                raw.clone_into(&mut self.slider);
                self.number.clone_from(&self.slider);
            }
            ControlSide::Number => {
                raw.clone_into(&mut self.number);
                self.slider.clone_from(&self.number);
            }
        }
    }
}

/// The three control pairs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformControls {
    pub translate_x: ControlBinding,
    pub translate_y: ControlBinding,
    pub scale: ControlBinding,
}

impl Default for TransformControls {
    fn default() -> Self {
        Self {
            translate_x: ControlBinding::with_value("0"),
            translate_y: ControlBinding::with_value("0"),
            scale: ControlBinding::with_value("1"),
        }
    }
}

impl TransformControls {
    #[must_use]
    pub fn binding(&self, field: ControlField) -> &ControlBinding {
        match field {
            ControlField::TranslateX => &self.translate_x,
            ControlField::TranslateY => &self.translate_y,
            ControlField::Scale => &self.scale,
        }
    }

    fn binding_mut(&mut self, field: ControlField) -> &mut ControlBinding {
        match field {
            ControlField::TranslateX => &mut self.translate_x,
            ControlField::TranslateY => &mut self.translate_y,
            ControlField::Scale => &mut self.scale,
        }
    }

    /// Apply a user edit and return the transform the controls now describe.
    pub fn edit(&mut self, field: ControlField, side: ControlSide, raw: &str) -> Transform {
        self.binding_mut(field).edit(side, raw);
        self.read()
    }

    /// Read the slider values. Unusable translate values read as 0, unusable scale as 1.
    #[must_use]
    pub fn read(&self) -> Transform {
        Transform {
            translate_x: parse_or(&self.translate_x.slider, 0.0),
            translate_y: parse_or(&self.translate_y.slider, 0.0),
            scale: parse_or(&self.scale.slider, 1.0),
        }
    }

    /// Mirror a transform into every widget.
    pub fn sync_from(&mut self, t: Transform) {
        self.translate_x.set(&t.translate_x.to_string());
        self.translate_y.set(&t.translate_y.to_string());
        self.scale.set(&t.scale.to_string());
    }
}

/// Parse a widget value; empty, non-numeric, non-finite, and zero values take `fallback`.
fn parse_or(raw: &str, fallback: f64) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v != 0.0 => v,
        _ => fallback,
    }
}
