//! Parameter tables.
//!
//! A [`ParamSpec`] is what a slider needs: label, range, step and unit. The
//! table order is the display order.

use serde::Serialize;

/// Description of one model field as seen by the parameter panel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ParamSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub step: Option<f64>,
    pub unit: &'static str,
    pub readonly: bool,
}

impl ParamSpec {
    /// Editable field with a slider range.
    pub const fn slider(
        key: &'static str,
        label: &'static str,
        min: f64,
        max: f64,
        step: f64,
        unit: &'static str,
    ) -> Self {
        Self {
            key,
            label,
            min: Some(min),
            max: Some(max),
            step: Some(step),
            unit,
            readonly: false,
        }
    }

    /// Boolean stored as 0/1.
    pub const fn toggle(key: &'static str, label: &'static str) -> Self {
        Self::slider(key, label, 0.0, 1.0, 1.0, "")
    }

    /// Field driven by the simulation, shown but not editable.
    pub const fn readonly(key: &'static str, label: &'static str, unit: &'static str) -> Self {
        Self {
            key,
            label,
            min: None,
            max: None,
            step: None,
            unit,
            readonly: true,
        }
    }

    pub fn is_toggle(&self) -> bool {
        self.min == Some(0.0) && self.max == Some(1.0) && self.step == Some(1.0)
    }

    /// Clamp into `[min, max]`; open ends are unbounded.
    pub fn clamp(&self, value: f64) -> f64 {
        let lo = self.min.unwrap_or(f64::NEG_INFINITY);
        let hi = self.max.unwrap_or(f64::INFINITY);
        value.max(lo).min(hi)
    }

    /// Decimal places to show: fine steps get two, everything else one.
    pub fn decimals(&self) -> usize {
        match self.step {
            Some(step) if step < 1.0 => 2,
            _ => 1,
        }
    }

    /// `value unit`, formatted with [`ParamSpec::decimals`].
    pub fn format_value(&self, value: f64) -> String {
        let prec = self.decimals();
        if self.unit.is_empty() {
            format!("{value:.prec$}")
        } else {
            format!("{value:.prec$} {}", self.unit)
        }
    }
}

/// A model whose fields can be read and replaced by key.
pub trait Parameterized: Sized {
    /// Display-ordered parameter table.
    fn param_specs() -> &'static [ParamSpec];

    /// Current value of a field, `None` for unknown keys.
    fn param(&self, key: &str) -> Option<f64>;

    /// Copy of `self` with one field replaced, `None` for unknown keys.
    ///
    /// No validation happens here; go through the controller for that.
    fn with_param(&self, key: &str, value: f64) -> Option<Self>;

    fn find_spec(key: &str) -> Option<&'static ParamSpec> {
        Self::param_specs().iter().find(|s| s.key == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_respects_open_ends() {
        let slider = ParamSpec::slider("m", "Mass", 0.1, 20.0, 0.1, "kg");
        assert_eq!(slider.clamp(-5.0), 0.1);
        assert_eq!(slider.clamp(50.0), 20.0);

        let ro = ParamSpec::readonly("t", "Time", "s");
        assert_eq!(ro.clamp(1e9), 1e9);
    }

    #[test]
    fn toggle_detection() {
        assert!(ParamSpec::toggle("includeWeight", "Include weight").is_toggle());
        assert!(!ParamSpec::slider("F", "Force", 0.0, 50.0, 0.5, "N").is_toggle());
    }

    #[test]
    fn formatting_follows_step() {
        let fine = ParamSpec::slider("mu", "Friction coefficient", 0.0, 1.0, 0.01, "");
        assert_eq!(fine.format_value(0.2), "0.20");
        let coarse = ParamSpec::slider("angle", "Launch angle", 0.0, 90.0, 1.0, "°");
        assert_eq!(coarse.format_value(45.0), "45.0 °");
    }

    #[test]
    fn spec_serializes_for_listing() {
        let spec = ParamSpec::slider("v", "Velocity", -20.0, 20.0, 0.5, "m/s");
        let json = serde_json::to_value(spec).unwrap();
        assert_eq!(json["key"], "v");
        assert_eq!(json["readonly"], false);
        assert_eq!(json["max"], 20.0);
    }
}
