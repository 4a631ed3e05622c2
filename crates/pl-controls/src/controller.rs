//! Validated parameter edits.

use crate::error::{ControlError, ControlResult};
use crate::param::{ParamSpec, Parameterized};
use pl_core::numeric::snap_to_step;
use std::str::FromStr;

/// One `key=value` edit.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamEdit {
    pub key: String,
    pub value: f64,
}

impl ParamEdit {
    pub fn new(key: impl Into<String>, value: f64) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

impl FromStr for ParamEdit {
    type Err = ControlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (key, value) = s.split_once('=').ok_or(ControlError::InvalidArg {
            what: "expected key=value",
        })?;
        let key = key.trim();
        if key.is_empty() {
            return Err(ControlError::InvalidArg {
                what: "empty parameter key",
            });
        }
        let value: f64 = value.trim().parse().map_err(|_| ControlError::InvalidArg {
            what: "parameter value is not a number",
        })?;
        Ok(Self::new(key, value))
    }
}

/// Turns single-field edits into whole-model replacements.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterController {
    /// Round edited values onto the slider's step grid (origin at `min`).
    pub snap_to_step: bool,
}

impl Default for ParameterController {
    fn default() -> Self {
        Self { snap_to_step: true }
    }
}

impl ParameterController {
    /// Controller for free-form input (CLI, config files): clamps but does not snap.
    pub fn exact() -> Self {
        Self {
            snap_to_step: false,
        }
    }

    /// Range-limit (and optionally snap) a value for `spec`.
    pub fn coerce(&self, spec: &ParamSpec, value: f64) -> f64 {
        let clamped = spec.clamp(value);
        // Range ends stay exact even when they are off the step grid.
        if Some(clamped) == spec.min || Some(clamped) == spec.max {
            return clamped;
        }
        match (self.snap_to_step, spec.step) {
            (true, Some(step)) => {
                let origin = spec.min.unwrap_or(0.0);
                spec.clamp(snap_to_step(clamped, origin, step))
            }
            _ => clamped,
        }
    }

    /// Apply one edit, returning the replacement model.
    pub fn apply<M: Parameterized>(&self, model: &M, key: &str, value: f64) -> ControlResult<M> {
        let spec = M::find_spec(key).ok_or_else(|| ControlError::UnknownParam {
            key: key.to_string(),
        })?;
        if spec.readonly {
            return Err(ControlError::ReadOnly {
                key: key.to_string(),
            });
        }
        if !value.is_finite() {
            return Err(ControlError::NonFinite {
                key: key.to_string(),
                value,
            });
        }

        let value = self.coerce(spec, value);
        model
            .with_param(key, value)
            .ok_or_else(|| ControlError::UnknownParam {
                key: key.to_string(),
            })
    }

    /// Apply edits in order; the first failure aborts the whole batch.
    pub fn apply_all<M: Parameterized + Clone>(
        &self,
        model: &M,
        edits: &[ParamEdit],
    ) -> ControlResult<M> {
        edits
            .iter()
            .try_fold(model.clone(), |m, edit| self.apply(&m, &edit.key, edit.value))
    }

    /// `(spec, current value)` for every table row, in display order.
    pub fn values<M: Parameterized>(model: &M) -> Vec<(ParamSpec, f64)> {
        M::param_specs()
            .iter()
            .filter_map(|spec| model.param(spec.key).map(|v| (*spec, v)))
            .collect()
    }
}
