//! Type-erased access to a running experiment.
//!
//! Front ends hold a `Box<dyn Experiment>` and never name the concrete model.
//! Every [`Session`] over a [`LabExperiment`] model is an [`Experiment`].

use crate::catalog::ExperimentKind;
use pl_controls::{ControlResult, ParamSpec, ParameterController, Parameterized, Staged};
use pl_forces::{Equilibrium, ForceAnalysis, ForceTypes};
use pl_kinematics::{
    FreeFall, Projectile, ReferenceFrame, UniformAcceleration, UniformMotion, VectorDecomposition,
};
use pl_scene::{CanvasSize, DisplaySettings, DragHandle, Draggable, Point2, Render, Scene};
use pl_sim::{LabModel, MetricSpec, Sample, SampleSeries, Session, SimOptions, SimResult, RunStats};

/// Everything a model needs to be driven by the application.
pub trait LabExperiment:
    LabModel + Parameterized + Render + Draggable + Staged + Send + 'static
{
    const KIND: ExperimentKind;
}

impl LabExperiment for UniformMotion {
    const KIND: ExperimentKind = ExperimentKind::UniformMotion;
}

impl LabExperiment for UniformAcceleration {
    const KIND: ExperimentKind = ExperimentKind::UniformAcceleration;
}

impl LabExperiment for FreeFall {
    const KIND: ExperimentKind = ExperimentKind::FreeFall;
}

impl LabExperiment for Projectile {
    const KIND: ExperimentKind = ExperimentKind::Projectile;
}

impl LabExperiment for VectorDecomposition {
    const KIND: ExperimentKind = ExperimentKind::VectorDecomposition;
}

impl LabExperiment for ReferenceFrame {
    const KIND: ExperimentKind = ExperimentKind::ReferenceFrame;
}

impl LabExperiment for ForceTypes {
    const KIND: ExperimentKind = ExperimentKind::ForceTypes;
}

impl LabExperiment for ForceAnalysis {
    const KIND: ExperimentKind = ExperimentKind::ForceAnalysis;
}

impl LabExperiment for Equilibrium {
    const KIND: ExperimentKind = ExperimentKind::Equilibrium;
}

/// Object-safe view of a session.
pub trait Experiment: Send {
    fn kind(&self) -> ExperimentKind;

    fn param_specs(&self) -> &'static [ParamSpec];
    /// `(spec, value)` per table row.
    fn param_values(&self) -> Vec<(ParamSpec, f64)>;
    fn param(&self, key: &str) -> Option<f64>;
    /// Validated single-field edit. Accepted while playing.
    fn apply_edit(&mut self, controller: &ParameterController, key: &str, value: f64)
    -> ControlResult<()>;

    fn metrics(&self) -> &'static [MetricSpec];
    fn playable(&self) -> bool;
    fn is_playing(&self) -> bool;
    fn play(&mut self) -> bool;
    fn pause(&mut self);
    fn toggle_play(&mut self) -> bool;
    fn reset(&mut self);
    fn tick(&mut self, dt: f64) -> bool;
    fn time(&self) -> f64;
    fn run_fixed(&mut self, opts: &SimOptions) -> SimResult<RunStats>;

    /// `false` when the experiment has no decomposition animation.
    fn toggle_decomposition(&mut self) -> bool;
    fn decomposition_running(&self) -> bool;
    fn has_decomposition(&self) -> bool;

    fn render(&self, size: CanvasSize, display: &DisplaySettings) -> Scene;
    fn handles(&self, size: CanvasSize) -> Vec<DragHandle>;
    /// Move a drag handle. `false` when the handle is unknown.
    fn drag(&mut self, handle: &str, to: Point2<f64>, size: CanvasSize) -> bool;

    fn series(&self) -> &SampleSeries;
    fn current_sample(&self) -> Sample;
}

impl<M: LabExperiment> Experiment for Session<M> {
    fn kind(&self) -> ExperimentKind {
        M::KIND
    }

    fn param_specs(&self) -> &'static [ParamSpec] {
        M::param_specs()
    }

    fn param_values(&self) -> Vec<(ParamSpec, f64)> {
        ParameterController::values(self.model())
    }

    fn param(&self, key: &str) -> Option<f64> {
        self.model().param(key)
    }

    fn apply_edit(
        &mut self,
        controller: &ParameterController,
        key: &str,
        value: f64,
    ) -> ControlResult<()> {
        let next = controller.apply(self.model(), key, value)?;
        tracing::debug!(experiment = M::KIND.key(), key, value, "parameter edit");
        self.set_model(next);
        Ok(())
    }

    fn metrics(&self) -> &'static [MetricSpec] {
        M::metrics()
    }

    fn playable(&self) -> bool {
        M::playable()
    }

    fn is_playing(&self) -> bool {
        Session::is_playing(self)
    }

    fn play(&mut self) -> bool {
        Session::play(self)
    }

    fn pause(&mut self) {
        Session::pause(self)
    }

    fn toggle_play(&mut self) -> bool {
        Session::toggle_play(self)
    }

    fn reset(&mut self) {
        Session::reset(self)
    }

    fn tick(&mut self, dt: f64) -> bool {
        Session::tick(self, dt)
    }

    fn time(&self) -> f64 {
        self.model().time()
    }

    fn run_fixed(&mut self, opts: &SimOptions) -> SimResult<RunStats> {
        pl_sim::run_fixed(self, opts)
    }

    fn toggle_decomposition(&mut self) -> bool {
        match self.model().toggle_sequence() {
            Some(next) => {
                self.set_model(next);
                true
            }
            None => false,
        }
    }

    fn has_decomposition(&self) -> bool {
        self.model().sequencer().is_some()
    }

    fn decomposition_running(&self) -> bool {
        self.model()
            .sequencer()
            .is_some_and(|seq| seq.is_running())
    }

    fn render(&self, size: CanvasSize, display: &DisplaySettings) -> Scene {
        self.model().render(size, display)
    }

    fn handles(&self, size: CanvasSize) -> Vec<DragHandle> {
        self.model().handles(size)
    }

    fn drag(&mut self, handle: &str, to: Point2<f64>, size: CanvasSize) -> bool {
        match self.model().drag_to(handle, to, size) {
            Some(next) => {
                self.set_model(next);
                true
            }
            None => false,
        }
    }

    fn series(&self) -> &SampleSeries {
        Session::series(self)
    }

    fn current_sample(&self) -> Sample {
        self.model().sample()
    }
}
