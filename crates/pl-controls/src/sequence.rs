//! Fixed-duration multi-phase animation timing.
//!
//! A sequencer runs phases `1..=phases`, each lasting `phase_duration`
//! seconds, then returns to idle (phase 0). It is a plain value so models can
//! embed it and stay immutable between frames.

use serde::{Deserialize, Serialize};

/// Number of phases in a vector decomposition: horizontal, vertical, resultant.
pub const DECOMPOSITION_PHASES: u8 = 3;
/// Seconds spent on each decomposition phase.
pub const DECOMPOSITION_PHASE_S: f64 = 0.8;

/// Observable state of a sequencer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SequencerState {
    Idle,
    /// `phase` is 1-based; `progress` runs 0..1 within the phase.
    Running { phase: u8, progress: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhaseSequencer {
    phases: u8,
    phase_duration: f64,
    /// 0 when idle.
    phase: u8,
    /// Seconds into the current phase.
    elapsed: f64,
}

impl PhaseSequencer {
    /// # Panics
    ///
    /// Panics if `phases` is zero or `phase_duration` is not positive.
    pub fn new(phases: u8, phase_duration: f64) -> Self {
        assert!(phases > 0, "sequencer needs at least one phase");
        assert!(phase_duration > 0.0, "phase duration must be positive");
        Self {
            phases,
            phase_duration,
            phase: 0,
            elapsed: 0.0,
        }
    }

    /// The three-phase, 0.8 s/phase decomposition animation.
    pub fn decomposition() -> Self {
        Self::new(DECOMPOSITION_PHASES, DECOMPOSITION_PHASE_S)
    }

    pub fn phases(&self) -> u8 {
        self.phases
    }

    pub fn phase_duration(&self) -> f64 {
        self.phase_duration
    }

    /// Current phase, 0 when idle.
    pub fn phase(&self) -> u8 {
        self.phase
    }

    /// Progress within the current phase, 0 when idle.
    pub fn progress(&self) -> f64 {
        if self.phase == 0 {
            0.0
        } else {
            (self.elapsed / self.phase_duration).clamp(0.0, 1.0)
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase != 0
    }

    pub fn state(&self) -> SequencerState {
        if self.phase == 0 {
            SequencerState::Idle
        } else {
            SequencerState::Running {
                phase: self.phase,
                progress: self.progress(),
            }
        }
    }

    /// Restart from phase 1.
    pub fn started(self) -> Self {
        Self {
            phase: 1,
            elapsed: 0.0,
            ..self
        }
    }

    pub fn stopped(self) -> Self {
        Self {
            phase: 0,
            elapsed: 0.0,
            ..self
        }
    }

    /// Start when idle, cancel when running.
    pub fn toggled(self) -> Self {
        if self.is_running() {
            self.stopped()
        } else {
            self.started()
        }
    }

    /// Advance by `dt` seconds. Long deltas may cross several phases.
    pub fn advanced(self, dt: f64) -> Self {
        if self.phase == 0 || !dt.is_finite() || dt <= 0.0 {
            return self;
        }
        let mut next = self;
        next.elapsed += dt;
        while next.elapsed >= next.phase_duration {
            next.elapsed -= next.phase_duration;
            if next.phase >= next.phases {
                return next.stopped();
            }
            next.phase += 1;
        }
        next
    }
}

impl Default for PhaseSequencer {
    fn default() -> Self {
        Self::decomposition()
    }
}

/// Models that carry a staged decomposition animation.
///
/// Defaults describe a model without one.
pub trait Staged: Sized {
    fn sequencer(&self) -> Option<PhaseSequencer> {
        None
    }

    /// Copy of `self` with the sequencer replaced.
    fn with_sequencer(&self, _seq: PhaseSequencer) -> Option<Self> {
        None
    }

    /// Start the animation, or cancel it when it is already running.
    fn toggle_sequence(&self) -> Option<Self> {
        let seq = self.sequencer()?;
        self.with_sequencer(seq.toggled())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_until_started() {
        let seq = PhaseSequencer::decomposition();
        assert_eq!(seq.state(), SequencerState::Idle);
        assert_eq!(seq.advanced(10.0), seq);
    }

    #[test]
    fn walks_through_phases_then_stops() {
        let mut seq = PhaseSequencer::decomposition().started();
        assert_eq!(seq.phase(), 1);

        seq = seq.advanced(0.4);
        assert_eq!(seq.phase(), 1);
        assert!((seq.progress() - 0.5).abs() < 1e-12);

        seq = seq.advanced(0.5);
        assert_eq!(seq.phase(), 2);
        assert!((seq.progress() - 0.125).abs() < 1e-9);

        seq = seq.advanced(0.8);
        assert_eq!(seq.phase(), 3);

        seq = seq.advanced(0.8);
        assert!(!seq.is_running());
        assert_eq!(seq.progress(), 0.0);
    }

    #[test]
    fn long_delta_crosses_phases() {
        let seq = PhaseSequencer::decomposition().started().advanced(1.7);
        assert_eq!(seq.phase(), 3);
        let seq = PhaseSequencer::decomposition().started().advanced(5.0);
        assert_eq!(seq.state(), SequencerState::Idle);
    }

    #[test]
    fn toggle_cancels_running_animation() {
        let seq = PhaseSequencer::decomposition().toggled();
        assert!(seq.is_running());
        let seq = seq.advanced(1.0).toggled();
        assert!(!seq.is_running());
    }

    #[derive(Debug, PartialEq)]
    struct Arrow {
        seq: PhaseSequencer,
    }

    impl Staged for Arrow {
        fn sequencer(&self) -> Option<PhaseSequencer> {
            Some(self.seq)
        }

        fn with_sequencer(&self, seq: PhaseSequencer) -> Option<Self> {
            Some(Self { seq })
        }
    }

    struct Plain;

    impl Staged for Plain {}

    #[test]
    fn staged_toggle() {
        let a = Arrow {
            seq: PhaseSequencer::decomposition(),
        };
        let running = a.toggle_sequence().unwrap();
        assert_eq!(running.seq.phase(), 1);
        assert!(Plain.toggle_sequence().is_none());
    }

    #[test]
    #[should_panic]
    fn zero_phases_panics() {
        let _ = PhaseSequencer::new(0, 1.0);
    }
}
