//! Static/kinetic friction for a block on a horizontal track.

use pl_core::numeric::{deg_to_rad, sign};

/// Below this speed the block counts as resting.
pub const REST_SPEED_MPS: f64 = 1e-3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrictionRegime {
    /// Resting, and static friction cancels the applied force.
    Static,
    /// Resting, but the applied force beats the static limit.
    Slipping,
    /// Moving; friction opposes the velocity.
    Kinetic,
}

/// All horizontal force terms for one state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrictionResolution {
    /// Horizontal part of the applied force.
    pub fx: f64,
    /// Vertical part of the applied force, up positive.
    pub fy: f64,
    pub normal: f64,
    /// μN, the static limit and the kinetic magnitude.
    pub f_max: f64,
    /// Friction along x, signed.
    pub friction: f64,
    /// `fx + friction`
    pub net: f64,
    pub regime: FrictionRegime,
}

impl FrictionResolution {
    /// `true` when the block stays put this frame.
    pub fn holds(&self) -> bool {
        self.regime == FrictionRegime::Static
    }
}

/// Resolve friction for mass `m`, applied force `f` at `theta_deg` above the
/// horizontal, friction coefficient `mu`, current velocity `v` and gravity `g`.
///
/// An upward pull lightens the block: `N = max(0, m g - F sin θ)`.
pub fn resolve_friction(m: f64, f: f64, theta_deg: f64, mu: f64, v: f64, g: f64) -> FrictionResolution {
    let theta = deg_to_rad(theta_deg);
    let fx = f * theta.cos();
    let fy = f * theta.sin();
    let normal = (m * g - fy).max(0.0);
    let f_max = (mu * normal).max(0.0);

    let (friction, regime) = if v.abs() < REST_SPEED_MPS {
        if fx.abs() <= f_max {
            (-fx, FrictionRegime::Static)
        } else {
            (-sign(fx) * f_max, FrictionRegime::Slipping)
        }
    } else {
        (-sign(v) * f_max, FrictionRegime::Kinetic)
    };

    FrictionResolution {
        fx,
        fy,
        normal,
        f_max,
        friction,
        net: fx + friction,
        regime,
    }
}
