// pl-core/src/units.rs

use uom::si::f64::{Acceleration as UomAcceleration, Force as UomForce, Mass as UomMass};

// Public canonical unit types (SI, f64)
pub type Accel = UomAcceleration;
pub type Force = UomForce;
pub type Mass = UomMass;

#[inline]
pub fn mps2(v: f64) -> Accel {
    use uom::si::acceleration::meter_per_second_squared;
    Accel::new::<meter_per_second_squared>(v)
}

#[inline]
pub fn kg(v: f64) -> Mass {
    use uom::si::mass::kilogram;
    Mass::new::<kilogram>(v)
}

#[inline]
pub fn newton(v: f64) -> Force {
    use uom::si::force::newton;
    Force::new::<newton>(v)
}

#[inline]
pub fn in_newtons(f: Force) -> f64 {
    f.get::<uom::si::force::newton>()
}

pub mod constants {
    /// Gravity used by the force experiments and the default vector decomposition.
    pub const G_MPS2: f64 = 9.81;
    /// Gravity preset shown on the free fall and projectile sliders.
    pub const G_SLIDER_MPS2: f64 = 9.8;
    /// Rounded gravity used by the force types breakdown.
    pub const G_ROUNDED_MPS2: f64 = 10.0;
}
