//! Closed-form projectile motion shared by the projectile experiments.

use pl_core::numeric::{deg_to_rad, rad_to_deg};

/// Launch conditions. Angle in degrees above the horizontal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Launch {
    pub v: f64,
    pub angle_deg: f64,
    pub x0: f64,
    pub y0: f64,
    pub g: f64,
}

/// Kinematic state at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ballistic {
    pub x: f64,
    /// Height, clamped at the ground.
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
}

impl Ballistic {
    pub fn speed(&self) -> f64 {
        self.vx.hypot(self.vy)
    }

    /// Direction of travel in degrees, counter-clockwise from +x.
    pub fn heading_deg(&self) -> f64 {
        rad_to_deg(self.vy.atan2(self.vx))
    }
}

impl Launch {
    pub fn vx(&self) -> f64 {
        self.v * deg_to_rad(self.angle_deg).cos()
    }

    pub fn vy0(&self) -> f64 {
        self.v * deg_to_rad(self.angle_deg).sin()
    }

    /// Unclamped height; negative once the body would be below ground.
    pub fn raw_height(&self, t: f64) -> f64 {
        self.y0 + self.vy0() * t - 0.5 * self.g * t * t
    }

    /// State at time `t`. Height never goes below zero; velocity keeps
    /// following the free-flight formula.
    pub fn at(&self, t: f64) -> Ballistic {
        Ballistic {
            x: self.x0 + self.vx() * t,
            y: self.raw_height(t).max(0.0),
            vx: self.vx(),
            vy: self.vy0() - self.g * t,
        }
    }

    /// Time at which the body reaches the ground, if it ever does.
    pub fn landing_time(&self) -> Option<f64> {
        let vy0 = self.vy0();
        if self.g <= 0.0 {
            return (vy0 < 0.0).then(|| self.y0 / -vy0);
        }
        let disc = vy0 * vy0 + 2.0 * self.g * self.y0;
        if disc < 0.0 {
            return None;
        }
        let t = (vy0 + disc.sqrt()) / self.g;
        (t >= 0.0).then_some(t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_launch() -> Launch {
        Launch {
            v: 20.0,
            angle_deg: 45.0,
            x0: 0.0,
            y0: 10.0,
            g: 9.8,
        }
    }

    #[test]
    fn one_second_in() {
        let s = default_launch().at(1.0);
        assert!((s.x - 14.142).abs() < 1e-3);
        assert!((s.y - 19.242).abs() < 1e-3);
    }

    #[test]
    fn height_clamps_at_ground() {
        let launch = default_launch();
        let t_land = launch.landing_time().unwrap();
        assert!(launch.raw_height(t_land).abs() < 1e-9);
        assert_eq!(launch.at(t_land + 1.0).y, 0.0);
    }

    #[test]
    fn horizontal_launch_heading() {
        let flat = Launch {
            angle_deg: 0.0,
            ..default_launch()
        };
        let s = flat.at(0.0);
        assert_eq!(s.heading_deg(), 0.0);
        assert!(flat.at(1.0).heading_deg() < 0.0);
    }

    #[test]
    fn no_gravity_upward_never_lands() {
        let up = Launch {
            g: 0.0,
            ..default_launch()
        };
        assert_eq!(up.landing_time(), None);
    }
}
