// this doesn't have to be no_std, but with no-default-features it should be no_std compatible
#![no_std]

use core::include;

pub mod f32 {
    use super::*;

    pub type Float = f32;
    use core::f32::consts::PI;
    use libm::cosf as cos;
    use libm::sinf as sin;
    use libm::sqrtf as sqrt;

    use uom::si::f32::{Angle, Curvature, Length};

    include!("boomerang.rs");

    impl Position {
        pub fn to_f64(&self) -> f64::Position {
            f64::Position {
                x: uom::si::f64::Length::new::<meter>(self.x.get::<meter>() as f64),
                y: uom::si::f64::Length::new::<meter>(self.y.get::<meter>() as f64),
            }
        }
    }
}

pub mod f64 {
    use super::*;

    pub type Float = f64;
    use core::f64::consts::PI;
    use libm::cos;
    use libm::sin;
    use libm::sqrt;

    use uom::si::f64::{Angle, Curvature, Length};

    include!("boomerang.rs");

    impl Position {
        pub fn to_f32(&self) -> f32::Position {
            f32::Position {
                x: uom::si::f32::Length::new::<meter>(self.x.get::<meter>() as f32),
                y: uom::si::f32::Length::new::<meter>(self.y.get::<meter>() as f32),
            }
        }
    }
}
