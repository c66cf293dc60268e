use core::ops::Neg;

use serde::{Deserialize, Serialize};

use uom::num_traits::Zero;
use uom::si::{
    angle::radian,
    curvature::radian_per_meter,
    length::meter,
};

/// put angle into -pi, pi range
pub fn angle_unwrap(angle: Angle) -> Angle {
    Angle::new::<radian>((angle.get::<radian>() + PI) % (2.0 * PI) - PI)
}

#[cfg(feature = "std")]
extern crate alloc;
#[cfg(feature = "std")]
use alloc::vec::Vec;

/// lookahead magnitudes below this are geometrically meaningless, the target
/// is the start point
pub const MIN_DLEAD: Float = 1e-6;
/// lookahead magnitudes are clamped here to bound the swept arc angle
pub const MAX_DLEAD: Float = 1e6;
/// near-zero threshold for the radius fallback and for output snapping
pub const EPSILON: Float = 1e-9;
/// radius used when the supplied one is within EPSILON of zero
pub const DEFAULT_RADIUS: Float = 1.0;

/// suppress floating point noise around zero
fn snap_zero(value: Float) -> Float {
    if value.abs() < EPSILON { 0.0 } else { value }
}

/// lookahead after the stability guards, None below MIN_DLEAD
fn guarded_dlead(dlead: Length) -> Option<Float> {
    let s = dlead.get::<meter>();
    if s.abs() < MIN_DLEAD {
        return None;
    }
    Some(s.clamp(-MAX_DLEAD, MAX_DLEAD))
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: Length,
    pub y: Length,
}

impl Neg for Position {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self {
            x: -self.x,
            y: -self.y,
        }
    }
}

impl Position {
    pub fn from_array_meter(p: [Float; 2]) -> Self {
        Position {
            x: Length::new::<meter>(p[0]),
            y: Length::new::<meter>(p[1]),
        }
    }

    pub fn as_array_meter(&self) -> [Float; 2] {
        [self.x.get::<meter>(), self.y.get::<meter>()]
    }

    /// straight line distance to another position
    pub fn distance(&self, other: &Position) -> Length {
        let dx = (other.x - self.x).get::<meter>();
        let dy = (other.y - self.y).get::<meter>();
        Length::new::<meter>(sqrt(dx * dx + dy * dy))
    }
}

/// A circular "boomerang" arc anchored at a start pose.
///
/// The arc curves toward +y in the start frame (a left turn); the sign of the
/// lookahead distance selects the direction of travel along it.
#[derive(Clone, PartialEq)]
pub struct Boomerang {
    /// start point xy
    pub xy0: Position,
    /// start point theta/yaw/heading
    pub theta0: Angle,
    /// cached cos and sin of theta
    pub cos_theta0: Float,
    pub sin_theta0: Float,
    radius: Length, // curvature radius 1/kappa, always strictly positive
}

impl Default for Boomerang {
    fn default() -> Self {
        Self {
            xy0: Position::default(),
            theta0: Angle::zero(),
            cos_theta0: 1.0,
            sin_theta0: 0.0,
            radius: Length::new::<meter>(DEFAULT_RADIUS),
        }
    }
}

impl Boomerang {
    /// The turn direction is carried by the sign of the lookahead, not the
    /// radius, so only the radius magnitude is kept; a radius within EPSILON
    /// of zero falls back to DEFAULT_RADIUS.
    pub fn create(x0: Length, y0: Length, theta0: Angle, radius: Length) -> Self {
        let r = radius.get::<meter>().abs();
        let r = if r < EPSILON { DEFAULT_RADIUS } else { r };
        Self {
            xy0: Position { x: x0, y: y0 },
            theta0: angle_unwrap(theta0),
            cos_theta0: cos(theta0.get::<radian>()),
            sin_theta0: sin(theta0.get::<radian>()),
            radius: Length::new::<meter>(r),
        }
    }

    pub fn get_start_theta(&self) -> Angle {
        self.theta0
    }

    pub fn radius(&self) -> Length {
        self.radius
    }

    pub fn curvature(&self) -> Curvature {
        Curvature::new::<radian_per_meter>(1.0 / self.radius.get::<meter>())
    }

    // dlead is signed arc length along the curve, x and y will be in same units
    pub fn get_xy(&self, dlead: Length) -> Position {
        let Some(s) = guarded_dlead(dlead) else {
            return self.xy0;
        };
        let r = self.radius.get::<meter>();
        let phi = s / r;
        // in the start frame the arc center sits at (0, r)
        let local_x = r * sin(phi);
        let local_y = r * (1.0 - cos(phi));
        let x = self.xy0.x.get::<meter>() + local_x * self.cos_theta0 - local_y * self.sin_theta0;
        let y = self.xy0.y.get::<meter>() + local_x * self.sin_theta0 + local_y * self.cos_theta0;
        Position {
            x: Length::new::<meter>(snap_zero(x)),
            y: Length::new::<meter>(snap_zero(y)),
        }
    }

    /// get a new Boomerang at this arc length along the current one
    pub fn get_boomerang(&self, dlead: Length) -> Self {
        let Some(s) = guarded_dlead(dlead) else {
            return self.clone();
        };
        let xy_s = self.get_xy(dlead);
        // heading advances by the swept angle
        let phi = s / self.radius.get::<meter>();
        let theta_s = angle_unwrap(self.theta0 + Angle::new::<radian>(phi));
        Self {
            xy0: xy_s,
            theta0: theta_s,
            cos_theta0: cos(theta_s.get::<radian>()),
            sin_theta0: sin(theta_s.get::<radian>()),
            radius: self.radius,
        }
    }

    pub fn get_points<const NUM: usize>(&self, dlead: Length) -> [[Float; 2]; NUM] {
        let mut xys = [[0.0; 2]; NUM];

        let step = dlead / ((NUM - 1) as Float);

        for (i, xys_i) in xys.iter_mut().take(NUM).enumerate() {
            let s: Length = i as Float * step;
            *xys_i = self.get_xy(s).as_array_meter();
        }

        xys
    }

    #[cfg(feature = "std")]
    pub fn get_points_num(&self, dlead: Length, num: usize) -> Vec<[Float; 2]> {
        let num = num.max(2);
        let mut xys = Vec::<[Float; 2]>::new();

        let step = dlead / ((num - 1) as Float);

        for i in 0..num {
            let s: Length = i as Float * step;
            xys.push(self.get_xy(s).as_array_meter());
        }

        xys
    }
}

/// straight line target, travel along the current heading
pub fn collinear_point(x0: Length, y0: Length, theta0: Angle, distance: Length) -> Position {
    let theta = theta0.get::<radian>();
    let d = distance.get::<meter>();
    Position {
        x: x0 + Length::new::<meter>(d * cos(theta)),
        y: y0 + Length::new::<meter>(d * sin(theta)),
    }
}

/// target point from a signed curvature 1/r, positive curves left
pub fn curvature_point(
    x0: Length,
    y0: Length,
    theta0: Angle,
    dlead: Length,
    curvature: Curvature,
) -> Position {
    let kappa = curvature.get::<radian_per_meter>();
    // zero curvature means infinite radius, handled as a straight segment
    if kappa.abs() < EPSILON {
        return collinear_point(x0, y0, theta0, dlead);
    }
    let radius = Length::new::<meter>(1.0 / kappa.abs());
    // a right turn is a left turn traversed backwards
    let dlead = if kappa < 0.0 { -dlead } else { dlead };
    Boomerang::create(x0, y0, theta0, radius).get_xy(dlead)
}

#[cfg(test)]
mod tests {
    extern crate std;
    use super::*;
    use std::format;
    use uom::si::curvature::radian_per_meter;

    fn meters(value: Float) -> Length {
        Length::new::<meter>(value)
    }

    fn radians(value: Float) -> Angle {
        Angle::new::<radian>(value)
    }

    #[test]
    fn identity_below_min_dlead() {
        let curve = Boomerang::create(meters(3.0), meters(-2.0), radians(0.7), meters(2.5));
        for s in [0.0, MIN_DLEAD * 0.5, -MIN_DLEAD * 0.5] {
            let p = curve.get_xy(meters(s));
            assert_eq!(p, curve.xy0, "dlead {s}");
        }
    }

    #[test]
    fn half_circle_left() {
        let curve = Boomerang::create(meters(0.0), meters(0.0), radians(0.0), meters(1.0));
        let p = curve.get_xy(meters(PI));
        let [x, y] = p.as_array_meter();
        assert!(x.abs() < 1e-3, "{x}");
        assert!((y - 2.0).abs() < 1e-3, "{y}");
    }

    #[test]
    fn quarter_turn_rotated() {
        // phi = pi/4, local (2 sin, 2 (1 - cos)), then rotated a quarter turn
        let curve = Boomerang::create(meters(5.0), meters(5.0), radians(PI / 2.0), meters(2.0));
        let p = curve.get_xy(meters(PI / 2.0));
        let [x, y] = p.as_array_meter();
        let msg = format!("({x}, {y})");
        assert!((x - 4.4142).abs() < 1e-3, "{}", msg);
        assert!((y - 6.4142).abs() < 1e-3, "{}", msg);
    }

    #[test]
    fn default_radius_substitution() {
        let degenerate = Boomerang::create(meters(1.0), meters(2.0), radians(0.3), meters(0.0));
        let unit = Boomerang::create(meters(1.0), meters(2.0), radians(0.3), meters(DEFAULT_RADIUS));
        assert_eq!(degenerate.radius(), unit.radius());
        let s = meters(0.8);
        assert_eq!(degenerate.get_xy(s), unit.get_xy(s));
    }

    #[test]
    fn radius_sign_ignored() {
        let left = Boomerang::create(meters(0.0), meters(0.0), radians(0.0), meters(2.0));
        let right = Boomerang::create(meters(0.0), meters(0.0), radians(0.0), meters(-2.0));
        assert_eq!(left.radius(), right.radius());
        assert_eq!(left.get_xy(meters(1.5)), right.get_xy(meters(1.5)));
    }

    #[test]
    fn lookahead_clamped() {
        let curve = Boomerang::create(meters(0.0), meters(0.0), radians(0.0), meters(2.0));
        assert_eq!(curve.get_xy(meters(MAX_DLEAD * 2.0)), curve.get_xy(meters(MAX_DLEAD)));
        assert_eq!(curve.get_xy(meters(-MAX_DLEAD * 2.0)), curve.get_xy(meters(-MAX_DLEAD)));
    }

    #[test]
    fn curvature_radius_equivalence() {
        // kappa 0.5 is a radius 2 left turn
        let p0 = curvature_point(
            meters(1.0),
            meters(-1.0),
            radians(0.4),
            meters(3.0),
            Curvature::new::<radian_per_meter>(0.5),
        );
        let p1 = Boomerang::create(meters(1.0), meters(-1.0), radians(0.4), meters(2.0))
            .get_xy(meters(3.0));
        assert_eq!(p0, p1);

        // kappa -1 mirrors to a radius 1 arc with the lookahead negated
        let p2 = curvature_point(
            meters(0.0),
            meters(0.0),
            radians(0.0),
            meters(10.0),
            Curvature::new::<radian_per_meter>(-1.0),
        );
        let p3 = Boomerang::create(meters(0.0), meters(0.0), radians(0.0), meters(1.0))
            .get_xy(meters(-10.0));
        assert_eq!(p2, p3);
    }

    #[test]
    fn zero_curvature_is_straight() {
        let x0 = meters(2.0);
        let y0 = meters(3.0);
        let theta0 = radians(0.6);
        let d = meters(5.0);
        let p = curvature_point(x0, y0, theta0, d, Curvature::new::<radian_per_meter>(0.0));
        let expected = Position {
            x: x0 + meters(5.0 * cos(0.6)),
            y: y0 + meters(5.0 * sin(0.6)),
        };
        assert_eq!(p, expected);
        assert_eq!(p, collinear_point(x0, y0, theta0, d));
    }

    #[test]
    fn chord_independent_of_heading() {
        let dlead = meters(1.2);
        let r = meters(2.0);
        let reference = {
            let curve = Boomerang::create(meters(0.0), meters(0.0), radians(0.0), r);
            curve.xy0.distance(&curve.get_xy(dlead)).get::<meter>()
        };
        for theta in [0.5, PI / 2.0, -1.2, 3.0] {
            let curve = Boomerang::create(meters(0.0), meters(0.0), radians(theta), r);
            let chord = curve.xy0.distance(&curve.get_xy(dlead)).get::<meter>();
            let msg = format!("theta {theta}: chord {chord} vs {reference}");
            assert!((chord - reference).abs() < 1e-3, "{}", msg);
        }
    }

    #[test]
    fn get_points() {
        let curve = Boomerang::create(meters(0.0), meters(0.0), radians(0.0), meters(1.0));
        let dlead = meters(PI / 2.0);

        const NUM: usize = 32;
        let pts0 = curve.get_points::<NUM>(dlead);
        assert_eq!(pts0.len(), NUM);

        // redundant, std is set for tests
        #[cfg(feature = "std")]
        {
            let pts1 = curve.get_points_num(dlead, NUM);
            assert_eq!(pts1.len(), NUM);

            for i in 0..NUM {
                let p0 = pts0[i];
                let p1 = pts1[i];
                assert_eq!(p0[0], p1[0]);
                assert_eq!(p0[1], p1[1]);
            }
        }

        // first sample is the start point, last is the lookahead target
        assert_eq!(pts0[0], curve.xy0.as_array_meter());
        let target = curve.get_xy(dlead).as_array_meter();
        assert!((pts0[NUM - 1][0] - target[0]).abs() < 1e-4);
        assert!((pts0[NUM - 1][1] - target[1]).abs() < 1e-4);
    }

    #[test]
    fn boomerang_along_boomerang() {
        // radius 2, arc length pi sweeps a quarter turn
        let curve0 = Boomerang::create(meters(0.0), meters(0.0), radians(0.0), meters(2.0));
        let curve1 = curve0.get_boomerang(meters(PI));

        assert_eq!(curve0.radius(), curve1.radius());
        assert_eq!(curve1.xy0, curve0.get_xy(meters(PI)));

        let d_theta = (curve1.get_start_theta() - curve0.get_start_theta()).get::<radian>();
        let msg = format!("swept {d_theta}");
        assert!((d_theta - PI / 2.0).abs() < 1e-3, "{}", msg);
    }

    #[test]
    fn curvature_accessor() {
        let curve = Boomerang::create(meters(0.0), meters(0.0), radians(0.0), meters(2.0));
        let kappa = curve.curvature().get::<radian_per_meter>();
        assert!((kappa - 0.5).abs() < 1e-6, "{kappa}");
    }
}
