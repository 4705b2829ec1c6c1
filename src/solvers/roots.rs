//! Closed-form real-root solvers for polynomials of degree up to four.
//!
//! Coefficients are listed in increasing degree, so `solve_quartic(p0, p1,
//! p2, p3, p4)` solves `p0 + p1 x + p2 x^2 + p3 x^3 + p4 x^4 = 0`. A
//! degenerate leading coefficient falls through to the lower-degree solver.
//! Roots come back sorted ascending with multiplicities; multiplicities
//! larger than one are reported only when the floating-point classifiers
//! land exactly on the degenerate case.

use crate::math::cast;
use nalgebra::RealField;

/// A real root `x` with the polynomial value `f` at the root and the root
/// multiplicity `m`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolynomialRoot<T: RealField + Copy> {
    pub x: T,
    pub f: T,
    pub m: usize,
}

fn sort_roots<T: RealField + Copy>(roots: &mut [PolynomialRoot<T>]) {
    roots.sort_by(|a, b| a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal));
}

fn cube_root<T: RealField + Copy>(x: T) -> T {
    let third: T = cast(1.0 / 3.0);
    if x >= T::zero() {
        x.powf(third)
    } else {
        -(-x).powf(third)
    }
}

/// Solves `p0 + p1 x = 0`.
pub fn solve_linear<T: RealField + Copy>(p0: T, p1: T) -> Vec<PolynomialRoot<T>> {
    if p1 == T::zero() {
        // Either no solution or all of the reals; report no roots.
        return Vec::new();
    }
    let x = -p0 / p1;
    vec![PolynomialRoot {
        x,
        f: p1.mul_add(x, p0),
        m: 1,
    }]
}

/// Solves `p0 + p1 x + p2 x^2 = 0`.
pub fn solve_quadratic<T: RealField + Copy>(p0: T, p1: T, p2: T) -> Vec<PolynomialRoot<T>> {
    if p2 == T::zero() {
        return solve_linear(p0, p1);
    }
    let (p0, p1, p2) = if p2 < T::zero() {
        (-p0, -p1, -p2)
    } else {
        (p0, p1, p2)
    };
    let eval = |x: T| p2.mul_add(x, p1).mul_add(x, p0);

    if p0 == T::zero() {
        if p1 == T::zero() {
            return vec![PolynomialRoot {
                x: T::zero(),
                f: T::zero(),
                m: 2,
            }];
        }
        let other = -p1 / p2;
        let mut roots = vec![
            PolynomialRoot {
                x: T::zero(),
                f: T::zero(),
                m: 1,
            },
            PolynomialRoot {
                x: other,
                f: eval(other),
                m: 1,
            },
        ];
        sort_roots(&mut roots);
        return roots;
    }

    // Monic and depressed forms.
    let m0 = p0 / p2;
    let m1 = p1 / p2;
    let half: T = cast(0.5);
    let m1_div2 = half * m1;
    let d0 = m1_div2.mul_add(-m1_div2, m0);
    if d0 < T::zero() {
        let sqrt_neg_d0 = (-d0).sqrt();
        let x0 = -m1_div2 - sqrt_neg_d0;
        let x1 = -m1_div2 + sqrt_neg_d0;
        vec![
            PolynomialRoot {
                x: x0,
                f: eval(x0),
                m: 1,
            },
            PolynomialRoot {
                x: x1,
                f: eval(x1),
                m: 1,
            },
        ]
    } else if d0 == T::zero() {
        vec![PolynomialRoot {
            x: -m1_div2,
            f: eval(-m1_div2),
            m: 2,
        }]
    } else {
        Vec::new()
    }
}

/// Roots of the depressed cubic `x^3 + d1 x + d0`, as `(x, m)` pairs sorted
/// ascending.
fn depressed_cubic_roots<T: RealField + Copy>(d0: T, d1: T) -> Vec<(T, usize)> {
    let zero = T::zero();
    if d0 == zero {
        if d1 == zero {
            return vec![(zero, 3)];
        }
        if d1 < zero {
            let s = (-d1).sqrt();
            return vec![(-s, 1), (zero, 1), (s, 1)];
        }
        return vec![(zero, 1)];
    }

    let four: T = cast(4.0);
    let twenty_seven: T = cast(27.0);
    let delta = -four * d1 * d1 * d1 - twenty_seven * d0 * d0;
    if delta > zero {
        // Three distinct real roots; d1 < 0 is guaranteed here.
        let three: T = cast(3.0);
        let two: T = cast(2.0);
        let rho = (-d1 / three).sqrt();
        let arg = crate::math::clamp(
            three * d0 / (two * d1 * rho),
            -T::one(),
            T::one(),
        );
        let theta = arg.acos();
        let two_pi_div3: T = cast(2.0 * std::f64::consts::PI / 3.0);
        let mut out = vec![
            ((two * rho) * (theta / three).cos(), 1),
            ((two * rho) * (theta / three - two_pi_div3).cos(), 1),
            ((two * rho) * (theta / three + two_pi_div3).cos(), 1),
        ];
        out.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));
        out
    } else if delta < zero {
        // One real root by Cardano's formula.
        let half: T = cast(0.5);
        let s = (d0 * d0 * cast::<T>(0.25) + d1 * d1 * d1 / twenty_seven).sqrt();
        let u = cube_root(-half * d0 + s);
        let v = cube_root(-half * d0 - s);
        vec![(u + v, 1)]
    } else {
        // Repeated root; d1 != 0 because d0 != 0.
        let three: T = cast(3.0);
        let two: T = cast(2.0);
        let simple = three * d0 / d1;
        let double = -three * d0 / (two * d1);
        let mut out = vec![(simple, 1), (double, 2)];
        out.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));
        out
    }
}

/// Solves `p0 + p1 x + p2 x^2 + p3 x^3 = 0`.
pub fn solve_cubic<T: RealField + Copy>(p0: T, p1: T, p2: T, p3: T) -> Vec<PolynomialRoot<T>> {
    if p3 == T::zero() {
        return solve_quadratic(p0, p1, p2);
    }
    let eval = |x: T| p3.mul_add(x, p2).mul_add(x, p1).mul_add(x, p0);

    let m0 = p0 / p3;
    let m1 = p1 / p3;
    let m2 = p2 / p3;
    let m2_div3 = m2 * cast::<T>(1.0 / 3.0);
    let two: T = cast(2.0);
    let d0 = m0 - m2_div3 * (m1 - two * m2_div3 * m2_div3);
    let d1 = m1 - m2 * m2_div3;

    let mut roots: Vec<PolynomialRoot<T>> = depressed_cubic_roots(d0, d1)
        .into_iter()
        .map(|(y, m)| {
            let x = y - m2_div3;
            PolynomialRoot { x, f: eval(x), m }
        })
        .collect();
    sort_roots(&mut roots);
    roots
}

/// Roots of the biquadratic `x^4 + d2 x^2 + d0` with `d0 != 0`.
fn biquadratic_roots<T: RealField + Copy>(d0: T, d2: T) -> Vec<(T, usize)> {
    let zero = T::zero();
    let half: T = cast(0.5);
    let s = -half * d2;
    let t = s * s - d0;
    if t > zero {
        let sqrt_t = t.sqrt();
        let s_plus = s + sqrt_t;
        let s_minus = d0 / s_plus;
        if s_minus > zero {
            let r0 = s_minus.sqrt();
            let r1 = s_plus.sqrt();
            let mut out = vec![(-r1, 1), (-r0, 1), (r0, 1), (r1, 1)];
            out.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));
            out
        } else if s_plus < zero {
            Vec::new()
        } else {
            let r = s_plus.sqrt();
            vec![(-r, 1), (r, 1)]
        }
    } else if t < zero {
        Vec::new()
    } else if s > zero {
        let r = s.sqrt();
        vec![(-r, 2), (r, 2)]
    } else {
        Vec::new()
    }
}

/// Roots of the depressed quartic `x^4 + d2 x^2 + d1 x + d0`, as `(x, m)`
/// pairs sorted ascending.
#[allow(clippy::too_many_lines)]
fn depressed_quartic_roots<T: RealField + Copy>(d0: T, d1: T, d2: T) -> Vec<(T, usize)> {
    let zero = T::zero();
    let half: T = cast(0.5);

    if d0 == zero {
        if d1 == zero {
            if d2 > zero {
                return vec![(zero, 2)];
            }
            if d2 < zero {
                let s = (-d2).sqrt();
                return vec![(-s, 1), (zero, 2), (s, 1)];
            }
            return vec![(zero, 4)];
        }
        // Zero is a simple root; the cubic factor has the rest.
        let mut out = depressed_cubic_roots(d1, d2);
        out.push((zero, 1));
        out.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));
        return out;
    }

    if d1 == zero {
        return biquadratic_roots(d0, d2);
    }

    let four: T = cast(4.0);
    let d0_sqr = d0 * d0;
    let d1_sqr = d1 * d1;
    let d2_sqr = d2 * d2;
    let delta = d1_sqr
        * (cast::<T>(-27.0) * d1_sqr + four * d2 * (cast::<T>(36.0) * d0 - d2_sqr))
        + cast::<T>(16.0) * d0 * (d2_sqr * (d2_sqr - cast::<T>(8.0) * d0) + cast::<T>(16.0) * d0_sqr);

    if delta == zero {
        // Repeated roots.
        let a0 = cast::<T>(12.0) * d0 + d2_sqr;
        if a0 == zero {
            // (x - r0)^3 (x - r1) with d2 < 0 guaranteed.
            let r0 = cast::<T>(-0.75) * d1 / d2;
            let r1 = cast::<T>(-3.0) * r0;
            let mut out = vec![(r0, 3), (r1, 1)];
            out.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));
            return out;
        }
        let a1 = four * d0 - d2_sqr;
        let r0 = -d1 * a0 / (cast::<T>(9.0) * d1_sqr - cast::<T>(2.0) * d2 * a1);
        let q_discriminant = -(d2 + cast::<T>(2.0) * r0 * r0);
        if q_discriminant > zero {
            // (x - r0)^2 (x - r1) (x - r2).
            let sq = q_discriminant.sqrt();
            let mut out = vec![(r0, 2), (-r0 - sq, 1), (-r0 + sq, 1)];
            out.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));
            return out;
        }
        // (x - r0)^2 and a complex-conjugate pair.
        return vec![(r0, 2)];
    }

    if delta > zero && d2 > zero {
        // Two complex-conjugate pairs.
        return Vec::new();
    }

    // Resolvent cubic of the quartic, transformed to depressed form.
    let m0 = cast::<T>(0.125) * (four * d0 * d2 - d1_sqr);
    let m1 = -d0;
    let m2 = -half * d2;
    let m2_div3 = m2 * cast::<T>(1.0 / 3.0);
    let c0 = m0 - m2_div3 * (m1 - cast::<T>(2.0) * m2_div3 * m2_div3);
    let c1 = m1 - m2 * m2_div3;

    let cubic = depressed_cubic_roots(c0, c1);
    let t = cubic[0].0 - m2_div3;

    let alpha_sqr = cast::<T>(2.0) * t - d2;
    let alpha = alpha_sqr.max(zero).sqrt();
    let sign_d1 = if d1 > zero { T::one() } else { -T::one() };
    let beta = sign_d1 * (t * t - d0).max(zero).sqrt();
    let sqrt_discr0 = (alpha_sqr - four * (t + beta)).max(zero).sqrt();
    let sqrt_discr1 = (alpha_sqr - four * (t - beta)).max(zero).sqrt();

    if delta > zero {
        // Four distinct real roots.
        let mut out = vec![
            (half * (alpha - sqrt_discr0), 1),
            (half * (alpha + sqrt_discr0), 1),
            (half * (-alpha - sqrt_discr1), 1),
            (half * (-alpha + sqrt_discr1), 1),
        ];
        out.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));
        out
    } else {
        // Two real roots and a complex-conjugate pair.
        if sign_d1 > zero {
            vec![
                (half * (-alpha - sqrt_discr1), 1),
                (half * (-alpha + sqrt_discr1), 1),
            ]
        } else {
            vec![
                (half * (alpha - sqrt_discr0), 1),
                (half * (alpha + sqrt_discr0), 1),
            ]
        }
    }
}

/// Solves `p0 + p1 x + p2 x^2 + p3 x^3 + p4 x^4 = 0`.
pub fn solve_quartic<T: RealField + Copy>(
    p0: T,
    p1: T,
    p2: T,
    p3: T,
    p4: T,
) -> Vec<PolynomialRoot<T>> {
    if p4 == T::zero() {
        return solve_cubic(p0, p1, p2, p3);
    }
    let eval = |x: T| {
        p4.mul_add(x, p3)
            .mul_add(x, p2)
            .mul_add(x, p1)
            .mul_add(x, p0)
    };

    let m0 = p0 / p4;
    let m1 = p1 / p4;
    let m2 = p2 / p4;
    let m3 = p3 / p4;
    let m3_div4 = m3 * cast::<T>(0.25);
    let m3_div4_sqr = m3_div4 * m3_div4;
    let three: T = cast(3.0);
    let d0 = m0 - m3_div4 * (m1 - m3_div4 * (m2 - three * m3_div4_sqr));
    let d1 = m1 - cast::<T>(2.0) * m3_div4 * (m2 - cast::<T>(4.0) * m3_div4_sqr);
    let d2 = m2 - cast::<T>(6.0) * m3_div4_sqr;

    let mut roots: Vec<PolynomialRoot<T>> = depressed_quartic_roots(d0, d1, d2)
        .into_iter()
        .map(|(y, m)| {
            let x = y - m3_div4;
            PolynomialRoot { x, f: eval(x), m }
        })
        .collect();
    sort_roots(&mut roots);
    roots
}
