// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! # Multi-Input Beam Builders
//!
//! Enclosures for the two multiplicative primitives: the bilinear product
//! and the two-component weighted average. In both cases the slope is the
//! gradient at the input midpoints and the offset is the exact range of the
//! residual `f(x) - slope . x` over the input box, found at a finite set of
//! candidate points.

use crate::beam::Beam;
use girder_core::math::{interval::Interval, vector::DenseVector};

impl Beam {
    /// Encloses the product `x * y` for `x` in `a` and `y` in `b`.
    ///
    /// The slope is the gradient at the midpoints; the residual is bilinear,
    /// so its range over the box is spanned by the four corners.
    pub fn product(a: Interval, b: Interval) -> Beam {
        assert!(
            a.is_finite() && b.is_finite(),
            "Beam::product: inputs {} and {} must be finite",
            a,
            b
        );
        let slope_x = b.midpoint();
        let slope_y = a.midpoint();

        let mut offset: Option<Interval> = None;
        for &x in &[a.lower(), a.upper()] {
            for &y in &[b.lower(), b.upper()] {
                let residual = x * y - slope_x * x - slope_y * y;
                let point = Interval::point(residual);
                offset = Some(match offset {
                    Some(hull) => hull.hull(point),
                    None => point,
                });
            }
        }
        Beam::affine(
            DenseVector::from_vec(vec![slope_x, slope_y]),
            offset.unwrap_or_else(Interval::zero),
        )
    }

    /// Encloses the weighted average `(w1 * v1 + w2 * v2) / (w1 + w2)` over
    /// the four inputs, in the order `(w1, v1, w2, v2)`.
    ///
    /// The residual is linear in each value, so the value inputs only need
    /// their corners; for each value corner the residual over the weight box
    /// is extremal at a weight corner, along an edge where the partial
    /// derivative in the free weight vanishes, or at the joint interior
    /// critical point.
    ///
    /// # Panics
    ///
    /// Panics if a weight admits a negative value or the weights can sum to
    /// zero (`weight1.lower() + weight2.lower()` must be positive).
    pub fn weighted_average(
        weight1: Interval,
        value1: Interval,
        weight2: Interval,
        value2: Interval,
    ) -> Beam {
        for (name, input) in [
            ("weight1", weight1),
            ("value1", value1),
            ("weight2", weight2),
            ("value2", value2),
        ] {
            assert!(
                input.is_finite(),
                "Beam::weighted_average: {} = {} must be finite",
                name,
                input
            );
        }
        assert!(
            weight1.lower() >= 0.0 && weight2.lower() >= 0.0,
            "Beam::weighted_average: weights must be nonnegative, got {} and {}",
            weight1,
            weight2
        );
        assert!(
            weight1.lower() + weight2.lower() > 0.0,
            "Beam::weighted_average: weights must not be able to sum to zero, got {} and {}",
            weight1,
            weight2
        );

        let mw1 = weight1.midpoint();
        let mw2 = weight2.midpoint();
        let mv1 = value1.midpoint();
        let mv2 = value2.midpoint();
        let denominator = mw1 + mw2;
        let at_midpoint = (mw1 * mv1 + mw2 * mv2) / denominator;

        // Gradient at the midpoints.
        let slope = [
            (mv1 - at_midpoint) / denominator,
            mw1 / denominator,
            (mv2 - at_midpoint) / denominator,
            mw2 / denominator,
        ];

        let residual = |w1: f64, v1: f64, w2: f64, v2: f64| -> f64 {
            (w1 * v1 + w2 * v2) / (w1 + w2)
                - slope[0] * w1
                - slope[1] * v1
                - slope[2] * w2
                - slope[3] * v2
        };

        let mut offset: Option<Interval> = None;
        let mut consider = |w1: f64, v1: f64, w2: f64, v2: f64| {
            let point = Interval::point(residual(w1, v1, w2, v2));
            offset = Some(match offset {
                Some(hull) => hull.hull(point),
                None => point,
            });
        };

        for &v1 in &[value1.lower(), value1.upper()] {
            for &v2 in &[value2.lower(), value2.upper()] {
                // Weight corners.
                for &w1 in &[weight1.lower(), weight1.upper()] {
                    for &w2 in &[weight2.lower(), weight2.upper()] {
                        consider(w1, v1, w2, v2);
                    }
                }
                // Edges with w2 fixed: d/dw1 vanishes where
                // (w1 + w2)^2 = w2 * (v1 - v2) / slope_w1.
                if slope[0] != 0.0 {
                    for &w2 in &[weight2.lower(), weight2.upper()] {
                        let radicand = w2 * (v1 - v2) / slope[0];
                        if radicand > 0.0 {
                            let w1 = radicand.sqrt() - w2;
                            if weight1.contains(w1) {
                                consider(w1, v1, w2, v2);
                            }
                        }
                    }
                }
                // Edges with w1 fixed, symmetric in the other weight.
                if slope[2] != 0.0 {
                    for &w1 in &[weight1.lower(), weight1.upper()] {
                        let radicand = w1 * (v2 - v1) / slope[2];
                        if radicand > 0.0 {
                            let w2 = radicand.sqrt() - w1;
                            if weight2.contains(w2) {
                                consider(w1, v1, w2, v2);
                            }
                        }
                    }
                }
                // Joint interior critical point: both partials vanish at a
                // shared total weight (v1 - v2) / (slope_w1 - slope_w2).
                if v1 != v2 && slope[0] != slope[2] {
                    let total = (v1 - v2) / (slope[0] - slope[2]);
                    if total > 0.0 {
                        let w2 = total * total * slope[0] / (v1 - v2);
                        let w1 = total - w2;
                        if weight1.contains(w1) && weight2.contains(w2) {
                            consider(w1, v1, w2, v2);
                        }
                    }
                }
            }
        }

        Beam::affine(
            DenseVector::from_slice(&slope),
            offset.unwrap_or_else(Interval::zero),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    fn assert_contains(beam: &Beam, point: &[f64], value: f64) {
        let enclosure = beam.output_at(&point.to_vec().into());
        assert!(
            enclosure.lower() <= value + 1e-9 && value - 1e-9 <= enclosure.upper(),
            "enclosure {} misses {} at {:?}",
            enclosure,
            value,
            point
        );
    }

    #[test]
    fn test_product_encloses_random_points() {
        let a = Interval::new(-2.0, 3.0);
        let b = Interval::new(0.5, 4.0);
        let beam = Beam::product(a, b);

        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..1000 {
            let x = a.lower() + rng.random::<f64>() * a.width();
            let y = b.lower() + rng.random::<f64>() * b.width();
            assert_contains(&beam, &[x, y], x * y);
        }
    }

    #[test]
    fn test_product_offset_width_is_half_corner_spread() {
        // Over [0, 1] x [0, 1] the residual spans half-width products,
        // giving offset width 2 * 0.5 * 0.5 = 0.5.
        let beam = Beam::product(Interval::new(0.0, 1.0), Interval::new(0.0, 1.0));
        assert_eq!(beam.offset().width(), 0.5);
    }

    #[test]
    fn test_product_of_points_is_exact() {
        let beam = Beam::product(Interval::point(2.0), Interval::point(-3.0));
        let out = beam.output_at(&vec![2.0, -3.0].into());
        assert!(out.is_point());
        assert_eq!(out.lower(), -6.0);
    }

    #[test]
    fn test_weighted_average_encloses_random_points() {
        let w1 = Interval::new(0.5, 2.0);
        let v1 = Interval::new(-1.0, 1.0);
        let w2 = Interval::new(0.0, 3.0);
        let v2 = Interval::new(2.0, 5.0);
        let beam = Beam::weighted_average(w1, v1, w2, v2);

        let mut rng = ChaCha8Rng::seed_from_u64(17);
        for _ in 0..2000 {
            let a = w1.lower() + rng.random::<f64>() * w1.width();
            let x = v1.lower() + rng.random::<f64>() * v1.width();
            let b = w2.lower() + rng.random::<f64>() * w2.width();
            let y = v2.lower() + rng.random::<f64>() * v2.width();
            let exact = (a * x + b * y) / (a + b);
            assert_contains(&beam, &[a, x, b, y], exact);
        }
    }

    #[test]
    fn test_weighted_average_corner_assignments() {
        let inputs = [
            Interval::new(1.0, 4.0),
            Interval::new(-3.0, 0.0),
            Interval::new(0.5, 1.5),
            Interval::new(1.0, 2.0),
        ];
        let beam = Beam::weighted_average(inputs[0], inputs[1], inputs[2], inputs[3]);

        for mask in 0..16u32 {
            let corner: Vec<f64> = inputs
                .iter()
                .enumerate()
                .map(|(i, iv)| {
                    if mask & (1 << i) != 0 {
                        iv.upper()
                    } else {
                        iv.lower()
                    }
                })
                .collect();
            let exact = (corner[0] * corner[1] + corner[2] * corner[3])
                / (corner[0] + corner[2]);
            assert_contains(&beam, &corner, exact);
        }
    }

    #[test]
    fn test_weighted_average_equal_values_is_exact_in_values() {
        // When both values are the same point, the average equals it for
        // every weight assignment.
        let value = Interval::point(7.0);
        let beam = Beam::weighted_average(
            Interval::new(0.5, 2.0),
            value,
            Interval::new(0.5, 2.0),
            value,
        );
        for &(a, b) in &[(0.5, 0.5), (0.5, 2.0), (2.0, 0.5), (2.0, 2.0), (1.0, 1.7)] {
            assert_contains(&beam, &[a, 7.0, b, 7.0], 7.0);
        }
    }

    #[test]
    #[should_panic(expected = "sum to zero")]
    fn test_weighted_average_rejects_vanishing_total_weight() {
        Beam::weighted_average(
            Interval::new(0.0, 1.0),
            Interval::zero(),
            Interval::new(0.0, 1.0),
            Interval::zero(),
        );
    }
}
