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

use girder_core::math::{interval::Interval, vector::DenseVector};
use std::ops::{Add, Mul, Neg};

/// An affine enclosure of a function over a region: a slope vector plus an
/// interval offset.
///
/// # Invariant
///
/// For the region the beam was built over, `slope . x + offset` contains the
/// true function value for every `x` in that region. Beams are immutable;
/// composition and arithmetic produce new beams.
///
/// # Examples
///
/// ```rust
/// # use girder_beam::beam::Beam;
/// # use girder_core::math::interval::Interval;
///
/// // Enclose exp over [0, 1], then evaluate the enclosure on the region.
/// let input = Interval::new(0.0, 1.0);
/// let beam = Beam::exp(input);
/// let output = beam.output_interval(&[input]);
/// assert!(output.contains(1.0));            // exp(0)
/// assert!(output.contains(0.5f64.exp()));
/// assert!(output.contains(1.0f64.exp()));
/// ```
#[derive(Clone, PartialEq)]
pub struct Beam {
    slope: DenseVector,
    offset: Interval,
}

impl Beam {
    /// Creates a beam from an explicit slope vector and interval offset.
    ///
    /// # Panics
    ///
    /// Panics if the offset is the NaN sentinel or the slope contains a
    /// non-finite element.
    pub fn affine(slope: DenseVector, offset: Interval) -> Self {
        assert!(
            !offset.is_nan(),
            "Beam::affine: offset must not be the NaN sentinel"
        );
        assert!(
            slope.is_finite(),
            "Beam::affine: slope must be finite, got {}",
            slope
        );
        Self { slope, offset }
    }

    /// A constant beam over the given number of inputs.
    pub fn constant(value: Interval, inputs: usize) -> Self {
        Self::affine(DenseVector::zeros(inputs), value)
    }

    /// The identity beam `f(x) = x` over one input.
    pub fn identity() -> Self {
        Self::affine(DenseVector::from_vec(vec![1.0]), Interval::zero())
    }

    /// A one-input beam with the given scalar slope and offset.
    pub fn linear(slope: f64, offset: Interval) -> Self {
        Self::affine(DenseVector::from_vec(vec![slope]), offset)
    }

    /// Returns the number of inputs.
    #[inline]
    pub fn inputs(&self) -> usize {
        self.slope.len()
    }

    /// Returns the slope vector.
    #[inline]
    pub fn slope(&self) -> &DenseVector {
        &self.slope
    }

    /// Returns the interval offset.
    #[inline]
    pub fn offset(&self) -> Interval {
        self.offset
    }

    /// Evaluates the enclosure over per-input intervals.
    ///
    /// The result contains the true function value for every input point in
    /// the cartesian product of `inputs` (when those cover the region the
    /// beam was built over).
    ///
    /// # Panics
    ///
    /// Panics on input-count mismatch.
    pub fn output_interval(&self, inputs: &[Interval]) -> Interval {
        assert_eq!(
            inputs.len(),
            self.inputs(),
            "Beam::output_interval: expected {} inputs, got {}",
            self.inputs(),
            inputs.len()
        );
        let mut result = self.offset;
        for (i, input) in inputs.iter().enumerate() {
            result = result + *input * self.slope[i];
        }
        result
    }

    /// Evaluates the affine form at a single point.
    pub fn output_at(&self, point: &DenseVector) -> Interval {
        assert_eq!(
            point.len(),
            self.inputs(),
            "Beam::output_at: expected {} inputs, got {}",
            self.inputs(),
            point.len()
        );
        self.offset + self.slope.inner(point)
    }

    /// Composes this beam with one beam per input, all mapping a shared
    /// input space to one of this beam's inputs.
    ///
    /// If this beam encloses `f` over the outputs of `parts[0..k]`, and each
    /// `parts[i]` encloses `g_i` over the shared space, the result encloses
    /// `f(g_0(x), .., g_k(x))` over the shared space: each part's slope is
    /// weighted by this beam's slope and summed, and the weighted part
    /// offsets accumulate into the result offset.
    ///
    /// # Panics
    ///
    /// Panics if `parts` does not match this beam's input count or the parts
    /// disagree on their shared input count.
    pub fn compose(&self, parts: &[Beam]) -> Beam {
        assert_eq!(
            parts.len(),
            self.inputs(),
            "Beam::compose: expected {} parts, got {}",
            self.inputs(),
            parts.len()
        );
        let shared = parts.first().map_or(0, Beam::inputs);
        for part in parts {
            assert_eq!(
                part.inputs(),
                shared,
                "Beam::compose: parts disagree on shared input count ({} vs {})",
                part.inputs(),
                shared
            );
        }

        let mut slope = DenseVector::zeros(shared);
        let mut offset = self.offset;
        for (i, part) in parts.iter().enumerate() {
            let weight = self.slope[i];
            for j in 0..shared {
                slope[j] += weight * part.slope[j];
            }
            offset = offset + part.offset * weight;
        }
        Beam::affine(slope, offset)
    }

    /// Composes only the first input with `inner`, leaving the remaining
    /// inputs untouched. The inner beam's inputs come first in the result,
    /// followed by this beam's inputs `1..`.
    ///
    /// Used for chained pipelines where one stage's enclosure feeds the next
    /// while pass-through inputs remain.
    ///
    /// # Panics
    ///
    /// Panics if this beam has no inputs.
    pub fn compose_partial(&self, inner: &Beam) -> Beam {
        assert!(
            self.inputs() >= 1,
            "Beam::compose_partial requires at least one input"
        );
        let weight = self.slope[0];
        let mut slope = DenseVector::zeros(inner.inputs() + self.inputs() - 1);
        for j in 0..inner.inputs() {
            slope[j] = weight * inner.slope[j];
        }
        for i in 1..self.inputs() {
            slope[inner.inputs() + i - 1] = self.slope[i];
        }
        Beam::affine(slope, self.offset + inner.offset * weight)
    }

    /// Prepends `count` ignored inputs.
    pub fn pad_left(&self, count: usize) -> Beam {
        let mut slope = DenseVector::zeros(count + self.inputs());
        for i in 0..self.inputs() {
            slope[count + i] = self.slope[i];
        }
        Beam::affine(slope, self.offset)
    }

    /// Appends `count` ignored inputs.
    pub fn pad_right(&self, count: usize) -> Beam {
        let mut slope = DenseVector::zeros(self.inputs() + count);
        for i in 0..self.inputs() {
            slope[i] = self.slope[i];
        }
        Beam::affine(slope, self.offset)
    }

    /// Reorders inputs: result input `i` is this beam's input `permutation[i]`.
    ///
    /// # Panics
    ///
    /// Panics if `permutation` is not a permutation of `0..inputs()`.
    pub fn permute(&self, permutation: &[usize]) -> Beam {
        assert_eq!(
            permutation.len(),
            self.inputs(),
            "Beam::permute: expected {} indices, got {}",
            self.inputs(),
            permutation.len()
        );
        let mut seen = vec![false; self.inputs()];
        let mut slope = DenseVector::zeros(self.inputs());
        for (i, &source) in permutation.iter().enumerate() {
            assert!(
                source < self.inputs() && !seen[source],
                "Beam::permute: invalid permutation entry {} at position {}",
                source,
                i
            );
            seen[source] = true;
            slope[i] = self.slope[source];
        }
        Beam::affine(slope, self.offset)
    }

    /// Integrates the enclosure over input dimension `0` spanning `input`,
    /// using the affine form directly: `slope * (U^2 - L^2) / 2 +
    /// offset * (U - L)`. No numerical quadrature is involved.
    ///
    /// Returns a beam over the remaining inputs, whose slopes are scaled by
    /// the input width.
    ///
    /// # Panics
    ///
    /// Panics if the beam has no inputs, the offset is infinite (an infinite
    /// offset integrates to an unbounded result, which means an upstream
    /// enclosure was invalid), or `input` is not finite.
    pub fn integrate(&self, input: Interval) -> Beam {
        assert!(
            self.inputs() >= 1,
            "Beam::integrate requires at least one input"
        );
        assert!(
            self.offset.is_finite(),
            "Beam::integrate: offset {} must be finite",
            self.offset
        );
        assert!(
            input.is_finite(),
            "Beam::integrate: input {} must be finite",
            input
        );
        let width = input.width();
        let half_square_difference =
            (input.upper() * input.upper() - input.lower() * input.lower()) / 2.0;

        let mut slope = DenseVector::zeros(self.inputs() - 1);
        for i in 1..self.inputs() {
            slope[i - 1] = self.slope[i] * width;
        }
        let offset =
            self.offset * width + self.slope[0] * half_square_difference;
        Beam::affine(slope, offset)
    }
}

impl Add for &Beam {
    type Output = Beam;

    /// Sum of two enclosures over the same input space.
    ///
    /// # Panics
    ///
    /// Panics on input-count mismatch.
    fn add(self, rhs: &Beam) -> Beam {
        assert_eq!(
            self.inputs(),
            rhs.inputs(),
            "Beam addition: input counts differ ({} vs {})",
            self.inputs(),
            rhs.inputs()
        );
        let mut slope = DenseVector::zeros(self.inputs());
        slope.set_to_sum(1.0, &self.slope, 1.0, &rhs.slope);
        Beam::affine(slope, self.offset + rhs.offset)
    }
}

impl Mul<f64> for &Beam {
    type Output = Beam;

    fn mul(self, rhs: f64) -> Beam {
        let mut slope = self.slope.clone();
        slope.scale(rhs);
        Beam::affine(slope, self.offset * rhs)
    }
}

impl Neg for &Beam {
    type Output = Beam;

    fn neg(self) -> Beam {
        self * -1.0
    }
}

impl std::fmt::Debug for Beam {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Beam")
            .field("slope", &self.slope)
            .field("offset", &self.offset)
            .finish()
    }
}

impl std::fmt::Display for Beam {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Beam(slope: {}, offset: {})", self.slope, self.offset)
    }
}
