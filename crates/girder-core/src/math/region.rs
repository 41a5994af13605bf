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

use crate::math::{interval::Interval, vector::DenseVector};
use rand::Rng;
use smallvec::SmallVec;

/// An axis-aligned hyper-rectangle: one closed interval per dimension,
/// stored as paired lower/upper vectors.
///
/// Regions are the search domain of the branch-and-bound maximizer. A region
/// handed to a bound callback must be treated as read-only for the callback's
/// duration; all splitting operations here produce fresh regions rather than
/// mutating in place, so a queued region can never alias a shrunk one.
///
/// # Invariants
///
/// `lower.len() == upper.len()` and `lower[d] <= upper[d]` for every `d`.
///
/// # Examples
///
/// ```rust
/// # use girder_core::math::region::Region;
/// # use girder_core::math::interval::Interval;
///
/// let region = Region::from_intervals(&[
///     Interval::new(-1.0, 1.0),
///     Interval::new(0.0, 4.0),
/// ]);
/// assert_eq!(region.dimension(), 2);
/// assert_eq!(region.midpoint().as_slice(), &[0.0, 2.0]);
/// ```
#[derive(Clone, PartialEq)]
pub struct Region {
    lower: DenseVector,
    upper: DenseVector,
}

impl Region {
    /// Creates a region from paired bound vectors.
    ///
    /// # Panics
    ///
    /// Panics if the vectors differ in length or any `lower[d] > upper[d]`.
    pub fn new(lower: DenseVector, upper: DenseVector) -> Self {
        assert_eq!(
            lower.len(),
            upper.len(),
            "Region: bound vectors differ in length ({} vs {})",
            lower.len(),
            upper.len()
        );
        for d in 0..lower.len() {
            assert!(
                lower[d] <= upper[d],
                "Region: lower[{}] ({}) exceeds upper[{}] ({})",
                d,
                lower[d],
                d,
                upper[d]
            );
        }
        Self { lower, upper }
    }

    /// Creates a region from a slice of per-dimension intervals.
    pub fn from_intervals(intervals: &[Interval]) -> Self {
        let mut lower = DenseVector::zeros(intervals.len());
        let mut upper = DenseVector::zeros(intervals.len());
        for (d, iv) in intervals.iter().enumerate() {
            lower[d] = iv.lower();
            upper[d] = iv.upper();
        }
        Self { lower, upper }
    }

    /// The degenerate region containing exactly one point.
    pub fn point(point: &DenseVector) -> Self {
        Self {
            lower: point.clone(),
            upper: point.clone(),
        }
    }

    /// Returns the number of dimensions.
    #[inline]
    pub fn dimension(&self) -> usize {
        self.lower.len()
    }

    /// Returns the interval spanned along dimension `d`.
    #[inline]
    pub fn interval(&self, d: usize) -> Interval {
        Interval::new_unchecked(self.lower[d], self.upper[d])
    }

    /// Returns a clone of this region with dimension `d` replaced by `iv`.
    ///
    /// # Panics
    ///
    /// Panics if `iv` is not contained in the current extent of `d`.
    pub fn with_interval(&self, d: usize, iv: Interval) -> Self {
        assert!(
            self.interval(d).contains_interval(iv),
            "Region::with_interval: {} is not contained in dimension {} ({})",
            iv,
            d,
            self.interval(d)
        );
        let mut region = self.clone();
        region.lower[d] = iv.lower();
        region.upper[d] = iv.upper();
        region
    }

    /// Returns the midpoint, using the per-dimension interval midpoint
    /// conventions (well-defined at infinity).
    pub fn midpoint(&self) -> DenseVector {
        let mut mid = DenseVector::zeros(self.dimension());
        for d in 0..self.dimension() {
            mid[d] = self.interval(d).midpoint();
        }
        mid
    }

    /// Returns `true` if the point lies inside the region.
    ///
    /// # Panics
    ///
    /// Panics on dimension mismatch.
    pub fn contains(&self, point: &DenseVector) -> bool {
        assert_eq!(
            point.len(),
            self.dimension(),
            "Region::contains: dimension mismatch ({} vs {})",
            point.len(),
            self.dimension()
        );
        (0..self.dimension()).all(|d| self.interval(d).contains(point[d]))
    }

    /// Returns `true` if the region is a single point.
    #[inline]
    pub fn is_point(&self) -> bool {
        (0..self.dimension()).all(|d| self.lower[d] == self.upper[d])
    }

    /// Draws a uniform sample from the region.
    ///
    /// # Panics
    ///
    /// Panics if any bound is infinite; uniform sampling over an unbounded
    /// box is undefined.
    pub fn sample<R>(&self, rng: &mut R) -> DenseVector
    where
        R: Rng + ?Sized,
    {
        let mut point = DenseVector::zeros(self.dimension());
        for d in 0..self.dimension() {
            let iv = self.interval(d);
            assert!(
                iv.is_finite(),
                "Region::sample requires finite bounds, dimension {} is {}",
                d,
                iv
            );
            point[d] = if iv.is_point() {
                iv.lower()
            } else {
                iv.lower() + rng.random::<f64>() * iv.width()
            };
        }
        point
    }

    /// Returns the natural log of the region's volume.
    ///
    /// Point dimensions contribute `-inf`; unbounded dimensions contribute
    /// `+inf`.
    pub fn log_volume(&self) -> f64 {
        (0..self.dimension())
            .map(|d| self.interval(d).width().ln())
            .sum()
    }

    /// Returns the dimension with the largest width, or `None` for a point
    /// region. Unbounded dimensions win over any finite width.
    pub fn widest_dimension(&self) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for d in 0..self.dimension() {
            let width = self.interval(d).width();
            if width > 0.0 {
                match best {
                    Some((_, w)) if w >= width => {}
                    _ => best = Some((d, width)),
                }
            }
        }
        best.map(|(d, _)| d)
    }

    /// Splits the region into two fresh regions at `x` along dimension `d`.
    ///
    /// Returns `None` if `x` is not strictly inside the dimension's extent
    /// (a no-op split).
    pub fn split_at(&self, d: usize, x: f64) -> Option<(Region, Region)> {
        let iv = self.interval(d);
        if !(iv.lower() < x && x < iv.upper()) {
            return None;
        }
        let left = self.with_interval(d, Interval::new_unchecked(iv.lower(), x));
        let right = self.with_interval(d, Interval::new_unchecked(x, iv.upper()));
        Some((left, right))
    }

    /// Splits the region into up to three children along dimension `d`, with
    /// split points placed so every new boundary lies exactly halfway between
    /// the old midpoint and the new child midpoints. This keeps slope
    /// estimates consistent across successive splits.
    ///
    /// Degenerate splits (point dimension, or split points that clamp onto a
    /// boundary) produce fewer children; a point dimension yields none.
    pub fn split_thirds(&self, d: usize) -> SmallVec<[Region; 3]> {
        let iv = self.interval(d);
        let mut children: SmallVec<[Region; 3]> = SmallVec::new();
        if iv.is_point() {
            return children;
        }
        let mid = iv.midpoint();
        let left_cut = third_point(iv.lower(), mid);
        let right_cut = third_point(iv.upper(), mid);

        let mut cuts: SmallVec<[f64; 2]> = SmallVec::new();
        for cut in [left_cut, right_cut] {
            if iv.lower() < cut && cut < iv.upper() && cuts.last() != Some(&cut) {
                cuts.push(cut);
            }
        }
        cuts.sort_by(f64::total_cmp);

        let mut previous = iv.lower();
        for &cut in &cuts {
            children.push(self.with_interval(d, Interval::new_unchecked(previous, cut)));
            previous = cut;
        }
        children.push(self.with_interval(d, Interval::new_unchecked(previous, iv.upper())));
        children
    }
}

/// Split point one third of the way from `boundary` toward (twice) the
/// midpoint: `(boundary + 2 mid) / 3` when both are finite, falling back to
/// the midpoint convention for an infinite boundary.
#[inline]
fn third_point(boundary: f64, mid: f64) -> f64 {
    if boundary.is_finite() {
        (boundary + 2.0 * mid) / 3.0
    } else {
        Interval::new_unchecked(boundary.min(mid), boundary.max(mid)).midpoint()
    }
}

impl std::fmt::Debug for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Region")
            .field("lower", &self.lower)
            .field("upper", &self.upper)
            .finish()
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for d in 0..self.dimension() {
            if d > 0 {
                write!(f, " x ")?;
            }
            write!(f, "{}", self.interval(d))?;
        }
        Ok(())
    }
}
