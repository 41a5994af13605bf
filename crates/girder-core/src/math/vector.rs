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

use std::ops::{Index, IndexMut};

/// A dense `f64` vector with the small linear-algebra surface the enclosure
/// machinery needs: indexed access, inner products, scaling, and
/// linear-combination setters.
///
/// Dimension mismatches are programming errors and panic immediately.
///
/// # Examples
///
/// ```rust
/// # use girder_core::math::vector::DenseVector;
///
/// let x = DenseVector::from_vec(vec![1.0, 2.0]);
/// let y = DenseVector::from_vec(vec![3.0, -1.0]);
/// assert_eq!(x.inner(&y), 1.0);
///
/// let mut z = DenseVector::zeros(2);
/// z.set_to_sum(2.0, &x, 1.0, &y);
/// assert_eq!(z, DenseVector::from_vec(vec![5.0, 3.0]));
/// ```
#[derive(Clone, PartialEq)]
pub struct DenseVector {
    elements: Vec<f64>,
}

impl DenseVector {
    /// Creates a zero vector of the given length.
    #[inline]
    pub fn zeros(len: usize) -> Self {
        Self {
            elements: vec![0.0; len],
        }
    }

    /// Wraps an existing `Vec<f64>`.
    #[inline]
    pub fn from_vec(elements: Vec<f64>) -> Self {
        Self { elements }
    }

    /// Copies a slice into a new vector.
    #[inline]
    pub fn from_slice(elements: &[f64]) -> Self {
        Self {
            elements: elements.to_vec(),
        }
    }

    /// Returns the number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` if the vector has no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Returns the elements as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.elements
    }

    /// Iterates over the elements.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, f64> {
        self.elements.iter()
    }

    /// Computes the inner product with another vector.
    ///
    /// # Panics
    ///
    /// Panics on dimension mismatch.
    #[inline]
    pub fn inner(&self, other: &Self) -> f64 {
        assert_eq!(
            self.len(),
            other.len(),
            "DenseVector::inner: dimension mismatch ({} vs {})",
            self.len(),
            other.len()
        );
        self.elements
            .iter()
            .zip(other.elements.iter())
            .map(|(a, b)| a * b)
            .sum()
    }

    /// Scales every element in place.
    #[inline]
    pub fn scale(&mut self, factor: f64) {
        for e in &mut self.elements {
            *e *= factor;
        }
    }

    /// Sets `self = a * x + b * y`.
    ///
    /// # Panics
    ///
    /// Panics on dimension mismatch.
    pub fn set_to_sum(&mut self, a: f64, x: &Self, b: f64, y: &Self) {
        assert!(
            self.len() == x.len() && self.len() == y.len(),
            "DenseVector::set_to_sum: dimension mismatch ({}, {}, {})",
            self.len(),
            x.len(),
            y.len()
        );
        for i in 0..self.elements.len() {
            self.elements[i] = a * x.elements[i] + b * y.elements[i];
        }
    }

    /// Sets `self = x .* y` (elementwise product).
    ///
    /// # Panics
    ///
    /// Panics on dimension mismatch.
    pub fn set_to_product(&mut self, x: &Self, y: &Self) {
        assert!(
            self.len() == x.len() && self.len() == y.len(),
            "DenseVector::set_to_product: dimension mismatch ({}, {}, {})",
            self.len(),
            x.len(),
            y.len()
        );
        for i in 0..self.elements.len() {
            self.elements[i] = x.elements[i] * y.elements[i];
        }
    }

    /// Returns `true` if every element is finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.elements.iter().all(|e| e.is_finite())
    }
}

impl Index<usize> for DenseVector {
    type Output = f64;

    #[inline]
    fn index(&self, index: usize) -> &f64 {
        &self.elements[index]
    }
}

impl IndexMut<usize> for DenseVector {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut f64 {
        &mut self.elements[index]
    }
}

impl std::fmt::Debug for DenseVector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DenseVector")
            .field("elements", &self.elements)
            .finish()
    }
}

impl std::fmt::Display for DenseVector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(")?;
        for (i, e) in self.elements.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", e)?;
        }
        write!(f, ")")
    }
}

impl From<Vec<f64>> for DenseVector {
    #[inline]
    fn from(elements: Vec<f64>) -> Self {
        Self::from_vec(elements)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_construction() {
        let v = DenseVector::zeros(3);
        assert_eq!(v.len(), 3);
        assert!(!v.is_empty());
        assert_eq!(v[0], 0.0);

        let w = DenseVector::from_slice(&[1.0, 2.0]);
        assert_eq!(w.as_slice(), &[1.0, 2.0]);
    }

    #[test]
    fn test_inner_product() {
        let x = DenseVector::from_vec(vec![1.0, 2.0, 3.0]);
        let y = DenseVector::from_vec(vec![4.0, -5.0, 6.0]);
        assert_eq!(x.inner(&y), 4.0 - 10.0 + 18.0);
    }

    #[test]
    #[should_panic(expected = "dimension mismatch")]
    fn test_inner_product_dimension_mismatch() {
        let x = DenseVector::zeros(2);
        let y = DenseVector::zeros(3);
        x.inner(&y);
    }

    #[test]
    fn test_scale() {
        let mut v = DenseVector::from_vec(vec![1.0, -2.0]);
        v.scale(3.0);
        assert_eq!(v, DenseVector::from_vec(vec![3.0, -6.0]));
    }

    #[test]
    fn test_set_to_sum() {
        let x = DenseVector::from_vec(vec![1.0, 0.0]);
        let y = DenseVector::from_vec(vec![0.0, 1.0]);
        let mut z = DenseVector::zeros(2);
        z.set_to_sum(3.0, &x, -2.0, &y);
        assert_eq!(z, DenseVector::from_vec(vec![3.0, -2.0]));
    }

    #[test]
    fn test_set_to_product() {
        let x = DenseVector::from_vec(vec![2.0, 3.0]);
        let y = DenseVector::from_vec(vec![4.0, -1.0]);
        let mut z = DenseVector::zeros(2);
        z.set_to_product(&x, &y);
        assert_eq!(z, DenseVector::from_vec(vec![8.0, -3.0]));
    }

    #[test]
    fn test_index_mut() {
        let mut v = DenseVector::zeros(2);
        v[1] = 5.0;
        assert_eq!(v[1], 5.0);
    }

    #[test]
    fn test_is_finite() {
        assert!(DenseVector::from_vec(vec![1.0, 2.0]).is_finite());
        assert!(!DenseVector::from_vec(vec![1.0, f64::INFINITY]).is_finite());
    }

    #[test]
    fn test_display() {
        let v = DenseVector::from_vec(vec![1.0, 2.5]);
        assert_eq!(format!("{}", v), "(1, 2.5)");
    }
}
