use smallvec::SmallVec;

use super::Coordinate;

/// An axis-aligned box with inclusive bounds. A point is a box whose
/// corners coincide.
#[derive(Clone, Debug, PartialEq)]
pub(super) struct Rect<C> {
    pub(super) min: SmallVec<[C; 4]>,
    pub(super) max: SmallVec<[C; 4]>,
}

impl<C: Coordinate> Rect<C> {
    pub(super) fn new(min: &[C], max: &[C]) -> Self {
        Self {
            min: SmallVec::from_slice(min),
            max: SmallVec::from_slice(max),
        }
    }

    pub(super) fn point(at: &[C]) -> Self {
        Self::new(at, at)
    }

    pub(super) fn expand(&mut self, other: &Self) {
        for (a, b) in self.min.iter_mut().zip(&other.min) {
            if *b < *a {
                *a = *b;
            }
        }
        for (a, b) in self.max.iter_mut().zip(&other.max) {
            if *b > *a {
                *a = *b;
            }
        }
    }

    pub(super) fn union(&self, other: &Self) -> Self {
        let mut out = self.clone();
        out.expand(other);
        out
    }

    pub(super) fn intersects(&self, other: &Self) -> bool {
        (0..self.min.len()).all(|d| self.min[d] <= other.max[d] && other.min[d] <= self.max[d])
    }

    pub(super) fn contains(&self, other: &Self) -> bool {
        (0..self.min.len()).all(|d| self.min[d] <= other.min[d] && other.max[d] <= self.max[d])
    }

    pub(super) fn area(&self) -> f64 {
        self.min
            .iter()
            .zip(&self.max)
            .map(|(lo, hi)| hi.to_f64() - lo.to_f64())
            .product()
    }

    /// Area growth needed to also cover `other`.
    pub(super) fn enlargement(&self, other: &Self) -> f64 {
        self.union(other).area() - self.area()
    }

    /// Squared Euclidean distance from `point` to the nearest point of the
    /// box; zero inside.
    pub(super) fn distance_sq(&self, point: &[f64]) -> f64 {
        point
            .iter()
            .enumerate()
            .map(|(d, &p)| {
                let lo = self.min[d].to_f64();
                let hi = self.max[d].to_f64();
                let gap = if p < lo {
                    lo - p
                } else if p > hi {
                    p - hi
                } else {
                    0.0
                };
                gap * gap
            })
            .sum()
    }
}
