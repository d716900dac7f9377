//! `Point`: a small fixed-capacity coordinate vector.
//!
//! Vertices carry a `Point`; PLC elements carry hole points. Coordinates live
//! inline (`[f64; 3]` plus a dimension tag) so a `Point` is `Copy` and never
//! allocates. Geometric algorithms are out of scope for this crate; only the
//! arithmetic needed by consumers and by vertex merging is provided.

use std::fmt;
use std::ops::{Add, Div, Index, IndexMut, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

use crate::mesh_error::MeshError;

/// Highest supported geometric dimension.
pub const MAX_GEOMETRIC_DIMENSION: usize = 3;

/// Coordinate vector with 1, 2 or 3 components.
#[derive(Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    coords: [f64; MAX_GEOMETRIC_DIMENSION],
    dimension: u8,
}

impl Point {
    /// Builds a point from a coordinate slice of length 1..=3.
    pub fn from_slice(coords: &[f64]) -> Result<Self, MeshError> {
        let dimension = coords.len();
        if !(1..=MAX_GEOMETRIC_DIMENSION).contains(&dimension) {
            return Err(MeshError::InvalidGeometricDimension(dimension));
        }
        let mut out = [0.0; MAX_GEOMETRIC_DIMENSION];
        out[..dimension].copy_from_slice(coords);
        Ok(Self {
            coords: out,
            dimension: dimension as u8,
        })
    }

    /// The origin in `dimension` dimensions.
    pub fn zeros(dimension: usize) -> Result<Self, MeshError> {
        if !(1..=MAX_GEOMETRIC_DIMENSION).contains(&dimension) {
            return Err(MeshError::InvalidGeometricDimension(dimension));
        }
        Ok(Self {
            coords: [0.0; MAX_GEOMETRIC_DIMENSION],
            dimension: dimension as u8,
        })
    }

    #[inline]
    pub fn dimension(&self) -> usize {
        self.dimension as usize
    }

    #[inline]
    pub fn coords(&self) -> &[f64] {
        &self.coords[..self.dimension()]
    }

    pub fn dot(&self, other: &Point) -> f64 {
        self.coords()
            .iter()
            .zip(other.coords())
            .map(|(a, b)| a * b)
            .sum()
    }

    pub fn norm(&self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Euclidean distance; components beyond the shorter dimension count as zero.
    pub fn distance(&self, other: &Point) -> f64 {
        (*self - *other).norm()
    }

    fn zip_with(self, rhs: Point, f: impl Fn(f64, f64) -> f64) -> Point {
        let dimension = self.dimension.max(rhs.dimension);
        let mut coords = [0.0; MAX_GEOMETRIC_DIMENSION];
        for (i, c) in coords.iter_mut().enumerate() {
            *c = f(self.coords[i], rhs.coords[i]);
        }
        Point { coords, dimension }
    }

    fn map(self, f: impl Fn(f64) -> f64) -> Point {
        let mut coords = self.coords;
        for c in coords.iter_mut().take(self.dimension()) {
            *c = f(*c);
        }
        Point { coords, ..self }
    }
}

macro_rules! impl_from_array {
    ($($n:literal),*) => {
        $(
            impl From<[f64; $n]> for Point {
                fn from(value: [f64; $n]) -> Self {
                    let mut coords = [0.0; MAX_GEOMETRIC_DIMENSION];
                    coords[..$n].copy_from_slice(&value);
                    Point { coords, dimension: $n }
                }
            }
        )*
    };
}

impl_from_array!(1, 2, 3);

impl Add for Point {
    type Output = Point;
    fn add(self, rhs: Point) -> Point {
        self.zip_with(rhs, |a, b| a + b)
    }
}

impl Sub for Point {
    type Output = Point;
    fn sub(self, rhs: Point) -> Point {
        self.zip_with(rhs, |a, b| a - b)
    }
}

impl Mul<f64> for Point {
    type Output = Point;
    fn mul(self, rhs: f64) -> Point {
        self.map(|c| c * rhs)
    }
}

impl Div<f64> for Point {
    type Output = Point;
    fn div(self, rhs: f64) -> Point {
        self.map(|c| c / rhs)
    }
}

impl Neg for Point {
    type Output = Point;
    fn neg(self) -> Point {
        self.map(|c| -c)
    }
}

impl Index<usize> for Point {
    type Output = f64;
    fn index(&self, index: usize) -> &f64 {
        &self.coords()[index]
    }
}

impl IndexMut<usize> for Point {
    fn index_mut(&mut self, index: usize) -> &mut f64 {
        let dimension = self.dimension();
        &mut self.coords[..dimension][index]
    }
}

impl fmt::Debug for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Point").field(&self.coords()).finish()
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, c) in self.coords().iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{c}")?;
        }
        write!(f, ")")
    }
}
