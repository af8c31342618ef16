//! Pairwise road-distance tables.
//!
//! A [`DistanceMatrix`] is created empty for each optimisation request,
//! filled by [`DistanceMatrixBuilder`] and discarded once the route is chosen.
//! Nothing is cached across requests.

mod builder;
mod error;

pub use builder::{DistanceMatrixBuilder, build_matrix};
pub use error::MatrixError;

use crate::{Distance, PointId};

/// Symmetric `n x n` table of road distances indexed by [`PointId`].
///
/// The diagonal is always zero. Off-diagonal cells are `None` until they have
/// been populated.
///
/// # Examples
/// ```
/// use errand_core::{Distance, DistanceMatrix, PointId};
///
/// let mut matrix = DistanceMatrix::new(2);
/// assert!(!matrix.is_complete());
///
/// let (a, b) = (PointId::new(0), PointId::new(1));
/// matrix.insert(a, b, Distance::from_kilometres(3.0)?);
///
/// assert!(matrix.is_complete());
/// assert_eq!(matrix.get(b, a), matrix.get(a, b));
/// assert_eq!(matrix.get(a, a), Some(Distance::ZERO));
/// # Ok::<(), errand_core::InvalidDistance>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    size: usize,
    cells: Vec<Option<Distance>>,
}

impl DistanceMatrix {
    /// Create an empty matrix for `size` points.
    #[must_use]
    pub fn new(size: usize) -> Self {
        let mut cells = vec![None; size.saturating_mul(size)];
        for index in 0..size {
            if let Some(cell) = cells.get_mut(index * size + index) {
                *cell = Some(Distance::ZERO);
            }
        }
        Self { size, cells }
    }

    /// Build a matrix from kilometre rows, reading only the upper triangle.
    ///
    /// Returns `None` when the rows are not square or hold an invalid
    /// distance.
    #[must_use]
    pub fn from_upper_triangle(rows: &[Vec<f64>]) -> Option<Self> {
        let size = rows.len();
        if rows.iter().any(|row| row.len() != size) {
            return None;
        }
        let mut matrix = Self::new(size);
        for (i, row) in rows.iter().enumerate() {
            for (j, &kilometres) in row.iter().enumerate().skip(i + 1) {
                let distance = Distance::from_kilometres(kilometres).ok()?;
                matrix.insert(PointId::new(i), PointId::new(j), distance);
            }
        }
        Some(matrix)
    }

    /// Number of points the matrix covers.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Distance between two points, or `None` when not yet populated or out
    /// of range.
    #[must_use]
    pub fn get(&self, from: PointId, to: PointId) -> Option<Distance> {
        self.offset(from, to)
            .and_then(|offset| self.cells.get(offset).copied().flatten())
    }

    /// Store `distance` for the pair in both directions.
    ///
    /// Diagonal and out-of-range pairs are ignored.
    pub fn insert(&mut self, from: PointId, to: PointId, distance: Distance) {
        if from == to {
            return;
        }
        for (row, column) in [(from, to), (to, from)] {
            if let Some(cell) = self
                .offset(row, column)
                .and_then(|offset| self.cells.get_mut(offset))
            {
                *cell = Some(distance);
            }
        }
    }

    /// Whether every cell has been populated.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Whether `matrix[i][j] == matrix[j][i]` for every pair.
    #[must_use]
    pub fn is_symmetric(&self) -> bool {
        (0..self.size).all(|i| {
            ((i + 1)..self.size).all(|j| {
                let (a, b) = (PointId::new(i), PointId::new(j));
                self.get(a, b) == self.get(b, a)
            })
        })
    }

    fn offset(&self, from: PointId, to: PointId) -> Option<usize> {
        (from.index() < self.size && to.index() < self.size)
            .then(|| from.index() * self.size + to.index())
    }
}
