//! Sample grid types

use tracing::warn;

use crate::xre_tiff::calibration::Calibration;
use crate::xre_tiff::common::error::{Result, XreTiffError};
use crate::xre_tiff::convert::{self, PhysicalSample};

/// Row-major 2-D image with `width * height` samples.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid<T> {
    width: usize,
    height: usize,
    data: Vec<T>,
}

/// Samples as stored on disk.
pub type RawGrid = Grid<u16>;

/// Calibrated samples.
pub type PhysicalGrid<P = f64> = Grid<P>;

impl<T> Grid<T> {
    pub fn new(width: usize, height: usize, data: Vec<T>) -> Result<Self> {
        if width.checked_mul(height) != Some(data.len()) {
            return Err(XreTiffError::InvalidDimensions {
                width,
                height,
                samples: data.len(),
            });
        }
        Ok(Self { width, height, data })
    }

    /// Builds a grid from equally long rows.
    pub fn from_rows<R: AsRef<[T]>>(rows: &[R]) -> Result<Self>
    where
        T: Clone,
    {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.as_ref().len());
        if let Some(ragged) = rows.iter().find(|row| row.as_ref().len() != width) {
            return Err(XreTiffError::InvalidDimensions {
                width,
                height,
                samples: ragged.as_ref().len(),
            });
        }
        let data: Vec<T> = rows.iter().flat_map(|row| row.as_ref().iter().cloned()).collect();
        Self::new(width, height, data)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn samples(&self) -> &[T] {
        &self.data
    }

    pub fn into_samples(self) -> Vec<T> {
        self.data
    }

    pub fn get(&self, x: usize, y: usize) -> Option<&T> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get(y * self.width + x)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        // chunks_exact panics on 0
        self.data.chunks_exact(self.width.max(1))
    }

    fn with_samples<U>(&self, data: Vec<U>) -> Grid<U> {
        Grid {
            width: self.width,
            height: self.height,
            data,
        }
    }
}

impl RawGrid {
    /// Applies the calibration to every sample.
    pub fn to_physical<P: PhysicalSample>(&self, calibration: &Calibration) -> Grid<P> {
        self.with_samples(convert::to_physical(&self.data, calibration))
    }
}

impl<T: Copy + Into<f64>> Grid<T> {
    /// Inverts the calibration, saturating samples outside the u16 range.
    pub fn to_raw(&self, calibration: &Calibration) -> Result<RawGrid> {
        let converted = convert::to_raw(&self.data, calibration)?;
        if converted.clamped > 0 {
            warn!(
                clamped = converted.clamped,
                total = self.data.len(),
                "Physical values outside the raw range were clamped"
            );
        }
        Ok(self.with_samples(converted.samples))
    }

    /// Reinterprets values as raw samples, failing on any non-integer or
    /// out-of-range value.
    pub fn to_raw_exact(&self) -> Result<RawGrid> {
        Ok(self.with_samples(convert::to_raw_exact(&self.data)?))
    }
}

/// A grid in either representation.
#[derive(Debug, Clone, PartialEq)]
pub enum SampleGrid {
    Raw(RawGrid),
    Physical(PhysicalGrid),
}

impl SampleGrid {
    pub fn width(&self) -> usize {
        match self {
            SampleGrid::Raw(grid) => grid.width(),
            SampleGrid::Physical(grid) => grid.width(),
        }
    }

    pub fn height(&self) -> usize {
        match self {
            SampleGrid::Raw(grid) => grid.height(),
            SampleGrid::Physical(grid) => grid.height(),
        }
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.width(), self.height())
    }

    pub fn len(&self) -> usize {
        match self {
            SampleGrid::Raw(grid) => grid.samples().len(),
            SampleGrid::Physical(grid) => grid.samples().len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_physical(&self) -> bool {
        matches!(self, SampleGrid::Physical(_))
    }

    pub fn as_raw(&self) -> Option<&RawGrid> {
        match self {
            SampleGrid::Raw(grid) => Some(grid),
            SampleGrid::Physical(_) => None,
        }
    }

    pub fn as_physical(&self) -> Option<&PhysicalGrid> {
        match self {
            SampleGrid::Raw(_) => None,
            SampleGrid::Physical(grid) => Some(grid),
        }
    }

    pub fn into_raw(self) -> Option<RawGrid> {
        match self {
            SampleGrid::Raw(grid) => Some(grid),
            SampleGrid::Physical(_) => None,
        }
    }

    pub fn into_physical(self) -> Option<PhysicalGrid> {
        match self {
            SampleGrid::Raw(_) => None,
            SampleGrid::Physical(grid) => Some(grid),
        }
    }
}

impl From<RawGrid> for SampleGrid {
    fn from(grid: RawGrid) -> Self {
        SampleGrid::Raw(grid)
    }
}

impl From<PhysicalGrid> for SampleGrid {
    fn from(grid: PhysicalGrid) -> Self {
        SampleGrid::Physical(grid)
    }
}

impl From<Grid<f32>> for SampleGrid {
    fn from(grid: Grid<f32>) -> Self {
        let data = grid.data.iter().map(|&v| f64::from(v)).collect();
        SampleGrid::Physical(grid.with_samples(data))
    }
}
