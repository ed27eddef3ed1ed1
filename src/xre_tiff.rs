//! XRE TIFF reading and writing
//!
//! An XRE TIFF is a single-page, 16-bit grayscale TIFF whose ImageDescription
//! tag holds a linear calibration, `slope = 1.000000E-03 offset = 1.000000E+02`.
//! Physical values are `raw * slope + offset`.
//!
//! The free functions below cover the common cases with the default
//! configuration; [`XreTiffIo`] exposes streams, float precision and
//! configuration.

pub mod calibration;
pub mod common;
pub mod convert;
pub mod grid;
pub mod io;
pub mod metadata;
pub mod tiff;


use std::path::Path;

pub use calibration::Calibration;
pub use common::{Result, XreTiffError};
pub use convert::PhysicalSample;
pub use grid::{Grid, PhysicalGrid, RawGrid, SampleGrid};
pub use io::XreTiffIo;
pub use metadata::{Metadata, SampleType};
pub use self::tiff::{
    ReadSeek, StandardTiffReader, StandardTiffWriter, TiffReader, TiffWriter, WriteOptions,
    WriteOptionsBuilder, XreTiffConfig, XreTiffConfigBuilder,
};

/// Reads `path`, returning raw samples or, with `rescale`, physical values.
pub fn read_xre_tif<Q: AsRef<Path>>(path: Q, rescale: bool) -> Result<SampleGrid> {
    XreTiffIo::new(XreTiffConfig::default()).read(path, rescale)
}

/// Writes `grid` to `path` with the given calibration in its description.
///
/// With `rescale`, values are inverted through the calibration, rounded half
/// to even and clamped into [0, 65535]; clamping is silent data loss.
/// Without it, every value must already be an integer in that range.
pub fn write_xre_tif<Q: AsRef<Path>>(
    path: Q,
    grid: &SampleGrid,
    rescale: bool,
    slope: f64,
    offset: f64,
) -> Result<()> {
    let options = WriteOptions::builder()
        .rescale(rescale)
        .slope(slope)
        .offset(offset)
        .build();
    XreTiffIo::new(XreTiffConfig::default()).write(path, grid, &options)
}

pub fn get_metadata<Q: AsRef<Path>>(path: Q) -> Result<Metadata> {
    XreTiffIo::new(XreTiffConfig::default()).get_metadata(path)
}
