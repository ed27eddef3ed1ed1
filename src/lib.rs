pub mod logger;
pub mod xre_tiff;

pub use xre_tiff::{
    Calibration, Grid, Metadata, PhysicalGrid, RawGrid, SampleGrid, SampleType, WriteOptions,
    XreTiffConfig, XreTiffError, XreTiffIo, get_metadata, read_xre_tif, write_xre_tif,
};
