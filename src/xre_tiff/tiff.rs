//! TIFF collaborator module
//!
//! Single-page, single-channel, 16-bit unsigned TIFF reading and writing on
//! top of the `tiff` crate, with the ImageDescription tag carried alongside
//! the samples.

mod reader;
mod writer;
mod standard_tiff_reader;
mod standard_tiff_writer;
pub mod types;

pub use reader::{ReadSeek, TiffReader};
pub use writer::TiffWriter;
pub use standard_tiff_reader::StandardTiffReader;
pub use standard_tiff_writer::StandardTiffWriter;
pub use types::{
    TiffHeader, TiffImage, WriteOptions, WriteOptionsBuilder, XreTiffConfig,
    XreTiffConfigBuilder,
};
