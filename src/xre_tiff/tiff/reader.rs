use std::io::{Read, Seek};

use crate::xre_tiff::common::error::Result;
use crate::xre_tiff::tiff::types::{TiffHeader, TiffImage};

/// Object-safe `Read + Seek`, so readers can take any seekable source.
pub trait ReadSeek: Read + Seek {}

impl<T: Read + Seek> ReadSeek for T {}

pub trait TiffReader {
    /// Decodes the first page: samples, dimensions and description.
    fn read_tiff(&self, input: &mut dyn ReadSeek) -> Result<TiffImage>;

    /// Reads dimensions and description without decoding samples.
    fn read_header(&self, input: &mut dyn ReadSeek) -> Result<TiffHeader>;
}
