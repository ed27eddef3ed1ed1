use std::io::Write;

use crate::xre_tiff::common::error::Result;
use crate::xre_tiff::grid::RawGrid;
use crate::xre_tiff::tiff::types::XreTiffConfig;

pub trait TiffWriter {
    fn write_tiff(
        &self,
        grid: &RawGrid,
        description: &str,
        output: &mut dyn Write,
        config: &XreTiffConfig,
    ) -> Result<()>;
}
