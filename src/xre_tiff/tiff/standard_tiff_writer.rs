use std::io::Write;

use tiff::encoder::{colortype, Compression, TiffEncoder};
use tiff::tags::Tag;
use tracing::debug;

use crate::xre_tiff::common::error::{Result, XreTiffError};
use crate::xre_tiff::grid::RawGrid;
use crate::xre_tiff::tiff::types::XreTiffConfig;
use crate::xre_tiff::tiff::writer::TiffWriter;

/// Writes an uncompressed, single-page Gray16 TIFF in the encoder's native
/// byte order, which is little-endian (`II`) on the hosts we target.
pub struct StandardTiffWriter;

fn encode_error(e: tiff::TiffError) -> XreTiffError {
    XreTiffError::EncodeError(e.to_string())
}

impl TiffWriter for StandardTiffWriter {
    fn write_tiff(
        &self,
        grid: &RawGrid,
        description: &str,
        output: &mut dyn Write,
        config: &XreTiffConfig,
    ) -> Result<()> {
        debug!("Encoding TIFF image: {}x{}", grid.width(), grid.height());

        let invalid = || XreTiffError::InvalidDimensions {
            width: grid.width(),
            height: grid.height(),
            samples: grid.samples().len(),
        };
        let width = u32::try_from(grid.width()).map_err(|_| invalid())?;
        let height = u32::try_from(grid.height()).map_err(|_| invalid())?;

        let mut buffer = Vec::new();
        {
            let mut encoder = TiffEncoder::new(std::io::Cursor::new(&mut buffer))
                .map_err(encode_error)?
                .with_compression(Compression::Uncompressed);

            let mut image = encoder
                .new_image::<colortype::Gray16>(width, height)
                .map_err(encode_error)?;
            image
                .encoder()
                .write_tag(Tag::ImageDescription, description)
                .map_err(encode_error)?;
            if let Some(software) = &config.software {
                image
                    .encoder()
                    .write_tag(Tag::Software, software.as_str())
                    .map_err(encode_error)?;
            }
            image.write_data(grid.samples()).map_err(encode_error)?;
        }

        output.write_all(&buffer)?;

        debug!("TIFF encoding complete, {} bytes", buffer.len());
        Ok(())
    }
}
