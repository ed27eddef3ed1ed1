//! TIFF reader backed by the `tiff` crate decoder.

use std::io::{Read, Seek};

use tiff::ColorType;
use tiff::decoder::{Decoder, DecodingResult};
use tiff::tags::Tag;
use tracing::{debug, warn};

use crate::xre_tiff::common::error::{Result, XreTiffError};
use crate::xre_tiff::grid::Grid;
use crate::xre_tiff::tiff::reader::{ReadSeek, TiffReader};
use crate::xre_tiff::tiff::types::{TiffHeader, TiffImage};

/// Reads the first page of a grayscale 16-bit TIFF. Either byte order is
/// accepted.
pub struct StandardTiffReader;

const SAMPLE_FORMAT_UINT: u16 = 1;

fn decode_error(e: tiff::TiffError) -> XreTiffError {
    XreTiffError::DecodeError(e.to_string())
}

fn open_decoder(input: &mut dyn ReadSeek) -> Result<Decoder<&mut dyn ReadSeek>> {
    Decoder::new(input).map_err(decode_error)
}

fn read_page_header<R: Read + Seek>(decoder: &mut Decoder<R>) -> Result<TiffHeader> {
    let (width, height) = decoder.dimensions().map_err(decode_error)?;
    match decoder.colortype().map_err(decode_error)? {
        ColorType::Gray(16) => {}
        other => {
            return Err(XreTiffError::UnsupportedFormat(format!(
                "expected 16-bit grayscale, found {other:?}"
            )));
        }
    }
    ensure_unsigned_samples(decoder)?;

    let description = read_description(decoder);
    debug!(width, height, has_description = description.is_some(), "Read TIFF header");

    Ok(TiffHeader {
        width: width as usize,
        height: height as usize,
        description,
    })
}

/// SampleFormat 1 is unsigned integer; an absent tag means the same.
fn ensure_unsigned_samples<R: Read + Seek>(decoder: &mut Decoder<R>) -> Result<()> {
    let formats = match decoder.find_tag(Tag::SampleFormat).map_err(decode_error)? {
        Some(value) => value.into_u16_vec().map_err(decode_error)?,
        None => return Ok(()),
    };
    if let Some(&format) = formats.iter().find(|&&format| format != SAMPLE_FORMAT_UINT) {
        return Err(XreTiffError::UnsupportedFormat(format!(
            "expected unsigned integer samples, found sample format {format}"
        )));
    }
    Ok(())
}

/// Missing or non-text descriptions are not errors; callers fall back to the
/// identity calibration.
fn read_description<R: Read + Seek>(decoder: &mut Decoder<R>) -> Option<String> {
    match decoder.find_tag(Tag::ImageDescription) {
        Ok(Some(value)) => match value.into_string() {
            Ok(text) => Some(text),
            Err(e) => {
                warn!("Ignoring unreadable image description: {}", e);
                None
            }
        },
        Ok(None) => None,
        Err(e) => {
            warn!("Ignoring unreadable image description: {}", e);
            None
        }
    }
}

impl TiffReader for StandardTiffReader {
    fn read_tiff(&self, input: &mut dyn ReadSeek) -> Result<TiffImage> {
        let mut decoder = open_decoder(input)?;
        let header = read_page_header(&mut decoder)?;

        let samples = match decoder.read_image().map_err(decode_error)? {
            DecodingResult::U16(values) => values,
            _ => {
                return Err(XreTiffError::UnsupportedFormat(
                    "expected unsigned 16-bit integer samples".to_string(),
                ));
            }
        };
        debug!("Decoded {} samples", samples.len());

        if decoder.more_images() {
            warn!("TIFF has more than one page, only the first is read");
        }

        let grid = Grid::new(header.width, header.height, samples)?;
        Ok(TiffImage {
            grid,
            description: header.description,
        })
    }

    fn read_header(&self, input: &mut dyn ReadSeek) -> Result<TiffHeader> {
        let mut decoder = open_decoder(input)?;
        read_page_header(&mut decoder)
    }
}
