use std::borrow::Cow;
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;

use tracing::{info, instrument};

use crate::xre_tiff::{
    calibration::Calibration,
    common::error::{Result, XreTiffError},
    convert::PhysicalSample,
    grid::{Grid, RawGrid, SampleGrid},
    metadata::{Metadata, SampleType},
    tiff::{ReadSeek, StandardTiffReader, StandardTiffWriter, TiffReader, TiffWriter, WriteOptions, XreTiffConfig},
};

/// Read, write and inspect XRE TIFF files.
///
/// Every call is independent: the file handle is opened and released inside
/// the call, and no state is kept between calls.
pub struct XreTiffIo<R: TiffReader, W: TiffWriter> {
    reader: R,
    writer: W,
    config: XreTiffConfig,
}

impl XreTiffIo<StandardTiffReader, StandardTiffWriter> {
    pub fn new(config: XreTiffConfig) -> Self {
        Self {
            reader: StandardTiffReader,
            writer: StandardTiffWriter,
            config,
        }
    }
}

impl Default for XreTiffIo<StandardTiffReader, StandardTiffWriter> {
    fn default() -> Self {
        Self::new(XreTiffConfig::default())
    }
}

fn open_input(path: &Path) -> Result<BufReader<File>> {
    let _span = tracing::info_span!("open_input_file").entered();
    File::open(path)
        .map(BufReader::new)
        .map_err(|e| XreTiffError::InputReadError(format!("{}: {}", path.display(), e)))
}

impl<R: TiffReader, W: TiffWriter> XreTiffIo<R, W> {
    pub fn with_custom(reader: R, writer: W, config: XreTiffConfig) -> Self {
        Self {
            reader,
            writer,
            config,
        }
    }

    fn validate_dimensions(&self, width: usize, height: usize) -> Result<()> {
        if !self.config.validate_dimensions {
            return Ok(());
        }

        if width == 0 || height == 0 {
            return Err(XreTiffError::InvalidDimensions {
                width,
                height,
                samples: width * height,
            });
        }

        Ok(())
    }

    /// Reads raw samples and the stored calibration.
    fn read_calibrated(&self, input: &mut dyn ReadSeek) -> Result<(RawGrid, Calibration)> {
        let image = {
            let _span = tracing::info_span!("decode_tiff").entered();
            self.reader.read_tiff(input)?
        };
        let calibration = Calibration::from_description(image.description.as_deref());
        Ok((image.grid, calibration))
    }

    /// Reads a grid from any seekable source. With `rescale`, samples are
    /// converted to physical values through the stored calibration.
    #[instrument(skip(self, input))]
    pub fn read_from(&self, input: &mut dyn ReadSeek, rescale: bool) -> Result<SampleGrid> {
        let (raw, calibration) = self.read_calibrated(input)?;

        let grid = if rescale {
            let _span = tracing::info_span!("rescale",
                slope = calibration.slope(),
                offset = calibration.offset()
            ).entered();
            SampleGrid::Physical(raw.to_physical(&calibration))
        } else {
            SampleGrid::Raw(raw)
        };

        info!(
            width = grid.width(),
            height = grid.height(),
            rescale,
            "Read complete"
        );
        Ok(grid)
    }

    /// Reads and rescales into the requested float precision.
    pub fn read_physical_from<T: PhysicalSample>(&self, input: &mut dyn ReadSeek) -> Result<Grid<T>> {
        let (raw, calibration) = self.read_calibrated(input)?;
        Ok(raw.to_physical(&calibration))
    }

    #[instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub fn read<Q: AsRef<Path>>(&self, path: Q, rescale: bool) -> Result<SampleGrid> {
        let mut input = open_input(path.as_ref())?;
        self.read_from(&mut input, rescale)
    }

    pub fn read_physical<T: PhysicalSample, Q: AsRef<Path>>(&self, path: Q) -> Result<Grid<T>> {
        let mut input = open_input(path.as_ref())?;
        self.read_physical_from(&mut input)
    }

    /// Produces the samples to store, applying the inverse calibration or
    /// validating that the grid is already raw.
    fn prepare_raw<'a>(&self, grid: &'a SampleGrid, options: &WriteOptions) -> Result<Cow<'a, RawGrid>> {
        let calibration = options.calibration();
        calibration.ensure_finite()?;

        let raw = match (options.rescale, grid) {
            (true, SampleGrid::Physical(physical)) => Cow::Owned(physical.to_raw(&calibration)?),
            (true, SampleGrid::Raw(raw)) => Cow::Owned(raw.to_raw(&calibration)?),
            (false, SampleGrid::Physical(physical)) => Cow::Owned(physical.to_raw_exact()?),
            (false, SampleGrid::Raw(raw)) => Cow::Borrowed(raw),
        };

        self.validate_dimensions(raw.width(), raw.height())?;
        Ok(raw)
    }

    /// Encodes a grid into any writer. Nothing is written when conversion or
    /// validation fails.
    #[instrument(skip(self, grid, output), fields(width = grid.width(), height = grid.height()))]
    pub fn write_to(&self, grid: &SampleGrid, options: &WriteOptions, output: &mut dyn Write) -> Result<()> {
        let raw = {
            let _span = tracing::info_span!("prepare_samples", rescale = options.rescale).entered();
            self.prepare_raw(grid, options)?
        };
        let description = options.calibration().to_description();

        {
            let _span = tracing::info_span!("encode_tiff").entered();
            self.writer.write_tiff(&raw, &description, output, &self.config)?;
        }

        info!(%description, "Write complete");
        Ok(())
    }

    /// Writes a grid to `path`, creating or truncating it. The file is only
    /// created once the image has been fully encoded, so a failed write
    /// leaves no file behind.
    #[instrument(skip(self, path, grid), fields(path = %path.as_ref().display()))]
    pub fn write<Q: AsRef<Path>>(&self, path: Q, grid: &SampleGrid, options: &WriteOptions) -> Result<()> {
        let path = path.as_ref();

        let mut encoded = Vec::new();
        self.write_to(grid, options, &mut encoded)?;

        let _span = tracing::info_span!("write_output_file", bytes = encoded.len()).entered();
        let mut output = File::create(path)
            .map_err(|e| XreTiffError::OutputWriteError(format!("{}: {}", path.display(), e)))?;
        output
            .write_all(&encoded)
            .and_then(|_| output.flush())
            .map_err(|e| XreTiffError::OutputWriteError(format!("{}: {}", path.display(), e)))?;

        Ok(())
    }

    /// Dimensions and calibration without decoding samples.
    pub fn metadata_from(&self, input: &mut dyn ReadSeek) -> Result<Metadata> {
        let header = {
            let _span = tracing::info_span!("read_header").entered();
            self.reader.read_header(input)?
        };
        let calibration = Calibration::from_description(header.description.as_deref());

        Ok(Metadata {
            slope: calibration.slope(),
            offset: calibration.offset(),
            width: header.width,
            height: header.height,
            dtype: SampleType::U16,
        })
    }

    #[instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub fn get_metadata<Q: AsRef<Path>>(&self, path: Q) -> Result<Metadata> {
        let mut input = open_input(path.as_ref())?;
        self.metadata_from(&mut input)
    }

    pub fn config(&self) -> &XreTiffConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: XreTiffConfig) {
        self.config = config;
    }
}
