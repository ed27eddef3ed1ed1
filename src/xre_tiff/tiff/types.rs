//! TIFF configuration and exchange types

use crate::xre_tiff::calibration::Calibration;
use crate::xre_tiff::grid::RawGrid;

/// First page of a decoded TIFF.
#[derive(Debug, Clone, PartialEq)]
pub struct TiffImage {
    pub grid: RawGrid,
    /// ImageDescription (tag 270), if present and readable as text.
    pub description: Option<String>,
}

/// Everything about the first page except its samples.
#[derive(Debug, Clone, PartialEq)]
pub struct TiffHeader {
    pub width: usize,
    pub height: usize,
    pub description: Option<String>,
}

/// Configuration shared by every read and write
#[derive(Debug, Clone)]
pub struct XreTiffConfig {
    /// Reject zero-sized grids before encoding
    pub validate_dimensions: bool,
    /// Value of the Software tag (305); `None` omits the tag
    pub software: Option<String>,
}

impl Default for XreTiffConfig {
    fn default() -> Self {
        Self {
            validate_dimensions: true,
            software: Some(env!("CARGO_PKG_NAME").to_string()),
        }
    }
}

impl XreTiffConfig {
    pub fn builder() -> XreTiffConfigBuilder {
        XreTiffConfigBuilder::default()
    }
}

/// Builder for XreTiffConfig
#[derive(Default)]
pub struct XreTiffConfigBuilder {
    validate_dimensions: Option<bool>,
    software: Option<Option<String>>,
}

impl XreTiffConfigBuilder {
    pub fn validate_dimensions(mut self, validate: bool) -> Self {
        self.validate_dimensions = Some(validate);
        self
    }

    pub fn software(mut self, software: Option<String>) -> Self {
        self.software = Some(software);
        self
    }

    pub fn build(self) -> XreTiffConfig {
        let default = XreTiffConfig::default();
        XreTiffConfig {
            validate_dimensions: self.validate_dimensions.unwrap_or(default.validate_dimensions),
            software: self.software.unwrap_or(default.software),
        }
    }
}

/// Per-write options.
///
/// With `rescale` set, the grid is treated as physical values and inverted
/// through `slope`/`offset`; otherwise it must already hold valid raw samples.
/// The calibration is written to the description either way.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WriteOptions {
    pub rescale: bool,
    pub slope: f64,
    pub offset: f64,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            rescale: false,
            slope: Calibration::IDENTITY.slope(),
            offset: Calibration::IDENTITY.offset(),
        }
    }
}

impl WriteOptions {
    pub fn builder() -> WriteOptionsBuilder {
        WriteOptionsBuilder::default()
    }

    pub fn calibration(&self) -> Calibration {
        Calibration::new(self.slope, self.offset)
    }
}

/// Builder for WriteOptions
#[derive(Default)]
pub struct WriteOptionsBuilder {
    rescale: Option<bool>,
    slope: Option<f64>,
    offset: Option<f64>,
}

impl WriteOptionsBuilder {
    pub fn rescale(mut self, rescale: bool) -> Self {
        self.rescale = Some(rescale);
        self
    }

    pub fn slope(mut self, slope: f64) -> Self {
        self.slope = Some(slope);
        self
    }

    pub fn offset(mut self, offset: f64) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn calibration(self, calibration: Calibration) -> Self {
        self.slope(calibration.slope()).offset(calibration.offset())
    }

    pub fn build(self) -> WriteOptions {
        let default = WriteOptions::default();
        WriteOptions {
            rescale: self.rescale.unwrap_or(default.rescale),
            slope: self.slope.unwrap_or(default.slope),
            offset: self.offset.unwrap_or(default.offset),
        }
    }
}
