use thiserror::Error;

#[derive(Error, Debug)]
pub enum XreTiffError {
    #[error("Failed to read input file: {0}")]
    InputReadError(String),

    #[error("Failed to write output file: {0}")]
    OutputWriteError(String),

    #[error("Failed to decode TIFF image: {0}")]
    DecodeError(String),

    #[error("Failed to encode TIFF image: {0}")]
    EncodeError(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid image dimensions: width={width}, height={height}, samples={samples}")]
    InvalidDimensions {
        width: usize,
        height: usize,
        samples: usize,
    },

    /// Inverting a calibration requires dividing by its slope.
    #[error("Conversion error: division by zero, slope must be non-zero to rescale")]
    ZeroSlope,

    #[error("Calibration is not finite: slope={slope}, offset={offset}")]
    NonFiniteCalibration { slope: f64, offset: f64 },

    /// A physical grid was written without rescaling and one of its values
    /// cannot be stored as a raw sample.
    #[error("Invalid raw sample at index {index}: {value} is {reason}")]
    InvalidRawSample {
        index: usize,
        value: f64,
        reason: &'static str,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, XreTiffError>;
