use std::fmt;

use crate::xre_tiff::calibration::Calibration;

/// On-disk sample type. XRE TIFF only stores unsigned 16-bit samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleType {
    U16,
}

impl fmt::Display for SampleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SampleType::U16 => f.write_str("uint16"),
        }
    }
}

/// Result of inspecting a file without decoding its samples.
#[derive(Debug, Clone, PartialEq)]
pub struct Metadata {
    pub slope: f64,
    pub offset: f64,
    pub width: usize,
    pub height: usize,
    pub dtype: SampleType,
}

impl Metadata {
    pub fn calibration(&self) -> Calibration {
        Calibration::new(self.slope, self.offset)
    }
}
