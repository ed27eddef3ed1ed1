//! Calibration codec
//!
//! An XRE TIFF stores the affine map between raw samples and physical values
//! in its ImageDescription tag, as text of the form
//! `slope = 1.000000E-03 offset = 1.000000E+02`.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, warn};

use crate::xre_tiff::common::error::{Result, XreTiffError};

/// Signed decimal or scientific number, any digit count.
const NUMBER: &str = r"[-+]?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][-+]?\d+)?";

static SLOPE_PATTERN: LazyLock<Regex> = LazyLock::new(|| field_pattern("slope"));
static OFFSET_PATTERN: LazyLock<Regex> = LazyLock::new(|| field_pattern("offset"));

// Built only from the constant field names and NUMBER, so compilation
// cannot fail at runtime.
fn field_pattern(name: &str) -> Regex {
    Regex::new(&format!(r"(?i)\b{name}\s*=\s*({NUMBER})"))
        .expect("calibration field pattern is a valid regex")
}

/// Linear calibration: `physical = raw * slope + offset`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Calibration {
    slope: f64,
    offset: f64,
}

impl Default for Calibration {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Calibration {
    /// Slope 1, offset 0. Used whenever a file carries no calibration.
    pub const IDENTITY: Calibration = Calibration {
        slope: 1.0,
        offset: 0.0,
    };

    pub const fn new(slope: f64, offset: f64) -> Self {
        Self { slope, offset }
    }

    pub fn slope(&self) -> f64 {
        self.slope
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Fails unless both terms can be written out as scientific notation.
    pub fn ensure_finite(&self) -> Result<()> {
        if self.slope.is_finite() && self.offset.is_finite() {
            Ok(())
        } else {
            Err(XreTiffError::NonFiniteCalibration {
                slope: self.slope,
                offset: self.offset,
            })
        }
    }

    /// Fails when the calibration cannot be inverted.
    pub fn ensure_invertible(&self) -> Result<()> {
        if self.slope == 0.0 {
            return Err(XreTiffError::ZeroSlope);
        }
        Ok(())
    }

    /// Text written to the ImageDescription tag.
    pub fn to_description(&self) -> String {
        self.to_string()
    }

    /// Recovers a calibration from description text.
    ///
    /// Never fails. `slope` and `offset` are looked up independently,
    /// case-insensitively and with any whitespace around `=`; a field that is
    /// missing or whose number cannot be represented keeps its identity value.
    /// Text with neither field therefore yields [`Calibration::IDENTITY`].
    pub fn parse(text: &str) -> Self {
        let slope = parse_field(&SLOPE_PATTERN, "slope", text).unwrap_or(Self::IDENTITY.slope);
        let offset = parse_field(&OFFSET_PATTERN, "offset", text).unwrap_or(Self::IDENTITY.offset);
        let calibration = Self { slope, offset };
        debug!(slope, offset, "Parsed calibration");
        calibration
    }

    /// Same as [`Calibration::parse`], treating an absent description as
    /// empty text.
    pub fn from_description(description: Option<&str>) -> Self {
        match description {
            Some(text) => Self::parse(text),
            None => {
                debug!("No image description, using identity calibration");
                Self::IDENTITY
            }
        }
    }
}

fn parse_field(pattern: &Regex, name: &str, text: &str) -> Option<f64> {
    let token = pattern.captures(text)?.get(1)?.as_str();
    match token.parse::<f64>() {
        Ok(value) if value.is_finite() => Some(value),
        Ok(_) | Err(_) => {
            warn!(field = name, token, "Calibration value out of range, using default");
            None
        }
    }
}

impl fmt::Display for Calibration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "slope = {} offset = {}",
            format_scientific(self.slope),
            format_scientific(self.offset)
        )
    }
}

/// Six decimals, upper-case `E`, signed exponent of at least two digits:
/// `1.000000E-03`, `-2.500000E+01`.
pub fn format_scientific(value: f64) -> String {
    let formatted = format!("{value:.6e}");
    match formatted.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{mantissa}E{sign}{digits:0>2}")
        }
        // inf and NaN have no exponent
        None => formatted.to_uppercase(),
    }
}
