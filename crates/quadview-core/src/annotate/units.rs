use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{QuadviewError, Result};

/// Units a ruler can measure in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthUnit {
    #[default]
    Px,
    Mm,
    Cm,
    M,
    In,
    Ft,
    Yd,
}

impl LengthUnit {
    pub const ALL: [LengthUnit; 7] = [
        LengthUnit::Px,
        LengthUnit::Mm,
        LengthUnit::Cm,
        LengthUnit::M,
        LengthUnit::In,
        LengthUnit::Ft,
        LengthUnit::Yd,
    ];

    /// Millimetres per unit, or `None` for pixels.
    pub fn mm_per_unit(self) -> Option<f64> {
        match self {
            Self::Px => None,
            Self::Mm => Some(1.0),
            Self::Cm => Some(10.0),
            Self::M => Some(1000.0),
            Self::In => Some(25.4),
            Self::Ft => Some(304.8),
            Self::Yd => Some(914.4),
        }
    }

    pub fn is_pixels(self) -> bool {
        self == Self::Px
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Self::Px => "px",
            Self::Mm => "mm",
            Self::Cm => "cm",
            Self::M => "m",
            Self::In => "in",
            Self::Ft => "ft",
            Self::Yd => "yd",
        }
    }
}

impl std::fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl FromStr for LengthUnit {
    type Err = QuadviewError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|u| u.symbol().eq_ignore_ascii_case(s))
            .ok_or_else(|| QuadviewError::InvalidArgument(format!("unknown length unit '{s}'")))
    }
}

/// Pixel-to-length calibration, stored as pixels per millimetre.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PixelConversion {
    px_per_mm: f64,
}

impl PixelConversion {
    /// Calibrate from "`px` pixels span `units` of `unit`".
    ///
    /// Rejects zero, negative and non-finite counts, and pixel units.
    pub fn from_counts(px: f64, units: f64, unit: LengthUnit) -> Result<Self> {
        if !px.is_finite() || !units.is_finite() || px <= 0.0 || units <= 0.0 {
            return Err(QuadviewError::InvalidConversion(format!(
                "{px} px per {units} {unit}"
            )));
        }
        let mm_per_unit = unit.mm_per_unit().ok_or_else(|| {
            QuadviewError::InvalidConversion("pixels cannot be calibrated against pixels".into())
        })?;
        Self::from_px_per_mm(px / units / mm_per_unit)
    }

    pub fn from_px_per_mm(px_per_mm: f64) -> Result<Self> {
        if !px_per_mm.is_finite() || px_per_mm <= 0.0 {
            return Err(QuadviewError::InvalidConversion(format!(
                "{px_per_mm} px per mm"
            )));
        }
        Ok(Self { px_per_mm })
    }

    pub fn px_per_mm(&self) -> f64 {
        self.px_per_mm
    }

    /// Pixels per `unit`. Always 1 for pixel units.
    pub fn px_per_unit(&self, unit: LengthUnit) -> f64 {
        match unit.mm_per_unit() {
            Some(mm) => self.px_per_mm * mm,
            None => 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_unit_case_insensitive() {
        assert_eq!("CM".parse::<LengthUnit>().unwrap(), LengthUnit::Cm);
        assert!("furlong".parse::<LengthUnit>().is_err());
    }

    #[test]
    fn test_conversion_from_counts_in_cm() {
        let c = PixelConversion::from_counts(200.0, 2.0, LengthUnit::Cm).unwrap();
        assert!((c.px_per_mm() - 10.0).abs() < 1e-12);
        assert!((c.px_per_unit(LengthUnit::In) - 254.0).abs() < 1e-9);
        assert_eq!(c.px_per_unit(LengthUnit::Px), 1.0);
    }
}
