use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::units::LengthUnit;
use crate::error::QuadviewError;
use crate::geometry::Point;

/// Orientation of the coordinate system used for ruler dx/dy/angle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RulerOrigin {
    /// Image-style: +x right, +y down.
    TopLeft,
    /// Cartesian-style: +x right, +y up.
    #[default]
    BottomLeft,
}

impl RulerOrigin {
    /// Sign applied to scene-space y differences.
    pub fn y_sign(self) -> f64 {
        match self {
            Self::TopLeft => 1.0,
            Self::BottomLeft => -1.0,
        }
    }
}

impl std::fmt::Display for RulerOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TopLeft => write!(f, "topleft"),
            Self::BottomLeft => write!(f, "bottomleft"),
        }
    }
}

impl FromStr for RulerOrigin {
    type Err = QuadviewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace(['-', '_', ' '], "").as_str() {
            "topleft" => Ok(Self::TopLeft),
            "bottomleft" => Ok(Self::BottomLeft),
            other => Err(QuadviewError::InvalidArgument(format!(
                "unknown ruler origin '{other}'"
            ))),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Endpoint {
    First,
    Second,
}

/// Ruler values as seen from one endpoint, in the ruler's unit.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Measurement {
    pub length: f64,
    pub dx: f64,
    pub dy: f64,
    pub angle_deg: f64,
}

/// Display strings for one endpoint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EndpointLabels {
    pub length: String,
    pub dx: String,
    pub dy: String,
    pub angle: String,
}

/// Two-point measuring line in main-scene coordinates.
///
/// Derived measurements are recomputed on every mutation, so the getters are
/// always consistent with the current endpoints, factor and origin.
#[derive(Clone, Debug, PartialEq)]
pub struct Ruler {
    p1: Point,
    p2: Point,
    unit: LengthUnit,
    px_per_unit: f64,
    origin: RulerOrigin,
    from_first: Measurement,
    from_second: Measurement,
}

impl Ruler {
    /// Create a ruler. Pixel rulers ignore `px_per_unit` and always use 1.
    pub fn new(p1: Point, p2: Point, unit: LengthUnit, px_per_unit: f64, origin: RulerOrigin) -> Self {
        let mut ruler = Self {
            p1,
            p2,
            unit,
            px_per_unit: if unit.is_pixels() { 1.0 } else { px_per_unit },
            origin,
            from_first: Measurement::default(),
            from_second: Measurement::default(),
        };
        ruler.recompute();
        ruler
    }

    pub fn endpoint(&self, which: Endpoint) -> Point {
        match which {
            Endpoint::First => self.p1,
            Endpoint::Second => self.p2,
        }
    }

    pub fn unit(&self) -> LengthUnit {
        self.unit
    }

    pub fn px_per_unit(&self) -> f64 {
        self.px_per_unit
    }

    pub fn origin(&self) -> RulerOrigin {
        self.origin
    }

    pub fn midpoint(&self) -> Point {
        Point::new((self.p1.x + self.p2.x) / 2.0, (self.p1.y + self.p2.y) / 2.0)
    }

    pub fn set_endpoint(&mut self, which: Endpoint, p: Point) {
        match which {
            Endpoint::First => self.p1 = p,
            Endpoint::Second => self.p2 = p,
        }
        self.recompute();
    }

    /// Replace the conversion factor. No effect on pixel rulers.
    pub fn set_px_per_unit(&mut self, px_per_unit: f64) {
        if self.unit.is_pixels() {
            return;
        }
        self.px_per_unit = px_per_unit;
        self.recompute();
    }

    pub fn set_origin(&mut self, origin: RulerOrigin) {
        self.origin = origin;
        self.recompute();
    }

    /// Length in the ruler's unit.
    pub fn length(&self) -> f64 {
        self.from_first.length
    }

    /// Measurement of `which` relative to the other endpoint.
    pub fn measurement(&self, which: Endpoint) -> Measurement {
        match which {
            Endpoint::First => self.from_first,
            Endpoint::Second => self.from_second,
        }
    }

    /// Label drawn at the middle of the line.
    pub fn center_label(&self) -> String {
        format!("{} {}", format_one_decimal(self.length()), self.unit)
    }

    pub fn endpoint_labels(&self, which: Endpoint) -> EndpointLabels {
        let m = self.measurement(which);
        let unit = self.unit;
        EndpointLabels {
            length: format!("|v|  {} {unit}", format_one_decimal(m.length)),
            dx: format!("⬌  {} {unit}", format_one_decimal(m.dx)),
            dy: format!("⬍  {} {unit}", format_one_decimal(m.dy)),
            angle: format!("∠  {}°", format_one_decimal(m.angle_deg)),
        }
    }

    fn recompute(&mut self) {
        self.from_first = self.measure(self.p1, self.p2);
        self.from_second = self.measure(self.p2, self.p1);
    }

    fn measure(&self, at: Point, other: Point) -> Measurement {
        let ppu = self.px_per_unit;
        let dx = (at.x - other.x) / ppu;
        let dy = (at.y - other.y) * self.origin.y_sign() / ppu;
        Measurement {
            length: at.distance_to(other) / ppu,
            dx,
            dy,
            angle_deg: dy.atan2(dx).to_degrees(),
        }
    }
}

/// Format with one decimal, never producing "-0.0".
pub(crate) fn format_one_decimal(v: f64) -> String {
    let rounded = (v * 10.0).round() / 10.0;
    if rounded == 0.0 {
        "0.0".to_string()
    } else {
        format!("{rounded:.1}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_one_decimal_negative_zero() {
        assert_eq!(format_one_decimal(-0.0), "0.0");
        assert_eq!(format_one_decimal(-0.04), "0.0");
        assert_eq!(format_one_decimal(-0.06), "-0.1");
        assert_eq!(format_one_decimal(12.345), "12.3");
    }

    #[test]
    fn test_origin_parse_variants() {
        assert_eq!("top-left".parse::<RulerOrigin>().unwrap(), RulerOrigin::TopLeft);
        assert_eq!("bottomleft".parse::<RulerOrigin>().unwrap(), RulerOrigin::BottomLeft);
    }
}
