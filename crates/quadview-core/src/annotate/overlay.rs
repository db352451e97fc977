use tracing::{debug, info};

use super::comment::{Comment, CommentColor};
use super::ruler::{Endpoint, Ruler, RulerOrigin};
use super::units::{LengthUnit, PixelConversion};
use crate::consts::RULER_PLACEMENT_FRACTION;
use crate::error::{QuadviewError, Result};
use crate::geometry::{Point, Size, ViewTransform};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AnnotationId(pub u64);

impl std::fmt::Display for AnnotationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Annotation {
    Ruler(Ruler),
    Comment(Comment),
}

/// All rulers and comments of one viewer, plus the shared unit calibration
/// and ruler orientation.
#[derive(Clone, Debug, Default)]
pub struct AnnotationOverlay {
    entries: Vec<(AnnotationId, Annotation)>,
    next_id: u64,
    conversion: Option<PixelConversion>,
    origin: RulerOrigin,
}

impl AnnotationOverlay {
    pub fn new(origin: RulerOrigin) -> Self {
        Self {
            origin,
            ..Default::default()
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn conversion(&self) -> Option<PixelConversion> {
        self.conversion
    }

    pub fn origin(&self) -> RulerOrigin {
        self.origin
    }

    pub fn get(&self, id: AnnotationId) -> Option<&Annotation> {
        self.entries
            .iter()
            .find(|(eid, _)| *eid == id)
            .map(|(_, a)| a)
    }

    pub fn iter(&self) -> impl Iterator<Item = (AnnotationId, &Annotation)> {
        self.entries.iter().map(|(id, a)| (*id, a))
    }

    pub fn rulers(&self) -> impl Iterator<Item = (AnnotationId, &Ruler)> {
        self.iter().filter_map(|(id, a)| match a {
            Annotation::Ruler(r) => Some((id, r)),
            Annotation::Comment(_) => None,
        })
    }

    pub fn comments(&self) -> impl Iterator<Item = (AnnotationId, &Comment)> {
        self.iter().filter_map(|(id, a)| match a {
            Annotation::Comment(c) => Some((id, c)),
            Annotation::Ruler(_) => None,
        })
    }

    fn insert(&mut self, annotation: Annotation) -> AnnotationId {
        let id = AnnotationId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, annotation));
        id
    }

    fn get_mut(&mut self, id: AnnotationId) -> Result<&mut Annotation> {
        self.entries
            .iter_mut()
            .find(|(eid, _)| *eid == id)
            .map(|(_, a)| a)
            .ok_or(QuadviewError::UnknownAnnotation(id.0))
    }

    pub fn add_comment(&mut self, comment: Comment) -> AnnotationId {
        self.insert(Annotation::Comment(comment))
    }

    /// Add a ruler between two scene points.
    ///
    /// Real-length units require a calibration to have been set first.
    pub fn add_ruler(&mut self, unit: LengthUnit, p1: Point, p2: Point) -> Result<AnnotationId> {
        let px_per_unit = if unit.is_pixels() {
            1.0
        } else {
            self.conversion
                .ok_or_else(|| QuadviewError::ConversionNotSet(unit.to_string()))?
                .px_per_unit(unit)
        };
        let ruler = Ruler::new(p1, p2, unit, px_per_unit, self.origin);
        debug!(%unit, length = ruler.length(), "Added ruler");
        Ok(self.insert(Annotation::Ruler(ruler)))
    }

    /// Add a ruler spanning one to two thirds of the visible widget diagonal.
    pub fn add_ruler_in_view(
        &mut self,
        unit: LengthUnit,
        transform: &ViewTransform,
        viewport: Size,
    ) -> Result<AnnotationId> {
        let f = RULER_PLACEMENT_FRACTION;
        let p1 = transform.widget_to_scene(Point::new(viewport.width * f, viewport.height * f));
        let p2 = transform.widget_to_scene(Point::new(
            viewport.width * 2.0 * f,
            viewport.height * 2.0 * f,
        ));
        self.add_ruler(unit, p1, p2)
    }

    pub fn remove(&mut self, id: AnnotationId) -> Result<Annotation> {
        let idx = self
            .entries
            .iter()
            .position(|(eid, _)| *eid == id)
            .ok_or(QuadviewError::UnknownAnnotation(id.0))?;
        Ok(self.entries.remove(idx).1)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn move_ruler_endpoint(&mut self, id: AnnotationId, which: Endpoint, p: Point) -> Result<()> {
        match self.get_mut(id)? {
            Annotation::Ruler(r) => {
                r.set_endpoint(which, p);
                Ok(())
            }
            Annotation::Comment(_) => Err(QuadviewError::WrongAnnotationKind(id.0, "ruler")),
        }
    }

    fn comment_mut(&mut self, id: AnnotationId) -> Result<&mut Comment> {
        match self.get_mut(id)? {
            Annotation::Comment(c) => Ok(c),
            Annotation::Ruler(_) => Err(QuadviewError::WrongAnnotationKind(id.0, "comment")),
        }
    }

    pub fn move_comment(&mut self, id: AnnotationId, anchor: Point) -> Result<()> {
        self.comment_mut(id)?.anchor = anchor;
        Ok(())
    }

    pub fn set_comment_text(&mut self, id: AnnotationId, text: impl Into<String>) -> Result<()> {
        self.comment_mut(id)?.text = text.into();
        Ok(())
    }

    pub fn set_comment_color(&mut self, id: AnnotationId, color: CommentColor) -> Result<()> {
        self.comment_mut(id)?.color = color;
        Ok(())
    }

    /// Calibrate real-length units and rescale every placed non-pixel ruler.
    ///
    /// Invalid input leaves the current calibration untouched.
    pub fn set_conversion(&mut self, px: f64, units: f64, unit: LengthUnit) -> Result<()> {
        let conversion = PixelConversion::from_counts(px, units, unit)?;
        self.apply_conversion(conversion);
        Ok(())
    }

    pub(crate) fn apply_conversion(&mut self, conversion: PixelConversion) {
        info!(px_per_mm = conversion.px_per_mm(), "Unit conversion set");
        self.conversion = Some(conversion);
        for (_, a) in self.entries.iter_mut() {
            if let Annotation::Ruler(r) = a {
                r.set_px_per_unit(conversion.px_per_unit(r.unit()));
            }
        }
    }

    /// Switch the ruler coordinate orientation for all present and future rulers.
    pub fn set_origin(&mut self, origin: RulerOrigin) {
        self.origin = origin;
        for (_, a) in self.entries.iter_mut() {
            if let Annotation::Ruler(r) = a {
                r.set_origin(origin);
            }
        }
    }
}
