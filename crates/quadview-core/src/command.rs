use crate::annotate::{AnnotationId, CommentColor, LengthUnit, RulerOrigin};
use crate::config::{BackgroundColor, TransformMode};
use crate::geometry::Point;
use crate::sync::SyncBy;

/// Context-menu actions on a viewer, dispatched by
/// [`crate::viewer::Viewer::handle_command`].
#[derive(Clone, Debug, PartialEq)]
pub enum ViewerCommand {
    /// Add a default comment at a widget position.
    AddComment { at: Point },
    /// Add a ruler across the middle third of the view.
    AddRuler(LengthUnit),
    /// Calibrate real-length units: `px` pixels span `units` of `unit`.
    SetConversion { px: f64, units: f64, unit: LengthUnit },
    SetOrigin(RulerOrigin),
    SetTransformMode(TransformMode),
    SetBackground(BackgroundColor),
    SetSyncBy(SyncBy),
    ToggleSplitLock,
    Delete(AnnotationId),
    SetColor { id: AnnotationId, color: CommentColor },
}

impl ViewerCommand {
    /// Whether the command is a view setting that may be applied to every
    /// open viewer at once.
    pub fn applies_to_all(&self) -> bool {
        matches!(
            self,
            Self::SetTransformMode(_) | Self::SetBackground(_) | Self::SetSyncBy(_)
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommandOutcome {
    Added(AnnotationId),
    Removed(AnnotationId),
    Updated,
}
