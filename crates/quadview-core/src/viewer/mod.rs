pub mod lock;
pub mod pane;
pub mod split;
pub mod view;

use tracing::{debug, info};

use crate::annotate::{AnnotationOverlay, Comment};
use crate::command::{CommandOutcome, ViewerCommand};
use crate::config::{AppDefaults, BackgroundColor, TransformMode};
use crate::consts::SPLIT_CURSOR_OFFSET;
use crate::error::{QuadviewError, Result};
use crate::geometry::mapper::{bound_to_widget, global_to_widget, scene_to_pixel};
use crate::geometry::{Point, Size, ViewTransform};
use crate::raster::Raster;
use crate::sync::SyncBy;

pub use lock::SplitLock;
pub use pane::{Interpolation, Pane, PanePosition};
pub use split::{compute_split_layout, PaneRegion, SplitLayout};
pub use view::{PanOp, ZoomOp, ViewState};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ViewerId(pub u64);

impl std::fmt::Display for ViewerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Images for one split view. Only `main` is required.
#[derive(Clone, Debug)]
pub struct ViewerImages {
    pub main: Raster,
    pub top_right: Option<Raster>,
    pub bottom_right: Option<Raster>,
    pub bottom_left: Option<Raster>,
}

impl ViewerImages {
    pub fn single(main: Raster) -> Self {
        Self {
            main,
            top_right: None,
            bottom_right: None,
            bottom_left: None,
        }
    }

    /// Number of images supplied, main included.
    pub fn count(&self) -> usize {
        1 + [&self.top_right, &self.bottom_right, &self.bottom_left]
            .iter()
            .filter(|r| r.is_some())
            .count()
    }
}

/// What a split fraction is relative to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SplitRelativeTo {
    /// Fraction of the main image resolution.
    #[default]
    Resolution,
    /// Fraction of the visible widget area.
    Visible,
}

/// One comparison window: up to four panes sharing a split point, zoom and
/// pan, plus its annotations.
#[derive(Clone, Debug)]
pub struct Viewer {
    id: ViewerId,
    name: String,
    panes: [Pane; 4],
    view: ViewState,
    lock: SplitLock,
    last_split: Point,
    layout: SplitLayout,
    pub sync_zoom: bool,
    pub sync_pan: bool,
    sync_by: SyncBy,
    transform_mode: TransformMode,
    background: BackgroundColor,
    render_buffer: f64,
    annotations: AnnotationOverlay,
}

impl Viewer {
    /// Build a viewer over `images` and place the split at the image centre.
    pub fn new(id: ViewerId, images: ViewerImages, defaults: &AppDefaults, viewport: Size) -> Result<Self> {
        if images.main.is_empty() {
            return Err(QuadviewError::InvalidDimensions {
                width: images.main.width(),
                height: images.main.height(),
            });
        }
        let name = images
            .main
            .file_name()
            .unwrap_or_else(|| format!("Viewer {id}"));
        let view = ViewState::new(images.main.size(), viewport, &defaults.view);
        let panes = [
            Pane::new(PanePosition::Main, Some(images.main)),
            Pane::new(PanePosition::TopRight, images.top_right),
            Pane::new(PanePosition::BottomRight, images.bottom_right),
            Pane::new(PanePosition::BottomLeft, images.bottom_left),
        ];

        let mut viewer = Self {
            id,
            name,
            panes,
            layout: SplitLayout {
                split_widget: Point::ZERO,
                split_scene: Point::ZERO,
                regions: Vec::new(),
            },
            view,
            lock: SplitLock::default(),
            last_split: Point::ZERO,
            sync_zoom: true,
            sync_pan: true,
            sync_by: defaults.sync_by,
            transform_mode: defaults.transform_mode,
            background: defaults.background,
            render_buffer: defaults.view.render_buffer,
            annotations: AnnotationOverlay::new(defaults.ruler_origin),
        };
        viewer.update_adjust_factors();
        viewer.set_split(0.5, 0.5, true, SplitRelativeTo::Resolution);
        info!(
            id = id.0,
            name = %viewer.name,
            overlays = viewer.existing_overlays().count(),
            "Opened viewer"
        );
        Ok(viewer)
    }

    pub fn id(&self) -> ViewerId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn pane(&self, position: PanePosition) -> &Pane {
        &self.panes[position.index()]
    }

    pub fn panes(&self) -> impl Iterator<Item = &Pane> {
        self.panes.iter()
    }

    /// Overlay panes that hold an image.
    pub fn existing_overlays(&self) -> impl Iterator<Item = &Pane> {
        self.panes[1..].iter().filter(|p| p.exists())
    }

    pub fn main_size(&self) -> Size {
        self.panes[0].size()
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn transform(&self) -> ViewTransform {
        self.view.transform()
    }

    pub fn viewport(&self) -> Size {
        self.view.viewport()
    }

    pub fn zoom(&self) -> f64 {
        self.view.zoom()
    }

    pub fn split_layout(&self) -> &SplitLayout {
        &self.layout
    }

    /// Last split point in main-scene coordinates.
    pub fn last_split(&self) -> Point {
        self.last_split
    }

    pub fn annotations(&self) -> &AnnotationOverlay {
        &self.annotations
    }

    pub fn annotations_mut(&mut self) -> &mut AnnotationOverlay {
        &mut self.annotations
    }

    pub fn background(&self) -> BackgroundColor {
        self.background
    }

    pub fn set_background(&mut self, color: BackgroundColor) {
        self.background = color;
    }

    pub fn transform_mode(&self) -> TransformMode {
        self.transform_mode
    }

    pub fn set_transform_mode(&mut self, mode: TransformMode) {
        self.transform_mode = mode;
    }

    pub fn interpolation(&self, position: PanePosition) -> Interpolation {
        self.pane(position).interpolation(self.transform_mode)
    }

    pub fn sync_by(&self) -> SyncBy {
        self.sync_by
    }

    /// Change the sizing strategy and re-derive every overlay's factor.
    pub fn set_sync_by(&mut self, sync_by: SyncBy) {
        self.sync_by = sync_by;
        self.update_adjust_factors();
        self.refresh_split();
    }

    fn update_adjust_factors(&mut self) {
        let main = self.main_size();
        let sender = self.sync_by.sender_dimension(main);
        for pane in self.panes[1..].iter_mut() {
            let factor = if pane.exists() {
                self.sync_by.adjustment_factor(sender, pane.size())
            } else {
                1.0
            };
            pane.set_adjust_factor(factor);
        }
    }

    // -- split ---------------------------------------------------------------

    pub fn is_split_locked(&self) -> bool {
        self.lock.is_locked()
    }

    pub fn set_split_locked(&mut self, locked: bool) {
        self.lock = if locked {
            SplitLock::Locked
        } else {
            SplitLock::Unlocked
        };
    }

    /// Toggle the split lock, returning the new locked state.
    pub fn toggle_split_lock(&mut self) -> bool {
        self.lock = self.lock.toggled();
        debug!(id = self.id.0, lock = %self.lock, "Split lock toggled");
        self.lock.is_locked()
    }

    /// Pointer moved to a widget-local position. Ignored while locked.
    pub fn pointer_moved(&mut self, widget: Point) -> bool {
        if !self.lock.permits(false) {
            return false;
        }
        let p = Point::new(widget.x + SPLIT_CURSOR_OFFSET, widget.y + SPLIT_CURSOR_OFFSET);
        let scene = self.transform().widget_to_scene(p);
        self.apply_split(p, scene);
        true
    }

    /// Pointer position reported in global screen space, e.g. by a tracker
    /// that keeps following the cursor outside the widget.
    pub fn pointer_moved_global(&mut self, global: Point, widget_origin: Point) -> bool {
        let local = bound_to_widget(global_to_widget(global, widget_origin), self.viewport());
        self.pointer_moved(local)
    }

    /// Place the split at a fraction of the image or of the visible area.
    ///
    /// Returns false when the split is locked and `ignore_lock` is not set.
    pub fn set_split(&mut self, fx: f64, fy: f64, ignore_lock: bool, relative_to: SplitRelativeTo) -> bool {
        if !self.lock.permits(ignore_lock) {
            return false;
        }
        let t = self.transform();
        let (widget, scene) = match relative_to {
            SplitRelativeTo::Resolution => {
                let size = self.main_size();
                let scene = Point::new(fx * size.width, fy * size.height);
                (t.scene_to_widget(scene), scene)
            }
            SplitRelativeTo::Visible => {
                let vp = self.viewport();
                let widget = Point::new(fx * vp.width, fy * vp.height);
                (widget, t.widget_to_scene(widget))
            }
        };
        self.apply_split(widget, scene);
        true
    }

    /// Re-derive every pane region from the cached split point. Runs after
    /// zoom, pan and resize regardless of the lock.
    pub fn refresh_split(&mut self) {
        let widget = self.transform().scene_to_widget(self.last_split);
        self.apply_split(widget, self.last_split);
    }

    fn apply_split(&mut self, widget: Point, scene: Point) {
        self.last_split = scene;
        let overlays: Vec<(PanePosition, f64)> = self
            .existing_overlays()
            .map(|p| (p.position(), p.adjust_factor()))
            .collect();
        self.layout = compute_split_layout(
            &self.transform(),
            self.viewport(),
            widget,
            &overlays,
            self.render_buffer,
        );
        for region in &self.layout.regions {
            self.panes[region.position.index()].apply_region(region);
        }
    }

    // -- navigation ----------------------------------------------------------

    pub fn resize(&mut self, viewport: Size) {
        self.view.set_viewport(viewport);
        self.refresh_split();
    }

    pub fn apply_zoom(&mut self, op: ZoomOp) -> bool {
        let changed = self.view.apply_zoom(op);
        if changed {
            self.refresh_split();
        }
        changed
    }

    pub fn apply_pan(&mut self, op: PanOp) {
        self.view.apply_pan(op);
        self.refresh_split();
    }

    pub fn scroll_state(&self) -> (f64, f64) {
        self.view.scroll_state()
    }

    /// Scroll to fractions of the scene extent. The scene is re-expanded
    /// first so the fractions refer to the current zoom.
    pub fn set_scroll_state(&mut self, fx: f64, fy: f64) {
        self.view.resize_scene();
        self.view.set_scroll_state(fx, fy);
        self.refresh_split();
    }

    /// Integer image pixel under a widget position.
    pub fn hovered_pixel(&self, widget: Point) -> (i64, i64) {
        scene_to_pixel(self.transform().widget_to_scene(widget))
    }

    /// Zoom as a whole-number percentage, for status readouts.
    pub fn zoom_percent(&self) -> String {
        format!("{:.0}%", self.zoom() * 100.0)
    }

    // -- opacity -------------------------------------------------------------

    pub fn opacity(&self, position: PanePosition) -> u8 {
        self.pane(position).opacity()
    }

    /// Set a pane's opacity. Returns the effective value (100 for absent panes).
    pub fn set_opacity(&mut self, position: PanePosition, percent: u8) -> u8 {
        self.panes[position.index()].set_opacity(percent)
    }

    // -- commands ------------------------------------------------------------

    pub fn handle_command(&mut self, command: ViewerCommand) -> Result<CommandOutcome> {
        debug!(id = self.id.0, ?command, "Viewer command");
        match command {
            ViewerCommand::AddComment { at } => {
                let anchor = self.transform().widget_to_scene(at);
                Ok(CommandOutcome::Added(
                    self.annotations.add_comment(Comment::new(anchor)),
                ))
            }
            ViewerCommand::AddRuler(unit) => {
                let t = self.transform();
                let vp = self.viewport();
                Ok(CommandOutcome::Added(
                    self.annotations.add_ruler_in_view(unit, &t, vp)?,
                ))
            }
            ViewerCommand::SetConversion { px, units, unit } => {
                self.annotations.set_conversion(px, units, unit)?;
                Ok(CommandOutcome::Updated)
            }
            ViewerCommand::SetOrigin(origin) => {
                self.annotations.set_origin(origin);
                Ok(CommandOutcome::Updated)
            }
            ViewerCommand::SetTransformMode(mode) => {
                self.set_transform_mode(mode);
                Ok(CommandOutcome::Updated)
            }
            ViewerCommand::SetBackground(color) => {
                self.set_background(color);
                Ok(CommandOutcome::Updated)
            }
            ViewerCommand::SetSyncBy(sync_by) => {
                self.set_sync_by(sync_by);
                Ok(CommandOutcome::Updated)
            }
            ViewerCommand::ToggleSplitLock => {
                self.toggle_split_lock();
                Ok(CommandOutcome::Updated)
            }
            ViewerCommand::Delete(id) => {
                self.annotations.remove(id)?;
                Ok(CommandOutcome::Removed(id))
            }
            ViewerCommand::SetColor { id, color } => {
                self.annotations.set_comment_color(id, color)?;
                Ok(CommandOutcome::Updated)
            }
        }
    }
}
