//! Multi-viewer workspace: owns the open viewers, tracks the active one and
//! drives zoom/pan synchronization between them.

use tracing::{debug, info};

use crate::command::{CommandOutcome, ViewerCommand};
use crate::config::AppDefaults;
use crate::error::{QuadviewError, Result};
use crate::geometry::{Point, Size};
use crate::sync::{SyncBy, SyncController};
use crate::viewer::{PanOp, PanePosition, SplitRelativeTo, Viewer, ViewerId, ViewerImages, ZoomOp};

/// Which viewers a split placement targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SplitTarget {
    Active,
    All,
}

#[derive(Debug)]
pub struct Workspace {
    viewers: Vec<Viewer>,
    active: Option<ViewerId>,
    next_id: u64,
    sync: SyncController,
    defaults: AppDefaults,
}

impl Workspace {
    pub fn new(defaults: AppDefaults) -> Self {
        Self {
            viewers: Vec::new(),
            active: None,
            next_id: 1,
            sync: SyncController::new(defaults.sync_zoom, defaults.sync_pan),
            defaults,
        }
    }

    pub fn defaults(&self) -> &AppDefaults {
        &self.defaults
    }

    pub fn sync(&self) -> &SyncController {
        &self.sync
    }

    pub fn len(&self) -> usize {
        self.viewers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.viewers.is_empty()
    }

    pub fn viewers(&self) -> impl Iterator<Item = &Viewer> {
        self.viewers.iter()
    }

    pub fn viewer(&self, id: ViewerId) -> Option<&Viewer> {
        self.viewers.iter().find(|v| v.id() == id)
    }

    pub fn viewer_mut(&mut self, id: ViewerId) -> Result<&mut Viewer> {
        self.viewers
            .iter_mut()
            .find(|v| v.id() == id)
            .ok_or(QuadviewError::UnknownViewer(id.0))
    }

    pub fn active_id(&self) -> Option<ViewerId> {
        self.active
    }

    pub fn active(&self) -> Option<&Viewer> {
        self.active.and_then(|id| self.viewer(id))
    }

    /// Open a new viewer and make it active.
    ///
    /// The viewer fits its image to the window, then adopts the active
    /// viewer's zoom and scroll position when the respective sync is on and
    /// the active viewer takes part in it.
    pub fn open(&mut self, images: ViewerImages, viewport: Size) -> Result<ViewerId> {
        let id = ViewerId(self.next_id);
        let mut viewer = Viewer::new(id, images, &self.defaults, viewport)?;
        viewer.set_name(format!("Window {}", self.next_id));
        self.next_id += 1;

        viewer.apply_zoom(ZoomOp::FitToWindow);
        if let Some(active) = self.active() {
            if self.sync.sync_zoom && active.sync_zoom {
                let zoom = SyncController::receiver_zoom(
                    active.sync_by(),
                    active.zoom(),
                    active.main_size(),
                    viewer.main_size(),
                );
                viewer.apply_zoom(ZoomOp::Set(zoom));
            }
            if self.sync.sync_pan && active.sync_pan {
                let (fx, fy) = active.scroll_state();
                viewer.set_scroll_state(fx, fy);
            }
        }

        self.viewers.push(viewer);
        self.active = Some(id);
        info!(id = id.0, total = self.viewers.len(), "Viewer added to workspace");
        Ok(id)
    }

    /// Close a viewer, releasing its images. The most recently opened
    /// remaining viewer becomes active.
    pub fn close(&mut self, id: ViewerId) -> Result<()> {
        let idx = self
            .viewers
            .iter()
            .position(|v| v.id() == id)
            .ok_or(QuadviewError::UnknownViewer(id.0))?;
        self.viewers.remove(idx);
        if self.active == Some(id) {
            self.active = self.viewers.last().map(Viewer::id);
        }
        debug!(id = id.0, "Closed viewer");
        Ok(())
    }

    pub fn activate(&mut self, id: ViewerId) -> Result<()> {
        if self.viewer(id).is_none() {
            return Err(QuadviewError::UnknownViewer(id.0));
        }
        self.active = Some(id);
        Ok(())
    }

    pub fn set_sync_zoom(&mut self, on: bool) {
        self.sync.sync_zoom = on;
    }

    pub fn set_sync_pan(&mut self, on: bool) {
        self.sync.sync_pan = on;
    }

    /// Per-viewer participation in zoom and pan sync.
    pub fn set_viewer_sync(&mut self, id: ViewerId, zoom: bool, pan: bool) -> Result<()> {
        let v = self.viewer_mut(id)?;
        v.sync_zoom = zoom;
        v.sync_pan = pan;
        Ok(())
    }

    // -- zoom / pan ----------------------------------------------------------

    pub fn zoom(&mut self, id: ViewerId, op: ZoomOp) -> Result<()> {
        if self.viewer_mut(id)?.apply_zoom(op) {
            self.on_zoom_changed(id)?;
        }
        Ok(())
    }

    pub fn pan(&mut self, id: ViewerId, op: PanOp) -> Result<()> {
        self.viewer_mut(id)?.apply_pan(op);
        self.on_pan_changed(id)
    }

    pub fn set_scroll_state(&mut self, id: ViewerId, fx: f64, fy: f64) -> Result<()> {
        self.viewer_mut(id)?.set_scroll_state(fx, fy);
        self.on_pan_changed(id)
    }

    /// Propagate the sender's zoom to every participating peer, then re-run
    /// pan sync from the active viewer.
    pub fn on_zoom_changed(&mut self, sender: ViewerId) -> Result<()> {
        let (zoom, size, sync_by, participates) = {
            let v = self
                .viewer(sender)
                .ok_or(QuadviewError::UnknownViewer(sender.0))?;
            (v.zoom(), v.main_size(), v.sync_by(), v.sync_zoom)
        };
        if !self.sync.sync_zoom || !participates {
            return Ok(());
        }

        for receiver in self.viewers.iter_mut().filter(|v| v.id() != sender && v.sync_zoom) {
            let z = SyncController::receiver_zoom(sync_by, zoom, size, receiver.main_size());
            receiver.apply_zoom(ZoomOp::Set(z));
            debug!(from = sender.0, to = receiver.id().0, zoom = z, "Synced zoom");
        }

        if let Some(active) = self.active {
            self.on_pan_changed(active)?;
        }
        Ok(())
    }

    /// React to a scroll change of `sender`.
    ///
    /// The sender always refreshes its split. Only the active viewer
    /// broadcasts its scroll position; notifications raised while a
    /// broadcast is running are suppressed.
    pub fn on_pan_changed(&mut self, sender: ViewerId) -> Result<()> {
        let v = self.viewer_mut(sender)?;
        v.refresh_split();
        let participates = v.sync_pan;
        let (fx, fy) = v.scroll_state();

        // Receivers are never the active viewer, so their notifications stop
        // here; the in-flight guard additionally rejects anything raised while
        // a broadcast is running.
        let is_active = self.active == Some(sender) && participates;
        if !self.sync.try_begin_pan(is_active) {
            return Ok(());
        }

        let receivers: Vec<ViewerId> = self
            .viewers
            .iter()
            .filter(|v| v.id() != sender && v.sync_pan)
            .map(Viewer::id)
            .collect();
        let mut result = Ok(());
        for id in receivers {
            if let Ok(r) = self.viewer_mut(id) {
                r.set_scroll_state(fx, fy);
            }
            // A receiver's own scroll change notifies back; the guard
            // keeps it from broadcasting again.
            result = result.and(self.on_pan_changed(id));
        }
        self.sync.end_pan();
        result
    }

    // -- split / opacity -----------------------------------------------------

    pub fn pointer_moved(&mut self, id: ViewerId, widget: Point) -> Result<bool> {
        Ok(self.viewer_mut(id)?.pointer_moved(widget))
    }

    pub fn set_split(
        &mut self,
        target: SplitTarget,
        fx: f64,
        fy: f64,
        ignore_lock: bool,
        relative_to: SplitRelativeTo,
    ) -> Result<()> {
        match target {
            SplitTarget::Active => {
                let id = self.active.ok_or(QuadviewError::NoActiveViewer)?;
                self.viewer_mut(id)?.set_split(fx, fy, ignore_lock, relative_to);
            }
            SplitTarget::All => {
                for v in self.viewers.iter_mut() {
                    v.set_split(fx, fy, ignore_lock, relative_to);
                }
            }
        }
        Ok(())
    }

    /// Place the split (overriding any lock) and lock it there.
    pub fn set_split_and_lock(&mut self, target: SplitTarget, fx: f64, fy: f64) -> Result<()> {
        self.set_split(target, fx, fy, true, SplitRelativeTo::Resolution)?;
        match target {
            SplitTarget::Active => {
                let id = self.active.ok_or(QuadviewError::NoActiveViewer)?;
                self.viewer_mut(id)?.set_split_locked(true);
            }
            SplitTarget::All => self.viewers.iter_mut().for_each(|v| v.set_split_locked(true)),
        }
        Ok(())
    }

    /// Opacity slider moved. When the pane holds an image and the split is
    /// unlocked, the split is first moved to the middle of the visible area
    /// so every pane is on screen while adjusting.
    pub fn set_opacity(&mut self, id: ViewerId, position: PanePosition, percent: u8) -> Result<u8> {
        let v = self.viewer_mut(id)?;
        if v.pane(position).exists() && !v.is_split_locked() {
            v.set_split(0.5, 0.5, false, SplitRelativeTo::Visible);
        }
        Ok(v.set_opacity(position, percent))
    }

    // -- commands ------------------------------------------------------------

    pub fn handle_command(&mut self, id: ViewerId, command: ViewerCommand) -> Result<CommandOutcome> {
        self.viewer_mut(id)?.handle_command(command)
    }

    /// Apply a view-setting command to every open viewer.
    pub fn apply_to_all(&mut self, command: ViewerCommand) -> Result<()> {
        if !command.applies_to_all() {
            return Err(QuadviewError::InvalidArgument(format!(
                "{command:?} cannot be applied to all viewers"
            )));
        }
        // Later viewers open with the same settings.
        match command {
            ViewerCommand::SetSyncBy(sync_by) => self.defaults.sync_by = sync_by,
            ViewerCommand::SetBackground(color) => self.defaults.background = color,
            ViewerCommand::SetTransformMode(mode) => self.defaults.transform_mode = mode,
            _ => {}
        }
        for v in self.viewers.iter_mut() {
            v.handle_command(command.clone())?;
        }
        Ok(())
    }

    pub fn set_sync_by_all(&mut self, sync_by: SyncBy) -> Result<()> {
        self.apply_to_all(ViewerCommand::SetSyncBy(sync_by))
    }
}
