use tracing::debug;

use super::SyncBy;
use crate::geometry::Size;

/// Global zoom/pan synchronization switches plus the in-flight guard that
/// keeps a pan broadcast from re-triggering itself.
///
/// The controller holds no viewers; the workspace drives propagation and
/// asks the controller whether a pass may start.
#[derive(Clone, Debug)]
pub struct SyncController {
    pub sync_zoom: bool,
    pub sync_pan: bool,
    handling_pan: bool,
}

impl Default for SyncController {
    fn default() -> Self {
        Self::new(true, true)
    }
}

impl SyncController {
    pub fn new(sync_zoom: bool, sync_pan: bool) -> Self {
        Self {
            sync_zoom,
            sync_pan,
            handling_pan: false,
        }
    }

    /// Whether a pan broadcast is currently running.
    pub fn is_handling_pan(&self) -> bool {
        self.handling_pan
    }

    /// Try to start a pan broadcast from `sender`.
    ///
    /// Returns false (and leaves state untouched) when pan sync is off, when
    /// the sender is not the active viewer, or when a broadcast is already in
    /// flight. Every `true` must be paired with [`SyncController::end_pan`].
    pub fn try_begin_pan(&mut self, sender_is_active: bool) -> bool {
        if self.handling_pan {
            debug!("Suppressing nested pan notification");
            return false;
        }
        if !self.sync_pan || !sender_is_active {
            return false;
        }
        self.handling_pan = true;
        true
    }

    pub fn end_pan(&mut self) {
        self.handling_pan = false;
    }

    /// Zoom a receiver should adopt so its main image appears the same size as
    /// the sender's.
    pub fn receiver_zoom(sync_by: SyncBy, sender_zoom: f64, sender: Size, receiver: Size) -> f64 {
        sender_zoom * sync_by.factor_between(sender, receiver)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_pan_is_suppressed() {
        let mut c = SyncController::default();
        assert!(c.try_begin_pan(true));
        assert!(!c.try_begin_pan(true));
        c.end_pan();
        assert!(c.try_begin_pan(true));
    }

    #[test]
    fn test_notification_during_broadcast_keeps_guard() {
        let mut c = SyncController::default();
        assert!(c.try_begin_pan(true));
        assert!(!c.try_begin_pan(false));
        assert!(c.is_handling_pan());
        c.end_pan();
        assert!(!c.is_handling_pan());
    }

    #[test]
    fn test_inactive_sender_does_not_broadcast() {
        let mut c = SyncController::default();
        assert!(!c.try_begin_pan(false));
        assert!(!c.is_handling_pan());
    }
}
