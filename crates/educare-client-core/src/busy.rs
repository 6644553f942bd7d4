use std::{cell::Cell, rc::Rc};
use tracing::debug;

use crate::ui::{UiHost, UserAction};

/// Shows the loading state of `action` for as long as it is alive
pub(crate) struct BusyIndicator {
    ui: Rc<dyn UiHost>,
    action: UserAction,
}

impl BusyIndicator {
    pub fn new(ui: Rc<dyn UiHost>, action: UserAction) -> Self {
        ui.set_busy(action, true);
        Self { ui, action }
    }
}

impl Drop for BusyIndicator {
    fn drop(&mut self) {
        self.ui.set_busy(self.action, false);
    }
}

/// Allows at most one submission to be in flight at a time
#[derive(Debug, Default)]
pub(crate) struct InFlightSlot(Rc<Cell<Option<UserAction>>>);

pub(crate) struct InFlightGuard {
    slot: Rc<Cell<Option<UserAction>>>,
    _busy: BusyIndicator,
}

impl InFlightSlot {
    /// Returns `None` if another submission has not finished yet
    pub fn begin(&self, action: UserAction, ui: Rc<dyn UiHost>) -> Option<InFlightGuard> {
        if let Some(current) = self.0.get() {
            debug!(?current, ?action, "ignoring submission while another is in flight");
            return None;
        }
        self.0.set(Some(action));
        Some(InFlightGuard {
            slot: Rc::clone(&self.0),
            _busy: BusyIndicator::new(ui, action),
        })
    }

    pub fn current(&self) -> Option<UserAction> {
        self.0.get()
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.slot.set(None);
    }
}
