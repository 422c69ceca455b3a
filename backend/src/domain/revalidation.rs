//! Stale-view signalling between write operations and the rendering layer.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

/// Path of the invoices list view, marked stale after a successful write.
pub const INVOICES_VIEW: &str = "/dashboard/invoices";

/// Fire-and-forget stale marks for rendered views.
///
/// Marking is idempotent and carries no ordering; the rendering layer clears
/// a mark by re-fetching the view before its next display.
#[derive(Clone, Default)]
pub struct ViewMarker {
    stale: Arc<Mutex<HashSet<String>>>,
}

impl ViewMarker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark(&self, view: &str) {
        if let Ok(mut views) = self.stale.lock() {
            views.insert(view.to_string());
        }
    }

    /// Remove a mark; returns whether the view was stale.
    pub fn clear(&self, view: &str) -> bool {
        match self.stale.lock() {
            Ok(mut views) => views.remove(view),
            Err(_) => false,
        }
    }

    pub fn is_stale(&self, view: &str) -> bool {
        match self.stale.lock() {
            Ok(views) => views.contains(view),
            Err(_) => false,
        }
    }
}
