//! Double-submit protection for decision commands.

use std::{
    collections::HashSet,
    sync::{Arc, Mutex, PoisonError},
};

use crate::error::{ApprovalError, Result};

/// Set of approval IDs with a command currently on the wire.
#[derive(Debug, Clone, Default)]
pub(crate) struct InFlight {
    ids: Arc<Mutex<HashSet<String>>>,
}

impl InFlight {
    /// Marks `id` as in flight until the returned guard is dropped.
    pub(crate) fn acquire(&self, id: &str) -> Result<InFlightGuard> {
        let mut ids = self.ids.lock().unwrap_or_else(PoisonError::into_inner);
        if !ids.insert(id.to_string()) {
            return Err(ApprovalError::ActionInFlight { id: id.to_string() });
        }
        Ok(InFlightGuard {
            ids: Arc::clone(&self.ids),
            id: id.to_string(),
        })
    }

    pub(crate) fn contains(&self, id: &str) -> bool {
        self.ids
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(id)
    }
}

/// Clears the in-flight mark on drop, whatever the command's outcome.
#[derive(Debug)]
pub(crate) struct InFlightGuard {
    ids: Arc<Mutex<HashSet<String>>>,
    id: String,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.ids
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.id);
    }
}
