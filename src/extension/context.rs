//! Host-owned context handed to the extension on activation.

use std::sync::Arc;

use crate::core::Memento;
use crate::host::Disposable;

/// Resources the host lends to the extension while it is active.
///
/// The extension pushes every registration into `subscriptions`; the host
/// calls [`dispose_all`](Self::dispose_all) when it unloads the extension.
pub struct ExtensionContext {
    /// Handles released when the extension is unloaded.
    pub subscriptions: Vec<Disposable>,
    global_state: Arc<dyn Memento>,
}

impl std::fmt::Debug for ExtensionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtensionContext")
            .field("subscriptions", &self.subscriptions.len())
            .finish()
    }
}

impl ExtensionContext {
    /// Create a context over `global_state`.
    pub fn new(global_state: Arc<dyn Memento>) -> Self {
        Self { subscriptions: Vec::new(), global_state }
    }

    /// Storage that survives restarts.
    pub fn global_state(&self) -> &Arc<dyn Memento> {
        &self.global_state
    }

    /// Release every subscription, newest first.
    pub fn dispose_all(&mut self) {
        let count = self.subscriptions.len();
        while let Some(subscription) = self.subscriptions.pop() {
            subscription.dispose();
        }
        tracing::debug!(count, "released extension subscriptions");
    }
}
