//! Release handles for host-owned resources.

use std::fmt;

/// Handle for a resource the host releases on a well-defined lifecycle event.
///
/// Dropping a `Disposable` does not release anything; only [`dispose`]
/// does, and only once.
///
/// [`dispose`]: Disposable::dispose
pub struct Disposable {
    label: String,
    release: Option<Box<dyn FnOnce() + Send>>,
}

impl Disposable {
    /// Create a disposable that runs `release` when disposed.
    pub fn from_fn(label: impl Into<String>, release: impl FnOnce() + Send + 'static) -> Self {
        Self { label: label.into(), release: Some(Box::new(release)) }
    }

    /// Create a disposable with nothing to release.
    pub fn noop(label: impl Into<String>) -> Self {
        Self { label: label.into(), release: None }
    }

    /// What this handle releases, for diagnostics.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Release the resource.
    pub fn dispose(mut self) {
        if let Some(release) = self.release.take() {
            tracing::trace!(resource = %self.label, "disposing");
            release();
        }
    }
}

impl fmt::Debug for Disposable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Disposable")
            .field("label", &self.label)
            .field("pending", &self.release.is_some())
            .finish()
    }
}
