//! Closure-backed resources.

use std::borrow::Cow;
use tryscope_core::{Resource, Result};

type Action = Box<dyn FnOnce() -> Result<()>>;

/// A cleanup action registered as a resource slot.
///
/// Runs when the block releases its slot, so deferred actions fire in
/// reverse registration order alongside ordinary resources. The body can
/// reach a `Deferred` through [`Scope::get_mut`](crate::Scope::get_mut) and
/// [`cancel`](Deferred::cancel) it.
pub struct Deferred {
    label: String,
    action: Option<Action>,
}

impl Deferred {
    pub fn new<F>(label: impl Into<String>, action: F) -> Self
    where
        F: FnOnce() -> Result<()> + 'static,
    {
        Self {
            label: label.into(),
            action: Some(Box::new(action)),
        }
    }

    /// Drop the action without running it
    pub fn cancel(&mut self) {
        self.action = None;
    }

    pub fn is_armed(&self) -> bool {
        self.action.is_some()
    }
}

impl Resource for Deferred {
    fn label(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.label)
    }

    fn close(&mut self) -> Result<()> {
        match self.action.take() {
            Some(action) => action(),
            None => Ok(()),
        }
    }
}

impl std::fmt::Debug for Deferred {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Deferred")
            .field("label", &self.label)
            .field("armed", &self.is_armed())
            .finish()
    }
}
