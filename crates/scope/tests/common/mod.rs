//! Recording fixtures shared by the scope integration tests.
#![allow(dead_code)]

use std::borrow::Cow;
use std::cell::RefCell;
use std::rc::Rc;
use tryscope_core::{Error, Resource, Result};
use tryscope_scope::{Factory, Scope};

/// Shared, ordered log of labels.
#[derive(Clone, Default)]
pub struct EventLog(Rc<RefCell<Vec<String>>>);

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, label: &str) {
        self.0.borrow_mut().push(label.to_string());
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.borrow().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }
}

/// Resource that records its release and optionally fails it.
pub struct RecordingResource {
    label: String,
    releases: EventLog,
    fail_on_close: bool,
}

impl RecordingResource {
    pub fn new(label: &str, releases: &EventLog) -> Self {
        Self {
            label: label.to_string(),
            releases: releases.clone(),
            fail_on_close: false,
        }
    }

    pub fn failing(label: &str, releases: &EventLog) -> Self {
        Self {
            fail_on_close: true,
            ..Self::new(label, releases)
        }
    }

    pub fn touch(&self) -> &str {
        &self.label
    }
}

impl Resource for RecordingResource {
    fn label(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.label)
    }

    fn close(&mut self) -> Result<()> {
        self.releases.record(&self.label);
        if self.fail_on_close {
            Err(close_error(&self.label))
        } else {
            Ok(())
        }
    }
}

/// The error a failing `RecordingResource` reports.
pub fn close_error(label: &str) -> Error {
    Error::release(label, "launches an error on close")
}

/// How a test slot behaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotKind {
    Healthy,
    FailsOnClose,
    Absent,
    FailsToConstruct,
}

/// Build a raw factory for `kind`, logging every construction attempt.
pub fn factory<'a>(
    label: &str,
    kind: SlotKind,
    constructed: &EventLog,
    releases: &EventLog,
) -> Factory<'a> {
    let label = label.to_string();
    let constructed = constructed.clone();
    let releases = releases.clone();
    Box::new(move |_scope: &mut Scope<'_>| -> Result<Option<Box<dyn Resource>>> {
        constructed.record(&label);
        match kind {
            SlotKind::Healthy => Ok(Some(Box::new(RecordingResource::new(&label, &releases)))),
            SlotKind::FailsOnClose => Ok(Some(Box::new(RecordingResource::failing(
                &label, &releases,
            )))),
            SlotKind::Absent => Ok(None),
            SlotKind::FailsToConstruct => Err(Error::construction(&label, "refused to open")),
        }
    })
}
