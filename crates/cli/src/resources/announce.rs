//! Resources that narrate their own lifecycle, for the `demo` walkthrough.

use std::borrow::Cow;
use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;
use tryscope_core::{Error, Resource, Result};

/// Shared, ordered record of what the demo resources said.
#[derive(Debug, Clone, Default)]
pub struct Transcript(Rc<RefCell<Vec<String>>>);

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn say(&self, line: impl Into<String>) {
        self.0.borrow_mut().push(line.into());
    }

    pub fn lines(&self) -> Vec<String> {
        self.0.borrow().clone()
    }

    /// Write and forget everything said so far.
    pub fn flush_to(&self, out: &mut dyn Write) -> io::Result<()> {
        for line in self.0.borrow_mut().drain(..) {
            writeln!(out, "{line}")?;
        }
        Ok(())
    }
}

pub struct MyResource {
    transcript: Transcript,
}

impl MyResource {
    pub fn new(transcript: &Transcript) -> Self {
        transcript.say("(MyResource) There we go!");
        Self {
            transcript: transcript.clone(),
        }
    }
}

impl Resource for MyResource {
    fn close(&mut self) -> Result<()> {
        self.transcript.say("(MyResource) It's over!");
        Ok(())
    }
}

pub struct AnotherResource {
    transcript: Transcript,
}

impl AnotherResource {
    pub fn new(transcript: &Transcript) -> Self {
        transcript.say("(AnotherResource) My turn!");
        Self {
            transcript: transcript.clone(),
        }
    }
}

impl Resource for AnotherResource {
    fn close(&mut self) -> Result<()> {
        self.transcript.say("(AnotherResource) Ok I'm done...");
        Ok(())
    }
}

macro_rules! failing_resource {
    ($name:ident) => {
        /// Always fails to close.
        pub struct $name {
            order: u32,
        }

        impl $name {
            pub fn new(order: u32, transcript: &Transcript) -> Self {
                transcript.say(format!(
                    "({}) I'm {}{}, I will fail on close!",
                    stringify!($name),
                    stringify!($name),
                    order
                ));
                Self { order }
            }
        }

        impl Resource for $name {
            fn label(&self) -> Cow<'_, str> {
                Cow::Owned(format!("{}{}", stringify!($name), self.order))
            }

            fn close(&mut self) -> Result<()> {
                Err(Error::release(self.label(), "fails on close"))
            }
        }
    };
}

failing_resource!(CloseFailure);
failing_resource!(AnotherCloseFailure);
