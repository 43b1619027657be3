//! The resource contract managed by a scoped block.

use crate::errors::{Error, Result};
use std::any::Any;
use std::borrow::Cow;
use std::fmt;
use std::io::{BufWriter, Write};

/// Upcast helper so a `dyn Resource` can be downcast to its concrete type.
///
/// Implemented for every `'static` type; resources never implement it by hand.
pub trait AsAny {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Anything with a single, fallible release operation.
///
/// Construction is the factory's business; a block only ever calls
/// [`Resource::close`], and it calls it at most once per instance.
pub trait Resource: AsAny {
    /// Human readable identity used in logs and release reports.
    fn label(&self) -> Cow<'_, str> {
        Cow::Borrowed(short_type_name::<Self>())
    }

    /// Release the resource.
    fn close(&mut self) -> Result<()>;
}

impl fmt::Debug for dyn Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Resource").field(&self.label()).finish()
    }
}

/// Buffered writers release by flushing whatever is still buffered.
impl<W: Write + 'static> Resource for BufWriter<W> {
    fn label(&self) -> Cow<'_, str> {
        Cow::Borrowed("BufWriter")
    }

    fn close(&mut self) -> Result<()> {
        self.flush()
            .map_err(|e| Error::release_with_source("BufWriter", "flush failed", e))
    }
}

/// Identity of a declared slot: its declaration position and label.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceId {
    pub index: usize,
    pub label: String,
}

impl ResourceId {
    /// Label recorded for slots whose factory produced nothing
    pub const ABSENT: &'static str = "<absent>";

    pub fn new(index: usize, label: impl Into<String>) -> Self {
        Self {
            index,
            label: label.into(),
        }
    }

    pub fn absent(index: usize) -> Self {
        Self::new(index, Self::ABSENT)
    }

    pub fn is_absent(&self) -> bool {
        self.label == Self::ABSENT
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {}", self.index, self.label)
    }
}

/// `tryscope::demo::MyResource` -> `MyResource`, keeping generic arguments intact.
fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let path = full.split('<').next().unwrap_or(full);
    match path.rfind("::") {
        Some(pos) => &full[pos + 2..],
        None => full,
    }
}
