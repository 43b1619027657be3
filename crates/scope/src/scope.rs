//! The live resource list owned by a running block.

use std::marker::PhantomData;
use tryscope_core::{AsAny, Error, Resource, ResourceId, Result};
use tryscope_utils::tracing as events;

/// One declared position in the resource list.
struct Slot {
    id: ResourceId,
    resource: Option<Box<dyn Resource>>,
}

/// Resources acquired so far, in declaration order.
///
/// Factories see the scope as it stands when they run, so a later resource
/// can be built from an earlier one. The body sees every slot. Nothing can
/// move a resource out: the scope owns each one until it is released.
///
/// Every run gets a scope branded with its own invariant lifetime, so the
/// scopes of nested blocks have distinct types and cannot be swapped:
///
/// ```compile_fail
/// use tryscope_scope::ScopedBlock;
///
/// let _ = ScopedBlock::new("outer").run(|outer| {
///     ScopedBlock::new("inner")
///         .run(|inner| {
///             std::mem::swap(outer, inner);
///             Ok(())
///         })
///         .into_result()
///         .map_err(|failure| failure.into_primary())
/// });
/// ```
pub struct Scope<'brand> {
    name: String,
    slots: Vec<Slot>,
    released: Vec<ResourceId>,
    skipped: Vec<ResourceId>,
    _brand: PhantomData<fn(&'brand ()) -> &'brand ()>,
}

impl Scope<'_> {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            slots: Vec::new(),
            released: Vec::new(),
            skipped: Vec::new(),
            _brand: PhantomData,
        }
    }

    /// Name of the block this scope belongs to
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of declared slots, absent ones included
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Whether the slot at `index` holds a live resource
    pub fn is_present(&self, index: usize) -> bool {
        self.slots
            .get(index)
            .is_some_and(|slot| slot.resource.is_some())
    }

    /// Identities of every declared slot in declaration order
    pub fn ids(&self) -> impl Iterator<Item = &ResourceId> {
        self.slots.iter().map(|slot| &slot.id)
    }

    /// Borrow the resource at `index` as its concrete type.
    pub fn get<R: Resource + 'static>(&self, index: usize) -> Result<&R> {
        let resource = self.live(index)?;
        AsAny::as_any(resource)
            .downcast_ref::<R>()
            .ok_or_else(|| type_mismatch::<R>(index, resource))
    }

    /// Mutably borrow the resource at `index` as its concrete type.
    pub fn get_mut<R: Resource + 'static>(&mut self, index: usize) -> Result<&mut R> {
        let slot = self
            .slots
            .get_mut(index)
            .ok_or_else(|| out_of_range(index))?;
        let resource = slot
            .resource
            .as_deref_mut()
            .ok_or_else(|| Error::resource_unavailable(index, "slot is absent"))?;

        if !AsAny::as_any(&*resource).is::<R>() {
            return Err(type_mismatch::<R>(index, &*resource));
        }
        AsAny::as_any_mut(resource)
            .downcast_mut::<R>()
            .ok_or_else(|| Error::resource_unavailable(index, "downcast failed"))
    }

    fn live(&self, index: usize) -> Result<&dyn Resource> {
        let slot = self.slots.get(index).ok_or_else(|| out_of_range(index))?;
        slot.resource
            .as_deref()
            .ok_or_else(|| Error::resource_unavailable(index, "slot is absent"))
    }

    /// Register the next slot and return its identity.
    pub(crate) fn push(&mut self, resource: Option<Box<dyn Resource>>) -> ResourceId {
        let index = self.slots.len();
        let id = match &resource {
            Some(resource) => ResourceId::new(index, resource.label()),
            None => ResourceId::absent(index),
        };
        self.slots.push(Slot {
            id: id.clone(),
            resource,
        });
        id
    }

    /// Release every slot in reverse declaration order.
    ///
    /// Returns the release failures in the order they were encountered.
    /// A failing release never stops the ones after it. `has_primary`
    /// only affects how failures are logged.
    pub(crate) fn release_all(&mut self, has_primary: bool) -> Vec<Error> {
        let mut failures = Vec::new();

        while let Some(slot) = self.slots.pop() {
            let Some(mut resource) = slot.resource else {
                events::resource_absent(slot.id.index, "release");
                self.skipped.push(slot.id);
                continue;
            };

            let result = resource.close();
            drop(resource);

            match result {
                Ok(()) => events::resource_released(&slot.id),
                Err(error) => {
                    let suppressed = has_primary || !failures.is_empty();
                    events::release_failed(&slot.id, &error, suppressed);
                    failures.push(error);
                }
            }
            self.released.push(slot.id);
        }

        failures
    }

    /// Hand over the release and skip logs collected so far.
    pub(crate) fn take_logs(&mut self) -> (Vec<ResourceId>, Vec<ResourceId>) {
        (
            std::mem::take(&mut self.released),
            std::mem::take(&mut self.skipped),
        )
    }
}

impl Drop for Scope<'_> {
    // Slots only survive to here when a factory or the body panicked.
    fn drop(&mut self) {
        while let Some(slot) = self.slots.pop() {
            let Some(mut resource) = slot.resource else {
                continue;
            };
            match resource.close() {
                Ok(()) => events::resource_released(&slot.id),
                Err(error) => events::release_failed_unwinding(&slot.id, &error),
            }
        }
    }
}

impl std::fmt::Debug for Scope<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scope")
            .field("name", &self.name)
            .field("slots", &self.ids().collect::<Vec<_>>())
            .finish()
    }
}

fn out_of_range(index: usize) -> Error {
    Error::resource_unavailable(index, "no slot declared at this index")
}

fn type_mismatch<R>(index: usize, actual: &dyn Resource) -> Error {
    Error::resource_unavailable(
        index,
        format!(
            "slot holds '{}', not {}",
            actual.label(),
            std::any::type_name::<R>()
        ),
    )
}
