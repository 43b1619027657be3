//! Driving a block: acquire left to right, run the body, release right to left.

use crate::deferred::Deferred;
use crate::report::BlockReport;
use crate::scope::Scope;
use tryscope_core::{BlockState, Error, Failure, Outcome, Resource, Result};
use tryscope_utils::tracing as events;

/// Produces the resource for one slot, or `None` for an absent slot.
///
/// The factory sees every resource acquired before it.
pub type Factory<'a> =
    Box<dyn FnOnce(&mut Scope<'_>) -> Result<Option<Box<dyn Resource>>> + 'a>;

/// Builder for a scoped block.
///
/// Slots are declared in acquisition order; [`ScopedBlock::run`] consumes
/// the builder, so a block cannot be entered twice.
pub struct ScopedBlock<'a> {
    name: String,
    factories: Vec<Factory<'a>>,
}

impl<'a> ScopedBlock<'a> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            factories: Vec::new(),
        }
    }

    /// Declare a resource built by `factory`.
    pub fn acquire<R, F>(self, factory: F) -> Self
    where
        R: Resource + 'static,
        F: FnOnce() -> Result<R> + 'a,
    {
        self.factory(Box::new(move |_scope: &mut Scope<'_>| {
            factory().map(|resource| Some(Box::new(resource) as Box<dyn Resource>))
        }))
    }

    /// Declare a slot whose factory may produce nothing.
    ///
    /// `Ok(None)` leaves the slot absent; it is skipped on release.
    pub fn acquire_optional<R, F>(self, factory: F) -> Self
    where
        R: Resource + 'static,
        F: FnOnce() -> Result<Option<R>> + 'a,
    {
        self.factory(Box::new(move |_scope: &mut Scope<'_>| {
            factory().map(|resource| resource.map(|r| Box::new(r) as Box<dyn Resource>))
        }))
    }

    /// Declare a resource built from the resources acquired before it.
    pub fn acquire_with<R, F>(self, factory: F) -> Self
    where
        R: Resource + 'static,
        F: FnOnce(&mut Scope<'_>) -> Result<R> + 'a,
    {
        self.factory(Box::new(move |scope: &mut Scope<'_>| {
            factory(scope).map(|resource| Some(Box::new(resource) as Box<dyn Resource>))
        }))
    }

    /// Declare an absent slot.
    pub fn absent(self) -> Self {
        self.factory(Box::new(
            |_scope: &mut Scope<'_>| -> Result<Option<Box<dyn Resource>>> { Ok(None) },
        ))
    }

    /// Register a cleanup action that runs when its slot is released.
    pub fn defer<F>(self, label: impl Into<String>, action: F) -> Self
    where
        F: FnOnce() -> Result<()> + 'static,
    {
        let deferred = Deferred::new(label, action);
        self.acquire(move || Ok(deferred))
    }

    /// Declare a slot from a raw factory.
    pub fn factory(mut self, factory: Factory<'a>) -> Self {
        self.factories.push(factory);
        self
    }

    /// Number of declared slots
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Run the block and return its outcome.
    pub fn run<T, B>(self, body: B) -> Outcome<T>
    where
        B: FnOnce(&mut Scope<'_>) -> Result<T>,
    {
        self.run_with_report(body).0
    }

    /// Run the block and also return a report of what it did.
    pub fn run_with_report<T, B>(self, body: B) -> (Outcome<T>, BlockReport)
    where
        B: FnOnce(&mut Scope<'_>) -> Result<T>,
    {
        execute(self.name, self.factories, body)
    }
}

impl std::fmt::Debug for ScopedBlock<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScopedBlock")
            .field("name", &self.name)
            .field("slots", &self.factories.len())
            .finish()
    }
}

/// Run `body` inside a block whose slots are produced by `factories`.
///
/// Factories are invoked strictly in order. The first failing factory ends
/// acquisition: everything acquired so far is released in reverse and the
/// body never runs. Otherwise the body runs exactly once. Either way every
/// acquired resource is released in reverse order, and failures are folded
/// into the returned [`Outcome`].
pub fn run_scoped<'a, T, B>(factories: Vec<Factory<'a>>, body: B) -> Outcome<T>
where
    B: FnOnce(&mut Scope<'_>) -> Result<T>,
{
    execute(String::from("scope"), factories, body).0
}

fn execute<'a, T, B>(name: String, factories: Vec<Factory<'a>>, body: B) -> (Outcome<T>, BlockReport)
where
    B: FnOnce(&mut Scope<'_>) -> Result<T>,
{
    let span = events::scope_span(&name, factories.len());
    let _entered = span.enter();

    let mut report = BlockReport::new(name.clone());
    let mut scope = Scope::new(name.clone());

    report.transition(BlockState::Acquiring);
    let pending = match acquire_all(&mut scope, &mut report, factories) {
        Err(error) => {
            report.transition(BlockState::AcquireFailed);
            Err(Failure::from_primary(error))
        }
        Ok(()) => {
            report.transition(BlockState::Acquired);
            report.transition(BlockState::RunningBody);
            body(&mut scope).map_err(Failure::from_primary)
        }
    };

    report.transition(BlockState::Releasing);
    let release_failures = scope.release_all(pending.is_err());
    let (released, skipped) = scope.take_logs();
    report.record_release_logs(released, skipped);
    report.transition(BlockState::Done);

    let outcome = settle(pending, release_failures);
    events::scope_completed(&name, outcome.failure().map_or(0, Failure::len));
    (outcome, report)
}

fn acquire_all(
    scope: &mut Scope<'_>,
    report: &mut BlockReport,
    factories: Vec<Factory<'_>>,
) -> Result<()> {
    for factory in factories {
        let index = scope.len();
        match factory(scope) {
            Ok(Some(resource)) => {
                let id = scope.push(Some(resource));
                events::resource_acquired(&id);
                report.record_acquired(id);
            }
            Ok(None) => {
                scope.push(None);
                events::resource_absent(index, "acquire");
            }
            Err(error) => {
                events::acquisition_failed(index, &error);
                return Err(error);
            }
        }
    }
    Ok(())
}

/// Fold release failures into whatever the acquisition and body produced.
///
/// An earlier failure stays primary and every release failure is suppressed
/// behind it. Without one, the first release failure becomes primary.
fn settle<T>(pending: std::result::Result<T, Failure>, release_failures: Vec<Error>) -> Outcome<T> {
    let mut release_failures = release_failures.into_iter();
    let mut failure = match pending {
        Err(failure) => failure,
        Ok(value) => match release_failures.next() {
            None => return Outcome::Completed(value),
            Some(primary) => Failure::from_primary(primary),
        },
    };
    for error in release_failures {
        failure.push_suppressed(error);
    }
    Outcome::Failed(failure)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settle_success_without_release_failures() {
        let outcome = settle(Ok(5), Vec::new());
        assert_eq!(outcome.into_result().unwrap(), 5);
    }

    #[test]
    fn test_settle_first_release_failure_is_primary() {
        let outcome = settle(
            Ok(()),
            vec![Error::release("R3", "first"), Error::release("R1", "second")],
        );
        let failure = outcome.into_result().unwrap_err();
        assert!(failure.primary().to_string().contains("'R3'"));
        assert_eq!(failure.suppressed().len(), 1);
        assert!(failure.suppressed()[0].to_string().contains("'R1'"));
    }

    #[test]
    fn test_settle_earlier_failure_stays_primary() {
        let outcome: Outcome<()> = settle(
            Err(Failure::from_primary(Error::body("body"))),
            vec![Error::release("R1", "close")],
        );
        let failure = outcome.into_result().unwrap_err();
        assert!(matches!(failure.primary(), Error::Body { .. }));
        assert_eq!(failure.suppressed().len(), 1);
    }

    #[test]
    fn test_empty_block_runs_body() {
        let block = ScopedBlock::new("empty");
        assert!(block.is_empty());
        let (outcome, report) = block.run_with_report(|scope| Ok(scope.len()));

        assert_eq!(outcome.into_result().unwrap(), 0);
        assert_eq!(
            report.states(),
            [
                BlockState::NotStarted,
                BlockState::Acquiring,
                BlockState::Acquired,
                BlockState::RunningBody,
                BlockState::Releasing,
                BlockState::Done,
            ]
        );
    }
}
