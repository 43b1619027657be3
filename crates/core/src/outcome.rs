//! What a scoped block hands back once every resource has been released.

use crate::errors::Error;
use std::fmt;

/// A primary failure plus every failure suppressed behind it.
///
/// The primary is the first failure the block observed: a construction
/// failure, the body's failure, or the first release failure when nothing
/// failed before the release phase. Every later release failure is kept in
/// `suppressed`, in the order it was encountered.
#[derive(Debug)]
pub struct Failure {
    primary: Error,
    suppressed: Vec<Error>,
}

impl Failure {
    pub fn from_primary(primary: Error) -> Self {
        Self {
            primary,
            suppressed: Vec::new(),
        }
    }

    pub fn push_suppressed(&mut self, error: Error) {
        self.suppressed.push(error);
    }

    pub fn primary(&self) -> &Error {
        &self.primary
    }

    pub fn suppressed(&self) -> &[Error] {
        &self.suppressed
    }

    /// Every failure, primary first, then suppressed in encounter order.
    pub fn iter(&self) -> impl Iterator<Item = &Error> {
        std::iter::once(&self.primary).chain(self.suppressed.iter())
    }

    /// Total number of failures carried, never zero.
    pub fn len(&self) -> usize {
        1 + self.suppressed.len()
    }

    pub fn into_parts(self) -> (Error, Vec<Error>) {
        (self.primary, self.suppressed)
    }

    /// Drop the suppressed list and keep only the primary error.
    pub fn into_primary(self) -> Error {
        self.primary
    }
}

impl From<Error> for Failure {
    fn from(primary: Error) -> Self {
        Self::from_primary(primary)
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.primary)?;
        match self.suppressed.len() {
            0 => Ok(()),
            count => {
                write!(f, " ({count} suppressed)")?;
                for error in &self.suppressed {
                    write!(f, "\n  suppressed: {error}")?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for Failure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.primary)
    }
}

/// Result of running a scoped block.
#[derive(Debug)]
#[must_use = "an Outcome may carry release failures that would otherwise be lost"]
pub enum Outcome<T> {
    /// Body succeeded and every resource released cleanly
    Completed(T),
    /// At least one failure occurred during acquisition, body or release
    Failed(Failure),
}

impl<T> Outcome<T> {
    pub fn is_completed(&self) -> bool {
        matches!(self, Outcome::Completed(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Outcome::Failed(_))
    }

    pub fn failure(&self) -> Option<&Failure> {
        match self {
            Outcome::Completed(_) => None,
            Outcome::Failed(failure) => Some(failure),
        }
    }

    pub fn map<U, F>(self, f: F) -> Outcome<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Outcome::Completed(value) => Outcome::Completed(f(value)),
            Outcome::Failed(failure) => Outcome::Failed(failure),
        }
    }

    pub fn into_result(self) -> Result<T, Failure> {
        match self {
            Outcome::Completed(value) => Ok(value),
            Outcome::Failed(failure) => Err(failure),
        }
    }
}

impl<T> From<Outcome<T>> for Result<T, Failure> {
    fn from(outcome: Outcome<T>) -> Self {
        outcome.into_result()
    }
}
