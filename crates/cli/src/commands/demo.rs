//! The walkthrough scenarios.
//!
//! Each scenario narrates into a [`Transcript`] which is written to `out`
//! once the block has finished.

use super::Scenario;
use crate::resources::{AnotherCloseFailure, AnotherResource, CloseFailure, MyResource, Transcript};
use crate::CommandResult;
use std::io::Write;
use tryscope_core::{Error, Failure, Outcome};
use tryscope_scope::ScopedBlock;

pub fn execute(scenario: Scenario, out: &mut dyn Write) -> CommandResult<()> {
    for (position, scenario) in scenario.expand().iter().enumerate() {
        if position > 0 {
            writeln!(out).map_err(Error::from)?;
        }
        let transcript = Transcript::new();
        run(*scenario, &transcript);
        transcript.flush_to(out).map_err(Error::from)?;
    }
    Ok(())
}

/// Run one concrete scenario, narrating into `transcript`.
pub fn run(scenario: Scenario, transcript: &Transcript) {
    match scenario {
        Scenario::Absent => absent(transcript),
        Scenario::Order => order(transcript),
        Scenario::Suppressed => suppressed(transcript),
        Scenario::All => {
            for scenario in Scenario::All.expand() {
                run(*scenario, transcript);
            }
        }
    }
}

/// An absent slot is neither released nor an error.
fn absent(transcript: &Transcript) {
    let outcome = ScopedBlock::new("absent")
        .acquire(|| Ok(MyResource::new(transcript)))
        .acquire_optional(|| Ok(None::<MyResource>))
        .run(|_scope| {
            transcript.say("The block is doing something..");
            Ok(())
        });
    report(outcome, transcript);
}

/// Acquired left to right, released right to left.
fn order(transcript: &Transcript) {
    transcript.say("Create resources instance:");
    let outcome = ScopedBlock::new("order")
        .acquire(|| Ok(MyResource::new(transcript)))
        .acquire(|| Ok(AnotherResource::new(transcript)))
        .run(|_scope| {
            transcript.say("Finish the instances:");
            Ok(())
        });
    report(outcome, transcript);
}

/// Three close failures: the first one hit is primary, the rest are kept.
fn suppressed(transcript: &Transcript) {
    transcript.say("Test suppressed failures on resource release");
    let outcome = ScopedBlock::new("suppressed")
        .acquire(|| Ok(CloseFailure::new(1, transcript)))
        .acquire(|| Ok(MyResource::new(transcript)))
        .acquire(|| Ok(CloseFailure::new(2, transcript)))
        .acquire(|| Ok(AnotherCloseFailure::new(3, transcript)))
        .run(|_scope| {
            transcript.say("Do something...");
            Ok(())
        });
    report(outcome, transcript);
}

fn report(outcome: Outcome<()>, transcript: &Transcript) {
    if let Outcome::Failed(failure) = outcome {
        describe(&failure, transcript);
    }
}

fn describe(failure: &Failure, transcript: &Transcript) {
    transcript.say(format!("primary: {}", failure.primary()));
    for error in failure.suppressed() {
        transcript.say(format!("suppressed: {error}"));
    }
}
