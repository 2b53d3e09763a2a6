//! Translation of raised signals into outcomes.

use crate::{log, AssertionFailed, Cancel, Ignore, Outcome, Signal, UnexpectedError};
use std::any::Any;

/// Determines the outcome a raised signal represents.
///
/// The signal's type is checked in a fixed order:
///
/// 1. [`AssertionFailed`] becomes [`Outcome::Failure`], keeping the signal as its cause.
/// 2. [`UnexpectedError`] becomes [`Outcome::Unexpected`] with the wrapped cause.
/// 3. [`Ignore`] becomes [`Outcome::Ignored`].
/// 4. [`Cancel`] becomes [`Outcome::Canceled`].
/// 5. Anything else becomes [`Outcome::Unexpected`] without a location.
///
/// Every signal maps to exactly one outcome, and this function never panics.
pub fn classify<T>(signal: Signal) -> Outcome<T> {
    log::trace!("classifying signal of type {}", signal.type_name());
    let outcome = if let Some(failure) = signal.downcast_ref::<AssertionFailed>() {
        Outcome::Failure {
            message: failure.message().to_owned(),
            cause: Some(signal.clone()),
            location: Some(failure.location().clone()),
        }
    } else if let Some(error) = signal.downcast_ref::<UnexpectedError>() {
        Outcome::Unexpected {
            cause: error.cause().clone(),
            location: Some(error.location().clone()),
        }
    } else if let Some(ignore) = signal.downcast_ref::<Ignore>() {
        Outcome::Ignored {
            reason: ignore.reason().map(ToOwned::to_owned),
            location: ignore.location().cloned(),
        }
    } else if let Some(cancel) = signal.downcast_ref::<Cancel>() {
        Outcome::Canceled {
            reason: cancel.reason().map(ToOwned::to_owned),
            location: cancel.location().cloned(),
        }
    } else {
        Outcome::Unexpected {
            cause: signal,
            location: None,
        }
    };
    log::trace!("classified signal as {}", outcome.as_str());
    outcome
}

/// Determines the outcome represented by the payload of a caught panic.
///
/// The payload is first converted with [`Signal::from_panic`].
pub fn classify_panic<T>(payload: Box<dyn Any + Send>) -> Outcome<T> {
    classify(Signal::from_panic(payload))
}

#[cfg(test)]
mod tests {
    use super::{classify, classify_panic};
    use crate::{AssertionFailed, Cancel, Ignore, Location, Outcome, Signal, UnexpectedError};
    use claims::{assert_matches, assert_none, assert_some_eq};
    use std::io;

    #[test]
    fn assertion_failed() {
        let signal = Signal::new(AssertionFailed::at(
            "expected 1 but got 2",
            Location::new("Spec.scala", 42),
        ));
        let outcome = classify::<()>(signal.clone());

        assert_eq!(
            outcome,
            Outcome::Failure {
                message: "expected 1 but got 2".to_owned(),
                cause: Some(signal),
                location: Some(Location::new("Spec.scala", 42)),
            }
        );
        assert_some_eq!(outcome.location(), &Location::new("Spec.scala", 42));
    }

    #[test]
    fn unexpected_error_unwraps_cause() {
        let cause = Signal::new(io::Error::new(io::ErrorKind::Other, "boom"));
        let signal = Signal::new(UnexpectedError::at(cause.clone(), Location::new("a.rs", 3)));
        let outcome = classify::<()>(signal);

        assert_matches!(&outcome, Outcome::Unexpected { cause: inner, .. } if *inner == cause);
        assert_some_eq!(outcome.location(), &Location::new("a.rs", 3));
    }

    #[test]
    fn ignore() {
        let outcome = classify::<()>(Signal::new(Ignore::new()));

        assert_matches!(
            outcome,
            Outcome::Ignored {
                reason: None,
                location: None
            }
        );
    }

    #[test]
    fn ignore_with_reason_and_location() {
        let outcome = classify::<()>(Signal::new(
            Ignore::new()
                .with_reason("too slow")
                .at(Location::new("a.rs", 9)),
        ));

        assert_matches!(&outcome, Outcome::Ignored { reason: Some(reason), .. } if reason == "too slow");
        assert_some_eq!(outcome.location(), &Location::new("a.rs", 9));
    }

    #[test]
    fn cancel() {
        let outcome = classify::<()>(Signal::new(Cancel::new().with_reason("stop")));

        assert_matches!(&outcome, Outcome::Canceled { reason: Some(reason), location: None } if reason == "stop");
    }

    #[test]
    fn unrecognized() {
        let signal = Signal::new(io::Error::new(io::ErrorKind::Other, "boom"));
        let outcome = classify::<u8>(signal.clone());

        assert_eq!(
            outcome,
            Outcome::Unexpected {
                cause: signal,
                location: None,
            }
        );
        assert_none!(outcome.location());
    }

    #[test]
    fn panic_message() {
        let outcome = classify_panic::<()>(Box::new("boom"));

        assert_matches!(&outcome, Outcome::Unexpected { cause, location: None } if cause.message() == "boom");
    }

    #[test]
    fn panic_with_signal() {
        let outcome = classify_panic::<()>(Box::new(Signal::new(Cancel::new())));

        assert_matches!(outcome, Outcome::Canceled { .. });
    }

    #[test]
    fn panic_with_assertion() {
        let outcome = classify_panic::<()>(Box::new(AssertionFailed::new("foo")));

        assert_matches!(&outcome, Outcome::Failure { message, cause: Some(_), .. } if message == "foo");
    }
}
