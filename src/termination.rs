//! Defines a `Termination` trait to turn the return value of a test body into an [`Outcome`].

use crate::{classify_panic, log, Outcome, Signal};
use std::panic::{self, AssertUnwindSafe};

/// A trait for the return types a test body may have.
///
/// This trait is analogous to the standard library's
/// [`Termination`](https://doc.rust-lang.org/std/process/trait.Termination.html). Rather than
/// producing an exit code, it produces the [`Outcome`] of the test.
///
/// It is implemented for `()`, which covers the standard test signature, for `Result<T, E>`,
/// which allows bodies like `fn foo() -> Result<(), Signal>` to use `?`, and for `Outcome<T>`
/// itself.
pub trait Termination {
    /// The value carried by a successful outcome.
    type Value;

    /// Converts the returned value into the outcome of the test.
    fn into_outcome(self) -> Outcome<Self::Value>;
}

impl Termination for () {
    type Value = ();

    fn into_outcome(self) -> Outcome<()> {
        Outcome::Success(())
    }
}

impl<T, E> Termination for Result<T, E>
where
    E: Into<Signal>,
{
    type Value = T;

    fn into_outcome(self) -> Outcome<T> {
        self.into()
    }
}

impl<T> Termination for Outcome<T> {
    type Value = T;

    fn into_outcome(self) -> Outcome<T> {
        self
    }
}

/// Runs a test body and returns its outcome.
///
/// A panic inside `body` does not escape. Its payload is classified, so a signal raised with
/// [`raise`](crate::raise()) or `std::panic::panic_any` produces the outcome that signal stands
/// for, while any other panic is reported as unexpected.
pub fn capture<F, R>(body: F) -> Outcome<R::Value>
where
    F: FnOnce() -> R,
    R: Termination,
{
    match panic::catch_unwind(AssertUnwindSafe(body)) {
        Ok(returned) => returned.into_outcome(),
        Err(payload) => {
            log::debug!("test body panicked");
            classify_panic(payload)
        }
    }
}
