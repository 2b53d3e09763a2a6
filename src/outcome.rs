//! The outcome of a single test.

use crate::{classify, log, report::Report, Location, Palette, Signal, Styling};
use std::panic::{self, AssertUnwindSafe};

/// The outcome of a test.
///
/// Only [`Success`](Outcome::Success) carries a value. Every other variant describes why the
/// test did not produce one, and can therefore stand in for an outcome of any value type.
///
/// Outcomes compare equal when they are the same variant with the same payload. Locations are
/// not compared, and causes are compared by identity.
#[derive(Clone, Debug)]
pub enum Outcome<T> {
    /// The test completed and produced a value.
    Success(T),
    /// The test was skipped before running.
    Ignored {
        reason: Option<String>,
        location: Option<Location>,
    },
    /// The test aborted itself while running.
    Canceled {
        reason: Option<String>,
        location: Option<Location>,
    },
    /// An assertion did not hold.
    Failure {
        message: String,
        cause: Option<Signal>,
        location: Option<Location>,
    },
    /// Something went wrong that no assertion anticipated.
    ///
    /// This includes errors raised by a step composed with [`transform`](Outcome::transform)
    /// or [`chain`](Outcome::chain).
    Unexpected {
        cause: Signal,
        location: Option<Location>,
    },
}

impl<T> Outcome<T> {
    /// Applies `f` to the value of a successful outcome.
    ///
    /// If `f` panics, the panic is caught and the result is [`Outcome::Unexpected`] with the
    /// panic as its cause and no location. Any other outcome is returned unchanged, and `f` is
    /// not called.
    pub fn transform<U, F>(self, f: F) -> Outcome<U>
    where
        F: FnOnce(T) -> U,
    {
        match self.split() {
            Ok(value) => match panic::catch_unwind(AssertUnwindSafe(|| f(value))) {
                Ok(value) => Outcome::Success(value),
                Err(payload) => Outcome::trapped(payload),
            },
            Err(outcome) => outcome,
        }
    }

    /// Continues a successful outcome with a step that produces its own outcome.
    ///
    /// The outcome returned by `f` is returned as is. If `f` panics, the result is
    /// [`Outcome::Unexpected`] with the panic as its cause and no location. Any other outcome is
    /// returned unchanged, and `f` is not called.
    pub fn chain<U, F>(self, f: F) -> Outcome<U>
    where
        F: FnOnce(T) -> Outcome<U>,
    {
        match self.split() {
            Ok(value) => match panic::catch_unwind(AssertUnwindSafe(|| f(value))) {
                Ok(outcome) => outcome,
                Err(payload) => Outcome::trapped(payload),
            },
            Err(outcome) => outcome,
        }
    }

    /// Applies a fallible `f` to the value of a successful outcome.
    ///
    /// An error returned by `f` is treated exactly like a panic in
    /// [`transform`](Outcome::transform): it becomes the cause of an [`Outcome::Unexpected`]
    /// without a location.
    pub fn try_transform<U, E, F>(self, f: F) -> Outcome<U>
    where
        F: FnOnce(T) -> Result<U, E>,
        E: Into<Signal>,
    {
        match self.split() {
            Ok(value) => match panic::catch_unwind(AssertUnwindSafe(|| f(value))) {
                Ok(Ok(value)) => Outcome::Success(value),
                Ok(Err(error)) => Outcome::Unexpected {
                    cause: error.into(),
                    location: None,
                },
                Err(payload) => Outcome::trapped(payload),
            },
            Err(outcome) => outcome,
        }
    }

    /// Renders the outcome of the test called `name` using ANSI colors.
    pub fn format(&self, name: &str) -> String {
        self.render(name, &Palette::Ansi)
    }

    /// Renders the outcome of the test called `name` using the given styling.
    ///
    /// Every line, including the last, ends with the platform line terminator.
    pub fn render<S>(&self, name: &str, styling: &S) -> String
    where
        S: Styling + ?Sized,
    {
        let mut report = Report::new(styling);
        match self {
            Self::Success(_) => report.success(&format!("- {name}")),
            Self::Ignored { reason, location } => {
                report.warn(&format!("- {name} !!! IGNORED !!!"));
                if let Some(reason) = reason {
                    report.warn(&format!(
                        "  {reason}{}",
                        Location::suffix(location.as_ref())
                    ));
                }
            }
            Self::Canceled { reason, location } => {
                report.warn(&format!("- {name} !!! CANCELED !!!"));
                if let Some(reason) = reason {
                    report.warn(&format!(
                        "  {reason}{}",
                        Location::suffix(location.as_ref())
                    ));
                }
            }
            Self::Failure {
                message, location, ..
            } => {
                report.fail(&format!("- {name} *** FAILED ***"));
                report.fail(&format!(
                    "  {message}{}",
                    Location::suffix(location.as_ref())
                ));
            }
            Self::Unexpected { cause, location } => {
                report.fail(&format!("- {name} *** FAILED ***"));
                let message = cause.message();
                let detail = if message.is_empty() {
                    String::new()
                } else {
                    format!(": {message}")
                };
                report.fail(&format!(
                    "  {}{detail}{}",
                    cause.short_type_name(),
                    Location::suffix(location.as_ref())
                ));
                report.stack(cause.frames());
            }
        }
        report.finish()
    }

    /// A short word describing the outcome.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Success(_) => "ok",
            Self::Ignored { .. } => "ignored",
            Self::Canceled { .. } => "canceled",
            Self::Failure { .. } | Self::Unexpected { .. } => "FAILED",
        }
    }

    /// Whether the test succeeded.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Whether the test was skipped.
    pub fn is_ignored(&self) -> bool {
        matches!(self, Self::Ignored { .. })
    }

    /// Whether the test was canceled.
    pub fn is_canceled(&self) -> bool {
        matches!(self, Self::Canceled { .. })
    }

    /// Returns `true` for both assertion failures and unexpected errors.
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure { .. } | Self::Unexpected { .. })
    }

    /// Where the outcome originated, if known.
    pub fn location(&self) -> Option<&Location> {
        match self {
            Self::Success(_) => None,
            Self::Ignored { location, .. }
            | Self::Canceled { location, .. }
            | Self::Failure { location, .. }
            | Self::Unexpected { location, .. } => location.as_ref(),
        }
    }

    /// The error behind a failed outcome, if there is one.
    pub fn cause(&self) -> Option<&Signal> {
        match self {
            Self::Failure { cause, .. } => cause.as_ref(),
            Self::Unexpected { cause, .. } => Some(cause),
            _ => None,
        }
    }

    /// Converts into the success value, discarding any other outcome.
    pub fn success(self) -> Option<T> {
        self.split::<T>().ok()
    }

    /// Separates the success value from the other variants.
    ///
    /// Non-success variants carry no `T`, so they are moved into an outcome of any other type.
    fn split<U>(self) -> Result<T, Outcome<U>> {
        match self {
            Self::Success(value) => Ok(value),
            Self::Ignored { reason, location } => Err(Outcome::Ignored { reason, location }),
            Self::Canceled { reason, location } => Err(Outcome::Canceled { reason, location }),
            Self::Failure {
                message,
                cause,
                location,
            } => Err(Outcome::Failure {
                message,
                cause,
                location,
            }),
            Self::Unexpected { cause, location } => Err(Outcome::Unexpected { cause, location }),
        }
    }

    fn trapped(payload: Box<dyn std::any::Any + Send>) -> Self {
        let cause = Signal::from_panic(payload);
        log::debug!(
            "composed step raised {}: {}",
            cause.type_name(),
            cause.message()
        );
        Self::Unexpected {
            cause,
            location: None,
        }
    }
}

impl<T> PartialEq for Outcome<T>
where
    T: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Success(a), Self::Success(b)) => a == b,
            (Self::Ignored { reason: a, .. }, Self::Ignored { reason: b, .. })
            | (Self::Canceled { reason: a, .. }, Self::Canceled { reason: b, .. }) => a == b,
            (
                Self::Failure {
                    message: a,
                    cause: a_cause,
                    ..
                },
                Self::Failure {
                    message: b,
                    cause: b_cause,
                    ..
                },
            ) => a == b && a_cause == b_cause,
            (Self::Unexpected { cause: a, .. }, Self::Unexpected { cause: b, .. }) => a == b,
            _ => false,
        }
    }
}

impl<T> Eq for Outcome<T> where T: Eq {}

impl<T, E> From<Result<T, E>> for Outcome<T>
where
    E: Into<Signal>,
{
    /// `Ok` becomes a success, and `Err` is passed through [`classify`](crate::classify()).
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Self::Success(value),
            Err(error) => classify(error.into()),
        }
    }
}
