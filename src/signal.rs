//! Raised conditions and the signal types the classifier recognizes.
//!
//! A test body "raises" by returning `Err` or by panicking. Either way, what was raised ends up
//! as a [`Signal`]: a shared handle to the error, along with the name of its concrete type and
//! the stack frames captured when it was created. The [`classify`](crate::classify()) function
//! then decides which [`Outcome`](crate::Outcome) the signal represents.
//!
//! Four signal types carry meaning beyond "something went wrong":
//!
//! - [`AssertionFailed`]: an assertion did not hold.
//! - [`UnexpectedError`]: an error that should be reported at a particular location.
//! - [`Ignore`]: the test asked to be skipped.
//! - [`Cancel`]: the test aborted itself.
//!
//! Everything else, including plain panics (see [`Panic`]), is reported as unexpected.

use crate::Location;
use std::{
    any::{type_name, Any},
    backtrace::{Backtrace, BacktraceStatus},
    error::Error as StdError,
    fmt,
    fmt::{Debug, Display, Write as _},
    panic::{self, RefUnwindSafe, UnwindSafe},
    sync::Arc,
};
use thiserror::Error;

/// A raised error, shared cheaply between outcomes.
///
/// Any type implementing [`std::error::Error`] converts into a `Signal`, which means `?` works
/// inside test bodies returning `Result<T, Signal>`.
///
/// Two signals compare equal only if they are handles to the same raised error.
#[derive(Clone)]
pub struct Signal {
    inner: Arc<Inner>,
}

struct Inner {
    error: Box<dyn StdError + Send + Sync>,
    type_name: &'static str,
    frames: Vec<String>,
}

impl Signal {
    /// Wraps an error, capturing the current stack.
    ///
    /// Stack capture follows the `RUST_BACKTRACE` and `RUST_LIB_BACKTRACE` environment
    /// variables. If capturing is disabled, the signal has no frames.
    pub fn new<E>(error: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self::with_frames(error, frames(&Backtrace::capture()))
    }

    /// Wraps an error with stack frames supplied by the caller.
    pub fn with_frames<E, I>(error: E, frames: I) -> Self
    where
        E: StdError + Send + Sync + 'static,
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self {
            inner: Arc::new(Inner {
                error: Box::new(error),
                type_name: type_name::<E>(),
                frames: frames.into_iter().map(Into::into).collect(),
            }),
        }
    }

    /// Converts the payload of a caught panic into a signal.
    ///
    /// A payload that already is a `Signal` is returned as is, and payloads of the recognized
    /// signal types are wrapped without losing their type. Any other payload becomes a
    /// [`Panic`], keeping the panic message when there is one.
    pub fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        payload
            .downcast::<Signal>()
            .map(|signal| *signal)
            .or_else(take::<AssertionFailed>)
            .or_else(take::<UnexpectedError>)
            .or_else(take::<Ignore>)
            .or_else(take::<Cancel>)
            .unwrap_or_else(|payload| {
                let message = if let Some(message) = payload.downcast_ref::<&str>() {
                    (*message).to_owned()
                } else if let Some(message) = payload.downcast_ref::<String>() {
                    message.clone()
                } else {
                    "Box<dyn Any>".to_owned()
                };
                Self::new(Panic { message })
            })
    }

    /// The full path of the wrapped error's type.
    pub fn type_name(&self) -> &'static str {
        self.inner.type_name
    }

    /// The wrapped error's type name without generic arguments or module prefixes.
    pub fn short_type_name(&self) -> &'static str {
        short_type_name(self.inner.type_name)
    }

    /// The wrapped error's display message.
    ///
    /// If the error's `Display` implementation fails, the message is empty.
    pub fn message(&self) -> String {
        let mut message = String::new();
        if write!(message, "{}", self.inner.error).is_err() {
            message.clear();
        }
        message
    }

    /// The stack frames captured for this signal, outermost call last.
    pub fn frames(&self) -> &[String] {
        &self.inner.frames
    }

    /// Returns a reference to the wrapped error if it is of type `E`.
    pub fn downcast_ref<E>(&self) -> Option<&E>
    where
        E: StdError + 'static,
    {
        self.inner.error.downcast_ref::<E>()
    }

    /// Returns `true` if the wrapped error is of type `E`.
    pub fn is<E>(&self) -> bool
    where
        E: StdError + 'static,
    {
        self.inner.error.is::<E>()
    }
}

impl<E> From<E> for Signal
where
    E: StdError + Send + Sync + 'static,
{
    fn from(error: E) -> Self {
        Self::new(error)
    }
}

impl PartialEq for Signal {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for Signal {}

// The wrapped error is never mutated after the signal is created.
impl UnwindSafe for Signal {}
impl RefUnwindSafe for Signal {}

impl Debug for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("type_name", &self.inner.type_name)
            .field("error", &self.inner.error)
            .field("frames", &self.inner.frames.len())
            .finish()
    }
}

impl Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.inner.error, f)
    }
}

/// Raises a signal from anywhere inside a test body.
///
/// This unwinds the stack with the signal as the payload. Unlike `panic!`, the panic hook is not
/// invoked, so nothing is printed. The signal is recovered by [`capture`](crate::capture()) or
/// by the composition methods on [`Outcome`](crate::Outcome).
pub fn raise(signal: impl Into<Signal>) -> ! {
    panic::resume_unwind(Box::new(signal.into()))
}

/// An assertion did not hold.
#[derive(Clone, Debug, Error)]
#[error("{message}")]
pub struct AssertionFailed {
    message: String,
    location: Location,
}

impl AssertionFailed {
    /// Creates an assertion failure located at the caller.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        Self::at(message, Location::caller())
    }

    /// Creates an assertion failure at the given location.
    pub fn at(message: impl Into<String>, location: Location) -> Self {
        Self {
            message: message.into(),
            location,
        }
    }

    /// The failure message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Where the assertion failed.
    pub fn location(&self) -> &Location {
        &self.location
    }
}

/// An error that should be reported as unexpected at a specific location.
///
/// The wrapped cause is what ends up in the resulting outcome; this wrapper only contributes
/// the location.
#[derive(Clone, Debug, Error)]
#[error("{cause}")]
pub struct UnexpectedError {
    cause: Signal,
    location: Location,
}

impl UnexpectedError {
    /// Wraps a cause, located at the caller.
    #[track_caller]
    pub fn new(cause: impl Into<Signal>) -> Self {
        Self::at(cause, Location::caller())
    }

    /// Wraps a cause at the given location.
    pub fn at(cause: impl Into<Signal>, location: Location) -> Self {
        Self {
            cause: cause.into(),
            location,
        }
    }

    /// The wrapped cause.
    pub fn cause(&self) -> &Signal {
        &self.cause
    }

    /// Where the error was reported.
    pub fn location(&self) -> &Location {
        &self.location
    }
}

/// The test should be skipped.
#[derive(Clone, Debug, Default, Error)]
#[error("test ignored")]
pub struct Ignore {
    reason: Option<String>,
    location: Option<Location>,
}

impl Ignore {
    /// An ignore signal with neither reason nor location.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches the reason for the skip.
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Attaches the location of the skip.
    pub fn at(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    /// The reason for the skip, if one was given.
    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }

    /// Where the skip happened, if known.
    pub fn location(&self) -> Option<&Location> {
        self.location.as_ref()
    }
}

/// The test aborted itself.
#[derive(Clone, Debug, Default, Error)]
#[error("test canceled")]
pub struct Cancel {
    reason: Option<String>,
    location: Option<Location>,
}

impl Cancel {
    /// A cancellation signal with neither reason nor location.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches the reason for the cancellation.
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Attaches the location of the cancellation.
    pub fn at(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    /// The reason for the cancellation, if one was given.
    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }

    /// Where the cancellation happened, if known.
    pub fn location(&self) -> Option<&Location> {
        self.location.as_ref()
    }
}

/// A panic whose payload was not a signal.
#[derive(Clone, Debug, Error)]
#[error("{message}")]
pub struct Panic {
    message: String,
}

impl Panic {
    /// The panic message, or `Box<dyn Any>` if the payload had none.
    pub fn message(&self) -> &str {
        &self.message
    }
}

fn take<E>(payload: Box<dyn Any + Send>) -> Result<Signal, Box<dyn Any + Send>>
where
    E: StdError + Send + Sync + 'static,
{
    payload.downcast::<E>().map(|error| Signal::new(*error))
}

/// Strips generic arguments and module prefixes from a type name.
fn short_type_name(name: &str) -> &str {
    let name = name.split('<').next().unwrap_or(name);
    name.rsplit("::").next().unwrap_or(name)
}

fn frames(backtrace: &Backtrace) -> Vec<String> {
    if backtrace.status() == BacktraceStatus::Captured {
        skip_internal(parse_frames(&backtrace.to_string()))
    } else {
        Vec::new()
    }
}

/// Drops the leading frames spent inside backtrace capture and signal construction, so the
/// trace starts where the error was raised.
fn skip_internal(frames: Vec<String>) -> Vec<String> {
    frames
        .into_iter()
        .skip_while(|frame| is_internal(frame))
        .collect()
}

fn is_internal(frame: &str) -> bool {
    let path = frame.strip_prefix('<').unwrap_or(frame);
    path.starts_with("std::backtrace")
        || path.starts_with(module_path!())
        || path.starts_with("core::convert::")
        || path.starts_with("T as core::convert::")
        || (path.starts_with("core::result::Result") && path.contains("FromResidual"))
}

/// Splits a rendered backtrace into one line per frame.
///
/// Each frame starts with its index (`  3: symbol`). The `at file:line:col` line that follows a
/// symbol is joined onto it.
fn parse_frames(rendered: &str) -> Vec<String> {
    let mut frames: Vec<String> = Vec::new();
    for line in rendered.lines().map(str::trim) {
        if let Some((index, symbol)) = line.split_once(": ") {
            if !index.is_empty() && index.bytes().all(|byte| byte.is_ascii_digit()) {
                frames.push(symbol.to_owned());
                continue;
            }
        }
        if let (Some(frame), Some(position)) = (frames.last_mut(), line.strip_prefix("at ")) {
            frame.push_str(" at ");
            frame.push_str(position);
        }
    }
    frames
}
