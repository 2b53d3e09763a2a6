//! Outcomes of test cases, and their rendering for a console test reporter.
//!
//! Every test run produces exactly one [`Outcome`]. A test body either produces a value, which
//! becomes [`Outcome::Success`], or raises a [`Signal`], which [`classify`] turns into the
//! outcome it stands for: an assertion failure, a skipped or canceled test, or an unexpected
//! error.
//!
//! Outcomes compose. [`Outcome::transform`] and [`Outcome::chain`] run further steps on a
//! successful value, stop at the first non-success, and turn anything a step raises into an
//! unexpected error instead of letting it escape.
//!
//! ```
//! use test_outcome::{capture, AssertionFailed, Location, Outcome, Palette, Signal};
//!
//! let outcome = capture(|| -> Result<u32, Signal> { Ok("2".parse::<u32>()?) })
//!     .transform(|value| value * 2)
//!     .chain(|value| {
//!         if value == 4 {
//!             Outcome::Success(value)
//!         } else {
//!             Err::<u32, _>(AssertionFailed::at(
//!                 format!("expected 4 but got {value}"),
//!                 Location::new("doubling.rs", 12),
//!             ))
//!             .into()
//!         }
//!     });
//!
//! assert_eq!(outcome, Outcome::Success(4));
//! assert_eq!(outcome.render("doubling", &Palette::Plain).trim_end(), "- doubling");
//! ```
//!
//! Rendering goes through a [`Styling`], so reporters writing somewhere other than a color
//! terminal can use [`Palette::Plain`] or a styling of their own.

mod classify;
mod location;
mod log;
mod outcome;
mod report;
mod signal;
mod style;
mod termination;

pub use classify::{classify, classify_panic};
pub use location::Location;
pub use outcome::Outcome;
pub use signal::{raise, AssertionFailed, Cancel, Ignore, Panic, Signal, UnexpectedError};
pub use style::{Palette, Styling};
pub use termcolor::ColorChoice;
pub use termination::{capture, Termination};
