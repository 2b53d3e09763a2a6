//! End-to-end scenarios: a raised signal is classified and rendered for the console.

use claims::{assert_matches, assert_some_eq};
use std::{fmt, io};
use test_outcome::{
    capture, classify, raise, AssertionFailed, Cancel, Ignore, Location, Outcome, Palette, Signal,
    Styling, UnexpectedError,
};

const EOL: &str = if cfg!(windows) { "\r\n" } else { "\n" };

/// Marks each line with its tone, so tests can see which style was applied where.
struct Tagged;

impl Styling for Tagged {
    fn success(&self, text: &str) -> String {
        format!("[success]{text}")
    }

    fn warn(&self, text: &str) -> String {
        format!("[warn]{text}")
    }

    fn fail(&self, text: &str) -> String {
        format!("[fail]{text}")
    }
}

#[derive(Debug)]
struct Boom;

impl fmt::Display for Boom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("boom")
    }
}

impl std::error::Error for Boom {}

#[test]
fn assertion_failure_round_trip() {
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
    assert_eq!(
        outcome.format("my test"),
        format!(
            "{}{EOL}{}{EOL}",
            Palette::Ansi.fail("- my test *** FAILED ***"),
            Palette::Ansi.fail("  expected 1 but got 2 (Spec.scala:42)"),
        )
    );
}

#[test]
fn bare_ignore_renders_one_line() {
    let outcome = classify::<()>(Signal::new(Ignore::new()));

    assert_matches!(
        outcome,
        Outcome::Ignored {
            reason: None,
            location: None
        }
    );
    assert_eq!(
        outcome.format("skip me"),
        format!("{}{EOL}", Palette::Ansi.warn("- skip me !!! IGNORED !!!"))
    );
}

#[test]
fn unrecognized_error_without_frames() {
    let signal = Signal::with_frames(Boom, Vec::<String>::new());
    let outcome = classify::<()>(signal.clone());

    assert_eq!(
        outcome,
        Outcome::Unexpected {
            cause: signal,
            location: None,
        }
    );
    assert_eq!(
        outcome.render("explodes", &Tagged),
        format!("[fail]- explodes *** FAILED ***{EOL}[fail]  Boom: boom{EOL}{EOL}")
    );
}

#[test]
fn unexpected_error_keeps_location() {
    let cause = Signal::with_frames(io::Error::new(io::ErrorKind::Other, "disk full"), ["write"]);
    let outcome = classify::<()>(Signal::new(UnexpectedError::at(
        cause,
        Location::new("store.rs", 17),
    )));

    assert_eq!(
        outcome.render("saves", &Tagged),
        format!(
            "[fail]- saves *** FAILED ***{EOL}[fail]  Error: disk full (store.rs:17){EOL}[fail]    write{EOL}"
        )
    );
}

#[test]
fn canceled_with_reason() {
    let outcome = capture::<_, ()>(|| {
        raise(
            Cancel::new()
                .with_reason("server went away")
                .at(Location::new("net.rs", 5)),
        )
    });

    assert_eq!(
        outcome.render("fetches", &Tagged),
        format!("[warn]- fetches !!! CANCELED !!!{EOL}[warn]  server went away (net.rs:5){EOL}")
    );
}

#[test]
fn success_renders_name() {
    let outcome = capture(|| ());

    assert_eq!(
        outcome.render("adds", &Tagged),
        format!("[success]- adds{EOL}")
    );
}

#[test]
fn failed_pipeline_stops_and_renders_first_failure() {
    let outcome = capture(|| -> Result<u32, Signal> { Ok(1) })
        .chain(|value| -> Outcome<u32> {
            Err::<u32, _>(AssertionFailed::at(
                format!("expected 2 but got {value}"),
                Location::new("math.rs", 9),
            ))
            .into()
        })
        .transform(|_| -> u32 { panic!("must not run") })
        .chain(|_| -> Outcome<u32> { raise(Boom) });

    assert_eq!(
        outcome.render("pipeline", &Palette::Plain),
        format!("- pipeline *** FAILED ***{EOL}  expected 2 but got 1 (math.rs:9){EOL}")
    );
}

#[test]
fn failing_step_becomes_unexpected() {
    let outcome = Outcome::Success(3).transform(|_| -> u32 { raise(Boom) });

    assert_matches!(&outcome, Outcome::Unexpected { cause, location: None } if cause.is::<Boom>());
    assert!(outcome
        .render("steps", &Palette::Plain)
        .contains("  Boom: boom"));
}

#[test]
fn long_trace_is_truncated() {
    let frames: Vec<String> = (0..30).map(|index| format!("frame {index}")).collect();
    let outcome = classify::<()>(Signal::with_frames(Boom, frames));
    let rendered = outcome.render("deep", &Tagged);

    assert!(rendered.contains(&format!("[fail]    frame 19{EOL}[fail]    ...{EOL}")));
    assert!(!rendered.contains("frame 20"));
}
