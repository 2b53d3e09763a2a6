//! Source positions attached to signals and outcomes.

use std::{borrow::Cow, fmt, fmt::Display, panic};

/// A position in a source file, displayed as `path:line`.
///
/// Locations are informational only. They are carried along for display and never take part in
/// comparing or classifying outcomes.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Location {
    path: Cow<'static, str>,
    line: u32,
}

impl Location {
    /// Creates a location from a path and a line number.
    ///
    /// Line numbers start at 1; a line of 0 is stored as 1.
    pub fn new(path: impl Into<Cow<'static, str>>, line: u32) -> Self {
        Self {
            path: path.into(),
            line: line.max(1),
        }
    }

    /// Returns the location of the caller.
    ///
    /// Inside a function annotated with `#[track_caller]`, this is the location of that
    /// function's caller instead.
    #[track_caller]
    pub fn caller() -> Self {
        panic::Location::caller().into()
    }

    /// The path of the source file.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The line within the source file.
    pub fn line(&self) -> u32 {
        self.line
    }

    /// Formats the location the way it trails a rendered line: ` (path:line)`.
    pub(crate) fn suffix(location: Option<&Location>) -> String {
        match location {
            Some(location) => format!(" ({location})"),
            None => String::new(),
        }
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.path, self.line)
    }
}

impl From<&'static panic::Location<'static>> for Location {
    fn from(location: &'static panic::Location<'static>) -> Self {
        Self::new(location.file(), location.line())
    }
}
