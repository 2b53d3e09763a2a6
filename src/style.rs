//! Console styling for rendered outcomes.
//!
//! Rendering never hard-codes color codes. Instead, every rendered line is passed through a
//! [`Styling`], which decides how a successful, warning, or failing line looks. [`Palette`]
//! provides the two styles a console reporter needs: ANSI colors and plain text.

use crate::log;
use std::{
    env,
    ffi::OsStr,
    io::{self, IsTerminal, Write},
};
use termcolor::{Ansi, Color, ColorChoice, ColorSpec, WriteColor};

/// Applies a tone to a single line of rendered text.
///
/// The text never contains a line terminator. Implementations return the styled line without
/// adding one.
pub trait Styling {
    /// Styles a line describing a passed test.
    fn success(&self, text: &str) -> String;

    /// Styles a line describing an ignored or canceled test.
    fn warn(&self, text: &str) -> String;

    /// Styles a line describing a failed test.
    fn fail(&self, text: &str) -> String;
}

/// The built-in styles.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Palette {
    /// Green, yellow and red foreground colors using ANSI escape sequences.
    #[default]
    Ansi,
    /// No styling at all.
    Plain,
}

impl Palette {
    /// Chooses a palette for standard output.
    ///
    /// `ColorChoice::Auto` only picks colors when `NO_COLOR` is unset, `TERM` is not `dumb`, and
    /// standard output is a terminal.
    pub fn new(choice: ColorChoice) -> Self {
        let palette = match choice {
            ColorChoice::Always | ColorChoice::AlwaysAnsi => Self::Ansi,
            ColorChoice::Never => Self::Plain,
            ColorChoice::Auto => Self::detect(
                env::var_os("NO_COLOR").as_deref(),
                env::var("TERM").ok().as_deref(),
                io::stdout().is_terminal(),
            ),
        };
        log::debug!("selected {:?} palette for {:?}", palette, choice);
        palette
    }

    /// Chooses a palette from the `NO_COLOR` and `TERM` variables and whether the output is a
    /// terminal.
    fn detect(no_color: Option<&OsStr>, term: Option<&str>, terminal: bool) -> Self {
        if no_color.is_none() && term != Some("dumb") && terminal {
            Self::Ansi
        } else {
            Self::Plain
        }
    }

    fn paint(self, color: Color, text: &str) -> String {
        match self {
            Self::Plain => text.to_owned(),
            Self::Ansi => {
                let mut ansi = Ansi::new(Vec::new());
                // Writing to a `Vec` cannot fail.
                let _ = ansi.set_color(ColorSpec::new().set_fg(Some(color)));
                let _ = ansi.write_all(text.as_bytes());
                let _ = ansi.reset();
                String::from_utf8_lossy(&ansi.into_inner()).into_owned()
            }
        }
    }
}

impl Styling for Palette {
    fn success(&self, text: &str) -> String {
        self.paint(Color::Green, text)
    }

    fn warn(&self, text: &str) -> String {
        self.paint(Color::Yellow, text)
    }

    fn fail(&self, text: &str) -> String {
        self.paint(Color::Red, text)
    }
}
