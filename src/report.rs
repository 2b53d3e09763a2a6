//! Line-oriented text assembly for rendered outcomes.

use crate::Styling;

/// The platform line terminator.
pub(crate) const EOL: &str = if cfg!(windows) { "\r\n" } else { "\n" };

/// How many stack frames are rendered before the trace is cut off.
pub(crate) const MAX_FRAMES: usize = 20;

/// Accumulates styled lines, each terminated by [`EOL`].
pub(crate) struct Report<'a, S: ?Sized> {
    styling: &'a S,
    output: String,
}

impl<'a, S> Report<'a, S>
where
    S: Styling + ?Sized,
{
    pub(crate) fn new(styling: &'a S) -> Self {
        Self {
            styling,
            output: String::new(),
        }
    }

    pub(crate) fn success(&mut self, text: &str) {
        let line = self.styling.success(text);
        self.push_line(&line);
    }

    pub(crate) fn warn(&mut self, text: &str) {
        let line = self.styling.warn(text);
        self.push_line(&line);
    }

    pub(crate) fn fail(&mut self, text: &str) {
        let line = self.styling.fail(text);
        self.push_line(&line);
    }

    /// Appends a stack trace block.
    ///
    /// At most [`MAX_FRAMES`] frames are written, followed by `...` if any were left out. The
    /// block always ends with a terminator, so an empty trace is a bare [`EOL`].
    pub(crate) fn stack(&mut self, frames: &[String]) {
        let lines: Vec<String> = frames
            .iter()
            .take(MAX_FRAMES)
            .map(|frame| self.styling.fail(&format!("    {frame}")))
            .collect();
        self.output.push_str(&lines.join(EOL));
        if frames.len() > MAX_FRAMES {
            self.output.push_str(EOL);
            self.output.push_str(&self.styling.fail("    ..."));
        }
        self.output.push_str(EOL);
    }

    pub(crate) fn finish(self) -> String {
        self.output
    }

    fn push_line(&mut self, line: &str) {
        self.output.push_str(line);
        self.output.push_str(EOL);
    }
}
